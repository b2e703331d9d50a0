// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{eyre, WrapErr};

use super::pipeline::Pipeline;

pub const DOCUMENT_BEGIN: &str = r"\begin{document}";
pub const DOCUMENT_END: &str = r"\end{document}";

/// Text between `\begin{document}` and `\end{document}`. Either bound may be
/// missing, in which case the document start or end is used.
pub fn document_body(source: &str) -> &str {
    let start = source
        .find(DOCUMENT_BEGIN)
        .map_or(0, |at| at + DOCUMENT_BEGIN.len());
    let end = source[start..]
        .find(DOCUMENT_END)
        .map_or(source.len(), |at| start + at);
    &source[start..end]
}

/// Splits at every `marker`. `n` markers always give `n + 1` segments.
pub fn split_segments<'a>(body: &'a str, marker: &str) -> Vec<&'a str> {
    if marker.is_empty() {
        return vec![body];
    }
    body.split(marker).collect()
}

/// Converts every segment of the document body independently.
pub fn convert_document(source: &str, marker: &str, pipeline: &Pipeline) -> eyre::Result<Vec<String>> {
    split_segments(document_body(source), marker)
        .into_iter()
        .enumerate()
        .map(|(index, segment)| {
            pipeline
                .run(segment)
                .wrap_err_with(|| eyre!("failed to convert article {}", index))
        })
        .collect()
}

/// `<base><index>.<extension>`, e.g. `paper0.wiki` for `paper`.
pub fn article_path(base: &Utf8Path, index: usize, extension: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(format!("{}{}.{}", base, index, extension))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::convert::Convert;

    #[test]
    fn test_document_body() {
        let source = "\\documentclass{article}\n\\begin{document}\nbody\n\\end{document}\n";
        assert_eq!(document_body(source), "\nbody\n");
        assert_eq!(document_body("plain"), "plain");
        assert_eq!(document_body("a\\end{document}b"), "a");
    }

    #[test]
    fn test_two_markers_three_segments() {
        let segments = split_segments("one\n%#break\ntwo\n%#break\nthree", "%#break");
        assert_eq!(segments, vec!["one\n", "\ntwo\n", "\nthree"]);
        assert_eq!(split_segments("whole", "%#break"), vec!["whole"]);
    }

    #[test]
    fn test_convert_document() {
        let pipeline = Pipeline::from_config(&Convert::default()).unwrap();
        let source = "\\begin{document}\n\\section{A}\none\n%#break\n\\emph{two}\n%#break\nthree $x$\n\\end{document}";
        let articles = convert_document(source, "%#break", &pipeline).unwrap();
        assert_eq!(articles, vec!["===A===\n\none", "''two''", "three <math>x</math>"]);
    }

    #[test]
    fn test_convert_document_reports_article() {
        let pipeline = Pipeline::from_config(&Convert::default()).unwrap();
        let err = convert_document("fine\n%#break\n\\emph{bad", "%#break", &pipeline).unwrap_err();
        assert_eq!(err.to_string(), "failed to convert article 1");
    }

    #[test]
    fn test_article_path() {
        let path = article_path(Utf8Path::new("out/paper"), 2, "wiki");
        assert_eq!(path, Utf8PathBuf::from("out/paper2.wiki"));
    }
}
