// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use crate::error::RewriteError;

use super::{
    pipeline::Pass,
    scanner::{self, Delimiter},
};

pub const HREF_MARKER: &str = r"\href{";
pub const URL_MARKER: &str = r"\url{";

/// Escapes LaTeX requires in URLs but MediaWiki does not.
const URL_ESCAPES: [(&str, &str); 4] = [(r"\_", "_"), (r"\#", "#"), (r"\&", "&"), (r"\%", "%")];

pub fn unescape_url(url: &str) -> String {
    URL_ESCAPES
        .iter()
        .fold(url.to_string(), |url, (from, to)| url.replace(from, to))
}

/// `\href{url}{anchor}` to `[url anchor]`. Links inside the anchor are
/// rewritten too.
pub fn rewrite_href(source: &str) -> Result<String, RewriteError> {
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find(HREF_MARKER) {
        let start = cursor + found;
        let url = scanner::argument(source, start + HREF_MARKER.len() - 1, Delimiter::Curly)?;

        let anchor_open = url.end()
            + source[url.end()..]
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(source.len() - url.end());
        if source.as_bytes().get(anchor_open) != Some(&b'{') {
            return Err(RewriteError::malformed(
                start,
                r"`\href` is missing its anchor argument",
            ));
        }
        let anchor = scanner::argument(source, anchor_open, Delimiter::Curly)?;
        let inner = anchor.inner();
        let text = rewrite_href(&source[inner.clone()]).map_err(|e| e.shifted(inner.start))?;

        output.push_str(&source[cursor..start]);
        output.push('[');
        output.push_str(&unescape_url(&source[url.inner()]));
        output.push(' ');
        output.push_str(&text);
        output.push(']');
        cursor = anchor.end();
    }

    output.push_str(&source[cursor..]);
    Ok(output)
}

/// `\url{url}` to the bare URL, which MediaWiki links on its own.
pub fn rewrite_url(source: &str) -> Result<String, RewriteError> {
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find(URL_MARKER) {
        let start = cursor + found;
        let url = scanner::argument(source, start + URL_MARKER.len() - 1, Delimiter::Curly)?;
        output.push_str(&source[cursor..start]);
        output.push_str(&unescape_url(&source[url.inner()]));
        cursor = url.end();
    }

    output.push_str(&source[cursor..]);
    Ok(output)
}

pub struct Links;

impl Pass for Links {
    fn name(&self) -> &'static str {
        "links"
    }

    fn apply(&self, source: &str) -> Result<String, RewriteError> {
        rewrite_url(&rewrite_href(source)?)
    }
}
