// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.
// Authors: Wikitex contributors

use eyre::{eyre, WrapErr};

use crate::{config::convert::Convert, error::RewriteError};

use super::{
    catalog::{Catalog, Command},
    commands::{RemoveCommands, RewriteCommands},
    link::Links,
    math::InlineMath,
    text::{
        self, BlankLines, FixedReplacements, NormalizeQuotes, StripComments, StripPatterns,
        TrimIndentation,
    },
};

/// One whole-document transform.
pub trait Pass {
    fn name(&self) -> &'static str;

    fn apply(&self, source: &str) -> Result<String, RewriteError>;
}

/// Passes applied in order, each consuming the previous one's output.
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<P: Pass + 'static>(mut self, pass: P) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    /// The LaTeX to MediaWiki pass order.
    ///
    /// Comments go first so commented-out markup is never rewritten. Quotes
    /// are normalized before any pass emits `''` markup, and labelled items
    /// run before the `\item` replacement would eat their marker.
    pub fn from_config(config: &Convert) -> eyre::Result<Self> {
        let removals = config
            .remove
            .iter()
            .map(|marker| Command::removal(marker))
            .collect::<Result<Vec<_>, _>>()
            .wrap_err("invalid `remove` marker in configuration")?;

        let mut catalog = Catalog::standard();
        catalog
            .extend(config.commands.iter().cloned())
            .wrap_err("invalid command in configuration")?;

        let mut replacements = text::standard_replacements();
        replacements.extend(config.replacements.iter().cloned());

        let strip = StripPatterns::new(config.strip_patterns.as_slice())
            .wrap_err("invalid `strip-patterns` in configuration")?;

        Ok(Self::new()
            .with(TrimIndentation)
            .with(StripComments)
            .with(RemoveCommands::new(removals))
            .with(NormalizeQuotes)
            .with(RewriteCommands::new("labelled-items", Catalog::labelled_items()))
            .with(FixedReplacements::new(replacements))
            .with(RewriteCommands::new("commands", catalog))
            .with(InlineMath)
            .with(Links)
            .with(strip)
            .with(BlankLines))
    }

    pub fn run(&self, source: &str) -> eyre::Result<String> {
        let mut source = source.to_string();
        for pass in &self.passes {
            source = pass
                .apply(&source)
                .wrap_err_with(|| eyre!("pass `{}` failed", pass.name()))?;
        }
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Pipeline {
        Pipeline::from_config(&Convert::default()).unwrap()
    }

    fn names(pipeline: &Pipeline) -> Vec<&'static str> {
        pipeline.passes.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn test_pass_order() {
        assert_eq!(
            names(&standard()),
            vec![
                "trim-indentation",
                "strip-comments",
                "remove-commands",
                "normalize-quotes",
                "labelled-items",
                "replacements",
                "commands",
                "math",
                "links",
                "strip-patterns",
                "layout",
            ]
        );
    }

    #[test]
    fn test_quotes_do_not_clobber_emphasis() {
        let output = standard().run(r"``Hi'' \emph{there}").unwrap();
        assert_eq!(output, "\"Hi\" ''there''");
    }

    #[test]
    fn test_labelled_item_survives_item_replacement() {
        let source = "\\begin{description}\n\\item[Term] text\n\\item plain\n\\end{description}";
        let output = standard().run(source).unwrap();
        assert_eq!(output, "* ''Term'' text\n* plain");
    }

    #[test]
    fn test_document() {
        let source = r"
            \section{Intro}\label{sec:intro}
            We study \textbf{graphs}\index{graph} % see below
            with $n$ nodes.
            \clearpage
            \subsection*{Links}
            Visit \href{http://x.com/a\_b}{the \emph{site}}.
        ";
        let output = standard().run(source).unwrap();
        assert_eq!(
            output,
            "===Intro===\n\nWe study '''graphs''' \nwith <math>n</math> nodes.\n\n\
             ====Links====\n\nVisit [http://x.com/a_b the ''site''].\n"
                .trim_end()
        );
    }

    #[test]
    fn test_failure_names_pass() {
        let err = standard().run(r"\emph{open").unwrap_err();
        assert_eq!(err.to_string(), "pass `commands` failed");
        let cause = err.downcast_ref::<RewriteError>().unwrap();
        assert!(cause.is_fatal());
    }

    #[test]
    fn test_custom_command() {
        let mut config = Convert::default();
        config.commands.push(crate::latex::catalog::CommandRule::inline(
            r"\underline{",
            "<u>",
            "</u>",
        ));
        let output = Pipeline::from_config(&config)
            .unwrap()
            .run(r"\underline{x}")
            .unwrap();
        assert_eq!(output, "<u>x</u>");
    }
}
