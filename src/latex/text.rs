// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::RewriteError;

use super::pipeline::Pass;

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").expect("valid blank line regex"));

/// Byte offset of the first `%` not escaped as `\%`. A `%` after `\\` starts a
/// comment, so only an odd run of backslashes escapes it.
pub fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    (0..bytes.len()).find(|&i| {
        bytes[i] == b'%' && bytes[..i].iter().rev().take_while(|&&b| b == b'\\').count() % 2 == 0
    })
}

pub fn strip_comments(source: &str) -> String {
    source
        .split_inclusive('\n')
        .map(|line| match comment_start(line) {
            Some(start) if line.ends_with('\n') => format!("{}\n", &line[..start]),
            Some(start) => line[..start].to_string(),
            None => line.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Environments and fixed commands rewritten literally. `\item` comes after
/// the list environments whose names it prefixes.
pub fn standard_replacements() -> Vec<Replacement> {
    [
        (r"\begin{quote}", ""),
        (r"\end{quote}", ""),
        ("---", "-"),
        (r"\begin{itemize}", ""),
        (r"\end{itemize}", ""),
        (r"\begin{enumerate}", ""),
        (r"\end{enumerate}", ""),
        (r"\begin{description}", ""),
        (r"\end{description}", ""),
        (r"\item", "*"),
        (r"\begin{eqnarray*}", "\n<math>"),
        (r"\end{eqnarray*}", "</math>\n"),
        (r"\begin{eqnarray}", "\n<math>"),
        (r"\end{eqnarray}", "</math>\n"),
        (r"\begin{equation*}", "\n<math>"),
        (r"\end{equation*}", "</math>\n"),
        (r"\begin{equation}", "\n<math>"),
        (r"\end{equation}", "</math>\n"),
        (r"\begin{align*}", "\n<math>"),
        (r"\end{align*}", "</math>\n"),
        (r"\begin{align}", "\n<math>"),
        (r"\end{align}", "</math>\n"),
        (r"\begin{theorem}", "'''Theorem:'''"),
        (r"\end{theorem}", ""),
        (r"\begin{lemma}", "'''Lemma:'''"),
        (r"\end{lemma}", ""),
        (r"\begin{corollary}", "'''Corollary:'''"),
        (r"\end{corollary}", ""),
        (r"\begin{proof}", "''Proof.''"),
        (r"\end{proof}", ""),
        (r"\qed", "<strong>QED</strong>"),
    ]
    .into_iter()
    .map(|(from, to)| Replacement::new(from, to))
    .collect()
}

/// Literal replacement, except that a pattern ending in a control word such
/// as `\item` leaves longer commands like `\itemsep` alone.
fn replace_literal(source: &str, from: &str, to: &str) -> String {
    let control_word = from.starts_with('\\') && from.ends_with(|c: char| c.is_ascii_alphabetic());
    if !control_word {
        return source.replace(from, to);
    }

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    while let Some(found) = source[cursor..].find(from) {
        let start = cursor + found;
        let end = start + from.len();
        output.push_str(&source[cursor..start]);
        match source[end..].starts_with(|c: char| c.is_ascii_alphabetic()) {
            true => output.push_str(from),
            false => output.push_str(to),
        }
        cursor = end;
    }
    output.push_str(&source[cursor..]);
    output
}

pub fn apply_replacements(source: &str, replacements: &[Replacement]) -> String {
    replacements
        .iter()
        .filter(|r| !r.from.is_empty())
        .fold(source.to_string(), |source, r| {
            replace_literal(&source, &r.from, &r.to)
        })
}

pub struct TrimIndentation;

impl Pass for TrimIndentation {
    fn name(&self) -> &'static str {
        "trim-indentation"
    }

    fn apply(&self, source: &str) -> Result<String, RewriteError> {
        Ok(source
            .lines()
            .map(str::trim_start)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

pub struct StripComments;

impl Pass for StripComments {
    fn name(&self) -> &'static str {
        "strip-comments"
    }

    fn apply(&self, source: &str) -> Result<String, RewriteError> {
        Ok(strip_comments(source))
    }
}

/// TeX quotes to plain double quotes. Runs before any pass that emits `''`
/// markup, which this pass would otherwise destroy.
pub struct NormalizeQuotes;

impl Pass for NormalizeQuotes {
    fn name(&self) -> &'static str {
        "normalize-quotes"
    }

    fn apply(&self, source: &str) -> Result<String, RewriteError> {
        Ok(source.replace("``", "\"").replace("''", "\""))
    }
}

pub struct FixedReplacements {
    replacements: Vec<Replacement>,
}

impl FixedReplacements {
    pub fn new(replacements: Vec<Replacement>) -> Self {
        Self { replacements }
    }
}

impl Pass for FixedReplacements {
    fn name(&self) -> &'static str {
        "replacements"
    }

    fn apply(&self, source: &str) -> Result<String, RewriteError> {
        Ok(apply_replacements(source, &self.replacements))
    }
}

pub struct StripPatterns {
    patterns: Vec<Regex>,
}

impl StripPatterns {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex_lite::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }
}

impl Pass for StripPatterns {
    fn name(&self) -> &'static str {
        "strip-patterns"
    }

    fn apply(&self, source: &str) -> Result<String, RewriteError> {
        Ok(self
            .patterns
            .iter()
            .fold(source.to_string(), |source, re| {
                re.replace_all(&source, "").into_owned()
            }))
    }
}

/// Trims surrounding line breaks and keeps at most one blank line in a row.
pub struct BlankLines;

impl Pass for BlankLines {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn apply(&self, source: &str) -> Result<String, RewriteError> {
        let collapsed = BLANK_RUN.replace_all(source, "\n\n");
        Ok(collapsed.trim_matches('\n').to_string())
    }
}
