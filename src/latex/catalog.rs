// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::scanner::Delimiter;

/// Appended after the closing markup of block-level commands.
pub const BLOCK_SEPARATOR: &str = "\n\n";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Layout {
    #[default]
    #[serde(rename = "inline")]
    Inline,

    #[serde(rename = "block")]
    Block,
}

/// A command marker and the markup replacing it, as written in the
/// configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandRule {
    /// Literal command text ending with its opening delimiter, e.g. `\emph{`.
    pub marker: String,
    pub open: String,
    pub close: String,
    #[serde(default)]
    pub layout: Layout,
}

impl CommandRule {
    pub fn inline(marker: &str, open: &str, close: &str) -> Self {
        Self {
            marker: marker.to_string(),
            open: open.to_string(),
            close: close.to_string(),
            layout: Layout::Inline,
        }
    }

    pub fn block(marker: &str, open: &str, close: &str) -> Self {
        Self {
            layout: Layout::Block,
            ..Self::inline(marker, open, close)
        }
    }
}

#[derive(Debug)]
pub struct InvalidCommand {
    pub marker: String,
}

impl fmt::Display for InvalidCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command marker `{}` must end with `{{` or `[`",
            self.marker
        )
    }
}

impl std::error::Error for InvalidCommand {}

/// A [`CommandRule`] whose marker is known to end with an opening delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    rule: CommandRule,
    delimiter: Delimiter,
}

impl Command {
    /// A command deleted together with its argument.
    pub fn removal(marker: &str) -> Result<Self, InvalidCommand> {
        CommandRule::inline(marker, "", "").try_into()
    }

    pub fn marker(&self) -> &str {
        &self.rule.marker
    }

    pub fn open(&self) -> &str {
        &self.rule.open
    }

    pub fn close(&self) -> &str {
        &self.rule.close
    }

    pub fn layout(&self) -> Layout {
        self.rule.layout
    }

    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }

    /// Offset of the marker's own opening delimiter for a marker found at `start`.
    pub fn open_at(&self, start: usize) -> usize {
        start + self.rule.marker.len() - 1
    }
}

impl TryFrom<CommandRule> for Command {
    type Error = InvalidCommand;

    fn try_from(rule: CommandRule) -> Result<Self, Self::Error> {
        match rule.marker.chars().last().and_then(Delimiter::from_open) {
            Some(delimiter) => Ok(Self { rule, delimiter }),
            None => Err(InvalidCommand {
                marker: rule.marker,
            }),
        }
    }
}

/// Ordered command table. Each marker is exhausted before the next one runs.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    commands: Vec<Command>,
}

impl Catalog {
    pub fn new<I>(rules: I) -> Result<Self, InvalidCommand>
    where
        I: IntoIterator<Item = CommandRule>,
    {
        let commands = rules
            .into_iter()
            .map(Command::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { commands })
    }

    /// Built-in inline styles and sectioning commands.
    pub fn standard() -> Self {
        Self::new(standard_rules()).unwrap_or_default()
    }

    /// `\item[label]` becomes a bullet with an emphasized label.
    pub fn labelled_items() -> Self {
        Self::new([CommandRule::inline(r"\item[", "* ''", "''")]).unwrap_or_default()
    }

    pub fn extend<I>(&mut self, rules: I) -> Result<(), InvalidCommand>
    where
        I: IntoIterator<Item = CommandRule>,
    {
        for rule in rules {
            self.commands.push(rule.try_into()?);
        }
        Ok(())
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }
}

fn standard_rules() -> Vec<CommandRule> {
    vec![
        CommandRule::inline(r"\emph{", "''", "''"),
        CommandRule::inline(r"\textbf{", "'''", "'''"),
        CommandRule::inline(r"\textit{", "''", "''"),
        CommandRule::inline(r"\texttt{", "<code>", "</code>"),
        CommandRule::block(r"\chapter{", "\n==", "=="),
        CommandRule::block(r"\chapter*{", "\n==", "=="),
        CommandRule::block(r"\section{", "\n===", "==="),
        CommandRule::block(r"\section*{", "\n===", "==="),
        CommandRule::block(r"\subsection{", "\n====", "===="),
        CommandRule::block(r"\subsection*{", "\n====", "===="),
        CommandRule::block(r"\subsubsection{", "\n=====", "====="),
        CommandRule::block(r"\subsubsection*{", "\n=====", "====="),
    ]
}
