// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use crate::error::RewriteError;

use super::{
    catalog::{Catalog, Command, Layout, BLOCK_SEPARATOR},
    pipeline::Pass,
    scanner,
};

/// Replaces every occurrence of `command` with its opening markup, keeps the
/// argument, and closes the markup at the argument's matching delimiter.
///
/// The source is read left to right into a fresh buffer, so offsets found by
/// the scanner always refer to the unmodified text. Occurrences nested inside
/// an argument are rewritten recursively.
pub fn rewrite_command(source: &str, command: &Command) -> Result<String, RewriteError> {
    let marker = command.marker();
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find(marker) {
        let start = cursor + found;
        let span = scanner::argument(source, command.open_at(start), command.delimiter())?;

        let inner = span.inner();
        let argument =
            rewrite_command(&source[inner.clone()], command).map_err(|e| e.shifted(inner.start))?;

        output.push_str(&source[cursor..start]);
        output.push_str(command.open());
        output.push_str(&argument);
        output.push_str(command.close());
        if command.layout() == Layout::Block {
            output.push_str(BLOCK_SEPARATOR);
        }
        cursor = span.end();
    }

    output.push_str(&source[cursor..]);
    Ok(output)
}

/// Deletes every occurrence of `command` together with its whole argument.
pub fn remove_command(source: &str, command: &Command) -> Result<String, RewriteError> {
    let marker = command.marker();
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find(marker) {
        let start = cursor + found;
        let span = scanner::argument(source, command.open_at(start), command.delimiter())?;
        output.push_str(&source[cursor..start]);
        cursor = span.end();
    }

    output.push_str(&source[cursor..]);
    Ok(output)
}

/// Runs every command of a catalog, in catalog order.
pub struct RewriteCommands {
    name: &'static str,
    catalog: Catalog,
}

impl RewriteCommands {
    pub fn new(name: &'static str, catalog: Catalog) -> Self {
        Self { name, catalog }
    }
}

impl Pass for RewriteCommands {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, source: &str) -> Result<String, RewriteError> {
        let mut source = source.to_string();
        for command in self.catalog.commands() {
            source = rewrite_command(&source, command)?;
        }
        Ok(source)
    }
}

pub struct RemoveCommands {
    commands: Vec<Command>,
}

impl RemoveCommands {
    pub fn new(commands: Vec<Command>) -> Self {
        Self { commands }
    }
}

impl Pass for RemoveCommands {
    fn name(&self) -> &'static str {
        "remove-commands"
    }

    fn apply(&self, source: &str) -> Result<String, RewriteError> {
        let mut source = source.to_string();
        for command in &self.commands {
            source = remove_command(&source, command)?;
        }
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latex::catalog::CommandRule;

    fn command(rule: CommandRule) -> Command {
        rule.try_into().unwrap()
    }

    #[test]
    fn test_emph() {
        let emph = command(CommandRule::inline(r"\emph{", "''", "''"));
        let output = rewrite_command(r"a \emph{x} b", &emph).unwrap();
        assert_eq!(output, "a ''x'' b");
    }

    #[test]
    fn test_nested_braces_close_at_outer() {
        let section = command(CommandRule::block(r"\section{", "\n===", "==="));
        let output = rewrite_command(r"\section{A {B} C}after", &section).unwrap();
        assert_eq!(output, "\n===A {B} C===\n\nafter");
    }

    #[test]
    fn test_same_marker_nested() {
        let bold = command(CommandRule::inline(r"\textbf{", "<b>", "</b>"));
        let output = rewrite_command(r"\textbf{a \textbf{b} c} \textbf{d}", &bold).unwrap();
        assert_eq!(output, "<b>a <b>b</b> c</b> <b>d</b>");
    }

    #[test]
    fn test_unterminated_is_malformed() {
        let emph = command(CommandRule::inline(r"\emph{", "''", "''"));
        let err = rewrite_command(r"ok \emph{unterminated", &emph).unwrap_err();
        assert_eq!(
            err,
            RewriteError::MalformedInput {
                offset: 8,
                reason: "unbalanced `{`".to_string()
            }
        );
    }

    #[test]
    fn test_unbalanced_outer_reports_first_marker() {
        let emph = command(CommandRule::inline(r"\emph{", "''", "''"));
        let err = rewrite_command(r"\emph{\emph{x}", &emph).unwrap_err();
        assert!(matches!(err, RewriteError::MalformedInput { offset: 5, .. }));
    }

    #[test]
    fn test_labelled_item() {
        let pass = RewriteCommands::new("labelled-items", Catalog::labelled_items());
        let output = pass.apply(r"\item[Key [x]] value").unwrap();
        assert_eq!(output, "* ''Key [x]'' value");
    }

    #[test]
    fn test_catalog_order_handles_nesting() {
        let pass = RewriteCommands::new("commands", Catalog::standard());
        let output = pass.apply(r"\section{A \emph{B} C}").unwrap();
        assert_eq!(output, "\n===A ''B'' C===\n\n");
    }

    #[test]
    fn test_remove_index() {
        let pass = RemoveCommands::new(vec![Command::removal(r"\index{").unwrap()]);
        let output = pass
            .apply(r"Graphs\index{graph!{directed}} are\index{x} fun")
            .unwrap();
        assert_eq!(output, "Graphs are fun");
    }
}
