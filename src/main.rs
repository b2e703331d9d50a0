// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.
// Authors: Wikitex contributors

mod bib;
mod cli;
mod config;
mod error;
mod latex;

use clap::Parser;

use crate::cli::{
    cite::CiteCommand, convert::ConvertCommand, init::InitCommand, normalize::NormalizeCommand,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Convert a LaTeX document into wiki articles, one per `%#break` segment.
    #[command(visible_alias = "c")]
    Convert(ConvertCommand),

    /// Replace `\cite` markers with short citations and append a reference list.
    #[command()]
    Cite(CiteCommand),

    /// Rewrite a BibTeX file with one record per line.
    #[command(visible_alias = "n")]
    Normalize(NormalizeCommand),

    /// Write the default configuration file.
    #[command(visible_alias = "i")]
    Init(InitCommand),
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Command::Convert(command) => crate::cli::convert::convert(command)?,
        Command::Cite(command) => crate::cli::cite::cite(command)?,
        Command::Normalize(command) => crate::cli::normalize::normalize(command)?,
        Command::Init(command) => crate::cli::init::init(command)?,
    };
    Ok(())
}
