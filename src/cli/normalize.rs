// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.
// Authors: Wikitex contributors

use camino::Utf8PathBuf;

use crate::{bib::record, cli};

#[derive(clap::Args)]
pub struct NormalizeCommand {
    /// Path to the BibTeX file, standard input is read when omitted.
    pub input: Option<Utf8PathBuf>,

    /// Keep only the last definition of each citation key.
    #[arg(long, default_value_t = false)]
    pub dedup: bool,
}

pub fn normalize(command: &NormalizeCommand) -> eyre::Result<()> {
    let source = cli::read_source(command.input.as_deref())?;
    let (normalized, warnings) = record::normalize(&source, command.dedup);
    cli::report(&warnings);
    print!("{}", normalized);
    Ok(())
}
