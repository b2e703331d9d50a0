// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.
// Authors: Wikitex contributors

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{eyre, WrapErr};

use crate::{
    bib::{cite, metadata, record},
    cli, config,
};

#[derive(clap::Args)]
pub struct CiteCommand {
    /// Path to the BibTeX bibliography.
    #[arg(required = true)]
    pub bib: Utf8PathBuf,

    /// Text containing `\cite` markers, standard input is read when omitted.
    #[arg(short, long)]
    pub input: Option<Utf8PathBuf>,

    /// Where to write the deduplicated bibliography, overrides the configuration.
    #[arg(long)]
    pub dedup_output: Option<Utf8PathBuf>,

    /// Do not write the deduplicated bibliography.
    #[arg(long, default_value_t = false)]
    pub no_dedup_file: bool,

    /// Path to the configuration file (e.g., "Wikitex.toml").
    #[arg(short, long, default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    pub config: String,
}

pub fn cite(command: &CiteCommand) -> eyre::Result<()> {
    let config = config::load_config(Utf8Path::new(&command.config))?;
    let source = cli::read_source(Some(&command.bib))?;

    let (records, warnings) = record::split_records(&source);
    cli::report(&warnings);
    let deduplicated = record::render(&record::deduplicate(&records));

    let dedup_path = match (command.no_dedup_file, &command.dedup_output) {
        (true, _) => None,
        (false, Some(path)) => Some(path.clone()),
        (false, None) => config
            .cite
            .deduplicated_output
            .as_deref()
            .map(Utf8PathBuf::from),
    };
    if let Some(path) = dedup_path {
        std::fs::write(&path, &deduplicated)
            .wrap_err_with(|| eyre!("failed to write deduplicated bibliography to `{}`", path))?;
        eprintln!("Created deduplicated bibliography at: {}", path);
    }

    let (bibliography, warnings) = metadata::parse_bibliography(&deduplicated);
    cli::report(&warnings);
    match bibliography.is_empty() {
        true => color_print::ceprintln!("<y>Warning: no usable records in `{}`</>", command.bib),
        false => eprintln!("Loaded {} records from: {}", bibliography.len(), command.bib),
    }

    let text = cli::read_source(command.input.as_deref())?;
    let cited = cite::inline_citations(&text, &bibliography, &config.cite.references_heading);
    cli::report(&cited.unresolved);

    println!("{}", cited.text);
    Ok(())
}
