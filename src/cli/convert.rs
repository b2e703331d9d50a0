// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.
// Authors: Wikitex contributors

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{bail, eyre, WrapErr};

use crate::{
    cli, config,
    latex::{pipeline::Pipeline, segment},
};

#[derive(clap::Args)]
pub struct ConvertCommand {
    /// Path to the LaTeX source, the `.tex` extension may be omitted. Use `-` for stdin.
    #[arg(required = true)]
    pub input: Utf8PathBuf,

    /// Directory receiving the articles, defaults to the directory of the input.
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    /// Print the articles instead of writing `<name><n>.wiki` files.
    #[arg(long, default_value_t = false)]
    pub stdout: bool,

    /// Path to the configuration file (e.g., "Wikitex.toml").
    #[arg(short, long, default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    pub config: String,
}

pub fn convert(command: &ConvertCommand) -> eyre::Result<()> {
    let config = config::load_config(Utf8Path::new(&command.config))?;
    let pipeline = Pipeline::from_config(&config.convert)?;
    let segment_break = &config.convert.segment_break;

    if command.input.as_str() == "-" {
        let source = cli::read_source(None)?;
        for article in segment::convert_document(&source, segment_break, &pipeline)? {
            println!("{}", article);
        }
        return Ok(());
    }

    let input = resolve_input(&command.input)?;
    let source = cli::read_source(Some(&input))?;
    let articles = segment::convert_document(&source, segment_break, &pipeline)
        .wrap_err_with(|| eyre!("failed to convert `{}`", input))?;

    if command.stdout {
        for article in &articles {
            println!("{}", article);
        }
        return Ok(());
    }

    let output_dir = match &command.output {
        Some(dir) => dir.clone(),
        None => input.parent().map(Utf8Path::to_owned).unwrap_or_default(),
    };
    if !output_dir.as_str().is_empty() {
        std::fs::create_dir_all(&output_dir)
            .wrap_err_with(|| eyre!("failed to create output directory `{}`", output_dir))?;
    }

    let base = output_dir.join(input.file_stem().unwrap_or("article"));
    for (index, article) in articles.iter().enumerate() {
        let path = segment::article_path(&base, index, &config.convert.extension);
        std::fs::write(&path, article)
            .wrap_err_with(|| eyre!("failed to write article to `{}`", path))?;
        println!("Created article: {}", path);
    }

    Ok(())
}

/// Accepts `paper.tex` as well as `paper`.
fn resolve_input(input: &Utf8Path) -> eyre::Result<Utf8PathBuf> {
    if input.is_file() {
        return Ok(input.to_owned());
    }
    let with_extension = Utf8PathBuf::from(format!("{}.tex", input));
    if with_extension.is_file() {
        return Ok(with_extension);
    }
    bail!("cannot find LaTeX source `{}`", input)
}
