// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.
// Authors: Wikitex contributors

use camino::Utf8Path;
use eyre::WrapErr;

use crate::config;

#[derive(clap::Args)]
pub struct InitCommand {
    /// Path to the new configuration file.
    #[arg(default_value_t = config::DEFAULT_CONFIG_PATH.into())]
    pub path: String,
}

pub fn init(command: &InitCommand) -> eyre::Result<()> {
    let config_path = Utf8Path::new(&command.path);
    if config_path.exists() {
        return Err(eyre::eyre!("Already exists: {}", config_path));
    }

    let toml = toml::to_string(&config::Config::default())
        .wrap_err("failed to serialize default config")?;
    std::fs::write(config_path, toml).wrap_err("failed to create default config file")?;
    println!("Created new config at: {}", config_path);
    Ok(())
}
