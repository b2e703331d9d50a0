// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.
// Authors: Wikitex contributors

pub mod cite;
pub mod convert;

use camino::{Utf8Path, Utf8PathBuf};
use cite::Cite;
use convert::Convert;
use eyre::{eyre, WrapErr};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "./Wikitex.toml";

#[derive(Deserialize, Debug, Default, Serialize)]
pub struct Config {
    #[serde(default)]
    pub convert: Convert,

    #[serde(default)]
    pub cite: Cite,
}

/// Try to find toml file in the current directory or the parent directory.
/// Only the default path is looked up in the parent directory.
pub fn find_config(toml_file: &Utf8Path) -> Option<Utf8PathBuf> {
    if toml_file.exists() {
        return Some(toml_file.to_owned());
    }
    if toml_file != Utf8Path::new(DEFAULT_CONFIG_PATH) {
        return None;
    }

    let parent = toml_file.parent()?.canonicalize_utf8().ok()?;
    let candidate = parent.parent()?.join(DEFAULT_CONFIG_PATH);
    candidate.exists().then_some(candidate)
}

/// Reads the configuration at `toml_file`. Built-in defaults are used when
/// the default path is asked for and no file exists.
pub fn load_config(toml_file: &Utf8Path) -> eyre::Result<Config> {
    match find_config(toml_file) {
        Some(found) => {
            let toml = std::fs::read_to_string(&found)
                .wrap_err_with(|| eyre!("failed to read config file `{}`", found))?;
            parse_config(&toml).wrap_err_with(|| eyre!("invalid config file `{}`", found))
        }
        None if toml_file == Utf8Path::new(DEFAULT_CONFIG_PATH) => Ok(Config::default()),
        None => Err(eyre!("cannot find configuration file: {}", toml_file)),
    }
}

pub fn parse_config(config: &str) -> eyre::Result<Config> {
    let config: Config =
        toml::from_str(config).map_err(|e| eyre!("failed to parse config file: {}", e))?;
    Ok(config)
}
