// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.
// Authors: Wikitex contributors

use serde::{Deserialize, Serialize};

pub const DEFAULT_DEDUPLICATED_OUTPUT: &str = "refs_no_duplicates.bib";

#[derive(Deserialize, Debug, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Cite {
    pub references_heading: String,

    /// Where the deduplicated bibliography is written, if anywhere.
    pub deduplicated_output: Option<String>,
}

impl Default for Cite {
    fn default() -> Self {
        Self {
            references_heading: "References".to_string(),
            deduplicated_output: Some(DEFAULT_DEDUPLICATED_OUTPUT.to_string()),
        }
    }
}
