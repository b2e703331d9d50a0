// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use serde::{Deserialize, Serialize};

use crate::latex::{catalog::CommandRule, text::Replacement};

pub const DEFAULT_EXTENSION: &str = "wiki";
pub const DEFAULT_SEGMENT_BREAK: &str = "%#break";

#[derive(Deserialize, Debug, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Convert {
    /// Extension of the generated articles.
    pub extension: String,
    pub segment_break: String,

    /// Commands deleted together with their argument.
    pub remove: Vec<String>,

    /// Regular expressions whose matches are deleted after all rewriting.
    pub strip_patterns: Vec<String>,

    /// Appended to the built-in command catalog.
    pub commands: Vec<CommandRule>,

    /// Appended to the built-in literal replacements.
    pub replacements: Vec<Replacement>,
}

impl Default for Convert {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            segment_break: DEFAULT_SEGMENT_BREAK.to_string(),
            remove: vec![r"\index{".to_string(), r"\label{".to_string()],
            strip_patterns: vec![r"\\clearpage.*".to_string(), r"\\newpage.*".to_string()],
            commands: vec![],
            replacements: vec![],
        }
    }
}
