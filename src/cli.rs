// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.
// Authors: Wikitex contributors

pub mod cite;
pub mod convert;
pub mod init;
pub mod normalize;

use camino::Utf8Path;
use eyre::{eyre, WrapErr};

use crate::error::RewriteError;

/// Reads `path`, or standard input when no path is given.
pub fn read_source(path: Option<&Utf8Path>) -> eyre::Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).wrap_err_with(|| eyre!("failed to read `{}`", path))
        }
        None => std::io::read_to_string(std::io::stdin()).wrap_err("failed to read standard input"),
    }
}

/// Prints collected problems to stderr.
pub fn report(problems: &[RewriteError]) {
    for problem in problems {
        match problem.is_fatal() {
            true => color_print::ceprintln!("<r>Error: {}</>", problem),
            false => color_print::ceprintln!("<y>Warning: {}</>", problem),
        }
    }
}
