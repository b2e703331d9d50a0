// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::fmt;

/// Failures raised while rewriting a document or reading a bibliography.
///
/// Only [`RewriteError::MalformedInput`] aborts a run. The other variants are
/// collected and reported as warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// Delimiters do not balance. `offset` is relative to the text handed to
    /// the failing pass.
    MalformedInput { offset: usize, reason: String },

    /// A citation key has no record in the bibliography.
    UnresolvedReference { key: String },

    /// A bibliography record could not be read and was skipped.
    MetadataParseError { key: Option<String>, message: String },
}

impl RewriteError {
    pub fn malformed<S: Into<String>>(offset: usize, reason: S) -> Self {
        Self::MalformedInput {
            offset,
            reason: reason.into(),
        }
    }

    /// Moves the reported offset of a malformed-input error by `by` bytes,
    /// used when the error was raised on a slice of a larger document.
    pub fn shifted(self, by: usize) -> Self {
        match self {
            Self::MalformedInput { offset, reason } => Self::MalformedInput {
                offset: offset + by,
                reason,
            },
            other => other,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewriteError::MalformedInput { offset, reason } => {
                write!(f, "malformed input at byte {}: {}", offset, reason)
            }
            RewriteError::UnresolvedReference { key } if key.trim().is_empty() => {
                write!(f, "citation marker `{{{}}}` names no key", key)
            }
            RewriteError::UnresolvedReference { key } => {
                write!(f, "citation key `{}` not found in bibliography", key)
            }
            RewriteError::MetadataParseError { key: Some(key), message } => {
                write!(f, "skipping bibliography record `{}`: {}", key, message)
            }
            RewriteError::MetadataParseError { key: None, message } => {
                write!(f, "skipping bibliography record: {}", message)
            }
        }
    }
}

impl std::error::Error for RewriteError {}
