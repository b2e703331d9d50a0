// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::ops::Range;

use crate::error::RewriteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `{` and `}`
    Curly,

    /// `[` and `]`
    Square,
}

impl Delimiter {
    pub fn open(self) -> u8 {
        match self {
            Delimiter::Curly => b'{',
            Delimiter::Square => b'[',
        }
    }

    pub fn close(self) -> u8 {
        match self {
            Delimiter::Curly => b'}',
            Delimiter::Square => b']',
        }
    }

    pub fn from_open(c: char) -> Option<Self> {
        match c {
            '{' => Some(Delimiter::Curly),
            '[' => Some(Delimiter::Square),
            _ => None,
        }
    }
}

/// Byte offsets of an argument's opening and matching closing delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub open: usize,
    pub close: usize,
}

impl Span {
    /// The text between the delimiters.
    pub fn inner(&self) -> Range<usize> {
        self.open + 1..self.close
    }

    /// First offset after the closing delimiter.
    pub fn end(&self) -> usize {
        self.close + 1
    }
}

/// Returns the offset of the delimiter matching the one at `open_at`.
///
/// Depth starts at 1 for the delimiter at `open_at`. Nested pairs of the same
/// kind are skipped over, other kinds are ignored. Running off the end of the
/// document with depth still above zero is [`RewriteError::MalformedInput`].
pub fn find_closing(
    source: &str,
    open_at: usize,
    delimiter: Delimiter,
) -> Result<usize, RewriteError> {
    let bytes = source.as_bytes();
    let (open, close) = (delimiter.open(), delimiter.close());

    if bytes.get(open_at) != Some(&open) {
        return Err(RewriteError::malformed(
            open_at,
            format!("expected `{}`", open as char),
        ));
    }

    let mut depth = 1usize;
    for (location, &b) in bytes.iter().enumerate().skip(open_at + 1) {
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Ok(location);
            }
        }
    }

    Err(RewriteError::malformed(
        open_at,
        format!("unbalanced `{}`", open as char),
    ))
}

pub fn argument(source: &str, open_at: usize, delimiter: Delimiter) -> Result<Span, RewriteError> {
    let close = find_closing(source, open_at, delimiter)?;
    Ok(Span {
        open: open_at,
        close,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_level() {
        let source = r"\emph{x} tail";
        assert_eq!(find_closing(source, 5, Delimiter::Curly), Ok(7));
    }

    #[test]
    fn test_outer_close_wins() {
        let source = r"\section{A {B} C}";
        let close = find_closing(source, 8, Delimiter::Curly).unwrap();
        assert_eq!(close, source.len() - 1);
    }

    #[test]
    fn test_other_kind_ignored() {
        let source = "[a {b] c}]";
        assert_eq!(find_closing(source, 0, Delimiter::Square), Ok(5));
        assert_eq!(find_closing(source, 3, Delimiter::Curly), Ok(8));
    }

    #[test]
    fn test_unbalanced_is_malformed() {
        let err = find_closing(r"\emph{unterminated", 5, Delimiter::Curly).unwrap_err();
        assert!(matches!(err, RewriteError::MalformedInput { offset: 5, .. }));

        let err = find_closing("{{}", 0, Delimiter::Curly).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_start_must_be_opening_delimiter() {
        assert!(find_closing("abc", 1, Delimiter::Curly).is_err());
        assert!(find_closing("{", 4, Delimiter::Curly).is_err());
    }

    #[test]
    fn test_span() {
        let source = r"\item[label] rest";
        let span = argument(source, 5, Delimiter::Square).unwrap();
        assert_eq!(&source[span.inner()], "label");
        assert_eq!(&source[span.end()..], " rest");
    }

    #[test]
    fn test_multibyte_content() {
        let source = "{é{ü}}";
        let close = find_closing(source, 0, Delimiter::Curly).unwrap();
        assert_eq!(&source[close..], "}");
        assert_eq!(close, source.len() - 1);
    }
}
