// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use crate::error::RewriteError;

use super::pipeline::Pass;

/// Replaces alternating occurrences of `delimiter` with `open` and `close`.
/// A delimiter preceded by a backslash is left alone.
fn pair_up(source: &str, delimiter: &str, open: &str, close: &str) -> Result<String, RewriteError> {
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    let mut search = 0;
    let mut unclosed: Option<usize> = None;

    while let Some(found) = source[search..].find(delimiter) {
        let at = search + found;
        search = at + delimiter.len();
        if at > 0 && source.as_bytes()[at - 1] == b'\\' {
            continue;
        }

        output.push_str(&source[cursor..at]);
        match unclosed {
            Some(_) => {
                output.push_str(close);
                unclosed = None;
            }
            None => {
                output.push_str(open);
                unclosed = Some(at);
            }
        }
        cursor = search;
    }

    if let Some(at) = unclosed {
        return Err(RewriteError::malformed(
            at,
            format!("unterminated `{}` math", delimiter),
        ));
    }

    output.push_str(&source[cursor..]);
    Ok(output)
}

pub fn rewrite_math(source: &str) -> Result<String, RewriteError> {
    let display = pair_up(source, "$$", "\n<math>", "</math>\n")?;
    let inline = pair_up(&display, "$", "<math>", "</math>")?;
    Ok(inline.replace(r"\$", "$"))
}

/// `$$...$$` to display `<math>` blocks, `$...$` to inline `<math>`.
pub struct InlineMath;

impl Pass for InlineMath {
    fn name(&self) -> &'static str {
        "math"
    }

    fn apply(&self, source: &str) -> Result<String, RewriteError> {
        rewrite_math(source)
    }
}
