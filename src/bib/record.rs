// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use indexmap::IndexMap;

use crate::{
    error::RewriteError,
    latex::{
        scanner::{self, Delimiter},
        text::comment_start,
    },
};

/// Record kinds that carry no citation key.
const UNKEYED_KINDS: [&str; 2] = ["string", "preamble"];

/// One `@kind{...}` block of a `.bib` file, borrowed from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub kind: &'a str,
    pub key: Option<&'a str>,
    pub text: &'a str,
}

impl RawRecord<'_> {
    pub fn is_comment(&self) -> bool {
        self.kind.eq_ignore_ascii_case("comment")
    }
}

/// Walks the `@kind{ ... }` records of a bibliography.
///
/// Record bodies are delimited with the brace scanner, so `@` inside a field
/// value never starts a record. A record whose braces do not balance is
/// reported and scanning resumes right after its `@`. Text between records
/// is ignored.
pub fn split_records(source: &str) -> (Vec<RawRecord<'_>>, Vec<RewriteError>) {
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut cursor = 0;

    while let Some(found) = source[cursor..].find('@') {
        let start = cursor + found;
        cursor = start + 1;

        let rest = &source[cursor..];
        let kind_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        if kind_len == 0 {
            continue;
        }
        let kind = &rest[..kind_len];

        let after_kind = cursor + kind_len;
        let open_at = after_kind
            + source[after_kind..]
                .find(|c: char| !c.is_whitespace())
                .unwrap_or(source.len() - after_kind);
        if source.as_bytes().get(open_at) != Some(&b'{') {
            continue;
        }

        let span = match scanner::argument(source, open_at, Delimiter::Curly) {
            Ok(span) => span,
            Err(_) => {
                warnings.push(RewriteError::MetadataParseError {
                    key: None,
                    message: format!("unbalanced braces in `@{}` record at byte {}", kind, start),
                });
                continue;
            }
        };

        let key = if UNKEYED_KINDS.iter().any(|k| kind.eq_ignore_ascii_case(k))
            || kind.eq_ignore_ascii_case("comment")
        {
            None
        } else {
            let body = &source[span.inner()];
            match body.find(',') {
                Some(comma) if !body[..comma].trim().is_empty() => Some(body[..comma].trim()),
                _ => {
                    warnings.push(RewriteError::MetadataParseError {
                        key: None,
                        message: format!("`@{}` record at byte {} has no key", kind, start),
                    });
                    cursor = span.end();
                    continue;
                }
            }
        };

        records.push(RawRecord {
            kind,
            key,
            text: &source[start..span.end()],
        });
        cursor = span.end();
    }

    (records, warnings)
}

/// Keeps one record per key; the last definition wins but stays where the
/// key first appeared. Unkeyed records come first, comments are dropped.
pub fn deduplicate<'a>(records: &[RawRecord<'a>]) -> Vec<RawRecord<'a>> {
    let mut unkeyed = Vec::new();
    let mut keyed: IndexMap<&str, RawRecord<'a>> = IndexMap::new();

    for record in records.iter().filter(|r| !r.is_comment()) {
        match record.key {
            Some(key) => {
                keyed.insert(key, *record);
            }
            None => unkeyed.push(*record),
        }
    }

    unkeyed.extend(keyed.into_values());
    unkeyed
}

/// Records separated by a blank line.
pub fn render(records: &[RawRecord<'_>]) -> String {
    let mut output = records
        .iter()
        .map(|r| r.text)
        .collect::<Vec<_>>()
        .join("\n\n");
    if !output.is_empty() {
        output.push('\n');
    }
    output
}

/// Collapses one record onto a single line.
///
/// Lines are trimmed and stripped of `%` comments, then joined with a space,
/// except right after an opening brace or right before a closing one.
pub fn normalize_record(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let lines = text
        .lines()
        .map(|line| match comment_start(line) {
            Some(start) => &line[..start],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty());

    for line in lines {
        if !output.is_empty() && !output.ends_with('{') && !line.starts_with('}') {
            output.push(' ');
        }
        output.push_str(line);
    }
    output
}

/// One record per line, optionally deduplicated.
pub fn normalize(source: &str, dedup: bool) -> (String, Vec<RewriteError>) {
    let (records, warnings) = split_records(source);
    let records = match dedup {
        true => deduplicate(&records),
        false => records.into_iter().filter(|r| !r.is_comment()).collect(),
    };

    let mut output = records
        .iter()
        .map(|r| normalize_record(r.text))
        .collect::<Vec<_>>()
        .join("\n");
    if !output.is_empty() {
        output.push('\n');
    }
    (output, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIB: &str = r#"% exported
@string{acm = "ACM Press"}

@article{knuth84,
  author = {Knuth, Donald E.},
  title = {Literate {P}rogramming},
  year = 1984
}

junk between records, mail@example.com

@book{lamport94,
  author = {Lamport, Leslie},
  title = {LaTeX},
  publisher = acm,
}

@comment{ignored}

@article{knuth84,
  author = {Knuth, Donald},
  title = {Second},
  year = 1985
}
"#;

    #[test]
    fn test_split_records() {
        let (records, warnings) = split_records(BIB);
        assert!(warnings.is_empty());
        let keys: Vec<_> = records.iter().map(|r| r.key).collect();
        assert_eq!(
            keys,
            vec![None, Some("knuth84"), Some("lamport94"), None, Some("knuth84")]
        );
        assert_eq!(records[0].kind, "string");
        assert!(records[1].text.starts_with("@article{knuth84,"));
        assert!(records[1].text.ends_with("year = 1984\n}"));
        assert!(records[3].is_comment());
    }

    #[test]
    fn test_deduplicate_last_wins_first_position() {
        let (records, _) = split_records(BIB);
        let unique = deduplicate(&records);
        let keys: Vec<_> = unique.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec![None, Some("knuth84"), Some("lamport94")]);
        assert!(unique[1].text.contains("Second"));
        assert!(render(&unique).starts_with("@string{acm = \"ACM Press\"}\n\n@article{knuth84,"));
    }

    #[test]
    fn test_unbalanced_record_is_skipped() {
        let (records, warnings) = split_records("@article{broken,\n title = {x}\n\n@book{ok, title={y}}");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, Some("ok"));
        assert_eq!(warnings.len(), 1);
        assert!(!warnings[0].is_fatal());
    }

    #[test]
    fn test_missing_key_is_reported() {
        let (records, warnings) = split_records("@article{title = {x}}");
        assert!(records.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_normalize_record() {
        let record = "@article{knuth84,\n  author = {Knuth}, % first\n  title = {\n    Literate\n  },\n  year = 1984\n}";
        assert_eq!(
            normalize_record(record),
            "@article{knuth84, author = {Knuth}, title = {Literate}, year = 1984}"
        );
    }

    #[test]
    fn test_normalize() {
        let (output, warnings) = normalize(BIB, true);
        assert!(warnings.is_empty());
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[2],
            "@book{lamport94, author = {Lamport, Leslie}, title = {LaTeX}, publisher = acm,}"
        );

        let (output, _) = normalize(BIB, false);
        assert_eq!(output.lines().count(), 4);
    }
}
