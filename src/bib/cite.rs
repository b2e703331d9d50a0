// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.

use std::sync::LazyLock;

use indexmap::IndexSet;
use itertools::Itertools;
use regex_lite::{Captures, Regex};

use crate::error::RewriteError;

use super::metadata::{BibRecord, Bibliography};

static CITE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\cite(p|t)?\{([^}]*)\}").expect("valid cite regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiteStyle {
    /// `\cite` and `\citet`: Knuth (1984)
    Textual,

    /// `\citep`: (Knuth, 1984)
    Parenthetical,
}

#[derive(Debug)]
pub struct CitedText {
    pub text: String,
    pub unresolved: Vec<RewriteError>,
}

fn short_authors(record: &BibRecord) -> String {
    match record.authors.as_slice() {
        [] => record.key.clone(),
        [only] => only.family.clone(),
        [first, second] => format!("{} and {}", first.family, second.family),
        [first, ..] => format!("{} et al.", first.family),
    }
}

fn year(record: &BibRecord) -> &str {
    match record.year.is_empty() {
        true => "n.d.",
        false => &record.year,
    }
}

pub fn short_citation(records: &[&BibRecord], style: CiteStyle) -> String {
    match style {
        CiteStyle::Textual => records
            .iter()
            .map(|r| format!("{} ({})", short_authors(r), year(r)))
            .join("; "),
        CiteStyle::Parenthetical => format!(
            "({})",
            records
                .iter()
                .map(|r| format!("{}, {}", short_authors(r), year(r)))
                .join("; ")
        ),
    }
}

/// `# Authors (year). Title. Venue. Publisher.` with empty parts left out.
pub fn reference_line(record: &BibRecord) -> String {
    let authors = record.authors.iter().map(ToString::to_string).join(" and ");
    let head = match authors.is_empty() {
        true => format!("({}).", year(record)),
        false => format!("{} ({}).", authors, year(record)),
    };

    let tail = [&record.title, &record.venue, &record.publisher]
        .into_iter()
        .filter(|part| !part.is_empty())
        .map(|part| format!(" {}.", part.trim_end_matches('.')))
        .join("");

    format!("# {}{}", head, tail)
}

/// Sorted, deduplicated reference list under a `==heading==` line.
pub fn reference_list<'a, I>(records: I, heading: &str) -> String
where
    I: IntoIterator<Item = &'a BibRecord>,
{
    let lines = records.into_iter().map(reference_line).sorted().dedup();
    let mut list = format!("=={}==\n", heading);
    for line in lines {
        list.push_str(&line);
        list.push('\n');
    }
    list
}

/// Replaces citation markers with short citations and appends the list of
/// cited works.
///
/// A marker with any unknown key is left untouched and every unknown key is
/// reported, as is a marker naming no key at all. No list is appended when nothing was cited.
pub fn inline_citations(text: &str, bibliography: &Bibliography, heading: &str) -> CitedText {
    let mut cited: IndexSet<&str> = IndexSet::new();
    let mut unresolved = Vec::new();

    let replaced = CITE.replace_all(text, |caps: &Captures<'_>| {
        let style = match caps.get(1).map(|m| m.as_str()) {
            Some("p") => CiteStyle::Parenthetical,
            _ => CiteStyle::Textual,
        };
        let keys: Vec<&str> = caps[2]
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect();

        if keys.is_empty() {
            unresolved.push(RewriteError::UnresolvedReference {
                key: caps[2].to_string(),
            });
            return caps[0].to_string();
        }

        let missing: Vec<&str> = keys
            .iter()
            .copied()
            .filter(|k| bibliography.get(k).is_none())
            .collect();
        if !missing.is_empty() {
            unresolved.extend(missing.into_iter().map(|key| RewriteError::UnresolvedReference {
                key: key.to_string(),
            }));
            return caps[0].to_string();
        }

        let records: Vec<&BibRecord> = keys.iter().filter_map(|k| bibliography.get(k)).collect();
        cited.extend(records.iter().map(|r| r.key.as_str()));
        short_citation(&records, style)
    });

    let mut text = replaced.into_owned();
    if !cited.is_empty() {
        let list = reference_list(cited.iter().filter_map(|k| bibliography.get(k)), heading);
        text.push_str("\n\n");
        text.push_str(&list);
    }

    CitedText { text, unresolved }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bib::metadata::Author;

    fn bibliography() -> Bibliography {
        [
            BibRecord {
                key: "knuth84".into(),
                authors: vec![Author::new("Knuth", "Donald E.")],
                year: "1984".into(),
                title: "Literate Programming".into(),
                venue: "The Computer Journal".into(),
                publisher: String::new(),
            },
            BibRecord {
                key: "aho86".into(),
                authors: vec![
                    Author::new("Aho", "Alfred"),
                    Author::new("Sethi", "Ravi"),
                    Author::new("Ullman", "Jeffrey"),
                ],
                year: "1986".into(),
                title: "Compilers".into(),
                venue: String::new(),
                publisher: "Addison-Wesley".into(),
            },
            BibRecord {
                key: "anon".into(),
                ..Default::default()
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_textual_and_parenthetical() {
        let bib = bibliography();
        let cited = inline_citations(
            r"As \cite{knuth84} notes, compilers exist \citep{aho86, knuth84}.",
            &bib,
            "References",
        );
        assert!(cited.unresolved.is_empty());
        assert!(cited.text.starts_with(
            "As Knuth (1984) notes, compilers exist (Aho et al., 1986; Knuth, 1984)."
        ));
    }

    #[test]
    fn test_reference_list_dedup_and_sorted() {
        let bib = bibliography();
        let cited = inline_citations(r"\cite{knuth84} \citet{aho86} \citep{knuth84}", &bib, "References");
        let (_, list) = cited.text.split_once("\n\n").unwrap();
        assert_eq!(
            list,
            "==References==\n\
             # Aho, Alfred and Sethi, Ravi and Ullman, Jeffrey (1986). Compilers. Addison-Wesley.\n\
             # Knuth, Donald E. (1984). Literate Programming. The Computer Journal.\n"
        );
    }

    #[test]
    fn test_unresolved_left_in_place() {
        let bib = bibliography();
        let cited = inline_citations(r"See \citep{knuth84,missing}.", &bib, "References");
        assert_eq!(cited.text, r"See \citep{knuth84,missing}.");
        assert_eq!(
            cited.unresolved,
            vec![RewriteError::UnresolvedReference {
                key: "missing".into()
            }]
        );
    }

    #[test]
    fn test_empty_marker_is_reported() {
        let bib = bibliography();
        let cited = inline_citations(r"see \cite{} and \citep{ , }", &bib, "References");
        assert_eq!(cited.text, r"see \cite{} and \citep{ , }");
        assert_eq!(
            cited.unresolved,
            vec![
                RewriteError::UnresolvedReference { key: String::new() },
                RewriteError::UnresolvedReference { key: " , ".into() },
            ]
        );
    }

    #[test]
    fn test_record_without_metadata() {
        let bib = bibliography();
        let record = bib.get("anon").unwrap();
        assert_eq!(short_citation(&[record], CiteStyle::Textual), "anon (n.d.)");
        assert_eq!(reference_line(record), "# (n.d.).");
    }

    #[test]
    fn test_two_authors() {
        let record = BibRecord {
            key: "k".into(),
            authors: vec![Author::new("Kernighan", "Brian"), Author::new("Ritchie", "Dennis")],
            year: "1978".into(),
            ..Default::default()
        };
        assert_eq!(
            short_citation(&[&record], CiteStyle::Parenthetical),
            "(Kernighan and Ritchie, 1978)"
        );
    }
}
