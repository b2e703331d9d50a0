// Copyright (c) 2025 Wikitex Project. All rights reserved.
// Released under the GPL-3.0 license as described in the file LICENSE.
// Authors: Wikitex contributors

use std::fmt;

use biblatex::{Chunk, Entry, Person, Spanned};
use indexmap::IndexMap;

use crate::error::RewriteError;

use super::record::{self, RawRecord};

/// Fields tried in order for the journal or proceedings name.
const VENUE_FIELDS: [&str; 3] = ["journal", "journaltitle", "booktitle"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Author {
    pub family: String,
    pub given: String,
}

impl Author {
    pub fn new(family: &str, given: &str) -> Self {
        Self {
            family: family.to_string(),
            given: given.to_string(),
        }
    }
}

impl From<&Person> for Author {
    fn from(person: &Person) -> Self {
        let family = match person.prefix.is_empty() {
            true => person.name.clone(),
            false => format!("{} {}", person.prefix, person.name),
        };
        Self::new(&family, &person.given_name)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.given.is_empty() {
            true => write!(f, "{}", self.family),
            false => write!(f, "{}, {}", self.family, self.given),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BibRecord {
    pub key: String,
    pub authors: Vec<Author>,
    pub year: String,
    pub title: String,
    pub venue: String,
    pub publisher: String,
}

impl BibRecord {
    fn from_entry(entry: &Entry) -> Self {
        let authors = entry
            .author()
            .map(|people| people.iter().map(Author::from).collect())
            .unwrap_or_default();

        let year = match field(entry, "year") {
            year if !year.is_empty() => year,
            _ => field(entry, "date")
                .split('-')
                .next()
                .unwrap_or_default()
                .to_string(),
        };

        let venue = VENUE_FIELDS
            .iter()
            .map(|name| field(entry, name))
            .find(|v| !v.is_empty())
            .unwrap_or_default();

        Self {
            key: entry.key.clone(),
            authors,
            year,
            title: field(entry, "title"),
            venue,
            publisher: field(entry, "publisher"),
        }
    }
}

/// Citation key to record, in bibliography order.
#[derive(Debug, Default)]
pub struct Bibliography {
    records: IndexMap<String, BibRecord>,
}

impl Bibliography {
    pub fn get(&self, key: &str) -> Option<&BibRecord> {
        self.records.get(key)
    }

    pub fn insert(&mut self, record: BibRecord) {
        self.records.insert(record.key.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<BibRecord> for Bibliography {
    fn from_iter<I: IntoIterator<Item = BibRecord>>(iter: I) -> Self {
        let mut bibliography = Bibliography::default();
        for record in iter {
            bibliography.insert(record);
        }
        bibliography
    }
}

pub fn chunks_to_string(chunks: &[Spanned<Chunk>]) -> String {
    chunks
        .iter()
        .map(|c| match &c.v {
            Chunk::Normal(s) => s.as_str(),
            Chunk::Verbatim(s) => s.as_str(),
            Chunk::Math(s) => s.as_str(),
        })
        .collect()
}

fn field(entry: &Entry, name: &str) -> String {
    entry
        .fields
        .get(name)
        .map(|chunks| chunks_to_string(chunks).trim().to_string())
        .unwrap_or_default()
}

/// Reads the metadata of every record in a `.bib` source.
///
/// Duplicate keys are resolved first. When the whole file does not parse,
/// each record is parsed on its own, after the `@string` definitions, and
/// the records that still fail are skipped and reported.
pub fn parse_bibliography(source: &str) -> (Bibliography, Vec<RewriteError>) {
    let (records, mut warnings) = record::split_records(source);
    let records = record::deduplicate(&records);

    if let Ok(parsed) = biblatex::Bibliography::parse(&record::render(&records)) {
        return (parsed.iter().map(BibRecord::from_entry).collect(), warnings);
    }

    let (unkeyed, keyed): (Vec<RawRecord<'_>>, Vec<RawRecord<'_>>) =
        records.into_iter().partition(|r| r.key.is_none());
    let prelude = record::render(&unkeyed);

    let mut bibliography = Bibliography::default();
    for raw in keyed {
        match biblatex::Bibliography::parse(&format!("{}{}", prelude, raw.text)) {
            Ok(parsed) => {
                for entry in parsed.iter() {
                    bibliography.insert(BibRecord::from_entry(entry));
                }
            }
            Err(e) => warnings.push(RewriteError::MetadataParseError {
                key: raw.key.map(str::to_string),
                message: e.to_string(),
            }),
        }
    }
    (bibliography, warnings)
}
