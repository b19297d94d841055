//! This module reads the WCS term dictionary (`dict.txt`), which glosses each language's term
//! abbreviations (the codes used in the naming data) with the term as the field linguists
//! transcribed it. After one header line, each line is
//!
//! ```text
//! language number<TAB>term number<TAB>translation<TAB>abbreviation
//! ```
//!
//! Lines with fewer than four fields are skipped: the published file has a handful of them.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, WcsError};
use crate::tsv;

/// The number of languages in the World Color Survey, numbered from 1.
pub const LANGUAGE_COUNT: u32 = 110;

/// One dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The language-specific term number.
    pub number: u32,
    /// The term as transcribed.
    pub translation: String,
    /// The abbreviation used for this term in the naming data.
    pub abbreviation: String,
}

/// Every language's glossed terms, in file order. Every language from 1 to [`LANGUAGE_COUNT`] is
/// present, even if it has no entries.
#[derive(Debug, Clone, PartialEq)]
pub struct TermDictionary {
    terms: BTreeMap<u32, Vec<Term>>,
}

impl Default for TermDictionary {
    fn default() -> TermDictionary {
        TermDictionary {
            terms: (1..=LANGUAGE_COUNT).map(|l| (l, Vec::new())).collect(),
        }
    }
}

impl TermDictionary {
    /// Reads a dictionary from anything readable. Fails on language numbers outside the survey.
    pub fn from_reader<R: Read>(rdr: R) -> Result<TermDictionary> {
        let mut reader = tsv::tab_reader(rdr, true);
        let mut dict = TermDictionary::default();
        let mut skipped = 0usize;
        for result in reader.records() {
            let record = result?;
            let line = tsv::line_of(&record);
            if record.len() < 4 {
                warn!(line = line, fields = record.len(), "skipping short dictionary line");
                skipped += 1;
                continue;
            }
            let language: u32 = parse_field(&record[0], line, "language number")?;
            let number: u32 = parse_field(&record[1], line, "term number")?;
            let entries = dict
                .terms
                .get_mut(&language)
                .ok_or(WcsError::UnknownLanguage(language))?;
            entries.push(Term {
                number,
                translation: record[2].to_string(),
                abbreviation: record[3].to_string(),
            });
        }
        debug!(entries = dict.len(), skipped = skipped, "read term dictionary");
        Ok(dict)
    }

    /// Reads a dictionary from the file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<TermDictionary> {
        TermDictionary::from_reader(tsv::open(path.as_ref())?)
    }

    /// Translates a naming-data abbreviation in a given language. If the abbreviation appears more
    /// than once, the first entry wins. Returns `None` for unknown languages or abbreviations.
    pub fn translate(&self, language: u32, abbreviation: &str) -> Option<&str> {
        self.terms
            .get(&language)?
            .iter()
            .find(|t| t.abbreviation == abbreviation)
            .map(|t| t.translation.as_str())
    }

    /// All entries for a language, in file order.
    pub fn terms(&self, language: u32) -> &[Term] {
        self.terms.get(&language).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The total number of entries across all languages.
    pub fn len(&self) -> usize {
        self.terms.values().map(Vec::len).sum()
    }

    /// Whether no language has any entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn parse_field(field: &str, line: usize, what: &str) -> Result<u32> {
    field
        .parse()
        .map_err(|_| WcsError::parse(line, format!("invalid {} {:?}", what, field)))
}
