//! This module reads the WCS naming data (`term.txt`): for every language, every speaker, and every
//! chip, the abbreviated color term that speaker used for that chip. Lines are
//!
//! ```text
//! language number<TAB>speaker number<TAB>chip number<TAB>term abbreviation
//! ```
//!
//! The result is a [`NamingData`] that the caller owns, answering `language -> speaker -> chip ->
//! term` lookups.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::error::{Result, WcsError};
use crate::tsv;

// column names for error messages, in file order
const FIELDS: [&str; 4] = ["language number", "speaker number", "chip number", "term"];

#[derive(Debug, Deserialize)]
struct Record {
    language: u32,
    speaker: u32,
    chip: u32,
    term: String,
}

/// The terms one speaker gave, keyed by chip number.
pub type SpeakerResponses = BTreeMap<u32, String>;

/// All naming responses in the survey, nested by language and then speaker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NamingData {
    languages: BTreeMap<u32, BTreeMap<u32, SpeakerResponses>>,
}

impl NamingData {
    /// Reads naming data from anything readable. If a speaker named the same chip twice, the later
    /// line wins.
    pub fn from_reader<R: Read>(rdr: R) -> Result<NamingData> {
        let mut reader = tsv::tab_reader(rdr, false);
        let mut data = NamingData::default();
        let mut responses = 0usize;
        for result in reader.records() {
            let record = result?;
            if record.len() < 4 {
                return Err(WcsError::parse(
                    tsv::line_of(&record),
                    format!("expected 4 fields, found {}", record.len()),
                ));
            }
            let rec: Record = tsv::deserialize(&record, &FIELDS)?;
            data.languages
                .entry(rec.language)
                .or_insert_with(BTreeMap::new)
                .entry(rec.speaker)
                .or_insert_with(BTreeMap::new)
                .insert(rec.chip, rec.term);
            responses += 1;
        }
        debug!(
            languages = data.languages.len(),
            responses = responses,
            "read naming data"
        );
        Ok(data)
    }

    /// Reads naming data from the file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<NamingData> {
        NamingData::from_reader(tsv::open(path.as_ref())?)
    }

    /// The term a speaker used for a chip.
    pub fn term(&self, language: u32, speaker: u32, chip: u32) -> Option<&str> {
        self.speaker(language, speaker)?
            .get(&chip)
            .map(String::as_str)
    }

    /// Everything one speaker said, by chip.
    pub fn speaker(&self, language: u32, speaker: u32) -> Option<&SpeakerResponses> {
        self.languages.get(&language)?.get(&speaker)
    }

    /// Every speaker of a language, by speaker number.
    pub fn language(&self, language: u32) -> Option<&BTreeMap<u32, SpeakerResponses>> {
        self.languages.get(&language)
    }

    /// The language numbers present, ascending.
    pub fn languages(&self) -> impl Iterator<Item = u32> + '_ {
        self.languages.keys().copied()
    }

    /// How many speakers of each term a chip got within a language: the chip's naming
    /// distribution.
    pub fn term_counts(&self, language: u32, chip: u32) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        if let Some(speakers) = self.languages.get(&language) {
            for term in speakers.values().filter_map(|r| r.get(&chip)) {
                *counts.entry(term.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// The term most speakers of a language used for a chip. Ties go to the term that sorts first.
    pub fn modal_term(&self, language: u32, chip: u32) -> Option<&str> {
        let counts = self.term_counts(language, chip);
        let mut best: Option<(&str, usize)> = None;
        for (term, count) in counts {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((term, count));
            }
        }
        best.map(|(term, _)| term)
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;
    use maplit::btreemap;

    const SAMPLE: &str = "1\t1\t1\tLB\n1\t1\t2\tWK\n1\t2\t1\tLB\n1\t3\t1\tF\n2\t1\t1\tG\n";

    #[test]
    fn test_lookup() {
        let data = NamingData::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(data.term(1, 1, 1), Some("LB"));
        assert_eq!(data.term(1, 1, 2), Some("WK"));
        assert_eq!(data.term(2, 1, 1), Some("G"));
        assert_eq!(data.term(2, 1, 2), None);
        assert_eq!(data.term(3, 1, 1), None);
        assert_eq!(data.languages().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(data.language(1).unwrap().len(), 3);
    }

    #[test]
    fn test_last_line_wins() {
        let data = NamingData::from_reader("1\t1\t1\tLB\n1\t1\t1\tWK\n".as_bytes()).unwrap();
        assert_eq!(data.term(1, 1, 1), Some("WK"));
        assert_eq!(data.speaker(1, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_term_counts() {
        let data = NamingData::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(data.term_counts(1, 1), btreemap! { "F" => 1, "LB" => 2 });
        assert_eq!(data.modal_term(1, 1), Some("LB"));
        assert_eq!(data.modal_term(1, 2), Some("WK"));
        assert_eq!(data.modal_term(1, 99), None);
    }

    #[test]
    fn test_short_line() {
        match NamingData::from_reader("1\t1\t1\tLB\n1\t1\t2\n".as_bytes()) {
            Err(WcsError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_field() {
        match NamingData::from_reader("1\t1\t1\tLB\n1\tx\t1\tLB\n".as_bytes()) {
            Err(WcsError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("speaker"), "{}", message);
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }
}
