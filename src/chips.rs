//! This module reads the WCS chip table (`chip.txt`), which places each of the 330 Munsell chips of
//! the survey stimulus on the stimulus grid: ten rows of lightness lettered `A` to `J`, and columns
//! of hue numbered 1 to 40, with column 0 holding the achromatic chips. Each line of the file is
//!
//! ```text
//! chip number<TAB>row letter<TAB>column number<TAB>row/column code
//! ```
//!
//! and the table built from it can be used in both directions: code to chip number, or chip number
//! to grid position.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use regex::Regex;

use crate::error::{Result, WcsError};
use crate::tsv;

/// The last hue column on the stimulus grid.
pub const MAX_COLUMN: u8 = 40;

lazy_static! {
    static ref CHIP_CODE: Regex = Regex::new(r"^([A-J])([0-9]{1,2})$").unwrap();
}

/// A chip's place on the stimulus grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChipPosition {
    /// Lightness row, `'A'` (lightest) through `'J'` (darkest).
    pub row: char,
    /// Hue column, with 0 marking the achromatic column.
    pub column: u8,
}

impl ChipPosition {
    /// Makes a position, checking that it lies on the stimulus grid.
    pub fn new(row: char, column: u8) -> Option<ChipPosition> {
        if ('A'..='J').contains(&row) && column <= MAX_COLUMN {
            Some(ChipPosition { row, column })
        } else {
            None
        }
    }

    /// Whether this chip is in the achromatic column.
    pub fn is_achromatic(&self) -> bool {
        self.column == 0
    }
}

impl fmt::Display for ChipPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for ChipPosition {
    type Err = WcsError;

    /// Parses a code like `"A0"` or `"J40"`.
    fn from_str(s: &str) -> Result<ChipPosition> {
        let caps = CHIP_CODE
            .captures(s)
            .ok_or_else(|| WcsError::invalid("chip code", s))?;
        // the regex guarantees one ASCII letter followed by at most two digits
        let row = caps[1].chars().next().unwrap_or('A');
        let column: u8 = caps[2]
            .parse()
            .map_err(|_| WcsError::invalid("chip code", s))?;
        ChipPosition::new(row, column).ok_or_else(|| WcsError::invalid("chip code", s))
    }
}

// column names for error messages, in file order
const FIELDS: [&str; 4] = ["chip number", "row", "column", "code"];

#[derive(Debug, Deserialize)]
struct Record {
    chip: u32,
    row: String,
    column: u8,
    code: String,
}

/// Two-way lookup between chip numbers and their row/column codes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChipTable {
    by_code: HashMap<String, u32>,
    by_number: BTreeMap<u32, ChipPosition>,
}

impl ChipTable {
    /// Reads a chip table from anything readable. See the module documentation for the format.
    pub fn from_reader<R: Read>(rdr: R) -> Result<ChipTable> {
        let mut reader = tsv::tab_reader(rdr, false);
        let mut table = ChipTable::default();
        for result in reader.records() {
            let record = result?;
            let line = tsv::line_of(&record);
            if record.len() < 4 {
                return Err(WcsError::parse(
                    line,
                    format!("expected 4 fields, found {}", record.len()),
                ));
            }
            let rec: Record = tsv::deserialize(&record, &FIELDS)?;
            let mut letters = rec.row.chars();
            let position = match (letters.next(), letters.next()) {
                (Some(row), None) => ChipPosition::new(row, rec.column),
                _ => None,
            }
            .ok_or_else(|| {
                WcsError::parse(
                    line,
                    format!("chip {} is off the grid at {}{}", rec.chip, rec.row, rec.column),
                )
            })?;
            if !CHIP_CODE.is_match(&rec.code) {
                return Err(WcsError::parse(
                    line,
                    format!("invalid chip code {:?}", rec.code),
                ));
            }
            table.by_code.insert(rec.code, rec.chip);
            table.by_number.insert(rec.chip, position);
        }
        debug!(chips = table.len(), "read chip table");
        Ok(table)
    }

    /// Reads a chip table from the file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ChipTable> {
        let path = path.as_ref();
        ChipTable::from_reader(tsv::open(path)?)
    }

    /// Gets the chip number for a row/column code such as `"E29"`.
    pub fn chip_number(&self, code: &str) -> Option<u32> {
        self.by_code.get(code).copied()
    }

    /// Gets the grid position of a chip.
    pub fn position(&self, chip: u32) -> Option<ChipPosition> {
        self.by_number.get(&chip).copied()
    }

    /// Resolves user input that is either a chip number or a row/column code.
    pub fn resolve(&self, chip: &str) -> Option<u32> {
        match chip.parse::<u32>() {
            Ok(n) if self.by_number.contains_key(&n) => Some(n),
            Ok(_) => None,
            Err(_) => self.chip_number(&chip.to_ascii_uppercase()),
        }
    }

    /// All chips in numerical order, with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (u32, ChipPosition)> + '_ {
        self.by_number.iter().map(|(&n, &p)| (n, p))
    }

    /// The number of chips in the table.
    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    /// Whether the table has no chips.
    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }
}
