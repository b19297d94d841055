//! Shared plumbing for the tab-separated WCS files: they all have the same dialect, and all need
//! their paths attached to I/O errors.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Result, WcsError};

/// A csv reader configured for WCS data: tab-delimited, whitespace-trimmed, and tolerant of rows
/// with differing field counts so that each reader can decide what a short row means.
pub(crate) fn tab_reader<R: Read>(rdr: R, has_headers: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .quoting(false)
        .from_reader(rdr)
}

pub(crate) fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| WcsError::io(path, e))
}

/// Gets the 1-based line a record started on, falling back to 0 if the reader didn't track it.
pub(crate) fn line_of(record: &csv::StringRecord) -> usize {
    record.position().map(|p| p.line() as usize).unwrap_or(0)
}

/// Deserializes a record into `T`, turning a bad field into a [`WcsError::Parse`] on the record's
/// line. `fields` names the columns in order, for the message.
pub(crate) fn deserialize<T: DeserializeOwned>(
    record: &csv::StringRecord,
    fields: &[&str],
) -> Result<T> {
    record.deserialize(None).map_err(|e| {
        let message = match e.kind() {
            csv::ErrorKind::Deserialize { err, .. } => Some(match err.field() {
                Some(i) => {
                    let i = i as usize;
                    format!(
                        "invalid {} {:?}",
                        fields.get(i).copied().unwrap_or("field"),
                        record.get(i).unwrap_or("")
                    )
                }
                None => err.kind().to_string(),
            }),
            _ => None,
        };
        match message {
            Some(message) => WcsError::parse(line_of(record), message),
            None => WcsError::Csv(e),
        }
    })
}
