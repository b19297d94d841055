//! This module reads gridded UV-B incidence in the TOMS level-3 ASCII layout and averages it over a
//! directory of such files (typically one per day or month) into a [`UvClimatology`] on the
//! standard [`UV_GRID`].
//!
//! Each file starts with three header lines describing the day and the grid. Then, for every
//! latitude band, 288 longitude values follow as three-character integers, 25 to a line after a
//! single leading blank: eleven full lines and a twelfth holding the last 13 values and the band's
//! latitude, as in
//!
//! ```text
//!  123123123...123   lat =  -89.5
//! ```
//!
//! The first value of a band is at longitude -179.375 and they proceed east in steps of 1.25
//! degrees. Latitudes are snapped to the grid with the usual nearest-value rules.

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use geo::Point;
use regex::Regex;

use crate::error::{Result, WcsError};
use crate::grid::{GeoGrid, GridCell, UV_GRID, UV_LONGITUDE_BANDS};
use crate::tsv;

/// Header lines before the first latitude band.
pub const HEADER_LINES: usize = 3;
/// Lines making up a single latitude band.
pub const LINES_PER_BAND: usize = 12;
/// Width of one value, in characters.
const FIELD_WIDTH: usize = 3;

lazy_static! {
    static ref LAT_TRAILER: Regex = Regex::new(r"^(.*?)\s*lat\s*=\s*(-?[0-9]+(?:\.[0-9]*)?)\s*$").unwrap();
}

/// The values of a single UV-B file, one per cell of [`UV_GRID`]. Cells whose band was absent from
/// the file hold 0.
#[derive(Debug, Clone, PartialEq)]
pub struct UvField {
    values: Vec<f64>,
    bands: usize,
}

impl UvField {
    /// Parses one file from anything readable.
    pub fn from_reader<R: Read>(rdr: R) -> Result<UvField> {
        let grid: &GeoGrid = &UV_GRID;
        let mut values = vec![0.0; grid.cell_count()];
        let mut bands = 0;
        let mut band: Vec<u32> = Vec::with_capacity(UV_LONGITUDE_BANDS);
        let mut in_band = 0;
        let mut last_line = 0;

        for (i, line) in BufReader::new(rdr).lines().enumerate() {
            let number = i + 1;
            last_line = number;
            let line = line.map_err(|e| WcsError::parse(number, e.to_string()))?;
            if number <= HEADER_LINES || (in_band == 0 && line.trim().is_empty()) {
                continue;
            }
            in_band += 1;
            if in_band < LINES_PER_BAND {
                read_fields(&line, number, &mut band)?;
                continue;
            }
            // the twelfth line closes the band with its latitude
            let caps = LAT_TRAILER
                .captures(&line)
                .ok_or_else(|| WcsError::parse(number, "expected a `lat = ` trailer"))?;
            read_fields(&caps[1], number, &mut band)?;
            let lat: f64 = caps[2]
                .parse()
                .map_err(|_| WcsError::parse(number, format!("invalid latitude {:?}", &caps[2])))?;
            if band.len() != UV_LONGITUDE_BANDS {
                return Err(WcsError::parse(
                    number,
                    format!(
                        "latitude {} has {} values, expected {}",
                        lat,
                        band.len(),
                        UV_LONGITUDE_BANDS
                    ),
                ));
            }
            let row = grid.latitudes().nearest_index(lat);
            for (col, &v) in band.iter().enumerate() {
                // row and col are both in range, so this always finds a slot
                if let Some(idx) = grid.linear_index(GridCell { row, col }) {
                    values[idx] += f64::from(v);
                }
            }
            bands += 1;
            band.clear();
            in_band = 0;
        }
        if in_band != 0 {
            return Err(WcsError::parse(last_line, "file ends partway through a latitude band"));
        }
        Ok(UvField { values, bands })
    }

    /// Parses the file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<UvField> {
        UvField::from_reader(tsv::open(path.as_ref())?)
    }

    /// The number of latitude bands read.
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// The value in a cell, or `None` if it is off the grid.
    pub fn at(&self, cell: GridCell) -> Option<f64> {
        UV_GRID.linear_index(cell).map(|i| self.values[i])
    }
}

// Splits the data part of a line into three-character integer fields.
fn read_fields(data: &str, line: usize, out: &mut Vec<u32>) -> Result<()> {
    let data = data.trim_end();
    // the format puts a single blank before the first field; tolerate files that dropped it
    let data = if data.len() % FIELD_WIDTH == 1 && data.starts_with(' ') {
        &data[1..]
    } else {
        data
    };
    if !data.is_ascii() || data.len() % FIELD_WIDTH != 0 {
        return Err(WcsError::parse(
            line,
            format!("data is not a whole number of {}-character fields", FIELD_WIDTH),
        ));
    }
    for chunk in data.as_bytes().chunks(FIELD_WIDTH) {
        // ASCII was checked above, so every chunk is valid UTF-8
        let field = std::str::from_utf8(chunk).unwrap_or("").trim();
        let value = field
            .parse()
            .map_err(|_| WcsError::parse(line, format!("invalid value {:?}", field)))?;
        out.push(value);
    }
    Ok(())
}

/// Mean UV-B incidence per grid cell over a set of files.
#[derive(Debug, Clone, PartialEq)]
pub struct UvClimatology {
    means: Vec<f64>,
    files: usize,
}

impl UvClimatology {
    /// Averages the given fields cell by cell. Every field counts toward the mean of every cell,
    /// even if its file was missing that cell's band.
    pub fn from_fields<I: IntoIterator<Item = UvField>>(fields: I) -> Option<UvClimatology> {
        let mut sums = RunningSum::new();
        for field in fields {
            sums.add(&field);
        }
        sums.finish()
    }

    /// Reads and averages every regular file in `dir`, in name order. Hidden entries (such as
    /// editor or notebook checkpoint directories) and subdirectories are skipped.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<UvClimatology> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| WcsError::io(dir, e))? {
            let entry = entry.map_err(|e| WcsError::io(dir, e))?;
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            let is_file = entry
                .file_type()
                .map_err(|e| WcsError::io(entry.path(), e))?
                .is_file();
            if hidden || !is_file {
                debug!(path = %entry.path().display(), "skipping");
                continue;
            }
            paths.push(entry.path());
        }
        paths.sort();
        // one file in memory at a time
        let mut sums = RunningSum::new();
        for path in &paths {
            let field = UvField::from_path(path)?;
            debug!(path = %path.display(), bands = field.bands(), "read UV-B file");
            sums.add(&field);
        }
        let climatology = sums.finish().ok_or_else(|| WcsError::NoData(dir.to_path_buf()))?;
        info!(files = climatology.files(), dir = %dir.display(), "built UV-B climatology");
        Ok(climatology)
    }

    /// The number of files averaged.
    pub fn files(&self) -> usize {
        self.files
    }

    /// The grid the means are laid out on.
    pub fn grid(&self) -> &GeoGrid {
        &UV_GRID
    }

    /// The mean in a cell, or `None` if it is off the grid.
    pub fn at(&self, cell: GridCell) -> Option<f64> {
        UV_GRID.linear_index(cell).map(|i| self.means[i])
    }

    /// The mean in the cell nearest to a point (`x` longitude, `y` latitude).
    pub fn at_point(&self, point: Point<f64>) -> f64 {
        let cell = UV_GRID.snap(point);
        // snapping always lands on the grid
        self.at(cell).unwrap_or(0.0)
    }
}

// Cell-by-cell totals over the fields seen so far.
struct RunningSum {
    sums: Vec<f64>,
    files: usize,
}

impl RunningSum {
    fn new() -> RunningSum {
        RunningSum {
            sums: vec![0.0; UV_GRID.cell_count()],
            files: 0,
        }
    }

    fn add(&mut self, field: &UvField) {
        for (sum, v) in self.sums.iter_mut().zip(field.values.iter()) {
            *sum += v;
        }
        self.files += 1;
    }

    fn finish(self) -> Option<UvClimatology> {
        if self.files == 0 {
            return None;
        }
        let files = self.files;
        let means = self.sums.into_iter().map(|s| s / files as f64).collect();
        Some(UvClimatology { means, files })
    }
}
