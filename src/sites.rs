//! This module reads the list of surveyed languages with their field locations and whether each
//! language has distinct basic terms for blue and green. After one header line, each line holds,
//! separated by whitespace,
//!
//! ```text
//! language number   name   category   latitude   longitude
//! ```
//!
//! where the category is `yes` (distinct terms) or `no`. Names may themselves contain spaces: the
//! first token is always the number and the last three are always category and coordinates.

use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use geo::Point;

use crate::error::{Result, WcsError};
use crate::tsv;

/// Whether a language lexically separates blue from green.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Blue and green fall under one term ("grue"). Written `no` in the site file.
    Merged,
    /// Blue and green get distinct terms. Written `yes` in the site file.
    Distinct,
}

impl Category {
    /// Both categories, `Merged` first.
    pub const ALL: [Category; 2] = [Category::Merged, Category::Distinct];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Category::Merged => write!(f, "no"),
            Category::Distinct => write!(f, "yes"),
        }
    }
}

impl FromStr for Category {
    type Err = WcsError;

    fn from_str(s: &str) -> Result<Category> {
        match s.to_ascii_lowercase().as_str() {
            "yes" => Ok(Category::Distinct),
            "no" => Ok(Category::Merged),
            _ => Err(WcsError::invalid("category", s)),
        }
    }
}

/// A surveyed language and where its speakers were interviewed.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveySite {
    /// The WCS language number.
    pub language: u32,
    /// The language name.
    pub name: String,
    /// Whether blue and green are distinct.
    pub category: Category,
    /// Field location, `x` longitude and `y` latitude, in degrees.
    pub location: Point<f64>,
}

/// Reads the site list from anything readable. Blank lines are ignored.
pub fn read_sites<R: Read>(rdr: R) -> Result<Vec<SurveySite>> {
    let mut sites = Vec::new();
    for (i, line) in BufReader::new(rdr).lines().enumerate() {
        let number = i + 1;
        let line = line.map_err(|e| WcsError::parse(number, e.to_string()))?;
        if number == 1 || line.trim().is_empty() {
            continue;
        }
        sites.push(parse_site(&line, number)?);
    }
    debug!(sites = sites.len(), "read survey sites");
    Ok(sites)
}

/// Reads the site list from the file at `path`.
pub fn read_sites_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SurveySite>> {
    read_sites(tsv::open(path.as_ref())?)
}

fn parse_site(line: &str, number: usize) -> Result<SurveySite> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 5 {
        return Err(WcsError::parse(
            number,
            format!("expected at least 5 fields, found {}", tokens.len()),
        ));
    }
    let bad = |what: &str, token: &str| WcsError::parse(number, format!("invalid {} {:?}", what, token));
    let n = tokens.len();
    let language: u32 = tokens[0].parse().map_err(|_| bad("language number", tokens[0]))?;
    let category: Category = tokens[n - 3]
        .parse()
        .map_err(|_| bad("category", tokens[n - 3]))?;
    let lat: f64 = tokens[n - 2].parse().map_err(|_| bad("latitude", tokens[n - 2]))?;
    let lon: f64 = tokens[n - 1].parse().map_err(|_| bad("longitude", tokens[n - 1]))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(WcsError::parse(
            number,
            format!("coordinates ({}, {}) are off the globe", lat, lon),
        ));
    }
    Ok(SurveySite {
        language,
        name: tokens[1..n - 3].join(" "),
        category,
        location: Point::new(lon, lat),
    })
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    const SAMPLE: &str = "LNUM\tLanguage\tBG\tLat\tLong\n\
                          1\tAbidji\tno\t5.7\t-4.6\n\
                          \n\
                          2\tAgta\tyes\t17.5\t122.0\n\
                          3 Ocaina Huitoto yes -2.8 -72.7\n";

    #[test]
    fn test_read_sites() {
        let sites = read_sites(SAMPLE.as_bytes()).unwrap();
        assert_eq!(sites.len(), 3);
        assert_eq!(sites[0].language, 1);
        assert_eq!(sites[0].name, "Abidji");
        assert_eq!(sites[0].category, Category::Merged);
        assert_eq!(sites[0].location.y(), 5.7);
        assert_eq!(sites[0].location.x(), -4.6);
        assert_eq!(sites[1].category, Category::Distinct);
        assert_eq!(sites[2].name, "Ocaina Huitoto");
        assert_eq!(sites[2].location.y(), -2.8);
    }

    #[test]
    fn test_bad_lines() {
        let input = "header\n1 Abidji maybe 5.7 -4.6\n";
        match read_sites(input.as_bytes()) {
            Err(WcsError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected a parse error, got {:?}", other),
        }
        assert!(read_sites("header\n1 Abidji no 5.7\n".as_bytes()).is_err());
        assert!(read_sites("header\n1 Abidji no 95.0 0.0\n".as_bytes()).is_err());
        assert!(read_sites("header\nx Abidji no 5.0 0.0\n".as_bytes()).is_err());
    }

    #[test]
    fn test_category_text() {
        assert_eq!("YES".parse::<Category>().unwrap(), Category::Distinct);
        assert_eq!(Category::Merged.to_string(), "no");
        assert!(matches!(
            "".parse::<Category>(),
            Err(WcsError::InvalidValue { what: "category", .. })
        ));
    }
}
