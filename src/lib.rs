//! `wcs` loads the [World Color Survey](https://www1.icsi.berkeley.edu/wcs/) data files and lines
//! them up with gridded environmental data, so that cross-linguistic differences in color naming
//! can be checked against things like UV-B incidence at each language's field site.
//!
//! The heart of it is small: [`nearest::find_nearest`] snaps an arbitrary value to the closest
//! value of a sorted grid, with ties always going to the smaller value, and [`grid::GeoGrid`] does
//! that along both axes of a latitude-longitude grid. Around that sit plain readers for each of the
//! survey's files, each returning its own structure for the caller to keep: nothing is global.
//!
//! # Example
//! ```
//! # use wcs::prelude::*;
//! # use geo::Point;
//! let lat_bands = Grid::uniform(-89.5, 1.0, 180).unwrap();
//! assert_eq!(lat_bands.nearest(-88.9), -88.5);
//! assert_eq!(find_nearest(&[1, 3], 2).unwrap(), 1);
//! let cell = UV_GRID.snap(Point::new(-179.4, -88.9));
//! assert_eq!(UV_GRID.cell_center(cell).unwrap().x(), -179.375);
//! ```

#![doc(html_root_url = "https://docs.rs/wcs-survey/0.1.0")]
// we don't mess around with documentation
#![deny(missing_docs)]
// Clippy doesn't like long decimals, but adding separators in decimals isn't any more readable
#![allow(clippy::unreadable_literal)]

extern crate csv;
extern crate geo;
extern crate num;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate tracing;

pub mod analysis;
pub mod chips;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod grid;
pub mod naming;
pub mod nearest;
pub mod prelude;
pub mod sites;
mod tsv;
pub mod uv;

pub use error::{Result, WcsError};
