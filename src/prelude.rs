//! This module brings the most common functionality under a single namespace, to prevent excessive
//! imports: the nearest-value lookups, the grid types with the standard UV-B grid, every file
//! reader's result type, and the crate error. The classifiers in [`analysis`](crate::analysis) are
//! not included.

pub use crate::chips::{ChipPosition, ChipTable};
pub use crate::config::WcsConfig;
pub use crate::dictionary::TermDictionary;
pub use crate::error::{Result, WcsError};
pub use crate::grid::{GeoGrid, Grid, GridCell, UV_GRID};
pub use crate::naming::NamingData;
pub use crate::nearest::{find_nearest, find_nearest_checked, nearest_index};
pub use crate::sites::{Category, SurveySite};
pub use crate::uv::{UvClimatology, UvField};
