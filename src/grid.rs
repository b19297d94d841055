//! This module provides [`Grid`], an immutable sorted sequence of coordinates that answers
//! nearest-value queries, and [`GeoGrid`], a pair of them forming a latitude-longitude grid. A
//! `Grid` checks its invariants (non-empty, sorted, no NaN) exactly once when it is built, so every
//! lookup afterwards can go straight to the binary search in [`nearest`](crate::nearest).
//!
//! Because floats can't be hashed, gridded data is keyed by [`GridCell`], the pair of indices into
//! the two axes, rather than by the snapped latitude and longitude themselves.
//!
//! # Example
//! ```
//! # use wcs::grid::UV_GRID;
//! # use geo::Point;
//! // Berkeley: x is longitude, y is latitude
//! let cell = UV_GRID.snap(Point::new(-122.27, 37.87));
//! let center = UV_GRID.cell_center(cell).unwrap();
//! assert_eq!(center.y(), 37.5);
//! assert_eq!(center.x(), -121.875);
//! ```

use geo::Point;

use crate::error::{Result, WcsError};
use crate::nearest::{first_unsorted, nearest_index};

/// Number of latitude bands in the UV-B grid: one per degree.
pub const UV_LATITUDE_BANDS: usize = 180;
/// The center of the southernmost latitude band.
pub const UV_LATITUDE_START: f64 = -89.5;
/// Width of a latitude band, in degrees.
pub const UV_LATITUDE_STEP: f64 = 1.0;
/// Number of longitude bands in the UV-B grid.
pub const UV_LONGITUDE_BANDS: usize = 288;
/// The center of the westernmost longitude band.
pub const UV_LONGITUDE_START: f64 = -179.375;
/// Width of a longitude band, in degrees.
pub const UV_LONGITUDE_STEP: f64 = 1.25;

lazy_static! {
    /// The grid the UV-B climatology files are sampled on: 180 latitude bands one degree apart,
    /// and 288 longitude bands 1.25 degrees apart.
    pub static ref UV_GRID: GeoGrid = GeoGrid {
        latitudes: Grid {
            values: spaced(UV_LATITUDE_START, UV_LATITUDE_STEP, UV_LATITUDE_BANDS),
        },
        longitudes: Grid {
            values: spaced(UV_LONGITUDE_START, UV_LONGITUDE_STEP, UV_LONGITUDE_BANDS),
        },
    };
}

// start + i * step rather than repeated addition, so error doesn't pile up along the axis
fn spaced(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// A non-empty, ascending sequence of grid coordinates. Lookups are logarithmic in its length, and
/// always return one of its own values.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    values: Vec<f64>,
}

impl Grid {
    /// Builds a grid from the given values, which must be non-empty, free of NaN, and sorted
    /// ascending. Repeated values are allowed.
    pub fn new(values: Vec<f64>) -> Result<Grid> {
        if values.is_empty() {
            return Err(WcsError::EmptyGrid);
        }
        if values.iter().any(|v| v.is_nan()) {
            return Err(WcsError::InvalidGrid("grid values must not be NaN".to_string()));
        }
        if let Some(index) = first_unsorted(&values) {
            return Err(WcsError::UnsortedGrid { index });
        }
        Ok(Grid { values })
    }

    /// Builds `count` evenly spaced values `start, start + step, ...`. The step has to be positive
    /// and finite.
    pub fn uniform(start: f64, step: f64, count: usize) -> Result<Grid> {
        if count == 0 {
            return Err(WcsError::EmptyGrid);
        }
        if !(step > 0.0) || !step.is_finite() || !start.is_finite() {
            return Err(WcsError::InvalidGrid(format!(
                "cannot space {} values from {} by {}",
                count, start, step
            )));
        }
        Ok(Grid {
            values: spaced(start, step, count),
        })
    }

    /// The number of values in the grid. Never zero.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false, since grids can't be built empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Gets the value at the given index, if it exists.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// All of the grid values, in ascending order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Gets the index of the grid value closest to `query`, with ties going to the smaller value.
    pub fn nearest_index(&self, query: f64) -> usize {
        // construction guarantees non-empty, sorted input, which is the only way this can fail
        nearest_index(&self.values, query).unwrap_or(0)
    }

    /// Gets the grid value closest to `query`, with ties going to the smaller value.
    pub fn nearest(&self, query: f64) -> f64 {
        self.values[self.nearest_index(query)]
    }
}

/// A cell of a [`GeoGrid`], given by its latitude row and longitude column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    /// Index into the latitude axis.
    pub row: usize,
    /// Index into the longitude axis.
    pub col: usize,
}

/// A rectangular latitude-longitude grid. Points are [`geo::Point`]s with the usual GIS axis order:
/// `x` is longitude and `y` is latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoGrid {
    latitudes: Grid,
    longitudes: Grid,
}

impl GeoGrid {
    /// Combines two axes into a grid.
    pub fn new(latitudes: Grid, longitudes: Grid) -> GeoGrid {
        GeoGrid {
            latitudes,
            longitudes,
        }
    }

    /// The latitude axis.
    pub fn latitudes(&self) -> &Grid {
        &self.latitudes
    }

    /// The longitude axis.
    pub fn longitudes(&self) -> &Grid {
        &self.longitudes
    }

    /// The total number of cells.
    pub fn cell_count(&self) -> usize {
        self.latitudes.len() * self.longitudes.len()
    }

    /// Finds the cell whose center is nearest to the given point, one axis at a time.
    pub fn snap(&self, point: Point<f64>) -> GridCell {
        GridCell {
            row: self.latitudes.nearest_index(point.y()),
            col: self.longitudes.nearest_index(point.x()),
        }
    }

    /// Gets the center of a cell as a point, or `None` if the cell isn't on this grid.
    pub fn cell_center(&self, cell: GridCell) -> Option<Point<f64>> {
        let lat = self.latitudes.get(cell.row)?;
        let lon = self.longitudes.get(cell.col)?;
        Some(Point::new(lon, lat))
    }

    /// Flattens a cell into a row-major index over `cell_count()` slots, or `None` if it is off
    /// the grid.
    pub fn linear_index(&self, cell: GridCell) -> Option<usize> {
        if cell.row < self.latitudes.len() && cell.col < self.longitudes.len() {
            Some(cell.row * self.longitudes.len() + cell.col)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_new_validates() {
        assert!(matches!(Grid::new(vec![]), Err(WcsError::EmptyGrid)));
        assert!(matches!(
            Grid::new(vec![0.0, 2.0, 1.0]),
            Err(WcsError::UnsortedGrid { index: 2 })
        ));
        assert!(matches!(
            Grid::new(vec![0.0, std::f64::NAN]),
            Err(WcsError::InvalidGrid(_))
        ));
        let g = Grid::new(vec![0.0, 0.0, 1.0]).unwrap();
        assert_eq!(g.len(), 3);
        assert!(!g.is_empty());
    }

    #[test]
    fn test_uniform() {
        let g = Grid::uniform(-1.0, 0.5, 5).unwrap();
        assert_eq!(g.values(), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert!(Grid::uniform(0.0, 1.0, 0).is_err());
        assert!(Grid::uniform(0.0, 0.0, 3).is_err());
        assert!(Grid::uniform(0.0, -1.0, 3).is_err());
        assert!(Grid::uniform(0.0, std::f64::NAN, 3).is_err());
    }

    #[test]
    fn test_nearest() {
        let g = Grid::uniform(0.0, 10.0, 4).unwrap();
        assert_eq!(g.nearest(-3.0), 0.0);
        assert_eq!(g.nearest(15.0), 10.0);
        assert_eq!(g.nearest(15.1), 20.0);
        assert_eq!(g.nearest(100.0), 30.0);
        assert_eq!(g.nearest_index(24.0), 2);
    }

    #[test]
    fn test_uv_grid_shape() {
        assert_eq!(UV_GRID.latitudes().len(), 180);
        assert_eq!(UV_GRID.longitudes().len(), 288);
        assert_eq!(UV_GRID.cell_count(), 180 * 288);
        assert_eq!(UV_GRID.latitudes().get(0), Some(-89.5));
        assert_eq!(UV_GRID.latitudes().get(179), Some(89.5));
        assert_eq!(UV_GRID.longitudes().get(0), Some(-179.375));
        assert_eq!(UV_GRID.longitudes().get(287), Some(179.375));
    }

    #[test]
    fn test_snap() {
        let cell = UV_GRID.snap(Point::new(-179.4, -88.9));
        assert_eq!(cell, GridCell { row: 1, col: 0 });
        let center = UV_GRID.cell_center(cell).unwrap();
        assert_eq!(center.y(), -88.5);
        assert_eq!(center.x(), -179.375);
        assert_eq!(UV_GRID.linear_index(cell), Some(288));
    }

    #[test]
    fn test_off_grid_cells() {
        let cell = GridCell { row: 180, col: 0 };
        assert_eq!(UV_GRID.cell_center(cell), None);
        assert_eq!(UV_GRID.linear_index(cell), None);
        assert_eq!(UV_GRID.linear_index(GridCell { row: 0, col: 288 }), None);
    }
}
