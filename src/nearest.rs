//! This module implements nearest-value lookup: given a sorted sequence of grid coordinates and an
//! arbitrary query, find the grid coordinate closest to it. This is the operation used everywhere
//! raw latitudes and longitudes need to be bucketed into fixed grid cells, so its behavior on ties
//! matters: when a query is exactly halfway between two grid values, the *smaller* one always
//! wins. Aggregation downstream relies on every coordinate landing in the same cell every time.
//!
//! The lookup is a binary search, so the sequence must already be sorted ascending. That is a
//! precondition the caller guarantees, not something [`find_nearest`] checks: an unsorted sequence
//! gives an unspecified (but memory-safe) answer. Debug builds assert it anyway. Callers that can't
//! guarantee sortedness upstream should use [`find_nearest_checked`], or build a
//! [`Grid`](crate::grid::Grid), which validates once on construction.

use num::Num;

use crate::error::{Result, WcsError};

/// Anything that can be placed on a grid and measured against a query, described using the common
/// numeric traits in [`num`]: it needs to be copyable, ordered, and support subtraction to get a
/// distance. Every primitive float and integer type qualifies. This has no added functionality:
/// it's just for convenience.
pub trait GridValue: Num + Copy + PartialOrd {}

impl<T: Num + Copy + PartialOrd> GridValue for T {}

/// Returns the element of `sorted` closest to `query`. If two elements are equally close, returns
/// the smaller one. Queries below the first element return the first element, and queries above
/// the last return the last, so the result is always a member of `sorted`.
///
/// `sorted` must be sorted ascending: this is not checked outside of debug builds. A NaN query
/// compares false against everything and so resolves to the first element.
///
/// # Errors
/// Returns [`WcsError::EmptyGrid`] if `sorted` is empty.
///
/// # Example
/// ```
/// # use wcs::nearest::find_nearest;
/// let bands = [-1.5, -0.5, 0.5, 1.5];
/// assert_eq!(find_nearest(&bands, 0.2).unwrap(), 0.5);
/// // exactly halfway between -0.5 and 0.5: the smaller one wins
/// assert_eq!(find_nearest(&bands, 0.0).unwrap(), -0.5);
/// // out of range queries clamp to the boundary
/// assert_eq!(find_nearest(&bands, 42.0).unwrap(), 1.5);
/// ```
pub fn find_nearest<T: GridValue>(sorted: &[T], query: T) -> Result<T> {
    nearest_index(sorted, query).map(|i| sorted[i])
}

/// Like [`find_nearest`], but returns the index of the nearest element instead of the element
/// itself. This is what grids use to turn coordinates into cell indices.
///
/// # Errors
/// Returns [`WcsError::EmptyGrid`] if `sorted` is empty.
pub fn nearest_index<T: GridValue>(sorted: &[T], query: T) -> Result<usize> {
    if sorted.is_empty() {
        return Err(WcsError::EmptyGrid);
    }
    debug_assert!(
        first_unsorted(sorted).is_none(),
        "nearest-value lookup on an unsorted sequence"
    );
    // bisect-left: the first position whose element is not less than the query
    let pos = sorted.partition_point(|x| *x < query);
    if pos == 0 {
        return Ok(0);
    }
    if pos == sorted.len() {
        return Ok(sorted.len() - 1);
    }
    // here before < query <= after, so neither subtraction can underflow even for unsigned types
    let before = sorted[pos - 1];
    let after = sorted[pos];
    if after - query < query - before {
        Ok(pos)
    } else {
        Ok(pos - 1)
    }
}

/// The validated variant of [`find_nearest`]: checks that `sorted` really is sorted before
/// searching it. This costs a linear scan, so prefer [`Grid`](crate::grid::Grid) when the same
/// sequence is queried many times.
///
/// # Errors
/// Returns [`WcsError::EmptyGrid`] on empty input, and [`WcsError::UnsortedGrid`] naming the first
/// out-of-order element otherwise.
pub fn find_nearest_checked<T: GridValue>(sorted: &[T], query: T) -> Result<T> {
    if let Some(index) = first_unsorted(sorted) {
        return Err(WcsError::UnsortedGrid { index });
    }
    find_nearest(sorted, query)
}

/// Gets the index of the first element that is smaller than (or incomparable with) its
/// predecessor, or `None` if the whole sequence is sorted ascending.
pub(crate) fn first_unsorted<T: PartialOrd>(values: &[T]) -> Option<usize> {
    values
        .windows(2)
        .position(|w| !(w[0] <= w[1]))
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    #[allow(unused_imports)]
    use super::*;

    #[test]
    fn test_tie_goes_to_smaller() {
        assert_eq!(find_nearest(&[1, 3], 2).unwrap(), 1);
        assert_eq!(find_nearest(&[1.0, 3.0], 2.0).unwrap(), 1.0);
        assert_eq!(nearest_index(&[1.0, 3.0], 2.0).unwrap(), 0);
    }

    #[test]
    fn test_boundaries() {
        let s = [10u32, 20, 30];
        assert_eq!(find_nearest(&s, 0).unwrap(), 10);
        assert_eq!(find_nearest(&s, 10).unwrap(), 10);
        assert_eq!(find_nearest(&s, 30).unwrap(), 30);
        assert_eq!(find_nearest(&s, 1000).unwrap(), 30);
        // unsigned math right next to the boundaries must not underflow
        assert_eq!(find_nearest(&s, 11).unwrap(), 10);
        assert_eq!(find_nearest(&s, 29).unwrap(), 30);
    }

    #[test]
    fn test_exact_hits_and_duplicates() {
        let s = [-2.0, -1.0, -1.0, 0.0, 4.0];
        assert_eq!(find_nearest(&s, -1.0).unwrap(), -1.0);
        // bisect-left lands on the first of a run of equal values
        assert_eq!(nearest_index(&s, -1.0).unwrap(), 1);
        assert_eq!(find_nearest(&s, 2.0).unwrap(), 0.0);
        assert_eq!(find_nearest(&s, 2.1).unwrap(), 4.0);
    }

    #[test]
    fn test_single_element() {
        assert_eq!(find_nearest(&[7.5], -1e9).unwrap(), 7.5);
        assert_eq!(find_nearest(&[7.5], 1e9).unwrap(), 7.5);
    }

    #[test]
    fn test_empty_is_an_error() {
        let empty: [f64; 0] = [];
        match find_nearest(&empty, 1.0) {
            Err(WcsError::EmptyGrid) => {}
            other => panic!("expected EmptyGrid, got {:?}", other),
        }
        assert!(find_nearest_checked(&empty, 1.0).is_err());
    }

    #[test]
    fn test_checked_rejects_unsorted() {
        match find_nearest_checked(&[1.0, 3.0, 2.0, 4.0], 2.5) {
            Err(WcsError::UnsortedGrid { index }) => assert_eq!(index, 2),
            other => panic!("expected UnsortedGrid, got {:?}", other),
        }
        assert!(find_nearest_checked(&[1.0, std::f64::NAN], 2.5).is_err());
        assert_eq!(find_nearest_checked(&[1.0, 2.0, 4.0], 2.9).unwrap(), 2.0);
    }

    #[test]
    fn test_nan_query_resolves_to_first() {
        assert_eq!(find_nearest(&[1.0, 2.0], std::f64::NAN).unwrap(), 1.0);
    }

    #[test]
    fn test_latitude_bands() {
        let lat: Vec<f64> = (0..180).map(|i| -89.5 + i as f64).collect();
        // 0.6 away from -89.5 but only 0.4 from -88.5
        assert_eq!(find_nearest(&lat, -88.9).unwrap(), -88.5);
        assert_eq!(find_nearest(&lat, 90.0).unwrap(), 89.5);
        assert_eq!(find_nearest(&lat, 0.0).unwrap(), -0.5);
    }

    #[test]
    fn test_longitude_bands() {
        let lon: Vec<f64> = (0..288).map(|i| -179.375 + i as f64 * 1.25).collect();
        assert_eq!(find_nearest(&lon, -179.4).unwrap(), -179.375);
        assert_eq!(find_nearest(&lon, 180.0).unwrap(), -179.375 + 287.0 * 1.25);
    }
}
