//! Element-level helpers: range checks, flips and index searches.
//!
//! Swapping is `slice::swap`.

use crate::comparator::Comparator;
use crate::error::{Result, SortError};

#[inline]
pub(crate) fn check_range(len: usize, from: usize, to: usize) -> Result<()> {
    if from > to || to > len {
        return Err(SortError::InvalidRange { from, to, len });
    }
    Ok(())
}

#[inline]
pub(crate) fn check_split(len: usize, from: usize, mid: usize, to: usize) -> Result<()> {
    check_range(len, from, to)?;
    if mid < from || mid > to {
        return Err(SortError::InvalidSplit { from, mid, to });
    }
    Ok(())
}

/// Reverses `data[from..to]`.
pub fn flip_range<T>(data: &mut [T], from: usize, to: usize) -> Result<()> {
    check_range(data.len(), from, to)?;
    data[from..to].reverse();
    Ok(())
}

/// Index of the element in `data[from..to]` that `cmp` places before every
/// other one; the first such index wins ties. `None` for an empty range.
pub fn index_of_by<T>(
    data: &[T],
    from: usize,
    to: usize,
    cmp: &Comparator<'_, T>,
) -> Result<Option<usize>> {
    check_range(data.len(), from, to)?;
    let mut best: Option<usize> = None;
    for i in from..to {
        match best {
            Some(b) if !cmp.test(&data[i], &data[b]) => {}
            _ => best = Some(i),
        }
    }
    Ok(best)
}

pub fn index_of_min<T: Ord>(data: &[T], from: usize, to: usize) -> Result<Option<usize>> {
    index_of_by(data, from, to, &Comparator::ascending())
}

pub fn index_of_max<T: Ord>(data: &[T], from: usize, to: usize) -> Result<Option<usize>> {
    index_of_by(data, from, to, &Comparator::descending())
}
