//! Merge primitives shared by every strategy.
//!
//! Each input sub-range must already be sorted under the comparator handed
//! in. That is not verified: unsorted input produces an unordered result,
//! never a panic.
//!
//! The `pub(crate)` variants work on whole slices and take the comparator in
//! its inclusive form (`le`, see [`Comparator::add_equals`]): the left head
//! is emitted whenever `le(left, right)` holds, which keeps equal elements in
//! input order. The public wrappers validate bounds and derive `le` themselves.

use log::trace;

use crate::comparator::Comparator;
use crate::error::{Result, SortError};
use crate::ops;

/// Merges the sorted runs `data[from..mid]` and `data[mid..to]` through two
/// scratch copies. Stable.
pub fn merge_buffered<T: Clone>(
    data: &mut [T],
    from: usize,
    mid: usize,
    to: usize,
    cmp: &Comparator<'_, T>,
) -> Result<()> {
    ops::check_split(data.len(), from, mid, to)?;
    merge_buffered_unchecked(&mut data[from..to], mid - from, &cmp.add_equals());
    Ok(())
}

/// Merges `data[from..mid]` and `data[mid..to]` without allocating by
/// rotating right-run elements into place.
pub fn merge_in_place<T>(
    data: &mut [T],
    from: usize,
    mid: usize,
    to: usize,
    cmp: &Comparator<'_, T>,
) -> Result<()> {
    ops::check_split(data.len(), from, mid, to)?;
    merge_in_place_unchecked(&mut data[from..to], mid - from, &cmp.add_equals());
    Ok(())
}

/// Merges the three sorted runs `src[from..mid1]`, `src[mid1..mid2]` and
/// `src[mid2..to]` into `dst[from..to]`. Ties go to the earlier run.
/// `dst` must be as long as `src`.
#[allow(clippy::too_many_arguments)]
pub fn merge_three_way<T: Clone>(
    src: &[T],
    dst: &mut [T],
    from: usize,
    mid1: usize,
    mid2: usize,
    to: usize,
    cmp: &Comparator<'_, T>,
) -> Result<()> {
    ops::check_split(src.len(), from, mid1, to)?;
    ops::check_split(src.len(), mid1, mid2, to)?;
    if dst.len() != src.len() {
        return Err(SortError::LengthMismatch {
            expected: src.len(),
            actual: dst.len(),
        });
    }
    merge_three_way_unchecked(
        &src[from..to],
        &mut dst[from..to],
        mid1 - from,
        mid2 - from,
        &cmp.add_equals(),
    );
    Ok(())
}

/// Merges two independent sorted arrays into `dst`, which must hold exactly
/// `left.len() + right.len()` elements. Stable.
pub fn merge_arrays<T: Clone>(
    dst: &mut [T],
    left: &[T],
    right: &[T],
    cmp: &Comparator<'_, T>,
) -> Result<()> {
    let expected = left.len() + right.len();
    if dst.len() != expected {
        return Err(SortError::LengthMismatch {
            expected,
            actual: dst.len(),
        });
    }
    merge_arrays_unchecked(dst, left, right, &cmp.add_equals());
    Ok(())
}

pub(crate) fn merge_buffered_unchecked<T: Clone>(
    data: &mut [T],
    mid: usize,
    le: &Comparator<'_, T>,
) {
    if mid == 0 || mid == data.len() {
        return;
    }
    let left = data[..mid].to_vec();
    let right = data[mid..].to_vec();
    merge_arrays_unchecked(data, &left, &right, le);
}

pub(crate) fn merge_arrays_unchecked<T: Clone>(
    dst: &mut [T],
    left: &[T],
    right: &[T],
    le: &Comparator<'_, T>,
) {
    debug_assert_eq!(dst.len(), left.len() + right.len());

    let mut i = 0usize;
    let mut j = 0usize;
    let mut k = 0usize;

    while i < left.len() && j < right.len() {
        if le.test(&left[i], &right[j]) {
            dst[k].clone_from(&left[i]);
            i += 1;
        } else {
            dst[k].clone_from(&right[j]);
            j += 1;
        }
        k += 1;
    }

    if i < left.len() {
        dst[k..].clone_from_slice(&left[i..]);
    } else if j < right.len() {
        dst[k..].clone_from_slice(&right[j..]);
    }
}

pub(crate) fn merge_in_place_unchecked<T>(data: &mut [T], mid: usize, le: &Comparator<'_, T>) {
    let len = data.len();
    if mid == 0 || mid == len || le.test(&data[mid - 1], &data[mid]) {
        return;
    }

    // `data[left..mid]` is what remains of the left run, `data[mid..]` of the right one.
    let mut left = 0usize;
    let mut mid = mid;
    while left < mid && mid < len {
        if !le.test(&data[left], &data[mid]) {
            data[left..=mid].rotate_right(1);
            mid += 1;
        }
        left += 1;
    }
}

pub(crate) fn merge_three_way_unchecked<T: Clone>(
    src: &[T],
    dst: &mut [T],
    mid1: usize,
    mid2: usize,
    le: &Comparator<'_, T>,
) {
    debug_assert_eq!(src.len(), dst.len());
    debug_assert!(mid1 <= mid2 && mid2 <= src.len());

    let end = src.len();
    let mut i = 0usize;
    let mut j = mid1;
    let mut k = mid2;
    let mut out = 0usize;

    while i < mid1 && j < mid2 && k < end {
        let next = if le.test(&src[i], &src[j]) {
            if le.test(&src[i], &src[k]) { &mut i } else { &mut k }
        } else if le.test(&src[j], &src[k]) {
            &mut j
        } else {
            &mut k
        };
        dst[out].clone_from(&src[*next]);
        *next += 1;
        out += 1;
    }

    let rest = &mut dst[out..];
    if i == mid1 {
        merge_arrays_unchecked(rest, &src[j..mid2], &src[k..], le);
    } else if j == mid2 {
        merge_arrays_unchecked(rest, &src[i..mid1], &src[k..], le);
    } else {
        merge_arrays_unchecked(rest, &src[i..mid1], &src[j..mid2], le);
    }
}

/// One bottom-up pass: merges neighbouring runs of `width` from `src` into `dst`.
pub(crate) fn merge_pass<T: Clone>(src: &[T], dst: &mut [T], width: usize, le: &Comparator<'_, T>) {
    let len = src.len();
    let mut left = 0usize;
    while left < len {
        let mid = (left + width).min(len);
        let right = (mid + width).min(len);

        if mid >= right || le.test(&src[mid - 1], &src[mid]) {
            dst[left..right].clone_from_slice(&src[left..right]);
        } else {
            merge_arrays_unchecked(
                &mut dst[left..right],
                &src[left..mid],
                &src[mid..right],
                le,
            );
        }

        left = right;
    }
}

/// One bottom-up pass merging triples of `width`-runs.
pub(crate) fn merge_pass_three_way<T: Clone>(
    src: &[T],
    dst: &mut [T],
    width: usize,
    le: &Comparator<'_, T>,
) {
    let len = src.len();
    let mut left = 0usize;
    while left < len {
        let mid1 = (left + width).min(len);
        let mid2 = (mid1 + width).min(len);
        let right = (mid2 + width).min(len);

        if mid1 >= right {
            dst[left..right].clone_from_slice(&src[left..right]);
        } else {
            merge_three_way_unchecked(
                &src[left..right],
                &mut dst[left..right],
                mid1 - left,
                mid2 - left,
                le,
            );
        }

        left = right;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Fanout {
    Two,
    Three,
}

impl Fanout {
    #[inline]
    fn factor(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    #[inline]
    fn pass<T: Clone>(self, src: &[T], dst: &mut [T], width: usize, le: &Comparator<'_, T>) {
        match self {
            Self::Two => merge_pass(src, dst, width, le),
            Self::Three => merge_pass_three_way(src, dst, width, le),
        }
    }
}

/// Merges runs bottom-up, growing `width` by the fan-out each pass until one
/// run covers `data`, alternating between `data` and a single buffer. `data`
/// must consist of sorted runs of `width` elements on entry.
pub(crate) fn merge_bottom_up<T: Clone>(
    data: &mut [T],
    mut width: usize,
    fanout: Fanout,
    le: &Comparator<'_, T>,
) {
    let len = data.len();
    if width >= len {
        return;
    }

    let mut buf = data.to_vec();
    let mut src_is_buf = false;
    let mut passes = 0usize;
    while width < len {
        if src_is_buf {
            fanout.pass(&buf, data, width, le);
        } else {
            fanout.pass(data, &mut buf, width, le);
        }
        src_is_buf = !src_is_buf;
        width = width.saturating_mul(fanout.factor());
        passes += 1;
    }
    trace!("{passes} merge passes ({fanout:?}) over {len} elements");

    if src_is_buf {
        data.clone_from_slice(&buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_key() -> Comparator<'static, (u8, usize)> {
        Comparator::probe(|a: &(u8, usize), b: &(u8, usize)| a.0 < b.0, &(1, 0), &(2, 0))
            .unwrap()
    }

    fn tagged(keys: &[u8]) -> Vec<(u8, usize)> {
        keys.iter().enumerate().map(|(i, &k)| (k, i)).collect()
    }

    #[test]
    fn buffered_merge_is_stable() {
        let mut data = tagged(&[1, 3, 3, 5, 1, 3, 4]);
        merge_buffered(&mut data, 0, 4, 7, &by_key()).unwrap();
        assert_eq!(
            data,
            [(1, 0), (1, 4), (3, 1), (3, 2), (3, 5), (4, 6), (5, 3)]
        );
    }

    #[test]
    fn buffered_merge_respects_direction() {
        let mut data = vec![9, 4, 1, 8, 7, 2];
        merge_buffered(&mut data, 0, 3, 6, &Comparator::descending()).unwrap();
        assert_eq!(data, [9, 8, 7, 4, 2, 1]);
    }

    #[test]
    fn buffered_merge_of_partial_range() {
        let mut data = vec![100, 2, 6, 1, 5, 0];
        merge_buffered(&mut data, 1, 3, 5, &Comparator::ascending()).unwrap();
        assert_eq!(data, [100, 1, 2, 5, 6, 0]);
    }

    #[test]
    fn in_place_merge_orders_runs() {
        let mut data = vec![2, 4, 6, 8, 1, 3, 5, 7, 9];
        merge_in_place(&mut data, 0, 4, 9, &Comparator::ascending()).unwrap();
        assert_eq!(data, [1, 2, 3, 4, 5, 6, 7, 8, 9]);

        let mut data = vec![1, 5, 9, 0, 4, 8];
        merge_in_place(&mut data, 0, 3, 6, &Comparator::ascending()).unwrap();
        assert_eq!(data, [0, 1, 4, 5, 8, 9]);
    }

    #[test]
    fn in_place_merge_of_ordered_runs_is_one_comparison() {
        use std::cell::Cell;

        let calls = Cell::new(0usize);
        let cmp = Comparator::new(|a: &i32, b: &i32| {
            calls.set(calls.get() + 1);
            a < b
        })
        .unwrap();
        calls.set(0);

        let mut data = vec![1, 2, 3, 4, 5, 6];
        merge_in_place(&mut data, 0, 3, 6, &cmp).unwrap();
        assert_eq!(data, [1, 2, 3, 4, 5, 6]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn three_way_merge_breaks_ties_by_run() {
        let src = tagged(&[2, 5, 2, 3, 1, 2]);
        let mut dst = src.clone();
        merge_three_way(&src, &mut dst, 0, 2, 4, 6, &by_key()).unwrap();
        assert_eq!(dst, [(1, 4), (2, 0), (2, 2), (2, 5), (3, 3), (5, 1)]);
    }

    #[test]
    fn three_way_merge_with_empty_runs() {
        let src = vec![4, 7, 1, 9];
        let mut dst = vec![0; 4];
        merge_three_way(&src, &mut dst, 0, 0, 2, 4, &Comparator::ascending()).unwrap();
        assert_eq!(dst, [1, 4, 7, 9]);

        let mut dst = vec![0; 4];
        merge_three_way(&src, &mut dst, 0, 2, 4, 4, &Comparator::ascending()).unwrap();
        assert_eq!(dst, [1, 4, 7, 9]);

        let src = vec![3, 1, 2];
        let mut dst = vec![0; 3];
        merge_three_way(&src, &mut dst, 0, 1, 2, 3, &Comparator::ascending()).unwrap();
        assert_eq!(dst, [1, 2, 3]);
    }

    #[test]
    fn three_way_merge_descending() {
        let src = vec![9, 3, 8, 2, 7, 1];
        let mut dst = vec![0; 6];
        merge_three_way(&src, &mut dst, 0, 2, 4, 6, &Comparator::descending()).unwrap();
        assert_eq!(dst, [9, 8, 7, 3, 2, 1]);
    }

    #[test]
    fn three_way_merge_rejects_bad_splits() {
        let src = vec![1, 2, 3];
        let mut dst = vec![0; 3];
        assert_eq!(
            merge_three_way(&src, &mut dst, 0, 2, 1, 3, &Comparator::ascending()),
            Err(SortError::InvalidSplit {
                from: 2,
                mid: 1,
                to: 3
            })
        );
        let mut short = vec![0; 2];
        assert_eq!(
            merge_three_way(&src, &mut short, 0, 1, 2, 3, &Comparator::ascending()),
            Err(SortError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(dst, [0, 0, 0]);
    }

    #[test]
    fn merge_arrays_interleaves() {
        let mut dst = vec![0; 7];
        merge_arrays(&mut dst, &[1, 4, 4, 10], &[2, 4, 11], &Comparator::ascending()).unwrap();
        assert_eq!(dst, [1, 2, 4, 4, 4, 10, 11]);

        let mut dst = vec![0; 2];
        merge_arrays(&mut dst, &[], &[5, 3], &Comparator::descending()).unwrap();
        assert_eq!(dst, [5, 3]);
    }

    #[test]
    fn merge_arrays_checks_destination_length() {
        let mut dst = vec![0; 3];
        assert_eq!(
            merge_arrays(&mut dst, &[1, 2], &[3, 4], &Comparator::ascending()),
            Err(SortError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn invalid_bounds_leave_data_untouched() {
        let mut data = vec![3, 2, 1];
        assert!(merge_buffered(&mut data, 0, 1, 4, &Comparator::ascending()).is_err());
        assert!(merge_in_place(&mut data, 2, 1, 3, &Comparator::ascending()).is_err());
        assert_eq!(data, [3, 2, 1]);
    }

    #[test]
    fn bottom_up_three_way_handles_ragged_tails() {
        let le = Comparator::<i32>::ascending().add_equals();
        for len in [2usize, 3, 4, 5, 7, 8, 10, 26, 28] {
            let mut data: Vec<i32> = (0..len as i32).rev().collect();
            merge_bottom_up(&mut data, 1, Fanout::Three, &le);
            let expected: Vec<i32> = (0..len as i32).collect();
            assert_eq!(data, expected, "len={len}");
        }
    }
}
