use crate::comparator::Comparator;
use crate::merge;
use crate::TunedParams;

use super::common;

pub fn sort<T: Clone>(data: &mut [T], cmp: &Comparator<'_, T>, params: &TunedParams) {
    if data.len() < 2 {
        return;
    }
    let threshold = params.insertion_threshold.max(1);
    merge_insertion_recursive(data, &cmp.remove_equals(), &cmp.add_equals(), threshold);
}

fn merge_insertion_recursive<T: Clone>(
    data: &mut [T],
    lt: &Comparator<'_, T>,
    le: &Comparator<'_, T>,
    threshold: usize,
) {
    let len = data.len();
    if len <= threshold {
        common::insertion_sort(data, lt);
        return;
    }

    let mid = len >> 1;
    let (left, right) = data.split_at_mut(mid);
    merge_insertion_recursive(left, lt, le, threshold);
    merge_insertion_recursive(right, lt, le, threshold);

    merge::merge_buffered_unchecked(data, mid, le);
}
