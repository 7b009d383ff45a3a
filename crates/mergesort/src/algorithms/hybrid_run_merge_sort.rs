use log::trace;

use crate::comparator::Comparator;
use crate::merge::{self, Fanout};
use crate::TunedParams;

use super::common;

pub fn sort<T: Clone>(data: &mut [T], cmp: &Comparator<'_, T>, params: &TunedParams) {
    let len = data.len();
    if len < 2 {
        return;
    }

    let min_run = common::min_run_length(len, params.min_merge);
    trace!("min run {min_run} for {len} elements");

    let lt = cmp.remove_equals();
    for run in data.chunks_mut(min_run) {
        common::insertion_sort(run, &lt);
    }

    merge::merge_bottom_up(data, min_run, Fanout::Two, &cmp.add_equals());
}
