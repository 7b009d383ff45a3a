use crate::comparator::Comparator;
use crate::merge::{self, Fanout};
use crate::TunedParams;

use super::common;

pub fn sort<T: Clone>(data: &mut [T], cmp: &Comparator<'_, T>, params: &TunedParams) {
    if data.len() < 2 {
        return;
    }

    let block = params.block_size.max(1);
    let lt = cmp.remove_equals();
    for chunk in data.chunks_mut(block) {
        common::insertion_sort(chunk, &lt);
    }

    merge::merge_bottom_up(data, block, Fanout::Three, &cmp.add_equals());
}
