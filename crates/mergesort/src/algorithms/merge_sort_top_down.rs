use crate::comparator::Comparator;
use crate::merge;
use crate::TunedParams;

pub fn sort<T: Clone>(data: &mut [T], cmp: &Comparator<'_, T>, _params: &TunedParams) {
    if data.len() < 2 {
        return;
    }
    merge_sort_recursive(data, &cmp.add_equals());
}

fn merge_sort_recursive<T: Clone>(data: &mut [T], le: &Comparator<'_, T>) {
    let len = data.len();
    if len < 2 {
        return;
    }

    let mid = len >> 1;
    let (left, right) = data.split_at_mut(mid);
    merge_sort_recursive(left, le);
    merge_sort_recursive(right, le);

    merge::merge_buffered_unchecked(data, mid, le);
}
