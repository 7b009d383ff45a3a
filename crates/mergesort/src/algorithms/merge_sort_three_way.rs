use crate::comparator::Comparator;
use crate::merge;
use crate::TunedParams;

use super::common;

/// Copies `data` into a working buffer, sorts the buffer with `data` as the
/// second ping-pong buffer, and copies the result back.
pub fn sort<T: Clone>(data: &mut [T], cmp: &Comparator<'_, T>, _params: &TunedParams) {
    if data.len() < 2 {
        return;
    }

    let le = cmp.add_equals();
    let mut working = data.to_vec();
    sort_into(&mut working, data, &le);
    data.clone_from_slice(&working);
}

/// Sorts `target`. `scratch` must hold the same elements on entry; its
/// contents are unspecified afterwards.
fn sort_into<T: Clone>(target: &mut [T], scratch: &mut [T], le: &Comparator<'_, T>) {
    let len = target.len();
    if len < 2 {
        return;
    }

    let third = len / 3;
    let mid1 = third;
    let mid2 = 2 * third + 1;

    {
        let (s1, s2, s3) = common::split3_mut(scratch, mid1, mid2);
        let (t1, t2, t3) = common::split3_mut(target, mid1, mid2);
        sort_into(s1, t1, le);
        sort_into(s2, t2, le);
        sort_into(s3, t3, le);
    }

    merge::merge_three_way_unchecked(scratch, target, mid1, mid2, le);
}
