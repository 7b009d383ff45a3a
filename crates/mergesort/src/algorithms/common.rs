use crate::comparator::Comparator;

/// Stable insertion sort; `lt` must be the strict form of the comparator.
#[inline]
pub fn insertion_sort<T>(data: &mut [T], lt: &Comparator<'_, T>) {
    for i in 1..data.len() {
        let mut j = i;
        while j > 0 && lt.test(&data[i], &data[j - 1]) {
            j -= 1;
        }
        if j < i {
            data[j..=i].rotate_right(1);
        }
    }
}

/// Shrinks `n` by halving until it drops below `min_merge`, rounding up when
/// any shifted-out bit was set, so that `n / min_run` is close to a power of two.
#[inline]
pub fn min_run_length(mut n: usize, min_merge: usize) -> usize {
    let limit = min_merge.max(2);
    let mut r = 0usize;
    while n >= limit {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

#[inline]
pub fn split3_mut<T>(data: &mut [T], mid1: usize, mid2: usize) -> (&mut [T], &mut [T], &mut [T]) {
    let (first, rest) = data.split_at_mut(mid1);
    let (second, third) = rest.split_at_mut(mid2 - mid1);
    (first, second, third)
}
