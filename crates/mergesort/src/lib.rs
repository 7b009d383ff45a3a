mod algorithms;
mod comparator;
mod error;
mod merge;
mod ops;

use log::debug;

pub use comparator::{ALL_DIRECTIONS, Comparator, Direction, Sentinels};
pub use error::{Result, SortError};
pub use merge::{merge_arrays, merge_buffered, merge_in_place, merge_three_way};
pub use ops::{flip_range, index_of_by, index_of_max, index_of_min};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MergeStrategy {
    TopDown,
    BottomUp,
    InPlace,
    ThreeWay,
    MergeInsertion,
    HybridRun,
    HybridBlock,
}

pub const ALL_STRATEGIES: [MergeStrategy; 7] = [
    MergeStrategy::TopDown,
    MergeStrategy::BottomUp,
    MergeStrategy::InPlace,
    MergeStrategy::ThreeWay,
    MergeStrategy::MergeInsertion,
    MergeStrategy::HybridRun,
    MergeStrategy::HybridBlock,
];

pub fn all_strategies() -> &'static [MergeStrategy] {
    &ALL_STRATEGIES
}

pub fn strategy_name(strategy: MergeStrategy) -> &'static str {
    match strategy {
        MergeStrategy::TopDown => "merge_sort_top_down",
        MergeStrategy::BottomUp => "merge_sort_bottom_up",
        MergeStrategy::InPlace => "merge_sort_in_place",
        MergeStrategy::ThreeWay => "merge_sort_three_way",
        MergeStrategy::MergeInsertion => "merge_insertion_sort",
        MergeStrategy::HybridRun => "hybrid_run_merge_sort",
        MergeStrategy::HybridBlock => "hybrid_block_merge_sort",
    }
}

/// Whether equal elements are guaranteed to keep their input order.
///
/// Only strategies built purely on the buffered two-way merge promise this.
pub fn is_stable(strategy: MergeStrategy) -> bool {
    matches!(
        strategy,
        MergeStrategy::TopDown
            | MergeStrategy::BottomUp
            | MergeStrategy::MergeInsertion
            | MergeStrategy::HybridRun
    )
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SortOrder {
    Ascending,
    Descending,
    /// Leaves the sequence as it is.
    Unchanged,
    /// Reverses the current order without comparing elements.
    Reverse,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TunedParams {
    /// Threshold of the minrun computation used by `HybridRun`.
    pub min_merge: usize,
    /// Fixed block length insertion-sorted by `HybridBlock`.
    pub block_size: usize,
    /// Longest range `MergeInsertion` hands to insertion sort.
    pub insertion_threshold: usize,
}

pub const TUNED_PARAMS: TunedParams = TunedParams {
    min_merge: 32,
    block_size: 32,
    insertion_threshold: 10,
};

impl Default for TunedParams {
    fn default() -> Self {
        TUNED_PARAMS
    }
}

pub fn sort_ascending<T: Ord + Clone>(strategy: MergeStrategy, data: &mut [T]) {
    sort_with(strategy, data, &Comparator::ascending());
}

pub fn sort_descending<T: Ord + Clone>(strategy: MergeStrategy, data: &mut [T]) {
    sort_with(strategy, data, &Comparator::descending());
}

/// Sorts by an `is_less`-style predicate, classified with `T`'s sentinels.
///
/// Fails with [`SortError::InconsistentComparator`] before touching `data`
/// when the predicate matches no direction.
pub fn sort_by<T, F>(strategy: MergeStrategy, data: &mut [T], is_less: F) -> Result<()>
where
    T: Clone + Sentinels,
    F: Fn(&T, &T) -> bool,
{
    let cmp = Comparator::new(is_less)?;
    sort_with(strategy, data, &cmp);
    Ok(())
}

pub fn sort_with<T: Clone>(strategy: MergeStrategy, data: &mut [T], cmp: &Comparator<'_, T>) {
    sort_with_params(strategy, data, cmp, &TUNED_PARAMS);
}

pub fn sort_with_params<T: Clone>(
    strategy: MergeStrategy,
    data: &mut [T],
    cmp: &Comparator<'_, T>,
    params: &TunedParams,
) {
    if data.len() < 2 {
        return;
    }
    debug!(
        "{} over {} elements, direction `{}`",
        strategy_name(strategy),
        data.len(),
        cmp.direction()
    );

    match strategy {
        MergeStrategy::TopDown => algorithms::merge_sort_top_down::sort(data, cmp, params),
        MergeStrategy::BottomUp => algorithms::merge_sort_bottom_up::sort(data, cmp, params),
        MergeStrategy::InPlace => algorithms::merge_sort_in_place::sort(data, cmp, params),
        MergeStrategy::ThreeWay => algorithms::merge_sort_three_way::sort(data, cmp, params),
        MergeStrategy::MergeInsertion => {
            algorithms::merge_insertion_sort::sort(data, cmp, params)
        }
        MergeStrategy::HybridRun => algorithms::hybrid_run_merge_sort::sort(data, cmp, params),
        MergeStrategy::HybridBlock => {
            algorithms::hybrid_block_merge_sort::sort(data, cmp, params)
        }
    }
}

/// Sorts `data[from..to]`, leaving the rest of `data` untouched.
pub fn sort_range_with<T: Clone>(
    strategy: MergeStrategy,
    data: &mut [T],
    from: usize,
    to: usize,
    cmp: &Comparator<'_, T>,
) -> Result<()> {
    ops::check_range(data.len(), from, to)?;
    sort_with(strategy, &mut data[from..to], cmp);
    Ok(())
}

pub fn sort_in_order<T: Ord + Clone>(strategy: MergeStrategy, data: &mut [T], order: SortOrder) {
    match order {
        SortOrder::Ascending => sort_ascending(strategy, data),
        SortOrder::Descending => sort_descending(strategy, data),
        SortOrder::Unchanged => {}
        SortOrder::Reverse => data.reverse(),
    }
}
