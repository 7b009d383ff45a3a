pub(crate) mod common;
pub(crate) mod hybrid_block_merge_sort;
pub(crate) mod hybrid_run_merge_sort;
pub(crate) mod merge_insertion_sort;
pub(crate) mod merge_sort_bottom_up;
pub(crate) mod merge_sort_in_place;
pub(crate) mod merge_sort_three_way;
pub(crate) mod merge_sort_top_down;
