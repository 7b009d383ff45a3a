use thiserror::Error;

pub type Result<T> = std::result::Result<T, SortError>;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SortError {
    #[error("invalid range {from}..{to} for a sequence of length {len}")]
    InvalidRange { from: usize, to: usize, len: usize },

    #[error("split point {mid} lies outside {from}..{to}")]
    InvalidSplit { from: usize, mid: usize, to: usize },

    #[error("destination holds {actual} elements but the merge produces {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The probe triple `(f(low, low), f(low, high), f(high, low))` matched no direction.
    #[error("comparator probes {probes:?} match no ordering direction")]
    InconsistentComparator { probes: (bool, bool, bool) },
}
