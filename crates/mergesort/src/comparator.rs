//! Direction inference for opaque boolean comparators.
//!
//! A comparator is an `is_less`-style predicate: `f(a, b) == true` means `a`
//! is placed before `b`. Probing it with two sentinels `low` and `high`
//! (`low` precedes `high` in the element's natural order) yields a triple
//! `(f(low, low), f(low, high), f(high, low))` that identifies which of six
//! relational operators the predicate implements.

use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::error::{Result, SortError};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
}

pub const ALL_DIRECTIONS: [Direction; 6] = [
    Direction::Less,
    Direction::LessOrEqual,
    Direction::Greater,
    Direction::GreaterOrEqual,
    Direction::Equal,
    Direction::NotEqual,
];

impl Direction {
    /// Looks up the probe triple `(f(low, low), f(low, high), f(high, low))`.
    ///
    /// Constant predicates (all three probes equal) have no direction.
    pub fn classify(same: bool, forward: bool, backward: bool) -> Option<Self> {
        match (same, forward, backward) {
            (false, true, false) => Some(Self::Less),
            (true, true, false) => Some(Self::LessOrEqual),
            (false, false, true) => Some(Self::Greater),
            (true, false, true) => Some(Self::GreaterOrEqual),
            (true, false, false) => Some(Self::Equal),
            (false, true, true) => Some(Self::NotEqual),
            (false, false, false) | (true, true, true) => None,
        }
    }

    pub fn with_equals(self) -> Self {
        match self {
            Self::Less => Self::LessOrEqual,
            Self::Greater => Self::GreaterOrEqual,
            Self::NotEqual => Self::Equal,
            inclusive => inclusive,
        }
    }

    pub fn without_equals(self) -> Self {
        match self {
            Self::LessOrEqual => Self::Less,
            Self::GreaterOrEqual => Self::Greater,
            Self::Equal => Self::NotEqual,
            strict => strict,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Less => Self::Greater,
            Self::LessOrEqual => Self::GreaterOrEqual,
            Self::Greater => Self::Less,
            Self::GreaterOrEqual => Self::LessOrEqual,
            symmetric => symmetric,
        }
    }

    #[inline]
    pub fn is_inclusive(self) -> bool {
        matches!(
            self,
            Self::LessOrEqual | Self::GreaterOrEqual | Self::Equal
        )
    }

    /// `Equal` and `NotEqual` do not describe an order; sorting with them
    /// terminates but the result is unspecified.
    #[inline]
    pub fn is_ordering(self) -> bool {
        !matches!(self, Self::Equal | Self::NotEqual)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Two values with a known strict order used to probe comparators.
pub trait Sentinels: Sized {
    /// Returns `(low, high)` where `low` precedes `high`.
    fn sentinels() -> (Self, Self);
}

macro_rules! impl_numeric_sentinels {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Sentinels for $ty {
                #[inline]
                fn sentinels() -> (Self, Self) {
                    (1 as $ty, 2 as $ty)
                }
            }
        )*
    };
}

impl_numeric_sentinels!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Sentinels for bool {
    fn sentinels() -> (Self, Self) {
        (false, true)
    }
}

impl Sentinels for char {
    fn sentinels() -> (Self, Self) {
        ('a', 'b')
    }
}

impl Sentinels for String {
    fn sentinels() -> (Self, Self) {
        ("a".to_owned(), "b".to_owned())
    }
}

type Predicate<'a, T> = Rc<dyn Fn(&T, &T) -> bool + 'a>;

/// A boolean comparator together with the direction it was classified as.
///
/// Derived comparators share the caller's predicate, so they keep whatever
/// key the caller compares by.
pub struct Comparator<'a, T: 'a> {
    predicate: Predicate<'a, T>,
    direction: Direction,
}

impl<'a, T: 'a> Clone for Comparator<'a, T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Rc::clone(&self.predicate),
            direction: self.direction,
        }
    }
}

impl<'a, T: 'a> fmt::Debug for Comparator<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

impl<'a, T: 'a> Comparator<'a, T> {
    /// Classifies `predicate` by probing it with `low` and `high`.
    pub fn probe<F>(predicate: F, low: &T, high: &T) -> Result<Self>
    where
        F: Fn(&T, &T) -> bool + 'a,
    {
        let probes = (
            predicate(low, low),
            predicate(low, high),
            predicate(high, low),
        );
        let Some(direction) = Direction::classify(probes.0, probes.1, probes.2) else {
            debug!("comparator probes {probes:?} match no direction");
            return Err(SortError::InconsistentComparator { probes });
        };
        debug!("comparator classified as `{direction}`");

        Ok(Self {
            predicate: Rc::new(predicate),
            direction,
        })
    }

    /// Classifies `predicate` using the sentinels of `T`.
    pub fn new<F>(predicate: F) -> Result<Self>
    where
        F: Fn(&T, &T) -> bool + 'a,
        T: Sentinels,
    {
        let (low, high) = T::sentinels();
        Self::probe(predicate, &low, &high)
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn test(&self, a: &T, b: &T) -> bool {
        (self.predicate)(a, b)
    }

    /// Re-probes the stored predicate, e.g. to check a derived comparator.
    pub fn classify_with(&self, low: &T, high: &T) -> Option<Direction> {
        Direction::classify(
            self.test(low, low),
            self.test(low, high),
            self.test(high, low),
        )
    }

    /// Inclusive form: `<` becomes `<=`, `>` becomes `>=`, `!=` becomes `==`.
    pub fn add_equals(&self) -> Self {
        match self.direction {
            Direction::Less | Direction::Greater => {
                self.negated_swapped(self.direction.with_equals())
            }
            Direction::NotEqual => self.negated(Direction::Equal),
            _ => self.clone(),
        }
    }

    /// Strict form: `<=` becomes `<`, `>=` becomes `>`, `==` becomes `!=`.
    pub fn remove_equals(&self) -> Self {
        match self.direction {
            Direction::LessOrEqual | Direction::GreaterOrEqual => {
                self.negated_swapped(self.direction.without_equals())
            }
            Direction::Equal => self.negated(Direction::NotEqual),
            _ => self.clone(),
        }
    }

    /// Opposite order; `==` and `!=` keep their direction.
    pub fn reverse(&self) -> Self {
        let inner = Rc::clone(&self.predicate);
        let predicate: Predicate<'a, T> = Rc::new(move |a: &T, b: &T| inner(b, a));
        Self {
            predicate,
            direction: self.direction.reversed(),
        }
    }

    // `!f(b, a)`: toggles equality for the four order directions.
    fn negated_swapped(&self, direction: Direction) -> Self {
        let inner = Rc::clone(&self.predicate);
        let predicate: Predicate<'a, T> = Rc::new(move |a: &T, b: &T| !inner(b, a));
        Self {
            predicate,
            direction,
        }
    }

    fn negated(&self, direction: Direction) -> Self {
        let inner = Rc::clone(&self.predicate);
        let predicate: Predicate<'a, T> = Rc::new(move |a: &T, b: &T| !inner(a, b));
        Self {
            predicate,
            direction,
        }
    }
}

impl<'a, T: Ord + 'a> Comparator<'a, T> {
    /// Canonical predicate for `direction` under `T`'s own order.
    pub fn from_ord(direction: Direction) -> Self {
        let predicate: Predicate<'a, T> = match direction {
            Direction::Less => Rc::new(|a: &T, b: &T| a < b),
            Direction::LessOrEqual => Rc::new(|a: &T, b: &T| a <= b),
            Direction::Greater => Rc::new(|a: &T, b: &T| a > b),
            Direction::GreaterOrEqual => Rc::new(|a: &T, b: &T| a >= b),
            Direction::Equal => Rc::new(|a: &T, b: &T| a == b),
            Direction::NotEqual => Rc::new(|a: &T, b: &T| a != b),
        };
        Self {
            predicate,
            direction,
        }
    }

    #[inline]
    pub fn ascending() -> Self {
        Self::from_ord(Direction::Less)
    }

    #[inline]
    pub fn descending() -> Self {
        Self::from_ord(Direction::Greater)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn shapes() -> [(Direction, fn(&i32, &i32) -> bool); 6] {
        [
            (Direction::Less, |a, b| a < b),
            (Direction::LessOrEqual, |a, b| a <= b),
            (Direction::Greater, |a, b| a > b),
            (Direction::GreaterOrEqual, |a, b| a >= b),
            (Direction::Equal, |a, b| a == b),
            (Direction::NotEqual, |a, b| a != b),
        ]
    }

    #[test]
    fn classify_covers_all_six_shapes() {
        for (expected, f) in shapes() {
            let cmp = Comparator::new(f).unwrap();
            assert_eq!(cmp.direction(), expected, "shape {expected}");
        }
    }

    #[test]
    fn constant_predicates_are_rejected() {
        let err = Comparator::<i32>::new(|_, _| true).unwrap_err();
        assert_eq!(
            err,
            SortError::InconsistentComparator {
                probes: (true, true, true)
            }
        );
        let err = Comparator::<i32>::new(|_, _| false).unwrap_err();
        assert_eq!(
            err,
            SortError::InconsistentComparator {
                probes: (false, false, false)
            }
        );
    }

    #[test]
    fn stateful_predicate_can_defeat_the_probe() {
        let calls = Cell::new(0_u32);
        let flaky = |_: &i32, _: &i32| {
            calls.set(calls.get() + 1);
            calls.get() % 2 == 0
        };
        // Probes answer (false, true, false) -> looks like `<`, then the
        // predicate keeps alternating; only the probe result is trusted.
        let cmp = Comparator::new(flaky).unwrap();
        assert_eq!(cmp.direction(), Direction::Less);

        let seen = Cell::new(0_u32);
        let warming_up = |a: &i32, b: &i32| {
            seen.set(seen.get() + 1);
            seen.get() > 3 && a < b
        };
        assert_eq!(
            Comparator::new(warming_up).unwrap_err(),
            SortError::InconsistentComparator {
                probes: (false, false, false)
            }
        );
    }

    #[test]
    fn derived_comparators_classify_to_target_rows() {
        for (direction, f) in shapes() {
            let cmp = Comparator::new(f).unwrap();

            let added = cmp.add_equals();
            assert_eq!(added.direction(), direction.with_equals());
            assert_eq!(added.classify_with(&1, &2), Some(direction.with_equals()));

            let removed = cmp.remove_equals();
            assert_eq!(removed.direction(), direction.without_equals());
            assert_eq!(
                removed.classify_with(&1, &2),
                Some(direction.without_equals())
            );

            let reversed = cmp.reverse();
            assert_eq!(reversed.direction(), direction.reversed());
            assert_eq!(reversed.classify_with(&1, &2), Some(direction.reversed()));
        }
    }

    #[test]
    fn derivations_are_fixed_points() {
        for (direction, f) in shapes() {
            let cmp = Comparator::new(f).unwrap();
            let twice = cmp.add_equals().add_equals();
            assert_eq!(twice.classify_with(&1, &2), Some(direction.with_equals()));
            let twice = cmp.remove_equals().remove_equals();
            assert_eq!(
                twice.classify_with(&1, &2),
                Some(direction.without_equals())
            );
            let back = cmp.reverse().reverse();
            assert_eq!(back.classify_with(&1, &2), Some(direction));
        }
    }

    #[test]
    fn derived_forms_keep_the_callers_key() {
        let by_abs_desc = Comparator::new(|a: &i32, b: &i32| a.abs() > b.abs()).unwrap();
        assert_eq!(by_abs_desc.direction(), Direction::Greater);

        let inclusive = by_abs_desc.add_equals();
        assert!(inclusive.test(&-3, &3));
        assert!(inclusive.test(&-4, &3));
        assert!(!inclusive.test(&2, &-3));

        let ascending = by_abs_desc.reverse();
        assert!(ascending.test(&1, &-2));
        assert!(!ascending.test(&-2, &2));
    }

    #[test]
    fn from_ord_matches_probe() {
        for direction in ALL_DIRECTIONS {
            let cmp = Comparator::<u8>::from_ord(direction);
            assert_eq!(cmp.classify_with(&1, &2), Some(direction));
        }
        assert_eq!(Comparator::<u8>::ascending().direction(), Direction::Less);
        assert_eq!(Comparator::<u8>::descending().direction(), Direction::Greater);
    }

    #[test]
    fn direction_algebra() {
        for direction in ALL_DIRECTIONS {
            assert_eq!(direction.reversed().reversed(), direction);
            assert!(direction.with_equals().is_inclusive());
            assert!(!direction.without_equals().is_inclusive());
            assert_eq!(direction.is_ordering(), direction.reversed().is_ordering());
        }
        assert_eq!(Direction::GreaterOrEqual.to_string(), ">=");
    }

    #[test]
    fn explicit_sentinels_for_foreign_types() {
        let by_len = |a: &&str, b: &&str| a.len() < b.len();
        let cmp = Comparator::probe(by_len, &"x", &"xy").unwrap();
        assert_eq!(cmp.direction(), Direction::Less);
        assert!(cmp.add_equals().test(&"ab", &"cd"));
    }
}
