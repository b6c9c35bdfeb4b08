//! Test utilities for technique implementations.
//!
//! [`TechniqueTester`] tracks the initial and current state of a grid,
//! applies techniques, and asserts on the difference, so technique tests
//! read as a fluent chain:
//!
//! ```
//! use inferoku_core::{Digit, Grid, Position};
//! use inferoku_solver::{technique::HiddenSingle, testing::TechniqueTester};
//!
//! let mut grid = Grid::new();
//! for col in 0..8 {
//!     grid.eliminate(Position::new(0, col), Digit::D5);
//! }
//!
//! TechniqueTester::new(grid)
//!     .apply_once(&HiddenSingle::new())
//!     .assert_placed(Position::new(0, 8), Digit::D5);
//! ```

use inferoku_core::{Digit, DigitSet, Grid, Position};

use crate::Technique;

/// A fluent test harness for technique implementations.
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the correct source location.
#[derive(Debug)]
pub struct TechniqueTester {
    initial: Grid,
    current: Grid,
}

impl TechniqueTester {
    /// Creates a tester from an initial grid state.
    pub fn new(initial: Grid) -> Self {
        let current = initial.clone();
        Self { initial, current }
    }

    /// Creates a tester from a givens grid string (digits are solved
    /// givens; `.`, `_`, and `0` are empty cells).
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be parsed.
    #[track_caller]
    pub fn from_givens(text: &str) -> Self {
        Self::new(Grid::from_givens(text).unwrap())
    }

    /// Creates a tester from candidate-set grid text.
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be parsed.
    #[track_caller]
    pub fn from_text(text: &str) -> Self {
        Self::new(Grid::from_text(text).unwrap())
    }

    /// Returns the current grid state.
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    /// Applies the technique once.
    ///
    /// # Panics
    ///
    /// Panics if the technique returns an error.
    #[track_caller]
    pub fn apply_once<T: Technique>(mut self, technique: &T) -> Self {
        technique.apply(&mut self.current).unwrap();
        self
    }

    /// Applies the technique repeatedly until it reports no progress.
    ///
    /// # Panics
    ///
    /// Panics if the technique returns an error.
    #[track_caller]
    pub fn apply_until_stuck<T: Technique>(mut self, technique: &T) -> Self {
        while technique.apply(&mut self.current).unwrap() {}
        self
    }

    /// Asserts that the technique reports the given progress result on
    /// the current state without asserting anything about candidates.
    #[track_caller]
    pub fn assert_applies<T: Technique>(mut self, technique: &T, expected: bool) -> Self {
        let changed = technique.apply(&mut self.current).unwrap();
        assert_eq!(
            changed,
            expected,
            "Expected {} to report changed = {expected}",
            technique.name()
        );
        self
    }

    /// Asserts that a cell went from undecided to solved with `digit`.
    #[track_caller]
    pub fn assert_placed(self, pos: Position, digit: Digit) -> Self {
        let initial = self.initial.candidates_at(pos);
        let current = self.current.candidates_at(pos);
        assert!(
            initial.len() > 1,
            "Expected initial cell at {pos:?} to be undecided, but candidates are {initial:?}"
        );
        assert_eq!(
            current.as_single(),
            Some(digit),
            "Expected {pos:?} to be solved to {digit}, but candidates are {current:?}"
        );
        self
    }

    /// Asserts that all given candidates were removed from a cell.
    ///
    /// Other candidates may have been removed too; only the given ones
    /// are checked.
    #[track_caller]
    pub fn assert_removed_includes<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let initial = self.initial.candidates_at(pos);
        let current = self.current.candidates_at(pos);
        assert_eq!(
            initial & digits,
            digits,
            "Expected initial candidates at {pos:?} to include {digits:?}, but they are {initial:?}"
        );
        assert!(
            (current & digits).is_empty(),
            "Expected all of {digits:?} removed from {pos:?}, but {current:?} remains"
        );
        self
    }

    /// Asserts that exactly the given candidates were removed from a
    /// cell — no more, no less.
    #[track_caller]
    pub fn assert_removed_exact<C>(self, pos: Position, digits: C) -> Self
    where
        C: IntoIterator<Item = Digit>,
    {
        let digits = DigitSet::from_iter(digits);
        let initial = self.initial.candidates_at(pos);
        let current = self.current.candidates_at(pos);
        let removed = initial.difference(current);
        assert_eq!(
            removed, digits,
            "Expected exactly {digits:?} removed from {pos:?}, but removed {removed:?} \
             (initial {initial:?}, current {current:?})"
        );
        self
    }

    /// Asserts that a cell's candidates did not change.
    #[track_caller]
    pub fn assert_no_change(self, pos: Position) -> Self {
        let initial = self.initial.candidates_at(pos);
        let current = self.current.candidates_at(pos);
        assert_eq!(
            initial, current,
            "Expected no change at {pos:?}, but candidates went from {initial:?} to {current:?}"
        );
        self
    }
}
