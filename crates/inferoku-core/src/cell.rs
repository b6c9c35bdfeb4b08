//! A single grid square with its candidate set.

use std::{
    fmt::{self, Debug},
    hash::{Hash, Hasher},
};

use crate::{Digit, DigitSet, Division, Position};

/// A grid square: an immutable position plus a mutable candidate set.
///
/// A cell is *solved* when exactly one candidate remains; the remaining
/// digit is its value. Once solved a cell is frozen — further candidate
/// removals are silently ignored, which lets techniques apply blanket
/// removals over whole units without filtering solved cells.
///
/// Two cells are equal when they occupy the same position; their
/// candidate sets do not enter equality.
#[derive(Clone, Copy)]
pub struct Cell {
    position: Position,
    candidates: DigitSet,
}

impl Cell {
    pub(crate) const fn new(position: Position, candidates: DigitSet) -> Self {
        Self {
            position,
            candidates,
        }
    }

    /// Returns this cell's position.
    #[must_use]
    #[inline]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns this cell's row (0-8).
    #[must_use]
    #[inline]
    pub const fn row(&self) -> u8 {
        self.position.row()
    }

    /// Returns this cell's column (0-8).
    #[must_use]
    #[inline]
    pub const fn column(&self) -> u8 {
        self.position.column()
    }

    /// Returns this cell's candidate set.
    #[must_use]
    #[inline]
    pub const fn candidates(&self) -> DigitSet {
        self.candidates
    }

    /// Returns `true` if the digit is still a candidate for this cell.
    #[must_use]
    #[inline]
    pub const fn contains(&self, digit: Digit) -> bool {
        self.candidates.contains(digit)
    }

    /// Returns the number of remaining candidates.
    #[must_use]
    #[inline]
    pub const fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` if exactly one candidate remains.
    #[must_use]
    #[inline]
    pub const fn is_solved(&self) -> bool {
        self.candidates.len() == 1
    }

    /// Returns the solved value, or `None` if the cell is unsolved.
    #[must_use]
    #[inline]
    pub fn value(&self) -> Option<Digit> {
        self.candidates.as_single()
    }

    /// Returns `true` if `other` shares a row, column, or box with this
    /// cell and is a different cell.
    #[must_use]
    #[inline]
    pub fn sees(&self, other: &Self) -> bool {
        self.position.sees(other.position)
    }

    /// Returns `true` if both cells lie in the same division.
    #[must_use]
    #[inline]
    pub fn aligned(&self, other: &Self, division: Division) -> bool {
        self.position.aligned(other.position, division)
    }

    /// Removes the given candidates, ignoring the request if the cell is
    /// already solved. Returns `true` if the candidate set shrank.
    pub(crate) fn remove_candidates(&mut self, digits: DigitSet) -> bool {
        if self.is_solved() {
            return false;
        }
        let before = self.candidates;
        self.candidates = self.candidates.difference(digits);
        before != self.candidates
    }

    /// Intersects the candidate set with `digits`, ignoring the request
    /// if the cell is already solved. Returns `true` on change.
    pub(crate) fn restrict_candidates(&mut self, digits: DigitSet) -> bool {
        if self.is_solved() {
            return false;
        }
        let before = self.candidates;
        self.candidates = self.candidates.intersection(digits);
        before != self.candidates
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.position, self.candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u8, col: u8, digits: &[u8]) -> Cell {
        Cell::new(
            Position::new(row, col),
            digits.iter().map(|&d| Digit::from_value(d)).collect(),
        )
    }

    #[test]
    fn test_solved_state() {
        let unsolved = cell(0, 0, &[1, 2, 3]);
        assert!(!unsolved.is_solved());
        assert_eq!(unsolved.value(), None);
        assert_eq!(unsolved.candidate_count(), 3);

        let solved = cell(0, 0, &[5]);
        assert!(solved.is_solved());
        assert_eq!(solved.value(), Some(Digit::D5));
    }

    #[test]
    fn test_equality_ignores_candidates() {
        let a = cell(3, 4, &[1, 2]);
        let b = cell(3, 4, &[8, 9]);
        let c = cell(3, 5, &[1, 2]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_solved_cell_is_frozen() {
        let mut solved = cell(0, 0, &[5]);
        assert!(!solved.remove_candidates(DigitSet::from_elem(Digit::D5)));
        assert_eq!(solved.value(), Some(Digit::D5));
        assert!(!solved.restrict_candidates(DigitSet::from_elem(Digit::D1)));
        assert_eq!(solved.value(), Some(Digit::D5));
    }

    #[test]
    fn test_remove_and_restrict() {
        let mut c = cell(0, 0, &[1, 2, 3, 4]);
        assert!(c.remove_candidates(DigitSet::from_elem(Digit::D2)));
        assert!(!c.remove_candidates(DigitSet::from_elem(Digit::D2)));
        assert_eq!(c.candidate_count(), 3);

        assert!(c.restrict_candidates(
            [Digit::D1, Digit::D3].into_iter().collect()
        ));
        assert_eq!(c.candidates(), [Digit::D1, Digit::D3].into_iter().collect());
    }

    #[test]
    fn test_sees_and_aligned() {
        let a = cell(0, 0, &[1, 2]);
        let b = cell(0, 8, &[1, 2]);
        let c = cell(1, 1, &[1, 2]);
        assert!(a.sees(&b));
        assert!(a.sees(&c));
        assert!(!b.sees(&c));
        assert!(a.aligned(&b, Division::Row));
        assert!(a.aligned(&c, Division::Box));
        assert!(!a.aligned(&b, Division::Stack));
    }
}
