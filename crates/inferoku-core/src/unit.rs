//! Houses (rows, columns, boxes) and the broader division taxonomy.

use crate::{CellSet, Position};

/// A sudoku house: a row, a column, or a 3×3 box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// A row identified by its index (0-8).
    Row(u8),
    /// A column identified by its index (0-8).
    Column(u8),
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box(u8),
}

impl Unit {
    /// All 27 houses in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row(0); 27];
        let mut i = 0u8;
        while i < 9 {
            all[i as usize] = Self::Row(i);
            all[i as usize + 9] = Self::Column(i);
            all[i as usize + 18] = Self::Box(i);
            i += 1;
        }
        all
    };

    /// Returns the three houses containing the given position.
    #[must_use]
    #[inline]
    pub const fn containing(pos: Position) -> [Self; 3] {
        [
            Self::Row(pos.row()),
            Self::Column(pos.column()),
            Self::Box(pos.box_index()),
        ]
    }

    /// Returns all positions contained in this house.
    #[must_use]
    #[inline]
    pub const fn positions(self) -> CellSet {
        match self {
            Self::Row(i) => CellSet::ROWS[i as usize],
            Self::Column(i) => CellSet::COLUMNS[i as usize],
            Self::Box(i) => CellSet::BOXES[i as usize],
        }
    }

    /// Converts a cell index within the house (0-8) into a [`Position`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in the range 0-8.
    #[must_use]
    #[inline]
    pub const fn position_at(self, i: u8) -> Position {
        assert!(i < 9);
        match self {
            Self::Row(row) => Position::new(row, i),
            Self::Column(col) => Position::new(i, col),
            Self::Box(box_index) => Position::from_box(box_index, i),
        }
    }
}

/// A division of the board: the three house kinds plus bands and stacks.
///
/// Houses are the constraint-bearing units; bands and stacks only ever
/// serve alignment queries and the chute-based techniques.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Division {
    /// Rows (9 divisions of 9 cells).
    Row,
    /// Columns (9 divisions of 9 cells).
    Column,
    /// 3×3 boxes (9 divisions of 9 cells).
    Box,
    /// Bands: horizontal triplets of rows (3 divisions of 27 cells).
    Band,
    /// Stacks: vertical triplets of columns (3 divisions of 27 cells).
    Stack,
}

impl Division {
    /// Returns all positions of the `index`-th division of this kind.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range for the division kind (0-8 for
    /// rows, columns, and boxes; 0-2 for bands and stacks).
    #[must_use]
    #[inline]
    pub const fn positions(self, index: u8) -> CellSet {
        match self {
            Self::Row => CellSet::ROWS[index as usize],
            Self::Column => CellSet::COLUMNS[index as usize],
            Self::Box => CellSet::BOXES[index as usize],
            Self::Band => CellSet::BANDS[index as usize],
            Self::Stack => CellSet::STACKS[index as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_units_cover_board_three_times() {
        let mut counts = [0u8; 81];
        for unit in Unit::ALL {
            for pos in unit.positions() {
                counts[pos.index() as usize] += 1;
            }
        }
        assert!(counts.iter().all(|&c| c == 3));
    }

    #[test]
    fn test_position_at() {
        assert_eq!(Unit::Row(2).position_at(5), Position::new(2, 5));
        assert_eq!(Unit::Column(7).position_at(1), Position::new(1, 7));
        assert_eq!(Unit::Box(4).position_at(0), Position::new(3, 3));
        assert_eq!(Unit::Box(8).position_at(8), Position::new(8, 8));
    }

    #[test]
    fn test_containing() {
        let [row, col, box_] = Unit::containing(Position::new(4, 7));
        assert_eq!(row, Unit::Row(4));
        assert_eq!(col, Unit::Column(7));
        assert_eq!(box_, Unit::Box(5));
        for unit in [row, col, box_] {
            assert!(unit.positions().contains(Position::new(4, 7)));
        }
    }

    #[test]
    fn test_division_positions() {
        assert_eq!(Division::Row.positions(0), CellSet::ROWS[0]);
        assert_eq!(Division::Band.positions(2), CellSet::BANDS[2]);
        assert_eq!(Division::Stack.positions(0).len(), 27);
    }
}
