use inferoku_core::{CellSet, ConsistencyError, Digit, Grid, Position};
use tinyvec::ArrayVec;

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "X-Wing";

/// A technique that removes candidates using an X-Wing pattern.
///
/// An "X-Wing" occurs when a digit appears in exactly two cells of each
/// of two rows (or columns) and those cells line up in the same two
/// columns (or rows). One diagonal pair takes the digit, so it can be
/// eliminated from the other cells of the two covering lines. Four
/// corners inside a single box would demand two placements of one digit
/// in that box and are reported as a constraint violation.
#[derive(Debug, Default, Clone, Copy)]
pub struct XWing {}

impl XWing {
    /// Creates a new `XWing` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

/// A base line holding the digit in exactly two cells: the line index
/// plus the two cross-line indices.
type TwoCellLines = ArrayVec<[(u8, (u8, u8)); 9]>;

fn two_cell_lines(
    grid: &Grid,
    lines: &[CellSet; 9],
    cross: fn(Position) -> u8,
    digit: Digit,
) -> TwoCellLines {
    let mut result = TwoCellLines::new();
    for (index, line) in (0u8..).zip(lines) {
        let mut cells = grid
            .cells_in(*line)
            .filter(|cell| !cell.is_solved() && cell.contains(digit));
        let (Some(first), Some(second), None) = (cells.next(), cells.next(), cells.next()) else {
            continue;
        };
        result.push((index, (cross(first.position()), cross(second.position()))));
    }
    result
}

impl Technique for XWing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        for digit in Digit::ALL {
            for (base, cover, cross) in [
                (
                    &CellSet::ROWS,
                    &CellSet::COLUMNS,
                    Position::column as fn(Position) -> u8,
                ),
                (&CellSet::COLUMNS, &CellSet::ROWS, Position::row),
            ] {
                let lines = two_cell_lines(grid, base, cross, digit);
                for (i, &(line1, cross1)) in lines.iter().enumerate() {
                    for &(line2, cross2) in &lines[i + 1..] {
                        if cross1 != cross2 {
                            continue;
                        }
                        if line1 / 3 == line2 / 3 && cross1.0 / 3 == cross1.1 / 3 {
                            return Err(ConsistencyError::CandidateConstraintViolation.into());
                        }
                        let eliminate = (cover[usize::from(cross1.0)]
                            | cover[usize::from(cross1.1)])
                            .difference(base[usize::from(line1)] | base[usize::from(line2)]);
                        if grid.eliminate_in(eliminate, digit) {
                            return Ok(true);
                        }
                    }
                }
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use inferoku_core::Position;

    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_eliminates_from_covering_columns() {
        let mut grid = Grid::new();
        // D1 appears in rows 0 and 4 only at columns 1 and 7.
        for col in 0..9 {
            if col != 1 && col != 7 {
                grid.eliminate(Position::new(0, col), Digit::D1);
                grid.eliminate(Position::new(4, col), Digit::D1);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&XWing::new())
            .assert_removed_includes(Position::new(2, 1), [Digit::D1])
            .assert_removed_includes(Position::new(6, 7), [Digit::D1])
            .assert_no_change(Position::new(0, 1))
            .assert_no_change(Position::new(4, 7));
    }

    #[test]
    fn test_eliminates_from_covering_rows() {
        let mut grid = Grid::new();
        // D6 appears in columns 2 and 5 only at rows 3 and 8.
        for row in 0..9 {
            if row != 3 && row != 8 {
                grid.eliminate(Position::new(row, 2), Digit::D6);
                grid.eliminate(Position::new(row, 5), Digit::D6);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&XWing::new())
            .assert_removed_includes(Position::new(3, 0), [Digit::D6])
            .assert_removed_includes(Position::new(8, 8), [Digit::D6]);
    }

    #[test]
    fn test_no_change_without_x_wing() {
        TechniqueTester::new(Grid::new())
            .assert_applies(&XWing::new(), false)
            .assert_no_change(Position::new(4, 4));
    }

    #[test]
    fn test_corners_in_one_box_are_inconsistent() {
        let mut grid = Grid::new();
        for col in 2..9 {
            grid.eliminate(Position::new(0, col), Digit::D1);
            grid.eliminate(Position::new(1, col), Digit::D1);
        }

        let result = XWing::new().apply(&mut grid);
        assert_eq!(
            result,
            Err(SolverError::Inconsistent(
                ConsistencyError::CandidateConstraintViolation
            ))
        );
    }
}
