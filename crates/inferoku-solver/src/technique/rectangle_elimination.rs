use inferoku_core::{CellSet, Digit, Division, Grid, Position};

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Rectangle Elimination";

/// A technique that removes a candidate by completing a rectangle from a
/// strong link.
///
/// Take a strong link (hinge, wing1) for a digit along a row or column,
/// with the two cells in different boxes, and a second wing on the
/// perpendicular line through the hinge, in a third box. If placing the
/// digit in wing2 would leave the box diagonally opposite wing1 with no
/// cell for the digit (every remaining candidate there is seen by wing1
/// or wing2), the digit can be removed from wing2: wing2 would force the
/// hinge off and the strong link would push the digit into wing1,
/// emptying that box.
#[derive(Debug, Default, Clone, Copy)]
pub struct RectangleElimination {}

impl RectangleElimination {
    /// Creates a new `RectangleElimination` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    fn try_line(
        grid: &mut Grid,
        line: CellSet,
        perpendicular: Division,
        digit: Digit,
    ) -> bool {
        let Some((a, b)) = strong_link_in_line(grid, line, digit) else {
            return false;
        };
        if a.box_index() == b.box_index() {
            return false;
        }

        for (hinge, wing1) in [(a, b), (b, a)] {
            let wing_range = perpendicular.positions(hinge.division_index(perpendicular));
            for wing2 in wing_range {
                let cell = grid.cell_at(wing2);
                if cell.is_solved() || !cell.contains(digit) {
                    continue;
                }
                if wing2.box_index() == hinge.box_index()
                    || wing2.box_index() == wing1.box_index()
                {
                    continue;
                }
                let mut opposite = wing2.band() * 3 + wing1.stack();
                if opposite == hinge.box_index() {
                    opposite = wing1.band() * 3 + wing2.stack();
                }
                let wiped = grid
                    .cells_in(CellSet::BOXES[usize::from(opposite)])
                    .filter(|cell| cell.contains(digit))
                    .all(|cell| {
                        wing1.sees(cell.position()) || wing2.sees(cell.position())
                    });
                if wiped {
                    grid.eliminate(wing2, digit);
                    return true;
                }
            }
        }
        false
    }
}

/// The strong link for `digit` within a line: exactly two unsolved cells
/// hold the digit and no solved cell claims it.
fn strong_link_in_line(grid: &Grid, line: CellSet, digit: Digit) -> Option<(Position, Position)> {
    let mut cells = CellSet::EMPTY;
    for cell in grid.cells_in(line) {
        if !cell.contains(digit) {
            continue;
        }
        if cell.is_solved() {
            return None;
        }
        cells.insert(cell.position());
    }
    if cells.len() != 2 {
        return None;
    }
    let mut iter = cells.iter();
    Some((iter.next()?, iter.next()?))
}

impl Technique for RectangleElimination {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        for digit in Digit::ALL {
            for (lines, perpendicular) in [
                (&CellSet::ROWS, Division::Column),
                (&CellSet::COLUMNS, Division::Row),
            ] {
                for line in lines {
                    if Self::try_line(grid, *line, perpendicular, digit) {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TechniqueTester;

    #[test]
    fn test_eliminates_wing_that_would_empty_opposite_box() {
        let mut grid = Grid::new();
        // Strong link for D5 in row 0: (0,0) and (0,4), different boxes.
        for col in [1, 2, 3, 5, 6, 7, 8] {
            grid.eliminate(Position::new(0, col), Digit::D5);
        }
        // Wing2 at (6,0) on the hinge's column. The opposite box is the
        // one at band 2, stack 1; leave D5 there only in row 6 and
        // column 4, all seen by wing1 (0,4) or wing2 (6,0).
        for pos in CellSet::BOXES[7] {
            if pos.row() != 6 && pos.column() != 4 {
                grid.eliminate(pos, Digit::D5);
            }
        }

        TechniqueTester::new(grid)
            .apply_once(&RectangleElimination::new())
            .assert_removed_includes(Position::new(6, 0), [Digit::D5]);
    }

    #[test]
    fn test_survivor_in_opposite_box_blocks_elimination() {
        let mut grid = Grid::new();
        for col in [1, 2, 3, 5, 6, 7, 8] {
            grid.eliminate(Position::new(0, col), Digit::D5);
        }
        // Box 7 keeps a D5 cell seen by neither wing, so nothing fires.
        TechniqueTester::new(grid)
            .assert_applies(&RectangleElimination::new(), false)
            .assert_no_change(Position::new(6, 0));
    }

    #[test]
    fn test_no_change_without_strong_links() {
        TechniqueTester::new(Grid::new())
            .assert_applies(&RectangleElimination::new(), false)
            .assert_no_change(Position::new(4, 4));
    }
}
