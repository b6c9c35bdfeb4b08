use inferoku_core::{CellSet, Digit, Grid, Position, Unit};

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Hidden Single";

/// A technique that finds digits confined to one cell of a house.
///
/// A "hidden single" occurs when a digit has only one possible cell left
/// in a row, column, or box, even though that cell may still hold other
/// candidates. Unlike the pattern techniques, the sweep covers every
/// house in one pass, placing every hidden single it finds.
///
/// # Examples
///
/// ```
/// use inferoku_core::Grid;
/// use inferoku_solver::technique::{HiddenSingle, Technique};
///
/// let mut grid = Grid::new();
/// let changed = HiddenSingle::new().apply(&mut grid)?;
/// assert!(!changed);
/// # Ok::<(), inferoku_solver::SolverError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenSingle {}

impl HiddenSingle {
    /// Creates a new `HiddenSingle` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Technique for HiddenSingle {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        let mut changed = false;
        for digit in Digit::ALL {
            for unit in Unit::ALL {
                let Some(pos) = sole_candidate_cell(grid, unit, digit) else {
                    continue;
                };
                changed |= grid.place(pos, digit);
            }
        }
        Ok(changed)
    }
}

/// Returns the only unsolved cell of the unit that can still hold the
/// digit, or `None` if the digit is already solved there or has several
/// cells left.
fn sole_candidate_cell(grid: &Grid, unit: Unit, digit: Digit) -> Option<Position> {
    let mut found = CellSet::EMPTY;
    for pos in unit.positions() {
        let cell = grid.cell_at(pos);
        if !cell.contains(digit) {
            continue;
        }
        if cell.is_solved() {
            return None;
        }
        found.insert(pos);
    }
    found.as_single()
}
