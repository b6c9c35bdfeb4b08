use inferoku_core::{Grid, Unit};

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "BUG+1";

/// The bivalue-universal-grave escape.
///
/// If every unsolved cell held exactly two candidates and every
/// remaining candidate appeared exactly twice per unit, the puzzle would
/// have two solutions. So when exactly one unsolved cell holds three
/// candidates and all others hold two, the tri-value cell must take the
/// candidate whose removal would complete that deadly state: the one
/// leaving every unit of the cell with two occurrences.
#[derive(Debug, Default, Clone, Copy)]
pub struct BugPlusOne {}

impl BugPlusOne {
    /// Creates a new `BugPlusOne` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Technique for BugPlusOne {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        let Some(triad) = grid.tri_value_cells().as_single() else {
            return Ok(false);
        };
        if grid.cells(false).any(|cell| cell.candidate_count() > 3) {
            return Ok(false);
        }

        for candidate in grid.candidates_at(triad) {
            let escapes = Unit::containing(triad).into_iter().all(|unit| {
                let appearances = grid
                    .cells_in(unit.positions())
                    .filter(|cell| cell.position() != triad && cell.contains(candidate))
                    .count();
                appearances == 2
            });
            if escapes {
                grid.place(triad, candidate);
                return Ok(true);
            }
        }
        Ok(false)
    }
}
