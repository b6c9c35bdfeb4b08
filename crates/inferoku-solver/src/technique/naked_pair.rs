use inferoku_core::{CellSet, ConsistencyError, Grid, Unit};

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Naked Pair";

/// A technique that removes candidates using a naked pair within a house.
///
/// A "naked pair" occurs when two cells of a row, column, or box hold
/// exactly the same two candidates. Those two digits go to the pair one
/// way or the other, so they can be removed from every other cell of the
/// house. Three cells sharing one pair cannot all be satisfied and are
/// reported as a constraint violation.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedPair {}

impl NakedPair {
    /// Creates a new `NakedPair` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Technique for NakedPair {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        for unit in Unit::ALL {
            let pair_cells = grid.bi_value_cells() & unit.positions();
            if pair_cells.len() < 2 {
                continue;
            }
            for (pos1, following) in pair_cells.pivots_with_following() {
                let pair = grid.candidates_at(pos1);
                if pair.len() != 2 {
                    continue;
                }
                let mut matching = CellSet::EMPTY;
                for pos2 in following {
                    if grid.candidates_at(pos2) == pair {
                        matching.insert(pos2);
                    }
                }
                if matching.len() > 1 {
                    return Err(ConsistencyError::CandidateConstraintViolation.into());
                }
                let Some(pos2) = matching.as_single() else {
                    continue;
                };

                let mut eliminate = unit.positions();
                eliminate.remove(pos1);
                eliminate.remove(pos2);
                let mut changed = false;
                for digit in pair {
                    changed |= grid.eliminate_in(eliminate, digit);
                }
                if changed {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}
