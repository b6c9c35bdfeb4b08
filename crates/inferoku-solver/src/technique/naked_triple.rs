use inferoku_core::{ConsistencyError, Grid, Unit};

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "Naked Triple";

/// A technique that removes candidates using a naked triple within a house.
///
/// A "naked triple" is three cells of a house whose combined candidates
/// amount to exactly three digits; the cells may hold two or three
/// candidates each. The three digits are spoken for, so they can be
/// removed from every other cell of the house.
#[derive(Debug, Default, Clone, Copy)]
pub struct NakedTriple {}

impl NakedTriple {
    /// Creates a new `NakedTriple` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Technique for NakedTriple {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        for unit in Unit::ALL {
            let eligible = (grid.bi_value_cells() | grid.tri_value_cells()) & unit.positions();
            if eligible.len() < 3 {
                continue;
            }
            for (pos1, following1) in eligible.pivots_with_following() {
                let digits1 = grid.candidates_at(pos1);
                for (pos2, following2) in following1.pivots_with_following() {
                    let digits12 = digits1 | grid.candidates_at(pos2);
                    if digits12.len() > 3 {
                        continue;
                    }
                    for (pos3, _) in following2.pivots_with_following() {
                        let digits123 = digits12 | grid.candidates_at(pos3);
                        if digits123.len() > 3 {
                            continue;
                        }
                        if digits123.len() < 3 {
                            return Err(ConsistencyError::CandidateConstraintViolation.into());
                        }

                        let mut eliminate = unit.positions();
                        eliminate.remove(pos1);
                        eliminate.remove(pos2);
                        eliminate.remove(pos3);
                        let mut changed = false;
                        for digit in digits123 {
                            changed |= grid.eliminate_in(eliminate, digit);
                        }
                        if changed {
                            return Ok(true);
                        }
                    }
                }
            }
        }
        Ok(false)
    }
}
