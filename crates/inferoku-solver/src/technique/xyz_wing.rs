use inferoku_core::{Division, Grid};

use crate::{
    SolverError,
    technique::{BoxedTechnique, Technique},
};

const NAME: &str = "XYZ-Wing";

/// A technique that removes candidates using an XYZ-Wing pattern.
///
/// A tri-value hinge `{X, Y, Z}` sees two bi-value wings `{X, Z}` and
/// `{Y, Z}`. Every resolution of the hinge places `Z` in the hinge or a
/// wing, so `Z` can be removed from any cell seeing all three.
#[derive(Debug, Default, Clone, Copy)]
pub struct XyzWing {}

impl XyzWing {
    /// Creates a new `XyzWing` technique.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Technique for XyzWing {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedTechnique {
        Box::new(*self)
    }

    fn apply(&self, grid: &mut Grid) -> Result<bool, SolverError> {
        let bi_value = grid.bi_value_cells();
        for hinge in grid.tri_value_cells() {
            let hinge_digits = grid.candidates_at(hinge);
            let wings: Vec<_> = (hinge.peers() & bi_value)
                .iter()
                .filter(|&pos| grid.candidates_at(pos).is_subset(hinge_digits))
                .collect();
            if wings.len() < 2 {
                continue;
            }

            for (i, &wing1) in wings.iter().enumerate() {
                for &wing2 in &wings[i + 1..] {
                    // All three on one line or in one box is a naked
                    // triple, not a wing.
                    let collinear = [Division::Row, Division::Column, Division::Box]
                        .into_iter()
                        .any(|div| {
                            hinge.aligned(wing1, div) && hinge.aligned(wing2, div)
                        });
                    if collinear {
                        continue;
                    }
                    let Some(z) = (grid.candidates_at(wing1) & grid.candidates_at(wing2))
                        .as_single()
                    else {
                        continue;
                    };
                    let mut changed = false;
                    for pos in hinge.peers() & wing1.peers() & wing2.peers() {
                        if !grid.cell_at(pos).is_solved() {
                            changed |= grid.eliminate(pos, z);
                        }
                    }
                    if changed {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }
}
