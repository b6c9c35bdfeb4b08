use inferoku_core::Grid;
use log::{debug, trace};

use crate::technique::{self, BoxedTechnique};

/// Outcome of a solving round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    /// All 81 cells are solved.
    Solved,
    /// A technique changed the grid, but the puzzle is not solved yet.
    Progress,
    /// No technique changed anything; the puzzle is beyond the
    /// engine's inference power.
    NoChanges,
    /// The grid violates the sudoku constraints.
    Contradiction,
}

impl RoundResult {
    /// Returns `true` unless further rounds could still make progress.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Progress)
    }
}

/// The round driver: sequences techniques over a grid.
///
/// A round tries the configured techniques in order and ends with the
/// first technique that changes the grid. After any progress the next
/// round starts from the first technique again, so cheaper inferences
/// are always preferred.
///
/// # Examples
///
/// ```
/// use inferoku_core::Grid;
/// use inferoku_solver::{RoundResult, Solver};
///
/// let solver = Solver::with_all_techniques();
/// let mut grid = Grid::new();
///
/// // An empty grid offers no deduction at all.
/// assert_eq!(solver.run_round(&mut grid), RoundResult::NoChanges);
/// ```
#[derive(Debug, Clone)]
pub struct Solver {
    techniques: Vec<BoxedTechnique>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::with_all_techniques()
    }
}

impl Solver {
    /// Creates a solver with a custom technique list, applied in order.
    #[must_use]
    pub fn new(techniques: Vec<BoxedTechnique>) -> Self {
        Self { techniques }
    }

    /// Creates a solver with the canonical technique list, ordered from
    /// cheapest to most expensive.
    #[must_use]
    pub fn with_all_techniques() -> Self {
        Self::new(technique::all_techniques())
    }

    /// Returns the configured techniques in application order.
    #[must_use]
    pub fn techniques(&self) -> &[BoxedTechnique] {
        &self.techniques
    }

    /// Runs one round: tries techniques in order and stops at the first
    /// one that changes the grid.
    ///
    /// Returns [`RoundResult::Solved`] when the grid completes,
    /// [`RoundResult::Progress`] when something changed short of a
    /// solution, [`RoundResult::NoChanges`] when no technique applies,
    /// and [`RoundResult::Contradiction`] when the grid state is
    /// inconsistent before, during, or after the round.
    pub fn run_round(&self, grid: &mut Grid) -> RoundResult {
        if let Err(err) = grid.check_consistency() {
            debug!("round aborted: {err}");
            return RoundResult::Contradiction;
        }
        for technique in &self.techniques {
            match technique.apply(grid) {
                Err(err) => {
                    debug!("{} failed: {err}", technique.name());
                    return RoundResult::Contradiction;
                }
                Ok(true) => {
                    debug!("{} made progress", technique.name());
                    return match grid.is_solved() {
                        Err(_) => RoundResult::Contradiction,
                        Ok(true) => RoundResult::Solved,
                        Ok(false) => RoundResult::Progress,
                    };
                }
                Ok(false) => {}
            }
        }
        match grid.is_solved() {
            Err(_) => RoundResult::Contradiction,
            Ok(true) => RoundResult::Solved,
            Ok(false) => RoundResult::NoChanges,
        }
    }

    /// Runs rounds until a terminal state and returns it.
    pub fn solve(&self, grid: &mut Grid) -> RoundResult {
        loop {
            let result = self.run_round(grid);
            trace!("round finished: {result:?}");
            if result.is_terminal() {
                return result;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use inferoku_core::{Digit, DigitSet, Grid, Position};

    use super::*;

    /// The candidate-grid fixture whose full deduction run is known to
    /// terminate in a solved state.
    const FIXTURE: &str = "
        +------------------+-------------------+--------------------+
        | 5    267  2378   | 9    14678  147   | 12346 1246 1346    |
        | 4    67   79     | 2    1567   3     | 8     16   156     |
        | 1236 26   238    | 168  14568  145   | 7     9    13456   |
        +------------------+-------------------+--------------------+
        | 269  3    2459   | 16   12569  8     | 12469 7    146     |
        | 2679 1    24579  | 67   25679  257   | 2469  3    468     |
        | 2679 8    279    | 4    123679 127   | 1269  5    16      |
        +------------------+-------------------+--------------------+
        | 237  9    6      | 1378 123478 1247  | 1345  148  134578  |
        | 37   47   1      | 5    3478   9     | 346   468  2       |
        | 8    2457 23457  | 137  12347  6     | 1345  14   9       |
        +------------------+-------------------+--------------------+
    ";

    const FIXTURE_SOLUTION: &str = "
        +--------------+--------------+--------------+
        | 5   6   8    | 9   4   7    | 1   2   3    |
        | 4   7   9    | 2   1   3    | 8   6   5    |
        | 1   2   3    | 8   6   5    | 7   9   4    |
        +--------------+--------------+--------------+
        | 9   3   4    | 6   5   8    | 2   7   1    |
        | 6   1   5    | 7   9   2    | 4   3   8    |
        | 7   8   2    | 4   3   1    | 9   5   6    |
        +--------------+--------------+--------------+
        | 2   9   6    | 3   8   4    | 5   1   7    |
        | 3   4   1    | 5   7   9    | 6   8   2    |
        | 8   5   7    | 1   2   6    | 3   4   9    |
        +--------------+--------------+--------------+
    ";

    /// A puzzle known to require guessing; pure propagation must stall.
    const GUESS_REQUIRED: &str = "
        1.. ..7 .9.
        .3. .2. ..8
        ..9 6.. 5..
        ..5 3.. 9..
        .1. .8. ..2
        6.. ..4 ...
        3.. ... .1.
        .4. ... ..7
        ..7 ... 3..
    ";

    #[test]
    fn test_guess_required_fixture_shape() {
        let grid = Grid::from_givens(GUESS_REQUIRED).unwrap();
        assert_eq!(grid.solved_cells().len(), 23);
        grid.check_consistency().unwrap();
    }

    #[test]
    fn test_empty_grid_offers_no_deduction() {
        let solver = Solver::with_all_techniques();
        let mut grid = Grid::new();
        assert_eq!(grid.cells(true).count(), 81);
        assert_eq!(solver.run_round(&mut grid), RoundResult::NoChanges);
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_solved_grid_is_a_fixed_point() {
        let solver = Solver::with_all_techniques();
        let mut grid = Grid::from_text(FIXTURE_SOLUTION).unwrap();
        assert!(grid.is_solved().unwrap());
        let before = grid.clone();
        assert_eq!(solver.run_round(&mut grid), RoundResult::Solved);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_full_solve_of_fixture() {
        let solver = Solver::with_all_techniques();
        let mut grid = Grid::from_text(FIXTURE).unwrap();

        let mut result = RoundResult::Progress;
        for _ in 0..42 {
            result = solver.run_round(&mut grid);
            if result.is_terminal() {
                break;
            }
        }
        assert_eq!(result, RoundResult::Solved);
        assert!(grid == FIXTURE_SOLUTION);
        assert_eq!(grid.cell(0, 0).value(), Some(Digit::D5));
        assert_eq!(grid.cell(0, 2).value(), Some(Digit::D8));
    }

    #[test]
    fn test_guess_required_puzzle_stalls_reduced() {
        let solver = Solver::with_all_techniques();
        let mut grid = Grid::from_givens(GUESS_REQUIRED).unwrap();
        let givens = grid.solved_cells().len();
        let candidates_before: usize =
            grid.cells(true).map(|cell| cell.candidate_count()).sum();

        assert_eq!(solver.solve(&mut grid), RoundResult::NoChanges);
        assert!(!grid.is_solved().unwrap());
        // Strictly reduced but incomplete.
        let candidates_after: usize =
            grid.cells(true).map(|cell| cell.candidate_count()).sum();
        assert!(candidates_after <= candidates_before);
        assert!(candidates_after < 81 * 9);
        assert!(grid.solved_cells().len() >= givens);

        // A stalled grid is a fixed point: another round changes nothing.
        let stalled = grid.clone();
        assert_eq!(solver.run_round(&mut grid), RoundResult::NoChanges);
        assert_eq!(grid, stalled);
    }

    #[test]
    fn test_contradiction_is_reported() {
        let solver = Solver::with_all_techniques();
        let mut grid = Grid::new();
        grid.eliminate_set(Position::new(4, 4), DigitSet::FULL);
        assert_eq!(solver.run_round(&mut grid), RoundResult::Contradiction);
        assert_eq!(solver.solve(&mut grid), RoundResult::Contradiction);
    }

    #[test]
    fn test_round_result_terminality() {
        assert!(RoundResult::Solved.is_terminal());
        assert!(RoundResult::NoChanges.is_terminal());
        assert!(RoundResult::Contradiction.is_terminal());
        assert!(!RoundResult::Progress.is_terminal());
    }

    #[test]
    fn test_custom_technique_list() {
        use crate::technique::{BoxedTechnique, HiddenSingle};

        let techniques: Vec<BoxedTechnique> = vec![Box::new(HiddenSingle::new())];
        let solver = Solver::new(techniques);
        assert_eq!(solver.techniques().len(), 1);

        // A single hidden single is found and the driver reports progress.
        let mut grid = Grid::new();
        for col in 0..8 {
            grid.eliminate(Position::new(0, col), Digit::D7);
        }
        assert_eq!(solver.run_round(&mut grid), RoundResult::Progress);
        assert_eq!(grid.cell(0, 8).value(), Some(Digit::D7));
    }
}
