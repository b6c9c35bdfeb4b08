//! The 81-cell candidate grid, its derived views, and its caches.

use std::fmt::{self, Display};

use crate::{Cell, CellSet, Digit, DigitSet, Division, Position, Unit};

/// Errors raised while parsing grid text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseGridError {
    /// The candidate text did not contain exactly 81 cell tokens.
    #[display("expected 81 cell tokens, found {_0}")]
    TokenCount(#[error(not(source))] usize),
    /// A cell token contained a digit outside 1-9.
    #[display("cell {cell} contains the out-of-range digit {digit}")]
    DigitOutOfRange {
        /// Row-major index of the offending cell.
        cell: usize,
        /// The rejected digit value.
        digit: u8,
    },
    /// A cell token repeated a candidate digit.
    #[display("cell {cell} repeats the candidate {digit}")]
    DuplicateCandidate {
        /// Row-major index of the offending cell.
        cell: usize,
        /// The repeated candidate.
        digit: Digit,
    },
    /// The givens text contained a character with no meaning.
    #[display("unexpected character {_0:?} in grid text")]
    UnexpectedCharacter(#[error(not(source))] char),
    /// The givens text did not describe exactly 81 cells.
    #[display("expected 81 cells, found {_0}")]
    CellCount(#[error(not(source))] usize),
}

/// Errors describing a grid state that violates sudoku constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConsistencyError {
    /// A cell has no remaining candidates.
    #[display("a cell has no remaining candidates")]
    NoCandidates,
    /// A row, column, or box holds the same solved value twice.
    #[display("a unit contains the same solved digit twice")]
    DuplicateSolvedDigit,
    /// A technique scan found a structurally impossible candidate pattern.
    #[display("candidate constraints are violated")]
    CandidateConstraintViolation,
}

#[derive(Debug, Clone)]
struct Cache {
    /// Generation the cache was built at; 0 means never built.
    built_at: u64,
    bi_value: CellSet,
    tri_value: CellSet,
    strong_links: [Vec<(Position, Position)>; 9],
}

impl Cache {
    fn empty() -> Self {
        Self {
            built_at: 0,
            bi_value: CellSet::EMPTY,
            tri_value: CellSet::EMPTY,
            strong_links: std::array::from_fn(|_| Vec::new()),
        }
    }
}

/// The 9×9 candidate grid.
///
/// The grid owns a flat array of 81 [`Cell`]s; every view — rows,
/// columns, boxes, bands, stacks, peers — is derived from position masks
/// over that one array, so the views can never disagree.
///
/// All candidate mutation goes through the grid. Whenever a mutation
/// newly solves a cell, the grid immediately performs *basic solve*:
/// the solved value is eliminated from every peer, iterating to a
/// fixpoint. Basic solve also runs when a grid is parsed, so elementary
/// peer eliminations are always in place before any technique runs.
///
/// A monotonically increasing generation counter tracks effective
/// mutations; the cached collections (bi-/tri-value cells and per-digit
/// strong links) record the generation they were built at and rebuild
/// lazily.
///
/// # Examples
///
/// ```
/// use inferoku_core::{Digit, Grid, Position};
///
/// let mut grid = Grid::new();
/// grid.place(Position::new(0, 0), Digit::D5);
///
/// // Basic solve has already cleaned the peers.
/// assert!(!grid.cell(0, 8).contains(Digit::D5));
/// assert!(!grid.cell(8, 0).contains(Digit::D5));
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    cells: [Cell; 81],
    generation: u64,
    /// Solved cells whose peer eliminations have been applied.
    propagated: CellSet,
    cache: Cache,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Creates an empty grid where every cell holds all nine candidates.
    #[must_use]
    pub fn new() -> Self {
        Self::from_candidate_sets([DigitSet::FULL; 81])
    }

    fn from_candidate_sets(sets: [DigitSet; 81]) -> Self {
        let mut cells = [Cell::new(Position::new(0, 0), DigitSet::FULL); 81];
        for pos in Position::ALL {
            cells[pos.index() as usize] = Cell::new(pos, sets[pos.index() as usize]);
        }
        let mut grid = Self {
            cells,
            generation: 1,
            propagated: CellSet::EMPTY,
            cache: Cache::empty(),
        };
        grid.propagate();
        grid
    }

    /// Parses the candidate-set text format: 81 whitespace-separated
    /// digit tokens in row-major order, each token listing a cell's
    /// candidates (a single digit means a solved cell).
    ///
    /// Commas and any other non-digit, non-whitespace characters are
    /// stripped before tokenizing, so grid-art borders are accepted.
    /// Basic solve runs on the parsed grid.
    ///
    /// # Errors
    ///
    /// Returns [`ParseGridError`] if the token count is not 81, a token
    /// contains `0`, or a token repeats a digit.
    pub fn from_text(text: &str) -> Result<Self, ParseGridError> {
        let cleaned: String = text
            .chars()
            .map(|c| if c.is_ascii_digit() { c } else { ' ' })
            .collect();
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        if tokens.len() != 81 {
            return Err(ParseGridError::TokenCount(tokens.len()));
        }

        let mut sets = [DigitSet::EMPTY; 81];
        for (cell, token) in tokens.iter().enumerate() {
            let mut candidates = DigitSet::EMPTY;
            for ch in token.bytes() {
                let value = ch - b'0';
                if !(1..=9).contains(&value) {
                    return Err(ParseGridError::DigitOutOfRange { cell, digit: value });
                }
                let digit = Digit::from_value(value);
                if !candidates.insert(digit) {
                    return Err(ParseGridError::DuplicateCandidate { cell, digit });
                }
            }
            sets[cell] = candidates;
        }
        Ok(Self::from_candidate_sets(sets))
    }

    /// Parses a givens grid: 81 cells in row-major order where digits are
    /// solved givens and `.`, `_`, or `0` are empty cells. Whitespace is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ParseGridError`] on unexpected characters or a cell
    /// count other than 81.
    pub fn from_givens(text: &str) -> Result<Self, ParseGridError> {
        let mut sets = [DigitSet::EMPTY; 81];
        let mut count = 0usize;
        for ch in text.chars() {
            let candidates = match ch {
                c if c.is_whitespace() => continue,
                '.' | '_' | '0' => DigitSet::FULL,
                '1'..='9' => DigitSet::from_elem(Digit::from_value(ch as u8 - b'0')),
                other => return Err(ParseGridError::UnexpectedCharacter(other)),
            };
            if count < 81 {
                sets[count] = candidates;
            }
            count += 1;
        }
        if count != 81 {
            return Err(ParseGridError::CellCount(count));
        }
        Ok(Self::from_candidate_sets(sets))
    }

    /// Returns the cell at the given row and column.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is greater than 8.
    #[must_use]
    #[inline]
    pub fn cell(&self, row: u8, col: u8) -> &Cell {
        self.cell_at(Position::new(row, col))
    }

    /// Returns the cell at the given position.
    #[must_use]
    #[inline]
    pub fn cell_at(&self, pos: Position) -> &Cell {
        &self.cells[pos.index() as usize]
    }

    /// Returns the candidate set at the given position.
    #[must_use]
    #[inline]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        self.cell_at(pos).candidates()
    }

    /// Iterates the cells at the given positions, in index order.
    pub fn cells_in(&self, positions: CellSet) -> impl Iterator<Item = &Cell> {
        positions.iter().map(|pos| self.cell_at(pos))
    }

    /// Iterates all 81 cells, optionally skipping solved ones.
    pub fn cells(&self, include_solved: bool) -> impl Iterator<Item = &Cell> {
        self.cells
            .iter()
            .filter(move |cell| include_solved || !cell.is_solved())
    }

    /// Iterates the 9 cells of a row.
    pub fn row(&self, i: u8) -> impl Iterator<Item = &Cell> {
        self.cells_in(CellSet::ROWS[usize::from(i)])
    }

    /// Iterates the 9 cells of a column.
    pub fn column(&self, i: u8) -> impl Iterator<Item = &Cell> {
        self.cells_in(CellSet::COLUMNS[usize::from(i)])
    }

    /// Iterates the 9 cells of a box.
    pub fn box_cells(&self, i: u8) -> impl Iterator<Item = &Cell> {
        self.cells_in(CellSet::BOXES[usize::from(i)])
    }

    /// Iterates the 27 cells of a band (three stacked rows).
    pub fn band(&self, i: u8) -> impl Iterator<Item = &Cell> {
        self.cells_in(CellSet::BANDS[usize::from(i)])
    }

    /// Iterates the 27 cells of a stack (three side-by-side columns).
    pub fn stack(&self, i: u8) -> impl Iterator<Item = &Cell> {
        self.cells_in(CellSet::STACKS[usize::from(i)])
    }

    /// Iterates the 9 cells of a house.
    pub fn unit_cells(&self, unit: Unit) -> impl Iterator<Item = &Cell> {
        self.cells_in(unit.positions())
    }

    /// Iterates the up-to-20 peers of a position, optionally skipping
    /// solved cells.
    pub fn visible_from(&self, pos: Position, include_solved: bool) -> impl Iterator<Item = &Cell> {
        self.cells_in(pos.peers())
            .filter(move |cell| include_solved || !cell.is_solved())
    }

    /// Returns the positions of all solved cells.
    #[must_use]
    pub fn solved_cells(&self) -> CellSet {
        self.cells
            .iter()
            .filter(|cell| cell.is_solved())
            .map(Cell::position)
            .collect()
    }

    /// Returns the positions of all unsolved cells.
    #[must_use]
    pub fn unsolved_cells(&self) -> CellSet {
        !self.solved_cells()
    }

    /// Returns the positions of unsolved cells with exactly two
    /// candidates. Cached per generation.
    pub fn bi_value_cells(&mut self) -> CellSet {
        self.refresh_cache();
        self.cache.bi_value
    }

    /// Returns the positions of unsolved cells with exactly three
    /// candidates. Cached per generation.
    pub fn tri_value_cells(&mut self) -> CellSet {
        self.refresh_cache();
        self.cache.tri_value
    }

    /// Returns the strong links for a digit: every unordered pair of
    /// unsolved cells `{a, b}` such that some unit contains the digit in
    /// exactly those two cells. Pairs are deduplicated across units and
    /// ordered by position index. Cached per generation.
    pub fn strong_links(&mut self, digit: Digit) -> Vec<(Position, Position)> {
        self.refresh_cache();
        self.cache.strong_links[usize::from(digit.value() - 1)].clone()
    }

    /// Returns `true` if `a` and `b` form a strong link on `digit`: they
    /// share a unit in which no other unsolved cell holds the digit.
    #[must_use]
    pub fn are_strongly_linked(&self, a: Position, b: Position, digit: Digit) -> bool {
        if a == b {
            return false;
        }
        let cell_a = self.cell_at(a);
        let cell_b = self.cell_at(b);
        if cell_a.is_solved()
            || cell_b.is_solved()
            || !cell_a.contains(digit)
            || !cell_b.contains(digit)
        {
            return false;
        }
        let pair = CellSet::from_elem(a) | CellSet::from_elem(b);
        for division in [Division::Row, Division::Column, Division::Box] {
            if !a.aligned(b, division) {
                continue;
            }
            let unit = division.positions(a.division_index(division));
            let exclusive = self
                .cells_in(unit.difference(pair))
                .all(|cell| cell.is_solved() || !cell.contains(digit));
            if exclusive {
                return true;
            }
        }
        false
    }

    /// Returns the generation counter. Every effective mutation bumps it.
    #[must_use]
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Removes a candidate from a cell.
    ///
    /// The request is ignored for solved cells (they are frozen) and for
    /// candidates that are already absent. Returns `true` if the
    /// candidate set shrank. If the removal solves the cell, basic solve
    /// runs before returning.
    pub fn eliminate(&mut self, pos: Position, digit: Digit) -> bool {
        self.eliminate_set(pos, DigitSet::from_elem(digit))
    }

    /// Removes a set of candidates from a cell; see [`eliminate`](Self::eliminate).
    pub fn eliminate_set(&mut self, pos: Position, digits: DigitSet) -> bool {
        let changed = self.cells[pos.index() as usize].remove_candidates(digits);
        if changed {
            self.generation += 1;
            if self.cells[pos.index() as usize].is_solved() {
                self.propagate();
            }
        }
        changed
    }

    /// Removes a candidate from every cell in a mask; returns `true` if
    /// any cell changed.
    pub fn eliminate_in(&mut self, positions: CellSet, digit: Digit) -> bool {
        let mut changed = false;
        for pos in positions {
            changed |= self.eliminate(pos, digit);
        }
        changed
    }

    /// Assigns a value to a cell by intersecting its candidates with the
    /// single digit.
    ///
    /// Solved cells are frozen, so re-placing a solved cell is a no-op.
    /// Placing a digit that is not a candidate empties the cell, which
    /// [`check_consistency`](Self::check_consistency) reports as a
    /// contradiction.
    pub fn place(&mut self, pos: Position, digit: Digit) -> bool {
        self.restrict(pos, DigitSet::from_elem(digit))
    }

    /// Intersects a cell's candidates with the given set; see
    /// [`place`](Self::place).
    pub fn restrict(&mut self, pos: Position, digits: DigitSet) -> bool {
        let changed = self.cells[pos.index() as usize].restrict_candidates(digits);
        if changed {
            self.generation += 1;
            if self.cells[pos.index() as usize].is_solved() {
                self.propagate();
            }
        }
        changed
    }

    /// Eliminates the value of every solved-but-unpropagated cell from
    /// its peers, iterating until no such cell remains.
    fn propagate(&mut self) {
        loop {
            let pending = self.solved_cells().difference(self.propagated);
            let Some(pos) = pending.first() else {
                break;
            };
            self.propagated.insert(pos);
            let Some(value) = self.cells[pos.index() as usize].value() else {
                continue;
            };
            for peer in pos.peers() {
                if self.cells[peer.index() as usize].remove_candidates(DigitSet::from_elem(value)) {
                    self.generation += 1;
                }
            }
        }
    }

    /// Checks that the grid satisfies the sudoku constraints: every cell
    /// has at least one candidate and no unit holds a solved value twice.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] describing the first violation found.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        if self.cells.iter().any(|cell| cell.candidates().is_empty()) {
            return Err(ConsistencyError::NoCandidates);
        }
        for unit in Unit::ALL {
            let mut seen = DigitSet::EMPTY;
            for cell in self.unit_cells(unit) {
                if let Some(value) = cell.value()
                    && !seen.insert(value)
                {
                    return Err(ConsistencyError::DuplicateSolvedDigit);
                }
            }
        }
        Ok(())
    }

    /// Returns whether all 81 cells are solved.
    ///
    /// # Errors
    ///
    /// Returns [`ConsistencyError`] if the grid violates the sudoku
    /// constraints.
    pub fn is_solved(&self) -> Result<bool, ConsistencyError> {
        self.check_consistency()?;
        Ok(self.cells.iter().all(Cell::is_solved))
    }

    fn refresh_cache(&mut self) {
        if self.cache.built_at == self.generation {
            return;
        }
        let mut bi_value = CellSet::EMPTY;
        let mut tri_value = CellSet::EMPTY;
        for cell in &self.cells {
            match cell.candidate_count() {
                2 => {
                    bi_value.insert(cell.position());
                }
                3 => {
                    tri_value.insert(cell.position());
                }
                _ => {}
            }
        }
        self.cache.bi_value = bi_value;
        self.cache.tri_value = tri_value;

        for digit in Digit::ALL {
            let links = &mut self.cache.strong_links[usize::from(digit.value() - 1)];
            links.clear();
            for unit in Unit::ALL {
                let Some(link) = strong_link_in(&self.cells, unit, digit) else {
                    continue;
                };
                if !links.contains(&link) {
                    links.push(link);
                }
            }
        }
        self.cache.built_at = self.generation;
    }
}

/// Finds the strong link for `digit` within a unit: exactly two unsolved
/// cells hold the digit and no solved cell claims it.
fn strong_link_in(cells: &[Cell; 81], unit: Unit, digit: Digit) -> Option<(Position, Position)> {
    let mut found: Option<(Position, Option<Position>)> = None;
    for pos in unit.positions() {
        let cell = &cells[pos.index() as usize];
        if !cell.contains(digit) {
            continue;
        }
        if cell.is_solved() {
            return None;
        }
        found = match found {
            None => Some((pos, None)),
            Some((first, None)) => Some((first, Some(pos))),
            Some((_, Some(_))) => return None,
        };
    }
    match found {
        Some((a, Some(b))) => Some((a, b)),
        _ => None,
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        std::iter::zip(&self.cells, &other.cells)
            .all(|(a, b)| a.candidates() == b.candidates())
    }
}

impl Eq for Grid {}

impl PartialEq<str> for Grid {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other || Self::from_text(other).is_ok_and(|grid| grid == *self)
    }
}

impl PartialEq<&str> for Grid {
    fn eq(&self, other: &&str) -> bool {
        self.eq(*other)
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let divisor = format!("+{0}+{0}+{0}+", "-".repeat(30));
        for band in 0..3u8 {
            writeln!(f, "{divisor}")?;
            for row_in_band in 0..3u8 {
                write!(f, "|")?;
                for col in 0..9u8 {
                    let cell = self.cell(band * 3 + row_in_band, col);
                    let digits: String = cell
                        .candidates()
                        .iter()
                        .map(|d| char::from(b'0' + d.value()))
                        .collect();
                    write!(f, " {digits:<9}")?;
                    if col % 3 == 2 {
                        write!(f, "|")?;
                    }
                }
                writeln!(f)?;
            }
        }
        write!(f, "{divisor}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(values: &[u8]) -> DigitSet {
        values.iter().map(|&v| Digit::from_value(v)).collect()
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::new();
        assert_eq!(grid.cells(true).count(), 81);
        assert_eq!(grid.cells(false).count(), 81);
        assert!(grid.cells(true).all(|cell| !cell.is_solved()));
        assert!(grid.check_consistency().is_ok());
        assert!(!grid.is_solved().unwrap());
    }

    #[test]
    fn test_views_agree() {
        let grid = Grid::new();
        for row in 0..9 {
            for col in 0..9 {
                let cell = grid.cell(row, col);
                let pos = cell.position();
                assert_eq!(grid.row(row).nth(usize::from(col)).unwrap(), cell);
                assert_eq!(grid.column(col).nth(usize::from(row)).unwrap(), cell);
                assert_eq!(
                    grid.box_cells(pos.box_index())
                        .nth(usize::from(pos.box_cell_index()))
                        .unwrap(),
                    cell
                );
                assert!(grid.band(pos.band()).any(|c| c == cell));
                assert!(grid.stack(pos.stack()).any(|c| c == cell));
            }
        }
    }

    #[test]
    fn test_place_propagates_to_peers() {
        let mut grid = Grid::new();
        grid.place(Position::new(0, 0), Digit::D5);
        for cell in grid.visible_from(Position::new(0, 0), true) {
            assert!(!cell.contains(Digit::D5), "{cell:?}");
        }
        // Cells outside the peer set keep the candidate.
        assert!(grid.cell(8, 8).contains(Digit::D5));
    }

    #[test]
    fn test_propagation_chains() {
        // Solving one cell can cascade through newly solved peers.
        let mut grid = Grid::new();
        for col in 1..8 {
            grid.place(Position::new(0, col), Digit::from_value(col + 1));
        }
        // Row 0 now holds 2-8 in columns 1-7; cells (0,0) and (0,8) keep {1, 9}.
        assert_eq!(grid.candidates_at(Position::new(0, 0)), digits(&[1, 9]));
        grid.place(Position::new(0, 0), Digit::D1);
        // (0,8) is solved transitively and its own peers are cleaned.
        assert_eq!(grid.cell(0, 8).value(), Some(Digit::D9));
        assert!(!grid.cell(5, 8).contains(Digit::D9));
    }

    #[test]
    fn test_solved_cells_are_frozen() {
        let mut grid = Grid::new();
        grid.place(Position::new(4, 4), Digit::D7);
        assert!(!grid.eliminate(Position::new(4, 4), Digit::D7));
        assert_eq!(grid.cell(4, 4).value(), Some(Digit::D7));
        assert!(!grid.place(Position::new(4, 4), Digit::D3));
        assert_eq!(grid.cell(4, 4).value(), Some(Digit::D7));
    }

    #[test]
    fn test_eliminating_all_candidates_is_a_contradiction() {
        let mut grid = Grid::new();
        let pos = Position::new(4, 4);
        assert!(grid.eliminate_set(pos, DigitSet::FULL));
        assert!(grid.candidates_at(pos).is_empty());
        assert_eq!(
            grid.check_consistency(),
            Err(ConsistencyError::NoCandidates)
        );
        assert!(grid.is_solved().is_err());
    }

    #[test]
    fn test_duplicate_solved_digit_is_a_contradiction() {
        // Two solved fives in one row survive parsing (propagation never
        // touches solved cells) and the consistency check reports them.
        let text = format!("5 5 {}", vec!["123456789"; 79].join(" "));
        let grid = Grid::from_text(&text).unwrap();
        assert_eq!(
            grid.check_consistency(),
            Err(ConsistencyError::DuplicateSolvedDigit)
        );
    }

    #[test]
    fn test_place_absent_candidate_empties_cell() {
        let mut grid = Grid::new();
        let pos = Position::new(2, 2);
        grid.eliminate(pos, Digit::D9);
        grid.place(pos, Digit::D9);
        assert!(grid.candidates_at(pos).is_empty());
        assert_eq!(
            grid.check_consistency(),
            Err(ConsistencyError::NoCandidates)
        );
    }

    #[test]
    fn test_generation_counts_effective_mutations() {
        let mut grid = Grid::new();
        let before = grid.generation();
        assert!(grid.eliminate(Position::new(0, 0), Digit::D1));
        assert!(grid.generation() > before);

        let unchanged = grid.generation();
        assert!(!grid.eliminate(Position::new(0, 0), Digit::D1));
        assert_eq!(grid.generation(), unchanged);
    }

    #[test]
    fn test_bi_and_tri_value_caches() {
        let mut grid = Grid::new();
        let bi = Position::new(0, 0);
        let tri = Position::new(8, 8);
        grid.restrict(bi, digits(&[1, 2]));
        grid.restrict(tri, digits(&[4, 5, 6]));

        assert_eq!(grid.bi_value_cells(), CellSet::from_elem(bi));
        assert_eq!(grid.tri_value_cells(), CellSet::from_elem(tri));

        // The cache follows further mutations.
        grid.eliminate(tri, Digit::D6);
        assert_eq!(
            grid.bi_value_cells(),
            CellSet::from_elem(bi) | CellSet::from_elem(tri)
        );
        assert!(grid.tri_value_cells().is_empty());
    }

    #[test]
    fn test_strong_links() {
        let mut grid = Grid::new();
        // Confine D4 in row 0 to columns 2 and 6.
        for col in [0, 1, 3, 4, 5, 7, 8] {
            grid.eliminate(Position::new(0, col), Digit::D4);
        }
        let links = grid.strong_links(Digit::D4);
        let expected = (Position::new(0, 2), Position::new(0, 6));
        assert!(links.contains(&expected), "{links:?}");
        assert!(grid.are_strongly_linked(expected.0, expected.1, Digit::D4));
        assert!(!grid.are_strongly_linked(expected.0, expected.1, Digit::D5));
        assert!(!grid.are_strongly_linked(
            Position::new(0, 2),
            Position::new(5, 2),
            Digit::D4
        ));
    }

    #[test]
    fn test_strong_links_deduplicated_across_units() {
        let mut grid = Grid::new();
        // Confine D7 in box 0 to (0,0) and (0,1): the link exists both in
        // row 0 and in box 0 but is reported once.
        for pos in CellSet::BOXES[0] {
            if pos != Position::new(0, 0) && pos != Position::new(0, 1) {
                grid.eliminate(pos, Digit::D7);
            }
        }
        for col in 2..9 {
            grid.eliminate(Position::new(0, col), Digit::D7);
        }
        let links = grid.strong_links(Digit::D7);
        let matching: Vec<_> = links
            .iter()
            .filter(|&&(a, b)| a == Position::new(0, 0) && b == Position::new(0, 1))
            .collect();
        assert_eq!(matching.len(), 1);
    }

    #[test]
    fn test_from_text_roundtrip() {
        let mut grid = Grid::new();
        grid.place(Position::new(0, 0), Digit::D5);
        grid.restrict(Position::new(4, 4), digits(&[2, 6, 7, 9]));
        let text = grid.to_string();
        let reparsed = Grid::from_text(&text).unwrap();
        assert_eq!(reparsed, grid);
        assert!(grid == text.as_str());
    }

    #[test]
    fn test_from_text_accepts_grid_art() {
        let text = format!(
            "+---+---+\n| 5, {} |\n+---+---+",
            vec!["123456789"; 80].join(" ")
        );
        let grid = Grid::from_text(&text).unwrap();
        assert_eq!(grid.cell(0, 0).value(), Some(Digit::D5));
        assert!(!grid.cell(0, 1).contains(Digit::D5));
    }

    #[test]
    fn test_from_text_errors() {
        assert_eq!(
            Grid::from_text("5 5 5"),
            Err(ParseGridError::TokenCount(3))
        );
        let with_zero = format!("50 {}", vec!["123456789"; 80].join(" "));
        assert_eq!(
            Grid::from_text(&with_zero),
            Err(ParseGridError::DigitOutOfRange { cell: 0, digit: 0 })
        );
        let with_dup = format!("55 {}", vec!["123456789"; 80].join(" "));
        assert_eq!(
            Grid::from_text(&with_dup),
            Err(ParseGridError::DuplicateCandidate {
                cell: 0,
                digit: Digit::D5
            })
        );
    }

    #[test]
    fn test_from_givens() {
        let grid = Grid::from_givens(
            "5__ ___ ___
             ___ ___ ___
             ___ ___ ___
             ___ ___ ___
             ___ ___ ___
             ___ ___ ___
             ___ ___ ___
             ___ ___ ___
             ___ ___ __3",
        )
        .unwrap();
        assert_eq!(grid.cell(0, 0).value(), Some(Digit::D5));
        assert_eq!(grid.cell(8, 8).value(), Some(Digit::D3));
        assert!(!grid.cell(0, 4).contains(Digit::D5));

        assert_eq!(
            Grid::from_givens("5_"),
            Err(ParseGridError::CellCount(2))
        );
        assert!(matches!(
            Grid::from_givens(&"x".repeat(81)),
            Err(ParseGridError::UnexpectedCharacter('x'))
        ));
    }

    #[test]
    fn test_solved_value_absent_from_peers() {
        // Invariant: a solved cell's value never remains in its peers.
        let mut grid = Grid::from_givens(
            "53_ _7_ ___
             6__ 195 ___
             _98 ___ _6_
             8__ _6_ __3
             4__ 8_3 __1
             7__ _2_ __6
             _6_ ___ 28_
             ___ 419 __5
             ___ _8_ _79",
        )
        .unwrap();
        grid.check_consistency().unwrap();
        for pos in Position::ALL {
            if let Some(value) = grid.cell_at(pos).value() {
                for peer in grid.visible_from(pos, true) {
                    assert!(!peer.contains(value), "{pos:?} {peer:?}");
                }
            }
        }
    }

    #[test]
    fn test_display_format() {
        let grid = Grid::new();
        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("+--"));
        assert_eq!(lines[0].len(), 94);
        assert_eq!(lines[1].len(), 94);
        assert!(lines[1].starts_with("| 123456789"));
    }

    #[test]
    fn test_grid_equality_with_text() {
        let grid = Grid::new();
        let text = grid.to_string();
        assert!(grid == text.as_str());
        let tokens = vec!["123456789"; 81].join(" ");
        assert!(grid == tokens.as_str());
        assert!(grid != "not a grid");
    }
}
