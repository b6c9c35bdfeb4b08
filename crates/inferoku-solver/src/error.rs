use inferoku_core::ConsistencyError;

/// Errors that can occur during solving.
///
/// Techniques do not invent errors of their own: a technique that finds
/// no pattern simply reports no progress. The only failure mode is a
/// grid whose candidate state violates sudoku constraints, either
/// detected by the driver's consistency checks or by a technique
/// stumbling over a structurally impossible pattern mid-scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SolverError {
    /// The grid state violates sudoku constraints.
    #[display("grid state is inconsistent: {_0}")]
    Inconsistent(ConsistencyError),
}
