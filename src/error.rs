//! Engine error types.

use thiserror::Error;

/// The two recoverable arithmetic failures.
///
/// Both are detected synchronously while evaluating; the engine's docs on
/// each event method describe what happens to the state when one surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Evaluating `÷` with a zero right operand.
    #[error("division by zero")]
    DivisionByZero,
    /// Square root requested for a negative display value.
    #[error("square root of a negative number is not supported")]
    InvalidSquareRoot,
}
