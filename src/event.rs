//! Key events and the four binary operators.
//!
//! Every button press the engine cares about arrives as a [`Symbol`]: a
//! tagged event carrying either a number, the decimal point, an operator, or
//! equals. Operators are pure binary functions keyed by an enum; their
//! operands are passed explicitly into [`Operator::apply`] rather than being
//! stored on the operator itself, so the same constant can be reused across
//! evaluations without aliasing.

use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::value::Value;

/// One of the four chainable binary operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Divide,
    Multiply,
    Subtract,
    Add,
}

impl Operator {
    /// The glyph shown in the history trace (`÷ × − +`, not the ASCII
    /// characters typed on a keyboard).
    pub fn glyph(self) -> char {
        match self {
            Operator::Divide => '\u{f7}',
            Operator::Multiply => '\u{d7}',
            Operator::Subtract => '\u{2212}',
            Operator::Add => '+',
        }
    }

    /// Apply the operator to explicit left and right operands, simplifying
    /// the result. Division checks its right operand before dividing; the
    /// other operators never fail.
    pub fn apply(self, left: Value, right: Value) -> Result<Value, CalcError> {
        let (l, r) = (left.as_f64(), right.as_f64());
        let raw = match self {
            Operator::Divide => {
                if r == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                l / r
            }
            Operator::Multiply => l * r,
            Operator::Subtract => l - r,
            Operator::Add => l + r,
        };
        Ok(Value::simplify(raw))
    }
}

/// A discrete key event fed to the engine.
///
/// Digits arrive as `Number` events carrying their value; composite
/// operations reuse the same variant to inject whole numbers (`0.01`, a
/// computed reciprocal operand) so replayed input flows through exactly the
/// same transitions as typed input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Symbol {
    /// A number entering the display: a single digit when typed, an
    /// arbitrary value when replayed by a composite operation.
    Number(Value),
    /// The decimal point.
    Point,
    /// One of the four binary operators.
    Operator(Operator),
    /// The equals key.
    Equals,
}

impl Symbol {
    /// Map a keyboard character to its event, for presentation layers that
    /// wire key presses straight to the engine. Returns `None` for
    /// characters that are not symbol keys (clear, backspace and friends
    /// are separate engine methods, not symbols).
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '0'..='9' => {
                let digit = key as i64 - '0' as i64;
                Some(Symbol::Number(Value::Int(digit)))
            }
            '.' => Some(Symbol::Point),
            '/' => Some(Symbol::Operator(Operator::Divide)),
            '*' => Some(Symbol::Operator(Operator::Multiply)),
            '-' => Some(Symbol::Operator(Operator::Subtract)),
            '+' => Some(Symbol::Operator(Operator::Add)),
            '=' => Some(Symbol::Equals),
            _ => None,
        }
    }
}
