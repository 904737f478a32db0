//! Numeric values and display-text normalization.
//!
//! Every string that crosses into arithmetic and every computed result goes
//! through [`Value::simplify`], which keeps displayed numbers stable: exact
//! integers render without a decimal point, everything else is rounded to a
//! fixed number of decimal places so float noise (`0.1 + 0.2`) never reaches
//! the display.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Decimal places kept when a result is not an exact integer.
pub const DECIMAL_PLACES: u32 = 9;

/// Largest magnitude stored as [`Value::Int`]. Past this, `f64` can no
/// longer represent every integer exactly, so the value stays a float.
const INT_EXACT_BOUND: f64 = 1e15;

lazy_static! {
    /// Matches a decimal literal: optional leading minus, digits,
    /// at most one decimal point.
    static ref DECIMAL_LITERAL: Regex = Regex::new(r"^-?\d*\.?\d*$").unwrap();
}

/// A calculator number: an exact integer or a rounded float.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Integer value, rendered without a decimal point.
    Int(i64),
    /// Fractional value, already rounded to [`DECIMAL_PLACES`].
    Float(f64),
}

impl Value {
    /// Normalize a raw float: round to [`DECIMAL_PLACES`], then collapse to
    /// an integer when the rounded value is integral. Rounding happens first
    /// so that simplifying an already-simplified value is a no-op.
    pub fn simplify(raw: f64) -> Self {
        let rounded = round_to(raw, DECIMAL_PLACES);
        if rounded.fract() == 0.0 && rounded.abs() < INT_EXACT_BOUND {
            Value::Int(rounded as i64)
        } else {
            Value::Float(rounded)
        }
    }

    /// Parse display text into a simplified value.
    ///
    /// The display is always a decimal literal, but backspacing can leave
    /// partial input like `"-"` or `"0."`; anything unparseable reads as
    /// zero rather than surfacing an error for half-typed numbers.
    pub fn parse(text: &str) -> Self {
        Self::simplify(text.parse::<f64>().unwrap_or(0.0))
    }

    /// The value as a float, for feeding into arithmetic.
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(value) => value as f64,
            Value::Float(value) => value,
        }
    }

    /// The value with its sign flipped.
    pub fn negated(self) -> Self {
        match self {
            Value::Int(value) => Value::Int(-value),
            Value::Float(value) => Value::Float(-value),
        }
    }

    /// Whether this value carries a fractional part.
    pub fn is_fractional(self) -> bool {
        matches!(self, Value::Float(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", value),
        }
    }
}

/// Round to a fixed number of decimal places.
fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        value
    }
}

/// Check that text is a well-formed decimal literal (the display-text
/// invariant: optional minus, digits, at most one point, never empty).
pub(crate) fn is_decimal_literal(text: &str) -> bool {
    !text.is_empty() && DECIMAL_LITERAL.is_match(text)
}
