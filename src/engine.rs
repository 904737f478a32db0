//! The calculator state machine.
//!
//! [`Engine`] consumes key events and maintains two derived strings: the
//! live display value and the history trace above it. Evaluation is
//! calculator-style — choosing a new operator immediately resolves any
//! pending one against the just-entered operand, strictly left to right,
//! with no precedence.
//!
//! The composite operations (percentage, reciprocal, square, square root,
//! sign toggle) are replays of the primitive events against the current
//! display value rather than separate arithmetic paths, so they share the
//! simplification, history formatting, and error behavior of typed input.

use std::fmt;

use tracing::{trace, warn};

use crate::error::CalcError;
use crate::event::{Operator, Symbol};
use crate::output::{Snapshot, TextVar};
use crate::value::{Value, is_decimal_literal};

/// Maximum display length, in characters, that digit entry may reach.
/// Values injected whole by composite replays are not clipped.
pub const MAX_DISPLAY_LEN: usize = 11;

/// An operator chosen but not yet resolved, with the left operand captured
/// at the moment it was chosen.
#[derive(Clone, Copy, Debug)]
struct Pending {
    op: Operator,
    left: Value,
}

/// What the first slot of the history trace holds: a plain number, or the
/// textual `Sqrt(x)` label left behind by the square-root operation (which
/// never feeds back into arithmetic).
#[derive(Clone, Debug)]
enum Operand {
    Number(Value),
    SqrtOf(Value),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(value) => write!(f, "{}", value),
            Operand::SqrtOf(argument) => write!(f, "Sqrt({})", argument),
        }
    }
}

/// The calculator engine.
///
/// Owns all arithmetic and display state. Constructed with the two text
/// cells it publishes to; after every event both cells hold the current
/// output strings.
pub struct Engine {
    /// The live operand being typed, always a valid decimal literal.
    display: String,
    /// First history operand.
    operand1: Option<Operand>,
    /// Second history operand, only ever set while an operator is pending.
    operand2: Option<Value>,
    /// The unresolved operator and its captured left operand.
    pending: Option<Pending>,
    /// True from a completed evaluation until the next operator or reset.
    equals: bool,
    /// Snapshot of the last shown answer, kept for the history trace once
    /// the user starts editing past it.
    answer_label: Option<String>,
    /// The last successfully computed result.
    prev_answer: Value,
    /// Whether the current operand already contains a decimal point.
    decimal_used: bool,
    history_out: TextVar,
    display_out: TextVar,
}

impl Engine {
    /// Create an engine in the zero state, publishing it to both sinks.
    pub fn new(history: TextVar, display: TextVar) -> Self {
        let engine = Self {
            display: "0".to_string(),
            operand1: None,
            operand2: None,
            pending: None,
            equals: false,
            answer_label: None,
            prev_answer: Value::Int(0),
            decimal_used: false,
            history_out: history,
            display_out: display,
        };
        engine.publish();
        engine
    }

    /// Feed one key event to the engine.
    ///
    /// This is the raw entry point the `enter_*` conveniences wrap; it is
    /// public so presentation layers can drive the engine from a
    /// [`Symbol::from_key`] mapping directly.
    pub fn handle(&mut self, symbol: Symbol) -> Result<(), CalcError> {
        trace!(event = ?symbol, "key");
        let outcome = match symbol {
            Symbol::Number(value) => {
                self.input_number(value);
                Ok(())
            }
            Symbol::Point => {
                self.input_point();
                Ok(())
            }
            Symbol::Operator(op) => self.input_operator(op),
            Symbol::Equals => self.input_equals(),
        };
        self.publish();
        outcome
    }

    /// Enter one digit, `0` through `9`.
    pub fn enter_digit(&mut self, digit: u8) {
        debug_assert!(digit <= 9, "digit out of range: {digit}");
        self.input_number(Value::Int(i64::from(digit)));
        self.publish();
    }

    /// Enter the decimal point. A second point on the same operand is
    /// ignored.
    pub fn enter_point(&mut self) {
        self.input_point();
        self.publish();
    }

    /// Choose a binary operator, resolving any pending one first.
    ///
    /// Fails with [`CalcError::DivisionByZero`] if resolving the pending
    /// operator divides by zero; the engine resets to the zero state before
    /// returning the error.
    pub fn enter_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        self.handle(Symbol::Operator(op))
    }

    /// Evaluate the pending operation, or re-anchor the chain on the typed
    /// value when none is pending.
    ///
    /// On arithmetic failure the whole chain is abandoned: the engine
    /// resets to the zero state and the error is returned.
    pub fn enter_equals(&mut self) -> Result<(), CalcError> {
        self.handle(Symbol::Equals)
    }

    /// Remove the last character of the display. An exhausted display
    /// resets to `"0"` rather than going empty.
    pub fn backspace(&mut self) {
        if self.display.ends_with('.') {
            self.decimal_used = false;
        }
        if self.equals && self.answer_label.is_none() {
            self.answer_label = Some(self.display.clone());
        }
        self.display.pop();
        if self.display.is_empty() {
            self.reset_display();
        }
        self.publish();
    }

    /// Clear the current entry only. The operator/operand chain survives,
    /// so typing a replacement operand continues the calculation.
    pub fn clear(&mut self) {
        if self.equals {
            self.answer_label = Some(self.prev_answer.to_string());
        }
        self.reset_display();
        self.decimal_used = false;
        self.publish();
    }

    /// Reset everything to the zero state: display `"0"`, empty history,
    /// no pending operation, previous answer zero.
    pub fn clear_all(&mut self) {
        self.reset_all();
        self.publish();
    }

    /// Divide the display value by 100, as `x × 0.01 =`.
    pub fn percentage(&mut self) -> Result<(), CalcError> {
        let number = Value::parse(&self.display);
        self.clear_all();
        self.handle(Symbol::Number(number))?;
        self.handle(Symbol::Operator(Operator::Multiply))?;
        self.handle(Symbol::Number(Value::Float(0.01)))?;
        self.handle(Symbol::Equals)
    }

    /// Replace the display value with its reciprocal, as `1 ÷ x =`.
    ///
    /// A pending operator is resolved against the display value first, so
    /// the reciprocal applies to the chain's running result. A zero operand
    /// follows the equals error path.
    pub fn reciprocal(&mut self) -> Result<(), CalcError> {
        let mut number = Value::parse(&self.display);
        if let Some(pending) = self.pending {
            number = pending.op.apply(pending.left, number)?;
        }
        self.clear_all();
        self.handle(Symbol::Number(Value::Int(1)))?;
        self.handle(Symbol::Operator(Operator::Divide))?;
        self.handle(Symbol::Number(number))?;
        self.handle(Symbol::Equals)
    }

    /// Square the display value, as `x × x =`.
    pub fn square(&mut self) -> Result<(), CalcError> {
        let number = Value::parse(&self.display);
        self.clear_all();
        self.handle(Symbol::Number(number))?;
        self.handle(Symbol::Operator(Operator::Multiply))?;
        self.handle(Symbol::Number(number))?;
        self.handle(Symbol::Equals)
    }

    /// Take the square root of the display value.
    ///
    /// Unlike the other composites this computes directly: the result is
    /// injected as a fresh entry and the history shows a `Sqrt(x)` label
    /// instead of an operand pair. A negative display value fails with
    /// [`CalcError::InvalidSquareRoot`] before any state changes, leaving
    /// the display exactly as the user left it.
    pub fn square_root(&mut self) -> Result<(), CalcError> {
        let number = Value::parse(&self.display);
        if number.as_f64() < 0.0 {
            warn!(value = %number, "square root of negative value");
            return Err(CalcError::InvalidSquareRoot);
        }
        let answer = Value::simplify(number.as_f64().sqrt());
        self.clear_all();
        self.handle(Symbol::Number(answer))?;
        self.equals = true;
        self.operand1 = Some(Operand::SqrtOf(number));
        self.answer_label = None;
        self.prev_answer = answer;
        self.publish();
        Ok(())
    }

    /// Flip the sign of the display value via a single-level clear and a
    /// replayed entry of the negated number.
    pub fn toggle_sign(&mut self) -> Result<(), CalcError> {
        if self.equals {
            self.answer_label = Some(self.prev_answer.to_string());
        }
        let number = Value::parse(&self.display);
        self.clear();
        self.handle(Symbol::Number(number.negated()))
    }

    /// The current display text.
    pub fn display_text(&self) -> &str {
        &self.display
    }

    /// The current history trace.
    pub fn history_text(&self) -> String {
        self.format_history()
    }

    /// Both output strings, captured immutably.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display.clone(),
            history: self.format_history(),
        }
    }

    fn input_number(&mut self, value: Value) {
        if self.display.chars().count() > MAX_DISPLAY_LEN - 1 {
            return;
        }

        let text = value.to_string();
        if self.equals && self.answer_label.is_none() {
            // Typing fresh right after equals: keep the shown answer in the
            // history trace, then start a new entry.
            self.answer_label = Some(Value::parse(&self.display).to_string());
            self.display = text;
        } else if self.display == "0" {
            self.display = text;
        } else {
            self.display.push_str(&text);
        }
    }

    fn input_point(&mut self) {
        if self.decimal_used {
            return;
        }
        self.display.push('.');
        self.decimal_used = true;
    }

    fn input_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        let entered = Value::parse(&self.display);

        let left = if self.equals {
            // The shown result seeds a brand-new chain.
            self.operand2 = None;
            self.answer_label = None;
            self.equals = false;
            entered
        } else if let Some(pending) = self.pending.take() {
            // Left-to-right chaining: the previous operator resolves now.
            self.operand2 = None;
            match pending.op.apply(pending.left, entered) {
                Ok(resolved) => resolved,
                Err(error) => {
                    warn!(%error, "chain evaluation failed, resetting");
                    self.reset_all();
                    return Err(error);
                }
            }
        } else {
            entered
        };

        self.operand1 = Some(Operand::Number(left));
        self.pending = Some(Pending { op, left });
        self.reset_display();
        self.decimal_used = false;
        Ok(())
    }

    fn input_equals(&mut self) -> Result<(), CalcError> {
        let entered = Value::parse(&self.display);

        if let Some(pending) = self.pending {
            self.operand2 = Some(entered);
            match pending.op.apply(pending.left, entered) {
                Ok(result) => {
                    self.prev_answer = result;
                    self.display = result.to_string();
                }
                Err(error) => {
                    warn!(%error, "evaluation failed, resetting");
                    self.reset_all();
                    return Err(error);
                }
            }
        } else {
            // Equals with nothing pending re-anchors the chain on the
            // typed value.
            self.operand1 = Some(Operand::Number(entered));
            self.operand2 = None;
            self.answer_label = None;
            self.prev_answer = entered;
            self.display = entered.to_string();
        }

        self.equals = true;
        self.decimal_used = self.prev_answer.is_fractional();
        Ok(())
    }

    fn reset_display(&mut self) {
        self.display.clear();
        self.display.push('0');
    }

    fn reset_all(&mut self) {
        self.prev_answer = Value::Int(0);
        self.operand1 = None;
        self.operand2 = None;
        self.pending = None;
        self.equals = false;
        self.answer_label = None;
        self.decimal_used = false;
        self.reset_display();
    }

    fn format_history(&self) -> String {
        let mut out = String::new();
        if let Some(operand) = &self.operand1 {
            out.push_str(&operand.to_string());
        }
        if let Some(pending) = &self.pending {
            out.push(' ');
            out.push(pending.op.glyph());
            out.push(' ');
        }
        if let Some(value) = &self.operand2 {
            out.push_str(&value.to_string());
        }
        if self.equals {
            let answer = self
                .answer_label
                .clone()
                .unwrap_or_else(|| self.prev_answer.to_string());
            out.push_str(" = ");
            out.push_str(&answer);
        }
        out
    }

    fn publish(&self) {
        debug_assert!(
            is_decimal_literal(&self.display),
            "display is not a decimal literal: {:?}",
            self.display
        );
        self.display_out.set(&self.display);
        self.history_out.set(&self.format_history());
    }
}
