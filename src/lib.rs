//! Calculator engine for a desktop calculator application.
//!
//! This crate is the input/evaluation state machine behind the buttons: it
//! turns a stream of discrete key events into a running display value and a
//! running history trace, with calculator-style chained evaluation (each new
//! operator immediately resolves the pending one, left to right, no
//! precedence).
//!
//! The crate provides:
//! - An [`Engine`] that consumes key events and publishes two strings
//! - A tagged [`Symbol`] event type and the [`Operator`] enum
//! - A [`Value`] type with the integer/rounded-float normalization all
//!   displayed numbers go through
//! - [`TextVar`] output sinks and an immutable [`Snapshot`] of both strings
//!
//! Window construction, widgets, theming, and keyboard wiring are the
//! embedding application's concern; it drives the engine through the event
//! methods and re-renders from the two output strings after each call.
//!
//! ```
//! use slatecalc::{Engine, Operator, TextVar};
//!
//! let history = TextVar::new();
//! let display = TextVar::new();
//! let mut engine = Engine::new(history.clone(), display.clone());
//!
//! engine.enter_digit(2);
//! engine.enter_operator(Operator::Add)?;
//! engine.enter_digit(3);
//! engine.enter_equals()?;
//!
//! assert_eq!(display.get(), "5");
//! assert_eq!(history.get(), "2 + 3 = 5");
//! # Ok::<(), slatecalc::CalcError>(())
//! ```

mod engine;
mod error;
mod event;
mod output;
mod value;

pub use engine::{Engine, MAX_DISPLAY_LEN};
pub use error::CalcError;
pub use event::{Operator, Symbol};
pub use output::{Snapshot, TextVar};
pub use value::{DECIMAL_PLACES, Value};
