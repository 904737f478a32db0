//! Output sinks the engine publishes to.
//!
//! The engine owns no rendering; after every event it writes its two derived
//! strings into a pair of [`TextVar`] cells handed over at construction. A
//! presentation layer keeps clones of the same cells and re-renders from
//! them, or asks the engine for an immutable [`Snapshot`] instead.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// A shared mutable text cell.
///
/// Clones refer to the same underlying string. Deliberately not `Send`: the
/// engine and its presentation layer live on the single UI event thread.
#[derive(Clone, Debug, Default)]
pub struct TextVar {
    inner: Rc<RefCell<String>>,
}

impl TextVar {
    /// A new cell holding the empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of the cell.
    pub fn get(&self) -> String {
        self.inner.borrow().clone()
    }

    /// Replace the contents of the cell.
    pub fn set(&self, text: &str) {
        let mut slot = self.inner.borrow_mut();
        slot.clear();
        slot.push_str(text);
    }
}

/// The engine's two observable strings, captured at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The live operand or freshly computed result.
    pub display: String,
    /// The formatted history trace.
    pub history: String,
}
