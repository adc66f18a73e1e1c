//! Amount entry keypad
//!
//! The [`Calculator`] engine is shared by the terminal keypad and the `add`
//! command, which feeds it typed key strings through [`expression`].

pub mod engine;
pub mod expression;
pub mod press;

pub use engine::{Calculator, ConfirmOutcome, KeypadEvent, Operator};
pub use expression::{evaluate, parse_keys, ExpressionError};
pub use press::{LongPress, PressAction, DEFAULT_LONG_PRESS};
