//! Typed key strings for driving the keypad from the command line
//!
//! `"12.5+3="` becomes the same event sequence the on-screen keypad would
//! produce. `c`/`C` clears and `<` is backspace; whitespace is ignored.

use thiserror::Error;

use super::engine::{Calculator, ConfirmOutcome, KeypadEvent, Operator};
use crate::models::Money;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    #[error("Unexpected key '{key}' at position {position}")]
    UnexpectedKey { key: char, position: usize },

    #[error("Expression is empty")]
    Empty,

    #[error("Expression ends with an operator")]
    DanglingOperator,

    #[error("Amount must be greater than zero (got {display})")]
    NotPositive { display: String },
}

/// Translate a key string into keypad events
pub fn parse_keys(input: &str) -> Result<Vec<KeypadEvent>, ExpressionError> {
    let mut events = Vec::with_capacity(input.len());

    for (position, key) in input.chars().enumerate() {
        let event = match key {
            '0'..='9' => KeypadEvent::Digit(key as u8 - b'0'),
            '.' => KeypadEvent::DecimalPoint,
            '+' => KeypadEvent::Operator(Operator::Add),
            '-' => KeypadEvent::Operator(Operator::Subtract),
            '=' => KeypadEvent::Equals,
            '<' => KeypadEvent::Backspace,
            'c' | 'C' => KeypadEvent::Clear,
            c if c.is_whitespace() => continue,
            _ => return Err(ExpressionError::UnexpectedKey { key, position }),
        };
        events.push(event);
    }

    if events.is_empty() {
        return Err(ExpressionError::Empty);
    }
    Ok(events)
}

/// Replay the keys on a fresh keypad and press the check button until the
/// amount is ready
pub fn evaluate(input: &str) -> Result<(Calculator, Money), ExpressionError> {
    let mut calc = Calculator::new();
    for event in parse_keys(input)? {
        calc.apply(event);
    }

    // at most one pending operation can be resolved
    for _ in 0..2 {
        match calc.confirm() {
            ConfirmOutcome::Ready(amount) => return Ok((calc, amount)),
            ConfirmOutcome::Evaluated => continue,
            ConfirmOutcome::Ignored => break,
        }
    }

    if calc.is_awaiting_operand() {
        Err(ExpressionError::DanglingOperator)
    } else {
        Err(ExpressionError::NotPositive {
            display: calc.display().to_string(),
        })
    }
}
