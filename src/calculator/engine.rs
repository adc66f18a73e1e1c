//! Running-total keypad engine
//!
//! A two-operand accumulator for entering transaction amounts. Keypad presses
//! arrive as discrete events; the engine keeps the current operand as typed,
//! the accumulated value, and a textual trace of the expression shown above
//! the main display.
//!
//! Results are never negative: a subtraction that would go below zero yields
//! zero, since a spending entry cannot be negative. Malformed input (a second
//! operator with no operand between, a second decimal point) is ignored.

use std::fmt;

use crate::models::Money;

/// Binary operator on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
        }
    }

    fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        let result = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
        };
        // also folds -0.0 into 0.0
        if result > 0.0 {
            result
        } else {
            0.0
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single keypad press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadEvent {
    /// Digit 0-9
    Digit(u8),
    DecimalPoint,
    Operator(Operator),
    Equals,
    Backspace,
    Clear,
}

/// What the check button did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// A pending operation was resolved; the result is now displayed
    Evaluated,
    /// The displayed amount is ready to be committed
    Ready(Money),
    /// Nothing to do (dangling operator or no positive amount)
    Ignored,
}

/// Keypad entry state for one amount-entry session
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    display: String,
    raw_amount: String,
    accumulated: Option<f64>,
    pending: Option<Operator>,
    awaiting_operand: bool,
    trace: String,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Fresh session showing "0"
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            raw_amount: String::new(),
            accumulated: None,
            pending: None,
            awaiting_operand: false,
            trace: String::new(),
        }
    }

    /// Current operand or result, as shown on the main display
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The entered amount, empty when nothing has been typed
    pub fn raw_amount(&self) -> &str {
        &self.raw_amount
    }

    /// Expression so far, shown above the main display
    pub fn trace(&self) -> &str {
        &self.trace
    }

    pub fn accumulated(&self) -> Option<f64> {
        self.accumulated
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending
    }

    /// True right after an operator, before the next operand is typed
    pub fn is_awaiting_operand(&self) -> bool {
        self.awaiting_operand
    }

    /// Numeric value of the display
    pub fn value(&self) -> f64 {
        parse_operand(&self.display)
    }

    /// Dispatch a keypad event
    pub fn apply(&mut self, event: KeypadEvent) {
        match event {
            KeypadEvent::Digit(d) => self.digit(d),
            KeypadEvent::DecimalPoint => self.decimal_point(),
            KeypadEvent::Operator(op) => self.operator(op),
            KeypadEvent::Equals => self.equals(),
            KeypadEvent::Backspace => self.backspace(),
            KeypadEvent::Clear => self.clear(),
        }
    }

    /// Type a digit; values above 9 are ignored
    pub fn digit(&mut self, d: u8) {
        if d > 9 {
            return;
        }
        let ch = char::from(b'0' + d);

        if self.awaiting_operand {
            self.set_display(ch.to_string());
            self.awaiting_operand = false;
        } else if self.display == "0" {
            self.set_display(ch.to_string());
        } else {
            self.start_over_if_editing_result();
            let mut next = self.display.clone();
            next.push(ch);
            self.set_display(next);
        }
    }

    /// Type a decimal point; ignored if the operand already has one
    pub fn decimal_point(&mut self) {
        if self.awaiting_operand {
            self.set_display("0.".to_string());
            self.awaiting_operand = false;
        } else if !self.display.contains('.') {
            self.start_over_if_editing_result();
            let mut next = self.display.clone();
            next.push('.');
            self.set_display(next);
        }
    }

    /// Press `+` or `-`
    pub fn operator(&mut self, op: Operator) {
        if self.awaiting_operand && self.accumulated.is_some() {
            return;
        }

        let input = self.value();

        match (self.accumulated, self.pending) {
            (None, _) => {
                self.accumulated = Some(input);
                self.trace = format!("{} {}", self.display, op);
            }
            (Some(accumulated), Some(pending)) if !self.awaiting_operand => {
                let result = pending.apply(accumulated, input);
                self.trace = format!("{} {} {}", self.trace, self.display, op);
                self.set_display(format_number(result));
                self.accumulated = Some(result);
            }
            _ => {}
        }

        self.awaiting_operand = true;
        self.pending = Some(op);
    }

    /// Resolve the pending operation
    pub fn equals(&mut self) {
        if self.awaiting_operand {
            return;
        }

        if let (Some(accumulated), Some(pending)) = (self.accumulated, self.pending) {
            let result = pending.apply(accumulated, self.value());
            self.trace = format!("{} {}", self.trace, self.display);
            self.set_display(format_number(result));
            self.accumulated = None;
            self.pending = None;
            self.awaiting_operand = false;
        }
    }

    /// Remove the last typed character
    pub fn backspace(&mut self) {
        if self.display.chars().count() <= 1 {
            self.display = "0".to_string();
            self.raw_amount.clear();
        } else {
            let mut next = self.display.clone();
            next.pop();
            self.set_display(next);
        }
    }

    /// Reset the whole session
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Whether the amount can be committed: positive and no dangling operator
    pub fn can_commit(&self) -> bool {
        !self.awaiting_operand && !self.raw_amount.is_empty() && self.value() > 0.0
    }

    /// The amount to commit, rounded to cents
    pub fn committed_amount(&self) -> Option<Money> {
        if !self.can_commit() {
            return None;
        }
        let amount = Money::from_dollars_f64(self.value());
        amount.is_positive().then_some(amount)
    }

    /// Check button: evaluate a pending operation, or hand back the amount
    pub fn confirm(&mut self) -> ConfirmOutcome {
        if self.awaiting_operand {
            return ConfirmOutcome::Ignored;
        }
        if self.pending.is_some() {
            self.equals();
            return ConfirmOutcome::Evaluated;
        }
        match self.committed_amount() {
            Some(amount) => ConfirmOutcome::Ready(amount),
            None => ConfirmOutcome::Ignored,
        }
    }

    fn set_display(&mut self, value: String) {
        self.raw_amount = value.clone();
        self.display = value;
    }

    /// Typing onto a finished result starts a new expression
    fn start_over_if_editing_result(&mut self) {
        if self.pending.is_none() && !self.awaiting_operand && !self.trace.is_empty() {
            self.trace.clear();
            self.accumulated = None;
        }
    }
}

/// Parse an operand as typed ("12", "12.", "0.5"); garbage reads as zero
fn parse_operand(text: &str) -> f64 {
    text.trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Render a result the way it is typed: "8", "2.5", never "-0"
fn format_number(value: f64) -> String {
    if value > 0.0 {
        value.to_string()
    } else {
        "0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(calc: &mut Calculator, events: &[KeypadEvent]) {
        for event in events {
            calc.apply(*event);
        }
    }

    use KeypadEvent::*;
    const PLUS: KeypadEvent = KeypadEvent::Operator(super::Operator::Add);
    const MINUS: KeypadEvent = KeypadEvent::Operator(super::Operator::Subtract);

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.raw_amount(), "");
        assert_eq!(calc.trace(), "");
        assert!(!calc.can_commit());
    }

    #[test]
    fn test_simple_addition() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(5), PLUS]);
        assert_eq!(calc.trace(), "5 +");
        assert!(calc.is_awaiting_operand());

        press(&mut calc, &[Digit(3), Equals]);
        assert_eq!(calc.display(), "8");
        assert_eq!(calc.trace(), "5 + 3");
        assert!(calc.accumulated().is_none());
        assert!(calc.pending_operator().is_none());
        assert!(!calc.is_awaiting_operand());
    }

    #[test]
    fn test_subtraction_clamps_to_zero() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(5), MINUS, Digit(9), Equals]);
        assert_eq!(calc.display(), "0");
        assert!(!calc.can_commit());
    }

    #[test]
    fn test_backspace_to_zero() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(1), Digit(2), Backspace]);
        assert_eq!(calc.display(), "1");
        assert_eq!(calc.raw_amount(), "1");

        calc.backspace();
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.raw_amount(), "");
    }

    #[test]
    fn test_leading_zero_replaced() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(0), Digit(0), Digit(7)]);
        assert_eq!(calc.display(), "7");
    }

    #[test]
    fn test_chained_operators_resolve_immediately() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(5), PLUS, Digit(3), MINUS]);
        assert_eq!(calc.display(), "8");
        assert_eq!(calc.accumulated(), Some(8.0));
        assert_eq!(calc.trace(), "5 + 3 -");

        press(&mut calc, &[Digit(2), Equals]);
        assert_eq!(calc.display(), "6");
        assert_eq!(calc.trace(), "5 + 3 - 2");
    }

    #[test]
    fn test_chained_subtraction_clamps() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(2), MINUS, Digit(7), PLUS]);
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.accumulated(), Some(0.0));
    }

    #[test]
    fn test_double_operator_ignored() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(5), PLUS, MINUS]);
        assert_eq!(calc.pending_operator(), Some(super::Operator::Add));
        assert_eq!(calc.trace(), "5 +");

        press(&mut calc, &[Digit(1), Equals]);
        assert_eq!(calc.display(), "6");
    }

    #[test]
    fn test_equals_while_awaiting_is_noop() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(4), PLUS, Equals]);
        assert!(calc.is_awaiting_operand());
        assert_eq!(calc.display(), "4");
        assert_eq!(calc.trace(), "4 +");
    }

    #[test]
    fn test_equals_without_operator_is_noop() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(4), Digit(2), Equals]);
        assert_eq!(calc.display(), "42");
        assert_eq!(calc.trace(), "");
    }

    #[test]
    fn test_decimal_point_once() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(1), DecimalPoint, Digit(5), DecimalPoint, Digit(0)]);
        assert_eq!(calc.display(), "1.50");
    }

    #[test]
    fn test_decimal_point_starts_operand() {
        let mut calc = Calculator::new();
        calc.decimal_point();
        assert_eq!(calc.display(), "0.");

        press(&mut calc, &[Digit(5), PLUS, DecimalPoint, Digit(2), Digit(5), Equals]);
        assert_eq!(calc.display(), "0.75");
        assert_eq!(calc.trace(), "0.5 + 0.25");
    }

    #[test]
    fn test_trailing_decimal_operand() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(3), DecimalPoint, PLUS, Digit(2), Equals]);
        assert_eq!(calc.display(), "5");
        assert_eq!(calc.trace(), "3. + 2");
    }

    #[test]
    fn test_editing_result_starts_new_expression() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(5), PLUS, Digit(3), Equals, Digit(1)]);
        assert_eq!(calc.display(), "81");
        assert_eq!(calc.trace(), "");
        assert!(calc.accumulated().is_none());
    }

    #[test]
    fn test_operator_after_result_continues_from_result() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(5), PLUS, Digit(3), Equals, PLUS, Digit(2), Equals]);
        assert_eq!(calc.display(), "10");
        assert_eq!(calc.trace(), "8 + 2");
    }

    #[test]
    fn test_fractional_results() {
        let mut calc = Calculator::new();
        press(
            &mut calc,
            &[Digit(1), Digit(2), DecimalPoint, Digit(5), PLUS, Digit(3), Equals],
        );
        assert_eq!(calc.display(), "15.5");
        assert_eq!(calc.committed_amount(), Some(Money::from_cents(1550)));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(9), PLUS, Digit(1)]);
        calc.clear();
        assert_eq!(calc, Calculator::new());
    }

    #[test]
    fn test_commit_rules() {
        let mut calc = Calculator::new();
        calc.digit(7);
        assert!(calc.can_commit());
        assert_eq!(calc.committed_amount(), Some(Money::from_cents(700)));

        calc.operator(super::Operator::Add);
        assert!(!calc.can_commit());
        assert_eq!(calc.committed_amount(), None);
    }

    #[test]
    fn test_confirm_behaves_like_check_button() {
        let mut calc = Calculator::new();
        press(&mut calc, &[Digit(5), PLUS]);
        assert_eq!(calc.confirm(), ConfirmOutcome::Ignored);

        calc.digit(3);
        assert_eq!(calc.confirm(), ConfirmOutcome::Evaluated);
        assert_eq!(calc.display(), "8");

        assert_eq!(calc.confirm(), ConfirmOutcome::Ready(Money::from_cents(800)));
    }

    #[test]
    fn test_confirm_ignores_zero() {
        let mut calc = Calculator::new();
        assert_eq!(calc.confirm(), ConfirmOutcome::Ignored);
        press(&mut calc, &[Digit(0), DecimalPoint, Digit(0), Digit(0), Digit(1)]);
        // 0.001 rounds to zero cents
        assert_eq!(calc.confirm(), ConfirmOutcome::Ignored);
    }

    #[test]
    fn test_invalid_digit_ignored() {
        let mut calc = Calculator::new();
        calc.digit(12);
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(parse_operand("12."), 12.0);
        assert_eq!(parse_operand("0."), 0.0);
    }
}
