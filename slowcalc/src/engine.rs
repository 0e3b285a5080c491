//! Calculator state machine
//!
//! Two display registers: the *entry* being typed and the *trail* showing the
//! pending expression (`"5 + "`) or, after `=`, the finished one
//! (`"5 + 3 ="`). Every key maps to exactly one method here; the GUI and the
//! headless runner both go through [`Calculator::dispatch`].

use crate::keypad::Action;
use crate::number::{format_result, remove_trailing_zeros, Number, Operator};
use std::fmt;
use thiserror::Error;

/// Entry capacity when nothing else is configured.
pub const DEFAULT_MAX_DIGITS: usize = 16;

const DIVISION_BY_ZERO: &str = "Division by zero";
const UNDEFINED_RESULT: &str = "Result is undefined";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Non-zero dividend, zero divisor.
    #[error("{}", DIVISION_BY_ZERO)]
    DivisionByZero,
    /// Zero divided by zero.
    #[error("{}", UNDEFINED_RESULT)]
    UndefinedResult,
}

impl CalcError {
    pub fn message(self) -> &'static str {
        match self {
            CalcError::DivisionByZero => DIVISION_BY_ZERO,
            CalcError::UndefinedResult => UNDEFINED_RESULT,
        }
    }
}

/// The pending-expression register.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Trail {
    #[default]
    Empty,
    /// Left operand (already stripped) waiting for a right operand.
    Pending { operand: String, op: Operator },
    /// A finished expression ending in `=`.
    Completed { expression: String },
}

impl Trail {
    /// Operator awaiting a right operand, if any.
    pub fn pending_operator(&self) -> Option<Operator> {
        match self {
            Trail::Pending { op, .. } => Some(*op),
            _ => None,
        }
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trail::Empty => Ok(()),
            Trail::Pending { operand, op } => write!(f, "{operand} {op} "),
            Trail::Completed { expression } => f.write_str(expression),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Calculator {
    entry: String,
    trail: Trail,
    error: Option<CalcError>,
    max_digits: usize,
    /// Entry still holds the `"0"` left by opening the pending expression.
    awaiting_operand: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIGITS)
    }
}

impl Calculator {
    pub fn new(max_digits: usize) -> Self {
        Self {
            entry: "0".to_string(),
            trail: Trail::Empty,
            error: None,
            max_digits: max_digits.max(1),
            awaiting_operand: false,
        }
    }

    /// Text for the main display. Shows the error message while one is set.
    pub fn entry(&self) -> &str {
        match self.error {
            Some(err) => err.message(),
            None => &self.entry,
        }
    }

    /// Text for the small display above the entry.
    pub fn trail_text(&self) -> String {
        self.trail.to_string()
    }

    pub fn error(&self) -> Option<CalcError> {
        self.error
    }

    pub fn max_digits(&self) -> usize {
        self.max_digits
    }

    /// Whether `action` does anything right now. While an error is shown
    /// only digits and the clear keys are live.
    pub fn is_enabled(&self, action: Action) -> bool {
        self.error.is_none() || matches!(action, Action::Digit(_) | Action::Clear | Action::ClearEntry)
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, entry = %self.entry(), trail = %self.trail, "dispatch");
        match action {
            Action::Digit(d) => self.digit(d),
            Action::Point => self.point(),
            Action::Negate => self.negate(),
            Action::Backspace => self.backspace(),
            Action::Clear => self.clear_all(),
            Action::ClearEntry => self.clear_entry(),
            Action::Operator(op) => self.operator(op),
            Action::Calculate => {
                self.calculate();
            }
        }
    }

    pub fn digit(&mut self, digit: u8) {
        self.acknowledge_error();
        self.clear_completed_trail();

        self.awaiting_operand = false;
        let ch = char::from(b'0' + digit.min(9));
        if self.entry == "0" || self.entry_overflowed() {
            self.entry = ch.to_string();
        } else if self.entry.len() < self.capacity() {
            self.entry.push(ch);
        }
    }

    pub fn point(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.clear_completed_trail();
        self.awaiting_operand = false;
        if !self.entry.contains('.') && self.entry.len() < self.capacity() {
            self.entry.push('.');
        }
    }

    /// Toggle a leading minus. Zero has no sign.
    pub fn negate(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.clear_completed_trail();
        if let Some(unsigned) = self.entry.strip_prefix('-') {
            self.entry = unsigned.to_string();
        } else if self.entry != "0" {
            self.entry.insert(0, '-');
        }
    }

    pub fn backspace(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.clear_completed_trail();
        let len = self.entry.len();
        if len <= 1 || (len == 2 && self.entry.starts_with('-')) {
            self.entry = "0".to_string();
        } else {
            self.entry.pop();
        }
    }

    /// Reset the entry. A pending expression survives; a finished one goes.
    pub fn clear_entry(&mut self) {
        self.acknowledge_error();
        self.clear_completed_trail();
        self.entry = "0".to_string();
    }

    pub fn clear_all(&mut self) {
        self.acknowledge_error();
        self.entry = "0".to_string();
        self.trail = Trail::Empty;
    }

    /// Press `+ - * /`.
    ///
    /// Starts a pending expression, swaps the pending operator in place, or,
    /// when the same operator is pressed again, evaluates and chains the
    /// result into a new pending expression. Pressing the same operator
    /// before any right operand was typed does nothing.
    pub fn operator(&mut self, op: Operator) {
        if self.error.is_some() {
            return;
        }
        match self.trail.pending_operator() {
            None => self.open_pending(op),
            Some(pending) if pending != op => {
                if let Trail::Pending { op: slot, .. } = &mut self.trail {
                    *slot = op;
                }
            }
            Some(_) if self.awaiting_operand => {}
            Some(_) => {
                if self.calculate().is_some() {
                    self.open_pending(op);
                }
            }
        }
    }

    /// Press `=`. Returns the result text when a calculation happened.
    pub fn calculate(&mut self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        let Trail::Pending { operand, op } = &self.trail else {
            return None;
        };
        let op = *op;

        let (Some(lhs), Some(rhs)) = (Number::parse(operand), Number::parse(&self.entry)) else {
            tracing::warn!(operand = %operand, entry = %self.entry, "operands do not parse, ignoring");
            return None;
        };

        match op.apply(lhs, rhs) {
            Ok(value) => {
                let result = format_result(value);
                let expression = format!("{operand} {op} {} =", remove_trailing_zeros(&self.entry));
                tracing::debug!(%expression, %result, "calculated");
                self.trail = Trail::Completed { expression };
                self.entry = result.clone();
                Some(result)
            }
            Err(err) => {
                tracing::warn!(%err, operand = %operand, "calculation failed");
                self.raise(err);
                None
            }
        }
    }

    fn open_pending(&mut self, op: Operator) {
        self.trail = Trail::Pending {
            operand: remove_trailing_zeros(&self.entry),
            op,
        };
        self.entry = "0".to_string();
        self.awaiting_operand = true;
    }

    fn raise(&mut self, err: CalcError) {
        self.error = Some(err);
        self.entry = "0".to_string();
    }

    fn acknowledge_error(&mut self) {
        if let Some(err) = self.error.take() {
            tracing::debug!(%err, "error acknowledged");
            self.entry = "0".to_string();
        }
    }

    fn clear_completed_trail(&mut self) {
        if matches!(self.trail, Trail::Completed { .. }) {
            self.trail = Trail::Empty;
        }
    }

    /// Typed characters allowed in the entry; a sign gets one extra slot.
    fn capacity(&self) -> usize {
        self.max_digits + usize::from(self.entry.starts_with('-'))
    }

    /// Entry is `inf`/`nan` left by a result that overflowed.
    fn entry_overflowed(&self) -> bool {
        Number::parse(&self.entry).is_some_and(|n| !n.is_finite())
    }
}
