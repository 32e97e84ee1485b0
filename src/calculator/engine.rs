//! The calculator state machine.
//!
//! Every key maps to one method on [`Calculator`]. Keys never fail: a
//! non-finite result switches the engine into its error display, and the
//! next input key silently starts over from a clean state.

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;

use super::error::CalcError;
use super::format::{Locale, format_number, parse_entry, to_display};
use super::memory::{MemoryFlag, MemoryStack};
use super::operator::Operator;
use crate::input::Action;

/// Shown in the history line when there is nothing pending.
pub const EMPTY_HISTORY: &str = "\u{00A0}";

/// Completed calculations kept on the tape by default.
pub const DEFAULT_TAPE_LIMIT: usize = 50;

/// A completed calculation, recorded by `=`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TapeEntry {
    /// The evaluated chain, e.g. `3 + 4 + 5 =`.
    pub expression: String,
    /// The display after evaluation (the error token on failure).
    pub result: String,
    /// Whether the evaluation ended in the error display.
    pub is_error: bool,
}

/// Keypad calculator engine.
#[derive(Clone, Debug)]
pub struct Calculator {
    /// Text being typed, in decimal-comma notation.
    entry: String,
    /// What the display shows right now.
    current: String,
    /// Left operand of the pending operation.
    previous: Option<f64>,
    operator: Option<Operator>,
    /// The next digit replaces `entry` instead of appending.
    overwrite: bool,
    error: bool,
    /// An operator (or `=`) was applied and no right operand supplied yet.
    awaiting_operand: bool,
    /// CE zeroed the entry while awaiting an operand, so the entry is the
    /// operand rather than the displayed left operand.
    entry_cleared: bool,
    /// `previous`/`operator` were re-armed by `=` for repeat-equals.
    rearmed: bool,
    /// History line: operands and operator glyphs in display order.
    tokens: Vec<String>,
    memory: MemoryStack,
    tape: VecDeque<TapeEntry>,
    tape_limit: usize,
    locale: Locale,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::with_locale(Locale::default())
    }

    pub fn with_locale(locale: Locale) -> Self {
        Self {
            entry: "0".to_string(),
            current: "0".to_string(),
            previous: None,
            operator: None,
            overwrite: true,
            error: false,
            awaiting_operand: false,
            entry_cleared: false,
            rearmed: false,
            tokens: Vec::new(),
            memory: MemoryStack::new(),
            tape: VecDeque::new(),
            tape_limit: DEFAULT_TAPE_LIMIT,
            locale,
        }
    }

    /// Set how many completed calculations the tape keeps. Zero disables it.
    pub fn with_tape_limit(mut self, limit: usize) -> Self {
        self.tape_limit = limit;
        self.tape.truncate(limit);
        self
    }

    /// Route a logical key to its operation.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(%action, "dispatch");

        match action {
            Action::Digit(digit) => self.input_digit(digit),
            Action::Decimal => self.input_decimal(),
            Action::Operator(op) => self.set_operator(op),
            Action::Equals => self.equals(),
            Action::Clear => self.clear_all(),
            Action::ClearEntry => self.clear_entry(),
            Action::Backspace => self.backspace(),
            Action::ToggleSign => self.toggle_sign(),
            Action::Percent => self.percent(),
            Action::Reciprocal => self.reciprocal(),
            Action::Square => self.square(),
            Action::Sqrt => self.sqrt(),
            Action::MemoryClear => self.memory_clear(),
            Action::MemoryRecall => self.memory_recall(),
            Action::MemoryAdd => self.memory_add(),
            Action::MemorySubtract => self.memory_subtract(),
            Action::MemoryStore => self.memory_store(),
        }
    }

    // Entry editing

    pub fn input_digit(&mut self, digit: u8) {
        if digit > 9 {
            tracing::warn!(digit, "ignoring invalid digit");
            return;
        }

        self.reset_if_error();
        self.disarm();

        let digit = char::from(b'0' + digit);
        if self.overwrite {
            self.entry = digit.to_string();
            self.overwrite = false;
        } else if self.entry == "0" {
            self.entry = digit.to_string();
        } else {
            self.entry.push(digit);
        }

        self.awaiting_operand = false;
        self.refresh();
    }

    pub fn input_decimal(&mut self) {
        self.reset_if_error();
        self.disarm();

        if self.overwrite {
            self.entry = "0,".to_string();
            self.overwrite = false;
        } else if !self.entry.contains(',') {
            self.entry.push(',');
        }

        self.awaiting_operand = false;
        self.refresh();
    }

    pub fn toggle_sign(&mut self) {
        self.reset_if_error();
        if self.entry == "0" {
            return;
        }
        self.disarm();

        self.entry = match self.entry.strip_prefix('-') {
            Some(unsigned) => unsigned.to_string(),
            None => format!("-{}", self.entry),
        };

        self.awaiting_operand = false;
        self.refresh();
    }

    /// CE: zero the entry, keeping any pending operation, including one
    /// re-armed by `=`. An operator key right after CE swaps the operator.
    pub fn clear_entry(&mut self) {
        self.reset_if_error();

        self.entry = "0".to_string();
        self.overwrite = true;
        self.entry_cleared = true;
        self.refresh();
    }

    pub fn backspace(&mut self) {
        self.reset_if_error();
        if self.overwrite {
            return;
        }

        self.entry.pop();
        if self.entry.is_empty() || self.entry == "-" {
            self.entry = "0".to_string();
            self.overwrite = true;
        }

        self.awaiting_operand = false;
        self.refresh();
    }

    /// C: back to the initial state. Memory and tape survive.
    pub fn clear_all(&mut self) {
        self.entry = "0".to_string();
        self.current = "0".to_string();
        self.previous = None;
        self.operator = None;
        self.overwrite = true;
        self.error = false;
        self.awaiting_operand = false;
        self.entry_cleared = false;
        self.rearmed = false;
        self.tokens.clear();
    }

    // Binary operations

    /// Press an operator key.
    ///
    /// A number typed since the last operator folds the pending operation
    /// first, so chains evaluate left to right: `2 + 3 × 4 =` is 20. Two
    /// operator keys in a row swap the pending operator.
    pub fn set_operator(&mut self, op: Operator) {
        self.reset_if_error();
        // A re-armed result simply becomes the new left operand.
        self.rearmed = false;

        if let (Some(pending), Some(previous)) = (self.operator, self.previous)
            && !self.awaiting_operand
        {
            let operand = self.entry_value();
            self.tokens.push(self.format(operand));

            match pending.apply(previous, operand) {
                Ok(value) => self.previous = Some(value),
                Err(err) => {
                    self.fail(err);
                    return;
                }
            }
        } else if self.previous.is_none() {
            let operand = self.entry_value();
            self.previous = Some(operand);
            self.tokens.push(self.format(operand));
        }

        if self.tokens.is_empty()
            && let Some(previous) = self.previous
        {
            self.tokens.push(self.format(previous));
        }

        // Swap a trailing operator rather than stacking a second one.
        if self.tokens.last().is_some_and(|last| Operator::is_glyph(last)) {
            self.tokens.pop();
        }
        self.tokens.push(op.glyph().to_string());

        self.operator = Some(op);
        self.overwrite = true;
        self.awaiting_operand = true;
        self.entry_cleared = false;
        self.entry = "0".to_string();
        if let Some(previous) = self.previous {
            self.current = self.format(previous);
        }
    }

    /// Evaluate the pending operation.
    ///
    /// The result is re-armed as the left operand with the same operator, so
    /// pressing `=` again repeats the operation on the result.
    pub fn equals(&mut self) {
        // The error display stays up until the next input key.
        if self.error {
            return;
        }

        let (Some(op), Some(previous)) = (self.operator, self.previous) else {
            return;
        };
        let operand = self.operand_value();

        if self.tokens.is_empty() {
            self.tokens.push(self.format(previous));
            self.tokens.push(op.glyph().to_string());
        }
        if self.tokens.last().is_some_and(|last| !Operator::is_glyph(last)) {
            self.tokens.pop();
        }
        self.tokens.push(self.format(operand));

        let expression = format!("{} =", self.tokens.join(" "));
        self.tokens.clear();

        self.apply_result(op.apply(previous, operand), Some(op));
        self.record(expression);
    }

    // Unary operations

    /// Percentage of the left operand when an operation is pending,
    /// otherwise the value divided by 100.
    pub fn percent(&mut self) {
        self.reset_if_error();
        self.disarm();

        let operand = self.operand_value();
        let value = match self.pending() {
            Some((previous, _)) => previous * operand / 100.0,
            None => operand / 100.0,
        };
        self.set_entry_value(value);
    }

    pub fn reciprocal(&mut self) {
        self.apply_unary(|value| 1.0 / value);
    }

    pub fn square(&mut self) {
        self.apply_unary(|value| value * value);
    }

    pub fn sqrt(&mut self) {
        self.apply_unary(f64::sqrt);
    }

    fn apply_unary(&mut self, f: impl FnOnce(f64) -> f64) {
        self.reset_if_error();
        self.disarm();

        let value = f(self.operand_value());
        self.set_entry_value(value);
    }

    // Memory

    pub fn memory_store(&mut self) {
        if let Some(value) = self.displayed_value() {
            self.memory.store(value);
        }
    }

    pub fn memory_add(&mut self) {
        if let Some(value) = self.displayed_value() {
            self.memory.add(value);
        }
    }

    pub fn memory_subtract(&mut self) {
        if let Some(value) = self.displayed_value() {
            self.memory.subtract(value);
        }
    }

    /// Load the next memory entry, cycling through the log.
    pub fn memory_recall(&mut self) {
        self.reset_if_error();

        let Some(value) = self.memory.recall() else {
            return;
        };
        self.disarm();
        self.set_entry_value(value);
    }

    pub fn memory_clear(&mut self) {
        self.memory.clear();
    }

    // Derived outputs

    /// The main display.
    pub fn current_display(&self) -> &str {
        &self.current
    }

    /// The expression being built, e.g. `3 + 4 +`.
    pub fn history_display(&self) -> String {
        if self.tokens.is_empty() {
            EMPTY_HISTORY.to_string()
        } else {
            self.tokens.join(" ")
        }
    }

    pub fn active_memory_flags(&self) -> BTreeSet<MemoryFlag> {
        self.memory.active_flags()
    }

    pub fn is_error(&self) -> bool {
        self.error
    }

    /// The raw entry buffer.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.operator
    }

    pub fn previous(&self) -> Option<f64> {
        self.previous
    }

    pub fn memory_entries(&self) -> &[f64] {
        self.memory.entries()
    }

    pub fn memory_pointer(&self) -> Option<usize> {
        self.memory.pointer()
    }

    /// Completed calculations, oldest first.
    pub fn tape(&self) -> &VecDeque<TapeEntry> {
        &self.tape
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    // Internals

    fn format(&self, value: f64) -> String {
        to_display(&format_number(value, self.locale))
    }

    fn entry_value(&self) -> f64 {
        parse_entry(&self.entry)
    }

    /// The value a unary key or `=` acts on: the left operand while it is
    /// still on the display, otherwise the entry.
    fn operand_value(&self) -> f64 {
        match self.previous {
            Some(previous) if self.awaiting_operand && !self.entry_cleared => previous,
            _ => self.entry_value(),
        }
    }

    /// The displayed value, or `None` while the error display is up.
    fn displayed_value(&self) -> Option<f64> {
        if self.error {
            return None;
        }
        Some(parse_entry(&self.current))
    }

    /// The operation a typed entry feeds into. A re-armed context is not one.
    fn pending(&self) -> Option<(f64, Operator)> {
        match (self.previous, self.operator) {
            (Some(previous), Some(op)) if !self.rearmed => Some((previous, op)),
            _ => None,
        }
    }

    /// Leave the error display, returning to a fresh entry.
    fn reset_if_error(&mut self) {
        if !self.error {
            return;
        }

        tracing::debug!("clearing error state");
        self.clear_all();
        self.memory.clear_flags();
    }

    /// Drop a context re-armed by `=` once a new number is started.
    fn disarm(&mut self) {
        if !self.rearmed {
            return;
        }

        self.previous = None;
        self.operator = None;
        self.rearmed = false;
        self.awaiting_operand = false;
    }

    /// Recompute the display from the entry, previewing any pending
    /// operation.
    fn refresh(&mut self) {
        match self.pending() {
            Some((previous, op)) if !self.awaiting_operand => {
                match op.apply(previous, self.entry_value()) {
                    Ok(value) => self.current = self.format(value),
                    Err(err) => self.fail(err),
                }
            }
            _ => self.current = self.entry.clone(),
        }
    }

    /// Replace the entry with a computed value and refresh the display.
    fn set_entry_value(&mut self, value: f64) {
        match CalcError::check_finite(value) {
            Ok(value) => {
                self.entry = self.format(value);
                self.overwrite = true;
                self.awaiting_operand = false;
                self.refresh();
            }
            Err(err) => self.fail(err),
        }
    }

    /// Show a computed value, clearing the pending operation. With `rearm`,
    /// the value becomes the left operand of a repeat `=`.
    fn apply_result(&mut self, result: Result<f64, CalcError>, rearm: Option<Operator>) {
        let value = match result {
            Ok(value) => value,
            Err(err) => {
                self.fail(err);
                return;
            }
        };

        self.current = self.format(value);
        self.entry = self.current.clone();
        self.overwrite = true;
        self.previous = None;
        self.operator = None;
        self.awaiting_operand = false;
        self.entry_cleared = false;
        self.rearmed = false;

        if let Some(op) = rearm {
            self.previous = Some(value);
            self.operator = Some(op);
            self.awaiting_operand = true;
            self.rearmed = true;
        }
    }

    /// Enter the error display.
    fn fail(&mut self, err: CalcError) {
        tracing::info!(%err, "calculation failed");

        self.current = self.locale.error_token().to_string();
        self.error = true;
        self.entry = "0".to_string();
        self.previous = None;
        self.operator = None;
        self.overwrite = true;
        self.awaiting_operand = false;
        self.entry_cleared = false;
        self.rearmed = false;
        self.tokens.clear();
    }

    fn record(&mut self, expression: String) {
        if self.tape_limit == 0 {
            return;
        }
        if self.tape.len() == self.tape_limit {
            self.tape.pop_front();
        }

        self.tape.push_back(TapeEntry {
            expression,
            result: self.current.clone(),
            is_error: self.error,
        });
    }
}
