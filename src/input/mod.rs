//! Logical calculator keys.
//!
//! The front end turns keyboard keys, button identifiers and key scripts
//! into [`Action`]s, which the engine executes with
//! [`Calculator::dispatch`](crate::calculator::Calculator::dispatch).

mod keys;

pub use keys::parse_script;

use std::fmt;

use thiserror::Error;

use crate::calculator::Operator;

/// Errors raised while mapping input to actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key: {0:?}")]
    UnknownKey(String),

    #[error("unknown button action: {0:?}")]
    UnknownButton(String),

    #[error("button action {0:?} requires a value")]
    MissingValue(String),

    #[error("invalid value {value:?} for button action {action:?}")]
    InvalidValue { action: String, value: String },
}

/// One calculator key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// A digit from 0 to 9.
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    /// C: full clear.
    Clear,
    /// CE: clear the entry only.
    ClearEntry,
    Backspace,
    ToggleSign,
    Percent,
    Reciprocal,
    Square,
    Sqrt,
    MemoryClear,
    MemoryRecall,
    MemoryAdd,
    MemorySubtract,
    MemoryStore,
}

impl Action {
    /// Map a physical keyboard key (as reported by the host) to an action.
    ///
    /// Returns `None` for keys the calculator does not handle.
    pub fn from_key(key: &str) -> Option<Self> {
        if let Some(digit) = single_digit(key) {
            return Some(Self::Digit(digit));
        }

        match key {
            "," | "." => Some(Self::Decimal),
            "+" | "-" | "*" | "/" => key.parse().ok().map(Self::Operator),
            "Enter" | "=" => Some(Self::Equals),
            "Backspace" => Some(Self::Backspace),
            "Delete" => Some(Self::ClearEntry),
            "Escape" => Some(Self::Clear),
            "%" => Some(Self::Percent),
            _ => None,
        }
    }

    /// Map a keypad button, identified by its action name and optional
    /// value (`("digit", Some("7"))`, `("operator", Some("*"))`,
    /// `("memory-store", None)`).
    pub fn from_button(action: &str, value: Option<&str>) -> Result<Self, KeyError> {
        let required = || value.ok_or_else(|| KeyError::MissingValue(action.to_string()));
        let invalid = |value: &str| KeyError::InvalidValue {
            action: action.to_string(),
            value: value.to_string(),
        };

        let parsed = match action {
            "digit" => {
                let value = required()?;
                Self::Digit(single_digit(value).ok_or_else(|| invalid(value))?)
            }
            "operator" => {
                let value = required()?;
                Self::Operator(value.parse().map_err(|_| invalid(value))?)
            }
            "decimal" => Self::Decimal,
            "equals" => Self::Equals,
            "clear" => Self::Clear,
            "clear-entry" => Self::ClearEntry,
            "backspace" => Self::Backspace,
            "toggle-sign" => Self::ToggleSign,
            "percent" => Self::Percent,
            "reciprocal" => Self::Reciprocal,
            "square" => Self::Square,
            "sqrt" => Self::Sqrt,
            "memory-clear" => Self::MemoryClear,
            "memory-recall" => Self::MemoryRecall,
            "memory-add" => Self::MemoryAdd,
            "memory-subtract" => Self::MemorySubtract,
            "memory-store" => Self::MemoryStore,
            other => return Err(KeyError::UnknownButton(other.to_string())),
        };

        Ok(parsed)
    }

    /// The button action name for this key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Digit(_) => "digit",
            Self::Decimal => "decimal",
            Self::Operator(_) => "operator",
            Self::Equals => "equals",
            Self::Clear => "clear",
            Self::ClearEntry => "clear-entry",
            Self::Backspace => "backspace",
            Self::ToggleSign => "toggle-sign",
            Self::Percent => "percent",
            Self::Reciprocal => "reciprocal",
            Self::Square => "square",
            Self::Sqrt => "sqrt",
            Self::MemoryClear => "memory-clear",
            Self::MemoryRecall => "memory-recall",
            Self::MemoryAdd => "memory-add",
            Self::MemorySubtract => "memory-subtract",
            Self::MemoryStore => "memory-store",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(digit) => write!(f, "digit({digit})"),
            Self::Operator(op) => write!(f, "operator({})", op.symbol()),
            other => f.write_str(other.name()),
        }
    }
}

impl From<Operator> for Action {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

/// Parse a single ASCII digit.
fn single_digit(text: &str) -> Option<u8> {
    match text.as_bytes() {
        [byte @ b'0'..=b'9'] => Some(byte - b'0'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_keys() {
        assert_eq!(Action::from_key("7"), Some(Action::Digit(7)));
        assert_eq!(Action::from_key("."), Some(Action::Decimal));
        assert_eq!(Action::from_key(","), Some(Action::Decimal));
        assert_eq!(
            Action::from_key("*"),
            Some(Action::Operator(Operator::Multiply))
        );
        assert_eq!(Action::from_key("Enter"), Some(Action::Equals));
        assert_eq!(Action::from_key("Delete"), Some(Action::ClearEntry));
        assert_eq!(Action::from_key("Escape"), Some(Action::Clear));
        assert_eq!(Action::from_key("%"), Some(Action::Percent));
    }

    #[test]
    fn test_unhandled_keys() {
        assert_eq!(Action::from_key("a"), None);
        assert_eq!(Action::from_key("12"), None);
        assert_eq!(Action::from_key("Tab"), None);
    }

    #[test]
    fn test_buttons() {
        assert_eq!(
            Action::from_button("digit", Some("0")),
            Ok(Action::Digit(0))
        );
        assert_eq!(
            Action::from_button("operator", Some("/")),
            Ok(Action::Operator(Operator::Divide))
        );
        assert_eq!(
            Action::from_button("memory-subtract", None),
            Ok(Action::MemorySubtract)
        );
        assert_eq!(Action::from_button("sqrt", None), Ok(Action::Sqrt));
    }

    #[test]
    fn test_button_errors() {
        assert_eq!(
            Action::from_button("digit", None),
            Err(KeyError::MissingValue("digit".to_string()))
        );
        assert!(matches!(
            Action::from_button("digit", Some("x")),
            Err(KeyError::InvalidValue { .. })
        ));
        assert_eq!(
            Action::from_button("launch", None),
            Err(KeyError::UnknownButton("launch".to_string()))
        );
    }

    #[test]
    fn test_button_names_round_trip() {
        for action in [
            Action::Decimal,
            Action::Equals,
            Action::ClearEntry,
            Action::ToggleSign,
            Action::Reciprocal,
            Action::MemoryRecall,
        ] {
            assert_eq!(Action::from_button(action.name(), None), Ok(action));
        }
    }
}
