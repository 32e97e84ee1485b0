//! Key scripts: whitespace-separated key sequences such as `12,5 + 3 =`.
//!
//! Number runs are typed one key at a time, everything else is a named key.

use lazy_static::lazy_static;
use regex::Regex;

use super::{Action, KeyError};
use crate::calculator::Operator;

lazy_static! {
    /// A run of digits and decimal separators, typed key by key.
    static ref NUMBER_RUN: Regex = Regex::new(r"^[0-9.,]+$").unwrap();
}

/// Parse a key script into actions.
///
/// Named keys are case-insensitive. Besides the operator symbols the
/// following names are understood:
///
/// | key | names |
/// |-----|-------|
/// | equals | `=`, `enter` |
/// | clear | `c`, `esc`, `escape` |
/// | clear entry | `ce`, `del`, `delete` |
/// | backspace | `bs`, `backspace`, `⌫` |
/// | sign | `±`, `+/-`, `neg` |
/// | percent | `%` |
/// | reciprocal | `1/x`, `inv` |
/// | square | `sq`, `x²`, `x^2` |
/// | square root | `sqrt`, `√` |
/// | memory | `ms`, `m+`, `m-`, `mr`, `mc` |
///
/// Button action names (`memory-store`, `toggle-sign`, ...) work as well.
pub fn parse_script(script: &str) -> Result<Vec<Action>, KeyError> {
    let mut actions = Vec::new();

    for word in script.split_whitespace() {
        if NUMBER_RUN.is_match(word) {
            actions.extend(word.chars().filter_map(|key| Action::from_key(&key.to_string())));
            continue;
        }

        actions.push(named_key(word)?);
    }

    Ok(actions)
}

fn named_key(word: &str) -> Result<Action, KeyError> {
    if let Ok(op) = word.parse::<Operator>() {
        return Ok(Action::Operator(op));
    }

    let action = match word.to_lowercase().as_str() {
        "=" | "enter" => Action::Equals,
        "c" | "esc" | "escape" => Action::Clear,
        "ce" | "del" | "delete" => Action::ClearEntry,
        "bs" | "backspace" | "⌫" => Action::Backspace,
        "±" | "+/-" | "neg" => Action::ToggleSign,
        "%" => Action::Percent,
        "1/x" | "inv" => Action::Reciprocal,
        "sq" | "x²" | "x^2" => Action::Square,
        "sqrt" | "√" => Action::Sqrt,
        "ms" => Action::MemoryStore,
        "m+" => Action::MemoryAdd,
        "m-" => Action::MemorySubtract,
        "mr" => Action::MemoryRecall,
        "mc" => Action::MemoryClear,
        other => {
            return Action::from_button(other, None)
                .map_err(|_| KeyError::UnknownKey(word.to_string()));
        }
    };

    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_runs_are_split_into_keys() {
        assert_eq!(
            parse_script("12,5").unwrap(),
            vec![
                Action::Digit(1),
                Action::Digit(2),
                Action::Decimal,
                Action::Digit(5)
            ]
        );
    }

    #[test]
    fn test_operators_and_equals() {
        assert_eq!(
            parse_script("3 + 4 × 2 =").unwrap(),
            vec![
                Action::Digit(3),
                Action::Operator(Operator::Add),
                Action::Digit(4),
                Action::Operator(Operator::Multiply),
                Action::Digit(2),
                Action::Equals,
            ]
        );
    }

    #[test]
    fn test_named_keys_are_case_insensitive() {
        assert_eq!(
            parse_script("MS m+ Mr CE c SQRT").unwrap(),
            vec![
                Action::MemoryStore,
                Action::MemoryAdd,
                Action::MemoryRecall,
                Action::ClearEntry,
                Action::Clear,
                Action::Sqrt,
            ]
        );
    }

    #[test]
    fn test_button_names_accepted() {
        assert_eq!(
            parse_script("toggle-sign memory-clear").unwrap(),
            vec![Action::ToggleSign, Action::MemoryClear]
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(
            parse_script("2 ^ 3"),
            Err(KeyError::UnknownKey("^".to_string()))
        );
        assert_eq!(
            parse_script("-5"),
            Err(KeyError::UnknownKey("-5".to_string()))
        );
    }

    #[test]
    fn test_empty_script() {
        assert!(parse_script("   ").unwrap().is_empty());
    }
}
