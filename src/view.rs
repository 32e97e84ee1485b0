//! A snapshot of everything the front end renders.

use serde::Serialize;

use crate::calculator::{Calculator, MemoryFlag, TapeEntry};

/// Rendered calculator state, as shown to the user.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplayView {
    /// The main display.
    pub display: String,
    /// The pending expression line.
    pub history: String,
    /// Lit memory badges.
    pub memory: Vec<MemoryFlag>,
    /// Whether the display shows the error token.
    pub is_error: bool,
    /// Completed calculations, oldest first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tape: Vec<TapeEntry>,
}

impl DisplayView {
    /// Capture the current outputs of a calculator.
    pub fn capture(calc: &Calculator) -> Self {
        Self {
            display: calc.current_display().to_string(),
            history: calc.history_display(),
            memory: calc.active_memory_flags().into_iter().collect(),
            is_error: calc.is_error(),
            tape: Vec::new(),
        }
    }

    /// Include the calculation tape.
    pub fn with_tape(mut self, calc: &Calculator) -> Self {
        self.tape = calc.tape().iter().cloned().collect();
        self
    }

    /// Memory badges as a single line, e.g. `MS M+`.
    pub fn memory_badges(&self) -> String {
        self.memory
            .iter()
            .map(|flag| flag.label())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_script;

    fn calc_after(script: &str) -> Calculator {
        let mut calc = Calculator::new();
        for action in parse_script(script).unwrap() {
            calc.dispatch(action);
        }
        calc
    }

    #[test]
    fn test_capture() {
        let view = DisplayView::capture(&calc_after("7 MS + 2"));
        assert_eq!(view.display, "9");
        assert_eq!(view.history, "7 +");
        assert_eq!(view.memory, vec![MemoryFlag::Store]);
        assert_eq!(view.memory_badges(), "MS");
        assert!(!view.is_error);
        assert!(view.tape.is_empty());
    }

    #[test]
    fn test_json_output() {
        let calc = calc_after("1 / 0");
        let json = serde_json::to_value(DisplayView::capture(&calc)).unwrap();
        assert_eq!(json["display"], "Erro");
        assert_eq!(json["is_error"], true);
        assert!(json.get("tape").is_none());
    }

    #[test]
    fn test_json_with_tape() {
        let calc = calc_after("2 * 3 = M+");
        let view = DisplayView::capture(&calc).with_tape(&calc);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["memory"][0], "M+");
        assert_eq!(json["tape"][0]["expression"], "2 × 3 =");
        assert_eq!(json["tape"][0]["result"], "6");
    }
}
