//! Binary operators for chained evaluation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::CalcError;

/// A pending binary operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The key symbol (`+`, `-`, `*`, `/`).
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// The glyph shown in the history line.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Check whether a history token is an operator glyph.
    pub fn is_glyph(token: &str) -> bool {
        matches!(token, "+" | "-" | "×" | "÷")
    }

    /// Apply the operator, rejecting non-finite results.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
        };

        CalcError::check_finite(value)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    /// Accepts key symbols as well as the history glyphs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Add),
            "-" | "−" => Ok(Self::Subtract),
            "*" | "×" | "x" => Ok(Self::Multiply),
            "/" | "÷" => Ok(Self::Divide),
            other => Err(CalcError::UnknownOperator(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(Operator::Add.apply(3.0, 4.0).unwrap(), 7.0);
        assert_eq!(Operator::Subtract.apply(3.0, 4.0).unwrap(), -1.0);
        assert_eq!(Operator::Multiply.apply(3.0, 4.0).unwrap(), 12.0);
        assert_eq!(Operator::Divide.apply(3.0, 4.0).unwrap(), 0.75);
    }

    #[test]
    fn test_division_by_zero_is_non_finite() {
        assert_eq!(
            Operator::Divide.apply(5.0, 0.0),
            Err(CalcError::NonFiniteResult)
        );
        assert_eq!(
            Operator::Divide.apply(0.0, 0.0),
            Err(CalcError::NonFiniteResult)
        );
    }

    #[test]
    fn test_overflow_is_non_finite() {
        assert_eq!(
            Operator::Multiply.apply(f64::MAX, 10.0),
            Err(CalcError::NonFiniteResult)
        );
    }

    #[test]
    fn test_parse_symbols_and_glyphs() {
        assert_eq!("*".parse::<Operator>().unwrap(), Operator::Multiply);
        assert_eq!("×".parse::<Operator>().unwrap(), Operator::Multiply);
        assert_eq!("÷".parse::<Operator>().unwrap(), Operator::Divide);
        assert!("^".parse::<Operator>().is_err());
    }

    #[test]
    fn test_glyphs_are_recognized() {
        for op in [
            Operator::Add,
            Operator::Subtract,
            Operator::Multiply,
            Operator::Divide,
        ] {
            assert!(Operator::is_glyph(op.glyph()));
        }
        assert!(!Operator::is_glyph("12"));
        assert!(!Operator::is_glyph("-3"));
    }
}
