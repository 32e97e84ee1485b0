//! Keypad calculator engine.
//!
//! This module provides:
//! - The [`Calculator`] state machine driven by key actions
//! - Number formatting for the decimal-comma display
//! - The memory log with cyclic recall
//! - Copying the display to the clipboard

mod clipboard;
mod engine;
mod error;
mod format;
mod memory;
mod operator;

pub use clipboard::copy_to_clipboard;
pub use engine::{Calculator, DEFAULT_TAPE_LIMIT, EMPTY_HISTORY, TapeEntry};
pub use error::CalcError;
pub use format::{Locale, format_number, parse_entry, to_display};
pub use memory::{MemoryFlag, MemoryStack};
pub use operator::Operator;
