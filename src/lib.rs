//! calcpad: a keypad calculator engine.
//!
//! The [`calculator::Calculator`] state machine handles one key at a time,
//! chaining operations left to right, keeping a memory log and formatting
//! results for a decimal-comma display. [`input`] maps keys to actions and
//! [`view`] captures what a front end renders.

pub mod calculator;
pub mod config;
pub mod input;
pub mod view;
