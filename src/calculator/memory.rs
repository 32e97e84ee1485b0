//! Memory log with cyclic recall.
//!
//! Every store, add or subtract pushes a new contribution instead of updating
//! a single register, so repeated recalls can walk back through them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Memory indicator badges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MemoryFlag {
    #[serde(rename = "MS")]
    Store,
    #[serde(rename = "M+")]
    Add,
    #[serde(rename = "M-")]
    Subtract,
    #[serde(rename = "MR")]
    Recall,
    #[serde(rename = "MC")]
    Clear,
}

impl MemoryFlag {
    /// Badge label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Store => "MS",
            Self::Add => "M+",
            Self::Subtract => "M-",
            Self::Recall => "MR",
            Self::Clear => "MC",
        }
    }
}

impl fmt::Display for MemoryFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Log of memory contributions plus the recall cursor and lit badges.
#[derive(Clone, Debug, Default)]
pub struct MemoryStack {
    entries: Vec<f64>,
    /// Index of the entry last pushed or recalled. `None` iff empty.
    pointer: Option<usize>,
    flags: BTreeSet<MemoryFlag>,
}

impl MemoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// MS: record the value as is.
    pub fn store(&mut self, value: f64) {
        self.push(value, MemoryFlag::Store);
    }

    /// M+: record the value as a positive contribution.
    pub fn add(&mut self, value: f64) {
        self.push(value, MemoryFlag::Add);
    }

    /// M-: record the negated value.
    pub fn subtract(&mut self, value: f64) {
        self.push(-value, MemoryFlag::Subtract);
    }

    fn push(&mut self, value: f64, flag: MemoryFlag) {
        self.entries.push(value);
        self.pointer = Some(self.entries.len() - 1);
        self.light(flag);
        tracing::trace!(?flag, value, pointer = ?self.pointer, "memory push");
    }

    /// MR: advance the cursor (wrapping) and return that entry.
    ///
    /// Returns `None` when the log is empty.
    pub fn recall(&mut self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }

        let next = self
            .pointer
            .map_or(0, |pointer| (pointer + 1) % self.entries.len());
        self.pointer = Some(next);
        self.light(MemoryFlag::Recall);
        tracing::trace!(pointer = next, "memory recall");

        Some(self.entries[next])
    }

    /// Only the badge of the latest memory action stays lit.
    fn light(&mut self, flag: MemoryFlag) {
        self.flags.clear();
        self.flags.insert(flag);
    }

    /// MC: drop every entry and badge.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pointer = None;
        self.flags.clear();
    }

    /// Turn off all badges, keeping the entries.
    pub fn clear_flags(&mut self) {
        self.flags.clear();
    }

    pub fn entries(&self) -> &[f64] {
        &self.entries
    }

    pub fn pointer(&self) -> Option<usize> {
        self.pointer
    }

    /// Currently lit badges, in badge order.
    pub fn active_flags(&self) -> BTreeSet<MemoryFlag> {
        self.flags.clone()
    }
}
