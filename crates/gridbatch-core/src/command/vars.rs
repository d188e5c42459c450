//! The ten `_0`..`_9` temporary variable slots.

use crate::format::{format_number, parse_number};

/// Number of temporary variable slots.
pub const SLOT_COUNT: usize = 10;

/// Fixed store of optional owned strings, addressed `0..=9`.
#[derive(Debug, Default)]
pub struct TempVars {
    slots: [Option<String>; SLOT_COUNT],
}

impl TempVars {
    pub fn new() -> Self {
        TempVars::default()
    }

    /// Value of slot `n`, if the slot has been defined.
    pub fn get(&self, n: usize) -> Option<&str> {
        self.slots[n].as_deref()
    }

    /// Store a copy of `value` in slot `n`.
    pub fn set(&mut self, n: usize, value: &str) {
        self.slots[n] = Some(value.to_string());
    }

    /// Increment slot `n`: an unset or non-numeric slot becomes `"1"`, a
    /// numeric one gains 1.0 and is reformatted.
    pub fn inc(&mut self, n: usize) {
        let next = match self.slots[n].as_deref().and_then(parse_number) {
            Some(value) => format_number(value + 1.0),
            None => "1".to_string(),
        };
        self.slots[n] = Some(next);
    }
}
