use std::fmt;

use crate::constants::Z_ORDER_BASELINE;

/// Stacking priority. Higher values draw on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ZOrder(u64);

impl ZOrder {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ZOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out strictly increasing stacking priorities.
///
/// Call [`ZOrderAllocator::next`] once per raise-to-front event (window
/// creation, drag start, resize start), never per pointer move.
#[derive(Debug, Clone)]
pub struct ZOrderAllocator {
    last: u64,
}

impl Default for ZOrderAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ZOrderAllocator {
    pub fn new() -> Self {
        Self::with_baseline(Z_ORDER_BASELINE)
    }

    pub fn with_baseline(baseline: u64) -> Self {
        Self { last: baseline }
    }

    pub fn next(&mut self) -> ZOrder {
        self.last = self.last.saturating_add(1);
        ZOrder(self.last)
    }

    /// Most recently allocated value, or the baseline if none yet.
    pub fn current(&self) -> ZOrder {
        ZOrder(self.last)
    }
}
