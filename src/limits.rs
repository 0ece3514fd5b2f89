//! Safety limits for operations that could exhaust memory.

/// Caps on materialization and powerset construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of elements a materialized set may hold.
    pub max_elements: usize,
    /// Maximum number of subsets a powerset may hold.
    pub max_subsets: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_elements: 1_000_000,
            max_subsets: 1 << 16,
        }
    }
}

impl Limits {
    /// Sets the maximum number of elements for materialization.
    #[must_use]
    pub const fn with_max_elements(mut self, max: usize) -> Self {
        self.max_elements = max;
        self
    }

    /// Sets the maximum number of subsets for a powerset.
    #[must_use]
    pub const fn with_max_subsets(mut self, max: usize) -> Self {
        self.max_subsets = max;
        self
    }
}
