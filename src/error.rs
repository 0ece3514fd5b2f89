//! Errors raised by the set engine.
//!
//! Errors surface exactly at the call that would otherwise hang or exhaust memory. Nothing is
//! swallowed, and no result is ever silently truncated.
//!
//! Predicates handed to an [`IntensionalSet`](crate::int::IntensionalSet) must be pure. Breaking
//! this obligation is not detected at runtime, and leads to unspecified results rather than an
//! error.

use crate::card::Cardinality;

/// Errors arising from set construction and enumeration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SetError {
    /// The inputs to a constructor contradict each other, such as a domain claimed to be finite
    /// that can't be enumerated within its declared bound.
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),

    /// An operation needed a provably finite set, such as materialization or an emptiness check,
    /// and the set isn't one. To look at its elements, take a bounded prefix of
    /// [`elements`](crate::SetTrait::elements) instead.
    #[error("set of cardinality {0} is not provably finite")]
    NonFiniteMaterialization(Cardinality),

    /// A result would have more elements than the configured cap allows.
    #[error("{what} exceeds the cap of {cap} elements")]
    CapacityExceeded {
        /// The operation that was refused.
        what: &'static str,
        /// The cap in effect.
        cap: usize,
    },

    /// The set has no enumeration, as with an uncountable domain.
    #[error("set is not enumerable")]
    NotEnumerable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            SetError::NonFiniteMaterialization(Cardinality::Unknown).to_string(),
            "set of cardinality unknown is not provably finite"
        );
        assert_eq!(
            SetError::CapacityExceeded {
                what: "materialization",
                cap: 3
            }
            .to_string(),
            "materialization exceeds the cap of 3 elements"
        );
    }
}
