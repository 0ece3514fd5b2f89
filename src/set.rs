//! The unified [`Set`] type, and the materialization boundary.

use crate::prelude::*;

/// A set in either representation.
///
/// This is a closed union: every operation handles both representations, and the compiler checks
/// that no combination is left out. Code built on the engine should go through [`SetTrait`] rather
/// than matching on the variants.
#[derive(Clone, Debug, From)]
pub enum Set<T> {
    /// A finite, materialized set.
    Extensional(ExtensionalSet<T>),
    /// A set defined by a domain and a predicate.
    Intensional(IntensionalSet<T>),
}

impl<T: Element> Default for Set<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Element> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Extensional(iter.into_iter().collect())
    }
}

impl<T: Element> Set<T> {
    /// Empty set Ø.
    #[must_use]
    pub fn empty() -> Self {
        Self::Extensional(ExtensionalSet::empty())
    }

    /// Every member of a universe.
    #[must_use]
    pub fn universe(universe: Universe<T>) -> Self {
        Self::Intensional(IntensionalSet::universe(universe))
    }

    /// The representation of the set.
    #[must_use]
    pub const fn kind(&self) -> Repr {
        match self {
            Self::Extensional(_) => Repr::Extensional,
            Self::Intensional(_) => Repr::Intensional,
        }
    }

    /// Narrows the set by a predicate.
    ///
    /// An extensional set becomes the domain of a new intensional set. An intensional set keeps
    /// its domain, and conjoins the predicates.
    #[must_use]
    pub fn refine(&self, predicate: Predicate<T>) -> Self {
        match self {
            Self::Extensional(set) => IntensionalSet::new(set.clone().into(), predicate).into(),
            Self::Intensional(set) => set.refine(predicate).into(),
        }
    }

    /// Whether the set is structurally known to be finite. Finding this never enumerates anything.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        match self {
            Self::Extensional(_) => true,
            Self::Intensional(set) => set.is_bounded(),
        }
    }

    /// Whether the set is empty by construction: an empty roster, or a predicate selecting nothing.
    #[must_use]
    pub fn is_void(&self) -> bool {
        match self {
            Self::Extensional(set) => set.is_empty(),
            Self::Intensional(set) => set.predicate().is_nothing(),
        }
    }

    /// Whether the set can be enumerated, possibly forever.
    #[must_use]
    pub fn is_enumerable(&self) -> bool {
        match self {
            Self::Extensional(_) => true,
            Self::Intensional(set) => set.is_enumerable(),
        }
    }
}

// -------------------- SetTrait -------------------- //

impl<T> Seal for Set<T> {}

impl<T: Element> SetTrait<T> for Set<T> {
    fn contains(&self, x: &T) -> bool {
        match self {
            Self::Extensional(set) => set.contains(x),
            Self::Intensional(set) => set.contains(x),
        }
    }

    fn card_with(&self, classifier: &Classifier) -> Cardinality {
        classifier.classify(self)
    }

    fn elements(&self) -> Result<Elements<T>, SetError> {
        match self {
            Self::Extensional(set) => set.elements(),
            Self::Intensional(set) => set.elements(),
        }
    }

    fn as_set(&self) -> Self {
        self.clone()
    }
}

// -------------------- Materialization -------------------- //

/// Forces a set into an [`ExtensionalSet`].
///
/// This is the only place that enumerates a set to completion without a finite bound already
/// established. The caller takes on the finiteness obligation, and the function fails rather
/// than hanging or exhausting memory:
///
/// - [`SetError::NonFiniteMaterialization`] if the set is not provably finite.
/// - [`SetError::CapacityExceeded`] if it has more than [`max_elements`](Limits::max_elements)
///   elements. A class that is already known is checked up front. Otherwise, at most one element
///   past the cap is ever pulled.
pub fn materialize<T: Element>(
    set: &Set<T>,
    limits: &Limits,
    classifier: &Classifier,
) -> Result<ExtensionalSet<T>, SetError> {
    let set = match set {
        Set::Extensional(set) => return Ok(set.clone()),
        Set::Intensional(set) => set,
    };

    let cap = limits.max_elements;
    let exceeded = SetError::CapacityExceeded {
        what: "materialization",
        cap,
    };

    // A bounded set is counted by enumerating it, so we do that here instead, under the cap.
    let known = classifier
        .known(set)
        .or_else(|| (!set.is_bounded()).then(|| classifier.classify_int(set)));

    match known {
        Some(Cardinality::Finite(0)) => Ok(ExtensionalSet::empty()),
        Some(Cardinality::Finite(n)) if n > cap => {
            debug!("refusing to materialize {n} elements over the cap of {cap}");
            Err(exceeded)
        }
        Some(Cardinality::Finite(_)) | None => {
            debug!("materializing {:?}", set.id());
            let items: Vec<_> = set.elements()?.take(cap.saturating_add(1)).collect();
            if items.len() > cap {
                debug!("{:?} has over {cap} elements", set.id());
                return Err(exceeded);
            }

            classifier.store(set.id(), items.len());
            Ok(items.into_iter().collect())
        }
        Some(card) => {
            debug!("refusing to materialize {:?} of cardinality {card}", set.id());
            Err(SetError::NonFiniteMaterialization(card))
        }
    }
}
