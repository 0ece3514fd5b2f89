//! Predicate-defined sets [`IntensionalSet`].

use crate::iter::Interleave;
use crate::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

/// Identifies an intensional set.
///
/// Every intensional set gets a fresh identifier when built, and keeps it through clones. Since
/// sets are immutable, equal identifiers imply equal sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SetId(u64);

impl SetId {
    /// A new, never before used identifier.
    fn fresh() -> Self {
        /// The next identifier to hand out.
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// The domain an intensional set selects its members from.
#[derive(Clone, Debug)]
pub enum Domain<T> {
    /// A primitive domain.
    Universe(Universe<T>),
    /// Any other set.
    Set(Set<T>),
    /// The union of two sets, kept lazy.
    Union(Set<T>, Set<T>),
}

impl<T: Element> Domain<T> {
    /// Membership test.
    pub fn contains(&self, x: &T) -> bool {
        match self {
            Self::Universe(universe) => universe.contains(x),
            Self::Set(set) => set.contains(x),
            Self::Union(a, b) => a.contains(x) || b.contains(x),
        }
    }

    /// Whether the domain is structurally known to be finite, which makes its enumeration
    /// terminate.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        match self {
            Self::Universe(universe) => universe.is_bounded(),
            Self::Set(set) => set.is_bounded(),
            Self::Union(a, b) => a.is_bounded() && b.is_bounded(),
        }
    }

    /// The class of the domain where it's known without looking at any element: a declared
    /// universe, or an extensional set.
    #[must_use]
    pub fn declared(&self) -> Option<Cardinality> {
        match self {
            Self::Universe(universe) => universe.declared(),
            Self::Set(Set::Extensional(set)) => Some(Cardinality::Finite(set.len())),
            Self::Set(Set::Intensional(_)) | Self::Union(..) => None,
        }
    }

    /// Whether the domain can be enumerated.
    #[must_use]
    pub fn is_enumerable(&self) -> bool {
        match self {
            Self::Universe(universe) => universe.is_enumerable(),
            Self::Set(set) => set.is_enumerable(),
            Self::Union(a, b) => a.is_enumerable() && b.is_enumerable(),
        }
    }

    /// A lazy sequence over the domain.
    ///
    /// The two sides of a union are interleaved, so that an infinite left side never starves the
    /// right one. Elements of the right side already in the left side are skipped.
    pub fn elements(&self) -> Result<Elements<T>, SetError> {
        match self {
            Self::Universe(universe) => universe.elements(),
            Self::Set(set) => set.elements(),
            Self::Union(a, b) => {
                let left = Elements::new(a.elements()?.map(|x| (false, x)));
                let right = Elements::new(b.elements()?.map(|x| (true, x)));
                let a = a.clone();

                Ok(Elements::new(Interleave::new([left, right]).filter_map(
                    move |(from_right, x)| (!from_right || !a.contains(&x)).then_some(x),
                )))
            }
        }
    }
}

/// A set given by a domain and a membership predicate: {x ∈ D | p(x)}.
///
/// Nothing is ever enumerated eagerly. Membership is decided by testing the domain and then the
/// predicate, and the elements are produced lazily by filtering the domain.
///
/// The domain is shared between an intensional set and every set refined from it, which lets the
/// [`Dispatcher`] combine their predicates directly.
#[derive(Clone)]
pub struct IntensionalSet<T> {
    /// Identifier for memoization.
    id: SetId,
    /// The domain the elements come from.
    domain: Arc<Domain<T>>,
    /// The membership predicate.
    predicate: Predicate<T>,
}

impl<T: Debug> Debug for IntensionalSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("IntensionalSet")
            .field("id", &self.id)
            .field("domain", &self.domain)
            .field("predicate", &self.predicate)
            .finish()
    }
}

impl<T: Element> IntensionalSet<T> {
    /// The set {x ∈ domain | predicate(x)}.
    pub fn new(domain: Set<T>, predicate: Predicate<T>) -> Self {
        Self::with_domain(Arc::new(Domain::Set(domain)), predicate)
    }

    /// Every member of a universe.
    #[must_use]
    pub fn universe(universe: Universe<T>) -> Self {
        Self::with_domain(Arc::new(Domain::Universe(universe)), Predicate::all())
    }

    /// The set {x ∈ domain | predicate(x)}, sharing an existing domain.
    pub fn with_domain(domain: Arc<Domain<T>>, predicate: Predicate<T>) -> Self {
        Self {
            id: SetId::fresh(),
            domain,
            predicate,
        }
    }

    /// The set's identifier.
    #[must_use]
    pub const fn id(&self) -> SetId {
        self.id
    }

    /// The domain.
    #[must_use]
    pub fn domain(&self) -> &Domain<T> {
        &self.domain
    }

    /// The shared handle to the domain.
    #[must_use]
    pub fn domain_arc(&self) -> &Arc<Domain<T>> {
        &self.domain
    }

    /// The membership predicate.
    #[must_use]
    pub const fn predicate(&self) -> &Predicate<T> {
        &self.predicate
    }

    /// Whether both sets draw from the very same domain.
    #[must_use]
    pub fn same_domain(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.domain, &other.domain)
    }

    /// Narrows the set by a further predicate, over the same domain.
    #[must_use]
    pub fn refine(&self, predicate: Predicate<T>) -> Self {
        Self::with_domain(
            Arc::clone(&self.domain),
            self.predicate.clone() & predicate,
        )
    }

    /// Whether the set is structurally known to be finite.
    ///
    /// This holds when the predicate selects nothing, when the domain is bounded, or when the
    /// predicate requires membership in a bounded set. It never enumerates anything.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.predicate.is_nothing()
            || self.domain.is_bounded()
            || self.predicate.witnesses().iter().any(|set| set.is_bounded())
    }

    /// Whether the set can be enumerated.
    #[must_use]
    pub fn is_enumerable(&self) -> bool {
        self.predicate.is_nothing() || self.source().is_some()
    }

    /// Picks the superset whose enumeration we filter to produce the elements.
    ///
    /// Bounded sources come first, so that the enumeration of a bounded set always terminates.
    fn source(&self) -> Option<Source<'_, T>> {
        let witnesses = self.predicate.witnesses();
        let usable = |bounded: bool| {
            witnesses
                .iter()
                .copied()
                .find(|set| set.is_bounded() == bounded && set.is_enumerable())
        };

        if self.domain.is_bounded() && self.domain.is_enumerable() {
            Some(Source::Domain)
        } else if let Some(set) = usable(true) {
            Some(Source::Witness(set))
        } else if self.domain.is_enumerable() {
            Some(Source::Domain)
        } else {
            usable(false).map(Source::Witness)
        }
    }
}

/// A superset of an intensional set that can be enumerated and filtered.
enum Source<'a, T> {
    /// The domain of the set.
    Domain,
    /// A set the predicate requires membership in.
    Witness(&'a Set<T>),
}

// -------------------- SetTrait -------------------- //

impl<T> Seal for IntensionalSet<T> {}

impl<T: Element> SetTrait<T> for IntensionalSet<T> {
    fn contains(&self, x: &T) -> bool {
        self.domain.contains(x) && self.predicate.eval(x)
    }

    fn card_with(&self, classifier: &Classifier) -> Cardinality {
        classifier.classify_int(self)
    }

    fn elements(&self) -> Result<Elements<T>, SetError> {
        if self.predicate.is_nothing() {
            return Ok(Elements::empty());
        }

        match self.source() {
            Some(Source::Domain) => {
                let predicate = self.predicate.clone();
                Ok(Elements::new(
                    self.domain.elements()?.filter(move |x| predicate.eval(x)),
                ))
            }
            Some(Source::Witness(witness)) => {
                let set = self.clone();
                Ok(Elements::new(
                    witness.elements()?.filter(move |x| set.contains(x)),
                ))
            }
            None => Err(SetError::NotEnumerable),
        }
    }
}
