//! [`Cardinality`] classes and the memoizing [`Classifier`].

use crate::prelude::*;
use std::sync::{Mutex, PoisonError};

/// The size class of a set.
///
/// Classes are ordered as `Finite(n) < CountablyInfinite < Uncountable`, with finite classes
/// ordered by their count. [`Unknown`](Self::Unknown) is incomparable to every other class, and
/// sorts last under [`sort_cmp`](Self::sort_cmp).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Cardinality {
    /// A finite set with this many elements.
    #[display(fmt = "{}", _0)]
    Finite(usize),
    /// A set in bijection with the naturals.
    #[display(fmt = "ℵ₀")]
    CountablyInfinite,
    /// An infinite set that can't be enumerated.
    #[display(fmt = "uncountable")]
    Uncountable,
    /// A set whose size class could not be determined.
    #[display(fmt = "unknown")]
    Unknown,
}

impl PartialOrd for Cardinality {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Unknown, Self::Unknown) => Some(Ordering::Equal),
            (Self::Unknown, _) | (_, Self::Unknown) => None,
            (Self::Finite(m), Self::Finite(n)) => Some(m.cmp(n)),
            _ => Some(self.rank().cmp(&other.rank())),
        }
    }
}

impl Cardinality {
    /// Position of the class within the order, with unknown classes last.
    const fn rank(self) -> u8 {
        match self {
            Self::Finite(_) => 0,
            Self::CountablyInfinite => 1,
            Self::Uncountable => 2,
            Self::Unknown => 3,
        }
    }

    /// A total order extending [`PartialOrd`], which places [`Unknown`](Self::Unknown) last.
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .unwrap_or_else(|| self.rank().cmp(&other.rank()))
    }

    /// Whether the class is finite.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        matches!(self, Self::Finite(_))
    }

    /// The element count, for a finite class.
    #[must_use]
    pub const fn count(self) -> Option<usize> {
        match self {
            Self::Finite(n) => Some(n),
            _ => None,
        }
    }

    /// The larger of two classes, without computing anything about the actual elements.
    ///
    /// This is the class of a union whenever one of the operands is infinite. An uncountable
    /// operand dominates even an unknown one. For two finite classes, the result is only a lower
    /// bound on the size of their union, which depends on how many elements they share.
    #[must_use]
    pub fn join(self, other: Self) -> Self {
        match (self, other) {
            (Self::Uncountable, _) | (_, Self::Uncountable) => Self::Uncountable,
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (Self::CountablyInfinite, _) | (_, Self::CountablyInfinite) => {
                Self::CountablyInfinite
            }
            (Self::Finite(m), Self::Finite(n)) => Self::Finite(m.max(n)),
        }
    }

    /// The class of a cartesian product.
    ///
    /// A finite count too large for a `usize` becomes [`Unknown`](Self::Unknown).
    #[must_use]
    pub fn product(self, other: Self) -> Self {
        match (self, other) {
            (Self::Finite(0), _) | (_, Self::Finite(0)) => Self::Finite(0),
            (Self::Finite(m), Self::Finite(n)) => m.checked_mul(n).map_or(Self::Unknown, Self::Finite),
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (Self::Uncountable, _) | (_, Self::Uncountable) => Self::Uncountable,
            _ => Self::CountablyInfinite,
        }
    }
}

// -------------------- Classifier -------------------- //

/// Computes the [`Cardinality`] of sets, remembering every count it proves finite.
///
/// The memo table is keyed by [`SetId`]. Since sets are immutable, an identifier always refers to
/// the same membership, and entries never need to be invalidated. Only finite counts are stored.
///
/// The table lock is never held while classifying. Two threads classifying the same set at once
/// may both count it, but will store the same result.
#[derive(Debug, Default)]
pub struct Classifier {
    /// Proven element counts of intensional sets.
    table: Mutex<HashMap<SetId, usize>>,
}

impl Classifier {
    /// Initializes a classifier with an empty memo table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of sets whose count has been memoized.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Looks up a memoized count.
    pub(crate) fn lookup(&self, id: SetId) -> Option<usize> {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .copied()
    }

    /// Memoizes a count.
    pub(crate) fn store(&self, id: SetId, count: usize) {
        self.table
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, count);
    }

    /// Classifies a set.
    pub fn classify<T: Element>(&self, set: &Set<T>) -> Cardinality {
        match set {
            Set::Extensional(set) => Cardinality::Finite(set.len()),
            Set::Intensional(set) => self.classify_int(set),
        }
    }

    /// Classifies an intensional set.
    pub fn classify_int<T: Element>(&self, set: &IntensionalSet<T>) -> Cardinality {
        if let Some(card) = self.known(set) {
            return card;
        }

        let card = self.compute(set);
        if let Cardinality::Finite(count) = card {
            self.store(set.id(), count);
        }
        card
    }

    /// The class of an intensional set, if it can be found without enumerating the set itself:
    /// a memoized count, an empty predicate, or every member of a universe.
    pub(crate) fn known<T: Element>(&self, set: &IntensionalSet<T>) -> Option<Cardinality> {
        if let Some(count) = self.lookup(set.id()) {
            trace!("cardinality of {:?} memoized as {count}", set.id());
            return Some(Cardinality::Finite(count));
        }

        let pred = set.predicate();

        // The empty predicate decides the class before the domain is ever looked at.
        if pred.is_nothing() {
            return Some(Cardinality::Finite(0));
        }

        match set.domain() {
            Domain::Universe(universe) if pred.is_all() => Some(universe.card_with(self)),
            _ => None,
        }
    }

    /// Classifies an intensional set whose class isn't [`known`](Self::known).
    fn compute<T: Element>(&self, set: &IntensionalSet<T>) -> Cardinality {
        let pred = set.predicate();

        // A bounded set has a terminating enumeration, so we can just count.
        if set.is_bounded() {
            return set
                .elements()
                .map_or(Cardinality::Unknown, |iter| Cardinality::Finite(iter.count()));
        }

        let domain = self.classify_domain(set.domain());
        if pred.is_all() {
            return domain;
        }

        // Removing finitely many elements from an infinite domain preserves its class.
        if let Some(removed) = pred.excluded() {
            if removed.is_bounded()
                && matches!(domain, Cardinality::CountablyInfinite | Cardinality::Uncountable)
            {
                return domain;
            }
        }

        Cardinality::Unknown
    }

    /// Classifies the domain of an intensional set.
    pub fn classify_domain<T: Element>(&self, domain: &Domain<T>) -> Cardinality {
        match domain {
            Domain::Universe(universe) => universe.card_with(self),
            Domain::Set(set) => self.classify(set),
            Domain::Union(a, b) => {
                if domain.is_bounded() {
                    domain
                        .elements()
                        .map_or(Cardinality::Unknown, |iter| Cardinality::Finite(iter.count()))
                } else {
                    self.classify(a).join(self.classify(b))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order() {
        use Cardinality::*;

        assert!(Finite(3) < Finite(4));
        assert!(Finite(1_000_000) < CountablyInfinite);
        assert!(CountablyInfinite < Uncountable);
        assert_eq!(Unknown.partial_cmp(&Finite(0)), None);
        assert_eq!(Uncountable.partial_cmp(&Unknown), None);
        assert_eq!(Unknown.partial_cmp(&Unknown), Some(Ordering::Equal));

        let mut cards = vec![Unknown, Uncountable, Finite(2), CountablyInfinite, Finite(0)];
        cards.sort_by(Cardinality::sort_cmp);
        assert_eq!(
            cards,
            [Finite(0), Finite(2), CountablyInfinite, Uncountable, Unknown]
        );
    }

    #[test]
    fn join() {
        use Cardinality::*;

        assert_eq!(Finite(2).join(Finite(5)), Finite(5));
        assert_eq!(Finite(2).join(CountablyInfinite), CountablyInfinite);
        assert_eq!(Unknown.join(Finite(1)), Unknown);
        assert_eq!(Unknown.join(Uncountable), Uncountable);
    }

    #[test]
    fn finite_union_is_counted() {
        use Cardinality::*;

        // Joining finite classes only gives a lower bound, so finite unions are counted instead.
        let (a, b) = (Set::from(ext![1_u32, 2]), Set::from(ext![3_u32, 4, 5]));
        let classifier = Classifier::new();
        assert_eq!(classifier.classify(&a).join(classifier.classify(&b)), Finite(3));

        let union = IntensionalSet::with_domain(Arc::new(Domain::Union(a, b)), Predicate::all());
        assert_eq!(classifier.classify_int(&union), Finite(5));
    }

    #[test]
    fn product() {
        use Cardinality::*;

        assert_eq!(Finite(3).product(Finite(4)), Finite(12));
        assert_eq!(Finite(0).product(Uncountable), Finite(0));
        assert_eq!(Unknown.product(Finite(0)), Finite(0));
        assert_eq!(Finite(3).product(CountablyInfinite), CountablyInfinite);
        assert_eq!(CountablyInfinite.product(Uncountable), Uncountable);
        assert_eq!(Unknown.product(Finite(2)), Unknown);
        assert_eq!(Finite(usize::MAX).product(Finite(2)), Unknown);
    }

    #[test]
    fn display() {
        assert_eq!(Cardinality::Finite(7).to_string(), "7");
        assert_eq!(Cardinality::CountablyInfinite.to_string(), "ℵ₀");
    }

    #[test]
    fn classify() {
        let classifier = Classifier::new();
        let nat = Set::universe(Universe::naturals());

        assert_eq!(classifier.classify(&ext![1, 2, 2, 3].into()), Cardinality::Finite(3));
        assert_eq!(classifier.classify(&nat), Cardinality::CountablyInfinite);
        assert_eq!(
            classifier.classify(&nat.select(|n| n % 3 == 0)),
            Cardinality::Unknown
        );
        assert_eq!(
            classifier.classify(&ext![1_u64, 2, 3, 4].select(|n| n % 2 == 1)),
            Cardinality::Finite(2)
        );
    }

    #[test]
    fn select_none() {
        let opaque = Set::universe(Universe::<u64>::opaque("opaque", |_| true));
        let none = opaque.refine(Predicate::nothing());
        assert_eq!(none.card(), Cardinality::Finite(0));
    }

    #[test]
    fn finite_witness() {
        let nat = Set::universe(Universe::naturals());
        let small = nat.select(|n| n % 2 == 0).inter(&nat.refine(Predicate::member(ext![1, 2, 3, 4].into())));
        assert_eq!(small.card(), Cardinality::Finite(2));
    }

    #[test]
    fn cofinite() {
        let nat = Set::universe(Universe::naturals());
        assert_eq!(nat.diff(&ext![0, 1, 2]).card(), Cardinality::CountablyInfinite);
    }

    #[test]
    fn memo() {
        let classifier = Classifier::new();
        let evens = ext![1_u64, 2, 3, 4, 5, 6].select(|n| n % 2 == 0);
        assert_eq!(evens.card_with(&classifier), Cardinality::Finite(3));
        assert_eq!(classifier.cached(), 1);
        assert_eq!(evens.card_with(&classifier), Cardinality::Finite(3));
        assert_eq!(classifier.cached(), 1);

        // Infinite results are never memoized.
        let nat = Set::universe(Universe::naturals());
        assert_eq!(nat.card_with(&classifier), Cardinality::CountablyInfinite);
        assert_eq!(classifier.cached(), 1);
    }
}
