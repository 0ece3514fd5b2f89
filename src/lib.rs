//! # Set algebra over extensional and intensional sets
//!
//! Sets come in two representations. An [`ExtensionalSet`] is a finite, materialized collection of
//! distinct elements. An [`IntensionalSet`] is a domain plus a pure predicate, and may be infinite.
//! Both are unified behind [`Set`] and the [`SetTrait`] capability surface, so that algebra never
//! needs to know which representation it's working on.
//!
//! Binary operations go through the [`Dispatcher`], which picks the cheapest result representation
//! that never forces an infinite operand. The only way to force enumeration of a set is
//! [`SetTrait::materialize`], which fails instead of hanging when the set is not provably finite.
//!
//! ```
//! use setalg::prelude::*;
//!
//! let universe = ext![1, 2, 3, 4, 5];
//! let evens = universe.select(|x| x % 2 == 0);
//! assert_eq!(evens.materialize().unwrap(), ext![2, 4]);
//!
//! let with_three = evens.union(&ext![3]);
//! assert_eq!(with_three.materialize().unwrap(), ext![2, 3, 4]);
//! ```

#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod card;
pub mod dispatch;
pub mod error;
pub mod ext;
pub mod int;
pub mod iter;
pub mod limits;
pub mod pair;
pub mod pred;
pub mod prelude;
pub mod set;
pub mod universe;

mod tests;

use prelude::*;

/// Small vector.
type SmallVec<T> = smallvec::SmallVec<[T; 4]>;

/// Builds an [`ExtensionalSet`] in roster notation. Repeated elements are dropped.
///
/// ```
/// # use setalg::prelude::*;
/// let set = ext![1, 2, 2, 3];
/// assert_eq!(set.len(), 3);
/// ```
#[macro_export]
macro_rules! ext {
    ($($x: expr), *$(,)*) => {
        <$crate::ext::ExtensionalSet<_> as ::std::iter::FromIterator<_>>::from_iter([$($x,)*])
    };
}

/// The contract every element type must satisfy: total equality and stable hashing.
///
/// The bounds on sharing and lifetime allow sets to be read from many threads, and let lazy
/// sequences own all of their state.
pub trait Element: Clone + Debug + Eq + Hash + Send + Sync + 'static {}

impl<T: Clone + Debug + Eq + Hash + Send + Sync + 'static> Element for T {}

/// A seal for [`SetTrait`], avoiding foreign implementations.
trait Seal {}

/// The capability surface shared by every set representation.
///
/// The trait is sealed: [`ExtensionalSet`], [`IntensionalSet`] and [`Set`] are the only types that
/// implement it. Code built on top of the engine should only ever use these methods, and never
/// branch on the concrete representation.
#[allow(private_bounds)]
pub trait SetTrait<T: Element>: Seal + Clone + Debug + Into<Set<T>> {
    // -------------------- Basic methods -------------------- //

    /// Membership relation ∈.
    fn contains(&self, x: &T) -> bool;

    /// Cardinality of the set, memoized within the given classifier.
    fn card_with(&self, classifier: &Classifier) -> Cardinality;

    /// Cardinality of the set.
    fn card(&self) -> Cardinality {
        self.card_with(&Classifier::new())
    }

    /// A lazy sequence over the elements of the set.
    ///
    /// The sequence is pulled on demand and never looks ahead. It may be infinite, in which case
    /// you should only ever take a bounded prefix of it. Fails with [`SetError::NotEnumerable`] if
    /// no enumeration exists, as for an uncountable domain.
    fn elements(&self) -> Result<Elements<T>, SetError>;

    /// The set as a [`Set`].
    fn as_set(&self) -> Set<T> {
        self.clone().into()
    }

    /// Forces the set into an [`ExtensionalSet`], under the given limits.
    ///
    /// See [`materialize`](crate::set::materialize).
    fn materialize_with(
        &self,
        limits: &Limits,
        classifier: &Classifier,
    ) -> Result<ExtensionalSet<T>, SetError> {
        set::materialize(&self.as_set(), limits, classifier)
    }

    /// Forces the set into an [`ExtensionalSet`], under the default limits.
    fn materialize(&self) -> Result<ExtensionalSet<T>, SetError> {
        self.materialize_with(&Limits::default(), &Classifier::new())
    }

    // -------------------- Constructions -------------------- //

    /// Set specification {x ∈ A | pred(x)}. This is always lazy.
    #[must_use]
    fn select<P: Fn(&T) -> bool + Send + Sync + 'static>(&self, pred: P) -> Set<T> {
        self.as_set().refine(Predicate::new(pred))
    }

    /// Union A ∪ B.
    #[must_use]
    fn union<S: SetTrait<T>>(&self, other: &S) -> Set<T> {
        Dispatcher::new(&Classifier::new()).union(&self.as_set(), &other.as_set())
    }

    /// Intersection A ∩ B.
    #[must_use]
    fn inter<S: SetTrait<T>>(&self, other: &S) -> Set<T> {
        Dispatcher::new(&Classifier::new()).inter(&self.as_set(), &other.as_set())
    }

    /// Difference A \ B.
    #[must_use]
    fn diff<S: SetTrait<T>>(&self, other: &S) -> Set<T> {
        Dispatcher::new(&Classifier::new()).diff(&self.as_set(), &other.as_set())
    }

    /// Symmetric difference (A \ B) ∪ (B \ A).
    #[must_use]
    fn sym_diff<S: SetTrait<T>>(&self, other: &S) -> Set<T> {
        let classifier = Classifier::new();
        let dispatcher = Dispatcher::new(&classifier);
        let (a, b) = (self.as_set(), other.as_set());
        dispatcher.union(&dispatcher.diff(&a, &b), &dispatcher.diff(&b, &a))
    }

    /// Cartesian product A × B.
    #[must_use]
    fn prod<U: Element, S: SetTrait<U>>(&self, other: &S) -> Set<OrderedPair<T, U>> {
        Dispatcher::new(&Classifier::new()).prod(&self.as_set(), &other.as_set())
    }

    /// Powerset P(A), under the given limits.
    ///
    /// Only sets that can be materialized have a powerset, and it fails with
    /// [`SetError::CapacityExceeded`] if it would have more than
    /// [`max_subsets`](Limits::max_subsets) elements.
    fn powerset_with(&self, limits: &Limits) -> Result<ExtensionalSet<ExtensionalSet<T>>, SetError> {
        self.materialize_with(limits, &Classifier::new())?
            .eager_powerset(limits)
    }

    /// Powerset P(A), under the default limits.
    fn powerset(&self) -> Result<ExtensionalSet<ExtensionalSet<T>>, SetError> {
        self.powerset_with(&Limits::default())
    }

    // -------------------- Relations -------------------- //

    /// Whether the set is empty.
    ///
    /// Fails with [`SetError::NonFiniteMaterialization`] for a set of unknown cardinality, without
    /// enumerating anything, since deciding it could require an endless search.
    fn is_empty(&self) -> Result<bool, SetError> {
        match self.card() {
            Cardinality::Finite(n) => Ok(n == 0),
            Cardinality::CountablyInfinite | Cardinality::Uncountable => Ok(false),
            Cardinality::Unknown => Err(SetError::NonFiniteMaterialization(Cardinality::Unknown)),
        }
    }

    /// Subset relation ⊆. The left operand must be materializable.
    fn subset<S: SetTrait<T>>(&self, other: &S) -> Result<bool, SetError> {
        Ok(self.materialize()?.iter().all(|x| other.contains(x)))
    }

    /// Extensional equality: both sets have exactly the same members.
    ///
    /// This never compares representations. Both sets must be materializable, unless they're the
    /// same intensional set.
    fn set_eq<S: SetTrait<T>>(&self, other: &S) -> Result<bool, SetError> {
        if let (Set::Intensional(a), Set::Intensional(b)) = (self.as_set(), other.as_set()) {
            if a.id() == b.id() {
                return Ok(true);
            }
        }

        Ok(self.materialize()? == other.materialize()?)
    }
}
