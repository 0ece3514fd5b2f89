//! The binary-operation [`Dispatcher`].
//!
//! Every binary operation picks the representation of its result from the representations of its
//! operands. The rule is to stay eager whenever the result is known to be finite and cheaply
//! computable, and to stay lazy whenever an operand might be infinite.
//!
//! | Operation | Ext, Ext | Ext, Int | Int, Ext | Int, Int |
//! |---|---|---|---|---|
//! | `∪` | Ext | Int | Int | Int |
//! | `∩` | Ext | Ext | Ext | Int |
//! | `\` | Ext | Ext | Int | Int |
//! | `×` | Ext | Int | Int | Int |

use crate::iter::Product;
use crate::prelude::*;
use crate::universe::Generator;

/// A binary set operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Op {
    /// Union A ∪ B.
    #[display(fmt = "∪")]
    Union,
    /// Intersection A ∩ B.
    #[display(fmt = "∩")]
    Inter,
    /// Difference A \ B.
    #[display(fmt = "\\")]
    Diff,
    /// Cartesian product A × B.
    #[display(fmt = "×")]
    Prod,
}

/// The representation of a set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Repr {
    /// An [`ExtensionalSet`].
    #[display(fmt = "extensional")]
    Extensional,
    /// An [`IntensionalSet`].
    #[display(fmt = "intensional")]
    Intensional,
}

/// Carries out binary operations, choosing the representation of each result.
///
/// Operand sizes are compared through the classifier's memoized counts, so that the dispatcher
/// itself never enumerates an operand.
#[derive(Clone, Copy, Debug)]
pub struct Dispatcher<'c> {
    /// Classifier for operand cardinalities.
    classifier: &'c Classifier,
}

impl<'c> Dispatcher<'c> {
    /// Initializes a dispatcher.
    #[must_use]
    pub const fn new(classifier: &'c Classifier) -> Self {
        Self { classifier }
    }

    /// The representation of the result of an operation.
    #[must_use]
    pub const fn plan(op: Op, lhs: Repr, rhs: Repr) -> Repr {
        use Repr::{Extensional as Ext, Intensional as Int};

        match (op, lhs, rhs) {
            (_, Ext, Ext) | (Op::Inter, Ext, Int) | (Op::Inter, Int, Ext) | (Op::Diff, Ext, Int) => {
                Ext
            }
            (Op::Union | Op::Prod, _, _) | (Op::Inter | Op::Diff, Int, _) => Int,
        }
    }

    /// Logs a decision, and checks it against the plan.
    fn decided<U: Element>(op: Op, lhs: Repr, rhs: Repr, result: Set<U>) -> Set<U> {
        let repr = result.kind();
        debug!("{lhs} {op} {rhs} ⇒ {repr}");
        debug_assert_eq!(repr, Self::plan(op, lhs, rhs), "{lhs} {op} {rhs}");
        result
    }

    /// Whether the first set's members are cheaper to find than the second's.
    ///
    /// This never looks at an element: bounded sets come first, then sets with a smaller count
    /// already memoized, or else over a smaller declared domain.
    fn cheaper<T: Element>(&self, a: &IntensionalSet<T>, b: &IntensionalSet<T>) -> bool {
        let size = |set: &IntensionalSet<T>| {
            self.classifier
                .lookup(set.id())
                .map(Cardinality::Finite)
                .or_else(|| set.domain().declared())
                .unwrap_or(Cardinality::Unknown)
        };

        match (a.is_bounded(), b.is_bounded()) {
            (true, false) => true,
            (false, true) => false,
            _ => size(a).sort_cmp(&size(b)).is_lt(),
        }
    }

    /// Union A ∪ B.
    ///
    /// Two intensional sets over the same domain usually have their predicates joined. Otherwise,
    /// the domain of the result is the lazy union of both operands.
    #[must_use]
    pub fn union<T: Element>(&self, lhs: &Set<T>, rhs: &Set<T>) -> Set<T> {
        let result = match (lhs, rhs) {
            (Set::Extensional(a), Set::Extensional(b)) => a.eager_union(b).into(),
            (Set::Extensional(a), b) if a.is_empty() => b.clone(),
            (a, Set::Extensional(b)) if b.is_empty() => a.clone(),
            // A disjunction has no finite witness, so two bounded sets over an unbounded domain
            // keep their own predicates under a union domain instead.
            (Set::Intensional(a), Set::Intensional(b))
                if a.same_domain(b)
                    && (a.domain().is_bounded() || !(a.is_bounded() && b.is_bounded())) =>
            {
                IntensionalSet::with_domain(
                    Arc::clone(a.domain_arc()),
                    a.predicate().clone() | b.predicate().clone(),
                )
                .into()
            }
            (a, b) => IntensionalSet::with_domain(
                Arc::new(Domain::Union(a.clone(), b.clone())),
                Predicate::all(),
            )
            .into(),
        };

        Self::decided(Op::Union, lhs.kind(), rhs.kind(), result)
    }

    /// Intersection A ∩ B.
    ///
    /// An extensional operand is filtered by the other operand. Two intensional sets over the same
    /// domain have their predicates met. Otherwise, the smaller set is refined by membership in
    /// the larger.
    #[must_use]
    pub fn inter<T: Element>(&self, lhs: &Set<T>, rhs: &Set<T>) -> Set<T> {
        let result = match (lhs, rhs) {
            (Set::Extensional(a), Set::Extensional(b)) => a.eager_inter(b).into(),
            (Set::Extensional(a), b @ Set::Intensional(_))
            | (b @ Set::Intensional(_), Set::Extensional(a)) => a.filter(|x| b.contains(x)).into(),
            (Set::Intensional(a), Set::Intensional(b)) if a.same_domain(b) => {
                IntensionalSet::with_domain(
                    Arc::clone(a.domain_arc()),
                    a.predicate().clone() & b.predicate().clone(),
                )
                .into()
            }
            (Set::Intensional(a), Set::Intensional(b)) => {
                let (small, large) = if self.cheaper(b, a) { (b, a) } else { (a, b) };
                small
                    .refine(Predicate::member(large.clone().into()))
                    .into()
            }
        };

        Self::decided(Op::Inter, lhs.kind(), rhs.kind(), result)
    }

    /// Difference A \ B.
    ///
    /// An extensional left operand is filtered eagerly. An intensional one is refined to exclude
    /// the right operand, sharing its domain.
    #[must_use]
    pub fn diff<T: Element>(&self, lhs: &Set<T>, rhs: &Set<T>) -> Set<T> {
        let result = match (lhs, rhs) {
            (Set::Extensional(a), Set::Extensional(b)) => a.eager_diff(b).into(),
            (Set::Extensional(a), b @ Set::Intensional(_)) => a.filter(|x| !b.contains(x)).into(),
            (Set::Intensional(a), Set::Intensional(b)) if a.same_domain(b) => {
                a.refine(!b.predicate().clone()).into()
            }
            (Set::Intensional(a), b) => a.refine(!Predicate::member(b.clone())).into(),
        };

        Self::decided(Op::Diff, lhs.kind(), rhs.kind(), result)
    }

    /// Cartesian product A × B.
    ///
    /// Unless both operands are extensional, the product is the universe of all pairs, enumerated
    /// diagonally when both operands can be enumerated.
    #[must_use]
    pub fn prod<T: Element, U: Element>(
        &self,
        lhs: &Set<T>,
        rhs: &Set<U>,
    ) -> Set<OrderedPair<T, U>> {
        let result = match (lhs, rhs) {
            (Set::Extensional(a), Set::Extensional(b)) => a.eager_prod(b).into(),
            (a, b) => Set::universe(Self::product_universe(a, b)),
        };

        Self::decided(Op::Prod, lhs.kind(), rhs.kind(), result)
    }

    /// The universe of all pairs of elements from two sets.
    ///
    /// Nothing about the operands is enumerated here. The class of the product is only computed
    /// when the product itself is classified.
    fn product_universe<T: Element, U: Element>(
        lhs: &Set<T>,
        rhs: &Set<U>,
    ) -> Universe<OrderedPair<T, U>> {
        let void = lhs.is_void() || rhs.is_void();
        let bounded = void || (lhs.is_bounded() && rhs.is_bounded());

        let (a, b) = (lhs.clone(), rhs.clone());
        let sizer = Arc::new(move |classifier: &Classifier| {
            classifier.classify(&a).product(classifier.classify(&b))
        });

        let (a, b) = (lhs.clone(), rhs.clone());
        let contains = Arc::new(move |pair: &OrderedPair<T, U>| {
            a.contains(&pair.fst) && b.contains(&pair.snd)
        });

        let generator: Option<Generator<_>> = if lhs.is_enumerable() && rhs.is_enumerable() {
            let (a, b) = (lhs.clone(), rhs.clone());
            Some(Arc::new(move || match (a.elements(), b.elements()) {
                (Ok(fst), Ok(snd)) => Elements::new(
                    Product::new(fst, snd).map(|(x, y)| OrderedPair::new(x, y)),
                ),
                // Both sides were checked to be enumerable.
                _ => Elements::empty(),
            }))
        } else if void {
            Some(Arc::new(Elements::empty))
        } else {
            None
        };

        Universe::derived("product", bounded, sizer, contains, generator)
    }
}
