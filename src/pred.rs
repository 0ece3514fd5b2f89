//! Symbolic membership [`Predicate`]s for intensional sets.

use crate::prelude::*;
use std::ops::{BitAnd, BitOr, Not};

/// A shared predicate closure.
pub type PredFn<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A membership predicate, kept as a tree so that combinations stay inspectable.
///
/// The boolean operators fold constants as they build, so a predicate that selects everything or
/// nothing is always recognized as [`All`](Self::All) or [`Nothing`](Self::Nothing).
///
/// ## Purity
///
/// Every closure must be pure: evaluating it twice on the same input must give the same answer,
/// and it must not depend on any external state. The engine evaluates predicates any number of
/// times, in any order, from any thread. An impure predicate is not detected, and makes every
/// result built on it unspecified.
#[derive(Clone)]
pub enum Predicate<T> {
    /// Selects every element.
    All,
    /// Selects no element.
    Nothing,
    /// An opaque closure.
    Fn(PredFn<T>),
    /// Selects the members of a set.
    Member(Arc<Set<T>>),
    /// Negation ¬p.
    Not(Arc<Predicate<T>>),
    /// Conjunction p ∧ q.
    And(Arc<Predicate<T>>, Arc<Predicate<T>>),
    /// Disjunction p ∨ q.
    Or(Arc<Predicate<T>>, Arc<Predicate<T>>),
}

impl<T: Debug> Debug for Predicate<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::All => f.write_str("⊤"),
            Self::Nothing => f.write_str("⊥"),
            Self::Fn(_) => f.write_str("<fn>"),
            Self::Member(set) => write!(f, "∈ {set:?}"),
            Self::Not(p) => write!(f, "¬({p:?})"),
            Self::And(p, q) => write!(f, "({p:?} ∧ {q:?})"),
            Self::Or(p, q) => write!(f, "({p:?} ∨ {q:?})"),
        }
    }
}

impl<T: Element> Predicate<T> {
    /// Wraps a closure.
    pub fn new<P: Fn(&T) -> bool + Send + Sync + 'static>(pred: P) -> Self {
        Self::Fn(Arc::new(pred))
    }

    /// The predicate selecting every element.
    #[must_use]
    pub const fn all() -> Self {
        Self::All
    }

    /// The predicate selecting no element.
    #[must_use]
    pub const fn nothing() -> Self {
        Self::Nothing
    }

    /// The predicate selecting the members of a set.
    #[must_use]
    pub fn member(set: Set<T>) -> Self {
        Self::Member(Arc::new(set))
    }

    /// Whether this is recognized as selecting every element.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether this is recognized as selecting no element.
    #[must_use]
    pub const fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }

    /// Evaluates the predicate.
    pub fn eval(&self, x: &T) -> bool {
        match self {
            Self::All => true,
            Self::Nothing => false,
            Self::Fn(pred) => pred(x),
            Self::Member(set) => set.contains(x),
            Self::Not(p) => !p.eval(x),
            Self::And(p, q) => p.eval(x) && q.eval(x),
            Self::Or(p, q) => p.eval(x) || q.eval(x),
        }
    }

    /// The sets this predicate requires membership in, i.e. the [`Member`](Self::Member) conjuncts.
    ///
    /// Any such set contains every element selected by the predicate.
    #[must_use]
    pub(crate) fn witnesses(&self) -> SmallVec<&Set<T>> {
        let mut witnesses = SmallVec::new();
        let mut stack = vec![self];
        while let Some(pred) = stack.pop() {
            match pred {
                Self::Member(set) => witnesses.push(set.as_ref()),
                Self::And(p, q) => {
                    stack.push(q);
                    stack.push(p);
                }
                _ => {}
            }
        }
        witnesses
    }

    /// If the predicate is exactly ¬(x ∈ S), returns S.
    #[must_use]
    pub fn excluded(&self) -> Option<&Set<T>> {
        match self {
            Self::Not(p) => match p.as_ref() {
                Self::Member(set) => Some(set.as_ref()),
                _ => None,
            },
            _ => None,
        }
    }
}

impl<T: Clone> Not for Predicate<T> {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::All => Self::Nothing,
            Self::Nothing => Self::All,
            Self::Not(p) => Arc::unwrap_or_clone(p),
            p => Self::Not(Arc::new(p)),
        }
    }
}

impl<T> BitAnd for Predicate<T> {
    type Output = Self;

    fn bitand(self, other: Self) -> Self {
        match (self, other) {
            (Self::Nothing, _) | (_, Self::Nothing) => Self::Nothing,
            (Self::All, p) | (p, Self::All) => p,
            (p, q) => Self::And(Arc::new(p), Arc::new(q)),
        }
    }
}

impl<T> BitOr for Predicate<T> {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        match (self, other) {
            (Self::All, _) | (_, Self::All) => Self::All,
            (Self::Nothing, p) | (p, Self::Nothing) => p,
            (p, q) => Self::Or(Arc::new(p), Arc::new(q)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even() -> Predicate<u32> {
        Predicate::new(|x: &u32| x % 2 == 0)
    }

    #[test]
    fn fold() {
        assert!((Predicate::<u32>::all() & Predicate::all()).is_all());
        assert!((even() & Predicate::nothing()).is_nothing());
        assert!((even() | Predicate::all()).is_all());
        assert!((!Predicate::<u32>::all()).is_nothing());
        assert!((!Predicate::<u32>::nothing()).is_all());
        assert!(matches!(even() & Predicate::all(), Predicate::Fn(_)));
        assert!(matches!(!!even(), Predicate::Fn(_)));
    }

    #[test]
    fn eval() {
        let small = Predicate::member(ext![1, 2, 3, 4].into());
        let pred = (even() & small.clone()) | !Predicate::new(|x: &u32| *x < 10);

        assert!(pred.eval(&2));
        assert!(pred.eval(&4));
        assert!(!pred.eval(&6));
        assert!(!pred.eval(&3));
        assert!(pred.eval(&11));
        assert!(!small.eval(&5));
    }

    #[test]
    fn witnesses() {
        let a = Predicate::member(ext![1].into());
        let b = Predicate::member(ext![2].into());
        assert_eq!((a.clone() & even() & b.clone()).witnesses().len(), 2);
        assert!((a | b).witnesses().is_empty());
    }

    #[test]
    fn excluded() {
        let pred = !Predicate::member(ext![1_u32].into());
        assert!(pred.excluded().is_some());
        assert!(even().excluded().is_none());
    }
}
