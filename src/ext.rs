//! Finite, materialized sets [`ExtensionalSet`].

use crate::iter::Subsets;
use crate::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::BuildHasherDefault;

/// Deterministic hasher, so that the hash of a set doesn't depend on the process.
type ElementHasher = BuildHasherDefault<DefaultHasher>;

/// Hashes a single element.
fn hash_one<T: Hash>(x: &T) -> u64 {
    std::hash::BuildHasher::hash_one(&ElementHasher::default(), x)
}

/// The storage for an [`ExtensionalSet`].
#[derive(Clone)]
struct Inner<T> {
    /// Distinct elements, in insertion order.
    items: Vec<T>,
    /// Maps an element hash to the positions in `items` holding elements with that hash.
    index: HashMap<u64, SmallVec<usize>>,
}

impl<T> Default for Inner<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Element> Inner<T> {
    /// Position of an element, if present.
    fn position(&self, x: &T) -> Option<usize> {
        self.index
            .get(&hash_one(x))?
            .iter()
            .copied()
            .find(|&i| &self.items[i] == x)
    }

    /// Adds an element if not already present. Returns whether it was added.
    fn push(&mut self, x: T) -> bool {
        let bucket = self.index.entry(hash_one(&x)).or_default();
        if bucket.iter().any(|&i| self.items[i] == x) {
            return false;
        }

        bucket.push(self.items.len());
        self.items.push(x);
        true
    }
}

/// A finite set, given by an explicit enumeration of its members.
///
/// Elements are stored once each, with a hash index for membership in constant expected time.
/// Equality and hashing are by membership only, and never depend on iteration order.
///
/// The set is immutable: building a new set never changes the old one. Clones are cheap and share
/// storage.
#[derive(Clone)]
pub struct ExtensionalSet<T> {
    /// Shared element storage.
    inner: Arc<Inner<T>>,
}

impl<T> Default for ExtensionalSet<T> {
    fn default() -> Self {
        Self {
            inner: Arc::default(),
        }
    }
}

impl<T: Element> FromIterator<T> for ExtensionalSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut inner = Inner::default();
        for x in iter {
            inner.push(x);
        }

        Self {
            inner: Arc::new(inner),
        }
    }
}

impl<T: Element> PartialEq for ExtensionalSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|x| other.contains(x))
    }
}

impl<T: Element> Eq for ExtensionalSet<T> {}

/// Combines the element hashes commutatively, so that equal sets hash equally.
impl<T: Element> Hash for ExtensionalSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self
            .iter()
            .map(hash_one)
            .fold(0_u64, u64::wrapping_add);
        state.write_usize(self.len());
        state.write_u64(sum);
    }
}

impl<T: Debug> Debug for ExtensionalSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_set().entries(&self.inner.items).finish()
    }
}

/// Displays the set in roster notation.
impl<T: Display> Display for ExtensionalSet<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("{")?;
        for (i, x) in self.inner.items.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("}")
    }
}

/// An owning iterator over an [`ExtensionalSet`].
///
/// This shares storage with the set, cloning each element as it's returned.
pub struct IntoIter<T> {
    /// The set being iterated.
    inner: Arc<Inner<T>>,
    /// Position of the next element.
    pos: usize,
}

impl<T: Clone> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let next = self.inner.items.get(self.pos)?.clone();
        self.pos += 1;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.items.len() - self.pos;
        (len, Some(len))
    }
}

impl<T: Clone> IntoIterator for ExtensionalSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.inner,
            pos: 0,
        }
    }
}

impl<'a, T> IntoIterator for &'a ExtensionalSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.items.iter()
    }
}

impl<T: Element> ExtensionalSet<T> {
    /// Empty set Ø.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Singleton set {x}.
    #[must_use]
    pub fn singleton(x: T) -> Self {
        Self::from_iter([x])
    }

    /// Set pair {x, y}.
    #[must_use]
    pub fn pair(x: T, y: T) -> Self {
        Self::from_iter([x, y])
    }

    /// Set insertion A ∪ {x}. The original set is left untouched.
    #[must_use]
    pub fn insert(&self, x: T) -> Self {
        if self.contains(&x) {
            return self.clone();
        }

        let mut inner = Arc::clone(&self.inner);
        Arc::make_mut(&mut inner).push(x);
        Self { inner }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.items.len()
    }

    /// Whether the set is empty.
    ///
    /// Unlike [`SetTrait::is_empty`], this can never fail.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.items.is_empty()
    }

    /// Iterate over the elements of the set.
    pub fn iter(&self) -> std::slice::Iter<T> {
        self.inner.items.iter()
    }

    /// The elements of the set as a slice, in no particular order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.inner.items
    }

    /// Keeps the elements satisfying a predicate.
    #[must_use]
    pub fn filter<P: FnMut(&T) -> bool>(&self, mut pred: P) -> Self {
        self.iter().filter(|x| pred(x)).cloned().collect()
    }

    // -------------------- Eager algebra -------------------- //

    /// Union, in time O(|A| + |B|).
    pub(crate) fn eager_union(&self, other: &Self) -> Self {
        let (big, small) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        let mut inner = Arc::clone(&big.inner);
        for x in small {
            if !big.contains(x) {
                Arc::make_mut(&mut inner).push(x.clone());
            }
        }
        Self { inner }
    }

    /// Intersection, in time O(min(|A|, |B|)).
    pub(crate) fn eager_inter(&self, other: &Self) -> Self {
        let (big, small) = if self.len() >= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.filter(|x| big.contains(x))
    }

    /// Difference, in time O(|A|).
    pub(crate) fn eager_diff(&self, other: &Self) -> Self {
        self.filter(|x| !other.contains(x))
    }

    /// Cartesian product, in time O(|A|·|B|).
    pub(crate) fn eager_prod<U: Element>(
        &self,
        other: &ExtensionalSet<U>,
    ) -> ExtensionalSet<OrderedPair<T, U>> {
        self.iter()
            .flat_map(|x| other.iter().map(|y| OrderedPair::new(x.clone(), y.clone())))
            .collect()
    }

    /// Powerset, in time O(2^|A|). Fails if there are too many subsets.
    pub(crate) fn eager_powerset(
        &self,
        limits: &Limits,
    ) -> Result<ExtensionalSet<Self>, SetError> {
        let cap = limits.max_subsets;
        let count = u32::try_from(self.len())
            .ok()
            .and_then(|n| 1_usize.checked_shl(n))
            .filter(|&count| count <= cap)
            .ok_or(SetError::CapacityExceeded {
                what: "powerset",
                cap,
            })?;

        debug!("building powerset with {count} subsets");
        Ok(Subsets::new(self.inner.items.clone()).collect())
    }
}

// -------------------- SetTrait -------------------- //

impl<T> Seal for ExtensionalSet<T> {}

impl<T: Element> SetTrait<T> for ExtensionalSet<T> {
    fn contains(&self, x: &T) -> bool {
        self.inner.position(x).is_some()
    }

    fn card_with(&self, _: &Classifier) -> Cardinality {
        Cardinality::Finite(self.len())
    }

    fn elements(&self) -> Result<Elements<T>, SetError> {
        Ok(Elements::new(self.clone().into_iter()))
    }

    fn materialize_with(&self, _: &Limits, _: &Classifier) -> Result<Self, SetError> {
        Ok(self.clone())
    }
}
