//! Primitive, possibly infinite domains [`Universe`].

use crate::prelude::*;
use crate::pred::PredFn;

/// A restartable source of elements. Every call starts a fresh enumeration.
pub type Generator<T> = Arc<dyn Fn() -> Elements<T> + Send + Sync>;

/// Computes the class of a universe whose size depends on other sets.
pub(crate) type Sizer = Arc<dyn Fn(&Classifier) -> Cardinality + Send + Sync>;

/// How a universe knows its size.
#[derive(Clone)]
enum Size {
    /// A fixed class, given at construction.
    Declared(Cardinality),
    /// A class derived on demand, with finiteness known up front.
    Derived {
        /// Whether the universe is known to be finite.
        bounded: bool,
        /// Computes the class.
        sizer: Sizer,
    },
}

/// A named domain with a declared cardinality, a membership test, and possibly an enumeration.
///
/// Universes are where infinite sets come from: [`Set::universe`] turns one into an intensional set
/// selecting every member, which can then be refined and combined like any other set.
///
/// ## Invariants
///
/// The generator, if any, yields every member of the universe exactly once. A finite universe
/// always has a generator, and an uncountable universe never does. These are checked when the
/// universe is built, as far as is possible.
#[derive(Clone)]
pub struct Universe<T> {
    /// Name for display purposes.
    name: Arc<str>,
    /// Declared or derived cardinality.
    size: Size,
    /// Membership test.
    contains: PredFn<T>,
    /// Enumeration of the members, if one exists.
    generator: Option<Generator<T>>,
}

impl<T> Debug for Universe<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut f = f.debug_struct("Universe");
        f.field("name", &self.name);
        match &self.size {
            Size::Declared(card) => f.field("card", card),
            Size::Derived { bounded, .. } => f.field("bounded", bounded),
        };
        f.field("enumerable", &self.generator.is_some()).finish()
    }
}

/// Boxes a generator closure.
fn generator<T, G, I>(gen: G) -> Generator<T>
where
    G: Fn() -> I + Send + Sync + 'static,
    I: Iterator<Item = T> + Send + 'static,
{
    Arc::new(move || Elements::new(gen()))
}

impl<T: Element> Universe<T> {
    /// Builds a universe without validating it.
    pub(crate) fn from_parts(
        name: impl Into<Arc<str>>,
        card: Cardinality,
        contains: PredFn<T>,
        generator: Option<Generator<T>>,
    ) -> Self {
        Self {
            name: name.into(),
            size: Size::Declared(card),
            contains,
            generator,
        }
    }

    /// Builds a universe whose class is only computed when asked for.
    ///
    /// `bounded` must hold exactly when the computed class is finite.
    pub(crate) fn derived(
        name: impl Into<Arc<str>>,
        bounded: bool,
        sizer: Sizer,
        contains: PredFn<T>,
        generator: Option<Generator<T>>,
    ) -> Self {
        Self {
            name: name.into(),
            size: Size::Derived { bounded, sizer },
            contains,
            generator,
        }
    }

    /// Builds a universe from all its parts, checking that they're consistent.
    ///
    /// Fails with [`SetError::InvalidConstruction`] if an uncountable universe is given a
    /// generator, or if a finite universe of size `n` is not given a generator yielding exactly
    /// `n` distinct members.
    pub fn new(
        name: impl Into<Arc<str>>,
        card: Cardinality,
        contains: PredFn<T>,
        generator: Option<Generator<T>>,
    ) -> Result<Self, SetError> {
        let universe = Self::from_parts(name, card, contains, generator);
        universe.validate()?;
        Ok(universe)
    }

    /// Checks the declared cardinality against the generator.
    fn validate(&self) -> Result<(), SetError> {
        let invalid = |msg: String| Err(SetError::InvalidConstruction(msg));
        let Size::Declared(card) = self.size else {
            return Ok(());
        };

        match (card, &self.generator) {
            (Cardinality::Uncountable, Some(_)) => {
                invalid(format!("uncountable universe {} cannot be enumerated", self.name))
            }
            (Cardinality::Finite(_), None) => {
                invalid(format!("finite universe {} has no enumeration", self.name))
            }
            (Cardinality::Finite(n), Some(gen)) => {
                // Never pull more than one element past the declared bound.
                let mut seen = HashSet::new();
                for x in gen().take(n.saturating_add(1)) {
                    if !(self.contains)(&x) {
                        return invalid(format!("{x:?} is enumerated but not a member of {}", self.name));
                    }
                    if !seen.insert(x) {
                        return invalid(format!("universe {} enumerates a member twice", self.name));
                    }
                }

                if seen.len() == n {
                    Ok(())
                } else if seen.len() > n {
                    invalid(format!("universe {} has more than its declared {n} members", self.name))
                } else {
                    invalid(format!(
                        "universe {} has {} members, not the declared {n}",
                        self.name,
                        seen.len()
                    ))
                }
            }
            _ => Ok(()),
        }
    }

    /// A countably infinite universe with the given enumeration.
    pub fn countable<P, G, I>(name: impl Into<Arc<str>>, contains: P, gen: G) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        G: Fn() -> I + Send + Sync + 'static,
        I: Iterator<Item = T> + Send + 'static,
    {
        Self::from_parts(
            name,
            Cardinality::CountablyInfinite,
            Arc::new(contains),
            Some(generator(gen)),
        )
    }

    /// An uncountable universe. It can be tested for membership, but never enumerated.
    pub fn uncountable<P>(name: impl Into<Arc<str>>, contains: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::from_parts(name, Cardinality::Uncountable, Arc::new(contains), None)
    }

    /// A universe of unknown size with no enumeration.
    pub fn opaque<P>(name: impl Into<Arc<str>>, contains: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::from_parts(name, Cardinality::Unknown, Arc::new(contains), None)
    }

    /// A finite universe with `n` members, checked against its enumeration.
    pub fn finite<P, G, I>(
        name: impl Into<Arc<str>>,
        n: usize,
        contains: P,
        gen: G,
    ) -> Result<Self, SetError>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
        G: Fn() -> I + Send + Sync + 'static,
        I: Iterator<Item = T> + Send + 'static,
    {
        Self::new(
            name,
            Cardinality::Finite(n),
            Arc::new(contains),
            Some(generator(gen)),
        )
    }

    /// The name of the universe.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The cardinality, computing it within the given classifier if it isn't declared.
    #[must_use]
    pub fn card_with(&self, classifier: &Classifier) -> Cardinality {
        match &self.size {
            Size::Declared(card) => *card,
            Size::Derived { sizer, .. } => sizer(classifier),
        }
    }

    /// The cardinality.
    #[must_use]
    pub fn card(&self) -> Cardinality {
        self.card_with(&Classifier::new())
    }

    /// The cardinality, if it was declared rather than derived.
    #[must_use]
    pub const fn declared(&self) -> Option<Cardinality> {
        match &self.size {
            Size::Declared(card) => Some(*card),
            Size::Derived { .. } => None,
        }
    }

    /// Whether the universe is known to be finite. This never enumerates anything.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        match &self.size {
            Size::Declared(card) => card.is_finite(),
            Size::Derived { bounded, .. } => *bounded,
        }
    }

    /// Membership test.
    pub fn contains(&self, x: &T) -> bool {
        (self.contains)(x)
    }

    /// Whether the universe can be enumerated.
    #[must_use]
    pub const fn is_enumerable(&self) -> bool {
        self.generator.is_some()
    }

    /// Starts a fresh enumeration of the universe.
    pub fn elements(&self) -> Result<Elements<T>, SetError> {
        self.generator
            .as_ref()
            .map(|gen| gen())
            .ok_or(SetError::NotEnumerable)
    }
}

impl Universe<u64> {
    /// The natural numbers ℕ = {0, 1, 2, …}.
    #[must_use]
    pub fn naturals() -> Self {
        Self::countable("ℕ", |_| true, || 0..)
    }
}

impl Universe<i64> {
    /// The integers ℤ, enumerated as 0, 1, −1, 2, −2, …
    #[must_use]
    pub fn integers() -> Self {
        Self::countable("ℤ", |_| true, || {
            std::iter::once(0).chain((1..).flat_map(|n: i64| [n, -n]))
        })
    }
}
