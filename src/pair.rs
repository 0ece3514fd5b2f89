//! Ordered pairs [`OrderedPair`].

use crate::prelude::*;

/// An ordered pair (a, b).
///
/// Two pairs are equal exactly when both components are, so this behaves as the Kuratowski pair
/// {{a}, {a, b}} without ever building it. The explicit encoding is still available through
/// [`kuratowski`](Self::kuratowski).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrderedPair<A, B> {
    /// First component.
    pub fst: A,
    /// Second component.
    pub snd: B,
}

impl<A, B> OrderedPair<A, B> {
    /// Builds the pair (a, b).
    pub const fn new(fst: A, snd: B) -> Self {
        Self { fst, snd }
    }

    /// Splits the pair into its components.
    pub fn into_parts(self) -> (A, B) {
        (self.fst, self.snd)
    }

    /// Swaps the components.
    pub fn swap(self) -> OrderedPair<B, A> {
        OrderedPair::new(self.snd, self.fst)
    }
}

impl<A, B> From<(A, B)> for OrderedPair<A, B> {
    fn from((fst, snd): (A, B)) -> Self {
        Self::new(fst, snd)
    }
}

impl<A: Display, B: Display> Display for OrderedPair<A, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({}, {})", self.fst, self.snd)
    }
}

impl<T: Element> OrderedPair<T, T> {
    /// The Kuratowski encoding {{a}, {a, b}}.
    #[must_use]
    pub fn kuratowski(&self) -> ExtensionalSet<ExtensionalSet<T>> {
        ExtensionalSet::pair(
            ExtensionalSet::singleton(self.fst.clone()),
            ExtensionalSet::pair(self.fst.clone(), self.snd.clone()),
        )
    }

    /// Decodes a Kuratowski pair.
    ///
    /// Fails with [`SetError::InvalidConstruction`] if the set doesn't encode any pair.
    pub fn from_kuratowski(set: &ExtensionalSet<ExtensionalSet<T>>) -> Result<Self, SetError> {
        let invalid = || SetError::InvalidConstruction(format!("{set:?} is not a Kuratowski pair"));

        match set.as_slice() {
            // {{a}} = {{a}, {a, a}}
            [single] => match single.as_slice() {
                [a] => Ok(Self::new(a.clone(), a.clone())),
                _ => Err(invalid()),
            },
            [x, y] => {
                let (single, double) = if x.len() <= y.len() { (x, y) } else { (y, x) };
                match (single.as_slice(), double.as_slice()) {
                    ([a], [b, c]) if a == b => Ok(Self::new(a.clone(), c.clone())),
                    ([a], [b, c]) if a == c => Ok(Self::new(a.clone(), b.clone())),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality() {
        assert_eq!(OrderedPair::new(1, 2), OrderedPair::new(1, 2));
        assert_ne!(OrderedPair::new(1, 2), OrderedPair::new(2, 1));
        assert_eq!(OrderedPair::from((1, 'a')).swap(), OrderedPair::new('a', 1));
        assert_eq!(OrderedPair::new(3, 4).to_string(), "(3, 4)");
    }

    #[test]
    fn kuratowski() {
        let pairs = [(1, 2), (2, 1), (1, 1), (2, 2), (1, 3)].map(|(a, b)| OrderedPair::new(a, b));

        // (a, b) = (c, d) iff {{a}, {a, b}} = {{c}, {c, d}}.
        for p in pairs {
            for q in pairs {
                assert_eq!(p == q, p.kuratowski() == q.kuratowski(), "{p} vs {q}");
            }

            assert_eq!(OrderedPair::from_kuratowski(&p.kuratowski()), Ok(p));
        }

        assert_eq!(OrderedPair::new(5, 5).kuratowski(), ext![ext![5]]);
    }

    #[test]
    fn not_kuratowski() {
        for set in [ext![], ext![ext![1, 2]], ext![ext![1], ext![2, 3]], ext![ext![1], ext![2]]] {
            assert!(matches!(
                OrderedPair::from_kuratowski(&set),
                Err(SetError::InvalidConstruction(_))
            ));
        }
    }
}
