//! General library tests.

#![cfg(test)]

use crate::prelude::*;
use concat_idents::concat_idents;
use gcd::Gcd;

/// Creates analogous tests for extensional and intensional fixtures.
macro_rules! test {
    ($($name: ident),*) => {
        $(
            concat_idents!(fn_name = ext, $name {
                #[test]
                fn fn_name() {
                    Ext::$name();
                }
            });

            concat_idents!(fn_name = int, $name {
                #[test]
                fn fn_name() {
                    Int::$name();
                }
            });
        )*
    };
}

/// Every fixture is a subset of `0..RANGE`.
const RANGE: u32 = 16;

/// The reference contents of a fixture.
fn reference(items: &[u32]) -> HashSet<u32> {
    items.iter().copied().collect()
}

/// The contents of a finite set.
fn contents(set: &Set<u32>) -> HashSet<u32> {
    set.materialize().unwrap().into_iter().collect()
}

/// Checks extensional equality.
fn same(a: &Set<u32>, b: &Set<u32>) -> bool {
    a.set_eq(b).unwrap()
}

/// Fixtures built as extensional sets.
struct Ext;

/// Fixtures built as intensional sets, selected from a shared finite universe.
struct Int;

trait Suite {
    /// The representation of every fixture.
    const REPR: Repr;

    /// A multitude of finite sets for general-purpose testing.
    ///
    /// The list must not contain repeats.
    const SUITE: &'static [&'static [u32]] = &[
        &[],
        &[0],
        &[1, 2, 3],
        &[2, 3, 5, 7, 11, 13],
        &[0, 2, 4, 6, 8, 10, 12, 14],
        &[15, 14, 3],
        &[1, 5, 7, 11, 13],
    ];

    /// The set every fixture is drawn from.
    fn base() -> Set<u32>;

    /// Builds a fixture.
    fn build(base: &Set<u32>, items: &'static [u32]) -> Set<u32>;

    /// Our [`SUITE`](Suite::SUITE) as `(&[u32], Set<u32>)` pairs, sharing a base.
    fn suite() -> Vec<(&'static [u32], Set<u32>)> {
        let base = Self::base();
        Self::SUITE
            .iter()
            .map(|&items| (items, Self::build(&base, items)))
            .collect()
    }

    /// The empty fixture.
    fn empty() -> Set<u32> {
        Self::build(&Self::base(), &[])
    }

    /// Test that our [`SUITE`](Suite::SUITE) is built correctly.
    fn _suite() {
        let suite = Self::suite();
        for (i, (items, set)) in suite.iter().enumerate() {
            assert_eq!(set.kind(), Self::REPR);
            assert_eq!(contents(set), reference(items), "fixture {i}");
            assert_eq!(set.card(), Cardinality::Finite(reference(items).len()));

            for x in 0..RANGE + 2 {
                assert_eq!(set.contains(&x), items.contains(&x), "{x} in fixture {i}");
            }

            for (j, (_, other)) in suite.iter().enumerate() {
                assert_eq!(i == j, same(set, other), "fixtures {i} and {j}");
            }
        }
    }

    /// Test that every operation picks the planned representation.
    fn _plan() {
        for (_, a) in Self::suite() {
            for (_, b) in Self::suite() {
                let plan = |op| Dispatcher::plan(op, Self::REPR, Self::REPR);
                if !a.is_empty().unwrap() && !b.is_empty().unwrap() {
                    assert_eq!(a.union(&b).kind(), plan(Op::Union));
                }
                assert_eq!(a.inter(&b).kind(), plan(Op::Inter));
                assert_eq!(a.diff(&b).kind(), plan(Op::Diff));
                assert_eq!(a.prod(&b).kind(), plan(Op::Prod));
            }
        }
    }

    /// Test [`SetTrait::union`], [`SetTrait::inter`] and [`SetTrait::diff`] against a reference.
    fn _algebra() {
        for (items_1, a) in Self::suite() {
            for (items_2, b) in Self::suite() {
                let (r1, r2) = (reference(items_1), reference(items_2));
                assert_eq!(contents(&a.union(&b)), &r1 | &r2, "{items_1:?} ∪ {items_2:?}");
                assert_eq!(contents(&a.inter(&b)), &r1 & &r2, "{items_1:?} ∩ {items_2:?}");
                assert_eq!(contents(&a.diff(&b)), &r1 - &r2, "{items_1:?} \\ {items_2:?}");
                assert_eq!(contents(&a.sym_diff(&b)), &r1 ^ &r2, "{items_1:?} △ {items_2:?}");
            }
        }
    }

    /// Test the identity laws.
    fn _identity() {
        let empty = Self::empty();
        for (_, a) in Self::suite() {
            assert!(same(&a.union(&empty), &a), "A ∪ Ø = A");
            assert!(same(&empty.union(&a), &a), "Ø ∪ A = A");
            assert!(same(&a.inter(&empty), &empty), "A ∩ Ø = Ø");
            assert!(same(&a.diff(&empty), &a), "A \\ Ø = A");
            assert!(same(&a.diff(&a), &empty), "A \\ A = Ø");
            assert!(same(&empty.diff(&a), &empty), "Ø \\ A = Ø");
            assert!(same(&a.union(&a), &a), "A ∪ A = A");
            assert!(same(&a.inter(&a), &a), "A ∩ A = A");
        }
    }

    /// Test commutativity of union and intersection.
    fn _commutative() {
        for (_, a) in Self::suite() {
            for (_, b) in Self::suite() {
                assert!(same(&a.union(&b), &b.union(&a)));
                assert!(same(&a.inter(&b), &b.inter(&a)));
            }
        }
    }

    /// Test associativity of union and intersection.
    fn _associative() {
        let suite = Self::suite();
        for (_, a) in &suite {
            for (_, b) in &suite {
                for (_, c) in &suite {
                    assert!(same(&a.union(b).union(c), &a.union(&b.union(c))));
                    assert!(same(&a.inter(b).inter(c), &a.inter(&b.inter(c))));
                }
            }
        }
    }

    /// Test De Morgan's laws, relative to a third set.
    fn _de_morgan() {
        let suite = Self::suite();
        for (_, a) in &suite {
            for (_, b) in &suite {
                for (_, c) in &suite {
                    assert!(same(&c.diff(&a.union(b)), &c.diff(a).inter(&c.diff(b))));
                    assert!(same(&c.diff(&a.inter(b)), &c.diff(a).union(&c.diff(b))));
                }
            }
        }
    }

    /// Test [`SetTrait::subset`].
    fn _subset() {
        for (_, a) in Self::suite() {
            for (_, b) in Self::suite() {
                let union = a.union(&b);
                let inter = a.inter(&b);
                assert!(a.subset(&union).unwrap());
                assert!(inter.subset(&a).unwrap());
                assert!(a.diff(&b).subset(&a).unwrap());
                assert_eq!(a.subset(&b).unwrap(), same(&a, &inter));
            }
        }
    }

    /// Test [`SetTrait::prod`].
    fn _prod() {
        for (items_1, a) in Self::suite() {
            for (items_2, b) in Self::suite() {
                let prod = a.prod(&b);
                assert_eq!(prod.card(), Cardinality::Finite(items_1.len() * items_2.len()));
                for &x in items_1 {
                    for &y in items_2 {
                        assert!(prod.contains(&OrderedPair::new(x, y)));
                    }
                }
            }
        }
    }

    /// Test [`SetTrait::powerset`].
    fn _powerset() {
        for (items, a) in Self::suite() {
            let powerset = a.powerset().unwrap();
            assert_eq!(powerset.len(), 1 << items.len());
            for subset in &powerset {
                assert!(subset.subset(&a).unwrap());
            }
            assert!(powerset.contains(&ExtensionalSet::empty()));
            assert!(powerset.contains(&a.materialize().unwrap()));
        }
    }

    /// Test selection by a number-theoretic predicate.
    fn _coprime() {
        let coprime = Self::base().select(|x| x.gcd(6) == 1);
        assert_eq!(contents(&coprime), reference(&[1, 5, 7, 11, 13]));
        assert_eq!(coprime.card(), Cardinality::Finite(5));

        for (items, a) in Self::suite() {
            let expected: HashSet<_> = items.iter().copied().filter(|x| x.gcd(6) == 1).collect();
            assert_eq!(contents(&a.inter(&coprime)), expected);
        }
    }
}

impl Suite for Ext {
    const REPR: Repr = Repr::Extensional;

    fn base() -> Set<u32> {
        (0..RANGE).collect()
    }

    fn build(_: &Set<u32>, items: &'static [u32]) -> Set<u32> {
        items.iter().copied().collect()
    }
}

impl Suite for Int {
    const REPR: Repr = Repr::Intensional;

    fn base() -> Set<u32> {
        let universe = Universe::finite("0..16", RANGE as usize, |x: &u32| *x < RANGE, || 0..RANGE);
        Set::universe(universe.unwrap())
    }

    fn build(base: &Set<u32>, items: &'static [u32]) -> Set<u32> {
        base.select(move |x| items.contains(x))
    }
}

test!(
    _suite,
    _plan,
    _algebra,
    _identity,
    _commutative,
    _associative,
    _de_morgan,
    _subset,
    _prod,
    _powerset,
    _coprime
);
