//! Lazy sequences over sets, and the iterator adaptors used to build them.
//!
//! Every iterator here is pull-based: it advances its sources exactly as far as needed to produce
//! the next element, and never buffers ahead.

use crate::prelude::*;
use std::collections::VecDeque;

/// A lazy, forward-only sequence over the elements of a set.
///
/// The sequence owns everything it needs, so it outlives the set it came from. It may well be
/// infinite.
pub struct Elements<T>(Box<dyn Iterator<Item = T> + Send>);

impl<T> Elements<T> {
    /// Wraps an iterator.
    pub fn new<I: Iterator<Item = T> + Send + 'static>(iter: I) -> Self {
        Self(Box::new(iter))
    }
}

impl<T: 'static> Elements<T> {
    /// The empty sequence.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }
}

impl<T> Iterator for Elements<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> Debug for Elements<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Elements").finish_non_exhaustive()
    }
}

/// Round-robin over multiple iterators, getting all the elements from each.
///
/// Each iterator is dropped once it runs out. An infinite iterator never starves the others.
pub struct Interleave<I: Iterator> {
    /// The iterators yet to run out, in the order they'll be pulled from.
    iters: VecDeque<I>,
}

impl<I: Iterator> Interleave<I> {
    /// Interleaves a list of iterators.
    pub fn new<J: IntoIterator<Item = I>>(iters: J) -> Self {
        Self {
            iters: iters.into_iter().collect(),
        }
    }
}

impl<I: Iterator> Iterator for Interleave<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        while let Some(mut iter) = self.iters.pop_front() {
            if let Some(next) = iter.next() {
                self.iters.push_back(iter);
                return Some(next);
            }
        }

        None
    }
}

/// Outputs all pairs of elements from two iterators.
///
/// Elements are pulled alternately from each side, and every new element is paired with all the
/// elements previously seen from the other side. This walks the product diagonally, so every pair
/// is reached in finite time even if both iterators are infinite.
pub struct Product<I: Iterator, J: Iterator> {
    /// The first iterator.
    fst: I,
    /// The second iterator.
    snd: J,
    /// Values seen so far from the first iterator.
    fst_seen: Vec<I::Item>,
    /// Values seen so far from the second iterator.
    snd_seen: Vec<J::Item>,
    /// Whether the first iterator has run out.
    fst_done: bool,
    /// Whether the second iterator has run out.
    snd_done: bool,
    /// Whether to pull from the first iterator next.
    fst_turn: bool,
    /// Index pairs found but not yet returned.
    pending: VecDeque<(usize, usize)>,
}

impl<I: Iterator, J: Iterator> Product<I, J> {
    /// Initializes a new iterator over pairs.
    pub fn new(fst: I, snd: J) -> Self {
        Self {
            fst,
            snd,
            fst_seen: Vec::new(),
            snd_seen: Vec::new(),
            fst_done: false,
            snd_done: false,
            fst_turn: true,
            pending: VecDeque::new(),
        }
    }

    /// Whether no more pairs can ever be produced.
    fn exhausted(&self) -> bool {
        (self.fst_done && (self.snd_done || self.fst_seen.is_empty()))
            || (self.snd_done && self.snd_seen.is_empty())
    }
}

impl<I: Iterator, J: Iterator> Iterator for Product<I, J>
where
    I::Item: Clone,
    J::Item: Clone,
{
    type Item = (I::Item, J::Item);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((i, j)) = self.pending.pop_front() {
                return Some((self.fst_seen[i].clone(), self.snd_seen[j].clone()));
            }

            if self.exhausted() {
                return None;
            }

            let pull_fst = !self.fst_done && (self.fst_turn || self.snd_done);
            self.fst_turn = !self.fst_turn;

            if pull_fst {
                match self.fst.next() {
                    Some(value) => {
                        let i = self.fst_seen.len();
                        self.fst_seen.push(value);
                        self.pending.extend((0..self.snd_seen.len()).map(|j| (i, j)));
                    }
                    None => self.fst_done = true,
                }
            } else {
                match self.snd.next() {
                    Some(value) => {
                        let j = self.snd_seen.len();
                        self.snd_seen.push(value);
                        self.pending.extend((0..self.fst_seen.len()).map(|i| (i, j)));
                    }
                    None => self.snd_done = true,
                }
            }
        }
    }
}

/// Outputs every subset of a finite list of distinct elements.
///
/// A bit mask selects the elements of the current subset, and is incremented as a binary counter
/// after each output.
pub struct Subsets<T> {
    /// The elements to choose from.
    items: Vec<T>,
    /// Which elements the next subset contains.
    mask: BitVec,
    /// Whether the mask has overflowed.
    done: bool,
}

impl<T> Subsets<T> {
    /// Initializes an iterator over the subsets of the given distinct elements.
    pub fn new(items: Vec<T>) -> Self {
        let mask = BitVec::repeat(false, items.len());
        Self {
            items,
            mask,
            done: false,
        }
    }
}

impl<T: Element> Iterator for Subsets<T> {
    type Item = ExtensionalSet<T>;

    fn next(&mut self) -> Option<ExtensionalSet<T>> {
        if self.done {
            return None;
        }

        let subset = self.mask.iter_ones().map(|i| self.items[i].clone()).collect();

        // Binary increment: clear the trailing ones, set the first zero.
        match self.mask.first_zero() {
            Some(i) => {
                self.mask[..i].fill(false);
                self.mask.set(i, true);
            }
            None => self.done = true,
        }

        Some(subset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleave() {
        let iter = Interleave::new([vec![1, 2, 3].into_iter(), vec![10].into_iter()]);
        assert_eq!(iter.collect::<Vec<_>>(), [1, 10, 2, 3]);
    }

    #[test]
    fn interleave_infinite() {
        let iter = Interleave::new([Elements::new(0..), Elements::new(100..102)]);
        let prefix: Vec<_> = iter.take(6).collect();
        assert_eq!(prefix, [0, 100, 1, 101, 2, 3]);
    }

    #[test]
    fn product_finite() {
        let pairs: HashSet<_> = Product::new(0..3, 0..2).collect();
        assert_eq!(pairs.len(), 6);
        for i in 0..3 {
            for j in 0..2 {
                assert!(pairs.contains(&(i, j)));
            }
        }
    }

    #[test]
    fn product_empty() {
        assert_eq!(Product::new(0..0, 0..).next(), None);
        assert_eq!(Product::new(0.., 0..0).next(), None);
    }

    #[test]
    fn product_infinite() {
        // Every pair below the diagonal shows up within a bounded prefix.
        let pairs: HashSet<_> = Product::new(0_u32.., 0_u32..).take(400).collect();
        for i in 0..10 {
            for j in 0..10 {
                assert!(pairs.contains(&(i, j)), "missing ({i}, {j})");
            }
        }
    }

    #[test]
    fn subsets() {
        let subsets: Vec<_> = Subsets::new(vec!['a', 'b', 'c']).collect();
        assert_eq!(subsets.len(), 8);
        assert_eq!(subsets[0], ext![]);
        assert_eq!(subsets[7], ext!['a', 'b', 'c']);
        assert_eq!(Subsets::<u8>::new(Vec::new()).count(), 1);
    }
}
