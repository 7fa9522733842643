//! Draining sequences into values.
//!
//! Every method here forks a fresh cursor with [`Seq::replay`] and reads it
//! as far as it needs to, so consuming never moves the receiver and calling
//! the same consumer twice gives the same answer without pulling the producer
//! again. The first producer failure is returned as `Err`; a later call
//! retries from the failed index.

use std::iter::Sum;

use crate::Seq;

impl<T: Clone, E> Seq<T, E> {
    /// Collect every value.
    pub fn to_vec(&self) -> Result<Vec<T>, E> {
        self.try_iter().collect()
    }

    pub fn count(&self) -> Result<usize, E> {
        self.fold(0, |n, _| n + 1)
    }

    /// Combine every value into an accumulator, front to back.
    ///
    /// ```rust
    /// use recall::prelude::*;
    ///
    /// let digits = seq![1, 2, 3];
    /// assert_eq!(digits.fold(0, |n, d| n * 10 + d), Ok(123));
    /// ```
    pub fn fold<A, F>(&self, init: A, mut f: F) -> Result<A, E>
    where
        F: FnMut(A, T) -> A,
    {
        let mut cursor = self.replay();
        let mut acc = init;
        while let Some(value) = cursor.step()? {
            acc = f(acc, value);
        }
        Ok(acc)
    }

    /// Fold using the first value as the initial accumulator.
    ///
    /// `Ok(None)` for an empty sequence; see
    /// [`NonEmptySeq::reduce`](crate::NonEmptySeq::reduce) for the variant
    /// that cannot come up empty.
    pub fn reduce<F>(&self, mut f: F) -> Result<Option<T>, E>
    where
        F: FnMut(T, T) -> T,
    {
        let mut cursor = self.replay();
        let Some(mut acc) = cursor.step()? else {
            return Ok(None);
        };
        while let Some(value) = cursor.step()? {
            acc = f(acc, value);
        }
        Ok(Some(acc))
    }

    pub fn first(&self) -> Result<Option<T>, E> {
        self.replay().step()
    }

    pub fn last(&self) -> Result<Option<T>, E> {
        self.reduce(|_, value| value)
    }

    /// The value at index `n`, counted from this sequence's start.
    pub fn nth(&self, n: usize) -> Result<Option<T>, E> {
        let mut cursor = self.replay();
        for _ in 0..n {
            if cursor.step()?.is_none() {
                return Ok(None);
            }
        }
        cursor.step()
    }

    /// The first value `predicate` accepts. Stops pulling once found.
    pub fn find<F>(&self, mut predicate: F) -> Result<Option<T>, E>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.replay();
        while let Some(value) = cursor.step()? {
            if predicate(&value) {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Index of the first value `predicate` accepts.
    pub fn position<F>(&self, mut predicate: F) -> Result<Option<usize>, E>
    where
        F: FnMut(&T) -> bool,
    {
        let mut cursor = self.replay();
        let mut index = 0;
        while let Some(value) = cursor.step()? {
            if predicate(&value) {
                return Ok(Some(index));
            }
            index += 1;
        }
        Ok(None)
    }

    pub fn any<F>(&self, predicate: F) -> Result<bool, E>
    where
        F: FnMut(&T) -> bool,
    {
        Ok(self.find(predicate)?.is_some())
    }

    /// Whether every value satisfies `predicate`; `Ok(true)` when empty.
    pub fn all<F>(&self, mut predicate: F) -> Result<bool, E>
    where
        F: FnMut(&T) -> bool,
    {
        Ok(self.find(|value| !predicate(value))?.is_none())
    }

    pub fn contains(&self, needle: &T) -> Result<bool, E>
    where
        T: PartialEq,
    {
        self.any(|value| value == needle)
    }

    /// The greatest value; the last one wins among equals.
    pub fn max(&self) -> Result<Option<T>, E>
    where
        T: Ord,
    {
        self.reduce(|best, value| if value >= best { value } else { best })
    }

    /// The least value; the first one wins among equals.
    pub fn min(&self) -> Result<Option<T>, E>
    where
        T: Ord,
    {
        self.reduce(|best, value| if value < best { value } else { best })
    }

    pub fn max_by_key<K, F>(&self, mut key: F) -> Result<Option<T>, E>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let best = self.fold(None, |best: Option<(K, T)>, value| {
            let k = key(&value);
            match best {
                Some((best_key, best)) if best_key > k => Some((best_key, best)),
                _ => Some((k, value)),
            }
        })?;
        Ok(best.map(|(_, value)| value))
    }

    pub fn min_by_key<K, F>(&self, mut key: F) -> Result<Option<T>, E>
    where
        K: Ord,
        F: FnMut(&T) -> K,
    {
        let best = self.fold(None, |best: Option<(K, T)>, value| {
            let k = key(&value);
            match best {
                Some((best_key, best)) if best_key <= k => Some((best_key, best)),
                _ => Some((k, value)),
            }
        })?;
        Ok(best.map(|(_, value)| value))
    }

    /// Add up every value.
    ///
    /// ```rust
    /// use recall::prelude::*;
    ///
    /// let Ok(total) = seq![1, 2, 3, 4].sum::<i32>();
    /// assert_eq!(total, 10);
    /// ```
    pub fn sum<S>(&self) -> Result<S, E>
    where
        S: Sum<T>,
    {
        self.try_iter().sum()
    }

    /// Run `f` on every value.
    pub fn for_each<F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(T),
    {
        let mut cursor = self.replay();
        while let Some(value) = cursor.step()? {
            f(value);
        }
        Ok(())
    }
}
