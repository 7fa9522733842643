//! Sequences known to hold at least one value.
//!
//! [`Seq::as_non_empty`] checks a sequence once, by pulling its first value,
//! and hands back a [`NonEmptySeq`] over the same history. Reductions on it
//! return the value itself rather than an `Option`.
//!
//! ```rust
//! use recall::prelude::*;
//!
//! let readings = seq![12, 7, 30];
//! let readings = readings.as_non_empty().unwrap();
//! assert_eq!(readings.max(), Ok(30));
//!
//! let none: Seq<i32> = seq![];
//! assert!(none.as_non_empty().unwrap_err().is_empty());
//! ```

use std::convert::Infallible;

use crate::{NonEmptyError, Seq, build::from_iter};

/// A [`Seq`] whose first value is already known to exist.
#[derive(Debug)]
pub struct NonEmptySeq<T, E = Infallible> {
    seq: Seq<T, E>,
}

impl<T: Clone, E> Seq<T, E> {
    /// Check that this sequence yields at least one value.
    ///
    /// Pulls at most one value, which is recorded as usual. Fails with
    /// [`NonEmptyError::Empty`] if the producer ends right away and with
    /// [`NonEmptyError::Producer`] if it fails; a failed check may be retried.
    pub fn as_non_empty(&self) -> Result<NonEmptySeq<T, E>, NonEmptyError<E>> {
        match self.first() {
            Ok(Some(_)) => Ok(NonEmptySeq { seq: self.replay() }),
            Ok(None) => Err(NonEmptyError::Empty),
            Err(e) => Err(NonEmptyError::Producer(e)),
        }
    }
}

impl<T: 'static> NonEmptySeq<T> {
    /// Build from a first value and any number of further values.
    pub fn of(first: T, rest: Vec<T>) -> Self {
        Self {
            seq: Seq::new(from_iter(std::iter::once(first).chain(rest))),
        }
    }
}

impl<T, E> NonEmptySeq<T, E> {
    pub fn as_seq(&self) -> &Seq<T, E> {
        &self.seq
    }

    pub fn into_seq(self) -> Seq<T, E> {
        self.seq
    }

    /// Fork a cursor over the same values, from the start.
    pub fn replay(&self) -> Self {
        Self {
            seq: self.seq.replay(),
        }
    }
}

impl<T: Clone, E> NonEmptySeq<T, E> {
    pub fn first(&self) -> Result<T, E> {
        self.seq.first().map(present)
    }

    pub fn last(&self) -> Result<T, E> {
        self.seq.last().map(present)
    }

    pub fn reduce<F>(&self, f: F) -> Result<T, E>
    where
        F: FnMut(T, T) -> T,
    {
        self.seq.reduce(f).map(present)
    }

    pub fn max(&self) -> Result<T, E>
    where
        T: Ord,
    {
        self.seq.max().map(present)
    }

    pub fn min(&self) -> Result<T, E>
    where
        T: Ord,
    {
        self.seq.min().map(present)
    }

    /// The first value and a sequence of everything after it.
    pub fn split_first(&self) -> Result<(T, Seq<T, E>), E> {
        let mut cursor = self.seq.replay();
        let first = present(cursor.step()?);
        Ok((first, cursor.rest()))
    }
}

impl<T: Clone + 'static, E: 'static> NonEmptySeq<T, E> {
    /// Transform every value; a mapped non-empty sequence stays non-empty.
    pub fn map<U, F>(&self, f: F) -> NonEmptySeq<U, E>
    where
        U: 'static,
        F: FnMut(T) -> U + 'static,
    {
        NonEmptySeq {
            seq: self.seq.map(f),
        }
    }
}

impl<T, E> From<NonEmptySeq<T, E>> for Seq<T, E> {
    fn from(non_empty: NonEmptySeq<T, E>) -> Self {
        non_empty.seq
    }
}

// index 0 of a checked sequence is recorded, so every drain sees it
fn present<T>(value: Option<T>) -> T {
    match value {
        Some(value) => value,
        None => panic!("non-empty sequence yielded no values"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{from_fn, try_from_iter};
    use crate::seq;
    use std::{cell::Cell, rc::Rc};

    #[test]
    fn test_guard_on_empty() {
        let empty: Seq<u8> = seq![];
        match empty.as_non_empty() {
            Err(err) => {
                assert_eq!(err, NonEmptyError::Empty);
                assert_eq!(err.to_string(), "sequence was unexpectedly empty");
            }
            Ok(_) => panic!("empty sequence passed the guard"),
        }
    }

    #[test]
    fn test_guard_pulls_only_first_value() {
        let pulls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulls);
        let naturals = Seq::new(from_fn(move || {
            counter.set(counter.get() + 1);
            Ok::<_, Infallible>(Some(counter.get()))
        }));
        let checked = naturals.as_non_empty().ok();
        assert!(checked.is_some());
        assert_eq!(pulls.get(), 1);
    }

    #[test]
    fn test_checked_sequence_replays_everything() {
        let seq = seq![5, 1, 9];
        let Ok(checked) = seq.as_non_empty() else {
            panic!("guard rejected a non-empty sequence");
        };
        assert_eq!(checked.first(), Ok(5));
        assert_eq!(checked.as_seq().to_vec(), Ok(vec![5, 1, 9]));
        assert_eq!(checked.last(), Ok(9));
        assert_eq!(checked.min(), Ok(1));
        assert_eq!(checked.reduce(|a, b| a * b), Ok(45));
    }

    #[test]
    fn test_guard_on_rest_starts_at_fork_point() {
        let seq = seq![1, 2];
        let mut cursor = seq.replay();
        cursor.step().ok();
        let tail = cursor.rest().as_non_empty().ok();
        assert_eq!(tail.map(|t| t.first()), Some(Ok(2)));

        cursor.step().ok();
        assert!(cursor.rest().as_non_empty().is_err());
    }

    #[test]
    fn test_guard_reports_producer_failure_and_can_retry() {
        let seq = Seq::new(try_from_iter(vec![Err("warming up"), Ok(1)]));
        assert_eq!(
            seq.as_non_empty().err(),
            Some(NonEmptyError::Producer("warming up"))
        );
        let checked = seq.as_non_empty().ok();
        assert_eq!(checked.map(|c| c.first()), Some(Ok(1)));
    }

    #[test]
    fn test_of_and_map() {
        let single = NonEmptySeq::of("only", vec![]);
        assert_eq!(single.first(), Ok("only"));
        assert_eq!(single.last(), Ok("only"));

        let lengths = NonEmptySeq::of("abc", vec!["de", "f"]).map(str::len);
        assert_eq!(lengths.max(), Ok(3));
        assert_eq!(lengths.into_seq().to_vec(), Ok(vec![3, 2, 1]));
    }

    #[test]
    fn test_split_first() {
        let words = NonEmptySeq::of('a', vec!['b', 'c']);
        let Ok((head, tail)) = words.split_first();
        assert_eq!(head, 'a');
        assert_eq!(tail.to_vec(), Ok(vec!['b', 'c']));
        assert_eq!(tail.replay().to_vec(), Ok(vec!['b', 'c']));
        assert_eq!(words.replay().first(), Ok('a'));
    }
}
