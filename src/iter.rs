//! Iterator adapters for sequences.
//!
//! [`Seq`] is deliberately not an [`Iterator`] itself: its combinators take
//! `&self` and leave the receiver where it is, while `Iterator` methods would
//! consume it. These adapters bridge the two worlds.
//!
//! # Examples
//!
//! Infallible sequences iterate over plain values:
//! ```rust
//! use recall::prelude::*;
//!
//! let seq = seq![1, 2, 3];
//! let mut total = 0;
//! for n in &seq {
//!     total += n;
//! }
//! assert_eq!(total, 6);
//! // iterating a reference replays, so the sequence is still whole
//! assert_eq!((&seq).into_iter().max(), Some(3));
//! ```
//!
//! Fallible ones iterate over `Result`s:
//! ```rust
//! use recall::prelude::*;
//!
//! let seq = wrap(try_from_iter(vec![Ok(1), Err("bad"), Ok(3)]));
//! let collected: Result<Vec<_>, _> = seq.try_iter().collect();
//! assert_eq!(collected, Err("bad"));
//! ```

use std::{convert::Infallible, iter::FusedIterator};

use crate::Seq;

/// Iterator over an infallible sequence.
///
/// Steps the cursor it owns. [`into_seq`](IntoIter::into_seq) hands the cursor
/// back, so iteration can stop part way and fork the [`rest`](Seq::rest).
pub struct IntoIter<T> {
    cursor: Seq<T>,
}

impl<T> IntoIter<T> {
    /// Give back the cursor, positioned after the last value yielded.
    pub fn into_seq(self) -> Seq<T> {
        self.cursor
    }

    pub fn as_seq(&self) -> &Seq<T> {
        &self.cursor
    }
}

impl<T: Clone> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let Ok(value) = self.cursor.step();
        value
    }
}

impl<T: Clone> FusedIterator for IntoIter<T> {}

/// Steps the primary cursor itself: a sequence consumed this way is
/// single-pass, exactly like the producer it wraps.
impl<T: Clone> IntoIterator for Seq<T, Infallible> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { cursor: self }
    }
}

/// Iterates a fresh replay of the sequence.
impl<T: Clone> IntoIterator for &Seq<T, Infallible> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        self.iter()
    }
}

impl<T: Clone> Seq<T, Infallible> {
    /// Iterate a replay of this sequence.
    pub fn iter(&self) -> IntoIter<T> {
        IntoIter {
            cursor: self.replay(),
        }
    }
}

/// Iterator over a possibly failing sequence, yielding `Result<T, E>`.
///
/// A failure is yielded as `Some(Err(_))` without moving the cursor, so
/// calling `next` again retries the same index. Adapters like `collect` into
/// a `Result` stop at the first failure.
pub struct TryIter<T, E> {
    cursor: Seq<T, E>,
}

impl<T, E> TryIter<T, E> {
    pub fn into_seq(self) -> Seq<T, E> {
        self.cursor
    }
}

impl<T: Clone, E> Iterator for TryIter<T, E> {
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.step().transpose()
    }
}

impl<T: Clone, E> Seq<T, E> {
    /// Iterate a replay of this sequence, surfacing producer failures.
    pub fn try_iter(&self) -> TryIter<T, E> {
        TryIter {
            cursor: self.replay(),
        }
    }
}
