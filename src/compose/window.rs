//! Stateful transformations that look at more than one value: [`Scan`],
//! [`Windows`] and [`Chunks`].

use std::collections::VecDeque;

use crate::{Producer, Seq};

/// Running accumulation; yields every intermediate accumulator.
pub struct Scan<S, A, F> {
    upstream: S,
    acc: A,
    f: F,
}

impl<S, A, F> Producer for Scan<S, A, F>
where
    S: Producer,
    A: Clone,
    F: FnMut(&A, S::Item) -> A,
{
    type Item = A;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<A>, S::Error> {
        let Some(value) = self.upstream.pull()? else {
            return Ok(None);
        };
        self.acc = (self.f)(&self.acc, value);
        Ok(Some(self.acc.clone()))
    }
}

/// Overlapping windows of a fixed size.
pub struct Windows<S: Producer> {
    upstream: S,
    size: usize,
    window: VecDeque<S::Item>,
}

impl<S> Producer for Windows<S>
where
    S: Producer,
    S::Item: Clone,
{
    type Item = Vec<S::Item>;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<Vec<S::Item>>, S::Error> {
        if self.window.len() == self.size {
            self.window.pop_front();
        }
        while self.window.len() < self.size {
            match self.upstream.pull()? {
                Some(value) => self.window.push_back(value),
                None => return Ok(None),
            }
        }
        Ok(Some(self.window.iter().cloned().collect()))
    }
}

/// Non-overlapping groups of a fixed size; the last group may be shorter.
pub struct Chunks<S: Producer> {
    upstream: S,
    size: usize,
    chunk: Vec<S::Item>,
}

impl<S: Producer> Producer for Chunks<S> {
    type Item = Vec<S::Item>;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<Vec<S::Item>>, S::Error> {
        while self.chunk.len() < self.size {
            match self.upstream.pull()? {
                Some(value) => self.chunk.push(value),
                None => break,
            }
        }
        if self.chunk.is_empty() {
            return Ok(None);
        }
        Ok(Some(std::mem::take(&mut self.chunk)))
    }
}

impl<T: Clone + 'static, E: 'static> Seq<T, E> {
    /// Running fold: yields the accumulator after each value.
    ///
    /// ```rust
    /// use recall::prelude::*;
    ///
    /// let totals = seq![1, 2, 3, 4].scan(0, |sum, n| sum + n);
    /// assert_eq!(totals.to_vec(), Ok(vec![1, 3, 6, 10]));
    /// ```
    pub fn scan<A, F>(&self, init: A, f: F) -> Seq<A, E>
    where
        A: Clone + 'static,
        F: FnMut(&A, T) -> A + 'static,
    {
        self.derive(Scan {
            upstream: self.upstream(),
            acc: init,
            f,
        })
    }

    /// Sliding windows of `size` consecutive values.
    ///
    /// A sequence shorter than `size` has no windows.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn windows(&self, size: usize) -> Seq<Vec<T>, E> {
        assert!(size != 0, "window size must be non-zero");
        self.derive(Windows {
            upstream: self.upstream(),
            size,
            window: VecDeque::with_capacity(size),
        })
    }

    /// Consecutive groups of `size` values.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn chunks(&self, size: usize) -> Seq<Vec<T>, E> {
        assert!(size != 0, "chunk size must be non-zero");
        self.derive(Chunks {
            upstream: self.upstream(),
            size,
            chunk: Vec::with_capacity(size),
        })
    }
}
