//! Element-wise transformations.
//!
//! [`Map`], [`MapErr`], [`Filter`], [`FilterMap`], [`Inspect`] and
//! [`Enumerate`] each pull one upstream value per output value (or a run of
//! upstream values, for the filters) and never buffer.

use crate::{Producer, Seq};

/// Transforms every value with a function.
pub struct Map<S, F> {
    upstream: S,
    f: F,
}

/// Create a producer that applies `f` to every value of `upstream`.
pub fn map<S, F>(upstream: S, f: F) -> Map<S, F> {
    Map { upstream, f }
}

impl<S, F, U> Producer for Map<S, F>
where
    S: Producer,
    F: FnMut(S::Item) -> U,
{
    type Item = U;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<U>, S::Error> {
        Ok(self.upstream.pull()?.map(&mut self.f))
    }
}

/// Transforms the upstream failure type.
pub struct MapErr<S, F> {
    upstream: S,
    f: F,
}

impl<S, F, E2> Producer for MapErr<S, F>
where
    S: Producer,
    F: FnMut(S::Error) -> E2,
{
    type Item = S::Item;
    type Error = E2;

    fn pull(&mut self) -> Result<Option<S::Item>, E2> {
        self.upstream.pull().map_err(&mut self.f)
    }
}

/// Keeps the values a predicate accepts.
pub struct Filter<S, F> {
    upstream: S,
    predicate: F,
}

impl<S, F> Producer for Filter<S, F>
where
    S: Producer,
    F: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<S::Item>, S::Error> {
        while let Some(value) = self.upstream.pull()? {
            if (self.predicate)(&value) {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

/// Filters and transforms in one pass.
pub struct FilterMap<S, F> {
    upstream: S,
    f: F,
}

impl<S, F, U> Producer for FilterMap<S, F>
where
    S: Producer,
    F: FnMut(S::Item) -> Option<U>,
{
    type Item = U;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<U>, S::Error> {
        while let Some(value) = self.upstream.pull()? {
            if let Some(mapped) = (self.f)(value) {
                return Ok(Some(mapped));
            }
        }
        Ok(None)
    }
}

/// Calls a function on each value as it passes through.
///
/// Because the derived sequence is memoized, the function runs once per
/// value no matter how many cursors read it.
pub struct Inspect<S, F> {
    upstream: S,
    f: F,
}

impl<S, F> Producer for Inspect<S, F>
where
    S: Producer,
    F: FnMut(&S::Item),
{
    type Item = S::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<S::Item>, S::Error> {
        let value = self.upstream.pull()?;
        if let Some(value) = &value {
            (self.f)(value);
        }
        Ok(value)
    }
}

/// Pairs each value with its index.
pub struct Enumerate<S> {
    upstream: S,
    index: usize,
}

impl<S: Producer> Producer for Enumerate<S> {
    type Item = (usize, S::Item);
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<Self::Item>, S::Error> {
        let Some(value) = self.upstream.pull()? else {
            return Ok(None);
        };
        let index = self.index;
        self.index += 1;
        Ok(Some((index, value)))
    }
}

impl<T: Clone + 'static, E: 'static> Seq<T, E> {
    /// Lazily transform every value.
    ///
    /// ```rust
    /// use recall::prelude::*;
    ///
    /// let doubled = seq![1, 2, 3].map(|n| n * 2);
    /// assert_eq!(doubled.to_vec(), Ok(vec![2, 4, 6]));
    /// ```
    pub fn map<U, F>(&self, f: F) -> Seq<U, E>
    where
        U: 'static,
        F: FnMut(T) -> U + 'static,
    {
        self.derive(map(self.upstream(), f))
    }

    /// Transform the failure type, typically to line up two sequences before
    /// [`zip`](Self::zip) or [`chain`](Self::chain).
    pub fn map_err<E2, F>(&self, f: F) -> Seq<T, E2>
    where
        E2: 'static,
        F: FnMut(E) -> E2 + 'static,
    {
        self.derive(MapErr {
            upstream: self.upstream(),
            f,
        })
    }

    pub fn filter<F>(&self, predicate: F) -> Seq<T, E>
    where
        F: FnMut(&T) -> bool + 'static,
    {
        self.derive(Filter {
            upstream: self.upstream(),
            predicate,
        })
    }

    pub fn filter_map<U, F>(&self, f: F) -> Seq<U, E>
    where
        U: 'static,
        F: FnMut(T) -> Option<U> + 'static,
    {
        self.derive(FilterMap {
            upstream: self.upstream(),
            f,
        })
    }

    /// Observe each value the first time any cursor reads it.
    pub fn inspect<F>(&self, f: F) -> Seq<T, E>
    where
        F: FnMut(&T) + 'static,
    {
        self.derive(Inspect {
            upstream: self.upstream(),
            f,
        })
    }

    pub fn enumerate(&self) -> Seq<(usize, T), E> {
        self.derive(Enumerate {
            upstream: self.upstream(),
            index: 0,
        })
    }
}
