//! Prefix and stride selection: [`Take`], [`Skip`], [`TakeWhile`],
//! [`SkipWhile`] and [`StepBy`].

use crate::{Producer, Seq};

/// Yields at most `remaining` values.
pub struct Take<S> {
    upstream: S,
    remaining: usize,
}

impl<S: Producer> Producer for Take<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<S::Item>, S::Error> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let value = self.upstream.pull()?;
        if value.is_some() {
            self.remaining -= 1;
        }
        Ok(value)
    }
}

/// Drops the first `remaining` values.
pub struct Skip<S> {
    upstream: S,
    remaining: usize,
}

impl<S: Producer> Producer for Skip<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<S::Item>, S::Error> {
        while self.remaining > 0 {
            if self.upstream.pull()?.is_none() {
                self.remaining = 0;
                return Ok(None);
            }
            self.remaining -= 1;
        }
        self.upstream.pull()
    }
}

/// Yields values until the predicate first rejects one.
pub struct TakeWhile<S, F> {
    upstream: S,
    predicate: F,
    done: bool,
}

impl<S, F> Producer for TakeWhile<S, F>
where
    S: Producer,
    F: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<S::Item>, S::Error> {
        if self.done {
            return Ok(None);
        }
        match self.upstream.pull()? {
            Some(value) if (self.predicate)(&value) => Ok(Some(value)),
            _ => {
                self.done = true;
                Ok(None)
            }
        }
    }
}

/// Drops the leading run of values the predicate accepts.
///
/// The first rejected value is yielded, and everything after it passes
/// through unchecked.
pub struct SkipWhile<S, F> {
    upstream: S,
    // `None` once the leading run has been skipped
    predicate: Option<F>,
}

impl<S, F> Producer for SkipWhile<S, F>
where
    S: Producer,
    F: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<S::Item>, S::Error> {
        let Some(predicate) = self.predicate.as_mut() else {
            return self.upstream.pull();
        };
        while let Some(value) = self.upstream.pull()? {
            if !predicate(&value) {
                self.predicate = None;
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

/// Yields the first value, then every `step`-th value after it.
pub struct StepBy<S> {
    upstream: S,
    // values to drop before the next yield
    gap: usize,
    step: usize,
}

impl<S: Producer> Producer for StepBy<S> {
    type Item = S::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<S::Item>, S::Error> {
        while self.gap > 0 {
            if self.upstream.pull()?.is_none() {
                return Ok(None);
            }
            self.gap -= 1;
        }
        let value = self.upstream.pull()?;
        if value.is_some() {
            self.gap = self.step - 1;
        }
        Ok(value)
    }
}

impl<T: Clone + 'static, E: 'static> Seq<T, E> {
    pub fn take(&self, n: usize) -> Seq<T, E> {
        self.derive(Take {
            upstream: self.upstream(),
            remaining: n,
        })
    }

    pub fn skip(&self, n: usize) -> Seq<T, E> {
        self.derive(Skip {
            upstream: self.upstream(),
            remaining: n,
        })
    }

    pub fn take_while<F>(&self, predicate: F) -> Seq<T, E>
    where
        F: FnMut(&T) -> bool + 'static,
    {
        self.derive(TakeWhile {
            upstream: self.upstream(),
            predicate,
            done: false,
        })
    }

    /// Drop values while `predicate` holds, then yield the rest unchanged.
    ///
    /// ```rust
    /// use recall::prelude::*;
    ///
    /// let tail = seq![1, 2, 5, 1, 7].skip_while(|n| *n < 3);
    /// assert_eq!(tail.to_vec(), Ok(vec![5, 1, 7]));
    /// ```
    pub fn skip_while<F>(&self, predicate: F) -> Seq<T, E>
    where
        F: FnMut(&T) -> bool + 'static,
    {
        self.derive(SkipWhile {
            upstream: self.upstream(),
            predicate: Some(predicate),
        })
    }

    /// Yield every `step`-th value, starting with the first.
    ///
    /// # Panics
    ///
    /// Panics if `step` is zero.
    pub fn step_by(&self, step: usize) -> Seq<T, E> {
        assert!(step != 0, "step_by requires a non-zero step");
        self.derive(StepBy {
            upstream: self.upstream(),
            gap: 0,
            step,
        })
    }
}
