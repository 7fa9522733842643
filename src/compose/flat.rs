//! Flattening and repetition: [`FlatMap`] and [`Cycle`].

use crate::{Producer, Seq};

/// Expands every value into an iterable and yields its contents in order.
pub struct FlatMap<S, F, I: IntoIterator> {
    upstream: S,
    f: F,
    inner: Option<I::IntoIter>,
}

impl<S, F, I> Producer for FlatMap<S, F, I>
where
    S: Producer,
    F: FnMut(S::Item) -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type Error = S::Error;

    fn pull(&mut self) -> Result<Option<I::Item>, S::Error> {
        loop {
            if let Some(inner) = &mut self.inner {
                match inner.next() {
                    Some(value) => return Ok(Some(value)),
                    None => self.inner = None,
                }
            }
            match self.upstream.pull()? {
                Some(value) => self.inner = Some((self.f)(value).into_iter()),
                None => return Ok(None),
            }
        }
    }
}

/// Repeats a sequence forever by reading it again from the start each time a
/// pass ends.
pub struct Cycle<T, E> {
    source: Seq<T, E>,
    pass: Seq<T, E>,
    // whether the current pass has yielded anything yet
    fresh: bool,
}

impl<T: Clone, E> Producer for Cycle<T, E> {
    type Item = T;
    type Error = E;

    fn pull(&mut self) -> Result<Option<T>, E> {
        if let Some(value) = self.pass.step()? {
            self.fresh = false;
            return Ok(Some(value));
        }
        // an empty pass means an empty source; stop instead of spinning
        if self.fresh {
            return Ok(None);
        }
        self.pass = self.source.upstream();
        self.fresh = true;
        self.pull()
    }
}

impl<T: Clone + 'static, E: 'static> Seq<T, E> {
    /// Replace every value with the contents of an iterable and flatten.
    ///
    /// ```rust
    /// use recall::prelude::*;
    ///
    /// let lines = seq!["a b", "c"];
    /// let words = lines.flat_map(|line| line.split(' ').collect::<Vec<_>>());
    /// assert_eq!(words.to_vec(), Ok(vec!["a", "b", "c"]));
    /// ```
    pub fn flat_map<I, F>(&self, f: F) -> Seq<I::Item, E>
    where
        I: IntoIterator + 'static,
        I::IntoIter: 'static,
        F: FnMut(T) -> I + 'static,
    {
        self.derive(FlatMap {
            upstream: self.upstream(),
            f,
            inner: None,
        })
    }

    /// Repeat this sequence endlessly.
    ///
    /// The source is only pulled once per index; later passes are served from
    /// its history. Cycling an empty sequence gives an empty sequence.
    ///
    /// ```rust
    /// use recall::prelude::*;
    ///
    /// let beat = seq!["tick", "tock"].cycle();
    /// assert_eq!(beat.take(5).to_vec(), Ok(vec!["tick", "tock", "tick", "tock", "tick"]));
    /// ```
    pub fn cycle(&self) -> Seq<T, E> {
        let source = self.replay();
        let pass = source.upstream();
        self.derive(Cycle {
            source,
            pass,
            fresh: true,
        })
    }
}
