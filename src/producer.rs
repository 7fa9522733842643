//! The one-shot source trait that every sequence is built on.
//!
//! A [`Producer`] is a forward-only, pull-based source: each call to
//! [`pull`](Producer::pull) yields the next value, reports exhaustion, or
//! fails. Producers are stateful and single-pass; wrapping one in a
//! [`Seq`](crate::Seq) is what makes it replayable.
//!
//! # Examples
//!
//! ```rust
//! use recall::prelude::*;
//!
//! let mut countdown = 3;
//! let mut producer = from_fn(move || {
//!     countdown -= 1;
//!     Ok::<_, std::convert::Infallible>((countdown >= 0).then_some(countdown))
//! });
//! assert_eq!(producer.pull(), Ok(Some(2)));
//! ```

/// A forward-only source of values.
///
/// Exhaustion (`Ok(None)`) is expected to be permanent, but a [`Seq`](crate::Seq)
/// never relies on that: it records the end marker and stops pulling.
/// An `Err` is not an end marker; the caller may pull again.
pub trait Producer {
    /// Type of values produced
    type Item;
    /// Failure raised while pulling
    type Error;

    /// Pull the next value, `Ok(None)` once the source is exhausted.
    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error>;

    fn boxed(self) -> Box<dyn Producer<Item = Self::Item, Error = Self::Error>>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<P> Producer for Box<P>
where
    P: Producer + ?Sized,
{
    type Item = P::Item;
    type Error = P::Error;

    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        (**self).pull()
    }
}

impl<P> Producer for &'_ mut P
where
    P: Producer + ?Sized,
{
    type Item = P::Item;
    type Error = P::Error;

    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        (**self).pull()
    }
}

/// A missing producer is an empty one.
impl<P> Producer for Option<P>
where
    P: Producer,
{
    type Item = P::Item;
    type Error = P::Error;

    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        match self {
            Some(p) => p.pull(),
            None => Ok(None),
        }
    }
}

impl<L, R> Producer for either::Either<L, R>
where
    L: Producer,
    R: Producer<Item = L::Item, Error = L::Error>,
{
    type Item = L::Item;
    type Error = L::Error;

    fn pull(&mut self) -> Result<Option<Self::Item>, Self::Error> {
        match self {
            either::Either::Left(l) => l.pull(),
            either::Either::Right(r) => r.pull(),
        }
    }
}
