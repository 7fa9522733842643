use std::{convert::Infallible, marker::PhantomData};

use crate::Producer;

/// Producer backed by a closure.
pub struct FromFn<F>(F);

impl<T, E, F> Producer for FromFn<F>
where
    F: FnMut() -> Result<Option<T>, E>,
{
    type Item = T;
    type Error = E;

    fn pull(&mut self) -> Result<Option<T>, E> {
        (self.0)()
    }
}

/// Create a producer from a closure.
///
/// The closure returns `Ok(Some(value))` for each element, `Ok(None)` at the end
/// and `Err` to signal a failure.
///
/// ```rust
/// use recall::prelude::*;
///
/// let mut left = 2;
/// let mut producer = from_fn(move || -> Result<_, &'static str> {
///     if left == 0 { return Ok(None) }
///     left -= 1;
///     Ok(Some(left))
/// });
/// assert_eq!(producer.pull(), Ok(Some(1)));
/// assert_eq!(producer.pull(), Ok(Some(0)));
/// assert_eq!(producer.pull(), Ok(None));
/// ```
pub fn from_fn<T, E, F>(f: F) -> FromFn<F>
where
    F: FnMut() -> Result<Option<T>, E>,
{
    FromFn(f)
}

/// Infallible producer that drains an iterator.
pub struct FromIter<I>(I);

impl<I> Producer for FromIter<I>
where
    I: Iterator,
{
    type Item = I::Item;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Option<I::Item>, Infallible> {
        Ok(self.0.next())
    }
}

/// Create a producer from anything iterable.
pub fn from_iter<I: IntoIterator>(iter: I) -> FromIter<I::IntoIter> {
    FromIter(iter.into_iter())
}

/// Fallible producer that drains an iterator of results.
pub struct TryFromIter<I>(I);

impl<T, E, I> Producer for TryFromIter<I>
where
    I: Iterator<Item = Result<T, E>>,
{
    type Item = T;
    type Error = E;

    fn pull(&mut self) -> Result<Option<T>, E> {
        self.0.next().transpose()
    }
}

/// Create a fallible producer from an iterator of `Result`s.
///
/// Each `Err` is handed to the puller as a failure; the iterator is resumed on
/// the next pull.
///
/// ```rust
/// use recall::prelude::*;
///
/// let mut producer = try_from_iter(vec![Ok(1), Err("bad"), Ok(2)]);
/// assert_eq!(producer.pull(), Ok(Some(1)));
/// assert_eq!(producer.pull(), Err("bad"));
/// assert_eq!(producer.pull(), Ok(Some(2)));
/// ```
pub fn try_from_iter<T, E, I>(iter: I) -> TryFromIter<I::IntoIter>
where
    I: IntoIterator<Item = Result<T, E>>,
{
    TryFromIter(iter.into_iter())
}

/// Producer that is exhausted from the start.
pub struct Empty<T>(PhantomData<T>);

impl<T> Producer for Empty<T> {
    type Item = T;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Option<T>, Infallible> {
        Ok(None)
    }
}

pub fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

/// Produces a single value, then is exhausted.
pub struct Once<T>(Option<T>);

impl<T> Producer for Once<T> {
    type Item = T;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Option<T>, Infallible> {
        Ok(self.0.take())
    }
}

pub fn once<T>(value: T) -> Once<T> {
    Once(Some(value))
}

/// Produces clones of one value forever.
pub struct Repeat<T>(T);

impl<T: Clone> Producer for Repeat<T> {
    type Item = T;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Option<T>, Infallible> {
        Ok(Some(self.0.clone()))
    }
}

/// Create an infinite producer of `value`.
pub fn repeat<T: Clone>(value: T) -> Repeat<T> {
    Repeat(value)
}

/// Calls a closure forever.
pub struct RepeatWith<F>(F);

impl<T, F> Producer for RepeatWith<F>
where
    F: FnMut() -> T,
{
    type Item = T;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Option<T>, Infallible> {
        Ok(Some((self.0)()))
    }
}

/// Create an infinite producer from a closure.
///
/// ```rust
/// use recall::prelude::*;
///
/// let mut n = 0;
/// let mut producer = repeat_with(move || { n += 1; n * n });
/// assert_eq!(producer.pull(), Ok(Some(1)));
/// assert_eq!(producer.pull(), Ok(Some(4)));
/// ```
pub fn repeat_with<T, F: FnMut() -> T>(f: F) -> RepeatWith<F> {
    RepeatWith(f)
}

/// Each value is computed from the previous one.
pub struct Successors<T, F> {
    next: Option<T>,
    f: F,
}

impl<T, F> Producer for Successors<T, F>
where
    F: FnMut(&T) -> Option<T>,
{
    type Item = T;
    type Error = Infallible;

    fn pull(&mut self) -> Result<Option<T>, Infallible> {
        let Some(current) = self.next.take() else {
            return Ok(None);
        };
        self.next = (self.f)(&current);
        Ok(Some(current))
    }
}

/// Create a producer that starts at `first` and applies `f` until it returns `None`.
///
/// ```rust
/// use recall::prelude::*;
///
/// let powers = Seq::new(successors(Some(1_u32), |n| n.checked_mul(10)));
/// let Ok(values) = powers.take(4).to_vec();
/// assert_eq!(values, vec![1, 10, 100, 1000]);
/// ```
pub fn successors<T, F>(first: Option<T>, f: F) -> Successors<T, F>
where
    F: FnMut(&T) -> Option<T>,
{
    Successors { next: first, f }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_once_then_exhausted() {
        let mut producer = once("only");
        assert_eq!(producer.pull(), Ok(Some("only")));
        assert_eq!(producer.pull(), Ok(None));
        assert_eq!(producer.pull(), Ok(None));
    }

    #[test]
    fn test_repeat_never_ends() {
        let mut producer = repeat(7_u8);
        for _ in 0..100 {
            assert_eq!(producer.pull(), Ok(Some(7)));
        }
    }

    #[test]
    fn test_successors_stops_on_none() {
        let mut producer = successors(Some(250_u8), |n| n.checked_add(2));
        assert_eq!(producer.pull(), Ok(Some(250)));
        assert_eq!(producer.pull(), Ok(Some(252)));
        assert_eq!(producer.pull(), Ok(Some(254)));
        assert_eq!(producer.pull(), Ok(None));
        assert_eq!(producer.pull(), Ok(None));
    }

    #[test]
    fn test_try_from_iter_resumes_after_error() {
        let mut producer = try_from_iter(vec![Err(1), Ok('x'), Err(2)]);
        assert_eq!(producer.pull(), Err(1));
        assert_eq!(producer.pull(), Ok(Some('x')));
        assert_eq!(producer.pull(), Err(2));
        assert_eq!(producer.pull(), Ok(None));
    }
}
