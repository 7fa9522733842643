use std::convert::Infallible;

use super::func::from_iter;
use crate::{Producer, Seq};

/// Wrap a producer in a replayable sequence.
///
/// Same as [`Seq::new`].
pub fn wrap<P>(producer: P) -> Seq<P::Item, P::Error>
where
    P: Producer + 'static,
{
    Seq::new(producer)
}

/// Wrap an already materialized collection, or any other iterable.
///
/// The iterator is only advanced as cursors reach new indices.
///
/// ```rust
/// use recall::prelude::*;
///
/// let words = wrap_iter("a b c".split(' ').map(str::to_owned).collect::<Vec<_>>());
/// let Ok(n) = words.count();
/// assert_eq!(n, 3);
/// ```
pub fn wrap_iter<I>(iter: I) -> Seq<I::Item>
where
    I: IntoIterator,
    I::IntoIter: 'static,
{
    Seq::new(from_iter(iter))
}

/// Wrap a fixed list of values.
///
/// The [`seq!`](crate::seq) macro is the variadic form of this function, and
/// [`NonEmptySeq::of`](crate::NonEmptySeq::of) the variant that is statically
/// known to hold at least one value.
pub fn wrap_values<T: 'static>(values: Vec<T>) -> Seq<T> {
    Seq::new(from_iter(values))
}

/// Build a [`Seq`] from a list of values, like `vec!`.
///
/// ```rust
/// use recall::prelude::*;
///
/// let Ok(values) = seq![1, 2, 3].to_vec();
/// assert_eq!(values, vec![1, 2, 3]);
///
/// let empty: Seq<u8> = seq![];
/// assert_eq!(empty.first(), Ok(None));
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::wrap_values(::std::vec::Vec::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::wrap_values(::std::vec![$($value),+])
    };
}

impl<T: 'static> Seq<T> {
    /// Wrap a vector of values. See [`wrap_values`].
    pub fn from_values(values: Vec<T>) -> Self {
        wrap_values(values)
    }
}

/// Collecting into a `Seq` materializes the iterator first; use [`wrap_iter`]
/// to stay lazy.
impl<T: 'static> FromIterator<T> for Seq<T, Infallible> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        wrap_values(iter.into_iter().collect())
    }
}
