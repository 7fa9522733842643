//! Building sequences from scratch
//!
//! This module provides the stock producers and the functions that wrap a
//! producer, a list of values or an iterable into a [`Seq`](crate::Seq).

mod func;
mod values;

pub use func::{
    Empty, FromFn, FromIter, Once, Repeat, RepeatWith, Successors, TryFromIter, empty, from_fn,
    from_iter, once, repeat, repeat_with, successors, try_from_iter,
};
pub use values::{wrap, wrap_iter, wrap_values};
