//! # Recall: Memoizing, Forkable Lazy Sequences
//!
//! Wrap a one-shot, stateful producer once and read it as many times as you
//! like, from as many independent cursors as you like, including cursors that
//! resume exactly where another one stopped. Every value is pulled from the
//! producer at most once.
//!
//! ## Core Types
//!
//! - **[`Producer`]**: Forward-only source that yields values, ends, or fails
//! - **[`Seq<T, E>`]**: Memoizing cursor over a producer's shared history
//! - **[`NonEmptySeq<T, E>`]**: A sequence checked to hold at least one value
//!
//! ## Key Features
//!
//! - **Replayable**: [`Seq::replay`] reads from the start, served from history
//! - **Forkable**: [`Seq::rest`] reads whatever a cursor has not read yet
//! - **Composable**: `map`, `filter`, `zip`, `scan`, `windows` and friends
//!   derive new memoized sequences without moving their receiver
//! - **Fallible**: producer failures surface as `Err` and are never recorded,
//!   so reading again retries
//!
//! ## Example
//!
//! ```
//! use recall::prelude::*;
//!
//! // a producer that can only be read once
//! let mut lines = vec!["GET /", "POST /login", "GET /about"].into_iter();
//! let requests = wrap(from_fn(move || Ok::<_, std::convert::Infallible>(lines.next())));
//!
//! let gets = requests.filter(|line| line.starts_with("GET"));
//! assert_eq!(gets.count(), Ok(2));
//!
//! // still all there
//! assert_eq!(requests.to_vec(), Ok(vec!["GET /", "POST /login", "GET /about"]));
//! ```
//!
//! ## Common Functions
//!
//! **Building Sequences:**
//! - [`wrap(producer)`](wrap) - Memoize any producer
//! - [`wrap_iter(iterable)`](wrap_iter) - Memoize an iterator, lazily
//! - [`seq![a, b, c]`](macro@seq) - A sequence of fixed values
//! - [`from_fn(f)`](build::from_fn) - A producer driven by a closure
//!
//! **Consuming:**
//! - [`Seq::step`] - Advance one cursor by one value
//! - [`Seq::to_vec`], [`Seq::fold`], [`Seq::find`], ... - Drain a replay
//!
//! ## Memory
//!
//! By default the whole history is kept for the life of the sequence. Build
//! with [`Retention::TrimOnRelease`] (see [`Seq::with_retention`]) to drop
//! values no live cursor can reach anymore.

pub mod build;
pub mod compose;
mod consume;
mod cursor;
mod error;
pub mod iter;
mod memo;
mod non_empty;
pub mod prelude;
mod producer;
mod sequence;

pub use build::{wrap, wrap_iter, wrap_values};
pub use error::NonEmptyError;
pub use memo::Retention;
pub use non_empty::NonEmptySeq;
pub use producer::Producer;
pub use sequence::Seq;
