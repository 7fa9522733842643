//! Deriving sequences from sequences
//!
//! Every combinator here is a small [`Producer`](crate::Producer) struct over
//! an upstream producer. The matching method on [`Seq`](crate::Seq) forks one
//! fresh cursor from its receiver, wraps it in the struct and memoizes the
//! result in a new sequence, so the receiver's own position never moves.

mod flat;
mod map;
mod slice;
mod window;
mod zip;

// Re-export the producer structs so they can be used outside a `Seq`
pub use flat::{Cycle, FlatMap};
pub use map::{Enumerate, Filter, FilterMap, Inspect, Map, MapErr, map};
pub use slice::{Skip, SkipWhile, StepBy, Take, TakeWhile};
pub use window::{Chunks, Scan, Windows};
pub use zip::{Chain, Interleave, Zip, chain};
