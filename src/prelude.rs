//! Commonly used imports
//!
//! Use `use recall::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{NonEmptyError, NonEmptySeq, Producer, Retention, Seq};

// Wrapping producers and values
pub use crate::{seq, wrap, wrap_iter, wrap_values};

// Stock producers
pub use crate::build::{
    empty, from_fn, from_iter, once, repeat, repeat_with, successors, try_from_iter,
};
