//! Memoizing state shared by every cursor of one sequence.
//!
//! A [`Core`] owns the producer, the history of everything it has produced,
//! the end marker and the cursor table. It is the only place the producer is
//! ever pulled from.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    Producer,
    cursor::{CursorId, CursorTable, Pin},
};

/// What a sequence does with history no cursor can reach anymore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Retention {
    /// Keep every produced value for the lifetime of the sequence.
    #[default]
    RetainAll,
    /// Drop the unreachable prefix of the history whenever a cursor is released.
    TrimOnRelease,
}

pub(crate) struct Core<T, E> {
    producer: Box<dyn Producer<Item = T, Error = E>>,
    history: VecDeque<T>,
    // number of leading values dropped from `history`
    trimmed: usize,
    exhausted: bool,
    cursors: CursorTable,
    retention: Retention,
}

impl<T, E> Core<T, E> {
    pub(crate) fn new(
        producer: Box<dyn Producer<Item = T, Error = E>>,
        retention: Retention,
    ) -> Self {
        Self {
            producer,
            history: VecDeque::new(),
            trimmed: 0,
            exhausted: false,
            cursors: CursorTable::default(),
            retention,
        }
    }

    pub(crate) fn open(&mut self, base: usize, pin: Pin) -> CursorId {
        debug_assert!(base >= self.trimmed, "cursor opened below trimmed history");
        trace!(base, ?pin, "opened cursor");
        self.cursors.open(base, pin)
    }

    pub(crate) fn release(&mut self, id: &CursorId) {
        if !self.cursors.release(id) {
            return;
        }
        trace!(live = self.cursors.live(), "released cursor");
        if self.retention == Retention::TrimOnRelease {
            self.trim();
        }
    }

    pub(crate) fn offset(&self, id: &CursorId) -> usize {
        self.cursors.offset(id)
    }

    pub(crate) fn base(&self, id: &CursorId) -> usize {
        self.cursors.base(id)
    }

    /// Index of the next value that has to come from the producer.
    pub(crate) fn frontier(&self) -> usize {
        self.trimmed + self.history.len()
    }

    pub(crate) fn retained(&self) -> usize {
        self.history.len()
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub(crate) fn live_cursors(&self) -> usize {
        self.cursors.live()
    }

    pub(crate) fn retention(&self) -> Retention {
        self.retention
    }

    /// Drop history no live cursor can read again. Returns how many values were dropped.
    pub(crate) fn trim(&mut self) -> usize {
        let keep_from = self.cursors.lowest_pin().unwrap_or_else(|| self.frontier());
        let dropped = keep_from.saturating_sub(self.trimmed);
        if dropped > 0 {
            self.history.drain(..dropped);
            self.trimmed += dropped;
            debug!(dropped, trimmed = self.trimmed, "trimmed sequence history");
        }
        dropped
    }
}

impl<T: Clone, E> Core<T, E> {
    /// Read the value at cursor `id`'s offset and advance it.
    ///
    /// Recorded indices are served from history. At the frontier the producer
    /// is pulled exactly once; a failure is returned without recording
    /// anything or moving the cursor.
    pub(crate) fn step(&mut self, id: &CursorId) -> Result<Option<T>, E> {
        let offset = self.cursors.offset(id);
        if let Some(value) = self.history.get(offset - self.trimmed) {
            let value = value.clone();
            self.cursors.advance(id);
            return Ok(Some(value));
        }

        if self.exhausted {
            return Ok(None);
        }

        match self.producer.pull()? {
            Some(value) => {
                trace!(index = offset, "pulled value from producer");
                self.history.push_back(value.clone());
                self.cursors.advance(id);
                Ok(Some(value))
            }
            None => {
                debug!(len = offset, "producer exhausted");
                self.exhausted = true;
                Ok(None)
            }
        }
    }
}
