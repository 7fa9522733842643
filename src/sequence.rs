//! The replayable sequence handle.
//!
//! A [`Seq`] is a cursor into a shared memoizing core. The handle returned by
//! [`Seq::new`] is the core's primary cursor: stepping it directly is
//! single-pass, exactly like the producer it wraps. [`Seq::replay`] and
//! [`Seq::rest`] fork independent cursors that are served from the recorded
//! history wherever possible, so the producer is pulled at most once per index.
//!
//! # Examples
//!
//! ```rust
//! use recall::prelude::*;
//!
//! let seq = wrap_iter([1, 2, 3, 4, 5]);
//!
//! let mut cursor = seq.replay();
//! assert_eq!(cursor.step(), Ok(Some(1)));
//! assert_eq!(cursor.step(), Ok(Some(2)));
//!
//! // everything `cursor` has not read yet
//! let Ok(rest) = cursor.rest().to_vec();
//! assert_eq!(rest, vec![3, 4, 5]);
//!
//! // the full sequence, no matter who consumed what
//! let Ok(all) = seq.to_vec();
//! assert_eq!(all, vec![1, 2, 3, 4, 5]);
//! ```

use std::{
    cell::{Ref, RefCell, RefMut},
    convert::Infallible,
    fmt, mem,
    rc::Rc,
};

use tracing::debug;

use crate::{
    Producer,
    cursor::{CursorId, Pin},
    memo::{Core, Retention},
};

/// A lazily evaluated, memoizing sequence.
///
/// `E` is the producer's failure type; sequences built from plain iterators
/// use [`Infallible`].
pub struct Seq<T, E = Infallible> {
    shared: Rc<Shared<T, E>>,
    cursor: CursorId,
}

struct Shared<T, E> {
    core: RefCell<Core<T, E>>,
    // cursors dropped while the core was mid-pull, released once it returns
    orphans: RefCell<Vec<CursorId>>,
}

impl<T, E> Shared<T, E> {
    fn release_orphans(&self, core: &mut Core<T, E>) {
        for id in self.orphans.take() {
            core.release(&id);
        }
    }
}

impl<T, E> Seq<T, E> {
    /// Wrap a producer. The returned handle is its primary cursor.
    pub fn new<P>(producer: P) -> Self
    where
        P: Producer<Item = T, Error = E> + 'static,
    {
        Self::with_retention(producer, Retention::default())
    }

    /// Wrap a producer with an explicit history [`Retention`] policy.
    ///
    /// Every cursor forked from the returned handle shares the policy, and
    /// sequences derived through combinators inherit it.
    pub fn with_retention<P>(producer: P, retention: Retention) -> Self
    where
        P: Producer<Item = T, Error = E> + 'static,
    {
        let mut core = Core::new(Box::new(producer), retention);
        let cursor = core.open(0, Pin::Base);
        Self {
            shared: Rc::new(Shared {
                core: RefCell::new(core),
                orphans: RefCell::new(Vec::new()),
            }),
            cursor,
        }
    }

    /// Memoize a producer built on top of this sequence, keeping its retention.
    pub(crate) fn derive<P>(&self, producer: P) -> Seq<P::Item, P::Error>
    where
        P: Producer + 'static,
    {
        Seq::with_retention(producer, self.retention())
    }

    /// Fork a cursor that reads this sequence from its start.
    ///
    /// The start is index 0 for a wrapped producer and the fork point for a
    /// handle obtained from [`rest`](Self::rest).
    pub fn replay(&self) -> Self {
        let base = self.core().base(&self.cursor);
        self.fork(base, Pin::Base)
    }

    /// Fork a cursor that reads everything this cursor has not read yet.
    pub fn rest(&self) -> Self {
        let offset = self.core().offset(&self.cursor);
        self.fork(offset, Pin::Base)
    }

    /// Fork a forward-only cursor from this sequence's start for a combinator
    /// to pull from.
    ///
    /// It keeps alive only the history it has not read yet, so it must never
    /// be replayed.
    pub(crate) fn upstream(&self) -> Self {
        let base = self.core().base(&self.cursor);
        self.fork(base, Pin::Offset)
    }

    fn fork(&self, start: usize, pin: Pin) -> Self {
        let cursor = self.core_mut().open(start, pin);
        Self {
            shared: Rc::clone(&self.shared),
            cursor,
        }
    }

    /// Number of values this cursor has read, counted from the start of the
    /// underlying producer.
    pub fn offset(&self) -> usize {
        self.core().offset(&self.cursor)
    }

    /// Number of values pulled from the producer so far, by any cursor.
    pub fn recorded(&self) -> usize {
        self.core().frontier()
    }

    /// Number of recorded values still held in memory.
    pub fn retained(&self) -> usize {
        self.core().retained()
    }

    /// Whether the producer has reported its end.
    pub fn is_exhausted(&self) -> bool {
        self.core().is_exhausted()
    }

    /// Number of live cursors sharing this sequence's history.
    pub fn live_cursors(&self) -> usize {
        self.core().live_cursors()
    }

    pub fn retention(&self) -> Retention {
        self.core().retention()
    }

    /// Drop recorded values no live cursor can read again.
    ///
    /// Returns the number of values dropped. With [`Retention::TrimOnRelease`]
    /// this already happens whenever a cursor is dropped.
    pub fn trim_history(&self) -> usize {
        self.core_mut().trim()
    }

    /// Whether both handles read from the same history.
    pub fn shares_history_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    fn core(&self) -> Ref<'_, Core<T, E>> {
        match self.shared.core.try_borrow() {
            Ok(core) => core,
            Err(_) => reentered(),
        }
    }

    fn core_mut(&self) -> RefMut<'_, Core<T, E>> {
        match self.shared.core.try_borrow_mut() {
            Ok(core) => core,
            Err(_) => reentered(),
        }
    }
}

impl<T: Clone, E> Seq<T, E> {
    /// Advance this cursor by one value.
    ///
    /// Returns `Ok(None)` once the sequence is exhausted. A producer failure
    /// is returned as `Err` and leaves the cursor where it was, so stepping
    /// again retries the same index.
    pub fn step(&mut self) -> Result<Option<T>, E> {
        let mut core = self.core_mut();
        let value = core.step(&self.cursor);
        self.shared.release_orphans(&mut core);
        value
    }
}

#[cold]
fn reentered() -> ! {
    panic!("sequence was re-entered while its producer was being pulled")
}

/// A cursor is itself a producer, which is how derived sequences pull from
/// their upstream.
impl<T: Clone, E> Producer for Seq<T, E> {
    type Item = T;
    type Error = E;

    fn pull(&mut self) -> Result<Option<T>, E> {
        self.step()
    }
}

impl<T, E> Drop for Seq<T, E> {
    fn drop(&mut self) {
        match self.shared.core.try_borrow_mut() {
            Ok(mut core) => {
                core.release(&self.cursor);
                self.shared.release_orphans(&mut core);
            }
            Err(_) => {
                debug!("cursor dropped while its sequence was mid-pull, deferring release");
                let id = mem::replace(&mut self.cursor, CursorId::detached());
                self.shared.orphans.borrow_mut().push(id);
            }
        }
    }
}

impl<T, E> fmt::Debug for Seq<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shared.core.try_borrow() {
            Ok(core) => f
                .debug_struct("Seq")
                .field("offset", &core.offset(&self.cursor))
                .field("recorded", &core.frontier())
                .field("exhausted", &core.is_exhausted())
                .finish(),
            Err(_) => f.debug_struct("Seq").finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{empty, from_fn, from_iter};
    use std::cell::Cell;

    fn drain<T: Clone>(mut seq: Seq<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(Some(value)) = seq.step() {
            out.push(value);
        }
        out
    }

    fn counting(n: i32, pulls: Rc<Cell<usize>>) -> Seq<i32> {
        let mut next = 0;
        Seq::new(from_fn(move || {
            pulls.set(pulls.get() + 1);
            next += 1;
            Ok::<_, Infallible>((next <= n).then_some(next))
        }))
    }

    #[test]
    fn test_replay_is_independent_of_other_cursors() {
        let seq = Seq::new(from_iter([1, 2, 3, 4, 5]));

        let a = seq.replay();
        assert_eq!(drain(a), vec![1, 2, 3, 4, 5]);
        let b = seq.replay();
        assert_eq!(drain(b), vec![1, 2, 3, 4, 5]);

        let mut c = seq.replay();
        assert_eq!(c.step(), Ok(Some(1)));
        assert_eq!(c.step(), Ok(Some(2)));
        assert_eq!(drain(c.rest()), vec![3, 4, 5]);
    }

    #[test]
    fn test_primary_cursor_is_single_pass() {
        let mut seq = Seq::new(from_iter(['x', 'y']));
        assert_eq!(seq.step(), Ok(Some('x')));
        assert_eq!(seq.step(), Ok(Some('y')));
        assert_eq!(seq.step(), Ok(None));
        assert_eq!(seq.step(), Ok(None));

        // a replay of the drained primary cursor still sees everything
        assert_eq!(drain(seq.replay()), vec!['x', 'y']);
    }

    #[test]
    fn test_rest_of_drained_cursor_is_empty() {
        let seq = Seq::new(from_iter([1, 2, 3]));
        let mut full = seq.replay();
        assert_eq!(full.step(), Ok(Some(1)));

        let rest = full.rest();
        assert_eq!(drain(rest.replay()), vec![2, 3]);
        assert_eq!(drain(rest), vec![2, 3]);

        while let Ok(Some(_)) = full.step() {}
        assert_eq!(drain(full.rest()), Vec::<i32>::new());
        assert_eq!(drain(full.replay()), vec![1, 2, 3]);
    }

    #[test]
    fn test_descendants_do_not_move_the_original() {
        let seq = Seq::new(from_iter([1, 2, 3]));
        let mut full = seq.replay();
        assert_eq!(full.step(), Ok(Some(1)));

        let mut child = full.rest();
        while let Ok(Some(_)) = child.step() {}
        assert_eq!(drain(child.rest()), Vec::<i32>::new());
        assert_eq!(drain(full.rest().rest()), vec![2, 3]);

        assert_eq!(full.offset(), 1);
        assert_eq!(drain(full.rest()), vec![2, 3]);
    }

    #[test]
    fn test_replay_of_rest_starts_at_fork_point() {
        let seq = Seq::new(from_iter(10..15));
        let mut cursor = seq.replay();
        cursor.step().ok();
        cursor.step().ok();

        let mut forked = cursor.rest();
        assert_eq!(forked.step(), Ok(Some(12)));
        assert_eq!(drain(forked.replay()), vec![12, 13, 14]);
        assert_eq!(drain(forked.rest()), vec![13, 14]);
    }

    #[test]
    fn test_each_index_pulled_once() {
        let pulls = Rc::new(Cell::new(0));
        let seq = counting(4, pulls.clone());

        for _ in 0..5 {
            assert_eq!(drain(seq.replay()), vec![1, 2, 3, 4]);
        }
        // four values plus the single end-of-sequence pull
        assert_eq!(pulls.get(), 5);
        assert_eq!(seq.recorded(), 4);
        assert!(seq.is_exhausted());
    }

    #[test]
    fn test_interleaved_cursors_agree() {
        let pulls = Rc::new(Cell::new(0));
        let seq = counting(6, pulls.clone());
        let mut a = seq.replay();
        let mut b = seq.replay();

        for _ in 0..7 {
            let left = a.step();
            let right = b.step();
            assert_eq!(left, right);
            let right = b.step();
            let left = a.step();
            assert_eq!(left, right);
        }
        assert!(pulls.get() <= seq.recorded() + 1);
    }

    #[test]
    fn test_empty_producer() {
        let seq: Seq<u8> = Seq::new(empty());
        assert_eq!(drain(seq.replay()), Vec::<u8>::new());
        assert_eq!(drain(seq.rest()), Vec::<u8>::new());
        assert!(seq.is_exhausted());
    }

    #[test]
    fn test_failure_retries_same_index() {
        let mut attempts = 0;
        let seq = Seq::new(from_fn(move || {
            attempts += 1;
            match attempts {
                1 => Ok(Some(1)),
                2 => Err("transient"),
                3 => Ok(Some(2)),
                _ => Ok(None),
            }
        }));

        let mut a = seq.replay();
        let mut b = seq.replay();
        assert_eq!(a.step(), Ok(Some(1)));
        assert_eq!(a.step(), Err("transient"));
        assert_eq!(a.offset(), 1);

        // b is unaffected until it reaches the frontier
        assert_eq!(b.step(), Ok(Some(1)));
        assert_eq!(b.step(), Ok(Some(2)));
        assert_eq!(a.step(), Ok(Some(2)));
        assert_eq!(a.step(), Ok(None));
    }

    #[test]
    fn test_dropping_cursor_frees_slot() {
        let seq = Seq::new(from_iter(0..3));
        assert_eq!(seq.live_cursors(), 1);
        {
            let a = seq.replay();
            let _b = seq.rest();
            assert_eq!(seq.live_cursors(), 3);
            assert!(seq.shares_history_with(&a));
            assert!(!seq.shares_history_with(&Seq::new(from_iter(0..3))));
        }
        assert_eq!(seq.live_cursors(), 1);
    }

    #[test]
    fn test_trim_on_release_drops_unreachable_history() {
        let seq = Seq::with_retention(from_iter(0..100), Retention::TrimOnRelease);
        assert_eq!(seq.replay().retention(), Retention::TrimOnRelease);
        let mut tail = seq.replay();
        for _ in 0..40 {
            tail.step().ok();
        }
        let rest = tail.rest();
        drop(tail);
        assert_eq!(seq.retained(), 40);

        drop(seq);
        assert_eq!(rest.retained(), 0);
        assert_eq!(rest.recorded(), 40);
        assert_eq!(drain(rest.replay()).first(), Some(&40));
    }

    #[test]
    fn test_manual_trim_respects_live_bases() {
        let seq = Seq::new(from_iter(0..10));
        let mut cursor = seq.rest();
        for _ in 0..5 {
            cursor.step().ok();
        }
        assert_eq!(seq.trim_history(), 0);
        let later = cursor.rest();
        drop(cursor);
        drop(seq);
        assert_eq!(later.trim_history(), 5);
        assert_eq!(drain(later.replay()), vec![5, 6, 7, 8, 9]);
    }

    #[test]
    fn test_cursor_dropped_mid_pull_is_released_afterwards() {
        let parked: Rc<RefCell<Option<Seq<i32>>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&parked);
        let mut next = 0;
        let seq = Seq::with_retention(
            from_fn(move || {
                inner.borrow_mut().take();
                next += 1;
                Ok::<_, Infallible>((next <= 3).then_some(next))
            }),
            Retention::TrimOnRelease,
        );
        *parked.borrow_mut() = Some(seq.replay());
        let mut reader = seq.rest();
        assert_eq!(seq.live_cursors(), 3);

        assert_eq!(reader.step(), Ok(Some(1)));
        assert!(parked.borrow().is_none());
        assert_eq!(seq.live_cursors(), 2);

        let later = reader.rest();
        drop(reader);
        drop(seq);
        assert_eq!(later.retained(), 0);
        assert_eq!(drain(later), vec![2, 3]);
    }

    #[test]
    fn test_debug_shows_cursor_offset() {
        let seq = Seq::new(from_iter([7, 8]));
        let mut cursor = seq.replay();
        cursor.step().ok();
        assert_eq!(
            format!("{cursor:?}"),
            "Seq { offset: 1, recorded: 1, exhausted: false }"
        );
    }

    #[test]
    #[should_panic(expected = "re-entered")]
    fn test_reentrant_pull_panics() {
        let slot: Rc<RefCell<Option<Seq<i32>>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&slot);
        let seq = Seq::new(from_fn(move || {
            let mut guard = inner.borrow_mut();
            match guard.as_mut() {
                Some(cursor) => cursor.step(),
                None => Ok(None),
            }
        }));
        *slot.borrow_mut() = Some(seq.replay());
        let mut cursor = seq.replay();
        let _ = cursor.step();
    }
}
