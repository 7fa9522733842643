//! Cursor identities and their read positions.
//!
//! Every live cursor owns one slot in its core's [`CursorTable`]. A slot
//! records where the cursor reads next (`offset`) and where a replay of that
//! cursor restarts (`base`), plus which of the two keeps history alive.
//! Slots are released explicitly when the owning handle is dropped and their
//! indices are reused afterwards.

/// Opaque slot index into a [`CursorTable`].
///
/// Only the crate hands these out, and each one is owned by exactly one
/// [`Seq`](crate::Seq), so two live cursors never share an identity.
#[derive(Debug, PartialEq, Eq, Hash)]
pub(crate) struct CursorId(usize);

impl CursorId {
    /// An identity that names no slot; releasing it is a no-op.
    pub(crate) fn detached() -> Self {
        Self(usize::MAX)
    }
}

/// The lowest index a cursor may still read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pin {
    /// The cursor can be replayed, so everything from its base stays reachable.
    Base,
    /// The cursor only moves forward; nothing behind its offset is read again.
    Offset,
}

#[derive(Debug, Clone, Copy)]
struct Position {
    base: usize,
    offset: usize,
    pin: Pin,
}

impl Position {
    fn pinned(&self) -> usize {
        match self.pin {
            Pin::Base => self.base,
            Pin::Offset => self.offset,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct CursorTable {
    slots: Vec<Option<Position>>,
    free: Vec<usize>,
}

impl CursorTable {
    /// Register a cursor whose first read is at `base`.
    pub(crate) fn open(&mut self, base: usize, pin: Pin) -> CursorId {
        let position = Some(Position {
            base,
            offset: base,
            pin,
        });
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = position;
                CursorId(slot)
            }
            None => {
                self.slots.push(position);
                CursorId(self.slots.len() - 1)
            }
        }
    }

    /// Free the slot. Returns `false` if it was already free.
    pub(crate) fn release(&mut self, id: &CursorId) -> bool {
        match self.slots.get_mut(id.0).and_then(Option::take) {
            Some(_) => {
                self.free.push(id.0);
                true
            }
            None => false,
        }
    }

    pub(crate) fn offset(&self, id: &CursorId) -> usize {
        self.position(id).offset
    }

    pub(crate) fn base(&self, id: &CursorId) -> usize {
        self.position(id).base
    }

    pub(crate) fn advance(&mut self, id: &CursorId) {
        if let Some(Some(position)) = self.slots.get_mut(id.0) {
            position.offset += 1;
        }
    }

    /// Lowest index any live cursor, or any replay of one, can still read.
    pub(crate) fn lowest_pin(&self) -> Option<usize> {
        self.slots.iter().flatten().map(Position::pinned).min()
    }

    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn position(&self, id: &CursorId) -> Position {
        match self.slots.get(id.0) {
            Some(Some(position)) => *position,
            _ => panic!("cursor {} was read after its slot was released", id.0),
        }
    }
}
