//! Combining two sequences: [`Zip`], [`Chain`] and [`Interleave`].

use crate::{Producer, Seq};

/// Pairs values from two producers, stopping at the shorter one.
pub struct Zip<A: Producer, B> {
    left: A,
    right: B,
    // left value waiting for a right partner after a failed pull
    pending: Option<A::Item>,
}

impl<A, B> Producer for Zip<A, B>
where
    A: Producer,
    B: Producer<Error = A::Error>,
{
    type Item = (A::Item, B::Item);
    type Error = A::Error;

    fn pull(&mut self) -> Result<Option<Self::Item>, A::Error> {
        let left = match self.pending.take() {
            Some(left) => left,
            None => match self.left.pull()? {
                Some(left) => left,
                None => return Ok(None),
            },
        };
        match self.right.pull() {
            Ok(Some(right)) => Ok(Some((left, right))),
            Ok(None) => Ok(None),
            Err(e) => {
                self.pending = Some(left);
                Err(e)
            }
        }
    }
}

/// Runs the first producer to exhaustion, then the second.
pub struct Chain<A, B> {
    first: Option<A>,
    second: B,
}

/// Create a producer that yields everything from `first`, then from `second`.
pub fn chain<A, B>(first: A, second: B) -> Chain<A, B>
where
    A: Producer,
    B: Producer<Item = A::Item, Error = A::Error>,
{
    Chain {
        first: Some(first),
        second,
    }
}

impl<A, B> Producer for Chain<A, B>
where
    A: Producer,
    B: Producer<Item = A::Item, Error = A::Error>,
{
    type Item = A::Item;
    type Error = A::Error;

    fn pull(&mut self) -> Result<Option<A::Item>, A::Error> {
        if let Some(first) = &mut self.first {
            match first.pull()? {
                Some(value) => return Ok(Some(value)),
                None => self.first = None, // we drop the first cursor once it is done
            }
        }
        self.second.pull()
    }
}

/// Alternates between two producers; once one runs out the other continues alone.
pub struct Interleave<A, B> {
    left: Option<A>,
    right: Option<B>,
    left_next: bool,
}

impl<A, B> Producer for Interleave<A, B>
where
    A: Producer,
    B: Producer<Item = A::Item, Error = A::Error>,
{
    type Item = A::Item;
    type Error = A::Error;

    fn pull(&mut self) -> Result<Option<A::Item>, A::Error> {
        for _ in 0..2 {
            let value = if self.left_next {
                pull_or_close(&mut self.left)?
            } else {
                pull_or_close(&mut self.right)?
            };
            self.left_next = !self.left_next;
            if value.is_some() {
                return Ok(value);
            }
        }
        Ok(None)
    }
}

fn pull_or_close<P: Producer>(slot: &mut Option<P>) -> Result<Option<P::Item>, P::Error> {
    let value = slot.pull()?;
    if value.is_none() {
        *slot = None;
    }
    Ok(value)
}

impl<T: Clone + 'static, E: 'static> Seq<T, E> {
    /// Pair this sequence with another, position by position.
    ///
    /// Zipping a sequence with a fork of itself is fine: both sides are
    /// independent cursors over one history.
    ///
    /// ```rust
    /// use recall::prelude::*;
    ///
    /// let numbers = seq![1, 2, 3, 4];
    /// let pairs = numbers.zip(&numbers.skip(1));
    /// assert_eq!(pairs.to_vec(), Ok(vec![(1, 2), (2, 3), (3, 4)]));
    /// ```
    pub fn zip<U>(&self, other: &Seq<U, E>) -> Seq<(T, U), E>
    where
        U: Clone + 'static,
    {
        self.derive(Zip {
            left: self.upstream(),
            right: other.upstream(),
            pending: None,
        })
    }

    /// Yield this sequence, then `other`.
    pub fn chain(&self, other: &Seq<T, E>) -> Seq<T, E> {
        self.derive(chain(self.upstream(), other.upstream()))
    }

    /// Alternate values from this sequence and `other`, starting with this one.
    pub fn interleave(&self, other: &Seq<T, E>) -> Seq<T, E> {
        self.derive(Interleave {
            left: Some(self.upstream()),
            right: Some(other.upstream()),
            left_next: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::build::{repeat, try_from_iter};
    use crate::{Seq, seq};

    #[test]
    fn test_zip_stops_at_shorter() {
        let letters = seq!['a', 'b', 'c'];
        let numbers = seq![1, 2];
        assert_eq!(letters.zip(&numbers).to_vec(), Ok(vec![('a', 1), ('b', 2)]));
        assert_eq!(numbers.zip(&letters).to_vec(), Ok(vec![(1, 'a'), (2, 'b')]));
    }

    #[test]
    fn test_zip_with_infinite() {
        let ones = Seq::new(repeat(1));
        let names = seq!["x", "y"];
        assert_eq!(names.zip(&ones).to_vec(), Ok(vec![("x", 1), ("y", 1)]));
    }

    #[test]
    fn test_zip_with_own_rest() {
        let seq = seq![1, 2, 3];
        let mut cursor = seq.replay();
        cursor.step().ok();
        let pairs = seq.zip(&cursor.rest());
        assert_eq!(pairs.to_vec(), Ok(vec![(1, 2), (2, 3)]));
    }

    #[test]
    fn test_zip_retries_after_right_failure() {
        let left = seq![1, 2];
        let right = Seq::new(try_from_iter(vec![Ok('a'), Err("lost"), Ok('b')]));
        let zipped = left.map_err(|never| match never {}).zip(&right);

        let mut cursor = zipped.replay();
        assert_eq!(cursor.step(), Ok(Some((1, 'a'))));
        assert_eq!(cursor.step(), Err("lost"));
        assert_eq!(cursor.step(), Ok(Some((2, 'b'))));
        assert_eq!(cursor.step(), Ok(None));
    }

    #[test]
    fn test_chain() {
        let head = seq![1, 2];
        let tail = seq![3];
        assert_eq!(head.chain(&tail).to_vec(), Ok(vec![1, 2, 3]));
        assert_eq!(tail.chain(&head).to_vec(), Ok(vec![3, 1, 2]));

        let empty: Seq<i32> = seq![];
        assert_eq!(empty.chain(&empty).to_vec(), Ok(vec![]));
    }

    #[test]
    fn test_interleave_uneven() {
        let odds = seq![1, 3, 5, 7];
        let evens = seq![2, 4];
        assert_eq!(odds.interleave(&evens).to_vec(), Ok(vec![1, 2, 3, 4, 5, 7]));
        assert_eq!(evens.interleave(&odds).to_vec(), Ok(vec![2, 1, 4, 3, 5, 7]));
    }
}
