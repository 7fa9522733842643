//! Error types for precondition checks on sequences

use thiserror::Error;

/// Failure to prove that a sequence holds at least one value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NonEmptyError<E> {
    /// The producer ended before yielding anything
    #[error("sequence was unexpectedly empty")]
    Empty,

    /// The producer failed while the first value was being pulled
    #[error("producer failed while checking for a first value")]
    Producer(#[source] E),
}

impl<E> NonEmptyError<E> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The producer failure, if that is what went wrong.
    pub fn into_producer_error(self) -> Option<E> {
        match self {
            Self::Empty => None,
            Self::Producer(e) => Some(e),
        }
    }
}

impl<E> From<E> for NonEmptyError<E> {
    fn from(e: E) -> Self {
        Self::Producer(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error as _, fmt};

    #[derive(Debug, PartialEq)]
    struct Timeout;

    impl fmt::Display for Timeout {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("timed out")
        }
    }

    impl std::error::Error for Timeout {}

    #[test]
    fn test_messages() {
        let empty: NonEmptyError<Timeout> = NonEmptyError::Empty;
        assert_eq!(empty.to_string(), "sequence was unexpectedly empty");
        assert!(empty.source().is_none());

        let failed = NonEmptyError::Producer(Timeout);
        assert_eq!(
            failed.to_string(),
            "producer failed while checking for a first value"
        );
        assert_eq!(failed.source().map(ToString::to_string), Some("timed out".to_string()));
    }

    #[test]
    fn test_into_producer_error() {
        assert_eq!(NonEmptyError::<Timeout>::Empty.into_producer_error(), None);
        assert_eq!(NonEmptyError::from(Timeout).into_producer_error(), Some(Timeout));
    }
}
