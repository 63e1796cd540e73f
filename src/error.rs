//! Errors reported by the tree-backed collections.

use std::error;
use std::fmt;
use std::result;

/// The ways a collection operation can fail. Every variant is recoverable and no element is lost
/// when an operation fails.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A new node could not be allocated, either because the arena reached its configured node
    /// limit or because the allocator refused to reserve another chunk.
    AllocationFailed { limit: Option<usize> },
    /// A checked keyed access named a key that is not in the collection.
    KeyNotFound,
    /// A checked access to the first or last element of an empty collection.
    Empty,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailed { limit: Some(limit) } => {
                write!(f, "failed to allocate node: limit of {} nodes reached", limit)
            },
            Error::AllocationFailed { limit: None } => write!(f, "failed to allocate node"),
            Error::KeyNotFound => write!(f, "key does not exist"),
            Error::Empty => write!(f, "collection is empty"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::AllocationFailed { limit: Some(4) }.to_string(),
            "failed to allocate node: limit of 4 nodes reached",
        );
        assert_eq!(Error::AllocationFailed { limit: None }.to_string(), "failed to allocate node");
        assert_eq!(Error::KeyNotFound.to_string(), "key does not exist");
        assert_eq!(Error::Empty.to_string(), "collection is empty");
    }
}
