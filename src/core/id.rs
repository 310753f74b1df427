//! Identification of vertices.
//!
//! Users name vertices by arbitrary [keys](Key) such as `char`, `&str` or
//! `String`. Internally, every key is interned to a dense [`VertexId`] in the
//! order of registration, so that the storage and the algorithms can work with
//! contiguous arrays and bit sets instead of hash maps.

use std::{fmt, hash::Hash};

/// A user-facing identifier of a vertex.
///
/// This trait is implemented for any type that is cheaply cloneable, hashable
/// and comparable for equality. Keys are cloned into every
/// [event](crate::algo::shortest_paths::StepEvent) that mentions them, so
/// small types like `char`, `&'static str` or integers are preferable.
pub trait Key: Clone + Eq + Hash + fmt::Debug {}

impl<T> Key for T where T: Clone + Eq + Hash + fmt::Debug {}

/// Dense integer index of a vertex within one graph.
///
/// Vertex ids are assigned in the order in which the vertices are added,
/// starting at zero. They are meaningful only for the graph that produced
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u32);

impl VertexId {
    /// Conceptually `None` in `Option<VertexId>`, but without using `Option`.
    pub const SENTINEL: VertexId = VertexId(u32::MAX);

    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// # Panics
    ///
    /// Panics if the index does not fit into the backing integer.
    pub fn from_usize(index: usize) -> Self {
        Self(index.try_into().expect("id type overflow"))
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl From<usize> for VertexId {
    fn from(index: usize) -> Self {
        Self::from_usize(index)
    }
}

impl From<VertexId> for usize {
    fn from(id: VertexId) -> Self {
        id.as_usize()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() {
        let id = VertexId::from(42usize);
        assert_eq!(id.as_usize(), 42);
        assert_eq!(usize::from(id), 42);
        assert_eq!(id.to_string(), "v42");
        assert!(!id.is_sentinel());
        assert!(VertexId::SENTINEL.is_sentinel());
    }

    #[test]
    fn ordering_follows_index() {
        assert!(VertexId::from(1usize) < VertexId::from(2usize));
    }
}
