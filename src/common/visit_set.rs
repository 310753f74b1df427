use std::marker::PhantomData;

use fixedbitset::FixedBitSet;

use crate::core::VertexId;

/// A set of visited vertices.
pub trait VisitSet<I> {
    /// Marks the element as visited.
    ///
    /// Returns `true` when this is the first time the element is visited.
    fn visit(&mut self, id: I) -> bool;

    /// Returns `true` if the element is marked as visited.
    fn is_visited(&self, id: &I) -> bool;

    /// Returns the number of visited elements.
    fn visited_count(&self) -> usize;
}

/// Tiny [`FixedBitSet`] wrapper adding a generic type of the elements the set
/// holds.
#[derive(Debug, Clone)]
pub struct TypedBitSet<T> {
    inner: FixedBitSet,
    ty: PhantomData<T>,
}

impl<T> TypedBitSet<T> {
    /// Creates a new empty bit set with given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: FixedBitSet::with_capacity(capacity),
            ty: PhantomData,
        }
    }
}

impl VisitSet<VertexId> for TypedBitSet<VertexId> {
    fn visit(&mut self, id: VertexId) -> bool {
        if self.inner.len() <= id.as_usize() {
            self.inner.grow(id.as_usize() + 1);
        }
        !self.inner.put(id.as_usize())
    }

    fn is_visited(&self, id: &VertexId) -> bool {
        self.inner.contains(id.as_usize())
    }

    fn visited_count(&self) -> usize {
        self.inner.count_ones(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_set_grows() {
        let mut set = TypedBitSet::<VertexId>::with_capacity(4);
        let v3 = VertexId::from_usize(3);
        let v70 = VertexId::from_usize(70);

        assert!(set.visit(v3));
        assert!(!set.visit(v3));
        assert!(set.visit(v70));

        assert!(set.is_visited(&v3));
        assert!(set.is_visited(&v70));
        assert!(!set.is_visited(&VertexId::from_usize(4)));
        assert_eq!(set.visited_count(), 2);
    }

    #[test]
    fn out_of_range_is_not_visited() {
        let set = TypedBitSet::<VertexId>::with_capacity(0);

        assert!(!set.is_visited(&VertexId::from_usize(100)));
        assert_eq!(set.visited_count(), 0);
    }
}
