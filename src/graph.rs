//! Weighted undirected graph over user-defined vertex keys.
//!
//! # Examples
//!
//! ```
//! use pathstep::graph::Graph;
//!
//! let mut graph = Graph::new();
//!
//! graph.add_vertex('A');
//! graph.add_vertex('B');
//! graph.add_vertex('C');
//!
//! graph.add_edge('A', 'B', 7u32).unwrap();
//! graph.add_edge('B', 'C', 2).unwrap();
//!
//! let neighbors = graph.neighbors_of(&'B').unwrap().collect::<Vec<_>>();
//! assert_eq!(neighbors, vec![(&'A', &7), (&'C', &2)]);
//! ```

use std::{fmt, ops::Index, slice};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{
    core::{
        error::{
            AddEdgeError, AddEdgeErrorKind, AddVertexError, AddVertexErrorKind,
            UnknownVertexError,
        },
        Key, VertexId, Weight,
    },
    storage::{adj_list, AdjList},
};

/// Weighted undirected graph with simple edges (no multi-edges, no
/// self-loops) and non-negative weights.
///
/// Vertices are identified by keys of type `K` and are kept in the order of
/// registration. The neighbors of a vertex are kept in the order in which the
/// edges were added. Both orders are stable for the lifetime of the graph,
/// which makes the algorithms running on it deterministic.
#[derive(Clone)]
pub struct Graph<K, W> {
    keys: Vec<K>,
    index: FxHashMap<K, VertexId>,
    storage: AdjList<W>,
}

impl<K: Key, W> Graph<K, W> {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            index: FxHashMap::default(),
            storage: AdjList::new(),
        }
    }

    pub fn with_capacity(vertex_capacity: usize, edge_capacity: usize) -> Self {
        let mut index = FxHashMap::default();
        index.reserve(vertex_capacity);

        Self {
            keys: Vec::with_capacity(vertex_capacity),
            index,
            storage: AdjList::with_capacity(vertex_capacity, edge_capacity),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.keys.len()
    }

    pub fn edge_count(&self) -> usize {
        self.storage.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Registers a vertex if it is not present yet. Returns its id in either
    /// case.
    ///
    /// # Panics
    ///
    /// Panics if a new vertex does not fit into the id space. Use
    /// [`try_add_vertex`](Self::try_add_vertex) to get an error instead.
    pub fn add_vertex(&mut self, key: K) -> VertexId {
        if let Some(id) = self.id_of(&key) {
            return id;
        }

        assert!(
            has_capacity(self.keys.len()),
            "vertex count exceeds the id space"
        );
        self.insert_vertex(key)
    }

    /// Registers a vertex, failing if a vertex with the same key is already
    /// present.
    pub fn try_add_vertex(&mut self, key: K) -> Result<VertexId, AddVertexError<K>> {
        if self.contains_vertex(&key) {
            return Err(AddVertexError::new(key, AddVertexErrorKind::AlreadyExists));
        }

        if !has_capacity(self.keys.len()) {
            return Err(AddVertexError::new(
                key,
                AddVertexErrorKind::CapacityOverflow,
            ));
        }

        Ok(self.insert_vertex(key))
    }

    fn insert_vertex(&mut self, key: K) -> VertexId {
        let id = self.storage.add_vertex();
        trace!(?key, %id, "vertex added");

        self.index.insert(key.clone(), id);
        self.keys.push(key);
        id
    }

    pub fn contains_vertex(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn id_of(&self, key: &K) -> Option<VertexId> {
        self.index.get(key).copied()
    }

    pub fn key(&self, id: VertexId) -> Option<&K> {
        self.keys.get(id.as_usize())
    }

    /// Returns all vertex keys in the order of registration.
    pub fn vertex_ids(&self) -> VertexKeys<'_, K> {
        self.keys.iter()
    }

    /// Returns the neighbors of a vertex paired with the weights of the
    /// connecting edges, in the order in which the edges were added.
    pub fn neighbors_of(&self, key: &K) -> Result<NeighborsOf<'_, K, W>, UnknownVertexError<K>> {
        let id = self
            .id_of(key)
            .ok_or_else(|| UnknownVertexError(key.clone()))?;

        Ok(NeighborsOf {
            inner: self.neighbors_by_id(id),
            keys: &self.keys,
        })
    }

    pub(crate) fn neighbors_by_id(&self, id: VertexId) -> adj_list::Neighbors<'_, W> {
        self.storage
            .neighbors(id)
            .expect("vertex ids handed out by this graph are valid")
    }

    pub fn edge_weight(&self, from: &K, to: &K) -> Option<&W> {
        self.storage.edge_weight(self.id_of(from)?, self.id_of(to)?)
    }

    pub fn contains_edge(&self, from: &K, to: &K) -> bool {
        self.edge_weight(from, to).is_some()
    }

    /// Returns all edges, each reported once, in the order they were added.
    pub fn edges(&self) -> impl Iterator<Item = (&K, &K, &W)> + '_ {
        self.storage
            .edges()
            .map(|(from, to, weight)| (&self[from], &self[to], weight))
    }

    pub(crate) fn storage(&self) -> &AdjList<W> {
        &self.storage
    }
}

impl<K: Key, W: Weight + fmt::Debug> Graph<K, W> {
    /// Connects two registered vertices with an undirected edge.
    ///
    /// Fails if any endpoint is not registered, if the endpoints are equal,
    /// if the weight is negative or not finite, or if the vertices are already
    /// connected.
    pub fn add_edge(&mut self, from: K, to: K, weight: W) -> Result<(), AddEdgeError<K, W>> {
        let (Some(u), Some(v)) = (self.id_of(&from), self.id_of(&to)) else {
            return Err(AddEdgeError::new(
                from,
                to,
                weight,
                AddEdgeErrorKind::UnknownVertex,
            ));
        };

        if let Some(kind) = self.edge_defect(&from, &to, &weight) {
            return Err(AddEdgeError::new(from, to, weight, kind));
        }

        trace!(?from, ?to, ?weight, "edge added");
        self.storage.add_edge(u, v, weight);
        Ok(())
    }

    /// Adds an edge, registering its endpoints first if necessary.
    ///
    /// The edge is validated before any endpoint is registered, so a rejected
    /// edge leaves the graph unchanged.
    pub fn add_edge_connecting(
        &mut self,
        from: K,
        to: K,
        weight: W,
    ) -> Result<(), AddEdgeError<K, W>> {
        if let Some(kind) = self.edge_defect(&from, &to, &weight) {
            return Err(AddEdgeError::new(from, to, weight, kind));
        }

        self.add_vertex(from.clone());
        self.add_vertex(to.clone());
        self.add_edge(from, to, weight)
    }

    // Checks everything but endpoint registration. Endpoints that are not
    // registered yet cannot be connected, so they are never a duplicate.
    fn edge_defect(&self, from: &K, to: &K, weight: &W) -> Option<AddEdgeErrorKind> {
        if from == to {
            Some(AddEdgeErrorKind::SelfLoop)
        } else if !weight.is_valid() {
            Some(AddEdgeErrorKind::InvalidWeight)
        } else if self.contains_edge(from, to) {
            Some(AddEdgeErrorKind::DuplicateEdge)
        } else {
            None
        }
    }

    /// Adds all edges from the iterator, registering endpoints as needed.
    /// Stops at the first invalid edge.
    pub fn extend_with_edges<I>(&mut self, edges: I) -> Result<(), AddEdgeError<K, W>>
    where
        I: IntoIterator<Item = (K, K, W)>,
    {
        for (from, to, weight) in edges {
            self.add_edge_connecting(from, to, weight)?;
        }

        Ok(())
    }

    pub fn from_edges<I>(edges: I) -> Result<Self, AddEdgeError<K, W>>
    where
        I: IntoIterator<Item = (K, K, W)>,
    {
        let mut graph = Self::new();
        graph.extend_with_edges(edges)?;
        Ok(graph)
    }
}

impl<K: Key, W> Default for Graph<K, W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, W: fmt::Debug> fmt::Debug for Graph<K, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edges = self
            .storage
            .edges()
            .map(|(from, to, weight)| (&self[from], &self[to], weight))
            .collect::<Vec<_>>();

        f.debug_struct("Graph")
            .field("vertices", &self.keys)
            .field("edges", &edges)
            .finish()
    }
}

/// Graphs are equal if they have the same vertices and the same edges, both
/// in the same order.
impl<K: Key, W: PartialEq> PartialEq for Graph<K, W> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.edges().eq(other.edges())
    }
}

impl<K, W> Index<VertexId> for Graph<K, W> {
    type Output = K;

    fn index(&self, id: VertexId) -> &Self::Output {
        &self.keys[id.as_usize()]
    }
}

pub type VertexKeys<'a, K> = slice::Iter<'a, K>;

/// Iterator over the neighbors of a vertex. Returned by
/// [`Graph::neighbors_of`].
pub struct NeighborsOf<'a, K, W> {
    inner: adj_list::Neighbors<'a, W>,
    keys: &'a [K],
}

impl<'a, K, W> Iterator for NeighborsOf<'a, K, W> {
    type Item = (&'a K, &'a W);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(id, weight)| (&self.keys[id.as_usize()], weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

// The sentinel id is reserved, so at most `SENTINEL` vertices fit.
fn has_capacity(vertex_count: usize) -> bool {
    vertex_count < VertexId::SENTINEL.as_usize()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn create_triangle() -> Graph<char, u32> {
        let mut graph = Graph::new();

        graph.add_vertex('A');
        graph.add_vertex('B');
        graph.add_vertex('C');

        graph.add_edge('A', 'B', 7).unwrap();
        graph.add_edge('A', 'C', 8).unwrap();
        graph.add_edge('B', 'C', 2).unwrap();

        graph
    }

    #[test]
    fn add_vertex_idempotent() {
        let mut graph = Graph::<_, u32>::new();

        let a = graph.add_vertex("a");
        let b = graph.add_vertex("b");

        assert_eq!(graph.add_vertex("a"), a);
        assert_ne!(a, b);
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph[a], "a");
        assert_eq!(graph.key(b), Some(&"b"));
    }

    #[test]
    fn try_add_vertex_duplicate() {
        let mut graph = Graph::<_, u32>::new();

        graph.try_add_vertex('A').unwrap();

        assert_matches!(
            graph.try_add_vertex('A'),
            Err(AddVertexError {
                key: 'A',
                kind: AddVertexErrorKind::AlreadyExists
            })
        );
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn vertex_ids_stable_order() {
        let mut graph = Graph::<_, u32>::new();

        for key in ['H', 'A', 'D', 'B'] {
            graph.add_vertex(key);
        }

        let first = graph.vertex_ids().copied().collect::<Vec<_>>();
        let second = graph.vertex_ids().copied().collect::<Vec<_>>();

        assert_eq!(first, vec!['H', 'A', 'D', 'B']);
        assert_eq!(first, second);
    }

    #[test]
    fn adjacency_symmetric() {
        let graph = create_triangle();

        for (from, to, weight) in graph.edges() {
            assert!(graph
                .neighbors_of(from)
                .unwrap()
                .any(|(n, w)| n == to && w == weight));
            assert!(graph
                .neighbors_of(to)
                .unwrap()
                .any(|(n, w)| n == from && w == weight));
        }

        assert_eq!(graph.edge_weight(&'C', &'B'), Some(&2));
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn neighbors_in_insertion_order() {
        let graph = create_triangle();

        assert_eq!(
            graph.neighbors_of(&'C').unwrap().collect::<Vec<_>>(),
            vec![(&'A', &8), (&'B', &2)]
        );
    }

    #[test]
    fn neighbors_of_unknown() {
        let graph = create_triangle();

        assert_matches!(graph.neighbors_of(&'Z').err(), Some(UnknownVertexError('Z')));
    }

    #[test]
    fn add_edge_unknown_vertex() {
        let mut graph = create_triangle();

        assert_matches!(
            graph.add_edge('A', 'Z', 1),
            Err(AddEdgeError {
                kind: AddEdgeErrorKind::UnknownVertex,
                ..
            })
        );
        assert_matches!(
            graph.add_edge('Y', 'A', 1),
            Err(AddEdgeError {
                kind: AddEdgeErrorKind::UnknownVertex,
                ..
            })
        );
    }

    #[test]
    fn add_edge_self_loop() {
        let mut graph = create_triangle();

        assert_matches!(
            graph.add_edge('A', 'A', 1),
            Err(AddEdgeError {
                kind: AddEdgeErrorKind::SelfLoop,
                ..
            })
        );
    }

    #[test]
    fn add_edge_invalid_weight() {
        let mut graph = Graph::new();
        graph.add_vertex(0);
        graph.add_vertex(1);

        for weight in [-1.0, f64::NAN, f64::INFINITY] {
            let err = graph.add_edge(0, 1, weight).unwrap_err();
            assert_eq!(err.kind, AddEdgeErrorKind::InvalidWeight);
        }

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn add_edge_duplicate() {
        let mut graph = create_triangle();

        assert_matches!(
            graph.add_edge('B', 'A', 3),
            Err(AddEdgeError {
                kind: AddEdgeErrorKind::DuplicateEdge,
                ..
            })
        );
        assert_eq!(graph.edge_weight(&'A', &'B'), Some(&7));
    }

    #[test]
    fn from_edges_registers_endpoints() {
        let graph = Graph::from_edges([("x", "y", 1u8), ("y", "z", 2)]).unwrap();

        assert_eq!(
            graph.vertex_ids().copied().collect::<Vec<_>>(),
            vec!["x", "y", "z"]
        );
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn from_edges_stops_on_error() {
        let result = Graph::from_edges([("x", "y", 1i32), ("y", "z", -2)]);

        assert_matches!(
            result,
            Err(AddEdgeError {
                kind: AddEdgeErrorKind::InvalidWeight,
                weight: -2,
                ..
            })
        );
    }

    #[test]
    fn rejected_connecting_edge_registers_nothing() {
        let mut graph = Graph::<i8, i8>::new();

        assert_matches!(
            graph.add_edge_connecting(3, 5, -1),
            Err(AddEdgeError {
                kind: AddEdgeErrorKind::InvalidWeight,
                ..
            })
        );
        assert_matches!(
            graph.add_edge_connecting(4, 4, 1),
            Err(AddEdgeError {
                kind: AddEdgeErrorKind::SelfLoop,
                ..
            })
        );
        assert_eq!(graph.vertex_count(), 0);

        graph.add_edge_connecting(3, 5, 1).unwrap();
        assert_matches!(
            graph.add_edge_connecting(5, 3, 2),
            Err(AddEdgeError {
                kind: AddEdgeErrorKind::DuplicateEdge,
                ..
            })
        );
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn extend_with_edges_leaves_no_stray_endpoints() {
        let mut graph = Graph::from_edges([("x", "y", 1i32)]).unwrap();

        let result = graph.extend_with_edges([("y", "z", 2), ("z", "w", -3)]);

        assert!(result.is_err());
        assert_eq!(
            graph.vertex_ids().copied().collect::<Vec<_>>(),
            vec!["x", "y", "z"]
        );
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn capacity_excludes_sentinel() {
        assert!(has_capacity(0));
        assert!(has_capacity(VertexId::SENTINEL.as_usize() - 1));
        assert!(!has_capacity(VertexId::SENTINEL.as_usize()));
    }

    #[test]
    fn equality_respects_order() {
        let graph = create_triangle();
        let same = Graph::from_edges([('A', 'B', 7), ('A', 'C', 8), ('B', 'C', 2)]).unwrap();
        let reordered = Graph::from_edges([('A', 'C', 8), ('A', 'B', 7), ('B', 'C', 2)]).unwrap();

        assert_eq!(graph, same);
        assert_ne!(graph, reordered);
    }
}
