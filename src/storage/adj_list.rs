use std::slice;

use crate::core::VertexId;

/// Undirected adjacency list.
///
/// Every edge is stored once, together with its weight, and referenced from
/// the neighbor lists of both its endpoints. This keeps the adjacency
/// symmetric by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjList<W> {
    vertices: Vec<Vec<Adj>>,
    edges: Vec<W>,
    endpoints: Vec<[VertexId; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Adj {
    neighbor: VertexId,
    edge: usize,
}

impl<W> AdjList<W> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            endpoints: Vec::new(),
        }
    }

    pub fn with_capacity(vertex_capacity: usize, edge_capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_capacity),
            edges: Vec::with_capacity(edge_capacity),
            endpoints: Vec::with_capacity(edge_capacity),
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn add_vertex(&mut self) -> VertexId {
        let id = VertexId::from_usize(self.vertices.len());
        self.vertices.push(Vec::new());
        id
    }

    /// Connects two existing vertices. The caller is responsible for checking
    /// that both vertices exist and are not connected yet.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: W) {
        let edge = self.edges.len();
        self.edges.push(weight);
        self.endpoints.push([from, to]);

        self.vertices[from.as_usize()].push(Adj { neighbor: to, edge });

        // A self-loop would otherwise be reported twice.
        if from != to {
            self.vertices[to.as_usize()].push(Adj {
                neighbor: from,
                edge,
            });
        }
    }

    /// Returns the neighbors of a vertex together with the weights of the
    /// connecting edges, in the order in which the edges were added.
    pub fn neighbors(&self, id: VertexId) -> Option<Neighbors<'_, W>> {
        self.vertices.get(id.as_usize()).map(|adj| Neighbors {
            inner: adj.iter(),
            edges: &self.edges,
        })
    }

    pub fn degree(&self, id: VertexId) -> Option<usize> {
        self.vertices.get(id.as_usize()).map(Vec::len)
    }

    pub fn edge_weight(&self, from: VertexId, to: VertexId) -> Option<&W> {
        // Scan the shorter of the two neighbor lists.
        let (from, to) = match (self.degree(from)?, self.degree(to)?) {
            (lhs, rhs) if lhs <= rhs => (from, to),
            _ => (to, from),
        };

        self.vertices[from.as_usize()]
            .iter()
            .find(|adj| adj.neighbor == to)
            .map(|adj| &self.edges[adj.edge])
    }

    pub fn contains_edge(&self, from: VertexId, to: VertexId) -> bool {
        self.edge_weight(from, to).is_some()
    }

    /// Returns all edges, each reported once with the endpoints in the order
    /// they were given when added.
    pub fn edges(&self) -> EdgesIter<'_, W> {
        EdgesIter {
            inner: self.endpoints.iter().zip(self.edges.iter()),
        }
    }
}

impl<W> Default for AdjList<W> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Neighbors<'a, W> {
    inner: slice::Iter<'a, Adj>,
    edges: &'a [W],
}

impl<'a, W> Iterator for Neighbors<'a, W> {
    type Item = (VertexId, &'a W);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|adj| (adj.neighbor, &self.edges[adj.edge]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<W> ExactSizeIterator for Neighbors<'_, W> {}

pub struct EdgesIter<'a, W> {
    inner: std::iter::Zip<slice::Iter<'a, [VertexId; 2]>, slice::Iter<'a, W>>,
}

impl<'a, W> Iterator for EdgesIter<'a, W> {
    type Item = (VertexId, VertexId, &'a W);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|([from, to], weight)| (*from, *to, weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
