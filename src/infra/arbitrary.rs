use std::fmt;

use arbitrary::Arbitrary;

use crate::{
    core::{error::AddEdgeError, Key, Weight},
    graph::Graph,
};

#[derive(Debug, Arbitrary, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Index(pub usize);

impl Index {
    pub fn get(&self, m: usize) -> Option<usize> {
        if m > 0 {
            Some(self.0 % m)
        } else {
            None
        }
    }
}

/// A single graph construction operation.
#[derive(Debug, Arbitrary, Clone)]
pub enum BuildOp<K, W> {
    AddVertex(K),
    /// Connects two already registered vertices, chosen by index.
    AddEdge(Index, Index, W),
    /// Connects two vertices, registering them if necessary.
    Connect(K, K, W),
}

impl<K: Key, W> BuildOp<K, W> {
    /// Applies the operation. Invalid edges are rejected by the graph and
    /// reported back.
    ///
    /// The weight is converted to the weight type of the graph, which allows
    /// generating narrow weights for a graph with wide weights, so that sums
    /// along paths stay representable.
    pub fn apply<V>(self, graph: &mut Graph<K, V>) -> Result<(), AddEdgeError<K, V>>
    where
        W: Into<V>,
        V: Weight + fmt::Debug,
    {
        let n = graph.vertex_count();

        match self {
            BuildOp::AddVertex(key) => {
                graph.add_vertex(key);
                Ok(())
            }
            BuildOp::AddEdge(from, to, weight) => {
                let (Some(from), Some(to)) = (from.get(n), to.get(n)) else {
                    return Ok(());
                };

                let from = graph.vertex_ids().nth(from).cloned();
                let to = graph.vertex_ids().nth(to).cloned();

                match (from, to) {
                    (Some(from), Some(to)) => graph.add_edge(from, to, weight.into()),
                    _ => Ok(()),
                }
            }
            BuildOp::Connect(from, to, weight) => {
                graph.add_edge_connecting(from, to, weight.into())
            }
        }
    }
}

/// A graph construction followed by a search between vertices chosen by
/// index.
#[derive(Arbitrary, Clone)]
pub struct SearchInput<K, W> {
    pub ops: Vec<BuildOp<K, W>>,
    pub source: Index,
    pub goal: Option<Index>,
}

impl<K: Key, W> SearchInput<K, W> {
    /// Builds the graph, skipping rejected operations, and resolves the
    /// endpoints of the search. The endpoints are `None` for an empty graph.
    pub fn build<V>(self) -> (Graph<K, V>, Option<(K, Option<K>)>)
    where
        W: Into<V>,
        V: Weight + fmt::Debug,
    {
        let mut graph = Graph::new();

        for op in self.ops {
            // Rejected operations leave the graph untouched.
            let _ = op.apply(&mut graph);
        }

        let n = graph.vertex_count();
        let key = |index: Index| {
            index
                .get(n)
                .and_then(|i| graph.vertex_ids().nth(i))
                .cloned()
        };

        let endpoints = key(self.source).map(|source| (source, self.goal.and_then(key)));
        (graph, endpoints)
    }
}

impl<K: fmt::Debug, W: fmt::Debug> fmt::Debug for SearchInput<K, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SearchInput {{")?;
        writeln!(f, "    ops: vec![")?;

        for op in self.ops.iter() {
            writeln!(f, "        BuildOp::{:?},", op)?;
        }

        writeln!(f, "    ],")?;
        writeln!(f, "    source: {:?},", self.source)?;
        writeln!(f, "    goal: {:?},", self.goal)?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "// use `cargo test fuzz_replay_search_input`")
    }
}
