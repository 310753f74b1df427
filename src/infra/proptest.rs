use std::fmt;

use proptest::{
    prelude::Rng,
    strategy::{NewTree, Strategy, ValueTree},
    test_runner::TestRunner,
};
use rustc_hash::FxHashSet;

use crate::{core::Weight, graph::Graph};

/// Strategy generating simple undirected graphs with vertices `0..n` and edge
/// weights from the given strategy.
///
/// The edge strategy must produce [valid](Weight::is_valid) weights.
pub fn graph_undirected<E: Strategy>(edge: E) -> GraphStrategy<E> {
    GraphStrategy::new(edge)
}

#[derive(Debug)]
pub struct GraphStrategy<E> {
    edge: E,
    params: StrategyParams,
}

impl<E: Strategy> GraphStrategy<E> {
    pub fn new(edge: E) -> Self {
        Self {
            edge,
            params: StrategyParams::default(),
        }
    }

    pub fn max_size(self, max_size: usize) -> Self {
        Self {
            params: StrategyParams {
                max_size,
                ..self.params
            },
            ..self
        }
    }

    pub fn connected(self) -> Self {
        Self {
            params: StrategyParams {
                connected: true,
                ..self.params
            },
            ..self
        }
    }

    pub fn density(self, density: f32) -> Self {
        assert!(
            density > 0.0 && density <= 1.0,
            "density must be in (0, 1] range"
        );

        Self {
            params: StrategyParams {
                density,
                ..self.params
            },
            ..self
        }
    }

    pub fn sparse(self) -> Self {
        self.density(0.05)
    }
}

#[derive(Debug, Clone, Copy)]
struct StrategyParams {
    max_size: usize,
    connected: bool,
    // (0, 1] - 1 means no limitation in choosing p, lower values artificially
    // decrease chosen p
    density: f32,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            max_size: 512,
            connected: false,
            density: 1.0,
        }
    }
}

impl<E> Strategy for GraphStrategy<E>
where
    E: Strategy,
    E::Value: Weight + fmt::Debug,
{
    type Tree = GraphValueTree<E::Tree>;
    type Value = Graph<usize, E::Value>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        let n = runner.rng().gen_range(0..=self.params.max_size);
        let p = runner.rng().gen::<f32>() * self.params.density;

        // Efficient generation of large random networks
        // http://vlado.fmf.uni-lj.si/pub/networks/doc/ms/rndgen.pdf
        let mut edges = Vec::new();

        let mut v = 1;
        let mut w = usize::MAX; // -1

        while v < n {
            let r: f32 = runner.rng().gen();
            w = w.wrapping_add(1) + ((1.0 - r).log10() / (1.0 - p).log10()).floor() as usize;

            while w >= v && v < n {
                w -= v;
                v += 1;
            }

            if v < n {
                // Half of the edges are stored with swapped endpoints, so that
                // the order of endpoints is not biased.
                let (s, t) = if runner.rng().gen_bool(0.5) {
                    (w, v)
                } else {
                    (v, w)
                };

                edges.push((s, t, self.edge.new_tree(runner)?));
            }
        }

        // Removing vertices or edges could break connectivity, so the structure
        // of connected graphs is not shrunk.
        let no_shrink = self.params.connected;

        if self.params.connected {
            let mut components = Components::new(n);

            for (s, t, _) in edges.iter() {
                components.union(*s, *t);
            }

            for v in 1..n {
                if components.union(v - 1, v) {
                    edges.push((v - 1, v, self.edge.new_tree(runner)?));
                }
            }
        }

        Ok(GraphValueTree {
            vertex_count: n,
            edges,
            structure: ShrinkStructureState::new(no_shrink),
            attr: ShrinkAttrState::new(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct GraphValueTree<E> {
    vertex_count: usize,
    edges: Vec<(usize, usize, E)>,
    structure: ShrinkStructureState,
    attr: ShrinkAttrState,
}

impl<E> ValueTree for GraphValueTree<E>
where
    E: ValueTree,
    E::Value: Weight + fmt::Debug,
{
    type Value = Graph<usize, E::Value>;

    fn current(&self) -> Self::Value {
        let removed = &self.structure.removed_vertices;

        // Remaining vertices are renumbered so that the keys are always
        // `0..n`.
        let mut keys = Vec::with_capacity(self.vertex_count);
        let mut next = 0;

        for v in 0..self.vertex_count {
            if removed.contains(&v) {
                keys.push(None);
            } else {
                keys.push(Some(next));
                next += 1;
            }
        }

        let mut graph = Graph::with_capacity(next, self.edges.len());

        for key in keys.iter().flatten() {
            graph.add_vertex(*key);
        }

        for (e, (s, t, edge)) in self.edges.iter().enumerate() {
            if !self.structure.edge_exists(e, (*s, *t)) {
                continue;
            }

            if let (Some(s), Some(t)) = (keys[*s], keys[*t]) {
                graph
                    .add_edge(s, t, edge.current())
                    .expect("generated graph is simple and weights are valid");
            }
        }

        graph
    }

    fn simplify(&mut self) -> bool {
        // First remove vertices and edges one by one, then simplify the
        // weights of the remaining edges.
        self.structure.simplify(self.vertex_count, &self.edges)
            || self.attr.simplify(&mut self.edges, &self.structure)
    }

    fn complicate(&mut self) -> bool {
        self.structure.complicate() || self.attr.complicate(&mut self.edges)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShrinkStructure {
    Vertex(usize),
    Edge(usize),
}

#[derive(Debug, Clone)]
struct ShrinkStructureState {
    removed_vertices: FxHashSet<usize>,
    removed_edges: FxHashSet<usize>,
    command: Option<ShrinkStructure>,
    previous: Option<ShrinkStructure>,
}

impl ShrinkStructureState {
    fn new(no_shrink: bool) -> Self {
        Self {
            removed_vertices: FxHashSet::default(),
            removed_edges: FxHashSet::default(),
            command: (!no_shrink).then_some(ShrinkStructure::Vertex(0)),
            previous: None,
        }
    }

    fn simplify<E>(&mut self, vertex_count: usize, edges: &[(usize, usize, E)]) -> bool {
        self.previous = None;

        loop {
            let Some(command) = self.command else {
                return false;
            };

            match command {
                ShrinkStructure::Vertex(v) if v >= vertex_count => {
                    self.command = Some(ShrinkStructure::Edge(0));
                }
                ShrinkStructure::Vertex(v) => {
                    self.command = Some(ShrinkStructure::Vertex(v + 1));

                    if self.removed_vertices.insert(v) {
                        self.previous = Some(command);
                        return true;
                    }
                }
                ShrinkStructure::Edge(e) if e >= edges.len() => {
                    self.command = None;
                }
                ShrinkStructure::Edge(e) => {
                    self.command = Some(ShrinkStructure::Edge(e + 1));

                    let (s, t, _) = edges[e];
                    if self.edge_exists(e, (s, t)) {
                        self.removed_edges.insert(e);
                        self.previous = Some(command);
                        return true;
                    }
                }
            }
        }
    }

    fn complicate(&mut self) -> bool {
        match self.previous.take() {
            Some(ShrinkStructure::Vertex(v)) => self.removed_vertices.remove(&v),
            Some(ShrinkStructure::Edge(e)) => self.removed_edges.remove(&e),
            None => false,
        }
    }

    fn edge_exists(&self, e: usize, (s, t): (usize, usize)) -> bool {
        !(self.removed_vertices.contains(&s)
            || self.removed_vertices.contains(&t)
            || self.removed_edges.contains(&e))
    }
}

#[derive(Debug, Clone)]
struct ShrinkAttrState {
    edge: usize,
    previous: Option<usize>,
}

// The implementation is adapted from VecValueTree
// (https://github.com/proptest-rs/proptest/blob/ef305c4fadd7c0ba13a349f542da00d290116ccb/proptest/src/collection.rs#L603-L672).
impl ShrinkAttrState {
    fn new() -> Self {
        Self {
            edge: 0,
            previous: None,
        }
    }

    fn simplify<E: ValueTree>(
        &mut self,
        edges: &mut [(usize, usize, E)],
        structure: &ShrinkStructureState,
    ) -> bool {
        while let Some((s, t, edge)) = edges.get_mut(self.edge) {
            if structure.edge_exists(self.edge, (*s, *t)) && edge.simplify() {
                self.previous = Some(self.edge);
                return true;
            }

            self.edge += 1;
        }

        false
    }

    fn complicate<E: ValueTree>(&mut self, edges: &mut [(usize, usize, E)]) -> bool {
        let Some(e) = self.previous else {
            return false;
        };

        if edges[e].2.complicate() {
            true
        } else {
            self.previous = None;
            false
        }
    }
}

// Union-find over vertex indices.
struct Components {
    parent: Vec<usize>,
}

impl Components {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut v: usize) -> usize {
        while self.parent[v] != v {
            self.parent[v] = self.parent[self.parent[v]];
            v = self.parent[v];
        }

        v
    }

    /// Returns `true` if the vertices were in different components.
    fn union(&mut self, u: usize, v: usize) -> bool {
        let (u, v) = (self.find(u), self.find(v));
        self.parent[u] = v;
        u != v
    }
}

#[cfg(test)]
mod tests {
    use proptest::{strategy::check_strategy_sanity, test_runner::TestRunner};

    use crate::infra::testing::check_consistency;

    use super::*;

    fn is_connected(graph: &Graph<usize, u32>) -> bool {
        let Some(source) = graph.vertex_ids().next() else {
            return true;
        };

        crate::infra::testing::brute_force_distances(graph, source).len() == graph.vertex_count()
    }

    #[test]
    #[ignore = "takes too long, run it only when the strategy is changed"]
    fn graph_strategy_sanity() {
        check_strategy_sanity(graph_undirected(0..100u32).max_size(16), None);
    }

    #[test]
    fn generates_consistent_graphs() {
        let strategy = graph_undirected(0..100u32).max_size(32);
        let mut runner = TestRunner::deterministic();

        for _ in 0..32 {
            let graph = strategy.new_tree(&mut runner).unwrap().current();
            assert!(check_consistency(&graph).is_ok());
            assert!(graph.vertex_ids().copied().eq(0..graph.vertex_count()));
        }
    }

    #[test]
    fn generates_connected_graphs() {
        let strategy = graph_undirected(0..100u32).max_size(32).sparse().connected();
        let mut runner = TestRunner::deterministic();

        for _ in 0..32 {
            let graph = strategy.new_tree(&mut runner).unwrap().current();
            assert!(is_connected(&graph));
        }
    }

    #[test]
    fn simplifies_structure_and_data() {
        let strategy = graph_undirected(0..100u32).max_size(64);
        let mut runner = TestRunner::deterministic();

        let mut tree = loop {
            let tree = strategy.new_tree(&mut runner).unwrap();
            if tree.current().edge_count() > 0 {
                break tree;
            }
        };

        loop {
            let graph = tree.current();

            if graph.edge_count() < 1 {
                if !tree.complicate() {
                    break;
                }
            } else if !tree.simplify() {
                break;
            }
        }

        let graph = tree.current();

        // No loops and multi edges => two vertices connected with one edge.
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 1);

        // Weights simplified too.
        for (_, _, weight) in graph.edges() {
            assert_eq!(*weight, 0);
        }
    }
}
