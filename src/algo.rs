//! Graph algorithms.

use std::fmt;

use crate::{
    core::{Key, Weight},
    graph::Graph,
};

pub mod shortest_paths;

pub use shortest_paths::{DijkstraSteps, ShortestPaths, StepEvent};

/// Starts a stepwise search for the shortest path between `start` and `end`.
///
/// Shorthand for `ShortestPaths::on(graph).goal(end).steps(start)`. Fails
/// before producing any event if either vertex is not in the graph.
///
/// # Examples
///
/// ```
/// use pathstep::{algo, graph::Graph};
///
/// let graph = Graph::from_edges([('A', 'B', 7u32), ('B', 'C', 2), ('A', 'C', 10)]).unwrap();
///
/// for event in algo::run(&graph, 'A', 'C').unwrap() {
///     println!("{event}");
/// }
/// ```
pub fn run<K, W>(
    graph: &Graph<K, W>,
    start: K,
    end: K,
) -> Result<DijkstraSteps<'_, K, W>, shortest_paths::Error<K>>
where
    K: Key,
    W: Weight + fmt::Debug,
{
    ShortestPaths::on(graph).goal(end).steps(start)
}
