use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::{
    algo::shortest_paths::{ShortestPaths, StepEvent},
    core::{Distance, Key, Weight},
    graph::Graph,
};

/// The graph used throughout the documentation of the stepper. The shortest
/// path from A to E is A, B, F, H, E with distance 13.
pub fn create_demo_graph() -> Graph<char, u32> {
    Graph::from_edges([
        ('A', 'B', 7),
        ('A', 'C', 8),
        ('B', 'F', 2),
        ('C', 'F', 6),
        ('C', 'G', 4),
        ('F', 'D', 8),
        ('F', 'G', 9),
        ('F', 'H', 3),
        ('E', 'H', 1),
    ])
    .expect("demo graph is valid")
}

pub fn create_complete<W>(vertex_count: usize, weight: W) -> Graph<usize, W>
where
    W: Weight + fmt::Debug,
{
    let mut graph = Graph::with_capacity(vertex_count, vertex_count * vertex_count / 2);

    for v in 0..vertex_count {
        graph.add_vertex(v);
    }

    for u in 0..vertex_count {
        for v in (u + 1)..vertex_count {
            graph
                .add_edge(u, v, weight.clone())
                .expect("complete graph edges are valid");
        }
    }

    graph
}

pub fn create_path<W>(vertex_count: usize, weight: W) -> Graph<usize, W>
where
    W: Weight + fmt::Debug,
{
    let mut graph = Graph::with_capacity(vertex_count, vertex_count.saturating_sub(1));

    for v in 0..vertex_count {
        graph.add_vertex(v);
    }

    for v in 1..vertex_count {
        graph
            .add_edge(v - 1, v, weight.clone())
            .expect("path edges are valid");
    }

    graph
}

/// Computes the distances from the source by relaxing all edges until a fixed
/// point is reached (Bellman-Ford).
pub fn brute_force_distances<K, W>(graph: &Graph<K, W>, source: &K) -> FxHashMap<K, W>
where
    K: Key,
    W: Weight,
{
    let mut dist = FxHashMap::default();

    if !graph.contains_vertex(source) {
        return dist;
    }

    dist.insert(source.clone(), W::zero());

    for _ in 0..graph.vertex_count() {
        let mut changed = false;

        for (u, v, weight) in graph.edges() {
            for (u, v) in [(u, v), (v, u)] {
                let Some(candidate) = dist.get(u).and_then(|d: &W| d.checked_add(weight)) else {
                    continue;
                };

                if dist.get(v).map_or(true, |d| candidate < *d) {
                    dist.insert(v.clone(), candidate);
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    dist
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyCheckError {
    #[error("edges iterator count ({0}) is not equal to edge count ({1})")]
    EdgesEdgeCountMismatch(usize, usize),
    #[error("sum of degrees ({0}) is not equal to doubled edge count ({1})")]
    HandshakingLemma(usize, usize),
    #[error("vertex {0} is a neighbor of {1}, but not the other way around")]
    AsymmetricAdjacency(String, String),
    #[error("edge {0} -- {1} is a self-loop or a multi-edge")]
    NotSimple(String, String),
}

/// Checks that the graph is a simple undirected graph with symmetric
/// adjacency.
pub fn check_consistency<K, W>(graph: &Graph<K, W>) -> Result<(), ConsistencyCheckError>
where
    K: Key,
{
    let edge_count = graph.edge_count();

    let edges = graph.edges().count();
    if edges != edge_count {
        return Err(ConsistencyCheckError::EdgesEdgeCountMismatch(
            edges, edge_count,
        ));
    }

    let mut seen = FxHashSet::default();
    let mut deg_sum = 0;

    for u in graph.vertex_ids() {
        for (v, _) in graph.neighbors_of(u).expect("vertex ids are valid") {
            deg_sum += 1;

            if u == v || !seen.insert((u, v)) {
                return Err(ConsistencyCheckError::NotSimple(
                    format!("{u:?}"),
                    format!("{v:?}"),
                ));
            }

            let symmetric = graph
                .neighbors_of(v)
                .expect("vertex ids are valid")
                .any(|(w, _)| w == u);

            if !symmetric {
                return Err(ConsistencyCheckError::AsymmetricAdjacency(
                    format!("{u:?}"),
                    format!("{v:?}"),
                ));
            }
        }
    }

    // https://en.wikipedia.org/wiki/Handshaking_lemma
    if deg_sum != 2 * edge_count {
        return Err(ConsistencyCheckError::HandshakingLemma(
            deg_sum,
            2 * edge_count,
        ));
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StepCheckError {
    #[error("expected {0} initialization events at the start, found {1}")]
    Initialization(usize, usize),
    #[error("the last event is not the only completion event")]
    Completion,
    #[error("vertex {0} visited more than once")]
    VisitedTwice(String),
    #[error("vertex {0} visited with distance {1}, but the shortest distance is {2}")]
    WrongDistance(String, String, String),
    #[error("vertex {0} visited with distance {1} after a vertex with distance {2}")]
    NonMonotonic(String, String, String),
    #[error("search completed with distance {0}, but the shortest distance is {1}")]
    WrongResult(String, String),
}

/// Runs the stepper and checks its events against a brute-force computation.
pub fn check_steps<K, W>(
    graph: &Graph<K, W>,
    source: K,
    goal: Option<K>,
) -> Result<(), StepCheckError>
where
    K: Key,
    W: Weight + fmt::Debug,
{
    let expected = brute_force_distances(graph, &source);
    let events = ShortestPaths::on(graph)
        .goal_opt(goal.clone())
        .steps(source)
        .expect("endpoints belong to the graph")
        .collect::<Vec<_>>();

    let n = graph.vertex_count();
    let initialized = events
        .iter()
        .take_while(|event| matches!(event, StepEvent::Initialized { .. }))
        .count();

    if initialized != n {
        return Err(StepCheckError::Initialization(n, initialized));
    }

    let completed = events.iter().filter(|event| event.is_completed()).count();
    if completed != 1 || !events.last().is_some_and(StepEvent::is_completed) {
        return Err(StepCheckError::Completion);
    }

    let mut visited = FxHashSet::default();
    let mut last: Option<&W> = None;

    for event in &events {
        let StepEvent::Visiting { vertex, distance } = event else {
            continue;
        };

        if !visited.insert(vertex) {
            return Err(StepCheckError::VisitedTwice(format!("{vertex:?}")));
        }

        if expected.get(vertex) != Some(distance) {
            return Err(StepCheckError::WrongDistance(
                format!("{vertex:?}"),
                format!("{distance:?}"),
                format!("{:?}", Distance::from(expected.get(vertex))),
            ));
        }

        if let Some(last) = last.filter(|last| distance < *last) {
            return Err(StepCheckError::NonMonotonic(
                format!("{vertex:?}"),
                format!("{distance:?}"),
                format!("{last:?}"),
            ));
        }

        last = Some(distance);
    }

    if let (Some(goal), Some(StepEvent::Completed { distance, .. })) = (goal, events.last()) {
        let shortest = Distance::from(expected.get(&goal));

        if distance.as_ref() != shortest {
            return Err(StepCheckError::WrongResult(
                format!("{distance:?}"),
                format!("{shortest:?}"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn brute_force_on_demo_graph() {
        let dist = brute_force_distances(&create_demo_graph(), &'A');

        assert_eq!(dist.get(&'E'), Some(&13));
        assert_eq!(dist.get(&'D'), Some(&17));
        assert_eq!(dist.len(), 8);
    }

    #[test]
    fn generated_graphs_are_consistent() {
        assert_matches!(check_consistency(&create_demo_graph()), Ok(()));
        assert_matches!(check_consistency(&create_complete(6, 1u8)), Ok(()));
        assert_matches!(check_consistency(&create_path(6, 1u8)), Ok(()));

        assert_eq!(create_complete(6, 1u8).edge_count(), 15);
        assert_eq!(create_path(6, 1u8).edge_count(), 5);
        assert_eq!(create_path::<u8>(0, 1).edge_count(), 0);
    }

    #[test]
    fn steps_on_generated_graphs() {
        assert_matches!(check_steps(&create_demo_graph(), 'A', Some('E')), Ok(()));
        assert_matches!(check_steps(&create_demo_graph(), 'H', None), Ok(()));
        assert_matches!(check_steps(&create_complete(7, 3u32), 0, Some(6)), Ok(()));
        assert_matches!(check_steps(&create_path(7, 0.5f64), 3, None), Ok(()));
    }
}
