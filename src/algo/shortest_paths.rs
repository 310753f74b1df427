//! Find [single source shortest paths] and their distances in a graph, step
//! by step.
//!
//! The search is [Dijkstra's
//! algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm). Besides
//! computing the final [`ShortestPaths`], it can be run as an iterator of
//! [`StepEvent`]s that describe every state transition of the algorithm:
//! seeding the frontier, visiting a vertex, examining an edge, relaxing a
//! distance, finishing a vertex and completing the search. A consumer can
//! replay the events at its own pace, for example to animate the search.
//!
//! [single source shortest paths]:
//!     https://en.wikipedia.org/wiki/Shortest_path_problem#Single-source_shortest_paths
//!
//! # Examples
//!
//! ```
//! use pathstep::{
//!     algo::shortest_paths::{ShortestPaths, StepEvent},
//!     core::Distance,
//!     graph::Graph,
//! };
//!
//! let graph = Graph::from_edges([
//!     ("Prague", "Bratislava", 328u32),
//!     ("Prague", "Nuremberg", 297),
//!     ("Prague", "Vienna", 293),
//!     ("Bratislava", "Vienna", 79),
//!     ("Nuremberg", "Munich", 170),
//!     ("Vienna", "Munich", 402),
//!     ("Vienna", "Florence", 863),
//!     ("Munich", "Florence", 646),
//!     ("Florence", "Rome", 278),
//! ])
//! .unwrap();
//!
//! let mut steps = ShortestPaths::on(&graph).goal("Rome").steps("Prague").unwrap();
//!
//! for event in steps.by_ref() {
//!     if let StepEvent::Completed { path, distance } = event {
//!         assert_eq!(path, vec!["Prague", "Nuremberg", "Munich", "Florence", "Rome"]);
//!         assert_eq!(distance, Distance::Finite(1391));
//!     }
//! }
//!
//! let shortest_paths = steps.finish();
//! assert_eq!(shortest_paths[&"Rome"], 1391);
//! ```

use std::{fmt, ops::Index};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::{error::UnknownVertexError, Distance, Key};

mod builder;
mod dijkstra;
mod event;

pub use builder::ShortestPathsBuilder;
pub use dijkstra::DijkstraSteps;
pub use event::StepEvent;

/// Shortest paths and their distances from a single source vertex.
///
/// Only the vertices settled before the search stopped are recorded, so every
/// recorded distance is final. See [module](self) documentation for more
/// details and example.
#[derive(Debug, Clone)]
pub struct ShortestPaths<K, W> {
    source: K,
    goal: Option<K>,
    // Using HashMaps because the search terminates early when reaching the
    // goal, so only a part of the graph is usually settled.
    dist: FxHashMap<K, W>,
    pred: FxHashMap<K, K>,
}

impl<K: Key, W> ShortestPaths<K, W> {
    /// Source vertex where the search was started.
    pub fn source(&self) -> &K {
        &self.source
    }

    pub fn goal(&self) -> Option<&K> {
        self.goal.as_ref()
    }

    /// Returns the path distance between the source vertex and the given
    /// vertex, or `None` if it's not known.
    ///
    /// There are two causes why the distance between two vertices is not
    /// known: (1) the vertices are not connected, or (2) the
    /// [goal](ShortestPathsBuilder::goal) was reached before settling the given
    /// vertex.
    pub fn dist(&self, to: &K) -> Option<&W> {
        self.dist.get(to)
    }

    /// Like [`dist`](Self::dist), but with unknown distances being infinite.
    pub fn distance(&self, to: &K) -> Distance<&W> {
        self.dist(to).into()
    }

    /// Returns an iterator over vertices on the path between the given vertex
    /// and the source vertex, in this order, excluding the given vertex.
    ///
    /// The iterator is empty if the path is not known or the given vertex is
    /// the source.
    pub fn reconstruct(&self, to: &K) -> PathReconstruction<'_, K> {
        PathReconstruction {
            next: self.pred.get(to),
            pred: &self.pred,
        }
    }

    /// Returns the vertices on the path from the source to the given vertex,
    /// both ends included, or `None` if the path is not known.
    pub fn path_to(&self, to: &K) -> Option<Vec<K>> {
        if !self.dist.contains_key(to) {
            return None;
        }

        let mut path = vec![to.clone()];
        path.extend(self.reconstruct(to).cloned());
        path.reverse();
        Some(path)
    }

    /// Returns the path from the source to the goal, or an empty vector if
    /// the goal was not reached or not specified.
    pub fn path(&self) -> Vec<K> {
        self.goal
            .as_ref()
            .and_then(|goal| self.path_to(goal))
            .unwrap_or_default()
    }

    /// Returns all settled vertices together with their distances, in no
    /// particular order.
    pub fn distances(&self) -> impl Iterator<Item = (&K, &W)> + '_ {
        self.dist.iter()
    }

    pub fn settled_count(&self) -> usize {
        self.dist.len()
    }
}

impl<K: Key, W> Index<&K> for ShortestPaths<K, W> {
    type Output = W;

    /// # Panics
    ///
    /// Panics if the distance is not known.
    fn index(&self, index: &K) -> &Self::Output {
        self.dist(index)
            .unwrap_or_else(|| panic!("distance of {index:?} is not known"))
    }
}

/// The error encountered when starting a [`ShortestPaths`] search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error<K: fmt::Debug> {
    /// The source or the goal is not a vertex of the graph.
    #[error("{0}")]
    UnknownVertex(UnknownVertexError<K>),
}

impl<K: fmt::Debug> From<UnknownVertexError<K>> for Error<K> {
    fn from(error: UnknownVertexError<K>) -> Self {
        Error::UnknownVertex(error)
    }
}

/// Iterator over the vertices on the path from a vertex to the source vertex.
///
/// Returned by [`ShortestPaths::reconstruct`].
pub struct PathReconstruction<'a, K> {
    next: Option<&'a K>,
    pred: &'a FxHashMap<K, K>,
}

impl<'a, K: Key> Iterator for PathReconstruction<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let curr = self.next?;
        self.next = self.pred.get(curr);
        Some(curr)
    }
}
