use std::fmt;

use crate::core::Distance;

/// A single state transition of a stepwise shortest paths search.
///
/// Events carry owned copies of vertex keys and weights, so they can be sent
/// to another thread or stored for a later replay without borrowing from the
/// search.
///
/// The [`Display`](fmt::Display) implementation narrates the event in plain
/// English, which is enough for a textual log of the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepEvent<K, W> {
    /// A vertex was put into the frontier with its initial distance, zero for
    /// the source and infinity otherwise.
    Initialized { vertex: K, distance: Distance<W> },

    /// A vertex was taken from the frontier and its distance became final.
    Visiting { vertex: K, distance: W },

    /// An edge from the visited vertex to a not yet settled neighbor is being
    /// considered.
    Examining { from: K, to: K, weight: W },

    /// A shorter path to a vertex was found.
    Relaxed { vertex: K, distance: W, via: K },

    /// All edges of the visited vertex have been examined.
    Settled { vertex: K },

    /// The closest vertex in the frontier is at infinite distance. This and
    /// all remaining vertices cannot be reached from the source.
    Unreachable { vertex: K },

    /// The goal vertex was visited.
    TargetReached { vertex: K },

    /// The search is over. The path leads from the source to the goal and is
    /// empty if the goal was not reached (or no goal was given).
    Completed { path: Vec<K>, distance: Distance<W> },
}

impl<K, W> StepEvent<K, W> {
    /// Returns the vertex the event is about, if it concerns a single vertex.
    ///
    /// For [`Relaxed`](StepEvent::Relaxed), this is the vertex whose distance
    /// was improved.
    pub fn vertex(&self) -> Option<&K> {
        match self {
            StepEvent::Initialized { vertex, .. }
            | StepEvent::Visiting { vertex, .. }
            | StepEvent::Relaxed { vertex, .. }
            | StepEvent::Settled { vertex }
            | StepEvent::Unreachable { vertex }
            | StepEvent::TargetReached { vertex } => Some(vertex),
            StepEvent::Examining { .. } | StepEvent::Completed { .. } => None,
        }
    }

    /// Returns the endpoints of the edge the event is about, in the direction
    /// of the search.
    pub fn edge(&self) -> Option<(&K, &K)> {
        match self {
            StepEvent::Examining { from, to, .. } => Some((from, to)),
            StepEvent::Relaxed { vertex, via, .. } => Some((via, vertex)),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, StepEvent::Completed { .. })
    }
}

impl<K: fmt::Display, W: fmt::Display> fmt::Display for StepEvent<K, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepEvent::Initialized {
                vertex,
                distance: Distance::Finite(distance),
            } => write!(f, "Starting at vertex {vertex} with distance {distance}."),
            StepEvent::Initialized {
                vertex,
                distance: Distance::Infinite,
            } => write!(f, "Vertex {vertex} initialized with distance ∞."),
            StepEvent::Visiting { vertex, distance } => write!(
                f,
                "Processing vertex {vertex} with current distance {distance}."
            ),
            StepEvent::Examining { to, weight, .. } => {
                write!(f, "Checking neighbor {to} with edge weight {weight}.")
            }
            StepEvent::Relaxed {
                vertex,
                distance,
                via,
            } => write!(f, "Updated distance of vertex {vertex} to {distance} via {via}."),
            StepEvent::Settled { vertex } => write!(f, "Finished vertex {vertex}."),
            StepEvent::Unreachable { vertex } => write!(f, "Vertex {vertex} is unreachable."),
            StepEvent::TargetReached { vertex } => write!(f, "Reached target vertex {vertex}."),
            StepEvent::Completed { path, distance } if !path.is_empty() => {
                f.write_str("Shortest path: [")?;
                for (i, vertex) in path.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{vertex}")?;
                }
                write!(f, "] with distance {distance}.")
            }
            StepEvent::Completed { .. } => f.write_str("No path found."),
        }
    }
}
