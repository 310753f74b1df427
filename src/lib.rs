//! Dijkstra's shortest path algorithm exposed as a replayable sequence of
//! steps.
//!
//! A [`Graph`](graph::Graph) holds an undirected graph with non-negative edge
//! weights over arbitrary vertex keys. Running
//! [`ShortestPaths`](algo::ShortestPaths) on it yields
//! [`StepEvent`](algo::StepEvent)s, one per state transition of the
//! algorithm, which a consumer can render at any pace it likes.
//!
//! ```
//! use pathstep::{algo, core::Distance, graph::Graph};
//!
//! let graph = Graph::from_edges([
//!     ('A', 'B', 7u32),
//!     ('A', 'C', 8),
//!     ('B', 'F', 2),
//!     ('C', 'F', 6),
//!     ('C', 'G', 4),
//!     ('F', 'D', 8),
//!     ('F', 'G', 9),
//!     ('F', 'H', 3),
//!     ('E', 'H', 1),
//! ])
//! .unwrap();
//!
//! let last = algo::run(&graph, 'A', 'E').unwrap().last().unwrap();
//!
//! assert_eq!(
//!     last,
//!     algo::StepEvent::Completed {
//!         path: vec!['A', 'B', 'F', 'H', 'E'],
//!         distance: Distance::Finite(13),
//!     }
//! );
//! ```

pub mod algo;
pub mod common;
pub mod core;
pub mod graph;
pub mod infra;
pub mod storage;

pub use graph::Graph;
