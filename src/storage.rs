//! Low-level graph storage.
//!
//! The storage works purely with dense [`VertexId`](crate::core::VertexId)s
//! and performs no validation. User-facing validation and key interning live
//! in [`Graph`](crate::graph::Graph).

pub mod adj_list;

pub use adj_list::AdjList;
