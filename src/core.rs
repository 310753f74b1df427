//! Building blocks shared by the graph storage and the algorithms: vertex
//! identifiers, edge weights and errors.

pub mod error;
pub mod id;
pub mod weight;

pub use id::{Key, VertexId};
pub use weight::{Distance, Weight};
