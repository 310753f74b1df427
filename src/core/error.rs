use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
#[error("adding vertex {key:?} failed: {kind}")]
pub struct AddVertexError<K: fmt::Debug> {
    pub key: K,
    pub kind: AddVertexErrorKind,
}

impl<K: fmt::Debug> AddVertexError<K> {
    pub fn new(key: K, kind: AddVertexErrorKind) -> Self {
        Self { key, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddVertexErrorKind {
    /// Reported as `DuplicateVertex` by the strict registration.
    AlreadyExists,
    CapacityOverflow,
}

impl fmt::Display for AddVertexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            AddVertexErrorKind::AlreadyExists => "a vertex with this identifier already exists",
            AddVertexErrorKind::CapacityOverflow => "the graph has exhausted its capacity",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("adding edge {from:?} -- {to:?} failed: {kind}")]
pub struct AddEdgeError<K: fmt::Debug, W: fmt::Debug> {
    pub from: K,
    pub to: K,
    pub weight: W,
    pub kind: AddEdgeErrorKind,
}

impl<K: fmt::Debug, W: fmt::Debug> AddEdgeError<K, W> {
    pub fn new(from: K, to: K, weight: W, kind: AddEdgeErrorKind) -> Self {
        Self {
            from,
            to,
            weight,
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddEdgeErrorKind {
    /// At least one of the endpoints is not registered in the graph.
    UnknownVertex,
    /// The weight is negative, NaN or infinite.
    InvalidWeight,
    DuplicateEdge,
    SelfLoop,
}

impl fmt::Display for AddEdgeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            AddEdgeErrorKind::UnknownVertex => "an endpoint does not exist",
            AddEdgeErrorKind::InvalidWeight => "the weight must be finite and non-negative",
            AddEdgeErrorKind::DuplicateEdge => {
                "an edge already exists and the graph does not allow multi edges"
            }
            AddEdgeErrorKind::SelfLoop => "the graph does not allow self-loops",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("vertex {0:?} does not exist")]
pub struct UnknownVertexError<K: fmt::Debug>(pub K);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = AddEdgeError::new('A', 'A', 1, AddEdgeErrorKind::SelfLoop);
        assert_eq!(
            err.to_string(),
            "adding edge 'A' -- 'A' failed: the graph does not allow self-loops"
        );

        let err = AddVertexError::new("x", AddVertexErrorKind::AlreadyExists);
        assert_eq!(
            err.to_string(),
            "adding vertex \"x\" failed: a vertex with this identifier already exists"
        );

        assert_eq!(
            UnknownVertexError('Z').to_string(),
            "vertex 'Z' does not exist"
        );
    }
}
