use std::{
    fmt::Display,
    io::{self, Cursor, Write},
};

use rustc_hash::FxHashSet;

use crate::{
    core::{Key, VertexId},
    graph::Graph,
};

pub trait Export<G> {
    fn export<Out: Write>(&self, graph: &G, out: &mut Out) -> io::Result<()>;
}

/// Graphviz DOT exporter, optionally highlighting a path.
pub struct Dot<K, W> {
    name: String,
    get_vertex_label: Box<dyn Fn(&K) -> String>,
    get_edge_label: Box<dyn Fn(&W) -> String>,
    path: Vec<K>,
}

impl<K, W> Dot<K, W> {
    pub fn new<FK, FW>(name: Option<String>, get_vertex_label: FK, get_edge_label: FW) -> Self
    where
        FK: Fn(&K) -> String + 'static,
        FW: Fn(&W) -> String + 'static,
    {
        Self {
            name: name.unwrap_or_else(|| String::from("G")),
            get_vertex_label: Box::new(get_vertex_label),
            get_edge_label: Box::new(get_edge_label),
            path: Vec::new(),
        }
    }

    /// Highlights the vertices of the path and the edges between consecutive
    /// vertices of the path.
    pub fn highlight_path(self, path: Vec<K>) -> Self {
        Self { path, ..self }
    }

    pub fn to_string(&self, graph: &Graph<K, W>) -> String
    where
        K: Key,
    {
        let mut cursor = Cursor::new(Vec::new());
        self.export(graph, &mut cursor)
            .expect("writing to vec in cursor does not fail");

        String::from_utf8(cursor.into_inner()).expect("dot format is text format")
    }
}

impl<K: Display, W: Display> Dot<K, W> {
    pub fn with_display(name: Option<String>) -> Self {
        Self::new(name, |k| format!("{k}"), |w| format!("{w}"))
    }
}

impl<K: Key, W> Export<Graph<K, W>> for Dot<K, W> {
    fn export<Out: Write>(&self, graph: &Graph<K, W>, out: &mut Out) -> io::Result<()> {
        let path = self
            .path
            .iter()
            .filter_map(|key| graph.id_of(key))
            .collect::<Vec<_>>();

        let on_path = path.iter().copied().collect::<FxHashSet<_>>();
        let path_edges = path
            .windows(2)
            .map(|pair| ordered(pair[0], pair[1]))
            .collect::<FxHashSet<_>>();

        out.write_all(b"graph ")?;
        out.write_all(self.name.as_bytes())?;
        out.write_all(b" {\n")?;

        for (index, key) in graph.vertex_ids().enumerate() {
            let id = VertexId::from_usize(index);
            let style = if on_path.contains(&id) {
                ", color=red, penwidth=2"
            } else {
                ""
            };

            writeln!(
                out,
                "    {id} [label={:?}{style}];",
                (self.get_vertex_label)(key)
            )?;
        }

        for (from, to, weight) in graph.storage().edges() {
            let style = if path_edges.contains(&ordered(from, to)) {
                ", color=red, penwidth=2"
            } else {
                ""
            };

            writeln!(
                out,
                "    {from} -- {to} [label={:?}{style}];",
                (self.get_edge_label)(weight)
            )?;
        }

        out.write_all(b"}\n")?;

        Ok(())
    }
}

fn ordered(u: VertexId, v: VertexId) -> (VertexId, VertexId) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_graph() -> Graph<char, u32> {
        Graph::from_edges([('A', 'B', 7), ('B', 'C', 2), ('A', 'C', 8)]).unwrap()
    }

    #[test]
    fn plain() {
        let dot = Dot::with_display(None).to_string(&create_graph());

        assert_eq!(
            dot,
            "graph G {
    v0 [label=\"A\"];
    v1 [label=\"B\"];
    v2 [label=\"C\"];
    v0 -- v1 [label=\"7\"];
    v1 -- v2 [label=\"2\"];
    v0 -- v2 [label=\"8\"];
}
"
        );
    }

    #[test]
    fn highlighted_path() {
        let dot = Dot::new(Some(String::from("route")), |k: &char| k.to_string(), |_| String::new())
            .highlight_path(vec!['A', 'B', 'C'])
            .to_string(&create_graph());

        assert_eq!(
            dot,
            "graph route {
    v0 [label=\"A\", color=red, penwidth=2];
    v1 [label=\"B\", color=red, penwidth=2];
    v2 [label=\"C\", color=red, penwidth=2];
    v0 -- v1 [label=\"\", color=red, penwidth=2];
    v1 -- v2 [label=\"\", color=red, penwidth=2];
    v0 -- v2 [label=\"\"];
}
"
        );
    }
}
