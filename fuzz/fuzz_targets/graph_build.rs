#![no_main]

use libfuzzer_sys::fuzz_target;

use pathstep::{
    graph::Graph,
    infra::{arbitrary::BuildOp, testing::check_consistency},
};

fuzz_target!(|ops: Vec<BuildOp<i8, i8>>| {
    let mut graph = Graph::<i8, i8>::new();

    for op in ops {
        let vertex_count = graph.vertex_count();
        let edge_count = graph.edge_count();

        if op.apply(&mut graph).is_err() {
            // Rejected operations leave the graph untouched.
            assert_eq!(graph.vertex_count(), vertex_count);
            assert_eq!(graph.edge_count(), edge_count);
        }

        check_consistency(&graph)
            .as_ref()
            .map_err(ToString::to_string)
            .unwrap();
    }
});
