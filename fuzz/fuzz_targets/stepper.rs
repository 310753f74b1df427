#![no_main]

use libfuzzer_sys::fuzz_target;

use pathstep::infra::{
    arbitrary::SearchInput,
    testing::{check_consistency, check_steps},
};

fuzz_target!(|input: SearchInput<u8, u16>| {
    let (graph, endpoints) = input.build::<u32>();

    check_consistency(&graph)
        .as_ref()
        .map_err(ToString::to_string)
        .unwrap();

    if let Some((source, goal)) = endpoints {
        check_steps(&graph, source, goal)
            .as_ref()
            .map_err(ToString::to_string)
            .unwrap();
    }
});
