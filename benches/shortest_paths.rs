mod common;

use common::{pathstep_random, petgraph_random, RANDOM_SEED};
use fastrand::Rng;
use pathstep::algo::ShortestPaths;
use petgraph::prelude::*;

fn main() {
    divan::main();
}

#[divan::bench(consts = [100, 1000, 10000], args = [0.05, 0.25])]
fn pathstep_dijkstra_random<const N: usize>(bencher: divan::Bencher, density: f32) {
    let graph = pathstep_random(N, density, &mut Rng::with_seed(RANDOM_SEED));

    bencher.bench(|| ShortestPaths::on(&graph).run(0));
}

#[divan::bench(consts = [100, 1000, 10000], args = [0.05, 0.25])]
fn pathstep_dijkstra_steps_random<const N: usize>(bencher: divan::Bencher, density: f32) {
    let graph = pathstep_random(N, density, &mut Rng::with_seed(RANDOM_SEED));

    // Cost of producing the full event sequence, including cloning the keys
    // into the events.
    bencher.bench(|| ShortestPaths::on(&graph).steps(0).map(Iterator::count));
}

#[divan::bench(consts = [100, 1000, 10000], args = [0.05, 0.25])]
fn pathstep_dijkstra_goal_random<const N: usize>(bencher: divan::Bencher, density: f32) {
    let graph = pathstep_random(N, density, &mut Rng::with_seed(RANDOM_SEED));

    bencher.bench(|| ShortestPaths::on(&graph).goal(N - 1).run(0));
}

#[divan::bench(consts = [100, 1000, 10000], args = [0.05, 0.25])]
fn petgraph_dijkstra_random<const N: usize>(bencher: divan::Bencher, density: f32) {
    let graph = petgraph_random(N, density, &mut Rng::with_seed(RANDOM_SEED));
    let start = NodeIndex::new(0);

    bencher.bench(|| petgraph::algo::dijkstra(&graph, start, None, |e| *e.weight()));
}
