//! Replays a shortest path search on the demonstration graph, one step at a
//! time.
//!
//! ```text
//! cargo run --example replay -- [START] [END] [DELAY_MS] [--dot]
//! ```
//!
//! The search runs on a separate thread and sends the events over a channel.
//! The main thread prints them with a pause between consecutive steps, which
//! is how an animated renderer would consume them. Set `RUST_LOG=pathstep=trace`
//! to see the log records of the search itself.

use std::{env, sync::mpsc, thread, time::Duration};

use pathstep::{
    algo::{self, StepEvent},
    graph::Graph,
    infra::export::Dot,
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_DELAY_MS: u64 = 500;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    let dot = args.iter().any(|arg| arg == "--dot");
    args.retain(|arg| arg != "--dot");

    let vertex = |index: usize, default: char| {
        args.get(index)
            .and_then(|arg| arg.chars().next())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or(default)
    };

    let start = vertex(0, 'A');
    let end = vertex(1, 'E');
    let delay = args
        .get(2)
        .and_then(|arg| arg.parse().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_millis(DEFAULT_DELAY_MS));

    let graph = Graph::from_edges([
        ('A', 'B', 7u32),
        ('A', 'C', 8),
        ('B', 'F', 2),
        ('C', 'F', 6),
        ('C', 'G', 4),
        ('F', 'D', 8),
        ('F', 'G', 9),
        ('F', 'H', 3),
        ('E', 'H', 1),
    ])
    .expect("demonstration graph is valid");

    info!(%start, %end, ?delay, "replaying search");

    let (tx, rx) = mpsc::channel();
    let graph = &graph;

    let path = thread::scope(|scope| {
        scope.spawn(move || {
            let steps = match algo::run(graph, start, end) {
                Ok(steps) => steps,
                Err(error) => {
                    warn!(%error, "cannot start the search");
                    return;
                }
            };

            for event in steps {
                // The consumer hung up.
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        let mut path = Vec::new();

        for (i, event) in rx.iter().enumerate() {
            if i > 0 {
                thread::sleep(delay);
            }

            println!("{event}");

            if let StepEvent::Completed { path: found, .. } = event {
                path = found;
            }
        }

        path
    });

    if dot {
        println!();
        print!(
            "{}",
            Dot::with_display(Some(String::from("demo")))
                .highlight_path(path)
                .to_string(graph)
        );
    }
}
