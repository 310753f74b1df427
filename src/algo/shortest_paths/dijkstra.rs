use std::{cmp::Reverse, collections::BinaryHeap, fmt, mem};

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::{
    common::{TypedBitSet, VisitSet},
    core::{Distance, Key, VertexId, Weight},
    graph::Graph,
    storage::adj_list,
};

use super::{ShortestPaths, StepEvent};

// Entries are ordered by distance and then by insertion sequence, which makes
// the pop order among equal distances FIFO and thus reproducible.
type FrontierEntry<W> = Reverse<(Distance<<W as Weight>::Ord>, u64, VertexId)>;

enum Phase<'a, W> {
    Seeding {
        next: usize,
    },
    Selecting,
    Expanding {
        current: VertexId,
        dist: W,
        neighbors: adj_list::Neighbors<'a, W>,
        pending: Option<(VertexId, W)>,
    },
    Reached {
        goal: VertexId,
    },
    Completing,
    Done,
}

/// Stepwise run of Dijkstra's algorithm.
///
/// This is an [`Iterator`] over [`StepEvent`]s. Every call to `next` advances
/// the search by exactly one state transition, so the state observed through
/// the inspection methods ([`distance`](Self::distance),
/// [`predecessor`](Self::predecessor), [`is_settled`](Self::is_settled), ...)
/// always corresponds to the last event returned. The last event is always
/// [`StepEvent::Completed`], after which the iterator is exhausted.
///
/// Dropping the iterator cancels the search. Use [`finish`](Self::finish) to
/// run the search to the end and get the [`ShortestPaths`].
///
/// Created by [`ShortestPathsBuilder::steps`](super::ShortestPathsBuilder::steps)
/// or [`algo::run`](crate::algo::run).
pub struct DijkstraSteps<'a, K, W: Weight> {
    graph: &'a Graph<K, W>,
    source: VertexId,
    goal: Option<VertexId>,
    dist: Vec<Distance<W>>,
    pred: Vec<VertexId>,
    frontier: BinaryHeap<FrontierEntry<W>>,
    settled: TypedBitSet<VertexId>,
    seq: u64,
    phase: Phase<'a, W>,
}

impl<'a, K, W> DijkstraSteps<'a, K, W>
where
    K: Key,
    W: Weight + fmt::Debug,
{
    /// Both vertices must belong to the graph.
    pub(crate) fn new(graph: &'a Graph<K, W>, source: VertexId, goal: Option<VertexId>) -> Self {
        let vertex_count = graph.vertex_count();

        debug!(
            vertices = vertex_count,
            edges = graph.edge_count(),
            source = ?graph[source],
            goal = ?goal.map(|goal| &graph[goal]),
            "shortest paths search started"
        );

        Self {
            graph,
            source,
            goal,
            dist: vec![Distance::Infinite; vertex_count],
            pred: vec![VertexId::SENTINEL; vertex_count],
            frontier: BinaryHeap::with_capacity(vertex_count),
            settled: TypedBitSet::with_capacity(vertex_count),
            seq: 0,
            phase: Phase::Seeding { next: 0 },
        }
    }

    pub fn source(&self) -> &K {
        &self.graph[self.source]
    }

    pub fn goal(&self) -> Option<&K> {
        self.goal.map(|goal| &self.graph[goal])
    }

    /// Current best known distance of a vertex from the source.
    ///
    /// Unknown vertices and vertices not reached yet are at infinite distance.
    pub fn distance(&self, vertex: &K) -> Distance<&W> {
        self.graph
            .id_of(vertex)
            .map(|id| self.dist[id.as_usize()].as_ref())
            .unwrap_or(Distance::Infinite)
    }

    /// The vertex through which the current best known distance of a vertex
    /// was achieved.
    pub fn predecessor(&self, vertex: &K) -> Option<&K> {
        let pred = self.pred[self.graph.id_of(vertex)?.as_usize()];

        if pred.is_sentinel() {
            None
        } else {
            Some(&self.graph[pred])
        }
    }

    /// Returns `true` if the distance of a vertex is final.
    pub fn is_settled(&self, vertex: &K) -> bool {
        self.graph
            .id_of(vertex)
            .map(|id| self.settled.is_visited(&id))
            .unwrap_or(false)
    }

    pub fn settled_count(&self) -> usize {
        self.settled.visited_count()
    }

    /// Number of entries in the frontier, including stale duplicates.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Returns `true` once the [`Completed`](StepEvent::Completed) event has
    /// been emitted.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }

    /// Runs the search to the end, discarding the remaining events, and
    /// returns the distances and predecessors of all settled vertices.
    pub fn finish(mut self) -> ShortestPaths<K, W> {
        for _ in self.by_ref() {}

        let graph = self.graph;
        let mut dist = FxHashMap::default();
        let mut pred = FxHashMap::default();

        for (index, vertex_dist) in mem::take(&mut self.dist).into_iter().enumerate() {
            let id = VertexId::from_usize(index);

            if !self.settled.is_visited(&id) {
                continue;
            }

            if let Distance::Finite(vertex_dist) = vertex_dist {
                dist.insert(graph[id].clone(), vertex_dist);
            }

            let vertex_pred = self.pred[index];
            if !vertex_pred.is_sentinel() {
                pred.insert(graph[id].clone(), graph[vertex_pred].clone());
            }
        }

        ShortestPaths {
            source: graph[self.source].clone(),
            goal: self.goal.map(|goal| graph[goal].clone()),
            dist,
            pred,
        }
    }

    fn push(&mut self, vertex: VertexId, dist: Distance<W>) {
        self.frontier
            .push(Reverse((dist.map(Into::into), self.seq, vertex)));
        self.seq += 1;
    }

    fn key(&self, id: VertexId) -> K {
        self.graph[id].clone()
    }

    fn step(&mut self) -> Option<StepEvent<K, W>> {
        loop {
            match mem::replace(&mut self.phase, Phase::Done) {
                Phase::Seeding { next } => {
                    if next == self.dist.len() {
                        self.phase = Phase::Selecting;
                        continue;
                    }

                    let id = VertexId::from_usize(next);
                    if id == self.source {
                        self.dist[next] = Distance::Finite(W::zero());
                    }

                    let distance = self.dist[next].clone();
                    self.push(id, distance.clone());
                    self.phase = Phase::Seeding { next: next + 1 };

                    return Some(StepEvent::Initialized {
                        vertex: self.key(id),
                        distance,
                    });
                }
                Phase::Selecting => {
                    let Some(Reverse((dist, _, current))) = self.frontier.pop() else {
                        self.phase = Phase::Completing;
                        continue;
                    };

                    // The frontier contains stale entries for vertices whose
                    // distance was improved after being pushed. These are
                    // skipped silently.
                    if self.settled.is_visited(&current) {
                        self.phase = Phase::Selecting;
                        continue;
                    }

                    let Distance::Finite(dist) = dist else {
                        self.phase = Phase::Completing;
                        return Some(StepEvent::Unreachable {
                            vertex: self.key(current),
                        });
                    };

                    let dist: W = dist.into();
                    self.settled.visit(current);

                    self.phase = if self.goal == Some(current) {
                        Phase::Reached { goal: current }
                    } else {
                        Phase::Expanding {
                            current,
                            dist: dist.clone(),
                            neighbors: self.graph.neighbors_by_id(current),
                            pending: None,
                        }
                    };

                    return Some(StepEvent::Visiting {
                        vertex: self.key(current),
                        distance: dist,
                    });
                }
                Phase::Expanding {
                    current,
                    dist,
                    mut neighbors,
                    pending,
                } => {
                    if let Some((next, next_dist)) = pending {
                        // Relaxation. Only improving distances were deferred
                        // here, so the update is unconditional.
                        self.dist[next.as_usize()] = Distance::Finite(next_dist.clone());
                        self.pred[next.as_usize()] = current;
                        // No decrease-key. The old entry of `next` stays in
                        // the frontier and is skipped once popped.
                        self.push(next, Distance::Finite(next_dist.clone()));

                        self.phase = Phase::Expanding {
                            current,
                            dist,
                            neighbors,
                            pending: None,
                        };

                        return Some(StepEvent::Relaxed {
                            vertex: self.key(next),
                            distance: next_dist,
                            via: self.key(current),
                        });
                    }

                    let Some((next, weight)) = neighbors
                        .by_ref()
                        .find(|(next, _)| !self.settled.is_visited(next))
                    else {
                        self.phase = Phase::Selecting;
                        return Some(StepEvent::Settled {
                            vertex: self.key(current),
                        });
                    };

                    // A sum that overflows the weight type never improves.
                    let pending = dist.checked_add(weight).and_then(|next_dist| {
                        let improves =
                            Distance::Finite(&next_dist) < self.dist[next.as_usize()].as_ref();
                        improves.then_some((next, next_dist))
                    });

                    self.phase = Phase::Expanding {
                        current,
                        dist,
                        neighbors,
                        pending,
                    };

                    return Some(StepEvent::Examining {
                        from: self.key(current),
                        to: self.key(next),
                        weight: weight.clone(),
                    });
                }
                Phase::Reached { goal } => {
                    self.phase = Phase::Completing;
                    return Some(StepEvent::TargetReached {
                        vertex: self.key(goal),
                    });
                }
                Phase::Completing => {
                    let (path, distance) = self.goal_path();
                    self.phase = Phase::Done;
                    return Some(StepEvent::Completed { path, distance });
                }
                Phase::Done => return None,
            }
        }
    }

    fn goal_path(&self) -> (Vec<K>, Distance<W>) {
        let Some(goal) = self.goal else {
            return (Vec::new(), Distance::Infinite);
        };

        if !self.settled.is_visited(&goal) {
            return (Vec::new(), Distance::Infinite);
        }

        let mut path = vec![self.key(goal)];
        let mut curr = goal;

        while !self.pred[curr.as_usize()].is_sentinel() {
            curr = self.pred[curr.as_usize()];
            path.push(self.key(curr));
        }

        path.reverse();
        (path, self.dist[goal.as_usize()].clone())
    }
}

impl<'a, K, W> Iterator for DijkstraSteps<'a, K, W>
where
    K: Key,
    W: Weight + fmt::Debug,
{
    type Item = StepEvent<K, W>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.step()?;
        trace!(?event, "step");

        if let StepEvent::Completed { path, distance } = &event {
            debug!(
                settled = self.settled_count(),
                path_len = path.len(),
                ?distance,
                "shortest paths search completed"
            );
        }

        Some(event)
    }
}

impl<K: fmt::Debug, W: Weight> fmt::Debug for DijkstraSteps<'_, K, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DijkstraSteps")
            .field("source", &self.source)
            .field("goal", &self.goal)
            .field("settled", &self.settled.visited_count())
            .field("frontier", &self.frontier.len())
            .field("finished", &matches!(self.phase, Phase::Done))
            .finish()
    }
}
