use std::fmt;

use crate::{
    core::{error::UnknownVertexError, Key, Weight},
    graph::Graph,
};

use super::{dijkstra::DijkstraSteps, Error, ShortestPaths};

pub struct ShortestPathsBuilder<'a, K, W> {
    graph: &'a Graph<K, W>,
    goal: Option<K>,
}

impl<K, W> ShortestPaths<K, W>
where
    K: Key,
    W: Weight + fmt::Debug,
{
    pub fn on(graph: &Graph<K, W>) -> ShortestPathsBuilder<'_, K, W> {
        ShortestPathsBuilder { graph, goal: None }
    }
}

impl<'a, K, W> ShortestPathsBuilder<'a, K, W>
where
    K: Key,
    W: Weight + fmt::Debug,
{
    /// Stops the search as soon as the goal vertex is visited.
    ///
    /// Without a goal, the search settles every vertex reachable from the
    /// source.
    pub fn goal(self, goal: K) -> Self {
        Self {
            goal: Some(goal),
            ..self
        }
    }

    pub fn goal_opt(self, goal: Option<K>) -> Self {
        Self { goal, ..self }
    }

    /// Starts a stepwise search from the source vertex.
    ///
    /// No event is produced before the source and the goal are validated to
    /// exist in the graph.
    pub fn steps(self, source: K) -> Result<DijkstraSteps<'a, K, W>, Error<K>> {
        let ShortestPathsBuilder { graph, goal } = self;

        let source = graph
            .id_of(&source)
            .ok_or(UnknownVertexError(source))?;

        let goal = goal
            .map(|goal| graph.id_of(&goal).ok_or(UnknownVertexError(goal)))
            .transpose()?;

        Ok(DijkstraSteps::new(graph, source, goal))
    }

    /// Runs the whole search from the source vertex and returns the result.
    pub fn run(self, source: K) -> Result<ShortestPaths<K, W>, Error<K>> {
        self.steps(source).map(DijkstraSteps::finish)
    }
}
