use crate::errors::PathPlannerError;
use crate::graph::Graph;
use super::PredecessorMap;

use std::hash::Hash;
use num_traits::Zero;


/// Construct the shortest path from the goal node back to the start node
/// Returns the ordered path as a vector of nodes from start to goal
/// Only valid once the search has actually reached the goal
pub fn reconstruct_path<N>(predecessors: &PredecessorMap<N>, start: &N, goal: &N) -> Result<Vec<N>, PathPlannerError>
where
    N: Eq + Hash + Clone,
{
    let mut path = vec![goal.clone()];
    let mut current = goal;

    // Trace back from goal to start
    // a valid chain never visits more nodes than the map holds
    while current != start {
        if path.len() > predecessors.len() {
            return Err(PathPlannerError::BrokenPredecessorChain);
        }
        current = predecessors.get(current).ok_or(PathPlannerError::BrokenPredecessorChain)?;
        path.push(current.clone());
    }

    // The path is in reverse order, so reverse it
    path.reverse();
    Ok(path)
}

/// Sum of edge weights along a path
/// None if two consecutive nodes are not adjacent
pub fn path_cost<G>(graph: &G, path: &[G::Node]) -> Option<G::Cost>
where
    G: Graph,
    G::Cost: Zero,
{
    path.windows(2)
        .try_fold(<G::Cost as Zero>::zero(), |total, pair| Some(total + graph.weight(&pair[0], &pair[1])?))
}
