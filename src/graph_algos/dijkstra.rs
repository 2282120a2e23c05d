use crate::errors::PathPlannerError;
use crate::collections::IndexedMinHeap;
use crate::graph::Graph;
use super::{DistanceTable, PredecessorMap, ensure_node, reconstruct_path};

use std::fmt::Debug;
use num_traits::{Float, Zero};



/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// Returns the nodes from start to goal, or an empty path if the goal is unreachable
/// Edge weights must be non-negative for the path to be optimal
pub fn dijkstra<G>(graph: &G, start: &G::Node, goal: &G::Node) -> Result<Vec<G::Node>, PathPlannerError>
where
    G: Graph,
    G::Cost: Float + Debug,
    {

    let (path, _) = dijkstra_with_predecessors(graph, start, goal)?;
    Ok(path)
}


/// Same as dijkstra, but also hands back the predecessor map built on the way
/// The map covers every node improved before the goal was settled
pub fn dijkstra_with_predecessors<G>(graph: &G, start: &G::Node, goal: &G::Node) -> Result<(Vec<G::Node>, PredecessorMap<G::Node>), PathPlannerError>
where
    G: Graph,
    G::Cost: Float + Debug,
    {

    ensure_node(graph, start)?;
    ensure_node(graph, goal)?;

    // Build the search tree - terminates when the goal is settled
    let search = build_dijkstra_tree(graph, start, Some(goal))?;

    if !search.goal_reached {
        tracing::debug!("dijkstra: {goal:?} unreachable from {start:?} after reaching {} nodes", search.distances.len());
        return Ok((Vec::new(), search.predecessors));
    }

    tracing::debug!("dijkstra: {start:?} -> {goal:?} cost {:?}", search.distances.get(goal));
    let path = reconstruct_path(&search.predecessors, start, goal)?;
    Ok((path, search.predecessors))
}


/// Returns the distance to every node reachable from start
pub fn shortest_distances<G>(graph: &G, start: &G::Node) -> Result<DistanceTable<G::Node, G::Cost>, PathPlannerError>
where
    G: Graph,
    G::Cost: Float + Debug,
    {

    ensure_node(graph, start)?;
    let search = build_dijkstra_tree(graph, start, None)?;
    Ok(search.distances)
}


/// State left behind by one run of the search loop
struct DijkstraSearch<N, C> {
    distances: DistanceTable<N, C>,
    predecessors: PredecessorMap<N>,
    goal_reached: bool,
}


/// Traverses the graph using Dijkstra's algorithm
/// Without a goal the whole component of start is settled
fn build_dijkstra_tree<G>(graph: &G, start: &G::Node, goal: Option<&G::Node>) -> Result<DijkstraSearch<G::Node, G::Cost>, PathPlannerError>
where
    G: Graph,
    G::Cost: Float + Debug,
    {

    let mut distances = DistanceTable::new(start.clone());
    let mut predecessors = PredecessorMap::default();

    // Nodes to visit - each node is queued at most once, improvements use decrease_key
    let mut nodes_to_visit = IndexedMinHeap::new();
    nodes_to_visit.push(start.clone(), <G::Cost as Zero>::zero())?;

    // Loop over each node to visit, removing the smallest node
    while let Some((distance, node)) = nodes_to_visit.pop_min() {

        // Every queued distance is >= this one, so the goal is settled
        if goal == Some(&node) {
            return Ok(DijkstraSearch { distances, predecessors, goal_reached: true });
        }

        for (neighbor, weight) in graph.neighbors(&node) {

            // new cost to reach this node = edge cost + node cost
            let candidate = distance + weight;

            if !distances.improve(neighbor, candidate) {
                // The existing path is better, do nothing
                continue;
            }
            predecessors.insert(neighbor.clone(), node.clone());

            if nodes_to_visit.contains(neighbor) {
                nodes_to_visit.decrease_key(neighbor, candidate)?;
            } else {
                nodes_to_visit.push(neighbor.clone(), candidate)?;
            }
        }
    }

    Ok(DijkstraSearch { distances, predecessors, goal_reached: false })
}
