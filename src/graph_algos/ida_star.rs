use crate::errors::PathPlannerError;
use crate::graph::Graph;
use super::{DistanceTable, PredecessorMap, ensure_node, reconstruct_path};

use std::{cmp::Ordering, fmt::Debug, ops::ControlFlow, vec};
use num_traits::{Float, Zero};


/// How the distance table behaves between bound passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistancePolicy {
    /// Start every pass with a fresh table
    /// With a consistent heuristic the result matches Dijkstra
    #[default]
    PerIteration,
    /// Keep one table for the whole search
    /// A node settled in an earlier pass is never re-entered, so a goal that
    /// needs a second pass is reported as unreachable
    Persistent,
}


/// Result of one bounded depth-first search
#[derive(Debug, Clone, Copy, PartialEq)]
enum SearchOutcome<C> {
    Found(C), // path cost to the goal
    BoundExceeded(C), // smallest f-cost above the bound, +inf if none
}


/// Iterative Deepening A*
/// https://en.wikipedia.org/wiki/Iterative_deepening_A*
/// Repeats a depth-first search bounded by f = g + h, raising the bound to the
/// smallest f-cost that was cut off until the goal is found.
/// Requirements for an optimal path:
/// 1. The heuristic never overestimates the remaining cost (admissible)
/// 2. Edge weights are non-negative
/// Nothing limits the number of passes, an inadmissible heuristic on a large graph can run for a long time.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdaStar {
    policy: DistancePolicy,
}

impl IdaStar {

    pub fn new(policy: DistancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DistancePolicy {
        self.policy
    }

    /// Shortest path from start to goal, empty if the goal is unreachable
    /// heuristic(node, goal) estimates the remaining cost from node
    pub fn plan<G, H>(&self, graph: &G, start: &G::Node, goal: &G::Node, heuristic: H) -> Result<Vec<G::Node>, PathPlannerError>
    where
        G: Graph,
        G::Cost: Float + Debug,
        H: Fn(&G::Node, &G::Node) -> G::Cost,
        {

        ensure_node(graph, start)?;
        ensure_node(graph, goal)?;

        let mut search = IdaStarSearch::new(graph, start, goal, heuristic);
        let mut bound = (search.heuristic)(start, goal);
        let mut passes = 1;

        loop {
            match search.search(start, Zero::zero(), bound) {
                SearchOutcome::Found(cost) => {
                    tracing::debug!("ida*: {start:?} -> {goal:?} cost {cost:?} after {passes} passes, {} expansions", search.expansions);
                    return reconstruct_path(&search.predecessors, start, goal);
                }
                SearchOutcome::BoundExceeded(next_bound) if next_bound.is_infinite() => {
                    tracing::debug!("ida*: {goal:?} unreachable from {start:?} after {passes} passes");
                    return Ok(Vec::new());
                }
                SearchOutcome::BoundExceeded(next_bound) => {
                    tracing::debug!("ida*: raising bound {bound:?} -> {next_bound:?}");
                    bound = next_bound;
                }
            }

            passes += 1;
            if self.policy == DistancePolicy::PerIteration {
                search.reset(start);
            }
        }
    }
}


/// One node on the depth-first path, with the neighbors still to try
struct Frame<N, C> {
    node: N,
    successors: vec::IntoIter<(N, C, C)>,
    min_cost: C, // smallest f-cost cut off below this node so far
}


/// State of one plan, shared across bound passes
struct IdaStarSearch<'a, G: Graph, H> {
    graph: &'a G,
    goal: &'a G::Node,
    heuristic: H,
    distances: DistanceTable<G::Node, G::Cost>,
    predecessors: PredecessorMap<G::Node>,
    expansions: usize,
}

impl<'a, G, H> IdaStarSearch<'a, G, H>
where
    G: Graph,
    G::Cost: Float + Debug,
    H: Fn(&G::Node, &G::Node) -> G::Cost,
{

    fn new(graph: &'a G, start: &G::Node, goal: &'a G::Node, heuristic: H) -> Self {
        Self {
            graph,
            goal,
            heuristic,
            distances: DistanceTable::new(start.clone()),
            predecessors: PredecessorMap::default(),
            expansions: 0,
        }
    }

    fn reset(&mut self, start: &G::Node) {
        self.distances = DistanceTable::new(start.clone());
        self.predecessors.clear();
    }

    /// Depth-first search below node, g is the cost of reaching it
    /// The path is kept in a heap allocated stack, so its length is not limited by the thread's stack
    fn search(&mut self, node: &G::Node, g: G::Cost, bound: G::Cost) -> SearchOutcome<G::Cost> {
        let mut stack = match self.enter(node, g, bound) {
            ControlFlow::Continue(frame) => vec![frame],
            ControlFlow::Break(outcome) => return outcome,
        };
        let mut min_cost = <G::Cost as Float>::infinity();

        while let Some(frame) = stack.last_mut() {
            let Some((neighbor, distance, _)) = frame.successors.next() else {
                // every neighbor tried, hand the cheapest cut off back to the parent
                let cost = frame.min_cost;
                stack.pop();
                match stack.last_mut() {
                    Some(parent) if cost < parent.min_cost => parent.min_cost = cost,
                    Some(_) => {}
                    None => min_cost = cost,
                }
                continue;
            };

            if !self.distances.improve(&neighbor, distance) {
                continue;
            }
            self.predecessors.insert(neighbor.clone(), frame.node.clone());

            match self.enter(&neighbor, distance, bound) {
                ControlFlow::Continue(child) => stack.push(child),
                ControlFlow::Break(SearchOutcome::Found(cost)) => return SearchOutcome::Found(cost),
                ControlFlow::Break(SearchOutcome::BoundExceeded(cost)) => {
                    if cost < frame.min_cost {
                        frame.min_cost = cost;
                    }
                }
            }
        }

        SearchOutcome::BoundExceeded(min_cost)
    }

    /// Checks node against the bound and the goal, otherwise expands it
    fn enter(&mut self, node: &G::Node, g: G::Cost, bound: G::Cost) -> ControlFlow<SearchOutcome<G::Cost>, Frame<G::Node, G::Cost>> {
        let f = g + (self.heuristic)(node, self.goal);
        if f > bound {
            return ControlFlow::Break(SearchOutcome::BoundExceeded(f));
        }
        if node == self.goal {
            return ControlFlow::Break(SearchOutcome::Found(g));
        }
        self.expansions += 1;

        // Most promising neighbors first, ties keep graph order
        let mut successors: Vec<(G::Node, G::Cost, G::Cost)> = self.graph.neighbors(node)
            .map(|(neighbor, weight)| {
                let distance = g + weight;
                (neighbor.clone(), distance, distance + (self.heuristic)(neighbor, self.goal))
            })
            .collect();
        successors.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal));

        ControlFlow::Continue(Frame {
            node: node.clone(),
            successors: successors.into_iter(),
            min_cost: <G::Cost as Float>::infinity(),
        })
    }
}
