pub mod dijkstra;
pub mod ida_star;
mod shortest_path;

pub use shortest_path::{reconstruct_path, path_cost};

use crate::collections::{FxHashMap, FxIndexMap};
use crate::errors::PathPlannerError;
use crate::graph::Graph;
use dijkstra::dijkstra;
use ida_star::{IdaStar, DistancePolicy};

use std::{fmt, hash::Hash, fmt::Debug};
use num_traits::Float;


/// Node -> node that produced its current best distance
/// The start node has no entry
pub type PredecessorMap<N> = FxIndexMap<N, N>;


/// Best known distance from the start for every reached node
/// Nodes without an entry are at +inf
#[derive(Debug, Clone)]
pub struct DistanceTable<N, C> {
    distances: FxHashMap<N, C>,
}

impl<N, C> DistanceTable<N, C>
where
    N: Eq + Hash + Clone,
    C: Float,
{

    /// Table with only the start node at distance zero
    pub fn new(start: N) -> Self {
        let mut distances = FxHashMap::default();
        distances.insert(start, C::zero());
        Self { distances }
    }

    pub fn get(&self, node: &N) -> C {
        self.distances.get(node).copied().unwrap_or_else(C::infinity)
    }

    /// Record the distance only if it is strictly shorter than the known one
    /// Returns true when the table changed
    pub fn improve(&mut self, node: &N, distance: C) -> bool {
        if distance < self.get(node) {
            self.distances.insert(node.clone(), distance);
            true
        } else {
            false
        }
    }

    /// Number of reached nodes, start included
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N, C)> {
        self.distances.iter().map(|(node, &distance)| (node, distance))
    }
}


/// Fail early on start or goal nodes the graph does not know about
pub(crate) fn ensure_node<G: Graph>(graph: &G, node: &G::Node) -> Result<(), PathPlannerError> {
    if graph.contains_node(node) {
        Ok(())
    } else {
        Err(PathPlannerError::UnknownNode(format!("{node:?}")))
    }
}


/// Selects which search answers a route request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    Dijkstra,
    IdaStar(DistancePolicy),
}

impl Algorithm {

    /// Shortest path from start to goal, empty if the goal is unreachable
    /// The heuristic is only consulted by IDA*
    pub fn plan<G, H>(&self, graph: &G, start: &G::Node, goal: &G::Node, heuristic: H) -> Result<Vec<G::Node>, PathPlannerError>
    where
        G: Graph,
        G::Cost: Float + Debug,
        H: Fn(&G::Node, &G::Node) -> G::Cost,
    {
        match self {
            Algorithm::Dijkstra => dijkstra(graph, start, goal),
            Algorithm::IdaStar(policy) => IdaStar::new(*policy).plan(graph, start, goal, heuristic),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Dijkstra => write!(f, "Dijkstra"),
            Algorithm::IdaStar(DistancePolicy::PerIteration) => write!(f, "IDA*"),
            Algorithm::IdaStar(DistancePolicy::Persistent) => write!(f, "IDA* (persistent distances)"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, euclidean_heuristic};
    use crate::graph::UndirectedGraph;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const ALGORITHMS: [Algorithm; 3] = [
        Algorithm::Dijkstra,
        Algorithm::IdaStar(DistancePolicy::PerIteration),
        Algorithm::IdaStar(DistancePolicy::Persistent),
    ];

    // Brute force over all simple paths, fine for tiny graphs
    fn brute_force_cost(graph: &UndirectedGraph<usize, f64>, start: usize, goal: usize) -> Option<f64> {
        fn walk(graph: &UndirectedGraph<usize, f64>, node: usize, goal: usize, cost: f64, on_path: &mut Vec<usize>, best: &mut Option<f64>) {
            if node == goal {
                if best.is_none_or(|b| cost < b) {
                    *best = Some(cost);
                }
                return;
            }
            for (&neighbor, weight) in graph.neighbors(&node) {
                if on_path.contains(&neighbor) {
                    continue;
                }
                on_path.push(neighbor);
                walk(graph, neighbor, goal, cost + weight, on_path, best);
                on_path.pop();
            }
        }

        let mut best = None;
        walk(graph, start, goal, 0.0, &mut vec![start], &mut best);
        best
    }

    fn random_graph(rng: &mut StdRng, nodes: usize, edge_probability: f64) -> UndirectedGraph<usize, f64> {
        let mut graph = UndirectedGraph::new();
        for node in 0..nodes {
            graph.add_node(node);
        }
        for u in 0..nodes {
            for v in (u + 1)..nodes {
                if rng.random_bool(edge_probability) {
                    graph.add_edge(u, v, rng.random_range(1..10) as f64);
                }
            }
        }
        graph
    }

    // Edges are never shorter than the straight line, so the euclidean heuristic stays consistent
    fn random_geometric_graph(rng: &mut StdRng, nodes: usize, edge_probability: f64) -> (UndirectedGraph<Point, f64>, Vec<Point>) {
        let points: Vec<Point> = (0..nodes)
            .map(|_| Point::new(rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();

        let mut graph = UndirectedGraph::new();
        for point in &points {
            graph.add_node(*point);
        }
        for (i, u) in points.iter().enumerate() {
            for v in &points[i + 1..] {
                if rng.random_bool(edge_probability) {
                    graph.add_edge(*u, *v, u.distance(v) * rng.random_range(1.05..2.0));
                }
            }
        }
        (graph, points)
    }

    #[test]
    fn test_line_graph_same_path_for_every_algorithm() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(3.0, 0.0);
        let d = Point::new(6.0, 0.0);
        let graph = UndirectedGraph::from_edges([(a, b, 1.0), (b, c, 2.0), (c, d, 3.0)]);

        for algorithm in ALGORITHMS {
            let path = algorithm.plan(&graph, &a, &d, euclidean_heuristic).unwrap();
            assert_eq!(path, vec![a, b, c, d], "{algorithm}");
            assert_eq!(path_cost(&graph, &path), Some(6.0));
        }
    }

    #[test]
    fn test_disconnected_components_have_no_path() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);
        let c = Point::new(10.0, 0.0);
        let d = Point::new(14.0, 0.0);
        let graph = UndirectedGraph::from_edges([(a, b, 2.0), (c, d, 4.0)]);

        for algorithm in ALGORITHMS {
            let path = algorithm.plan(&graph, &a, &c, euclidean_heuristic).unwrap();
            assert!(path.is_empty(), "{algorithm} found {path:?}");
        }
    }

    #[test]
    fn test_unknown_nodes_are_errors() {
        let graph: UndirectedGraph<(i32, i32), f64> = UndirectedGraph::from_edges([((0, 0), (1, 0), 1.0)]);

        for algorithm in ALGORITHMS {
            let result = algorithm.plan(&graph, &(0, 0), &(5, 5), euclidean_heuristic);
            assert!(matches!(result, Err(PathPlannerError::UnknownNode(_))), "{algorithm}");
        }
    }

    #[test]
    fn test_dijkstra_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let nodes = rng.random_range(2..=8);
            let graph = random_graph(&mut rng, nodes, 0.4);
            let start = rng.random_range(0..nodes);
            let goal = rng.random_range(0..nodes);

            let path = dijkstra(&graph, &start, &goal).unwrap();
            match brute_force_cost(&graph, start, goal) {
                Some(expected) => {
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&goal));
                    assert_eq!(path_cost(&graph, &path), Some(expected));
                }
                None => assert!(path.is_empty()),
            }
        }
    }

    #[test]
    fn test_ida_star_matches_dijkstra_with_consistent_heuristic() {
        let mut rng = StdRng::seed_from_u64(1234);
        let ida_star = Algorithm::IdaStar(DistancePolicy::PerIteration);

        for _ in 0..50 {
            let (graph, points) = random_geometric_graph(&mut rng, 12, 0.3);
            let start = points[rng.random_range(0..points.len())];
            let goal = points[rng.random_range(0..points.len())];

            let expected = dijkstra(&graph, &start, &goal).unwrap();
            let path = ida_star.plan(&graph, &start, &goal, euclidean_heuristic).unwrap();

            assert_eq!(path.is_empty(), expected.is_empty());
            if !path.is_empty() {
                let cost = path_cost(&graph, &path).unwrap();
                let expected_cost = path_cost(&graph, &expected).unwrap();
                assert!((cost - expected_cost).abs() < 1e-6, "{cost} != {expected_cost}");
            }
        }
    }

    #[test]
    fn test_repeated_calls_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(9);
        let (graph, points) = random_geometric_graph(&mut rng, 20, 0.25);
        let (start, goal) = (points[0], points[19]);

        for algorithm in ALGORITHMS {
            let first = algorithm.plan(&graph, &start, &goal, euclidean_heuristic).unwrap();
            for _ in 0..5 {
                assert_eq!(algorithm.plan(&graph, &start, &goal, euclidean_heuristic).unwrap(), first);
            }
        }
    }

    #[test]
    fn test_graph_shared_between_threads() {
        let mut rng = StdRng::seed_from_u64(5);
        let (graph, points) = random_geometric_graph(&mut rng, 30, 0.2);
        let (start, goal) = (points[3], points[17]);
        let expected = dijkstra(&graph, &start, &goal).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| dijkstra(&graph, &start, &goal).unwrap()))
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    #[test]
    fn test_distance_table_only_records_improvements() {
        let mut table: DistanceTable<&str, f64> = DistanceTable::new("A");

        assert_eq!(table.get(&"A"), 0.0);
        assert_eq!(table.get(&"B"), f64::INFINITY);
        assert!(table.improve(&"B", 4.0));
        assert!(!table.improve(&"B", 4.0));
        assert!(table.improve(&"B", 3.0));
        assert!(!table.improve(&"A", 1.0));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"B"), 3.0);
    }
}
