//! Single-source shortest paths over weighted, undirected graphs.
//!
//! Two searches share one contract: [`dijkstra`](graph_algos::dijkstra::dijkstra)
//! backed by an indexed binary heap with decrease-key, and
//! [`IdaStar`](graph_algos::ida_star::IdaStar), an iterative deepening A* guided by a
//! heuristic such as [`euclidean_heuristic`](geometry::euclidean_heuristic).
//! An unreachable goal is an empty path, not an error.

pub mod collections;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod graph_algos;

pub use errors::{PathPlannerError, HeapError};
pub use graph::{Graph, UndirectedGraph, NodeLocator};
pub use graph_algos::{Algorithm, DistanceTable, PredecessorMap, path_cost, reconstruct_path};
pub use graph_algos::dijkstra::{dijkstra, dijkstra_with_predecessors, shortest_distances};
pub use graph_algos::ida_star::{IdaStar, DistancePolicy};
