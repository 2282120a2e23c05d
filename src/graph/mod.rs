mod locator;

pub use locator::{NodeLocator, DEFAULT_TOLERANCE};

use crate::collections::FxIndexMap;

use std::{hash::Hash, fmt::Debug};


/// Read-only view of a weighted, undirected graph
/// The search algorithms only ever borrow a graph through this trait
pub trait Graph {
    type Node: Eq + Hash + Clone + Debug;
    type Cost: Copy;

    fn contains_node(&self, node: &Self::Node) -> bool;

    /// All nodes of the graph
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Neighbors of a node together with the weight of the connecting edge
    /// Unknown nodes have no neighbors
    fn neighbors(&self, node: &Self::Node) -> impl Iterator<Item = (&Self::Node, Self::Cost)>;

    /// Weight of the edge (u, v), None if the nodes are not adjacent
    fn weight(&self, u: &Self::Node, v: &Self::Node) -> Option<Self::Cost>;
}


/// Adjacency map graph with undirected edges
/// Nodes and neighbors iterate in insertion order
#[derive(Debug, Clone)]
pub struct UndirectedGraph<N, C> {
    adjacency: FxIndexMap<N, FxIndexMap<N, C>>,
}

impl<N, C> Default for UndirectedGraph<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, C> UndirectedGraph<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: Copy,
{

    pub fn new() -> Self {
        Self {
            adjacency: FxIndexMap::default(),
        }
    }

    /// Build a graph from (u, v, weight) triples
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, C)>,
    {
        let mut graph = Self::new();
        for (u, v, weight) in edges {
            graph.add_edge(u, v, weight);
        }
        graph
    }

    /// Add an isolated node, no-op if it already exists
    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    /// Add an edge in both directions
    /// Adding an existing edge again replaces its weight
    pub fn add_edge(&mut self, u: N, v: N, weight: C) {
        self.adjacency.entry(u.clone()).or_default().insert(v.clone(), weight);
        self.adjacency.entry(v).or_default().insert(u, weight);
    }

    /// Remove the edge (u, v), returning its weight
    pub fn remove_edge(&mut self, u: &N, v: &N) -> Option<C> {
        let weight = self.adjacency.get_mut(u)?.shift_remove(v)?;
        if let Some(edges) = self.adjacency.get_mut(v) {
            edges.shift_remove(u);
        }
        Some(weight)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges, self loops count once
    pub fn edge_count(&self) -> usize {
        let (loops, links) = self.adjacency.iter()
            .flat_map(|(u, edges)| edges.keys().map(move |v| u == v))
            .fold((0, 0), |(loops, links), is_loop| {
                if is_loop { (loops + 1, links) } else { (loops, links + 1) }
            });
        loops + links / 2
    }
}

impl<N, C> Graph for UndirectedGraph<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: Copy,
{
    type Node = N;
    type Cost = C;

    fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    fn neighbors(&self, node: &N) -> impl Iterator<Item = (&N, C)> {
        self.adjacency.get(node)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(neighbor, &weight)| (neighbor, weight)))
    }

    fn weight(&self, u: &N, v: &N) -> Option<C> {
        self.adjacency.get(u)?.get(v).copied()
    }
}
