use crate::geometry::{Coordinates, euclidean};
use crate::errors::PathPlannerError;
use super::Graph;

use kdtree::KdTree;
use kdtree::distance::squared_euclidean as kt_squared_euclidean;


/// Coordinates closer than this are treated as the same place
pub const DEFAULT_TOLERANCE: f64 = 0.00001;


/// Snaps free coordinates onto the nodes of a graph
/// Built once per graph, the graph itself is not borrowed afterwards
pub struct NodeLocator<N> {
    nodes: Vec<N>,
    tree: KdTree<f64, usize, [f64; 2]>, // stores point -> index in nodes
}

impl<N> NodeLocator<N>
where
    N: Coordinates<f64> + Clone,
{

    /// Index every node of the graph by its coordinates
    pub fn new<G>(graph: &G) -> Result<Self, PathPlannerError>
    where
        G: Graph<Node = N>,
    {
        let mut nodes = Vec::new();
        let mut tree = KdTree::new(2);

        for node in graph.nodes() {
            let (x, y) = node.coordinates();
            tree.add([x, y], nodes.len())?;
            nodes.push(node.clone());
        }

        tracing::debug!("indexed {} nodes for coordinate lookup", nodes.len());
        Ok(Self { nodes, tree })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nearest node to (x, y) and its euclidean distance
    pub fn nearest(&self, x: f64, y: f64) -> Result<Option<(&N, f64)>, PathPlannerError> {
        if self.nodes.is_empty() {
            return Ok(None);
        }

        let found = self.tree.nearest(&[x, y], 1, &kt_squared_euclidean)?;
        Ok(found.first().map(|&(_, &idx)| {
            let node = &self.nodes[idx];
            // recompute, the tree reports squared distances
            let (nx, ny) = node.coordinates();
            (node, euclidean(x, y, nx, ny))
        }))
    }

    /// Nearest node to (x, y) if it lies within tolerance
    pub fn locate(&self, x: f64, y: f64, tolerance: f64) -> Result<&N, PathPlannerError> {
        match self.nearest(x, y)? {
            Some((node, distance)) if distance <= tolerance => Ok(node),
            _ => Err(PathPlannerError::NoNodeWithinTolerance),
        }
    }
}
