use std::fmt;


#[derive(Debug, Clone, PartialEq)]
pub enum PathPlannerError {
    UnknownNode(String), // Start or goal is not part of the graph
    BrokenPredecessorChain, // Predecessors do not lead back to the start
    NoNodeWithinTolerance, // No graph node close enough to the requested coordinates
    Heap(HeapError),
    KdTreeError(String),
}

/// Misuse of the indexed heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    DuplicateNode, // Node pushed while already queued
    MissingNode, // decrease_key on a node that is not queued
}


impl fmt::Display for PathPlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPlannerError::UnknownNode(node) => write!(f, "node {node} is not part of the graph"),
            PathPlannerError::BrokenPredecessorChain => write!(f, "predecessor chain does not lead back to the start node"),
            PathPlannerError::NoNodeWithinTolerance => write!(f, "no graph node within tolerance of the requested coordinates"),
            PathPlannerError::Heap(e) => write!(f, "heap misuse: {e}"),
            PathPlannerError::KdTreeError(e) => write!(f, "kdtree error: {e}"),
        }
    }
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::DuplicateNode => write!(f, "node is already in the heap"),
            HeapError::MissingNode => write!(f, "node is not in the heap"),
        }
    }
}

impl std::error::Error for PathPlannerError {}
impl std::error::Error for HeapError {}


impl From<HeapError> for PathPlannerError {
    fn from(error: HeapError) -> Self {
        PathPlannerError::Heap(error)
    }
}

impl From<kdtree::ErrorKind> for PathPlannerError {
    fn from(error: kdtree::ErrorKind) -> Self {
        PathPlannerError::KdTreeError(error.to_string())
    }
}
