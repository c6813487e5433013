use std::fmt;

use crate::graph::NodeId;


#[derive(Debug, Clone, PartialEq)]
pub enum PathPlannerError {
    UnknownNode(NodeId), // Identifier is not present in the graph
    NoPathFound, // Unable to find a path to the goal
    InvalidGraph(String), // Graph violates a construction invariant
}

impl fmt::Display for PathPlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPlannerError::UnknownNode(id) => write!(f, "unknown node: {id}"),
            PathPlannerError::NoPathFound => write!(f, "no path found"),
            PathPlannerError::InvalidGraph(msg) => write!(f, "invalid graph: {msg}"),
        }
    }
}

impl std::error::Error for PathPlannerError {}
