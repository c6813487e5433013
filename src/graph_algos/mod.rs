pub mod dijkstra;
pub mod a_star;
pub mod expansion;
pub mod hybrid;
mod shortest_path;

use ordered_float::OrderedFloat;

use crate::collections::FxIndexMap;
use crate::graph::NodeId;


/// All engine bookkeeping compares and orders costs, so they are carried
/// as OrderedFloat; edge weights and returned path costs stay plain f64
pub(crate) type Cost = OrderedFloat<f64>;

/// Parent marker for the start node of a run
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Per-run, per-node search state
/// Kept outside the graph so repeated or interleaved runs over the same
/// graph never observe each other's bookkeeping - every engine invocation
/// allocates a fresh RunStateMap. A node absent from the map has implicit
/// g = f = infinity and no predecessor
#[derive(Clone, Debug)]
pub(crate) struct NodeState {
    pub parent: usize, // index of the predecessor in the run map, NO_PARENT for start
    pub g: Cost, // best known cost from the start node
    pub f: Cost, // g + heuristic to the target
    pub visited: bool,
}

impl NodeState {
    pub fn new(parent: usize, g: Cost, h: Cost) -> Self {
        Self { parent, g, f: g + h, visited: false }
    }

    /// Update g and f together so they never disagree mid-run
    pub fn set_cost(&mut self, g: Cost, h: Cost) {
        self.g = g;
        self.f = g + h;
    }
}

/// Per-run map from node id to its search state
/// Map indices double as compact node handles for predecessor links
pub(crate) type RunStateMap = FxIndexMap<NodeId, NodeState>;


/// Shortest path between two nodes, start and end inclusive
/// The cost is re-derived from the graph's edge weights during
/// reconstruction, not read back from search bookkeeping
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub nodes: Vec<NodeId>,
    pub cost: f64,
}

/// Hybrid search result: the route plus how many nodes the threshold
/// expansion admitted into the restricted search space
#[derive(Clone, Debug, PartialEq)]
pub struct HybridRoute {
    pub route: Route,
    pub expanded_nodes: usize,
}
