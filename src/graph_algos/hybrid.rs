use tracing::debug;

use crate::errors::PathPlannerError;
use crate::graph::{Graph, NodeId};
use super::dijkstra::shortest_path_restricted;
use super::expansion::expand;
use super::HybridRoute;


/// Two-phase search: a threshold-bounded expansion first narrows the graph
/// to a promising neighborhood, then Dijkstra runs restricted to it
/// The returned cost is never below the unrestricted optimum, and matches
/// it whenever the expanded set covers some optimal path end to end; a
/// degenerate threshold that strands the end node outside the expanded set
/// resolves to NoPathFound
pub fn shortest_path_hybrid(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
    threshold_factor: f64,
) -> Result<HybridRoute, PathPlannerError> {

    let expansion = expand(graph, start, end, threshold_factor)?;
    debug!(
        expanded_nodes = expansion.expanded.len(),
        reached_end = expansion.reached_end,
        "running dijkstra over the expanded subgraph"
    );

    let route = shortest_path_restricted(graph, start, end, &expansion.expanded)?;

    Ok(HybridRoute { route, expanded_nodes: expansion.expanded.len() })
}
