use crate::errors::PathPlannerError;
use crate::graph::Graph;
use super::{NO_PARENT, Route, RunStateMap};


/// Construct the route from the start node to the end node by walking
/// predecessor links backward from end_index
/// The cost is recomputed by scanning each predecessor's adjacency list for
/// the matching edge, so the returned cost is consistent with the graph
/// even if a run's accumulated costs were wrong
pub(crate) fn reconstruct_route(
    graph: &Graph,
    states: &RunStateMap,
    end_index: usize,
) -> Result<Route, PathPlannerError> {

    let mut nodes = Vec::new();
    let mut current_index = end_index;

    // Trace back from end to start
    while current_index != NO_PARENT {
        if let Some((id, state)) = states.get_index(current_index) {
            nodes.push(*id);
            current_index = state.parent;
        } else {
            return Err(PathPlannerError::NoPathFound);
        }
    }

    if nodes.is_empty() {
        return Err(PathPlannerError::NoPathFound);
    }

    // The walk produced end -> start, flip it
    nodes.reverse();

    // Re-derive the cost edge by edge from the graph
    let mut cost = 0.0;
    for pair in nodes.windows(2) {
        match graph.edge_weight(pair[0], pair[1]) {
            Some(weight) => cost += weight,
            None => {
                return Err(PathPlannerError::InvalidGraph(format!(
                    "no edge between path nodes {} and {}",
                    pair[0], pair[1]
                )));
            }
        }
    }

    Ok(Route { nodes, cost })
}
