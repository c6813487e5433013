use std::{cmp::Ordering, collections::BinaryHeap};

use indexmap::map::Entry::{Occupied, Vacant};

use crate::collections::FxIndexSet;
use crate::errors::PathPlannerError;
use crate::graph::{Graph, NodeId};
use super::shortest_path::reconstruct_route;
use super::{Cost, NO_PARENT, NodeState, Route, RunStateMap};


/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// Exhaustive search over the full graph, terminating once the end node is
/// finalized
pub fn shortest_path_dijkstra(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
) -> Result<Route, PathPlannerError> {

    let (states, end_index) = build_dijkstra_graph(graph, start, end, None)?;

    match end_index {
        Some(end_index) => reconstruct_route(graph, &states, end_index),
        None => Err(PathPlannerError::NoPathFound),
    }
}

/// Dijkstra restricted to an allowed node set: neighbors outside the set
/// are ignored during relaxation even when an edge to them exists
pub(crate) fn shortest_path_restricted(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
    allowed: &FxIndexSet<NodeId>,
) -> Result<Route, PathPlannerError> {

    let (states, end_index) = build_dijkstra_graph(graph, start, end, Some(allowed))?;

    match end_index {
        Some(end_index) => reconstruct_route(graph, &states, end_index),
        None => Err(PathPlannerError::NoPathFound),
    }
}


/// Traverses the graph with Dijkstra's algorithm
/// Returns the per-run state map along with the end node's index in it, if
/// the end node was reached
/// The queue does not support decrease-in-place, so superseded entries stay
/// queued and are lazily skipped when popped with a stale cost
fn build_dijkstra_graph(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
    allowed: Option<&FxIndexSet<NodeId>>,
) -> Result<(RunStateMap, Option<usize>), PathPlannerError> {

    // Fail fast on unknown endpoints, no partial search
    graph.node(start)?;
    graph.node(end)?;

    let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();
    let mut seq: u64 = 0;

    // Fresh state for this run - costs default to infinity by absence
    let mut states = RunStateMap::default();
    let start_index = states
        .insert_full(start, NodeState::new(NO_PARENT, Cost::from(0.0), Cost::from(0.0)))
        .0;
    queue.push(QueueEntry { index: start_index, cost: Cost::from(0.0), seq });

    // A deadline check between pops would slot in here if callers ever need
    // to bound runtime on very large graphs
    while let Some(QueueEntry { index, cost, .. }) = queue.pop() {

        // fetch current best cost for the node; index came from our own map
        let (&node_id, state) = states.get_index(index).unwrap();
        let best = state.g;

        // A higher popped cost means a better path was already found - stale
        if cost > best {
            continue;
        }

        if node_id == end {
            return Ok((states, Some(index)));
        }

        // loop over neighbors
        for &(neighbor, weight) in &graph.node(node_id)?.neighbors {

            // Restricted searches skip edges leading outside the allowed set
            if let Some(allowed) = allowed {
                if !allowed.contains(&neighbor) {
                    continue;
                }
            }

            let new_cost = best + weight;

            let neighbor_index;
            match states.entry(neighbor) {
                Vacant(e) => {
                    // First time we see this neighbor
                    neighbor_index = e.index();
                    e.insert(NodeState::new(index, new_cost, Cost::from(0.0)));
                }
                Occupied(mut e) => {
                    if e.get().g > new_cost {
                        // Found a better path to this neighbor
                        neighbor_index = e.index();
                        let state = e.get_mut();
                        state.parent = index;
                        state.set_cost(new_cost, Cost::from(0.0));
                    } else {
                        // The existing path is better, do nothing
                        continue;
                    }
                }
            }

            seq += 1;
            queue.push(QueueEntry { index: neighbor_index, cost: new_cost, seq });
        }
    }

    Ok((states, None))
}


/// Heap entry - ordering only needs the cost and a stable tie-break
/// seq is a monotonically increasing push counter so equal-cost entries pop
/// in insertion order; node payloads are never compared
#[derive(Debug)]
struct QueueEntry {
    index: usize,
    cost: Cost,
    seq: u64,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the smallest cost first
        other.cost.cmp(&self.cost).then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}
impl Eq for QueueEntry {}


#[cfg(test)]
mod tests {
    use super::*;

    // Diamond-shaped graph: 1-2-4 (cost 6) and 1-3-4 (cost 4)
    // Coordinates are collapsed so the layout never biases anything
    fn diamond_graph() -> Graph {
        let mut graph = Graph::new();
        for id in 1..=4 {
            graph.add_node(id, 0.0, 0.0).unwrap();
        }
        graph.add_edge(1, 2, 1.0).unwrap();
        graph.add_edge(1, 3, 3.0).unwrap();
        graph.add_edge(2, 4, 5.0).unwrap();
        graph.add_edge(3, 4, 1.0).unwrap();
        graph
    }

    #[test]
    fn test_dijkstra_finds_optimal_path() {
        let graph = diamond_graph();

        let route = shortest_path_dijkstra(&graph, 1, 4).unwrap();
        assert_eq!(route.nodes, vec![1, 3, 4]);
        assert_eq!(route.cost, 4.0);
    }

    #[test]
    fn test_dijkstra_start_equals_end() {
        let graph = diamond_graph();

        let route = shortest_path_dijkstra(&graph, 2, 2).unwrap();
        assert_eq!(route.nodes, vec![2]);
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn test_dijkstra_cycle_cost_is_exact() {
        // 4-node cycle 1-2-3-4-1 with unit weights; 1 -> 3 costs exactly 2
        // via either direction
        let mut graph = Graph::new();
        for id in 1..=4 {
            graph.add_node(id, 0.0, 0.0).unwrap();
        }
        graph.add_edge(1, 2, 1.0).unwrap();
        graph.add_edge(2, 3, 1.0).unwrap();
        graph.add_edge(3, 4, 1.0).unwrap();
        graph.add_edge(4, 1, 1.0).unwrap();

        let route = shortest_path_dijkstra(&graph, 1, 3).unwrap();
        assert_eq!(route.cost, 2.0);
        assert_eq!(route.nodes.len(), 3);
        assert_eq!(route.nodes[0], 1);
        assert_eq!(route.nodes[2], 3);
    }

    #[test]
    fn test_dijkstra_disjoint_components() {
        let mut graph = Graph::new();
        for id in 1..=4 {
            graph.add_node(id, 0.0, 0.0).unwrap();
        }
        graph.add_edge(1, 2, 1.0).unwrap();
        graph.add_edge(3, 4, 1.0).unwrap();

        let result = shortest_path_dijkstra(&graph, 1, 4);
        assert!(matches!(result, Err(PathPlannerError::NoPathFound)));
    }

    #[test]
    fn test_dijkstra_unknown_endpoint() {
        let graph = diamond_graph();

        assert!(matches!(
            shortest_path_dijkstra(&graph, 1, 99),
            Err(PathPlannerError::UnknownNode(99))
        ));
        assert!(matches!(
            shortest_path_dijkstra(&graph, 99, 1),
            Err(PathPlannerError::UnknownNode(99))
        ));
    }

    #[test]
    fn test_dijkstra_path_cost_matches_graph() {
        let mut graph = Graph::new();
        for id in 1..=6 {
            graph.add_node(id, 0.0, 0.0).unwrap();
        }
        graph.add_edge(1, 2, 4.0).unwrap();
        graph.add_edge(1, 3, 2.0).unwrap();
        graph.add_edge(2, 3, 1.0).unwrap();
        graph.add_edge(2, 4, 5.0).unwrap();
        graph.add_edge(3, 4, 8.0).unwrap();
        graph.add_edge(4, 5, 2.0).unwrap();
        graph.add_edge(4, 6, 6.0).unwrap();
        graph.add_edge(5, 6, 3.0).unwrap();

        let route = shortest_path_dijkstra(&graph, 1, 6).unwrap();

        // Recompute the cost independently from the graph
        let mut recomputed = 0.0;
        for pair in route.nodes.windows(2) {
            recomputed += graph.edge_weight(pair[0], pair[1]).unwrap();
        }
        assert_eq!(route.cost, recomputed);
    }

    #[test]
    fn test_restricted_dijkstra_ignores_outside_nodes() {
        let graph = diamond_graph();

        // Cheap route 1-3-4 is fenced out; only 1-2-4 remains
        let allowed: FxIndexSet<NodeId> = [1, 2, 4].into_iter().collect();
        let route = shortest_path_restricted(&graph, 1, 4, &allowed).unwrap();
        assert_eq!(route.nodes, vec![1, 2, 4]);
        assert_eq!(route.cost, 6.0);
    }

    #[test]
    fn test_restricted_dijkstra_unreachable_end() {
        let graph = diamond_graph();

        let allowed: FxIndexSet<NodeId> = [1].into_iter().collect();
        let result = shortest_path_restricted(&graph, 1, 4, &allowed);
        assert!(matches!(result, Err(PathPlannerError::NoPathFound)));
    }
}
