use std::{cmp::Ordering, collections::BinaryHeap};

use indexmap::map::Entry::{Occupied, Vacant};

use crate::errors::PathPlannerError;
use crate::graph::{Graph, NodeId};
use super::shortest_path::reconstruct_route;
use super::{Cost, NO_PARENT, NodeState, Route, RunStateMap};


/// Identify the shortest path using the A* algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
/// The heuristic (great-circle distance, see Graph::heuristic) is admissible
/// and consistent, which is what allows stopping as soon as the end node is
/// popped from the queue
pub fn shortest_path_a_star(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
) -> Result<Route, PathPlannerError> {

    let (states, end_index) = build_a_star_graph(graph, start, end)?;

    match end_index {
        Some(end_index) => reconstruct_route(graph, &states, end_index),
        None => Err(PathPlannerError::NoPathFound),
    }
}


/// Traverses the graph using the A* algorithm
/// Returns the per-run state map along with the end node's index in it
/// The open list is ordered by f = g + heuristic(node, end); g and f are
/// always updated together through NodeState::set_cost
fn build_a_star_graph(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
) -> Result<(RunStateMap, Option<usize>), PathPlannerError> {

    graph.node(start)?;
    graph.node(end)?;

    let mut open_list: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut seq: u64 = 0;

    let mut states = RunStateMap::default();

    let h_start = Cost::from(graph.heuristic(start, end)?);
    let start_index = states
        .insert_full(start, NodeState::new(NO_PARENT, Cost::from(0.0), h_start))
        .0;
    open_list.push(OpenEntry { index: start_index, g: Cost::from(0.0), f: h_start, seq });

    while let Some(OpenEntry { index, g, .. }) = open_list.pop() {

        let (&node_id, state) = states.get_index(index).unwrap();
        let best = state.g;

        // Stale entry - a better path to this node was found after the push
        if g > best {
            continue;
        }

        // Admissible + consistent heuristic: first pop of the end node is
        // guaranteed optimal, stop here
        if node_id == end {
            return Ok((states, Some(index)));
        }

        for &(neighbor, weight) in &graph.node(node_id)?.neighbors {

            // confirmed cost to the neighbor, no heuristic component
            let new_g = best + weight;
            let h = Cost::from(graph.heuristic(neighbor, end)?);

            let neighbor_index;
            match states.entry(neighbor) {
                Vacant(e) => {
                    neighbor_index = e.index();
                    e.insert(NodeState::new(index, new_g, h));
                }
                Occupied(mut e) => {
                    if e.get().g > new_g {
                        neighbor_index = e.index();
                        let state = e.get_mut();
                        state.parent = index;
                        state.set_cost(new_g, h);
                    } else {
                        continue;
                    }
                }
            }

            seq += 1;
            open_list.push(OpenEntry { index: neighbor_index, g: new_g, f: new_g + h, seq });
        }
    }

    Ok((states, None))
}


/// Open-list entry, ordered by f with a sequence tie-break
#[derive(Debug)]
struct OpenEntry {
    index: usize,
    g: Cost, // confirmed cost to reach this node
    f: Cost, // g + heuristic estimate to the end
    seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}
impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}
impl Eq for OpenEntry {}
