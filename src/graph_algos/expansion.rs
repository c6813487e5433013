use std::{cmp::Ordering, collections::BinaryHeap};

use indexmap::map::Entry::{Occupied, Vacant};
use tracing::debug;

use crate::collections::FxIndexSet;
use crate::errors::PathPlannerError;
use crate::graph::{Graph, NodeId};
use super::{Cost, NO_PARENT, NodeState, RunStateMap};


/// Outcome of a threshold expansion run
/// Created fresh per invocation and consumed once by the hybrid composer
#[derive(Clone, Debug)]
pub struct ExpansionResult {
    /// Nodes fully processed by the expansion, in the order they were
    /// popped, whether or not their neighbors were relaxed
    pub expanded: FxIndexSet<NodeId>,
    /// Nodes whose estimated total cost exceeded the threshold, so their
    /// neighbors were not relaxed
    pub threshold_exceeded: Vec<NodeId>,
    /// Whether the end node was popped at some point during the drain
    pub reached_end: bool,
}

/// Heuristic-guided expansion bounded by a cost threshold
/// Produces the subgraph the hybrid search will be restricted to:
/// everything whose estimated total cost f = g + heuristic(node, end) stays
/// within threshold_factor * heuristic(start, end)
///
/// Two deliberate policies, both part of the contract:
/// - reaching the end node does not stop the drain; the expanded set is
///   meant to be the whole threshold-bounded neighborhood, not just one path
/// - an over-threshold node is still marked expanded but contributes no
///   further relaxation; a cheap route continuing beyond a locally expensive
///   detour node can therefore be cut off, which is why the hybrid search
///   trades optimality for a smaller search space
pub fn expand(
    graph: &Graph,
    start: NodeId,
    end: NodeId,
    threshold_factor: f64,
) -> Result<ExpansionResult, PathPlannerError> {

    graph.node(start)?;
    graph.node(end)?;

    let h_start = graph.heuristic(start, end)?;
    let threshold = Cost::from(threshold_factor * h_start);
    debug!(threshold = threshold.0, threshold_factor, "expansion threshold computed");

    let mut open_list: BinaryHeap<OpenEntry> = BinaryHeap::new();
    let mut seq: u64 = 0;

    // Fresh run state: every untouched node sits at implicit g = infinity
    let mut states = RunStateMap::default();
    let start_index = states
        .insert_full(start, NodeState::new(NO_PARENT, Cost::from(0.0), Cost::from(h_start)))
        .0;
    open_list.push(OpenEntry { index: start_index, f: Cost::from(h_start), seq });

    let mut expanded: FxIndexSet<NodeId> = FxIndexSet::default();
    let mut threshold_exceeded: Vec<NodeId> = Vec::new();
    let mut reached_end = false;

    while let Some(OpenEntry { index, .. }) = open_list.pop() {

        let (&node_id, state) = states.get_index_mut(index).unwrap();

        // Stale entry - this node was already finalized
        if state.visited {
            continue;
        }
        state.visited = true;

        let g = state.g;
        let f = state.f;
        expanded.insert(node_id);

        // Record reaching the end but keep draining the queue so the
        // expanded set covers the full bounded region
        if node_id == end {
            reached_end = true;
            continue;
        }

        // Over the threshold: keep the node in the expanded set but prune
        // its neighbors
        if f > threshold {
            threshold_exceeded.push(node_id);
            continue;
        }

        for &(neighbor, weight) in &graph.node(node_id)?.neighbors {

            let new_g = g + weight;
            let h = Cost::from(graph.heuristic(neighbor, end)?);

            let neighbor_index;
            match states.entry(neighbor) {
                Vacant(e) => {
                    neighbor_index = e.index();
                    e.insert(NodeState::new(index, new_g, h));
                }
                Occupied(mut e) => {
                    if e.get().visited || e.get().g <= new_g {
                        continue;
                    }
                    neighbor_index = e.index();
                    let state = e.get_mut();
                    state.parent = index;
                    state.set_cost(new_g, h);
                }
            }

            seq += 1;
            open_list.push(OpenEntry { index: neighbor_index, f: new_g + h, seq });
        }
    }

    debug!(
        expanded = expanded.len(),
        over_threshold = threshold_exceeded.len(),
        reached_end,
        "expansion finished"
    );

    Ok(ExpansionResult { expanded, threshold_exceeded, reached_end })
}


/// Open-list entry, ordered by estimated total cost with a sequence
/// tie-break
#[derive(Debug)]
struct OpenEntry {
    index: usize,
    f: Cost,
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
