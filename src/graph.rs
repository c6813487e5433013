use crate::collections::FxIndexMap;
use crate::errors::PathPlannerError;
use crate::geo::haversine;


/// Stable external node identifier (e.g. an OSM node id)
pub type NodeId = i64;

/// Node on the road network
/// Identity, coordinates and adjacency are fixed once the graph is built;
/// per-run search state lives outside the graph (see graph_algos)
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
    pub neighbors: Vec<(NodeId, f64)>, // (neighbor id, edge weight), insertion ordered
}

/// Weighted undirected road graph
/// Edges are stored symmetrically: an edge between A and B appears in both
/// adjacency lists with the same weight
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: FxIndexMap<NodeId, Node>,
}

impl Graph {

    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an externally supplied adjacency mapping:
    /// (node id, (lat, lon), list of (neighbor id, weight))
    /// The mapping is expected to list each undirected edge from both
    /// endpoints; entries are inserted as given, after validation
    pub fn from_adjacency<I>(entries: I) -> Result<Self, PathPlannerError>
    where
        I: IntoIterator<Item = (NodeId, (f64, f64), Vec<(NodeId, f64)>)>,
        {

        let entries: Vec<_> = entries.into_iter().collect();

        let mut graph = Self::new();
        for (id, (lat, lon), _) in &entries {
            graph.add_node(*id, *lat, *lon)?;
        }

        for (id, _, neighbors) in entries {
            for (neighbor, weight) in neighbors {
                validate_weight(id, neighbor, weight)?;
                if !graph.nodes.contains_key(&neighbor) {
                    return Err(PathPlannerError::UnknownNode(neighbor));
                }
                // node was added above, lookup cannot fail
                let node = graph.nodes.get_mut(&id).unwrap();
                node.neighbors.push((neighbor, weight));
            }
        }

        Ok(graph)
    }

    /// Add a node to the graph
    /// Re-adding an existing identifier is rejected - identifiers are stable
    pub fn add_node(&mut self, id: NodeId, lat: f64, lon: f64) -> Result<(), PathPlannerError> {
        if self.nodes.contains_key(&id) {
            return Err(PathPlannerError::InvalidGraph(format!("duplicate node id {id}")));
        }

        self.nodes.insert(id, Node { id, lat, lon, neighbors: Vec::new() });
        Ok(())
    }

    /// Add an undirected edge between two existing nodes
    /// The edge lands in both adjacency lists with the same weight
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, weight: f64) -> Result<(), PathPlannerError> {
        validate_weight(a, b, weight)?;

        if !self.nodes.contains_key(&a) {
            return Err(PathPlannerError::UnknownNode(a));
        }
        if !self.nodes.contains_key(&b) {
            return Err(PathPlannerError::UnknownNode(b));
        }

        self.nodes.get_mut(&a).unwrap().neighbors.push((b, weight));
        if a != b {
            self.nodes.get_mut(&b).unwrap().neighbors.push((a, weight));
        }

        Ok(())
    }

    /// Look up a node by identifier
    pub fn node(&self, id: NodeId) -> Result<&Node, PathPlannerError> {
        self.nodes.get(&id).ok_or(PathPlannerError::UnknownNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate node identifiers in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Weight of the edge from -> to, scanned from the adjacency list
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.nodes.get(&from)?
            .neighbors
            .iter()
            .find(|(id, _)| *id == to)
            .map(|(_, weight)| *weight)
    }

    /// Great-circle distance in meters between two nodes
    /// Admissible and consistent heuristic for the A* family:
    /// heuristic(a, b) >= 0 and heuristic(a, a) == 0
    pub fn heuristic(&self, a: NodeId, b: NodeId) -> Result<f64, PathPlannerError> {
        let a = self.node(a)?;
        let b = self.node(b)?;
        Ok(haversine(a.lat, a.lon, b.lat, b.lon))
    }
}


/// Edge weights must be finite and non-negative, otherwise Dijkstra/A*
/// would silently return wrong paths
fn validate_weight(a: NodeId, b: NodeId, weight: f64) -> Result<(), PathPlannerError> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(PathPlannerError::InvalidGraph(format!(
            "edge {a} -> {b} has invalid weight {weight}"
        )));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_is_symmetric() {
        let mut graph = Graph::new();
        graph.add_node(1, 0.0, 0.0).unwrap();
        graph.add_node(2, 0.0, 0.001).unwrap();
        graph.add_edge(1, 2, 5.0).unwrap();

        assert_eq!(graph.edge_weight(1, 2), Some(5.0));
        assert_eq!(graph.edge_weight(2, 1), Some(5.0));
    }

    #[test]
    fn test_add_node_rejects_duplicate_id() {
        let mut graph = Graph::new();
        graph.add_node(1, 0.0, 0.0).unwrap();

        let result = graph.add_node(1, 1.0, 1.0);
        assert!(matches!(result, Err(PathPlannerError::InvalidGraph(_))));
    }

    #[test]
    fn test_add_edge_rejects_negative_weight() {
        let mut graph = Graph::new();
        graph.add_node(1, 0.0, 0.0).unwrap();
        graph.add_node(2, 0.0, 0.001).unwrap();

        let result = graph.add_edge(1, 2, -1.0);
        assert!(matches!(result, Err(PathPlannerError::InvalidGraph(_))));

        // a failed insert must not leave a half-added edge behind
        assert_eq!(graph.edge_weight(1, 2), None);
    }

    #[test]
    fn test_add_edge_rejects_unknown_endpoint() {
        let mut graph = Graph::new();
        graph.add_node(1, 0.0, 0.0).unwrap();

        let result = graph.add_edge(1, 99, 1.0);
        assert!(matches!(result, Err(PathPlannerError::UnknownNode(99))));
    }

    #[test]
    fn test_node_lookup_unknown_id() {
        let graph = Graph::new();
        assert!(matches!(graph.node(7), Err(PathPlannerError::UnknownNode(7))));
    }

    #[test]
    fn test_from_adjacency_builds_graph() {
        let graph = Graph::from_adjacency([
            (1, (0.0, 0.0), vec![(2, 3.0)]),
            (2, (0.0, 0.001), vec![(1, 3.0)]),
        ]).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge_weight(1, 2), Some(3.0));
        assert_eq!(graph.edge_weight(2, 1), Some(3.0));
    }

    #[test]
    fn test_from_adjacency_rejects_unknown_neighbor() {
        let result = Graph::from_adjacency([
            (1, (0.0, 0.0), vec![(5, 3.0)]),
        ]);

        assert!(matches!(result, Err(PathPlannerError::UnknownNode(5))));
    }

    #[test]
    fn test_heuristic_properties() {
        let mut graph = Graph::new();
        graph.add_node(1, 0.0, 0.0).unwrap();
        graph.add_node(2, 0.0, 0.5).unwrap();

        assert_eq!(graph.heuristic(1, 1).unwrap(), 0.0);
        let d = graph.heuristic(1, 2).unwrap();
        assert!(d > 0.0);
        assert_eq!(graph.heuristic(2, 1).unwrap(), d);
    }
}
