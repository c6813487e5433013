//! Shortest path engines for road networks
//!
//! Three strategies over the same weighted, undirected [`Graph`]:
//! - [`shortest_path_dijkstra`]: exhaustive, exact
//! - [`shortest_path_a_star`]: guided by the great-circle heuristic, exact
//! - [`shortest_path_hybrid`]: a threshold-bounded expansion narrows the
//!   graph first, then Dijkstra runs restricted to it - faster, but the
//!   result may exceed the true optimum
//!
//! The graph is immutable once built; every search run keeps its own state,
//! so repeated runs over one graph never interfere.

pub mod collections;
pub mod errors;
pub mod geo;
pub mod graph;
pub mod graph_algos;

pub use errors::PathPlannerError;
pub use graph::{Graph, Node, NodeId};
pub use graph_algos::a_star::shortest_path_a_star;
pub use graph_algos::dijkstra::shortest_path_dijkstra;
pub use graph_algos::expansion::{expand, ExpansionResult};
pub use graph_algos::hybrid::shortest_path_hybrid;
pub use graph_algos::{HybridRoute, Route};
