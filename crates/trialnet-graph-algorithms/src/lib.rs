pub mod common;
pub mod centrality;
pub mod community;
pub mod pathfinding;

pub use common::{GraphView, NodeId};
pub use centrality::{betweenness_centrality, closeness_centrality, degree_centrality};
pub use community::{connected_components, ComponentsResult};
pub use pathfinding::bfs_distances;
