pub mod cluster_data;
pub mod disk;
pub mod node_data;
pub mod shared;

// Re-export the main types for easy access
pub use cluster_data::*;
pub use node_data::*;
use proxmox_client::ReplicationJob;
pub use shared::*;

/// Everything one run collects from the cluster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterSnapshot {
    pub status: ClusterStatus,
    /// Nodes in the order the cluster status listed them.
    pub nodes: Vec<NodeStatus>,
    /// Replication jobs of all nodes, only collected for JSON output.
    pub replication: Vec<ReplicationJob>,
}

impl ClusterSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, name: &str) -> Option<&NodeStatus> {
        self.nodes.iter().find(|node| node.name == name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut NodeStatus> {
        self.nodes.iter_mut().find(|node| node.name == name)
    }

    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.name.as_str())
    }

    /// Adds the disk sizes of a guest configuration value to the cluster and
    /// to `node`. Returns the number of bytes added.
    pub fn add_vhdd(&mut self, node: &str, config_value: &str) -> u64 {
        let bytes = disk::disk_size_bytes(config_value);
        if bytes == 0 {
            return 0;
        }
        let Some(node_status) = self.node_mut(node) else {
            return 0;
        };
        node_status.vhdd_allocated += bytes;
        self.status.vhdd_allocated += bytes;
        bytes
    }
}
