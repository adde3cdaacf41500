use crate::{
    collectors::Collector,
    metrics::{
        ClusterSnapshot,
        NodeStatus,
    },
};
use eyre::Result;
use proxmox_client::{
    ClusterApi,
    ClusterStatusEntry,
};

/// Reads quorum, the declared node count and the nodes with their online flag
/// from `GET /cluster/status`.
#[derive(Debug, Default)]
pub struct TopologyCollector;

impl Collector for TopologyCollector {
    fn collect(&mut self, api: &dyn ClusterApi, snapshot: &mut ClusterSnapshot) -> Result<()> {
        for entry in api.get_cluster_status()? {
            match entry {
                ClusterStatusEntry::Cluster { quorate, nodes } => {
                    snapshot.status.quorate = quorate;
                    snapshot.status.nodes_total = nodes;
                }
                ClusterStatusEntry::Node { name, online } => match snapshot.node_mut(&name) {
                    Some(node) => *node = NodeStatus::new(name, online),
                    None => snapshot.nodes.push(NodeStatus::new(name, online)),
                },
                ClusterStatusEntry::Other => {}
            }
        }

        debug!(
            quorate = snapshot.status.quorate,
            nodes = snapshot.nodes.len(),
            "cluster topology"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "topology"
    }
}
