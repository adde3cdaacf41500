use crate::{
    collectors::Collector,
    metrics::ClusterSnapshot,
};
use eyre::Result;
use proxmox_client::ClusterApi;

/// Counts the online nodes, sums their CPU usage for the cluster average and
/// reads their KSM sharing from `GET /nodes/{node}/status`.
#[derive(Debug, Default)]
pub struct OnlineNodeCollector {
    cpu_usage_combined: f64,
}

impl OnlineNodeCollector {
    /// Sum of the CPU usage percentages of all online nodes.
    pub fn cpu_usage_combined(&self) -> f64 {
        self.cpu_usage_combined
    }
}

impl Collector for OnlineNodeCollector {
    fn collect(&mut self, api: &dyn ClusterApi, snapshot: &mut ClusterSnapshot) -> Result<()> {
        let status = &mut snapshot.status;
        for node in snapshot.nodes.iter_mut().filter(|node| node.online) {
            status.nodes_online += 1;
            self.cpu_usage_combined += node.cpu_usage;

            let shared = api.get_node_runtime_status(&node.name)?.ksm.shared;
            node.ksm_sharing += shared;
            status.ksm_sharing += shared;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "online nodes"
    }
}
