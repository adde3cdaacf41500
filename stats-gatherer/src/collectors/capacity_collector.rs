use crate::{
    collectors::Collector,
    metrics::ClusterSnapshot,
};
use eyre::Result;
use proxmox_client::ClusterApi;

/// Takes CPU and memory capacity and usage from `GET /nodes` into the nodes
/// and sums them up for the cluster.
#[derive(Debug, Default)]
pub struct CapacityCollector {
    /// Also fetch the replication jobs of every node.
    replication: bool,
}

impl CapacityCollector {
    pub fn new(replication: bool) -> Self {
        Self { replication }
    }
}

impl Collector for CapacityCollector {
    fn collect(&mut self, api: &dyn ClusterApi, snapshot: &mut ClusterSnapshot) -> Result<()> {
        for detail in api.get_nodes()?.iter().filter(|detail| detail.is_node()) {
            let Some(node) = snapshot.node_mut(&detail.node) else {
                warn!(node = %detail.node, "node is not part of the cluster status, ignoring it");
                continue;
            };
            node.apply_capacity(detail);

            let status = &mut snapshot.status;
            status.cpu_total += detail.maxcpu;
            status.ram_total += detail.maxmem;
            status.ram_used += detail.mem;
            status.ram_free += detail.maxmem.saturating_sub(detail.mem);

            if self.replication {
                let jobs = api.get_replication(&detail.node)?;
                debug!(node = %detail.node, jobs = jobs.len(), "replication jobs");
                snapshot.replication.extend(jobs);
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "capacity"
    }
}
