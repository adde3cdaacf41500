use crate::{
    collectors::{
        CapacityCollector,
        Collector,
        GuestCollector,
        OnlineNodeCollector,
        TopologyCollector,
    },
    metrics::ClusterSnapshot,
};
use eyre::{
    Context as _,
    Result,
};
use proxmox_client::ClusterApi;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectOptions {
    /// Read every guest configuration to sum up the virtual disk sizes.
    pub extended: bool,
    /// Read the replication jobs of every node.
    pub replication: bool,
}

/// Runs the collectors in their fixed order against one cluster.
pub struct Orchestrator<'a> {
    api: &'a dyn ClusterApi,
    options: CollectOptions,
}

impl<'a> Orchestrator<'a> {
    pub fn new(api: &'a dyn ClusterApi, options: CollectOptions) -> Self {
        Self { api, options }
    }

    /// Only the topology, enough to announce the nodes for discovery.
    pub fn discover(&self) -> Result<ClusterSnapshot> {
        let mut snapshot = ClusterSnapshot::new();
        self.run(&mut TopologyCollector, &mut snapshot)?;
        Ok(snapshot)
    }

    /// All passes followed by the derived cluster values.
    pub fn collect(&self) -> Result<ClusterSnapshot> {
        let mut snapshot = ClusterSnapshot::new();
        let mut online_nodes = OnlineNodeCollector::default();

        self.run(&mut TopologyCollector, &mut snapshot)?;
        self.run(&mut CapacityCollector::new(self.options.replication), &mut snapshot)?;
        self.run(&mut online_nodes, &mut snapshot)?;
        self.run(&mut GuestCollector::new(self.options.extended), &mut snapshot)?;

        snapshot.status.finalize(online_nodes.cpu_usage_combined());

        info!(
            nodes = snapshot.nodes.len(),
            nodes_online = snapshot.status.nodes_online,
            vms = snapshot.status.vms_total,
            containers = snapshot.status.lxc_total,
            "cluster statistics collected"
        );
        Ok(snapshot)
    }

    fn run(&self, collector: &mut dyn Collector, snapshot: &mut ClusterSnapshot) -> Result<()> {
        debug!(pass = collector.name(), "collecting");
        collector
            .collect(self.api, snapshot)
            .wrap_err_with(|| format!("{} pass failed", collector.name()))
    }
}
