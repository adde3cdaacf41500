//! An in-memory cluster for exercising the collectors.

use eyre::{
    eyre,
    Result,
};
use proxmox_client::{
    ClusterApi,
    ClusterStatusEntry,
    Guest,
    GuestConfig,
    GuestKind,
    KsmStatus,
    NodeDetail,
    NodeRuntimeStatus,
    ReplicationJob,
};
use std::{
    cell::RefCell,
    collections::HashMap,
};

#[derive(Debug, Default)]
pub(crate) struct FakeCluster {
    pub(crate) status: Vec<ClusterStatusEntry>,
    pub(crate) nodes: Vec<NodeDetail>,
    pub(crate) ksm: HashMap<String, u64>,
    pub(crate) guests: Vec<Guest>,
    pub(crate) configs: HashMap<u64, GuestConfig>,
    pub(crate) replication: HashMap<String, Vec<ReplicationJob>>,
    pub(crate) calls: RefCell<Vec<String>>,
}

impl FakeCluster {
    pub(crate) fn new(quorate: bool) -> Self {
        Self {
            status: vec![ClusterStatusEntry::Cluster { quorate, nodes: 0 }],
            ..Default::default()
        }
    }

    /// Adds a node to the cluster status and the node list.
    pub(crate) fn node(mut self, name: &str, online: bool, maxcpu: u64, cpu: f64, maxmem: u64, mem: u64) -> Self {
        self.status.push(ClusterStatusEntry::Node {
            name: name.to_string(),
            online,
        });
        if let Some(ClusterStatusEntry::Cluster { nodes, .. }) = self.status.first_mut() {
            *nodes += 1;
        }
        self.nodes.push(NodeDetail {
            node: name.to_string(),
            kind: "node".to_string(),
            maxcpu,
            cpu,
            maxmem,
            mem,
        });
        if online {
            self.ksm.insert(name.to_string(), 0);
        }
        self
    }

    pub(crate) fn ksm(mut self, node: &str, shared: u64) -> Self {
        self.ksm.insert(node.to_string(), shared);
        self
    }

    pub(crate) fn guest(mut self, guest: Guest) -> Self {
        self.guests.push(guest);
        self
    }

    pub(crate) fn config(mut self, vmid: u64, entries: &[(&str, &str)]) -> Self {
        self.configs.insert(
            vmid,
            entries
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        );
        self
    }

    pub(crate) fn replication_job(mut self, node: &str, id: &str, target: &str, guest: u64) -> Self {
        self.replication
            .entry(node.to_string())
            .or_default()
            .push(ReplicationJob {
                id: id.to_string(),
                source: node.to_string(),
                target: target.to_string(),
                vmtype: "qemu".to_string(),
                guest,
                extra: Default::default(),
            });
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

pub(crate) fn guest(kind: GuestKind, node: &str, vmid: u64, status: &str, maxcpu: f64, maxmem: u64, mem: u64) -> Guest {
    Guest {
        kind,
        node: node.to_string(),
        vmid,
        status: Some(status.to_string()),
        template: false,
        maxcpu,
        maxmem,
        mem,
    }
}

pub(crate) fn template(node: &str, vmid: u64) -> Guest {
    Guest {
        template: true,
        ..guest(GuestKind::Qemu, node, vmid, "stopped", 2.0, 2048, 0)
    }
}

impl ClusterApi for FakeCluster {
    fn get_cluster_status(&self) -> Result<Vec<ClusterStatusEntry>> {
        self.record("cluster/status".to_string());
        Ok(self.status.clone())
    }

    fn get_nodes(&self) -> Result<Vec<NodeDetail>> {
        self.record("nodes".to_string());
        Ok(self.nodes.clone())
    }

    fn get_node_runtime_status(&self, node: &str) -> Result<NodeRuntimeStatus> {
        self.record(format!("nodes/{node}/status"));
        let shared = *self
            .ksm
            .get(node)
            .ok_or_else(|| eyre!("595 No route to host: {node}"))?;
        Ok(NodeRuntimeStatus {
            ksm: KsmStatus { shared },
        })
    }

    fn get_resources(&self, resource_type: &str) -> Result<Vec<Guest>> {
        self.record(format!("cluster/resources?type={resource_type}"));
        Ok(self.guests.clone())
    }

    fn get_guest_config(&self, node: &str, kind: GuestKind, vmid: u64) -> Result<GuestConfig> {
        self.record(format!("nodes/{node}/{}/{vmid}/config", kind.as_str()));
        Ok(self.configs.get(&vmid).cloned().unwrap_or_default())
    }

    fn get_replication(&self, node: &str) -> Result<Vec<ReplicationJob>> {
        self.record(format!("nodes/{node}/replication"));
        Ok(self.replication.get(node).cloned().unwrap_or_default())
    }
}
