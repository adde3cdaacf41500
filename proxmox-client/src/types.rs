//! Response bodies of the Proxmox VE API endpoints used by the reporter.
//!
//! Only the fields that feed a metric are modelled. Every body is wrapped in
//! a `{"data": ...}` envelope which the client strips.

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub(crate) data: T,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Ticket {
    pub(crate) ticket: String,
}

/// One entry of `GET /cluster/status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClusterStatusEntry {
    Cluster {
        #[serde(default, deserialize_with = "flag")]
        quorate: bool,
        #[serde(default)]
        nodes: u64,
    },
    Node {
        name: String,
        #[serde(default, deserialize_with = "flag")]
        online: bool,
    },
    #[serde(other)]
    Other,
}

/// One entry of `GET /nodes`. Offline nodes report no capacity figures.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeDetail {
    pub node: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub maxcpu: u64,
    /// CPU utilization as a fraction between 0 and 1.
    #[serde(default)]
    pub cpu: f64,
    #[serde(default)]
    pub maxmem: u64,
    #[serde(default)]
    pub mem: u64,
}

impl NodeDetail {
    pub fn is_node(&self) -> bool {
        self.kind == "node"
    }
}

/// The part of `GET /nodes/{node}/status` the reporter reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeRuntimeStatus {
    pub ksm: KsmStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KsmStatus {
    /// Bytes shared through kernel same-page merging.
    #[serde(default)]
    pub shared: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestKind {
    Qemu,
    Lxc,
    #[default]
    #[serde(other)]
    Other,
}

impl GuestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestKind::Qemu => "qemu",
            GuestKind::Lxc => "lxc",
            GuestKind::Other => "unknown",
        }
    }
}

/// A virtual machine or container from `GET /cluster/resources?type=vm`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Guest {
    #[serde(default, rename = "type")]
    pub kind: GuestKind,
    pub node: String,
    #[serde(default)]
    pub vmid: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub template: bool,
    /// Allocated virtual CPUs, fractional for CPU-limited containers.
    #[serde(default)]
    pub maxcpu: f64,
    #[serde(default)]
    pub maxmem: u64,
    #[serde(default)]
    pub mem: u64,
}

impl Guest {
    /// Guests on unreachable nodes are reported with status `unknown`.
    pub fn has_known_status(&self) -> bool {
        self.status.as_deref().is_some_and(|status| status != "unknown")
    }

    pub fn is_running(&self) -> bool {
        self.status.as_deref() == Some("running")
    }
}

/// Raw key/value pairs of `GET /nodes/{node}/{qemu|lxc}/{vmid}/config`.
/// Non-string values are kept in their JSON text form.
pub type GuestConfig = BTreeMap<String, String>;

pub(crate) fn stringify_config(raw: BTreeMap<String, serde_json::Value>) -> GuestConfig {
    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect()
}

/// A storage replication job from `GET /nodes/{node}/replication`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationJob {
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub vmtype: String,
    #[serde(default)]
    pub guest: u64,
    /// Sync times, durations and failure counters, passed through as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Proxmox reports booleans as `0`/`1`; older releases also used strings.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => value,
        Flag::Int(value) => value != 0,
        Flag::Str(value) => matches!(value.as_str(), "1" | "true"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn cluster_status_entries() {
        let body = json!({
            "data": [
                {"type": "cluster", "id": "cluster", "name": "lab", "nodes": 3, "quorate": 1, "version": 5},
                {"type": "node", "id": "node/pve1", "name": "pve1", "online": 1, "local": 1, "nodeid": 1},
                {"type": "node", "id": "node/pve2", "name": "pve2", "online": 0, "nodeid": 2},
                {"type": "qdevice", "id": "qdevice"}
            ]
        });
        let response: ApiResponse<Vec<ClusterStatusEntry>> = serde_json::from_value(body).unwrap();

        assert_eq!(
            response.data,
            vec![
                ClusterStatusEntry::Cluster {
                    quorate: true,
                    nodes: 3
                },
                ClusterStatusEntry::Node {
                    name: "pve1".to_string(),
                    online: true
                },
                ClusterStatusEntry::Node {
                    name: "pve2".to_string(),
                    online: false
                },
                ClusterStatusEntry::Other,
            ]
        );
    }

    #[test]
    fn offline_node_detail_defaults_to_zero() {
        let nodes: Vec<NodeDetail> = serde_json::from_value(json!([
            {"node": "pve1", "type": "node", "status": "online", "maxcpu": 8, "cpu": 0.125, "maxmem": 4096, "mem": 1024},
            {"node": "pve2", "type": "node", "status": "offline"}
        ]))
        .unwrap();

        assert_eq!(nodes[0].maxcpu, 8);
        assert_eq!(nodes[0].cpu, 0.125);
        assert!(nodes[1].is_node());
        assert_eq!(nodes[1].maxmem, 0);
        assert_eq!(nodes[1].cpu, 0.0);
    }

    #[test]
    fn guests_from_cluster_resources() {
        let guests: Vec<Guest> = serde_json::from_value(json!([
            {"type": "qemu", "node": "pve1", "vmid": 100, "status": "running", "template": 0, "maxcpu": 2, "maxmem": 2048, "mem": 1024},
            {"type": "lxc", "node": "pve1", "vmid": 200, "status": "stopped", "maxcpu": 0.5, "maxmem": 512, "mem": 0},
            {"type": "qemu", "node": "pve2", "vmid": 9000, "status": "stopped", "template": 1},
            {"type": "qemu", "node": "pve3", "vmid": 101, "status": "unknown"},
            {"type": "openvz", "node": "pve3", "vmid": 300}
        ]))
        .unwrap();

        assert_eq!(guests[0].kind, GuestKind::Qemu);
        assert!(guests[0].is_running());
        assert_eq!(guests[1].kind, GuestKind::Lxc);
        assert_eq!(guests[1].maxcpu, 0.5);
        assert!(guests[2].template);
        assert!(!guests[3].has_known_status());
        assert_eq!(guests[4].kind, GuestKind::Other);
        assert!(!guests[4].has_known_status());
    }

    #[test]
    fn guest_config_values_become_strings() {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_value(json!({
            "cores": 2,
            "scsi0": "local-lvm:vm-100-disk-0,size=32G",
            "onboot": 1
        }))
        .unwrap();

        let config = stringify_config(raw);

        assert_eq!(config["cores"], "2");
        assert_eq!(config["scsi0"], "local-lvm:vm-100-disk-0,size=32G");
    }

    #[test]
    fn replication_job_keeps_extra_fields() {
        let job: ReplicationJob = serde_json::from_value(json!({
            "id": "100-0",
            "guest": 100,
            "jobnum": 0,
            "source": "pve1",
            "target": "pve2",
            "vmtype": "qemu",
            "last_sync": 1700000000,
            "fail_count": 0
        }))
        .unwrap();

        assert_eq!(job.source, "pve1");
        assert_eq!(job.guest, 100);
        assert_eq!(job.extra["last_sync"], json!(1700000000));

        let value = serde_json::to_value(&job).unwrap();
        assert_eq!(value["fail_count"], json!(0));
        assert_eq!(value["id"], json!("100-0"));
    }

    #[test]
    fn flags_accept_bools_and_strings() {
        let entry: ClusterStatusEntry =
            serde_json::from_value(json!({"type": "node", "name": "pve1", "online": true})).unwrap();
        assert_eq!(
            entry,
            ClusterStatusEntry::Node {
                name: "pve1".to_string(),
                online: true
            }
        );

        let entry: ClusterStatusEntry =
            serde_json::from_value(json!({"type": "cluster", "quorate": "1", "nodes": 2})).unwrap();
        assert_eq!(
            entry,
            ClusterStatusEntry::Cluster {
                quorate: true,
                nodes: 2
            }
        );
    }
}
