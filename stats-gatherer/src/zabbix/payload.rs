use crate::metrics::{
    ClusterSnapshot,
    MetricValue,
};
use serde_json::{
    json,
    Map,
    Value,
};
use std::fmt;

/// Item key under which the node discovery data is sent.
pub const DISCOVERY_KEY: &str = "proxmox.nodes.discovery";

/// One metric sample in `zabbix_sender -T` input format.
#[derive(Debug, Clone, PartialEq)]
pub struct Item<'a> {
    pub host: &'a str,
    pub key: String,
    pub clock: i64,
    pub value: MetricValue,
}

impl fmt::Display for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.host, self.key, self.clock, self.value)
    }
}

/// `{"data":[{"{#NODE}":"pve1"},...]}` in node order.
pub fn discovery_json(snapshot: &ClusterSnapshot) -> String {
    let data: Vec<Value> = snapshot.node_names().map(|name| json!({ "{#NODE}": name })).collect();
    json!({ "data": data }).to_string()
}

/// Cluster items first, then every node's items, all stamped with `clock`.
pub fn items<'a>(snapshot: &ClusterSnapshot, host: &'a str, clock: i64) -> Vec<Item<'a>> {
    let cluster = snapshot.status.items().into_iter().map(|(key, value)| Item {
        host,
        key: format!("proxmox.cluster.{key}"),
        clock,
        value,
    });
    let nodes = snapshot.nodes.iter().flat_map(|node| {
        node.items().into_iter().map(move |(key, value)| Item {
            host,
            key: format!("proxmox.node.{key}.[{}]", node.name),
            clock,
            value,
        })
    });
    cluster.chain(nodes).collect()
}

/// The items as one CRLF separated block for `zabbix_sender -i -`.
pub fn item_payload(snapshot: &ClusterSnapshot, host: &str, clock: i64) -> String {
    items(snapshot, host, clock)
        .iter()
        .map(|item| format!("{item}\r\n"))
        .collect()
}

/// The whole snapshot for consumers that poll the reporter's JSON output.
pub fn json_document(snapshot: &ClusterSnapshot) -> Value {
    let nodes: Map<String, Value> = snapshot
        .nodes
        .iter()
        .map(|node| (node.name.clone(), json!(node)))
        .collect();

    let replication: Map<String, Value> = snapshot
        .replication
        .iter()
        .map(|job| (replication_id(&job.id), json!(job)))
        .collect();

    let replication_list: Vec<Value> = snapshot
        .replication
        .iter()
        .map(|job| {
            json!({
                "{#ID}": replication_id(&job.id),
                "{#NODE_SRC}": job.source,
                "{#NODE_DST}": job.target,
                "{#VMTYPE}": job.vmtype,
                "{#GUEST}": job.guest,
            })
        })
        .collect();

    let nodes_list: Vec<Value> = snapshot.node_names().map(|name| json!({ "name": name })).collect();

    json!({
        "status": snapshot.status,
        "nodes": nodes,
        "replication": replication,
        "replication_list": replication_list,
        "nodes_list": nodes_list,
    })
}

/// Replication job ids (`100-0`) with the dash replaced, usable in item keys.
fn replication_id(id: &str) -> String {
    id.replace('-', "x")
}
