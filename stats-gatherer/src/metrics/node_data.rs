use super::{
    percentage,
    MetricValue,
};
use proxmox_client::NodeDetail;
use serde::{
    ser::SerializeMap as _,
    Serialize,
    Serializer,
};

/// Per-node figures, reported as `proxmox.node.<key>.[<node>]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStatus {
    pub name: String,
    pub online: bool,
    pub vms_total: u64,
    pub vms_running: u64,
    pub lxc_total: u64,
    pub lxc_running: u64,
    pub vcpu_allocated: f64,
    pub vram_allocated: u64,
    pub vhdd_allocated: u64,
    pub vram_used: u64,
    pub ksm_sharing: u64,
    pub cpu_total: u64,
    pub cpu_usage: f64,
    pub ram_total: u64,
    pub ram_used: u64,
    pub ram_free: u64,
    pub ram_usage: f64,
}

impl NodeStatus {
    pub fn new(name: impl ToString, online: bool) -> Self {
        Self {
            name: name.to_string(),
            online,
            ..Default::default()
        }
    }

    /// Takes over capacity and usage as reported by `GET /nodes`.
    pub fn apply_capacity(&mut self, detail: &NodeDetail) {
        self.cpu_total = detail.maxcpu;
        self.cpu_usage = detail.cpu * 100.0;
        self.ram_total = detail.maxmem;
        self.ram_used = detail.mem;
        self.ram_free = detail.maxmem.saturating_sub(detail.mem);
        self.ram_usage = percentage(detail.mem as f64, detail.maxmem as f64);
    }

    /// Every metric with its item key prefix, in reporting order.
    pub fn items(&self) -> Vec<(&'static str, MetricValue)> {
        use MetricValue::*;
        vec![
            ("online", MetricValue::flag(self.online)),
            ("vms_total", Integer(self.vms_total)),
            ("vms_running", Integer(self.vms_running)),
            ("lxc_total", Integer(self.lxc_total)),
            ("lxc_running", Integer(self.lxc_running)),
            ("vcpu_allocated", Decimal(self.vcpu_allocated)),
            ("vram_allocated", Integer(self.vram_allocated)),
            ("vhdd_allocated", Integer(self.vhdd_allocated)),
            ("vram_used", Integer(self.vram_used)),
            ("ksm_sharing", Integer(self.ksm_sharing)),
            ("cpu_total", Integer(self.cpu_total)),
            ("cpu_usage", Decimal(self.cpu_usage)),
            ("ram_total", Integer(self.ram_total)),
            ("ram_used", Integer(self.ram_used)),
            ("ram_free", Integer(self.ram_free)),
            ("ram_usage", Decimal(self.ram_usage)),
        ]
    }
}

/// The node name as `id`, then every metric.
impl Serialize for NodeStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let items = self.items();
        let mut map = serializer.serialize_map(Some(items.len() + 1))?;
        map.serialize_entry("id", &self.name)?;
        for (key, value) in items {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}
