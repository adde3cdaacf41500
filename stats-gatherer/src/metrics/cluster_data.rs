use super::{
    percentage,
    MetricValue,
};
use serde::{
    Serialize,
    Serializer,
};

/// Cluster-wide totals, reported as `proxmox.cluster.<key>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterStatus {
    pub quorate: bool,
    pub cpu_total: u64,
    /// Average CPU usage of the online nodes, in percent.
    pub cpu_usage: f64,
    pub ram_total: u64,
    pub ram_used: u64,
    pub ram_free: u64,
    pub ram_usage: f64,
    pub ksm_sharing: u64,
    pub vcpu_allocated: f64,
    pub vram_allocated: u64,
    /// Bytes of virtual disk allocated to guests, only filled in extended mode.
    pub vhdd_allocated: u64,
    pub vram_used: u64,
    pub vram_usage: f64,
    pub vms_running: u64,
    pub vms_stopped: u64,
    pub vms_total: u64,
    pub lxc_running: u64,
    pub lxc_stopped: u64,
    pub lxc_total: u64,
    pub vm_templates: u64,
    pub nodes_total: u64,
    pub nodes_online: u64,
}

impl ClusterStatus {
    /// Every metric with its item key suffix, in reporting order.
    pub fn items(&self) -> Vec<(&'static str, MetricValue)> {
        use MetricValue::*;
        vec![
            ("quorate", MetricValue::flag(self.quorate)),
            ("cpu_total", Integer(self.cpu_total)),
            ("cpu_usage", Decimal(self.cpu_usage)),
            ("ram_total", Integer(self.ram_total)),
            ("ram_used", Integer(self.ram_used)),
            ("ram_free", Integer(self.ram_free)),
            ("ram_usage", Decimal(self.ram_usage)),
            ("ksm_sharing", Integer(self.ksm_sharing)),
            ("vcpu_allocated", Decimal(self.vcpu_allocated)),
            ("vram_allocated", Integer(self.vram_allocated)),
            ("vhdd_allocated", Integer(self.vhdd_allocated)),
            ("vram_used", Integer(self.vram_used)),
            ("vram_usage", Decimal(self.vram_usage)),
            ("vms_running", Integer(self.vms_running)),
            ("vms_stopped", Integer(self.vms_stopped)),
            ("vms_total", Integer(self.vms_total)),
            ("lxc_running", Integer(self.lxc_running)),
            ("lxc_stopped", Integer(self.lxc_stopped)),
            ("lxc_total", Integer(self.lxc_total)),
            ("vm_templates", Integer(self.vm_templates)),
            ("nodes_total", Integer(self.nodes_total)),
            ("nodes_online", Integer(self.nodes_online)),
        ]
    }

    /// Derives the values that only make sense once all passes are done.
    pub fn finalize(&mut self, cpu_usage_combined: f64) {
        self.ram_usage = percentage(self.ram_used as f64, self.ram_total as f64);
        self.cpu_usage = if self.nodes_online > 0 {
            cpu_usage_combined / self.nodes_online as f64
        } else {
            0.0
        };
        self.vram_usage = percentage(self.vram_used as f64, self.vram_allocated as f64);
        self.vms_stopped = self.vms_total.saturating_sub(self.vms_running);
        self.lxc_stopped = self.lxc_total.saturating_sub(self.lxc_running);
    }
}

impl Serialize for ClusterStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.items())
    }
}
