use crate::{
    collectors::Collector,
    metrics::{
        disk::is_disk_slot,
        ClusterSnapshot,
        ClusterStatus,
        NodeStatus,
    },
};
use eyre::Result;
use proxmox_client::{
    ClusterApi,
    Guest,
    GuestKind,
};

/// Counts VMs, containers and templates from `GET /cluster/resources` and sums
/// up their allocations. In extended mode the guest configurations are read
/// as well to sum up the allocated virtual disk space.
#[derive(Debug, Default)]
pub struct GuestCollector {
    extended: bool,
}

impl GuestCollector {
    pub fn new(extended: bool) -> Self {
        Self { extended }
    }

    fn count(status: &mut ClusterStatus, node: &mut NodeStatus, guest: &Guest) {
        status.vcpu_allocated += guest.maxcpu;
        status.vram_allocated += guest.maxmem;
        status.vram_used += guest.mem;
        node.vcpu_allocated += guest.maxcpu;
        node.vram_allocated += guest.maxmem;
        node.vram_used += guest.mem;

        let running = u64::from(guest.is_running());
        match guest.kind {
            GuestKind::Qemu => {
                status.vms_total += 1;
                status.vms_running += running;
                node.vms_total += 1;
                node.vms_running += running;
            }
            GuestKind::Lxc => {
                status.lxc_total += 1;
                status.lxc_running += running;
                node.lxc_total += 1;
                node.lxc_running += running;
            }
            GuestKind::Other => {}
        }
    }

    fn collect_vhdd(api: &dyn ClusterApi, snapshot: &mut ClusterSnapshot, guest: &Guest) -> Result<()> {
        let config = api.get_guest_config(&guest.node, guest.kind, guest.vmid)?;
        for value in config.values().filter(|value| is_disk_slot(value)) {
            let bytes = snapshot.add_vhdd(&guest.node, value);
            trace!(vmid = guest.vmid, bytes, %value, "virtual disk");
        }
        Ok(())
    }
}

impl Collector for GuestCollector {
    fn collect(&mut self, api: &dyn ClusterApi, snapshot: &mut ClusterSnapshot) -> Result<()> {
        for guest in api.get_resources("vm")? {
            if !guest.has_known_status() {
                debug!(vmid = guest.vmid, node = %guest.node, "skipping guest with unknown status");
                continue;
            }
            if guest.template {
                snapshot.status.vm_templates += 1;
                continue;
            }

            let ClusterSnapshot { status, nodes, .. } = &mut *snapshot;
            let Some(node) = nodes.iter_mut().find(|node| node.name == guest.node) else {
                warn!(vmid = guest.vmid, node = %guest.node, "guest runs on a node outside the cluster status, ignoring it");
                continue;
            };
            Self::count(status, node, &guest);

            if self.extended && guest.kind != GuestKind::Other {
                Self::collect_vhdd(api, snapshot, &guest)?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "guests"
    }
}
