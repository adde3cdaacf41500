use crate::metrics::ClusterSnapshot;
use eyre::Result;
use proxmox_client::ClusterApi;

/// One enumeration pass over the cluster.
pub trait Collector {
    /// Query the cluster and fold the results into the snapshot
    fn collect(&mut self, api: &dyn ClusterApi, snapshot: &mut ClusterSnapshot) -> Result<()>;

    /// Get the name of this collector
    fn name(&self) -> &'static str;
}
