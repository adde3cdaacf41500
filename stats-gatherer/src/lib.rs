//! # Proxmox cluster statistics
//!
//! Collects utilization and inventory figures of a Proxmox VE cluster and
//! hands them to Zabbix.
//!
//! ## Architecture
//!
//! - **`metrics`**: The cluster snapshot, per-node figures and the disk size parser
//! - **`collectors`**: The enumeration passes over the cluster API
//!   - **`TopologyCollector`**: Quorum and nodes from the cluster status
//!   - **`CapacityCollector`**: CPU and memory per node
//!   - **`OnlineNodeCollector`**: Online nodes and KSM sharing
//!   - **`GuestCollector`**: VMs, containers, templates and virtual disks
//!   - **`Orchestrator`**: Runs the passes in order and derives the cluster ratios
//! - **`zabbix`**: Discovery and item payloads and the `zabbix_sender` invocation
//!
//! ## Item keys
//!
//! ```text
//! <host> proxmox.cluster.<key> <clock> <value>
//! <host> proxmox.node.<key>.[<node>] <clock> <value>
//! ```

#[macro_use]
extern crate tracing;

pub mod collectors;
pub mod metrics;
pub mod zabbix;

pub use collectors::*;
pub use metrics::*;
