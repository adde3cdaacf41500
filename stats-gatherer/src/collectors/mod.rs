//! # Collectors Module
//!
//! This module contains the data collection passes of a reporting run.
//!
//! ## Architecture
//!
//! - **`Collector` trait**: Defines the interface for all passes
//! - **`TopologyCollector`**: Quorum, node count and the nodes with their online flag
//! - **`CapacityCollector`**: CPU and memory capacity/usage per node and for the cluster
//! - **`OnlineNodeCollector`**: Online node count, CPU usage sum and KSM sharing
//! - **`GuestCollector`**: VM/container counts, allocations and (extended) virtual disk sizes
//! - **`Orchestrator`**: Runs the passes in order and derives the cluster ratios
//!
//! The passes depend on each other through the snapshot: the topology pass
//! creates the nodes every later pass fills in.

pub mod capacity_collector;
pub mod collector;
pub mod guest_collector;
pub mod online_node_collector;
pub mod orchestrator;
#[cfg(test)]
pub(crate) mod testing;
pub mod topology_collector;

// Re-export the main types for easy access
pub use capacity_collector::CapacityCollector;
pub use collector::Collector;
pub use guest_collector::GuestCollector;
pub use online_node_collector::OnlineNodeCollector;
pub use orchestrator::{
    CollectOptions,
    Orchestrator,
};
pub use topology_collector::TopologyCollector;
