//! # Proxmox VE API client
//!
//! A small blocking client for the read-only endpoints the reporter polls:
//! cluster status, node list and status, cluster resources, guest
//! configurations and replication jobs.
//!
//! The statistics collection talks to the cluster through the
//! [`ClusterApi`] trait so it can run against an in-memory cluster in tests.

#[macro_use]
extern crate tracing;

mod client;
mod types;

pub use client::{
    api_base_url,
    ClusterApi,
    ProxmoxClient,
    DEFAULT_API_PORT,
};
pub use types::*;
