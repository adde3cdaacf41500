use crate::types::{
    stringify_config,
    ApiResponse,
    ClusterStatusEntry,
    Guest,
    GuestConfig,
    GuestKind,
    NodeDetail,
    NodeRuntimeStatus,
    ReplicationJob,
    Ticket,
};
use eyre::{
    bail,
    Context as _,
    Result,
};
use reqwest::{
    blocking::Client,
    header::{
        HeaderMap,
        HeaderValue,
        COOKIE,
    },
};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use url::Url;

pub const DEFAULT_API_PORT: u16 = 8006;

/// The read operations the statistics collection needs from a cluster.
pub trait ClusterApi {
    /// `GET /cluster/status`
    fn get_cluster_status(&self) -> Result<Vec<ClusterStatusEntry>>;

    /// `GET /nodes`
    fn get_nodes(&self) -> Result<Vec<NodeDetail>>;

    /// `GET /nodes/{node}/status`
    fn get_node_runtime_status(&self, node: &str) -> Result<NodeRuntimeStatus>;

    /// `GET /cluster/resources?type={resource_type}`
    fn get_resources(&self, resource_type: &str) -> Result<Vec<Guest>>;

    /// `GET /nodes/{node}/{kind}/{vmid}/config`
    fn get_guest_config(&self, node: &str, kind: GuestKind, vmid: u64) -> Result<GuestConfig>;

    /// `GET /nodes/{node}/replication`
    fn get_replication(&self, node: &str) -> Result<Vec<ReplicationJob>>;
}

/// Blocking client for the Proxmox VE JSON API, authenticated with a ticket.
///
/// TLS certificates are not verified: Proxmox hosts serve a self-signed
/// certificate out of the box and the reporter runs next to them.
pub struct ProxmoxClient {
    http: Client,
    base_url: Url,
}

impl ProxmoxClient {
    /// Requests an authentication ticket for `username` and returns a client
    /// that sends it with every request.
    #[instrument(level = "debug", skip(password))]
    pub fn connect(api_host: &str, username: &str, password: &str) -> Result<Self> {
        let base_url = api_base_url(api_host)?;

        let ticket = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?
            .post(base_url.join("access/ticket")?)
            .form(&[("username", username), ("password", password)])
            .send()
            .wrap_err_with(|| format!("Failed to reach Proxmox API at {base_url}"))?
            .error_for_status()
            .wrap_err("Proxmox API rejected the credentials")?
            .json::<ApiResponse<Ticket>>()
            .wrap_err("Failed to decode the authentication ticket")?
            .data
            .ticket;

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("PVEAuthCookie={ticket}")).wrap_err("failed to create cookie header")?,
        );

        let http = Client::builder()
            .danger_accept_invalid_certs(true)
            .default_headers(headers)
            .build()?;

        debug!(%base_url, "Authenticated against Proxmox API");

        Ok(Self { http, base_url })
    }

    #[instrument(level = "debug", skip(self, query))]
    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = self.base_url.join(path)?;
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .wrap_err_with(|| format!("GET {path} failed"))?
            .error_for_status()
            .wrap_err_with(|| format!("GET {path} failed"))?
            .json::<ApiResponse<T>>()
            .wrap_err_with(|| format!("GET {path} returned an unexpected body"))?;
        Ok(response.data)
    }
}

impl ClusterApi for ProxmoxClient {
    fn get_cluster_status(&self) -> Result<Vec<ClusterStatusEntry>> {
        self.get("cluster/status", &[])
    }

    fn get_nodes(&self) -> Result<Vec<NodeDetail>> {
        self.get("nodes", &[])
    }

    fn get_node_runtime_status(&self, node: &str) -> Result<NodeRuntimeStatus> {
        self.get(&format!("nodes/{node}/status"), &[])
    }

    fn get_resources(&self, resource_type: &str) -> Result<Vec<Guest>> {
        self.get("cluster/resources", &[("type", resource_type)])
    }

    fn get_guest_config(&self, node: &str, kind: GuestKind, vmid: u64) -> Result<GuestConfig> {
        if kind == GuestKind::Other {
            bail!("guest {vmid} on {node} is neither a qemu VM nor a container");
        }
        let raw: BTreeMap<String, serde_json::Value> =
            self.get(&format!("nodes/{node}/{}/{vmid}/config", kind.as_str()), &[])?;
        Ok(stringify_config(raw))
    }

    fn get_replication(&self, node: &str) -> Result<Vec<ReplicationJob>> {
        self.get(&format!("nodes/{node}/replication"), &[])
    }
}

/// `https://<host>:8006/api2/json/`, or the port given as `host:port`.
pub fn api_base_url(api_host: &str) -> Result<Url> {
    let api_host = api_host.trim();
    if api_host.is_empty() {
        bail!("no Proxmox API host given");
    }

    let has_port = !api_host.ends_with(']')
        && api_host
            .rsplit_once(':')
            .is_some_and(|(_, port)| port.parse::<u16>().is_ok());

    let mut url = Url::parse(&format!("https://{api_host}/api2/json/"))
        .wrap_err_with(|| format!("Invalid Proxmox API host '{api_host}'"))?;
    if !has_port && url.set_port(Some(DEFAULT_API_PORT)).is_err() {
        bail!("Invalid Proxmox API host '{api_host}'");
    }
    Ok(url)
}
