mod args;
mod file_config;

pub use args::Args;
pub use file_config::FileConfig;

use color_eyre::Result;
use std::{
    fmt,
    path::PathBuf,
};
use strum::Display;

pub const DEFAULT_API_HOST: &str = "localhost";
pub const DEFAULT_USERNAME: &str = "zabbix@pve";
pub const DEFAULT_SENDER: &str = "/usr/bin/zabbix_sender";
pub const DEFAULT_SENDER_CONFIG: &str = "/etc/zabbix/zabbix_agentd.conf";

/// Value of `target` in a cluster config file that stands for the local hostname.
pub const HOSTNAME_SENTINEL: &str = "socket.gethostname()";

/// What a run produces once the topology is known.
#[derive(Debug, Clone, Copy, Display, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum OutputMode {
    /// Item values sent through `zabbix_sender -T -i -`.
    Items,
    /// Low level discovery data for the cluster nodes.
    Discovery,
    /// The whole snapshot printed as JSON.
    Json,
}

/// The effective settings of one run. Built once from the command line and
/// the optional cluster config file, never changed afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_host: String,
    pub username: String,
    pub password: String,
    pub target: String,
    pub sender: PathBuf,
    pub sender_config: PathBuf,
    pub discovery: bool,
    pub extended: bool,
    pub json: bool,
    pub verbose: bool,
}

impl Config {
    /// Resolves the configuration. With `-C` the file provides every value and
    /// only the mode flags (`-d`, `-e`, `-j`, `-v`) of the command line still
    /// apply on top of it.
    pub fn new(args: Args) -> Result<Self> {
        let flags = args.mode_flags();
        let base = match &args.cluster_config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::from(args),
        };

        Ok(Self::from_file_config(base, flags))
    }

    fn from_file_config(file: FileConfig, flags: args::ModeFlags) -> Self {
        Self {
            api_host: file.api_host.unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            username: file.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: file.password.unwrap_or_default(),
            target: resolve_target(file.target),
            sender: file.sender.unwrap_or_else(|| PathBuf::from(DEFAULT_SENDER)),
            sender_config: file
                .sender_config
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SENDER_CONFIG)),
            discovery: file.discovery || flags.discovery,
            extended: file.extended || flags.extended,
            json: file.json || flags.json,
            verbose: file.verbose || flags.verbose,
        }
    }

    /// Discovery wins over JSON output, both win over sending items.
    pub fn output_mode(&self) -> OutputMode {
        if self.discovery {
            OutputMode::Discovery
        } else if self.json {
            OutputMode::Json
        } else {
            OutputMode::Items
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_host", &self.api_host)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("target", &self.target)
            .field("sender", &self.sender)
            .field("sender_config", &self.sender_config)
            .field("discovery", &self.discovery)
            .field("extended", &self.extended)
            .field("json", &self.json)
            .field("verbose", &self.verbose)
            .finish()
    }
}

fn resolve_target(target: Option<String>) -> String {
    match target {
        Some(target) if target != HOSTNAME_SENTINEL => target,
        _ => local_hostname(),
    }
}

pub fn local_hostname() -> String {
    gethostname::gethostname().to_string_lossy().to_string()
}
