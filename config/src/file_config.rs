use crate::args::Args;
use color_eyre::Result;
use eyre::Context as _;
use serde::{
    Deserialize,
    Serialize,
};
use std::path::{
    Path,
    PathBuf,
};

/// The settings as written in a `proxmox_cluster.yml` file. Keys are named
/// after the long command-line flags; absent keys fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default, rename = "apihost")]
    pub api_host: Option<String>,
    #[serde(default, rename = "config")]
    pub sender_config: Option<PathBuf>,
    #[serde(default)]
    pub discovery: bool,
    #[serde(default)]
    pub extended: bool,
    #[serde(default)]
    pub json: bool,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default, rename = "zsend")]
    pub sender: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read cluster config {}", path.display()))?;
        Self::parse(&content).wrap_err_with(|| format!("Failed to parse cluster config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty document is a valid file that sets nothing.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str::<Self>(content)?)
    }
}

impl From<Args> for FileConfig {
    fn from(args: Args) -> Self {
        Self {
            api_host: args.api_host,
            sender_config: args.sender_config,
            discovery: args.discovery,
            extended: args.extended,
            json: args.json,
            password: args.password,
            target: args.target,
            username: args.username,
            verbose: args.verbose,
            sender: args.sender,
        }
    }
}
