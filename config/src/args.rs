use clap::Parser;
use std::path::PathBuf;

/// Report Proxmox cluster statistics to zabbix
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Proxmox API hostname, optionally with `:port`.
    #[arg(short = 'a', long = "apihost", value_name = "HOST")]
    pub api_host: Option<String>,

    /// Full path to the zabbix_agentd configuration file.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub sender_config: Option<PathBuf>,

    /// Full path to a proxmox_cluster.yml file. When given, its values replace
    /// the other command-line values except for the mode flags.
    #[arg(short = 'C', long = "config-proxmox-cluster", value_name = "FILE")]
    pub cluster_config: Option<PathBuf>,

    /// Send low level discovery data instead of items.
    #[arg(short = 'd', long, action)]
    pub discovery: bool,

    /// Get the guest configurations to report the vHDD allocation.
    #[arg(short = 'e', long, action)]
    pub extended: bool,

    /// Print the collected data as a JSON document instead of sending items.
    #[arg(short = 'j', long, action)]
    pub json: bool,

    /// Proxmox API password.
    #[arg(short = 'p', long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Zabbix target hostname. Defaults to the local hostname.
    #[arg(short = 't', long, value_name = "HOST")]
    pub target: Option<String>,

    /// Proxmox API username.
    #[arg(short = 'u', long, value_name = "USER")]
    pub username: Option<String>,

    /// Output verbose discovery and item data.
    #[arg(short = 'v', long, action)]
    pub verbose: bool,

    /// Full path to the zabbix_sender binary.
    #[arg(short = 'z', long = "zsend", value_name = "FILE")]
    pub sender: Option<PathBuf>,
}

impl Args {
    /// The mode flags given on the command line. These are honored even when a
    /// cluster config file provides the rest of the settings.
    pub(crate) fn mode_flags(&self) -> ModeFlags {
        ModeFlags {
            discovery: self.discovery,
            extended: self.extended,
            json: self.json,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ModeFlags {
    pub(crate) discovery: bool,
    pub(crate) extended: bool,
    pub(crate) json: bool,
    pub(crate) verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_flags() {
        let args = Args::parse_from([
            "pve-zabbix-reporter",
            "-a",
            "pve1.example.com",
            "-u",
            "monitor@pve",
            "-p",
            "secret",
            "-t",
            "cluster01",
            "-z",
            "/opt/zabbix/bin/zabbix_sender",
            "-c",
            "/etc/zabbix/agent.conf",
            "-d",
            "-e",
            "-v",
        ]);

        assert_eq!(args.api_host.as_deref(), Some("pve1.example.com"));
        assert_eq!(args.username.as_deref(), Some("monitor@pve"));
        assert_eq!(args.password.as_deref(), Some("secret"));
        assert_eq!(args.target.as_deref(), Some("cluster01"));
        assert_eq!(args.sender, Some(PathBuf::from("/opt/zabbix/bin/zabbix_sender")));
        assert_eq!(args.sender_config, Some(PathBuf::from("/etc/zabbix/agent.conf")));
        assert!(args.discovery && args.extended && args.verbose);
        assert!(!args.json);
        assert!(args.cluster_config.is_none());
    }

    #[test]
    fn parses_long_flags() {
        let args = Args::parse_from([
            "pve-zabbix-reporter",
            "--config-proxmox-cluster",
            "/etc/zabbix/proxmox_cluster.yml",
            "--json",
        ]);

        assert_eq!(
            args.cluster_config,
            Some(PathBuf::from("/etc/zabbix/proxmox_cluster.yml"))
        );
        assert_eq!(
            args.mode_flags(),
            ModeFlags {
                json: true,
                ..ModeFlags::default()
            }
        );
    }
}
