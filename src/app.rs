use crate::error::ReportError;
use proxmox_client::{
    ClusterApi,
    ProxmoxClient,
};
use pve_reporter_config::{
    Config,
    OutputMode,
};
use pve_reporter_stats::{
    zabbix::{
        discovery_json,
        item_payload,
        json_document,
        SenderOutput,
        ZabbixSender,
        DISCOVERY_KEY,
    },
    ClusterSnapshot,
    CollectOptions,
    Orchestrator,
};

/// Logs in to the cluster API and runs one report.
pub fn run(config: &Config) -> Result<(), ReportError> {
    debug!(?config, "effective configuration");
    info!(api_host = %config.api_host, target = %config.target, mode = %config.output_mode(), "Starting cluster report");
    let client = ProxmoxClient::connect(&config.api_host, &config.username, &config.password)
        .map_err(ReportError::ApiConnection)?;
    report(&client, config)
}

/// Collects what the output mode needs from `api` and delivers it.
pub fn report(api: &dyn ClusterApi, config: &Config) -> Result<(), ReportError> {
    let mode = config.output_mode();
    let orchestrator = Orchestrator::new(
        api,
        CollectOptions {
            extended: config.extended,
            replication: mode == OutputMode::Json,
        },
    );

    match mode {
        OutputMode::Discovery => send_discovery(config, &orchestrator.discover()?),
        OutputMode::Items => send_items(config, &orchestrator.collect()?),
        OutputMode::Json => {
            println!("{}", json_document(&orchestrator.collect()?));
            Ok(())
        }
    }
}

fn send_discovery(config: &Config, snapshot: &ClusterSnapshot) -> Result<(), ReportError> {
    let discovery = discovery_json(snapshot);
    if config.verbose {
        println!("{discovery}");
    }

    let output = sender(config).send_value(&config.target, DISCOVERY_KEY, &discovery)?;
    if config.verbose {
        print_sender_output(&output);
    }
    Ok(())
}

fn send_items(config: &Config, snapshot: &ClusterSnapshot) -> Result<(), ReportError> {
    if config.verbose {
        println!("{:#}", json_document(snapshot));
    }

    let clock = chrono::Utc::now().timestamp();
    let payload = item_payload(snapshot, &config.target, clock);
    if config.verbose {
        print!("{payload}");
    }

    let output = sender(config).send_items(&payload)?;
    info!(status = %output.status, nodes = snapshot.nodes.len(), "Items handed to zabbix_sender");
    if config.verbose {
        print_sender_output(&output);
    }
    Ok(())
}

fn sender(config: &Config) -> ZabbixSender {
    ZabbixSender::new(&config.sender, &config.sender_config)
}

fn print_sender_output(output: &SenderOutput) {
    print!("{}", output.stdout);
    print!("{}", output.stderr);
}
