use std::{
    ffi::OsString,
    io::{
        ErrorKind,
        Write as _,
    },
    path::{
        Path,
        PathBuf,
    },
    process::{
        Command,
        ExitStatus,
        Output,
        Stdio,
    },
};

#[derive(thiserror::Error, Debug)]
pub enum SenderError {
    #[error("Unable to open zabbix_sender: {0}")]
    NotFound(which::Error),
    #[error("Unable to open zabbix_sender: {0}")]
    Spawn(std::io::Error),
    #[error("Error while sending values: {0}")]
    Delivery(std::io::Error),
    #[error("zabbix_sender failed with {status}: {output}")]
    Failed { status: ExitStatus, output: String },
}

/// What `zabbix_sender` printed.
#[derive(Debug, Clone)]
pub struct SenderOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for SenderOutput {
    fn from(output: Output) -> Self {
        Self {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Runs the external `zabbix_sender` binary with the agent configuration.
#[derive(Debug, Clone)]
pub struct ZabbixSender {
    binary: PathBuf,
    agent_config: PathBuf,
}

impl ZabbixSender {
    pub fn new(binary: impl Into<PathBuf>, agent_config: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            agent_config: agent_config.into(),
        }
    }

    /// `zabbix_sender -c<config> -s<host> -k<key> -o<value>`
    ///
    /// A non-zero exit status is an error.
    pub fn send_value(&self, host: &str, key: &str, value: &str) -> Result<SenderOutput, SenderError> {
        let output: SenderOutput = self
            .command()?
            .arg(prefixed("-s", host))
            .arg(prefixed("-k", key))
            .arg(prefixed("-o", value))
            .stdin(Stdio::null())
            .output()
            .map_err(SenderError::Spawn)?
            .into();

        if !output.status.success() {
            return Err(SenderError::Failed {
                status: output.status,
                output: format!("{}{}", output.stdout, output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }

    /// `zabbix_sender -c<config> -T -i -` with `payload` on standard input.
    ///
    /// The exit status is only logged: zabbix_sender reports partially
    /// processed batches with a non-zero status, the values that were
    /// accepted are stored nonetheless. A sender that exits before reading
    /// all of its input is reported the same way, with its own output.
    pub fn send_items(&self, payload: &str) -> Result<SenderOutput, SenderError> {
        let mut child = self
            .command()?
            .args(["-T", "-i", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(SenderError::Spawn)?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(payload.as_bytes()) {
                Err(err) if err.kind() == ErrorKind::BrokenPipe => {
                    debug!("zabbix_sender closed its input early");
                }
                result => result.map_err(SenderError::Delivery)?,
            }
        }

        let output: SenderOutput = child.wait_with_output().map_err(SenderError::Delivery)?.into();
        if !output.status.success() {
            warn!(
                status = %output.status,
                stdout = %output.stdout.trim(),
                stderr = %output.stderr.trim(),
                "zabbix_sender did not process every item"
            );
        }
        Ok(output)
    }

    fn command(&self) -> Result<Command, SenderError> {
        let binary = resolve_binary(&self.binary)?;
        debug!(binary = %binary.display(), config = %self.agent_config.display(), "running zabbix_sender");
        let mut command = Command::new(binary);
        command.arg(prefixed("-c", &self.agent_config));
        Ok(command)
    }
}

/// A bare program name is looked up on `PATH`, anything else is used as is.
fn resolve_binary(binary: &Path) -> Result<PathBuf, SenderError> {
    if binary.components().count() == 1 && !binary.has_root() {
        which::which(binary).map_err(SenderError::NotFound)
    } else {
        Ok(binary.to_path_buf())
    }
}

fn prefixed(flag: &str, value: impl AsRef<std::ffi::OsStr>) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(value);
    arg
}
