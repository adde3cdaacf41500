use pve_reporter_stats::zabbix::SenderError;
use std::process::ExitCode;

/// Failures of a reporting run. Everything but `Other` is an expected
/// condition: a one line diagnostic and a failing exit code.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("Proxmox API call failed: {0:#}")]
    ApiConnection(eyre::Report),
    #[error(transparent)]
    Sender(#[from] SenderError),
    #[error(transparent)]
    Other(#[from] eyre::Report),
}

/// Maps the outcome of [`crate::run`] to the process result.
pub fn exit_code(result: Result<(), ReportError>) -> color_eyre::Result<ExitCode> {
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(ReportError::Other(report)) => Err(report),
        Err(err) => {
            debug!(error = ?err, "report failed");
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::eyre;

    #[test]
    fn expected_failures_exit_with_failure() {
        assert_eq!(exit_code(Ok(())).unwrap(), ExitCode::SUCCESS);
        assert_eq!(
            exit_code(Err(ReportError::ApiConnection(eyre!("401 authentication failure")))).unwrap(),
            ExitCode::FAILURE
        );
        let spawn = SenderError::Spawn(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(exit_code(Err(spawn.into())).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn unexpected_failures_propagate() {
        let err = exit_code(Err(eyre!("nodes pass failed").into())).unwrap_err();
        assert_eq!(err.to_string(), "nodes pass failed");
    }

    #[test]
    fn api_failures_include_the_cause() {
        let err = ReportError::ApiConnection(eyre!("connection refused").wrap_err("login to localhost failed"));
        assert_eq!(err.to_string(), "Proxmox API call failed: login to localhost failed: connection refused");
    }
}
