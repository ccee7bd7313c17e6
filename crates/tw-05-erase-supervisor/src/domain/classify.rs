//! Exit status → outcome.

use shared_types::{ErrorKind, OutcomeStatus, WipeOutcome};
use uuid::Uuid;

/// Marker substituted for the secret in captured output.
pub const SCRUB_MARKER: &str = "***";

/// How the process ended.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExitInfo {
    pub code: Option<i32>,
    pub signal: Option<i32>,
}

impl From<std::process::ExitStatus> for ExitInfo {
    fn from(status: std::process::ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self {
            code: status.code(),
            signal,
        }
    }
}

/// Replace every occurrence of `secret` in `text`.
pub fn scrub_secret(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, SCRUB_MARKER)
}

/// Classify a finished run. `stdout` and `stderr` must already be scrubbed.
///
/// | exit | stderr | status |
/// |------|--------|--------|
/// | 0 | empty | `succeeded` |
/// | 0 | non-empty | `warning` |
/// | non-zero or signal | any | `failed` |
pub fn classify(request_id: Uuid, exit: ExitInfo, stdout: &str, stderr: &str) -> WipeOutcome {
    let stdout = stdout.trim();
    let stderr = stderr.trim();

    let outcome = match (exit.code, exit.signal) {
        (Some(0), None) if stderr.is_empty() => WipeOutcome::new(
            request_id,
            OutcomeStatus::Succeeded,
            format!("Wipe completed: {stdout}"),
        ),
        (Some(0), None) => WipeOutcome::new(
            request_id,
            OutcomeStatus::Warning,
            format!("Stderr: {stderr}"),
        )
        .with_error_kind(ErrorKind::ExecutionWarning),
        (_, Some(signal)) => WipeOutcome::failed(
            request_id,
            ErrorKind::ExecutionFailed,
            format!("Error: executor terminated by signal {signal}"),
        ),
        (code, None) => {
            let code = code.map_or_else(|| "unknown".to_string(), |c| c.to_string());
            let detail = if stderr.is_empty() { stdout } else { stderr };
            WipeOutcome::failed(
                request_id,
                ErrorKind::ExecutionFailed,
                format!("Error: executor exited with code {code}: {detail}"),
            )
        }
    };

    outcome.with_exit(exit.code, exit.signal)
}
