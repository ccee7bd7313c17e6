//! Erase Supervisor Service
//!
//! ## Run sequence
//!
//! ```text
//! resolve executor ──✗──→ Finished(failed)            (nothing spawned)
//!       │
//!       ▼
//!   Started ──spawn──✗──→ ProcessError, Finished(failed)
//!       │
//!       ▼
//!   Running{pid} ──select!──┬── exit ──→ drain output ──┬──→ Finished(classified)
//!                           │                            └── deadline ──┐
//!                           └── deadline ───────────────────────────────┴→ kill group, Finished(timed_out)
//! ```
//!
//! On unix the executor leads its own process group, so a kill reaches the
//! `dd`/`shred` workers it forks. One deadline covers both the wait and the
//! output drain.

use shared_types::{ErrorKind, OutcomeStatus, Platform, WipeOutcome, WipeRequest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, info, warn};

use crate::domain::{
    classify, scrub_secret, ExecutorRegistry, ExitInfo, SupervisorConfig, SupervisorEvent,
};
use crate::ports::EraseSupervisorApi;

/// Bytes kept per output pipe. The rest is drained and discarded.
const MAX_CAPTURE_BYTES: usize = 1 << 20;

/// Event buffer between the run task and the consumer.
const EVENT_BUFFER: usize = 16;

pub struct EraseSupervisor {
    registry: ExecutorRegistry,
    platform: Platform,
    timeout: Duration,
    spawned: AtomicU64,
}

impl EraseSupervisor {
    pub fn new(config: &SupervisorConfig) -> Self {
        Self::for_platform(config, Platform::current())
    }

    /// Supervisor that selects executors as if running on `platform`.
    pub fn for_platform(config: &SupervisorConfig, platform: Platform) -> Self {
        Self {
            registry: ExecutorRegistry::from_config(config),
            platform,
            timeout: config.timeout(),
            spawned: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn is_supported(&self) -> bool {
        self.registry.is_supported(&self.platform)
    }

    /// Run one request to completion, reporting progress on `events`.
    ///
    /// The returned outcome is also sent as the final event.
    pub async fn run(
        &self,
        request: &WipeRequest,
        events: &mpsc::Sender<SupervisorEvent>,
    ) -> WipeOutcome {
        let outcome = self.supervise(request, events).await;
        let _ = events.send(SupervisorEvent::Finished(outcome.clone())).await;
        outcome
    }

    async fn supervise(
        &self,
        request: &WipeRequest,
        events: &mpsc::Sender<SupervisorEvent>,
    ) -> WipeOutcome {
        let executor = match self.registry.resolve(&self.platform) {
            Ok(executor) => executor,
            Err(e) => {
                warn!(request_id = %request.id, platform = %self.platform, error = %e, "No usable executor");
                return WipeOutcome::failed(request.id, e.kind(), format!("Error: {e}"));
            }
        };

        let _ = events
            .send(SupervisorEvent::Started {
                message: format!("Starting wipe on {}...", self.platform),
            })
            .await;

        let mut command = Command::new(&executor.program);
        command
            .args(executor.args(request))
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                let message = format!("Error: failed to start executor: {e}");
                error!(request_id = %request.id, program = %executor.program, error = %e, "Executor spawn failed");
                let _ = events
                    .send(SupervisorEvent::ProcessError {
                        message: message.clone(),
                    })
                    .await;
                return WipeOutcome::failed(request.id, ErrorKind::ProcessError, message);
            }
        };

        self.spawned.fetch_add(1, Ordering::SeqCst);
        let pid = child.id();
        info!(request_id = %request.id, device = %request.device_id, pid = ?pid, "Executor running");
        let _ = events.send(SupervisorEvent::Running { pid }).await;

        let deadline = Instant::now() + self.timeout;
        let mut stdout = tokio::spawn(capture(child.stdout.take()));
        let mut stderr = tokio::spawn(capture(child.stderr.take()));

        let waited = tokio::select! {
            status = child.wait() => Some(status),
            _ = tokio::time::sleep_until(deadline) => None,
        };

        let status = match waited {
            Some(Ok(status)) => status,
            Some(Err(e)) => {
                terminate(&mut child, pid).await;
                stdout.abort();
                stderr.abort();
                let message = format!("Error: failed to wait for executor: {e}");
                error!(request_id = %request.id, error = %e, "Executor wait failed");
                let _ = events
                    .send(SupervisorEvent::ProcessError {
                        message: message.clone(),
                    })
                    .await;
                return WipeOutcome::failed(request.id, ErrorKind::ProcessError, message);
            }
            None => {
                terminate(&mut child, pid).await;
                stdout.abort();
                stderr.abort();
                warn!(
                    request_id = %request.id,
                    timeout_secs = self.timeout.as_secs(),
                    "Executor timed out"
                );
                return self.timed_out(request);
            }
        };

        // Forked workers inherit the pipes and can hold them open past the exit
        let drained = tokio::time::timeout_at(deadline, async {
            ((&mut stdout).await, (&mut stderr).await)
        })
        .await;
        let (stdout, stderr) = match drained {
            Ok((stdout, stderr)) => (stdout.unwrap_or_default(), stderr.unwrap_or_default()),
            Err(_) => {
                kill_group(pid);
                stdout.abort();
                stderr.abort();
                warn!(
                    request_id = %request.id,
                    timeout_secs = self.timeout.as_secs(),
                    "Executor exited but its workers outlived the timeout"
                );
                return self.timed_out(request);
            }
        };

        let secret = request.credentials.secret.expose();
        let stdout = scrub_secret(&stdout, secret);
        let stderr = scrub_secret(&stderr, secret);

        let outcome = classify(request.id, ExitInfo::from(status), &stdout, &stderr);
        debug!(
            request_id = %request.id,
            status = %outcome.status,
            exit_code = ?outcome.exit_code,
            "Executor finished"
        );
        outcome
    }

    fn timed_out(&self, request: &WipeRequest) -> WipeOutcome {
        WipeOutcome::new(
            request.id,
            OutcomeStatus::TimedOut,
            format!(
                "Error: wipe timed out after {}s",
                self.timeout.as_secs_f64()
            ),
        )
        .with_error_kind(ErrorKind::Timeout)
    }
}

/// Kill the executor and everything in its process group, then reap it.
async fn terminate(child: &mut Child, pid: Option<u32>) {
    kill_group(pid);
    // kill() also reaps the child
    if let Err(e) = child.kill().await {
        debug!(pid = ?pid, error = %e, "Executor already gone");
    }
}

#[cfg(unix)]
fn kill_group(pid: Option<u32>) {
    let Some(pgid) = pid.and_then(|pid| libc::pid_t::try_from(pid).ok()) else {
        return;
    };
    // SAFETY: killpg takes plain integers and touches no memory we own.
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } != 0 {
        let e = std::io::Error::last_os_error();
        debug!(pgid, error = %e, "Executor process group already gone");
    }
}

// Only the direct child is killed here.
#[cfg(not(unix))]
fn kill_group(_pid: Option<u32>) {}

impl EraseSupervisorApi for EraseSupervisor {
    fn execute(self: Arc<Self>, request: WipeRequest) -> ReceiverStream<SupervisorEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        tokio::spawn(async move {
            self.run(&request, &tx).await;
        });
        ReceiverStream::new(rx)
    }

    fn processes_spawned(&self) -> u64 {
        self.spawned.load(Ordering::SeqCst)
    }
}

/// Read a pipe to EOF, keeping at most [`MAX_CAPTURE_BYTES`].
async fn capture<R: AsyncRead + Unpin>(pipe: Option<R>) -> String {
    let Some(mut pipe) = pipe else {
        return String::new();
    };

    let mut kept = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        match pipe.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                let room = MAX_CAPTURE_BYTES.saturating_sub(kept.len());
                kept.extend_from_slice(&chunk[..n.min(room)]);
            }
        }
    }
    String::from_utf8_lossy(&kept).into_owned()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use shared_types::{Credentials, WipeMethod};
    use std::path::Path;
    use tempfile::TempDir;
    use tokio_stream::StreamExt;

    fn request(secret: &str) -> WipeRequest {
        WipeRequest::new(
            "/dev/sdz",
            WipeMethod::Overwrite,
            "session-1",
            Credentials::new("admin", secret),
        )
    }

    fn scripts(body: &str) -> TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("wipe_linux.sh"), body).expect("write script");
        dir
    }

    fn supervisor(dir: &Path) -> Arc<EraseSupervisor> {
        let config = SupervisorConfig {
            scripts_dir: dir.to_path_buf(),
            ..SupervisorConfig::default()
        };
        Arc::new(EraseSupervisor::for_platform(&config, Platform::Linux))
    }

    async fn collect(
        supervisor: &Arc<EraseSupervisor>,
        request: WipeRequest,
    ) -> Vec<SupervisorEvent> {
        Arc::clone(supervisor).execute(request).collect().await
    }

    fn outcome(events: &[SupervisorEvent]) -> &WipeOutcome {
        match events.last() {
            Some(SupervisorEvent::Finished(outcome)) => outcome,
            other => panic!("expected terminal event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_sequence() {
        let dir = scripts("echo erased \"$1\"\n");
        let sup = supervisor(dir.path());
        let events = collect(&sup, request("password123")).await;

        assert!(matches!(events[0], SupervisorEvent::Started { .. }));
        assert!(matches!(events[1], SupervisorEvent::Running { pid: Some(_) }));
        assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);

        let outcome = outcome(&events);
        assert_eq!(outcome.status, OutcomeStatus::Succeeded);
        assert_eq!(outcome.message, "Wipe completed: erased /dev/sdz");
        assert_eq!(sup.processes_spawned(), 1);
    }

    #[tokio::test]
    async fn test_arguments_are_discrete_and_secret_scrubbed() {
        let dir = scripts("printf '%s|' \"$@\"\n");
        let sup = supervisor(dir.path());
        let secret = "p@ss w;rd $(touch /tmp/x)";
        let events = collect(&sup, request(secret)).await;

        let outcome = outcome(&events);
        assert_eq!(outcome.status, OutcomeStatus::Succeeded);
        assert_eq!(outcome.message, "Wipe completed: /dev/sdz|overwrite|admin|***|");
        assert!(!outcome.message.contains("p@ss"));
    }

    #[tokio::test]
    async fn test_stderr_on_zero_exit_is_warning() {
        let dir = scripts("echo done; echo 'smart data unavailable' >&2\n");
        let sup = supervisor(dir.path());
        let events = collect(&sup, request("password123")).await;
        assert_eq!(outcome(&events).status, OutcomeStatus::Warning);
    }

    #[tokio::test]
    async fn test_nonzero_exit_fails() {
        let dir = scripts("echo 'cannot open device' >&2; exit 2\n");
        let sup = supervisor(dir.path());
        let events = collect(&sup, request("password123")).await;

        let outcome = outcome(&events);
        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert_eq!(outcome.exit_code, Some(2));
        assert_eq!(outcome.error_kind, Some(ErrorKind::ExecutionFailed));
    }

    #[cfg(target_os = "linux")]
    fn short_timeout(dir: &Path) -> Arc<EraseSupervisor> {
        let config = SupervisorConfig {
            scripts_dir: dir.to_path_buf(),
            ..SupervisorConfig::default()
        };
        Arc::new(
            EraseSupervisor::for_platform(&config, Platform::Linux)
                .with_timeout(Duration::from_millis(500)),
        )
    }

    /// Pid the script wrote to `worker.pid` next to itself.
    #[cfg(target_os = "linux")]
    fn worker_pid(dir: &Path) -> u32 {
        std::fs::read_to_string(dir.join("worker.pid"))
            .expect("worker pid file")
            .trim()
            .parse()
            .expect("numeric pid")
    }

    /// Running means present in /proc and not a zombie waiting for its reaper.
    #[cfg(target_os = "linux")]
    fn is_running(pid: u32) -> bool {
        match std::fs::read_to_string(format!("/proc/{pid}/stat")) {
            Ok(stat) => stat
                .rsplit_once(')')
                .and_then(|(_, rest)| rest.trim_start().chars().next())
                .is_some_and(|state| state != 'Z'),
            Err(_) => false,
        }
    }

    #[cfg(target_os = "linux")]
    async fn wait_gone(pid: u32) -> bool {
        for _ in 0..50 {
            if !is_running(pid) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        false
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_timeout_kills_forked_workers() {
        let dir = scripts("sleep 30 &\necho $! > \"$(dirname \"$0\")/worker.pid\"\nwait\n");
        let sup = short_timeout(dir.path());

        let events = collect(&sup, request("password123")).await;
        let pid = events
            .iter()
            .find_map(|e| match e {
                SupervisorEvent::Running { pid } => *pid,
                _ => None,
            })
            .expect("pid");

        let outcome = outcome(&events);
        assert_eq!(outcome.status, OutcomeStatus::TimedOut);
        assert_eq!(outcome.error_kind, Some(ErrorKind::Timeout));
        assert!(wait_gone(pid).await, "executor still running");
        assert!(wait_gone(worker_pid(dir.path())).await, "worker still running");
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_worker_holding_output_is_bounded_by_timeout() {
        let dir = scripts(
            "sleep 30 &\necho $! > \"$(dirname \"$0\")/worker.pid\"\necho started\nexit 0\n",
        );
        let sup = short_timeout(dir.path());

        let started = std::time::Instant::now();
        let events = collect(&sup, request("password123")).await;
        assert!(started.elapsed() < Duration::from_secs(5));

        let outcome = outcome(&events);
        assert_eq!(outcome.status, OutcomeStatus::TimedOut);
        assert_eq!(outcome.error_kind, Some(ErrorKind::Timeout));
        assert!(wait_gone(worker_pid(dir.path())).await, "worker still running");
    }

    #[tokio::test]
    async fn test_unsupported_platform_spawns_nothing() {
        let dir = scripts("echo hi\n");
        let config = SupervisorConfig {
            scripts_dir: dir.path().to_path_buf(),
            ..SupervisorConfig::default()
        };
        let sup = Arc::new(EraseSupervisor::for_platform(&config, Platform::Macos));
        let events = collect(&sup, request("password123")).await;

        assert_eq!(events.len(), 1);
        let outcome = outcome(&events);
        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert_eq!(outcome.error_kind, Some(ErrorKind::UnsupportedPlatform));
        assert_eq!(sup.processes_spawned(), 0);
    }

    #[tokio::test]
    async fn test_missing_script_is_executor_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let sup = supervisor(dir.path());
        let events = collect(&sup, request("password123")).await;

        assert_eq!(events.len(), 1);
        assert_eq!(
            outcome(&events).error_kind,
            Some(ErrorKind::ExecutorNotFound)
        );
    }

    #[tokio::test]
    async fn test_spawn_failure_is_process_error() {
        let mut config = SupervisorConfig::default();
        config.executors.insert(
            "linux".into(),
            crate::domain::ExecutorSpec {
                program: "trustwipe-no-such-program".into(),
                script: None,
                style: crate::domain::ArgStyle::Positional,
            },
        );
        let sup = Arc::new(EraseSupervisor::for_platform(&config, Platform::Linux));
        let events = collect(&sup, request("password123")).await;

        assert!(events
            .iter()
            .any(|e| matches!(e, SupervisorEvent::ProcessError { .. })));
        assert_eq!(outcome(&events).error_kind, Some(ErrorKind::ProcessError));
        assert_eq!(sup.processes_spawned(), 0);
    }
}
