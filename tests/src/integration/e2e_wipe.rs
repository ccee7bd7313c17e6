//! # End-to-End Wipe
//!
//! One request through validator, limiter, gate and a real executor
//! process, checked against the status stream and the audit file.

use std::sync::Arc;
use std::time::Duration;

use shared_types::{ErrorKind, OutcomeStatus, WipeState};
use tw_04_confirmation_gate::FixedSurface;
use tw_05_erase_supervisor::EraseSupervisorApi;
use tw_07_orchestrator::{WipeEngineApi, WipeSubmission};

use super::fixtures::{drain, rig, states, SECRET, TARGET};

fn submission() -> WipeSubmission {
    WipeSubmission::new(TARGET, "overwrite", "admin", SECRET).with_requester("e2e")
}

#[tokio::test]
async fn test_confirmed_overwrite_succeeds_with_six_audit_entries() {
    let rig = rig(
        "echo \"erased $1 with $2\"\n",
        Arc::new(FixedSurface::confirming()),
        |_| {},
    );

    let events = drain(Arc::clone(&rig.engine).start_wipe(submission())).await;

    assert_eq!(
        states(&events),
        vec![
            WipeState::Received,
            WipeState::Validated,
            WipeState::RateLimitChecked,
            WipeState::ConfirmationPending,
            WipeState::Confirmed,
            WipeState::Executing,
            WipeState::Succeeded,
        ]
    );

    let outcome = events
        .last()
        .and_then(|e| e.outcome())
        .expect("terminal event last");
    assert_eq!(outcome.status, OutcomeStatus::Succeeded);
    assert_eq!(outcome.message, "Wipe completed: erased /dev/sdz with overwrite");
    assert_eq!(outcome.exit_code, Some(0));
    assert_eq!(rig.supervisor.processes_spawned(), 1);

    let lines = rig.audit_lines();
    assert_eq!(lines.len(), 6);
    for line in &lines {
        assert!(!line.contains(SECRET), "secret leaked: {line}");
        assert!(line.contains("| Data: "));
        assert!(line.contains(TARGET));
    }
    assert!(lines[0].contains("[INFO] Request validated"));
    assert!(lines[5].contains("[INFO] Wipe completed"));
}

#[tokio::test]
async fn test_declined_request_spawns_nothing() {
    let surface = Arc::new(FixedSurface::declining());
    let rig = rig("echo should-not-run\n", surface.clone(), |_| {});

    let events = drain(Arc::clone(&rig.engine).start_wipe(submission())).await;

    let outcome = events.last().and_then(|e| e.outcome()).expect("outcome");
    assert_eq!(outcome.status, OutcomeStatus::Cancelled);
    assert_eq!(rig.supervisor.processes_spawned(), 0);
    assert_eq!(surface.prompts(), 1);

    let lines = rig.audit_lines();
    assert_eq!(lines.len(), 4);
    assert!(lines[3].contains("[WARN] Wipe cancelled by operator"));
}

#[tokio::test]
async fn test_stderr_with_clean_exit_is_warning_and_scrubbed() {
    let rig = rig(
        "echo done; echo \"verify skipped for $4\" >&2\n",
        Arc::new(FixedSurface::confirming()),
        |_| {},
    );

    let events = drain(Arc::clone(&rig.engine).start_wipe(submission())).await;

    let outcome = events.last().and_then(|e| e.outcome()).expect("outcome");
    assert_eq!(outcome.status, OutcomeStatus::Warning);
    assert_eq!(outcome.error_kind, Some(ErrorKind::ExecutionWarning));
    assert!(!outcome.message.contains(SECRET));
    assert_eq!(states(&events).last(), Some(&WipeState::Warning));
    assert!(rig.audit_lines().iter().all(|l| !l.contains(SECRET)));
}

#[tokio::test]
async fn test_nonzero_exit_fails() {
    let rig = rig(
        "echo 'device vanished' >&2; exit 5\n",
        Arc::new(FixedSurface::confirming()),
        |_| {},
    );

    let events = drain(Arc::clone(&rig.engine).start_wipe(submission())).await;

    let outcome = events.last().and_then(|e| e.outcome()).expect("outcome");
    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.exit_code, Some(5));
    let lines = rig.audit_lines();
    assert!(lines.last().expect("entry").contains("[ERROR]"));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_timeout_reports_timed_out() {
    let rig = rig(
        "exec sleep 30\n",
        Arc::new(FixedSurface::confirming()),
        |config| config.supervisor.timeout_secs = 1,
    );

    let started = std::time::Instant::now();
    let events = drain(Arc::clone(&rig.engine).start_wipe(submission())).await;

    let outcome = events.last().and_then(|e| e.outcome()).expect("outcome");
    assert_eq!(outcome.status, OutcomeStatus::TimedOut);
    assert_eq!(outcome.error_kind, Some(ErrorKind::Timeout));
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(states(&events).last(), Some(&WipeState::TimedOut));
}

#[tokio::test]
async fn test_missing_executor_fails_without_spawn() {
    let rig = rig(
        "echo unused\n",
        Arc::new(FixedSurface::confirming()),
        |config| config.supervisor.scripts_dir = "/nonexistent/trustwipe/scripts".into(),
    );

    let events = drain(Arc::clone(&rig.engine).start_wipe(submission())).await;

    let outcome = events.last().and_then(|e| e.outcome()).expect("outcome");
    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.error_kind, Some(ErrorKind::ExecutorNotFound));
    assert_eq!(rig.supervisor.processes_spawned(), 0);
}
