//! # Cross-Subsystem Flows
//!
//! Behaviour that only shows up when several subsystems run together:
//!
//! 1. **Limiter → Gate**: denied attempts never reach the operator
//! 2. **Leases → Supervisor**: one executor per device
//! 3. **Engine → Bus**: observers see the same events as the caller
//! 4. **Engine → Audit**: secrets in free-form input never reach the file

use std::sync::Arc;

use shared_bus::{EventFilter, WipeEvent};
use shared_types::{ErrorKind, OutcomeStatus, WipeState};
use tw_04_confirmation_gate::FixedSurface;
use tw_05_erase_supervisor::EraseSupervisorApi;
use tw_07_orchestrator::{WipeEngineApi, WipeSubmission};

use super::fixtures::{drain, rig, states, SECRET, TARGET};

fn outcome_of(events: &[WipeEvent]) -> shared_types::WipeOutcome {
    events
        .last()
        .and_then(|e| e.outcome())
        .cloned()
        .expect("terminal event last")
}

#[tokio::test]
async fn test_fourth_attempt_is_rate_limited_before_prompt() {
    let surface = Arc::new(FixedSurface::declining());
    let rig = rig("echo unused\n", surface.clone(), |_| {});

    let mut statuses = Vec::new();
    for _ in 0..5 {
        let sub = WipeSubmission::new(TARGET, "sanitize", "admin", SECRET).with_requester("op-1");
        let events = drain(Arc::clone(&rig.engine).start_wipe(sub)).await;
        statuses.push(outcome_of(&events).status);
    }

    assert_eq!(
        statuses,
        vec![
            OutcomeStatus::Cancelled,
            OutcomeStatus::Cancelled,
            OutcomeStatus::Cancelled,
            OutcomeStatus::Rejected,
            OutcomeStatus::Rejected,
        ]
    );
    assert_eq!(surface.prompts(), 3);

    // Another identity is unaffected.
    let other = WipeSubmission::new(TARGET, "sanitize", "admin", SECRET).with_requester("op-2");
    let events = drain(Arc::clone(&rig.engine).start_wipe(other)).await;
    assert_eq!(outcome_of(&events).status, OutcomeStatus::Cancelled);
}

#[tokio::test]
async fn test_concurrent_requests_on_one_device_spawn_once() {
    let rig = rig(
        "sleep 1; echo done\n",
        Arc::new(FixedSurface::confirming()),
        |_| {},
    );

    let first = Arc::clone(&rig.engine)
        .start_wipe(WipeSubmission::new(TARGET, "overwrite", "admin", SECRET).with_requester("a"));
    let second = Arc::clone(&rig.engine)
        .start_wipe(WipeSubmission::new(TARGET, "overwrite", "admin", SECRET).with_requester("b"));
    let (first, second) = tokio::join!(drain(first), drain(second));

    let mut outcomes = vec![outcome_of(&first), outcome_of(&second)];
    outcomes.sort_by_key(|o| o.status.as_str());
    assert_eq!(outcomes[0].status, OutcomeStatus::Rejected);
    assert_eq!(outcomes[0].error_kind, Some(ErrorKind::DeviceBusy));
    assert_eq!(outcomes[1].status, OutcomeStatus::Succeeded);
    assert_eq!(rig.supervisor.processes_spawned(), 1);
}

#[tokio::test]
async fn test_different_devices_run_side_by_side() {
    let rig = rig(
        "sleep 1; echo done\n",
        Arc::new(FixedSurface::confirming()),
        |_| {},
    );

    let a = Arc::clone(&rig.engine)
        .start_wipe(WipeSubmission::new(TARGET, "overwrite", "admin", SECRET).with_requester("a"));
    let b = Arc::clone(&rig.engine).start_wipe(
        WipeSubmission::new("/dev/sdy", "overwrite", "admin", SECRET).with_requester("b"),
    );
    let (a, b) = tokio::join!(drain(a), drain(b));

    assert_eq!(outcome_of(&a).status, OutcomeStatus::Succeeded);
    assert_eq!(outcome_of(&b).status, OutcomeStatus::Succeeded);
    assert_eq!(rig.supervisor.processes_spawned(), 2);
}

#[tokio::test]
async fn test_bus_observer_sees_caller_events() {
    let rig = rig("echo done\n", Arc::new(FixedSurface::confirming()), |_| {});
    let mut sub = rig.engine.subscribe(EventFilter::device(TARGET));

    let events = drain(Arc::clone(&rig.engine).start_wipe(
        WipeSubmission::new(TARGET, "overwrite", "admin", SECRET),
    ))
    .await;

    let mut observed = Vec::new();
    while let Ok(Some(event)) = sub.try_recv() {
        observed.push(event);
    }
    assert_eq!(observed.len(), events.len());
    assert_eq!(states(&observed), states(&events));
    assert!(observed.last().is_some_and(WipeEvent::is_terminal));
}

#[tokio::test]
async fn test_rejected_input_with_inline_secret_is_redacted() {
    let rig = rig("echo unused\n", Arc::new(FixedSurface::confirming()), |_| {});

    let sneaky = WipeSubmission::new(TARGET, "overwrite", "password=hunter2hunter2", SECRET);
    let events = drain(Arc::clone(&rig.engine).start_wipe(sneaky)).await;

    let outcome = outcome_of(&events);
    assert_eq!(outcome.error_kind, Some(ErrorKind::Validation));
    assert_eq!(
        states(&events),
        vec![WipeState::Received, WipeState::Rejected]
    );

    let lines = rig.audit_lines();
    assert_eq!(lines.len(), 1);
    assert!(!lines[0].contains("hunter2"));
    assert!(lines[0].contains("password=***"));
}

#[tokio::test]
async fn test_status_queries_while_idle() {
    let rig = rig("echo done\n", Arc::new(FixedSurface::confirming()), |_| {});

    let drives = rig.engine.get_drives().await;
    assert!(drives.iter().all(|d| !d.flags.system));
    assert_eq!(drives.len(), 2);

    assert!(rig.engine.check_os().supported);
    assert!(rig.engine.active_wipes().is_empty());
    assert_eq!(rig.engine.get_app_status().active_wipes, 0);
}
