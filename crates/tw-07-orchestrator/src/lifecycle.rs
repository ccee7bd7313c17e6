//! The wipe lifecycle.
//!
//! ```text
//! Received ──validate + resolve──✗──→ Rejected
//!    │
//!    ▼
//! Validated ──allow()──✗──→ Rejected (rate limited)
//!    │
//!    ▼
//! RateLimitChecked → ConfirmationPending ──✗──→ Cancelled
//!                          │
//!                          ▼
//!                      Confirmed ──lease──✗──→ Rejected (device busy)
//!                          │
//!                          ▼
//!                      Executing → {Succeeded, Warning, Failed, TimedOut}
//! ```
//!
//! Every state after `Received` writes exactly one audit entry and emits one
//! status event. The terminal state is followed by the `Completed` event.

use serde_json::{json, Value};
use shared_bus::{WipeEvent, WipeEventKind};
use shared_types::{Credentials, OutcomeStatus, WipeOutcome, WipeRequest, WipeState};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::{debug, error, info, trace, warn};
use tw_02_policy_validator::WipeFields;
use tw_04_confirmation_gate::{ConfirmationDecision, ConfirmationRequest};
use tw_05_erase_supervisor::SupervisorEvent;
use tw_06_audit_log::LogLevel;
use uuid::Uuid;

use crate::domain::{EngineError, WipeSubmission};
use crate::service::WipeEngine;

/// Audit level for a terminal outcome.
fn outcome_level(status: OutcomeStatus) -> LogLevel {
    match status {
        OutcomeStatus::Succeeded | OutcomeStatus::Started => LogLevel::Info,
        OutcomeStatus::Warning | OutcomeStatus::Cancelled | OutcomeStatus::Rejected => {
            LogLevel::Warn
        }
        OutcomeStatus::Failed | OutcomeStatus::TimedOut => LogLevel::Error,
    }
}

/// Per-request emission context.
struct Run<'a> {
    engine: &'a WipeEngine,
    request_id: Uuid,
    device_id: String,
    /// Secret-free request description attached to every audit entry.
    payload: Value,
    events: mpsc::Sender<WipeEvent>,
}

impl<'a> Run<'a> {
    fn new(
        engine: &'a WipeEngine,
        request_id: Uuid,
        submission: &WipeSubmission,
        events: mpsc::Sender<WipeEvent>,
    ) -> Self {
        Self {
            engine,
            request_id,
            device_id: submission.device.clone(),
            payload: json!({
                "request_id": request_id.to_string(),
                "device": submission.device,
                "method": submission.method,
                "username": submission.username,
                "requester": submission.requester,
            }),
            events,
        }
    }

    /// Switch the audit payload to the assembled request.
    fn attach(&mut self, request: &WipeRequest) {
        self.device_id = request.device_id.clone();
        self.payload = request.audit_projection();
        self.engine.set_method(self.request_id, request.method);
    }

    fn payload_with(&self, extra: &[(&str, Value)]) -> Value {
        let mut payload = self.payload.clone();
        if let Some(map) = payload.as_object_mut() {
            for (key, value) in extra {
                map.insert((*key).to_string(), value.clone());
            }
        }
        payload
    }

    async fn emit(&self, kind: WipeEventKind, message: impl Into<String>) {
        let event = WipeEvent::new(self.request_id, self.device_id.clone(), kind, message);
        self.deliver(event).await;
    }

    async fn deliver(&self, event: WipeEvent) {
        self.engine.bus.publish(event.clone());
        if self.events.send(event).await.is_err() {
            trace!(request_id = %self.request_id, "Status stream closed by caller");
        }
    }

    /// Non-terminal transition: state, audit entry, status event.
    async fn transition(&self, state: WipeState, message: &str) {
        self.engine.set_state(self.request_id, state);
        self.engine
            .audit
            .record_async(
                LogLevel::Info,
                message,
                Some(self.payload_with(&[("state", json!(state.as_str()))])),
            )
            .await;
        debug!(request_id = %self.request_id, state = %state, "Transition");
        self.emit(WipeEventKind::StateChanged { state }, message).await;
    }

    /// Terminal transition. Consumes the run.
    async fn finish(self, outcome: WipeOutcome) -> WipeOutcome {
        let state = WipeState::from_outcome(outcome.status);
        self.engine.set_state(self.request_id, state);

        self.engine
            .audit
            .record_async(
                outcome_level(outcome.status),
                &outcome.message,
                Some(self.payload_with(&[
                    ("state", json!(state.as_str())),
                    ("status", json!(outcome.status.as_str())),
                    ("error_kind", json!(outcome.error_kind.map(|k| k.as_str()))),
                    ("exit_code", json!(outcome.exit_code)),
                    ("signal", json!(outcome.signal)),
                ])),
            )
            .await;

        match outcome.status {
            OutcomeStatus::Succeeded => {
                info!(request_id = %self.request_id, device = %self.device_id, "Wipe succeeded");
            }
            status => {
                warn!(
                    request_id = %self.request_id,
                    device = %self.device_id,
                    status = %status,
                    error_kind = ?outcome.error_kind,
                    message = %outcome.message,
                    "Wipe did not succeed"
                );
            }
        }

        self.emit(WipeEventKind::StateChanged { state }, outcome.message.clone())
            .await;
        self.engine.forget(self.request_id);
        self.deliver(WipeEvent::completed(self.device_id.clone(), outcome.clone()))
            .await;
        outcome
    }
}

impl WipeEngine {
    /// Drive one request to its terminal outcome.
    pub(crate) async fn run(
        self: Arc<Self>,
        request_id: Uuid,
        submission: WipeSubmission,
        events: mpsc::Sender<WipeEvent>,
    ) -> WipeOutcome {
        let mut run = Run::new(&self, request_id, &submission, events);
        run.emit(
            WipeEventKind::StateChanged {
                state: WipeState::Received,
            },
            "Wipe request received",
        )
        .await;

        let outcome = match self.advance(&mut run, submission).await {
            Ok(outcome) => outcome,
            Err(e) => e.into_outcome(request_id),
        };
        run.finish(outcome).await
    }

    async fn advance(
        &self,
        run: &mut Run<'_>,
        submission: WipeSubmission,
    ) -> Result<WipeOutcome, EngineError> {
        let request = self.admit(run.request_id, submission).await?;
        run.attach(&request);
        run.transition(WipeState::Validated, "Request validated").await;

        if !self.limiter.allow(&request.requester) {
            let retry_after = self
                .limiter
                .retry_after(&request.requester)
                .unwrap_or_default();
            return Err(EngineError::RateLimited { retry_after });
        }
        run.transition(WipeState::RateLimitChecked, "Attempt admitted")
            .await;

        run.transition(
            WipeState::ConfirmationPending,
            "Awaiting operator confirmation",
        )
        .await;
        if let ConfirmationDecision::Cancelled(reason) =
            self.gate.confirm(&ConfirmationRequest::from(&request)).await
        {
            return Err(EngineError::Cancelled(reason));
        }
        run.transition(WipeState::Confirmed, "Wipe confirmed by operator")
            .await;

        let _lease = self
            .leases
            .try_acquire(&request.device_id, request.id)
            .ok_or_else(|| EngineError::DeviceBusy(request.device_id.clone()))?;
        run.transition(WipeState::Executing, "Executing wipe").await;

        Ok(self.execute(run, request).await)
    }

    /// Validate the raw fields, resolve the target on a fresh enumeration
    /// and assemble the request.
    async fn admit(
        &self,
        request_id: Uuid,
        submission: WipeSubmission,
    ) -> Result<WipeRequest, EngineError> {
        let fields = WipeFields::new(
            &submission.device,
            &submission.method,
            &submission.username,
            submission.secret.expose(),
        );
        let validated = self.validator.validate(&fields)?;
        let device = self.catalog.get_details(validated.drive).await?;

        let credentials = Credentials::new(validated.username, submission.secret.clone());
        Ok(WipeRequest {
            id: request_id,
            ..WipeRequest::new(
                device.id,
                validated.method,
                submission.requester.clone(),
                credentials,
            )
        })
    }

    /// Hand the request to the supervisor and relay its progress.
    async fn execute(&self, run: &Run<'_>, request: WipeRequest) -> WipeOutcome {
        let request_id = request.id;
        let mut progress = Arc::clone(&self.supervisor).execute(request);

        while let Some(event) = progress.next().await {
            match event {
                SupervisorEvent::Started { message } => {
                    run.emit(WipeEventKind::ProcessScheduled, message).await;
                }
                SupervisorEvent::Running { pid } => {
                    let message = match pid {
                        Some(pid) => format!("Wipe process running (pid {pid})"),
                        None => "Wipe process running".to_string(),
                    };
                    run.emit(WipeEventKind::ProcessRunning { pid }, message)
                        .await;
                }
                SupervisorEvent::ProcessError { message } => {
                    run.emit(WipeEventKind::ProcessError, message).await;
                }
                SupervisorEvent::Finished(outcome) => {
                    if let Some(kind) = outcome.error_kind {
                        debug!(
                            request_id = %request_id,
                            status = %outcome.status,
                            error_kind = ?kind,
                            "Executor reported an error"
                        );
                    }
                    return outcome;
                }
            }
        }

        error!(request_id = %request_id, "Supervisor stream ended without an outcome");
        EngineError::ProcessError("supervisor ended without an outcome".to_string())
            .into_outcome(request_id)
    }
}
