//! Orchestration engine service - assembly and read-only queries.
//!
//! The wipe lifecycle itself lives in [`crate::lifecycle`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use shared_bus::{EventFilter, StatusBus, Subscription, WipeEvent};
use shared_types::{Device, WipeMethod, WipeState};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{info, info_span, Instrument};
use tw_01_device_catalog::DeviceCatalogApi;
use tw_02_policy_validator::PolicyValidator;
use tw_03_attempt_limiter::AttemptLimiter;
use tw_04_confirmation_gate::{ConfirmationGate, ConfirmationSurface};
use tw_05_erase_supervisor::EraseSupervisorApi;
use tw_06_audit_log::{AuditLog, AuditSink};
use uuid::Uuid;

use crate::domain::{
    ActiveWipe, AppStatus, DeviceLeases, EngineConfig, EngineError, OsReport, SystemInfo,
    WipeSubmission,
};
use crate::ports::{HostProbe, WipeEngineApi};

/// Status events buffered per request stream.
const REQUEST_EVENT_BUFFER: usize = 32;

/// External collaborators the engine drives.
pub struct EngineDeps {
    pub catalog: Arc<dyn DeviceCatalogApi>,
    pub surface: Arc<dyn ConfirmationSurface>,
    pub supervisor: Arc<dyn EraseSupervisorApi>,
    pub audit_sink: Arc<dyn AuditSink>,
    pub host: Arc<dyn HostProbe>,
}

/// Wipe request orchestration engine.
pub struct WipeEngine {
    pub(crate) catalog: Arc<dyn DeviceCatalogApi>,
    pub(crate) validator: PolicyValidator,
    pub(crate) limiter: Arc<AttemptLimiter>,
    pub(crate) gate: ConfirmationGate,
    pub(crate) supervisor: Arc<dyn EraseSupervisorApi>,
    pub(crate) audit: AuditLog,
    pub(crate) bus: Arc<StatusBus>,
    pub(crate) leases: DeviceLeases,
    active: DashMap<Uuid, ActiveWipe>,
    host: Arc<dyn HostProbe>,
    session_id: Uuid,
    start_time: DateTime<Utc>,
    version: String,
    config_loaded: bool,
}

impl WipeEngine {
    /// Assemble the engine.
    ///
    /// # Errors
    /// - `Config`: the configuration fails validation or a field pattern
    ///   does not compile
    pub fn new(config: &EngineConfig, deps: EngineDeps) -> Result<Self, EngineError> {
        config.validate()?;
        let validator = PolicyValidator::new(&config.validation)
            .map_err(|e| EngineError::Config(e.to_string()))?;

        let engine = Self {
            catalog: deps.catalog,
            validator,
            limiter: Arc::new(AttemptLimiter::new(config.rate_limit.clone())),
            gate: ConfirmationGate::new(deps.surface, &config.confirmation),
            supervisor: deps.supervisor,
            audit: AuditLog::new(deps.audit_sink, config.audit.min_level),
            bus: Arc::new(StatusBus::new()),
            leases: DeviceLeases::new(),
            active: DashMap::new(),
            host: deps.host,
            session_id: Uuid::new_v4(),
            start_time: Utc::now(),
            version: config.app.version.clone(),
            config_loaded: false,
        };

        info!(
            session_id = %engine.session_id,
            version = %engine.version,
            max_attempts = config.rate_limit.max_attempts,
            "Wipe engine ready"
        );
        Ok(engine)
    }

    /// Mark whether the configuration came from a file.
    #[must_use]
    pub fn with_config_loaded(mut self, loaded: bool) -> Self {
        self.config_loaded = loaded;
        self
    }

    /// Replace the attempt limiter (shared limiter, injected clock).
    #[must_use]
    pub fn with_limiter(mut self, limiter: Arc<AttemptLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn limiter(&self) -> &Arc<AttemptLimiter> {
        &self.limiter
    }

    pub fn event_bus(&self) -> &Arc<StatusBus> {
        &self.bus
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub(crate) fn set_state(&self, request_id: Uuid, state: WipeState) {
        if let Some(mut active) = self.active.get_mut(&request_id) {
            active.state = state;
        }
    }

    pub(crate) fn set_method(&self, request_id: Uuid, method: WipeMethod) {
        if let Some(mut active) = self.active.get_mut(&request_id) {
            active.method = Some(method);
        }
    }

    pub(crate) fn forget(&self, request_id: Uuid) {
        self.active.remove(&request_id);
    }
}

#[async_trait]
impl WipeEngineApi for WipeEngine {
    async fn get_drives(&self) -> Vec<Device> {
        self.catalog.list_candidates().await
    }

    async fn get_drive_details(&self, device_id: &str) -> Result<Device, EngineError> {
        Ok(self.catalog.get_details(device_id).await?)
    }

    fn check_os(&self) -> OsReport {
        OsReport::for_platform(&self.host.platform())
    }

    async fn get_system_info(&self) -> SystemInfo {
        SystemInfo {
            platform: self.host.platform().to_string(),
            arch: self.host.arch(),
            elevated: self.host.is_elevated().await,
            session_id: self.session_id,
        }
    }

    fn get_app_status(&self) -> AppStatus {
        AppStatus {
            running: true,
            start_time: self.start_time,
            version: self.version.clone(),
            config_loaded: self.config_loaded,
            active_wipes: self.active.len(),
        }
    }

    fn start_wipe(self: Arc<Self>, submission: WipeSubmission) -> ReceiverStream<WipeEvent> {
        let (tx, rx) = mpsc::channel(REQUEST_EVENT_BUFFER);
        let request_id = Uuid::new_v4();

        self.active.insert(
            request_id,
            ActiveWipe {
                request_id,
                device_id: submission.device.clone(),
                method: None,
                requester: submission.requester.clone(),
                state: WipeState::Received,
                started_at: Utc::now(),
            },
        );
        info!(request_id = %request_id, device = %submission.device, "Wipe request received");

        let span = info_span!("wipe", request_id = %request_id, device = %submission.device);
        tokio::spawn(
            async move {
                self.run(request_id, submission, tx).await;
            }
            .instrument(span),
        );

        ReceiverStream::new(rx)
    }

    fn active_wipes(&self) -> Vec<ActiveWipe> {
        let mut active: Vec<ActiveWipe> = self.active.iter().map(|e| e.value().clone()).collect();
        active.sort_by_key(|a| a.started_at);
        active
    }

    fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }
}
