//! Test doubles shared by the unit tests of this crate.

use shared_bus::WipeEvent;
use shared_types::{DeviceFlags, OutcomeStatus, Platform, WipeOutcome, WipeRequest};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tw_01_device_catalog::{DeviceCatalogService, RawDevice, StaticEnumerator};
use tw_04_confirmation_gate::FixedSurface;
use tw_05_erase_supervisor::{EraseSupervisorApi, SupervisorEvent};
use tw_06_audit_log::MemorySink;

use crate::adapters::FixedHost;
use crate::domain::EngineConfig;
use crate::service::{EngineDeps, WipeEngine};

pub(crate) fn candidate(id: &str) -> RawDevice {
    RawDevice {
        id: Some(id.to_string()),
        description: Some(format!("USB stick {id}")),
        size_bytes: Some(16 << 30),
        mount_points: Vec::new(),
        flags: DeviceFlags {
            removable: true,
            usb: true,
            ..DeviceFlags::default()
        },
    }
}

fn system_disk() -> RawDevice {
    RawDevice {
        id: Some("/dev/sda".to_string()),
        description: Some("System disk".to_string()),
        size_bytes: Some(512 << 30),
        mount_points: vec!["/".to_string()],
        flags: DeviceFlags {
            system: true,
            ..DeviceFlags::default()
        },
    }
}

/// Supervisor that never spawns a process: it replays a fixed script.
pub(crate) struct ScriptedSupervisor {
    finish: Option<(OutcomeStatus, String)>,
    delay: Duration,
    spawns: AtomicU64,
}

impl ScriptedSupervisor {
    pub(crate) fn finishing(status: OutcomeStatus, message: &str) -> Self {
        Self {
            finish: Some((status, message.to_string())),
            delay: Duration::ZERO,
            spawns: AtomicU64::new(0),
        }
    }

    pub(crate) fn succeeding() -> Self {
        Self::finishing(OutcomeStatus::Succeeded, "Wipe completed: done")
    }

    /// Ends the stream without a terminal event.
    pub(crate) fn vanishing() -> Self {
        Self {
            finish: None,
            delay: Duration::ZERO,
            spawns: AtomicU64::new(0),
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn spawns(&self) -> u64 {
        self.spawns.load(Ordering::SeqCst)
    }
}

impl EraseSupervisorApi for ScriptedSupervisor {
    fn execute(self: Arc<Self>, request: WipeRequest) -> ReceiverStream<SupervisorEvent> {
        let (tx, rx) = mpsc::channel(8);
        self.spawns.fetch_add(1, Ordering::SeqCst);

        tokio::spawn(async move {
            let _ = tx
                .send(SupervisorEvent::Started {
                    message: "Starting wipe on linux...".to_string(),
                })
                .await;
            let _ = tx.send(SupervisorEvent::Running { pid: Some(4242) }).await;
            tokio::time::sleep(self.delay).await;
            if let Some((status, message)) = &self.finish {
                let outcome = WipeOutcome::new(request.id, *status, message.clone());
                let _ = tx.send(SupervisorEvent::Finished(outcome)).await;
            }
        });

        ReceiverStream::new(rx)
    }

    fn processes_spawned(&self) -> u64 {
        self.spawns()
    }
}

pub(crate) struct Harness {
    pub engine: Arc<WipeEngine>,
    pub audit: Arc<MemorySink>,
    pub supervisor: Arc<ScriptedSupervisor>,
    pub surface: Arc<FixedSurface>,
}

pub(crate) fn harness(surface: FixedSurface, supervisor: ScriptedSupervisor) -> Harness {
    harness_with(EngineConfig::default(), surface, supervisor)
}

pub(crate) fn harness_with(
    config: EngineConfig,
    surface: FixedSurface,
    supervisor: ScriptedSupervisor,
) -> Harness {
    let audit = Arc::new(MemorySink::new());
    let supervisor = Arc::new(supervisor);
    let surface = Arc::new(surface);
    let enumerator = StaticEnumerator::new(vec![system_disk(), candidate("/dev/sdz")]);

    let deps = EngineDeps {
        catalog: Arc::new(DeviceCatalogService::new(Arc::new(enumerator))),
        surface: surface.clone(),
        supervisor: supervisor.clone(),
        audit_sink: audit.clone(),
        host: Arc::new(FixedHost::new(Platform::Linux)),
    };
    let engine = WipeEngine::new(&config, deps).expect("valid test config");

    Harness {
        engine: Arc::new(engine),
        audit,
        supervisor,
        surface,
    }
}

/// Drain a request stream to its end.
pub(crate) async fn collect(stream: ReceiverStream<WipeEvent>) -> Vec<WipeEvent> {
    tokio::time::timeout(Duration::from_secs(5), stream.collect::<Vec<_>>())
        .await
        .expect("request stream did not finish")
}
