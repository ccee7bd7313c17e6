//! Engine fixtures backed by a real child process.

use shared_bus::WipeEvent;
use shared_types::{DeviceFlags, Platform, WipeState};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tw_01_device_catalog::{DeviceCatalogService, RawDevice, StaticEnumerator};
use tw_04_confirmation_gate::ConfirmationSurface;
use tw_05_erase_supervisor::{EraseSupervisor, SupervisorConfig};
use tw_06_audit_log::FileSink;
use tw_07_orchestrator::{EngineConfig, EngineDeps, FixedHost, WipeEngine};

pub const TARGET: &str = "/dev/sdz";
pub const SECRET: &str = "password123";

/// Engine plus the files it writes.
pub struct Rig {
    pub engine: Arc<WipeEngine>,
    pub supervisor: Arc<EraseSupervisor>,
    pub audit_file: PathBuf,
    _dir: TempDir,
}

impl Rig {
    pub fn audit_lines(&self) -> Vec<String> {
        std::fs::read_to_string(&self.audit_file)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn raw(id: &str, system: bool) -> RawDevice {
    RawDevice {
        id: Some(id.to_string()),
        description: Some(format!("disk {id}")),
        size_bytes: Some(8 << 30),
        mount_points: if system { vec!["/".to_string()] } else { Vec::new() },
        flags: DeviceFlags {
            removable: !system,
            usb: !system,
            system,
            ..DeviceFlags::default()
        },
    }
}

/// Engine whose Linux executor is `bash <tmp>/wipe_linux.sh` running `script`.
pub fn rig(
    script: &str,
    surface: Arc<dyn ConfirmationSurface>,
    tune: impl FnOnce(&mut EngineConfig),
) -> Rig {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("wipe_linux.sh"),
        format!("#!/bin/bash\n{script}"),
    )
    .expect("write script");

    let mut config = EngineConfig::default();
    config.supervisor = SupervisorConfig {
        scripts_dir: dir.path().to_path_buf(),
        ..SupervisorConfig::default()
    };
    config.audit.file = dir.path().join("logs").join("app.log");
    tune(&mut config);

    let supervisor = Arc::new(EraseSupervisor::for_platform(
        &config.supervisor,
        Platform::Linux,
    ));
    let enumerator = StaticEnumerator::new(vec![
        raw("/dev/sda", true),
        raw(TARGET, false),
        raw("/dev/sdy", false),
    ]);

    let deps = EngineDeps {
        catalog: Arc::new(DeviceCatalogService::new(Arc::new(enumerator))),
        surface,
        supervisor: supervisor.clone(),
        audit_sink: Arc::new(FileSink::open(&config.audit.file).expect("audit file")),
        host: Arc::new(FixedHost::new(Platform::Linux)),
    };
    let engine = WipeEngine::new(&config, deps).expect("engine");

    Rig {
        engine: Arc::new(engine),
        supervisor,
        audit_file: config.audit.file.clone(),
        _dir: dir,
    }
}

pub async fn drain(stream: ReceiverStream<WipeEvent>) -> Vec<WipeEvent> {
    tokio::time::timeout(Duration::from_secs(10), stream.collect::<Vec<_>>())
        .await
        .expect("request did not finish")
}

pub fn states(events: &[WipeEvent]) -> Vec<WipeState> {
    events.iter().filter_map(WipeEvent::state).collect()
}
