//! Subsystem wiring for the local machine.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tw_01_device_catalog::{DeviceCatalogService, LsblkEnumerator};
use tw_04_confirmation_gate::{ConfirmationSurface, TerminalSurface};
use tw_05_erase_supervisor::EraseSupervisor;
use tw_06_audit_log::{AuditError, FileSink};
use tw_07_orchestrator::{EngineDeps, EngineError, LocalHost, WipeEngine};

use crate::config::LoadedConfig;

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("cannot open audit log: {0}")]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Engine backed by `lsblk`, the configured executors, the audit file and
/// `surface` for confirmations.
pub fn build_engine(
    config: &LoadedConfig,
    surface: Arc<dyn ConfirmationSurface>,
) -> Result<WipeEngine, WiringError> {
    let engine_config = &config.engine;

    let supervisor = EraseSupervisor::new(&engine_config.supervisor);
    info!(
        platform = %supervisor.platform(),
        supported = supervisor.is_supported(),
        scripts_dir = %engine_config.supervisor.scripts_dir.display(),
        "Erase supervisor configured"
    );

    let deps = EngineDeps {
        catalog: Arc::new(DeviceCatalogService::new(Arc::new(LsblkEnumerator::new()))),
        surface,
        supervisor: Arc::new(supervisor),
        audit_sink: Arc::new(FileSink::open(&engine_config.audit.file)?),
        host: Arc::new(LocalHost::new()),
    };

    Ok(WipeEngine::new(engine_config, deps)?.with_config_loaded(config.loaded))
}

/// Engine wired to the process terminal.
pub fn build_terminal_engine(config: &LoadedConfig) -> Result<WipeEngine, WiringError> {
    build_engine(config, Arc::new(TerminalSurface::stdio()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_04_confirmation_gate::FixedSurface;
    use tw_07_orchestrator::{EngineConfig, WipeEngineApi};

    #[test]
    fn test_build_engine_creates_audit_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine_config = EngineConfig::default();
        engine_config.audit.file = dir.path().join("logs").join("app.log");

        let config = LoadedConfig {
            engine: engine_config,
            loaded: true,
        };
        let engine = build_engine(&config, Arc::new(FixedSurface::declining())).unwrap();

        assert!(config.engine.audit.file.exists());
        assert!(engine.get_app_status().config_loaded);
    }
}
