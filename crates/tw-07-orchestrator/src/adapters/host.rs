//! Host probes: the real process environment, and a fixed one for tests.

use async_trait::async_trait;
use shared_types::Platform;
use tracing::debug;

use crate::ports::HostProbe;

/// Probes the running process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalHost;

impl LocalHost {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostProbe for LocalHost {
    fn platform(&self) -> Platform {
        Platform::current()
    }

    fn arch(&self) -> String {
        std::env::consts::ARCH.to_string()
    }

    #[cfg(unix)]
    async fn is_elevated(&self) -> bool {
        // SAFETY: geteuid has no preconditions and cannot fail.
        let euid = unsafe { libc::geteuid() };
        debug!(euid, "Elevation probe");
        euid == 0
    }

    #[cfg(windows)]
    async fn is_elevated(&self) -> bool {
        // `net session` only succeeds for Administrators.
        let status = tokio::process::Command::new("net")
            .arg("session")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await;
        match status {
            Ok(status) => status.success(),
            Err(e) => {
                debug!(error = %e, "Elevation probe failed");
                false
            }
        }
    }

    #[cfg(not(any(unix, windows)))]
    async fn is_elevated(&self) -> bool {
        debug!("No elevation probe for this platform");
        false
    }
}

/// Host with fixed answers.
#[derive(Debug, Clone)]
pub struct FixedHost {
    platform: Platform,
    arch: String,
    elevated: bool,
}

impl FixedHost {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            arch: "x86_64".to_string(),
            elevated: false,
        }
    }

    #[must_use]
    pub fn elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }
}

#[async_trait]
impl HostProbe for FixedHost {
    fn platform(&self) -> Platform {
        self.platform.clone()
    }

    fn arch(&self) -> String {
        self.arch.clone()
    }

    async fn is_elevated(&self) -> bool {
        self.elevated
    }
}
