//! Executor registry.
//!
//! Maps a platform to the external program that performs the erase, and
//! builds its argument vector. Arguments are passed one by one to the OS;
//! no shell ever parses them.

use serde::{Deserialize, Serialize};
use shared_types::{Platform, WipeRequest};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::config::SupervisorConfig;
use super::errors::SupervisorError;

/// How the request fields are laid out on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgStyle {
    /// `<program> [script] <device> <method> <username> <secret>`
    #[default]
    Positional,
    /// `powershell -ExecutionPolicy Bypass -File <script> -Drive .. -Method .. -Username .. -Password ..`
    PowerShell,
}

/// One executor definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorSpec {
    /// Program to run (`bash`, `powershell`, or an absolute path).
    pub program: String,
    /// Script handed to `program`, relative to `scripts_dir` unless absolute.
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub style: ArgStyle,
}

impl ExecutorSpec {
    pub fn linux() -> Self {
        Self {
            program: "bash".into(),
            script: Some("wipe_linux.sh".into()),
            style: ArgStyle::Positional,
        }
    }

    pub fn windows() -> Self {
        Self {
            program: "powershell".into(),
            script: Some("wipe_windows.ps1".into()),
            style: ArgStyle::PowerShell,
        }
    }
}

/// An executor whose artifact was found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutor {
    pub program: String,
    pub script: Option<PathBuf>,
    pub style: ArgStyle,
}

impl ResolvedExecutor {
    /// Argument vector for `request`, secret included.
    pub fn args(&self, request: &WipeRequest) -> Vec<OsString> {
        let device = OsString::from(&request.device_id);
        let method = OsString::from(request.method.as_str());
        let username = OsString::from(&request.credentials.username);
        let secret = OsString::from(request.credentials.secret.expose());

        match self.style {
            ArgStyle::Positional => {
                let mut args: Vec<OsString> = self
                    .script
                    .iter()
                    .map(|s| s.clone().into_os_string())
                    .collect();
                args.extend([device, method, username, secret]);
                args
            }
            ArgStyle::PowerShell => {
                let mut args: Vec<OsString> =
                    vec!["-ExecutionPolicy".into(), "Bypass".into()];
                if let Some(script) = &self.script {
                    args.push("-File".into());
                    args.push(script.clone().into_os_string());
                }
                args.extend([
                    "-Drive".into(),
                    device,
                    "-Method".into(),
                    method,
                    "-Username".into(),
                    username,
                    "-Password".into(),
                    secret,
                ]);
                args
            }
        }
    }
}

/// Platform → executor table.
#[derive(Debug, Clone)]
pub struct ExecutorRegistry {
    entries: HashMap<String, ExecutorSpec>,
    scripts_dir: PathBuf,
}

impl ExecutorRegistry {
    /// Built-in executors for Linux and Windows, then configured overrides.
    pub fn from_config(config: &SupervisorConfig) -> Self {
        let mut entries = HashMap::new();
        entries.insert(Platform::Linux.as_str().to_string(), ExecutorSpec::linux());
        entries.insert(Platform::Windows.as_str().to_string(), ExecutorSpec::windows());
        for (platform, spec) in &config.executors {
            entries.insert(platform.clone(), spec.clone());
        }

        Self {
            entries,
            scripts_dir: config.scripts_dir.clone(),
        }
    }

    pub fn is_supported(&self, platform: &Platform) -> bool {
        self.entries.contains_key(platform.as_str())
    }

    /// Pick the executor for `platform` and check that its artifact exists.
    pub fn resolve(&self, platform: &Platform) -> Result<ResolvedExecutor, SupervisorError> {
        let spec = self
            .entries
            .get(platform.as_str())
            .ok_or_else(|| SupervisorError::UnsupportedPlatform(platform.to_string()))?;

        let script = match &spec.script {
            Some(name) => {
                let path = self.scripts_dir.join(name);
                if !path.is_file() {
                    return Err(SupervisorError::ExecutorNotFound(path));
                }
                Some(path)
            }
            None => {
                // A bare program name is looked up on PATH at spawn time.
                let program = Path::new(&spec.program);
                if program.components().count() > 1 && !program.is_file() {
                    return Err(SupervisorError::ExecutorNotFound(program.to_path_buf()));
                }
                None
            }
        };

        Ok(ResolvedExecutor {
            program: spec.program.clone(),
            script,
            style: spec.style,
        })
    }
}
