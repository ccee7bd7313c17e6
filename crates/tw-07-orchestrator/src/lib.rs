//! # Wipe Request Orchestration Engine
//!
//! **Component:** 7
//!
//! ## Purpose
//!
//! Sole assembler of wipe requests and sole caller of the policy validator,
//! attempt limiter, confirmation gate and erase supervisor. Drives every
//! request through a strictly sequential, fail-fast state machine and
//! records each step in the audit log.
//!
//! ## Architecture
//!
//! ```text
//!   start_wipe() ──→ stream<WipeEvent>          ┌──────────────┐
//!        │                  ↑                   │  Event Bus   │──→ subscribe()
//!        ▼                  │ every event ─────→│              │
//!   ┌─────────────────────────────────────┐     └──────────────┘
//!   │ lifecycle task (one per request)    │
//!   │  validate → resolve → allow →       │──→ Audit Log (one entry per state)
//!   │  confirm → lease → supervise        │
//!   └─────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | No spawn without `Confirmed` and `allow()` | `lifecycle.rs` - `advance()` |
//! | Target resolved on a fresh enumeration | `lifecycle.rs` - `admit()` |
//! | One executor per device | `domain/leases.rs` - `DeviceLeases` |
//! | One audit entry per transition | `lifecycle.rs` - `Run::transition()`, `Run::finish()` |
//! | Exactly one `Completed` event, always last | `lifecycle.rs` - `Run::finish()` |
//! | Secrets never reach the audit log | `WipeRequest::audit_projection()`, `tw_06_audit_log::Redactor` |

pub mod adapters;
pub mod domain;
mod lifecycle;
pub mod ports;
pub mod service;

#[cfg(test)]
mod testing;

pub use adapters::{FixedHost, LocalHost};
pub use domain::{
    ActiveWipe, AppConfig, AppStatus, ConfigError, DeviceLease, DeviceLeases, EngineConfig,
    EngineError, OsReport, SystemInfo, WipeSubmission, LOCAL_REQUESTER,
};
pub use ports::{HostProbe, WipeEngineApi};
pub use service::{EngineDeps, WipeEngine};
