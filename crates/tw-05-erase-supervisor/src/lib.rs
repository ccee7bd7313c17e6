//! # Erase Supervisor
//!
//! **Component:** 5
//!
//! ## Purpose
//!
//! Launches the platform erase executor for one confirmed request, watches
//! it under a hard timeout, and turns whatever happens into exactly one
//! [`WipeOutcome`](shared_types::WipeOutcome).
//!
//! ## Guarantees
//!
//! | Guarantee | Enforcement Location |
//! |-----------|---------------------|
//! | Arguments passed as a vector, never through a shell | `domain/executor.rs` - `ResolvedExecutor::args()` |
//! | Nothing spawned without an executor on disk | `domain/executor.rs` - `ExecutorRegistry::resolve()` |
//! | Timed out process group is killed, executor reaped | `service.rs` - `supervise()`, `kill_group()` |
//! | One deadline bounds both the wait and the output drain | `service.rs` - `supervise()` |
//! | Secret scrubbed from captured output | `domain/classify.rs` - `scrub_secret()` |
//! | Exactly one terminal event per run | `service.rs` - `run()` |
//!
//! ## Executor contract
//!
//! `(device, method, username, secret)` in, exit status out. Output on
//! stderr with exit status 0 is a warning, not a failure.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    classify, scrub_secret, ArgStyle, ExecutorRegistry, ExecutorSpec, ExitInfo,
    ResolvedExecutor, SupervisorConfig, SupervisorError, SupervisorEvent,
};
pub use ports::EraseSupervisorApi;
pub use service::EraseSupervisor;
