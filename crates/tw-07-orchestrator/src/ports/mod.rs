//! Ports for the orchestration engine.

pub mod inbound;
pub mod outbound;

pub use inbound::WipeEngineApi;
pub use outbound::HostProbe;
