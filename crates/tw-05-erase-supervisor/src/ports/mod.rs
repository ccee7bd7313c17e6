//! Ports for the erase supervisor.

pub mod inbound;

pub use inbound::EraseSupervisorApi;
