//! Ports for the confirmation gate.

pub mod outbound;

pub use outbound::ConfirmationSurface;
