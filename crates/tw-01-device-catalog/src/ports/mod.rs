//! Ports for the device catalog.

pub mod inbound;
pub mod outbound;

pub use inbound::DeviceCatalogApi;
pub use outbound::DeviceEnumerator;
