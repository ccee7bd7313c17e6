//! [`HostProbe`](crate::ports::HostProbe) adapters.

pub mod host;

pub use host::{FixedHost, LocalHost};
