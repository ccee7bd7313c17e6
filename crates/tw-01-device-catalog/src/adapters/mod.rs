//! Adapters implementing [`DeviceEnumerator`](crate::ports::DeviceEnumerator).

pub mod fixed;
pub mod lsblk;

pub use fixed::StaticEnumerator;
pub use lsblk::{parse_lsblk, LsblkEnumerator};
