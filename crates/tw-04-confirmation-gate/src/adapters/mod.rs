//! [`ConfirmationSurface`](crate::ports::ConfirmationSurface) adapters.

pub mod channel;
pub mod fixed;
pub mod terminal;

pub use channel::{ChannelSurface, PendingConfirmation};
pub use fixed::FixedSurface;
pub use terminal::TerminalSurface;
