//! Raw wipe submission from a caller.

use shared_types::SecretString;

/// Requester key used when the caller does not supply one.
pub const LOCAL_REQUESTER: &str = "local";

/// Unvalidated input to `start_wipe`. Only the engine turns this into a
/// [`WipeRequest`](shared_types::WipeRequest).
#[derive(Debug, Clone)]
pub struct WipeSubmission {
    pub device: String,
    pub method: String,
    pub username: String,
    pub secret: SecretString,
    /// Rate-limiting identity (session, channel or user).
    pub requester: String,
}

impl WipeSubmission {
    pub fn new(
        device: impl Into<String>,
        method: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<SecretString>,
    ) -> Self {
        Self {
            device: device.into(),
            method: method.into(),
            username: username.into(),
            secret: secret.into(),
            requester: LOCAL_REQUESTER.to_string(),
        }
    }

    #[must_use]
    pub fn with_requester(mut self, requester: impl Into<String>) -> Self {
        self.requester = requester.into();
        self
    }
}
