//! Error types for the LoRa adapter.

use thiserror::Error;

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while translating and forwarding LoRa messages.
///
/// Every variant is terminal: the adapter never retries internally, and a
/// failed forward never results in a partial publish. Callers decide whether
/// to re-deliver the original inbound message.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed identity received (e.g. empty appID or deviceEUI).
    #[error("malformed identity received")]
    MalformedIdentity,

    /// Malformed LoRa message (undecodable payload).
    #[error("malformed message received")]
    MalformedMessage,

    /// No route map exists for the message's device EUI.
    #[error("route map not found for this device EUI")]
    NotFoundDevice,

    /// No route map exists for the message's application ID.
    #[error("route map not found for this application ID")]
    NotFoundApplication,

    /// Repository-level lookup miss for a single key.
    #[error("route map not found: {0}")]
    NotFound(String),

    /// Route map backing store unreachable.
    #[error("route map store unavailable: {0}")]
    StoreUnavailable(String),

    /// Untyped collaborator failure (e.g. bus publish errors), propagated
    /// verbatim.
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
