//! Core types for the lorabridge adapter.
//!
//! This crate holds everything the adapter shares with its collaborators:
//!
//! - **Messages**: the [`UplinkMessage`] received from the LoRa network
//!   server and the [`ChannelMessage`] envelope published on the internal
//!   bus.
//! - **Bus seam**: the [`MessageBus`] trait plus an in-process broadcast
//!   implementation and an in-memory test double.
//! - **Errors**: the adapter-wide [`Error`] taxonomy.
//! - **Config**: wire-contract constants and runtime defaults.

pub mod bus;
pub mod config;
pub mod error;
pub mod message;

pub use bus::{BusReceiver, InMemoryBus, InProcessBus, MessageBus};
pub use error::{Error, Result};
pub use message::{ChannelMessage, UplinkMessage, UplinkPayload};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
