//! LoRaWAN → internal bus adapter.
//!
//! The adapter makes LoRa-connected devices appear as first-class publishers
//! inside the internal pub/sub fabric. It translates external identities
//! (device EUI, application ID) into internal ones (thing ID, channel ID)
//! through two independent route maps, and forwards each uplink through a
//! decode/translate/publish pipeline.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lorabridge_adapter::{AdapterService, MemoryRouteMap};
//! use lorabridge_core::{InProcessBus, UplinkMessage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bus = InProcessBus::new();
//!     let service = AdapterService::new(
//!         Arc::new(bus.clone()),
//!         Arc::new(MemoryRouteMap::new()),
//!         Arc::new(MemoryRouteMap::new()),
//!     );
//!
//!     service.create_thing("t1", "AA:BB").await?;
//!     service.create_channel("c1", "app1").await?;
//!
//!     let uplink = UplinkMessage {
//!         device_eui: "AA:BB".to_string(),
//!         application_id: "app1".to_string(),
//!         data: "aGVsbG8=".to_string(),
//!         object: None,
//!     };
//!     service.forward("token", uplink).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod route_map;
pub mod service;

pub use route_map::{MemoryRouteMap, RouteMapRepository};
pub use service::AdapterService;

// Re-exports for convenience
pub use lorabridge_core::{ChannelMessage, Error, Result, UplinkMessage, UplinkPayload};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
