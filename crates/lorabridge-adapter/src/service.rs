//! Adapter service - identity management and message forwarding.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::sync::Arc;

use lorabridge_core::{ChannelMessage, Error, MessageBus, Result, UplinkMessage, UplinkPayload};

use crate::route_map::RouteMapRepository;

/// Stateless orchestrator translating LoRa identities and forwarding uplinks
/// to the internal bus.
///
/// The service owns no persistent state; the two route maps and the bus are
/// lifecycle-managed by the caller and shared freely across concurrent
/// invocations.
pub struct AdapterService {
    bus: Arc<dyn MessageBus>,
    things: Arc<dyn RouteMapRepository>,
    channels: Arc<dyn RouteMapRepository>,
}

impl AdapterService {
    /// Create the adapter over a bus client and the two route maps:
    /// `things` keyed by device EUI, `channels` keyed by application ID.
    pub fn new(
        bus: Arc<dyn MessageBus>,
        things: Arc<dyn RouteMapRepository>,
        channels: Arc<dyn RouteMapRepository>,
    ) -> Self {
        Self {
            bus,
            things,
            channels,
        }
    }

    /// Create the thingID:devEUI route map.
    ///
    /// The table is keyed by the *external* device EUI and valued by the
    /// internal thing ID, inverting the argument order of this call: lookup
    /// by device EUI is the per-message hot path, lookup by thing ID never
    /// happens.
    pub async fn create_thing(&self, thing_id: &str, device_eui: &str) -> Result<()> {
        validate_identity(thing_id, device_eui)?;
        self.things.save(device_eui, thing_id).await
    }

    /// Update the thingID:devEUI route map. Same upsert as [`Self::create_thing`].
    pub async fn update_thing(&self, thing_id: &str, device_eui: &str) -> Result<()> {
        validate_identity(thing_id, device_eui)?;
        self.things.save(device_eui, thing_id).await
    }

    /// Remove the route map of a thing, keyed by its internal ID.
    pub async fn remove_thing(&self, thing_id: &str) -> Result<()> {
        self.things.remove(thing_id).await
    }

    /// Create the channelID:appID route map, with the same key/value
    /// inversion as [`Self::create_thing`] (table keyed by application ID).
    pub async fn create_channel(&self, channel_id: &str, app_id: &str) -> Result<()> {
        validate_identity(channel_id, app_id)?;
        self.channels.save(app_id, channel_id).await
    }

    /// Update the channelID:appID route map.
    pub async fn update_channel(&self, channel_id: &str, app_id: &str) -> Result<()> {
        validate_identity(channel_id, app_id)?;
        self.channels.save(app_id, channel_id).await
    }

    /// Remove the route map of a channel, keyed by its internal ID.
    pub async fn remove_channel(&self, channel_id: &str) -> Result<()> {
        self.channels.remove(channel_id).await
    }

    /// Translate one uplink and publish it on the internal bus.
    ///
    /// The sequence is strict: device lookup, application lookup, payload
    /// determination, then publish. Any failure aborts the message
    /// immediately; nothing is ever partially published and nothing is
    /// retried here. `token` is forwarded opaquely to the bus.
    pub async fn forward(&self, token: &str, message: UplinkMessage) -> Result<()> {
        let thing = match self.things.get(&message.device_eui).await {
            Ok(thing) => thing,
            Err(Error::NotFound(_)) => {
                tracing::debug!(device_eui = %message.device_eui, "no thing route for uplink");
                return Err(Error::NotFoundDevice);
            }
            Err(err) => return Err(err),
        };

        let channel = match self.channels.get(&message.application_id).await {
            Ok(channel) => channel,
            Err(Error::NotFound(_)) => {
                tracing::debug!(
                    application_id = %message.application_id,
                    "no channel route for uplink"
                );
                return Err(Error::NotFoundApplication);
            }
            Err(err) => return Err(err),
        };

        // Forward the representation decoded by the network server's codec
        // when one is present; otherwise decode the raw base64 payload.
        let payload = match message.payload() {
            UplinkPayload::Structured(object) => {
                serde_json::to_vec(object).map_err(|_| Error::MalformedMessage)?
            }
            UplinkPayload::Raw(data) => {
                BASE64.decode(data).map_err(|_| Error::MalformedMessage)?
            }
        };

        let envelope = ChannelMessage::new(thing, channel, payload);
        self.bus.publish(token, envelope).await
    }
}

/// Reject empty provisioning identifiers.
///
/// Identifiers are opaque beyond equality comparison, so emptiness is the
/// only shape checked here. The forwarding path never re-validates.
fn validate_identity(internal_id: &str, external_key: &str) -> Result<()> {
    if internal_id.is_empty() || external_key.is_empty() {
        return Err(Error::MalformedIdentity);
    }
    Ok(())
}
