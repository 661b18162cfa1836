//! Message types crossing the adapter.
//!
//! [`UplinkMessage`] mirrors the wire shape of an uplink event published by
//! the LoRa network server; [`ChannelMessage`] is the envelope handed to the
//! internal bus after identity translation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::wire;

/// One uplink received from the LoRa network server.
///
/// `object` carries the payload already decoded by a codec registered on the
/// network server; when it is absent, `data` holds the raw radio payload as
/// base64. Field names follow the network server's JSON event format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UplinkMessage {
    /// Device EUI, the external key into the thing route map.
    #[serde(rename = "devEUI")]
    pub device_eui: String,

    /// Application ID, the external key into the channel route map.
    #[serde(rename = "applicationID")]
    pub application_id: String,

    /// Base64-encoded raw payload. Ignored when `object` is present.
    #[serde(default)]
    pub data: String,

    /// Structured payload produced by the network server's codec, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<Value>,
}

impl UplinkMessage {
    /// View the message payload as a tagged variant.
    ///
    /// A present `object` always wins over `data`; the raw base64 is never
    /// inspected in that case.
    pub fn payload(&self) -> UplinkPayload<'_> {
        match &self.object {
            Some(object) => UplinkPayload::Structured(object),
            None => UplinkPayload::Raw(&self.data),
        }
    }
}

/// Payload of an uplink, after applying the "decoded object wins" rule.
#[derive(Debug, Clone, PartialEq)]
pub enum UplinkPayload<'a> {
    /// Payload decoded upstream by the network server's codec.
    Structured(&'a Value),
    /// Raw radio payload, still base64-encoded.
    Raw(&'a str),
}

/// Envelope published on the internal bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Resolved thing identity of the originating device.
    pub publisher: String,

    /// Resolved channel identity of the device's application.
    pub channel: String,

    /// Origin transport tag, always [`wire::PROTOCOL`].
    pub protocol: String,

    /// Payload media type, always [`wire::CONTENT_TYPE`].
    pub content_type: String,

    /// Translated payload bytes.
    pub payload: Vec<u8>,

    /// Time of translation. The original device transmission time is not
    /// preserved.
    pub created: DateTime<Utc>,
}

impl ChannelMessage {
    /// Build an envelope stamped with the wire constants and the current time.
    pub fn new(publisher: String, channel: String, payload: Vec<u8>) -> Self {
        Self {
            publisher,
            channel,
            protocol: wire::PROTOCOL.to_string(),
            content_type: wire::CONTENT_TYPE.to_string(),
            payload,
            created: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uplink_wire_field_names() {
        let json = r#"{
            "devEUI": "AA:BB",
            "applicationID": "app1",
            "data": "aGVsbG8="
        }"#;

        let msg: UplinkMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.device_eui, "AA:BB");
        assert_eq!(msg.application_id, "app1");
        assert_eq!(msg.data, "aGVsbG8=");
        assert!(msg.object.is_none());
    }

    #[test]
    fn test_payload_object_wins() {
        let msg = UplinkMessage {
            device_eui: "AA:BB".to_string(),
            application_id: "app1".to_string(),
            data: "!!!not-base64!!!".to_string(),
            object: Some(serde_json::json!({"temperature": 21.5})),
        };

        match msg.payload() {
            UplinkPayload::Structured(v) => assert_eq!(v["temperature"], 21.5),
            UplinkPayload::Raw(_) => panic!("object must win over data"),
        }
    }

    #[test]
    fn test_payload_raw_when_object_absent() {
        let msg = UplinkMessage {
            device_eui: "AA:BB".to_string(),
            application_id: "app1".to_string(),
            data: "aGVsbG8=".to_string(),
            object: None,
        };

        assert_eq!(msg.payload(), UplinkPayload::Raw("aGVsbG8="));
    }

    #[test]
    fn test_channel_message_constants() {
        let msg = ChannelMessage::new("t1".to_string(), "c1".to_string(), b"hello".to_vec());
        assert_eq!(msg.protocol, "lora");
        assert_eq!(msg.content_type, "application/json");
        assert_eq!(msg.payload, b"hello");
    }
}
