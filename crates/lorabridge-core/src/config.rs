//! Wire-contract constants and runtime defaults.
//!
//! The constants in [`wire`] form the implicit contract with internal bus
//! consumers and must not change without coordinating downstream.

/// Constants stamped on every outbound envelope.
pub mod wire {
    /// Origin transport tag for messages translated from LoRaWAN.
    pub const PROTOCOL: &str = "lora";

    /// Media type of the translated payload.
    pub const CONTENT_TYPE: &str = "application/json";
}

/// Runtime defaults.
pub mod defaults {
    /// Default buffer capacity of the in-process bus, per subscriber.
    pub const BUS_CAPACITY: usize = 1000;
}

/// Environment variable names and accessors.
pub mod env_vars {
    use super::defaults;

    pub const BUS_CAPACITY: &str = "LORABRIDGE_BUS_CAPACITY";

    /// Bus capacity from the environment, or the default.
    pub fn bus_capacity() -> usize {
        parse_bus_capacity(std::env::var(BUS_CAPACITY).ok())
    }

    fn parse_bus_capacity(raw: Option<String>) -> usize {
        raw.and_then(|s| s.parse().ok())
            .unwrap_or(defaults::BUS_CAPACITY)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_constants() {
        assert_eq!(wire::PROTOCOL, "lora");
        assert_eq!(wire::CONTENT_TYPE, "application/json");
    }
}
