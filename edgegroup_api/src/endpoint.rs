// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

/// Identity of the cloud pseudo-endpoint, as the provisioning service expects
/// it on the wire.
pub const CLOUD_ENDPOINT: &str = "cloud";

/// Identity of the local shadow service that fronts every device shadow.
pub const SHADOW_SERVICE: &str = "GGShadowService";

/// One addressable end of a routing entry: a deployed function, a local
/// device, the cloud message broker, or the shadow of a local device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Endpoint {
    /// A deployed function, addressed by its deployed-function reference.
    Function(String),
    /// A local non-function device, addressed by its thing identity.
    Device(String),
    /// The well-known cloud pseudo-endpoint.
    Cloud,
    /// The shadow pseudo-endpoint of the named device. All shadows are fronted
    /// by the single shadow service on the wire; the subject of a shadow
    /// subscription carries the device identity.
    Shadow(String),
}

impl Endpoint {
    /// The topic filter covering all shadow traffic of the given device.
    pub fn shadow_topic_filter(device: &str) -> String {
        format!("$aws/things/{}/shadow/#", device)
    }

    /// The identity string used for this endpoint in the installed group
    /// definition.
    pub fn wire_identity(&self) -> &str {
        match self {
            Self::Function(reference) => reference,
            Self::Device(thing_name) => thing_name,
            Self::Cloud => CLOUD_ENDPOINT,
            Self::Shadow(_) => SHADOW_SERVICE,
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.wire_identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_identities() {
        assert_eq!("cloud", Endpoint::Cloud.wire_identity());
        assert_eq!("GGShadowService", Endpoint::Shadow("sensor-1".to_string()).wire_identity());
        assert_eq!("my-function", Endpoint::Function("my-function".to_string()).wire_identity());
        assert_eq!("my-thing", Endpoint::Device("my-thing".to_string()).wire_identity());
    }

    #[test]
    fn test_shadow_topic_filter() {
        assert_eq!("$aws/things/sensor-1/shadow/#", Endpoint::shadow_topic_filter("sensor-1"));
    }
}
