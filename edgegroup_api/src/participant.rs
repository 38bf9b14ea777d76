// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

use crate::endpoint::Endpoint;
use crate::local_resource::{LocalDeviceResource, LocalVolumeResource, MlModelResource, ObjectStoreResource, SecretResource};

/// Anything that can publish and subscribe within the group: a deployed
/// function or a local device. The topology synthesizer treats both kinds
/// uniformly through this trait.
pub trait Participant {
    fn endpoint(&self) -> Endpoint;
    /// Topics this participant subscribes to locally.
    fn input_topics(&self) -> &[String];
    /// Topics this participant publishes to locally.
    fn output_topics(&self) -> &[String];
    /// Topics routed from the cloud to this participant.
    fn from_cloud_subscriptions(&self) -> &[String];
    /// Topics routed from this participant to the cloud.
    fn to_cloud_subscriptions(&self) -> &[String];
    /// Identities of the devices whose shadow this participant may read and
    /// write.
    fn connected_shadows(&self) -> &[String];
}

/// One deployable function unit, as declared in its configuration fragment.
/// Constructed once by the configuration loader and immutable for the
/// duration of a synthesis call.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FunctionParticipant {
    /// The deployed-function reference, unique within the group.
    pub function_reference: String,
    #[serde(default)]
    pub input_topics: Vec<String>,
    #[serde(default)]
    pub output_topics: Vec<String>,
    #[serde(default)]
    pub from_cloud_subscriptions: Vec<String>,
    #[serde(default)]
    pub to_cloud_subscriptions: Vec<String>,
    #[serde(default)]
    pub connected_shadows: Vec<String>,
    #[serde(default)]
    pub device_resources: Vec<LocalDeviceResource>,
    #[serde(default)]
    pub volume_resources: Vec<LocalVolumeResource>,
    #[serde(default)]
    pub object_store_resources: Vec<ObjectStoreResource>,
    #[serde(default)]
    pub ml_model_resources: Vec<MlModelResource>,
    #[serde(default)]
    pub secret_resources: Vec<SecretResource>,
}

impl FunctionParticipant {
    /// Check the fragment for problems the synthesizer will not catch.
    /// Intended for the configuration loader; the synthesizer itself passes
    /// topic strings through as opaque literals.
    pub fn is_valid(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.function_reference.is_empty(), "empty function reference");
        validate_topic_sets(&[
            &self.input_topics,
            &self.output_topics,
            &self.from_cloud_subscriptions,
            &self.to_cloud_subscriptions,
        ])?;
        anyhow::ensure!(
            !self.connected_shadows.iter().any(|shadow| shadow.is_empty()),
            "empty device identity in connected shadows of function [{}]",
            self.function_reference
        );
        Ok(())
    }
}

impl Participant for FunctionParticipant {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Function(self.function_reference.clone())
    }
    fn input_topics(&self) -> &[String] {
        &self.input_topics
    }
    fn output_topics(&self) -> &[String] {
        &self.output_topics
    }
    fn from_cloud_subscriptions(&self) -> &[String] {
        &self.from_cloud_subscriptions
    }
    fn to_cloud_subscriptions(&self) -> &[String] {
        &self.to_cloud_subscriptions
    }
    fn connected_shadows(&self) -> &[String] {
        &self.connected_shadows
    }
}

/// One local, non-function device participating in the group's pub/sub
/// topology. Same topic surface as a function, no local resources.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceParticipant {
    /// The thing identity of the device, unique within the group.
    pub thing_name: String,
    #[serde(default)]
    pub input_topics: Vec<String>,
    #[serde(default)]
    pub output_topics: Vec<String>,
    #[serde(default)]
    pub from_cloud_subscriptions: Vec<String>,
    #[serde(default)]
    pub to_cloud_subscriptions: Vec<String>,
    #[serde(default)]
    pub connected_shadows: Vec<String>,
}

impl DeviceParticipant {
    pub fn is_valid(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.thing_name.is_empty(), "empty thing name");
        validate_topic_sets(&[
            &self.input_topics,
            &self.output_topics,
            &self.from_cloud_subscriptions,
            &self.to_cloud_subscriptions,
        ])?;
        anyhow::ensure!(
            !self.connected_shadows.iter().any(|shadow| shadow.is_empty()),
            "empty device identity in connected shadows of device [{}]",
            self.thing_name
        );
        Ok(())
    }
}

impl Participant for DeviceParticipant {
    fn endpoint(&self) -> Endpoint {
        Endpoint::Device(self.thing_name.clone())
    }
    fn input_topics(&self) -> &[String] {
        &self.input_topics
    }
    fn output_topics(&self) -> &[String] {
        &self.output_topics
    }
    fn from_cloud_subscriptions(&self) -> &[String] {
        &self.from_cloud_subscriptions
    }
    fn to_cloud_subscriptions(&self) -> &[String] {
        &self.to_cloud_subscriptions
    }
    fn connected_shadows(&self) -> &[String] {
        &self.connected_shadows
    }
}

fn validate_topic_sets(topic_sets: &[&Vec<String>]) -> anyhow::Result<()> {
    anyhow::ensure!(
        !topic_sets.iter().any(|topics| topics.iter().any(|topic| topic.is_empty())),
        "empty topic string"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_fragment_from_json() {
        let fragment = r##"{
            "function_reference": "arn:function:hello-world:1",
            "input_topics": ["sensor/raw"],
            "output_topics": ["sensor/processed"],
            "to_cloud_subscriptions": ["telemetry/out"],
            "connected_shadows": ["sensor-1"],
            "volume_resources": [
                {"name": "scratch", "source_path": "/tmp", "destination_path": "/tmp", "read_write": true}
            ]
        }"##;

        let function: FunctionParticipant = serde_json::from_str(fragment).unwrap();
        assert_eq!("arn:function:hello-world:1", function.function_reference);
        assert_eq!(vec!["sensor/raw".to_string()], function.input_topics);
        assert!(function.from_cloud_subscriptions.is_empty());
        assert_eq!(1, function.volume_resources.len());
        assert!(function.device_resources.is_empty());
        assert!(function.is_valid().is_ok());
    }

    #[test]
    fn test_fragment_validation() {
        let mut function = FunctionParticipant {
            function_reference: "arn:function:hello-world:1".to_string(),
            input_topics: vec![],
            output_topics: vec![],
            from_cloud_subscriptions: vec![],
            to_cloud_subscriptions: vec![],
            connected_shadows: vec![],
            device_resources: vec![],
            volume_resources: vec![],
            object_store_resources: vec![],
            ml_model_resources: vec![],
            secret_resources: vec![],
        };
        assert!(function.is_valid().is_ok());

        function.output_topics = vec!["".to_string()];
        assert!(function.is_valid().is_err());

        let device = DeviceParticipant {
            thing_name: "".to_string(),
            input_topics: vec![],
            output_topics: vec![],
            from_cloud_subscriptions: vec![],
            to_cloud_subscriptions: vec![],
            connected_shadows: vec![],
        };
        assert!(device.is_valid().is_err());
    }
}
