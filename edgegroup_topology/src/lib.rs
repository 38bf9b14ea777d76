// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

//! Compiles the declarative configuration fragments of a group's functions
//! and devices into the two artifacts the provisioning service installs: a
//! de-duplicated, conflict-checked set of local resources and a complete
//! publish/subscribe routing table.
//!
//! Synthesis is a pure, single-pass transform. It performs no I/O, keeps no
//! state between calls and is safe to run concurrently with itself.

pub mod resource_set;
pub mod subscription_table;
pub mod topic_match;


use edgegroup_api::participant::{DeviceParticipant, FunctionParticipant, Participant};
use edgegroup_api::subscription::Subscription;

pub use resource_set::ValidatedResourceSet;

/// A problem that aborts synthesis. No partial topology is ever produced: the
/// provisioning service must never install a group with an inconsistent
/// resource or routing definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// One volume source path is declared with diverging destination paths or
    /// access modes. The operator has to reconcile the offending fragments.
    ResourceConflict {
        source_path: String,
        /// Every competing `destination (mode)` pair, in first-occurrence
        /// order.
        destinations: Vec<String>,
    },
    /// A route with identical source and target survived topic matching.
    /// Indicates a bug in the matcher, not bad configuration.
    SelfRoute { endpoint: String, subject: String },
}

impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::ResourceConflict { source_path, destinations } => {
                write!(
                    f,
                    "conflicting volume declarations for source path [{}]: it maps to [{}]",
                    source_path,
                    destinations.join(", ")
                )
            }
            Self::SelfRoute { endpoint, subject } => {
                write!(f, "subscription source and target are the same endpoint [{}] on topic [{}]", endpoint, subject)
            }
        }
    }
}

impl std::error::Error for TopologyError {}

/// The validated group definition handed to the provisioning service. A
/// complete replacement of the remote state, not a delta.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GroupTopology {
    pub resources: ValidatedResourceSet,
    pub subscriptions: Vec<Subscription>,
    /// Every device identity referenced through `connected_shadows`, without
    /// repetitions. The provisioning service materializes these device
    /// entries before installing the group.
    pub connected_shadow_devices: Vec<String>,
}

/// Compile the group topology from the configuration fragments of all
/// functions and devices.
///
/// Resource validation and routing are independent; the first error of either
/// fails the whole synthesis. Output ordering follows the declaration order
/// of the input, so identical input yields identical artifacts.
pub fn synthesize(functions: &[FunctionParticipant], devices: &[DeviceParticipant]) -> Result<GroupTopology, TopologyError> {
    let resources = resource_set::validate_resources(functions)?;
    let routes = topic_match::match_routes(functions, devices);
    let subscriptions = subscription_table::build_subscription_table(routes)?;

    log::info!(
        "synthesized group topology: {} subscriptions, {} volumes, {} devices, {} object-store, {} ml-model, {} secrets",
        subscriptions.len(),
        resources.volume_resources.len(),
        resources.device_resources.len(),
        resources.object_store_resources.len(),
        resources.ml_model_resources.len(),
        resources.secret_resources.len()
    );

    Ok(GroupTopology {
        resources,
        subscriptions,
        connected_shadow_devices: connected_shadow_devices(functions, devices),
    })
}

fn connected_shadow_devices(functions: &[FunctionParticipant], devices: &[DeviceParticipant]) -> Vec<String> {
    let mut shadow_devices: Vec<String> = Vec::new();
    let all_shadows = functions
        .iter()
        .flat_map(|function| function.connected_shadows().iter())
        .chain(devices.iter().flat_map(|device| device.connected_shadows().iter()));
    for shadow in all_shadows {
        if !shadow_devices.contains(shadow) {
            shadow_devices.push(shadow.clone());
        }
    }
    shadow_devices
}
