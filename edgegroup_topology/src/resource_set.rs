// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

use edgegroup_api::local_resource::{LocalDeviceResource, LocalVolumeResource, MlModelResource, ObjectStoreResource, SecretResource};
use edgegroup_api::participant::FunctionParticipant;

use crate::TopologyError;

/// The merged local-resource declarations of every function in the group,
/// de-duplicated and free of volume conflicts. Collection order follows the
/// first occurrence of each declaration across the input fragments.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize)]
pub struct ValidatedResourceSet {
    pub device_resources: Vec<LocalDeviceResource>,
    pub volume_resources: Vec<LocalVolumeResource>,
    pub object_store_resources: Vec<ObjectStoreResource>,
    pub ml_model_resources: Vec<MlModelResource>,
    pub secret_resources: Vec<SecretResource>,
}

/// Merge the resource declarations of all functions into one validated set.
///
/// Identical declarations collapse to one. Volumes are additionally grouped
/// by source path: one source path declared with diverging destination paths
/// or access modes is a fatal conflict. The converse is legal, two different
/// source paths may map to the same destination.
pub fn validate_resources(functions: &[FunctionParticipant]) -> Result<ValidatedResourceSet, TopologyError> {
    let volume_resources = dedup(functions.iter().flat_map(|function| function.volume_resources.iter().cloned()));
    disallow_diverging_volume_destinations(&volume_resources)?;

    Ok(ValidatedResourceSet {
        device_resources: dedup(functions.iter().flat_map(|function| function.device_resources.iter().cloned())),
        volume_resources,
        object_store_resources: dedup(functions.iter().flat_map(|function| function.object_store_resources.iter().cloned())),
        ml_model_resources: dedup(functions.iter().flat_map(|function| function.ml_model_resources.iter().cloned())),
        secret_resources: dedup(functions.iter().flat_map(|function| function.secret_resources.iter().cloned())),
    })
}

/// Structural dedup keeping the first occurrence of each value. Linear scan,
/// the merged declarations of a group are small.
fn dedup<T: PartialEq>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut unique: Vec<T> = Vec::new();
    for item in items {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

fn disallow_diverging_volume_destinations(volume_resources: &[LocalVolumeResource]) -> Result<(), TopologyError> {
    let mut source_paths: Vec<&String> = Vec::new();
    for volume in volume_resources {
        if !source_paths.contains(&&volume.source_path) {
            source_paths.push(&volume.source_path);
        }
    }

    for source_path in source_paths {
        let destinations = dedup(
            volume_resources
                .iter()
                .filter(|volume| &volume.source_path == source_path)
                .map(|volume| format!("{} ({})", volume.destination_path, if volume.read_write { "rw" } else { "ro" })),
        );

        if destinations.len() > 1 {
            log::error!(
                "conflicting volume declarations for source path [{}]: it maps to [{}]",
                source_path,
                destinations.join(", ")
            );
            return Err(TopologyError::ResourceConflict {
                source_path: source_path.clone(),
                destinations,
            });
        }
    }

    Ok(())
}
