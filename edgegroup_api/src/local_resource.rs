// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

//! Local resource declarations, as authored in per-function configuration
//! fragments. Structural equality on these types drives deduplication when
//! the declarations of all functions are merged into one group definition.

/// A host device node made available inside a function's sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LocalDeviceResource {
    pub name: String,
    pub path: String,
    pub read_write: bool,
}

/// A host directory or file mounted at a path inside a function's sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct LocalVolumeResource {
    pub name: String,
    pub source_path: String,
    pub destination_path: String,
    pub read_write: bool,
}

/// An object-store object mapped to a local path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ObjectStoreResource {
    pub name: String,
    pub uri: String,
    pub path: String,
}

/// A machine-learning model artifact mapped to a local path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct MlModelResource {
    pub name: String,
    pub model_reference: String,
    pub path: String,
}

/// A secret mapped into a function by reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SecretResource {
    pub resource_name: String,
    pub secret_reference: String,
    pub secret_name: String,
}
