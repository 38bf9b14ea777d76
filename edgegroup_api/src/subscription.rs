// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT

use crate::endpoint::Endpoint;

/// One routing entry of the installed group definition: `source` publishes on
/// `subject`, `target` receives. No two entries of a table share the same
/// (source, subject, target) and no entry routes an endpoint to itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Subscription {
    /// Unique within the table, stable across repeated synthesis runs on
    /// identical input.
    pub id: uuid::Uuid,
    pub source: Endpoint,
    pub subject: String,
    pub target: Endpoint,
}

impl std::fmt::Display for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}] to [{}] on topic [{}]", self.source, self.target, self.subject)
    }
}
