//! Consortium and environment records.
//!
//! The same types serve two roles: local fixtures that feed the
//! configuration renderer (identifier absent) and remote records decoded
//! from the Kaleido API during verification (identifier present). Field
//! names follow the API's JSON representation, so `id` maps to `_id`.

use serde::{Deserialize, Serialize};

/// A governance grouping that owns one or more environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consortium {
    /// Remote identifier, absent on fixtures that have not been applied.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Governance mode, e.g. `single-org`.
    pub mode: String,
}

impl Consortium {
    /// Creates a consortium fixture with no remote identifier.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        mode: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            mode: mode.into(),
        }
    }
}

/// A provisioned blockchain network instance belonging to a consortium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Remote identifier, absent on fixtures that have not been applied.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Engine type, e.g. `quorum`. The API calls this field `provider`.
    pub provider: String,
    /// Consensus algorithm, e.g. `raft`.
    pub consensus_type: String,
    /// Optional pinned release applied at creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_id: Option<String>,
    /// Lifecycle state reported by the API, e.g. `live`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl Environment {
    /// Creates an environment fixture with no remote identifier and no
    /// release pin.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        env_type: impl Into<String>,
        consensus_type: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            provider: env_type.into(),
            consensus_type: consensus_type.into(),
            release_id: None,
            state: None,
        }
    }

    /// Pins the environment to a fixed release.
    #[must_use]
    pub fn with_release(mut self, release_id: impl Into<String>) -> Self {
        self.release_id = Some(release_id.into());
        self
    }
}
