// ── Typed request structs for Command payloads ──

use serde::{Deserialize, Serialize};

use crate::model::{EntityId, ServiceStatus};

// ── Services ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,
}

/// Partial service update. `group: Some(None)` detaches the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Option<EntityId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,
}

impl UpdateServiceRequest {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// ── Groups ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub services: Vec<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<EntityId>>,
}

impl UpdateGroupRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.services.is_none()
    }
}

// ── Timeline ───────────────────────────────────────────────────────

/// A new timeline entry for an incident or maintenance event.
///
/// `author` falls back to the configured author, then to the signed-in
/// user's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendUpdateRequest<S> {
    pub message: String,
    pub status: S,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}
