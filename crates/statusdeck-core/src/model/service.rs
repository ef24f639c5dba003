// ── Services and service groups ──

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, ServiceStatus, ValidationError};

/// Uptime percentage, guaranteed to lie in `0.0..=100.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Uptime(f64);

impl Uptime {
    pub fn new(percent: f64) -> Result<Self, ValidationError> {
        if (0.0..=100.0).contains(&percent) {
            Ok(Self(percent))
        } else {
            Err(ValidationError::UptimeOutOfRange { value: percent })
        }
    }

    pub fn percent(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Uptime {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Uptime> for f64 {
    fn from(u: Uptime) -> Self {
        u.0
    }
}

impl fmt::Display for Uptime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

/// A monitored unit surfaced on the status page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    pub status: ServiceStatus,
    /// Owning group, when the backend records membership on the service.
    pub group: Option<EntityId>,
    pub uptime: Option<Uptime>,
    /// Last change, when the backend reports one.
    pub last_updated: Option<DateTime<Utc>>,
}

/// A named set of services. Member order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceGroup {
    pub id: EntityId,
    pub name: String,
    pub services: Vec<EntityId>,
}

impl ServiceGroup {
    pub fn contains(&self, service: &EntityId) -> bool {
        self.services.contains(service)
    }
}
