// Wire types for the status-page REST API
//
// Canonical field names are camelCase. Legacy names still produced by older
// backends are accepted through `#[serde(alias)]` here and nowhere else.
// Status values stay as strings at this layer; `statusdeck-core` parses
// them into its enums and rejects anything unknown.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::User;

/// Success envelope wrapping every non-empty response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub user: User,
}

// ── Services ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default, alias = "groupId")]
    pub group: Option<String>,
    #[serde(default)]
    pub uptime: Option<f64>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    pub name: String,
    pub description: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,
}

/// Partial update. `group: Some(None)` serializes as `null` and detaches
/// the service from its group.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime: Option<f64>,
}

// ── Service groups ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceGroupResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateServiceGroupRequest {
    pub name: String,
    pub services: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateServiceGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
}

// ── Incidents & maintenance ──────────────────────────────────────────

/// One entry of an event's update timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub message: String,
    pub status: String,
    #[serde(alias = "user")]
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Incident or maintenance event. Maintenance carries the scheduled
/// window; incidents carry a severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub affected_services: Vec<String>,
    #[serde(default, alias = "scheduledStartDate")]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(default, alias = "scheduledEndDate")]
    pub scheduled_end: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub updates: Vec<UpdateResponse>,
}

pub type IncidentResponse = EventResponse;
pub type MaintenanceResponse = EventResponse;

/// First timeline entry, written together with the event.
#[derive(Debug, Clone, Serialize)]
pub struct InitialUpdate {
    pub message: String,
    pub status: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    pub affected_services: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end: Option<DateTime<Utc>>,
    pub initial_update: InitialUpdate,
}

/// Descriptive edit. Status is deliberately absent: it only moves
/// through appended updates.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppendUpdateRequest {
    pub message: String,
    pub status: String,
    pub author: String,
}
