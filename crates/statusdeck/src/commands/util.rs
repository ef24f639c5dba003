//! Shared helpers for command handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use statusdeck_core::{
    ConsistencyWarning, Controller, EntityId, Incident, IncidentStatus, MaintenanceEvent,
    MaintenanceStatus, Service, ServiceGroup, ServiceStatus, Severity,
};

use crate::cli::{IncidentStatusArg, ListArgs, MaintenanceStatusArg, ServiceStatusArg, SeverityArg};
use crate::error::CliError;

// ── Identifier resolution ───────────────────────────────────────────

/// Resolve a service by id, or by name (case-insensitive) from the snapshot.
pub fn resolve_service(controller: &Controller, ident: &str) -> Result<Arc<Service>, CliError> {
    if let Some(service) = controller.store().service_by_id(&EntityId::from(ident)) {
        return Ok(service);
    }
    controller
        .services_snapshot()
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(ident))
        .cloned()
        .ok_or_else(|| CliError::not_found("service", ident))
}

pub fn resolve_service_ids(
    controller: &Controller,
    idents: &[String],
) -> Result<Vec<EntityId>, CliError> {
    idents
        .iter()
        .map(|i| resolve_service(controller, i).map(|s| s.id.clone()))
        .collect()
}

/// Resolve a group by id, or by name (case-insensitive) from the snapshot.
pub fn resolve_group(controller: &Controller, ident: &str) -> Result<Arc<ServiceGroup>, CliError> {
    if let Some(group) = controller.store().group_by_id(&EntityId::from(ident)) {
        return Ok(group);
    }
    controller
        .groups_snapshot()
        .iter()
        .find(|g| g.name.eq_ignore_ascii_case(ident))
        .cloned()
        .ok_or_else(|| CliError::not_found("group", ident))
}

pub fn find_incident(controller: &Controller, id: &str) -> Result<Arc<Incident>, CliError> {
    controller
        .store()
        .incident_by_id(&EntityId::from(id))
        .ok_or_else(|| CliError::not_found("incident", id))
}

pub fn find_maintenance(
    controller: &Controller,
    id: &str,
) -> Result<Arc<MaintenanceEvent>, CliError> {
    controller
        .store()
        .maintenance_by_id(&EntityId::from(id))
        .ok_or_else(|| CliError::not_found("maintenance", id))
}

/// Names of the given services, falling back to the raw id for unknown ones.
pub fn service_names(controller: &Controller, ids: &[EntityId]) -> String {
    if ids.is_empty() {
        return "-".into();
    }
    ids.iter()
        .map(|id| {
            controller
                .store()
                .service_by_id(id)
                .map_or_else(|| id.to_string(), |s| s.name.clone())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Lists ───────────────────────────────────────────────────────────

/// Apply `--filter` (substring on `name_fn`) and `--limit`.
pub fn apply_list_args<T>(
    items: impl IntoIterator<Item = T>,
    args: &ListArgs,
    name_fn: impl Fn(&T) -> &str,
) -> Vec<T> {
    let needle = args.filter.as_deref().map(str::to_lowercase);
    items
        .into_iter()
        .filter(|item| {
            needle
                .as_deref()
                .is_none_or(|n| name_fn(item).to_lowercase().contains(n))
        })
        .take(args.limit.unwrap_or(usize::MAX))
        .collect()
}

// ── Parsing ─────────────────────────────────────────────────────────

pub fn parse_time(field: &str, value: &str) -> Result<DateTime<Utc>, CliError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| CliError::Validation {
            field: field.into(),
            reason: format!("expected an RFC 3339 timestamp like 2026-11-01T02:00:00Z ({e})"),
        })
}

pub fn format_time(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M UTC").to_string()
}

// ── Interaction ─────────────────────────────────────────────────────

/// Ask for confirmation, auto-approving with `--yes`.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}

/// Report a consistency warning on stderr. Shown even with `--quiet`.
pub fn report_warning(warning: Option<&ConsistencyWarning>) {
    if let Some(w) = warning {
        eprintln!("warning: {w}");
    }
}

// ── Value enum conversions ──────────────────────────────────────────

impl From<ServiceStatusArg> for ServiceStatus {
    fn from(arg: ServiceStatusArg) -> Self {
        match arg {
            ServiceStatusArg::Operational => Self::Operational,
            ServiceStatusArg::Maintenance => Self::Maintenance,
            ServiceStatusArg::DegradedPerformance => Self::DegradedPerformance,
            ServiceStatusArg::PartialOutage => Self::PartialOutage,
            ServiceStatusArg::MajorOutage => Self::MajorOutage,
        }
    }
}

impl From<IncidentStatusArg> for IncidentStatus {
    fn from(arg: IncidentStatusArg) -> Self {
        match arg {
            IncidentStatusArg::Investigating => Self::Investigating,
            IncidentStatusArg::Identified => Self::Identified,
            IncidentStatusArg::Monitoring => Self::Monitoring,
            IncidentStatusArg::Resolved => Self::Resolved,
        }
    }
}

impl From<MaintenanceStatusArg> for MaintenanceStatus {
    fn from(arg: MaintenanceStatusArg) -> Self {
        match arg {
            MaintenanceStatusArg::Scheduled => Self::Scheduled,
            MaintenanceStatusArg::InProgress => Self::InProgress,
            MaintenanceStatusArg::Completed => Self::Completed,
            MaintenanceStatusArg::Cancelled => Self::Cancelled,
        }
    }
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Minor => Self::Minor,
            SeverityArg::Major => Self::Major,
            SeverityArg::Critical => Self::Critical,
        }
    }
}
