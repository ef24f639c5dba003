// ── API-to-domain type conversions ──
//
// Bridges `statusdeck_api` wire types into `statusdeck_core::model` and
// back. Inbound conversions are strict: an unknown status or severity is
// an error, not a default. Legacy spellings are absorbed by the wire
// types and `ServiceStatus`, never here.

use chrono::{DateTime, Utc};
use tracing::warn;

use statusdeck_api::rest::models::{
    AppendUpdateRequest as WireAppend, CreateEventRequest, CreateServiceGroupRequest,
    CreateServiceRequest as WireCreateService, EditEventRequest, EventResponse, InitialUpdate,
    ServiceGroupResponse, ServiceResponse, UpdateResponse,
    UpdateServiceGroupRequest as WireUpdateGroup, UpdateServiceRequest as WireUpdateService,
};

use crate::command::requests::{
    CreateGroupRequest, CreateServiceRequest, UpdateGroupRequest, UpdateServiceRequest,
};
use crate::error::CoreError;
use crate::model::{
    EntityId, EventEdit, EventHeader, EventStatus, MaintenanceWindow, NewEvent, Service,
    ServiceGroup, ServiceStatus, Severity, StatusEvent, Update, UpdateDraft, Uptime,
};

/// Author recorded on a synthesized first update when the backend sent
/// an event without any timeline.
pub const SYSTEM_AUTHOR: &str = "System Administrator";

// ── Helpers ────────────────────────────────────────────────────────

fn invalid(message: impl Into<String>) -> CoreError {
    CoreError::InvalidData {
        message: message.into(),
    }
}

fn parse_event_status<S: EventStatus>(raw: &str) -> Result<S, CoreError> {
    raw.parse()
        .map_err(|_| invalid(format!("unknown {} status: {raw}", S::KIND)))
}

fn parse_severity(raw: Option<&str>) -> Result<Severity, CoreError> {
    match raw {
        None => Ok(Severity::default()),
        Some(s) => s
            .parse()
            .map_err(|_| invalid(format!("unknown severity: {s}"))),
    }
}

fn ids_to_strings(ids: &[EntityId]) -> Vec<String> {
    ids.iter().map(ToString::to_string).collect()
}

// ── Service ────────────────────────────────────────────────────────

impl TryFrom<ServiceResponse> for Service {
    type Error = CoreError;

    fn try_from(raw: ServiceResponse) -> Result<Self, Self::Error> {
        let status: ServiceStatus = raw
            .status
            .parse()
            .map_err(|_| invalid(format!("unknown service status: {}", raw.status)))?;
        let uptime = raw.uptime.map(Uptime::new).transpose()?;

        Ok(Service {
            id: EntityId::from(raw.id),
            name: raw.name,
            description: raw.description,
            status,
            group: raw.group.filter(|g| !g.is_empty()).map(EntityId::from),
            uptime,
            last_updated: raw.last_updated,
        })
    }
}

impl From<ServiceGroupResponse> for ServiceGroup {
    fn from(raw: ServiceGroupResponse) -> Self {
        ServiceGroup {
            id: EntityId::from(raw.id),
            name: raw.name,
            services: raw.services.into_iter().map(EntityId::from).collect(),
        }
    }
}

// ── Timeline ───────────────────────────────────────────────────────

fn convert_update<S: EventStatus>(raw: UpdateResponse) -> Result<Update<S>, CoreError> {
    Ok(Update {
        id: EntityId::from(raw.id),
        status: parse_event_status(&raw.status)?,
        message: raw.message,
        author: raw.author,
        created_at: raw.created_at,
    })
}

fn convert_window<S: EventStatus>(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<Option<MaintenanceWindow>, CoreError> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some(MaintenanceWindow::new(start, end)?)),
        _ if S::REQUIRES_WINDOW => Err(invalid(format!(
            "{} is missing its scheduled window",
            S::KIND
        ))),
        _ => Ok(None),
    }
}

impl<S: EventStatus> TryFrom<EventResponse> for StatusEvent<S> {
    type Error = CoreError;

    fn try_from(raw: EventResponse) -> Result<Self, Self::Error> {
        let wire_status: S = parse_event_status(&raw.status)?;
        let window = convert_window::<S>(raw.scheduled_start, raw.scheduled_end)?;
        let severity = parse_severity(raw.severity.as_deref())?;

        let mut updates = raw
            .updates
            .into_iter()
            .map(convert_update::<S>)
            .collect::<Result<Vec<_>, _>>()?;

        if updates.is_empty() {
            updates.push(Update {
                id: EntityId::generate("upd"),
                message: raw.description.clone(),
                status: wire_status,
                author: SYSTEM_AUTHOR.to_owned(),
                created_at: raw.created_at,
            });
        }

        if let Some(last) = updates.last().filter(|u| u.status != wire_status) {
            warn!(
                kind = S::KIND,
                id = %raw.id,
                stored = %wire_status,
                timeline = %last.status,
                "event status disagrees with its timeline; using the timeline"
            );
        }

        let header = EventHeader {
            id: EntityId::from(raw.id),
            title: raw.title,
            description: raw.description,
            severity,
            affected_services: raw.affected_services.into_iter().map(EntityId::from).collect(),
            window,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        };

        StatusEvent::from_log(header, updates)
            .ok_or_else(|| invalid(format!("{} has an empty timeline", S::KIND)))
    }
}

// ── Domain → wire request bodies ───────────────────────────────────

pub(crate) fn create_service_body(req: &CreateServiceRequest) -> WireCreateService {
    WireCreateService {
        name: req.name.clone(),
        description: req.description.clone(),
        status: req.status.to_string(),
        group: req.group.as_ref().map(ToString::to_string),
        uptime: req.uptime,
    }
}

pub(crate) fn update_service_body(req: &UpdateServiceRequest) -> WireUpdateService {
    WireUpdateService {
        name: req.name.clone(),
        description: req.description.clone(),
        status: req.status.map(|s| s.to_string()),
        group: req
            .group
            .as_ref()
            .map(|g| g.as_ref().map(ToString::to_string)),
        uptime: req.uptime,
    }
}

pub(crate) fn create_group_body(req: &CreateGroupRequest) -> CreateServiceGroupRequest {
    CreateServiceGroupRequest {
        name: req.name.clone(),
        services: ids_to_strings(&req.services),
    }
}

pub(crate) fn update_group_body(req: &UpdateGroupRequest) -> WireUpdateGroup {
    WireUpdateGroup {
        name: req.name.clone(),
        services: req.services.as_deref().map(ids_to_strings),
    }
}

pub(crate) fn create_event_body<S: EventStatus>(new: &NewEvent<S>, author: &str) -> CreateEventRequest {
    let status = new.status.to_string();
    CreateEventRequest {
        title: new.title.clone(),
        description: new.description.clone(),
        status: status.clone(),
        severity: Some(new.severity.to_string()),
        affected_services: ids_to_strings(&new.affected_services),
        scheduled_start: new.window.map(|w| w.scheduled_start),
        scheduled_end: new.window.map(|w| w.scheduled_end),
        initial_update: InitialUpdate {
            message: new.description.clone(),
            status,
            author: author.to_owned(),
        },
    }
}

pub(crate) fn edit_event_body(edit: &EventEdit) -> EditEventRequest {
    EditEventRequest {
        title: edit.title.clone(),
        description: edit.description.clone(),
        severity: edit.severity.map(|s| s.to_string()),
        affected_services: edit.affected_services.as_deref().map(ids_to_strings),
        scheduled_start: edit.window.map(|w| w.scheduled_start),
        scheduled_end: edit.window.map(|w| w.scheduled_end),
    }
}

pub(crate) fn append_update_body<S: EventStatus>(draft: &UpdateDraft<S>) -> WireAppend {
    WireAppend {
        message: draft.message.clone(),
        status: draft.status.to_string(),
        author: draft.author.clone(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Incident, IncidentStatus, MaintenanceEvent, MaintenanceStatus};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 1, hour, 0, 0).unwrap()
    }

    fn wire_update(id: &str, status: &str, hour: u32) -> UpdateResponse {
        UpdateResponse {
            id: id.into(),
            message: format!("{status} note"),
            status: status.into(),
            author: "ops".into(),
            created_at: at(hour),
        }
    }

    fn wire_event(status: &str, updates: Vec<UpdateResponse>) -> EventResponse {
        EventResponse {
            id: "inc_1".into(),
            title: "API errors".into(),
            description: "Elevated 5xx".into(),
            status: status.into(),
            severity: Some("major".into()),
            affected_services: vec!["srv_1".into()],
            scheduled_start: None,
            scheduled_end: None,
            created_at: at(1),
            updated_at: at(1),
            updates,
        }
    }

    #[test]
    fn service_legacy_status_is_normalized() {
        let raw = ServiceResponse {
            id: "srv_1".into(),
            name: "API".into(),
            description: String::new(),
            status: "degraded".into(),
            group: Some(String::new()),
            uptime: Some(99.9),
            last_updated: None,
        };
        let svc = Service::try_from(raw).unwrap();
        assert_eq!(svc.status, ServiceStatus::DegradedPerformance);
        assert_eq!(svc.group, None);
        assert!((svc.uptime.unwrap().percent() - 99.9).abs() < f64::EPSILON);
    }

    #[test]
    fn service_unknown_status_is_rejected() {
        let raw = ServiceResponse {
            id: "srv_1".into(),
            name: "API".into(),
            description: String::new(),
            status: "on_fire".into(),
            group: None,
            uptime: None,
            last_updated: None,
        };
        assert!(matches!(
            Service::try_from(raw),
            Err(CoreError::InvalidData { .. })
        ));
    }

    #[test]
    fn service_uptime_out_of_range_is_rejected() {
        let raw = ServiceResponse {
            id: "srv_1".into(),
            name: "API".into(),
            description: String::new(),
            status: "operational".into(),
            group: None,
            uptime: Some(140.0),
            last_updated: None,
        };
        assert!(matches!(
            Service::try_from(raw),
            Err(CoreError::ValidationFailed(_))
        ));
    }

    #[test]
    fn incident_status_follows_last_update() {
        let raw = wire_event(
            "investigating",
            vec![
                wire_update("u1", "investigating", 2),
                wire_update("u2", "resolved", 3),
            ],
        );
        let incident = Incident::try_from(raw).unwrap();
        assert_eq!(incident.status(), IncidentStatus::Resolved);
        assert_eq!(incident.updated_at(), at(3));
        assert_eq!(incident.severity, Severity::Major);
    }

    #[test]
    fn timeline_keeps_append_order_over_timestamps() {
        // u2 was appended last but carries an earlier clock reading.
        let raw = wire_event(
            "resolved",
            vec![
                wire_update("u1", "investigating", 3),
                wire_update("u2", "resolved", 2),
            ],
        );
        let incident = Incident::try_from(raw).unwrap();
        let ids: Vec<_> = incident.updates().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["u1", "u2"]);
        assert_eq!(incident.status(), IncidentStatus::Resolved);
        assert_eq!(incident.current_status(), IncidentStatus::Resolved);
        assert!(!incident.is_active());
    }

    #[test]
    fn missing_last_updated_stays_unknown() {
        let raw = ServiceResponse {
            id: "srv_1".into(),
            name: "API".into(),
            description: String::new(),
            status: "operational".into(),
            group: None,
            uptime: None,
            last_updated: None,
        };
        assert_eq!(Service::try_from(raw).unwrap().last_updated, None);
    }

    #[test]
    fn empty_timeline_gets_system_update() {
        let incident = Incident::try_from(wire_event("identified", vec![])).unwrap();
        let first = &incident.updates()[0];
        assert_eq!(incident.updates().len(), 1);
        assert_eq!(first.author, SYSTEM_AUTHOR);
        assert_eq!(first.status, IncidentStatus::Identified);
        assert_eq!(first.message, "Elevated 5xx");
    }

    #[test]
    fn maintenance_without_window_is_rejected() {
        let raw = wire_event("scheduled", vec![]);
        assert!(matches!(
            MaintenanceEvent::try_from(raw),
            Err(CoreError::InvalidData { .. })
        ));
    }

    #[test]
    fn maintenance_with_window_converts() {
        let mut raw = wire_event("scheduled", vec![wire_update("u1", "in_progress", 2)]);
        raw.severity = None;
        raw.scheduled_start = Some(at(2));
        raw.scheduled_end = Some(at(4));
        let event = MaintenanceEvent::try_from(raw).unwrap();
        assert_eq!(event.status(), MaintenanceStatus::InProgress);
        assert_eq!(event.severity, Severity::Minor);
        assert_eq!(event.window.unwrap().scheduled_end, at(4));
    }

    #[test]
    fn unknown_event_status_is_rejected() {
        let raw = wire_event("escalated", vec![]);
        assert!(Incident::try_from(raw).is_err());
    }

    #[test]
    fn create_body_carries_initial_update() {
        let new = NewEvent {
            title: "API errors".into(),
            description: "Elevated 5xx".into(),
            status: IncidentStatus::Investigating,
            severity: Severity::Critical,
            affected_services: vec!["srv_1".into()],
            window: None,
        };
        let body = create_event_body(&new, "Jamie");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["status"], "investigating");
        assert_eq!(json["severity"], "critical");
        assert_eq!(json["affectedServices"], serde_json::json!(["srv_1"]));
        assert_eq!(json["initialUpdate"]["author"], "Jamie");
        assert!(json.get("scheduledStart").is_none());
    }

    #[test]
    fn service_patch_maps_group_clear() {
        let req = UpdateServiceRequest {
            group: Some(None),
            status: Some(ServiceStatus::PartialOutage),
            ..Default::default()
        };
        let json = serde_json::to_value(update_service_body(&req)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "partial_outage", "group": null})
        );
    }
}
