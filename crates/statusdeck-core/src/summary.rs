// ── Public status summary ──
//
// Everything the public status page shows, computed in one pass from
// borrowed snapshots.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::{aggregate_status, group_services};
use crate::model::{
    EntityId, Incident, MaintenanceEvent, MaintenanceStatus, Service, ServiceGroup, ServiceStatus,
};

/// One group with its own aggregated status.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary<'a> {
    pub id: &'a EntityId,
    pub name: &'a str,
    pub status: ServiceStatus,
    pub services: Vec<&'a Service>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusSummary<'a> {
    pub overall: ServiceStatus,
    pub headline: &'static str,
    pub groups: Vec<GroupSummary<'a>>,
    pub ungrouped: Vec<&'a Service>,
    pub active_incidents: Vec<&'a Incident>,
    pub ongoing_maintenance: Vec<&'a MaintenanceEvent>,
    pub upcoming_maintenance: Vec<&'a MaintenanceEvent>,
    pub resolved_incidents: Vec<&'a Incident>,
    pub completed_maintenance: Vec<&'a MaintenanceEvent>,
    pub generated_at: DateTime<Utc>,
}

impl<'a> StatusSummary<'a> {
    pub fn build<S, G, I, M>(
        services: S,
        groups: G,
        incidents: I,
        maintenance: M,
        now: DateTime<Utc>,
    ) -> Self
    where
        S: IntoIterator<Item = &'a Service>,
        G: IntoIterator<Item = &'a ServiceGroup>,
        I: IntoIterator<Item = &'a Incident>,
        M: IntoIterator<Item = &'a MaintenanceEvent>,
    {
        let services: Vec<&'a Service> = services.into_iter().collect();
        let overall = aggregate_status(services.iter().copied());
        let view = group_services(services.iter().copied(), groups);

        let groups = view
            .groups
            .into_iter()
            .map(|bucket| {
                let group = bucket.group;
                GroupSummary {
                    id: &group.id,
                    name: &group.name,
                    status: aggregate_status(bucket.services.iter().copied()),
                    services: bucket.services,
                }
            })
            .collect();

        let (active_incidents, resolved_incidents): (Vec<_>, Vec<_>) =
            incidents.into_iter().partition(|i| i.is_active());

        let mut ongoing_maintenance = Vec::new();
        let mut upcoming_maintenance = Vec::new();
        let mut completed_maintenance = Vec::new();
        for event in maintenance {
            if event.is_ongoing() {
                ongoing_maintenance.push(event);
            } else if event.is_upcoming(now) {
                upcoming_maintenance.push(event);
            } else if event.current_status() == MaintenanceStatus::Completed {
                completed_maintenance.push(event);
            }
        }

        Self {
            overall,
            headline: overall.headline(),
            groups,
            ungrouped: view.ungrouped,
            active_incidents,
            ongoing_maintenance,
            upcoming_maintenance,
            resolved_incidents,
            completed_maintenance,
            generated_at: now,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{IncidentStatus, MaintenanceWindow, NewEvent, Severity, UpdateDraft};
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn svc(id: &str, status: ServiceStatus, group: Option<&str>) -> Service {
        Service {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            status,
            group: group.map(EntityId::from),
            uptime: None,
            last_updated: None,
        }
    }

    fn incident(title: &str, status: IncidentStatus) -> Incident {
        Incident::create_at(
            NewEvent {
                title: title.into(),
                description: "details".into(),
                status,
                severity: Severity::Major,
                affected_services: vec![],
                window: None,
            },
            std::iter::empty(),
            "Ops",
            now(),
        )
        .unwrap()
    }

    fn maintenance(title: &str, start_offset_hours: i64) -> MaintenanceEvent {
        let start = now() + Duration::hours(start_offset_hours);
        MaintenanceEvent::create_at(
            NewEvent {
                title: title.into(),
                description: "details".into(),
                status: MaintenanceStatus::Scheduled,
                severity: Severity::Minor,
                affected_services: vec![],
                window: Some(MaintenanceWindow::new(start, start + Duration::hours(1)).unwrap()),
            },
            std::iter::empty(),
            "Ops",
            now() - Duration::days(1),
        )
        .unwrap()
    }

    #[test]
    fn summary_splits_everything() {
        let services = vec![
            svc("api", ServiceStatus::Operational, Some("core")),
            svc("db", ServiceStatus::DegradedPerformance, Some("core")),
            svc("blog", ServiceStatus::Operational, None),
        ];
        let groups = vec![ServiceGroup {
            id: "core".into(),
            name: "Core Infrastructure".into(),
            services: vec![],
        }];

        let open = incident("API latency", IncidentStatus::Monitoring);
        let closed = incident("Outage", IncidentStatus::Resolved);

        let upcoming = maintenance("Upgrade", 24);
        let mut ongoing = maintenance("Migration", -1);
        ongoing
            .append_update(UpdateDraft {
                message: "started".into(),
                status: MaintenanceStatus::InProgress,
                author: "Ops".into(),
            })
            .unwrap();
        let mut done = maintenance("Patch", -48);
        done.append_update(UpdateDraft {
            message: "started".into(),
            status: MaintenanceStatus::InProgress,
            author: "Ops".into(),
        })
        .unwrap();
        done.append_update(UpdateDraft {
            message: "finished".into(),
            status: MaintenanceStatus::Completed,
            author: "Ops".into(),
        })
        .unwrap();

        let incidents = vec![open, closed];
        let events = vec![upcoming, ongoing, done];
        let summary = StatusSummary::build(&services, &groups, &incidents, &events, now());

        assert_eq!(summary.overall, ServiceStatus::DegradedPerformance);
        assert_eq!(
            summary.headline,
            "Some systems experiencing degraded performance"
        );
        assert_eq!(summary.groups.len(), 1);
        assert_eq!(summary.groups[0].status, ServiceStatus::DegradedPerformance);
        assert_eq!(summary.groups[0].services.len(), 2);
        assert_eq!(summary.ungrouped.len(), 1);

        assert_eq!(summary.active_incidents.len(), 1);
        assert_eq!(summary.active_incidents[0].title, "API latency");
        assert_eq!(summary.resolved_incidents.len(), 1);

        assert_eq!(summary.upcoming_maintenance[0].title, "Upgrade");
        assert_eq!(summary.ongoing_maintenance[0].title, "Migration");
        assert_eq!(summary.completed_maintenance[0].title, "Patch");
    }

    #[test]
    fn empty_page_is_operational() {
        let summary = StatusSummary::build(&[], &[], &[], &[], now());
        assert_eq!(summary.overall, ServiceStatus::Operational);
        assert_eq!(summary.headline, "All systems operational");
    }

    #[test]
    fn scheduled_in_the_past_is_neither_upcoming_nor_ongoing() {
        let stale = maintenance("Forgotten", -3);
        let events = [stale];
        let summary = StatusSummary::build(&[], &[], &[], &events, now());
        assert!(summary.upcoming_maintenance.is_empty());
        assert!(summary.ongoing_maintenance.is_empty());
    }
}
