// ── Incident / maintenance timeline model ──
//
// A StatusEvent is an append-only log of Updates. Its status is never set
// directly: it is the status of the last appended update, and the fields
// that hold it are private so that stays true by construction.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::{ConsistencyWarning, EntityId, Severity, ValidationError};

// ── Status domains ──────────────────────────────────────────────────

/// A status domain for a [`StatusEvent`]: the set of states plus the
/// rules for moving between them.
pub trait EventStatus:
    Copy + Eq + fmt::Debug + fmt::Display + FromStr + Serialize + Send + Sync + 'static
{
    /// Noun used in messages and ids ("incident", "maintenance").
    const KIND: &'static str;
    /// Prefix for locally minted event ids.
    const ID_PREFIX: &'static str;
    /// Events of this kind must carry a scheduled window.
    const REQUIRES_WINDOW: bool;

    fn is_terminal(self) -> bool;

    /// Whether a non-terminal `self` may move to a different status `next`.
    fn allows_transition_to(self, next: Self) -> bool;

    /// Whether an event may be created in this status.
    fn is_valid_initial(self) -> bool;
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IncidentStatus {
    #[default]
    Investigating,
    Identified,
    Monitoring,
    Resolved,
}

impl EventStatus for IncidentStatus {
    const KIND: &'static str = "incident";
    const ID_PREFIX: &'static str = "inc";
    const REQUIRES_WINDOW: bool = false;

    fn is_terminal(self) -> bool {
        self == Self::Resolved
    }

    // Any move is allowed, including monitoring back to investigating.
    fn allows_transition_to(self, _next: Self) -> bool {
        true
    }

    fn is_valid_initial(self) -> bool {
        true
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MaintenanceStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl EventStatus for MaintenanceStatus {
    const KIND: &'static str = "maintenance";
    const ID_PREFIX: &'static str = "mnt";
    const REQUIRES_WINDOW: bool = true;

    fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    fn allows_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::InProgress | Self::Cancelled)
                | (Self::InProgress, Self::Completed)
        )
    }

    fn is_valid_initial(self) -> bool {
        !self.is_terminal()
    }
}

// ── Timeline entries ────────────────────────────────────────────────

/// One immutable entry of an event's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Update<S> {
    pub id: EntityId,
    pub message: String,
    pub status: S,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// Planned start and end of a maintenance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWindow {
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
}

impl MaintenanceWindow {
    pub fn new(
        scheduled_start: DateTime<Utc>,
        scheduled_end: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let window = Self {
            scheduled_start,
            scheduled_end,
        };
        window.validate()?;
        Ok(window)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.scheduled_end > self.scheduled_start {
            Ok(())
        } else {
            Err(ValidationError::InvalidWindow)
        }
    }
}

// ── Inputs ──────────────────────────────────────────────────────────

/// Everything needed to open a new event.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent<S> {
    pub title: String,
    pub description: String,
    pub status: S,
    pub severity: Severity,
    pub affected_services: Vec<EntityId>,
    pub window: Option<MaintenanceWindow>,
}

/// A timeline entry that has not been appended yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDraft<S> {
    pub message: String,
    pub status: S,
    pub author: String,
}

/// Descriptive changes to an event. Status is absent on purpose: it only
/// moves through [`StatusEvent::append_update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub severity: Option<Severity>,
    pub affected_services: Option<Vec<EntityId>>,
    pub window: Option<MaintenanceWindow>,
}

impl EventEdit {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// ── StatusEvent ─────────────────────────────────────────────────────

/// An incident or maintenance event with its update timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent<S: EventStatus> {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    status: S,
    pub severity: Severity,
    pub affected_services: Vec<EntityId>,
    #[serde(flatten)]
    pub window: Option<MaintenanceWindow>,
    pub created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    updates: Vec<Update<S>>,
}

pub type Incident = StatusEvent<IncidentStatus>;
pub type MaintenanceEvent = StatusEvent<MaintenanceStatus>;

impl<S: EventStatus> StatusEvent<S> {
    /// Open a new event. Its timeline starts with one update carrying the
    /// description and initial status.
    ///
    /// Every id in `affected_services` must appear in `known_services`.
    pub fn create<'a>(
        new: NewEvent<S>,
        known_services: impl IntoIterator<Item = &'a EntityId>,
        author: &str,
    ) -> Result<Self, ValidationError> {
        Self::create_at(new, known_services, author, Utc::now())
    }

    /// [`create`](Self::create) with an explicit clock.
    pub fn create_at<'a>(
        new: NewEvent<S>,
        known_services: impl IntoIterator<Item = &'a EntityId>,
        author: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        require_text("title", &new.title)?;
        require_text("description", &new.description)?;
        if !new.status.is_valid_initial() {
            return Err(ValidationError::InvalidInitialStatus {
                kind: S::KIND,
                status: new.status.to_string(),
            });
        }
        check_affected(&new.affected_services, known_services)?;
        check_window::<S>(new.window.as_ref())?;

        let first = Update {
            id: EntityId::generate("upd"),
            message: new.description.clone(),
            status: new.status,
            author: author.to_owned(),
            created_at: now,
        };

        Ok(Self {
            id: EntityId::generate(S::ID_PREFIX),
            title: new.title,
            description: new.description,
            status: new.status,
            severity: new.severity,
            affected_services: new.affected_services,
            window: new.window,
            created_at: now,
            updated_at: now,
            updates: vec![first],
        })
    }

    /// Rebuild an event from a stored timeline. `None` if the timeline is
    /// empty; status and `updated_at` are derived from the last entry.
    pub(crate) fn from_log(header: EventHeader, updates: Vec<Update<S>>) -> Option<Self> {
        let last = updates.last()?;
        let status = last.status;
        let updated_at = header.updated_at.max(last.created_at);

        Some(Self {
            id: header.id,
            title: header.title,
            description: header.description,
            status,
            severity: header.severity,
            affected_services: header.affected_services,
            window: header.window,
            created_at: header.created_at,
            updated_at,
            updates,
        })
    }

    // ── Timeline ─────────────────────────────────────────────────────

    /// Append an update and move the event to its status.
    ///
    /// Appending to an event that is already terminal goes through but
    /// returns [`ConsistencyWarning::AppendToTerminal`].
    pub fn append_update(
        &mut self,
        draft: UpdateDraft<S>,
    ) -> Result<Option<ConsistencyWarning>, ValidationError> {
        self.append_update_at(draft, Utc::now())
    }

    /// [`append_update`](Self::append_update) with an explicit clock.
    pub fn append_update_at(
        &mut self,
        draft: UpdateDraft<S>,
        now: DateTime<Utc>,
    ) -> Result<Option<ConsistencyWarning>, ValidationError> {
        require_text("message", &draft.message)?;
        let warning = self.check_append(draft.status)?;

        self.updates.push(Update {
            id: EntityId::generate("upd"),
            message: draft.message,
            status: draft.status,
            author: draft.author,
            created_at: now,
        });
        self.status = draft.status;
        self.updated_at = now;

        Ok(warning)
    }

    /// Decide whether moving to `next` is allowed, without appending.
    pub fn check_append(&self, next: S) -> Result<Option<ConsistencyWarning>, ValidationError> {
        let from = self.status;
        if from.is_terminal() {
            return Ok(Some(ConsistencyWarning::AppendToTerminal {
                event: self.id.clone(),
                status: from.to_string(),
            }));
        }
        if from == next || from.allows_transition_to(next) {
            Ok(None)
        } else {
            Err(ValidationError::TransitionNotAllowed {
                kind: S::KIND,
                from: from.to_string(),
                to: next.to_string(),
            })
        }
    }

    /// Apply descriptive changes. All fields are validated before any is
    /// written, so a rejected edit leaves the event untouched.
    pub fn apply_edit<'a>(
        &mut self,
        edit: &EventEdit,
        known_services: impl IntoIterator<Item = &'a EntityId>,
    ) -> Result<(), ValidationError> {
        if let Some(title) = &edit.title {
            require_text("title", title)?;
        }
        if let Some(description) = &edit.description {
            require_text("description", description)?;
        }
        if let Some(affected) = &edit.affected_services {
            check_affected(affected, known_services)?;
        }
        if edit.window.is_some() {
            check_window::<S>(edit.window.as_ref())?;
        }

        if let Some(title) = &edit.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &edit.description {
            self.description.clone_from(description);
        }
        if let Some(severity) = edit.severity {
            self.severity = severity;
        }
        if let Some(affected) = &edit.affected_services {
            self.affected_services.clone_from(affected);
        }
        if edit.window.is_some() {
            self.window = edit.window;
        }
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn status(&self) -> S {
        self.status
    }

    /// Status of the most recent update. Always equal to [`status`](Self::status).
    pub fn current_status(&self) -> S {
        self.updates.last().map_or(self.status, |u| u.status)
    }

    /// Updates in append order.
    pub fn updates(&self) -> &[Update<S>] {
        &self.updates
    }

    pub fn latest_update(&self) -> Option<&Update<S>> {
        self.updates.last()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True until the event reaches a terminal status.
    pub fn is_active(&self) -> bool {
        !self.current_status().is_terminal()
    }

    pub fn affects(&self, service: &EntityId) -> bool {
        self.affected_services.contains(service)
    }
}

impl StatusEvent<MaintenanceStatus> {
    /// Scheduled and not yet started.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.current_status() == MaintenanceStatus::Scheduled
            && self.window.is_some_and(|w| w.scheduled_start > now)
    }

    pub fn is_ongoing(&self) -> bool {
        self.current_status() == MaintenanceStatus::InProgress
    }
}

/// Non-timeline fields of a stored event, used when rebuilding one.
#[derive(Debug, Clone)]
pub(crate) struct EventHeader {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub affected_services: Vec<EntityId>,
    pub window: Option<MaintenanceWindow>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Helpers ─────────────────────────────────────────────────────────

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField { field })
    } else {
        Ok(())
    }
}

fn check_affected<'a>(
    affected: &[EntityId],
    known_services: impl IntoIterator<Item = &'a EntityId>,
) -> Result<(), ValidationError> {
    if affected.is_empty() {
        return Ok(());
    }
    let known: HashSet<&EntityId> = known_services.into_iter().collect();
    match affected.iter().find(|id| !known.contains(id)) {
        Some(id) => Err(ValidationError::UnknownService { id: id.clone() }),
        None => Ok(()),
    }
}

fn check_window<S: EventStatus>(window: Option<&MaintenanceWindow>) -> Result<(), ValidationError> {
    match window {
        Some(_) if !S::REQUIRES_WINDOW => {
            Err(ValidationError::UnexpectedWindow { kind: S::KIND })
        }
        Some(w) => w.validate(),
        None if S::REQUIRES_WINDOW => Err(ValidationError::MissingWindow),
        None => Ok(()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 10, 0, 0).unwrap()
    }

    fn known() -> Vec<EntityId> {
        vec!["svc_1".into(), "svc_2".into()]
    }

    fn new_incident() -> NewEvent<IncidentStatus> {
        NewEvent {
            title: "API slow".into(),
            description: "investigating latency".into(),
            status: IncidentStatus::Investigating,
            severity: Severity::Minor,
            affected_services: vec!["svc_1".into()],
            window: None,
        }
    }

    fn new_maintenance(start: DateTime<Utc>) -> NewEvent<MaintenanceStatus> {
        NewEvent {
            title: "Database upgrade".into(),
            description: "Upgrading the primary cluster".into(),
            status: MaintenanceStatus::Scheduled,
            severity: Severity::Minor,
            affected_services: vec!["svc_2".into()],
            window: Some(MaintenanceWindow::new(start, start + Duration::hours(2)).unwrap()),
        }
    }

    fn draft<S>(message: &str, status: S) -> UpdateDraft<S> {
        UpdateDraft {
            message: message.into(),
            status,
            author: "op".into(),
        }
    }

    // ── create ──────────────────────────────────────────────────────

    #[test]
    fn create_starts_timeline_with_description() {
        let incident = Incident::create_at(new_incident(), &known(), "Ops", t0()).unwrap();

        assert_eq!(incident.updates().len(), 1);
        let first = &incident.updates()[0];
        assert_eq!(first.message, "investigating latency");
        assert_eq!(first.status, IncidentStatus::Investigating);
        assert_eq!(first.author, "Ops");
        assert_eq!(incident.status(), IncidentStatus::Investigating);
        assert_eq!(incident.created_at, t0());
        assert_eq!(incident.updated_at(), t0());
        assert!(incident.id.as_str().starts_with("inc_"));
    }

    #[test]
    fn create_rejects_blank_title_and_description() {
        let mut blank_title = new_incident();
        blank_title.title = "   ".into();
        assert_eq!(
            Incident::create(blank_title, &known(), "Ops").unwrap_err(),
            ValidationError::EmptyField { field: "title" }
        );

        let mut blank_description = new_incident();
        blank_description.description = String::new();
        assert_eq!(
            Incident::create(blank_description, &known(), "Ops").unwrap_err(),
            ValidationError::EmptyField {
                field: "description"
            }
        );
    }

    #[test]
    fn create_rejects_unknown_service() {
        let mut new = new_incident();
        new.affected_services.push("svc_404".into());
        assert_eq!(
            Incident::create(new, &known(), "Ops").unwrap_err(),
            ValidationError::UnknownService {
                id: "svc_404".into()
            }
        );
    }

    #[test]
    fn create_allows_no_affected_services() {
        let mut new = new_incident();
        new.affected_services.clear();
        assert!(Incident::create(new, std::iter::empty(), "Ops").is_ok());
    }

    #[test]
    fn incidents_may_start_in_any_status() {
        for status in IncidentStatus::iter() {
            let mut new = new_incident();
            new.status = status;
            let incident = Incident::create(new, &known(), "Ops").unwrap();
            assert_eq!(incident.current_status(), status);
        }
    }

    #[test]
    fn maintenance_needs_a_valid_window() {
        let mut no_window = new_maintenance(t0());
        no_window.window = None;
        assert_eq!(
            MaintenanceEvent::create(no_window, &known(), "Ops").unwrap_err(),
            ValidationError::MissingWindow
        );

        assert_eq!(
            MaintenanceWindow::new(t0(), t0()).unwrap_err(),
            ValidationError::InvalidWindow
        );
    }

    #[test]
    fn maintenance_cannot_start_terminal() {
        let mut new = new_maintenance(t0());
        new.status = MaintenanceStatus::Completed;
        assert!(matches!(
            MaintenanceEvent::create(new, &known(), "Ops"),
            Err(ValidationError::InvalidInitialStatus { .. })
        ));
    }

    // ── append ──────────────────────────────────────────────────────

    #[test]
    fn resolve_scenario() {
        let mut incident = Incident::create(new_incident(), &known(), "Ops").unwrap();
        let warning = incident
            .append_update(draft("fixed", IncidentStatus::Resolved))
            .unwrap();

        assert_eq!(warning, None);
        assert_eq!(incident.status(), IncidentStatus::Resolved);
        assert_eq!(incident.updates().len(), 2);
        assert!(!incident.is_active());
    }

    #[test]
    fn appends_are_monotonic_and_ordered() {
        let mut incident = Incident::create_at(new_incident(), &known(), "Ops", t0()).unwrap();
        let steps = [
            IncidentStatus::Identified,
            IncidentStatus::Monitoring,
            IncidentStatus::Investigating,
            IncidentStatus::Monitoring,
        ];

        for (i, status) in steps.iter().enumerate() {
            // Timestamps go backwards on purpose: order is append order.
            let at = t0() - Duration::minutes(i64::try_from(i).unwrap());
            incident
                .append_update_at(draft(&format!("step {i}"), *status), at)
                .unwrap();
            assert_eq!(incident.updates().len(), i + 2);
            assert_eq!(incident.current_status(), incident.status());
            assert_eq!(incident.current_status(), *status);
        }

        let messages: Vec<_> = incident.updates()[1..]
            .iter()
            .map(|u| u.message.as_str())
            .collect();
        assert_eq!(messages, vec!["step 0", "step 1", "step 2", "step 3"]);
    }

    #[test]
    fn append_rejects_empty_message() {
        let mut incident = Incident::create(new_incident(), &known(), "Ops").unwrap();
        let err = incident
            .append_update(draft(" ", IncidentStatus::Identified))
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyField { field: "message" });
        assert_eq!(incident.updates().len(), 1);
        assert_eq!(incident.status(), IncidentStatus::Investigating);
    }

    #[test]
    fn append_to_resolved_warns_but_goes_through() {
        let mut incident = Incident::create(new_incident(), &known(), "Ops").unwrap();
        incident
            .append_update(draft("fixed", IncidentStatus::Resolved))
            .unwrap();

        let warning = incident
            .append_update(draft("regressed", IncidentStatus::Investigating))
            .unwrap();

        assert_eq!(
            warning,
            Some(ConsistencyWarning::AppendToTerminal {
                event: incident.id.clone(),
                status: "resolved".into(),
            })
        );
        assert!(incident.is_active());
        assert_eq!(incident.updates().len(), 3);
    }

    #[test]
    fn is_active_only_false_for_resolved() {
        for status in IncidentStatus::iter() {
            let mut new = new_incident();
            new.status = status;
            let incident = Incident::create(new, &known(), "Ops").unwrap();
            assert_eq!(incident.is_active(), status != IncidentStatus::Resolved);
        }
    }

    // ── maintenance state machine ───────────────────────────────────

    #[test]
    fn maintenance_follows_transition_table() {
        let mut event = MaintenanceEvent::create(new_maintenance(t0()), &known(), "Ops").unwrap();
        event
            .append_update(draft("starting", MaintenanceStatus::InProgress))
            .unwrap();
        event
            .append_update(draft("still going", MaintenanceStatus::InProgress))
            .unwrap();
        let warning = event
            .append_update(draft("done", MaintenanceStatus::Completed))
            .unwrap();
        assert_eq!(warning, None);
        assert!(!event.is_active());
    }

    #[test]
    fn cancelling_after_start_is_rejected() {
        let mut event = MaintenanceEvent::create(new_maintenance(t0()), &known(), "Ops").unwrap();
        event
            .append_update(draft("starting", MaintenanceStatus::InProgress))
            .unwrap();

        let err = event
            .append_update(draft("abort", MaintenanceStatus::Cancelled))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TransitionNotAllowed {
                kind: "maintenance",
                from: "in_progress".into(),
                to: "cancelled".into(),
            }
        );
        assert_eq!(event.updates().len(), 2);
    }

    #[test]
    fn scheduled_cannot_jump_to_completed() {
        let event = MaintenanceEvent::create(new_maintenance(t0()), &known(), "Ops").unwrap();
        assert!(event.check_append(MaintenanceStatus::Completed).is_err());
        assert_eq!(event.check_append(MaintenanceStatus::Cancelled), Ok(None));
    }

    #[test]
    fn upcoming_and_ongoing() {
        let start = t0() + Duration::days(1);
        let mut event = MaintenanceEvent::create(new_maintenance(start), &known(), "Ops").unwrap();

        assert!(event.is_upcoming(t0()));
        assert!(!event.is_upcoming(start));
        assert!(!event.is_ongoing());

        event
            .append_update(draft("starting early", MaintenanceStatus::InProgress))
            .unwrap();
        assert!(!event.is_upcoming(t0()));
        assert!(event.is_ongoing());
    }

    // ── edit ────────────────────────────────────────────────────────

    #[test]
    fn rejected_edit_changes_nothing() {
        let mut incident = Incident::create(new_incident(), &known(), "Ops").unwrap();
        let before = incident.clone();

        let edit = EventEdit {
            title: Some("New title".into()),
            affected_services: Some(vec!["svc_404".into()]),
            ..EventEdit::default()
        };
        assert!(incident.apply_edit(&edit, &known()).is_err());
        assert_eq!(incident, before);
    }

    #[test]
    fn incidents_take_no_window() {
        let window = MaintenanceWindow::new(t0(), t0() + Duration::hours(1)).unwrap();

        let mut with_window = new_incident();
        with_window.window = Some(window);
        assert_eq!(
            Incident::create(with_window, &known(), "Ops").unwrap_err(),
            ValidationError::UnexpectedWindow { kind: "incident" }
        );

        let mut incident = Incident::create(new_incident(), &known(), "Ops").unwrap();
        let before = incident.clone();
        let edit = EventEdit {
            window: Some(window),
            ..EventEdit::default()
        };
        assert_eq!(
            incident.apply_edit(&edit, &known()).unwrap_err(),
            ValidationError::UnexpectedWindow { kind: "incident" }
        );
        assert_eq!(incident, before);
    }

    #[test]
    fn maintenance_edit_moves_window() {
        let mut event = MaintenanceEvent::create(new_maintenance(t0()), &known(), "Ops").unwrap();
        let later =
            MaintenanceWindow::new(t0() + Duration::days(1), t0() + Duration::days(2)).unwrap();
        let edit = EventEdit {
            window: Some(later),
            ..EventEdit::default()
        };
        event.apply_edit(&edit, &known()).unwrap();
        assert_eq!(event.window, Some(later));
    }

    #[test]
    fn edit_never_touches_status() {
        let mut incident = Incident::create(new_incident(), &known(), "Ops").unwrap();
        let edit = EventEdit {
            title: Some("API latency".into()),
            severity: Some(Severity::Major),
            ..EventEdit::default()
        };
        incident.apply_edit(&edit, &known()).unwrap();
        assert_eq!(incident.title, "API latency");
        assert_eq!(incident.severity, Severity::Major);
        assert_eq!(incident.status(), IncidentStatus::Investigating);
        assert_eq!(incident.updates().len(), 1);
    }

    #[test]
    fn serializes_window_inline() {
        let event = MaintenanceEvent::create(new_maintenance(t0()), &known(), "Ops").unwrap();
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["scheduledStart"], "2026-10-16T10:00:00Z");
        assert!(json["updates"].is_array());
    }
}
