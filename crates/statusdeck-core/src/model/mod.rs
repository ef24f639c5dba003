// ── Domain model ──
//
// Canonical types shared by the aggregator, the timeline model, the
// store and the CLI. Wire-format quirks never reach this layer.

mod entity_id;
mod event;
mod service;
mod status;
mod validation;

pub use entity_id::EntityId;
pub use event::{
    EventEdit, EventStatus, Incident, IncidentStatus, MaintenanceEvent, MaintenanceStatus,
    MaintenanceWindow, NewEvent, StatusEvent, Update, UpdateDraft,
};
pub(crate) use event::{EventHeader, require_text};
pub use service::{Service, ServiceGroup, Uptime};
pub use status::{ServiceStatus, Severity};
pub use validation::{ConsistencyWarning, ValidationError};

/// Entities stored in the `DataStore`, addressed by their id.
pub trait Keyed {
    fn id(&self) -> &EntityId;
}

impl Keyed for Service {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Keyed for ServiceGroup {
    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl<S: EventStatus> Keyed for StatusEvent<S> {
    fn id(&self) -> &EntityId {
        &self.id
    }
}
