// ── Command API ──
//
// Every write goes through the `Command` enum. The controller validates
// each one against the local model before calling the backend.

pub mod requests;

use crate::error::CoreError;
use crate::model::{
    ConsistencyWarning, EntityId, EventEdit, Incident, IncidentStatus, MaintenanceEvent,
    MaintenanceStatus, NewEvent, Service, ServiceGroup,
};

pub use requests::{
    AppendUpdateRequest, CreateGroupRequest, CreateServiceRequest, UpdateGroupRequest,
    UpdateServiceRequest,
};

/// A command plus the channel its result is sent back on.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// All write operations against a status-page backend.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Services ─────────────────────────────────────────────────────
    CreateService(CreateServiceRequest),
    UpdateService {
        id: EntityId,
        update: UpdateServiceRequest,
    },
    DeleteService {
        id: EntityId,
    },

    // ── Groups ───────────────────────────────────────────────────────
    CreateGroup(CreateGroupRequest),
    UpdateGroup {
        id: EntityId,
        update: UpdateGroupRequest,
    },
    DeleteGroup {
        id: EntityId,
    },

    // ── Incidents ────────────────────────────────────────────────────
    CreateIncident {
        incident: NewEvent<IncidentStatus>,
        author: Option<String>,
    },
    EditIncident {
        id: EntityId,
        edit: EventEdit,
    },
    AppendIncidentUpdate {
        id: EntityId,
        update: AppendUpdateRequest<IncidentStatus>,
    },
    DeleteIncident {
        id: EntityId,
    },

    // ── Maintenance ──────────────────────────────────────────────────
    CreateMaintenance {
        event: NewEvent<MaintenanceStatus>,
        author: Option<String>,
    },
    EditMaintenance {
        id: EntityId,
        edit: EventEdit,
    },
    AppendMaintenanceUpdate {
        id: EntityId,
        update: AppendUpdateRequest<MaintenanceStatus>,
    },
    DeleteMaintenance {
        id: EntityId,
    },
}

/// Outcome of a successful command.
///
/// Timeline appends carry an optional [`ConsistencyWarning`]; the write
/// went through either way.
#[derive(Debug, Clone)]
pub enum CommandResult {
    Ok,
    Service(Service),
    Group(ServiceGroup),
    Incident {
        incident: Incident,
        warning: Option<ConsistencyWarning>,
    },
    Maintenance {
        event: MaintenanceEvent,
        warning: Option<ConsistencyWarning>,
    },
}
