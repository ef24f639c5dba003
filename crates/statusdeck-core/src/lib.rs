//! Status logic and reactive data layer between `statusdeck-api` and the CLI.
//!
//! This crate owns the domain model and the business logic a status page
//! is built on:
//!
//! - **Status aggregation** ([`aggregate_status`], [`group_services`])
//!   reduces a set of services to one headline status and buckets
//!   services by group. Pure and order-independent.
//!
//! - **Timeline model** ([`StatusEvent`]) models incidents and
//!   maintenance windows as append-only logs of [`Update`]s. The event's status is
//!   always the status of its last update; the only way to change it is
//!   [`StatusEvent::append_update`].
//!
//! - **[`StatusSummary`]**: everything a public status page renders,
//!   computed from snapshots in one call.
//!
//! - **[`Controller`]**: facade over the backend.
//!   [`connect()`](Controller::connect) authenticates, loads a snapshot into
//!   the [`DataStore`], and spawns the command processor. Mutations are typed
//!   [`Command`]s; timeline rules run locally before anything is sent.
//!   [`Controller::oneshot()`](Controller::oneshot) wraps connect/run/disconnect
//!   for single-shot callers.

pub mod aggregate;
pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;
pub mod summary;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregate::{GroupBucket, GroupedView, aggregate_status, aggregate_statuses, group_services};
pub use command::requests::*;
pub use command::{Command, CommandResult};
pub use config::{AuthCredentials, ControllerConfig, TlsVerification};
pub use controller::{ConnectionState, Controller};
pub use error::CoreError;
pub use store::DataStore;
pub use stream::EntityStream;
pub use summary::{GroupSummary, StatusSummary};

// The authenticated operator, as the backend reports it.
pub use statusdeck_api::User;

pub use model::{
    ConsistencyWarning, EntityId, EventEdit, EventStatus, Incident, IncidentStatus, Keyed,
    MaintenanceEvent, MaintenanceStatus, MaintenanceWindow, NewEvent, Service, ServiceGroup,
    ServiceStatus, Severity, StatusEvent, Update, UpdateDraft, Uptime, ValidationError,
};
