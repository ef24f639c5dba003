// ── Controller abstraction ──
//
// Connection lifecycle for one status-page backend: authentication,
// snapshot loading, background refresh, and command routing into the
// DataStore.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use statusdeck_api::transport::{TlsMode, TransportConfig};
use statusdeck_api::{ApiClient, Credentials, User};

use crate::command::{AppendUpdateRequest, Command, CommandEnvelope, CommandResult};
use crate::config::{ControllerConfig, TlsVerification};
use crate::convert;
use crate::error::CoreError;
use crate::model::{
    ConsistencyWarning, EntityId, EventEdit, EventStatus, Incident, MaintenanceEvent, NewEvent,
    Service, ServiceGroup, StatusEvent, UpdateDraft, Uptime, ValidationError, require_text,
};
use crate::store::DataStore;
use crate::stream::EntityStream;

const COMMAND_CHANNEL_SIZE: usize = 64;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ControllerConfig,
    store: Arc<DataStore>,
    connection_state: watch::Sender<ConnectionState>,
    command_tx: mpsc::Sender<CommandEnvelope>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    cancel: CancellationToken,
    api: Mutex<Option<ApiClient>>,
    user: Mutex<Option<User>>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Controller {
    /// Create a controller. Does not connect: call
    /// [`connect()`](Self::connect) to authenticate and load data.
    pub fn new(config: ControllerConfig) -> Self {
        let store = Arc::new(DataStore::new());
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);

        Self {
            inner: Arc::new(ControllerInner {
                config,
                store,
                connection_state,
                command_tx,
                command_rx: Mutex::new(Some(command_rx)),
                cancel: CancellationToken::new(),
                api: Mutex::new(None),
                user: Mutex::new(None),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Authenticate, load a full snapshot, and spawn the command
    /// processor (plus the periodic refresh when configured).
    pub async fn connect(&self) -> Result<(), CoreError> {
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Connecting);

        if let Err(e) = self.establish().await {
            let _ = self.inner.connection_state.send(ConnectionState::Failed);
            return Err(e);
        }

        let mut handles = self.inner.task_handles.lock().await;

        if let Some(rx) = self.inner.command_rx.lock().await.take() {
            let ctrl = self.clone();
            handles.push(tokio::spawn(command_processor_task(ctrl, rx)));
        }

        let interval_secs = self.inner.config.refresh_interval_secs;
        if interval_secs > 0 {
            let ctrl = self.clone();
            let cancel = self.inner.cancel.clone();
            handles.push(tokio::spawn(refresh_task(ctrl, interval_secs, cancel)));
        }

        let _ = self.inner.connection_state.send(ConnectionState::Connected);
        info!(url = %self.inner.config.url, "connected to status backend");
        Ok(())
    }

    async fn establish(&self) -> Result<(), CoreError> {
        let config = &self.inner.config;
        let transport = build_transport(config);
        let client = ApiClient::new(config.url.as_str(), &transport)?;

        let credentials = Credentials::from(&config.auth);
        let session = client.authenticate(&credentials).await?;
        debug!(user = %session.user.email, "authenticated");

        *self.inner.api.lock().await = Some(client);
        *self.inner.user.lock().await = Some(session.user);

        self.full_refresh().await
    }

    /// Cancel background tasks and drop the session.
    pub async fn disconnect(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        if let Some(client) = self.inner.api.lock().await.take() {
            client.clear_token();
        }
        *self.inner.user.lock().await = None;

        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Disconnected);
        debug!("disconnected");
    }

    /// Fetch services, groups, incidents and maintenance and replace the
    /// store's contents. A record the model rejects fails the refresh.
    pub async fn full_refresh(&self) -> Result<(), CoreError> {
        let guard = self.inner.api.lock().await;
        let client = guard.as_ref().ok_or(CoreError::Disconnected)?;

        let (services_res, groups_res, incidents_res, maintenance_res) = tokio::join!(
            client.list_services(),
            client.list_service_groups(),
            client.list_incidents(),
            client.list_maintenance(),
        );

        let services = services_res?
            .into_iter()
            .map(Service::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let groups: Vec<ServiceGroup> = groups_res?.into_iter().map(ServiceGroup::from).collect();
        let incidents = incidents_res?
            .into_iter()
            .map(Incident::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let maintenance = maintenance_res?
            .into_iter()
            .map(MaintenanceEvent::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        drop(guard);

        self.inner
            .store
            .apply_snapshot(services, groups, incidents, maintenance);

        debug!(
            services = self.inner.store.service_count(),
            groups = self.inner.store.group_count(),
            incidents = self.inner.store.incident_count(),
            maintenance = self.inner.store.maintenance_count(),
            "data refresh complete"
        );
        Ok(())
    }

    // ── Command execution ────────────────────────────────────────

    /// Send a command to the processor task and wait for its result.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        if *self.inner.connection_state.borrow() != ConnectionState::Connected {
            return Err(CoreError::Disconnected);
        }

        let (tx, rx) = tokio::sync::oneshot::channel();

        self.inner
            .command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::Disconnected)?;

        rx.await.map_err(|_| CoreError::Disconnected)?
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// Connect, run `f`, disconnect. Periodic refresh is disabled.
    pub async fn oneshot<F, Fut, T>(config: ControllerConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.refresh_interval_secs = 0;

        let controller = Controller::new(cfg);
        controller.connect().await?;
        let result = f(controller.clone()).await;
        controller.disconnect().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    /// The user the session belongs to, once connected.
    pub async fn current_user(&self) -> Option<User> {
        self.inner.user.lock().await.clone()
    }

    // ── Snapshot accessors (delegate to DataStore) ───────────────

    pub fn services_snapshot(&self) -> Arc<Vec<Arc<Service>>> {
        self.inner.store.services_snapshot()
    }

    pub fn groups_snapshot(&self) -> Arc<Vec<Arc<ServiceGroup>>> {
        self.inner.store.groups_snapshot()
    }

    pub fn incidents_snapshot(&self) -> Arc<Vec<Arc<Incident>>> {
        self.inner.store.incidents_snapshot()
    }

    pub fn maintenance_snapshot(&self) -> Arc<Vec<Arc<MaintenanceEvent>>> {
        self.inner.store.maintenance_snapshot()
    }

    // ── Stream accessors (delegate to DataStore) ─────────────────

    pub fn services(&self) -> EntityStream<Service> {
        self.inner.store.subscribe_services()
    }

    pub fn groups(&self) -> EntityStream<ServiceGroup> {
        self.inner.store.subscribe_groups()
    }

    pub fn incidents(&self) -> EntityStream<Incident> {
        self.inner.store.subscribe_incidents()
    }

    pub fn maintenance(&self) -> EntityStream<MaintenanceEvent> {
        self.inner.store.subscribe_maintenance()
    }

    /// Author for a timeline entry: explicit value, then the configured
    /// author, then the signed-in user's display name.
    async fn resolve_author(&self, explicit: Option<String>) -> String {
        if let Some(author) = explicit.filter(|a| !a.trim().is_empty()) {
            return author;
        }
        if let Some(author) = self.inner.config.author.clone() {
            return author;
        }
        self.inner
            .user
            .lock()
            .await
            .as_ref()
            .map_or_else(|| convert::SYSTEM_AUTHOR.to_owned(), |u| u.display_name().to_owned())
    }
}

// ── Background tasks ─────────────────────────────────────────────

async fn refresh_task(controller: Controller, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // first tick fires immediately

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = controller.full_refresh().await {
                    warn!(error = %e, "periodic refresh failed");
                }
            }
        }
    }
}

async fn command_processor_task(controller: Controller, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = controller.inner.cancel.clone();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let result = route_command(&controller, envelope.command).await;
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

// ── Command routing ──────────────────────────────────────────────

/// Validate a command against the local model, send it, and fold the
/// backend's answer into the store.
#[allow(clippy::too_many_lines)]
async fn route_command(controller: &Controller, cmd: Command) -> Result<CommandResult, CoreError> {
    let store = &controller.inner.store;

    // Resolved before taking the client lock.
    let author = match &cmd {
        Command::CreateIncident { author, .. } | Command::CreateMaintenance { author, .. } => {
            Some(controller.resolve_author(author.clone()).await)
        }
        Command::AppendIncidentUpdate { update, .. } => {
            Some(controller.resolve_author(update.author.clone()).await)
        }
        Command::AppendMaintenanceUpdate { update, .. } => {
            Some(controller.resolve_author(update.author.clone()).await)
        }
        _ => None,
    }
    .unwrap_or_default();

    let guard = controller.inner.api.lock().await;
    let client = guard.as_ref().ok_or(CoreError::Disconnected)?;

    match cmd {
        // ── Services ─────────────────────────────────────────────

        Command::CreateService(req) => {
            require_text("name", &req.name)?;
            check_uptime(req.uptime)?;
            if let Some(group) = &req.group {
                require_group(store, group)?;
            }
            let raw = client
                .create_service(&convert::create_service_body(&req))
                .await?;
            let service = stamped(Service::try_from(raw)?);
            store.upsert_service(service.clone());
            Ok(CommandResult::Service(service))
        }

        Command::UpdateService { id, update } => {
            if let Some(name) = &update.name {
                require_text("name", name)?;
            }
            check_uptime(update.uptime)?;
            if let Some(Some(group)) = &update.group {
                require_group(store, group)?;
            }
            let raw = client
                .update_service(id.as_str(), &convert::update_service_body(&update))
                .await?;
            let service = stamped(Service::try_from(raw)?);
            store.upsert_service(service.clone());
            Ok(CommandResult::Service(service))
        }

        Command::DeleteService { id } => {
            client.delete_service(id.as_str()).await?;
            store.remove_service(&id);
            Ok(CommandResult::Ok)
        }

        // ── Groups ───────────────────────────────────────────────

        Command::CreateGroup(req) => {
            require_text("name", &req.name)?;
            require_services(store, &req.services)?;
            let raw = client
                .create_service_group(&convert::create_group_body(&req))
                .await?;
            let group = ServiceGroup::from(raw);
            store.upsert_group(group.clone());
            Ok(CommandResult::Group(group))
        }

        Command::UpdateGroup { id, update } => {
            if let Some(name) = &update.name {
                require_text("name", name)?;
            }
            if let Some(services) = &update.services {
                require_services(store, services)?;
            }
            let raw = client
                .update_service_group(id.as_str(), &convert::update_group_body(&update))
                .await?;
            let group = ServiceGroup::from(raw);
            store.upsert_group(group.clone());
            Ok(CommandResult::Group(group))
        }

        Command::DeleteGroup { id } => {
            client.delete_service_group(id.as_str()).await?;
            store.remove_group(&id);
            Ok(CommandResult::Ok)
        }

        // ── Incidents ────────────────────────────────────────────

        Command::CreateIncident { incident, .. } => {
            let body = prepare_create(store, &incident, &author)?;
            let incident = Incident::try_from(client.create_incident(&body).await?)?;
            store.upsert_incident(incident.clone());
            Ok(CommandResult::Incident {
                incident,
                warning: None,
            })
        }

        Command::EditIncident { id, edit } => {
            prepare_edit(store, store.incident_by_id(&id), &id, &edit)?;
            let raw = client
                .edit_incident(id.as_str(), &convert::edit_event_body(&edit))
                .await?;
            let incident = Incident::try_from(raw)?;
            store.upsert_incident(incident.clone());
            Ok(CommandResult::Incident {
                incident,
                warning: None,
            })
        }

        Command::AppendIncidentUpdate { id, update } => {
            let (draft, warning) =
                prepare_append(store.incident_by_id(&id), &id, update, author)?;
            let raw = client
                .append_incident_update(id.as_str(), &convert::append_update_body(&draft))
                .await?;
            let incident = Incident::try_from(raw)?;
            store.upsert_incident(incident.clone());
            Ok(CommandResult::Incident { incident, warning })
        }

        Command::DeleteIncident { id } => {
            client.delete_incident(id.as_str()).await?;
            store.remove_incident(&id);
            Ok(CommandResult::Ok)
        }

        // ── Maintenance ──────────────────────────────────────────

        Command::CreateMaintenance { event, .. } => {
            let body = prepare_create(store, &event, &author)?;
            let event = MaintenanceEvent::try_from(client.create_maintenance(&body).await?)?;
            store.upsert_maintenance(event.clone());
            Ok(CommandResult::Maintenance {
                event,
                warning: None,
            })
        }

        Command::EditMaintenance { id, edit } => {
            prepare_edit(store, store.maintenance_by_id(&id), &id, &edit)?;
            let raw = client
                .edit_maintenance(id.as_str(), &convert::edit_event_body(&edit))
                .await?;
            let event = MaintenanceEvent::try_from(raw)?;
            store.upsert_maintenance(event.clone());
            Ok(CommandResult::Maintenance {
                event,
                warning: None,
            })
        }

        Command::AppendMaintenanceUpdate { id, update } => {
            let (draft, warning) =
                prepare_append(store.maintenance_by_id(&id), &id, update, author)?;
            let raw = client
                .append_maintenance_update(id.as_str(), &convert::append_update_body(&draft))
                .await?;
            let event = MaintenanceEvent::try_from(raw)?;
            store.upsert_maintenance(event.clone());
            Ok(CommandResult::Maintenance { event, warning })
        }

        Command::DeleteMaintenance { id } => {
            client.delete_maintenance(id.as_str()).await?;
            store.remove_maintenance(&id);
            Ok(CommandResult::Ok)
        }
    }
}

// ── Local validation ─────────────────────────────────────────────

/// The backend may omit `lastUpdated`; the mutation just happened.
fn stamped(mut service: Service) -> Service {
    service.last_updated.get_or_insert_with(Utc::now);
    service
}

fn check_uptime(uptime: Option<f64>) -> Result<(), ValidationError> {
    uptime.map(Uptime::new).transpose().map(|_| ())
}

fn require_group(store: &DataStore, id: &EntityId) -> Result<(), ValidationError> {
    if store.group_by_id(id).is_some() {
        Ok(())
    } else {
        Err(ValidationError::UnknownEntity {
            kind: "group",
            id: id.clone(),
        })
    }
}

fn require_services(store: &DataStore, ids: &[EntityId]) -> Result<(), ValidationError> {
    match ids.iter().find(|id| store.service_by_id(id).is_none()) {
        Some(id) => Err(ValidationError::UnknownService { id: id.clone() }),
        None => Ok(()),
    }
}

/// Run the model's creation rules on a throwaway event, then build the
/// request body.
fn prepare_create<S: EventStatus>(
    store: &DataStore,
    new: &NewEvent<S>,
    author: &str,
) -> Result<statusdeck_api::rest::models::CreateEventRequest, CoreError> {
    let known = store.service_ids();
    StatusEvent::create(new.clone(), &known, author)?;
    Ok(convert::create_event_body(new, author))
}

fn prepare_edit<S: EventStatus>(
    store: &DataStore,
    current: Option<Arc<StatusEvent<S>>>,
    id: &EntityId,
    edit: &EventEdit,
) -> Result<(), CoreError> {
    let current = current.ok_or_else(|| CoreError::not_found(S::KIND, id))?;
    let known = store.service_ids();
    StatusEvent::clone(&current).apply_edit(edit, &known)?;
    Ok(())
}

/// Check an append against the stored timeline. A terminal event still
/// accepts the update and yields a warning.
fn prepare_append<S: EventStatus>(
    current: Option<Arc<StatusEvent<S>>>,
    id: &EntityId,
    update: AppendUpdateRequest<S>,
    author: String,
) -> Result<(UpdateDraft<S>, Option<ConsistencyWarning>), CoreError> {
    let current = current.ok_or_else(|| CoreError::not_found(S::KIND, id))?;
    let draft = UpdateDraft {
        message: update.message,
        status: update.status,
        author,
    };
    let warning = StatusEvent::clone(&current).append_update(draft.clone())?;
    if let Some(w) = &warning {
        warn!(%w, "appending to a closed {}", S::KIND);
    }
    Ok((draft, warning))
}

// ── Helpers ──────────────────────────────────────────────────────

fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
