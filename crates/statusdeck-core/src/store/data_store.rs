// ── Central reactive data store ──
//
// Holds the latest known services, groups, incidents and maintenance
// events. Mutations are broadcast to subscribers via `watch` channels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::collection::EntityCollection;
use crate::model::{EntityId, Incident, MaintenanceEvent, Service, ServiceGroup};
use crate::stream::EntityStream;

/// Central reactive store for all statusdeck entities.
///
/// Reads never block writers for long: `DashMap` locks per shard and
/// snapshots are `Arc`-shared.
pub struct DataStore {
    pub(crate) services: EntityCollection<Service>,
    pub(crate) groups: EntityCollection<ServiceGroup>,
    pub(crate) incidents: EntityCollection<Incident>,
    pub(crate) maintenance: EntityCollection<MaintenanceEvent>,
    pub(crate) last_full_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        let (last_full_refresh, _) = watch::channel(None);

        Self {
            services: EntityCollection::new(),
            groups: EntityCollection::new(),
            incidents: EntityCollection::new(),
            maintenance: EntityCollection::new(),
            last_full_refresh,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn services_snapshot(&self) -> Arc<Vec<Arc<Service>>> {
        self.services.snapshot()
    }

    pub fn groups_snapshot(&self) -> Arc<Vec<Arc<ServiceGroup>>> {
        self.groups.snapshot()
    }

    pub fn incidents_snapshot(&self) -> Arc<Vec<Arc<Incident>>> {
        self.incidents.snapshot()
    }

    pub fn maintenance_snapshot(&self) -> Arc<Vec<Arc<MaintenanceEvent>>> {
        self.maintenance.snapshot()
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn service_by_id(&self, id: &EntityId) -> Option<Arc<Service>> {
        self.services.get(id)
    }

    pub fn group_by_id(&self, id: &EntityId) -> Option<Arc<ServiceGroup>> {
        self.groups.get(id)
    }

    pub fn incident_by_id(&self, id: &EntityId) -> Option<Arc<Incident>> {
        self.incidents.get(id)
    }

    pub fn maintenance_by_id(&self, id: &EntityId) -> Option<Arc<MaintenanceEvent>> {
        self.maintenance.get(id)
    }

    /// Ids of every known service, used to validate affected-service lists.
    pub fn service_ids(&self) -> Vec<EntityId> {
        self.services.ids()
    }

    // ── Count accessors ──────────────────────────────────────────────

    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn incident_count(&self) -> usize {
        self.incidents.len()
    }

    pub fn maintenance_count(&self) -> usize {
        self.maintenance.len()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_services(&self) -> EntityStream<Service> {
        EntityStream::new(self.services.subscribe())
    }

    pub fn subscribe_groups(&self) -> EntityStream<ServiceGroup> {
        EntityStream::new(self.groups.subscribe())
    }

    pub fn subscribe_incidents(&self) -> EntityStream<Incident> {
        EntityStream::new(self.incidents.subscribe())
    }

    pub fn subscribe_maintenance(&self) -> EntityStream<MaintenanceEvent> {
        EntityStream::new(self.maintenance.subscribe())
    }

    // ── Single-entity writes ─────────────────────────────────────────

    pub(crate) fn upsert_service(&self, service: Service) {
        self.services.upsert(service);
    }

    pub(crate) fn upsert_group(&self, group: ServiceGroup) {
        self.groups.upsert(group);
    }

    pub(crate) fn upsert_incident(&self, incident: Incident) {
        self.incidents.upsert(incident);
    }

    pub(crate) fn upsert_maintenance(&self, event: MaintenanceEvent) {
        self.maintenance.upsert(event);
    }

    /// Remove a service and strip it from every group's member list.
    pub(crate) fn remove_service(&self, id: &EntityId) -> Option<Arc<Service>> {
        let removed = self.services.remove(id)?;
        for group in self.groups.snapshot().iter() {
            if group.contains(id) {
                let mut updated = ServiceGroup::clone(group);
                updated.services.retain(|member| member != id);
                self.groups.upsert(updated);
            }
        }
        Some(removed)
    }

    /// Remove a group and detach every service that pointed at it.
    pub(crate) fn remove_group(&self, id: &EntityId) -> Option<Arc<ServiceGroup>> {
        let removed = self.groups.remove(id)?;
        for service in self.services.snapshot().iter() {
            if service.group.as_ref() == Some(id) {
                let mut updated = Service::clone(service);
                updated.group = None;
                self.services.upsert(updated);
            }
        }
        Some(removed)
    }

    pub(crate) fn remove_incident(&self, id: &EntityId) -> Option<Arc<Incident>> {
        self.incidents.remove(id)
    }

    pub(crate) fn remove_maintenance(&self, id: &EntityId) -> Option<Arc<MaintenanceEvent>> {
        self.maintenance.remove(id)
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_full_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_full_refresh.borrow()
    }
}
