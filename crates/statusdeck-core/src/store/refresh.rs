// ── Full refresh application logic ──
//
// Applies a complete snapshot fetched from the backend. Each collection is
// replaced wholesale so entities deleted elsewhere disappear locally too.

use chrono::Utc;

use super::DataStore;
use crate::model::{Incident, MaintenanceEvent, Service, ServiceGroup};

impl DataStore {
    pub(crate) fn apply_snapshot(
        &self,
        services: Vec<Service>,
        groups: Vec<ServiceGroup>,
        incidents: Vec<Incident>,
        maintenance: Vec<MaintenanceEvent>,
    ) {
        self.services.replace_all(services);
        self.groups.replace_all(groups);
        self.incidents.replace_all(incidents);
        self.maintenance.replace_all(maintenance);

        let _ = self.last_full_refresh.send(Some(Utc::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityId, ServiceStatus};

    #[test]
    fn snapshot_replaces_previous_contents() {
        let store = DataStore::new();
        let svc = |id: &str| Service {
            id: id.into(),
            name: id.into(),
            description: String::new(),
            status: ServiceStatus::Operational,
            group: None,
            uptime: None,
            last_updated: None,
        };

        store.apply_snapshot(vec![svc("old")], vec![], vec![], vec![]);
        store.apply_snapshot(vec![svc("a"), svc("b")], vec![], vec![], vec![]);

        assert_eq!(
            store.service_ids(),
            vec![EntityId::from("a"), EntityId::from("b")]
        );
        assert!(store.last_full_refresh().is_some());
    }
}
