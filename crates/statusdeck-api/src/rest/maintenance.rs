use super::client::ApiClient;
use super::models::{
    AppendUpdateRequest, CreateEventRequest, EditEventRequest, MaintenanceResponse,
};
use crate::error::Error;

impl ApiClient {
    pub async fn list_maintenance(&self) -> Result<Vec<MaintenanceResponse>, Error> {
        self.get("maintenance").await
    }

    pub async fn create_maintenance(
        &self,
        body: &CreateEventRequest,
    ) -> Result<MaintenanceResponse, Error> {
        self.post("maintenance", body).await
    }

    pub async fn edit_maintenance(
        &self,
        id: &str,
        body: &EditEventRequest,
    ) -> Result<MaintenanceResponse, Error> {
        self.patch(&format!("maintenance/{id}"), body).await
    }

    /// Append a timeline update; the backend returns the whole event.
    pub async fn append_maintenance_update(
        &self,
        id: &str,
        body: &AppendUpdateRequest,
    ) -> Result<MaintenanceResponse, Error> {
        self.post(&format!("maintenance/{id}/updates"), body).await
    }

    pub async fn delete_maintenance(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("maintenance/{id}")).await
    }
}
