use super::client::ApiClient;
use super::models::{AppendUpdateRequest, CreateEventRequest, EditEventRequest, IncidentResponse};
use crate::error::Error;

impl ApiClient {
    pub async fn list_incidents(&self) -> Result<Vec<IncidentResponse>, Error> {
        self.get("incidents").await
    }

    pub async fn create_incident(
        &self,
        body: &CreateEventRequest,
    ) -> Result<IncidentResponse, Error> {
        self.post("incidents", body).await
    }

    pub async fn edit_incident(
        &self,
        id: &str,
        body: &EditEventRequest,
    ) -> Result<IncidentResponse, Error> {
        self.patch(&format!("incidents/{id}"), body).await
    }

    /// Append a timeline update; the backend returns the whole incident.
    pub async fn append_incident_update(
        &self,
        id: &str,
        body: &AppendUpdateRequest,
    ) -> Result<IncidentResponse, Error> {
        self.post(&format!("incidents/{id}/updates"), body).await
    }

    pub async fn delete_incident(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("incidents/{id}")).await
    }
}
