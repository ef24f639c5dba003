use super::client::ApiClient;
use super::models::{CreateServiceRequest, ServiceResponse, UpdateServiceRequest};
use crate::error::Error;

impl ApiClient {
    pub async fn list_services(&self) -> Result<Vec<ServiceResponse>, Error> {
        self.get("services").await
    }

    pub async fn create_service(
        &self,
        body: &CreateServiceRequest,
    ) -> Result<ServiceResponse, Error> {
        self.post("services", body).await
    }

    pub async fn update_service(
        &self,
        id: &str,
        body: &UpdateServiceRequest,
    ) -> Result<ServiceResponse, Error> {
        self.patch(&format!("services/{id}"), body).await
    }

    pub async fn delete_service(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("services/{id}")).await
    }
}
