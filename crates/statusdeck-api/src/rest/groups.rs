use super::client::ApiClient;
use super::models::{CreateServiceGroupRequest, ServiceGroupResponse, UpdateServiceGroupRequest};
use crate::error::Error;

impl ApiClient {
    pub async fn list_service_groups(&self) -> Result<Vec<ServiceGroupResponse>, Error> {
        self.get("service-groups").await
    }

    pub async fn create_service_group(
        &self,
        body: &CreateServiceGroupRequest,
    ) -> Result<ServiceGroupResponse, Error> {
        self.post("service-groups", body).await
    }

    pub async fn update_service_group(
        &self,
        id: &str,
        body: &UpdateServiceGroupRequest,
    ) -> Result<ServiceGroupResponse, Error> {
        self.patch(&format!("service-groups/{id}"), body).await
    }

    pub async fn delete_service_group(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("service-groups/{id}")).await
    }
}
