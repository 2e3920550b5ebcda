use shared::{MutationAck, Purchase, PurchaseDraft};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

pub struct PurchasesApi<T> {
    client: ApiClient<T>,
}

impl<T: Transport> PurchasesApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Purchase>, ApiError> {
        Ok(self.client.get_tolerant("/purchases/", &[]).await?.into_data()?)
    }

    pub async fn get(&self, id: i64) -> Result<Purchase, ApiError> {
        let path = format!("/purchases/{}/", id);
        Ok(self.client.get_tolerant(&path, &[]).await?.into_data()?)
    }

    /// Recording a purchase also raises the product's stock server-side
    pub async fn create(&self, draft: &PurchaseDraft) -> Result<MutationAck, ApiError> {
        Ok(self.client.post("/purchases/", draft).await?.into_ack()?)
    }

    pub async fn by_product(&self, product_id: i64) -> Result<Vec<Purchase>, ApiError> {
        let path = format!("/purchases/product/{}/", product_id);
        Ok(self.client.get_tolerant(&path, &[]).await?.into_data()?)
    }

    pub async fn recent(&self, limit: u32) -> Result<Vec<Purchase>, ApiError> {
        let params = [("limit", limit.to_string())];
        Ok(self
            .client
            .get_tolerant("/purchases/recent/", &params)
            .await?
            .into_data()?)
    }
}
