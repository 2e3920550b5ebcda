use shared::{InventorySummary, MutationAck, Product, ProductDraft, StockAlert, TopSeller};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

pub struct ProductsApi<T> {
    client: ApiClient<T>,
}

impl<T: Transport> ProductsApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.client.get_tolerant("/products", &[]).await?.into_data()?)
    }

    pub async fn get(&self, id: i64) -> Result<Product, ApiError> {
        let path = format!("/products/{}", id);
        Ok(self.client.get_tolerant(&path, &[]).await?.into_data()?)
    }

    pub async fn create(&self, draft: &ProductDraft) -> Result<MutationAck, ApiError> {
        Ok(self.client.post("/products", draft).await?.into_ack()?)
    }

    pub async fn update(&self, id: i64, draft: &ProductDraft) -> Result<MutationAck, ApiError> {
        let path = format!("/products/{}", id);
        Ok(self.client.put(&path, draft).await?.into_ack()?)
    }

    pub async fn delete(&self, id: i64) -> Result<MutationAck, ApiError> {
        let path = format!("/products/{}", id);
        Ok(self.client.delete(&path).await?.into_ack()?)
    }

    pub async fn low_stock(&self) -> Result<Vec<StockAlert>, ApiError> {
        Ok(self.client.get_tolerant("/products/low-stock", &[]).await?.into_data()?)
    }

    pub async fn top_selling(&self, limit: u32) -> Result<Vec<TopSeller>, ApiError> {
        let params = [("limit", limit.to_string())];
        Ok(self
            .client
            .get_tolerant("/products/top-selling", &params)
            .await?
            .into_data()?)
    }

    pub async fn inventory_summary(&self) -> Result<InventorySummary, ApiError> {
        Ok(self
            .client
            .get_tolerant("/products/inventory-summary", &[])
            .await?
            .into_data()?)
    }
}
