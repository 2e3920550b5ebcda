use shared::{CategorySales, MutationAck, Sale, SaleDraft, TopSeller};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

pub struct SalesApi<T> {
    client: ApiClient<T>,
}

impl<T: Transport> SalesApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Sale>, ApiError> {
        Ok(self.client.get_tolerant("/sales", &[]).await?.into_data()?)
    }

    pub async fn get(&self, id: i64) -> Result<Sale, ApiError> {
        let path = format!("/sales/{}", id);
        Ok(self.client.get_tolerant(&path, &[]).await?.into_data()?)
    }

    pub async fn create(&self, draft: &SaleDraft) -> Result<MutationAck, ApiError> {
        Ok(self.client.post("/sales", draft).await?.into_ack()?)
    }

    pub async fn by_product(&self, product_id: i64) -> Result<Vec<Sale>, ApiError> {
        let path = format!("/sales/product/{}", product_id);
        Ok(self.client.get_tolerant(&path, &[]).await?.into_data()?)
    }

    pub async fn recent(&self, limit: u32) -> Result<Vec<Sale>, ApiError> {
        let params = [("limit", limit.to_string())];
        Ok(self.client.get_tolerant("/sales/recent", &params).await?.into_data()?)
    }

    pub async fn top_selling(&self, limit: u32) -> Result<Vec<TopSeller>, ApiError> {
        let params = [("limit", limit.to_string())];
        Ok(self
            .client
            .get_tolerant("/sales/top-selling", &params)
            .await?
            .into_data()?)
    }

    pub async fn by_category(&self) -> Result<Vec<CategorySales>, ApiError> {
        Ok(self.client.get_tolerant("/sales/by-category", &[]).await?.into_data()?)
    }
}
