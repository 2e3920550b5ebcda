use shared::{CategorySales, DashboardSnapshot, InventorySummary, StockAlert, TopSeller};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

pub struct DashboardApi<T> {
    client: ApiClient<T>,
}

impl<T: Transport> DashboardApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn overview(&self) -> Result<DashboardSnapshot, ApiError> {
        Ok(self.client.get_tolerant("/dashboard/overview", &[]).await?.into_data()?)
    }

    pub async fn low_stock(&self) -> Result<Vec<StockAlert>, ApiError> {
        Ok(self.client.get_tolerant("/dashboard/low-stock", &[]).await?.into_data()?)
    }

    pub async fn top_selling(&self) -> Result<Vec<TopSeller>, ApiError> {
        Ok(self.client.get_tolerant("/dashboard/top-selling", &[]).await?.into_data()?)
    }

    pub async fn inventory_summary(&self) -> Result<InventorySummary, ApiError> {
        Ok(self
            .client
            .get_tolerant("/dashboard/inventory-summary", &[])
            .await?
            .into_data()?)
    }

    pub async fn sales_by_category(&self) -> Result<Vec<CategorySales>, ApiError> {
        Ok(self
            .client
            .get_tolerant("/dashboard/sales-by-category", &[])
            .await?
            .into_data()?)
    }
}
