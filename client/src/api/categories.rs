use shared::{Category, CategoryDraft, CategoryWithProducts, MutationAck};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

pub struct CategoriesApi<T> {
    client: ApiClient<T>,
}

impl<T: Transport> CategoriesApi<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.client.get_tolerant("/categories/", &[]).await?.into_data()?)
    }

    pub async fn get(&self, id: i64) -> Result<Category, ApiError> {
        let path = format!("/categories/{}/", id);
        Ok(self.client.get_tolerant(&path, &[]).await?.into_data()?)
    }

    pub async fn create(&self, draft: &CategoryDraft) -> Result<MutationAck, ApiError> {
        Ok(self.client.post("/categories/", draft).await?.into_ack()?)
    }

    pub async fn update(&self, id: i64, draft: &CategoryDraft) -> Result<MutationAck, ApiError> {
        let path = format!("/categories/{}/", id);
        Ok(self.client.put(&path, draft).await?.into_ack()?)
    }

    pub async fn delete(&self, id: i64) -> Result<MutationAck, ApiError> {
        let path = format!("/categories/{}/", id);
        Ok(self.client.delete(&path).await?.into_ack()?)
    }

    /// The category with its products. This route is registered without the
    /// trailing slash.
    pub async fn products_in_category(&self, id: i64) -> Result<CategoryWithProducts, ApiError> {
        let path = format!("/categories/{}/products", id);
        Ok(self.client.get_tolerant(&path, &[]).await?.into_data()?)
    }
}
