//! One typed wrapper per backend resource.
//!
//! Paths follow the backend's routes as they are: categories and purchases
//! are registered with trailing slashes, products and sales without.

mod categories;
mod dashboard;
mod products;
mod purchases;
mod sales;

pub use categories::CategoriesApi;
pub use dashboard::DashboardApi;
pub use products::ProductsApi;
pub use purchases::PurchasesApi;
pub use sales::SalesApi;

use crate::client::ApiClient;
use crate::transport::Transport;

impl<T: Transport> ApiClient<T> {
    pub fn products(&self) -> ProductsApi<T> {
        ProductsApi::new(self.clone())
    }

    pub fn categories(&self) -> CategoriesApi<T> {
        CategoriesApi::new(self.clone())
    }

    pub fn purchases(&self) -> PurchasesApi<T> {
        PurchasesApi::new(self.clone())
    }

    pub fn sales(&self) -> SalesApi<T> {
        SalesApi::new(self.clone())
    }

    pub fn dashboard(&self) -> DashboardApi<T> {
        DashboardApi::new(self.clone())
    }
}
