//! One module per screen, plus the `Page` enum the app navigates with.
//!
//! Navigation is a location hash (`#/products`, `#/categories/3`) so a
//! reload lands on the same screen.

pub mod categories;
pub mod category_products;
pub mod dashboard;
pub mod editing;
pub mod products;
pub mod purchases;
pub mod reports;
pub mod sales;

pub use categories::CategoriesPage;
pub use category_products::CategoryProductsPage;
pub use dashboard::Dashboard;
pub use products::ProductsPage;
pub use purchases::PurchasesPage;
pub use reports::Reports;
pub use sales::SalesPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Products,
    Categories,
    CategoryProducts(i64),
    Purchases,
    Sales,
    Reports,
}

impl Page {
    /// Entries of the navigation bar, in order
    pub const NAV: [Page; 6] = [
        Page::Dashboard,
        Page::Products,
        Page::Categories,
        Page::Purchases,
        Page::Sales,
        Page::Reports,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Products => "Products",
            Page::Categories | Page::CategoryProducts(_) => "Categories",
            Page::Purchases => "Purchases",
            Page::Sales => "Sales",
            Page::Reports => "Reports",
        }
    }

    pub fn hash(self) -> String {
        match self {
            Page::Dashboard => "#/".to_string(),
            Page::Products => "#/products".to_string(),
            Page::Categories => "#/categories".to_string(),
            Page::CategoryProducts(id) => format!("#/categories/{}", id),
            Page::Purchases => "#/purchases".to_string(),
            Page::Sales => "#/sales".to_string(),
            Page::Reports => "#/reports".to_string(),
        }
    }

    /// Unknown hashes land on the dashboard
    pub fn from_hash(hash: &str) -> Page {
        let path = hash.trim_start_matches('#').trim_matches('/');
        let mut parts = path.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("products"), None, _) => Page::Products,
            (Some("categories"), None, _) => Page::Categories,
            (Some("categories"), Some(id), None) => match id.parse() {
                Ok(id) => Page::CategoryProducts(id),
                Err(_) => Page::Categories,
            },
            (Some("purchases"), None, _) => Page::Purchases,
            (Some("sales"), None, _) => Page::Sales,
            (Some("reports"), None, _) => Page::Reports,
            _ => Page::Dashboard,
        }
    }

    /// Whether a nav entry should be highlighted while `self` is shown
    pub fn highlights(self, entry: Page) -> bool {
        self == entry || matches!((self, entry), (Page::CategoryProducts(_), Page::Categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip_for_every_page() {
        for page in Page::NAV.into_iter().chain([Page::CategoryProducts(7)]) {
            assert_eq!(Page::from_hash(&page.hash()), page);
        }
    }

    #[test]
    fn test_from_hash_tolerates_noise() {
        assert_eq!(Page::from_hash(""), Page::Dashboard);
        assert_eq!(Page::from_hash("#/sales/"), Page::Sales);
        assert_eq!(Page::from_hash("#/categories/abc"), Page::Categories);
        assert_eq!(Page::from_hash("#/nowhere"), Page::Dashboard);
        assert_eq!(Page::from_hash("#/products/3/extra"), Page::Dashboard);
    }

    #[test]
    fn test_category_products_highlights_categories() {
        assert!(Page::CategoryProducts(2).highlights(Page::Categories));
        assert!(!Page::Products.highlights(Page::Categories));
    }
}
