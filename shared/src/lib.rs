use serde::{Deserialize, Serialize};

pub mod envelope;
pub mod format;
pub mod lenient;
pub mod page;
pub mod sort;
pub mod validation;

pub use envelope::{Envelope, EnvelopeError, MutationAck};
pub use page::{
    DashboardPage, DetailAction, ListPage, LoadState, Notification, NotificationKind, PageAction, ReportAction,
    ReportPage, NOTIFICATION_TTL_MS,
};
pub use sort::{Column, ColumnKind, SortDirection, SortState, SortValue};
pub use validation::ValidationError;

/// Default markup applied by the backend when a product is created without one
pub const DEFAULT_PROFIT_PERCENTAGE: f64 = 30.0;

/// Default reorder level used when the product form leaves it empty
pub const DEFAULT_REORDER_LEVEL: i64 = 10;

/// Anything with a backend-assigned numeric id
pub trait Identified {
    fn id(&self) -> i64;
}

/// A product row as returned by `GET /products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "lenient::i64_or_zero")]
    pub product_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub category_id: Option<i64>,
    /// Joined by the list endpoint; absent on some single-product responses
    #[serde(default)]
    pub category_name: Option<String>,
    /// Selling price
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub price: Option<f64>,
    /// Price without markup
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub base_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub profit_percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub reorder_level: Option<i64>,
    /// Server-computed label ("In Stock", "Low Stock", ...)
    #[serde(default)]
    pub stock_status: Option<String>,
}

impl Product {
    /// A product is low on stock once its quantity reaches the reorder level
    pub fn is_low_stock(&self) -> bool {
        self.quantity.unwrap_or(0) <= self.reorder_level.unwrap_or(0)
    }

    /// Stock label, preferring the backend's own classification
    pub fn stock_label(&self) -> String {
        if let Some(status) = self.stock_status.as_ref().filter(|s| !s.is_empty()) {
            return status.clone();
        }
        if self.is_low_stock() {
            "Low Stock".to_string()
        } else {
            "In Stock".to_string()
        }
    }

    /// Price without markup. Uses the backend's value when it sent one,
    /// otherwise `price / (1 + profit_percentage / 100)`.
    pub fn effective_base_price(&self) -> f64 {
        if let Some(base) = self.base_price {
            return base;
        }
        let price = self.price.unwrap_or(0.0);
        let pct = self.profit_percentage.unwrap_or(DEFAULT_PROFIT_PERCENTAGE);
        base_price_for(price, pct)
    }
}

/// Base price for a selling price and markup percentage. Non-positive prices
/// have no base price.
pub fn base_price_for(price: f64, profit_percentage: f64) -> f64 {
    if price > 0.0 {
        price / (1.0 + profit_percentage / 100.0)
    } else {
        0.0
    }
}

impl Identified for Product {
    fn id(&self) -> i64 {
        self.product_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(deserialize_with = "lenient::i64_or_zero")]
    pub category_id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Computed server-side; read-only
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub product_count: Option<i64>,
}

impl Identified for Category {
    fn id(&self) -> i64 {
        self.category_id
    }
}

/// `GET /categories/{id}/products`: the category with its products inlined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(deserialize_with = "lenient::i64_or_zero")]
    pub purchase_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub quantity: Option<i64>,
    /// Unit purchase price
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub purchase_price: Option<f64>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub purchase_date: Option<String>,
}

impl Purchase {
    /// `quantity × purchase_price`, missing operands counting as zero
    pub fn total_cost(&self) -> f64 {
        self.quantity.unwrap_or(0) as f64 * self.purchase_price.unwrap_or(0.0)
    }
}

impl Identified for Purchase {
    fn id(&self) -> i64 {
        self.purchase_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(deserialize_with = "lenient::i64_or_zero")]
    pub sale_id: i64,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub quantity: Option<i64>,
    /// Unit sale price
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub sale_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub profit: Option<f64>,
}

impl Sale {
    /// `quantity × sale_price`, missing operands counting as zero
    pub fn total(&self) -> f64 {
        self.quantity.unwrap_or(0) as f64 * self.sale_price.unwrap_or(0.0)
    }
}

impl Identified for Sale {
    fn id(&self) -> i64 {
        self.sale_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    #[serde(default, deserialize_with = "lenient::f64_or_zero")]
    pub total_value: f64,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub total_items: i64,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub products_count: i64,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub low_stock_count: i64,
}

/// A row of the low-stock view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAlert {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub product_id: Option<i64>,
    #[serde(default, alias = "name")]
    pub product_name: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub reorder_level: i64,
}

impl StockAlert {
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_out_of_stock() {
            "Out of Stock"
        } else {
            "Low Stock"
        }
    }
}

/// A row of the top-selling view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSeller {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub product_id: Option<i64>,
    #[serde(default, alias = "name")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub total_quantity_sold: i64,
    #[serde(default, alias = "total_revenue", deserialize_with = "lenient::f64_or_zero")]
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub total_quantity_sold: i64,
    #[serde(default, alias = "total_sales", deserialize_with = "lenient::f64_or_zero")]
    pub total_sales_value: f64,
}

/// Aggregate view returned by `GET /dashboard/overview`. Never mutated locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub inventory_summary: InventorySummary,
    #[serde(default, alias = "low_stock_products", deserialize_with = "list_or_empty")]
    pub low_stock: Vec<StockAlert>,
    #[serde(default, alias = "top_selling_products", deserialize_with = "list_or_empty")]
    pub top_selling: Vec<TopSeller>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub sales_by_category: Vec<CategorySales>,
}

/// Lists that arrive as `null` or some other non-array shape become empty
fn list_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

/// Payload for `POST /products` and `PUT /products/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category_id: i64,
    pub price: f64,
    pub quantity: i64,
    pub reorder_level: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDraft {
    pub product_id: i64,
    pub quantity: i64,
    pub purchase_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub product_id: i64,
    pub quantity: i64,
    pub sale_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_list_endpoint() {
        let json = r#"{
            "product_id": 7, "name": "Widget", "price": "19.99", "base_price": 15.38,
            "quantity": 4, "reorder_level": 10, "profit_percentage": 30,
            "category_name": "Tools", "category_id": 2, "stock_status": "Low Stock"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.product_id, 7);
        assert_eq!(product.price, Some(19.99));
        assert!(product.is_low_stock());
        assert_eq!(product.stock_label(), "Low Stock");
    }

    #[test]
    fn test_stock_label_without_server_status() {
        let product: Product =
            serde_json::from_str(r#"{"product_id": 1, "quantity": 50, "reorder_level": 10}"#).unwrap();
        assert!(!product.is_low_stock());
        assert_eq!(product.stock_label(), "In Stock");
    }

    #[test]
    fn test_base_price_derivation() {
        assert!((base_price_for(130.0, 30.0) - 100.0).abs() < 1e-9);
        assert_eq!(base_price_for(0.0, 30.0), 0.0);

        let product: Product = serde_json::from_str(r#"{"product_id": 1, "price": 65}"#).unwrap();
        assert!((product.effective_base_price() - 50.0).abs() < 1e-9);

        let product: Product =
            serde_json::from_str(r#"{"product_id": 1, "price": 65, "base_price": 40}"#).unwrap();
        assert_eq!(product.effective_base_price(), 40.0);
    }

    #[test]
    fn test_derived_totals() {
        let sale: Sale =
            serde_json::from_str(r#"{"sale_id": 1, "quantity": 3, "sale_price": "2.50"}"#).unwrap();
        assert_eq!(sale.total(), 7.5);

        let purchase: Purchase = serde_json::from_str(r#"{"purchase_id": 1, "quantity": 2}"#).unwrap();
        assert_eq!(purchase.total_cost(), 0.0);
    }

    #[test]
    fn test_dashboard_tolerates_missing_and_invalid_lists() {
        let json = r#"{
            "inventory_summary": {"total_value": "1200.50", "total_items": 40},
            "low_stock": null,
            "top_selling": [{"product_name": "Widget", "total_quantity_sold": 12}],
            "sales_by_category": {"unexpected": true}
        }"#;
        let snapshot: DashboardSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.inventory_summary.total_value, 1200.5);
        assert!(snapshot.low_stock.is_empty());
        assert_eq!(snapshot.top_selling.len(), 1);
        assert!(snapshot.sales_by_category.is_empty());
    }

    #[test]
    fn test_stock_alert_labels() {
        let alert: StockAlert =
            serde_json::from_str(r#"{"name": "Bolt", "quantity": 0, "reorder_level": 5}"#).unwrap();
        assert_eq!(alert.product_name.as_deref(), Some("Bolt"));
        assert_eq!(alert.status_label(), "Out of Stock");
    }

    #[test]
    fn test_category_with_products() {
        let json = r#"{
            "category_id": "3", "name": "Tools", "description": null,
            "products": [{"product_id": 1, "name": "Hammer", "price": 12.5}]
        }"#;
        let detail: CategoryWithProducts = serde_json::from_str(json).unwrap();
        assert_eq!(detail.category.category_id, 3);
        assert_eq!(detail.products[0].price, Some(12.5));
    }

    #[test]
    fn test_drafts_skip_empty_optionals() {
        let draft = CategoryDraft { name: "Tools".to_string(), description: None };
        assert_eq!(serde_json::to_string(&draft).unwrap(), r#"{"name":"Tools"}"#);
    }
}
