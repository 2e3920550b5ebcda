//! Form state and validation for the create/edit forms.
//!
//! Forms hold raw input strings, the way the inputs report them. `validate`
//! turns them into a draft payload or the first problem found, before any
//! request goes out.

use thiserror::Error;

use crate::{
    Category, CategoryDraft, Product, ProductDraft, PurchaseDraft, SaleDraft, DEFAULT_REORDER_LEVEL,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("Not enough stock. Current stock: {available}")]
    InsufficientStock { available: i64 },
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(trimmed)
    }
}

fn parse_f64(value: &str, field: &'static str) -> Result<f64, ValidationError> {
    required(value, field)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::NotANumber(field))
}

fn parse_i64(value: &str, field: &'static str) -> Result<i64, ValidationError> {
    let raw = required(value, field)?;
    raw.parse::<i64>()
        .or_else(|_| match raw.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 => Ok(f as i64),
            _ => Err(ValidationError::NotANumber(field)),
        })
}

/// Empty input falls back to `default`
fn parse_i64_or(value: &str, field: &'static str, default: i64) -> Result<i64, ValidationError> {
    if value.trim().is_empty() {
        Ok(default)
    } else {
        parse_i64(value, field)
    }
}

fn non_negative<T: PartialOrd + Default>(value: T, field: &'static str) -> Result<T, ValidationError> {
    if value < T::default() {
        Err(ValidationError::Negative(field))
    } else {
        Ok(value)
    }
}

fn positive<T: PartialOrd + Default>(value: T, field: &'static str) -> Result<T, ValidationError> {
    if value <= T::default() {
        Err(ValidationError::NotPositive(field))
    } else {
        Ok(value)
    }
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub category_id: String,
    pub price: String,
    pub quantity: String,
    pub reorder_level: String,
}

impl ProductForm {
    /// Pre-filled form for editing an existing product
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone().unwrap_or_default(),
            category_id: product.category_id.map(|id| id.to_string()).unwrap_or_default(),
            price: product.price.map(|p| p.to_string()).unwrap_or_default(),
            quantity: product.quantity.map(|q| q.to_string()).unwrap_or_default(),
            reorder_level: product.reorder_level.map(|r| r.to_string()).unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ProductDraft, ValidationError> {
        let name = required(&self.name, "Name")?.to_string();
        let category_id = parse_i64(&self.category_id, "Category")?;
        let price = non_negative(parse_f64(&self.price, "Price")?, "Price")?;
        let quantity = non_negative(parse_i64_or(&self.quantity, "Quantity", 0)?, "Quantity")?;
        let reorder_level = non_negative(
            parse_i64_or(&self.reorder_level, "Reorder level", DEFAULT_REORDER_LEVEL)?,
            "Reorder level",
        )?;

        Ok(ProductDraft {
            name,
            category_id,
            price,
            quantity,
            reorder_level,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub description: String,
}

impl CategoryForm {
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone().unwrap_or_default(),
            description: category.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<CategoryDraft, ValidationError> {
        Ok(CategoryDraft {
            name: required(&self.name, "Name")?.to_string(),
            description: optional_text(&self.description),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseForm {
    pub product_id: String,
    pub quantity: String,
    pub purchase_price: String,
    pub supplier: String,
}

impl PurchaseForm {
    pub fn validate(&self) -> Result<PurchaseDraft, ValidationError> {
        Ok(PurchaseDraft {
            product_id: parse_i64(&self.product_id, "Product")?,
            quantity: positive(parse_i64(&self.quantity, "Quantity")?, "Quantity")?,
            purchase_price: positive(parse_f64(&self.purchase_price, "Purchase price")?, "Purchase price")?,
            supplier: optional_text(&self.supplier),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaleForm {
    pub product_id: String,
    pub quantity: String,
    pub sale_price: String,
}

impl SaleForm {
    /// Selecting a product pre-fills the unit price with its selling price
    pub fn select_product(&mut self, product_id: &str, products: &[Product]) {
        self.product_id = product_id.to_string();
        if let Some(price) = find_product(products, product_id).and_then(|p| p.price) {
            self.sale_price = price.to_string();
        }
    }

    /// Validates input and that the selected product has enough stock
    pub fn validate(&self, products: &[Product]) -> Result<SaleDraft, ValidationError> {
        let product_id = parse_i64(&self.product_id, "Product")?;
        let quantity = positive(parse_i64(&self.quantity, "Quantity")?, "Quantity")?;
        let sale_price = positive(parse_f64(&self.sale_price, "Sale price")?, "Sale price")?;

        if let Some(product) = products.iter().find(|p| p.product_id == product_id) {
            let available = product.quantity.unwrap_or(0);
            if quantity > available {
                return Err(ValidationError::InsufficientStock { available });
            }
        }

        Ok(SaleDraft {
            product_id,
            quantity,
            sale_price,
        })
    }
}

fn find_product<'a>(products: &'a [Product], product_id: &str) -> Option<&'a Product> {
    let id = product_id.trim().parse::<i64>().ok()?;
    products.iter().find(|p| p.product_id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64, quantity: i64) -> Product {
        serde_json::from_value(serde_json::json!({
            "product_id": id, "name": "Widget", "price": price, "quantity": quantity, "reorder_level": 5
        }))
        .unwrap()
    }

    #[test]
    fn test_product_form_defaults() {
        let form = ProductForm {
            name: " Widget ".into(),
            category_id: "3".into(),
            price: "9.5".into(),
            ..Default::default()
        };
        let draft = form.validate().unwrap();
        assert_eq!(draft.name, "Widget");
        assert_eq!(draft.quantity, 0);
        assert_eq!(draft.reorder_level, DEFAULT_REORDER_LEVEL);
    }

    #[test]
    fn test_product_form_rejects_bad_input() {
        let mut form = ProductForm {
            name: "Widget".into(),
            category_id: "1".into(),
            price: "abc".into(),
            ..Default::default()
        };
        assert_eq!(form.validate(), Err(ValidationError::NotANumber("Price")));

        form.price = "1".into();
        form.quantity = "-2".into();
        assert_eq!(form.validate(), Err(ValidationError::Negative("Quantity")));

        form.quantity = "2".into();
        form.category_id.clear();
        assert_eq!(form.validate(), Err(ValidationError::Required("Category")));
    }

    #[test]
    fn test_product_form_round_trips_existing_product() {
        let form = ProductForm::from_product(&product(4, 12.0, 8));
        assert_eq!(form.quantity, "8");
        assert_eq!(form.validate().unwrap_err(), ValidationError::Required("Category"));
    }

    #[test]
    fn test_purchase_requires_positive_values() {
        let form = PurchaseForm {
            product_id: "1".into(),
            quantity: "0".into(),
            purchase_price: "3".into(),
            supplier: "  ".into(),
        };
        assert_eq!(form.validate(), Err(ValidationError::NotPositive("Quantity")));

        let form = PurchaseForm { quantity: "5".into(), ..form };
        let draft = form.validate().unwrap();
        assert_eq!(draft.supplier, None);
    }

    #[test]
    fn test_sale_prefill_and_stock_check() {
        let products = vec![product(1, 4.25, 3)];
        let mut form = SaleForm::default();
        form.select_product("1", &products);
        assert_eq!(form.sale_price, "4.25");

        form.quantity = "5".into();
        assert_eq!(
            form.validate(&products),
            Err(ValidationError::InsufficientStock { available: 3 })
        );
        assert_eq!(
            ValidationError::InsufficientStock { available: 3 }.to_string(),
            "Not enough stock. Current stock: 3"
        );

        form.quantity = "3".into();
        assert_eq!(form.validate(&products).unwrap().quantity, 3);
    }

    #[test]
    fn test_category_form() {
        let form = CategoryForm { name: "".into(), description: "x".into() };
        assert_eq!(form.validate(), Err(ValidationError::Required("Name")));
    }
}
