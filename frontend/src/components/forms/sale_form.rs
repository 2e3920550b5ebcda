use shared::format::format_currency;
use shared::validation::SaleForm;
use shared::{Product, SaleDraft};
use yew::prelude::*;

use super::{bind, field_value, submit, FormActions, FormError};

/// `Widget (12 in stock)` or `Widget (Out of Stock)`
pub fn product_option_label(product: &Product) -> String {
    let name = product.name.as_deref().unwrap_or("Unnamed product");
    match product.quantity.unwrap_or(0) {
        q if q <= 0 => format!("{} (Out of Stock)", name),
        q => format!("{} ({} in stock)", name, q),
    }
}

/// Running total shown under the form once both numbers parse
pub fn sale_total(form: &SaleForm) -> Option<f64> {
    let quantity = form.quantity.trim().parse::<f64>().ok()?;
    let price = form.sale_price.trim().parse::<f64>().ok()?;
    Some(quantity * price)
}

#[derive(Properties, PartialEq)]
pub struct SaleEditorProps {
    pub products: Vec<Product>,
    pub saving: bool,
    pub on_save: Callback<SaleDraft>,
    pub on_cancel: Callback<()>,
}

#[function_component(SaleEditor)]
pub fn sale_editor(props: &SaleEditorProps) -> Html {
    let form = use_state(SaleForm::default);
    let error = use_state(|| None::<String>);

    let onsubmit = {
        let form = form.clone();
        let products = props.products.clone();
        submit(move || form.validate(&products), &error, &props.on_save)
    };

    let on_product = {
        let form = form.clone();
        let products = props.products.clone();
        Callback::from(move |e: Event| {
            let mut next = (*form).clone();
            next.select_product(&field_value(&e), &products);
            form.set(next);
        })
    };

    let selected = props
        .products
        .iter()
        .find(|p| p.product_id.to_string() == form.product_id);

    html! {
        <section class="form-card">
            <h2>{"Record New Sale"}</h2>
            <FormError error={(*error).clone()} />
            <form {onsubmit}>
                <div class="form-grid">
                    <div class="form-group">
                        <label for="sale-product">{"Product"}</label>
                        <select id="sale-product" onchange={on_product} disabled={props.saving}>
                            <option value="" selected={form.product_id.is_empty()}>{"Select a product"}</option>
                            {for props.products.iter().map(|product| {
                                let value = product.product_id.to_string();
                                let selected = form.product_id == value;
                                let disabled = product.quantity.unwrap_or(0) <= 0;
                                html! {
                                    <option {value} {selected} {disabled}>{product_option_label(product)}</option>
                                }
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="sale-quantity">{"Quantity"}</label>
                        <input
                            type="number"
                            id="sale-quantity"
                            min="1"
                            step="1"
                            value={form.quantity.clone()}
                            onchange={bind(&form, |f, v| f.quantity = v)}
                            disabled={props.saving}
                        />
                        {if let Some(product) = selected {
                            html! {
                                <p class="form-hint">{format!("Available stock: {}", product.quantity.unwrap_or(0))}</p>
                            }
                        } else { html! {} }}
                    </div>
                    <div class="form-group">
                        <label for="sale-price">{"Sale Price ($)"}</label>
                        <input
                            type="number"
                            id="sale-price"
                            min="0"
                            step="0.01"
                            value={form.sale_price.clone()}
                            onchange={bind(&form, |f, v| f.sale_price = v)}
                            disabled={props.saving}
                        />
                    </div>
                    {if let Some(total) = sale_total(&form) {
                        html! {
                            <div class="form-total">
                                <span>{"Total:"}</span>
                                <strong>{format_currency(total)}</strong>
                            </div>
                        }
                    } else { html! {} }}
                </div>
                <FormActions submit_label="Record Sale" saving={props.saving} on_cancel={props.on_cancel.clone()} />
            </form>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: Option<i64>) -> Product {
        serde_json::from_value(serde_json::json!({
            "product_id": 4,
            "name": "Hammer",
            "price": 12.5,
            "quantity": quantity,
        }))
        .unwrap()
    }

    #[test]
    fn test_option_label_shows_stock() {
        assert_eq!(product_option_label(&product(Some(12))), "Hammer (12 in stock)");
        assert_eq!(product_option_label(&product(Some(0))), "Hammer (Out of Stock)");
        assert_eq!(product_option_label(&product(None)), "Hammer (Out of Stock)");
    }

    #[test]
    fn test_sale_total_needs_both_numbers() {
        let mut form = SaleForm::default();
        form.select_product("4", &[product(Some(3))]);
        assert_eq!(sale_total(&form), None);

        form.quantity = "2".into();
        assert_eq!(sale_total(&form), Some(25.0));
    }
}
