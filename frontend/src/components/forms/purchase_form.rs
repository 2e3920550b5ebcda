use shared::validation::PurchaseForm;
use shared::{Product, PurchaseDraft};
use yew::prelude::*;

use super::{bind, submit, FormActions, FormError};

#[derive(Properties, PartialEq)]
pub struct PurchaseEditorProps {
    pub products: Vec<Product>,
    pub saving: bool,
    pub on_save: Callback<PurchaseDraft>,
    pub on_cancel: Callback<()>,
}

#[function_component(PurchaseEditor)]
pub fn purchase_editor(props: &PurchaseEditorProps) -> Html {
    let form = use_state(PurchaseForm::default);
    let error = use_state(|| None::<String>);

    let onsubmit = {
        let form = form.clone();
        submit(move || form.validate(), &error, &props.on_save)
    };

    html! {
        <section class="form-card">
            <h2>{"Record New Purchase"}</h2>
            <FormError error={(*error).clone()} />
            <form {onsubmit}>
                <div class="form-grid">
                    <div class="form-group">
                        <label for="purchase-product">{"Product"}</label>
                        <select
                            id="purchase-product"
                            onchange={bind(&form, |f, v| f.product_id = v)}
                            disabled={props.saving}
                        >
                            <option value="" selected={form.product_id.is_empty()}>{"Select a product"}</option>
                            {for props.products.iter().map(|product| {
                                let value = product.product_id.to_string();
                                let selected = form.product_id == value;
                                html! {
                                    <option {value} {selected}>{product.name.clone().unwrap_or_default()}</option>
                                }
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="purchase-quantity">{"Quantity"}</label>
                        <input
                            type="number"
                            id="purchase-quantity"
                            min="1"
                            step="1"
                            value={form.quantity.clone()}
                            onchange={bind(&form, |f, v| f.quantity = v)}
                            disabled={props.saving}
                        />
                    </div>
                    <div class="form-group">
                        <label for="purchase-price">{"Purchase Price ($)"}</label>
                        <input
                            type="number"
                            id="purchase-price"
                            min="0.01"
                            step="0.01"
                            value={form.purchase_price.clone()}
                            onchange={bind(&form, |f, v| f.purchase_price = v)}
                            disabled={props.saving}
                        />
                    </div>
                    <div class="form-group">
                        <label for="purchase-supplier">{"Supplier"}</label>
                        <input
                            type="text"
                            id="purchase-supplier"
                            placeholder="Optional"
                            value={form.supplier.clone()}
                            onchange={bind(&form, |f, v| f.supplier = v)}
                            disabled={props.saving}
                        />
                    </div>
                </div>
                <FormActions submit_label="Record Purchase" saving={props.saving} on_cancel={props.on_cancel.clone()} />
            </form>
        </section>
    }
}
