use shared::validation::ProductForm;
use shared::{Category, ProductDraft, DEFAULT_REORDER_LEVEL};
use yew::prelude::*;

use super::{bind, submit, FormActions, FormError};

#[derive(Properties, PartialEq)]
pub struct ProductEditorProps {
    pub initial: ProductForm,
    pub categories: Vec<Category>,
    pub editing: bool,
    pub saving: bool,
    pub on_save: Callback<ProductDraft>,
    pub on_cancel: Callback<()>,
}

#[function_component(ProductEditor)]
pub fn product_editor(props: &ProductEditorProps) -> Html {
    let form = {
        let initial = props.initial.clone();
        use_state(move || initial)
    };
    let error = use_state(|| None::<String>);

    let onsubmit = {
        let form = form.clone();
        submit(move || form.validate(), &error, &props.on_save)
    };

    html! {
        <section class="form-card">
            <h2>{if props.editing { "Edit Product" } else { "Add New Product" }}</h2>
            <FormError error={(*error).clone()} />
            <form {onsubmit}>
                <div class="form-grid">
                    <div class="form-group">
                        <label for="product-name">{"Product Name"}</label>
                        <input
                            type="text"
                            id="product-name"
                            value={form.name.clone()}
                            onchange={bind(&form, |f, v| f.name = v)}
                            disabled={props.saving}
                        />
                    </div>
                    <div class="form-group">
                        <label for="product-category">{"Category"}</label>
                        <select
                            id="product-category"
                            onchange={bind(&form, |f, v| f.category_id = v)}
                            disabled={props.saving}
                        >
                            <option value="" selected={form.category_id.is_empty()}>{"Select a category"}</option>
                            {for props.categories.iter().map(|category| {
                                let value = category.category_id.to_string();
                                let selected = form.category_id == value;
                                html! {
                                    <option {value} {selected}>
                                        {category.name.clone().unwrap_or_default()}
                                    </option>
                                }
                            })}
                        </select>
                    </div>
                    <div class="form-group">
                        <label for="product-price">{"Price ($)"}</label>
                        <input
                            type="number"
                            id="product-price"
                            min="0"
                            step="0.01"
                            value={form.price.clone()}
                            onchange={bind(&form, |f, v| f.price = v)}
                            disabled={props.saving}
                        />
                    </div>
                    <div class="form-group">
                        <label for="product-quantity">{"Quantity"}</label>
                        <input
                            type="number"
                            id="product-quantity"
                            min="0"
                            step="1"
                            placeholder="0"
                            value={form.quantity.clone()}
                            onchange={bind(&form, |f, v| f.quantity = v)}
                            disabled={props.saving}
                        />
                    </div>
                    <div class="form-group">
                        <label for="product-reorder">{"Reorder Level"}</label>
                        <input
                            type="number"
                            id="product-reorder"
                            min="0"
                            step="1"
                            placeholder={DEFAULT_REORDER_LEVEL.to_string()}
                            value={form.reorder_level.clone()}
                            onchange={bind(&form, |f, v| f.reorder_level = v)}
                            disabled={props.saving}
                        />
                    </div>
                </div>
                <FormActions
                    submit_label={if props.editing { "Update Product" } else { "Create Product" }}
                    saving={props.saving}
                    on_cancel={props.on_cancel.clone()}
                />
            </form>
        </section>
    }
}
