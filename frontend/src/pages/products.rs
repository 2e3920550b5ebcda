use std::rc::Rc;

use inventory_client::api::{CategoriesApi, ProductsApi};
use shared::format::{format_currency, format_number};
use shared::validation::ProductForm;
use shared::{Category, Column, Product, SortDirection, SortState, SortValue};
use yew::prelude::*;

use crate::components::forms::ProductEditor;
use crate::components::{Alert, DataTable, ErrorBanner, PageHeader};
use crate::hooks::use_list_page;
use crate::pages::editing::{delete_callback, save_callback, FormMode};
use crate::services::{AppClient, GlooTransport};

fn services(client: &AppClient) -> (ProductsApi<GlooTransport>, CategoriesApi<GlooTransport>) {
    (client.products(), client.categories())
}

/// The category's current name, falling back to the name joined by the
/// product endpoint
pub fn category_label(product: &Product, categories: &[Category]) -> Option<String> {
    product
        .category_id
        .and_then(|id| categories.iter().find(|c| c.category_id == id))
        .and_then(|c| c.name.clone())
        .or_else(|| product.category_name.clone())
}

pub fn product_columns(categories: &[Category]) -> Vec<Column<Product>> {
    let categories = categories.to_vec();
    vec![
        Column::numeric("product_id", "ID", |p: &Product| Some(p.product_id as f64)),
        Column::text("name", "Name", |p: &Product| p.name.as_deref()),
        Column::derived("category_name", "Category", move |p: &Product| {
            category_label(p, &categories).map(SortValue::Text)
        }),
        Column::numeric("price", "Price", |p: &Product| p.price),
        Column::derived("base_price", "Base Price", |p: &Product| {
            p.price.map(|_| SortValue::Number(p.effective_base_price()))
        }),
        Column::numeric("quantity", "Stock", |p: &Product| p.quantity.map(|q| q as f64)),
        Column::text("stock_status", "Status", |p: &Product| p.stock_status.as_deref()).unsortable(),
    ]
}

#[function_component(ProductsPage)]
pub fn products_page() -> Html {
    let page = use_list_page(services);
    let mode = use_state(|| FormMode::<Product>::Closed);
    let saving = use_state(|| false);
    let state = page.state();

    let columns = use_memo(state.aux.clone(), |categories| product_columns(categories));
    let on_save = save_callback(&page, &mode, &saving);
    let on_delete = delete_callback(&page, "product");

    let toggle_form = {
        let mode = mode.clone();
        Callback::from(move |_: ()| {
            mode.set(if mode.is_open() { FormMode::Closed } else { FormMode::Creating });
        })
    };
    let close_form = {
        let mode = mode.clone();
        Callback::from(move |_: ()| mode.set(FormMode::Closed))
    };

    let render_row = {
        let categories = state.aux.clone();
        let mode = mode.clone();
        Callback::from(move |product: Product| {
            let on_edit = {
                let mode = mode.clone();
                let product = product.clone();
                Callback::from(move |_: MouseEvent| mode.set(FormMode::Editing(product.clone())))
            };
            let on_delete = {
                let on_delete = on_delete.clone();
                let id = product.product_id;
                Callback::from(move |_: MouseEvent| on_delete.emit(id))
            };
            let status_class = if product.is_low_stock() { "badge warning" } else { "badge success" };
            html! {
                <>
                    <td>{product.product_id}</td>
                    <td>{product.name.clone().unwrap_or_default()}</td>
                    <td>{category_label(&product, &categories).unwrap_or_else(|| "N/A".to_string())}</td>
                    <td>{format_currency(product.price.unwrap_or(0.0))}</td>
                    <td>{format_currency(product.effective_base_price())}</td>
                    <td>{format_number(product.quantity.unwrap_or(0))}</td>
                    <td><span class={status_class}>{product.stock_label()}</span></td>
                    <td class="row-actions">
                        <button type="button" class="btn btn-small" onclick={on_edit}>{"Edit"}</button>
                        <button type="button" class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
                    </td>
                </>
            }
        })
    };

    let dismiss = {
        let page = page.clone();
        Callback::from(move |id: u32| page.dismiss(id))
    };
    let retry = {
        let page = page.clone();
        Callback::from(move |_: ()| page.reload())
    };

    html! {
        <div class="page products-page">
            <PageHeader
                title="Products"
                subtitle="Manage your product inventory"
                action={Some((AttrValue::from(if mode.is_open() { "Cancel" } else { "Add Product" }), toggle_form))}
            />
            <Alert notification={state.notification.clone()} on_dismiss={dismiss} />

            {match &*mode {
                FormMode::Closed => html! {},
                open => html! {
                    <ProductEditor
                        key={open.key()}
                        initial={match open {
                            FormMode::Editing(product) => ProductForm::from_product(product),
                            _ => ProductForm::default(),
                        }}
                        categories={state.aux.clone()}
                        editing={open.editing_id().is_some()}
                        saving={*saving}
                        on_save={on_save}
                        on_cancel={close_form}
                    />
                },
            }}

            {if let Some(message) = state.state.error() {
                html! { <ErrorBanner message={message.to_string()} on_retry={retry} /> }
            } else {
                html! {
                    <DataTable<Product>
                        rows={state.rows().to_vec()}
                        columns={Rc::clone(&columns)}
                        {render_row}
                        loading={state.state.is_loading()}
                        empty_message="No products found. Add your first product using the button above."
                        initial_sort={SortState::new("name", SortDirection::Asc)}
                        actions_header="Actions"
                    />
                }
            }}
        </div>
    }
}
