use std::rc::Rc;

use shared::format::format_currency;
use shared::{Column, LoadState, Product, SortDirection, SortState};
use yew::prelude::*;

use crate::components::{DataTable, ErrorBanner, PageHeader};
use crate::hooks::use_category_products;
use crate::pages::Page;

pub fn category_product_columns() -> Vec<Column<Product>> {
    vec![
        Column::numeric("product_id", "ID", |p: &Product| Some(p.product_id as f64)),
        Column::text("name", "Name", |p: &Product| p.name.as_deref()),
        Column::numeric("price", "Price", |p: &Product| p.price),
        Column::numeric("quantity", "Stock", |p: &Product| p.quantity.map(|q| q as f64)),
        Column::numeric("reorder_level", "Reorder Level", |p: &Product| p.reorder_level.map(|r| r as f64)),
    ]
}

#[derive(Properties, PartialEq)]
pub struct CategoryProductsPageProps {
    pub category_id: i64,
    pub on_navigate: Callback<Page>,
}

#[function_component(CategoryProductsPage)]
pub fn category_products_page(props: &CategoryProductsPageProps) -> Html {
    let section = use_category_products(props.category_id);
    let columns = use_memo((), |_| category_product_columns());

    let navigate_to = |target: Page| {
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |_: MouseEvent| on_navigate.emit(target))
    };

    let back = html! {
        <button type="button" class="btn btn-secondary back-link" onclick={navigate_to(Page::Categories)}>
            {"← Back to Categories"}
        </button>
    };

    let render_row = Callback::from(|product: Product| {
        html! {
            <>
                <td>{product.product_id}</td>
                <td>{product.name.clone().unwrap_or_default()}</td>
                <td>{format_currency(product.price.unwrap_or(0.0))}</td>
                <td>{product.quantity.unwrap_or(0)}</td>
                <td>{product.reorder_level.unwrap_or(0)}</td>
            </>
        }
    });

    match section.state() {
        LoadState::Loading => html! {
            <div class="page category-products-page">
                {back}
                <div class="loading">{"Loading category..."}</div>
            </div>
        },
        LoadState::Error(message) => html! {
            <div class="page category-products-page">
                {back}
                <ErrorBanner message={message.clone()} on_retry={section.reload.clone()} />
            </div>
        },
        LoadState::Ready(details) => {
            let name = details.category.name.clone().unwrap_or_else(|| "Category".to_string());
            let subtitle = details
                .category
                .description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "No description available".to_string());
            html! {
                <div class="page category-products-page">
                    <PageHeader title={format!("{} Products", name)} {subtitle}>
                        {back}
                    </PageHeader>
                    <DataTable<Product>
                        rows={details.products.clone()}
                        columns={Rc::clone(&columns)}
                        {render_row}
                        empty_message={format!("No products found in the \"{}\" category.", name)}
                        initial_sort={SortState::new("name", SortDirection::Asc)}
                    />
                    <div class="page-footer">
                        <button type="button" class="btn btn-primary" onclick={navigate_to(Page::Products)}>
                            {"Manage Products"}
                        </button>
                    </div>
                </div>
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_all_sortable() {
        let columns = category_product_columns();
        assert!(columns.iter().all(|c| c.sortable));
        assert_eq!(columns.len(), 5);
    }
}
