use std::rc::Rc;

use inventory_client::api::{ProductsApi, PurchasesApi};
use shared::format::{format_currency, format_date};
use shared::{Column, Purchase, SortDirection, SortState, SortValue};
use yew::prelude::*;

use crate::components::forms::PurchaseEditor;
use crate::components::{Alert, DataTable, ErrorBanner, PageHeader};
use crate::hooks::use_list_page;
use crate::pages::editing::{save_callback, FormMode};
use crate::services::{AppClient, GlooTransport};

fn services(client: &AppClient) -> (PurchasesApi<GlooTransport>, ProductsApi<GlooTransport>) {
    (client.purchases(), client.products())
}

pub fn purchase_columns() -> Vec<Column<Purchase>> {
    vec![
        Column::numeric("purchase_id", "ID", |p: &Purchase| Some(p.purchase_id as f64)),
        Column::text("product_name", "Product", |p: &Purchase| p.product_name.as_deref()),
        Column::date("purchase_date", "Date", |p: &Purchase| p.purchase_date.as_deref()),
        Column::numeric("quantity", "Quantity", |p: &Purchase| p.quantity.map(|q| q as f64)),
        Column::numeric("purchase_price", "Unit Price", |p: &Purchase| p.purchase_price),
        Column::derived("total_cost", "Total", |p: &Purchase| Some(SortValue::Number(p.total_cost()))),
        Column::text("supplier", "Supplier", |p: &Purchase| p.supplier.as_deref()),
    ]
}

#[function_component(PurchasesPage)]
pub fn purchases_page() -> Html {
    let page = use_list_page(services);
    let mode = use_state(|| FormMode::<Purchase>::Closed);
    let saving = use_state(|| false);
    let columns = use_memo((), |_| purchase_columns());
    let state = page.state();

    let on_save = save_callback(&page, &mode, &saving);

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

    let render_row = Callback::from(|purchase: Purchase| {
        html! {
            <>
                <td>{purchase.purchase_id}</td>
                <td>{purchase.product_name.clone().unwrap_or_else(|| "Unknown".to_string())}</td>
                <td>{format_date(purchase.purchase_date.as_deref())}</td>
                <td>{purchase.quantity.unwrap_or(0)}</td>
                <td>{format_currency(purchase.purchase_price.unwrap_or(0.0))}</td>
                <td>{format_currency(purchase.total_cost())}</td>
                <td>{purchase.supplier.clone().unwrap_or_else(|| "N/A".to_string())}</td>
            </>
        }
    });

    let dismiss = {
        let page = page.clone();
        Callback::from(move |id: u32| page.dismiss(id))
    };
    let retry = {
        let page = page.clone();
        Callback::from(move |_: ()| page.reload())
    };

    html! {
        <div class="page purchases-page">
            <PageHeader
                title="Purchases"
                subtitle="Record and track product purchases"
                action={Some((AttrValue::from(if mode.is_open() { "Cancel" } else { "Record Purchase" }), toggle_form))}
            />
            <Alert notification={state.notification.clone()} on_dismiss={dismiss} />

            {if mode.is_open() {
                html! {
                    <PurchaseEditor
                        products={state.aux.clone()}
                        saving={*saving}
                        on_save={on_save}
                        on_cancel={close_form}
                    />
                }
            } else { html! {} }}

            {if let Some(message) = state.state.error() {
                html! { <ErrorBanner message={message.to_string()} on_retry={retry} /> }
            } else {
                html! {
                    <DataTable<Purchase>
                        rows={state.rows().to_vec()}
                        columns={Rc::clone(&columns)}
                        {render_row}
                        loading={state.state.is_loading()}
                        empty_message="No purchases recorded. Record your first purchase using the button above."
                        initial_sort={SortState::new("purchase_id", SortDirection::Desc)}
                    />
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::sort::sort_rows;

    fn purchase(id: i64, quantity: i64, price: f64, date: Option<&str>) -> Purchase {
        serde_json::from_value(serde_json::json!({
            "purchase_id": id,
            "product_name": "Nails",
            "quantity": quantity,
            "purchase_price": price,
            "purchase_date": date,
        }))
        .unwrap()
    }

    #[test]
    fn test_total_column_sorts_by_computed_cost() {
        let rows = vec![purchase(1, 10, 1.0, None), purchase(2, 2, 3.0, None), purchase(3, 1, 20.0, None)];
        let sorted = sort_rows(&rows, &purchase_columns(), "total_cost", SortDirection::Desc);
        let ids: Vec<i64> = sorted.iter().map(|p| p.purchase_id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_date_column_puts_unparseable_dates_first() {
        let rows = vec![
            purchase(1, 1, 1.0, Some("2025-04-15 10:30:00")),
            purchase(2, 1, 1.0, Some("not a date")),
            purchase(3, 1, 1.0, Some("2024-01-02")),
        ];
        let sorted = sort_rows(&rows, &purchase_columns(), "purchase_date", SortDirection::Asc);
        let ids: Vec<i64> = sorted.iter().map(|p| p.purchase_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
