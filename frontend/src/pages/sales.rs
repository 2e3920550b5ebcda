use std::rc::Rc;

use inventory_client::api::{ProductsApi, SalesApi};
use shared::format::{format_currency, format_date};
use shared::{Column, Sale, SortDirection, SortState, SortValue};
use yew::prelude::*;

use crate::components::forms::SaleEditor;
use crate::components::{Alert, DataTable, ErrorBanner, PageHeader};
use crate::hooks::use_list_page;
use crate::pages::editing::{save_callback, FormMode};
use crate::services::{AppClient, GlooTransport};

fn services(client: &AppClient) -> (SalesApi<GlooTransport>, ProductsApi<GlooTransport>) {
    (client.sales(), client.products())
}

pub fn sale_columns() -> Vec<Column<Sale>> {
    vec![
        Column::numeric("sale_id", "ID", |s: &Sale| Some(s.sale_id as f64)),
        Column::text("product_name", "Product", |s: &Sale| s.product_name.as_deref()),
        Column::date("sale_date", "Date", |s: &Sale| s.sale_date.as_deref()),
        Column::numeric("quantity", "Quantity", |s: &Sale| s.quantity.map(|q| q as f64)),
        Column::numeric("sale_price", "Unit Price", |s: &Sale| s.sale_price),
        Column::derived("total", "Total", |s: &Sale| Some(SortValue::Number(s.total()))),
        Column::numeric("profit", "Profit", |s: &Sale| s.profit),
    ]
}

#[function_component(SalesPage)]
pub fn sales_page() -> Html {
    let page = use_list_page(services);
    let mode = use_state(|| FormMode::<Sale>::Closed);
    let saving = use_state(|| false);
    let columns = use_memo((), |_| sale_columns());
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

    let render_row = Callback::from(|sale: Sale| {
        let profit_class = match sale.profit {
            Some(p) if p < 0.0 => "amount negative",
            Some(_) => "amount positive",
            None => "amount",
        };
        html! {
            <>
                <td>{sale.sale_id}</td>
                <td>{sale.product_name.clone().unwrap_or_else(|| "Unknown".to_string())}</td>
                <td>{format_date(sale.sale_date.as_deref())}</td>
                <td>{sale.quantity.unwrap_or(0)}</td>
                <td>{format_currency(sale.sale_price.unwrap_or(0.0))}</td>
                <td>{format_currency(sale.total())}</td>
                <td class={profit_class}>
                    {sale.profit.map(format_currency).unwrap_or_else(|| "N/A".to_string())}
                </td>
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
        <div class="page sales-page">
            <PageHeader
                title="Sales"
                subtitle="Record and track product sales"
                action={Some((AttrValue::from(if mode.is_open() { "Cancel" } else { "Record Sale" }), toggle_form))}
            />
            <Alert notification={state.notification.clone()} on_dismiss={dismiss} />

            {if mode.is_open() {
                html! {
                    <SaleEditor
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
                    <DataTable<Sale>
                        rows={state.rows().to_vec()}
                        columns={Rc::clone(&columns)}
                        {render_row}
                        loading={state.state.is_loading()}
                        empty_message="No sales recorded. Record your first sale using the button above."
                        initial_sort={SortState::new("sale_id", SortDirection::Desc)}
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

    fn sale(id: i64, quantity: Option<i64>, price: Option<f64>, profit: Option<f64>) -> Sale {
        serde_json::from_value(serde_json::json!({
            "sale_id": id,
            "quantity": quantity,
            "sale_price": price,
            "profit": profit,
        }))
        .unwrap()
    }

    #[test]
    fn test_derived_total_matches_precomputed_order() {
        let rows = vec![
            sale(1, Some(2), Some(5.0), None),
            sale(2, None, Some(100.0), None),
            sale(3, Some(1), Some(7.5), None),
        ];
        let sorted = sort_rows(&rows, &sale_columns(), "total", SortDirection::Asc);
        let ids: Vec<i64> = sorted.iter().map(|s| s.sale_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_missing_profit_sorts_last_descending() {
        let rows = vec![sale(1, None, None, None), sale(2, None, None, Some(4.0)), sale(3, None, None, Some(-1.0))];
        let sorted = sort_rows(&rows, &sale_columns(), "profit", SortDirection::Desc);
        let ids: Vec<i64> = sorted.iter().map(|s| s.sale_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
