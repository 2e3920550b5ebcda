use shared::page::{LOW_STOCK, SALES_BY_CATEGORY, TOP_SELLING};
use shared::LoadState;
use yew::prelude::*;

use crate::components::bar_chart::{category_bars, top_seller_bars};
use crate::components::{BarChart, ErrorBanner, LowStockTable, Measure, PageHeader};
use crate::hooks::use_reports;

/// Renders one report section: a spinner while loading, its own error, or
/// the content
fn section<T>(title: &'static str, state: &LoadState<T>, content: impl FnOnce(&T) -> Html) -> Html {
    let body = match state {
        LoadState::Loading => html! { <div class="loading">{"Loading..."}</div> },
        LoadState::Error(message) => html! {
            <div class="section-error">
                <p>{format!("{} data is not available", title)}</p>
                <p class="muted">{message}</p>
            </div>
        },
        LoadState::Ready(data) => content(data),
    };
    html! {
        <section class="card report-section">
            <h2>{title}</h2>
            {body}
        </section>
    }
}

#[function_component(Reports)]
pub fn reports() -> Html {
    let handle = use_reports();
    let page = handle.state();

    html! {
        <div class="page reports-page">
            <PageHeader
                title="Reports"
                subtitle="View sales and inventory analysis reports"
                action={Some((AttrValue::from("Refresh"), handle.reload.clone()))}
            />

            {if let Some(message) = page.banner() {
                html! { <ErrorBanner {message} on_retry={handle.reload.clone()} /> }
            } else { html! {} }}

            {if let Some(notice) = page.stale_notice() {
                html! { <div class="alert warning">{notice}</div> }
            } else { html! {} }}

            {section(SALES_BY_CATEGORY, &page.sales_by_category, |rows| html! {
                <BarChart
                    bars={category_bars(rows, Measure::Revenue)}
                    measure={Measure::Revenue}
                    empty_message="Sales by category data is not available"
                />
            })}

            {section(TOP_SELLING, &page.top_selling, |rows| html! {
                <BarChart
                    bars={top_seller_bars(rows, Measure::Units)}
                    measure={Measure::Units}
                    empty_message="Top selling products data is not available"
                />
            })}

            {section(LOW_STOCK, &page.low_stock, |rows| html! {
                <LowStockTable items={rows.clone()} empty_message="No low stock products found" />
            })}
        </div>
    }
}
