use shared::format::{format_currency, format_number};
use shared::DashboardSnapshot;
use yew::prelude::*;

use crate::components::bar_chart::{category_bars, top_seller_bars};
use crate::components::{BarChart, ErrorBanner, LowStockTable, Measure, PageHeader};
use crate::hooks::use_dashboard;

/// One summary card
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub attention: bool,
}

pub fn stat_cards(snapshot: &DashboardSnapshot) -> Vec<StatCard> {
    let summary = &snapshot.inventory_summary;
    vec![
        StatCard {
            label: "Total Products",
            value: format_number(summary.products_count),
            attention: false,
        },
        StatCard {
            label: "Inventory Value",
            value: format_currency(summary.total_value),
            attention: false,
        },
        StatCard {
            label: "Low Stock Items",
            value: format_number(snapshot.low_stock.len() as i64),
            attention: !snapshot.low_stock.is_empty(),
        },
        StatCard {
            label: "Categories",
            value: format_number(snapshot.sales_by_category.len() as i64),
            attention: false,
        },
    ]
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let section = use_dashboard();
    let page = section.state();
    let snapshot = &page.snapshot;

    if page.loading {
        return html! { <div class="page dashboard-page"><div class="loading">{"Loading dashboard..."}</div></div> };
    }

    html! {
        <div class="page dashboard-page">
            <PageHeader title="Dashboard" subtitle="Overview of your inventory system" />

            {if let Some(message) = page.error.clone() {
                html! { <ErrorBanner {message} on_retry={section.reload.clone()} /> }
            } else { html! {} }}

            <div class="stat-grid">
                {for stat_cards(snapshot).into_iter().map(|card| html! {
                    <div class="stat-card">
                        <dt>{card.label}</dt>
                        <dd>
                            {card.value}
                            {if card.attention {
                                html! { <span class="badge danger">{"Attention needed"}</span> }
                            } else { html! {} }}
                        </dd>
                    </div>
                })}
            </div>

            <div class="chart-grid">
                <section class="card">
                    <h2>{"Sales by Category"}</h2>
                    <BarChart
                        bars={category_bars(&snapshot.sales_by_category, Measure::Revenue)}
                        measure={Measure::Revenue}
                        empty_message="No sales recorded yet"
                    />
                </section>
                <section class="card">
                    <h2>{"Top Selling Products"}</h2>
                    <BarChart
                        bars={top_seller_bars(&snapshot.top_selling, Measure::Units)}
                        measure={Measure::Units}
                        empty_message="No sales recorded yet"
                    />
                </section>
            </div>

            <section class="card">
                <h2>{"Low Stock Products"}</h2>
                <LowStockTable items={snapshot.low_stock.clone()} />
            </section>
        </div>
    }
}
