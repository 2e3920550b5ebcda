use std::rc::Rc;

use shared::{Column, SortDirection, SortState, SortValue, StockAlert};
use yew::prelude::*;

use super::DataTable;

pub fn low_stock_columns() -> Vec<Column<StockAlert>> {
    vec![
        Column::text("product_name", "Product", |s: &StockAlert| s.product_name.as_deref()),
        Column::text("category_name", "Category", |s: &StockAlert| s.category_name.as_deref()),
        Column::numeric("quantity", "Current Stock", |s: &StockAlert| Some(s.quantity as f64)),
        Column::numeric("reorder_level", "Reorder Level", |s: &StockAlert| Some(s.reorder_level as f64)),
        Column::derived("status", "Status", |s: &StockAlert| {
            Some(SortValue::Text(s.status_label().to_string()))
        }),
    ]
}

#[derive(Properties, PartialEq)]
pub struct LowStockTableProps {
    pub items: Vec<StockAlert>,
    #[prop_or(AttrValue::from("No low stock items at the moment"))]
    pub empty_message: AttrValue,
}

#[function_component(LowStockTable)]
pub fn low_stock_table(props: &LowStockTableProps) -> Html {
    let columns = use_memo((), |_| low_stock_columns());
    let any_out_of_stock = props.items.iter().any(StockAlert::is_out_of_stock);

    let render_row = Callback::from(|item: StockAlert| {
        let badge = if item.is_out_of_stock() { "badge danger" } else { "badge warning" };
        html! {
            <>
                <td>{item.product_name.clone().unwrap_or_else(|| "Unknown".to_string())}</td>
                <td>{item.category_name.clone().unwrap_or_else(|| "N/A".to_string())}</td>
                <td>{item.quantity}</td>
                <td>{item.reorder_level}</td>
                <td><span class={badge}>{item.status_label()}</span></td>
            </>
        }
    });

    html! {
        <>
            {if any_out_of_stock {
                html! {
                    <div class="alert error">
                        <strong>{"Warning:"}</strong>
                        {" Some products are out of stock. Consider placing a purchase order immediately."}
                    </div>
                }
            } else { html! {} }}
            <DataTable<StockAlert>
                rows={props.items.clone()}
                columns={Rc::clone(&columns)}
                {render_row}
                empty_message={props.empty_message.clone()}
                initial_sort={SortState::new("quantity", SortDirection::Asc)}
            />
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::sort::sort_rows;

    fn alert(name: &str, quantity: i64) -> StockAlert {
        StockAlert {
            product_id: None,
            product_name: Some(name.to_string()),
            category_name: None,
            quantity,
            reorder_level: 5,
        }
    }

    #[test]
    fn test_status_column_groups_out_of_stock_rows() {
        let rows = vec![alert("a", 3), alert("b", 0), alert("c", 1)];
        let sorted = sort_rows(&rows, &low_stock_columns(), "status", SortDirection::Asc);
        let names: Vec<_> = sorted.into_iter().filter_map(|s| s.product_name).collect();
        // "low stock" < "out of stock"; ties keep their input order
        assert_eq!(names, vec!["a", "c", "b"]);
    }
}
