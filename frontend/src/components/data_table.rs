use std::rc::Rc;

use shared::{Column, SortState};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DataTableProps<R: PartialEq + 'static> {
    pub rows: Vec<R>,
    pub columns: Rc<Vec<Column<R>>>,
    /// Renders the `<td>` cells of one row, in column order
    pub render_row: Callback<R, Html>,
    #[prop_or_default]
    pub loading: bool,
    #[prop_or(AttrValue::from("No data available"))]
    pub empty_message: AttrValue,
    #[prop_or_default]
    pub initial_sort: Option<SortState>,
    /// Extra trailing header for per-row buttons
    #[prop_or_default]
    pub actions_header: Option<AttrValue>,
}

/// Header text with the sort arrow when the column is the active sort
pub fn header_label<R>(column: &Column<R>, sort: &SortState) -> String {
    match sort.indicator(column.key) {
        Some(arrow) => format!("{} {}", column.header, arrow),
        None => column.header.to_string(),
    }
}

/// Sortable table. Each table keeps its own sort; rows arrive unsorted.
#[function_component(DataTable)]
pub fn data_table<R>(props: &DataTableProps<R>) -> Html
where
    R: Clone + PartialEq + 'static,
{
    let sort = {
        let initial = props.initial_sort.clone();
        use_state(move || initial.unwrap_or_default())
    };

    if props.loading {
        return html! { <div class="loading">{"Loading..."}</div> };
    }

    if props.rows.is_empty() {
        return html! { <div class="empty-state">{props.empty_message.clone()}</div> };
    }

    let sorted = sort.apply(props.rows.as_slice(), props.columns.as_slice());

    html! {
        <div class="table-container">
            <table class="data-table">
                <thead>
                    <tr>
                        {for props.columns.iter().map(|column| {
                            let onclick = {
                                let sort = sort.clone();
                                let columns = Rc::clone(&props.columns);
                                let key = column.key;
                                Callback::from(move |_: MouseEvent| {
                                    let mut next = (*sort).clone();
                                    if next.toggle(key, columns.as_slice()) {
                                        sort.set(next);
                                    }
                                })
                            };
                            let class = if column.sortable { "sortable" } else { "" };
                            html! {
                                <th key={column.key} {class} {onclick}>{header_label(column, &sort)}</th>
                            }
                        })}
                        {if let Some(header) = props.actions_header.as_ref() {
                            html! { <th>{header.clone()}</th> }
                        } else { html! {} }}
                    </tr>
                </thead>
                <tbody>
                    {for sorted.into_iter().map(|row| html! {
                        <tr>{props.render_row.emit(row)}</tr>
                    })}
                </tbody>
            </table>
        </div>
    }
}
