use std::rc::Rc;

use inventory_client::api::CategoriesApi;
use inventory_client::NoAux;
use shared::format::{truncate, TRUNCATE_AT};
use shared::validation::CategoryForm;
use shared::{Category, Column, SortDirection, SortState};
use yew::prelude::*;

use crate::components::forms::CategoryEditor;
use crate::components::{Alert, DataTable, ErrorBanner, PageHeader};
use crate::hooks::use_list_page;
use crate::pages::editing::{delete_callback, save_callback, FormMode};
use crate::pages::Page;
use crate::services::{AppClient, GlooTransport};

fn services(client: &AppClient) -> (CategoriesApi<GlooTransport>, NoAux) {
    (client.categories(), NoAux)
}

pub fn category_columns() -> Vec<Column<Category>> {
    vec![
        Column::numeric("category_id", "ID", |c: &Category| Some(c.category_id as f64)),
        Column::text("name", "Name", |c: &Category| c.name.as_deref()),
        Column::text("description", "Description", |c: &Category| c.description.as_deref()),
        Column::numeric("product_count", "Products", |c: &Category| c.product_count.map(|n| n as f64)),
    ]
}

#[derive(Properties, PartialEq)]
pub struct CategoriesPageProps {
    pub on_navigate: Callback<Page>,
}

#[function_component(CategoriesPage)]
pub fn categories_page(props: &CategoriesPageProps) -> Html {
    let page = use_list_page(services);
    let mode = use_state(|| FormMode::<Category>::Closed);
    let saving = use_state(|| false);
    let columns = use_memo((), |_| category_columns());
    let state = page.state();

    let on_save = save_callback(&page, &mode, &saving);
    let on_delete = delete_callback(&page, "category");

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
        let mode = mode.clone();
        let on_navigate = props.on_navigate.clone();
        Callback::from(move |category: Category| {
            let id = category.category_id;
            let on_view = {
                let on_navigate = on_navigate.clone();
                Callback::from(move |_: MouseEvent| on_navigate.emit(Page::CategoryProducts(id)))
            };
            let on_edit = {
                let mode = mode.clone();
                let category = category.clone();
                Callback::from(move |_: MouseEvent| mode.set(FormMode::Editing(category.clone())))
            };
            let on_delete = {
                let on_delete = on_delete.clone();
                Callback::from(move |_: MouseEvent| on_delete.emit(id))
            };
            html! {
                <>
                    <td>{id}</td>
                    <td>{category.name.clone().unwrap_or_default()}</td>
                    <td>{truncate(category.description.as_deref().unwrap_or(""), TRUNCATE_AT)}</td>
                    <td>{category.product_count.unwrap_or(0)}</td>
                    <td class="row-actions">
                        <button type="button" class="btn btn-small" onclick={on_view}>{"View Products"}</button>
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
        <div class="page categories-page">
            <PageHeader
                title="Categories"
                subtitle="Manage product categories"
                action={Some((AttrValue::from(if mode.is_open() { "Cancel" } else { "Add Category" }), toggle_form))}
            />
            <Alert notification={state.notification.clone()} on_dismiss={dismiss} />

            {match &*mode {
                FormMode::Closed => html! {},
                open => html! {
                    <CategoryEditor
                        key={open.key()}
                        initial={match open {
                            FormMode::Editing(category) => CategoryForm::from_category(category),
                            _ => CategoryForm::default(),
                        }}
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
                    <DataTable<Category>
                        rows={state.rows().to_vec()}
                        columns={Rc::clone(&columns)}
                        {render_row}
                        loading={state.state.is_loading()}
                        empty_message="No categories found. Add your first category using the button above."
                        initial_sort={SortState::new("name", SortDirection::Asc)}
                        actions_header="Actions"
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

    fn category(id: i64, name: &str, count: Option<i64>) -> Category {
        Category {
            category_id: id,
            name: Some(name.to_string()),
            description: None,
            product_count: count,
        }
    }

    #[test]
    fn test_toggle_scenario_on_category_names() {
        let rows = vec![category(1, "b", Some(2)), category(2, "A", Some(5))];
        let columns = category_columns();
        let mut sort = SortState::default();

        assert!(sort.toggle("name", &columns));
        let names: Vec<_> = sort.apply(&rows, &columns).into_iter().filter_map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "b"]);

        assert!(sort.toggle("name", &columns));
        let names: Vec<_> = sort.apply(&rows, &columns).into_iter().filter_map(|c| c.name).collect();
        assert_eq!(names, vec!["b", "A"]);
    }

    #[test]
    fn test_missing_product_count_sorts_first() {
        let rows = vec![category(1, "a", Some(3)), category(2, "b", None)];
        let sorted = sort_rows(&rows, &category_columns(), "product_count", SortDirection::Asc);
        assert_eq!(sorted[0].category_id, 2);
    }
}
