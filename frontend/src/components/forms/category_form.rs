use shared::validation::CategoryForm;
use shared::CategoryDraft;
use yew::prelude::*;

use super::{bind, submit, FormActions, FormError};

#[derive(Properties, PartialEq)]
pub struct CategoryEditorProps {
    pub initial: CategoryForm,
    pub editing: bool,
    pub saving: bool,
    pub on_save: Callback<CategoryDraft>,
    pub on_cancel: Callback<()>,
}

#[function_component(CategoryEditor)]
pub fn category_editor(props: &CategoryEditorProps) -> Html {
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
            <h2>{if props.editing { "Edit Category" } else { "Add New Category" }}</h2>
            <FormError error={(*error).clone()} />
            <form {onsubmit}>
                <div class="form-group">
                    <label for="category-name">{"Name"}</label>
                    <input
                        type="text"
                        id="category-name"
                        value={form.name.clone()}
                        onchange={bind(&form, |f, v| f.name = v)}
                        disabled={props.saving}
                    />
                </div>
                <div class="form-group">
                    <label for="category-description">{"Description"}</label>
                    <textarea
                        id="category-description"
                        rows="3"
                        value={form.description.clone()}
                        onchange={bind(&form, |f, v| f.description = v)}
                        disabled={props.saving}
                    />
                </div>
                <FormActions
                    submit_label={if props.editing { "Update Category" } else { "Create Category" }}
                    saving={props.saving}
                    on_cancel={props.on_cancel.clone()}
                />
            </form>
        </section>
    }
}
