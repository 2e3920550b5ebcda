pub mod category_form;
pub mod product_form;
pub mod purchase_form;
pub mod sale_form;

pub use category_form::CategoryEditor;
pub use product_form::ProductEditor;
pub use purchase_form::PurchaseEditor;
pub use sale_form::SaleEditor;

use shared::ValidationError;
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Current value of the input, select or textarea that fired the event
pub fn field_value(e: &Event) -> String {
    let Some(target) = e.target() else {
        return String::new();
    };
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = target.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

/// Change handler that writes one field of a form held in `use_state`
pub fn bind<F: Clone + 'static>(form: &UseStateHandle<F>, apply: fn(&mut F, String)) -> Callback<Event> {
    let form = form.clone();
    Callback::from(move |e: Event| {
        let mut next = (*form).clone();
        apply(&mut next, field_value(&e));
        form.set(next);
    })
}

/// Submit handler: validates, then either shows the first problem or emits
/// the draft
pub fn submit<D, V>(validate: V, error: &UseStateHandle<Option<String>>, on_save: &Callback<D>) -> Callback<SubmitEvent>
where
    D: 'static,
    V: Fn() -> Result<D, ValidationError> + 'static,
{
    let error = error.clone();
    let on_save = on_save.clone();
    Callback::from(move |e: SubmitEvent| {
        e.prevent_default();
        match validate() {
            Ok(draft) => {
                error.set(None);
                on_save.emit(draft);
            }
            Err(err) => {
                log::debug!("form rejected: {}", err);
                error.set(Some(err.to_string()));
            }
        }
    })
}

#[derive(Properties, PartialEq)]
pub struct FormErrorProps {
    pub error: Option<String>,
}

#[function_component(FormError)]
pub fn form_error(props: &FormErrorProps) -> Html {
    match props.error.as_ref() {
        Some(error) => html! { <div class="form-message error">{error}</div> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct FormActionsProps {
    pub submit_label: AttrValue,
    pub saving: bool,
    pub on_cancel: Callback<()>,
}

/// Cancel and submit buttons shared by every editor
#[function_component(FormActions)]
pub fn form_actions(props: &FormActionsProps) -> Html {
    let on_cancel = props.on_cancel.clone();
    html! {
        <div class="form-actions">
            <button type="button" class="btn btn-secondary" onclick={move |_| on_cancel.emit(())} disabled={props.saving}>
                {"Cancel"}
            </button>
            <button type="submit" class="btn btn-primary" disabled={props.saving}>
                {if props.saving { AttrValue::from("Saving...") } else { props.submit_label.clone() }}
            </button>
        </div>
    }
}
