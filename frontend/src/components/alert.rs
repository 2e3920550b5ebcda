use shared::Notification;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub notification: Option<Notification>,
    pub on_dismiss: Callback<u32>,
}

/// The page's transient success/error/warning message, if any
#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    let Some(notification) = props.notification.as_ref() else {
        return html! {};
    };

    let onclick = {
        let on_dismiss = props.on_dismiss.clone();
        let id = notification.id;
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div class={notification.kind.css_class()} role="alert">
            <span class="alert-message">{&notification.message}</span>
            <button type="button" class="alert-close" aria-label="Close" {onclick}>{"×"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// A load failure that replaces page content
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    html! {
        <div class="alert error">
            <span class="alert-message">{props.message.clone()}</span>
            {if let Some(on_retry) = props.on_retry.clone() {
                html! {
                    <button type="button" class="btn btn-secondary" onclick={move |_| on_retry.emit(())}>
                        {"Try Again"}
                    </button>
                }
            } else { html! {} }}
        </div>
    }
}
