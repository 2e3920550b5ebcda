use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PageHeaderProps {
    pub title: AttrValue,
    pub subtitle: AttrValue,
    /// Label and handler of the button on the right, if the page has one
    #[prop_or_default]
    pub action: Option<(AttrValue, Callback<()>)>,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(PageHeader)]
pub fn page_header(props: &PageHeaderProps) -> Html {
    html! {
        <div class="page-header">
            {props.children.clone()}
            <div>
                <h1>{props.title.clone()}</h1>
                <p class="page-subtitle">{props.subtitle.clone()}</p>
            </div>
            {if let Some((label, onclick)) = props.action.clone() {
                html! {
                    <button type="button" class="btn btn-primary" onclick={move |_| onclick.emit(())}>
                        {label}
                    </button>
                }
            } else { html! {} }}
        </div>
    }
}
