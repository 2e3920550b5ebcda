use gloo::events::EventListener;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod pages;
mod services;

use components::Header;
use config::FrontendConfig;
use pages::{CategoriesPage, CategoryProductsPage, Dashboard, Page, ProductsPage, PurchasesPage, Reports, SalesPage};
use services::{create_client, logging, AppClient};

fn current_page() -> Page {
    gloo::utils::window()
        .location()
        .hash()
        .map(|hash| Page::from_hash(&hash))
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
struct AppProps {
    client: AppClient,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let current = use_state(current_page);

    // Back/forward buttons and hand-edited URLs
    {
        let current = current.clone();
        use_effect_with((), move |_| {
            let listener = EventListener::new(&gloo::utils::window(), "hashchange", move |_| {
                current.set(current_page());
            });
            move || drop(listener)
        });
    }

    let on_navigate = {
        let current = current.clone();
        Callback::from(move |page: Page| {
            if let Err(err) = gloo::utils::window().location().set_hash(&page.hash()) {
                log::warn!("could not update location hash: {:?}", err);
            }
            current.set(page);
        })
    };

    let content = match *current {
        Page::Dashboard => html! { <Dashboard /> },
        Page::Products => html! { <ProductsPage /> },
        Page::Categories => html! { <CategoriesPage on_navigate={on_navigate.clone()} /> },
        Page::CategoryProducts(id) => html! {
            <CategoryProductsPage category_id={id} on_navigate={on_navigate.clone()} />
        },
        Page::Purchases => html! { <PurchasesPage /> },
        Page::Sales => html! { <SalesPage /> },
        Page::Reports => html! { <Reports /> },
    };

    html! {
        <ContextProvider<AppClient> context={props.client.clone()}>
            <div class="app">
                <Header current={*current} {on_navigate} />
                <main class="container">{content}</main>
            </div>
        </ContextProvider<AppClient>>
    }
}

fn main() {
    let config = FrontendConfig::load();
    logging::init(config.log_level);
    log::info!(
        "inventory console starting (api: {}, fallback: {})",
        config.client.base_url,
        config.client.fallback_url
    );

    let client = create_client(config.client);
    yew::Renderer::<App>::with_props(AppProps { client }).render();
}
