use inventory_client::ConnectionCheck;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::use_api_client;
use crate::pages::Page;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current: Page,
    pub on_navigate: Callback<Page>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"Inventory Console"}</h1>
                <nav class="main-nav">
                    {for Page::NAV.into_iter().map(|entry| {
                        let class = classes!("nav-link", props.current.highlights(entry).then_some("active"));
                        let on_navigate = props.on_navigate.clone();
                        let onclick = Callback::from(move |e: MouseEvent| {
                            e.prevent_default();
                            on_navigate.emit(entry);
                        });
                        html! {
                            <a href={entry.hash()} {class} {onclick}>{entry.title()}</a>
                        }
                    })}
                </nav>
                <ConnectionStatus />
            </div>
        </header>
    }
}

/// Shows which backend host the session talks to, with an on-demand probe
/// of both configured hosts
#[function_component(ConnectionStatus)]
fn connection_status() -> Html {
    let client = use_api_client();
    let checks = use_state(|| None::<Vec<ConnectionCheck>>);
    let checking = use_state(|| false);

    let onclick = {
        let client = client.clone();
        let checks = checks.clone();
        let checking = checking.clone();
        Callback::from(move |_: MouseEvent| {
            let client = client.clone();
            let checks = checks.clone();
            let checking = checking.clone();
            checking.set(true);
            spawn_local(async move {
                let results = client.test_connection().await;
                checks.set(Some(results));
                checking.set(false);
            });
        })
    };

    html! {
        <div class="connection-status">
            <span class="connection-host" title="Active API host">{client.active_base_url()}</span>
            <button type="button" class="btn btn-small" {onclick} disabled={*checking}>
                {if *checking { "Checking..." } else { "Test connection" }}
            </button>
            {if let Some(results) = checks.as_ref() {
                html! {
                    <ul class="connection-results">
                        {for results.iter().map(|check| {
                            let (class, detail) = if check.reachable() {
                                ("ok", "reachable".to_string())
                            } else if let Some(status) = check.status {
                                ("failed", format!("HTTP {}", status))
                            } else {
                                ("failed", check.error.clone().unwrap_or_else(|| "unreachable".to_string()))
                            };
                            html! { <li {class}>{format!("{}: {}", check.url, detail)}</li> }
                        })}
                    </ul>
                }
            } else { html! {} }}
        </div>
    }
}
