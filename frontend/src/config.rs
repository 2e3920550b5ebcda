//! Where the backend lives.
//!
//! The page can override the defaults with `<meta>` tags or a
//! `window.__INVENTORY_CONFIG__` object, e.g. when served behind a proxy.

use inventory_client::ClientConfig;
use log::LevelFilter;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, PartialEq)]
pub struct FrontendConfig {
    pub client: ClientConfig,
    pub log_level: LevelFilter,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl FrontendConfig {
    /// Sources, highest priority first:
    /// 1. `<meta name="inventory:api-url">` / `inventory:fallback-url` / `inventory:log-level`
    /// 2. `window.__INVENTORY_CONFIG__.{api_url, fallback_url, log_level}`
    /// 3. built-in defaults
    pub fn load() -> Self {
        let document = web_sys::window().and_then(|w| w.document());
        let lookup = |meta_name: &str, js_key: &str| {
            document
                .as_ref()
                .and_then(|doc| meta_content(doc, meta_name))
                .or_else(|| js_config(js_key))
                .filter(|value| !value.trim().is_empty())
        };

        Self::from_sources(
            lookup("inventory:api-url", "api_url"),
            lookup("inventory:fallback-url", "fallback_url"),
            lookup("inventory:log-level", "log_level"),
        )
    }

    fn from_sources(api_url: Option<String>, fallback_url: Option<String>, log_level: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url {
            config.client = config.client.with_base_url(url);
        }
        if let Some(url) = fallback_url {
            config.client = config.client.with_fallback_url(url);
        }
        if let Some(level) = log_level.and_then(|l| l.parse().ok()) {
            config.log_level = level;
        }
        config
    }
}

fn meta_content(document: &web_sys::Document, name: &str) -> Option<String> {
    let selector = format!("meta[name=\"{}\"]", name);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web_sys::HtmlMetaElement>().ok())
        .map(|meta| meta.content())
}

fn js_config(key: &str) -> Option<String> {
    let window = web_sys::window()?;
    let config = js_sys::Reflect::get(&window, &"__INVENTORY_CONFIG__".into()).ok()?;
    if config.is_undefined() || config.is_null() {
        return None;
    }
    js_sys::Reflect::get(&config, &key.into()).ok()?.as_string()
}
