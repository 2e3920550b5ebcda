pub mod store;
pub mod use_list_page;
pub mod use_sections;

use inventory_client::ClientConfig;
use yew::prelude::*;

use crate::services::{create_client, AppClient};

pub use use_list_page::{use_list_page, ListPageHandle};
pub use use_sections::{use_category_products, use_dashboard, use_reports, SectionHandle};

/// The session client provided by the app root
#[hook]
pub fn use_api_client() -> AppClient {
    let provided = use_context::<AppClient>();
    let fallback = use_memo((), |_| create_client(ClientConfig::default()));
    provided.unwrap_or_else(|| (*fallback).clone())
}
