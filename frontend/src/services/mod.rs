pub mod api;
pub mod logging;

pub use api::{create_client, AppClient, GlooTransport};
