use async_trait::async_trait;
use futures::FutureExt;
use gloo::net::http::{Request, RequestBuilder};
use gloo::timers::future::TimeoutFuture;
use inventory_client::{
    ApiClient, ClientConfig, HttpRequest, HttpResponse, Method, Transport, TransportError,
};

/// The client every page shares through context
pub type AppClient = ApiClient<GlooTransport>;

pub fn create_client(config: ClientConfig) -> AppClient {
    ApiClient::new(GlooTransport, config)
}

/// `fetch` through gloo-net, raced against a timer for the request timeout
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

fn builder(method: Method, url: &str) -> RequestBuilder {
    match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
}

fn network(err: impl std::fmt::Display) -> TransportError {
    TransportError::Network(err.to_string())
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = builder(request.method, &request.url);
        let prepared = match request.body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body)
                .map_err(network)?,
            None => builder.build().map_err(network)?,
        };

        let exchange = async {
            let response = prepared.send().await.map_err(network)?;
            let status = response.status();
            let headers = response.headers().entries().collect();
            let body = response.text().await.map_err(network)?;
            Ok::<_, TransportError>(HttpResponse { status, headers, body })
        }
        .fuse();

        let timeout_ms = u32::try_from(request.timeout.as_millis()).unwrap_or(u32::MAX);
        let timer = TimeoutFuture::new(timeout_ms).fuse();

        futures::pin_mut!(exchange, timer);
        futures::select! {
            result = exchange => result,
            _ = timer => Err(TransportError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_unreachable_host_is_a_network_error() {
        let request = HttpRequest::get("http://127.0.0.1:9/api/products", Duration::from_secs(5));
        let result = GlooTransport.send(request).await;
        assert!(matches!(result, Err(TransportError::Network(_))));
    }
}
