//! Resilient HTTP client for the inventory backend.
//!
//! Every call goes through [`ApiClient::request`], which layers three things
//! over the raw [`Transport`]:
//!
//! - GET responses are cached for the configured TTL and replayed verbatim.
//! - A timed-out request is retried once with the longer retry timeout.
//! - On a network failure the alternate host is probed; if it answers, the
//!   client switches to it for the rest of the session and retries once.
//!
//! Clones share the active host and the cache.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use shared::Envelope;

use crate::cache::{Clock, ResponseCache, SystemClock};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

type Params<'a> = &'a [(&'a str, String)];

struct Session {
    active_base: String,
    cache: ResponseCache,
}

/// Outcome of probing one URL in [`ApiClient::test_connection`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionCheck {
    pub url: String,
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl ConnectionCheck {
    pub fn reachable(&self) -> bool {
        matches!(self.status, Some(status) if (200..300).contains(&status))
    }
}

pub struct ApiClient<T> {
    transport: Rc<T>,
    config: Rc<ClientConfig>,
    clock: Rc<dyn Clock>,
    session: Rc<RefCell<Session>>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Rc::clone(&self.transport),
            config: Rc::clone(&self.config),
            clock: Rc::clone(&self.clock),
            session: Rc::clone(&self.session),
        }
    }
}

/// Two handles are equal when they share a session
impl<T> PartialEq for ApiClient<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.session, &other.session)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self::with_clock(transport, config, SystemClock)
    }

    pub fn with_clock(transport: T, config: ClientConfig, clock: impl Clock + 'static) -> Self {
        let session = Session {
            active_base: config.base_url.clone(),
            cache: ResponseCache::new(config.cache_ttl_ms),
        };
        Self {
            transport: Rc::new(transport),
            config: Rc::new(config),
            clock: Rc::new(clock),
            session: Rc::new(RefCell::new(session)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Base URL currently used for requests
    pub fn active_base_url(&self) -> String {
        self.session.borrow().active_base.clone()
    }

    pub fn invalidate_cache(&self) {
        self.session.borrow_mut().cache.clear();
    }

    pub async fn get(&self, path: &str, params: Params<'_>) -> Result<Envelope, ApiError> {
        self.request(Method::Get, path, None, params).await
    }

    pub async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Envelope, ApiError> {
        let body = encode(body)?;
        self.request(Method::Post, path, Some(body), &[]).await
    }

    pub async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Envelope, ApiError> {
        let body = encode(body)?;
        self.request(Method::Put, path, Some(body), &[]).await
    }

    pub async fn delete(&self, path: &str) -> Result<Envelope, ApiError> {
        self.request(Method::Delete, path, None, &[]).await
    }

    /// Send one request and validate the envelope it returns.
    ///
    /// `path` is relative to the active base URL and starts with `/`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        params: Params<'_>,
    ) -> Result<Envelope, ApiError> {
        let target = with_query(path, params);
        let cache_key = (method == Method::Get).then(|| ResponseCache::key(path, params));

        if let Some(key) = &cache_key {
            let hit = self.session.borrow_mut().cache.get(key, self.clock.now_ms());
            if let Some(response) = hit {
                log::debug!("Using cached response for: GET {}", target);
                return finish(response);
            }
        }

        let body = body.map(|value| value.to_string());
        let response = self.send_with_recovery(method, &target, body).await?;

        if let Some(key) = cache_key {
            self.session
                .borrow_mut()
                .cache
                .put(key, &response, self.clock.now_ms());
        }

        let envelope = finish(response)?;
        if method.is_mutation() {
            self.invalidate_cache();
        }
        Ok(envelope)
    }

    async fn send_with_recovery(
        &self,
        method: Method,
        target: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let mut timeout = self.config.timeout();
        let mut retried = false;
        let mut fallback_attempted = false;

        loop {
            let base = self.active_base_url();
            let request = HttpRequest {
                method,
                url: format!("{}{}", base, target),
                body: body.clone(),
                timeout,
            };
            log::debug!("Request: {} {}", method, request.url);

            match self.transport.send(request).await {
                Ok(response) => {
                    log::debug!("Response: {} from {}{}", response.status, base, target);
                    return Ok(response);
                }
                Err(TransportError::Timeout) if !retried => {
                    log::warn!("{} {} timed out, retrying with longer timeout", method, target);
                    retried = true;
                    timeout = self.config.retry_timeout();
                }
                Err(TransportError::Network(message)) if !fallback_attempted => {
                    log::error!("Error with {} {}: {}", method, target, message);
                    fallback_attempted = true;
                    if !self.switch_to_alternate(&base).await {
                        return Err(ApiError::Network(message));
                    }
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Probe the host that is not `from`; switch to it if it answers
    async fn switch_to_alternate(&self, from: &str) -> bool {
        let alternate = self.config.alternate_of(from).to_string();
        if !self.probe(&alternate).await {
            return false;
        }
        log::info!("Switching to fallback URL: {}", alternate);
        self.session.borrow_mut().active_base = alternate;
        true
    }

    async fn probe(&self, base: &str) -> bool {
        let url = format!("{}{}", base, self.config.probe_path);
        let request = HttpRequest::get(url, self.config.probe_timeout());
        match self.transport.send(request).await {
            Ok(response) if response.is_success() => {
                log::info!("Backend server at {} is accessible", base);
                true
            }
            Ok(response) => {
                log::warn!("Backend server at {} answered {}", base, response.status);
                false
            }
            Err(err) => {
                log::warn!("Backend server at {} is not accessible: {}", base, err);
                false
            }
        }
    }

    /// GET that tolerates the backend's inconsistent routes.
    ///
    /// On a network error or 404 the path is retried with the other
    /// trailing-slash form, then once against the alternate host without
    /// switching to it. If all of that fails the first error is returned.
    ///
    /// With both hosts down one call sends up to five requests: the path, a
    /// probe, the toggled path, a second probe and the alternate host. Each
    /// probe waits up to `probe_timeout_ms`.
    pub async fn get_tolerant(&self, path: &str, params: Params<'_>) -> Result<Envelope, ApiError> {
        let original = match self.get(path, params).await {
            Ok(envelope) => return Ok(envelope),
            Err(err) if matches!(err, ApiError::Network(_)) || err.is_not_found() => err,
            Err(err) => return Err(err),
        };

        let alternate_path = toggle_trailing_slash(path);
        log::warn!("GET {} failed ({}), trying {}", path, original, alternate_path);
        match self.get(&alternate_path, params).await {
            Ok(envelope) => return Ok(envelope),
            Err(err) => log::warn!("GET {} failed: {}", alternate_path, err),
        }

        let alternate_base = self.config.alternate_of(&self.active_base_url()).to_string();
        match self.get_once(&alternate_base, path, params).await {
            Ok(envelope) => Ok(envelope),
            Err(err) => {
                log::warn!("GET {}{} failed: {}", alternate_base, path, err);
                Err(original)
            }
        }
    }

    /// A single uncached GET against an explicit base URL
    async fn get_once(&self, base: &str, path: &str, params: Params<'_>) -> Result<Envelope, ApiError> {
        let request = HttpRequest::get(
            format!("{}{}", base, with_query(path, params)),
            self.config.timeout(),
        );
        let response = self.transport.send(request).await?;
        finish(response)
    }

    /// Probe both hosts, with and without a trailing slash
    pub async fn test_connection(&self) -> Vec<ConnectionCheck> {
        let probe = self.config.probe_path.trim_end_matches('/');
        let mut urls = Vec::new();
        for base in [&self.config.base_url, &self.config.fallback_url] {
            urls.push(format!("{}{}", base, probe));
            urls.push(format!("{}{}/", base, probe));
        }

        let mut checks = Vec::with_capacity(urls.len());
        for url in urls {
            log::debug!("Testing connection to: {}", url);
            let request = HttpRequest::get(url.clone(), self.config.probe_timeout());
            let check = match self.transport.send(request).await {
                Ok(response) => ConnectionCheck {
                    url,
                    status: Some(response.status),
                    error: None,
                },
                Err(err) => ConnectionCheck {
                    url,
                    status: None,
                    error: Some(err.to_string()),
                },
            };
            checks.push(check);
        }
        checks
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Status check plus envelope validation
fn finish(response: HttpResponse) -> Result<Envelope, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_status(response.status, &response.body));
    }
    let envelope = Envelope::parse(&response.body)?;
    if !envelope.success {
        let message = envelope
            .error
            .or(envelope.message)
            .unwrap_or_else(|| "The server reported a failure".to_string());
        return Err(ApiError::Rejected(message));
    }
    Ok(envelope)
}

fn with_query(path: &str, params: Params<'_>) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{}?{}", path, query)
}

fn toggle_trailing_slash(path: &str) -> String {
    match path.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => format!("{}/", path),
    }
}
