//! Scripted transport and manual clock for the client tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use crate::cache::Clock;
use crate::transport::{HttpRequest, HttpResponse, Transport, TransportError};

type Handler = Box<dyn FnMut(&HttpRequest) -> Result<HttpResponse, TransportError>>;

/// Answers every request through a closure and records what was sent
#[derive(Clone)]
pub struct MockTransport {
    handler: Rc<RefCell<Handler>>,
    sent: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&HttpRequest) -> Result<HttpResponse, TransportError> + 'static,
    {
        Self {
            handler: Rc::new(RefCell::new(Box::new(handler))),
            sent: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|r| r.url.clone()).collect()
    }

    pub fn count(&self) -> usize {
        self.sent.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.borrow_mut().push(request.clone());
        (self.handler.borrow_mut())(&request)
    }
}

#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<i64>>);

impl ManualClock {
    pub fn advance(&self, ms: i64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.get()
    }
}

pub fn ok(data: Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(
        200,
        serde_json::json!({ "success": true, "data": data }).to_string(),
    ))
}

pub fn ack(id_key: &str, id: i64) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(
        201,
        serde_json::json!({ "success": true, "message": "done", id_key: id }).to_string(),
    ))
}

pub fn status(code: u16, body: Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(code, body.to_string()))
}
