//! Recording transport that replays canned responses, plus fixture loading.

#![allow(dead_code)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use msweeper_client::{
    HttpRequest, HttpResponse, MSweeperClient, Method, StatusCode, Transport, TransportError,
};
use serde_json::Value;

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("resources")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("missing fixture {:?}: {}", path, e))
}

enum Reply {
    Response(u16, String),
    NetworkError(String),
}

struct Expectation {
    method: Method,
    path: String,
    query: Option<Vec<(String, String)>>,
    body: Option<Value>,
    reply: Reply,
}

impl Expectation {
    fn matches(&self, request: &HttpRequest) -> bool {
        self.method == request.method
            && self.path == request.path()
            && self.query.as_ref().is_none_or(|q| *q == request.query)
            && self.body.as_ref().is_none_or(|b| Some(b) == request.body.as_ref())
    }
}

/// Builder for one expectation, finished by one of the `reply` methods
pub struct When<'a> {
    mock: &'a MockTransport,
    expectation: Expectation,
}

impl When<'_> {
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.expectation
            .query
            .get_or_insert_with(Vec::new)
            .push((key.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.expectation.body = Some(body);
        self
    }

    pub fn reply(mut self, status: u16, body: impl Into<String>) {
        self.expectation.reply = Reply::Response(status, body.into());
        self.mock.expectations.lock().unwrap().push(self.expectation);
    }

    pub fn reply_json(self, status: u16, body: Value) {
        self.reply(status, body.to_string());
    }

    pub fn network_error(mut self, description: &str) {
        self.expectation.reply = Reply::NetworkError(description.to_string());
        self.mock.expectations.lock().unwrap().push(self.expectation);
    }
}

/// Matches requests against registered expectations in order.
///
/// Unmatched requests get a bare 404, as an HTTP router would answer.
#[derive(Default)]
pub struct MockTransport {
    expectations: Mutex<Vec<Expectation>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn on(&self, method: Method, path: &str) -> When<'_> {
        When {
            mock: self,
            expectation: Expectation {
                method,
                path: path.to_string(),
                query: None,
                body: None,
                reply: Reply::Response(404, String::new()),
            },
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        let expectations = self.expectations.lock().unwrap();
        match expectations.iter().find(|e| e.matches(&request)) {
            Some(Expectation {
                reply: Reply::Response(status, body),
                ..
            }) => Ok(HttpResponse::new(
                StatusCode::from_u16(*status).unwrap(),
                body.clone(),
            )),
            Some(Expectation {
                reply: Reply::NetworkError(description),
                ..
            }) => Err(TransportError::Other(description.clone())),
            None => Ok(HttpResponse::new(StatusCode::NOT_FOUND, "")),
        }
    }
}

pub fn mocked_client() -> (MSweeperClient, Arc<MockTransport>) {
    let mock = Arc::new(MockTransport::default());
    let client = MSweeperClient::with_transport(mock.clone());
    (client, mock)
}
