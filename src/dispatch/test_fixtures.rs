//! Shared mocks for dispatch and task tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{Connector, HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::connection::ClientConfiguration;

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug)]
pub struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn with_status(status: http::StatusCode, body: &str) -> Self {
        Self::new(vec![Ok(response(status, body))])
    }

    pub fn created(id: &str) -> Self {
        Self::with_status(
            http::StatusCode::CREATED,
            &format!(r#"{{"data":{{"id":"{id}","text":"ok"}}}}"#),
        )
    }

    pub fn failing(error: HttpError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.captured_requests()
            .pop()
            .expect("at least one request was sent")
    }
}

pub fn response(status: http::StatusCode, body: &str) -> HttpResponse {
    let mut headers = http::HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json"),
    );
    HttpResponse::new(status, headers, body.as_bytes().to_vec())
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Client whose requests never complete.
#[derive(Debug, Default)]
pub struct PendingClient {
    pub call_count: AtomicUsize,
}

impl HttpClient for PendingClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        std::future::pending().await
    }
}

impl HttpClient for Arc<PendingClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).request(req).await
    }
}

/// Connector handing out a shared [`MockClient`] and recording configurations.
#[derive(Debug)]
pub struct MockConnector {
    pub client: Arc<MockClient>,
    configs: Mutex<Vec<ClientConfiguration>>,
}

impl MockConnector {
    pub fn new(client: MockClient) -> Self {
        Self {
            client: Arc::new(client),
            configs: Mutex::new(Vec::new()),
        }
    }

    pub fn connections(&self) -> usize {
        self.configs.lock().unwrap().len()
    }

    pub fn last_config(&self) -> ClientConfiguration {
        self.configs
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("connect was called")
    }
}

impl Connector for MockConnector {
    type Client = Arc<MockClient>;

    fn connect(&self, config: &ClientConfiguration) -> Result<Arc<MockClient>, HttpError> {
        self.configs.lock().unwrap().push(config.clone());
        Ok(Arc::clone(&self.client))
    }
}
