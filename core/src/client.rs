//! Request builder, response classifier and blocking client for the todo API.
//!
//! # Design
//! `TodoApiClient` holds only a `base_url` and a transport, and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that consumes
//! an `HttpResponse`; the public operations (`get_all_tasks`, ...) glue the
//! two together around one `Transport::send`.
//!
//! Status classification is shared by every operation: the accepted codes
//! succeed, 404 becomes `ItemNotFound` only for by-id lookups, and anything
//! else is `UnknownError` with the raw code.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiClientError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::transport::UreqTransport;
use crate::types::TaskDto;

const TODOS_PATH: &str = "/todos";

/// Characters escaped in a single path segment: the WHATWG path set plus
/// `/` and `%`, so an id can never add segments, a query or a fragment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Blocking client for the todo API.
///
/// Generic over its `Transport` so tests and hosts can swap the network
/// layer. `TodoApiClient::new` uses `UreqTransport`.
#[derive(Debug, Clone)]
pub struct TodoApiClient<T = UreqTransport> {
    base_url: String,
    transport: T,
}

impl TodoApiClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(&config.base_url, UreqTransport::with_timeout(config.timeout))
    }
}

impl<T> TodoApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_get_all_tasks(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{TODOS_PATH}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// The id is not validated; it is percent-encoded as one path segment.
    pub fn build_get_task_by_id(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.task_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_add_task(&self, task: &TaskDto) -> Result<HttpRequest> {
        json_request(HttpMethod::Post, format!("{}{TODOS_PATH}", self.base_url), task)
    }

    pub fn build_update_task_by_id(&self, task: &TaskDto) -> Result<HttpRequest> {
        json_request(HttpMethod::Put, self.task_url(&task.id), task)
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}{TODOS_PATH}/{}", self.base_url, utf8_percent_encode(id, SEGMENT))
    }

    pub fn parse_get_all_tasks(&self, response: HttpResponse) -> Result<Vec<TaskDto>> {
        check_status(&response, &[200], None)?;
        decode(&response.body)
    }

    pub fn parse_get_task_by_id(&self, id: &str, response: HttpResponse) -> Result<TaskDto> {
        check_status(&response, &[200], Some(id))?;
        decode(&response.body)
    }

    pub fn parse_add_task(&self, response: HttpResponse) -> Result<TaskDto> {
        check_status(&response, &[200, 201], None)?;
        decode(&response.body)
    }

    pub fn parse_update_task_by_id(&self, response: HttpResponse) -> Result<TaskDto> {
        check_status(&response, &[200, 201], None)?;
        decode(&response.body)
    }
}

impl<T: Transport> TodoApiClient<T> {
    /// Fetch every task, in the order the server returns them.
    pub fn get_all_tasks(&self) -> Result<Vec<TaskDto>> {
        let response = self.execute(self.build_get_all_tasks())?;
        self.parse_get_all_tasks(response)
    }

    /// Fetch one task. A 404 is reported as `ItemNotFound` carrying `id`.
    pub fn get_task_by_id(&self, id: &str) -> Result<TaskDto> {
        let response = self.execute(self.build_get_task_by_id(id))?;
        self.parse_get_task_by_id(id, response)
    }

    /// Create a task and return the server's representation of it, which
    /// usually carries a newly assigned `id`.
    pub fn add_task(&self, task: &TaskDto) -> Result<TaskDto> {
        let response = self.execute(self.build_add_task(task)?)?;
        self.parse_add_task(response)
    }

    /// Replace the task identified by `task.id`.
    pub fn update_task_by_id(&self, task: &TaskDto) -> Result<TaskDto> {
        let response = self.execute(self.build_update_task_by_id(task)?)?;
        self.parse_update_task_by_id(response)
    }

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(request)?;
        debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }
}

fn json_request(method: HttpMethod, url: String, task: &TaskDto) -> Result<HttpRequest> {
    let body =
        serde_json::to_string(task).map_err(|e| ApiClientError::InvalidRequest(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<D: DeserializeOwned>(body: &str) -> Result<D> {
    serde_json::from_str(body).map_err(|e| ApiClientError::InvalidResponse(e.to_string()))
}

/// Map a status outside `accepted` to the matching `ApiClientError`.
///
/// `lookup_id` is set for by-id lookups, the only case where 404 is
/// reported as `ItemNotFound`.
fn check_status(response: &HttpResponse, accepted: &[u16], lookup_id: Option<&str>) -> Result<()> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        if let Some(id) = lookup_id {
            return Err(ApiClientError::ItemNotFound {
                id: Some(id.to_string()),
            });
        }
    }
    Err(ApiClientError::UnknownError {
        status: response.status,
        body: response.body.clone(),
    })
}
