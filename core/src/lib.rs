//! Blocking API client for the todo service.
//!
//! # Overview
//! `TodoApiClient` exposes four operations against a REST endpoint
//! (`get_all_tasks`, `get_task_by_id`, `add_task`, `update_task_by_id`),
//! exchanging `TaskDto` values as JSON and reporting failures as one
//! `ApiClientError`.
//!
//! # Design
//! - `TodoApiClient` is stateless: it holds the base endpoint and a transport.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`); the public operations run a
//!   `Transport` in between. Hosts that do their own I/O can use the split
//!   directly.
//! - `UreqTransport` is the default transport. Tests substitute their own.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! use todo_api_client::{ApiClientError, TodoApiClient};
//!
//! let client = TodoApiClient::new("http://localhost:3000");
//! match client.get_task_by_id("1") {
//!     Ok(task) => println!("{}", task.title),
//!     Err(ApiClientError::ItemNotFound { .. }) => println!("no such task"),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::TodoApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiClientError, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use transport::UreqTransport;
pub use types::TaskDto;
