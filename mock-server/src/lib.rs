//! Test servers for the todo API client.
//!
//! - `app` / `run`: an in-memory fake of the todo service, handy for
//!   end-to-end lifecycle tests and for running locally (`cargo run -p mock-server`).
//! - `MockServer`: a scripted server that replays enqueued responses in order
//!   and records every request it receives, so tests can assert on the exact
//!   method, path and body a client sent.

pub mod scripted;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub use scripted::{MockResponse, MockServer, RecordedRequest};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub finished: bool,
}

/// Tasks in insertion order plus the next id to hand out.
#[derive(Debug)]
struct Store {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Store {
    fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks
            .iter()
            .filter_map(|task| task.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self { tasks, next_id }
    }
}

type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_tasks(Vec::new())
}

/// Fake service pre-loaded with `tasks`. New ids continue after the largest
/// numeric id already present.
pub fn app_with_tasks(tasks: Vec<Task>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_tasks(tasks)));
    Router::new()
        .route("/todos", get(list_tasks).post(create_task))
        .route("/todos/{id}", get(get_task).put(update_task))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve `router` on an ephemeral localhost port from a background thread.
///
/// The thread owns a current-thread runtime, so callers can be plain
/// synchronous tests. The server lives until the process exits.
pub fn spawn(router: Router) -> Result<SocketAddr, std::io::Error> {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let addr = std_listener.local_addr()?;
    std_listener.set_nonblocking(true)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::spawn(move || {
        let result: Result<(), std::io::Error> = rt.block_on(async move {
            let listener = TcpListener::from_std(std_listener)?;
            axum::serve(listener, router).await
        });
        if let Err(err) = result {
            tracing::error!(%err, %addr, "test server stopped");
        }
    });

    tracing::debug!(%addr, "test server started");
    Ok(addr)
}

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    let store = db.read().await;
    Json(store.tasks.clone())
}

async fn create_task(State(db): State<Db>, Json(input): Json<Task>) -> (StatusCode, Json<Task>) {
    let mut store = db.write().await;
    let task = Task {
        id: store.next_id.to_string(),
        ..input
    };
    store.next_id += 1;
    store.tasks.push(task.clone());
    tracing::debug!(id = %task.id, "created task");
    (StatusCode::CREATED, Json(task))
}

async fn get_task(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Task>, StatusCode> {
    let store = db.read().await;
    store
        .tasks
        .iter()
        .find(|task| task.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<Task>,
) -> Result<Json<Task>, StatusCode> {
    let mut store = db.write().await;
    let task = store
        .tasks
        .iter_mut()
        .find(|task| task.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    task.user_id = input.user_id;
    task.title = input.title;
    task.finished = input.finished;
    Ok(Json(task.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            user_id: "1".to_string(),
            title: "Test".to_string(),
            finished: false,
        }
    }

    #[test]
    fn task_serializes_with_camel_case_user_id() {
        let json = serde_json::to_value(task("1")).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["userId"], "1");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["finished"], false);
    }

    #[test]
    fn task_id_and_finished_default_when_absent() {
        let input: Task = serde_json::from_str(r#"{"userId":"3","title":"No id yet"}"#).unwrap();
        assert!(input.id.is_empty());
        assert!(!input.finished);
    }

    #[test]
    fn task_rejects_missing_title() {
        let result: Result<Task, _> = serde_json::from_str(r#"{"userId":"1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn store_continues_after_largest_numeric_id() {
        let store = Store::with_tasks(vec![task("3"), task("10"), task("abc")]);
        assert_eq!(store.next_id, 11);
    }

    #[test]
    fn empty_store_starts_at_one() {
        assert_eq!(Store::with_tasks(Vec::new()).next_id, 1);
    }
}
