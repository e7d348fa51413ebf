//! Task DTO exchanged with the todo API.
//!
//! # Design
//! `TaskDto` is the only payload on the wire. Both request bodies (create,
//! update) and response bodies (get, list, create, update) use the same four
//! keys, so a single type covers every operation. Field names are fixed by
//! the service: `id`, `userId`, `title`, `finished`.

use serde::{Deserialize, Serialize};

/// A single task as sent to and returned by the API.
///
/// `id` is assigned by the server on creation and is empty until then.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskDto {
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub title: String,
    pub finished: bool,
}

impl TaskDto {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        title: impl Into<String>,
        finished: bool,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            title: title.into(),
            finished,
        }
    }
}
