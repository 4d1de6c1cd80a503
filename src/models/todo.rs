//! To-do item model.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Status value counted as done.
pub const TODO_COMPLETED: &str = "Completed";

/// A to-do entry. Status transitions happen server-side only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keterangan: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pesan: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

impl TodoItem {
    pub fn is_completed(&self) -> bool {
        self.status == TODO_COMPLETED
    }
}

/// Response body of `GET /todolist`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoListResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub todos: Vec<TodoItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_todos_key_is_empty() {
        let resp: TodoListResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.todos.is_empty());
    }

    #[test]
    fn test_null_todos_is_empty() {
        let resp: TodoListResponse = serde_json::from_str(r#"{"todos": null}"#).unwrap();
        assert!(resp.todos.is_empty());
    }

    #[test]
    fn test_null_id_defaults_to_zero() {
        let resp: TodoListResponse = serde_json::from_str(
            r#"{"todos": [{"id": null, "content": "Laporan", "status": "Completed"}]}"#,
        )
        .unwrap();
        assert_eq!(resp.todos.len(), 1);
        assert_eq!(resp.todos[0].id, 0);
        assert_eq!(resp.todos[0].content, "Laporan");
        assert!(resp.todos[0].is_completed());
    }

    #[test]
    fn test_completed_is_case_sensitive() {
        let mut item = TodoItem {
            status: "Completed".into(),
            ..Default::default()
        };
        assert!(item.is_completed());
        item.status = "completed".into();
        assert!(!item.is_completed());
    }
}
