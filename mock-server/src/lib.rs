use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
}

#[derive(Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

#[derive(Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

fn default_status() -> String {
    "todo".to_string()
}

#[derive(Default)]
pub struct Store {
    tasks: BTreeMap<u64, Task>,
    next_id: u64,
}

impl Store {
    fn insert(&mut self, input: NewTask) -> Task {
        self.next_id += 1;
        let task = Task {
            id: self.next_id,
            title: input.title,
            description: input.description,
            status: input.status,
        };
        self.tasks.insert(task.id, task.clone());
        task
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Routes for the task API, nested under `/api`.
pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    let tasks = Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .with_state(db);
    Router::new().nest("/api", tasks)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock task server listening");
    }
    axum::serve(listener, app()).await
}

async fn list_tasks(State(db): State<Db>) -> Json<Vec<Task>> {
    let store = db.read().await;
    Json(store.tasks.values().cloned().collect())
}

async fn create_task(
    State(db): State<Db>,
    Json(input): Json<NewTask>,
) -> (StatusCode, Json<Task>) {
    let task = db.write().await.insert(input);
    debug!(id = task.id, "created task");
    (StatusCode::CREATED, Json(task))
}

async fn update_task(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<TaskPatch>,
) -> Result<Json<Task>, StatusCode> {
    let mut store = db.write().await;
    let task = store.tasks.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        task.title = title;
    }
    if let Some(description) = input.description {
        task.description = Some(description);
    }
    if let Some(status) = input.status {
        task.status = status;
    }
    debug!(id, "updated task");
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .tasks
        .remove(&id)
        .map(|_| {
            debug!(id, "deleted task");
            StatusCode::NO_CONTENT
        })
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: None,
            status: default_status(),
        }
    }

    #[test]
    fn task_serializes_without_missing_description() {
        let task = Task {
            id: 1,
            title: "Test".to_string(),
            description: None,
            status: "todo".to_string(),
        };
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["status"], "todo");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn new_task_defaults_status_to_todo() {
        let input: NewTask = serde_json::from_str(r#"{"title":"No status field"}"#).unwrap();
        assert_eq!(input.title, "No status field");
        assert_eq!(input.status, "todo");
        assert!(input.description.is_none());
    }

    #[test]
    fn new_task_rejects_missing_title() {
        let result: Result<NewTask, _> = serde_json::from_str(r#"{"status":"todo"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_all_fields_optional() {
        let input: TaskPatch = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.title.is_none());
        assert!(input.description.is_none());
        assert!(input.status.is_none());
    }

    #[test]
    fn store_assigns_increasing_ids_from_one() {
        let mut store = Store::default();
        assert_eq!(store.insert(new_task("a")).id, 1);
        assert_eq!(store.insert(new_task("b")).id, 2);
        store.tasks.remove(&2);
        assert_eq!(store.insert(new_task("c")).id, 3);
    }
}
