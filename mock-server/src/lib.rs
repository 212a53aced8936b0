use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub content: String,
    pub completed: bool,
}

/// Every response: `data` only on list, `message` only meaningful on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    fn ok(data: Option<T>) -> Self {
        Self {
            success: true,
            message: String::new(),
            data,
        }
    }

    fn not_found(todo_id: &str) -> Self {
        Self {
            success: false,
            message: format!("{todo_id} is not found"),
            data: None,
        }
    }

    /// Toggle has always phrased its refusal a little louder.
    fn toggle_not_found(todo_id: &str) -> Self {
        Self {
            message: format!("{todo_id} is not found!"),
            ..Self::not_found(todo_id)
        }
    }
}

type Ack = Envelope<()>;

#[derive(Deserialize)]
pub struct ListQuery {
    pub filter: Option<String>,
}

#[derive(Deserialize)]
pub struct AddTodo {
    pub content: String,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub todo_id: String,
    pub content: String,
}

#[derive(Deserialize)]
pub struct TodoRef {
    pub todo_id: String,
}

/// Todos in insertion order.
#[derive(Debug, Default)]
pub struct TodoStore {
    todos: Vec<Todo>,
}

impl TodoStore {
    pub fn list(&self, filter: Option<&str>) -> Vec<Todo> {
        self.todos
            .iter()
            .filter(|todo| match filter {
                Some("active") => !todo.completed,
                Some("completed") => todo.completed,
                _ => true,
            })
            .cloned()
            .collect()
    }

    pub fn add(&mut self, content: &str) -> String {
        let todo = Todo {
            id: Uuid::new_v4().hyphenated().to_string(),
            content: content.to_string(),
            completed: false,
        };
        let id = todo.id.clone();
        self.todos.push(todo);
        id
    }

    pub fn update(&mut self, todo_id: &str, content: &str) -> bool {
        self.with_todo(todo_id, |todo| todo.content = content.to_string())
    }

    pub fn toggle(&mut self, todo_id: &str) -> bool {
        self.with_todo(todo_id, |todo| todo.completed = !todo.completed)
    }

    pub fn remove(&mut self, todo_id: &str) -> bool {
        let len = self.todos.len();
        self.todos.retain(|todo| todo.id != todo_id);
        len != self.todos.len()
    }

    /// All completed → all active. Anything else → all completed.
    pub fn toggle_all(&mut self) {
        let all_completed = self.todos.iter().all(|todo| todo.completed);
        for todo in &mut self.todos {
            todo.completed = !all_completed;
        }
    }

    pub fn clear_completed(&mut self) {
        self.todos.retain(|todo| !todo.completed);
    }

    fn with_todo(&mut self, todo_id: &str, apply: impl FnOnce(&mut Todo)) -> bool {
        match self.todos.iter_mut().find(|todo| todo.id == todo_id) {
            Some(todo) => {
                apply(todo);
                true
            }
            None => false,
        }
    }
}

pub type Db = Arc<RwLock<TodoStore>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(TodoStore::default()));
    Router::new()
        .route("/todos", get(list_todos))
        .route("/add_todo", post(add_todo))
        .route("/update_todo", post(update_todo))
        .route("/toggle_todo", post(toggle_todo))
        .route("/remove_todo", post(remove_todo))
        .route("/toggle_all", post(toggle_all))
        .route("/clear_completed", post(clear_completed))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> Json<Envelope<Vec<Todo>>> {
    let todos = db.read().await.list(query.filter.as_deref());
    Json(Envelope::ok(Some(todos)))
}

async fn add_todo(State(db): State<Db>, Json(input): Json<AddTodo>) -> Json<Ack> {
    let id = db.write().await.add(&input.content);
    info!(%id, "todo added");
    Json(Envelope::ok(None))
}

async fn update_todo(State(db): State<Db>, Json(input): Json<UpdateTodo>) -> Json<Ack> {
    let found = db.write().await.update(&input.todo_id, &input.content);
    Json(ack(found, &input.todo_id, "todo updated"))
}

async fn toggle_todo(State(db): State<Db>, Json(input): Json<TodoRef>) -> Json<Ack> {
    if db.write().await.toggle(&input.todo_id) {
        info!(id = %input.todo_id, "todo toggled");
        Json(Envelope::ok(None))
    } else {
        warn!(id = %input.todo_id, "unknown todo");
        Json(Envelope::toggle_not_found(&input.todo_id))
    }
}

async fn remove_todo(State(db): State<Db>, Json(input): Json<TodoRef>) -> Json<Ack> {
    let found = db.write().await.remove(&input.todo_id);
    Json(ack(found, &input.todo_id, "todo removed"))
}

async fn toggle_all(State(db): State<Db>) -> Json<Ack> {
    db.write().await.toggle_all();
    info!("all todos toggled");
    Json(Envelope::ok(None))
}

async fn clear_completed(State(db): State<Db>) -> Json<Ack> {
    db.write().await.clear_completed();
    info!("completed todos cleared");
    Json(Envelope::ok(None))
}

fn ack(found: bool, todo_id: &str, event: &str) -> Ack {
    if found {
        info!(id = %todo_id, "{event}");
        Envelope::ok(None)
    } else {
        warn!(id = %todo_id, "unknown todo");
        Envelope::not_found(todo_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(contents: &[&str]) -> (TodoStore, Vec<String>) {
        let mut store = TodoStore::default();
        let ids = contents.iter().map(|c| store.add(c)).collect();
        (store, ids)
    }

    #[test]
    fn ack_envelope_omits_data() {
        let json = serde_json::to_value(Ack::ok(None)).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "message": "" }));
    }

    #[test]
    fn not_found_message_names_the_id() {
        let json = serde_json::to_value(Ack::not_found("abc")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "abc is not found");
    }

    #[test]
    fn toggle_refusal_ends_with_a_bang() {
        let json = serde_json::to_value(Ack::toggle_not_found("abc")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "abc is not found!");
    }

    #[test]
    fn add_issues_hyphenated_uuids() {
        let (store, ids) = store_with(&["a"]);
        assert!(Uuid::parse_str(&ids[0]).is_ok());
        assert_eq!(ids[0].len(), 36);
        assert!(!store.list(None)[0].completed);
    }

    #[test]
    fn list_filters() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        store.toggle(&ids[1]);
        let names = |todos: Vec<Todo>| todos.into_iter().map(|t| t.content).collect::<Vec<_>>();
        assert_eq!(names(store.list(None)), ["a", "b", "c"]);
        assert_eq!(names(store.list(Some("all"))), ["a", "b", "c"]);
        assert_eq!(names(store.list(Some("active"))), ["a", "c"]);
        assert_eq!(names(store.list(Some("completed"))), ["b"]);
        assert_eq!(names(store.list(Some("bogus"))), ["a", "b", "c"]);
    }

    #[test]
    fn update_keeps_completed_flag() {
        let (mut store, ids) = store_with(&["a"]);
        store.toggle(&ids[0]);
        assert!(store.update(&ids[0], "b"));
        let todo = &store.list(None)[0];
        assert_eq!(todo.content, "b");
        assert!(todo.completed);
    }

    #[test]
    fn unknown_ids_report_false() {
        let (mut store, _) = store_with(&["a"]);
        assert!(!store.update("nope", "x"));
        assert!(!store.toggle("nope"));
        assert!(!store.remove("nope"));
        assert_eq!(store.list(None).len(), 1);
    }

    #[test]
    fn toggle_all_completes_unless_everything_is_done() {
        let (mut store, ids) = store_with(&["a", "b"]);
        store.toggle(&ids[0]);
        store.toggle_all();
        assert!(store.list(None).iter().all(|t| t.completed));
        store.toggle_all();
        assert!(store.list(None).iter().all(|t| !t.completed));
    }

    #[test]
    fn toggle_all_on_empty_store_is_harmless() {
        let mut store = TodoStore::default();
        store.toggle_all();
        assert!(store.list(None).is_empty());
    }

    #[test]
    fn clear_completed_drops_only_completed() {
        let (mut store, ids) = store_with(&["a", "b"]);
        store.toggle(&ids[0]);
        store.clear_completed();
        let left = store.list(None);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].content, "b");
    }

    #[test]
    fn add_payload_rejects_missing_content() {
        let result: Result<AddTodo, _> = serde_json::from_str(r#"{"title":"x"}"#);
        assert!(result.is_err());
    }
}
