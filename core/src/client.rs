//! Stateless HTTP request builder and envelope parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Every response is an envelope `{success, data, message}`. A failed
//! envelope becomes `ApiError::Remote`; there is no retry.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::filter::Filter;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{AddTodo, Envelope, Todo, TodoId, TodoRef, UpdateTodo};

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    config: ClientConfig,
}

impl TodoClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    pub fn build_list(&self, filter: Filter) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/todos?filter={}", self.base_url(), filter.as_str()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_add(&self, content: &str) -> Result<HttpRequest, ApiError> {
        self.post_json(
            "/add_todo",
            &AddTodo {
                content: content.to_string(),
            },
        )
    }

    pub fn build_update(&self, id: &TodoId, content: &str) -> Result<HttpRequest, ApiError> {
        self.post_json(
            "/update_todo",
            &UpdateTodo {
                todo_id: id.clone(),
                content: content.to_string(),
            },
        )
    }

    pub fn build_toggle(&self, id: &TodoId) -> Result<HttpRequest, ApiError> {
        self.post_json("/toggle_todo", &TodoRef { todo_id: id.clone() })
    }

    pub fn build_remove(&self, id: &TodoId) -> Result<HttpRequest, ApiError> {
        self.post_json("/remove_todo", &TodoRef { todo_id: id.clone() })
    }

    pub fn build_toggle_all(&self) -> HttpRequest {
        self.post_empty("/toggle_all")
    }

    pub fn build_clear_completed(&self) -> HttpRequest {
        self.post_empty("/clear_completed")
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        open_envelope::<Vec<Todo>>(response)?
            .ok_or_else(|| ApiError::Deserialization("list response has no data".to_string()))
    }

    /// Parse the response of any mutating operation. Mutations carry no data;
    /// whatever the server puts there is ignored.
    pub fn parse_mutation(&self, response: HttpResponse) -> Result<(), ApiError> {
        open_envelope::<IgnoredAny>(response)?;
        Ok(())
    }

    fn post_json<B: Serialize>(&self, route: &str, body: &B) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{route}", self.base_url()),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    fn post_empty(&self, route: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{route}", self.base_url()),
            headers: Vec::new(),
            body: None,
        }
    }
}

/// Check the status, decode the envelope and turn `success = false` into
/// `ApiError::Remote`. Returns the envelope's `data`.
fn open_envelope<T: DeserializeOwned>(response: HttpResponse) -> Result<Option<T>, ApiError> {
    if response.status != 200 {
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body,
        });
    }
    let envelope: Envelope<T> = serde_json::from_str(&response.body)
        .map_err(|e| ApiError::Deserialization(e.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Remote {
            message: envelope.message.unwrap_or_default(),
        });
    }
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new(ClientConfig::new("http://localhost:3004"))
    }

    fn json_body(req: &HttpRequest) -> serde_json::Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn build_list_puts_filter_in_query() {
        let req = client().build_list(Filter::Active);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3004/todos?filter=active");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_add_produces_correct_request() {
        let req = client().build_add("Buy milk").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3004/add_todo");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(json_body(&req), serde_json::json!({ "content": "Buy milk" }));
    }

    #[test]
    fn build_update_sends_id_and_content() {
        let req = client().build_update(&TodoId::new("t-1"), "Updated").unwrap();
        assert_eq!(req.path, "http://localhost:3004/update_todo");
        assert_eq!(
            json_body(&req),
            serde_json::json!({ "todo_id": "t-1", "content": "Updated" })
        );
    }

    #[test]
    fn build_toggle_and_remove_send_only_the_id() {
        let id = TodoId::new("t-2");
        let toggle = client().build_toggle(&id).unwrap();
        let remove = client().build_remove(&id).unwrap();
        assert_eq!(toggle.path, "http://localhost:3004/toggle_todo");
        assert_eq!(remove.path, "http://localhost:3004/remove_todo");
        assert_eq!(json_body(&toggle), serde_json::json!({ "todo_id": "t-2" }));
        assert_eq!(json_body(&remove), serde_json::json!({ "todo_id": "t-2" }));
    }

    #[test]
    fn bulk_operations_have_no_body() {
        let toggle_all = client().build_toggle_all();
        let clear = client().build_clear_completed();
        assert_eq!(toggle_all.method, HttpMethod::Post);
        assert_eq!(toggle_all.path, "http://localhost:3004/toggle_all");
        assert_eq!(clear.path, "http://localhost:3004/clear_completed");
        assert!(toggle_all.body.is_none() && clear.body.is_none());
        assert!(toggle_all.headers.is_empty());
    }

    #[test]
    fn parse_list_success() {
        let response = HttpResponse::ok(
            r#"{"success":true,"message":"","data":[{"id":"a","content":"Test","completed":false}]}"#,
        );
        let todos = client().parse_list(response).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, TodoId::new("a"));
        assert_eq!(todos[0].content, "Test");
    }

    #[test]
    fn parse_list_without_data_is_a_decode_error() {
        let err = client()
            .parse_list(HttpResponse::ok(r#"{"success":true,"message":""}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_mutation_success_ignores_data() {
        assert!(client()
            .parse_mutation(HttpResponse::ok(r#"{"success":true,"message":""}"#))
            .is_ok());
        assert!(client()
            .parse_mutation(HttpResponse::ok(r#"{"success":true,"data":{"id":"x"}}"#))
            .is_ok());
    }

    #[test]
    fn failed_envelope_is_remote_error() {
        let err = client()
            .parse_mutation(HttpResponse::ok(
                r#"{"success":false,"message":"t-9 is not found"}"#,
            ))
            .unwrap_err();
        assert_eq!(err.remote_message(), Some("t-9 is not found"));
    }

    #[test]
    fn failed_envelope_without_message() {
        let err = client()
            .parse_mutation(HttpResponse::ok(r#"{"success":false}"#))
            .unwrap_err();
        assert_eq!(err.remote_message(), Some(""));
    }

    #[test]
    fn non_200_status_is_http_error() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = client().parse_list(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client().parse_list(HttpResponse::ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new(ClientConfig::new("http://localhost:3004/"));
        let req = client.build_toggle_all();
        assert_eq!(req.path, "http://localhost:3004/toggle_all");
    }
}
