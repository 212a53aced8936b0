//! View controller: local UI state plus dispatch to the remote service.
//!
//! # Design
//! The service owns every todo. The controller keeps a read-mostly copy
//! that is replaced wholesale by each list fetch, never merged. Every
//! successful mutation bumps `refresh_version` and immediately runs one
//! fetch for the current filter (invalidate-then-refetch).
//!
//! A fetch is split into `begin_fetch` / `complete_fetch` so a host can have
//! several in flight. Only the most recently begun fetch may write state;
//! results of superseded fetches, and anything arriving after `unmount`, are
//! dropped. Requests are never aborted, only ignored.
//!
//! `ApiError::Remote` is caught at each action, shown through the
//! `AlertSink` and leaves state untouched. Every other error is returned.

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::edit::{EditOutcome, ItemEditor};
use crate::error::ApiError;
use crate::filter::Filter;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{Todo, TodoId};

/// Where user-facing failure messages go.
pub trait AlertSink {
    fn alert(&mut self, message: &str);
}

impl AlertSink for Vec<String> {
    fn alert(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// What a user action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The service accepted the mutation.
    Sent,
    /// The service refused; the message went to the alert sink.
    Rejected,
    /// Nothing was sent.
    Skipped,
}

/// A list request handed out by `begin_fetch`. The host executes `request`
/// and gives the ticket back to `complete_fetch` with the result.
#[derive(Debug)]
pub struct FetchTicket {
    effect: u64,
    filter: Filter,
    pub request: HttpRequest,
}

impl FetchTicket {
    pub fn filter(&self) -> Filter {
        self.filter
    }
}

pub struct TodoController<T, A> {
    client: TodoClient,
    transport: T,
    alerts: A,
    filter: Filter,
    draft: String,
    todos: Vec<Todo>,
    editor: ItemEditor,
    refresh_version: u64,
    next_effect: u64,
    active_effect: Option<u64>,
    mounted: bool,
}

impl<T: Transport, A: AlertSink> TodoController<T, A> {
    pub fn new(config: ClientConfig, transport: T, alerts: A) -> Self {
        Self {
            client: TodoClient::new(config),
            transport,
            alerts,
            filter: Filter::All,
            draft: String::new(),
            todos: Vec::new(),
            editor: ItemEditor::new(),
            refresh_version: 0,
            next_effect: 0,
            active_effect: None,
            mounted: false,
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn todo(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| &todo.id == id)
    }

    pub fn editor(&self) -> &ItemEditor {
        &self.editor
    }

    pub fn refresh_version(&self) -> u64 {
        self.refresh_version
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn alerts(&self) -> &A {
        &self.alerts
    }

    /// Read the filter from `fragment` and load the list.
    pub fn mount(&mut self, fragment: &str) -> Result<(), ApiError> {
        self.filter = Filter::from_fragment(fragment);
        self.mounted = true;
        debug!(filter = %self.filter, "mounted");
        self.refresh()
    }

    /// Stop accepting fetch results. In-flight tickets are dropped on arrival.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.active_effect = None;
    }

    /// The URL fragment changed. Refetches only if the filter did.
    pub fn hash_changed(&mut self, fragment: &str) -> Result<(), ApiError> {
        let filter = Filter::from_fragment(fragment);
        if filter == self.filter {
            return Ok(());
        }
        debug!(from = %self.filter, to = %filter, "filter changed");
        self.filter = filter;
        self.refresh()
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Add the new-item draft. Blank drafts send nothing; the draft is
    /// cleared only once the service accepted it.
    pub fn submit_draft(&mut self) -> Result<Dispatch, ApiError> {
        let content = self.draft.trim().to_string();
        if content.is_empty() {
            return Ok(Dispatch::Skipped);
        }
        let request = self.client.build_add(&content);
        let outcome = self.mutate(request)?;
        if outcome == Dispatch::Sent {
            self.draft.clear();
        }
        Ok(outcome)
    }

    pub fn toggle(&mut self, id: &TodoId) -> Result<Dispatch, ApiError> {
        let request = self.client.build_toggle(id);
        self.mutate(request)
    }

    pub fn remove(&mut self, id: &TodoId) -> Result<Dispatch, ApiError> {
        let request = self.client.build_remove(id);
        self.mutate(request)
    }

    pub fn toggle_all(&mut self) -> Result<Dispatch, ApiError> {
        let request = self.client.build_toggle_all();
        self.mutate(Ok(request))
    }

    pub fn clear_completed(&mut self) -> Result<Dispatch, ApiError> {
        let request = self.client.build_clear_completed();
        self.mutate(Ok(request))
    }

    /// Open the inline editor on a listed todo. Returns false if the id is
    /// not in the current list.
    pub fn begin_edit(&mut self, id: &TodoId) -> bool {
        match self.todos.iter().find(|todo| &todo.id == id) {
            Some(todo) => {
                self.editor.begin(todo);
                true
            }
            None => false,
        }
    }

    pub fn edit_draft(&mut self, text: &str) {
        self.editor.set_draft(text);
    }

    pub fn submit_edit(&mut self) -> Result<Dispatch, ApiError> {
        let open = self.editor.clone();
        let outcome = self.editor.submit();
        self.apply_edit(outcome, open)
    }

    pub fn blur_edit(&mut self) -> Result<Dispatch, ApiError> {
        let open = self.editor.clone();
        let outcome = self.editor.blur();
        self.apply_edit(outcome, open)
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Run one fetch for the current filter, start to finish.
    pub fn refresh(&mut self) -> Result<(), ApiError> {
        if !self.mounted {
            return Ok(());
        }
        let ticket = self.begin_fetch();
        let response = self.transport.execute(ticket.request.clone());
        self.complete_fetch(ticket, response)?;
        Ok(())
    }

    /// Start a fetch effect. Any earlier ticket is superseded from here on.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_effect += 1;
        self.active_effect = Some(self.next_effect);
        debug!(effect = self.next_effect, filter = %self.filter, "fetching todos");
        FetchTicket {
            effect: self.next_effect,
            filter: self.filter,
            request: self.client.build_list(self.filter),
        }
    }

    /// Apply a fetch result. Returns whether the list was replaced.
    ///
    /// Superseded or post-unmount tickets return `Ok(false)` whatever the
    /// response holds.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        response: Result<HttpResponse, ApiError>,
    ) -> Result<bool, ApiError> {
        if !self.mounted || self.active_effect != Some(ticket.effect) {
            debug!(effect = ticket.effect, "discarding superseded fetch");
            return Ok(false);
        }
        match response.and_then(|response| self.client.parse_list(response)) {
            Ok(todos) => {
                self.todos = todos;
                self.drop_stale_edit();
                Ok(true)
            }
            Err(ApiError::Remote { message }) => {
                self.reject(&message);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Send what the edit asked for. A refusal reopens the editor as `open`
    /// left it, draft included.
    fn apply_edit(&mut self, outcome: EditOutcome, open: ItemEditor) -> Result<Dispatch, ApiError> {
        let dispatch = match outcome {
            EditOutcome::Update { id, content } => {
                let request = self.client.build_update(&id, &content);
                self.mutate(request)?
            }
            EditOutcome::Remove { id } => self.remove(&id)?,
            EditOutcome::Cancelled | EditOutcome::Ignored => Dispatch::Skipped,
        };
        if dispatch == Dispatch::Rejected {
            self.editor = open;
        }
        Ok(dispatch)
    }

    fn mutate(&mut self, request: Result<HttpRequest, ApiError>) -> Result<Dispatch, ApiError> {
        let request = request?;
        debug!(method = request.method.as_str(), path = %request.path, "dispatching");
        let response = self.transport.execute(request)?;
        match self.client.parse_mutation(response) {
            Ok(()) => {
                self.refresh_version += 1;
                self.refresh()?;
                Ok(Dispatch::Sent)
            }
            Err(ApiError::Remote { message }) => {
                self.reject(&message);
                Ok(Dispatch::Rejected)
            }
            Err(err) => Err(err),
        }
    }

    fn reject(&mut self, message: &str) {
        warn!(%message, "remote operation failed");
        self.alerts.alert(message);
    }

    /// An item that left the list takes its open editor with it.
    fn drop_stale_edit(&mut self) {
        let stale = self
            .editor
            .editing_id()
            .is_some_and(|id| !self.todos.iter().any(|todo| &todo.id == id));
        if stale {
            self.editor.cancel();
        }
    }
}
