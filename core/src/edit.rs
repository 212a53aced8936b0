//! Inline edit state for a single todo.
//!
//! `Viewing -> Editing` on begin, `Editing -> Viewing` on submit, cancel or
//! blur. The machine only decides what the edit means; issuing the request
//! is the controller's job.

use crate::types::{Todo, TodoId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    Viewing,
    Editing {
        id: TodoId,
        original: String,
        draft: String,
    },
}

/// What leaving the `Editing` state asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Save the new content.
    Update { id: TodoId, content: String },
    /// The draft was emptied: delete the item instead of saving it.
    Remove { id: TodoId },
    /// Back to viewing with nothing to send.
    Cancelled,
    /// No edit was open.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct ItemEditor {
    state: EditState,
}

impl ItemEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing { .. })
    }

    /// Id of the todo under edit.
    pub fn editing_id(&self) -> Option<&TodoId> {
        match &self.state {
            EditState::Editing { id, .. } => Some(id),
            EditState::Viewing => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing { draft, .. } => Some(draft),
            EditState::Viewing => None,
        }
    }

    /// Open the editor on `todo`, seeding the draft with its content. An edit
    /// already in progress is dropped.
    pub fn begin(&mut self, todo: &Todo) {
        self.state = EditState::Editing {
            id: todo.id.clone(),
            original: todo.content.clone(),
            draft: todo.content.clone(),
        };
    }

    /// Replace the draft text. No-op while viewing.
    pub fn set_draft(&mut self, text: &str) {
        if let EditState::Editing { draft, .. } = &mut self.state {
            *draft = text.to_string();
        }
    }

    /// Enter pressed. An empty draft means remove.
    pub fn submit(&mut self) -> EditOutcome {
        match std::mem::take(&mut self.state) {
            EditState::Viewing => EditOutcome::Ignored,
            EditState::Editing { id, draft, .. } => {
                let content = draft.trim();
                if content.is_empty() {
                    EditOutcome::Remove { id }
                } else {
                    EditOutcome::Update {
                        id,
                        content: content.to_string(),
                    }
                }
            }
        }
    }

    /// Focus lost. Unchanged text cancels; anything else submits.
    pub fn blur(&mut self) -> EditOutcome {
        let unchanged = match &self.state {
            EditState::Viewing => return EditOutcome::Ignored,
            EditState::Editing {
                original, draft, ..
            } => draft.trim() == original,
        };
        if unchanged {
            self.state = EditState::Viewing;
            EditOutcome::Cancelled
        } else {
            self.submit()
        }
    }

    /// Escape pressed.
    pub fn cancel(&mut self) -> EditOutcome {
        match std::mem::take(&mut self.state) {
            EditState::Viewing => EditOutcome::Ignored,
            EditState::Editing { .. } => EditOutcome::Cancelled,
        }
    }
}
