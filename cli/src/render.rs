//! Plain-text rendering of the todo list.

use std::fmt::Write;

use todo_core::{Filter, ItemEditor, Todo};

/// Render the list as it should appear after a command.
pub fn render(filter: Filter, todos: &[Todo], editor: &ItemEditor) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- todos ({filter}) --");
    if todos.is_empty() {
        out.push_str("   (nothing here)\n");
    }
    for (i, todo) in todos.iter().enumerate() {
        let mark = if todo.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "{:>3}. [{mark}] {}", i + 1, todo.content);
        if editor.editing_id() == Some(&todo.id) {
            let _ = writeln!(out, "     > {}", editor.draft().unwrap_or_default());
        }
    }
    let left = todos.iter().filter(|t| !t.completed).count();
    let noun = if left == 1 { "item" } else { "items" };
    let _ = writeln!(out, "{left} {noun} left in view");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::TodoId;

    fn todo(id: &str, content: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(id),
            content: content.to_string(),
            completed,
        }
    }

    #[test]
    fn marks_completed_items() {
        let todos = [todo("1", "buy milk", false), todo("2", "walk dog", true)];
        let out = render(Filter::All, &todos, &ItemEditor::new());
        assert_eq!(
            out,
            "-- todos (all) --\n  1. [ ] buy milk\n  2. [x] walk dog\n1 item left in view\n"
        );
    }

    #[test]
    fn empty_list() {
        let out = render(Filter::Completed, &[], &ItemEditor::new());
        assert!(out.starts_with("-- todos (completed) --\n"));
        assert!(out.contains("(nothing here)"));
        assert!(out.ends_with("0 items left in view\n"));
    }

    #[test]
    fn shows_the_edit_draft_under_its_item() {
        let todos = [todo("1", "buy milk", false)];
        let mut editor = ItemEditor::new();
        editor.begin(&todos[0]);
        editor.set_draft("buy bread");
        let out = render(Filter::Active, &todos, &editor);
        assert!(out.contains("  1. [ ] buy milk\n     > buy bread\n"));
    }
}
