//! Read commands, dispatch them to the controller, print the list.

use std::io::{BufRead, Write};

use anyhow::Result;
use todo_core::{AlertSink, ApiError, Dispatch, TodoController, TodoId, Transport};
use tracing::{debug, error};

use crate::command::{Command, EditInput, HELP};
use crate::render::render;

/// Prints service refusals to stderr, like a blocking alert box would.
pub struct StderrAlerts;

impl AlertSink for StderrAlerts {
    fn alert(&mut self, message: &str) {
        eprintln!("! {message}");
    }
}

pub struct Repl<T, A> {
    controller: TodoController<T, A>,
}

impl<T: Transport, A: AlertSink> Repl<T, A> {
    pub fn new(controller: TodoController<T, A>) -> Self {
        Self { controller }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &TodoController<T, A> {
        &self.controller
    }

    /// Mount on `fragment` and process lines until `quit` or end of input.
    pub fn run(&mut self, fragment: &str, input: impl BufRead, mut out: impl Write) -> Result<()> {
        report(self.controller.mount(fragment).map(|_| Dispatch::Sent));
        self.print(&mut out)?;

        for line in input.lines() {
            let line = line?;
            if self.controller.editor().is_editing() {
                self.edit(EditInput::parse(&line));
            } else {
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => {
                        writeln!(out, "{HELP}")?;
                        continue;
                    }
                    Ok(command) => self.dispatch(command, &mut out)?,
                    Err(err) => {
                        writeln!(out, "{err}")?;
                        continue;
                    }
                }
            }
            self.print(&mut out)?;
        }

        self.controller.unmount();
        Ok(())
    }

    fn dispatch(&mut self, command: Command, out: &mut impl Write) -> Result<()> {
        debug!(?command, "command");
        let c = &mut self.controller;
        let outcome = match command {
            Command::Add(text) => {
                c.set_draft(&text);
                c.submit_draft()
            }
            Command::Toggle(n) => match item_id(c, n) {
                Some(id) => c.toggle(&id),
                None => return no_item(out, n),
            },
            Command::Remove(n) => match item_id(c, n) {
                Some(id) => c.remove(&id),
                None => return no_item(out, n),
            },
            Command::Edit(n) => match item_id(c, n) {
                Some(id) => {
                    c.begin_edit(&id);
                    Ok(Dispatch::Skipped)
                }
                None => return no_item(out, n),
            },
            Command::ToggleAll => c.toggle_all(),
            Command::ClearCompleted => c.clear_completed(),
            Command::Route(fragment) => c.hash_changed(&fragment).map(|_| Dispatch::Skipped),
            Command::Refresh => c.refresh().map(|_| Dispatch::Skipped),
            Command::Help | Command::Quit => Ok(Dispatch::Skipped),
        };
        report(outcome);
        Ok(())
    }

    fn edit(&mut self, input: EditInput) {
        let c = &mut self.controller;
        let outcome = match input {
            EditInput::Submit(text) => {
                c.edit_draft(&text);
                c.submit_edit()
            }
            EditInput::Blur(text) => {
                if let Some(text) = text {
                    c.edit_draft(&text);
                }
                c.blur_edit()
            }
            EditInput::Cancel => {
                c.cancel_edit();
                Ok(Dispatch::Skipped)
            }
        };
        report(outcome);
    }

    fn print(&self, out: &mut impl Write) -> Result<()> {
        let c = &self.controller;
        write!(out, "{}", render(c.filter(), c.todos(), c.editor()))?;
        let prompt = if c.editor().is_editing() { "edit> " } else { "> " };
        write!(out, "{prompt}")?;
        out.flush()?;
        Ok(())
    }
}

fn item_id<T: Transport, A: AlertSink>(c: &TodoController<T, A>, n: usize) -> Option<TodoId> {
    c.todos().get(n - 1).map(|todo| todo.id.clone())
}

fn no_item(out: &mut impl Write, n: usize) -> Result<()> {
    writeln!(out, "no item {n}")?;
    Ok(())
}

/// Failures below the envelope are logged and the session carries on.
fn report(outcome: Result<Dispatch, ApiError>) {
    if let Err(err) = outcome {
        error!(%err, "request failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::UreqTransport;
    use todo_core::ClientConfig;

    fn start_server() -> std::net::SocketAddr {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });

        addr
    }

    fn session(script: &str) -> (Repl<UreqTransport, Vec<String>>, String) {
        let addr = start_server();
        let controller = TodoController::new(
            ClientConfig::new(&format!("http://{addr}")),
            UreqTransport::new(),
            Vec::new(),
        );
        let mut repl = Repl::new(controller);
        let mut out = Vec::new();
        repl.run("#/", script.as_bytes(), &mut out).unwrap();
        (repl, String::from_utf8(out).unwrap())
    }

    #[test]
    fn add_toggle_filter_clear() {
        let (repl, out) = session(
            "add buy milk\nadd walk dog\ntoggle 1\nfilter active\nfilter all\nclear\nquit\n",
        );
        let todos = repl.controller().todos();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].content, "walk dog");
        assert!(out.contains("-- todos (active) --\n  1. [ ] walk dog\n"));
        assert!(out.contains("  1. [x] buy milk\n"));
    }

    #[test]
    fn edit_mode_updates_and_removes() {
        let (repl, out) = session("add buy milk\nadd walk dog\nedit 1\nbuy bread\nedit 2\n\nquit\n");
        let todos = repl.controller().todos();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].content, "buy bread");
        assert!(out.contains("  1. [ ] buy milk\n     > buy milk\n"));
        assert!(out.contains("left in view\nedit> "));
    }

    #[test]
    fn blur_and_cancel_leave_the_item_alone() {
        let (repl, _) = session("add buy milk\nedit 1\n/blur\nedit 1\n/cancel\nquit\n");
        assert_eq!(repl.controller().todos()[0].content, "buy milk");
        assert!(!repl.controller().editor().is_editing());
    }

    #[test]
    fn bad_input_is_reported_inline() {
        let (repl, out) = session("toggle 5\nbogus\nquit\n");
        assert!(out.contains("no item 5\n"));
        assert!(out.contains("unknown command `bogus`"));
        assert!(repl.controller().alerts().is_empty());
    }
}
