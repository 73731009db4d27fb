use crate::model::Task;
use crate::store::TaskStore;
use crate::util::unicode;

use super::app::{App, View};

/// Max characters accepted by the input field.
const INPUT_CHAR_LIMIT: usize = 156;

/// What a key press means to the controller. The keymap decides which
/// physical keys produce which intent; the state machine only ever sees
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Up,
    Down,
    AddTask,
    EditTask,
    DeleteTask,
    Confirm,
    Escape,
    Quit,
    Edit(EditOp),
}

/// Single-line text-field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Insert(char),
    Backspace,
    DeleteForward,
    Left,
    Right,
    Home,
    End,
}

/// Single-line text field with a byte-offset cursor kept on grapheme
/// boundaries.
#[derive(Debug, Clone, Default)]
pub struct InputField {
    text: String,
    cursor: usize,
}

impl InputField {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Replace the contents, cursor at the end.
    pub fn set(&mut self, text: String) {
        self.cursor = text.len();
        self.text = text;
    }

    pub fn apply(&mut self, op: EditOp) {
        match op {
            EditOp::Insert(c) => {
                if !c.is_control() && self.text.chars().count() < INPUT_CHAR_LIMIT {
                    self.text.insert(self.cursor, c);
                    self.cursor += c.len_utf8();
                }
            }
            EditOp::Backspace => {
                if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
                    self.text.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                }
            }
            EditOp::DeleteForward => {
                if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
                    self.text.replace_range(self.cursor..next, "");
                }
            }
            EditOp::Left => {
                if let Some(prev) = unicode::prev_grapheme_boundary(&self.text, self.cursor) {
                    self.cursor = prev;
                }
            }
            EditOp::Right => {
                if let Some(next) = unicode::next_grapheme_boundary(&self.text, self.cursor) {
                    self.cursor = next;
                }
            }
            EditOp::Home => self.cursor = 0,
            EditOp::End => self.cursor = self.text.len(),
        }
    }
}

/// Apply one intent to the app — the whole (state, intent) transition
/// table lives here so it can be driven directly in tests, without a
/// terminal.
pub fn apply(app: &mut App, intent: Intent) {
    app.clear_status();
    match intent {
        Intent::Quit => app.should_quit = true,
        Intent::Escape => {
            if matches!(app.view, View::Add | View::Edit) {
                app.input.clear();
                app.view = View::List;
            }
        }
        Intent::AddTask => {
            if app.view == View::List {
                app.input.clear();
                app.view = View::Add;
            }
        }
        Intent::EditTask => {
            if app.view == View::List
                && let Some(name) = app.selected_task().map(|t| t.name.clone())
            {
                app.input.set(name);
                app.view = View::Edit;
            }
        }
        Intent::DeleteTask => {
            if app.view == View::List {
                delete_selected(app);
            }
        }
        Intent::Up => {
            if app.view == View::List
                && let Some(cursor) = app.cursor
                && cursor > 0
            {
                app.cursor = Some(cursor - 1);
            }
        }
        Intent::Down => {
            if app.view == View::List
                && let Some(cursor) = app.cursor
                && cursor + 1 < app.tasks.len()
            {
                app.cursor = Some(cursor + 1);
            }
        }
        Intent::Confirm => match app.view {
            View::List => toggle_selected(app),
            View::Add => submit_new(app),
            View::Edit => submit_edit(app),
        },
        Intent::Edit(op) => {
            if matches!(app.view, View::Add | View::Edit) {
                app.input.apply(op);
            }
        }
    }
}

fn delete_selected(app: &mut App) {
    let Some(id) = app.selected_task().map(|t| t.id) else {
        return;
    };
    match app.store.delete(id) {
        Ok(()) => app.refresh(),
        Err(e) => app.report_store_error("delete task", &e),
    }
}

fn toggle_selected(app: &mut App) {
    let Some((id, completed)) = app.selected_task().map(|t| (t.id, t.completed)) else {
        return;
    };
    match app.store.set_completion(id, !completed) {
        Ok(()) => app.refresh(),
        Err(e) => app.report_store_error("toggle task", &e),
    }
}

// An empty buffer on Confirm is a no-op, not an error: nothing is
// persisted and the view stays put.
fn submit_new(app: &mut App) {
    if app.input.is_empty() {
        return;
    }
    match app.store.save(Task::new(app.input.text())) {
        Ok(_) => {
            app.refresh();
            app.input.clear();
            app.view = View::List;
        }
        Err(e) => app.report_store_error("add task", &e),
    }
}

fn submit_edit(app: &mut App) {
    if app.input.is_empty() {
        return;
    }
    let Some(mut task) = app.selected_task().cloned() else {
        return;
    };
    task.name = app.input.text().to_string();
    match app.store.save(task) {
        Ok(_) => {
            app.refresh();
            app.input.clear();
            app.view = View::List;
        }
        Err(e) => app.report_store_error("save task", &e),
    }
}
