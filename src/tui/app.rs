use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::{config_io, log};
use crate::model::{Config, Task};
use crate::store::{SqliteStore, StorageError, TaskStore};

use super::input::{self, InputField};
use super::keymap;
use super::render;
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    List,
    Add,
    Edit,
}

/// Main application state: the in-memory snapshot plus everything
/// transient (view, cursor, input buffer, status line).
pub struct App {
    pub(crate) store: Box<dyn TaskStore>,
    /// Current visible snapshot, newest first
    pub tasks: Vec<Task>,
    pub view: View,
    /// Index into `tasks`; None iff the snapshot is empty
    pub cursor: Option<usize>,
    pub input: InputField,
    pub theme: Theme,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub status_is_error: bool,
    log_path: Option<PathBuf>,
}

/// Read-only snapshot handed to the renderer each frame. The renderer
/// never mutates app state.
pub struct ViewModel<'a> {
    pub view: View,
    pub tasks: &'a [Task],
    pub cursor: Option<usize>,
    pub input: &'a str,
    pub input_cursor: usize,
    pub input_visible: bool,
    /// (message, is_error)
    pub status: Option<(&'a str, bool)>,
}

impl App {
    /// Build the controller from an initial store snapshot. Failing that
    /// load is fatal: the process must not start with an unknown task set.
    pub fn new(
        store: Box<dyn TaskStore>,
        theme: Theme,
        log_path: Option<PathBuf>,
    ) -> Result<Self, StorageError> {
        let tasks = store.list_visible()?;
        let cursor = if tasks.is_empty() { None } else { Some(0) };
        Ok(App {
            store,
            tasks,
            view: View::List,
            cursor,
            input: InputField::default(),
            theme,
            should_quit: false,
            status_message: None,
            status_is_error: false,
            log_path,
        })
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.cursor.and_then(|cursor| self.tasks.get(cursor))
    }

    pub fn view_model(&self) -> ViewModel<'_> {
        ViewModel {
            view: self.view,
            tasks: &self.tasks,
            cursor: self.cursor,
            input: self.input.text(),
            input_cursor: self.input.cursor(),
            input_visible: self.view != View::List,
            status: self
                .status_message
                .as_deref()
                .map(|message| (message, self.status_is_error)),
        }
    }

    /// Re-read the visible snapshot after a successful mutation. A failed
    /// re-read leaves the (now stale) snapshot in place.
    pub(crate) fn refresh(&mut self) {
        match self.store.list_visible() {
            Ok(tasks) => {
                self.tasks = tasks;
                self.clamp_cursor();
            }
            Err(e) => self.report_store_error("refresh task list", &e),
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = if self.tasks.is_empty() {
            None
        } else {
            Some(self.cursor.unwrap_or(0).min(self.tasks.len() - 1))
        };
    }

    /// Swallow a recoverable store failure: surface it on the status row,
    /// append it to the error log, change nothing else.
    pub(crate) fn report_store_error(&mut self, context: &str, err: &StorageError) {
        if let Some(path) = &self.log_path {
            log::log_storage_error(path, context, err);
        }
        self.status_message = Some(format!("could not {context}: {err}"));
        self.status_is_error = true;
    }

    pub(crate) fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }
}

/// Run the TUI application
pub fn run(db_flag: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config_io::load_config(Path::new(".")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("warning: {e}");
            Config::default()
        }
    };
    let db_path = config_io::resolve_db_path(db_flag, &config);
    let store = SqliteStore::open(&db_path)?;
    let mut app = App::new(
        Box::new(store),
        Theme::from_config(&config.ui),
        Some(log::log_path_for(&db_path)),
    )?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(intent) = keymap::map_key(app.view, key)
        {
            input::apply(app, intent);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
