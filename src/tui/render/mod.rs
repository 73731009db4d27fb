pub mod input_box;
pub mod list_view;
pub mod status_row;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use super::app::App;
use super::theme::Theme;

const BANNER: &str = r#"  _____  _    ____  _  ___   _ ___
 |_   _|/ \  / ___|| |/ / | | |_ _|
   | | / _ \ \___ \| ' /| | | || |
   | |/ ___ \ ___) | . \| |_| || |
   |_/_/   \_\____/|_|\_\\___/|___|"#;

/// Main render function — draws the whole screen from the controller's
/// read-only view model.
pub fn render(frame: &mut Frame, app: &App) {
    let vm = app.view_model();
    let theme = &app.theme;
    let area = frame.area();

    // Background fill
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    // Layout: banner | input box (editing only) | heading | list | status row
    let input_rows = if vm.input_visible { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(input_rows),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_banner(frame, theme, chunks[0]);
    if vm.input_visible {
        input_box::render_input_box(frame, &vm, theme, chunks[1]);
    }
    render_heading(frame, theme, chunks[2]);
    list_view::render_list(frame, &vm, theme, chunks[3]);
    status_row::render_status_row(frame, &vm, theme, chunks[4]);
}

fn render_banner(frame: &mut Frame, theme: &Theme, area: Rect) {
    let lines: Vec<Line> = BANNER
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.accent))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_heading(frame: &mut Frame, theme: &Theme, area: Rect) {
    let heading = Line::from(Span::styled(
        "Tasks",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(heading), area);
}
