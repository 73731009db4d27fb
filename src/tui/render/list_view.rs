use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::ViewModel;
use crate::tui::theme::Theme;
use crate::util::unicode;

const EMPTY_MESSAGE: &str = "Nothing on your plate yet — press 'a' to add your first task.";

/// Render the visible task list, one row per task, keeping the cursor row
/// inside the viewport.
pub fn render_list(frame: &mut Frame, vm: &ViewModel, theme: &Theme, area: Rect) {
    if vm.tasks.is_empty() {
        let message = Paragraph::new(Line::from(Span::styled(
            EMPTY_MESSAGE,
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::ITALIC),
        )));
        frame.render_widget(message, area);
        return;
    }

    let height = area.height as usize;
    let offset = scroll_offset(vm.cursor, vm.tasks.len(), height);
    let width = area.width as usize;

    let mut lines = Vec::new();
    for (idx, task) in vm.tasks.iter().enumerate().skip(offset).take(height) {
        let selected = vm.cursor == Some(idx);

        let marker = if selected {
            Span::styled("> ", Style::default().fg(theme.accent))
        } else {
            Span::raw("  ")
        };
        let checkbox = Span::styled(
            if task.completed { "[x] " } else { "[ ] " },
            Style::default().fg(theme.accent),
        );
        let number = format!("{}. ", idx + 1);

        let mut name_style = Style::default().fg(if selected {
            theme.text_bright
        } else {
            theme.text
        });
        let mut due_style = Style::default().fg(theme.dim);
        if task.completed {
            name_style = name_style.add_modifier(Modifier::CROSSED_OUT);
            due_style = due_style.add_modifier(Modifier::CROSSED_OUT);
        }

        // Truncate the name so the row never wraps
        let due_width = if task.due_date.is_empty() {
            0
        } else {
            unicode::display_width(&task.due_date) + 2
        };
        let prefix_width = 2 + 4 + number.len();
        let name_budget = width.saturating_sub(prefix_width + due_width);
        let name = unicode::truncate_to_width(&task.name, name_budget);

        let mut spans = vec![
            marker,
            checkbox,
            Span::styled(number, Style::default().fg(theme.dim)),
            Span::styled(name, name_style),
        ];
        if !task.due_date.is_empty() {
            spans.push(Span::styled(format!("  {}", task.due_date), due_style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

/// First visible row for a viewport of `height` rows.
fn scroll_offset(cursor: Option<usize>, len: usize, height: usize) -> usize {
    if height == 0 {
        return 0;
    }
    let cursor = cursor.unwrap_or(0);
    if cursor < height {
        0
    } else {
        (cursor + 1 - height).min(len.saturating_sub(height))
    }
}
