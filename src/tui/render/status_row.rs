use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::ViewModel;
use crate::tui::theme::Theme;

const LIST_HELP: &str = "\u{2191}/\u{2193} move \u{B7} a add \u{B7} e edit \u{B7} d delete \u{B7} enter toggle \u{B7} q quit";
const EDIT_HELP: &str = "enter confirm \u{B7} esc cancel";

/// Render the status row (bottom of screen): a storage failure or other
/// transient message when there is one, the key hints otherwise.
pub fn render_status_row(frame: &mut Frame, vm: &ViewModel, theme: &Theme, area: Rect) {
    let line = match vm.status {
        Some((message, is_error)) => Line::from(Span::styled(
            message,
            Style::default().fg(if is_error { theme.red } else { theme.green }),
        )),
        None => {
            let help = if vm.input_visible { EDIT_HELP } else { LIST_HELP };
            Line::from(Span::styled(help, Style::default().fg(theme.dim)))
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}
