use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::ViewModel;
use crate::tui::theme::Theme;
use crate::util::unicode;

const PLACEHOLDER: &str = "Enter task";

/// Render the bordered text-entry box shown in Add and Edit views.
pub fn render_input_box(frame: &mut Frame, vm: &ViewModel, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cursor_glyph = Span::styled("\u{258C}", Style::default().fg(theme.accent));

    let line = if vm.input.is_empty() {
        Line::from(vec![
            cursor_glyph,
            Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(theme.dim)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    } else {
        // Slide the window so the cursor stays visible in a narrow box
        let width = inner.width as usize;
        let cursor_col = unicode::byte_offset_to_display_col(vm.input, vm.input_cursor);
        let start_col = cursor_col.saturating_sub(width.saturating_sub(1));
        let start = unicode::display_col_to_byte_offset(vm.input, start_col);

        let before = &vm.input[start..vm.input_cursor];
        let after = &vm.input[vm.input_cursor..];
        Line::from(vec![
            Span::styled(before, Style::default().fg(theme.text_bright)),
            cursor_glyph,
            Span::styled(after, Style::default().fg(theme.text_bright)),
        ])
    };

    frame.render_widget(Paragraph::new(line), inner);
}
