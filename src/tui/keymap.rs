use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::View;
use super::input::{EditOp, Intent};

/// Static key → intent mapping, per view. The state machine never sees raw
/// key events, so rebinding is purely a matter of editing this table.
///
/// In List view the letters a/e/d are commands; in Add/Edit the same
/// letters are ordinary text and only Enter/Esc (and Ctrl+C) keep their
/// command meaning.
pub fn map_key(view: View, key: KeyEvent) -> Option<Intent> {
    // Ctrl+C quits from anywhere, even mid-edit
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Intent::Quit);
    }

    match view {
        View::List => match key.code {
            KeyCode::Char('q') => Some(Intent::Quit),
            KeyCode::Esc => Some(Intent::Escape),
            KeyCode::Char('a') => Some(Intent::AddTask),
            KeyCode::Char('e') => Some(Intent::EditTask),
            KeyCode::Char('d') => Some(Intent::DeleteTask),
            KeyCode::Up | KeyCode::Char('k') => Some(Intent::Up),
            KeyCode::Down | KeyCode::Char('j') => Some(Intent::Down),
            KeyCode::Enter => Some(Intent::Confirm),
            _ => None,
        },
        View::Add | View::Edit => match key.code {
            KeyCode::Esc => Some(Intent::Escape),
            KeyCode::Enter => Some(Intent::Confirm),
            KeyCode::Backspace => Some(Intent::Edit(EditOp::Backspace)),
            KeyCode::Delete => Some(Intent::Edit(EditOp::DeleteForward)),
            KeyCode::Left => Some(Intent::Edit(EditOp::Left)),
            KeyCode::Right => Some(Intent::Edit(EditOp::Right)),
            KeyCode::Home => Some(Intent::Edit(EditOp::Home)),
            KeyCode::End => Some(Intent::Edit(EditOp::End)),
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                Some(Intent::Edit(EditOp::Insert(c)))
            }
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn list_view_command_keys() {
        assert_eq!(
            map_key(View::List, plain(KeyCode::Char('a'))),
            Some(Intent::AddTask)
        );
        assert_eq!(
            map_key(View::List, plain(KeyCode::Char('e'))),
            Some(Intent::EditTask)
        );
        assert_eq!(
            map_key(View::List, plain(KeyCode::Char('d'))),
            Some(Intent::DeleteTask)
        );
        assert_eq!(
            map_key(View::List, plain(KeyCode::Char('q'))),
            Some(Intent::Quit)
        );
        assert_eq!(
            map_key(View::List, plain(KeyCode::Enter)),
            Some(Intent::Confirm)
        );
    }

    #[test]
    fn list_view_navigation_keys() {
        for key in [KeyCode::Up, KeyCode::Char('k')] {
            assert_eq!(map_key(View::List, plain(key)), Some(Intent::Up));
        }
        for key in [KeyCode::Down, KeyCode::Char('j')] {
            assert_eq!(map_key(View::List, plain(key)), Some(Intent::Down));
        }
    }

    #[test]
    fn unbound_letters_never_reach_the_controller_in_list_view() {
        assert_eq!(map_key(View::List, plain(KeyCode::Char('x'))), None);
        assert_eq!(map_key(View::List, plain(KeyCode::Backspace)), None);
    }

    #[test]
    fn command_letters_become_text_while_editing() {
        for view in [View::Add, View::Edit] {
            for letter in ['a', 'e', 'd', 'q', 'j', 'k'] {
                assert_eq!(
                    map_key(view, plain(KeyCode::Char(letter))),
                    Some(Intent::Edit(EditOp::Insert(letter)))
                );
            }
        }
    }

    #[test]
    fn arrow_navigation_is_ignored_while_editing() {
        assert_eq!(map_key(View::Add, plain(KeyCode::Up)), None);
        assert_eq!(map_key(View::Add, plain(KeyCode::Down)), None);
    }

    #[test]
    fn editing_keeps_the_reserved_keys() {
        assert_eq!(map_key(View::Add, plain(KeyCode::Enter)), Some(Intent::Confirm));
        assert_eq!(map_key(View::Edit, plain(KeyCode::Esc)), Some(Intent::Escape));
        assert_eq!(
            map_key(View::Edit, plain(KeyCode::Left)),
            Some(Intent::Edit(EditOp::Left))
        );
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for view in [View::List, View::Add, View::Edit] {
            assert_eq!(map_key(view, ctrl_c), Some(Intent::Quit));
        }
    }

    #[test]
    fn shifted_characters_insert_while_editing() {
        let shifted = KeyEvent::new(KeyCode::Char('M'), KeyModifiers::SHIFT);
        assert_eq!(
            map_key(View::Add, shifted),
            Some(Intent::Edit(EditOp::Insert('M')))
        );
        let alt = KeyEvent::new(KeyCode::Char('m'), KeyModifiers::ALT);
        assert_eq!(map_key(View::Add, alt), None);
    }
}
