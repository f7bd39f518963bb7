//! Input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be triggered by key events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Submit the current form
    Submit,
    /// Cancel current operation / go back
    Cancel,
    /// Switch focus to the next field
    NextField,
    /// Move selection / scroll up
    Up,
    /// Move selection / scroll down
    Down,
    /// Move cursor left
    Left,
    /// Move cursor right
    Right,
    /// Move to start of line
    Home,
    /// Move to end of line
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Delete character before cursor
    Backspace,
    /// Delete character at cursor
    Delete,
    /// Insert character
    Char(char),
    /// Clear the focused field
    ClearInput,
    /// No action
    None,
}

/// Convert a key event to an action
pub fn key_to_action(key: KeyEvent) -> Action {
    check_quit_keys(&key)
        .or_else(|| check_enter_keys(&key))
        .or_else(|| check_navigation_keys(&key))
        .or_else(|| check_editing_keys(&key))
        .or_else(|| check_control_keys(&key))
        .or_else(|| check_char_keys(&key))
        .unwrap_or(Action::None)
}

/// Check for quit key combinations
fn check_quit_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('d'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::Quit),
        _ => None,
    }
}

/// Check for enter/escape/tab
fn check_enter_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Enter,
            ..
        } => Some(Action::Submit),
        KeyEvent {
            code: KeyCode::Esc, ..
        } => Some(Action::Cancel),
        KeyEvent {
            code: KeyCode::Tab, ..
        }
        | KeyEvent {
            code: KeyCode::BackTab,
            ..
        } => Some(Action::NextField),
        _ => None,
    }
}

/// Check for navigation keys
fn check_navigation_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Up, ..
        } => Some(Action::Up),
        KeyEvent {
            code: KeyCode::Down,
            ..
        } => Some(Action::Down),
        KeyEvent {
            code: KeyCode::Left,
            ..
        } => Some(Action::Left),
        KeyEvent {
            code: KeyCode::Right,
            ..
        } => Some(Action::Right),
        KeyEvent {
            code: KeyCode::Home,
            ..
        } => Some(Action::Home),
        KeyEvent {
            code: KeyCode::End, ..
        } => Some(Action::End),
        KeyEvent {
            code: KeyCode::PageUp,
            ..
        } => Some(Action::PageUp),
        KeyEvent {
            code: KeyCode::PageDown,
            ..
        } => Some(Action::PageDown),
        _ => None,
    }
}

/// Check for editing keys
fn check_editing_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Backspace,
            ..
        } => Some(Action::Backspace),
        KeyEvent {
            code: KeyCode::Delete,
            ..
        } => Some(Action::Delete),
        _ => None,
    }
}

/// Check for control key combinations
fn check_control_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::Home),
        KeyEvent {
            code: KeyCode::Char('e'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::End),
        KeyEvent {
            code: KeyCode::Char('u'),
            modifiers: KeyModifiers::CONTROL,
            ..
        } => Some(Action::ClearInput),
        _ => None,
    }
}

/// Check for character input keys
fn check_char_keys(key: &KeyEvent) -> Option<Action> {
    match key {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::NONE,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::SHIFT,
            ..
        } => Some(Action::Char(*c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(key), Action::Quit);
    }

    #[test]
    fn test_enter_submits() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(key_to_action(key), Action::Submit);
    }

    #[test]
    fn test_tab_switches_field() {
        let key = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(key_to_action(key), Action::NextField);
    }

    #[test]
    fn test_plain_and_shifted_chars() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(key_to_action(key), Action::Char('a'));

        let key = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(key_to_action(key), Action::Char('A'));
    }

    #[test]
    fn test_escape_cancels() {
        let key = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(key_to_action(key), Action::Cancel);
    }
}
