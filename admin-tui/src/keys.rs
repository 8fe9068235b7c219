//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What currently receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    PageInput,
    Search,
    /// Delete confirmation prompt.
    Confirm,
    /// Firm edit form.
    EditForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    NextScreen,
    NextPage,
    PreviousPage,
    /// Zero-based column position.
    ToggleSort(usize),
    FocusPageInput,
    PageChar(char),
    PageBackspace,
    CommitPage,
    FocusSearch,
    SearchChar(char),
    SearchBackspace,
    LeaveSearch,
    CursorUp,
    CursorDown,
    Edit,
    Delete,
    ConfirmYes,
    ConfirmNo,
    FormChar(char),
    FormBackspace,
    FormNext,
    FormPrevious,
    FormSubmit,
    FormCancel,
    RunSync,
    FrequencyUp,
    FrequencyDown,
    CycleUnit,
}

/// Translate a key press in the given focus.
pub fn command_for(key: KeyEvent, focus: Focus) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match focus {
        Focus::Confirm => match key.code {
            KeyCode::Char('y' | 'e') | KeyCode::Enter => Some(Command::ConfirmYes),
            KeyCode::Char('n' | 'h') | KeyCode::Esc => Some(Command::ConfirmNo),
            _ => None,
        },
        Focus::EditForm => match key.code {
            KeyCode::Char(c) => Some(Command::FormChar(c)),
            KeyCode::Backspace => Some(Command::FormBackspace),
            KeyCode::Tab | KeyCode::Down => Some(Command::FormNext),
            KeyCode::BackTab | KeyCode::Up => Some(Command::FormPrevious),
            KeyCode::Enter => Some(Command::FormSubmit),
            KeyCode::Esc => Some(Command::FormCancel),
            _ => None,
        },
        Focus::PageInput => match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Command::PageChar(c)),
            KeyCode::Backspace => Some(Command::PageBackspace),
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => Some(Command::CommitPage),
            _ => None,
        },
        Focus::Search => match key.code {
            KeyCode::Char(c) => Some(Command::SearchChar(c)),
            KeyCode::Backspace => Some(Command::SearchBackspace),
            KeyCode::Enter | KeyCode::Esc => Some(Command::LeaveSearch),
            _ => None,
        },
        Focus::Table => match key.code {
            KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Tab => Some(Command::NextScreen),
            KeyCode::Right => Some(Command::NextPage),
            KeyCode::Left => Some(Command::PreviousPage),
            KeyCode::Char(c @ '1'..='9') => {
                Some(Command::ToggleSort(c as usize - '1' as usize))
            }
            KeyCode::Char('g') => Some(Command::FocusPageInput),
            KeyCode::Char('/') => Some(Command::FocusSearch),
            KeyCode::Up => Some(Command::CursorUp),
            KeyCode::Down => Some(Command::CursorDown),
            KeyCode::Char('e') => Some(Command::Edit),
            KeyCode::Char('d') => Some(Command::Delete),
            KeyCode::Esc => Some(Command::ConfirmNo),
            KeyCode::Char('s') => Some(Command::RunSync),
            KeyCode::Char('+') => Some(Command::FrequencyUp),
            KeyCode::Char('-') => Some(Command::FrequencyDown),
            KeyCode::Char('u') => Some(Command::CycleUnit),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key(code: KeyCode, focus: Focus) -> Option<Command> {
        command_for(press(code), focus)
    }

    #[test]
    fn test_table_keys() {
        assert_eq!(key(KeyCode::Char('3'), Focus::Table), Some(Command::ToggleSort(2)));
        assert_eq!(key(KeyCode::Right, Focus::Table), Some(Command::NextPage));
        assert_eq!(key(KeyCode::Char('0'), Focus::Table), None);
        assert_eq!(key(KeyCode::Esc, Focus::Table), Some(Command::ConfirmNo));
        assert_eq!(key(KeyCode::Char('s'), Focus::Table), Some(Command::RunSync));
        assert_eq!(key(KeyCode::Char('-'), Focus::Table), Some(Command::FrequencyDown));
    }

    #[test]
    fn test_page_input_keys() {
        assert_eq!(key(KeyCode::Char('7'), Focus::PageInput), Some(Command::PageChar('7')));
        assert_eq!(key(KeyCode::Char('x'), Focus::PageInput), None);
        assert_eq!(key(KeyCode::Tab, Focus::PageInput), Some(Command::CommitPage));
    }

    #[test]
    fn test_search_takes_every_char() {
        assert_eq!(key(KeyCode::Char('q'), Focus::Search), Some(Command::SearchChar('q')));
    }

    #[test]
    fn test_edit_form_keys() {
        assert_eq!(key(KeyCode::Char('q'), Focus::EditForm), Some(Command::FormChar('q')));
        assert_eq!(key(KeyCode::Down, Focus::EditForm), Some(Command::FormNext));
        assert_eq!(key(KeyCode::BackTab, Focus::EditForm), Some(Command::FormPrevious));
        assert_eq!(key(KeyCode::Enter, Focus::EditForm), Some(Command::FormSubmit));
        assert_eq!(key(KeyCode::Esc, Focus::EditForm), Some(Command::FormCancel));
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(key, Focus::Search), Some(Command::Quit));
        assert_eq!(command_for(key, Focus::EditForm), Some(Command::Quit));
    }
}
