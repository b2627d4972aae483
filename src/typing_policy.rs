use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::trace;

use crate::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Tab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Ctrl, Alt or Meta held. Shift alone does not count.
    pub fn is_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// One physical key event as seen by a typing session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub key: Key,
    pub modifiers: Modifiers,
}

/// What a keystroke means to a strict-mode session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyClass {
    Printable(char),
    Backspace,
    Navigation,
    Rejected,
}

impl Keystroke {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn char(c: char) -> Self {
        Self::new(Key::Char(c), Modifiers::default())
    }

    pub fn backspace() -> Self {
        Self::new(Key::Backspace, Modifiers::default())
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    pub fn classify(&self) -> KeyClass {
        match self.key {
            Key::Backspace => KeyClass::Backspace,
            Key::Left
            | Key::Right
            | Key::Up
            | Key::Down
            | Key::Home
            | Key::End
            | Key::PageUp
            | Key::PageDown
            | Key::Tab => KeyClass::Navigation,
            Key::Char(c) if !self.modifiers.is_command() && !c.is_control() => {
                KeyClass::Printable(c)
            }
            _ => KeyClass::Rejected,
        }
    }
}

impl From<KeyEvent> for Keystroke {
    fn from(event: KeyEvent) -> Self {
        let modifiers = Modifiers {
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            meta: event.modifiers.intersects(KeyModifiers::META | KeyModifiers::SUPER),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
        };
        if event.kind == KeyEventKind::Release {
            return Self::new(Key::Other, modifiers);
        }
        let key = match event.code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab | KeyCode::BackTab => Key::Tab,
            KeyCode::Esc => Key::Esc,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Delete => Key::Delete,
            _ => Key::Other,
        };
        Self::new(key, modifiers)
    }
}

/// Result of feeding one keystroke to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Matched the expected character and was appended
    Correct,
    /// Did not match; counted as an error, input unchanged
    Incorrect,
    /// Removed the last typed character (or nothing, at the start)
    Erased,
    /// Navigation key; no state change
    PassThrough,
    /// Command combination or non-printable key; no state change
    Blocked,
    /// Session not running
    Inactive,
}

/// Strict write: only the expected character ever reaches the input buffer.
pub fn write_strict(state: &mut SessionState, c: char) -> Outcome {
    let Some(expected) = state.expected_char() else {
        return Outcome::Inactive;
    };

    state.total_keystrokes += 1;
    if c == expected {
        state.input.push(c);
        trace!("accepted {:?} at {}", c, state.input.len() - 1);
        Outcome::Correct
    } else {
        state.error_count += 1;
        trace!(
            "rejected {:?} at {}, expected {:?}",
            c,
            state.input.len(),
            expected
        );
        Outcome::Incorrect
    }
}

pub fn erase(state: &mut SessionState) -> Outcome {
    state.input.pop();
    Outcome::Erased
}

/// Drops every input char past the longest prefix shared with `snapshot`.
/// Returns the chars of `snapshot` that follow that prefix.
pub fn reconcile_snapshot(state: &mut SessionState, snapshot: &str) -> Vec<char> {
    let incoming: Vec<char> = snapshot.chars().collect();
    let common = state
        .input
        .iter()
        .zip(incoming.iter())
        .take_while(|(have, got)| have == got)
        .count();
    state.input.truncate(common);
    incoming[common..].to_vec()
}
