//! Keyboard navigation: maps keys to [`NavKey`] and [`NavKey`] to a [`NavStep`].

use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;
use crate::keymap::Binding;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
    Tab,
}

/// Key bindings for navigation. Anything not matched here is treated as text editing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboBindings {
    pub down: Vec<KeyEvent>,
    pub up: Vec<KeyEvent>,
    pub enter: Vec<KeyEvent>,
    pub escape: Vec<KeyEvent>,
    pub tab: Vec<KeyEvent>,
}

impl Default for ComboBindings {
    fn default() -> Self {
        Self {
            down: vec![keymap::key(KeyCode::Down), keymap::key_ctrl('n')],
            up: vec![keymap::key(KeyCode::Up), keymap::key_ctrl('p')],
            enter: vec![keymap::key(KeyCode::Enter)],
            escape: vec![keymap::key(KeyCode::Esc)],
            tab: vec![
                keymap::key(KeyCode::Tab),
                keymap::key(KeyCode::BackTab),
                keymap::key_shift(KeyCode::BackTab),
            ],
        }
    }
}

impl ComboBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<NavKey> {
        if keymap::any_matches(&self.down, key) {
            return Some(NavKey::Down);
        }
        if keymap::any_matches(&self.up, key) {
            return Some(NavKey::Up);
        }
        if keymap::any_matches(&self.enter, key) {
            return Some(NavKey::Enter);
        }
        if keymap::any_matches(&self.escape, key) {
            return Some(NavKey::Escape);
        }
        if keymap::any_matches(&self.tab, key) {
            return Some(NavKey::Tab);
        }
        None
    }

    /// Help-bar entries for the navigation keys.
    pub fn help(&self) -> Vec<Binding> {
        vec![
            Binding::new("↑/↓", "move", [self.up.clone(), self.down.clone()].concat()),
            Binding::new("enter", "select", self.enter.clone()),
            Binding::new("esc", "close", self.escape.clone()),
        ]
    }
}

/// What a navigation key does to `(open, highlighted)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavStep {
    Open,
    Highlight(usize),
    Commit(usize),
    Toggle,
    Close,
    Nothing,
}

/// The navigation transition table. `len` is the length of the filtered list.
pub fn step(open: bool, highlighted: Option<usize>, len: usize, key: NavKey) -> NavStep {
    match key {
        NavKey::Down if !open => NavStep::Open,
        NavKey::Down => match len {
            0 => NavStep::Nothing,
            _ => NavStep::Highlight(highlighted.map_or(0, |h| (h + 1) % len)),
        },
        NavKey::Up if !open => NavStep::Open,
        NavKey::Up => match len {
            0 => NavStep::Nothing,
            _ => NavStep::Highlight(highlighted.map_or(len - 1, |h| (h + len - 1) % len)),
        },
        NavKey::Enter => match highlighted {
            Some(h) if open && h < len => NavStep::Commit(h),
            _ => NavStep::Toggle,
        },
        NavKey::Escape => NavStep::Close,
        NavKey::Tab if open => NavStep::Close,
        NavKey::Tab => NavStep::Nothing,
    }
}
