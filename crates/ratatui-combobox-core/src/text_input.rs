use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineInputAction {
    None,
    Moved,
    Changed,
}

/// Single-line text buffer with a char-index cursor.
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    text: String,
    cursor: usize, // char index
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replaces the text and puts the cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = single_line(&text.into());
        self.cursor = self.text.chars().count();
    }

    /// Display column of the cursor.
    pub fn cursor_x(&self) -> usize {
        self.text
            .chars()
            .take(self.cursor)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }

    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }

    pub fn input(&mut self, event: &InputEvent) -> LineInputAction {
        match event {
            InputEvent::Paste(s) => {
                let s = single_line(s);
                if s.is_empty() {
                    return LineInputAction::None;
                }
                for ch in s.chars() {
                    self.insert_char(ch);
                }
                LineInputAction::Changed
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(_) => LineInputAction::None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> LineInputAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.is_command() {
                    return LineInputAction::None;
                }
                self.insert_char(c);
                LineInputAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return LineInputAction::None;
                }
                let start = byte_index_from_char_index(&self.text, self.cursor - 1);
                let end = byte_index_from_char_index(&self.text, self.cursor);
                self.text.replace_range(start..end, "");
                self.cursor -= 1;
                LineInputAction::Changed
            }
            KeyCode::Delete => {
                if self.cursor >= self.text.chars().count() {
                    return LineInputAction::None;
                }
                let start = byte_index_from_char_index(&self.text, self.cursor);
                let end = byte_index_from_char_index(&self.text, self.cursor + 1);
                self.text.replace_range(start..end, "");
                LineInputAction::Changed
            }
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to((self.cursor + 1).min(self.text.chars().count())),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.text.chars().count()),
            _ => LineInputAction::None,
        }
    }

    fn move_to(&mut self, cursor: usize) -> LineInputAction {
        if cursor == self.cursor {
            return LineInputAction::None;
        }
        self.cursor = cursor;
        LineInputAction::Moved
    }

    fn insert_char(&mut self, ch: char) {
        let byte_idx = byte_index_from_char_index(&self.text, self.cursor);
        self.text.insert(byte_idx, ch);
        self.cursor += 1;
    }
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    match s.char_indices().nth(char_idx) {
        Some((i, _)) => i,
        None => s.len(),
    }
}

fn single_line(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\r', '\n'], " ")
}
