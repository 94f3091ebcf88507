/// Single-line text field.
pub struct InputState {
    pub buffer: String,
    cursor_position: usize,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor_position: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor_position
    }

    pub fn handle_char(&mut self, c: char) {
        let byte = self.byte_index();
        self.buffer.insert(byte, c);
        self.cursor_position += 1;
    }

    /// Inserts pasted text, dropping line breaks.
    pub fn handle_paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let byte = self.byte_index();
            self.buffer.remove(byte);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor_position = (self.cursor_position + 1).min(self.buffer.chars().count());
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor_position = 0;
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }
}

#[cfg(test)]
mod tests {
    use super::InputState;

    #[test]
    fn edits_at_cursor() {
        let mut input = InputState::new();
        for c in "logo.pg".chars() {
            input.handle_char(c);
        }
        input.move_left();
        input.handle_char('n');
        assert_eq!(input.value(), "logo.png");

        input.handle_backspace();
        assert_eq!(input.value(), "logo.pg");
    }

    #[test]
    fn paste_drops_newlines() {
        let mut input = InputState::new();
        input.handle_paste("/tmp/ä.png\n");
        assert_eq!(input.value(), "/tmp/ä.png");
        assert_eq!(input.cursor(), 10);
    }
}
