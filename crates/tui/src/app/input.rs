use super::*;

impl App {
    pub fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key) => self.handle_key_event(key),
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Paste(text) => {
                self.handle_paste(&text);
                Ok(false)
            }
            Event::Resize(_, _) => Ok(false),
            _ => Ok(false),
        }
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if key.code == KeyCode::Char('q') && ctrl {
            self.answer_confirm(false);
            self.should_quit = true;
            return Ok(true);
        }

        if self.pending_confirm.is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.answer_confirm(true)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.answer_confirm(false)
                }
                _ => {}
            }
            return Ok(false);
        }

        if key.code == KeyCode::F(1)
            || (key.code == KeyCode::Char('?') && self.focus == Focus::Generate)
            || (key.code == KeyCode::Char('h') && ctrl)
        {
            self.show_help = !self.show_help;
            return Ok(false);
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) {
                self.show_help = false;
            }
            return Ok(false);
        }

        if self.show_error_details {
            match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('E') => {
                    self.show_error_details = false;
                }
                _ => {}
            }
            return Ok(false);
        }

        if ctrl {
            match key.code {
                KeyCode::Char('g') => self.start_submit(),
                KeyCode::Char('f') => self.format_editor(),
                KeyCode::Char('l') => self.start_lookup(None),
                KeyCode::Char('y') => self.accept_suggestion(),
                KeyCode::Char('n') => self.reject_suggestion(),
                _ => {}
            }
            return Ok(false);
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return Ok(false);
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return Ok(false);
            }
            KeyCode::Esc => {
                self.dismiss_notice();
                return Ok(false);
            }
            _ => {}
        }

        match self.focus {
            Focus::Editor => self.handle_editor_key(key),
            Focus::Logo => match key.code {
                KeyCode::Enter => self.commit_logo_input(),
                code => Self::edit_field(&mut self.logo_input, code),
            },
            Focus::Company => match key.code {
                KeyCode::Enter => self.lookup_from_company_field(),
                code => Self::edit_field(&mut self.company_input, code),
            },
            Focus::Generate => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.start_submit(),
                KeyCode::Char('E') if self.last_error.is_some() => {
                    self.show_error_details = true;
                }
                _ => {}
            },
        }

        Ok(false)
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.editor.insert_char(c),
            KeyCode::Enter => self.editor.insert_newline(),
            KeyCode::Backspace => self.editor.backspace(),
            KeyCode::Delete => self.editor.delete(),
            KeyCode::Left => self.editor.move_left(),
            KeyCode::Right => self.editor.move_right(),
            KeyCode::Up => self.editor.move_up(),
            KeyCode::Down => self.editor.move_down(),
            KeyCode::Home => self.editor.home(),
            KeyCode::End => self.editor.end(),
            _ => {}
        }
    }

    fn edit_field(field: &mut InputState, code: KeyCode) {
        match code {
            KeyCode::Char(c) => field.handle_char(c),
            KeyCode::Backspace => field.handle_backspace(),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: &str) {
        if self.pending_confirm.is_some() || self.show_help {
            return;
        }
        match self.focus {
            Focus::Editor => self.editor.insert_str(text),
            Focus::Logo => self.logo_input.handle_paste(text),
            Focus::Company => self.company_input.handle_paste(text),
            Focus::Generate => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<bool> {
        if self.pending_confirm.is_some() || self.show_help || self.show_error_details {
            return Ok(false);
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.layout.panel_at(mouse.column, mouse.row) {
                    Some(PanelType::Editor) => self.focus = Focus::Editor,
                    Some(PanelType::LogoInput) => self.focus = Focus::Logo,
                    Some(PanelType::CompanyInput) => self.focus = Focus::Company,
                    Some(PanelType::ActionBar) => {
                        self.focus = Focus::Generate;
                        self.start_submit();
                    }
                    Some(PanelType::StatusBar) => {
                        if self.last_error.is_some() {
                            self.show_error_details = true;
                        }
                    }
                    _ => {}
                }
            }
            MouseEventKind::ScrollUp if self.focus == Focus::Editor => self.editor.move_up(),
            MouseEventKind::ScrollDown if self.focus == Focus::Editor => self.editor.move_down(),
            _ => {}
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut config = Config::default();
        config.downloads.dir = std::env::temp_dir()
            .join("agenda-tui-input")
            .to_string_lossy()
            .into_owned();
        App::new(config).unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn tab_moves_focus_and_typing_goes_to_focused_field() {
        let mut app = app();
        app.handle_event(key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::Logo);
        app.handle_event(key(KeyCode::Char('a'))).unwrap();
        app.handle_event(Event::Paste("b.png".to_string())).unwrap();
        assert_eq!(app.logo_input.value(), "ab.png");
    }

    #[test]
    fn question_mark_is_text_inside_the_editor() {
        let mut app = app();
        app.editor.set_text("");
        app.handle_event(key(KeyCode::Char('?'))).unwrap();
        assert!(!app.show_help);
        assert_eq!(app.editor.text(), "?");
    }

    #[test]
    fn f1_toggles_help_from_any_field() {
        let mut app = app();
        app.handle_event(key(KeyCode::F(1))).unwrap();
        assert!(app.show_help);
        app.handle_event(key(KeyCode::F(1))).unwrap();
        assert!(!app.show_help);
        assert_eq!(app.focus, Focus::Editor);
    }

    #[test]
    fn ctrl_q_quits() {
        let mut app = app();
        let quit = app
            .handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('q'),
                KeyModifiers::CONTROL,
            )))
            .unwrap();
        assert!(quit);
        assert!(app.should_quit);
    }

    #[test]
    fn escape_dismisses_oldest_notice() {
        let mut app = app();
        app.push_notice(Notice::info("first"));
        app.push_notice(Notice::info("second"));
        app.handle_event(key(KeyCode::Esc)).unwrap();
        assert_eq!(app.notices.front().map(|n| n.message.as_str()), Some("second"));
    }
}
