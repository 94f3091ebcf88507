use super::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

impl App {
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        self.layout.calculate_layout(area);
        let panels = self.layout.get_panels().to_vec();

        for panel in panels {
            match panel.panel_type {
                PanelType::Topbar => self.render_topbar(frame, panel.rect),
                PanelType::Editor => self.render_editor(frame, panel.rect),
                PanelType::LogoInput => self.render_field(frame, panel.rect, Focus::Logo),
                PanelType::LogoPreview => self.render_logo_preview(frame, panel.rect),
                PanelType::CompanyInput => self.render_field(frame, panel.rect, Focus::Company),
                PanelType::ActionBar => self.render_action_bar(frame, panel.rect),
                PanelType::StatusBar => self.render_status_bar(frame, panel.rect),
            }
        }

        if self.show_help {
            self.render_help(frame, area);
        }

        if self.show_error_details {
            self.render_error_details(frame, area);
        }

        if let Some(ref pending) = self.pending_confirm {
            self.render_confirm(frame, area, &pending.prompt);
        }
    }

    fn border_style(&self, focus: Focus) -> Style {
        if self.focus == focus {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    fn render_topbar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::Paragraph;

        let status = match self.busy {
            Some(ref task) => task.status_text(),
            None => "ready".to_string(),
        };
        let line = Line::from(vec![
            Span::styled(" agenda-gen ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("| {} ", self.api.base_url())),
            Span::styled(format!("| {status}"), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_editor(&mut self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Paragraph};

        let inner_height = area.height.saturating_sub(2) as usize;
        let inner_width = area.width.saturating_sub(2) as usize;
        let scroll = self.editor.scroll_for(inner_height);
        let hscroll = self.editor.hscroll_for(inner_width);
        let lines: Vec<Line> = self
            .editor
            .lines()
            .iter()
            .skip(scroll)
            .take(inner_height)
            .map(|l| Line::raw(l.chars().skip(hscroll).take(inner_width).collect::<String>()))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Agenda JSON (Ctrl+F format) ")
            .border_style(self.border_style(Focus::Editor));
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if self.focus == Focus::Editor && self.pending_confirm.is_none() && !self.show_help {
            let (row, col) = self.editor.cursor();
            let x = area
                .x
                .saturating_add(1)
                .saturating_add(u16::try_from(col - hscroll).unwrap_or(u16::MAX));
            let y = area
                .y
                .saturating_add(1)
                .saturating_add(u16::try_from(row - scroll).unwrap_or(u16::MAX));
            if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
                frame.set_cursor_position((x, y));
            }
        }
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, focus: Focus) {
        use ratatui::widgets::{Block, Borders, Paragraph};

        let (field, title) = match focus {
            Focus::Logo => (&self.logo_input, " Logo file or data: URL (Enter) "),
            _ => (&self.company_input, " Company (Enter to find logo) "),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(self.border_style(focus));

        let width = area.width.saturating_sub(2) as usize;
        let skip = field.cursor().saturating_sub(width.saturating_sub(1));
        let visible: String = field.value().chars().skip(skip).take(width).collect();
        frame.render_widget(Paragraph::new(visible).block(block), area);

        if self.focus == focus && self.pending_confirm.is_none() && !self.show_help {
            let x = area.x + 1 + (field.cursor() - skip) as u16;
            frame.set_cursor_position((x, area.y + 1));
        }
    }

    fn render_logo_preview(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

        let mut lines = match &self.logo_preview {
            LogoPreview::Empty => vec![Line::styled(
                "No logo selected",
                Style::default().fg(Color::DarkGray),
            )],
            LogoPreview::Uploaded {
                name,
                mime,
                size,
                data_url,
            } => {
                let shown: String = data_url.chars().take(48).collect();
                vec![
                    Line::from(vec![Span::raw("File: "), Span::styled(name.as_str(), Style::default().add_modifier(Modifier::BOLD))]),
                    Line::raw(format!("Type: {mime}")),
                    Line::raw(format!("Size: {}", human_size(*size))),
                    Line::styled(format!("{shown}..."), Style::default().fg(Color::DarkGray)),
                ]
            }
            LogoPreview::Suggested { url } => vec![
                Line::styled("Suggested logo", Style::default().add_modifier(Modifier::BOLD)),
                Line::raw(url.as_str()),
            ],
        };

        if let Some(ref url) = self.suggestion {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                "Found a logo:",
                Style::default().fg(Color::Green),
            ));
            lines.push(Line::raw(url.as_str()));
            lines.push(Line::styled(
                "Ctrl+Y use it, Ctrl+N dismiss",
                Style::default().fg(Color::DarkGray),
            ));
        }

        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title(" Logo ")),
            area,
        );
    }

    fn render_action_bar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Paragraph};

        let enabled = self.can_submit();
        let style = if !enabled {
            Style::default().fg(Color::DarkGray)
        } else if self.focus == Focus::Generate {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let mut spans = vec![Span::styled(
            format!("[ {} ]", self.submit_state.label()),
            style,
        )];
        if let Some(ref note) = self.download {
            spans.push(Span::raw(format!(
                "  Last download: {} at {}",
                note.label,
                note.at.format("%H:%M:%S")
            )));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(self.border_style(Focus::Generate)),
                )
                .centered(),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::Paragraph;

        let line = match self.notices.back() {
            Some(notice) => {
                let color = match notice.level {
                    NoticeLevel::Info => Color::Green,
                    NoticeLevel::Warning => Color::Yellow,
                    NoticeLevel::Error => Color::Red,
                };
                let more = if self.notices.len() > 1 {
                    format!(" (+{} more, Esc to dismiss)", self.notices.len() - 1)
                } else {
                    String::new()
                };
                Line::from(vec![
                    Span::styled(format!(" {}", notice.message), Style::default().fg(color)),
                    Span::styled(more, Style::default().fg(Color::DarkGray)),
                ])
            }
            None => Line::styled(
                " Tab to move between fields, Ctrl+G to generate, F1 for help",
                Style::default().fg(Color::DarkGray),
            ),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Clear, Paragraph};
        let help_text = self.keybinds.help_text();
        let popup_area = self.centered_rect(60, 70, area);

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(help_text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help - Esc to close "),
            ),
            popup_area,
        );
    }

    fn render_confirm(&self, frame: &mut Frame, area: Rect, prompt: &str) {
        use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

        let popup_area = self.centered_rect(50, 20, area);
        let text = format!("{prompt}\n\n[y] Continue   [n] Cancel");

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(text)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Confirm ")),
            popup_area,
        );
    }

    fn render_error_details(&self, frame: &mut Frame, area: Rect) {
        use ratatui::widgets::{Block, Borders, Clear, Paragraph};

        let popup_area = self.centered_rect(60, 20, area);
        let details = self
            .last_error
            .as_deref()
            .unwrap_or("No error details available.");
        let content_width = popup_area.width.saturating_sub(2) as usize;
        let content_lines = popup_area.height.saturating_sub(4) as usize;
        let wrapped = Self::wrap_and_truncate_text(details, content_width, content_lines);
        let text = format!("{wrapped}\n\n[Esc] or [Enter] to close");

        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Error Details "),
            ),
            popup_area,
        );
    }

    /// Greedy word wrap to `width`, cut to `max_lines` with a marker line.
    fn wrap_and_truncate_text(input: &str, width: usize, max_lines: usize) -> String {
        if width == 0 || max_lines == 0 {
            return "... (truncated)".to_string();
        }

        let mut out: Vec<String> = Vec::new();
        for raw_line in input.lines() {
            let mut current = String::new();
            for word in raw_line.split_whitespace() {
                let mut word: String = word.to_string();
                while word.chars().count() > width {
                    if !current.is_empty() {
                        out.push(std::mem::take(&mut current));
                    }
                    let head: String = word.chars().take(width).collect();
                    word = word.chars().skip(width).collect();
                    out.push(head);
                }
                if current.is_empty() {
                    current = word;
                } else if current.chars().count() + 1 + word.chars().count() <= width {
                    current.push(' ');
                    current.push_str(&word);
                } else {
                    out.push(std::mem::replace(&mut current, word));
                }
            }
            out.push(current);
        }

        if out.len() > max_lines {
            out.truncate(max_lines.saturating_sub(1));
            out.push("... (truncated)".to_string());
        }
        out.join("\n")
    }

    fn centered_rect(&self, percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        use ratatui::layout::{Constraint, Direction, Layout};

        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}

fn human_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KIB * KIB {
        format!("{:.1} MB", b / (KIB * KIB))
    } else if b >= KIB {
        format!("{:.1} KB", b / KIB)
    } else {
        format!("{bytes} B")
    }
}
