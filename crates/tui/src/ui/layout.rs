use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::panel::{Panel, PanelType};

const TOPBAR_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const ACTION_HEIGHT: u16 = 3;
const FIELD_HEIGHT: u16 = 3;
const MIN_EDITOR_WIDTH: u16 = 40;
const SIDE_WIDTH: u16 = 46;

#[derive(Default)]
pub struct LayoutState {
    cached_panels: Vec<Panel>,
}

impl LayoutState {
    pub fn calculate_layout(&mut self, area: Rect) -> &[Panel] {
        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TOPBAR_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(ACTION_HEIGHT),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(area);

        let content_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(MIN_EDITOR_WIDTH),
                Constraint::Length(SIDE_WIDTH),
            ])
            .split(main_layout[1]);

        let side_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FIELD_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(FIELD_HEIGHT),
            ])
            .split(content_layout[1]);

        self.cached_panels = vec![
            Panel {
                panel_type: PanelType::Topbar,
                rect: main_layout[0],
            },
            Panel {
                panel_type: PanelType::Editor,
                rect: content_layout[0],
            },
            Panel {
                panel_type: PanelType::LogoInput,
                rect: side_layout[0],
            },
            Panel {
                panel_type: PanelType::LogoPreview,
                rect: side_layout[1],
            },
            Panel {
                panel_type: PanelType::CompanyInput,
                rect: side_layout[2],
            },
            Panel {
                panel_type: PanelType::ActionBar,
                rect: main_layout[2],
            },
            Panel {
                panel_type: PanelType::StatusBar,
                rect: main_layout[3],
            },
        ];

        &self.cached_panels
    }

    pub fn get_panels(&self) -> &[Panel] {
        &self.cached_panels
    }

    pub fn get_rect(&self, panel_type: PanelType) -> Option<Rect> {
        self.cached_panels
            .iter()
            .find(|p| p.panel_type == panel_type)
            .map(|p| p.rect)
    }

    pub fn panel_at(&self, col: u16, row: u16) -> Option<PanelType> {
        self.cached_panels
            .iter()
            .find(|p| {
                col >= p.rect.x
                    && col < p.rect.x + p.rect.width
                    && row >= p.rect.y
                    && row < p.rect.y + p.rect.height
            })
            .map(|p| p.panel_type)
    }
}
