use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
};
use unicode_width::UnicodeWidthStr;

use crate::actions::MenuAction;
use crate::search::SearchMode;
use crate::session::{ScreenArea, WindowSize};

use super::Dialog;

const HIGHLIGHT_SYMBOL: &str = "> ";
const TITLE_COLUMN_MAX: u16 = 32;
const HEADERS: [&str; 4] = ["Title", "Group", "Username", "Sequence"];

impl Dialog<'_, '_> {
    pub(crate) fn draw(&mut self, frame: &mut Frame) {
        let screen = frame.area();
        let placement = self.session.placement(ScreenArea::new(
            screen.x,
            screen.y,
            screen.width,
            screen.height,
        ));
        self.session.resize(placement.size);
        let area = Rect::new(
            placement.x,
            placement.y,
            placement.size.width,
            placement.size.height,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Auto-Type: select an entry ");
        let inner = block.inner(area);
        frame.render_widget(Clear, area);
        frame.render_widget(block, area);

        let [modes, query, results] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);

        frame.render_widget(Paragraph::new(self.mode_line()), modes);
        frame.render_widget(
            Paragraph::new(format!("Search: {}", self.session.query())),
            query,
        );
        self.render_results(frame, results);

        if let Some(selected) = self.menu {
            self.render_menu(frame, area, selected);
        }
    }

    fn mode_line(&self) -> Line<'static> {
        let current = self.session.mode();
        let tab = |mode: SearchMode, label: &'static str| {
            let style = if mode == current {
                Style::new().add_modifier(Modifier::REVERSED)
            } else {
                Style::new().fg(Color::DarkGray)
            };
            Span::styled(format!(" {label} "), style)
        };
        Line::from(vec![
            tab(SearchMode::Filter, "Filter"),
            Span::raw(" "),
            tab(SearchMode::Search, "Search all"),
            Span::styled("  Tab switch, F2 actions", Style::new().fg(Color::DarkGray)),
        ])
    }

    fn render_results(&mut self, frame: &mut Frame, area: Rect) {
        let candidates = self.session.candidates();
        if candidates.is_empty() {
            let empty = Paragraph::new("No results")
                .alignment(Alignment::Center)
                .style(Style::new().fg(Color::DarkGray));
            frame.render_widget(empty, area);
            return;
        }

        let mut title_width = UnicodeWidthStr::width(HEADERS[0]) as u16;
        let rows: Vec<Row> = candidates
            .iter()
            .map(|candidate| {
                let entry = self.session.entry_for(candidate);
                let title = entry.map_or("", |entry| entry.title.as_str());
                title_width = title_width.max(UnicodeWidthStr::width(title) as u16);
                Row::new(vec![
                    Cell::from(title),
                    Cell::from(entry.map_or("", |entry| entry.group_path())),
                    Cell::from(entry.map_or("", |entry| entry.username())),
                    Cell::from(candidate.sequence.as_str()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(title_width.min(TITLE_COLUMN_MAX)),
            Constraint::Fill(1),
            Constraint::Fill(1),
            Constraint::Fill(2),
        ];
        let header = Row::new(HEADERS).style(Style::new().add_modifier(Modifier::BOLD));
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .row_highlight_style(Style::new().add_modifier(Modifier::REVERSED))
            .highlight_symbol(HIGHLIGHT_SYMBOL);
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_menu(&self, frame: &mut Frame, dialog: Rect, selected: usize) {
        let actions = self.session.action_state();
        let label_width = MenuAction::ALL
            .iter()
            .map(|action| UnicodeWidthStr::width(action.label()))
            .max()
            .unwrap_or_default() as u16;
        let size = WindowSize::new(
            label_width + HIGHLIGHT_SYMBOL.len() as u16 + 2,
            MenuAction::ALL.len() as u16 + 2,
        );
        let placement = crate::session::place(
            size,
            ScreenArea::new(dialog.x, dialog.y, dialog.width, dialog.height),
        );
        let area = Rect::new(
            placement.x,
            placement.y,
            placement.size.width,
            placement.size.height,
        );

        let items: Vec<ListItem> = MenuAction::ALL
            .iter()
            .map(|action| {
                let style = if actions.is_enabled(*action) {
                    Style::new()
                } else {
                    Style::new().fg(Color::DarkGray)
                };
                ListItem::new(action.label()).style(style)
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Actions "))
            .highlight_style(Style::new().add_modifier(Modifier::REVERSED))
            .highlight_symbol(HIGHLIGHT_SYMBOL);

        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_widget(Clear, area);
        frame.render_stateful_widget(list, area, &mut state);
    }
}
