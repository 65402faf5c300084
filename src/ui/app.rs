use std::mem;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{
    add_car, add_customer, add_staff, close, delete_car, delete_customer, delete_staff, get_cars,
    get_customers, get_service_categories, get_staff,
};
use crate::models::{CarRow, CustomerRow, StaffRow};

use super::forms::{ConfirmDelete, RecordForm};
use super::helpers::{centered_rect, column_widths, surface_error};
use super::tables::{RecordTable, Tab, TableRecord};

const APP_NAME: &str = "Car Service Management System";
/// Height of the tab strip at the top of the window.
const TABS_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown.
const PAGE_SIZE: isize = 10;

/// Fine-grained modes layered over the current tab.
enum Mode {
    Normal,
    Adding(RecordForm),
    ConfirmDelete(ConfirmDelete),
    About,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Warning,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the one database
/// connection for the lifetime of the window.
pub struct App {
    conn: Connection,
    tab: Tab,
    customers: RecordTable<CustomerRow>,
    cars: RecordTable<CarRow>,
    staff: RecordTable<StaffRow>,
    categories: Vec<String>,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Build the application state and load every tab.
    pub fn new(conn: Connection) -> Self {
        let mut app = Self {
            conn,
            tab: Tab::Customers,
            customers: RecordTable::new(Vec::new()),
            cars: RecordTable::new(Vec::new()),
            staff: RecordTable::new(Vec::new()),
            categories: Vec::new(),
            mode: Mode::Normal,
            status: None,
        };

        let loaded = Tab::ALL
            .into_iter()
            .try_for_each(|tab| app.reload(tab, None));
        match loaded {
            Ok(()) => app.set_status("Ready", StatusKind::Info),
            Err(err) => app.report_failure("Failed to load records", &err),
        }
        app
    }

    /// Close the database once the event loop has ended. An error from the
    /// loop takes precedence; a close failure is then only logged.
    pub fn shutdown(self, outcome: Result<()>) -> Result<()> {
        let closed = close(self.conn).context("failed to close database");
        outcome.and(closed)
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::Adding(form) => self.handle_form(code, form)?,
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm)?,
            Mode::About => Mode::Normal,
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Tab | KeyCode::Right => self.switch_tab(self.tab.next()),
            KeyCode::BackTab | KeyCode::Left => self.switch_tab(self.tab.previous()),
            KeyCode::Char(ch @ '1'..='3') => {
                let index = ch as usize - '1' as usize;
                if let Some(tab) = Tab::from_index(index) {
                    self.switch_tab(tab);
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_SIZE),
            KeyCode::PageDown => self.move_selection(PAGE_SIZE),
            KeyCode::Home => self.select_edge(true),
            KeyCode::End => self.select_edge(false),
            KeyCode::Char('r') | KeyCode::Char('R') => self.refresh_current(),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Ok(Mode::Adding(RecordForm::new(self.tab, today())));
            }
            KeyCode::Char('-') | KeyCode::Char('d') | KeyCode::Char('D') => {
                match self.selected_record() {
                    Some((id, summary)) => {
                        self.clear_status();
                        return Ok(Mode::ConfirmDelete(ConfirmDelete {
                            tab: self.tab,
                            id,
                            summary,
                        }));
                    }
                    None => self.set_status(
                        format!("Please select a {} to delete", self.tab.noun()),
                        StatusKind::Warning,
                    ),
                }
            }
            KeyCode::Char('?') => return Ok(Mode::About),
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_form(&mut self, code: KeyCode, mut form: RecordForm) -> Result<Mode> {
        let mut keep_open = true;
        match code {
            KeyCode::Esc => {
                self.set_status(
                    format!("Add {} cancelled.", form.tab.noun()),
                    StatusKind::Info,
                );
                keep_open = false;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match self.save_form(&form) {
                Ok(()) => keep_open = false,
                Err(err) => {
                    let message = surface_error(&err);
                    form.error = Some(message.clone());
                    self.set_status(message, StatusKind::Error);
                }
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }

        if keep_open {
            Ok(Mode::Adding(form))
        } else {
            Ok(Mode::Normal)
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmDelete) -> Result<Mode> {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Ok(Mode::Normal)
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Err(err) = self.perform_delete(&confirm) {
                    self.report_failure(&format!("Failed to delete {}", confirm.tab.noun()), &err);
                }
                Ok(Mode::Normal)
            }
            _ => Ok(Mode::ConfirmDelete(confirm)),
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TABS_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_tabs(frame, chunks[0]);
        match self.tab {
            Tab::Customers => self.draw_table(frame, chunks[1], &self.customers),
            Tab::Cars => self.draw_table(frame, chunks[1], &self.cars),
            Tab::Staff => self.draw_table(frame, chunks[1], &self.staff),
        }
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Normal => {}
            Mode::Adding(form) => self.draw_form(frame, area, form),
            Mode::ConfirmDelete(confirm) => self.draw_confirm_delete(frame, area, confirm),
            Mode::About => self.draw_about(frame, area),
        }
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles = Tab::ALL
            .iter()
            .enumerate()
            .map(|(idx, tab)| format!("{} {}", idx + 1, tab.title()));
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::ALL).title(APP_NAME))
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_table<R: TableRecord>(&self, frame: &mut Frame, area: Rect, table: &RecordTable<R>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("{} ({})", self.tab.title(), table.len()));

        if table.rows.is_empty() {
            let empty = Paragraph::new(format!(
                "No {} yet. Press + to add one.",
                self.tab.title().to_lowercase()
            ))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(
            self.tab
                .headers()
                .iter()
                .map(|title| Cell::from(*title).style(Style::default().add_modifier(Modifier::BOLD))),
        )
        .bottom_margin(1);
        let rows = table.rows.iter().map(|record| Row::new(record.cells()));

        let widget = Table::new(rows, column_widths(self.tab))
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(Some(table.selected));
        frame.render_stateful_widget(widget, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match &self.mode {
            Mode::Adding(_) => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Next Field   "),
                Span::styled("[Enter]", key_style),
                Span::raw(" Save   "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            Mode::ConfirmDelete(_) => Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[N]", key_style),
                Span::raw(" Keep"),
            ]),
            Mode::About => Line::from(vec![
                Span::styled("[Any key]", key_style),
                Span::raw(" Close"),
            ]),
            Mode::Normal => Line::from(vec![
                Span::styled("[Tab]", key_style),
                Span::raw(" Switch   "),
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate   "),
                Span::styled("[R]", key_style),
                Span::raw(" Refresh   "),
                Span::styled("[+]", key_style),
                Span::raw(" Add   "),
                Span::styled("[-]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[?]", key_style),
                Span::raw(" About   "),
                Span::styled("[Q]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect, form: &RecordForm) {
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(form.title()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = (0..form.values.len())
            .map(|idx| form.build_line(idx))
            .collect();
        lines.push(Line::from(""));

        if form.tab == Tab::Cars && !self.categories.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Categories: {}", self.categories.join(", ")),
                Style::default().fg(Color::Gray),
            )));
        }

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter to save • Tab to switch field • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        let cursor_x = inner.x + form.cursor_offset() as u16;
        let cursor_y = inner.y + form.active as u16;
        frame.set_cursor_position((cursor_x, cursor_y));
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Confirm").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            Line::from(format!(
                "Are you sure you want to delete this {}?",
                confirm.tab.noun()
            )),
            Line::from(format!("#{} {}", confirm.id, confirm.summary)),
        ];
        match confirm.tab {
            Tab::Customers => lines.push(Line::from(
                "Their cars, feedback and service history are removed too.",
            )),
            Tab::Staff => lines.push(Line::from(
                "Their details, reports and service history are removed too.",
            )),
            Tab::Cars => {}
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Y to confirm or N / Esc to cancel.",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_about(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(Span::styled(
                APP_NAME,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Version {}", env!("CARGO_PKG_VERSION"))),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().title("About").borders(Borders::ALL));
        frame.render_widget(paragraph, popup_area);
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Show a database failure in the footer. The details are already in the
    /// log, so the message stays short.
    fn report_failure(&mut self, action: &str, err: &anyhow::Error) {
        self.set_status(
            format!("{action}: {}", surface_error(err)),
            StatusKind::Error,
        );
    }

    fn save_form(&mut self, form: &RecordForm) -> Result<()> {
        let (id, label) = match form.tab {
            Tab::Customers => {
                let customer = form.parse_customer()?;
                let id = add_customer(&mut self.conn, &customer)
                    .context("failed to add customer")?;
                (id, format!("{} {}", customer.first_name, customer.last_name))
            }
            Tab::Cars => {
                let car = form.parse_car(today())?;
                let id = add_car(&mut self.conn, &car).context("failed to add car")?;
                (id, car.number_plate)
            }
            Tab::Staff => {
                let staff = form.parse_staff()?;
                let id = add_staff(&mut self.conn, &staff).context("failed to add staff")?;
                (id, format!("{} {}", staff.first_name, staff.last_name))
            }
        };

        // The record is committed at this point, so a failed refresh must not
        // keep the form open for a second submit.
        match self.reload(form.tab, Some(id)) {
            Ok(()) => self.set_status(format!("Added {label}."), StatusKind::Info),
            Err(err) => self.report_failure(&format!("Added {label}, but refresh failed"), &err),
        }
        Ok(())
    }

    fn perform_delete(&mut self, confirm: &ConfirmDelete) -> Result<()> {
        match confirm.tab {
            Tab::Customers => delete_customer(&mut self.conn, confirm.id)?,
            Tab::Cars => delete_car(&self.conn, confirm.id)?,
            Tab::Staff => delete_staff(&mut self.conn, confirm.id)?,
        }

        self.reload(confirm.tab, None)?;
        // Cars belong to customers, so their list changes with it.
        if confirm.tab == Tab::Customers {
            self.reload(Tab::Cars, None)?;
        }
        self.set_status(
            format!("Deleted {} {}.", confirm.tab.noun(), confirm.summary),
            StatusKind::Info,
        );
        Ok(())
    }

    /// Re-query one tab, keeping `focus_id` highlighted when given.
    fn reload(&mut self, tab: Tab, focus_id: Option<i64>) -> Result<()> {
        match tab {
            Tab::Customers => self.customers.replace(get_customers(&self.conn)?, focus_id),
            Tab::Cars => {
                self.cars.replace(get_cars(&self.conn)?, focus_id);
                self.categories = get_service_categories(&self.conn)?;
            }
            Tab::Staff => self.staff.replace(get_staff(&self.conn)?, focus_id),
        }
        Ok(())
    }

    fn refresh_current(&mut self) {
        match self.reload(self.tab, None) {
            Ok(()) => self.set_status(
                format!(
                    "{} refreshed at {}",
                    self.tab.title(),
                    Local::now().format("%H:%M:%S")
                ),
                StatusKind::Info,
            ),
            Err(err) => self.report_failure(&format!("Failed to refresh {}", self.tab.title()), &err),
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.clear_status();
    }

    fn move_selection(&mut self, offset: isize) {
        match self.tab {
            Tab::Customers => self.customers.move_selection(offset),
            Tab::Cars => self.cars.move_selection(offset),
            Tab::Staff => self.staff.move_selection(offset),
        }
    }

    fn select_edge(&mut self, first: bool) {
        match (self.tab, first) {
            (Tab::Customers, true) => self.customers.select_first(),
            (Tab::Customers, false) => self.customers.select_last(),
            (Tab::Cars, true) => self.cars.select_first(),
            (Tab::Cars, false) => self.cars.select_last(),
            (Tab::Staff, true) => self.staff.select_first(),
            (Tab::Staff, false) => self.staff.select_last(),
        }
    }

    fn selected_record(&self) -> Option<(i64, String)> {
        match self.tab {
            Tab::Customers => self.customers.current().map(|row| (row.id(), row.summary())),
            Tab::Cars => self.cars.current().map(|row| (row.id(), row.summary())),
            Tab::Staff => self.staff.current().map(|row| (row.id(), row.summary())),
        }
    }

    #[cfg(test)]
    fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
