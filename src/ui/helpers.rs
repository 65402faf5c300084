use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::tables::Tab;
use crate::error::DbError;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error. A
/// [`DbError`] already reads as a user message, so the chain stops there
/// instead of descending into the raw SQLite error beneath it.
pub(crate) fn surface_error(err: &Error) -> String {
    if let Some(db_err) = err.chain().find_map(|cause| cause.downcast_ref::<DbError>()) {
        return db_err.to_string();
    }
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Column widths for each tab's table, matching [`Tab::headers`].
pub(crate) fn column_widths(tab: Tab) -> Vec<Constraint> {
    match tab {
        Tab::Customers => vec![
            Constraint::Length(6),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Fill(1),
        ],
        Tab::Cars => vec![
            Constraint::Length(6),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
            Constraint::Fill(1),
        ],
        Tab::Staff => vec![
            Constraint::Length(6),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Fill(1),
        ],
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};

    use super::*;

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = Err::<(), _>(anyhow!("A record with this email already exists."))
            .context("failed to add customer")
            .unwrap_err();
        assert_eq!(surface_error(&err), "A record with this email already exists.");
    }

    #[test]
    fn surface_error_stops_at_the_database_error() {
        let sqlite = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        );
        let err = Err::<(), _>(DbError::Sqlite(sqlite))
            .context("failed to add car")
            .unwrap_err();
        assert_eq!(surface_error(&err), "database is locked");

        let err = Err::<(), _>(DbError::Schema {
            table: "Car",
            source: rusqlite::Error::InvalidQuery,
        })
        .context("failed to create tables")
        .unwrap_err();
        assert_eq!(surface_error(&err), "failed to create table Car");
    }

    #[test]
    fn every_tab_has_a_width_per_header() {
        for tab in Tab::ALL {
            assert_eq!(column_widths(tab).len(), tab.headers().len());
        }
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
        assert_eq!(popup.width, 60);
    }
}
