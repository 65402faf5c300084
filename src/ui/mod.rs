//! Ratatui front-end: one tab per entity list, modal add forms and a Y/N
//! prompt before every delete. All database work goes through `crate::db`
//! and each mutation re-queries the affected list.

mod app;
mod forms;
mod helpers;
mod tables;
mod terminal;

pub use app::App;
pub use terminal::run_app;
