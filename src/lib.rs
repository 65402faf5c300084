//! Core library surface for the Car Service Manager TUI application.
//!
//! `db` holds the schema and the CRUD operations over an explicit SQLite
//! connection; `ui` drives the tabbed terminal front-end on top of it. The
//! binary only wires configuration, logging and these two together.
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ui;

pub use config::AppConfig;
pub use error::DbError;
pub use models::{CarRow, CustomerRow, NewCar, NewCustomer, NewStaff, StaffRow};
pub use ui::{run_app, App};
