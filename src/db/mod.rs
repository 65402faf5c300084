//! Persistence layer over a single SQLite connection. Every operation takes
//! the connection explicitly, logs its own failures and hands the error back
//! to the caller.

mod cars;
mod connection;
mod contacts;
mod customers;
mod schema;
mod seed;
mod staff;

use std::error::Error as _;

use crate::error::DbError;

pub use cars::{add_car, delete_car, get_cars, get_service_categories};
pub use connection::{close, connect, connect_in_memory};
pub use customers::{add_customer, delete_customer, get_customers};
pub use schema::{create_tables, table_names};
pub use seed::insert_sample_data;
pub use staff::{add_staff, delete_staff, get_staff};

/// Log a failed operation together with its underlying cause.
fn log_failure(action: &str, err: &DbError) {
    match err.source() {
        Some(cause) => log::error!("{action}: {err}: {cause}"),
        None => log::error!("{action}: {err}"),
    }
}
