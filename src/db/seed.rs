use chrono::NaiveDate;
use rusqlite::Connection;

use super::cars::insert_car;
use super::customers::insert_customer;
use super::log_failure;
use super::staff::insert_staff;
use crate::error::DbError;
use crate::models::{CarRegistration, NewCar, NewCustomer, NewStaff};

/// `PRAGMA user_version` once the database has been offered sample data.
const SEEDED_VERSION: i64 = 1;

/// Populate an empty database with a few demo records. Runs at most once per
/// database file: the attempt is recorded in `user_version`, so emptying the
/// tables later does not bring the demo rows back. A database that already
/// holds contacts is marked without being seeded.
pub fn insert_sample_data(conn: &mut Connection) -> Result<bool, DbError> {
    seed(conn).inspect_err(|err| log_failure("failed to insert sample data", err))
}

fn seed(conn: &mut Connection) -> Result<bool, DbError> {
    let tx = conn.transaction()?;

    let version: i64 = tx.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version >= SEEDED_VERSION {
        return Ok(false);
    }

    let contacts: i64 = tx.query_row("SELECT COUNT(*) FROM Contact", [], |row| row.get(0))?;
    if contacts > 0 {
        tx.pragma_update(None, "user_version", SEEDED_VERSION)?;
        tx.commit()?;
        return Ok(false);
    }

    let john = insert_customer(
        &tx,
        &NewCustomer {
            first_name: "John".into(),
            last_name: "Doe".into(),
            email: "john.doe@email.com".into(),
            phone: Some("9876543210".into()),
            id_number: "DL-0001".into(),
            issued_date: date(2018, 4, 12),
        },
    )?;
    insert_customer(
        &tx,
        &NewCustomer {
            first_name: "Jane".into(),
            last_name: "Smith".into(),
            email: "jane.smith@email.com".into(),
            phone: None,
            id_number: "DL-0002".into(),
            issued_date: date(2020, 9, 30),
        },
    )?;

    insert_car(
        &tx,
        &NewCar {
            model: "Civic".into(),
            brand: "Honda".into(),
            number_plate: "TN10AB1234".into(),
            customer_id: john,
            registration: Some(CarRegistration {
                category: "Oil Change".into(),
                registered_on: date(2024, 1, 15),
                vehicle_type: Some("Sedan".into()),
            }),
        },
    )?;

    insert_staff(
        &tx,
        &NewStaff {
            first_name: "Michael".into(),
            last_name: "Scott".into(),
            role: "Manager".into(),
            email: "michael.scott@email.com".into(),
            phone: None,
            address: "1725 Slough Avenue".into(),
            join_date: date(2015, 3, 24),
            full_details: Some("Branch manager".into()),
        },
    )?;

    tx.pragma_update(None, "user_version", SEEDED_VERSION)?;
    tx.commit()?;
    log::info!("inserted sample data");
    Ok(true)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
