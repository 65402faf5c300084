//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use car_service_manager::db;
use car_service_manager::models::{CarRegistration, NewCar, NewCustomer, NewStaff};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Fresh in-memory database with the full schema and no rows.
pub fn init_db() -> Connection {
    let conn = db::connect_in_memory().unwrap();
    db::create_tables(&conn).unwrap();
    conn
}

pub fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn customer(first: &str, email: &str, id_number: &str) -> NewCustomer {
    NewCustomer {
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        email: email.to_string(),
        phone: Some("5550100".to_string()),
        id_number: id_number.to_string(),
        issued_date: date(2019, 6, 1),
    }
}

pub fn car(plate: &str, customer_id: i64) -> NewCar {
    NewCar {
        model: "Corolla".to_string(),
        brand: "Toyota".to_string(),
        number_plate: plate.to_string(),
        customer_id,
        registration: None,
    }
}

pub fn registered_car(plate: &str, customer_id: i64, category: &str) -> NewCar {
    NewCar {
        registration: Some(CarRegistration {
            category: category.to_string(),
            registered_on: date(2024, 2, 29),
            vehicle_type: Some("Hatchback".to_string()),
        }),
        ..car(plate, customer_id)
    }
}

pub fn staff(first: &str, email: &str) -> NewStaff {
    NewStaff {
        first_name: first.to_string(),
        last_name: "Mechanic".to_string(),
        role: "Technician".to_string(),
        email: email.to_string(),
        phone: None,
        address: "12 Garage Lane".to_string(),
        join_date: date(2022, 11, 7),
        full_details: None,
    }
}
