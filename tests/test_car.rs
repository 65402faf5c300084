//! Car CRUD integration tests

mod common;

use car_service_manager::db;
use car_service_manager::DbError;
use common::{car, count, customer, init_db, registered_car};
use rusqlite::Connection;

fn with_owner() -> (Connection, i64) {
    let mut conn = init_db();
    let owner = db::add_customer(&mut conn, &customer("Owner", "owner@test.com", "ID-1")).unwrap();
    (conn, owner)
}

#[test]
fn add_car_then_get_returns_matching_row() {
    let (mut conn, owner) = with_owner();
    let id = db::add_car(&mut conn, &car("MH12XY9999", owner)).unwrap();

    let cars = db::get_cars(&conn).unwrap();
    assert_eq!(cars.len(), 1);
    let row = &cars[0];
    assert_eq!(row.id, id);
    assert_eq!(row.model, "Corolla");
    assert_eq!(row.brand, "Toyota");
    assert_eq!(row.number_plate, "MH12XY9999");
    assert_eq!(row.customer_id, owner);
    assert_eq!(count(&conn, "VehicleList"), 0);
}

#[test]
fn registration_creates_category_and_vehicle_entry() {
    let (mut conn, owner) = with_owner();
    db::add_car(&mut conn, &registered_car("MH12XY0001", owner, "Tyres")).unwrap();
    db::add_car(&mut conn, &registered_car("MH12XY0002", owner, "Tyres")).unwrap();

    assert_eq!(db::get_service_categories(&conn).unwrap(), vec!["Tyres"]);
    assert_eq!(count(&conn, "VehicleList"), 2);

    let (registered, kind): (String, Option<String>) = conn
        .query_row(
            "SELECT registration_date, vehicle_type FROM VehicleList WHERE number_plate = 'MH12XY0001'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(registered, "2024-02-29");
    assert_eq!(kind.as_deref(), Some("Hatchback"));
}

#[test]
fn categories_match_regardless_of_case() {
    let (mut conn, owner) = with_owner();
    db::add_car(&mut conn, &registered_car("MH12XY0001", owner, "Oil Change")).unwrap();
    db::add_car(&mut conn, &registered_car("MH12XY0002", owner, "oil change")).unwrap();

    assert_eq!(db::get_service_categories(&conn).unwrap(), vec!["Oil Change"]);
    let categories: i64 = conn
        .query_row(
            "SELECT COUNT(DISTINCT servicecategory_id) FROM VehicleList",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(categories, 1);
    assert_eq!(count(&conn, "VehicleList"), 2);
}

#[test]
fn unknown_customer_is_not_found_and_nothing_is_written() {
    let (mut conn, _) = with_owner();
    let err = db::add_car(&mut conn, &registered_car("MH12XY0001", 42, "Tyres")).unwrap_err();

    assert!(matches!(err, DbError::NotFound { entity: "Customer", id: 42 }));
    assert!(db::get_cars(&conn).unwrap().is_empty());
    assert_eq!(count(&conn, "ServiceCategory"), 0);
}

#[test]
fn duplicate_plate_is_rejected() {
    let (mut conn, owner) = with_owner();
    db::add_car(&mut conn, &car("MH12XY9999", owner)).unwrap();

    let err = db::add_car(&mut conn, &car("MH12XY9999", owner)).unwrap_err();
    assert!(matches!(err, DbError::Duplicate { ref column } if column == "number plate"));
    assert_eq!(err.to_string(), "A record with this number plate already exists.");
    assert_eq!(db::get_cars(&conn).unwrap().len(), 1);
}

#[test]
fn delete_car_removes_it_and_its_registrations() {
    let (mut conn, owner) = with_owner();
    let keep = db::add_car(&mut conn, &car("MH12XY0001", owner)).unwrap();
    let gone = db::add_car(&mut conn, &registered_car("MH12XY0002", owner, "Wash")).unwrap();

    db::delete_car(&conn, gone).unwrap();

    let ids: Vec<i64> = db::get_cars(&conn).unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![keep]);
    assert_eq!(count(&conn, "VehicleList"), 0);
    assert_eq!(db::get_customers(&conn).unwrap().len(), 1);
}

#[test]
fn delete_unknown_car_is_not_found() {
    let (conn, _) = with_owner();
    let err = db::delete_car(&conn, 7).unwrap_err();
    assert!(matches!(err, DbError::NotFound { entity: "Car", id: 7 }));
}
