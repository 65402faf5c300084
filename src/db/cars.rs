use rusqlite::{params, Connection, OptionalExtension};

use super::log_failure;
use crate::error::DbError;
use crate::models::{CarRegistration, CarRow, NewCar};

pub fn get_cars(conn: &Connection) -> Result<Vec<CarRow>, DbError> {
    fetch_cars(conn).inspect_err(|err| log_failure("failed to load cars", err))
}

fn fetch_cars(conn: &Connection) -> Result<Vec<CarRow>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT car_id, model, brand, number_plate, customer_id
         FROM Car
         ORDER BY car_id",
    )?;

    let cars = stmt
        .query_map([], |row| {
            Ok(CarRow {
                id: row.get(0)?,
                model: row.get(1)?,
                brand: row.get(2)?,
                number_plate: row.get(3)?,
                customer_id: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cars)
}

/// Add a car for an existing customer, optionally listing it under a service
/// category in the same transaction.
pub fn add_car(conn: &mut Connection, car: &NewCar) -> Result<i64, DbError> {
    conn.transaction()
        .map_err(DbError::from)
        .and_then(|tx| {
            let id = insert_car(&tx, car)?;
            tx.commit()?;
            Ok(id)
        })
        .inspect(|id| log::info!("added car {id} ({})", car.number_plate))
        .inspect_err(|err| log_failure("failed to add car", err))
}

pub(super) fn insert_car(conn: &Connection, car: &NewCar) -> Result<i64, DbError> {
    conn.execute(
        "INSERT INTO Car (model, brand, number_plate, customer_id) VALUES (?1, ?2, ?3, ?4)",
        params![car.model, car.brand, car.number_plate, car.customer_id],
    )
    .map_err(|err| DbError::from_statement(err).or_not_found("Customer", car.customer_id))?;
    let car_id = conn.last_insert_rowid();

    if let Some(registration) = &car.registration {
        register_vehicle(conn, &car.number_plate, registration)?;
    }

    Ok(car_id)
}

fn register_vehicle(
    conn: &Connection,
    number_plate: &str,
    registration: &CarRegistration,
) -> Result<(), DbError> {
    // Categories match case-insensitively, also in files created before the
    // column carried COLLATE NOCASE.
    let existing: Option<i64> = conn
        .query_row(
            "SELECT servicecategory_id FROM ServiceCategory
             WHERE category_name = ?1 COLLATE NOCASE
             ORDER BY servicecategory_id LIMIT 1",
            params![registration.category],
            |row| row.get(0),
        )
        .optional()?;
    let category_id = match existing {
        Some(id) => id,
        None => {
            conn.execute(
                "INSERT INTO ServiceCategory (category_name) VALUES (?1)",
                params![registration.category],
            )
            .map_err(DbError::from_statement)?;
            conn.last_insert_rowid()
        }
    };

    conn.execute(
        "INSERT INTO VehicleList (number_plate, servicecategory_id, registration_date, vehicle_type)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            number_plate,
            category_id,
            registration.registered_on,
            registration.vehicle_type
        ],
    )
    .map_err(DbError::from_statement)?;

    Ok(())
}

/// Delete a car by id. Its vehicle list entries go with it.
pub fn delete_car(conn: &Connection, id: i64) -> Result<(), DbError> {
    remove_car(conn, id)
        .inspect(|_| log::info!("deleted car {id}"))
        .inspect_err(|err| log_failure("failed to delete car", err))
}

fn remove_car(conn: &Connection, id: i64) -> Result<(), DbError> {
    let deleted = conn.execute("DELETE FROM Car WHERE car_id = ?1", params![id])?;

    if deleted == 0 {
        Err(DbError::NotFound { entity: "Car", id })
    } else {
        Ok(())
    }
}

/// Service category names in alphabetical order, used as hints by the car form.
pub fn get_service_categories(conn: &Connection) -> Result<Vec<String>, DbError> {
    fetch_service_categories(conn)
        .inspect_err(|err| log_failure("failed to load service categories", err))
}

fn fetch_service_categories(conn: &Connection) -> Result<Vec<String>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT category_name FROM ServiceCategory ORDER BY category_name COLLATE NOCASE",
    )?;

    let categories = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;

    Ok(categories)
}
