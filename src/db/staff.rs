use rusqlite::{params, Connection, OptionalExtension};

use super::contacts::{insert_contact, release_contact};
use super::log_failure;
use crate::error::DbError;
use crate::models::{NewStaff, StaffRow};

/// Staff members that have a detail record, with the email from that record.
pub fn get_staff(conn: &Connection) -> Result<Vec<StaffRow>, DbError> {
    fetch_staff(conn).inspect_err(|err| log_failure("failed to load staff", err))
}

fn fetch_staff(conn: &Connection) -> Result<Vec<StaffRow>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT s.staff_id, s.first_name, s.last_name, s.role, sd.email
         FROM Staff s
         JOIN StaffDetail sd ON s.staff_id = sd.staff_id
         ORDER BY s.staff_id",
    )?;

    let staff = stmt
        .query_map([], |row| {
            Ok(StaffRow {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                role: row.get(3)?,
                email: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(staff)
}

/// Hire a staff member: contact, staff row and detail row in one transaction.
pub fn add_staff(conn: &mut Connection, staff: &NewStaff) -> Result<i64, DbError> {
    conn.transaction()
        .map_err(DbError::from)
        .and_then(|tx| {
            let id = insert_staff(&tx, staff)?;
            tx.commit()?;
            Ok(id)
        })
        .inspect(|id| log::info!("added staff member {id} ({})", staff.email))
        .inspect_err(|err| log_failure("failed to add staff member", err))
}

pub(super) fn insert_staff(conn: &Connection, staff: &NewStaff) -> Result<i64, DbError> {
    let contact_id = insert_contact(conn, &staff.email, staff.phone.as_deref())?;

    conn.execute(
        "INSERT INTO Staff (first_name, last_name, role, contact_id) VALUES (?1, ?2, ?3, ?4)",
        params![staff.first_name, staff.last_name, staff.role, contact_id],
    )
    .map_err(DbError::from_statement)?;
    let staff_id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO StaffDetail (staff_id, address, email, join_date, full_details)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            staff_id,
            staff.address,
            staff.email,
            staff.join_date,
            staff.full_details
        ],
    )
    .map_err(DbError::from_statement)?;

    Ok(staff_id)
}

/// Remove a staff member by id. Details, reports and completed services
/// cascade; admin accounts are unlinked.
pub fn delete_staff(conn: &mut Connection, id: i64) -> Result<(), DbError> {
    remove_staff(conn, id)
        .inspect(|_| log::info!("deleted staff member {id}"))
        .inspect_err(|err| log_failure("failed to delete staff member", err))
}

fn remove_staff(conn: &mut Connection, id: i64) -> Result<(), DbError> {
    let tx = conn.transaction()?;

    let contact_id: Option<i64> = tx
        .query_row(
            "SELECT contact_id FROM Staff WHERE staff_id = ?1",
            params![id],
            |row| row.get(0),
        )
        .optional()?;
    let Some(contact_id) = contact_id else {
        return Err(DbError::NotFound { entity: "Staff member", id });
    };

    tx.execute("DELETE FROM Staff WHERE staff_id = ?1", params![id])?;
    release_contact(&tx, contact_id)?;

    tx.commit()?;
    Ok(())
}
