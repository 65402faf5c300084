use rusqlite::{params, Connection, OptionalExtension};

use super::contacts::{insert_contact, release_contact, release_identity};
use super::log_failure;
use crate::error::DbError;
use crate::models::{CustomerRow, NewCustomer};

/// Every customer with the email from their contact record, oldest first.
pub fn get_customers(conn: &Connection) -> Result<Vec<CustomerRow>, DbError> {
    fetch_customers(conn).inspect_err(|err| log_failure("failed to load customers", err))
}

fn fetch_customers(conn: &Connection) -> Result<Vec<CustomerRow>, DbError> {
    let mut stmt = conn.prepare(
        "SELECT c.customer_id, c.first_name, c.last_name, co.email
         FROM Customer c
         JOIN Contact co ON c.contact_id = co.contact_id
         ORDER BY c.customer_id",
    )?;

    let customers = stmt
        .query_map([], |row| {
            Ok(CustomerRow {
                id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                email: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(customers)
}

/// Register a customer together with their contact and identity rows. Either
/// all rows land or none do.
pub fn add_customer(conn: &mut Connection, customer: &NewCustomer) -> Result<i64, DbError> {
    conn.transaction()
        .map_err(DbError::from)
        .and_then(|tx| {
            let id = insert_customer(&tx, customer)?;
            tx.commit()?;
            Ok(id)
        })
        .inspect(|id| log::info!("added customer {id} ({})", customer.email))
        .inspect_err(|err| log_failure("failed to add customer", err))
}

/// Insert the customer rows on an open transaction. Shared with the seeding
/// code so sample rows follow the same path as user input.
pub(super) fn insert_customer(conn: &Connection, customer: &NewCustomer) -> Result<i64, DbError> {
    let contact_id = insert_contact(conn, &customer.email, customer.phone.as_deref())?;

    conn.execute(
        "INSERT INTO Identity (id_number, issued_date) VALUES (?1, ?2)",
        params![customer.id_number, customer.issued_date],
    )
    .map_err(DbError::from_statement)?;
    let identity_id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO Customer (first_name, last_name, contact_id, identity_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![customer.first_name, customer.last_name, contact_id, identity_id],
    )
    .map_err(DbError::from_statement)?;

    Ok(conn.last_insert_rowid())
}

/// Remove a customer by id. Cars, feedback and completed services cascade;
/// admin accounts pointing at the customer are unlinked.
pub fn delete_customer(conn: &mut Connection, id: i64) -> Result<(), DbError> {
    remove_customer(conn, id)
        .inspect(|_| log::info!("deleted customer {id}"))
        .inspect_err(|err| log_failure("failed to delete customer", err))
}

fn remove_customer(conn: &mut Connection, id: i64) -> Result<(), DbError> {
    let tx = conn.transaction()?;

    let owned: Option<(i64, i64)> = tx
        .query_row(
            "SELECT contact_id, identity_id FROM Customer WHERE customer_id = ?1",
            params![id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;
    let Some((contact_id, identity_id)) = owned else {
        return Err(DbError::NotFound {
            entity: "Customer",
            id,
        });
    };

    tx.execute("DELETE FROM Customer WHERE customer_id = ?1", params![id])?;
    release_contact(&tx, contact_id)?;
    release_identity(&tx, identity_id)?;

    tx.commit()?;
    Ok(())
}
