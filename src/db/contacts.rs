//! Contact and identity rows shared by customers and staff. These helpers run
//! inside the caller's transaction and are not exported.

use rusqlite::{params, Connection};

use crate::error::DbError;

/// Insert a contact with an optional phone number and return its id.
pub(super) fn insert_contact(
    conn: &Connection,
    email: &str,
    phone: Option<&str>,
) -> Result<i64, DbError> {
    conn.execute("INSERT INTO Contact (email) VALUES (?1)", params![email])
        .map_err(DbError::from_statement)?;
    let contact_id = conn.last_insert_rowid();

    if let Some(phone) = phone.map(str::trim).filter(|phone| !phone.is_empty()) {
        conn.execute(
            "INSERT INTO ContactPhone (contact_id, phone_number) VALUES (?1, ?2)",
            params![contact_id, phone],
        )
        .map_err(DbError::from_statement)?;
    }

    Ok(contact_id)
}

/// Drop a contact once neither a customer nor a staff member points at it.
/// Phone numbers go with it through the cascade.
pub(super) fn release_contact(conn: &Connection, contact_id: i64) -> Result<(), DbError> {
    conn.execute(
        "DELETE FROM Contact
         WHERE contact_id = ?1
           AND NOT EXISTS (SELECT 1 FROM Customer WHERE contact_id = ?1)
           AND NOT EXISTS (SELECT 1 FROM Staff WHERE contact_id = ?1)",
        params![contact_id],
    )?;
    Ok(())
}

/// Same as [`release_contact`] for identity documents.
pub(super) fn release_identity(conn: &Connection, identity_id: i64) -> Result<(), DbError> {
    conn.execute(
        "DELETE FROM Identity
         WHERE identity_id = ?1
           AND NOT EXISTS (SELECT 1 FROM Customer WHERE identity_id = ?1)",
        params![identity_id],
    )?;
    Ok(())
}
