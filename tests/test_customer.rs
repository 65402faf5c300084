//! Customer CRUD integration tests

mod common;

use car_service_manager::db;
use car_service_manager::DbError;
use common::{car, count, customer, init_db};

// ──────────────────────── add_customer ────────────────────────

#[test]
fn add_customer_then_get_returns_matching_row() {
    let mut conn = init_db();
    let id = db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();

    let customers = db::get_customers(&conn).unwrap();
    assert_eq!(customers.len(), 1);
    let row = &customers[0];
    assert_eq!(row.id, id);
    assert_eq!(row.first_name, "Alice");
    assert_eq!(row.last_name, "Tester");
    assert_eq!(row.email, "alice@test.com");
}

#[test]
fn add_customer_writes_contact_phone_and_identity() {
    let mut conn = init_db();
    db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();

    assert_eq!(count(&conn, "Contact"), 1);
    assert_eq!(count(&conn, "ContactPhone"), 1);
    assert_eq!(count(&conn, "Identity"), 1);

    let issued: String = conn
        .query_row("SELECT issued_date FROM Identity", [], |row| row.get(0))
        .unwrap();
    assert_eq!(issued, "2019-06-01");
}

#[test]
fn add_customer_without_phone_skips_phone_row() {
    let mut conn = init_db();
    let mut new = customer("Alice", "alice@test.com", "ID-1");
    new.phone = Some("   ".to_string());
    db::add_customer(&mut conn, &new).unwrap();
    assert_eq!(count(&conn, "ContactPhone"), 0);
}

#[test]
fn customers_are_listed_in_insertion_order() {
    let mut conn = init_db();
    let first = db::add_customer(&mut conn, &customer("Zed", "zed@test.com", "ID-1")).unwrap();
    let second = db::add_customer(&mut conn, &customer("Amy", "amy@test.com", "ID-2")).unwrap();

    let ids: Vec<i64> = db::get_customers(&conn).unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn duplicate_email_fails_and_rolls_back() {
    let mut conn = init_db();
    db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();

    let err = db::add_customer(&mut conn, &customer("Alicia", "alice@test.com", "ID-2"))
        .unwrap_err();
    assert!(matches!(err, DbError::Duplicate { ref column } if column == "email"));

    assert_eq!(db::get_customers(&conn).unwrap().len(), 1);
    assert_eq!(count(&conn, "Contact"), 1);
    assert_eq!(count(&conn, "Identity"), 1);
}

#[test]
fn duplicate_id_number_rolls_back_the_new_contact() {
    let mut conn = init_db();
    db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();

    // The contact insert succeeds before the identity insert fails.
    let err = db::add_customer(&mut conn, &customer("Bob", "bob@test.com", "ID-1")).unwrap_err();
    assert!(matches!(err, DbError::Duplicate { ref column } if column == "id number"));

    assert_eq!(count(&conn, "Contact"), 1);
    assert_eq!(count(&conn, "ContactPhone"), 1);
    assert_eq!(count(&conn, "Customer"), 1);
}

// ──────────────────────── delete_customer ────────────────────────

#[test]
fn delete_customer_removes_it_from_the_view() {
    let mut conn = init_db();
    let keep = db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();
    let gone = db::add_customer(&mut conn, &customer("Bob", "bob@test.com", "ID-2")).unwrap();

    db::delete_customer(&mut conn, gone).unwrap();

    let ids: Vec<i64> = db::get_customers(&conn).unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![keep]);
}

#[test]
fn delete_customer_cascades_to_cars_and_vehicle_list() {
    let mut conn = init_db();
    let id = db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();
    db::add_car(&mut conn, &car("KA01AA0001", id)).unwrap();
    db::add_car(&mut conn, &common::registered_car("KA01AA0002", id, "Brakes")).unwrap();
    conn.execute(
        "INSERT INTO Feedback (customer_id, comments, feedback_date, rating) VALUES (?1, 'Great', '2024-03-01', 5)",
        [id],
    )
    .unwrap();

    db::delete_customer(&mut conn, id).unwrap();

    assert!(db::get_cars(&conn).unwrap().is_empty());
    assert_eq!(count(&conn, "VehicleList"), 0);
    assert_eq!(count(&conn, "Feedback"), 0);
    // Categories are shared reference data and stay.
    assert_eq!(count(&conn, "ServiceCategory"), 1);
}

#[test]
fn delete_customer_nulls_admin_link() {
    let mut conn = init_db();
    let id = db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();
    conn.execute(
        "INSERT INTO Admin (customer_id, username, password_hash, role) VALUES (?1, 'alice', 'x', 'owner')",
        [id],
    )
    .unwrap();

    db::delete_customer(&mut conn, id).unwrap();

    let linked: Option<i64> = conn
        .query_row("SELECT customer_id FROM Admin WHERE username = 'alice'", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(linked, None);
    assert_eq!(count(&conn, "Admin"), 1);
}

#[test]
fn delete_customer_cascades_to_completed_services() {
    let mut conn = init_db();
    let id = db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();
    let other = db::add_customer(&mut conn, &customer("Bob", "bob@test.com", "ID-2")).unwrap();
    let mechanic = db::add_staff(&mut conn, &common::staff("Pam", "pam@test.com")).unwrap();
    for owner in [id, other] {
        conn.execute(
            "INSERT INTO ServiceComplete (time_completion, customer_id, completion_date, staff_id) VALUES ('14:30', ?1, '2024-03-02', ?2)",
            [owner, mechanic],
        )
        .unwrap();
    }

    db::delete_customer(&mut conn, id).unwrap();

    let remaining: i64 = conn
        .query_row("SELECT customer_id FROM ServiceComplete", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, other);
    assert_eq!(count(&conn, "ServiceComplete"), 1);
    assert_eq!(db::get_staff(&conn).unwrap().len(), 1);
}

#[test]
fn delete_customer_frees_email_for_reuse() {
    let mut conn = init_db();
    let id = db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();

    db::delete_customer(&mut conn, id).unwrap();
    assert_eq!(count(&conn, "Contact"), 0);
    assert_eq!(count(&conn, "ContactPhone"), 0);
    assert_eq!(count(&conn, "Identity"), 0);

    db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();
    assert_eq!(db::get_customers(&conn).unwrap().len(), 1);
}

#[test]
fn delete_customer_keeps_contact_shared_with_staff() {
    let mut conn = init_db();
    let id = db::add_customer(&mut conn, &customer("Alice", "alice@test.com", "ID-1")).unwrap();
    let contact_id: i64 = conn
        .query_row("SELECT contact_id FROM Customer WHERE customer_id = ?1", [id], |row| {
            row.get(0)
        })
        .unwrap();
    conn.execute(
        "INSERT INTO Staff (first_name, last_name, role, contact_id) VALUES ('Alice', 'Tester', 'Clerk', ?1)",
        [contact_id],
    )
    .unwrap();

    db::delete_customer(&mut conn, id).unwrap();
    assert_eq!(count(&conn, "Contact"), 1);
    assert_eq!(count(&conn, "Staff"), 1);
}

#[test]
fn delete_unknown_customer_is_not_found() {
    let mut conn = init_db();
    let err = db::delete_customer(&mut conn, 99).unwrap_err();
    assert!(matches!(err, DbError::NotFound { entity: "Customer", id: 99 }));
}
