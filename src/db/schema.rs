use rusqlite::Connection;

use crate::error::DbError;

/// Table definitions in dependency order: every table appears after the
/// tables it references.
const TABLES: &[(&str, &str)] = &[
    (
        "Contact",
        "CREATE TABLE IF NOT EXISTS Contact (
            contact_id INTEGER PRIMARY KEY AUTOINCREMENT,
            email VARCHAR(100) UNIQUE NOT NULL
        )",
    ),
    (
        "ContactPhone",
        "CREATE TABLE IF NOT EXISTS ContactPhone (
            contact_id INTEGER NOT NULL,
            phone_number VARCHAR(15) NOT NULL,
            PRIMARY KEY (contact_id, phone_number),
            FOREIGN KEY (contact_id) REFERENCES Contact(contact_id) ON DELETE CASCADE
        )",
    ),
    (
        "Identity",
        "CREATE TABLE IF NOT EXISTS Identity (
            identity_id INTEGER PRIMARY KEY AUTOINCREMENT,
            id_number VARCHAR(20) UNIQUE NOT NULL,
            issued_date DATE NOT NULL
        )",
    ),
    (
        "Customer",
        "CREATE TABLE IF NOT EXISTS Customer (
            customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name VARCHAR(50) NOT NULL,
            last_name VARCHAR(50) NOT NULL,
            contact_id INTEGER NOT NULL,
            identity_id INTEGER NOT NULL,
            FOREIGN KEY (contact_id) REFERENCES Contact(contact_id) ON DELETE CASCADE,
            FOREIGN KEY (identity_id) REFERENCES Identity(identity_id) ON DELETE CASCADE
        )",
    ),
    (
        "Staff",
        "CREATE TABLE IF NOT EXISTS Staff (
            staff_id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name VARCHAR(50) NOT NULL,
            last_name VARCHAR(50) NOT NULL,
            role VARCHAR(50) NOT NULL,
            contact_id INTEGER NOT NULL,
            FOREIGN KEY (contact_id) REFERENCES Contact(contact_id) ON DELETE CASCADE
        )",
    ),
    (
        "StaffDetail",
        "CREATE TABLE IF NOT EXISTS StaffDetail (
            staff_id INTEGER PRIMARY KEY,
            address TEXT NOT NULL,
            email VARCHAR(100) UNIQUE NOT NULL,
            join_date DATE NOT NULL,
            full_details TEXT,
            FOREIGN KEY (staff_id) REFERENCES Staff(staff_id) ON DELETE CASCADE
        )",
    ),
    (
        "Admin",
        "CREATE TABLE IF NOT EXISTS Admin (
            admin_id INTEGER PRIMARY KEY AUTOINCREMENT,
            staff_id INTEGER UNIQUE,
            customer_id INTEGER UNIQUE,
            username VARCHAR(50) NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            role VARCHAR(20) NOT NULL,
            FOREIGN KEY (staff_id) REFERENCES Staff(staff_id) ON DELETE SET NULL,
            FOREIGN KEY (customer_id) REFERENCES Customer(customer_id) ON DELETE SET NULL
        )",
    ),
    (
        "Car",
        "CREATE TABLE IF NOT EXISTS Car (
            car_id INTEGER PRIMARY KEY AUTOINCREMENT,
            model VARCHAR(50) NOT NULL,
            brand VARCHAR(50) NOT NULL,
            number_plate VARCHAR(20) UNIQUE NOT NULL,
            customer_id INTEGER NOT NULL,
            FOREIGN KEY (customer_id) REFERENCES Customer(customer_id) ON DELETE CASCADE
        )",
    ),
    (
        "Discount",
        "CREATE TABLE IF NOT EXISTS Discount (
            discount_id INTEGER PRIMARY KEY AUTOINCREMENT,
            percentage_discount DECIMAL(5,2) NOT NULL
        )",
    ),
    (
        "Payment",
        "CREATE TABLE IF NOT EXISTS Payment (
            payment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount DECIMAL(10,2) NOT NULL,
            discount_id INTEGER,
            status VARCHAR(20) CHECK (status IN ('Completed', 'Pending', 'Failed')),
            FOREIGN KEY (discount_id) REFERENCES Discount(discount_id) ON DELETE SET NULL
        )",
    ),
    (
        "Feedback",
        "CREATE TABLE IF NOT EXISTS Feedback (
            feedback_id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER NOT NULL,
            comments TEXT NOT NULL,
            feedback_date DATE NOT NULL,
            rating INTEGER CHECK (rating BETWEEN 1 AND 5),
            FOREIGN KEY (customer_id) REFERENCES Customer(customer_id) ON DELETE CASCADE
        )",
    ),
    (
        "ServiceCategory",
        "CREATE TABLE IF NOT EXISTS ServiceCategory (
            servicecategory_id INTEGER PRIMARY KEY AUTOINCREMENT,
            category_name VARCHAR(100) UNIQUE NOT NULL COLLATE NOCASE
        )",
    ),
    (
        "VehicleList",
        "CREATE TABLE IF NOT EXISTS VehicleList (
            vehiclelist_id INTEGER PRIMARY KEY AUTOINCREMENT,
            number_plate VARCHAR(20) NOT NULL,
            servicecategory_id INTEGER NOT NULL,
            registration_date DATE NOT NULL,
            vehicle_type VARCHAR(50),
            FOREIGN KEY (number_plate) REFERENCES Car(number_plate) ON DELETE CASCADE,
            FOREIGN KEY (servicecategory_id) REFERENCES ServiceCategory(servicecategory_id) ON DELETE CASCADE
        )",
    ),
    (
        "Sparepart",
        "CREATE TABLE IF NOT EXISTS Sparepart (
            sparepart_id INTEGER PRIMARY KEY AUTOINCREMENT,
            part_name VARCHAR(100) NOT NULL,
            price DECIMAL(10,2) NOT NULL
        )",
    ),
    (
        "Report",
        "CREATE TABLE IF NOT EXISTS Report (
            report_id INTEGER PRIMARY KEY AUTOINCREMENT,
            report_date DATE NOT NULL,
            description_text TEXT NOT NULL,
            staff_id INTEGER NOT NULL,
            FOREIGN KEY (staff_id) REFERENCES Staff(staff_id) ON DELETE CASCADE
        )",
    ),
    (
        "ServiceComplete",
        "CREATE TABLE IF NOT EXISTS ServiceComplete (
            servicecomplete_id INTEGER PRIMARY KEY AUTOINCREMENT,
            time_completion TIME NOT NULL,
            customer_id INTEGER NOT NULL,
            completion_date DATE NOT NULL,
            staff_id INTEGER NOT NULL,
            FOREIGN KEY (customer_id) REFERENCES Customer(customer_id) ON DELETE CASCADE,
            FOREIGN KEY (staff_id) REFERENCES Staff(staff_id) ON DELETE CASCADE
        )",
    ),
    (
        "Emergency",
        "CREATE TABLE IF NOT EXISTS Emergency (
            emergency_id INTEGER PRIMARY KEY AUTOINCREMENT,
            phone_number VARCHAR(15) UNIQUE NOT NULL
        )",
    ),
];

/// Names of every table the application owns, in creation order.
pub fn table_names() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|(name, _)| *name)
}

/// Create every table that does not exist yet. Safe to call on each start.
pub fn create_tables(conn: &Connection) -> Result<(), DbError> {
    for &(table, ddl) in TABLES {
        if let Err(source) = conn.execute(ddl, []) {
            log::error!("failed to create table {table}: {source}");
            return Err(DbError::Schema { table, source });
        }
    }
    log::debug!("schema ready ({} tables)", TABLES.len());
    Ok(())
}
