//! Row and input types shared by the persistence layer and the TUI. Rows mirror
//! the joined read views one column per field; the `New*` types carry every
//! value the multi-table inserts need.

use chrono::NaiveDate;

/// One line of the customer view: `Customer` joined with its `Contact`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl CustomerRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One line of the car view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarRow {
    pub id: i64,
    pub model: String,
    pub brand: String,
    pub number_plate: String,
    /// Owner of the car. Deleting the customer removes the car with it.
    pub customer_id: i64,
}

/// One line of the staff view: `Staff` joined with its `StaffDetail`. Staff
/// without a detail row do not show up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub email: String,
}

impl StaffRow {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Everything needed to register a customer: the contact, the identity
/// document and the customer row itself.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub id_number: String,
    pub issued_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewCar {
    pub model: String,
    pub brand: String,
    pub number_plate: String,
    pub customer_id: i64,
    /// When present the car is also listed under a service category.
    pub registration: Option<CarRegistration>,
}

/// Entry in the vehicle list linking a plate to a service category. Unknown
/// category names are created on the fly.
#[derive(Debug, Clone)]
pub struct CarRegistration {
    pub category: String,
    pub registered_on: NaiveDate,
    pub vehicle_type: Option<String>,
}

/// A staff member together with the 1:1 detail record. The email is stored on
/// both the contact and the detail row.
#[derive(Debug, Clone)]
pub struct NewStaff {
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: String,
    pub join_date: NaiveDate,
    pub full_details: Option<String>,
}
