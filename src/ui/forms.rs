use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{CarRegistration, NewCar, NewCustomer, NewStaff};

use super::tables::Tab;

/// Format accepted by every date field.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// How the characters typed into a field are filtered and parsed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Text,
    Integer,
    Date,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct FieldSpec {
    pub(crate) label: &'static str,
    pub(crate) kind: FieldKind,
    pub(crate) required: bool,
}

const fn required(label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        label,
        kind,
        required: true,
    }
}

const fn optional(label: &'static str) -> FieldSpec {
    FieldSpec {
        label,
        kind: FieldKind::Text,
        required: false,
    }
}

const CUSTOMER_FIELDS: &[FieldSpec] = &[
    required("First Name", FieldKind::Text),
    required("Last Name", FieldKind::Text),
    required("Email", FieldKind::Text),
    optional("Phone"),
    required("ID Number", FieldKind::Text),
    required("Issued Date", FieldKind::Date),
];

const CAR_FIELDS: &[FieldSpec] = &[
    required("Model", FieldKind::Text),
    required("Brand", FieldKind::Text),
    required("Number Plate", FieldKind::Text),
    required("Customer ID", FieldKind::Integer),
    optional("Service Category"),
    optional("Vehicle Type"),
];

const STAFF_FIELDS: &[FieldSpec] = &[
    required("First Name", FieldKind::Text),
    required("Last Name", FieldKind::Text),
    required("Role", FieldKind::Text),
    required("Email", FieldKind::Text),
    optional("Phone"),
    required("Address", FieldKind::Text),
    required("Join Date", FieldKind::Date),
    optional("Details"),
];

/// Modal "add record" form for whichever tab opened it.
#[derive(Clone, Debug)]
pub(crate) struct RecordForm {
    pub(crate) tab: Tab,
    pub(crate) values: Vec<String>,
    pub(crate) active: usize,
    pub(crate) error: Option<String>,
}

impl RecordForm {
    /// Empty form with date fields pre-filled with `today`.
    pub(crate) fn new(tab: Tab, today: NaiveDate) -> Self {
        let values = fields_for(tab)
            .iter()
            .map(|field| match field.kind {
                FieldKind::Date => today.format(DATE_FORMAT).to_string(),
                _ => String::new(),
            })
            .collect();
        Self {
            tab,
            values,
            active: 0,
            error: None,
        }
    }

    pub(crate) fn title(&self) -> String {
        match self.tab {
            Tab::Customers => "Add Customer".to_string(),
            Tab::Cars => "Add Car".to_string(),
            Tab::Staff => "Add Staff".to_string(),
        }
    }

    pub(crate) fn fields(&self) -> &'static [FieldSpec] {
        fields_for(self.tab)
    }

    pub(crate) fn next_field(&mut self) {
        self.active = (self.active + 1) % self.values.len();
    }

    pub(crate) fn previous_field(&mut self) {
        self.active = (self.active + self.values.len() - 1) % self.values.len();
    }

    /// Append a character to the active field, rejecting characters the field
    /// kind can never accept.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        let accepted = match self.fields()[self.active].kind {
            FieldKind::Integer => ch.is_ascii_digit(),
            FieldKind::Date => ch.is_ascii_digit() || ch == '-',
            FieldKind::Text => !ch.is_control(),
        };
        if accepted {
            self.values[self.active].push(ch);
        }
        accepted
    }

    pub(crate) fn backspace(&mut self) {
        self.values[self.active].pop();
    }

    /// Render a single `Label: value` line for the form widget.
    pub(crate) fn build_line(&self, index: usize) -> Line<'static> {
        let field = self.fields()[index];
        let value = &self.values[index];
        let is_active = self.active == index;

        let display = if value.is_empty() {
            if field.required {
                "<required>".to_string()
            } else {
                "<optional>".to_string()
            }
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{}: ", field.label)),
            Span::styled(display, style),
        ])
    }

    /// Cursor column for the active field, relative to the form's inner area.
    pub(crate) fn cursor_offset(&self) -> usize {
        let label = self.fields()[self.active].label;
        label.chars().count() + 2 + self.values[self.active].chars().count()
    }

    pub(crate) fn parse_customer(&self) -> Result<NewCustomer> {
        Ok(NewCustomer {
            first_name: self.text(0)?,
            last_name: self.text(1)?,
            email: self.email(2)?,
            phone: self.optional(3),
            id_number: self.text(4)?,
            issued_date: self.date(5)?,
        })
    }

    /// Cars listed under a service category are registered on `today`.
    pub(crate) fn parse_car(&self, today: NaiveDate) -> Result<NewCar> {
        let registration = self.optional(4).map(|category| CarRegistration {
            category,
            registered_on: today,
            vehicle_type: self.optional(5),
        });
        Ok(NewCar {
            model: self.text(0)?,
            brand: self.text(1)?,
            number_plate: self.text(2)?.to_uppercase(),
            customer_id: self.integer(3)?,
            registration,
        })
    }

    pub(crate) fn parse_staff(&self) -> Result<NewStaff> {
        Ok(NewStaff {
            first_name: self.text(0)?,
            last_name: self.text(1)?,
            role: self.text(2)?,
            email: self.email(3)?,
            phone: self.optional(4),
            address: self.text(5)?,
            join_date: self.date(6)?,
            full_details: self.optional(7),
        })
    }

    fn text(&self, index: usize) -> Result<String> {
        let value = self.values[index].trim();
        if value.is_empty() {
            return Err(anyhow!("{} is required.", self.fields()[index].label));
        }
        Ok(value.to_string())
    }

    fn optional(&self, index: usize) -> Option<String> {
        let value = self.values[index].trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn email(&self, index: usize) -> Result<String> {
        let value = self.text(index)?;
        if !value.contains('@') {
            return Err(anyhow!("{} must contain '@'.", self.fields()[index].label));
        }
        Ok(value)
    }

    fn integer(&self, index: usize) -> Result<i64> {
        let label = self.fields()[index].label;
        self.text(index)?
            .parse::<i64>()
            .with_context(|| format!("{label} must be an integer."))
    }

    fn date(&self, index: usize) -> Result<NaiveDate> {
        let label = self.fields()[index].label;
        NaiveDate::parse_from_str(&self.text(index)?, DATE_FORMAT)
            .with_context(|| format!("{label} must be a date like 2024-01-31."))
    }
}

fn fields_for(tab: Tab) -> &'static [FieldSpec] {
    match tab {
        Tab::Customers => CUSTOMER_FIELDS,
        Tab::Cars => CAR_FIELDS,
        Tab::Staff => STAFF_FIELDS,
    }
}

/// Pending deletion waiting for a Y/N answer.
#[derive(Clone, Debug)]
pub(crate) struct ConfirmDelete {
    pub(crate) tab: Tab,
    pub(crate) id: i64,
    pub(crate) summary: String,
}
