use crate::models::{CarRow, CustomerRow, StaffRow};

/// The three entity lists shown as tabs, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Tab {
    Customers,
    Cars,
    Staff,
}

impl Tab {
    pub(crate) const ALL: [Tab; 3] = [Tab::Customers, Tab::Cars, Tab::Staff];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Tab::Customers => "Customers",
            Tab::Cars => "Cars",
            Tab::Staff => "Staff",
        }
    }

    /// Lower-case noun used in prompts ("Please select a car to delete").
    pub(crate) fn noun(self) -> &'static str {
        match self {
            Tab::Customers => "customer",
            Tab::Cars => "car",
            Tab::Staff => "staff member",
        }
    }

    pub(crate) fn headers(self) -> &'static [&'static str] {
        match self {
            Tab::Customers => &["ID", "First Name", "Last Name", "Email"],
            Tab::Cars => &["ID", "Model", "Brand", "Number Plate", "Customer ID"],
            Tab::Staff => &["ID", "First Name", "Last Name", "Role", "Email"],
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Tab::Customers => 0,
            Tab::Cars => 1,
            Tab::Staff => 2,
        }
    }

    pub(crate) fn from_index(index: usize) -> Option<Tab> {
        Tab::ALL.get(index).copied()
    }

    pub(crate) fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub(crate) fn previous(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// A row that can be listed in a table widget.
pub(crate) trait TableRecord {
    fn id(&self) -> i64;
    /// Cell text in the same order as [`Tab::headers`].
    fn cells(&self) -> Vec<String>;
    /// Short description used in confirmation prompts.
    fn summary(&self) -> String;
}

impl TableRecord for CustomerRow {
    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.email.clone(),
        ]
    }

    fn summary(&self) -> String {
        format!("{} <{}>", self.full_name(), self.email)
    }
}

impl TableRecord for CarRow {
    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.model.clone(),
            self.brand.clone(),
            self.number_plate.clone(),
            self.customer_id.to_string(),
        ]
    }

    fn summary(&self) -> String {
        format!("{} {} ({})", self.brand, self.model, self.number_plate)
    }
}

impl TableRecord for StaffRow {
    fn id(&self) -> i64 {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.role.clone(),
            self.email.clone(),
        ]
    }

    fn summary(&self) -> String {
        format!("{} ({})", self.full_name(), self.role)
    }
}

/// Rows of one tab plus the highlighted index.
pub(crate) struct RecordTable<R> {
    pub(crate) rows: Vec<R>,
    pub(crate) selected: usize,
}

impl<R: TableRecord> RecordTable<R> {
    pub(crate) fn new(rows: Vec<R>) -> Self {
        Self { rows, selected: 0 }
    }

    /// Swap in freshly queried rows. The selection follows `focus_id` when it
    /// is still present and is clamped otherwise.
    pub(crate) fn replace(&mut self, rows: Vec<R>, focus_id: Option<i64>) {
        self.rows = rows;
        if let Some(idx) = focus_id.and_then(|id| self.rows.iter().position(|row| row.id() == id)) {
            self.selected = idx;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    pub(crate) fn current(&self) -> Option<&R> {
        self.rows.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.rows.len() - 1;
        self.selected = self.selected.saturating_add_signed(offset).min(last);
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(id: i64) -> CarRow {
        CarRow {
            id,
            model: "Civic".into(),
            brand: "Honda".into(),
            number_plate: format!("PLATE{id}"),
            customer_id: 1,
        }
    }

    #[test]
    fn tabs_wrap_in_both_directions() {
        assert_eq!(Tab::Staff.next(), Tab::Customers);
        assert_eq!(Tab::Customers.previous(), Tab::Staff);
        assert_eq!(Tab::from_index(1), Some(Tab::Cars));
        assert_eq!(Tab::from_index(3), None);
    }

    #[test]
    fn cells_line_up_with_headers() {
        let row = car(7);
        assert_eq!(row.cells().len(), Tab::Cars.headers().len());
        assert_eq!(row.cells()[3], "PLATE7");
    }

    #[test]
    fn selection_is_clamped_to_rows() {
        let mut table = RecordTable::new(vec![car(1), car(2), car(3)]);
        table.move_selection(-1);
        assert_eq!(table.selected, 0);
        table.move_selection(10);
        assert_eq!(table.selected, 2);
        table.replace(vec![car(1)], None);
        assert_eq!(table.selected, 0);
    }

    #[test]
    fn replace_follows_focused_id() {
        let mut table = RecordTable::new(vec![car(1), car(2)]);
        table.replace(vec![car(1), car(2), car(5)], Some(5));
        assert_eq!(table.current().map(|row| row.id), Some(5));
    }

    #[test]
    fn empty_table_has_no_current_row() {
        let mut table: RecordTable<CarRow> = RecordTable::new(Vec::new());
        table.move_selection(1);
        table.select_last();
        assert!(table.current().is_none());
        assert_eq!(table.len(), 0);
    }
}
