use crate::table::Table;

/// An owned copy of a table's rows, independent of the live table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    rows: Vec<Vec<String>>,
}

impl Snapshot {
    pub fn capture(table: &Table) -> Self {
        Self { rows: table.clone_all_rows() }
    }

    /// Put this snapshot's rows into `table`, returning what was there as a
    /// new snapshot
    pub fn restore(self, table: &mut Table) -> Snapshot {
        Snapshot { rows: table.replace_rows(self.rows) }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}
