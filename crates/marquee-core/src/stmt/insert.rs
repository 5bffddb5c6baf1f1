use super::{first_table, Bindings, Record, Statement};

/// `INSERT INTO <table> (<columns>) VALUES (..), (..)`
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Table to insert into
    pub table: String,

    /// The record(s) to insert
    pub values: InsertValues,

    /// Extra bindings, merged into the compiled statement's bindings
    pub bindings: Bindings,
}

/// Values of an insert statement.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertValues {
    /// One record. Placeholders are named after the columns (`:title`).
    Single(Record),

    /// Several records sharing the same columns. Placeholders are suffixed
    /// with the 1-based record index (`:title_1`, `:title_2`).
    Batch(Vec<Record>),
}

impl Insert {
    pub fn new(table: impl Into<String>, record: Record) -> Insert {
        Insert {
            table: table.into(),
            values: InsertValues::Single(record),
            bindings: Bindings::new(),
        }
    }

    pub fn batch(table: impl Into<String>, records: impl IntoIterator<Item = Record>) -> Insert {
        Insert {
            table: table.into(),
            values: InsertValues::Batch(records.into_iter().collect()),
            bindings: Bindings::new(),
        }
    }

    /// Appends `overlay`'s values to ours.
    ///
    /// Two single records merge column-wise (later columns overwrite). Any
    /// other combination produces a batch holding our records first.
    pub fn merge(&self, overlay: &Insert) -> Insert {
        use InsertValues::*;

        let values = match (&self.values, &overlay.values) {
            (Single(base), Single(overlay)) => {
                let mut record = base.clone();
                record.extend(overlay.clone());
                Single(record)
            }
            (base, overlay) => Batch(base.records().chain(overlay.records()).cloned().collect()),
        };

        let mut bindings = self.bindings.clone();
        bindings.extend_from(&overlay.bindings);

        Insert {
            table: first_table(&self.table, &overlay.table),
            values,
            bindings,
        }
    }
}

impl InsertValues {
    pub fn is_batch(&self) -> bool {
        matches!(self, InsertValues::Batch(_))
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            InsertValues::Single(_) => 1,
            InsertValues::Batch(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> std::slice::Iter<'_, Record> {
        match self {
            InsertValues::Single(record) => std::slice::from_ref(record).iter(),
            InsertValues::Batch(records) => records.iter(),
        }
    }
}

impl Statement {
    pub fn as_insert(&self) -> Option<&Insert> {
        match self {
            Self::Insert(insert) => Some(insert),
            _ => None,
        }
    }
}

impl From<Insert> for Statement {
    fn from(src: Insert) -> Self {
        Self::Insert(src)
    }
}
