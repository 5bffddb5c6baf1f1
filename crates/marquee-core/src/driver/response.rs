use crate::{stmt::Record, Error, Result};

#[derive(Debug)]
pub struct Response {
    pub rows: Rows,
}

#[derive(Debug)]
pub enum Rows {
    /// Number of rows impacted by the operation
    Count(u64),

    /// Operation result, one record per row
    Values(Vec<Record>),
}

impl Response {
    pub fn count(count: u64) -> Self {
        Self {
            rows: Rows::Count(count),
        }
    }

    pub fn values(values: Vec<Record>) -> Self {
        Self {
            rows: Rows::Values(values),
        }
    }

    pub fn into_count(self) -> Result<u64> {
        self.rows.into_count()
    }

    pub fn into_values(self) -> Result<Vec<Record>> {
        self.rows.into_values()
    }

    /// Returns the first row, if any.
    pub fn into_first(self) -> Result<Option<Record>> {
        Ok(self.rows.into_values()?.into_iter().next())
    }
}

impl Rows {
    pub fn into_count(self) -> Result<u64> {
        match self {
            Rows::Count(count) => Ok(count),
            Rows::Values(values) => Err(Error::invalid_result(format!(
                "expected an affected-row count, got {} rows",
                values.len()
            ))),
        }
    }

    pub fn into_values(self) -> Result<Vec<Record>> {
        match self {
            Self::Values(values) => Ok(values),
            Self::Count(count) => Err(Error::invalid_result(format!(
                "expected rows, got an affected-row count of {count}"
            ))),
        }
    }
}
