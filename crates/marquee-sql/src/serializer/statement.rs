use super::{Comma, Filter, Formatter, Placeholder, ToSql};

use marquee_core::{
    stmt::{self, InsertValues},
    Error, Result,
};

fn require_table(kind: &str, table: &str) -> Result<()> {
    if table.trim().is_empty() {
        return Err(Error::invalid_statement(format!(
            "`{kind}` requires a table"
        )));
    }
    Ok(())
}

impl ToSql for &stmt::Statement {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        match self {
            stmt::Statement::Select(stmt) => stmt.to_sql(f),
            stmt::Statement::Insert(stmt) => stmt.to_sql(f),
            stmt::Statement::Update(stmt) => stmt.to_sql(f),
            stmt::Statement::Delete(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::Select {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        require_table("Select", &self.table)?;

        if self.columns.is_empty() {
            return Err(Error::invalid_statement(
                "`Select` requires at least one column",
            ));
        }

        let table = &self.table;
        let columns = Comma(&self.columns);
        fmt!(f, "SELECT " columns " FROM " table);

        for join in &self.joins {
            fmt!(f, " " join);
        }

        let filter = Filter {
            filter: &self.filter,
            order_by: self.order_by.as_deref(),
            limit: self.limit,
        };

        fmt!(f, filter);
        Ok(())
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        require_table("Insert", &self.table)?;

        let Some(first) = self.values.records().next() else {
            return Err(Error::invalid_statement(
                "`Insert` requires at least one record",
            ));
        };

        if first.is_empty() {
            return Err(Error::invalid_statement(
                "`Insert` requires at least one column",
            ));
        }

        if let Some(index) = self
            .values
            .records()
            .position(|record| !record.same_columns(first))
        {
            return Err(Error::invalid_statement(format!(
                "`Insert` record {} does not have the same columns as record 1",
                index + 1
            )));
        }

        let table = &self.table;
        let columns = Comma(first.columns());
        fmt!(f, "INSERT INTO " table " (" columns ") VALUES ");

        let batch = matches!(self.values, InsertValues::Batch(_));

        for (index, record) in self.values.records().enumerate() {
            let suffix = batch.then_some(index + 1);

            let placeholders = record
                .iter()
                .map(|(column, value)| {
                    Placeholder::for_column(column, suffix).bind(f, value)
                })
                .collect::<Result<Vec<_>>>()?;

            if index > 0 {
                fmt!(f, ",");
            }

            fmt!(f, "(" Comma(&placeholders) ")");
        }

        Ok(())
    }
}

impl ToSql for &stmt::Update {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        require_table("Update", &self.table)?;

        if self.values.is_empty() {
            return Err(Error::invalid_statement(
                "`Update` requires at least one assignment",
            ));
        }

        let table = &self.table;
        fmt!(f, "UPDATE " table " SET ");

        for (index, (column, value)) in self.values.iter().enumerate() {
            let placeholder = Placeholder::for_column(column, Some(index + 1)).bind(f, value)?;

            if index > 0 {
                fmt!(f, ",");
            }

            let placeholder = &placeholder;
            fmt!(f, column " = " placeholder);
        }

        let filter = Filter {
            filter: &self.filter,
            order_by: self.order_by.as_deref(),
            limit: self.limit,
        };

        fmt!(f, filter);
        Ok(())
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        require_table("Delete", &self.table)?;

        let filter = Filter {
            filter: &self.filter,
            order_by: self.order_by.as_deref(),
            limit: self.limit,
        };

        let table = &self.table;
        fmt!(f, "DELETE FROM " table filter);
        Ok(())
    }
}
