mod builder;
pub use builder::{Builder, DATABASE_URL, DEFAULT_URL};

mod connect;
pub use connect::Connect;

use crate::{
    driver::Response,
    stmt::{Bindings, Insert, Record},
    Connection, Error, Result, Serializer, Statement,
};

/// A database handle.
///
/// Statements are compiled with a [`Serializer`] and run on a single
/// connection, one at a time.
#[derive(Debug)]
pub struct Db {
    connection: Box<dyn Connection>,
    serializer: Serializer,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn connect(url: &str) -> Result<Db> {
        Db::builder().url(url).connect()
    }

    /// Compiles and runs a statement.
    pub fn exec(&mut self, stmt: impl Into<Statement>) -> Result<Response> {
        let stmt = stmt.into();
        let mut bindings = Bindings::new();
        let sql = self.serializer.serialize(&stmt, &mut bindings)?;
        self.connection.exec(&sql, &bindings)
    }

    /// Execute a query, returning all matching records
    pub fn all(&mut self, stmt: impl Into<Statement>) -> Result<Vec<Record>> {
        self.exec(stmt)?.into_values()
    }

    pub fn first(&mut self, stmt: impl Into<Statement>) -> Result<Option<Record>> {
        self.exec(stmt)?.into_first()
    }

    /// Like [`Db::first`], failing with a record-not-found error when the
    /// query matches nothing.
    pub fn get(&mut self, stmt: impl Into<Statement>) -> Result<Record> {
        let stmt = stmt.into();
        let table = stmt.table().to_string();

        match self.first(stmt)? {
            Some(record) => Ok(record),
            None => Err(Error::record_not_found(format!(
                "query returned no results; table={table}"
            ))),
        }
    }

    /// Runs a statement, returning the number of affected rows.
    pub fn count(&mut self, stmt: impl Into<Statement>) -> Result<u64> {
        self.exec(stmt)?.into_count()
    }

    /// Runs an insert, returning the identifier of the last inserted row.
    pub fn insert(&mut self, stmt: Insert) -> Result<i64> {
        self.count(stmt)?;
        self.connection.last_insert_id()
    }

    /// Runs unparameterized SQL, such as a schema script.
    pub fn execute_script(&mut self, sql: &str) -> Result<()> {
        self.connection.exec_batch(sql)
    }
}
