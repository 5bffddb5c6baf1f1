mod value;
use value::Value;

use marquee_core::{
    driver::Response,
    stmt::{Bindings, Record},
    Error, Result,
};
use rusqlite::Connection as RusqliteConnection;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Parses a `sqlite:` connection URL.
    ///
    /// Accepts `sqlite::memory:`, `sqlite:<path>` and `sqlite://<path>`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        let path = match url.host_str() {
            Some(host) => format!("{host}{}", url.path()),
            None => url.path().to_string(),
        };

        if path == ":memory:" {
            Ok(Self::InMemory)
        } else if path.is_empty() {
            Err(Error::invalid_connection_url(format!(
                "connection URL is missing a database path; url={url_str}"
            )))
        } else {
            Ok(Self::File(PathBuf::from(path)))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    pub fn url(&self) -> String {
        match self {
            Sqlite::InMemory => "sqlite::memory:".to_string(),
            Sqlite::File(path) => format!("sqlite:{}", path.display()),
        }
    }

    pub fn connect(&self) -> Result<Connection> {
        match self {
            Sqlite::File(path) => Connection::open(path),
            Sqlite::InMemory => Connection::in_memory(),
        }
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Self { connection })
    }
}

impl marquee_core::Connection for Connection {
    fn exec(&mut self, sql: &str, bindings: &Bindings) -> Result<Response> {
        let mut stmt = self
            .connection
            .prepare(sql)
            .map_err(Error::driver_operation_failed)?;

        // Bind by name. Bindings the statement never references are skipped.
        for index in 1..=stmt.parameter_count() {
            let Some(name) = stmt.parameter_name(index).map(str::to_string) else {
                return Err(Error::invalid_statement(format!(
                    "positional parameter {index} is not supported; use named placeholders"
                )));
            };

            let Some(value) = bindings.get(&name) else {
                return Err(Error::invalid_statement(format!(
                    "placeholder `{name}` is not bound"
                )));
            };

            stmt.raw_bind_parameter(index, Value(value))
                .map_err(Error::driver_operation_failed)?;
        }

        if stmt.column_count() == 0 {
            let count = stmt.raw_execute().map_err(Error::driver_operation_failed)?;
            tracing::debug!(sql, count, "executed statement");
            return Ok(Response::count(count as u64));
        }

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt.raw_query();
        let mut ret = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut record = Record::new();

                    for (index, column) in columns.iter().enumerate() {
                        let value = row
                            .get_ref(index)
                            .map_err(Error::driver_operation_failed)?;
                        record.insert(column.as_str(), Value::from_sql(column, value)?);
                    }

                    ret.push(record);
                }
                Ok(None) => break,
                Err(err) => return Err(Error::driver_operation_failed(err)),
            }
        }

        tracing::debug!(sql, rows = ret.len(), "fetched rows");
        Ok(Response::values(ret))
    }

    fn last_insert_id(&self) -> Result<i64> {
        Ok(self.connection.last_insert_rowid())
    }

    fn exec_batch(&mut self, sql: &str) -> Result<()> {
        self.connection
            .execute_batch(sql)
            .map_err(Error::driver_operation_failed)
    }
}
