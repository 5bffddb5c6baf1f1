mod response;
pub use response::{Response, Rows};

use crate::{stmt::Bindings, Result};

use std::fmt::Debug;

/// A statement-execution service.
///
/// A connection runs one compiled statement at a time, synchronously. Each
/// call either completes fully or returns an error; failures such as
/// constraint violations or lost connectivity are reported as `Err`, never as
/// an empty result.
pub trait Connection: Debug + Send {
    /// Executes `sql` with the given named bindings.
    ///
    /// Statements that produce a result set return [`Rows::Values`]; all
    /// others return the number of affected rows as [`Rows::Count`].
    fn exec(&mut self, sql: &str, bindings: &Bindings) -> Result<Response>;

    /// Identifier generated by the most recent successful insert on this
    /// connection.
    fn last_insert_id(&self) -> Result<i64>;

    /// Runs a sequence of unparameterized statements, such as a schema
    /// script.
    fn exec_batch(&mut self, sql: &str) -> Result<()>;
}
