mod bindings;
pub use bindings::Bindings;

mod condition;
pub use condition::{Condition, ConditionGroup, LogicalOp};

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::{Insert, InsertValues};

mod record;
pub use record::Record;

mod select;
pub use select::Select;

mod update;
pub use update::Update;

mod value;
pub use value::Value;

use crate::{Error, Result};

/// A single SQL statement, described structurally.
///
/// Each variant carries exactly the fields its operation needs. Statements are
/// built per request, compiled to SQL text plus [`Bindings`], and dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(Select),
    Insert(Insert),
    Update(Update),
    Delete(Delete),
}

impl Statement {
    /// Name of the operation kind, as used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Select(_) => "Select",
            Statement::Insert(_) => "Insert",
            Statement::Update(_) => "Update",
            Statement::Delete(_) => "Delete",
        }
    }

    pub fn table(&self) -> &str {
        match self {
            Statement::Select(stmt) => &stmt.table,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
            Statement::Delete(stmt) => &stmt.table,
        }
    }

    /// Bindings supplied by the caller (for placeholders in filters).
    pub fn bindings(&self) -> &Bindings {
        match self {
            Statement::Select(stmt) => &stmt.bindings,
            Statement::Insert(stmt) => &stmt.bindings,
            Statement::Update(stmt) => &stmt.bindings,
            Statement::Delete(stmt) => &stmt.bindings,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Statement::Select(_))
    }

    /// Layers `overlay` on top of `self`, concatenating list-valued fields.
    ///
    /// Both statements must be of the same kind. Neither input is modified.
    pub fn merge(&self, overlay: &Statement) -> Result<Statement> {
        match (self, overlay) {
            (Statement::Select(base), Statement::Select(overlay)) => Ok(base.merge(overlay).into()),
            (Statement::Insert(base), Statement::Insert(overlay)) => Ok(base.merge(overlay).into()),
            (Statement::Update(base), Statement::Update(overlay)) => Ok(base.merge(overlay).into()),
            (Statement::Delete(base), Statement::Delete(overlay)) => Ok(base.merge(overlay).into()),
            (base, overlay) => Err(Error::invalid_statement(format!(
                "cannot merge `{}` into `{}`",
                overlay.kind_name(),
                base.kind_name()
            ))),
        }
    }
}

/// Picks `base` when set, otherwise falls back to `overlay`.
fn first_defined<T: Clone>(base: &Option<T>, overlay: &Option<T>) -> Option<T> {
    base.as_ref().or(overlay.as_ref()).cloned()
}

fn first_table(base: &str, overlay: &str) -> String {
    if base.is_empty() {
        overlay.to_string()
    } else {
        base.to_string()
    }
}
