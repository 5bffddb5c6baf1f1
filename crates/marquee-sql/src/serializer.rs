#[macro_use]
mod fmt;
use fmt::ToSql;

mod condition;
use condition::Filter;

mod delim;
use delim::Comma;

mod params;
use params::Placeholder;

// Statement serializers
mod statement;

use marquee_core::{
    stmt::{Bindings, Condition, Statement},
    Result,
};

use std::collections::HashSet;

/// Compiles statements into SQL text with named placeholders.
///
/// The serializer performs no I/O. Column lists, join clauses and predicates
/// are emitted verbatim; only values go through placeholders.
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer {
    /// Append `;` to compiled statements.
    terminate: bool,
}

struct Formatter<'a> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store generated bindings
    bindings: &'a mut Bindings,

    /// Placeholder names generated so far for the current statement
    generated: HashSet<String>,
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer::default()
    }

    /// Terminates every compiled statement with `;`.
    pub fn terminated(mut self) -> Serializer {
        self.terminate = true;
        self
    }

    /// Serializes `stmt`, writing generated bindings to `bindings`.
    ///
    /// `bindings` is first extended with the statement's own bindings. A
    /// generated placeholder that is already bound is reported as a binding
    /// collision.
    pub fn serialize(&self, stmt: &Statement, bindings: &mut Bindings) -> Result<String> {
        let mut ret = String::new();
        bindings.extend_from(stmt.bindings());

        let mut fmt = Formatter {
            dst: &mut ret,
            bindings,
            generated: HashSet::new(),
        };

        stmt.to_sql(&mut fmt)?;

        if self.terminate {
            ret.push(';');
        }

        tracing::debug!(
            kind = stmt.kind_name(),
            sql = %ret,
            bindings = bindings.len(),
            "compiled statement"
        );

        Ok(ret)
    }
}

/// Compiles `stmt` into SQL text and its complete binding map.
///
/// The returned bindings hold the statement's own bindings followed by the
/// ones generated for inserted or updated values.
pub fn compile(stmt: &Statement) -> Result<(String, Bindings)> {
    let mut bindings = Bindings::new();
    let sql = Serializer::new().serialize(stmt, &mut bindings)?;
    Ok((sql, bindings))
}

/// Renders a WHERE tree to a SQL fragment.
///
/// Groups are always parenthesized; empty predicates and groups are dropped.
/// An all-empty tree renders as the empty string.
pub fn render(condition: &Condition) -> String {
    condition::render(condition)
}
