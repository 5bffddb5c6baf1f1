use super::Entity;
use crate::stmt::Record;

/// A named group of row columns describing one related sub-entity.
///
/// ```
/// use marquee_core::Relation;
///
/// let roles = Relation::new("roles", ["person_id", "person_first_name", "person_role"])
///     .strip_prefix("person_");
/// assert_eq!(roles.identity(), "person_id");
/// ```
#[derive(Debug, Clone)]
pub struct Relation {
    name: String,
    columns: Vec<String>,

    /// Column that must be non-null for a tuple to be kept. Defaults to the
    /// first column.
    identity: Option<String>,

    /// Prefix removed from sub-record column names once compacted
    prefix: Option<String>,
}

impl Relation {
    pub fn new<I>(name: impl Into<String>, columns: I) -> Relation
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Relation {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            identity: None,
            prefix: None,
        }
    }

    pub fn identified_by(mut self, column: impl Into<String>) -> Relation {
        self.identity = Some(column.into());
        self
    }

    pub fn strip_prefix(mut self, prefix: impl Into<String>) -> Relation {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn identity(&self) -> &str {
        match &self.identity {
            Some(identity) => identity,
            None => self.columns.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Removes this relation's columns from `row`.
    ///
    /// Returns `None` when the row carries none of them.
    pub(super) fn extract(&self, row: &mut Record) -> Option<Record> {
        let tuple = row.take(&self.columns);

        if tuple.is_empty() {
            tracing::trace!(relation = %self.name, "row carries no relation columns");
            return None;
        }

        Some(tuple)
    }

    /// Drops left join placeholders and duplicates, then renames columns.
    pub(super) fn compact(&self, entity: &mut Entity) {
        let Some(tuples) = entity.relation_mut(&self.name) else {
            return;
        };

        let identity = self.identity();
        let mut kept: Vec<Record> = Vec::with_capacity(tuples.len());

        for tuple in tuples.drain(..) {
            let present = tuple.get(identity).is_some_and(|value| !value.is_null());

            if present && !kept.contains(&tuple) {
                kept.push(tuple);
            }
        }

        if let Some(prefix) = &self.prefix {
            kept = kept
                .into_iter()
                .map(|tuple| tuple.strip_prefix(prefix))
                .collect();
        }

        *tuples = kept;
    }
}
