//! Query templates for the movie catalog.
//!
//! Each submodule owns one resource: its selectable columns, the base SELECT
//! it is read through, and the handful of writes the catalog performs. Rows
//! are soft-deleted (`is_deleted = TRUE`) and every read filters them out.

pub mod country;
pub mod genre;
pub mod movie;
pub mod person;

use crate::{
    stmt::{Bindings, Condition, ConditionGroup, Delete, Record, Select, Update, Value},
    Db, Error, Result,
};

use indexmap::IndexSet;

/// Columns of `table` aliased as `<table>_<column>`.
fn aliased<'a>(table: &'a str, columns: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
    columns
        .iter()
        .map(move |column| format!("{table}.{column} AS {table}_{column}"))
}

/// Result column names produced by [`aliased`].
fn prefixed<'a>(table: &'a str, columns: &'a [&'a str]) -> impl Iterator<Item = String> + 'a {
    columns.iter().map(move |column| format!("{table}_{column}"))
}

/// The optional, OR-combined search terms of an index query.
#[derive(Debug)]
struct Search {
    terms: ConditionGroup,
    bindings: Vec<(String, Value)>,
}

impl Search {
    fn new() -> Search {
        Search {
            terms: ConditionGroup::or(),
            bindings: vec![],
        }
    }

    /// Matches rows where `column` contains `term`. Empty terms are ignored.
    fn contains(self, column: &str, term: Option<&str>) -> Search {
        match term {
            Some(term) if !term.is_empty() => self.term(column, "LIKE", format!("%{term}%")),
            _ => self,
        }
    }

    /// Matches rows where `column` equals `term`. Empty terms are ignored.
    fn equals(self, column: &str, term: Option<&str>) -> Search {
        match term {
            Some(term) if !term.is_empty() => self.term(column, "=", term),
            _ => self,
        }
    }

    fn term(mut self, column: &str, op: &str, value: impl Into<Value>) -> Search {
        let name = column.rsplit('.').next().unwrap_or(column);
        let placeholder = format!(":{name}");

        self.terms.push(format!("{column} {op} {placeholder}"));
        self.bindings.push((placeholder, value.into()));
        self
    }

    /// Applies the search, followed by `guard`, to `select`.
    fn apply(self, select: Select, guard: &str) -> Select {
        self.bindings
            .into_iter()
            .fold(select.filter(self.terms).filter(guard), |select, (placeholder, value)| {
                select.bind(placeholder, value)
            })
    }
}

/// A required OR group, such as the set of links a relation write touches.
///
/// Unlike [`Search`], every term carries its own numbered placeholders.
#[derive(Debug)]
struct AnyOf {
    terms: ConditionGroup,
    bindings: Bindings,
}

impl AnyOf {
    fn new() -> AnyOf {
        AnyOf {
            terms: ConditionGroup::or(),
            bindings: Bindings::new(),
        }
    }

    /// One `<column> <op> :<name>_<n>` term per value.
    fn each<V: Into<Value>>(
        column: &str,
        op: &str,
        name: &str,
        values: impl IntoIterator<Item = V>,
    ) -> AnyOf {
        let mut any = AnyOf::new();

        for (index, value) in values.into_iter().enumerate() {
            let placeholder = format!(":{name}_{}", index + 1);
            any.push(
                format!("{column} {op} {placeholder}"),
                [(placeholder, value.into())],
            );
        }

        any
    }

    fn push(&mut self, term: impl Into<Condition>, bindings: impl IntoIterator<Item = (String, Value)>) {
        self.terms.push(term);
        for (placeholder, value) in bindings {
            self.bindings.insert(placeholder, value);
        }
    }

    fn select(self, mut select: Select) -> Select {
        select.bindings.extend_from(&self.bindings);
        select.filter(self.terms)
    }

    fn delete(self, mut delete: Delete) -> Delete {
        delete.bindings.extend_from(&self.bindings);
        delete.filter(self.terms)
    }
}

/// Trimmed, non-empty values in first-seen order without duplicates.
fn distinct<S: AsRef<str>>(values: &[S]) -> IndexSet<&str> {
    values
        .iter()
        .map(|value| value.as_ref().trim())
        .filter(|value| !value.is_empty())
        .collect()
}

/// The integer `column` of a fetched row.
fn id_of(row: &Record, column: &str) -> Result<i64> {
    row.get(column)
        .and_then(Value::as_i64)
        .ok_or_else(|| Error::invalid_result(format!("expected an integer `{column}` column")))
}

/// Fails with a record-not-found error unless `table` holds a live row `id`.
fn ensure_exists(db: &mut Db, table: &str, id: i64) -> Result<()> {
    let stmt = Select::new(table)
        .columns(["id"])
        .filter("is_deleted = FALSE")
        .filter("id = :id")
        .bind(":id", id);

    match db.first(stmt)? {
        Some(_) => Ok(()),
        None => Err(Error::record_not_found(format!("table={table}; id={id}"))),
    }
}

/// Updates the live row `id` of `table`, returning the affected row count.
fn update(db: &mut Db, table: &str, id: i64, values: Record) -> Result<u64> {
    ensure_exists(db, table, id)?;

    let stmt = Update::new(table)
        .values(values)
        .filter("id = :id")
        .filter("is_deleted = FALSE")
        .bind(":id", id);

    db.count(stmt)
}

/// Marks the live row `id` of `table` as deleted.
fn soft_delete(db: &mut Db, table: &str, id: i64) -> Result<u64> {
    ensure_exists(db, table, id)?;

    let stmt = Update::new(table)
        .set("is_deleted", true)
        .filter("id = :id")
        .bind(":id", id);

    db.count(stmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;

    #[test]
    fn aliased_and_prefixed_agree() {
        let aliased: Vec<_> = aliased("genre", &["id", "names"]).collect();
        let prefixed: Vec<_> = prefixed("genre", &["id", "names"]).collect();

        assert_eq!(aliased, ["genre.id AS genre_id", "genre.names AS genre_names"]);
        assert_eq!(prefixed, ["genre_id", "genre_names"]);
    }

    #[test]
    fn any_of_numbers_each_term() {
        let select = AnyOf::each("name", "=", "name", ["France", "Japan"])
            .select(Select::new("country").columns(["id"]).filter("is_deleted = FALSE"));

        let (sql, bindings) = compile(&select.into()).unwrap();
        assert_eq!(
            sql,
            "SELECT id FROM country WHERE (is_deleted = FALSE AND (name = :name_1 OR name = :name_2))"
        );
        assert_eq!(bindings.get(":name_2"), Some(&Value::from("Japan")));
    }

    #[test]
    fn distinct_trims_and_dedupes() {
        let values = distinct(&[" drama", "crime", "", "drama "]);
        assert_eq!(values.into_iter().collect::<Vec<_>>(), ["drama", "crime"]);
    }

    #[test]
    fn empty_search_only_guards() {
        let select = Search::new()
            .contains("name", None)
            .contains("code", Some(""))
            .apply(Select::new("country").columns(["id"]), "is_deleted = FALSE");

        let (sql, bindings) = compile(&select.into()).unwrap();
        assert_eq!(sql, "SELECT id FROM country WHERE (is_deleted = FALSE)");
        assert!(bindings.is_empty());
    }

    #[test]
    fn search_terms_are_or_combined() {
        let select = Search::new()
            .contains("movie.title", Some("heat"))
            .equals("movie.created_at", Some("1995"))
            .apply(Select::new("movie").columns(["movie.id"]), "movie.is_deleted = FALSE");

        let (sql, bindings) = compile(&select.into()).unwrap();
        assert_eq!(
            sql,
            "SELECT movie.id FROM movie WHERE \
             ((movie.title LIKE :title OR movie.created_at = :created_at) AND movie.is_deleted = FALSE)"
        );
        assert_eq!(bindings.get(":title"), Some(&Value::from("%heat%")));
        assert_eq!(bindings.get(":created_at"), Some(&Value::from("1995")));
    }
}
