use super::Search;
use crate::{
    bail,
    stmt::{Insert, Record, Select},
    Db, Result,
};

use serde::Deserialize;

/// Selectable country columns.
pub const COLUMNS: &[&str] = &["id", "name", "code"];

/// Optional search terms of [`index`]; set terms are OR-combined.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CountryFilter {
    pub name: Option<String>,
    pub code: Option<String>,
}

pub fn select_begin() -> Select {
    Select::new("country").columns(COLUMNS.iter().copied())
}

/// Lists live countries matching `filter`.
pub fn index(db: &mut Db, filter: &CountryFilter) -> Result<Vec<Record>> {
    let select = Search::new()
        .contains("name", filter.name.as_deref())
        .contains("code", filter.code.as_deref())
        .apply(select_begin(), "is_deleted = FALSE")
        .order_by(["id"]);

    db.all(select)
}

pub fn find(db: &mut Db, id: i64) -> Result<Option<Record>> {
    let select = select_begin()
        .filter("is_deleted = FALSE")
        .filter("id = :id")
        .bind(":id", id);

    db.first(select)
}

/// Adds a country, returning its id. Names and codes are unique among live
/// countries.
pub fn add(db: &mut Db, name: &str, code: &str) -> Result<i64> {
    let existing = Select::new("country")
        .columns(["id"])
        .filter("is_deleted = FALSE")
        .filter(crate::stmt::Condition::or(["name = :name", "code = :code"]))
        .bind(":name", name)
        .bind(":code", code);

    if db.first(existing)?.is_some() {
        bail!("country already exists; name={name}; code={code}");
    }

    let record = Record::new().with("name", name).with("code", code);
    db.insert(Insert::new("country", record))
}

pub fn update(db: &mut Db, id: i64, values: Record) -> Result<u64> {
    super::update(db, "country", id, values)
}

pub fn soft_delete(db: &mut Db, id: i64) -> Result<u64> {
    super::soft_delete(db, "country", id)
}
