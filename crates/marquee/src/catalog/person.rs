//! People, read together with the movies they are credited on.

use super::{aliased, movie, prefixed, Search};
use crate::{
    stmt::{Record, Select},
    Db, Entity, Grouping, Relation, Result,
};

use serde::Deserialize;

/// Selectable person columns.
pub const COLUMNS: &[&str] = &[
    "id",
    "name",
    "surname",
    "pseudo",
    "country_id",
    "description",
    "birth",
    "death",
];

/// Optional search terms of [`index`]; set terms are OR-combined.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PersonFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub pseudo: Option<String>,
}

/// The base SELECT of every person read. Roles on deleted movies join with
/// null movie columns.
pub fn select_begin() -> Select {
    let columns = COLUMNS
        .iter()
        .map(|column| format!("person.{column}"))
        .chain([
            "person_movie_role.role AS movie_role".to_string(),
            "country.name AS country".to_string(),
        ])
        .chain(aliased("movie", movie::COLUMNS));

    Select::new("person")
        .columns(columns)
        .join("LEFT JOIN person_movie_role ON person_movie_role.person_id = person.id")
        .join("LEFT JOIN movie ON movie.id = person_movie_role.movie_id AND movie.is_deleted = FALSE")
        .join("LEFT JOIN country ON country.id = person.country_id")
}

/// The `roles` relation, identified by `movie_id`.
pub fn relations() -> Vec<Relation> {
    vec![Relation::new(
        "roles",
        prefixed("movie", movie::COLUMNS).chain(["movie_role".to_string()]),
    )]
}

/// Lists live people matching `filter`.
pub fn index(db: &mut Db, filter: &PersonFilter) -> Result<Vec<Entity>> {
    let overlay = Search::new()
        .contains("person.name", filter.name.as_deref())
        .contains("person.surname", filter.surname.as_deref())
        .contains("person.pseudo", filter.pseudo.as_deref())
        .apply(Select::default(), "person.is_deleted = FALSE")
        .order_by(["person.id"]);

    let rows = db.all(select_begin().merge(&overlay))?;
    Ok(present(rows))
}

pub fn find(db: &mut Db, id: i64) -> Result<Option<Entity>> {
    let overlay = Select::default()
        .filter("person.is_deleted = FALSE")
        .filter("person.id = :person_id")
        .bind(":person_id", id);

    let rows = db.all(select_begin().merge(&overlay))?;
    Ok(present(rows).into_iter().next())
}

fn present(rows: Vec<Record>) -> Vec<Entity> {
    Grouping::new("id").relations(relations()).group(rows)
}
