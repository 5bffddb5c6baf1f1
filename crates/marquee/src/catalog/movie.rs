//! Movies, read together with their roles, countries and genres.
//!
//! A movie is fetched with one SELECT joining every relation. Relation
//! columns are aliased with the related table's name (`person_name`,
//! `genre_names`, ..) and folded back into per-movie lists by [`Grouping`].

use super::{aliased, country, distinct, ensure_exists, genre, id_of, person, prefixed, AnyOf, Search};
use crate::{
    stmt::{Condition, Delete, Insert, Record, Select, Value},
    Db, Entity, Error, Grouping, Relation, Result,
};

use indexmap::IndexSet;
use serde::Deserialize;

/// Selectable movie columns.
pub const COLUMNS: &[&str] = &["id", "title", "description", "length", "created_at"];

/// Optional search terms of [`index`]; set terms are OR-combined.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct MovieFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Release year, matched exactly
    pub created_at: Option<String>,
}

/// The base SELECT of every movie read.
pub fn select_begin() -> Select {
    let columns = COLUMNS
        .iter()
        .map(|column| format!("movie.{column}"))
        .chain(aliased("person", person::COLUMNS))
        .chain(aliased("genre", genre::COLUMNS))
        .chain(aliased("country", country::COLUMNS))
        .chain(["person_movie_role.role AS person_role".to_string()]);

    Select::new("movie")
        .columns(columns)
        .join("LEFT JOIN person_movie_role ON person_movie_role.movie_id = movie.id")
        .join("LEFT JOIN person ON person.id = person_movie_role.person_id")
        .join("LEFT JOIN movie_country ON movie_country.movie_id = movie.id")
        .join("LEFT JOIN country ON country.id = movie_country.country_id")
        .join("LEFT JOIN movie_genre ON movie_genre.movie_id = movie.id")
        .join("LEFT JOIN genre ON genre.id = movie_genre.genre_id")
}

/// Relations collected from [`select_begin`] rows, each identified by the
/// related row's id.
pub fn relations() -> Vec<Relation> {
    vec![
        Relation::new(
            "roles",
            prefixed("person", person::COLUMNS).chain(["person_role".to_string()]),
        ),
        Relation::new("countries", prefixed("country", country::COLUMNS)),
        Relation::new("genres", prefixed("genre", genre::COLUMNS)),
    ]
}

/// Lists live movies matching `filter`.
pub fn index(db: &mut Db, filter: &MovieFilter) -> Result<Vec<Entity>> {
    let overlay = Search::new()
        .contains("movie.title", filter.title.as_deref())
        .contains("movie.description", filter.description.as_deref())
        .equals("movie.created_at", filter.created_at.as_deref())
        .apply(Select::default(), "movie.is_deleted = FALSE")
        .order_by(["movie.id"]);

    let rows = db.all(select_begin().merge(&overlay))?;
    present(rows)
}

/// Fetches the live movie `id` with its relations.
pub fn find(db: &mut Db, id: i64) -> Result<Option<Entity>> {
    let overlay = Select::default()
        .filter("movie.is_deleted = FALSE")
        .filter("movie.id = :movie_id")
        .bind(":movie_id", id);

    let rows = db.all(select_begin().merge(&overlay))?;
    Ok(present(rows)?.into_iter().next())
}

/// Adds a movie, returning its id.
pub fn add(db: &mut Db, values: Record) -> Result<i64> {
    db.insert(Insert::new("movie", values))
}

pub fn update(db: &mut Db, id: i64, values: Record) -> Result<u64> {
    super::update(db, "movie", id, values)
}

pub fn soft_delete(db: &mut Db, id: i64) -> Result<u64> {
    super::soft_delete(db, "movie", id)
}

/// A person credited on a movie, as in `person_movie_role`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Role {
    pub person_id: i64,
    pub role: String,
}

impl Role {
    pub fn new(person_id: i64, role: impl Into<String>) -> Role {
        Role {
            person_id,
            role: role.into(),
        }
    }
}

/// Credits live people on the live movie `id`, returning how many roles were
/// added. Roles the movie already has are skipped.
pub fn add_roles(db: &mut Db, id: i64, roles: &[Role]) -> Result<u64> {
    ensure_exists(db, "movie", id)?;

    let roles: IndexSet<&Role> = roles.iter().filter(|role| !role.role.is_empty()).collect();
    if roles.is_empty() {
        return Ok(0);
    }

    let people: IndexSet<i64> = roles.iter().map(|role| role.person_id).collect();
    let select = AnyOf::each("id", "=", "person_id", people.iter().copied())
        .select(Select::new("person").columns(["id"]).filter("is_deleted = FALSE"));

    let found = db
        .all(select)?
        .iter()
        .map(|row| id_of(row, "id"))
        .collect::<Result<IndexSet<_>>>()?;

    let missing: Vec<String> = people
        .difference(&found)
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(Error::record_not_found(format!(
            "table=person; id={}",
            missing.join(",")
        )));
    }

    let select = any_role(roles.iter().copied()).select(
        Select::new("person_movie_role")
            .columns(["person_id", "role"])
            .filter("movie_id = :movie_id")
            .bind(":movie_id", id),
    );

    let existing = db
        .all(select)?
        .iter()
        .map(|row| {
            let role = row.get("role").and_then(Value::as_str).unwrap_or_default();
            Ok(Role::new(id_of(row, "person_id")?, role))
        })
        .collect::<Result<IndexSet<_>>>()?;

    let records: Vec<Record> = roles
        .into_iter()
        .filter(|role| !existing.contains(*role))
        .map(|role| {
            Record::new()
                .with("person_id", role.person_id)
                .with("movie_id", id)
                .with("role", role.role.as_str())
        })
        .collect();

    link(db, "person_movie_role", records)
}

/// Removes roles from the live movie `id`, returning how many were removed.
pub fn remove_roles(db: &mut Db, id: i64, roles: &[Role]) -> Result<u64> {
    ensure_exists(db, "movie", id)?;

    if roles.is_empty() {
        return Ok(0);
    }

    let delete = any_role(roles).delete(
        Delete::new("person_movie_role")
            .filter("movie_id = :movie_id")
            .bind(":movie_id", id),
    );

    db.count(delete)
}

/// Links the live movie `id` to the live countries named `names`, returning
/// how many links were added. Fails if a name matches no live country.
pub fn add_countries<S: AsRef<str>>(db: &mut Db, id: i64, names: &[S]) -> Result<u64> {
    ensure_exists(db, "movie", id)?;

    let names = distinct(names);
    if names.is_empty() {
        return Ok(0);
    }

    let found = countries_named(db, &names)?;
    let missing: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| !found.iter().any(|(country, _)| country == name))
        .collect();
    if !missing.is_empty() {
        return Err(Error::record_not_found(format!(
            "table=country; name={}",
            missing.join(",")
        )));
    }

    let ids: IndexSet<i64> = found.into_iter().map(|(_, id)| id).collect();
    add_links(db, "movie_country", "country_id", id, ids)
}

/// Unlinks the countries named `names` from the live movie `id`, returning
/// how many links were removed. Unknown names are ignored.
pub fn remove_countries<S: AsRef<str>>(db: &mut Db, id: i64, names: &[S]) -> Result<u64> {
    ensure_exists(db, "movie", id)?;

    let names = distinct(names);
    if names.is_empty() {
        return Ok(0);
    }

    let ids: IndexSet<i64> = countries_named(db, &names)?
        .into_iter()
        .map(|(_, id)| id)
        .collect();
    remove_links(db, "movie_country", "country_id", id, ids)
}

/// Links the live movie `id` to the live genres carrying any of `names`,
/// returning how many links were added. Fails if a name belongs to no live
/// genre.
pub fn add_genres<S: AsRef<str>>(db: &mut Db, id: i64, names: &[S]) -> Result<u64> {
    ensure_exists(db, "movie", id)?;

    let names = distinct(names);
    if names.is_empty() {
        return Ok(0);
    }

    let found = genres_named(db, &names)?;
    let mut ids = IndexSet::new();
    let mut missing = vec![];

    for name in &names {
        let matching: Vec<i64> = found
            .iter()
            .filter(|(names, _)| names.iter().any(|genre| genre.as_str() == Some(*name)))
            .map(|(_, id)| *id)
            .collect();

        if matching.is_empty() {
            missing.push(*name);
        }
        ids.extend(matching);
    }

    if !missing.is_empty() {
        return Err(Error::record_not_found(format!(
            "table=genre; name={}",
            missing.join(",")
        )));
    }

    add_links(db, "movie_genre", "genre_id", id, ids)
}

/// Unlinks the genres carrying any of `names` from the live movie `id`,
/// returning how many links were removed. Unknown names are ignored.
pub fn remove_genres<S: AsRef<str>>(db: &mut Db, id: i64, names: &[S]) -> Result<u64> {
    ensure_exists(db, "movie", id)?;

    let names = distinct(names);
    if names.is_empty() {
        return Ok(0);
    }

    let ids: IndexSet<i64> = genres_named(db, &names)?
        .into_iter()
        .filter(|(genre_names, _)| {
            genre_names
                .iter()
                .any(|genre| genre.as_str().is_some_and(|genre| names.contains(genre)))
        })
        .map(|(_, id)| id)
        .collect();
    remove_links(db, "movie_genre", "genre_id", id, ids)
}

/// `(person_id = :person_id_<n> AND role = :role_<n>)` for each role.
fn any_role<'a>(roles: impl IntoIterator<Item = &'a Role>) -> AnyOf {
    let mut any = AnyOf::new();

    for (index, role) in roles.into_iter().enumerate() {
        let n = index + 1;
        let person_id = format!(":person_id_{n}");
        let role_name = format!(":role_{n}");

        any.push(
            Condition::and([
                format!("person_id = {person_id}"),
                format!("role = {role_name}"),
            ]),
            [
                (person_id, Value::from(role.person_id)),
                (role_name, Value::from(role.role.as_str())),
            ],
        );
    }

    any
}

/// `(name, id)` of the live countries named any of `names`.
fn countries_named(db: &mut Db, names: &IndexSet<&str>) -> Result<Vec<(String, i64)>> {
    let select = AnyOf::each("name", "=", "name", names.iter().copied()).select(
        Select::new("country")
            .columns(["id", "name"])
            .filter("is_deleted = FALSE"),
    );

    db.all(select)?
        .iter()
        .map(|row| {
            let name = row.get("name").and_then(Value::as_str).unwrap_or_default();
            Ok((name.to_string(), id_of(row, "id")?))
        })
        .collect()
}

/// `(names, id)` of the live genres whose JSON `names` may hold any of
/// `names`. The LIKE match is coarse; callers check the decoded names.
fn genres_named(db: &mut Db, names: &IndexSet<&str>) -> Result<Vec<(Vec<Value>, i64)>> {
    let patterns = names.iter().map(|name| format!("%\"{name}\"%"));
    let select = AnyOf::each("names", "LIKE", "genre", patterns).select(
        Select::new("genre")
            .columns(["id", "names"])
            .filter("is_deleted = FALSE"),
    );

    db.all(select)?
        .into_iter()
        .map(|mut row| {
            let id = id_of(&row, "id")?;
            let names = match row.remove("names").map(genre::decode_names).transpose()? {
                Some(Value::List(names)) => names,
                _ => vec![],
            };
            Ok((names, id))
        })
        .collect()
}

/// Inserts the `(movie_id, <column>)` links of `ids` that `table` lacks.
fn add_links(db: &mut Db, table: &str, column: &str, movie_id: i64, ids: IndexSet<i64>) -> Result<u64> {
    let select = AnyOf::each(column, "=", column, ids.iter().copied()).select(
        Select::new(table)
            .columns([column])
            .filter("movie_id = :movie_id")
            .bind(":movie_id", movie_id),
    );

    let existing = db
        .all(select)?
        .iter()
        .map(|row| id_of(row, column))
        .collect::<Result<IndexSet<_>>>()?;

    let records: Vec<Record> = ids
        .difference(&existing)
        .map(|id| Record::new().with("movie_id", movie_id).with(column, *id))
        .collect();

    link(db, table, records)
}

/// Deletes the `(movie_id, <column>)` links of `ids` from `table`.
fn remove_links(db: &mut Db, table: &str, column: &str, movie_id: i64, ids: IndexSet<i64>) -> Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let delete = AnyOf::each(column, "=", column, ids).delete(
        Delete::new(table)
            .filter("movie_id = :movie_id")
            .bind(":movie_id", movie_id),
    );

    db.count(delete)
}

fn link(db: &mut Db, table: &str, records: Vec<Record>) -> Result<u64> {
    if records.is_empty() {
        return Ok(0);
    }

    db.count(Insert::batch(table, records))
}

fn present(rows: Vec<Record>) -> Result<Vec<Entity>> {
    let mut movies = Grouping::new("id").relations(relations()).group(rows);

    for movie in &mut movies {
        movie.update_relation("genres", |tuple| {
            tuple.update("genre_names", genre::decode_names)
        })?;
    }

    Ok(movies)
}
