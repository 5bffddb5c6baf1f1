#![allow(dead_code)]

use marquee::{
    stmt::{Insert, Record},
    Db,
};

pub const SCHEMA: &str = include_str!("schema.sql");

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An in-memory database with the catalog schema and no rows.
pub fn empty_db() -> Db {
    init_tracing();

    let mut db = Db::connect("sqlite::memory:").unwrap();
    db.execute_script(SCHEMA).unwrap();
    db
}

/// An in-memory catalog:
///
/// - movie 1 "Heat" (1995): two roles, one country, two genres
/// - movie 2 "Amelie" (2001): no relations
/// - movie 3 "Lost Reel": deleted
pub fn seeded_db() -> Db {
    let mut db = empty_db();

    insert(&mut db, "country", [("name", "United States"), ("code", "US")]);
    insert(&mut db, "country", [("name", "France"), ("code", "FR")]);

    insert(&mut db, "person", [("name", "Al"), ("surname", "Pacino")]);
    insert(&mut db, "person", [("name", "Robert"), ("surname", "De Niro")]);

    insert(
        &mut db,
        "genre",
        [("names", r#"["crime","thriller"]"#), ("description", "Heists")],
    );
    insert(&mut db, "genre", [("names", r#"["drama"]"#), ("description", "")]);

    insert(
        &mut db,
        "movie",
        [("title", "Heat"), ("length", "02:50:00"), ("created_at", "1995")],
    );
    insert(
        &mut db,
        "movie",
        [("title", "Amelie"), ("length", "02:02:00"), ("created_at", "2001")],
    );
    insert(&mut db, "movie", [("title", "Lost Reel"), ("created_at", "1920")]);

    db.execute_script(
        "UPDATE movie SET is_deleted = TRUE WHERE id = 3;
         INSERT INTO person_movie_role (person_id, movie_id, role) VALUES (1, 1, 'actor'), (2, 1, 'actor');
         INSERT INTO movie_country (movie_id, country_id) VALUES (1, 1);
         INSERT INTO movie_genre (movie_id, genre_id) VALUES (1, 1), (1, 2);",
    )
    .unwrap();

    db
}

pub fn insert<const N: usize>(db: &mut Db, table: &str, fields: [(&str, &str); N]) -> i64 {
    let record: Record = fields.into_iter().collect();
    db.insert(Insert::new(table, record)).unwrap()
}
