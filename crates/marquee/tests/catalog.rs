mod support;

use marquee::{
    catalog::{
        country::{self, CountryFilter},
        genre::{self, GenreFilter},
        movie::{self, MovieFilter, Role},
        person::{self, PersonFilter},
    },
    stmt::{Record, Value},
    Entity,
};
use pretty_assertions::assert_eq;
use support::seeded_db;

fn ids(entities: &[Entity]) -> Vec<i64> {
    entities
        .iter()
        .filter_map(|entity| entity.get("id").and_then(Value::as_i64))
        .collect()
}

fn sorted_column(tuples: &[Record], column: &str) -> Vec<i64> {
    let mut values: Vec<i64> = tuples
        .iter()
        .filter_map(|tuple| tuple.get(column).and_then(Value::as_i64))
        .collect();
    values.sort();
    values
}

#[test]
fn movie_index_groups_joined_rows() {
    let mut db = seeded_db();

    let movies = movie::index(&mut db, &MovieFilter::default()).unwrap();
    assert_eq!(ids(&movies), [1, 2]);

    let heat = &movies[0];
    assert_eq!(heat.get("title"), Some(&Value::from("Heat")));
    assert_eq!(heat.get("created_at"), Some(&Value::from("1995")));
    assert!(heat.get("person_name").is_none());

    let roles = heat.relation("roles").unwrap();
    assert_eq!(sorted_column(roles, "person_id"), [1, 2]);
    assert!(roles
        .iter()
        .all(|role| role.get("person_role") == Some(&Value::from("actor"))));

    let countries = heat.relation("countries").unwrap();
    assert_eq!(
        countries,
        [Record::new()
            .with("country_id", 1)
            .with("country_name", "United States")
            .with("country_code", "US")]
    );

    let genres = heat.relation("genres").unwrap();
    assert_eq!(sorted_column(genres, "genre_id"), [1, 2]);

    let crime = genres
        .iter()
        .find(|genre| genre.get("genre_id") == Some(&Value::I64(1)))
        .unwrap();
    assert_eq!(
        crime.get("genre_names"),
        Some(&Value::from(vec!["crime", "thriller"]))
    );
}

#[test]
fn movie_without_relations_has_empty_lists() {
    let mut db = seeded_db();

    let amelie = movie::find(&mut db, 2).unwrap().unwrap();

    assert_eq!(amelie.get("title"), Some(&Value::from("Amelie")));
    for name in ["roles", "countries", "genres"] {
        assert_eq!(amelie.relation(name), Some(&[][..]), "relation={name}");
    }
}

#[test]
fn movie_index_filters_are_or_combined() {
    let mut db = seeded_db();

    let filter = MovieFilter {
        title: Some("ea".to_string()),
        ..MovieFilter::default()
    };
    assert_eq!(ids(&movie::index(&mut db, &filter).unwrap()), [1]);

    let filter = MovieFilter {
        title: Some("ea".to_string()),
        created_at: Some("2001".to_string()),
        ..MovieFilter::default()
    };
    assert_eq!(ids(&movie::index(&mut db, &filter).unwrap()), [1, 2]);

    // Deleted movies never match
    let filter = MovieFilter {
        title: Some("Lost".to_string()),
        ..MovieFilter::default()
    };
    assert!(movie::index(&mut db, &filter).unwrap().is_empty());
}

#[test]
fn movie_find_skips_deleted_and_missing() {
    let mut db = seeded_db();

    assert!(movie::find(&mut db, 3).unwrap().is_none());
    assert!(movie::find(&mut db, 99).unwrap().is_none());
}

#[test]
fn movie_serializes_with_nested_relations() {
    let mut db = seeded_db();

    let heat = movie::find(&mut db, 1).unwrap().unwrap();
    let json = serde_json::to_value(&heat).unwrap();

    assert_eq!(json["id"], 1);
    assert_eq!(json["countries"][0]["country_code"], "US");
    assert_eq!(json["roles"].as_array().map(Vec::len), Some(2));
    assert!(json["genres"][0]["genre_names"].is_array());
}

#[test]
fn movie_add_update_and_soft_delete() {
    let mut db = seeded_db();

    let id = movie::add(
        &mut db,
        Record::new().with("title", "Ronin").with("created_at", "1998"),
    )
    .unwrap();
    assert_eq!(id, 4);

    let updated = movie::update(&mut db, id, Record::new().with("length", "02:02:00")).unwrap();
    assert_eq!(updated, 1);

    let ronin = movie::find(&mut db, id).unwrap().unwrap();
    assert_eq!(ronin.get("length"), Some(&Value::from("02:02:00")));

    assert_eq!(movie::soft_delete(&mut db, id).unwrap(), 1);
    assert!(movie::find(&mut db, id).unwrap().is_none());

    let err = movie::soft_delete(&mut db, id).unwrap_err();
    assert!(err.is_record_not_found());
}

#[test]
fn movie_update_of_deleted_movie_is_not_found() {
    let mut db = seeded_db();

    let err = movie::update(&mut db, 3, Record::new().with("title", "Found")).unwrap_err();
    assert!(err.is_record_not_found());
    assert_eq!(err.to_string(), "record not found: table=movie; id=3");
}

#[test]
fn country_index_and_find() {
    let mut db = seeded_db();

    let all = country::index(&mut db, &CountryFilter::default()).unwrap();
    assert_eq!(all.len(), 2);

    let filter = CountryFilter {
        name: Some("ran".to_string()),
        code: None,
    };
    assert_eq!(
        country::index(&mut db, &filter).unwrap(),
        vec![Record::new()
            .with("id", 2)
            .with("name", "France")
            .with("code", "FR")]
    );

    let found = country::find(&mut db, 1).unwrap().unwrap();
    assert_eq!(found.get("code"), Some(&Value::from("US")));
}

#[test]
fn country_add_rejects_duplicates() {
    let mut db = seeded_db();

    let id = country::add(&mut db, "Japan", "JP").unwrap();
    assert_eq!(id, 3);

    let err = country::add(&mut db, "Nippon", "JP").unwrap_err();
    assert!(!err.is_record_not_found());
    assert!(err.to_string().contains("country already exists"));
}

#[test]
fn country_soft_delete_hides_it() {
    let mut db = seeded_db();

    assert_eq!(country::soft_delete(&mut db, 2).unwrap(), 1);
    assert!(country::find(&mut db, 2).unwrap().is_none());

    // Name is free again once the country is deleted
    assert!(country::add(&mut db, "France", "FR").is_ok());
}

#[test]
fn genre_index_decodes_names() {
    let mut db = seeded_db();

    let filter = GenreFilter {
        names: Some("drama".to_string()),
        description: None,
    };
    let genres = genre::index(&mut db, &filter).unwrap();

    assert_eq!(
        genres,
        vec![Record::new()
            .with("id", 2)
            .with("names", vec!["drama"])
            .with("description", "")]
    );
}

#[test]
fn movie_add_roles_skips_existing_roles() {
    let mut db = seeded_db();

    let roles = [
        Role::new(1, "actor"),
        Role::new(2, "director"),
        Role::new(1, "actor"),
    ];
    assert_eq!(movie::add_roles(&mut db, 2, &roles).unwrap(), 2);
    assert_eq!(movie::add_roles(&mut db, 2, &roles).unwrap(), 0);

    let amelie = movie::find(&mut db, 2).unwrap().unwrap();
    let roles = amelie.relation("roles").unwrap();
    assert_eq!(sorted_column(roles, "person_id"), [1, 2]);
    assert!(roles.iter().any(|role| {
        role.get("person_id") == Some(&Value::I64(2))
            && role.get("person_role") == Some(&Value::from("director"))
    }));
}

#[test]
fn movie_add_roles_requires_live_people_and_movie() {
    let mut db = seeded_db();

    let err = movie::add_roles(&mut db, 2, &[Role::new(1, "actor"), Role::new(99, "actor")])
        .unwrap_err();
    assert!(err.is_record_not_found());
    assert_eq!(err.to_string(), "record not found: table=person; id=99");

    // Nothing is linked when one person is missing
    let amelie = movie::find(&mut db, 2).unwrap().unwrap();
    assert_eq!(amelie.relation("roles"), Some(&[][..]));

    let err = movie::add_roles(&mut db, 3, &[Role::new(1, "actor")]).unwrap_err();
    assert_eq!(err.to_string(), "record not found: table=movie; id=3");
}

#[test]
fn movie_remove_roles_matches_person_and_role() {
    let mut db = seeded_db();

    let removed = movie::remove_roles(
        &mut db,
        1,
        &[Role::new(1, "actor"), Role::new(2, "director")],
    )
    .unwrap();
    assert_eq!(removed, 1);

    let heat = movie::find(&mut db, 1).unwrap().unwrap();
    assert_eq!(sorted_column(heat.relation("roles").unwrap(), "person_id"), [2]);
}

#[test]
fn movie_add_and_remove_countries() {
    let mut db = seeded_db();

    let added = movie::add_countries(&mut db, 1, &["France", "United States", " France"]).unwrap();
    assert_eq!(added, 1);
    assert_eq!(movie::add_countries(&mut db, 1, &[""]).unwrap(), 0);

    let heat = movie::find(&mut db, 1).unwrap().unwrap();
    assert_eq!(
        sorted_column(heat.relation("countries").unwrap(), "country_id"),
        [1, 2]
    );

    let err = movie::add_countries(&mut db, 1, &["Atlantis"]).unwrap_err();
    assert!(err.is_record_not_found());
    assert_eq!(err.to_string(), "record not found: table=country; name=Atlantis");

    let removed = movie::remove_countries(&mut db, 1, &["United States", "Atlantis"]).unwrap();
    assert_eq!(removed, 1);

    let heat = movie::find(&mut db, 1).unwrap().unwrap();
    assert_eq!(
        sorted_column(heat.relation("countries").unwrap(), "country_id"),
        [2]
    );
}

#[test]
fn movie_add_genres_matches_any_genre_name() {
    let mut db = seeded_db();

    assert_eq!(movie::add_genres(&mut db, 2, &["thriller", "drama"]).unwrap(), 2);

    // Genre 1 is already linked through "thriller"
    assert_eq!(movie::add_genres(&mut db, 2, &["crime"]).unwrap(), 0);

    let amelie = movie::find(&mut db, 2).unwrap().unwrap();
    assert_eq!(
        sorted_column(amelie.relation("genres").unwrap(), "genre_id"),
        [1, 2]
    );

    // Partial names do not match
    let err = movie::add_genres(&mut db, 2, &["dram"]).unwrap_err();
    assert_eq!(err.to_string(), "record not found: table=genre; name=dram");
}

#[test]
fn movie_remove_genres_by_name() {
    let mut db = seeded_db();

    assert_eq!(movie::remove_genres(&mut db, 1, &["crime", "western"]).unwrap(), 1);

    let heat = movie::find(&mut db, 1).unwrap().unwrap();
    assert_eq!(sorted_column(heat.relation("genres").unwrap(), "genre_id"), [2]);
}

#[test]
fn person_index_groups_roles_by_movie() {
    let mut db = seeded_db();

    let people = person::index(&mut db, &PersonFilter::default()).unwrap();
    assert_eq!(ids(&people), [1, 2]);

    let pacino = &people[0];
    assert_eq!(pacino.get("surname"), Some(&Value::from("Pacino")));
    assert_eq!(pacino.get("country"), Some(&Value::Null));

    let roles = pacino.relation("roles").unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].get("movie_id"), Some(&Value::I64(1)));
    assert_eq!(roles[0].get("movie_title"), Some(&Value::from("Heat")));
    assert_eq!(roles[0].get("movie_role"), Some(&Value::from("actor")));

    let filter = PersonFilter {
        surname: Some("Niro".to_string()),
        ..PersonFilter::default()
    };
    assert_eq!(ids(&person::index(&mut db, &filter).unwrap()), [2]);
}

#[test]
fn person_find_drops_roles_on_deleted_movies() {
    let mut db = seeded_db();

    db.execute_script(
        "INSERT INTO person_movie_role (person_id, movie_id, role) VALUES (1, 3, 'extra');
         UPDATE person SET country_id = 1 WHERE id = 1;",
    )
    .unwrap();

    let pacino = person::find(&mut db, 1).unwrap().unwrap();
    assert_eq!(pacino.get("country"), Some(&Value::from("United States")));
    assert_eq!(sorted_column(pacino.relation("roles").unwrap(), "movie_id"), [1]);

    assert!(person::find(&mut db, 99).unwrap().is_none());
}
