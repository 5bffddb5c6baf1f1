mod support;

use marquee::{
    db::Builder,
    stmt::{Condition, Delete, Insert, Record, Select, Update, Value},
    Db,
};
use pretty_assertions::assert_eq;
use support::{empty_db, SCHEMA};

#[test]
fn insert_returns_generated_ids() {
    let mut db = empty_db();

    let france = Record::new().with("name", "France").with("code", "FR");
    let spain = Record::new().with("name", "Spain").with("code", "ES");

    assert_eq!(db.insert(Insert::new("country", france)).unwrap(), 1);
    assert_eq!(db.insert(Insert::new("country", spain)).unwrap(), 2);
}

#[test]
fn batch_insert_then_select() {
    let mut db = empty_db();

    let records = [("France", "FR"), ("Spain", "ES"), ("Italy", "IT")]
        .into_iter()
        .map(|(name, code)| Record::new().with("name", name).with("code", code));

    let last_id = db.insert(Insert::batch("country", records)).unwrap();
    assert_eq!(last_id, 3);

    let rows = db
        .all(
            Select::new("country")
                .columns(["id", "code"])
                .filter(Condition::or(["code = :a", "code = :b"]))
                .bind(":a", "ES")
                .bind(":b", "IT")
                .order_by(["id"]),
        )
        .unwrap();

    assert_eq!(
        rows,
        vec![
            Record::new().with("id", 2).with("code", "ES"),
            Record::new().with("id", 3).with("code", "IT"),
        ]
    );
}

#[test]
fn update_and_delete_report_affected_rows() {
    let mut db = empty_db();
    support::insert(&mut db, "country", [("name", "France"), ("code", "FR")]);
    support::insert(&mut db, "country", [("name", "Spain"), ("code", "ES")]);

    let updated = db
        .count(Update::new("country").set("is_deleted", true).filter("code = :code").bind(":code", "FR"))
        .unwrap();
    assert_eq!(updated, 1);

    let deleted = db
        .count(Delete::new("country").filter("is_deleted = FALSE"))
        .unwrap();
    assert_eq!(deleted, 1);

    let remaining = db
        .first(Select::new("country").columns(["name", "is_deleted"]))
        .unwrap();
    assert_eq!(
        remaining,
        Some(Record::new().with("name", "France").with("is_deleted", 1))
    );
}

#[test]
fn get_reports_missing_record() {
    let mut db = empty_db();

    let err = db
        .get(Select::new("movie").columns(["id"]).filter("id = :id").bind(":id", 1))
        .unwrap_err();

    assert!(err.is_record_not_found());
    assert_eq!(
        err.to_string(),
        "record not found: query returned no results; table=movie"
    );
}

#[test]
fn compile_errors_are_not_sent_to_the_driver() {
    let mut db = empty_db();

    let err = db.exec(Update::new("movie").filter("id = 1")).unwrap_err();
    assert!(err.is_invalid_statement());

    let err = db
        .exec(
            Update::new("movie")
                .set("title", "x")
                .filter("title = :title_1")
                .bind(":title_1", "y"),
        )
        .unwrap_err();
    assert!(err.is_binding_collision());
}

#[test]
fn driver_errors_propagate() {
    let mut db = empty_db();

    let err = db
        .all(Select::new("no_such_table").columns(["id"]))
        .unwrap_err();
    assert!(err.is_driver_operation_failed());

    let err = db.execute_script("CREATE TABLE movie (id INTEGER);").unwrap_err();
    assert!(err.is_driver_operation_failed());
}

#[test]
fn count_on_a_query_is_an_invalid_result() {
    let mut db = empty_db();

    let err = db.count(Select::new("movie").columns(["id"])).unwrap_err();
    assert!(err.is_invalid_result());
}

#[test]
fn terminated_statements_run() {
    let mut db = Builder::default()
        .url("sqlite::memory:")
        .terminate_statements(true)
        .connect()
        .unwrap();
    db.execute_script(SCHEMA).unwrap();

    let id = db
        .insert(Insert::new(
            "genre",
            Record::new().with("names", r#"["noir"]"#),
        ))
        .unwrap();

    let genre = db
        .get(Select::new("genre").columns(["names"]).filter("id = :id").bind(":id", id))
        .unwrap();
    assert_eq!(genre.get("names"), Some(&Value::from(r#"["noir"]"#)));
}

#[test]
fn unsupported_url() {
    let err = Db::connect("mysql://localhost/movies").unwrap_err();
    assert!(err.is_invalid_connection_url());
}
