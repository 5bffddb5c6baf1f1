use marquee_core::{
    driver::Rows,
    stmt::{Bindings, Record, Value},
    Connection as _,
};
use marquee_driver_sqlite::{Connection, Sqlite};
use pretty_assertions::assert_eq;

const SCHEMA: &str = "
    CREATE TABLE country (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        code TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        is_deleted BOOLEAN NOT NULL DEFAULT FALSE
    );
";

fn connect() -> Connection {
    let mut conn = Sqlite::new("sqlite::memory:").unwrap().connect().unwrap();
    conn.exec_batch(SCHEMA).unwrap();
    conn
}

fn insert_country(conn: &mut Connection, code: &str, name: &str) -> i64 {
    let bindings: Bindings = [(":code", code), (":name", name)].into_iter().collect();
    let response = conn
        .exec(
            "INSERT INTO country (code,name) VALUES (:code,:name)",
            &bindings,
        )
        .unwrap();

    assert_eq!(response.into_count().unwrap(), 1);
    conn.last_insert_id().unwrap()
}

#[test]
fn insert_reports_count_and_id() {
    let mut conn = connect();

    assert_eq!(insert_country(&mut conn, "FR", "France"), 1);
    assert_eq!(insert_country(&mut conn, "DE", "Germany"), 2);
}

#[test]
fn select_returns_named_columns() {
    let mut conn = connect();
    insert_country(&mut conn, "FR", "France");

    let bindings: Bindings = [(":name", "%ran%")].into_iter().collect();
    let rows = conn
        .exec(
            "SELECT id,name,is_deleted FROM country WHERE (name LIKE :name)",
            &bindings,
        )
        .unwrap()
        .into_values()
        .unwrap();

    assert_eq!(
        rows,
        vec![Record::new()
            .with("id", 1)
            .with("name", "France")
            .with("is_deleted", 0)]
    );
}

#[test]
fn select_with_no_match_is_empty_values() {
    let mut conn = connect();

    let response = conn
        .exec("SELECT id FROM country", &Bindings::new())
        .unwrap();
    assert!(matches!(response.rows, Rows::Values(ref rows) if rows.is_empty()));
}

#[test]
fn unused_bindings_are_ignored() {
    let mut conn = connect();
    insert_country(&mut conn, "FR", "France");

    let bindings: Bindings = [(":id", Value::I64(1)), (":unused", Value::Bool(true))]
        .into_iter()
        .collect();
    let count = conn
        .exec("UPDATE country SET is_deleted = TRUE WHERE id = :id", &bindings)
        .unwrap()
        .into_count()
        .unwrap();

    assert_eq!(count, 1);
}

#[test]
fn missing_binding_is_an_error() {
    let mut conn = connect();

    let err = conn
        .exec("SELECT id FROM country WHERE id = :id", &Bindings::new())
        .unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn constraint_violation_is_a_driver_error() {
    let mut conn = connect();
    insert_country(&mut conn, "FR", "France");

    let bindings: Bindings = [(":code", "FR"), (":name", "Again")].into_iter().collect();
    let err = conn
        .exec(
            "INSERT INTO country (code,name) VALUES (:code,:name)",
            &bindings,
        )
        .unwrap_err();

    assert!(err.is_driver_operation_failed());
}

#[test]
fn invalid_sql_is_a_driver_error() {
    let mut conn = connect();

    let err = conn.exec("SELEC id FROM country", &Bindings::new()).unwrap_err();
    assert!(err.is_driver_operation_failed());
}
