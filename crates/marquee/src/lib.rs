pub mod catalog;

pub mod db;
pub use db::Db;

pub use marquee_core::{
    bail, driver, err, group, stmt, Connection, Entity, Error, Grouping, Relation, Result,
    Statement,
};
pub use marquee_sql::{compile, render, Serializer};
