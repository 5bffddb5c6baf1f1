use super::Search;
use crate::{
    stmt::{Record, Select, Value},
    Db, Result,
};

use serde::Deserialize;

/// Selectable genre columns. `names` holds a JSON array of strings.
pub const COLUMNS: &[&str] = &["id", "names", "description"];

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GenreFilter {
    pub names: Option<String>,
    pub description: Option<String>,
}

pub fn select_begin() -> Select {
    Select::new("genre").columns(COLUMNS.iter().copied())
}

/// Lists live genres matching `filter`, with `names` decoded.
pub fn index(db: &mut Db, filter: &GenreFilter) -> Result<Vec<Record>> {
    let select = Search::new()
        .contains("names", filter.names.as_deref())
        .contains("description", filter.description.as_deref())
        .apply(select_begin(), "is_deleted = FALSE")
        .order_by(["id"]);

    let mut genres = db.all(select)?;
    for genre in &mut genres {
        genre.update("names", decode_names)?;
    }
    Ok(genres)
}

/// Decodes a JSON `names` column into a list. A null column decodes to an
/// empty list.
pub fn decode_names(names: Value) -> Result<Value> {
    match names {
        Value::String(json) => Value::from_json_str(&json),
        Value::Null => Ok(Value::List(vec![])),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_json_names() {
        assert_eq!(
            decode_names(Value::from(r#"["drama","crime"]"#)).unwrap(),
            Value::from(vec!["drama", "crime"])
        );
    }

    #[test]
    fn decode_null_names() {
        assert_eq!(decode_names(Value::Null).unwrap(), Value::List(vec![]));
    }

    #[test]
    fn decode_malformed_names() {
        assert!(decode_names(Value::from("[drama")).is_err());
    }
}
