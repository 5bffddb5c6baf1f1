use marquee_core::{stmt::Value as CoreValue, Error, Result};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// Binds a core value as a SQLite parameter.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a CoreValue);

impl Value<'_> {
    /// Converts a column of a fetched row into a core value.
    pub(crate) fn from_sql(column: &str, value: ValueRef<'_>) -> Result<CoreValue> {
        Ok(match value {
            ValueRef::Null => CoreValue::Null,
            ValueRef::Integer(v) => CoreValue::I64(v),
            ValueRef::Real(v) => CoreValue::F64(v),
            ValueRef::Text(v) => match std::str::from_utf8(v) {
                Ok(v) => CoreValue::String(v.to_string()),
                Err(err) => return Err(Error::driver_operation_failed(err)),
            },
            ValueRef::Blob(_) => {
                return Err(Error::invalid_result(format!(
                    "column `{column}` holds a blob, which has no value mapping"
                )))
            }
        })
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self.0 {
            CoreValue::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            CoreValue::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            CoreValue::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            CoreValue::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            CoreValue::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            CoreValue::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            CoreValue::List(_) => Err(rusqlite::Error::ToSqlConversionFailure(
                "list values cannot be bound as parameters".into(),
            )),
        }
    }
}
