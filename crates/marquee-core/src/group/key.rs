use crate::stmt::Value;

/// Hashable projection of a grouping key value.
///
/// Floats are compared by bit pattern, so `NaN` keys group together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) enum GroupKey {
    Null,
    Bool(bool),
    I64(i64),
    F64(u64),
    String(String),
    List(Vec<GroupKey>),
}

impl From<&Value> for GroupKey {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => GroupKey::Null,
            Value::Bool(v) => GroupKey::Bool(*v),
            Value::I64(v) => GroupKey::I64(*v),
            Value::F64(v) => GroupKey::F64(v.to_bits()),
            Value::String(v) => GroupKey::String(v.clone()),
            Value::List(items) => GroupKey::List(items.iter().map(GroupKey::from).collect()),
        }
    }
}

/// Rows that lack the grouping column are grouped under null.
impl From<Option<&Value>> for GroupKey {
    fn from(value: Option<&Value>) -> Self {
        value.map(GroupKey::from).unwrap_or(GroupKey::Null)
    }
}
