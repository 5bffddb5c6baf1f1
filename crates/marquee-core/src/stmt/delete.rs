use super::{first_defined, first_table, Bindings, Condition, ConditionGroup, Statement, Value};

/// `DELETE FROM <table> WHERE .. ORDER BY .. LIMIT ..`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Delete {
    /// Table to delete from
    pub table: String,

    /// WHERE
    pub filter: ConditionGroup,

    /// ORDER BY expressions
    pub order_by: Option<Vec<String>>,

    /// LIMIT
    pub limit: Option<u64>,

    /// Values for placeholders referenced by `filter`
    pub bindings: Bindings,
}

impl Delete {
    pub fn new(table: impl Into<String>) -> Delete {
        Delete {
            table: table.into(),
            ..Delete::default()
        }
    }

    pub fn filter(mut self, condition: impl Into<Condition>) -> Delete {
        self.filter.push(condition);
        self
    }

    pub fn bind(mut self, placeholder: impl Into<String>, value: impl Into<Value>) -> Delete {
        self.bindings.insert(placeholder, value);
        self
    }

    pub fn order_by<I>(mut self, order: I) -> Delete
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.order_by = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(mut self, limit: u64) -> Delete {
        self.limit = Some(limit);
        self
    }

    pub fn merge(&self, overlay: &Delete) -> Delete {
        let mut bindings = self.bindings.clone();
        bindings.extend_from(&overlay.bindings);

        Delete {
            table: first_table(&self.table, &overlay.table),
            filter: self.filter.concat(&overlay.filter),
            order_by: first_defined(&self.order_by, &overlay.order_by),
            limit: first_defined(&self.limit, &overlay.limit),
            bindings,
        }
    }
}

impl Statement {
    pub fn is_delete(&self) -> bool {
        matches!(self, Statement::Delete(..))
    }

    pub fn as_delete(&self) -> Option<&Delete> {
        match self {
            Self::Delete(delete) => Some(delete),
            _ => None,
        }
    }
}

impl From<Delete> for Statement {
    fn from(src: Delete) -> Self {
        Self::Delete(src)
    }
}
