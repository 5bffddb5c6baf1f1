use super::{first_defined, first_table, Bindings, Condition, ConditionGroup, Record, Statement, Value};

/// `UPDATE <table> SET col = :col_1, .. WHERE .. ORDER BY .. LIMIT ..`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Update {
    /// Table to update
    pub table: String,

    /// Column assignments, in order
    pub values: Record,

    /// WHERE
    pub filter: ConditionGroup,

    /// ORDER BY expressions
    pub order_by: Option<Vec<String>>,

    /// LIMIT
    pub limit: Option<u64>,

    /// Values for placeholders referenced by `filter`
    pub bindings: Bindings,
}

impl Update {
    pub fn new(table: impl Into<String>) -> Update {
        Update {
            table: table.into(),
            ..Update::default()
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Update {
        self.values.insert(column, value);
        self
    }

    pub fn values(mut self, values: Record) -> Update {
        self.values.extend(values);
        self
    }

    pub fn filter(mut self, condition: impl Into<Condition>) -> Update {
        self.filter.push(condition);
        self
    }

    pub fn bind(mut self, placeholder: impl Into<String>, value: impl Into<Value>) -> Update {
        self.bindings.insert(placeholder, value);
        self
    }

    pub fn order_by<I>(mut self, order: I) -> Update
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.order_by = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(mut self, limit: u64) -> Update {
        self.limit = Some(limit);
        self
    }

    pub fn merge(&self, overlay: &Update) -> Update {
        let mut values = self.values.clone();
        values.extend(overlay.values.clone());

        let mut bindings = self.bindings.clone();
        bindings.extend_from(&overlay.bindings);

        Update {
            table: first_table(&self.table, &overlay.table),
            values,
            filter: self.filter.concat(&overlay.filter),
            order_by: first_defined(&self.order_by, &overlay.order_by),
            limit: first_defined(&self.limit, &overlay.limit),
            bindings,
        }
    }
}

impl Statement {
    pub fn as_update(&self) -> Option<&Update> {
        match self {
            Self::Update(update) => Some(update),
            _ => None,
        }
    }
}

impl From<Update> for Statement {
    fn from(src: Update) -> Self {
        Self::Update(src)
    }
}
