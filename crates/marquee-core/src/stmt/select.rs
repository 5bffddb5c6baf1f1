use super::{first_defined, first_table, Bindings, Condition, ConditionGroup, Statement, Value};

/// `SELECT <columns> FROM <table> <joins> WHERE .. ORDER BY .. LIMIT ..`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    /// Table to select from
    pub table: String,

    /// Selected column expressions, rendered verbatim
    pub columns: Vec<String>,

    /// JOIN clauses, rendered verbatim in order
    pub joins: Vec<String>,

    /// WHERE
    pub filter: ConditionGroup,

    /// ORDER BY expressions
    pub order_by: Option<Vec<String>>,

    /// LIMIT
    pub limit: Option<u64>,

    /// Values for placeholders referenced by `filter`
    pub bindings: Bindings,
}

impl Select {
    pub fn new(table: impl Into<String>) -> Select {
        Select {
            table: table.into(),
            ..Select::default()
        }
    }

    pub fn columns<I>(mut self, columns: I) -> Select
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn join(mut self, join: impl Into<String>) -> Select {
        self.joins.push(join.into());
        self
    }

    /// Adds an operand to the root WHERE group.
    pub fn filter(mut self, condition: impl Into<Condition>) -> Select {
        self.filter.push(condition);
        self
    }

    pub fn bind(mut self, placeholder: impl Into<String>, value: impl Into<Value>) -> Select {
        self.bindings.insert(placeholder, value);
        self
    }

    pub fn order_by<I>(mut self, order: I) -> Select
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.order_by = Some(order.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(mut self, limit: u64) -> Select {
        self.limit = Some(limit);
        self
    }

    /// Returns a new select with `overlay`'s columns, joins, filter operands
    /// and bindings appended after ours.
    pub fn merge(&self, overlay: &Select) -> Select {
        let mut bindings = self.bindings.clone();
        bindings.extend_from(&overlay.bindings);

        Select {
            table: first_table(&self.table, &overlay.table),
            columns: self
                .columns
                .iter()
                .chain(&overlay.columns)
                .cloned()
                .collect(),
            joins: self.joins.iter().chain(&overlay.joins).cloned().collect(),
            filter: self.filter.concat(&overlay.filter),
            order_by: first_defined(&self.order_by, &overlay.order_by),
            limit: first_defined(&self.limit, &overlay.limit),
            bindings,
        }
    }
}

impl Statement {
    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    /// Consumes `self` and returns the inner [`Select`].
    ///
    /// # Panics
    ///
    /// If `self` is not a [`Statement::Select`].
    #[track_caller]
    pub fn unwrap_select(self) -> Select {
        match self {
            Self::Select(select) => select,
            v => panic!("expected `Select`, found {v:#?}"),
        }
    }
}

impl From<Select> for Statement {
    fn from(src: Select) -> Self {
        Self::Select(src)
    }
}
