use super::{Comma, Formatter, ToSql};

use marquee_core::{
    stmt::{Condition, ConditionGroup},
    Result,
};

/// The trailing `WHERE .. ORDER BY .. LIMIT ..` shared by select, update and
/// delete.
pub(super) struct Filter<'a> {
    pub(super) filter: &'a ConditionGroup,
    pub(super) order_by: Option<&'a [String]>,
    pub(super) limit: Option<u64>,
}

impl ToSql for Filter<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) -> Result<()> {
        let filter = render_group(self.filter);

        if !filter.is_empty() {
            fmt!(f, " WHERE " filter.as_str());
        }

        if let Some(order_by) = self.order_by.filter(|order_by| !order_by.is_empty()) {
            fmt!(f, " ORDER BY " Comma(order_by));
        }

        if let Some(limit) = self.limit {
            fmt!(f, " LIMIT " limit);
        }

        Ok(())
    }
}

pub(super) fn render(condition: &Condition) -> String {
    match condition {
        Condition::Predicate(sql) => sql.clone(),
        Condition::Group(group) => render_group(group),
    }
}

fn render_group(group: &ConditionGroup) -> String {
    let operands: Vec<String> = group
        .operands
        .iter()
        .map(render)
        .filter(|sql| !sql.is_empty())
        .collect();

    if operands.is_empty() {
        return String::new();
    }

    let separator = format!(" {} ", group.op.as_str());
    format!("({})", operands.join(&separator))
}
