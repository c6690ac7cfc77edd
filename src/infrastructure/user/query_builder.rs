//! Incremental builder for parameterized user queries

use crate::domain::user::{Pagination, UserFilter};

/// A positional query argument.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SqlArg {
    Text(String),
    Int(i64),
}

/// Accumulates `IN` conditions and pagination for one statement.
///
/// Placeholders are numbered by a single monotonic counter shared across
/// the WHERE clause and LIMIT/OFFSET, so the argument list lines up
/// positionally with the whole statement.
#[derive(Debug)]
pub(crate) struct QueryBuilder {
    conditions: Vec<String>,
    args: Vec<SqlArg>,
    arg_num: usize,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
            args: Vec::new(),
            arg_num: 1,
        }
    }

    /// Adds a `column IN ($n, $n+1, ...)` condition. An empty value list
    /// adds nothing.
    pub fn push_in_condition(&mut self, column: &str, values: impl IntoIterator<Item = SqlArg>) {
        let mut placeholders = Vec::new();

        for value in values {
            placeholders.push(format!("${}", self.arg_num));
            self.args.push(value);
            self.arg_num += 1;
        }

        if placeholders.is_empty() {
            return;
        }

        self.conditions
            .push(format!("{} IN ({})", column, placeholders.join(", ")));
    }

    /// Adds one condition per non-empty filter axis.
    pub fn apply_filter(&mut self, filter: &UserFilter) {
        self.push_in_condition(
            "id",
            filter.ids.iter().map(|id| SqlArg::Text(id.as_str().to_string())),
        );
        self.push_in_condition(
            "email",
            filter.emails.iter().map(|email| SqlArg::Text(email.clone())),
        );
        self.push_in_condition(
            "status",
            filter
                .statuses
                .iter()
                .map(|status| SqlArg::Text(status.as_str().to_string())),
        );
    }

    /// Returns the WHERE clause, or an empty string when no condition was
    /// added.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            return String::new();
        }

        format!(" WHERE {}", self.conditions.join(" AND "))
    }

    /// Returns the LIMIT/OFFSET clause, continuing the placeholder
    /// numbering. A zero limit emits no LIMIT; a zero offset no OFFSET.
    pub fn push_pagination(&mut self, pagination: Pagination) -> String {
        let mut clause = String::new();

        if pagination.limit > 0 {
            clause.push_str(&format!(" LIMIT ${}", self.arg_num));
            self.args.push(SqlArg::Int(pagination.limit as i64));
            self.arg_num += 1;
        }

        if pagination.offset > 0 {
            clause.push_str(&format!(" OFFSET ${}", self.arg_num));
            self.args.push(SqlArg::Int(pagination.offset as i64));
            self.arg_num += 1;
        }

        clause
    }

    pub fn args(&self) -> &[SqlArg] {
        &self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{UserId, UserStatus};

    #[test]
    fn test_empty_filter_builds_no_where_clause() {
        let mut builder = QueryBuilder::new();
        builder.apply_filter(&UserFilter::default());

        assert_eq!(builder.where_clause(), "");
        assert!(builder.args().is_empty());
    }

    #[test]
    fn test_single_axis_in_condition() {
        let mut builder = QueryBuilder::new();
        builder.apply_filter(&UserFilter::by_email("a@example.com"));

        assert_eq!(builder.where_clause(), " WHERE email IN ($1)");
        assert_eq!(builder.args(), [SqlArg::Text("a@example.com".to_string())]);
    }

    #[test]
    fn test_axes_join_with_and_and_share_the_counter() {
        let mut builder = QueryBuilder::new();
        builder.apply_filter(&UserFilter {
            ids: vec![UserId::new("u1"), UserId::new("u2")],
            emails: vec!["a@example.com".to_string()],
            statuses: vec![UserStatus::Active, UserStatus::Inactive],
        });

        assert_eq!(
            builder.where_clause(),
            " WHERE id IN ($1, $2) AND email IN ($3) AND status IN ($4, $5)"
        );
        assert_eq!(
            builder.args(),
            [
                SqlArg::Text("u1".to_string()),
                SqlArg::Text("u2".to_string()),
                SqlArg::Text("a@example.com".to_string()),
                SqlArg::Text("active".to_string()),
                SqlArg::Text("inactive".to_string()),
            ]
        );
    }

    #[test]
    fn test_pagination_continues_the_numbering() {
        let mut builder = QueryBuilder::new();
        builder.apply_filter(&UserFilter::by_email("a@example.com"));

        let clause = builder.push_pagination(Pagination::new(20, 40));

        assert_eq!(clause, " LIMIT $2 OFFSET $3");
        assert_eq!(
            builder.args(),
            [
                SqlArg::Text("a@example.com".to_string()),
                SqlArg::Int(20),
                SqlArg::Int(40),
            ]
        );
    }

    #[test]
    fn test_pagination_without_filter_starts_at_one() {
        let mut builder = QueryBuilder::new();

        let clause = builder.push_pagination(Pagination::new(10, 0));

        assert_eq!(clause, " LIMIT $1");
        assert_eq!(builder.args(), [SqlArg::Int(10)]);
    }

    #[test]
    fn test_zero_limit_emits_offset_only() {
        let mut builder = QueryBuilder::new();

        let clause = builder.push_pagination(Pagination::new(0, 15));

        assert_eq!(clause, " OFFSET $1");
        assert_eq!(builder.args(), [SqlArg::Int(15)]);
    }
}
