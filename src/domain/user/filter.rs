//! Declarative query model shared by every repository implementation

use std::cmp::Ordering;

use super::entity::{User, UserId, UserStatus};

/// Multi-axis membership filter over user records.
///
/// An empty axis places no constraint. A record matches when it satisfies
/// every non-empty axis: AND across axes, IN-style membership within one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub ids: Vec<UserId>,
    pub emails: Vec<String>,
    pub statuses: Vec<UserStatus>,
}

impl UserFilter {
    pub fn by_id(id: UserId) -> Self {
        Self {
            ids: vec![id],
            ..Default::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            emails: vec![email.into()],
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.emails.is_empty() && self.statuses.is_empty()
    }

    /// Evaluates the filter against a single record.
    pub fn matches(&self, user: &User) -> bool {
        if !self.ids.is_empty() && !self.ids.contains(user.id()) {
            return false;
        }

        if !self.emails.is_empty() && !self.emails.iter().any(|email| email == user.email()) {
            return false;
        }

        if !self.statuses.is_empty() && !self.statuses.contains(&user.status()) {
            return false;
        }

        true
    }
}

/// Limit/offset window applied after filtering.
///
/// A zero limit means the caller did not request a limit; the offset still
/// skips records. Windows past the end of the matched set yield the empty
/// remainder, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: usize,
    pub offset: usize,
}

impl Pagination {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Applies the window to a matched set, clamped to its bounds.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = self.offset.min(items.len());
        let end = if self.limit == 0 {
            items.len()
        } else {
            (start + self.limit).min(items.len())
        };

        items[start..end].to_vec()
    }
}

/// Canonical result ordering: newest first, ties broken by id.
///
/// Every backend returns `find` results in this order.
pub fn canonical_order(a: &User, b: &User) -> Ordering {
    b.created_at()
        .cmp(&a.created_at())
        .then_with(|| a.id().cmp(b.id()))
}
