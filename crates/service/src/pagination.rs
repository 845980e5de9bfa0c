//! Pagination utilities for service layer
//!
//! Offset/limit windowing applied on top of a listing query.

use models::errors::FieldError;

/// Largest page a caller may ask for.
pub const MAX_LIMIT: u64 = 100;

/// SQLite binds OFFSET as a signed 64-bit integer.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    /// rows to skip
    pub offset: u64,
    /// rows to return; `None` means no limit
    pub limit: Option<u64>,
}

impl Pagination {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.offset > MAX_OFFSET {
            errors.push(FieldError::new("offset", format!("must be at most {MAX_OFFSET}, got {}", self.offset)));
        }
        if let Some(l) = self.limit.filter(|l| *l == 0 || *l > MAX_LIMIT) {
            errors.push(FieldError::new("limit", format!("must be between 1 and {MAX_LIMIT}, got {l}")));
        }
        errors
    }

    /// `(offset, limit)` ready for a query builder; an offset without a limit
    /// gets the largest limit SQLite accepts.
    pub fn normalize(self) -> (Option<u64>, Option<u64>) {
        match (self.offset, self.limit) {
            (0, limit) => (None, limit),
            (offset, None) => (Some(offset), Some(MAX_OFFSET)),
            (offset, limit) => (Some(offset), limit),
        }
    }

    /// Apply the window to an in-memory sequence.
    pub fn window<T>(self, items: impl Iterator<Item = T>) -> impl Iterator<Item = T> {
        let limit = self.limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        let offset = usize::try_from(self.offset).unwrap_or(usize::MAX);
        items.skip(offset).take(limit)
    }
}
