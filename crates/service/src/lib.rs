//! Service layer providing the peak CRUD and bounding-box operations on top of models.
//! - Separates business logic from data access (`peak::repository::PeakRepository`).
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod runtime;
pub mod pagination;
pub mod peak;
pub mod seed;
#[cfg(test)]
pub mod test_support;
