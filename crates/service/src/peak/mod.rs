//! Peak module: three-layer architecture (domain, repository, service).
//!
//! `PeakService` holds the validation and not-found rules; repositories only
//! translate already-checked requests into storage operations.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{BoundingBox, NewPeak, Peak, PeakPatch, PeakQuery};
pub use repository::PeakRepository;
pub use service::PeakService;
