//! Storage-backed `PeakRepository` implementations.

pub mod seaorm;
