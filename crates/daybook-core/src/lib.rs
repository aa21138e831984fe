//! Daybook Core — domain models, repository traits, and shared errors.

pub mod error;
pub mod models;
pub mod repository;
