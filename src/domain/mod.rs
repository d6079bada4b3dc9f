//! Core business entities

pub mod lead;
pub mod vitals;

pub use lead::Lead;
pub use vitals::VitalSigns;

pub use crate::shared::types::errors::{DomainError, DomainResult};
