//! API data transfer objects

pub mod common;
pub mod lead;
pub mod vitals;

pub use common::*;
pub use lead::*;
pub use vitals::*;

pub use crate::shared::types::pagination::{PaginatedResponse, PaginationMeta};
