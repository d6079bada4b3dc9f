//! # CareSync Service
//!
//! Healthcare-services REST API: records patient vital signs and captures
//! contact-form leads, with paginated collection endpoints.
//!
//! ## Architecture
//!
//! - **domain**: Core business entities
//! - **shared**: Cross-cutting request plumbing — pagination, the
//!   schema-validation engine, errors, graceful shutdown
//! - **infrastructure**: Persistence behind the `Storage` trait
//! - **api**: REST API with Swagger documentation and request middleware

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export storage types for easy access
pub use infrastructure::{InMemoryStorage, Storage};

// Re-export API router
pub use api::{create_api_router, ApiState};
