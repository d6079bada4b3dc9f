//! REST API: router, handlers, DTOs and request middleware

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use router::{create_api_router, ApiState};
