pub mod constraint;
pub mod schema;

pub use constraint::*;
pub use schema::*;
