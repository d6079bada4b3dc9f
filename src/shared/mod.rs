pub mod shutdown;
pub mod types;
pub mod validation;

pub use shutdown::*;
pub use types::*;
pub use validation::*;
