pub mod memory;
pub mod traits;

pub use memory::InMemoryStorage;
pub use traits::Storage;
