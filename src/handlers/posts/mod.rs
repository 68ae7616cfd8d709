pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::{create, list};
pub use record::{delete, get, update};
