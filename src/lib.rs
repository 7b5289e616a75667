pub mod demo;
pub mod error;
pub mod options;
pub mod probe;
pub mod slot;
pub mod table;

pub use error::TableError;
pub use probe::Strategy;
pub use slot::{Key, Slot};
pub use table::Table;
