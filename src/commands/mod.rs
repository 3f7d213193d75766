//! CLI command implementations.

pub mod book;
pub mod categories;

pub use book::BookCommand;
pub use categories::CategoriesCommand;
