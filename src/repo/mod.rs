/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for reading the item catalog and for creating
/// and retrieving collection points with their item associations.
///
/// The repository pattern abstracts away the details of database access
/// and provides a clean API for the rest of the application to use.

mod item_repo;
mod point_repo;

// Re-export all repository functions
pub use item_repo::*;
pub use point_repo::*;
