//! Catalog store seeding
//!
//! Loads the book seed list and inserts each record at most once into the
//! `books` table of a SQLite store, keyed by ISBN.

mod record;
pub mod schema;
mod seeder;

pub use record::{BookRecord, bundled_books, load_books};
pub use seeder::{CatalogSeeder, FailedRecord, InsertOutcome, SeedReport, seed_connection};

use crate::config::CatalogOptions;
use crate::error::Result;

/// The configured seed list: `seed_file` when set, otherwise the bundled list.
pub fn seed_list(options: &CatalogOptions) -> Result<Vec<BookRecord>> {
    match options.seed_file.as_deref() {
        Some(path) => load_books(path),
        None => bundled_books(),
    }
}
