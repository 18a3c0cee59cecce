//! Book records and the seed list they are loaded from

use crate::config::extension_of;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUNDLED_SEED: &str = include_str!("../../data/books.toml");

/// One row of the `books` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Unique key
    pub isbn: String,
    /// Book title
    pub title: String,
    /// Author list as displayed
    pub author: String,
    /// Shelf category
    pub category: String,
    /// Year of publication
    pub publication_year: i32,
    /// Short description
    pub description: String,
    /// Total copies owned
    pub copies: u32,
    /// Copies currently loanable
    pub available: u32,
}

impl BookRecord {
    /// Reject records that cannot be stored as-is.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Error::InvalidRecord {
            isbn: self.isbn.clone(),
            reason,
        };

        if self.isbn.trim().is_empty() {
            return Err(invalid("isbn is empty".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(invalid("title is empty".to_string()));
        }
        if self.available > self.copies {
            return Err(invalid(format!(
                "available ({}) exceeds copies ({})",
                self.available, self.copies
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    books: Vec<BookRecord>,
}

/// The seed list shipped with the crate.
pub fn bundled_books() -> Result<Vec<BookRecord>> {
    parse_toml(BUNDLED_SEED).map_err(|e| Error::SeedData(format!("bundled seed list: {e}")))
}

/// Read a seed list from a toml or yaml file with a top-level `books` array.
pub fn load_books(path: &Path) -> Result<Vec<BookRecord>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::SeedData(format!("Failed to read {}: {e}", path.display())))?;

    match extension_of(path).as_str() {
        "toml" => parse_toml(&contents)
            .map_err(|e| Error::SeedData(format!("Failed to parse TOML {}: {e}", path.display()))),
        "yaml" | "yml" => serde_yaml::from_str::<SeedFile>(&contents)
            .map(|file| file.books)
            .map_err(|e| Error::SeedData(format!("Failed to parse YAML {}: {e}", path.display()))),
        other => Err(Error::SeedData(format!(
            "Unsupported seed file format '{}', expected toml/yaml",
            other
        ))),
    }
}

fn parse_toml(contents: &str) -> std::result::Result<Vec<BookRecord>, toml::de::Error> {
    toml::from_str::<SeedFile>(contents).map(|file| file.books)
}
