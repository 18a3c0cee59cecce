//! `books` table definition and store opening helpers

use crate::error::{Error, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

const BOOKS_SQL: &str = "
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    isbn TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    category TEXT,
    publication_year INTEGER,
    description TEXT,
    copies INTEGER NOT NULL DEFAULT 1 CHECK (copies >= 0),
    available INTEGER NOT NULL DEFAULT 1 CHECK (available >= 0 AND available <= copies)
);
";

/// Create the `books` table if it does not exist.
pub fn create_books_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(BOOKS_SQL)?;
    Ok(())
}

/// Whether the store already has a `books` table.
pub fn has_books_table(conn: &Connection) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='books')",
        [],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Open an existing store read-write. A missing file is an error.
pub fn open_existing(path: &Path) -> Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| Error::Catalog(format!("cannot open {}: {e}", path.display())))
}

/// Open or create a store and make sure the `books` table exists.
pub fn open_or_create(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .map_err(|e| Error::Catalog(format!("cannot open {}: {e}", path.display())))?;
    create_books_table(&conn)?;
    Ok(conn)
}

/// Open an in-memory store with the `books` table. Useful for testing.
pub fn open_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_books_table(&conn)?;
    Ok(conn)
}
