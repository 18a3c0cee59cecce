//! Idempotent insertion of seed records into the catalog store

use super::record::BookRecord;
use super::schema;
use crate::error::{Error, Result};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What happened to a single record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertOutcome {
    /// A new row was written
    Inserted,
    /// A row with the same ISBN already exists
    AlreadyPresent,
    /// The insert was silently ignored for a reason other than the ISBN
    Ignored,
}

/// A record that could not be stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRecord {
    /// ISBN of the record
    pub isbn: String,
    /// Title of the record
    pub title: String,
    /// Error message
    pub reason: String,
}

/// Outcome counts for one seeding batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    /// Records in the input list
    pub attempted: usize,
    /// Rows newly written
    pub inserted: usize,
    /// Records whose ISBN was already stored
    pub already_present: usize,
    /// Records the store ignored without a matching ISBN
    pub ignored: usize,
    /// Records that raised an error
    pub failed: Vec<FailedRecord>,
}

impl SeedReport {
    /// Records that did not produce a new row.
    pub fn skipped(&self) -> usize {
        self.attempted - self.inserted
    }

    fn record(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted => self.inserted += 1,
            InsertOutcome::AlreadyPresent => self.already_present += 1,
            InsertOutcome::Ignored => self.ignored += 1,
        }
    }
}

/// Writes seed records into the `books` table of a SQLite store
#[derive(Debug, Clone)]
pub struct CatalogSeeder {
    database: PathBuf,
    create_schema: bool,
}

impl CatalogSeeder {
    /// Seeder for an existing store at `database`.
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            create_schema: false,
        }
    }

    /// Create the store and `books` table when they are missing.
    pub fn create_schema(mut self, create: bool) -> Self {
        self.create_schema = create;
        self
    }

    /// Open the store, insert every record once, then commit and close.
    ///
    /// Only failures that affect the whole batch are returned as errors;
    /// per-record failures end up in [`SeedReport::failed`].
    pub fn seed(&self, records: &[BookRecord]) -> Result<SeedReport> {
        let mut conn = if self.create_schema {
            schema::open_or_create(&self.database)?
        } else {
            schema::open_existing(&self.database)?
        };

        if !schema::has_books_table(&conn)? {
            return Err(Error::Catalog(format!(
                "{} has no books table",
                self.database.display()
            )));
        }

        let report = seed_connection(&mut conn, records)?;

        conn.close()
            .map_err(|(_, e)| Error::Catalog(format!("failed to close store: {e}")))?;
        debug!(database = %self.database.display(), "Catalog store closed");

        Ok(report)
    }
}

/// Insert `records` over an open connection inside one transaction.
pub fn seed_connection(conn: &mut Connection, records: &[BookRecord]) -> Result<SeedReport> {
    let tx = conn.transaction()?;
    let mut report = SeedReport {
        attempted: records.len(),
        ..SeedReport::default()
    };

    for record in records {
        match insert_record(&tx, record) {
            Ok(outcome) => {
                debug!(isbn = %record.isbn, ?outcome, "Seed record processed");
                if outcome == InsertOutcome::Ignored {
                    warn!(
                        isbn = %record.isbn,
                        title = %record.title,
                        "Insert ignored without an existing ISBN"
                    );
                }
                report.record(outcome);
            }
            Err(err) => {
                warn!(title = %record.title, error = %err, "Failed to add book");
                report.failed.push(FailedRecord {
                    isbn: record.isbn.clone(),
                    title: record.title.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    tx.commit()?;

    info!(
        attempted = report.attempted,
        inserted = report.inserted,
        already_present = report.already_present,
        ignored = report.ignored,
        failed = report.failed.len(),
        "Catalog seeding finished"
    );
    Ok(report)
}

fn insert_record(tx: &Transaction<'_>, record: &BookRecord) -> Result<InsertOutcome> {
    record.validate()?;

    let existing: Option<i64> = tx
        .query_row(
            "SELECT 1 FROM books WHERE isbn = ?1",
            params![record.isbn],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Ok(InsertOutcome::AlreadyPresent);
    }

    let changed = tx.execute(
        "INSERT OR IGNORE INTO books
             (isbn, title, author, category, publication_year, description, copies, available)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            record.isbn,
            record.title,
            record.author,
            record.category,
            record.publication_year,
            record.description,
            record.copies,
            record.available,
        ],
    )?;

    Ok(if changed > 0 {
        InsertOutcome::Inserted
    } else {
        InsertOutcome::Ignored
    })
}
