//! shelfseed - one-shot setup for a library-management demo
//!
//! Produces the pieces a fresh demo install needs:
//!
//! - **QR label**: a PNG with a scannable code for the front-end URL and two
//!   centered text lines beneath it
//! - **Catalog seed**: the bundled book list inserted into the SQLite `books`
//!   table, once per ISBN
//! - **Setup guide**: a text file describing how to serve the front-end
//!
//! # Example
//!
//! ```no_run
//! use shelfseed::{SetupConfig, setup};
//!
//! fn main() -> shelfseed::Result<()> {
//!     let config = SetupConfig::load(None)?;
//!     let summary = setup::run(&config)?;
//!
//!     for line in summary.human_lines() {
//!         println!("{line}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod frontend;
pub mod guide;
pub mod logging;
pub mod output;
pub mod qr;
pub mod setup;

pub use error::{Error, Result};

pub use catalog::{BookRecord, CatalogSeeder, SeedReport};
pub use config::{
    CatalogOptions, FrontendOptions, GuideOptions, LogRotation, LoggingOptions, QrOptions,
    SetupConfig,
};
pub use frontend::{FrontendTarget, ServeMethod};
pub use output::RunSummary;
pub use qr::{LabelFont, QrArtifact, QrComposer, QrDecoder, QrEncoder, QrPayload};
