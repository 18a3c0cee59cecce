//! Helpers for rendering the run summary

use crate::catalog::SeedReport;
use crate::frontend::{FrontendTarget, ServeMethod};
use serde_json::{Value, json};
use std::path::PathBuf;

/// Result of the QR phase
#[derive(Debug, Clone)]
pub struct QrSummary {
    /// URL and serving method
    pub target: FrontendTarget,
    /// Written label
    pub path: PathBuf,
    /// `None` when verification is disabled, otherwise whether it decoded correctly
    pub verified: Option<bool>,
    /// Whether the built-in fallback font was used
    pub builtin_font: bool,
}

/// Result of the catalog phase
#[derive(Debug, Clone)]
pub enum CatalogSummary {
    /// Batch ran to completion
    Seeded(SeedReport),
    /// Batch aborted before any record was processed
    Aborted(String),
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// QR phase
    pub qr: QrSummary,
    /// Catalog phase
    pub catalog: CatalogSummary,
    /// Guide path, when written
    pub guide: Option<PathBuf>,
}

impl RunSummary {
    /// Human-readable status lines followed by next steps.
    pub fn human_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let qr = &self.qr;

        lines.push(format!("QR code saved to {}", qr.path.display()));
        lines.push(format!("  Links to: {}", qr.target.url));
        lines.push(format!("  Serving method: {}", qr.target.method.label()));
        if qr.builtin_font {
            lines.push("  Text rendered with the built-in font".to_string());
        }
        match qr.verified {
            Some(true) => lines.push("  Verified: label decodes to the URL".to_string()),
            Some(false) => lines.push("  Verified: FAILED, label may not scan".to_string()),
            None => {}
        }

        match &self.catalog {
            CatalogSummary::Seeded(report) => {
                lines.push(format!(
                    "Added {} new books to the catalog",
                    report.inserted
                ));
                lines.push(format!("  Total books attempted: {}", report.attempted));
                if report.already_present > 0 {
                    lines.push(format!(
                        "  {} books were already in the catalog",
                        report.already_present
                    ));
                }
                if report.ignored > 0 {
                    lines.push(format!(
                        "  {} books were ignored by the store",
                        report.ignored
                    ));
                }
                for failed in &report.failed {
                    lines.push(format!(
                        "  Error adding book {}: {}",
                        failed.title, failed.reason
                    ));
                }
            }
            CatalogSummary::Aborted(message) => {
                lines.push(format!("Catalog error: {message}"));
            }
        }

        if let Some(guide) = &self.guide {
            lines.push(format!("Server setup guide saved to {}", guide.display()));
        }

        lines.push(String::new());
        lines.push("Next steps:".to_string());
        lines.extend(next_steps(&qr.target));
        lines
    }

    /// Structured representation for `--json`.
    pub fn to_json(&self) -> Value {
        let catalog = match &self.catalog {
            CatalogSummary::Seeded(report) => json!({
                "status": "seeded",
                "attempted": report.attempted,
                "inserted": report.inserted,
                "skipped": report.skipped(),
                "already_present": report.already_present,
                "ignored": report.ignored,
                "failed": report.failed,
            }),
            CatalogSummary::Aborted(message) => json!({
                "status": "aborted",
                "error": message,
            }),
        };

        json!({
            "qr": {
                "url": self.qr.target.url,
                "method": self.qr.target.method,
                "path": self.qr.path.display().to_string(),
                "verified": self.qr.verified,
                "builtin_font": self.qr.builtin_font,
            },
            "catalog": catalog,
            "guide": self.guide.as_ref().map(|p| p.display().to_string()),
        })
    }
}

fn next_steps(target: &FrontendTarget) -> Vec<String> {
    let mut steps = match target.method {
        ServeMethod::StaticFileServer => vec![
            "  1. Start a static file server in the page directory (see the setup guide)".to_string(),
            format!("  2. Open: {}", target.url),
            "  3. Or start the backend and use its front-end route".to_string(),
        ],
        ServeMethod::Backend => vec![
            "  1. Save the front-end page next to the backend".to_string(),
            "  2. Start the backend".to_string(),
            format!("  3. Visit: {}", target.url),
        ],
    };
    steps.push("  4. Print the QR label".to_string());
    steps.push("  5. Check the new books in the catalog".to_string());
    steps
}
