//! The three setup phases, run in order

use crate::catalog::{self, CatalogSeeder};
use crate::config::SetupConfig;
use crate::error::Result;
use crate::frontend;
use crate::guide;
use crate::output::{CatalogSummary, QrSummary, RunSummary};
use crate::qr::QrComposer;
use tracing::{error, info, warn};

/// Compose the QR label, seed the catalog, then write the setup guide.
///
/// Label and guide write failures end the run. A catalog failure only ends
/// the seeding phase and is reported in the summary.
pub fn run(config: &SetupConfig) -> Result<RunSummary> {
    info!("Generating QR label for the front-end");
    let qr = compose_label(config)?;

    info!("Adding books to the catalog");
    let catalog = seed_catalog(config);

    let guide = if config.guide.enabled {
        info!("Writing server setup guide");
        guide::write(&config.guide.output, &guide::render(&config.frontend))?;
        Some(config.guide.output.clone())
    } else {
        None
    };

    Ok(RunSummary { qr, catalog, guide })
}

fn compose_label(config: &SetupConfig) -> Result<QrSummary> {
    let target = frontend::select_target(&config.frontend);
    info!(url = %target.url, method = target.method.label(), "Creating QR code");

    let composer = QrComposer::from_options(&config.qr);
    let artifact = composer.compose(&target.url, config.qr.output.clone())?;
    artifact.save()?;

    let verified = config.qr.verify.then(|| match artifact.verify() {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "QR label did not decode to its URL");
            false
        }
    });

    Ok(QrSummary {
        target,
        path: artifact.output_path().to_path_buf(),
        verified,
        builtin_font: composer.uses_builtin_font(),
    })
}

fn seed_catalog(config: &SetupConfig) -> CatalogSummary {
    let seeded = catalog::seed_list(&config.catalog).and_then(|records| {
        CatalogSeeder::new(config.catalog.database.clone())
            .create_schema(config.catalog.create_schema)
            .seed(&records)
    });

    match seeded {
        Ok(report) => CatalogSummary::Seeded(report),
        Err(err) => {
            error!(error = %err, "Catalog seeding aborted");
            CatalogSummary::Aborted(err.to_string())
        }
    }
}
