//! Compose a QR label for an arbitrary URL and save it
//!
//! Usage: cargo run --example compose_label -- http://localhost:8080/index.html

use shelfseed::{LabelFont, QrComposer};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080/index.html".to_string());

    let composer = QrComposer::new(
        "Library Management System",
        "Scan to access the library",
        LabelFont::builtin(20.0),
        LabelFont::builtin(14.0),
    );
    let artifact = composer.compose(&url, "qr_label.png")?;
    artifact.save()?;
    artifact.verify()?;

    println!(
        "✓ Label for {} saved to {}",
        artifact.source_url(),
        artifact.output_path().display()
    );
    Ok(())
}
