use std::fs;
use std::path::Path;

use rusqlite::Connection;
use shelfseed::catalog::schema;
use shelfseed::output::CatalogSummary;
use shelfseed::{QrComposer, QrDecoder, ServeMethod, SetupConfig, setup};

fn config_in(dir: &Path) -> SetupConfig {
    let mut config = SetupConfig::default();
    config.frontend.page = dir.join("index.html");
    config.qr.output = dir.join("library_frontend_qr.png");
    config.qr.font = None;
    config.catalog.database = dir.join("library.db");
    config.guide.output = dir.join("server_setup_guide.txt");
    config
}

fn decode_label(config: &SetupConfig) -> String {
    let layout = QrComposer::from_options(&config.qr).layout();
    let image = image::open(&config.qr.output).expect("open label").to_rgb8();
    assert_eq!(image.dimensions(), (350, 380));
    assert_eq!((layout.inset, layout.qr_size), (25, 300));

    let payload = QrDecoder::new()
        .decode_region(
            &image,
            layout.inset,
            layout.inset,
            layout.qr_size,
            layout.qr_size,
        )
        .expect("decode label");
    payload.as_str().expect("utf-8 payload").to_string()
}

#[test]
fn missing_page_encodes_backend_url() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let summary = setup::run(&config).expect("run");
    assert_eq!(summary.qr.target.method, ServeMethod::Backend);
    assert_eq!(summary.qr.verified, Some(true));
    assert!(summary.qr.builtin_font);
    assert_eq!(
        decode_label(&config),
        "http://localhost:6969/frontend"
    );
}

#[test]
fn present_page_encodes_static_url() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    fs::write(&config.frontend.page, "<html></html>").unwrap();

    let summary = setup::run(&config).expect("run");
    assert_eq!(summary.qr.target.method, ServeMethod::StaticFileServer);
    assert_eq!(
        decode_label(&config),
        "http://localhost:8080/index.html"
    );
}

#[test]
fn missing_store_does_not_stop_other_phases() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let summary = setup::run(&config).expect("run");
    assert!(matches!(summary.catalog, CatalogSummary::Aborted(_)));
    assert!(config.qr.output.exists());
    assert!(config.guide.output.exists());

    let lines = summary.human_lines();
    assert!(lines.iter().any(|l| l.starts_with("Catalog error:")));
}

#[test]
fn full_run_seeds_and_overwrites_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let conn = Connection::open(&config.catalog.database).unwrap();
    schema::create_books_table(&conn).unwrap();
    drop(conn);

    fs::write(&config.qr.output, b"stale").unwrap();
    fs::write(&config.guide.output, "stale").unwrap();

    let first = setup::run(&config).expect("first run");
    match &first.catalog {
        CatalogSummary::Seeded(report) => assert_eq!(report.inserted, 15),
        other => panic!("unexpected catalog outcome: {other:?}"),
    }

    let second = setup::run(&config).expect("second run");
    match &second.catalog {
        CatalogSummary::Seeded(report) => {
            assert_eq!(report.inserted, 0);
            assert_eq!(report.already_present, 15);
        }
        other => panic!("unexpected catalog outcome: {other:?}"),
    }

    let guide = fs::read_to_string(&config.guide.output).unwrap();
    assert!(guide.starts_with("# Serving the library front-end"));
    assert_eq!(
        decode_label(&config),
        "http://localhost:6969/frontend"
    );

    let json = second.to_json();
    assert_eq!(json["catalog"]["skipped"], 15);
}

#[test]
fn disabled_guide_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.guide.enabled = false;
    config.qr.verify = false;

    let summary = setup::run(&config).expect("run");
    assert!(summary.guide.is_none());
    assert_eq!(summary.qr.verified, None);
    assert!(!config.guide.output.exists());
}

#[test]
fn preferred_font_is_used_when_it_loads() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.qr.font = Some(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSans.ttf"),
    );

    let summary = setup::run(&config).expect("run");
    assert!(!summary.qr.builtin_font);
    assert_eq!(summary.qr.verified, Some(true));
    assert_eq!(
        decode_label(&config),
        "http://localhost:6969/frontend"
    );
}
