//! Server setup guide written next to the QR label

use crate::config::FrontendOptions;
use crate::error::Result;
use crate::frontend::{url_path, url_port};
use std::fs;
use std::path::Path;

const DEFAULT_STATIC_PORT: u16 = 8080;

/// Render the guide for the configured front-end URLs.
pub fn render(options: &FrontendOptions) -> String {
    let static_port = url_port(&options.static_url).unwrap_or(DEFAULT_STATIC_PORT);
    let backend_route = url_path(&options.backend_url);
    let page = options
        .page
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index.html".to_string());

    format!(
        "\
# Serving the library front-end

## Option 1: Python static file server (recommended)
Run from the directory that contains {page}:

    python3 -m http.server {static_port}

The QR code then resolves to {static_url}

## Option 2: Node.js http-server
    npm install -g http-server
    http-server -p {static_port}

## Option 3: Serve the page from the backend
Add a route that returns the contents of {page}:

    GET {backend_route}  ->  contents of {page}

The QR code then resolves to {backend_url}

## Option 4: Static hosting (permanent)
1. Create a repository and commit {page}
2. Enable GitHub Pages (or any static host) for it
3. Point the QR code at the published URL
",
        static_url = options.static_url,
        backend_url = options.backend_url,
    )
}

/// Write `contents` to `path`, replacing any existing file.
pub fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    tracing::info!(path = %path.display(), "Server setup guide saved");
    Ok(())
}
