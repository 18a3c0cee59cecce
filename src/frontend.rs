//! Choice of the URL the QR label points at

use crate::config::FrontendOptions;
use serde::Serialize;

/// How the front-end page is expected to be served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServeMethod {
    /// The page file is present and served by a static file server
    StaticFileServer,
    /// The page is served by the application backend route
    Backend,
}

impl ServeMethod {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::StaticFileServer => "Static file server",
            Self::Backend => "Application backend",
        }
    }
}

/// Encoded URL and the serving method it assumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontendTarget {
    /// URL to encode
    pub url: String,
    /// Serving method the URL belongs to
    pub method: ServeMethod,
}

/// Pick the static URL when the page file exists, the backend URL otherwise.
pub fn select_target(options: &FrontendOptions) -> FrontendTarget {
    if options.page.exists() {
        tracing::info!(page = %options.page.display(), "Front-end page found");
        FrontendTarget {
            url: options.static_url.clone(),
            method: ServeMethod::StaticFileServer,
        }
    } else {
        tracing::warn!(page = %options.page.display(), "Front-end page not found");
        FrontendTarget {
            url: options.backend_url.clone(),
            method: ServeMethod::Backend,
        }
    }
}

/// Port of `url`, if it names one explicitly.
pub fn url_port(url: &str) -> Option<u16> {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split('/').next()?;
    let (_, port) = authority.rsplit_once(':')?;
    port.parse().ok()
}

/// Path component of `url`, `/` when empty.
pub fn url_path(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    match rest.find('/') {
        Some(index) => &rest[index..],
        None => "/",
    }
}
