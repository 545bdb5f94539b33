// Dev-server proxy and build-output profiles for the frontend toolchain.
//
// In production the backend serves the built frontend bundle out of its own
// static directory; during development a frontend dev server proxies backend
// routes to a locally running instance instead. The two checked-in bundler
// setups are mutually exclusive variants of the same idea, so they are
// expressed here as two constructors of one profile type that tooling can
// consume as JSON.

use serde::Serialize;

/// Local backend address both profiles proxy to by default.
pub const DEFAULT_BACKEND: &str = "http://localhost:8000";

// ---------------------------------------------------------------------------
// Profile types
// ---------------------------------------------------------------------------

/// One dev-server forwarding rule: requests whose path starts with `prefix`
/// go to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyRule {
    pub prefix: String,
    pub target: String,
    pub change_origin: bool,
}

impl ProxyRule {
    fn new(prefix: &str, target: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            target: target.to_string(),
            change_origin: true,
        }
    }
}

/// Where the production bundle is written, relative to the frontend root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildOutput {
    pub out_dir: String,
    pub assets_dir: String,
    /// Emit an asset manifest so the backend can resolve hashed filenames.
    pub manifest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevServerProfile {
    pub proxy: Vec<ProxyRule>,
    pub build: BuildOutput,
}

impl DevServerProfile {
    /// Generic static-output variant: bundle lands in a local `static/dist`
    /// directory, and the dev server forwards API, media, and static routes
    /// to the backend.
    pub fn static_build(backend: &str) -> Self {
        Self {
            proxy: vec![
                ProxyRule::new("/api", backend),
                ProxyRule::new("/media", backend),
                ProxyRule::new("/static", backend),
            ],
            build: BuildOutput {
                out_dir: "static/dist".to_string(),
                assets_dir: "assets".to_string(),
                manifest: false,
                entry: None,
            },
        }
    }

    /// Single-page-app variant wired for the UI framework's build: output
    /// goes straight into the backend's static directory with a manifest,
    /// and only API routes are proxied in development.
    pub fn spa(backend: &str) -> Self {
        Self {
            proxy: vec![ProxyRule::new("/api", backend)],
            build: BuildOutput {
                out_dir: "../backend/static/dist".to_string(),
                assets_dir: String::new(),
                manifest: true,
                entry: Some("src/main.js".to_string()),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
