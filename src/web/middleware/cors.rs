//! Cross-origin policy for browser clients.

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Methods the catalog API answers.
const METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// Parse configured origins, skipping (and logging) unusable entries.
fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect()
}

/// Build the CORS layer for `web.cors_origins`.
///
/// No usable origin means any origin may call the API. There are no
/// credentials, so only the JSON request headers are allowed.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let parsed = parse_origins(origins);
    let layer = CorsLayer::new()
        .allow_methods(METHODS)
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    if parsed.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(parsed))
    }
}
