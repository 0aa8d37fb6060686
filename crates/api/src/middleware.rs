use account_models::{Config, SecurityConfig};
use axum::{
    extract::{DefaultBodyLimit, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::debug;

const DEFAULT_CSP: &str = "default-src 'self'; object-src 'none'";
const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Wrap a router with tracing, body limits, CORS, security headers and
/// optional HTTPS enforcement.
pub fn apply_middleware<S>(router: Router<S>, config: &Config) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let body_limit = (config.server.max_request_body_size_kb * 1024) as usize;
    let csp = HeaderValue::from_str(&config.security.content_security_policy)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_CSP));

    router
        .layer(middleware::from_fn_with_state(
            config.security.clone(),
            enforce_https,
        ))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Redirects plain-http traffic to https when enabled and stamps HSTS on
/// https responses. The scheme comes from `X-Forwarded-Proto` since TLS is
/// terminated in front of the service. `/health` is never redirected.
pub async fn enforce_https(
    State(security): State<SecurityConfig>,
    request: Request,
    next: Next,
) -> Response {
    let is_https = request_scheme(request.headers()) == "https";

    if security.force_https && !is_https && request.uri().path() != "/health" {
        if let Some(location) = https_location(&request) {
            debug!("Redirecting to {:?}", location);
            return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response();
        }
    }

    let mut response = next.run(request).await;
    if is_https {
        let hsts = format!("max-age={}; includeSubDomains", security.hsts_max_age_secs);
        if let Ok(value) = HeaderValue::from_str(&hsts) {
            response
                .headers_mut()
                .insert(header::STRICT_TRANSPORT_SECURITY, value);
        }
    }
    response
}

pub fn request_scheme(headers: &HeaderMap) -> String {
    headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_else(|| "http".to_string())
}

fn https_location(request: &Request) -> Option<HeaderValue> {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())?;
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    HeaderValue::from_str(&format!("https://{host}{path_and_query}")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_scheme_defaults_to_http() {
        assert_eq!(request_scheme(&HeaderMap::new()), "http");
    }

    #[test]
    fn test_request_scheme_takes_first_forwarded_value() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_PROTO, HeaderValue::from_static("HTTPS, http"));
        assert_eq!(request_scheme(&headers), "https");
    }
}
