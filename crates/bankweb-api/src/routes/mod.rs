//! Route modules for the API server
//!
//! - profile: Admin profile editor
//! - transactions: Transaction history of the signed-in user
//!
//! Each module follows a consistent structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: HTMX interaction endpoints
//! - page.rs: HTMX page rendering

pub mod profile;
pub mod transactions;

use crate::CookieTokenStore;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use bankweb_core::{SessionContext, SessionKeys};

/// Session derived from the request's cookies
pub(crate) fn request_session(headers: &HeaderMap, keys: &SessionKeys) -> (CookieTokenStore, SessionContext) {
    let store = CookieTokenStore::from_headers(headers);
    let session = SessionContext::from_store(&store, keys);
    (store, session)
}

/// Send the browser elsewhere.
///
/// HTMX requests get `HX-Redirect` so the whole page navigates instead of
/// swapping the login page into a fragment.
pub(crate) fn redirect(headers: &HeaderMap, target: &str) -> Response {
    let Ok(location) = HeaderValue::from_str(target) else {
        log::error!("Redirect target is not a valid header value: {:?}", target);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    if crate::is_htmx_request(headers) {
        (StatusCode::OK, [("hx-redirect", location)]).into_response()
    } else {
        (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
    }
}
