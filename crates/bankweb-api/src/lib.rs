//! HTTP server rendering the banking views with HTMX support
//!
//! Routes are organized into modules:
//! - routes::profile: Admin profile editor (view, edit, save, delete)
//! - routes::transactions: Transaction history of the signed-in user

pub mod cookies;
pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use bankweb_config::Config;
use bankweb_core::BankBackend;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use cookies::CookieTokenStore;
pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BankBackend>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::profile::{htmx_profile_delete, htmx_profile_form, htmx_profile_save, htmx_profile_toggle_edit, page_profile};
    use routes::transactions::{htmx_transactions_list, page_transactions};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        // HTMX page routes
        .route(
            "/admin/profile/:account_number",
            get(page_profile).put(htmx_profile_save).delete(htmx_profile_delete),
        )
        .route("/transactions", get(page_transactions))
        // HTMX partial routes
        .route("/admin/profile/:account_number/form", get(htmx_profile_form))
        .route("/admin/profile/:account_number/edit", post(htmx_profile_toggle_edit))
        .route("/transactions/list", get(htmx_transactions_list))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Bankweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <link rel="stylesheet" href="https://fonts.googleapis.com/icon?family=Material+Icons">
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        bankweb_utils::escape_html(title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/transactions", "Transactions", "receipt_long"),
        ("/admin/dashboard", "Admin", "admin_panel_settings"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Bankweb</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let is_active = current_path.starts_with(path)
            || (*path == "/admin/dashboard" && current_path.starts_with("/admin"));
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'><span class='material-icons'>{}</span><span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
pub fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#, inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl+C.
pub async fn start_server(config: Config, backend: Arc<dyn BankBackend>) -> Result<(), ApiError> {
    let addr = config.bind_address();
    let state = AppState { backend, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ApiError::Bind { addr: addr.clone(), source })?;
    log::info!("Starting Bankweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /admin/profile/:account_number (Admin profile editor)");
    log::info!("  - /transactions (Transaction history)");
    log::info!("  - /api/health");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ApiError::Serve)?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response};
    use bankweb_core::testing::FakeBackend;
    use tower::ServiceExt;

    pub const ADMIN_COOKIE: &str = "adminAuthToken=admin-token";
    pub const USER_COOKIE: &str = "authToken=user-token; accountNumber=ACC-1";

    pub fn app(backend: Arc<FakeBackend>) -> Router {
        create_router(AppState {
            backend,
            config: Config::default(),
        })
    }

    pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
        app.oneshot(request).await.unwrap()
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }
}
