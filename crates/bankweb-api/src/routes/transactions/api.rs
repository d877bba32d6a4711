//! Transactions HTMX endpoint

use super::page::render_transaction_list;
use crate::routes::request_session;
use crate::AppState;
use axum::response::Html;
use bankweb_core::{ListSettings, TransactionList};

/// Load the whole history with the user's token and render it
pub async fn htmx_transactions_list(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Html<String> {
    let settings = ListSettings::from(&state.config);
    let (store, session) = request_session(&headers, &settings.keys);
    let list = TransactionList::load(&session, &store, state.backend.as_ref(), settings).await;
    Html(render_transaction_list(&list))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use bankweb_core::testing::{transaction, BackendCall, FakeBackend};
    use std::sync::Arc;

    fn list_request(cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get("/transactions/list").header("hx-request", "true");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_page_shell_shows_loading() {
        let backend = Arc::new(FakeBackend::new());
        let response = send(
            app(backend.clone()),
            Request::get("/transactions").body(Body::empty()).unwrap(),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("Loading transactions..."));
        assert!(html.contains("hx-get='/transactions/list'"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_list_uses_user_token_and_account() {
        let backend = Arc::new(FakeBackend::new().with_transactions(vec![
            transaction("1", "ACC-1", "ACC-2", 10.0, "TRANSFER", "2024-01-15T10:00:00"),
            transaction("2", "ACC-3", "ACC-1", 20.0, "TRANSFER", "2024-01-16T10:00:00"),
        ]));
        let response = send(app(backend.clone()), list_request(Some(USER_COOKIE))).await;

        let html = body_text(response).await;
        let sent = html.find(">Sent</span>").unwrap();
        let received = html.find(">Received</span>").unwrap();
        assert!(sent < received);
        assert!(html.contains("Date:</span> 1/16/2024"));
        assert_eq!(
            backend.calls(),
            vec![BackendCall::FetchTransactions { token: "user-token".to_string() }]
        );
    }

    #[tokio::test]
    async fn test_missing_token_skips_fetch() {
        let backend = Arc::new(FakeBackend::new().with_transactions(vec![]));
        let response = send(app(backend.clone()), list_request(Some("accountNumber=ACC-1"))).await;

        let html = body_text(response).await;
        assert!(html.contains("No authentication token found."));
        assert!(html.contains("No previous transactions"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_failure_message() {
        let backend = Arc::new(FakeBackend::new());
        let response = send(app(backend), list_request(Some(USER_COOKIE))).await;

        let html = body_text(response).await;
        assert!(html.contains("Failed to fetch transactions."));
        assert!(!html.contains("<ul"));
    }
}
