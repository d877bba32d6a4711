//! Profile HTMX endpoints - form loading, edit toggle, save and delete

use super::page::render_profile_editor;
use crate::routes::{redirect, request_session};
use crate::{AppState, CookieTokenStore};
use axum::extract::{Form, Path, Query};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use bankweb_core::{EditMode, MountOutcome, ProfileEditor, ProfileField, ProfileFields, ProfileSettings};

/// View state posted back by the profile form
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileForm {
    pub mode: EditMode,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub country_code: String,
    pub balance: String,
}

impl ProfileForm {
    fn into_fields(self) -> ProfileFields {
        ProfileFields {
            account_number: String::new(),
            name: self.name,
            email: self.email,
            address: self.address,
            phone_number: self.phone_number,
            country_code: self.country_code,
            balance: self.balance,
        }
    }
}

/// Rebuild the editor the browser is showing.
/// Edited values go through `set_field` so the balance loses its symbol.
fn editor_from_form(account_number: &str, form: ProfileForm, settings: ProfileSettings) -> ProfileEditor {
    let mode = form.mode;
    let fields = form.into_fields();
    let mut editor = ProfileEditor::restore(account_number, fields.clone(), mode, settings);
    if mode == EditMode::Editing {
        for field in ProfileField::ALL.into_iter().filter(|f| f.is_editable()) {
            editor.set_field(field, fields.get(field));
        }
    }
    editor
}

/// Admin session check shared by the interactions. Returns the token store
/// on success, the login redirect otherwise.
fn admin_store(headers: &HeaderMap, settings: &ProfileSettings) -> Result<CookieTokenStore, Response> {
    let (store, session) = request_session(headers, &settings.keys);
    match ProfileEditor::require_admin(&session, settings) {
        Ok(()) => Ok(store),
        Err(nav) => {
            log::info!("No admin session, redirecting to {}", nav.target);
            Err(redirect(headers, &nav.href()))
        }
    }
}

fn editor_response(editor: &ProfileEditor) -> Response {
    Html(render_profile_editor(editor)).into_response()
}

/// Fetch the profile and render the read-only form
pub async fn htmx_profile_form(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    Path(account_number): Path<String>,
) -> Response {
    let settings = ProfileSettings::from(&state.config);
    let (store, session) = request_session(&headers, &settings.keys);

    match ProfileEditor::mount(&session, &store, state.backend.as_ref(), &account_number, settings).await {
        MountOutcome::Redirect(nav) => redirect(&headers, &nav.href()),
        MountOutcome::Mounted(editor) => editor_response(&editor),
    }
}

/// Switch between viewing and editing; no backend call
pub async fn htmx_profile_toggle_edit(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    Path(account_number): Path<String>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let settings = ProfileSettings::from(&state.config);
    if let Err(response) = admin_store(&headers, &settings) {
        return response;
    }

    let mut editor = editor_from_form(&account_number, form, settings);
    editor.toggle_edit();
    editor_response(&editor)
}

/// Save every field in one update call
pub async fn htmx_profile_save(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    Path(account_number): Path<String>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let settings = ProfileSettings::from(&state.config);
    let store = match admin_store(&headers, &settings) {
        Ok(store) => store,
        Err(response) => return response,
    };

    let mut editor = editor_from_form(&account_number, form, settings);
    if let Err(e) = editor.save(&store, state.backend.as_ref()).await {
        log::debug!("Save of profile {} not applied: {}", account_number, e);
    }
    editor_response(&editor)
}

/// Delete the account. HTMX sends DELETE parameters in the query string.
pub async fn htmx_profile_delete(
    state: axum::extract::State<AppState>,
    headers: HeaderMap,
    Path(account_number): Path<String>,
    Query(form): Query<ProfileForm>,
) -> Response {
    let settings = ProfileSettings::from(&state.config);
    let store = match admin_store(&headers, &settings) {
        Ok(store) => store,
        Err(response) => return response,
    };

    let mut editor = editor_from_form(&account_number, form, settings);
    if let Err(e) = editor.delete(&store, state.backend.as_ref()).await {
        log::debug!("Delete of account {} not applied: {}", account_number, e);
    }
    editor_response(&editor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use bankweb_core::testing::{sample_profile, BackendCall, FakeBackend};
    use std::sync::Arc;

    const FORM_BODY: &str = "mode=viewing&name=Ada+Lovelace&email=ada%40example.com&address=12+St+James%27s+Square\
        &phoneNumber=%2B44+20+7946+0000&countryCode=GB&balance=1500.5";

    fn form_request(method: &str, uri: &str, cookie: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("hx-request", "true")
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_page_without_admin_redirects_to_login() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()));
        let response = send(
            app(backend.clone()),
            Request::get("/admin/profile/ACC-1001").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/login");
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_page_shell_shows_loading() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()));
        let response = send(
            app(backend.clone()),
            Request::get("/admin/profile/ACC-1001")
                .header(header::COOKIE, ADMIN_COOKIE)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Loading..."));
        assert!(html.contains("hx-get='/admin/profile/ACC-1001/form' hx-trigger='load'"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_form_renders_fetched_profile() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()));
        let response = send(
            app(backend.clone()),
            Request::get("/admin/profile/ACC-1001/form")
                .header("hx-request", "true")
                .header(header::COOKIE, ADMIN_COOKIE)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("value='Ada Lovelace'"));
        assert!(html.contains("value='12 St James&#39;s Square'"));
        assert!(html.contains("value='$1500.5'"));
        assert!(html.contains("Edit Profile"));
        assert_eq!(
            backend.calls(),
            vec![BackendCall::FetchProfile {
                account_number: "ACC-1001".to_string(),
                token: "admin-token".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_form_fetch_failure_shows_only_error() {
        let backend = Arc::new(FakeBackend::new());
        let response = send(
            app(backend),
            Request::get("/admin/profile/ACC-1001/form")
                .header(header::COOKIE, ADMIN_COOKIE)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("Failed to fetch profile data."));
        assert!(!html.contains("<form"));
    }

    #[tokio::test]
    async fn test_htmx_interaction_without_admin_uses_hx_redirect() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()));
        let response = send(
            app(backend.clone()),
            form_request("PUT", "/admin/profile/ACC-1001", USER_COOKIE, FORM_BODY),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["hx-redirect"], "/admin/login");
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_toggle_edit_keeps_values_and_calls_nothing() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()));
        let response = send(
            app(backend.clone()),
            form_request("POST", "/admin/profile/ACC-1001/edit", ADMIN_COOKIE, FORM_BODY),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("<input type='hidden' name='mode' value='editing'>"));
        assert!(html.contains("name='name' value='Ada Lovelace'"));
        assert!(html.contains("name='balance' value='$1500.5'"));
        assert!(html.contains("Save Profile"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_save_sends_all_fields_and_leaves_edit_mode() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()));
        let body = "mode=editing&name=Grace+Hopper&email=grace%40example.com&address=Arlington\
            &phoneNumber=555&countryCode=US&balance=%242000";
        let response = send(
            app(backend.clone()),
            form_request("PUT", "/admin/profile/ACC-1001", ADMIN_COOKIE, body),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("Edit Profile"));
        assert!(html.contains("value='$2000'"));

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        let BackendCall::UpdateProfile { account_number, update } = &calls[0] else {
            panic!("expected update call, got {:?}", calls);
        };
        assert_eq!(account_number, "ACC-1001");
        assert_eq!(update.name, "Grace Hopper");
        assert_eq!(update.email, "grace@example.com");
        assert_eq!(update.country_code, "US");
        assert_eq!(update.balance, serde_json::json!(2000));
    }

    #[tokio::test]
    async fn test_failed_save_stays_in_edit_mode_with_error() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()).failing_update());
        let body = "mode=editing&name=Unsaved&email=&address=&phoneNumber=&countryCode=GB&balance=%2410";
        let response = send(
            app(backend.clone()),
            form_request("PUT", "/admin/profile/ACC-1001", ADMIN_COOKIE, body),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("Failed to save profile data."));
        assert!(html.contains("name='name' value='Unsaved'"));
        assert!(html.contains("Save Profile"));
    }

    #[tokio::test]
    async fn test_save_in_viewing_mode_is_ignored() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()));
        let response = send(
            app(backend.clone()),
            form_request("PUT", "/admin/profile/ACC-1001", ADMIN_COOKIE, FORM_BODY),
        )
        .await;

        assert!(body_text(response).await.contains("Edit Profile"));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_success_schedules_dashboard_redirect() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()));
        let response = send(
            app(backend.clone()),
            Request::delete("/admin/profile/ACC-1001?mode=viewing&name=Ada")
                .header("hx-request", "true")
                .header(header::COOKIE, ADMIN_COOKIE)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("Profile deleted successfully."));
        assert!(html.contains("window.location.assign('/admin/dashboard?refresh=true'); }, 2000);"));
        assert!(!html.contains("<form"));
        assert_eq!(
            backend.calls(),
            vec![BackendCall::Delete { account_number: "ACC-1001".to_string() }]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_shows_error_without_redirect() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()).failing_delete());
        let response = send(
            app(backend.clone()),
            Request::delete("/admin/profile/ACC-1001?mode=viewing&name=Ada")
                .header(header::COOKIE, ADMIN_COOKIE)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("Failed to delete profile."));
        assert!(html.contains("value='Ada'"));
        assert!(!html.contains("refresh=true"));
    }

    #[tokio::test]
    async fn test_delete_while_editing_makes_no_call() {
        let backend = Arc::new(FakeBackend::new().with_profile(sample_profile()));
        let response = send(
            app(backend.clone()),
            Request::delete("/admin/profile/ACC-1001?mode=editing&name=Ada")
                .header(header::COOKIE, ADMIN_COOKIE)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        let html = body_text(response).await;
        assert!(html.contains("Save Profile"));
        assert!(!html.contains("Profile deleted successfully."));
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn test_editor_from_form_strips_balance_symbol_when_editing() {
        let form = ProfileForm {
            mode: EditMode::Editing,
            balance: "$75".to_string(),
            ..ProfileForm::default()
        };
        let editor = editor_from_form("ACC-1", form, ProfileSettings::default());
        assert_eq!(editor.fields().balance, "75");
        assert_eq!(editor.fields().account_number, "ACC-1");
    }
}
