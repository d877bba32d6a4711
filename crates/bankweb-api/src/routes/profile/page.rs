//! Profile page shell and editor fragment rendering

use crate::routes::{redirect, request_session};
use crate::{page_response, AppState};
use axum::extract::Path;
use axum::response::{Html, IntoResponse, Response};
use bankweb_core::profile::LOADING_MESSAGE;
use bankweb_core::{EditMode, LoadState, Navigation, ProfileEditor, ProfileField, ProfileSettings};
use bankweb_utils::escape_html;

/// Base URL of one account's profile routes
pub(crate) fn profile_path(account_number: &str) -> String {
    format!("/admin/profile/{}", urlencoding::encode(account_number))
}

/// Profile page. Checks the admin session up front, then lets HTMX load the form.
pub async fn page_profile(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
    Path(account_number): Path<String>,
) -> Response {
    let settings = ProfileSettings::from(&state.config);
    let (_, session) = request_session(&headers, &settings.keys);
    if let Err(nav) = ProfileEditor::require_admin(&session, &settings) {
        log::info!("No admin session for profile {}, redirecting to {}", account_number, nav.target);
        return redirect(&headers, &nav.href());
    }

    let base = profile_path(&account_number);
    let content = format!(
        r#"<div class='max-w-2xl mx-auto'>
    <div class='flex items-center gap-2 mb-6'>
        <a href='{}' class='text-gray-500 hover:text-indigo-600'><span class='material-icons'>arrow_back</span></a>
        <h2 class='text-2xl font-bold'>Account Profile</h2>
    </div>
    <div id='profile-editor' hx-get='{}/form' hx-trigger='load' hx-swap='outerHTML'>
        <p class='text-gray-500'>{}</p>
    </div>
</div>"#,
        escape_html(&state.config.routes.admin_dashboard),
        escape_html(&base),
        LOADING_MESSAGE
    );

    let current_path = format!("/admin/profile/{}", account_number);
    Html(page_response(&headers, "Account Profile", &current_path, &content)).into_response()
}

/// Editor fragment. Swapped in place of `#profile-editor` after every interaction.
pub fn render_profile_editor(editor: &ProfileEditor) -> String {
    let inner = match editor.state() {
        LoadState::Loading => format!("<p class='text-gray-500'>{}</p>", LOADING_MESSAGE),
        LoadState::Errored(message) => render_error(message),
        LoadState::Deleted => render_deleted(editor),
        LoadState::Ready => render_form(editor),
    };
    format!(
        "<div id='profile-editor' class='bg-white rounded-lg shadow p-6'>{}</div>",
        inner
    )
}

fn render_error(message: &str) -> String {
    format!(
        "<p class='error text-red-600 bg-red-50 rounded px-3 py-2 mb-4'>{}</p>",
        escape_html(message)
    )
}

fn render_deleted(editor: &ProfileEditor) -> String {
    let mut html = String::new();
    if let Some(message) = editor.success() {
        html.push_str(&format!(
            "<p class='success text-green-700 bg-green-50 rounded px-3 py-2'>{}</p>",
            escape_html(message)
        ));
    }
    if let Some(nav) = editor.navigation() {
        html.push_str(&navigation_script(nav));
    }
    html
}

/// Inline script performing a delayed client-side navigation
fn navigation_script(nav: &Navigation) -> String {
    let method = if nav.replace { "replace" } else { "assign" };
    format!(
        "<script>setTimeout(function () {{ window.location.{}('{}'); }}, {});</script>",
        method,
        js_string(&nav.href()),
        nav.delay.as_millis()
    )
}

/// Escape for a single-quoted JavaScript string inside a `<script>` element
fn js_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '<' => escaped.push_str("\\x3c"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_form(editor: &ProfileEditor) -> String {
    let base = escape_html(&profile_path(editor.account_number()));
    let mut html = String::new();

    if let Some(message) = editor.error() {
        html.push_str(&render_error(message));
    }

    html.push_str(&format!(
        "<form id='profile-form' hx-target='#profile-editor' hx-swap='outerHTML'>\
         <input type='hidden' name='mode' value='{}'>",
        mode_value(editor.mode())
    ));

    for field in ProfileField::ALL {
        html.push_str(&render_field(editor, field));
    }

    html.push_str("<div class='flex gap-3 mt-6'>");
    match editor.mode() {
        EditMode::Viewing => {
            html.push_str(&format!(
                "<button type='button' hx-post='{}/edit' class='px-4 py-2 rounded-lg bg-indigo-600 text-white hover:bg-indigo-700'>Edit Profile</button>",
                base
            ));
            html.push_str(&format!(
                "<button type='button' hx-delete='{}' class='delete px-4 py-2 rounded-lg bg-red-600 text-white hover:bg-red-700'>Delete Profile</button>",
                base
            ));
        }
        EditMode::Editing => {
            html.push_str(&format!(
                "<button type='button' hx-put='{}' class='px-4 py-2 rounded-lg bg-indigo-600 text-white hover:bg-indigo-700'>Save Profile</button>",
                base
            ));
            html.push_str(&format!(
                "<button type='button' hx-post='{}/edit' class='px-4 py-2 rounded-lg border text-gray-700 hover:bg-gray-50'>Cancel</button>",
                base
            ));
        }
    }
    html.push_str("</div></form>");
    html
}

fn mode_value(mode: EditMode) -> &'static str {
    match mode {
        EditMode::Viewing => "viewing",
        EditMode::Editing => "editing",
    }
}

/// One labelled input. Disabled inputs are never submitted, so their raw
/// value rides along in a hidden input instead.
fn render_field(editor: &ProfileEditor, field: ProfileField) -> String {
    let id = format!("profile-{}", field.form_name());
    let value = escape_html(&editor.display_value(field));
    let enabled = editor.is_field_enabled(field);

    let input = if enabled {
        format!(
            "<input id='{}' type='{}' name='{}' value='{}' class='flex-1 outline-none bg-transparent'>",
            id,
            field.input_type(),
            field.form_name(),
            value
        )
    } else {
        let mut input = format!(
            "<input id='{}' type='{}' value='{}' class='flex-1 outline-none bg-transparent text-gray-500' disabled>",
            id,
            field.input_type(),
            value
        );
        if field != ProfileField::AccountNumber {
            input.push_str(&format!(
                "<input type='hidden' name='{}' value='{}'>",
                field.form_name(),
                escape_html(editor.fields().get(field))
            ));
        }
        input
    };

    let background = if enabled { "bg-white" } else { "bg-gray-50" };
    format!(
        "<div class='mb-4'><label for='{}' class='block text-sm font-medium text-gray-700 mb-1'>{}</label>\
         <div class='flex items-center gap-2 border rounded-lg px-3 py-2 {}'>\
         <span class='material-icons text-gray-400'>{}</span>{}</div></div>",
        id,
        field.label(),
        background,
        field.icon(),
        input
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankweb_core::ProfileFields;

    fn fields() -> ProfileFields {
        ProfileFields {
            name: "Ada <Lovelace>".to_string(),
            email: "ada@example.com".to_string(),
            country_code: "GB".to_string(),
            balance: "1500.5".to_string(),
            ..ProfileFields::default()
        }
    }

    #[test]
    fn test_viewing_form_is_read_only() {
        let editor = ProfileEditor::restore("ACC-1001", fields(), EditMode::Viewing, ProfileSettings::default());
        let html = render_profile_editor(&editor);

        assert!(html.contains("id='profile-name' type='text' value='Ada &lt;Lovelace&gt;'"));
        assert!(html.contains("<input type='hidden' name='name' value='Ada &lt;Lovelace&gt;'>"));
        assert!(html.contains("id='profile-balance' type='text' value='$1500.5'"));
        assert!(html.contains("<input type='hidden' name='balance' value='1500.5'>"));
        assert!(html.contains("id='profile-email' type='email'"));
        assert!(html.contains("<input type='hidden' name='mode' value='viewing'>"));
        assert!(html.contains(">Edit Profile</button>"));
        assert!(html.contains("hx-delete='/admin/profile/ACC-1001'"));
        assert!(!html.contains("Save Profile"));
    }

    #[test]
    fn test_editing_form_enables_editable_fields_only() {
        let editor = ProfileEditor::restore("ACC-1001", fields(), EditMode::Editing, ProfileSettings::default());
        let html = render_profile_editor(&editor);

        assert!(html.contains("name='name' value='Ada &lt;Lovelace&gt;' class='flex-1 outline-none bg-transparent'>"));
        assert!(html.contains("name='balance' value='$1500.5'"));
        assert!(html.contains("id='profile-countryCode' type='text' value='GB' class='flex-1 outline-none bg-transparent text-gray-500' disabled>"));
        assert!(html.contains("<input type='hidden' name='countryCode' value='GB'>"));
        assert!(html.contains("id='profile-accountNumber' type='text' value='ACC-1001' class='flex-1 outline-none bg-transparent text-gray-500' disabled>"));
        assert!(html.contains("hx-put='/admin/profile/ACC-1001'"));
        assert!(html.contains(">Cancel</button>"));
        assert!(!html.contains("Delete Profile"));
    }

    #[test]
    fn test_account_number_is_encoded_in_urls() {
        let editor = ProfileEditor::restore("A/1 2", fields(), EditMode::Viewing, ProfileSettings::default());
        let html = render_profile_editor(&editor);
        assert!(html.contains("hx-post='/admin/profile/A%2F1%202/edit'"));
    }

    #[test]
    fn test_navigation_script() {
        let nav = Navigation {
            target: "/admin/dash'board".to_string(),
            delay: std::time::Duration::from_millis(2000),
            replace: false,
            refresh: true,
        };
        assert_eq!(
            navigation_script(&nav),
            "<script>setTimeout(function () { window.location.assign('/admin/dash\\'board?refresh=true'); }, 2000);</script>"
        );
    }

    #[test]
    fn test_loading_state() {
        let editor = ProfileEditor::loading("ACC-1001", ProfileSettings::default());
        assert!(render_profile_editor(&editor).contains("Loading..."));
    }
}
