//! Transactions page shell and list rendering

use crate::{page_response, AppState};
use axum::response::Html;
use bankweb_core::transactions::{EMPTY_MESSAGE, LOADING_MESSAGE};
use bankweb_core::{Direction, Parties, TransactionEntry, TransactionList};
use bankweb_utils::escape_html;

/// Transactions page; the list itself arrives through HTMX
pub async fn page_transactions(
    _state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Html<String> {
    let content = format!(
        r#"<div class='max-w-3xl mx-auto'>
    <h2 class='text-2xl font-bold mb-6'>Transactions</h2>
    <div id='transactions' hx-get='/transactions/list' hx-trigger='load' hx-swap='outerHTML'>
        <p class='text-gray-500'>{}</p>
    </div>
</div>"#,
        LOADING_MESSAGE
    );
    Html(page_response(&headers, "Transactions", "/transactions", &content))
}

/// List fragment: error, empty notice, or one item per transaction
pub fn render_transaction_list(list: &TransactionList) -> String {
    let mut html = String::from("<div id='transactions' class='bg-white rounded-lg shadow p-6'>");

    if let Some(message) = list.error() {
        html.push_str(&format!(
            "<p class='error text-red-600 bg-red-50 rounded px-3 py-2 mb-4'>{}</p>",
            escape_html(message)
        ));
    }

    if list.is_empty() {
        html.push_str(&format!("<p class='text-gray-500'>{}</p>", EMPTY_MESSAGE));
    } else {
        html.push_str("<ul class='transactions-list divide-y'>");
        for entry in list.entries() {
            html.push_str(&render_entry(&entry));
        }
        html.push_str("</ul>");
    }

    html.push_str("</div>");
    html
}

fn render_entry(entry: &TransactionEntry) -> String {
    let parties = match &entry.parties {
        Parties::To(account) => detail("To Account Number", account),
        Parties::From(account) => detail("From Account Number", account),
        Parties::Both { from, to } => {
            format!("{}{}", detail("From Account Number", from), detail("To Account Number", to))
        }
    };
    let color = match entry.direction {
        Direction::Sent => "text-red-600",
        Direction::Received => "text-green-600",
        Direction::Other(_) => "text-gray-700",
    };

    format!(
        "<li class='py-3' data-id='{}'>{}{}<p class='text-sm'><span class='font-medium'>Type:</span> <span class='{}'>{}</span></p>{}</li>",
        escape_html(&entry.id),
        parties,
        detail("Amount", &entry.amount),
        color,
        escape_html(entry.direction.label()),
        detail("Date", &entry.date)
    )
}

fn detail(label: &str, value: &str) -> String {
    format!(
        "<p class='text-sm'><span class='font-medium'>{}:</span> {}</p>",
        label,
        escape_html(value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bankweb_core::testing::{transaction, FakeBackend};
    use bankweb_core::{ListSettings, MemoryTokenStore, SessionContext};

    async fn list_with(transactions: Vec<bankweb_core::Transaction>) -> TransactionList {
        let backend = FakeBackend::new().with_transactions(transactions);
        TransactionList::load(
            &SessionContext::user("ACC-1"),
            &MemoryTokenStore::new().with("authToken", "t"),
            &backend,
            ListSettings::default(),
        )
        .await
    }

    #[tokio::test]
    async fn test_sent_entry_shows_target_only() {
        let list = list_with(vec![transaction("1", "ACC-1", "ACC-2", 40.0, "TRANSFER", "2024-03-05")]).await;
        let html = render_transaction_list(&list);

        assert!(html.contains("To Account Number:</span> ACC-2"));
        assert!(!html.contains("From Account Number"));
        assert!(html.contains("Amount:</span> $40"));
        assert!(html.contains(">Sent</span>"));
        assert!(html.contains("Date:</span> 3/5/2024"));
    }

    #[tokio::test]
    async fn test_received_entry_shows_source_only() {
        let list = list_with(vec![transaction("1", "ACC-2", "ACC-1", 40.0, "TRANSFER", "2024-03-05")]).await;
        let html = render_transaction_list(&list);

        assert!(html.contains("From Account Number:</span> ACC-2"));
        assert!(!html.contains("To Account Number"));
        assert!(html.contains(">Received</span>"));
    }

    #[tokio::test]
    async fn test_other_entry_escapes_type() {
        let list = list_with(vec![transaction("1", "X", "Y", 1.0, "<b>FEE</b>", "bad")]).await;
        let html = render_transaction_list(&list);

        assert!(html.contains("From Account Number:</span> X"));
        assert!(html.contains("To Account Number:</span> Y"));
        assert!(html.contains("&lt;b&gt;FEE&lt;/b&gt;"));
        assert!(html.contains("Date:</span> Invalid Date"));
    }

    #[tokio::test]
    async fn test_empty_list_has_no_items() {
        let list = list_with(vec![]).await;
        let html = render_transaction_list(&list);
        assert!(html.contains("No previous transactions"));
        assert!(!html.contains("<ul"));
    }

    #[test]
    fn test_loading_state_renders_empty_notice() {
        let list = TransactionList::loading(ListSettings::default());
        let html = render_transaction_list(&list);
        assert!(html.contains("No previous transactions"));
        assert!(!html.contains("class='error"));
    }
}
