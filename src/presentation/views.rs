// HTML rendering for the dashboard and settings views
use crate::domain::credentials::Credentials;
use crate::domain::metrics::DashboardMetrics;
use crate::domain::view_state::ViewState;

const STYLE: &str = "\
body{font-family:sans-serif;background:#f3f4f6;color:#1f2937;margin:0}\
nav{background:#1f2937;padding:1rem}nav a{color:#fff;margin-right:1rem}\
main{max-width:64rem;margin:2rem auto;padding:0 1rem}\
.cards{display:grid;grid-template-columns:repeat(auto-fit,minmax(14rem,1fr));gap:1.5rem}\
.card{background:#fff;border-radius:.5rem;box-shadow:0 1px 3px #0002;padding:1.5rem;display:flex;justify-content:space-between}\
.card-value{font-size:1.5rem;font-weight:bold}\
.spinner{margin:4rem auto;width:8rem;height:8rem;border-radius:50%;border-bottom:2px solid #111;animation:spin 1s linear infinite}\
@keyframes spin{to{transform:rotate(360deg)}}\
.alert{background:#fee2e2;border-left:4px solid #ef4444;color:#b91c1c;padding:1rem;margin:1rem 0}\
.notice-success{background:#dcfce7;color:#166534;padding:.75rem;border-radius:.375rem}\
.notice-failure{background:#fee2e2;color:#991b1b;padding:.75rem;border-radius:.375rem}\
label{display:block;margin-top:1rem}input{width:100%}";

/// Inline message under the settings form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">{head_extra}\
         <title>{title}</title><style>{STYLE}</style></head>\
         <body><nav><a href=\"/dashboard\">Dashboard</a><a href=\"/settings\">Settings</a></nav>\
         <main>{body}</main></body></html>",
        title = escape(title),
    )
}

pub fn error_block(message: &str) -> String {
    format!(
        "<div class=\"alert\" role=\"alert\"><p><strong>Error</strong></p><p>{}</p></div>",
        escape(message)
    )
}

fn metric_cards(metrics: &DashboardMetrics) -> String {
    let cards: String = metrics
        .cards()
        .iter()
        .map(|(title, value)| {
            format!(
                "<div class=\"card\"><h2>{}</h2><span class=\"card-value\">{}</span></div>",
                escape(title),
                escape(value)
            )
        })
        .collect();
    format!("<div class=\"cards\">{}</div>", cards)
}

pub fn dashboard_page(state: &ViewState<DashboardMetrics>) -> String {
    match state {
        // Poll until the cycle settles
        ViewState::Loading => layout(
            "Dashboard",
            "<meta http-equiv=\"refresh\" content=\"1\">",
            "<div class=\"spinner\" role=\"status\" aria-busy=\"true\"></div>",
        ),
        ViewState::Error { message } => layout("Dashboard", "", &error_block(message)),
        ViewState::Ready { data, fetched_at } => layout(
            "Dashboard",
            "",
            &format!(
                "<h1>Dashboard</h1>{}<p><small>Updated {}</small></p>",
                metric_cards(data),
                fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
        ),
    }
}

pub fn settings_page(credentials: &Credentials, notice: Option<&Notice>) -> String {
    let notice = match notice {
        Some(Notice::Success(text)) => {
            format!("<div class=\"notice-success\" role=\"status\">{}</div>", escape(text))
        }
        Some(Notice::Failure(text)) => {
            format!("<div class=\"notice-failure\" role=\"alert\">{}</div>", escape(text))
        }
        None => String::new(),
    };

    let form = format!(
        "<h2>WooCommerce Settings</h2>\
         <form method=\"post\" action=\"/settings\">\
         <label for=\"url\">WooCommerce URL</label>\
         <input type=\"url\" id=\"url\" name=\"url\" value=\"{url}\" required>\
         <label for=\"consumer_key\">Consumer Key</label>\
         <input type=\"text\" id=\"consumer_key\" name=\"consumer_key\" value=\"{key}\" required>\
         <label for=\"consumer_secret\">Consumer Secret</label>\
         <input type=\"password\" id=\"consumer_secret\" name=\"consumer_secret\" value=\"{secret}\" required>\
         <p><button type=\"submit\">Save Settings</button> \
         <button type=\"submit\" formaction=\"/settings/test\">Test Connection</button></p>\
         </form>{notice}",
        url = escape(&credentials.endpoint_url),
        key = escape(&credentials.consumer_key),
        secret = escape(&credentials.consumer_secret),
    );

    layout("WooCommerce Settings", "", &form)
}
