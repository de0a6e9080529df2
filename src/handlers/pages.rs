// handlers/pages.rs - HTML pages behind the access gate
//
// The editor UI itself is served elsewhere; these render the shells the gate
// forwards to.

use axum::{http::Uri, response::Html};

/// GET /login
pub async fn login_page() -> Html<&'static str> {
    Html(
        "<!doctype html>\n<html><head><title>Sign in - Weam</title></head>\
         <body><main id=\"login\"><h1>Sign in</h1></main></body></html>",
    )
}

/// Any other page path: the editor shell, which loads the document client-side.
pub async fn page_shell(uri: Uri) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html><head><title>Weam</title></head>\
         <body><div id=\"app\" data-path=\"{}\"></div></body></html>",
        escape_attr(uri.path())
    ))
}

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
