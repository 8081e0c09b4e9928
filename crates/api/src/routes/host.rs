use axum::http::header;
use axum::response::IntoResponse;

/// Name of the machine serving the request, or empty if it cannot be read.
pub fn server_hostname() -> String {
    match ::hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!(error = %e, "unable to read hostname");
            String::new()
        }
    }
}

/// GET /api/hostname — the serving host's name as plain text.
pub async fn hostname() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        server_hostname(),
    )
}
