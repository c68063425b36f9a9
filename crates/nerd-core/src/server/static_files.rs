//! Static file fallback.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::http::Method;
use axum::response::Response;

use super::response;

/// Targets that cannot name a file under the document root
fn illegal_target(target: &str) -> bool {
    target.is_empty() || !target.starts_with('/') || target.contains("..")
}

/// Map a request target onto the document root. A trailing `/` names the
/// directory's `index.html`.
pub fn resolve(doc_root: &Path, target: &str) -> PathBuf {
    let mut path = doc_root.join(target.trim_start_matches('/'));
    if target.ends_with('/') {
        path.push("index.html");
    }
    path
}

/// Serve `target` from `doc_root`. Only GET and HEAD are accepted.
pub async fn serve(doc_root: &Path, method: &Method, target: &str) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return response::bad_request("Unknown HTTP-method");
    }

    if illegal_target(target) {
        tracing::debug!(request_target = target, "rejected request target");
        return response::bad_request("Illegal request-target");
    }

    let path = resolve(doc_root, target);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            response::file(mime.as_ref(), bytes, method == Method::HEAD)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => response::not_found(target),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read static file");
            response::server_error(&e.to_string())
        }
    }
}
