pub mod health;
pub mod items;
pub mod metrics;
pub mod root;

use axum::extract::OriginalUri;
use axum::http::Uri;
use axum::response::Redirect;

use crate::error::ApiError;

/// Fallback for requests that match no route.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for a matched path requested with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Redirects to the same path with its trailing slash added or removed.
///
/// Mounted on the slash twin of every route, so `/items/42/` lands on
/// `/items/42` and `/healthcheck` on `/healthcheck/`.
pub async fn redirect_slashes(OriginalUri(uri): OriginalUri) -> Redirect {
    Redirect::temporary(&toggle_trailing_slash(&uri))
}

fn toggle_trailing_slash(uri: &Uri) -> String {
    let path = uri.path();
    let mut target = match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed.to_string(),
        Some(_) => path.to_string(),
        None => format!("{path}/"),
    };
    if let Some(query) = uri.query() {
        target.push('?');
        target.push_str(query);
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toggled(uri: &str) -> String {
        toggle_trailing_slash(&uri.parse::<Uri>().unwrap())
    }

    #[test]
    fn trailing_slash_is_removed() {
        assert_eq!(toggled("/items/42/"), "/items/42");
    }

    #[test]
    fn trailing_slash_is_added() {
        assert_eq!(toggled("/healthcheck"), "/healthcheck/");
    }

    #[test]
    fn query_string_is_kept() {
        assert_eq!(toggled("/items/42/?q=abc"), "/items/42?q=abc");
    }

    #[test]
    fn root_is_left_alone() {
        assert_eq!(toggled("/"), "/");
    }
}
