//! Root greeting endpoint.

use std::collections::BTreeMap;

use axum::Json;

/// GET /: returns the static greeting `{"Hello": "World"}`.
pub async fn read_root() -> Json<BTreeMap<&'static str, &'static str>> {
    Json(BTreeMap::from([("Hello", "World")]))
}
