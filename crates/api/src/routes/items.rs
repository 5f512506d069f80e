//! Item lookup endpoint.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use common::{Item, ItemId};

use crate::error::ApiError;

// -- Request types --

/// Raw query pairs in request order; repeated keys are kept.
pub type QueryPairs = Vec<(String, String)>;

/// Returns the last value given for `key`, so `?q=a&q=b` yields `b`.
fn last_value(pairs: QueryPairs, key: &str) -> Option<String> {
    pairs
        .into_iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

// -- Handlers --

/// GET /items/{item_id}: validates the path ID and echoes it back with `q`.
#[tracing::instrument(skip_all)]
pub async fn read_item(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<Item>, ApiError> {
    let Path(raw_id) = path?;
    let Query(pairs) = query?;
    tracing::debug!(item_id = %raw_id, "reading item");

    let item_id = ItemId::parse(&raw_id)?;
    Ok(Json(Item::new(item_id, last_value(pairs, "q"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> QueryPairs {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn read_item_without_query() {
        let Json(item) = read_item(Ok(Path("42".to_string())), Ok(Query(Vec::new())))
            .await
            .unwrap();
        assert_eq!(item, Item::new(ItemId::new(42), None));
    }

    #[tokio::test]
    async fn read_item_keeps_empty_query_value() {
        let query = pairs(&[("q", "")]);
        let Json(item) = read_item(Ok(Path("1".to_string())), Ok(Query(query)))
            .await
            .unwrap();
        assert_eq!(item.q.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn read_item_takes_last_repeated_q() {
        let query = pairs(&[("q", "a"), ("other", "x"), ("q", "b")]);
        let Json(item) = read_item(Ok(Path("42".to_string())), Ok(Query(query)))
            .await
            .unwrap();
        assert_eq!(item.q.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn read_item_rejects_bad_id() {
        let result = read_item(Ok(Path("abc".to_string())), Ok(Query(Vec::new()))).await;
        match result {
            Err(ApiError::Validation(issues)) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].input, "abc");
                assert_eq!(issues[0].loc, vec!["path", "item_id"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
