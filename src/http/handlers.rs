use crate::application::delete::DeleteOutcome;
use crate::http::dto::*;
use crate::http::error::ApiError;
use crate::http::extract::ValidatedJson;
use crate::{ChromaGateway, SERVICE_NAME};
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

pub type SharedGateway = Arc<ChromaGateway>;

pub async fn upsert(
    State(gateway): State<SharedGateway>,
    ValidatedJson(req): ValidatedJson<UpsertRequest>,
) -> Result<Json<UpsertResponse>, ApiError> {
    let count = gateway.upsert(req.collection, req.items).await?;
    Ok(Json(UpsertResponse { ok: true, count }))
}

pub async fn query(
    State(gateway): State<SharedGateway>,
    ValidatedJson(req): ValidatedJson<QueryRequest>,
) -> Result<Json<QueryResponse>, ApiError> {
    let results = gateway
        .query(req.collection, req.query_embedding, req.n_results)
        .await?;
    Ok(Json(QueryResponse { results }))
}

pub async fn delete(
    State(gateway): State<SharedGateway>,
    ValidatedJson(req): ValidatedJson<DeleteRequest>,
) -> Json<DeleteResponse> {
    let collection = req.collection.clone();
    let outcome = gateway.delete(req.collection, req.ids).await;
    if let DeleteOutcome::Failed { error } = &outcome {
        tracing::warn!(%collection, %error, "delete failed");
    }
    Json(outcome.into())
}

/// Liveness only; never touches the store.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        service: SERVICE_NAME,
    })
}
