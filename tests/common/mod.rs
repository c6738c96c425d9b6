//! Shared test helpers.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chroma_gateway::domain::entities::collection::{Collection, CollectionConfig};
use chroma_gateway::domain::entities::item::Item;
use chroma_gateway::domain::error::DomainError;
use chroma_gateway::domain::ports::embedding_store::{AddBatch, EmbeddingStore, QueryResult};
use chroma_gateway::ChromaGateway;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

pub fn setup() -> ChromaGateway {
    ChromaGateway::new(":memory:").unwrap()
}

pub fn app() -> Router {
    chroma_gateway::http::router(Arc::new(setup()))
}

pub fn failing_app() -> Router {
    chroma_gateway::http::router(Arc::new(ChromaGateway::with_store(Arc::new(UnreachableStore))))
}

pub fn item(id: &str, embedding: &[f32]) -> Item {
    Item::new(id, embedding.to_vec())
}

/// A store whose every call fails, standing in for an unreachable backend.
pub struct UnreachableStore;

impl EmbeddingStore for UnreachableStore {
    fn get_or_create_collection(
        &self,
        _name: &str,
        _config: Option<CollectionConfig>,
    ) -> Result<Collection, DomainError> {
        Err(DomainError::Store("store unavailable".into()))
    }

    fn add(&self, _collection: &Collection, _batch: AddBatch) -> Result<(), DomainError> {
        Err(DomainError::Store("store unavailable".into()))
    }

    fn query(
        &self,
        _collection: &Collection,
        _query_embeddings: &[Vec<f32>],
        _n_results: usize,
    ) -> Result<QueryResult, DomainError> {
        Err(DomainError::Store("store unavailable".into()))
    }

    fn delete(&self, _collection: &Collection, _ids: &[String]) -> Result<(), DomainError> {
        Err(DomainError::Store("store unavailable".into()))
    }
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
