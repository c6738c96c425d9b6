//! JSON extractor with automatic validation using the validator crate.

use crate::http::error::ApiError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed its `Validate` rules. Handlers taking this never
/// see malformed or constraint-breaking requests.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(ApiError::Rejection)?;
        data.validate().map_err(ApiError::Validation)?;
        Ok(ValidatedJson(data))
    }
}
