//! JSON body as a raw `serde_json::Value`, so the declarative schemas see
//! exactly what the client sent. Unparsable bodies become a 400 on `body`.
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use crate::error::{AppError, FieldError};

pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::validation(vec![FieldError::new("body", rejection.body_text())])
            })?;

        Ok(Self(value))
    }
}
