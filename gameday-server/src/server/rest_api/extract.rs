use crate::server::rest_api::error::ApiErrorResponse;
use axum::extract::FromRequest;

/// [`axum::Json`] that rejects with an [`ApiErrorResponse`] instead of plain text.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiErrorResponse))]
pub struct ApiJson<T>(pub T);
