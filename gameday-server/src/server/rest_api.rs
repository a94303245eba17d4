use crate::context::ApplicationContext;
use crate::database::Database;
use crate::server::rest_api::models::HealthResponse;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::warn;

mod chat;
pub mod error;
pub mod extract;
pub mod models;
pub mod response;
mod voice;

pub fn rest_api() -> Router<ApplicationContext> {
	Router::new()
		.nest("/chat", chat::routes())
		.nest("/voice", voice::routes())
		.route("/health", get(health))
}

async fn health(State(database): State<Arc<dyn Database>>) -> (StatusCode, Json<HealthResponse>) {
	match database.ping().await {
		Ok(()) => (
			StatusCode::OK,
			Json(HealthResponse {
				status: "ok".to_owned(),
				error: None,
			}),
		),
		Err(error) => {
			warn!(%error, "Health check failed to reach the database.");
			(
				StatusCode::SERVICE_UNAVAILABLE,
				Json(HealthResponse {
					status: "degraded".to_owned(),
					error: Some(error.to_string()),
				}),
			)
		}
	}
}
