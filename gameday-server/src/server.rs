use crate::context::ApplicationContext;
use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod rest_api;

pub async fn run_server(application_context: ApplicationContext) -> std::io::Result<()> {
	let address = application_context.configuration.address;
	let router = create_router(application_context);

	axum_server::bind(address).serve(router.into_make_service()).await
}

pub fn create_router(application_context: ApplicationContext) -> Router {
	let cors = cors_layer(&application_context.configuration.frontend_url);

	Router::new()
		.nest("/api", rest_api::rest_api())
		.layer(cors)
		.layer(TraceLayer::new_for_http())
		.with_state(application_context)
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
	let cors = CorsLayer::new()
		.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
		.allow_headers([CONTENT_TYPE]);

	match HeaderValue::from_str(frontend_url.trim_end_matches('/')) {
		Ok(origin) => cors.allow_origin(origin).allow_credentials(true),
		Err(error) => {
			warn!(%frontend_url, %error, "Invalid frontend URL, cross origin requests will be rejected.");
			cors
		}
	}
}
