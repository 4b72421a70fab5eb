//! API route definitions
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

pub mod entries;
pub mod health;

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "entries", description = "Time-boxed credential entry endpoints"),
        (name = "health", description = "Service health"),
    ),
)]
struct ApiDoc;

pub fn router() -> OpenApiRouter<crate::AppState> {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(entries::router())
        .merge(health::router())
}
