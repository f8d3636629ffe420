use axum::Router;
use axum::response::Redirect;
use axum::routing::get;
use roster::domain::constants::{INDEX_PAGE, STATIC_PREFIX};
use roster::kernel::prelude::ApiState;
use roster::server::router::{activities_router, system_router};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(
    title = "Mergington High School API",
    description = "View and sign up for extracurricular activities"
))]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let static_dir = state.config.storage.static_dir.clone();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(system_router::<ApiState>())
        .merge(activities_router())
        .with_state(state)
        .split_for_parts();

    Router::new()
        .route("/", get(|| async { Redirect::temporary(INDEX_PAGE) }))
        .nest_service(STATIC_PREFIX, ServeDir::new(static_dir))
        .merge(openapi_routes)
        .merge(Scalar::with_url("/api", api_doc))
        .layer(TraceLayer::new_for_http())
}
