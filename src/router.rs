//! Axum router construction.
//!
//! Builds the application router with all route groups, middleware layers,
//! and the Swagger UI.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::users::list_users,
        routes::users::create_user,
        routes::movies::list_user_movies,
        routes::movies::add_movie,
        routes::movies::update_movie,
        routes::movies::delete_movie,
    ),
    components(schemas(
        routes::users::UserResponse,
        routes::users::CreateUserForm,
        routes::movies::MovieResponse,
        routes::movies::AddMovieForm,
        routes::movies::UpdateMovieForm,
    ))
)]
struct ApiDoc;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::home::welcome))
        .route("/health", get(routes::health::health_check))
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route(
            "/users/{user_id}/movies",
            get(routes::movies::list_user_movies).post(routes::movies::add_movie),
        )
        .route(
            "/users/{user_id}/movies/{movie_id}/update",
            post(routes::movies::update_movie),
        )
        .route(
            "/users/{user_id}/movies/{movie_id}/delete",
            post(routes::movies::delete_movie),
        )
        .merge(SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
