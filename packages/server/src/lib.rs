pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Miyazaki Garden API",
        version = "1.0.0",
        description = "API for the Miyazaki Garden film catalog and community"
    ),
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::film::list_films,
        handlers::film::get_film,
        handlers::film::import_film,
        handlers::person::list_people,
        handlers::director::list_directors,
        handlers::review::list_reviews,
        handlers::review::upsert_review,
        handlers::review::delete_review,
        handlers::favorite::toggle_favorite,
        handlers::favorite::check_favorite,
        handlers::favorite::list_favorites,
        handlers::profile::update_profile,
        handlers::profile::delete_account,
        handlers::avatar::upload_avatar,
        handlers::avatar::get_avatar,
    ),
    tags(
        (name = "Auth", description = "Registration, login and session info"),
        (name = "Films", description = "Film catalog reads and the import surface"),
        (name = "People", description = "Character listing"),
        (name = "Directors", description = "Director aggregates derived from the catalog"),
        (name = "Reviews", description = "Community reviews and rating aggregates"),
        (name = "Favorites", description = "Per-user favorite films"),
        (name = "Profile", description = "Account settings and avatars"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);
    let api = ApiDoc::openapi();

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state)
        .layer(cors)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}

/// CORS layer from config. With no configured origins the API stays
/// same-origin only, which is the right default for production behind
/// the frontend's reverse proxy.
fn cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cfg
        .allow_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(cfg.max_age))
}
