use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/films", film_routes())
        .nest("/people", people_routes())
        .nest("/directors", director_routes())
        .nest("/reviews", review_routes())
        .nest("/favorites", favorite_routes())
        .nest("/profile", profile_routes())
        .nest("/avatars", avatar_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me))
}

fn film_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::film::list_films).post(handlers::film::import_film),
        )
        .route("/{id}", get(handlers::film::get_film))
}

fn people_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::person::list_people))
}

fn director_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::director::list_directors))
}

fn review_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::review::list_reviews).post(handlers::review::upsert_review),
        )
        .route("/{id}", delete(handlers::review::delete_review))
}

fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::favorite::list_favorites))
        .route(
            "/toggle",
            get(handlers::favorite::check_favorite).post(handlers::favorite::toggle_favorite),
        )
}

fn profile_routes() -> Router<AppState> {
    let crud = Router::new().route(
        "/",
        patch(handlers::profile::update_profile)
            .delete(handlers::profile::delete_account),
    );

    let avatar = Router::new()
        .route("/avatar", post(handlers::avatar::upload_avatar))
        .layer(handlers::avatar::avatar_upload_body_limit());

    crud.merge(avatar)
}

fn avatar_routes() -> Router<AppState> {
    Router::new().route("/{file}", get(handlers::avatar::get_avatar))
}
