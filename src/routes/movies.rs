//! Movie routes: listing, metadata-enriched creation, title update, and
//! deletion.
//!
//! Path-resolved entities are checked at this boundary: the owning user
//! must exist, and update/delete verify the movie actually belongs to the
//! user named in the path before touching the store.

use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use moviweb_core::{MovieId, UserId};
use moviweb_db::models::Movie;
use moviweb_db::queries::movies;

use crate::context::AppContext;
use crate::error::AppError;
use crate::omdb::Lookup;

/// Form body for adding a movie by title.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AddMovieForm {
    pub name: String,
}

/// Form body for retitling a movie.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateMovieForm {
    pub title: String,
}

/// Movie representation returned by the API.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MovieResponse {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub director: Option<String>,
    pub year: Option<i32>,
    pub poster_url: Option<String>,
    pub created_at: String,
}

impl MovieResponse {
    fn from_model(movie: &Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            user_id: movie.user_id.to_string(),
            name: movie.name.clone(),
            director: movie.director.clone(),
            year: movie.year,
            poster_url: movie.poster_url.clone(),
            created_at: movie.created_at.clone(),
        }
    }
}

fn parse_user_id(raw: &str) -> Result<UserId, AppError> {
    raw.parse()
        .map_err(|_| moviweb_core::Error::validation("Invalid user_id").into())
}

fn parse_movie_id(raw: &str) -> Result<MovieId, AppError> {
    raw.parse()
        .map_err(|_| moviweb_core::Error::validation("Invalid movie_id").into())
}

/// Resolve the user named in the path or fail with 404.
fn require_user(conn: &rusqlite::Connection, user_id: UserId) -> Result<(), AppError> {
    moviweb_db::queries::users::get_user(conn, user_id)?
        .ok_or_else(|| moviweb_core::Error::not_found("user", user_id))?;
    Ok(())
}

/// Resolve a movie and verify it belongs to `user_id`, or fail with 404.
///
/// A movie owned by someone else reads as missing; the route never leaks
/// other users' entries.
fn require_owned_movie(
    conn: &rusqlite::Connection,
    user_id: UserId,
    movie_id: MovieId,
) -> Result<Movie, AppError> {
    let movie = movies::get_movie(conn, movie_id)?
        .filter(|m| m.user_id == user_id)
        .ok_or_else(|| moviweb_core::Error::not_found("movie", movie_id))?;
    Ok(movie)
}

/// GET /users/{user_id}/movies
#[utoipa::path(
    get,
    path = "/users/{user_id}/movies",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's movies", body = Vec<MovieResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_movies(
    State(ctx): State<AppContext>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<MovieResponse>>, AppError> {
    let user_id = parse_user_id(&user_id)?;

    let conn = moviweb_db::pool::get_conn(&ctx.db)?;
    require_user(&conn, user_id)?;

    let list = movies::list_movies_for_user(&conn, user_id)?;
    Ok(Json(list.iter().map(MovieResponse::from_model).collect()))
}

/// POST /users/{user_id}/movies
///
/// Looks the title up in the metadata service before persisting. A negative
/// match adds nothing and reports the searched title; a service fault adds
/// nothing and surfaces as 502.
#[utoipa::path(
    post,
    path = "/users/{user_id}/movies",
    params(("user_id" = String, Path, description = "User ID")),
    request_body(content = AddMovieForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Movie added", body = MovieResponse),
        (status = 400, description = "Empty name"),
        (status = 404, description = "User or title not found"),
        (status = 502, description = "Metadata service failure")
    )
)]
pub async fn add_movie(
    State(ctx): State<AppContext>,
    Path(user_id): Path<String>,
    Form(payload): Form<AddMovieForm>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_user_id(&user_id)?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(moviweb_core::Error::validation("name is required").into());
    }

    {
        let conn = moviweb_db::pool::get_conn(&ctx.db)?;
        require_user(&conn, user_id)?;
    }

    // One blocking round trip to the metadata service per add.
    let metadata = match ctx.omdb.lookup(name).await? {
        Lookup::Found(meta) => meta,
        Lookup::NotFound => {
            return Err(moviweb_core::Error::not_found("movie title", name).into());
        }
    };

    let conn = moviweb_db::pool::get_conn(&ctx.db)?;
    let movie = movies::add_movie(
        &conn,
        user_id,
        &metadata.title,
        metadata.director.as_deref(),
        metadata.year,
        metadata.poster_url.as_deref(),
    )?;

    tracing::info!(movie_id = %movie.id, %user_id, title = %movie.name, "Added movie");

    Ok((StatusCode::CREATED, Json(MovieResponse::from_model(&movie))))
}

/// POST /users/{user_id}/movies/{movie_id}/update
#[utoipa::path(
    post,
    path = "/users/{user_id}/movies/{movie_id}/update",
    params(
        ("user_id" = String, Path, description = "User ID"),
        ("movie_id" = String, Path, description = "Movie ID")
    ),
    request_body(content = UpdateMovieForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Movie retitled", body = MovieResponse),
        (status = 400, description = "Empty title"),
        (status = 404, description = "Movie not found for this user")
    )
)]
pub async fn update_movie(
    State(ctx): State<AppContext>,
    Path((user_id, movie_id)): Path<(String, String)>,
    Form(payload): Form<UpdateMovieForm>,
) -> Result<Json<MovieResponse>, AppError> {
    let user_id = parse_user_id(&user_id)?;
    let movie_id = parse_movie_id(&movie_id)?;

    let title = payload.title.trim();
    if title.is_empty() {
        return Err(moviweb_core::Error::validation("title is required").into());
    }

    let conn = moviweb_db::pool::get_conn(&ctx.db)?;
    require_owned_movie(&conn, user_id, movie_id)?;

    let updated = movies::update_movie(&conn, movie_id, title)?
        .ok_or_else(|| moviweb_core::Error::not_found("movie", movie_id))?;

    Ok(Json(MovieResponse::from_model(&updated)))
}

/// POST /users/{user_id}/movies/{movie_id}/delete
#[utoipa::path(
    post,
    path = "/users/{user_id}/movies/{movie_id}/delete",
    params(
        ("user_id" = String, Path, description = "User ID"),
        ("movie_id" = String, Path, description = "Movie ID")
    ),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 404, description = "Movie not found for this user")
    )
)]
pub async fn delete_movie(
    State(ctx): State<AppContext>,
    Path((user_id, movie_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_user_id(&user_id)?;
    let movie_id = parse_movie_id(&movie_id)?;

    let conn = moviweb_db::pool::get_conn(&ctx.db)?;
    require_owned_movie(&conn, user_id, movie_id)?;

    if !movies::delete_movie(&conn, movie_id)? {
        return Err(moviweb_core::Error::not_found("movie", movie_id).into());
    }

    Ok(StatusCode::NO_CONTENT)
}
