use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

use super::validation::{AppJson, ValidatedJson};
use super::{ApiError, AppState, ListMoviesQuery};
use crate::models::{Movie, MovieChanges, NewMovie, PatchDocument};

/// Adds a movie.
///
/// # Endpoint
/// `POST /filme`
///
/// # Response
/// `201 Created` with a `Location` header pointing at the new movie and the
/// stored [`Movie`] as body.
pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<NewMovie>,
) -> Result<impl IntoResponse, ApiError> {
    let movie = state.movie_service.create(payload).await?;
    let location = format!("/filme/{}", movie.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(movie),
    ))
}

/// Lists movies in storage order.
///
/// # Endpoint
/// `GET /filme?skip=0&take=10`
///
/// A `take` above `pagination.max_take` is clamped, not rejected.
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMoviesQuery>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let take = query.page_size(&state.config.pagination);

    let movies = state.movie_service.list(query.skip, take).await?;
    Ok(Json(movies))
}

/// # Endpoint
/// `GET /filme/{id}`
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Movie>, ApiError> {
    let movie = state.movie_service.get(id).await?;
    Ok(Json(movie))
}

/// Replaces every mutable field of a movie.
///
/// # Endpoint
/// `PUT /filme/{id}`
pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<MovieChanges>,
) -> Result<StatusCode, ApiError> {
    state.movie_service.replace(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Partially updates a movie.
///
/// # Endpoint
/// `PATCH /filme/{id}`
///
/// # Request Body
/// An RFC 6902 operation array or a merge-style object.
///
/// # Errors
/// `404` when the movie does not exist, `422` when the patched movie breaks a
/// constraint or an operation cannot be applied.
pub async fn patch_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    AppJson(document): AppJson<PatchDocument>,
) -> Result<StatusCode, ApiError> {
    state
        .movie_service
        .patch(id, document.into_operations())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # Endpoint
/// `DELETE /filme/{id}`
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.movie_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
