use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use axum_extra::extract::WithRejection;
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    models::{
        ApiResponse, DirectorCreate, DirectorResponse, GenreCreate, GenreResponse, MovieCreate,
        MovieListQuery, MovieRatings, MovieResponse, MovieUpdate, RatingCreate, RatingResponse,
    },
    pagination::Page,
};

type Created<T> = (StatusCode, Json<ApiResponse<T>>);

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{movie_id}", get(get_movie).patch(update_movie))
        .route("/movies/{movie_id}/ratings", get(list_ratings).post(create_rating))
        .route("/directors", axum::routing::post(create_director))
        .route("/directors/{director_id}", get(get_director))
        .route("/genres", axum::routing::post(create_genre))
        .route("/genres/{genre_id}", get(get_genre));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .nest("/api/v1", api)
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Movie Catalog API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn list_movies(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(query), _): WithRejection<Query<MovieListQuery>, AppError>,
) -> AppResult<Json<ApiResponse<Page<MovieResponse>>>> {
    let search = query.into_search(&state.config)?;
    let page = state.catalog.list_movies(search).await?;
    Ok(Json(ApiResponse::success(page)))
}

async fn get_movie(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(movie_id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<ApiResponse<MovieResponse>>> {
    let movie = state.catalog.get_movie(movie_id).await?;
    Ok(Json(ApiResponse::success(movie)))
}

async fn create_movie(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): WithRejection<Json<MovieCreate>, AppError>,
) -> AppResult<Created<MovieResponse>> {
    req.validate()?;
    let movie = state.catalog.create_movie(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(movie))))
}

async fn update_movie(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(movie_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<MovieUpdate>, AppError>,
) -> AppResult<Json<ApiResponse<MovieResponse>>> {
    req.validate()?;
    let movie = state.catalog.update_movie(movie_id, req).await?;
    Ok(Json(ApiResponse::success(movie)))
}

async fn list_ratings(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(movie_id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<ApiResponse<MovieRatings>>> {
    let ratings = state.catalog.movie_ratings(movie_id).await?;
    Ok(Json(ApiResponse::success(ratings)))
}

async fn create_rating(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(movie_id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<RatingCreate>, AppError>,
) -> AppResult<Created<RatingResponse>> {
    req.validate()?;
    let rating = state.catalog.create_rating(movie_id, req.score).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(rating))))
}

async fn create_director(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): WithRejection<Json<DirectorCreate>, AppError>,
) -> AppResult<Created<DirectorResponse>> {
    req.validate()?;
    let director = state.catalog.create_director(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(director))))
}

async fn get_director(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(director_id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<ApiResponse<DirectorResponse>>> {
    let director = state.catalog.get_director(director_id).await?;
    Ok(Json(ApiResponse::success(director)))
}

async fn create_genre(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(req), _): WithRejection<Json<GenreCreate>, AppError>,
) -> AppResult<Created<GenreResponse>> {
    req.validate()?;
    let genre = state.catalog.create_genre(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(genre))))
}

async fn get_genre(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(genre_id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<ApiResponse<GenreResponse>>> {
    let genre = state.catalog.get_genre(genre_id).await?;
    Ok(Json(ApiResponse::success(genre)))
}
