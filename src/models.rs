use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    entities::{director, genre, movie, rating},
    error::{AppError, AppResult},
    services::{self, SCORE_MAX, SCORE_MIN},
};

const NAME_MAX_CHARS: usize = 100;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { status: "success", data }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MovieListQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub director_name: Option<String>,
    pub genre: Option<String>,
}

/// Validated `list_movies` parameters with defaults applied.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieSearch {
    pub page: usize,
    pub page_size: usize,
    pub title: Option<String>,
    pub release_year: Option<i32>,
    pub director_name: Option<String>,
    pub genre_name: Option<String>,
}

impl MovieListQuery {
    pub fn into_search(self, config: &Config) -> AppResult<MovieSearch> {
        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::validation("Page must be a positive integer."));
        }
        let page_size = self.page_size.unwrap_or(config.default_page_size);
        if page_size < 1 || page_size > config.max_page_size {
            return Err(AppError::validation(format!(
                "Page size must be between 1 and {}.",
                config.max_page_size
            )));
        }
        check_release_year(self.release_year)?;

        Ok(MovieSearch {
            page,
            page_size,
            title: non_blank(self.title),
            release_year: self.release_year,
            director_name: non_blank(self.director_name),
            genre_name: non_blank(self.genre),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct MovieCreate {
    pub title: String,
    pub director_id: i32,
    pub release_year: Option<i32>,
    pub cast: Option<String>,
    /// Genre ids.
    #[serde(default)]
    pub genres: Vec<i32>,
}

impl MovieCreate {
    pub fn validate(&self) -> AppResult<()> {
        check_name("Title", &self.title)?;
        check_release_year(self.release_year)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub director_id: Option<i32>,
    pub release_year: Option<i32>,
    pub cast: Option<String>,
    pub genres: Option<Vec<i32>>,
}

impl MovieUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            check_name("Title", title)?;
        }
        check_release_year(self.release_year)
    }
}

#[derive(Debug, Deserialize)]
pub struct RatingCreate {
    pub score: f64,
}

impl RatingCreate {
    pub fn validate(&self) -> AppResult<()> {
        if !(SCORE_MIN..=SCORE_MAX).contains(&self.score) {
            return Err(AppError::validation(format!(
                "Score must be between {SCORE_MIN} and {SCORE_MAX}."
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct DirectorCreate {
    pub name: String,
    pub birth_year: Option<i32>,
    pub description: Option<String>,
}

impl DirectorCreate {
    pub fn validate(&self) -> AppResult<()> {
        check_name("Name", &self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct GenreCreate {
    pub name: String,
    pub description: Option<String>,
}

impl GenreCreate {
    pub fn validate(&self) -> AppResult<()> {
        check_name("Name", &self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DirectorResponse {
    pub id: i32,
    pub name: String,
    pub birth_year: Option<i32>,
    pub description: Option<String>,
}

impl From<director::Model> for DirectorResponse {
    fn from(d: director::Model) -> Self {
        Self { id: d.id, name: d.name, birth_year: d.birth_year, description: d.description }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenreResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<genre::Model> for GenreResponse {
    fn from(g: genre::Model) -> Self {
        Self { id: g.id, name: g.name, description: g.description }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieResponse {
    pub id: i32,
    pub title: String,
    pub director: DirectorResponse,
    pub release_year: Option<i32>,
    pub cast: Option<String>,
    pub genres: Vec<String>,
    pub average_rating: Option<f64>,
    pub ratings_count: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RatingResponse {
    pub id: i32,
    pub movie_id: i32,
    pub score: f64,
}

impl From<rating::Model> for RatingResponse {
    fn from(r: rating::Model) -> Self {
        Self { id: r.id, movie_id: r.movie_id, score: r.score }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MovieRatings {
    pub movie_id: i32,
    pub average_rating: Option<f64>,
    pub ratings_count: u64,
    pub items: Vec<RatingResponse>,
}

impl MovieResponse {
    pub fn new(
        movie: movie::Model,
        director: director::Model,
        genres: Vec<genre::Model>,
        average_rating: Option<f64>,
        ratings_count: u64,
    ) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            director: director.into(),
            release_year: movie.release_year,
            cast: movie.cast,
            genres: genres.into_iter().map(|g| g.name).collect(),
            average_rating,
            ratings_count,
        }
    }
}

fn check_name(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required.")));
    }
    if value.chars().count() > NAME_MAX_CHARS {
        return Err(AppError::validation(format!(
            "{field} must be at most {NAME_MAX_CHARS} characters."
        )));
    }
    Ok(())
}

fn check_release_year(year: Option<i32>) -> AppResult<()> {
    services::check_release_year(year).map_err(|err| AppError::validation(err.to_string()))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
