use tracing::{info, warn};

use crate::{
    entities::rating,
    error::{CatalogError, CatalogResult},
    repositories::{MovieRepository, RatingRepository},
    stats,
};

pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 10.0;

/// Ratings are append-only; their aggregates are recomputed from the live
/// rows on every read and never stored.
#[derive(Clone)]
pub struct RatingService {
    ratings: RatingRepository,
    movies: MovieRepository,
}

impl RatingService {
    pub fn new(ratings: RatingRepository, movies: MovieRepository) -> Self {
        Self { ratings, movies }
    }

    pub async fn create(&self, movie_id: i32, score: f64) -> CatalogResult<rating::Model> {
        if self.movies.get_by_id(movie_id).await?.is_none() {
            warn!(movie_id, "rating references unknown movie");
            return Err(CatalogError::missing_id("Movie", movie_id));
        }
        if !(SCORE_MIN..=SCORE_MAX).contains(&score) {
            warn!(movie_id, score, "rating score out of range");
            return Err(CatalogError::Range {
                field: "score",
                value: score,
                min: SCORE_MIN,
                max: SCORE_MAX,
            });
        }

        let rating = self.ratings.add(movie_id, score).await?;
        info!(rating_id = rating.id, movie_id, score, "created rating");
        Ok(rating)
    }

    pub async fn get_by_id(&self, id: i32) -> CatalogResult<Option<rating::Model>> {
        self.ratings.get_by_id(id).await
    }

    pub async fn list_for_movie(&self, movie_id: i32) -> CatalogResult<Vec<rating::Model>> {
        self.ratings.list_for_movie(movie_id).await
    }

    pub async fn average(&self, movie_id: i32) -> CatalogResult<Option<f64>> {
        Ok(stats::average(&self.scores(movie_id).await?))
    }

    pub async fn count(&self, movie_id: i32) -> CatalogResult<u64> {
        Ok(self.scores(movie_id).await?.len() as u64)
    }

    async fn scores(&self, movie_id: i32) -> CatalogResult<Vec<f64>> {
        Ok(self.list_for_movie(movie_id).await?.into_iter().map(|r| r.score).collect())
    }
}
