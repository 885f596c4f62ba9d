//! Entry points used by the HTTP layer.
//!
//! Resolves raw identifiers coming from requests (genre names and ids) into
//! entities before handing off to the services, and shapes results for
//! presentation with explicit aggregate calls.

use futures::future::try_join_all;
use sea_orm::DatabaseConnection;

use crate::{
    entities::{genre, movie},
    error::{CatalogError, CatalogResult},
    models::{
        DirectorCreate, DirectorResponse, GenreCreate, GenreResponse, MovieCreate, MovieRatings,
        MovieResponse, MovieSearch, MovieUpdate, RatingResponse,
    },
    pagination::Page,
    repositories::{
        DirectorRepository, GenreRepository, MovieFilter, MovieRepository, NewDirector, NewGenre,
        NewMovie, RatingRepository,
    },
    services::{DirectorService, GenreService, MovieChanges, MovieService, RatingService},
    stats,
};

#[derive(Clone)]
pub struct Catalog {
    directors: DirectorService,
    genres: GenreService,
    movies: MovieService,
    ratings: RatingService,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        let director_repo = DirectorRepository::new(db.clone());
        let movie_repo = MovieRepository::new(db.clone());
        Self {
            directors: DirectorService::new(director_repo.clone()),
            genres: GenreService::new(GenreRepository::new(db.clone())),
            movies: MovieService::new(movie_repo.clone(), director_repo),
            ratings: RatingService::new(RatingRepository::new(db), movie_repo),
        }
    }

    /// An unknown genre name is a not-found error, unlike a filter that
    /// simply matches nothing.
    pub async fn list_movies(&self, search: MovieSearch) -> CatalogResult<Page<MovieResponse>> {
        let genre = match search.genre_name.as_deref() {
            Some(name) => Some(
                self.genres
                    .get_by_name(name)
                    .await?
                    .ok_or_else(|| CatalogError::missing_name("Genre", name))?,
            ),
            None => None,
        };

        let filter = MovieFilter {
            title: search.title,
            director_name: search.director_name,
            release_year: search.release_year,
            genre,
        };

        let Page { page, page_size, total_items, total_pages, items } =
            self.movies.search(search.page, search.page_size, &filter).await?;
        let items = try_join_all(items.into_iter().map(|m| self.present(m))).await?;

        Ok(Page { page, page_size, total_items, total_pages, items })
    }

    pub async fn get_movie(&self, id: i32) -> CatalogResult<MovieResponse> {
        let movie = self.require_movie(id).await?;
        self.present(movie).await
    }

    pub async fn create_movie(&self, req: MovieCreate) -> CatalogResult<MovieResponse> {
        let genres = self.genres.resolve_by_ids(&req.genres).await?;
        let new = NewMovie {
            title: req.title,
            director_id: req.director_id,
            release_year: req.release_year,
            cast: req.cast,
        };
        let movie = self.movies.create(new, &genres).await?;
        self.present(movie).await
    }

    pub async fn update_movie(&self, id: i32, req: MovieUpdate) -> CatalogResult<MovieResponse> {
        self.require_movie(id).await?;
        let genres: Option<Vec<genre::Model>> = match req.genres {
            Some(ids) => Some(self.genres.resolve_by_ids(&ids).await?),
            None => None,
        };
        let changes = MovieChanges {
            title: req.title,
            director_id: req.director_id,
            release_year: req.release_year,
            cast: req.cast,
            genres,
        };
        let movie = self.movies.update(id, changes).await?;
        self.present(movie).await
    }

    pub async fn create_rating(&self, movie_id: i32, score: f64) -> CatalogResult<RatingResponse> {
        Ok(self.ratings.create(movie_id, score).await?.into())
    }

    pub async fn movie_ratings(&self, movie_id: i32) -> CatalogResult<MovieRatings> {
        self.require_movie(movie_id).await?;
        let items = self.ratings.list_for_movie(movie_id).await?;
        let scores: Vec<f64> = items.iter().map(|r| r.score).collect();
        let summary = stats::RatingSummary::from_scores(&scores);
        Ok(MovieRatings {
            movie_id,
            average_rating: summary.average.map(stats::round_one_decimal),
            ratings_count: summary.count,
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn create_director(&self, req: DirectorCreate) -> CatalogResult<DirectorResponse> {
        let new =
            NewDirector { name: req.name, birth_year: req.birth_year, description: req.description };
        Ok(self.directors.create(new).await?.into())
    }

    pub async fn get_director(&self, id: i32) -> CatalogResult<DirectorResponse> {
        self.directors
            .get_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| CatalogError::missing_id("Director", id))
    }

    pub async fn create_genre(&self, req: GenreCreate) -> CatalogResult<GenreResponse> {
        let new = NewGenre { name: req.name, description: req.description };
        Ok(self.genres.create(new).await?.into())
    }

    pub async fn get_genre(&self, id: i32) -> CatalogResult<GenreResponse> {
        self.genres
            .get_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| CatalogError::missing_id("Genre", id))
    }

    async fn require_movie(&self, id: i32) -> CatalogResult<movie::Model> {
        self.movies.get_by_id(id).await?.ok_or_else(|| CatalogError::missing_id("Movie", id))
    }

    async fn present(&self, movie: movie::Model) -> CatalogResult<MovieResponse> {
        let director = self
            .directors
            .get_by_id(movie.director_id)
            .await?
            .ok_or_else(|| CatalogError::missing_id("Director", movie.director_id))?;
        let genres = self.movies.genres_of(movie.id).await?;
        let average = self.ratings.average(movie.id).await?.map(stats::round_one_decimal);
        let count = self.ratings.count(movie.id).await?;
        Ok(MovieResponse::new(movie, director, genres, average, count))
    }
}
