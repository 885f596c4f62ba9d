//! Business rules on top of the repositories: natural-key uniqueness,
//! referential existence, pagination and rating aggregates.
//!
//! Uniqueness and existence are check-then-act against the store and are not
//! atomic as a pair. Two writers racing on one natural key can both pass the
//! check; the store's unique index then rejects the loser, which surfaces as
//! [`CatalogError::StorageConflict`](crate::error::CatalogError::StorageConflict)
//! rather than a uniqueness error.

mod director;
mod genre;
mod movie;
mod rating;

pub use director::DirectorService;
pub use genre::GenreService;
pub use movie::{
    MovieChanges, MovieService, RELEASE_YEAR_MAX, RELEASE_YEAR_MIN, check_release_year,
};
pub use rating::{RatingService, SCORE_MAX, SCORE_MIN};
