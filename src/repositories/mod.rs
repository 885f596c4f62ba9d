//! Store access, one repository per entity.
//!
//! Repositories do no invariant checking of their own: uniqueness and
//! referential existence are enforced by the services before they call in.
//! Every write is visible to the next read on the same connection.

mod director;
mod genre;
mod movie;
mod rating;

pub use director::{DirectorRepository, NewDirector};
pub use genre::{GenreRepository, NewGenre};
pub use movie::{MovieFilter, MovieRepository, NewMovie};
pub use rating::RatingRepository;
