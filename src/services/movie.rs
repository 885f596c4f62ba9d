use sea_orm::Set;
use tracing::{info, warn};

use crate::{
    entities::{genre, movie},
    error::{CatalogError, CatalogResult},
    pagination::{Page, paginate},
    repositories::{DirectorRepository, MovieFilter, MovieRepository, NewMovie},
};

pub const RELEASE_YEAR_MIN: i32 = 1888;
pub const RELEASE_YEAR_MAX: i32 = 2100;

/// Partial update: `None` leaves the field as it is.
#[derive(Clone, Debug, Default)]
pub struct MovieChanges {
    pub title: Option<String>,
    pub director_id: Option<i32>,
    pub release_year: Option<i32>,
    pub cast: Option<String>,
    /// Replacement genre set, already resolved.
    pub genres: Option<Vec<genre::Model>>,
}

#[derive(Clone)]
pub struct MovieService {
    movies: MovieRepository,
    directors: DirectorRepository,
}

impl MovieService {
    pub fn new(movies: MovieRepository, directors: DirectorRepository) -> Self {
        Self { movies, directors }
    }

    pub async fn get_by_id(&self, id: i32) -> CatalogResult<Option<movie::Model>> {
        self.movies.get_by_id(id).await
    }

    pub async fn get_by_title(&self, title: &str) -> CatalogResult<Option<movie::Model>> {
        self.movies.get_by_title(title).await
    }

    pub async fn genres_of(&self, movie_id: i32) -> CatalogResult<Vec<genre::Model>> {
        self.movies.genres_for_movie(movie_id).await
    }

    /// Filters in the store, then slices out the requested page.
    pub async fn search(
        &self,
        page: usize,
        page_size: usize,
        filter: &MovieFilter,
    ) -> CatalogResult<Page<movie::Model>> {
        let matches = self.movies.find_movies(filter).await?;
        Ok(paginate(matches, page, page_size)?)
    }

    pub async fn create(&self, new: NewMovie, genres: &[genre::Model]) -> CatalogResult<movie::Model> {
        if self.movies.get_by_title(&new.title).await?.is_some() {
            warn!(title = %new.title, "movie title already taken");
            return Err(CatalogError::duplicate("Movie", "title", &new.title));
        }
        if self.directors.get_by_id(new.director_id).await?.is_none() {
            warn!(director_id = new.director_id, "movie references unknown director");
            return Err(CatalogError::missing_id("Director", new.director_id));
        }
        check_release_year(new.release_year)?;

        let movie = self.movies.add(new).await?;
        for genre in genres {
            self.movies.add_genre_to_movie(movie.id, genre.id).await?;
        }

        info!(movie_id = movie.id, title = %movie.title, genres = genres.len(), "created movie");
        Ok(movie)
    }

    pub async fn update(&self, movie_id: i32, changes: MovieChanges) -> CatalogResult<movie::Model> {
        let Some(current) = self.movies.get_by_id(movie_id).await? else {
            return Err(CatalogError::missing_id("Movie", movie_id));
        };

        let mut active: movie::ActiveModel = current.clone().into();

        if let Some(title) = changes.title {
            if title != current.title {
                if self.movies.get_by_title(&title).await?.is_some() {
                    warn!(movie_id, title = %title, "rename collides with existing title");
                    return Err(CatalogError::duplicate("Movie", "title", &title));
                }
                active.title = Set(title);
            }
        }
        if let Some(director_id) = changes.director_id {
            if self.directors.get_by_id(director_id).await?.is_none() {
                return Err(CatalogError::missing_id("Director", director_id));
            }
            active.director_id = Set(director_id);
        }
        if let Some(year) = changes.release_year {
            check_release_year(Some(year))?;
            active.release_year = Set(Some(year));
        }
        if let Some(cast) = changes.cast {
            active.cast = Set(Some(cast));
        }

        let genre_ids: Option<Vec<i32>> =
            changes.genres.map(|genres| genres.iter().map(|g| g.id).collect());
        let updated = self.movies.update_with_genres(current, active, genre_ids.as_deref()).await?;

        info!(movie_id, title = %updated.title, "updated movie");
        Ok(updated)
    }
}

pub fn check_release_year(year: Option<i32>) -> CatalogResult<()> {
    match year {
        Some(y) if !(RELEASE_YEAR_MIN..=RELEASE_YEAR_MAX).contains(&y) => {
            Err(CatalogError::Range {
                field: "release_year",
                value: f64::from(y),
                min: f64::from(RELEASE_YEAR_MIN),
                max: f64::from(RELEASE_YEAR_MAX),
            })
        },
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::connect_in_memory,
        entities::director,
        pagination::PageError,
        repositories::{GenreRepository, NewDirector, NewGenre},
    };

    struct Fixture {
        service: MovieService,
        genres: GenreRepository,
        nolan: director::Model,
        other: director::Model,
    }

    async fn fixture() -> Fixture {
        let db = connect_in_memory().await.unwrap();
        let directors = DirectorRepository::new(db.clone());
        let nolan = directors
            .add(NewDirector { name: "Nolan".into(), birth_year: Some(1970), description: None })
            .await
            .unwrap();
        let other = directors
            .add(NewDirector { name: "Greta Gerwig".into(), ..Default::default() })
            .await
            .unwrap();
        Fixture {
            service: MovieService::new(MovieRepository::new(db.clone()), directors),
            genres: GenreRepository::new(db),
            nolan,
            other,
        }
    }

    fn inception(director_id: i32) -> NewMovie {
        NewMovie {
            title: "Inception".into(),
            director_id,
            release_year: Some(2010),
            cast: Some("Leonardo DiCaprio".into()),
        }
    }

    async fn genre(f: &Fixture, name: &str) -> genre::Model {
        f.genres.add(NewGenre { name: name.into(), description: None }).await.unwrap()
    }

    #[tokio::test]
    async fn create_associates_given_genres() {
        let f = fixture().await;
        let scifi = genre(&f, "Sci-Fi").await;
        let action = genre(&f, "Action").await;

        let movie = f.service.create(inception(f.nolan.id), &[scifi.clone(), action.clone()]).await.unwrap();
        assert_eq!(f.service.get_by_title("Inception").await.unwrap(), Some(movie.clone()));
        assert_eq!(f.service.genres_of(movie.id).await.unwrap(), vec![scifi, action]);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_title() {
        let f = fixture().await;
        f.service.create(inception(f.nolan.id), &[]).await.unwrap();

        let err = f.service.create(inception(f.other.id), &[]).await.unwrap_err();
        assert!(matches!(err, CatalogError::Uniqueness(_)), "{err:?}");
        let page = f.service.search(1, 10, &MovieFilter::default()).await.unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].director_id, f.nolan.id);
    }

    #[tokio::test]
    async fn create_rejects_unknown_director() {
        let f = fixture().await;
        let err = f.service.create(inception(9_999), &[]).await.unwrap_err();
        assert!(matches!(err, CatalogError::Existence(_)), "{err:?}");
        assert_eq!(f.service.get_by_title("Inception").await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_rejects_out_of_range_year() {
        let f = fixture().await;
        let mut new = inception(f.nolan.id);
        new.release_year = Some(1887);
        let err = f.service.create(new, &[]).await.unwrap_err();
        assert!(matches!(err, CatalogError::Range { field: "release_year", .. }), "{err:?}");
    }

    #[tokio::test]
    async fn search_paginates_filtered_results() {
        let f = fixture().await;
        for title in ["Following", "Memento", "Insomnia", "Inception", "Interstellar"] {
            let new = NewMovie { title: title.into(), director_id: f.nolan.id, ..Default::default() };
            f.service.create(new, &[]).await.unwrap();
        }

        let filter = MovieFilter { title: Some("in".into()), ..Default::default() };
        let first = f.service.search(1, 2, &filter).await.unwrap();
        let titles: Vec<_> = first.items.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Following", "Insomnia"]);
        assert_eq!((first.total_items, first.total_pages), (4, 2));

        let second = f.service.search(2, 2, &filter).await.unwrap();
        let titles: Vec<_> = second.items.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Inception", "Interstellar"]);

        let err = f.service.search(3, 2, &filter).await.unwrap_err();
        assert!(matches!(err, CatalogError::Page(PageError::OutOfRange { page: 3, max_page: 2 })));

        let none = MovieFilter { title: Some("zzz".into()), ..Default::default() };
        assert!(f.service.search(7, 2, &none).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn update_is_partial() {
        let f = fixture().await;
        let movie = f.service.create(inception(f.nolan.id), &[]).await.unwrap();

        let updated = f
            .service
            .update(movie.id, MovieChanges { release_year: Some(2011), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(updated.release_year, Some(2011));
        assert_eq!(updated.title, "Inception");
        assert_eq!(updated.cast.as_deref(), Some("Leonardo DiCaprio"));
        assert_eq!(updated.director_id, f.nolan.id);

        let unchanged = f.service.update(movie.id, MovieChanges::default()).await.unwrap();
        assert_eq!(unchanged, updated);
    }

    #[tokio::test]
    async fn update_checks_title_and_director() {
        let f = fixture().await;
        let movie = f.service.create(inception(f.nolan.id), &[]).await.unwrap();
        let new = NewMovie { title: "Barbie".into(), director_id: f.other.id, ..Default::default() };
        f.service.create(new, &[]).await.unwrap();

        let same_title = MovieChanges { title: Some("Inception".into()), ..Default::default() };
        f.service.update(movie.id, same_title).await.unwrap();

        let taken = MovieChanges { title: Some("Barbie".into()), ..Default::default() };
        let err = f.service.update(movie.id, taken).await.unwrap_err();
        assert!(matches!(err, CatalogError::Uniqueness(_)));

        let bad_director = MovieChanges { director_id: Some(424_242), ..Default::default() };
        let err = f.service.update(movie.id, bad_director).await.unwrap_err();
        assert!(matches!(err, CatalogError::Existence(_)));

        let err = f.service.update(31_337, MovieChanges::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Movie with id 31337 not found");

        let moved = MovieChanges {
            title: Some("Inception (2010)".into()),
            director_id: Some(f.other.id),
            cast: Some("Elliot Page".into()),
            ..Default::default()
        };
        let updated = f.service.update(movie.id, moved).await.unwrap();
        assert_eq!(updated.title, "Inception (2010)");
        assert_eq!(updated.director_id, f.other.id);
        assert_eq!(updated.cast.as_deref(), Some("Elliot Page"));
        assert_eq!(f.service.get_by_id(movie.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn update_replaces_genre_set() {
        let f = fixture().await;
        let a = genre(&f, "A").await;
        let b = genre(&f, "B").await;
        let c = genre(&f, "C").await;
        let movie = f.service.create(inception(f.nolan.id), &[]).await.unwrap();

        let to_ab = MovieChanges { genres: Some(vec![a.clone(), b.clone()]), ..Default::default() };
        f.service.update(movie.id, to_ab).await.unwrap();
        assert_eq!(f.service.genres_of(movie.id).await.unwrap(), vec![a, b.clone()]);

        let to_bc = MovieChanges { genres: Some(vec![b.clone(), c.clone()]), ..Default::default() };
        f.service.update(movie.id, to_bc).await.unwrap();
        assert_eq!(f.service.genres_of(movie.id).await.unwrap(), vec![b.clone(), c.clone()]);

        // no genre collection supplied: set is left alone
        f.service.update(movie.id, MovieChanges::default()).await.unwrap();
        assert_eq!(f.service.genres_of(movie.id).await.unwrap(), vec![b, c]);
    }
}
