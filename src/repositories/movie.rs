use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    JoinType, NotSet, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
    sea_query::{Expr, Func, LikeExpr, OnConflict, Query, SimpleExpr},
};
use tracing::debug;

use crate::{
    entities::{director, genre, movie, movie_genre},
    error::{CatalogError, CatalogResult},
};

#[derive(Clone, Debug, Default)]
pub struct NewMovie {
    pub title: String,
    pub director_id: i32,
    pub release_year: Option<i32>,
    pub cast: Option<String>,
}

/// Conjunctive search criteria; `None` means "no constraint".
#[derive(Clone, Debug, Default)]
pub struct MovieFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Case-insensitive substring of the director's name.
    pub director_name: Option<String>,
    pub release_year: Option<i32>,
    /// Already-resolved genre the movie must be associated with.
    pub genre: Option<genre::Model>,
}

#[derive(Clone)]
pub struct MovieRepository {
    db: DatabaseConnection,
}

impl MovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> CatalogResult<Option<movie::Model>> {
        debug!(movie_id = id, "looking up movie");
        Ok(movie::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get_by_title(&self, title: &str) -> CatalogResult<Option<movie::Model>> {
        Ok(movie::Entity::find().filter(movie::Column::Title.eq(title)).one(&self.db).await?)
    }

    pub async fn add(&self, new: NewMovie) -> CatalogResult<movie::Model> {
        let model = movie::ActiveModel {
            id: NotSet,
            title: Set(new.title),
            director_id: Set(new.director_id),
            release_year: Set(new.release_year),
            cast: Set(new.cast),
        };
        model.insert(&self.db).await.map_err(|e| CatalogError::from_write(e, "movie"))
    }

    pub async fn update(&self, model: movie::ActiveModel) -> CatalogResult<movie::Model> {
        model.update(&self.db).await.map_err(|e| CatalogError::from_write(e, "movie"))
    }

    /// Writes `changes` (if any field is set) and, when given, the new genre
    /// set in one transaction. Nothing is persisted if either step fails.
    pub async fn update_with_genres(
        &self,
        current: movie::Model,
        changes: movie::ActiveModel,
        genre_ids: Option<&[i32]>,
    ) -> CatalogResult<movie::Model> {
        let txn = self.db.begin().await?;

        let updated = if changes.is_changed() {
            changes.update(&txn).await.map_err(|e| CatalogError::from_write(e, "movie"))?
        } else {
            current
        };
        if let Some(ids) = genre_ids {
            let (removed, wanted) = replace_genres(&txn, updated.id, ids).await?;
            debug!(movie_id = updated.id, removed, genres = ?wanted, "replaced genre set");
        }

        txn.commit().await?;
        Ok(updated)
    }

    /// Movies matching every supplied criterion, in insertion (id) order.
    pub async fn find_movies(&self, filter: &MovieFilter) -> CatalogResult<Vec<movie::Model>> {
        let mut query = movie::Entity::find();

        if let Some(title) = filter.title.as_deref() {
            query = query.filter(contains_ignore_case(
                Expr::col((movie::Entity, movie::Column::Title)),
                title,
            ));
        }
        if let Some(name) = filter.director_name.as_deref() {
            query = query.join(JoinType::InnerJoin, movie::Relation::Director.def()).filter(
                contains_ignore_case(Expr::col((director::Entity, director::Column::Name)), name),
            );
        }
        if let Some(year) = filter.release_year {
            query = query.filter(movie::Column::ReleaseYear.eq(year));
        }
        if let Some(genre) = &filter.genre {
            query = query.filter(
                movie::Column::Id.in_subquery(
                    Query::select()
                        .column(movie_genre::Column::MovieId)
                        .from(movie_genre::Entity)
                        .and_where(movie_genre::Column::GenreId.eq(genre.id))
                        .to_owned(),
                ),
            );
        }

        let movies = query.order_by_asc(movie::Column::Id).all(&self.db).await?;
        debug!(?filter, matched = movies.len(), "movie scan");
        Ok(movies)
    }

    /// Links `genre_id` to `movie_id`; a no-op when the link already exists.
    pub async fn add_genre_to_movie(&self, movie_id: i32, genre_id: i32) -> CatalogResult<()> {
        let inserted = insert_association(&self.db, movie_id, genre_id).await?;
        debug!(movie_id, genre_id, inserted, "genre association");
        Ok(())
    }

    pub async fn remove_genre_from_movie(&self, movie_id: i32, genre_id: i32) -> CatalogResult<()> {
        movie_genre::Entity::delete_many()
            .filter(movie_genre::Column::MovieId.eq(movie_id))
            .filter(movie_genre::Column::GenreId.eq(genre_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Makes the movie's genre set exactly `genre_ids` in one transaction.
    pub async fn replace_movie_genres(&self, movie_id: i32, genre_ids: &[i32]) -> CatalogResult<()> {
        let txn = self.db.begin().await?;
        let (removed, wanted) = replace_genres(&txn, movie_id, genre_ids).await?;
        txn.commit().await?;

        debug!(movie_id, removed, genres = ?wanted, "replaced genre set");
        Ok(())
    }

    /// The movie's genres ordered by genre id.
    pub async fn genres_for_movie(&self, movie_id: i32) -> CatalogResult<Vec<genre::Model>> {
        Ok(genre::Entity::find()
            .inner_join(movie_genre::Entity)
            .filter(movie_genre::Column::MovieId.eq(movie_id))
            .order_by_asc(genre::Column::Id)
            .all(&self.db)
            .await?)
    }
}

/// Returns the number of dropped links and the deduplicated wanted set.
async fn replace_genres<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    genre_ids: &[i32],
) -> Result<(u64, Vec<i32>), DbErr> {
    let mut wanted: Vec<i32> = Vec::with_capacity(genre_ids.len());
    for id in genre_ids {
        if !wanted.contains(id) {
            wanted.push(*id);
        }
    }

    let removed = movie_genre::Entity::delete_many()
        .filter(movie_genre::Column::MovieId.eq(movie_id))
        .filter(movie_genre::Column::GenreId.is_not_in(wanted.iter().copied()))
        .exec(conn)
        .await?
        .rows_affected;

    for genre_id in &wanted {
        insert_association(conn, movie_id, *genre_id).await?;
    }

    Ok((removed, wanted))
}

async fn insert_association<C: ConnectionTrait>(
    conn: &C,
    movie_id: i32,
    genre_id: i32,
) -> Result<u64, DbErr> {
    let row = movie_genre::ActiveModel { movie_id: Set(movie_id), genre_id: Set(genre_id) };
    movie_genre::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([movie_genre::Column::MovieId, movie_genre::Column::GenreId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
}

/// SQLite's `lower()` only folds ASCII, so the needle is folded the same way;
/// non-ASCII letters then match by exact case.
fn contains_ignore_case(column: Expr, needle: &str) -> SimpleExpr {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_ascii_lowercase().chars() {
        if matches!(c, '%' | '_' | '!') {
            pattern.push('!');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Expr::expr(Func::lower(column)).like(LikeExpr::new(pattern).escape('!'))
}
