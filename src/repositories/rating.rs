use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use crate::{
    entities::rating,
    error::{CatalogError, CatalogResult},
};

#[derive(Clone)]
pub struct RatingRepository {
    db: DatabaseConnection,
}

impl RatingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> CatalogResult<Option<rating::Model>> {
        Ok(rating::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn add(&self, movie_id: i32, score: f64) -> CatalogResult<rating::Model> {
        let model = rating::ActiveModel { id: NotSet, movie_id: Set(movie_id), score: Set(score) };
        model.insert(&self.db).await.map_err(|e| CatalogError::from_write(e, "rating"))
    }

    /// All ratings of one movie in insertion order.
    pub async fn list_for_movie(&self, movie_id: i32) -> CatalogResult<Vec<rating::Model>> {
        let ratings = rating::Entity::find()
            .filter(rating::Column::MovieId.eq(movie_id))
            .order_by_asc(rating::Column::Id)
            .all(&self.db)
            .await?;
        debug!(movie_id, count = ratings.len(), "loaded ratings");
        Ok(ratings)
    }
}
