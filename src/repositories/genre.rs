use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};
use tracing::debug;

use crate::{
    entities::genre,
    error::{CatalogError, CatalogResult},
};

#[derive(Clone, Debug, Default)]
pub struct NewGenre {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct GenreRepository {
    db: DatabaseConnection,
}

impl GenreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> CatalogResult<Option<genre::Model>> {
        Ok(genre::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get_by_name(&self, name: &str) -> CatalogResult<Option<genre::Model>> {
        Ok(genre::Entity::find().filter(genre::Column::Name.eq(name)).one(&self.db).await?)
    }

    /// Genres whose id is in `ids`, in no particular order.
    pub async fn find_by_ids(&self, ids: &[i32]) -> CatalogResult<Vec<genre::Model>> {
        debug!(count = ids.len(), "bulk genre lookup by id");
        Ok(genre::Entity::find()
            .filter(genre::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?)
    }

    /// Genres whose name is in `names`, in no particular order.
    pub async fn find_by_names(&self, names: &[String]) -> CatalogResult<Vec<genre::Model>> {
        debug!(count = names.len(), "bulk genre lookup by name");
        Ok(genre::Entity::find()
            .filter(genre::Column::Name.is_in(names.iter().cloned()))
            .all(&self.db)
            .await?)
    }

    pub async fn add(&self, new: NewGenre) -> CatalogResult<genre::Model> {
        let model =
            genre::ActiveModel { id: NotSet, name: Set(new.name), description: Set(new.description) };
        model.insert(&self.db).await.map_err(|e| CatalogError::from_write(e, "genre"))
    }

    pub async fn update(&self, model: genre::ActiveModel) -> CatalogResult<genre::Model> {
        model.update(&self.db).await.map_err(|e| CatalogError::from_write(e, "genre"))
    }
}
