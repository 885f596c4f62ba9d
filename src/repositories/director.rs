use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, Set,
};
use tracing::debug;

use crate::{
    entities::director,
    error::{CatalogError, CatalogResult},
};

#[derive(Clone, Debug, Default)]
pub struct NewDirector {
    pub name: String,
    pub birth_year: Option<i32>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct DirectorRepository {
    db: DatabaseConnection,
}

impl DirectorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> CatalogResult<Option<director::Model>> {
        debug!(director_id = id, "looking up director");
        Ok(director::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get_by_name(&self, name: &str) -> CatalogResult<Option<director::Model>> {
        Ok(director::Entity::find()
            .filter(director::Column::Name.eq(name))
            .one(&self.db)
            .await?)
    }

    pub async fn add(&self, new: NewDirector) -> CatalogResult<director::Model> {
        let model = director::ActiveModel {
            id: NotSet,
            name: Set(new.name),
            birth_year: Set(new.birth_year),
            description: Set(new.description),
        };
        model.insert(&self.db).await.map_err(|e| CatalogError::from_write(e, "director"))
    }

    pub async fn update(&self, model: director::ActiveModel) -> CatalogResult<director::Model> {
        model.update(&self.db).await.map_err(|e| CatalogError::from_write(e, "director"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    async fn repo() -> DirectorRepository {
        DirectorRepository::new(connect_in_memory().await.unwrap())
    }

    fn nolan() -> NewDirector {
        NewDirector { name: "Christopher Nolan".into(), birth_year: Some(1970), ..Default::default() }
    }

    #[tokio::test]
    async fn add_then_lookup() {
        let repo = repo().await;
        let added = repo.add(nolan()).await.unwrap();
        assert!(added.id > 0);

        assert_eq!(repo.get_by_id(added.id).await.unwrap(), Some(added.clone()));
        assert_eq!(repo.get_by_name("Christopher Nolan").await.unwrap(), Some(added));
        assert_eq!(repo.get_by_name("christopher nolan").await.unwrap(), None);
        assert_eq!(repo.get_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_storage_conflict() {
        let repo = repo().await;
        repo.add(nolan()).await.unwrap();
        let err = repo.add(nolan()).await.unwrap_err();
        assert!(matches!(err, CatalogError::StorageConflict(_)), "{err:?}");
    }

    #[tokio::test]
    async fn update_changes_only_set_fields() {
        let repo = repo().await;
        let added = repo.add(nolan()).await.unwrap();

        let mut active: director::ActiveModel = added.clone().into();
        active.description = Set(Some("British-American filmmaker".into()));
        let updated = repo.update(active).await.unwrap();

        assert_eq!(updated.name, added.name);
        assert_eq!(updated.birth_year, Some(1970));
        assert_eq!(updated.description.as_deref(), Some("British-American filmmaker"));
    }
}
