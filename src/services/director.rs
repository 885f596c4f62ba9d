use tracing::{info, warn};

use crate::{
    entities::director,
    error::{CatalogError, CatalogResult},
    repositories::{DirectorRepository, NewDirector},
};

#[derive(Clone)]
pub struct DirectorService {
    directors: DirectorRepository,
}

impl DirectorService {
    pub fn new(directors: DirectorRepository) -> Self {
        Self { directors }
    }

    pub async fn get_by_id(&self, id: i32) -> CatalogResult<Option<director::Model>> {
        self.directors.get_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> CatalogResult<Option<director::Model>> {
        self.directors.get_by_name(name).await
    }

    pub async fn create(&self, new: NewDirector) -> CatalogResult<director::Model> {
        if self.directors.get_by_name(&new.name).await?.is_some() {
            warn!(name = %new.name, "director name already taken");
            return Err(CatalogError::duplicate("Director", "name", &new.name));
        }
        let director = self.directors.add(new).await?;
        info!(director_id = director.id, name = %director.name, "created director");
        Ok(director)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    #[tokio::test]
    async fn duplicate_name_is_rejected_without_insert() {
        let db = connect_in_memory().await.unwrap();
        let service = DirectorService::new(DirectorRepository::new(db));

        let nolan = service
            .create(NewDirector { name: "Nolan".into(), birth_year: Some(1970), description: None })
            .await
            .unwrap();
        assert_eq!(service.get_by_name("Nolan").await.unwrap(), Some(nolan.clone()));

        let err = service
            .create(NewDirector { name: "Nolan".into(), birth_year: Some(1999), description: None })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Uniqueness(_)), "{err:?}");

        // the first row is untouched and no second row exists
        assert_eq!(service.get_by_id(nolan.id).await.unwrap(), Some(nolan.clone()));
        assert_eq!(service.get_by_id(nolan.id + 1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn names_differing_in_case_are_distinct() {
        let db = connect_in_memory().await.unwrap();
        let service = DirectorService::new(DirectorRepository::new(db));
        service.create(NewDirector { name: "Nolan".into(), ..Default::default() }).await.unwrap();
        service.create(NewDirector { name: "nolan".into(), ..Default::default() }).await.unwrap();
    }
}
