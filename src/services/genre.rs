use std::collections::HashMap;

use tracing::{info, warn};

use crate::{
    entities::genre,
    error::{CatalogError, CatalogResult},
    repositories::{GenreRepository, NewGenre},
};

#[derive(Clone)]
pub struct GenreService {
    genres: GenreRepository,
}

impl GenreService {
    pub fn new(genres: GenreRepository) -> Self {
        Self { genres }
    }

    pub async fn get_by_id(&self, id: i32) -> CatalogResult<Option<genre::Model>> {
        self.genres.get_by_id(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> CatalogResult<Option<genre::Model>> {
        self.genres.get_by_name(name).await
    }

    pub async fn create(&self, new: NewGenre) -> CatalogResult<genre::Model> {
        if self.genres.get_by_name(&new.name).await?.is_some() {
            warn!(name = %new.name, "genre name already taken");
            return Err(CatalogError::duplicate("Genre", "name", &new.name));
        }
        let genre = self.genres.add(new).await?;
        info!(genre_id = genre.id, name = %genre.name, "created genre");
        Ok(genre)
    }

    /// Resolves every name, in input order, or fails on the first unknown one.
    pub async fn resolve_by_names(&self, names: &[String]) -> CatalogResult<Vec<genre::Model>> {
        let found: HashMap<String, genre::Model> = self
            .genres
            .find_by_names(names)
            .await?
            .into_iter()
            .map(|g| (g.name.clone(), g))
            .collect();

        names
            .iter()
            .map(|name| {
                found.get(name).cloned().ok_or_else(|| CatalogError::missing_name("Genre", name))
            })
            .collect()
    }

    /// Resolves every id, in input order, or fails on the first unknown one.
    pub async fn resolve_by_ids(&self, ids: &[i32]) -> CatalogResult<Vec<genre::Model>> {
        let found: HashMap<i32, genre::Model> =
            self.genres.find_by_ids(ids).await?.into_iter().map(|g| (g.id, g)).collect();

        ids.iter()
            .map(|id| found.get(id).cloned().ok_or_else(|| CatalogError::missing_id("Genre", *id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    async fn service_with(names: &[&str]) -> (GenreService, Vec<genre::Model>) {
        let db = connect_in_memory().await.unwrap();
        let service = GenreService::new(GenreRepository::new(db));
        let mut created = Vec::new();
        for name in names {
            created.push(
                service.create(NewGenre { name: (*name).into(), description: None }).await.unwrap(),
            );
        }
        (service, created)
    }

    #[tokio::test]
    async fn duplicate_genre_is_rejected() {
        let (service, _) = service_with(&["Drama"]).await;
        let err = service
            .create(NewGenre { name: "Drama".into(), description: Some("again".into()) })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Uniqueness(_)));
        assert_eq!(service.get_by_name("Drama").await.unwrap().unwrap().description, None);
    }

    #[tokio::test]
    async fn resolution_preserves_input_order() {
        let (service, g) = service_with(&["Drama", "Sci-Fi", "Thriller"]).await;

        let by_ids = service.resolve_by_ids(&[g[2].id, g[0].id]).await.unwrap();
        assert_eq!(by_ids, vec![g[2].clone(), g[0].clone()]);

        let by_names =
            service.resolve_by_names(&["Sci-Fi".into(), "Drama".into()]).await.unwrap();
        assert_eq!(by_names, vec![g[1].clone(), g[0].clone()]);

        assert!(service.resolve_by_ids(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn resolution_reports_first_missing_key() {
        let (service, g) = service_with(&["Drama"]).await;

        let err = service.resolve_by_ids(&[g[0].id, 41, 42]).await.unwrap_err();
        assert_eq!(err.to_string(), "Genre with id 41 not found");

        let err = service
            .resolve_by_names(&["Drama".into(), "Horror".into(), "Western".into()])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Genre 'Horror' not found");
    }
}
