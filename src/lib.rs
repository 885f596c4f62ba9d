pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod pagination;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod stats;

use std::sync::Arc;

use crate::{catalog::Catalog, config::Config};

pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
}
