use std::sync::Arc;

use argon2::Argon2;

use crate::config::Config;
use crate::db::{
    bus_owner_repository::BusOwnerRepository, bus_repository::BusRepository,
    catalog_repository::CatalogRepository, user_repository::UserRepository,
};
use crate::utils::jwt::{JwtKeyProvider, JwtKeys};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn UserRepository>,
    pub buses: Arc<dyn BusRepository>,
    pub owners: Arc<dyn BusOwnerRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub config: Arc<Config>,
    pub jwt: JwtKeys,
    pub hasher: Argon2<'static>,
}

impl JwtKeyProvider for AppState {
    fn jwt_keys(&self) -> &JwtKeys {
        &self.jwt
    }
}
