use async_trait::async_trait;
use uuid::Uuid;

use crate::models::catalog::{
    BusTrip, City, Location, LocationPayload, NewBusTrip, NewRoute, RouteListing, RouteRecord,
    StateRecord,
};

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn insert_location(&self, location: &LocationPayload) -> Result<Location, sqlx::Error>;
    /// Partial update; only the provided fields change. Returns `None`
    /// when no such location exists.
    async fn update_location(
        &self,
        location_id: Uuid,
        location: &LocationPayload,
    ) -> Result<Option<Location>, sqlx::Error>;
    async fn list_locations(&self) -> Result<Vec<Location>, sqlx::Error>;

    async fn insert_city(&self, name: &str, state_id: Uuid) -> Result<City, sqlx::Error>;
    async fn cities_by_state(&self, state_id: Uuid) -> Result<Vec<City>, sqlx::Error>;

    async fn insert_state(&self, name: &str) -> Result<StateRecord, sqlx::Error>;
    async fn list_states(&self) -> Result<Vec<StateRecord>, sqlx::Error>;

    async fn insert_trip(&self, trip: &NewBusTrip) -> Result<BusTrip, sqlx::Error>;

    async fn insert_route(&self, route: &NewRoute) -> Result<RouteRecord, sqlx::Error>;
    async fn list_routes(&self) -> Result<Vec<RouteListing>, sqlx::Error>;
}
