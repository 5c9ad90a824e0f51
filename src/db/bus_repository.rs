use async_trait::async_trait;
use uuid::Uuid;

use crate::models::bus::{Bus, NewBus};

#[async_trait]
pub trait BusRepository: Send + Sync {
    async fn find_by_registration(&self, registration: &str)
        -> Result<Option<Bus>, sqlx::Error>;
    /// True when another bus (a different id) already holds this
    /// registration number.
    async fn registration_taken_by_other(
        &self,
        registration: &str,
        bus_id: Uuid,
    ) -> Result<bool, sqlx::Error>;
    async fn insert(&self, bus: &NewBus) -> Result<Bus, sqlx::Error>;
    async fn find_by_id(&self, bus_id: Uuid) -> Result<Option<Bus>, sqlx::Error>;
    /// Full overwrite of an existing row. Returns `None` when no such bus
    /// exists.
    async fn update(&self, bus_id: Uuid, bus: &NewBus) -> Result<Option<Bus>, sqlx::Error>;
    async fn list(&self) -> Result<Vec<Bus>, sqlx::Error>;
}
