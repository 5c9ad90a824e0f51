use async_trait::async_trait;
use uuid::Uuid;

use crate::models::bus_owner::{BusOwner, NewBusOwner};

#[async_trait]
pub trait BusOwnerRepository: Send + Sync {
    /// Checks each unique field (user_id, gst_number, pan_number, email,
    /// phone) against existing owners and names the first one that
    /// collides.
    async fn find_conflicting_field(
        &self,
        owner: &NewBusOwner,
    ) -> Result<Option<&'static str>, sqlx::Error>;
    async fn insert(&self, owner: &NewBusOwner) -> Result<BusOwner, sqlx::Error>;
    async fn list(&self) -> Result<Vec<BusOwner>, sqlx::Error>;
    async fn find_by_id(&self, owner_id: Uuid) -> Result<Option<BusOwner>, sqlx::Error>;
}
