use async_trait::async_trait;
use uuid::Uuid;

use crate::models::user::{NewUser, PublicUser, User, UserStatus};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
    async fn is_email_taken(&self, email: &str) -> Result<bool, sqlx::Error>;
    /// Inserts a new account. The store's unique index on `email` is the
    /// final arbiter; concurrent duplicate signups surface as a database
    /// unique violation from this call.
    async fn create_user(&self, user: &NewUser) -> Result<PublicUser, sqlx::Error>;
    /// Administrative status change. Returns `None` when no such user
    /// exists.
    async fn update_user_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<Option<PublicUser>, sqlx::Error>;
}
