use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{NewUser, PublicUser, User, UserStatus};

use super::user_repository::UserRepository;

pub struct PostgresUserRepository {
    pub pool: PgPool,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id,
                   full_name,
                   email,
                   password_hash,
                   phone,
                   role,
                   status,
                   created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
    }

    async fn is_email_taken(&self, email: &str) -> Result<bool, sqlx::Error> {
        let res = sqlx::query_scalar::<_, i32>("SELECT 1 FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(res.is_some())
    }

    async fn create_user(&self, user: &NewUser) -> Result<PublicUser, sqlx::Error> {
        sqlx::query_as::<_, PublicUser>(
            r#"
            INSERT INTO users (full_name, email, password_hash, phone, role, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, full_name, email, phone, role, status
            "#,
        )
        .bind(&user.full_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(user.role)
        .bind(user.status)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_user_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<Option<PublicUser>, sqlx::Error> {
        sqlx::query_as::<_, PublicUser>(
            r#"
            UPDATE users
            SET status = $1
            WHERE id = $2
            RETURNING id, full_name, email, phone, role, status
            "#,
        )
        .bind(status)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }
}
