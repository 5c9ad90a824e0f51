pub mod bus_owner_repository;
pub mod bus_repository;
pub mod catalog_repository;
pub mod mock_db;
pub mod postgres_bus_owner_repository;
pub mod postgres_bus_repository;
pub mod postgres_catalog_repository;
pub mod postgres_user_repository;
pub mod user_repository;

/// Postgres signals a violated uniqueness constraint with SQLSTATE 23505.
/// A race between the pre-insert check and the insert itself surfaces here
/// and must be treated the same as the pre-check hit.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        if let Some(code) = db_err.code() {
            return code == "23505";
        }
    }
    false
}
