use core::fmt;

use serde::{Deserialize, Serialize};
use sqlx::{prelude::Type, FromRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_role")] // Matches the Postgres enum name
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Admin,
    Superadmin,
    Employee,
    Driver,
    Manager,
    BusOwners,
}

impl UserRole {
    /// Parses the wire representation used by signup payloads. Unknown
    /// values are a caller error, not a deserialization failure.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "customer" => Some(Self::Customer),
            "admin" => Some(Self::Admin),
            "superadmin" => Some(Self::Superadmin),
            "employee" => Some(Self::Employee),
            "driver" => Some(Self::Driver),
            "manager" => Some(Self::Manager),
            "bus_owners" => Some(Self::BusOwners),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
            UserRole::Superadmin => "superadmin",
            UserRole::Employee => "employee",
            UserRole::Driver => "driver",
            UserRole::Manager => "manager",
            UserRole::BusOwners => "bus_owners",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "user_status")]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Suspended,
    Pending,
}

impl UserStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "suspended" => Some(Self::Suspended),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserStatus::Active => "active",
            UserStatus::Suspended => "suspended",
            UserStatus::Pending => "pending",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: uuid::Uuid,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: time::OffsetDateTime,
}

/// The only user shape that crosses the HTTP boundary. The password hash
/// never appears here.
#[derive(Debug, Deserialize, Serialize, Clone, sqlx::FromRow)]
pub struct PublicUser {
    pub id: uuid::Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
}

/// Validated signup data handed to the store for insertion.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: UserRole,
    pub status: UserStatus,
}
