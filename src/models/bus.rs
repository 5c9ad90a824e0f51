use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Bus {
    pub id: Uuid,
    pub bus_name: String,
    pub registration_number: String,
    pub bus_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub manufacture_year: Option<i32>,
    pub odo_meter: Option<i32>,
    pub last_service_date: Option<Date>,
    pub next_service_due: Option<Date>,
    pub maintenance_note: Option<String>,
    pub insurance_number: Option<String>,
    pub insurance_expiry: Option<Date>,
    pub permit_number: Option<String>,
    pub permit_expiry: Option<Date>,
    pub max_luggage_kg: i32,
    pub amenities: Option<Value>,
    pub images: Option<Vec<String>>,
    pub gps_enabled: bool,
    pub gps_device_id: Option<String>,
    pub is_active: bool,
    pub is_operational: bool,
    pub is_verified: bool,
    pub owner_id: Option<Uuid>,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

fn default_max_luggage_kg() -> i32 {
    20
}

fn default_true() -> bool {
    true
}

/// Fleet registration input. Dates arrive as `YYYY-MM-DD` strings and are
/// parsed at the route boundary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BusDetails {
    #[serde(default)]
    pub bus_name: String,
    #[serde(default)]
    pub registration_number: String,
    pub bus_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub manufacture_year: Option<i32>,
    pub odo_meter: Option<i32>,
    pub last_service_date: Option<String>,
    pub next_service_due: Option<String>,
    pub maintenance_note: Option<String>,
    pub insurance_number: Option<String>,
    pub insurance_expiry: Option<String>,
    pub permit_number: Option<String>,
    pub permit_expiry: Option<String>,
    #[serde(default = "default_max_luggage_kg")]
    pub max_luggage_kg: i32,
    pub amenities: Option<Value>,
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub gps_enabled: bool,
    pub gps_device_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub is_operational: bool,
    #[serde(default)]
    pub is_verified: bool,
    pub owner_id: Option<Uuid>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateBusPayload {
    pub bus_id: Option<Uuid>,
    #[serde(flatten)]
    pub details: BusDetails,
}

/// Parsed, insert-ready bus record.
#[derive(Debug, Clone)]
pub struct NewBus {
    pub bus_name: String,
    pub registration_number: String,
    pub bus_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub manufacture_year: Option<i32>,
    pub odo_meter: Option<i32>,
    pub last_service_date: Option<Date>,
    pub next_service_due: Option<Date>,
    pub maintenance_note: Option<String>,
    pub insurance_number: Option<String>,
    pub insurance_expiry: Option<Date>,
    pub permit_number: Option<String>,
    pub permit_expiry: Option<Date>,
    pub max_luggage_kg: i32,
    pub amenities: Option<Value>,
    pub images: Option<Vec<String>>,
    pub gps_enabled: bool,
    pub gps_device_id: Option<String>,
    pub is_active: bool,
    pub is_operational: bool,
    pub is_verified: bool,
    pub owner_id: Option<Uuid>,
    pub description: Option<String>,
}
