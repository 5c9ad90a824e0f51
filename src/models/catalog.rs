use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, Time};
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub parent_city_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationPayload {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: Option<bool>,
    pub parent_city_id: Option<Uuid>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct City {
    pub id: Uuid,
    pub name: String,
    pub state_id: Uuid,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CityPayload {
    #[serde(default)]
    pub name: String,
    pub state_id: Option<Uuid>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct StateRecord {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatePayload {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BusTrip {
    pub id: Uuid,
    pub bus_id: Uuid,
    pub source_location_id: Uuid,
    pub destination_location_id: Uuid,
    pub departure_time: Time,
    pub arrival_time: Time,
    pub travel_date: Date,
    pub is_recurring: bool,
    pub days_of_week: Option<Vec<String>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BusTripPayload {
    pub bus_id: Option<Uuid>,
    pub source_location_id: Option<Uuid>,
    pub destination_location_id: Option<Uuid>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub travel_date: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    pub days_of_week: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

/// Parsed, insert-ready trip.
#[derive(Debug, Clone)]
pub struct NewBusTrip {
    pub bus_id: Uuid,
    pub source_location_id: Uuid,
    pub destination_location_id: Uuid,
    pub departure_time: Time,
    pub arrival_time: Time,
    pub travel_date: Date,
    pub is_recurring: bool,
    pub days_of_week: Option<Vec<String>>,
    pub is_active: bool,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: Uuid,
    pub route_name: String,
    pub source_location_id: Uuid,
    pub destination_location_id: Uuid,
    pub via: Option<Vec<String>>,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutePayload {
    #[serde(default)]
    pub route_name: String,
    pub source_location_id: Option<Uuid>,
    pub destination_location_id: Option<Uuid>,
    pub via: Option<Vec<String>>,
    pub status: Option<String>,
}

/// Parsed, insert-ready route.
#[derive(Debug, Clone)]
pub struct NewRoute {
    pub route_name: String,
    pub source_location_id: Uuid,
    pub destination_location_id: Uuid,
    pub via: Option<Vec<String>>,
    pub status: String,
}

/// Route listing row with the joined source/destination location names.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RouteListing {
    pub id: Uuid,
    pub route_name: String,
    pub source_location_id: Uuid,
    pub source_location_name: Option<String>,
    pub destination_location_id: Uuid,
    pub destination_location_name: Option<String>,
    pub via: Option<Vec<String>>,
    pub status: String,
}
