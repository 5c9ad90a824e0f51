use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::catalog::{
    BusTrip, City, Location, LocationPayload, NewBusTrip, NewRoute, RouteListing, RouteRecord,
    StateRecord,
};

use super::catalog_repository::CatalogRepository;

const LOCATION_COLUMNS: &str =
    "id, name, city, state, latitude, longitude, is_active, parent_city_id";
const TRIP_COLUMNS: &str = r#"
    id, bus_id, source_location_id, destination_location_id,
    departure_time, arrival_time, travel_date, is_recurring, days_of_week,
    is_active
"#;

pub struct PostgresCatalogRepository {
    pub pool: PgPool,
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn insert_location(&self, location: &LocationPayload) -> Result<Location, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO locations (name, city, state, latitude, longitude, is_active, parent_city_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {LOCATION_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Location>(&sql)
            .bind(&location.name)
            .bind(&location.city)
            .bind(&location.state)
            .bind(location.latitude)
            .bind(location.longitude)
            .bind(location.is_active.unwrap_or(true))
            .bind(location.parent_city_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn update_location(
        &self,
        location_id: Uuid,
        location: &LocationPayload,
    ) -> Result<Option<Location>, sqlx::Error> {
        let sql = format!(
            r#"
            UPDATE locations
            SET name = $1,
                city = $2,
                state = $3,
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                is_active = COALESCE($6, is_active),
                parent_city_id = COALESCE($7, parent_city_id)
            WHERE id = $8
            RETURNING {LOCATION_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Location>(&sql)
            .bind(&location.name)
            .bind(&location.city)
            .bind(&location.state)
            .bind(location.latitude)
            .bind(location.longitude)
            .bind(location.is_active)
            .bind(location.parent_city_id)
            .bind(location_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_locations(&self) -> Result<Vec<Location>, sqlx::Error> {
        let sql = format!("SELECT {LOCATION_COLUMNS} FROM locations ORDER BY id DESC");
        sqlx::query_as::<_, Location>(&sql)
            .fetch_all(&self.pool)
            .await
    }

    async fn insert_city(&self, name: &str, state_id: Uuid) -> Result<City, sqlx::Error> {
        sqlx::query_as::<_, City>(
            r#"
            INSERT INTO cities (name, state_id)
            VALUES ($1, $2)
            RETURNING id, name, state_id
            "#,
        )
        .bind(name)
        .bind(state_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn cities_by_state(&self, state_id: Uuid) -> Result<Vec<City>, sqlx::Error> {
        sqlx::query_as::<_, City>("SELECT id, name, state_id FROM cities WHERE state_id = $1")
            .bind(state_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn insert_state(&self, name: &str) -> Result<StateRecord, sqlx::Error> {
        sqlx::query_as::<_, StateRecord>(
            "INSERT INTO states (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_states(&self) -> Result<Vec<StateRecord>, sqlx::Error> {
        sqlx::query_as::<_, StateRecord>("SELECT id, name FROM states ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await
    }

    async fn insert_trip(&self, trip: &NewBusTrip) -> Result<BusTrip, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO bus_trips (
                bus_id, source_location_id, destination_location_id,
                departure_time, arrival_time, travel_date, is_recurring,
                days_of_week, is_active
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {TRIP_COLUMNS}
            "#
        );
        sqlx::query_as::<_, BusTrip>(&sql)
            .bind(trip.bus_id)
            .bind(trip.source_location_id)
            .bind(trip.destination_location_id)
            .bind(trip.departure_time)
            .bind(trip.arrival_time)
            .bind(trip.travel_date)
            .bind(trip.is_recurring)
            .bind(&trip.days_of_week)
            .bind(trip.is_active)
            .fetch_one(&self.pool)
            .await
    }

    async fn insert_route(&self, route: &NewRoute) -> Result<RouteRecord, sqlx::Error> {
        sqlx::query_as::<_, RouteRecord>(
            r#"
            INSERT INTO routes (route_name, source_location_id, destination_location_id, via, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, route_name, source_location_id, destination_location_id, via, status
            "#,
        )
        .bind(&route.route_name)
        .bind(route.source_location_id)
        .bind(route.destination_location_id)
        .bind(&route.via)
        .bind(&route.status)
        .fetch_one(&self.pool)
        .await
    }

    async fn list_routes(&self) -> Result<Vec<RouteListing>, sqlx::Error> {
        sqlx::query_as::<_, RouteListing>(
            r#"
            SELECT r.id,
                   r.route_name,
                   r.source_location_id,
                   sl.name AS source_location_name,
                   r.destination_location_id,
                   dl.name AS destination_location_name,
                   r.via,
                   r.status
            FROM routes r
            LEFT JOIN locations sl ON r.source_location_id = sl.id
            LEFT JOIN locations dl ON r.destination_location_id = dl.id
            ORDER BY r.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
