use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::bus::{Bus, NewBus};

use super::bus_repository::BusRepository;

const BUS_COLUMNS: &str = r#"
    id, bus_name, registration_number, bus_type, make, model,
    manufacture_year, odo_meter, last_service_date, next_service_due,
    maintenance_note, insurance_number, insurance_expiry, permit_number,
    permit_expiry, max_luggage_kg, amenities, images, gps_enabled,
    gps_device_id, is_active, is_operational, is_verified, owner_id,
    description, created_at, updated_at
"#;

pub struct PostgresBusRepository {
    pub pool: PgPool,
}

#[async_trait]
impl BusRepository for PostgresBusRepository {
    async fn find_by_registration(
        &self,
        registration: &str,
    ) -> Result<Option<Bus>, sqlx::Error> {
        let sql = format!("SELECT {BUS_COLUMNS} FROM buses WHERE registration_number = $1");
        sqlx::query_as::<_, Bus>(&sql)
            .bind(registration)
            .fetch_optional(&self.pool)
            .await
    }

    async fn registration_taken_by_other(
        &self,
        registration: &str,
        bus_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query_scalar::<_, i32>(
            "SELECT 1 FROM buses WHERE registration_number = $1 AND id <> $2",
        )
        .bind(registration)
        .bind(bus_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(res.is_some())
    }

    async fn insert(&self, bus: &NewBus) -> Result<Bus, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO buses (
                bus_name, registration_number, bus_type, make, model,
                manufacture_year, odo_meter, last_service_date,
                next_service_due, maintenance_note, insurance_number,
                insurance_expiry, permit_number, permit_expiry,
                max_luggage_kg, amenities, images, gps_enabled,
                gps_device_id, is_active, is_operational, is_verified,
                owner_id, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                    $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            RETURNING {BUS_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Bus>(&sql)
            .bind(&bus.bus_name)
            .bind(&bus.registration_number)
            .bind(&bus.bus_type)
            .bind(&bus.make)
            .bind(&bus.model)
            .bind(bus.manufacture_year)
            .bind(bus.odo_meter)
            .bind(bus.last_service_date)
            .bind(bus.next_service_due)
            .bind(&bus.maintenance_note)
            .bind(&bus.insurance_number)
            .bind(bus.insurance_expiry)
            .bind(&bus.permit_number)
            .bind(bus.permit_expiry)
            .bind(bus.max_luggage_kg)
            .bind(&bus.amenities)
            .bind(&bus.images)
            .bind(bus.gps_enabled)
            .bind(&bus.gps_device_id)
            .bind(bus.is_active)
            .bind(bus.is_operational)
            .bind(bus.is_verified)
            .bind(bus.owner_id)
            .bind(&bus.description)
            .fetch_one(&self.pool)
            .await
    }

    async fn find_by_id(&self, bus_id: Uuid) -> Result<Option<Bus>, sqlx::Error> {
        let sql = format!("SELECT {BUS_COLUMNS} FROM buses WHERE id = $1");
        sqlx::query_as::<_, Bus>(&sql)
            .bind(bus_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update(&self, bus_id: Uuid, bus: &NewBus) -> Result<Option<Bus>, sqlx::Error> {
        let sql = format!(
            r#"
            UPDATE buses
            SET bus_name = $1,
                registration_number = $2,
                bus_type = $3,
                make = $4,
                model = $5,
                manufacture_year = $6,
                odo_meter = $7,
                last_service_date = $8,
                next_service_due = $9,
                maintenance_note = $10,
                insurance_number = $11,
                insurance_expiry = $12,
                permit_number = $13,
                permit_expiry = $14,
                max_luggage_kg = $15,
                amenities = $16,
                images = $17,
                gps_enabled = $18,
                gps_device_id = $19,
                is_active = $20,
                is_operational = $21,
                is_verified = $22,
                owner_id = $23,
                description = $24,
                updated_at = now()
            WHERE id = $25
            RETURNING {BUS_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Bus>(&sql)
            .bind(&bus.bus_name)
            .bind(&bus.registration_number)
            .bind(&bus.bus_type)
            .bind(&bus.make)
            .bind(&bus.model)
            .bind(bus.manufacture_year)
            .bind(bus.odo_meter)
            .bind(bus.last_service_date)
            .bind(bus.next_service_due)
            .bind(&bus.maintenance_note)
            .bind(&bus.insurance_number)
            .bind(bus.insurance_expiry)
            .bind(&bus.permit_number)
            .bind(bus.permit_expiry)
            .bind(bus.max_luggage_kg)
            .bind(&bus.amenities)
            .bind(&bus.images)
            .bind(bus.gps_enabled)
            .bind(&bus.gps_device_id)
            .bind(bus.is_active)
            .bind(bus.is_operational)
            .bind(bus.is_verified)
            .bind(bus.owner_id)
            .bind(&bus.description)
            .bind(bus_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list(&self) -> Result<Vec<Bus>, sqlx::Error> {
        let sql = format!("SELECT {BUS_COLUMNS} FROM buses ORDER BY created_at DESC");
        sqlx::query_as::<_, Bus>(&sql).fetch_all(&self.pool).await
    }
}
