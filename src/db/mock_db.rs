use std::borrow::Cow;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::{Config, HashingSettings};
use crate::models::bus::{Bus, NewBus};
use crate::models::bus_owner::{BusOwner, NewBusOwner};
use crate::models::catalog::{
    BusTrip, City, Location, LocationPayload, NewBusTrip, NewRoute, RouteListing, RouteRecord,
    StateRecord,
};
use crate::models::user::{NewUser, PublicUser, User, UserStatus};
use crate::state::AppState;
use crate::utils::jwt::JwtKeys;

use super::bus_owner_repository::BusOwnerRepository;
use super::bus_repository::BusRepository;
use super::catalog_repository::CatalogRepository;
use super::user_repository::UserRepository;

pub const TEST_JWT_SECRET: &str = "0123456789abcdef0123456789abcdef";

/// Stand-in for a Postgres unique-constraint failure, so tests can exercise
/// the check-then-insert race path without a live database.
#[derive(Debug)]
struct DuplicateKeyError;

impl std::fmt::Display for DuplicateKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "duplicate key value violates unique constraint")
    }
}

impl std::error::Error for DuplicateKeyError {}

impl sqlx::error::DatabaseError for DuplicateKeyError {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some("23505".into())
    }

    fn kind(&self) -> sqlx::error::ErrorKind {
        sqlx::error::ErrorKind::UniqueViolation
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }
}

pub fn unique_violation() -> sqlx::Error {
    sqlx::Error::Database(Box::new(DuplicateKeyError))
}

fn mock_failure() -> sqlx::Error {
    sqlx::Error::Protocol("Mock DB failure".into())
}

#[allow(dead_code)]
#[derive(Default)]
pub struct MockDb {
    pub find_user_result: Option<User>,
    pub email_taken: bool,
    pub should_fail: bool,
    /// Simulates losing the check-then-insert race: the pre-check passes
    /// but the insert itself reports a unique violation.
    pub duplicate_on_insert: bool,
    pub created_users: Mutex<Vec<NewUser>>,
    pub update_status_result: Option<PublicUser>,
    pub status_updates: Mutex<Vec<(Uuid, UserStatus)>>,
}

#[async_trait]
impl UserRepository for MockDb {
    async fn find_user_by_email(&self, _: &str) -> Result<Option<User>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.find_user_result.clone())
    }

    async fn is_email_taken(&self, _: &str) -> Result<bool, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.email_taken)
    }

    async fn create_user(&self, user: &NewUser) -> Result<PublicUser, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        if self.duplicate_on_insert {
            return Err(unique_violation());
        }
        self.created_users.lock().unwrap().push(user.clone());
        Ok(PublicUser {
            id: Uuid::new_v4(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            status: user.status,
        })
    }

    async fn update_user_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> Result<Option<PublicUser>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        self.status_updates.lock().unwrap().push((user_id, status));
        Ok(self.update_status_result.clone())
    }
}

pub fn bus_from_new(id: Uuid, bus: &NewBus) -> Bus {
    let now = OffsetDateTime::now_utc();
    Bus {
        id,
        bus_name: bus.bus_name.clone(),
        registration_number: bus.registration_number.clone(),
        bus_type: bus.bus_type.clone(),
        make: bus.make.clone(),
        model: bus.model.clone(),
        manufacture_year: bus.manufacture_year,
        odo_meter: bus.odo_meter,
        last_service_date: bus.last_service_date,
        next_service_due: bus.next_service_due,
        maintenance_note: bus.maintenance_note.clone(),
        insurance_number: bus.insurance_number.clone(),
        insurance_expiry: bus.insurance_expiry,
        permit_number: bus.permit_number.clone(),
        permit_expiry: bus.permit_expiry,
        max_luggage_kg: bus.max_luggage_kg,
        amenities: bus.amenities.clone(),
        images: bus.images.clone(),
        gps_enabled: bus.gps_enabled,
        gps_device_id: bus.gps_device_id.clone(),
        is_active: bus.is_active,
        is_operational: bus.is_operational,
        is_verified: bus.is_verified,
        owner_id: bus.owner_id,
        description: bus.description.clone(),
        created_at: now,
        updated_at: now,
    }
}

#[allow(dead_code)]
#[derive(Default)]
pub struct MockBusRepository {
    pub find_by_registration_result: Option<Bus>,
    pub find_by_id_result: Option<Bus>,
    pub registration_taken: bool,
    pub update_target_exists: bool,
    pub list_result: Vec<Bus>,
    pub should_fail: bool,
    pub inserted: Mutex<Vec<NewBus>>,
}

#[async_trait]
impl BusRepository for MockBusRepository {
    async fn find_by_registration(&self, _: &str) -> Result<Option<Bus>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.find_by_registration_result.clone())
    }

    async fn registration_taken_by_other(&self, _: &str, _: Uuid) -> Result<bool, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.registration_taken)
    }

    async fn insert(&self, bus: &NewBus) -> Result<Bus, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        self.inserted.lock().unwrap().push(bus.clone());
        Ok(bus_from_new(Uuid::new_v4(), bus))
    }

    async fn find_by_id(&self, _: Uuid) -> Result<Option<Bus>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.find_by_id_result.clone())
    }

    async fn update(&self, bus_id: Uuid, bus: &NewBus) -> Result<Option<Bus>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        if self.update_target_exists {
            Ok(Some(bus_from_new(bus_id, bus)))
        } else {
            Ok(None)
        }
    }

    async fn list(&self) -> Result<Vec<Bus>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.list_result.clone())
    }
}

#[allow(dead_code)]
#[derive(Default)]
pub struct MockBusOwnerRepository {
    pub conflicting_field: Option<&'static str>,
    pub find_by_id_result: Option<BusOwner>,
    pub list_result: Vec<BusOwner>,
    pub should_fail: bool,
    pub inserted: Mutex<Vec<NewBusOwner>>,
}

fn owner_from_new(id: Uuid, owner: &NewBusOwner) -> BusOwner {
    BusOwner {
        id,
        user_id: owner.user_id.unwrap_or_else(Uuid::new_v4),
        company_name: owner.company_name.clone(),
        legal_entity_type: owner.legal_entity_type.clone(),
        gst_number: owner.gst_number.clone(),
        pan_number: owner.pan_number.clone(),
        registration_doc: owner.registration_doc.clone(),
        contact_person: owner.contact_person.clone(),
        email: owner.email.clone(),
        phone: owner.phone.clone(),
        address_line1: owner.address_line1.clone(),
        address_line2: owner.address_line2.clone(),
        city: owner.city.clone(),
        state: owner.state.clone(),
        postcode: owner.postcode.clone(),
        country: owner.country.clone(),
        bank_account_name: owner.bank_account_name.clone(),
        bank_account_no: owner.bank_account_no.clone(),
        bank_ifsc_code: owner.bank_ifsc_code.clone(),
        payout_method: owner.payout_method.clone(),
        notes: owner.notes.clone(),
        created_at: OffsetDateTime::now_utc(),
    }
}

#[async_trait]
impl BusOwnerRepository for MockBusOwnerRepository {
    async fn find_conflicting_field(
        &self,
        _: &NewBusOwner,
    ) -> Result<Option<&'static str>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.conflicting_field)
    }

    async fn insert(&self, owner: &NewBusOwner) -> Result<BusOwner, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        self.inserted.lock().unwrap().push(owner.clone());
        Ok(owner_from_new(Uuid::new_v4(), owner))
    }

    async fn list(&self) -> Result<Vec<BusOwner>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.list_result.clone())
    }

    async fn find_by_id(&self, _: Uuid) -> Result<Option<BusOwner>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.find_by_id_result.clone())
    }
}

#[allow(dead_code)]
#[derive(Default)]
pub struct MockCatalogRepository {
    pub should_fail: bool,
    /// City/state inserts report a store-level unique violation.
    pub duplicate_on_insert: bool,
    pub locations: Vec<Location>,
    pub update_location_result: Option<Location>,
    pub cities: Vec<City>,
    pub states: Vec<StateRecord>,
    pub routes: Vec<RouteListing>,
}

#[async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn insert_location(&self, location: &LocationPayload) -> Result<Location, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(Location {
            id: Uuid::new_v4(),
            name: location.name.clone(),
            city: location.city.clone(),
            state: location.state.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
            is_active: location.is_active.unwrap_or(true),
            parent_city_id: location.parent_city_id,
        })
    }

    async fn update_location(
        &self,
        _: Uuid,
        _: &LocationPayload,
    ) -> Result<Option<Location>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.update_location_result.clone())
    }

    async fn list_locations(&self) -> Result<Vec<Location>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.locations.clone())
    }

    async fn insert_city(&self, name: &str, state_id: Uuid) -> Result<City, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        if self.duplicate_on_insert {
            return Err(unique_violation());
        }
        Ok(City {
            id: Uuid::new_v4(),
            name: name.to_string(),
            state_id,
        })
    }

    async fn cities_by_state(&self, _: Uuid) -> Result<Vec<City>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.cities.clone())
    }

    async fn insert_state(&self, name: &str) -> Result<StateRecord, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        if self.duplicate_on_insert {
            return Err(unique_violation());
        }
        Ok(StateRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
        })
    }

    async fn list_states(&self) -> Result<Vec<StateRecord>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.states.clone())
    }

    async fn insert_trip(&self, trip: &NewBusTrip) -> Result<BusTrip, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(BusTrip {
            id: Uuid::new_v4(),
            bus_id: trip.bus_id,
            source_location_id: trip.source_location_id,
            destination_location_id: trip.destination_location_id,
            departure_time: trip.departure_time,
            arrival_time: trip.arrival_time,
            travel_date: trip.travel_date,
            is_recurring: trip.is_recurring,
            days_of_week: trip.days_of_week.clone(),
            is_active: trip.is_active,
        })
    }

    async fn insert_route(&self, route: &NewRoute) -> Result<RouteRecord, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(RouteRecord {
            id: Uuid::new_v4(),
            route_name: route.route_name.clone(),
            source_location_id: route.source_location_id,
            destination_location_id: route.destination_location_id,
            via: route.via.clone(),
            status: route.status.clone(),
        })
    }

    async fn list_routes(&self) -> Result<Vec<RouteListing>, sqlx::Error> {
        if self.should_fail {
            return Err(mock_failure());
        }
        Ok(self.routes.clone())
    }
}

pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        database_url: String::new(),
        frontend_origin: "http://localhost".into(),
        port: 3000,
        token_ttl: chrono::Duration::hours(1),
        hashing: HashingSettings::default(),
    })
}

/// Builds an `AppState` over the supplied user repository with inert
/// defaults everywhere else, for handler-level tests.
pub fn test_app_state(db: Arc<dyn UserRepository>) -> AppState {
    let config = test_config();
    AppState {
        db,
        buses: Arc::new(MockBusRepository::default()),
        owners: Arc::new(MockBusOwnerRepository::default()),
        catalog: Arc::new(MockCatalogRepository::default()),
        jwt: JwtKeys::from_secret(TEST_JWT_SECRET).expect("test secret is valid"),
        hasher: config.argon2(),
        config,
    }
}
