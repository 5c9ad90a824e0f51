use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use time::{macros::format_description, Date, Time};
use uuid::Uuid;

use crate::db::is_unique_violation;
use crate::models::catalog::{
    BusTripPayload, CityPayload, LocationPayload, NewBusTrip, NewRoute, RoutePayload, StatePayload,
};
use crate::responses::JsonResponse;
use crate::state::AppState;

const ALLOWED_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

pub async fn create_location(
    State(state): State<AppState>,
    Json(payload): Json<LocationPayload>,
) -> Response {
    if payload.name.is_empty() || payload.city.is_empty() || payload.state.is_empty() {
        return JsonResponse::bad_request("Name, city and State are required.").into_response();
    }

    match state.catalog.insert_location(&payload).await {
        Ok(location) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Location added successfully.",
                "location": location
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to insert location");
            JsonResponse::server_error("Internal server error").into_response()
        }
    }
}

pub async fn update_location(
    State(state): State<AppState>,
    Json(payload): Json<LocationPayload>,
) -> Response {
    let id = match payload.id {
        Some(id)
            if !payload.name.is_empty()
                && !payload.city.is_empty()
                && !payload.state.is_empty() =>
        {
            id
        }
        _ => return JsonResponse::bad_request("All fields are required.").into_response(),
    };

    match state.catalog.update_location(id, &payload).await {
        Ok(Some(location)) => (
            StatusCode::OK,
            Json(json!({
                "message": "Location updated successfully.",
                "location": location
            })),
        )
            .into_response(),
        Ok(None) => JsonResponse::not_found("Location not found.").into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to update location");
            JsonResponse::server_error("Internal server error.").into_response()
        }
    }
}

pub async fn get_all_locations(State(state): State<AppState>) -> Response {
    match state.catalog.list_locations().await {
        Ok(locations) => (
            StatusCode::OK,
            Json(json!({
                "total": locations.len(),
                "locations": locations
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to list locations");
            JsonResponse::server_error("Internal server error").into_response()
        }
    }
}

pub async fn create_city(
    State(state): State<AppState>,
    Json(payload): Json<CityPayload>,
) -> Response {
    let (name, state_id) = match (payload.name.trim(), payload.state_id) {
        (name, Some(state_id)) if !name.is_empty() => (name.to_string(), state_id),
        _ => {
            return JsonResponse::bad_request("City name and state_id are required")
                .into_response()
        }
    };

    match state.catalog.insert_city(&name, state_id).await {
        Ok(city) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "City added successfully.",
                "city": city
            })),
        )
            .into_response(),
        Err(err) if is_unique_violation(&err) => {
            JsonResponse::conflict("City already exists in this state.").into_response()
        }
        Err(err) => {
            tracing::error!(?err, "failed to insert city");
            JsonResponse::server_error("Internal server error.").into_response()
        }
    }
}

pub async fn get_cities_by_state(
    State(state): State<AppState>,
    Path(state_id): Path<Uuid>,
) -> Response {
    match state.catalog.cities_by_state(state_id).await {
        Ok(cities) => (
            StatusCode::OK,
            Json(json!({
                "state_id": state_id,
                "cities": cities
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to list cities");
            JsonResponse::server_error("Internal server error").into_response()
        }
    }
}

pub async fn create_state(
    State(state): State<AppState>,
    Json(payload): Json<StatePayload>,
) -> Response {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return JsonResponse::bad_request("State name is required.").into_response();
    }

    match state.catalog.insert_state(&name).await {
        Ok(record) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "State added successfully.",
                "state": record
            })),
        )
            .into_response(),
        Err(err) if is_unique_violation(&err) => {
            JsonResponse::conflict("State already exists.").into_response()
        }
        Err(err) => {
            tracing::error!(?err, "failed to insert state");
            JsonResponse::server_error("Internal server error").into_response()
        }
    }
}

pub async fn get_all_states(State(state): State<AppState>) -> Response {
    match state.catalog.list_states().await {
        Ok(states) => (
            StatusCode::OK,
            Json(json!({
                "total": states.len(),
                "states": states
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to list states");
            JsonResponse::server_error("Internal server error").into_response()
        }
    }
}

fn parse_time(field: &str, value: Option<&str>, errors: &mut Vec<String>) -> Option<Time> {
    let format = format_description!("[hour]:[minute]:[second]");
    match value {
        None => {
            errors.push(format!("{} is required.", field));
            None
        }
        Some(raw) => match Time::parse(raw, &format) {
            Ok(time) => Some(time),
            Err(_) => {
                errors.push(format!("{} must be a valid HH:MM:SS time.", field));
                None
            }
        },
    }
}

fn validate_trip(payload: &BusTripPayload) -> Result<NewBusTrip, Vec<String>> {
    let mut errors = Vec::new();

    if payload.bus_id.is_none() {
        errors.push("bus_id is required.".to_string());
    }
    if payload.source_location_id.is_none() {
        errors.push("source_location_id is required.".to_string());
    }
    if payload.destination_location_id.is_none() {
        errors.push("destination_location_id is required.".to_string());
    }

    let departure_time = parse_time("departure_time", payload.departure_time.as_deref(), &mut errors);
    let arrival_time = parse_time("arrival_time", payload.arrival_time.as_deref(), &mut errors);

    let date_format = format_description!("[year]-[month]-[day]");
    let travel_date = match payload.travel_date.as_deref() {
        None => {
            errors.push("travel_date is required.".to_string());
            None
        }
        Some(raw) => match Date::parse(raw, &date_format) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push("travel_date must be a valid YYYY-MM-DD date.".to_string());
                None
            }
        },
    };

    if let (Some(source), Some(destination)) =
        (payload.source_location_id, payload.destination_location_id)
    {
        if source == destination {
            errors.push("Source and destination locations cannot be the same.".to_string());
        }
    }

    if payload.is_recurring {
        match &payload.days_of_week {
            None => errors
                .push("days_of_week must be an array when is_recurring is true.".to_string()),
            Some(days) => {
                let invalid: Vec<&str> = days
                    .iter()
                    .map(String::as_str)
                    .filter(|day| !ALLOWED_DAYS.contains(day))
                    .collect();
                if !invalid.is_empty() {
                    errors.push(format!(
                        "Invalid days in days_of_week: {}",
                        invalid.join(", ")
                    ));
                }
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewBusTrip {
        bus_id: payload.bus_id.unwrap(),
        source_location_id: payload.source_location_id.unwrap(),
        destination_location_id: payload.destination_location_id.unwrap(),
        departure_time: departure_time.unwrap(),
        arrival_time: arrival_time.unwrap(),
        travel_date: travel_date.unwrap(),
        is_recurring: payload.is_recurring,
        days_of_week: if payload.is_recurring {
            payload.days_of_week.clone()
        } else {
            None
        },
        is_active: payload.is_active.unwrap_or(true),
    })
}

pub async fn create_bus_trip(
    State(state): State<AppState>,
    Json(payload): Json<BusTripPayload>,
) -> Response {
    let trip = match validate_trip(&payload) {
        Ok(trip) => trip,
        Err(errors) => {
            return JsonResponse::bad_request(&format!(
                "Validation failed: {}",
                errors.join(" ")
            ))
            .into_response()
        }
    };

    match state.catalog.insert_trip(&trip).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Bus trip created successfully.",
                "trip": created
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to insert bus trip");
            JsonResponse::server_error("Internal server error").into_response()
        }
    }
}

pub async fn create_route(
    State(state): State<AppState>,
    Json(payload): Json<RoutePayload>,
) -> Response {
    let (source, destination) = match (payload.source_location_id, payload.destination_location_id)
    {
        (Some(source), Some(destination)) if !payload.route_name.is_empty() => {
            (source, destination)
        }
        _ => {
            return JsonResponse::bad_request(
                "route_name, source_location_id and destination_location_id are required",
            )
            .into_response()
        }
    };

    let route = NewRoute {
        route_name: payload.route_name,
        source_location_id: source,
        destination_location_id: destination,
        via: payload.via,
        status: payload.status.unwrap_or_else(|| "active".to_string()),
    };

    match state.catalog.insert_route(&route).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Route created successfully",
                "data": created
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to insert route");
            JsonResponse::server_error("Internal Server Error").into_response()
        }
    }
}

pub async fn get_routes_list(State(state): State<AppState>) -> Response {
    match state.catalog.list_routes().await {
        Ok(routes) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "count": routes.len(),
                "data": routes
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to list routes");
            JsonResponse::server_error("Server Error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::db::mock_db::{test_app_state, MockCatalogRepository, MockDb};
    use crate::state::AppState;

    use super::{
        create_bus_trip, create_city, create_location, create_route, create_state,
        get_all_locations, get_routes_list,
    };

    fn build_app(state: AppState) -> Router {
        Router::new()
            .route("/locations", post(create_location))
            .route("/locationsList", get(get_all_locations))
            .route("/cities", post(create_city))
            .route("/states", post(create_state))
            .route("/busTrips", post(create_bus_trip))
            .route("/route", post(create_route))
            .route("/routesList", get(get_routes_list))
            .with_state(state)
    }

    fn catalog_state(catalog: MockCatalogRepository) -> AppState {
        let mut state = test_app_state(Arc::new(MockDb::default()));
        state.catalog = Arc::new(catalog);
        state
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let res = app
            .oneshot(
                Request::post(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_create_location_requires_name_city_state() {
        let app = build_app(catalog_state(MockCatalogRepository::default()));

        let (status, json) = post_json(app, "/locations", json!({ "name": "Central" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Name, city and State are required.");
    }

    #[tokio::test]
    async fn test_create_location_success() {
        let app = build_app(catalog_state(MockCatalogRepository::default()));

        let (status, json) = post_json(
            app,
            "/locations",
            json!({ "name": "Central", "city": "Pune", "state": "Maharashtra" }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Location added successfully.");
        assert_eq!(json["location"]["city"], "Pune");
        assert_eq!(json["location"]["is_active"], true);
    }

    #[tokio::test]
    async fn test_create_city_duplicate_is_conflict() {
        let app = build_app(catalog_state(MockCatalogRepository {
            duplicate_on_insert: true,
            ..Default::default()
        }));

        let (status, json) = post_json(
            app,
            "/cities",
            json!({ "name": "Pune", "state_id": Uuid::new_v4() }),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "City already exists in this state.");
    }

    #[tokio::test]
    async fn test_create_state_duplicate_is_conflict() {
        let app = build_app(catalog_state(MockCatalogRepository {
            duplicate_on_insert: true,
            ..Default::default()
        }));

        let (status, json) = post_json(app, "/states", json!({ "name": "Maharashtra" })).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "State already exists.");
    }

    #[tokio::test]
    async fn test_create_bus_trip_collects_validation_errors() {
        let app = build_app(catalog_state(MockCatalogRepository::default()));
        let shared = Uuid::new_v4();

        let (status, json) = post_json(
            app,
            "/busTrips",
            json!({
                "bus_id": Uuid::new_v4(),
                "source_location_id": shared,
                "destination_location_id": shared,
                "departure_time": "08:00:00",
                "arrival_time": "14:30:00",
                "travel_date": "2026-01-15",
                "is_recurring": true,
                "days_of_week": ["Mon", "Funday"]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = json["message"].as_str().unwrap();
        assert!(message.starts_with("Validation failed:"));
        assert!(message.contains("Source and destination locations cannot be the same."));
        assert!(message.contains("Invalid days in days_of_week: Funday"));
    }

    #[tokio::test]
    async fn test_create_bus_trip_success() {
        let app = build_app(catalog_state(MockCatalogRepository::default()));

        let (status, json) = post_json(
            app,
            "/busTrips",
            json!({
                "bus_id": Uuid::new_v4(),
                "source_location_id": Uuid::new_v4(),
                "destination_location_id": Uuid::new_v4(),
                "departure_time": "08:00:00",
                "arrival_time": "14:30:00",
                "travel_date": "2026-01-15",
                "is_recurring": true,
                "days_of_week": ["Mon", "Fri"]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Bus trip created successfully.");
        assert_eq!(json["trip"]["is_recurring"], true);
    }

    #[tokio::test]
    async fn test_create_route_defaults_status_to_active() {
        let app = build_app(catalog_state(MockCatalogRepository::default()));

        let (status, json) = post_json(
            app,
            "/route",
            json!({
                "route_name": "Pune Express",
                "source_location_id": Uuid::new_v4(),
                "destination_location_id": Uuid::new_v4()
            }),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Route created successfully");
        assert_eq!(json["data"]["status"], "active");
    }

    #[tokio::test]
    async fn test_routes_list_shape() {
        let app = build_app(catalog_state(MockCatalogRepository::default()));

        let res = app
            .oneshot(Request::get("/routesList").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 0);
    }

    #[tokio::test]
    async fn test_locations_list_reports_total() {
        let app = build_app(catalog_state(MockCatalogRepository::default()));

        let res = app
            .oneshot(Request::get("/locationsList").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["total"], 0);
    }
}
