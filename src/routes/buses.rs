use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use time::{macros::format_description, Date};
use uuid::Uuid;

use crate::db::is_unique_violation;
use crate::models::bus::{BusDetails, NewBus, UpdateBusPayload};
use crate::responses::JsonResponse;
use crate::routes::auth::session::AuthSession;
use crate::state::AppState;

fn parse_date(field: &str, value: Option<String>) -> Result<Option<Date>, String> {
    let format = format_description!("[year]-[month]-[day]");
    match value {
        None => Ok(None),
        Some(raw) => Date::parse(&raw, &format)
            .map(Some)
            .map_err(|_| format!("Invalid date for '{}'. Expected YYYY-MM-DD.", field)),
    }
}

fn parse_bus_details(details: BusDetails) -> Result<NewBus, String> {
    if details.bus_name.is_empty() || details.registration_number.is_empty() {
        return Err("bus_name and registration_number are required.".to_string());
    }

    Ok(NewBus {
        bus_name: details.bus_name,
        registration_number: details.registration_number,
        bus_type: details.bus_type,
        make: details.make,
        model: details.model,
        manufacture_year: details.manufacture_year,
        odo_meter: details.odo_meter,
        last_service_date: parse_date("last_service_date", details.last_service_date)?,
        next_service_due: parse_date("next_service_due", details.next_service_due)?,
        maintenance_note: details.maintenance_note,
        insurance_number: details.insurance_number,
        insurance_expiry: parse_date("insurance_expiry", details.insurance_expiry)?,
        permit_number: details.permit_number,
        permit_expiry: parse_date("permit_expiry", details.permit_expiry)?,
        max_luggage_kg: details.max_luggage_kg,
        amenities: details.amenities,
        images: details.images,
        gps_enabled: details.gps_enabled,
        gps_device_id: details.gps_device_id,
        is_active: details.is_active,
        is_operational: details.is_operational,
        is_verified: details.is_verified,
        owner_id: details.owner_id,
        description: details.description,
    })
}

pub async fn create_bus(
    State(state): State<AppState>,
    AuthSession(_claims): AuthSession,
    Json(payload): Json<BusDetails>,
) -> Response {
    let bus = match parse_bus_details(payload) {
        Ok(bus) => bus,
        Err(msg) => return JsonResponse::bad_request(&msg).into_response(),
    };

    match state.buses.find_by_registration(&bus.registration_number).await {
        Ok(Some(_)) => {
            return JsonResponse::conflict(&format!(
                "Bus with registration number '{}' already exists.",
                bus.registration_number
            ))
            .into_response()
        }
        Ok(None) => {}
        Err(err) => {
            tracing::error!(?err, "failed to check bus registration");
            return JsonResponse::server_error("Internal server error").into_response();
        }
    }

    match state.buses.insert(&bus).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "message": "Bus created successfully.",
                "bus": created
            })),
        )
            .into_response(),
        Err(err) if is_unique_violation(&err) => JsonResponse::conflict(&format!(
            "Bus with registration number '{}' already exists.",
            bus.registration_number
        ))
        .into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to insert bus");
            JsonResponse::server_error("Internal server error").into_response()
        }
    }
}

pub async fn get_bus_by_id(
    State(state): State<AppState>,
    AuthSession(_claims): AuthSession,
    Path(id): Path<Uuid>,
) -> Response {
    match state.buses.find_by_id(id).await {
        Ok(Some(bus)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "bus": bus
            })),
        )
            .into_response(),
        Ok(None) => {
            JsonResponse::not_found(&format!("Bus with ID {} not found.", id)).into_response()
        }
        Err(err) => {
            tracing::error!(?err, "failed to fetch bus");
            JsonResponse::server_error("Internal server error").into_response()
        }
    }
}

pub async fn update_bus(
    State(state): State<AppState>,
    AuthSession(_claims): AuthSession,
    Json(payload): Json<UpdateBusPayload>,
) -> Response {
    let UpdateBusPayload { bus_id, details } = payload;
    let bus_id = match bus_id {
        Some(id) => id,
        None => return JsonResponse::bad_request("bus_id is required.").into_response(),
    };

    let bus = match parse_bus_details(details) {
        Ok(bus) => bus,
        Err(msg) => return JsonResponse::bad_request(&msg).into_response(),
    };

    let existing = match state.buses.find_by_id(bus_id).await {
        Ok(Some(existing)) => existing,
        Ok(None) => {
            return JsonResponse::not_found(&format!("Bus with ID {} not found.", bus_id))
                .into_response()
        }
        Err(err) => {
            tracing::error!(?err, "failed to fetch bus for update");
            return JsonResponse::server_error("Internal server error").into_response();
        }
    };

    if bus.registration_number != existing.registration_number {
        match state
            .buses
            .registration_taken_by_other(&bus.registration_number, bus_id)
            .await
        {
            Ok(true) => {
                return JsonResponse::conflict(&format!(
                    "Bus with registration number '{}' already exists.",
                    bus.registration_number
                ))
                .into_response()
            }
            Ok(false) => {}
            Err(err) => {
                tracing::error!(?err, "failed to check bus registration");
                return JsonResponse::server_error("Internal server error").into_response();
            }
        }
    }

    match state.buses.update(bus_id, &bus).await {
        Ok(Some(updated)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Bus updated successfully.",
                "bus": updated
            })),
        )
            .into_response(),
        Ok(None) => {
            JsonResponse::not_found(&format!("Bus with ID {} not found.", bus_id)).into_response()
        }
        Err(err) => {
            tracing::error!(?err, "failed to update bus");
            JsonResponse::server_error("Internal server error").into_response()
        }
    }
}

pub async fn get_bus_list(State(state): State<AppState>) -> Response {
    match state.buses.list().await {
        Ok(buses) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Bus list fetched successfully.",
                "count": buses.len(),
                "buses": buses
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to list buses");
            JsonResponse::server_error("Internal server error").into_response()
        }
    }
}
