use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::{
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use transito_backend::config::Config;
use transito_backend::db::{
    postgres_bus_owner_repository::PostgresBusOwnerRepository,
    postgres_bus_repository::PostgresBusRepository,
    postgres_catalog_repository::PostgresCatalogRepository,
    postgres_user_repository::PostgresUserRepository,
};
use transito_backend::responses::JsonResponse;
use transito_backend::routes::auth::{handle_login, handle_signup};
use transito_backend::routes::buses::{create_bus, get_bus_by_id, get_bus_list, update_bus};
use transito_backend::routes::catalog::{
    create_bus_trip, create_city, create_location, create_route, create_state, get_all_locations,
    get_all_states, get_cities_by_state, get_routes_list, update_location,
};
use transito_backend::routes::users::{
    change_user_status, create_bus_owner, get_bus_owner_by_id, get_bus_owner_list,
};
use transito_backend::utils::jwt::JwtKeys;
use transito_backend::AppState;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let config = Config::from_env();
    let jwt = JwtKeys::from_env().expect("JWT secret misconfigured");
    let hasher = config.argon2();

    let pg_pool = establish_connection(&config.database_url).await;

    let state = AppState {
        db: Arc::new(PostgresUserRepository {
            pool: pg_pool.clone(),
        }),
        buses: Arc::new(PostgresBusRepository {
            pool: pg_pool.clone(),
        }),
        owners: Arc::new(PostgresBusOwnerRepository {
            pool: pg_pool.clone(),
        }),
        catalog: Arc::new(PostgresCatalogRepository { pool: pg_pool }),
        config: Arc::new(config),
        jwt,
        hasher,
    };

    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .frontend_origin
                .parse::<HeaderValue>()
                .unwrap(),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let auth_routes = Router::new()
        .route("/signup", post(handle_signup))
        .route("/login", post(handle_login));

    let user_routes = Router::new()
        .route("/status-change", patch(change_user_status))
        .route("/create-bus_owners", post(create_bus_owner))
        .route("/getBusOwnerList", get(get_bus_owner_list))
        .route("/getBusOwnerList/{id}", get(get_bus_owner_by_id));

    let bus_routes = Router::new()
        .route("/create-bus", post(create_bus))
        .route("/getBusDetails/{id}", get(get_bus_by_id))
        .route("/updateBusDetails", put(update_bus))
        .route("/getBusList", get(get_bus_list));

    let catalog_routes = Router::new()
        .route("/locations", post(create_location))
        .route("/locationsList", get(get_all_locations))
        .route("/updateLocation", post(update_location))
        .route("/cities", post(create_city))
        .route("/cities/{state_id}", get(get_cities_by_state))
        .route("/states", post(create_state))
        .route("/statesList", get(get_all_states))
        .route("/busTrips", post(create_bus_trip))
        .route("/route", post(create_route))
        .route("/routesList", get(get_routes_list));

    let port = state.config.port;
    let app = Router::new()
        .route("/", get(root))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/bus", bus_routes)
        .nest("/api/busRoutes", catalog_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await.unwrap();
    info!("Running at http://{}", addr);
    axum::serve(listener, app.into_make_service()).await.unwrap();
}

/// A simple root route.
async fn root() -> Response {
    JsonResponse::success("Transito backend is running").into_response()
}

/// Establish a connection to the database and verify it.
async fn establish_connection(database_url: &str) -> PgPool {
    let pool = PgPool::connect(database_url)
        .await
        .expect("Failed to connect to the database");

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .expect("Failed to verify database connection");

    info!("Successfully connected to the database");
    pool
}
