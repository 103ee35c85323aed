use axum::{
    routing::{get, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::services::ServeDir;

pub mod booking_service_items;
pub mod camera;
pub mod images;
pub mod medicine;
pub mod middleware;
pub mod pet_health_book;
pub mod report;
pub mod room;
pub mod room_history;
pub mod room_type;
pub mod service;
pub mod service_type;
pub mod service_variant;
pub mod treatment;

async fn health_check() -> &'static str {
    "OK"
}

/// Builds the API router. Observability layers that install global state
/// (prometheus) are attached by the binary, not here, so tests can spin up
/// as many routers as they need.
pub fn router(
    db: DatabaseConnection,
    auth: middleware::AuthConfig,
    images_dir: images::ImagesDir,
) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/Room",
            get(room::list_rooms).post(room::create_room),
        )
        .route("/api/Room/available", get(room::list_available_rooms))
        .route(
            "/api/Room/:id",
            get(room::get_room)
                .put(room::update_room)
                .delete(room::delete_room),
        )
        .route("/api/Room/:id/image", post(room::upload_room_image))
        .route(
            "/api/RoomType",
            get(room_type::list_room_types).post(room_type::create_room_type),
        )
        .route(
            "/api/RoomType/:id",
            get(room_type::get_room_type)
                .put(room_type::update_room_type)
                .delete(room_type::delete_room_type),
        )
        .route(
            "/api/ServiceType",
            get(service_type::list_service_types).post(service_type::create_service_type),
        )
        .route(
            "/api/ServiceType/:id",
            get(service_type::get_service_type)
                .put(service_type::update_service_type)
                .delete(service_type::delete_service_type),
        )
        .route(
            "/api/Service",
            get(service::list_services).post(service::create_service),
        )
        .route(
            "/api/Service/:id",
            get(service::get_service)
                .put(service::update_service)
                .delete(service::delete_service),
        )
        .route("/api/Service/:id/image", post(service::upload_service_image))
        .route(
            "/api/ServiceVariant",
            get(service_variant::list_service_variants)
                .post(service_variant::create_service_variant),
        )
        .route(
            "/api/ServiceVariant/:id",
            get(service_variant::get_service_variant)
                .put(service_variant::update_service_variant)
                .delete(service_variant::delete_service_variant),
        )
        .route(
            "/api/ServiceVariant/service/:service_id",
            get(service_variant::list_variants_by_service),
        )
        .route(
            "/api/Camera",
            get(camera::list_cameras).post(camera::create_camera),
        )
        .route(
            "/api/Camera/:id",
            get(camera::get_camera)
                .put(camera::update_camera)
                .delete(camera::delete_camera),
        )
        .route(
            "/api/BookingServiceItems/:id",
            get(booking_service_items::get_booking_service_item),
        )
        .route(
            "/api/BookingServiceItems/booking/:booking_id",
            get(booking_service_items::list_items_by_booking),
        )
        .route("/api/RoomHistory/checkin", post(room_history::check_in))
        .route(
            "/api/RoomHistory/:id/checkout",
            post(room_history::check_out),
        )
        .route("/api/RoomHistory/open", get(room_history::list_open_stays))
        .route(
            "/api/RoomHistory/room/:room_id",
            get(room_history::list_by_room),
        )
        .route(
            "/api/Medicine",
            get(medicine::list_medicines).post(medicine::create_medicine),
        )
        .route(
            "/api/Medicine/:id",
            get(medicine::get_medicine)
                .put(medicine::update_medicine)
                .delete(medicine::delete_medicine),
        )
        .route(
            "/api/Treatment",
            get(treatment::list_treatments).post(treatment::create_treatment),
        )
        .route(
            "/api/Treatment/:id",
            get(treatment::get_treatment)
                .put(treatment::update_treatment)
                .delete(treatment::delete_treatment),
        )
        .route(
            "/api/PetHealthBook",
            get(pet_health_book::list_pet_health_books)
                .post(pet_health_book::create_pet_health_book),
        )
        .route(
            "/api/PetHealthBook/:id",
            get(pet_health_book::get_pet_health_book)
                .put(pet_health_book::update_pet_health_book)
                .delete(pet_health_book::delete_pet_health_book),
        )
        .route(
            "/api/PetHealthBook/booking-item/:id",
            get(pet_health_book::list_by_booking_item),
        )
        .route("/api/ReportFacility/room-status", get(report::room_status))
        .route(
            "/api/ReportFacility/service-usage",
            get(report::service_usage),
        )
        .route_layer(axum::middleware::from_fn(middleware::authorize));

    let frontend_origin =
        std::env::var("FRONTEND_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes)
        .nest_service("/Images", ServeDir::new(images_dir.0.clone()))
        .layer(Extension(db))
        .layer(Extension(auth))
        .layer(Extension(images_dir))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str());

                    // Span name "METHOD /path" (e.g. "POST /api/Room")
                    let span_name = if let Some(path) = matched_path {
                        format!("{} {}", request.method(), path)
                    } else {
                        format!("{} {}", request.method(), request.uri().path())
                    };

                    tracing::info_span!(
                        "request",
                        "otel.name" = span_name,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        // Fields handlers fill in later
                        table = tracing::field::Empty,
                        action = tracing::field::Empty,
                        business_event = tracing::field::Empty,
                        error = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(
                    frontend_origin
                        .parse::<axum::http::HeaderValue>()
                        .expect("invalid FRONTEND_ORIGIN"),
                )
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PUT,
                    axum::http::Method::DELETE,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::AUTHORIZATION,
                ]),
        )
        .layer(axum::extract::DefaultBodyLimit::max(10 * 1024 * 1024))
}
