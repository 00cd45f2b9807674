//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{OccupancyService, SharedEventBus, SlotService, VehicleService};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{health, metrics, occupancies, slots, vehicles};
use crate::interfaces::ws::{self, create_notification_state, ws_notifications_handler};

/// Application services the REST layer dispatches to
#[derive(Clone)]
pub struct ApiServices {
    pub vehicles: Arc<VehicleService>,
    pub slots: Arc<SlotService>,
    pub occupancies: Arc<OccupancyService>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        // Slots
        slots::list_slots,
        slots::get_slot,
        slots::create_slot,
        slots::update_slot,
        slots::delete_slot,
        slots::get_occupancy_stats,
        // Occupancies
        occupancies::list_open_occupancies,
        occupancies::get_availability,
        occupancies::get_revenue,
        occupancies::get_occupancy,
        occupancies::park_vehicle,
        occupancies::release_slot,
        // Notifications
        ws::notifications::ws_notifications_handler,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            vehicles::CatalogRef,
            vehicles::VehicleResponse,
            vehicles::VehicleRequest,
            slots::SlotResponse,
            slots::SlotRequest,
            slots::OccupancyStatsResponse,
            occupancies::OccupancyResponse,
            occupancies::ParkVehicleRequest,
            occupancies::ReleaseResponse,
            occupancies::RevenueResponse,
            occupancies::AvailabilityResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Vehicles", description = "Vehicle registry: plate, owner, brand and type"),
        (name = "Slots", description = "Parking slot registry and occupancy percentage"),
        (name = "Occupancies", description = "Park, release and bill vehicles; running revenue"),
        (name = "WebSocket Notifications", description = "Live parking events via WebSocket"),
    ),
    info(
        title = "Parking Service API",
        version = "1.0.0",
        description = "REST API for parking slot occupancy and billing"
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    services: ApiServices,
    db: Option<DatabaseConnection>,
    event_bus: SharedEventBus,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let vehicle_routes = Router::new()
        .route(
            "/",
            get(vehicles::list_vehicles).post(vehicles::create_vehicle),
        )
        .route(
            "/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .with_state(vehicles::VehicleState {
            service: services.vehicles.clone(),
        });

    let slot_routes = Router::new()
        .route("/", get(slots::list_slots).post(slots::create_slot))
        .route("/occupancy", get(slots::get_occupancy_stats))
        .route(
            "/{id}",
            get(slots::get_slot)
                .put(slots::update_slot)
                .delete(slots::delete_slot),
        )
        .with_state(slots::SlotState {
            service: services.slots.clone(),
        });

    let occupancy_routes = Router::new()
        .route(
            "/",
            get(occupancies::list_open_occupancies).post(occupancies::park_vehicle),
        )
        .route("/available", get(occupancies::get_availability))
        .route("/revenue", get(occupancies::get_revenue))
        .route("/{id}", get(occupancies::get_occupancy))
        .route("/{id}/release", post(occupancies::release_slot))
        .with_state(occupancies::OccupancyState {
            service: services.occupancies.clone(),
        });

    let notification_routes = Router::new()
        .route("/ws", get(ws_notifications_handler))
        .with_state(create_notification_state(event_bus.clone()));

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            slots: services.slots,
            event_bus,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: prometheus_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1/vehicles", vehicle_routes)
        .nest("/api/v1/slots", slot_routes)
        .nest("/api/v1/occupancies", occupancy_routes)
        .nest("/api/v1/notifications", notification_routes)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::{json, Value};
    use tower::Service;

    use crate::application::{create_event_bus, RevenueLedger};
    use crate::domain::{BillingPolicy, RepositoryProvider};
    use crate::infrastructure::InMemoryRepositoryProvider;

    fn app() -> Router {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let event_bus = create_event_bus();
        let slots = Arc::new(SlotService::new(repos.clone(), event_bus.clone()));
        let services = ApiServices {
            vehicles: Arc::new(VehicleService::new(repos.clone())),
            occupancies: Arc::new(OccupancyService::new(
                repos,
                slots.clone(),
                event_bus.clone(),
                Arc::new(RevenueLedger::new()),
                BillingPolicy::default(),
                "BRL",
            )),
            slots,
        };
        let handle = PrometheusBuilder::new().build_recorder().handle();
        create_api_router(services, None, event_bus, handle)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
        let mut svc = app.clone().into_service();
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(v) => Body::from(serde_json::to_vec(&v).unwrap()),
                None => Body::empty(),
            })
            .unwrap();
        svc.call(req).await.unwrap()
    }

    async fn json_body(resp: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn vehicle_body(plate: &str) -> Value {
        json!({
            "model": "Onix",
            "brand": {"id": 1, "name": "Chevrolet"},
            "vehicle_type": {"id": 1, "name": "Car"},
            "plate": plate,
            "color": "Black",
            "owner_name": "Maria Souza",
            "owner_contact": "11987654321"
        })
    }

    async fn create(app: &Router, uri: &str, body: Value) -> String {
        let resp = send(app, "POST", uri, Some(body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        json_body(resp).await["data"]["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn health_reports_memory_storage() {
        let app = app();
        let resp = send(&app, "GET", "/health", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "memory");
    }

    #[tokio::test]
    async fn metrics_endpoint_is_plain_text() {
        let app = app();
        let resp = send(&app, "GET", "/metrics", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }

    #[tokio::test]
    async fn park_and_release_fixed_rate() {
        let app = app();
        let vehicle_id = create(&app, "/api/v1/vehicles", vehicle_body("ABC1D23")).await;
        let slot_id = create(&app, "/api/v1/slots", json!({"code": "A01"})).await;

        let resp = send(
            &app,
            "POST",
            "/api/v1/occupancies",
            Some(json!({"vehicle_id": vehicle_id, "slot_id": slot_id, "fixed_rate": 50})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let record = json_body(resp).await;
        let occupancy_id = record["data"]["id"].as_i64().unwrap();
        assert_eq!(record["data"]["hourly_rate"], Value::Null);

        let occupancy = json_body(send(&app, "GET", "/api/v1/slots/occupancy", None).await).await;
        assert_eq!(occupancy["data"]["percentage"], 100.0);

        let resp = send(
            &app,
            "POST",
            &format!("/api/v1/occupancies/{}/release", occupancy_id),
            None,
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let receipt = json_body(resp).await;
        assert_eq!(receipt["data"]["total_price"], 50);
        assert_eq!(receipt["data"]["billed_hours"], Value::Null);
        assert_eq!(receipt["data"]["currency"], "BRL");

        let revenue = json_body(send(&app, "GET", "/api/v1/occupancies/revenue", None).await).await;
        assert_eq!(revenue["data"]["total"], 50);
        assert_eq!(revenue["data"]["closed_records"], 1);

        let open = json_body(send(&app, "GET", "/api/v1/occupancies", None).await).await;
        assert!(open["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn park_with_oversized_rate_is_422() {
        let app = app();
        let vehicle_id = create(&app, "/api/v1/vehicles", vehicle_body("ABC1D23")).await;
        let slot_id = create(&app, "/api/v1/slots", json!({"code": "A01"})).await;

        let resp = send(
            &app,
            "POST",
            "/api/v1/occupancies",
            Some(json!({
                "vehicle_id": vehicle_id,
                "slot_id": slot_id,
                "hourly_rate": i64::MAX / 2
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let open = json_body(send(&app, "GET", "/api/v1/occupancies", None).await).await;
        assert!(open["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn park_with_both_rates_is_422() {
        let app = app();
        let vehicle_id = create(&app, "/api/v1/vehicles", vehicle_body("ABC1D23")).await;
        let slot_id = create(&app, "/api/v1/slots", json!({"code": "A01"})).await;

        let resp = send(
            &app,
            "POST",
            "/api/v1/occupancies",
            Some(json!({
                "vehicle_id": vehicle_id,
                "slot_id": slot_id,
                "hourly_rate": 10,
                "fixed_rate": 50
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn park_without_rate_is_422() {
        let app = app();
        let vehicle_id = create(&app, "/api/v1/vehicles", vehicle_body("ABC1D23")).await;
        let slot_id = create(&app, "/api/v1/slots", json!({"code": "A01"})).await;

        let resp = send(
            &app,
            "POST",
            "/api/v1/occupancies",
            Some(json!({"vehicle_id": vehicle_id, "slot_id": slot_id})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(resp).await;
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn occupied_slot_is_409() {
        let app = app();
        let first = create(&app, "/api/v1/vehicles", vehicle_body("ABC1D23")).await;
        let second = create(&app, "/api/v1/vehicles", vehicle_body("XYZ9K88")).await;
        let slot_id = create(&app, "/api/v1/slots", json!({"code": "A01"})).await;

        let park = |vehicle_id: String| {
            json!({"vehicle_id": vehicle_id, "slot_id": slot_id, "hourly_rate": 10})
        };
        let resp = send(&app, "POST", "/api/v1/occupancies", Some(park(first))).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let resp = send(&app, "POST", "/api/v1/occupancies", Some(park(second))).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn unknown_ids_are_404() {
        let app = app();
        let resp = send(&app, "GET", "/api/v1/vehicles/missing", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = send(&app, "POST", "/api/v1/occupancies/42/release", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_plate_is_409() {
        let app = app();
        create(&app, "/api/v1/vehicles", vehicle_body("ABC1D23")).await;
        let resp = send(&app, "POST", "/api/v1/vehicles", Some(vehicle_body("abc 1d23"))).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn availability_excludes_parked() {
        let app = app();
        let parked = create(&app, "/api/v1/vehicles", vehicle_body("ABC1D23")).await;
        create(&app, "/api/v1/vehicles", vehicle_body("XYZ9K88")).await;
        let slot_id = create(&app, "/api/v1/slots", json!({"code": "A01"})).await;
        create(&app, "/api/v1/slots", json!({"code": "A02"})).await;

        let resp = send(
            &app,
            "POST",
            "/api/v1/occupancies",
            Some(json!({"vehicle_id": parked, "slot_id": slot_id, "hourly_rate": 10})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = json_body(send(&app, "GET", "/api/v1/occupancies/available", None).await).await;
        assert_eq!(body["data"]["vehicles"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["slots"][0]["code"], "A02");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = app();
        let resp = send(&app, "GET", "/api-doc/openapi.json", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let doc = json_body(resp).await;
        assert!(doc["paths"]["/api/v1/occupancies/{id}/release"].is_object());
    }
}
