//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{middleware, routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::customers::{
    self, CreateCustomerRequest, CustomerDto, CustomerHandlerState, UpdateCustomerRequest,
};
use super::modules::health::{self, ComponentHealth, HealthResponse, HealthState};
use super::modules::request_id::request_id_middleware;
use crate::application::CustomerService;
use crate::domain::CustomerRepository;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
    ),
    components(
        schemas(
            ApiResponse<CustomerDto>,
            ApiResponse<Vec<CustomerDto>>,
            CustomerDto,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            HealthResponse,
            ComponentHealth,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Customers", description = "Customer records: create, list, update, delete"),
    ),
    info(
        title = "Customer Service API",
        version = "1.0.0",
        description = "REST API for managing customer records",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `db` is only used by the health check; pass `None` when the service runs
/// on the in-memory store.
pub fn create_api_router(
    customer_service: Arc<CustomerService<dyn CustomerRepository>>,
    db: Option<DatabaseConnection>,
) -> Router {
    let customer_state = CustomerHandlerState { customer_service };

    let customer_routes = Router::new()
        .route(
            "/api/v1/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/api/v1/customers/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .with_state(customer_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .merge(customer_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
