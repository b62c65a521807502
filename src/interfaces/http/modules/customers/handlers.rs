//! Customer API handlers
//!
//! Thin wrappers over `CustomerService`: decode the request, call the
//! service, map `DomainError` to a status code.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateCustomerRequest, CustomerDto, UpdateCustomerRequest};
use crate::application::CustomerService;
use crate::domain::{CustomerId, CustomerRepository, DomainError};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct CustomerHandlerState {
    pub customer_service: Arc<CustomerService<dyn CustomerRepository>>,
}

type ErrorResponse<T> = (StatusCode, Json<ApiResponse<T>>);

fn error_response<T>(e: DomainError) -> ErrorResponse<T> {
    let status = match &e {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::EmailUnavailable(_) => StatusCode::CONFLICT,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if e.is_transient() {
        tracing::error!("Customer request failed: {}", e);
    }
    (status, Json(ApiResponse::error(e.to_string())))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers",
    tag = "Customers",
    responses(
        (status = 200, description = "All customers", body = ApiResponse<Vec<CustomerDto>>)
    )
)]
pub async fn list_customers(
    State(state): State<CustomerHandlerState>,
) -> Result<Json<ApiResponse<Vec<CustomerDto>>>, ErrorResponse<Vec<CustomerDto>>> {
    let customers = state
        .customer_service
        .list_customers()
        .await
        .map_err(error_response)?;

    let customers = customers
        .into_iter()
        .map(CustomerDto::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(customers)))
}

#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer details", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_customer(
    State(state): State<CustomerHandlerState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<ApiResponse<CustomerDto>>, ErrorResponse<CustomerDto>> {
    let customer = state
        .customer_service
        .get_customer_by_id(id)
        .await
        .map_err(error_response)?;

    let customer = CustomerDto::try_from(customer).map_err(error_response)?;

    Ok(Json(ApiResponse::success(customer)))
}

#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 200, description = "Customer created", body = ApiResponse<CustomerDto>),
        (status = 400, description = "Malformed JSON"),
        (status = 409, description = "Email unavailable"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_customer(
    State(state): State<CustomerHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerDto>>, ErrorResponse<CustomerDto>> {
    let customer = state
        .customer_service
        .create_customer(request.into())
        .await
        .map_err(error_response)?;

    let customer = CustomerDto::try_from(customer).map_err(error_response)?;

    Ok(Json(ApiResponse::success(customer)))
}

#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i64, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email unavailable"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn update_customer(
    State(state): State<CustomerHandlerState>,
    Path(id): Path<CustomerId>,
    ValidatedJson(request): ValidatedJson<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<CustomerDto>>, ErrorResponse<CustomerDto>> {
    let customer = state
        .customer_service
        .update_customer(id, request.into())
        .await
        .map_err(error_response)?;

    let customer = CustomerDto::try_from(customer).map_err(error_response)?;

    Ok(Json(ApiResponse::success(customer)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(("id" = i64, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_customer(
    State(state): State<CustomerHandlerState>,
    Path(id): Path<CustomerId>,
) -> Result<Json<ApiResponse<()>>, ErrorResponse<()>> {
    state
        .customer_service
        .delete_customer(id)
        .await
        .map_err(error_response)?;

    Ok(Json(ApiResponse::success(())))
}
