//! Customer DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateCustomerDto, Customer, DomainError, UpdateCustomerDto};

/// Customer API representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Only persisted customers can be exposed; an unsaved one has no id.
impl TryFrom<Customer> for CustomerDto {
    type Error = DomainError;

    fn try_from(c: Customer) -> Result<Self, Self::Error> {
        let id = c
            .id
            .ok_or_else(|| DomainError::Storage(format!("customer {} has no id", c.email)))?;

        Ok(Self {
            id,
            name: c.name,
            email: c.email,
            address: c.address,
        })
    }
}

/// Create customer request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: String,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub address: String,
}

impl From<CreateCustomerRequest> for CreateCustomerDto {
    fn from(r: CreateCustomerRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            address: r.address,
        }
    }
}

/// Update customer request. Omitted or `null` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub name: Option<String>,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 255, message = "must be at most 255 characters")
    )]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub address: Option<String>,
}

impl From<UpdateCustomerRequest> for UpdateCustomerDto {
    fn from(r: UpdateCustomerRequest) -> Self {
        Self {
            name: r.name,
            email: r.email,
            address: r.address,
        }
    }
}
