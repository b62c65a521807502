//! # Customer Service
//!
//! REST service for managing customer records (name, email, address).
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Customer entity, DTOs, repository contract and errors
//! - **application**: Customer use cases (list, get, create, update, delete)
//! - **infrastructure**: SeaORM database store and the in-memory store
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Runtime wiring, tracing setup and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export core service types
pub use application::CustomerService;
pub use domain::{CreateCustomerDto, Customer, CustomerRepository, UpdateCustomerDto};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryCustomerRepository, SeaOrmCustomerRepository,
};

// Re-export API router
pub use interfaces::http::create_api_router;

pub use server::{init_tracing, ServerHandle, ServerOptions};
