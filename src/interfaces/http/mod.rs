//! HTTP REST API interfaces
//!
//! - `common`: response envelope and request extractors
//! - `modules`: per-resource DTOs and handlers, middleware
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
