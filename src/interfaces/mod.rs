//! Interface adapters (REST API)

pub mod http;
