pub mod customers;
pub mod health;
pub mod request_id;
