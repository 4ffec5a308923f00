//! Domain models and request/response DTOs

pub mod auth;
pub mod category;
pub mod client;
pub mod complaint;
pub mod priority;
pub mod user;
