//! HTTP handlers

pub mod auth;
pub mod category;
pub mod client;
pub mod complaint;
pub mod health;
pub mod priority;
pub mod user;
