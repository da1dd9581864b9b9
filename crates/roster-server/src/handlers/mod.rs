//! HTTP handlers

pub mod customers;
pub mod health;

pub use health::health;
