//! Contact API Library
//!
//! This library provides the core functionality for the contact record
//! service, including field validation, persistence, the external
//! geocoding integration, data models, and HTTP handlers.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `geocoding`: External geocoding client.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `store`: Contact persistence gateway.
//! - `validation`: Field format validators.

pub mod config;
pub mod errors;
pub mod geocoding;
pub mod handlers;
pub mod models;
pub mod store;
pub mod validation;
