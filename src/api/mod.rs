//! API Module
//!
//! HTTP handlers and routing for the Warrity service.
//!
//! # Endpoints
//! - `PUT /cache` - Cache a JSON payload under a key
//! - `GET /cache/:key` - Read a fresh payload
//! - `DELETE /cache/:key` - Invalidate one key
//! - `DELETE /cache` - Clear the cache
//! - `GET /stats` - Cache statistics
//! - `POST /status` - Derive a warranty status from an end date
//! - `POST /warranties/summary` - Annotate, sort and tally warranties
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
