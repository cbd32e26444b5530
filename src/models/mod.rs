//! Request and Response models for the Warrity service
//!
//! This module defines the warranty record and the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;
pub mod warranty;

// Re-export commonly used types
pub use requests::{SetRequest, StatusRequest, SummaryRequest};
pub use responses::{
    ClearResponse, GetResponse, HealthResponse, InvalidateResponse, SetResponse, StatsResponse,
    SummaryResponse,
};
pub use warranty::{annotate_by_urgency, StatusCounts, Warranty, WarrantyView};
