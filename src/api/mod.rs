//! Client for the consulting-template service.

mod client;
mod types;

pub use client::{ApiClient, ApiError};
pub use types::{
    ChartTopic, ExportFormat, ExportRequest, GenerateRequest, RefineRequest, RefinementKind,
    StreamEvent,
};
