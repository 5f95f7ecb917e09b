//! # HTTP Server Module
//!
//! JSON-over-HTTP front end for a record log.
//!
//! ## Endpoints
//!
//! - `POST /` - Append a record, answer its offset
//! - `GET /` - Read the record at an offset
//! - `GET /health` - Liveness check

mod config;
mod errors;
mod health_routes;
mod log_routes;
mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use log_routes::{
    CreateRecordRequest, CreateRecordResponse, FindRecordRequest, FindRecordResponse, SharedLog,
};
pub use server::HttpServer;
