//! # Folio Shared
//!
//! Request/response types of the HTTP API and the error envelope.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
