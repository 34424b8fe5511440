//! Client library for the Agiliza spreadsheet conversion service.
//!
//! Everything testable lives here: the upload session controller, the HTTP
//! client, the Content-Disposition and error-body parsing, and the
//! configuration. The egui adapter that renders this state lives in the
//! binary so the controller never needs a windowing environment.

pub mod config;
pub mod error;
pub mod session;
pub mod upload;
pub mod utils;
