pub mod client;
pub mod disposition;
pub mod types;

pub use client::UploadClient;
pub use types::{Artifact, UploadOutcome};
