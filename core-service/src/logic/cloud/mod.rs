//! Cloud Module - upload of finished sessions to the FitRep server

pub mod client;

pub use client::{CloudClient, CloudConfig, CloudError, HealthResponse, RecordUploadRequest, RemoteRecord};
