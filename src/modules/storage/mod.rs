//! Storage module for report images
//!
//! Provides an S3-compatible client and the `ObjectStore` seam the report
//! submission flow uploads through.

mod minio_client;
mod object_store;
mod sigv4;

pub use minio_client::MinIOClient;
pub use object_store::ObjectStore;
