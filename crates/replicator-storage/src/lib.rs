//! Replicator Storage
//!
//! Server-side object copies against S3 (or any S3-compatible endpoint).

mod s3;

pub use s3::{encode_copy_source, S3ObjectStore};
