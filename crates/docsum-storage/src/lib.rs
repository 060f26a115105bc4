//! docsum-storage
//!
//! S3 operations. Thin wrapper around the AWS S3 SDK, plus the
//! [`store::ObjectStore`] seam the dispatcher is written against.

pub mod client;
pub mod error;
pub mod objects;
pub mod store;
