//! S3 change notifications and the upload events derived from them.
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! notification payload is ignored during deserialization.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

use crate::error::EventError;

/// The `ObjectCreated` notification S3 delivers to the handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Notification {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3Record>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Record {
    #[serde(default)]
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Entity {
    #[serde(default)]
    pub bucket: S3Bucket,
    #[serde(default)]
    pub object: S3Object,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Bucket {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Object {
    /// URL-encoded object key, as S3 sends it.
    pub key: Option<String>,
}

/// A single uploaded object, with its key already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEvent {
    pub bucket: String,
    pub key: String,
}

impl UploadEvent {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parse a raw Lambda payload and turn its records into upload events.
    pub fn from_payload(payload: serde_json::Value) -> Result<Vec<Self>, EventError> {
        let notification: S3Notification = serde_json::from_value(payload)?;
        Self::from_notification(&notification)
    }

    /// Turn every record of a notification into an upload event, in order.
    pub fn from_notification(notification: &S3Notification) -> Result<Vec<Self>, EventError> {
        if notification.records.is_empty() {
            return Err(EventError::NoRecords);
        }

        notification.records.iter().map(Self::from_record).collect()
    }

    pub fn from_record(record: &S3Record) -> Result<Self, EventError> {
        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or(EventError::MissingField("s3.bucket.name"))?;
        let raw_key = record
            .s3
            .object
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(EventError::MissingField("s3.object.key"))?;

        Ok(Self::new(bucket, decode_key(raw_key)?))
    }
}

/// Decode an S3 notification key.
///
/// S3 form-encodes keys in notifications: spaces arrive as `+` and every
/// other reserved byte as `%XX`.
pub fn decode_key(raw: &str) -> Result<String, EventError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|key| key.into_owned())
        .map_err(|_| EventError::InvalidKey(raw.to_string()))
}
