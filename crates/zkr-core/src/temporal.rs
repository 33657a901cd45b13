//! # Temporal Types — Unix-Second Timestamps
//!
//! Proof timestamps and expiries travel as unix seconds. `Timestamp` wraps a
//! UTC `DateTime` truncated to whole seconds so the value that enters a
//! commitment and the value shown to a reader are the same instant.
//!
//! Pre-epoch instants are rejected at construction: every timestamp in the
//! system is representable as an unsigned second count.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StructuralInputError;

/// A UTC timestamp with seconds precision, never before the unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Build from unix seconds.
    pub fn from_unix_secs(secs: u64) -> Result<Self, StructuralInputError> {
        let invalid = || StructuralInputError::InvalidInteger {
            field: "timestamp".to_string(),
            value: secs.to_string(),
        };
        let signed = i64::try_from(secs).map_err(|_| invalid())?;
        let dt = DateTime::from_timestamp(signed, 0).ok_or_else(invalid)?;
        Ok(Self(dt))
    }

    /// Unix seconds.
    pub fn unix_secs(&self) -> u64 {
        u64::try_from(self.0.timestamp()).unwrap_or(0)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
