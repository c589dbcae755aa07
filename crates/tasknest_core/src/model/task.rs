//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted record shared by local and remote stores.
//! - Provide creation helpers and the monotonic sync-flag transition.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - After creation only `synced` may change, and only `false -> true`.
//! - `scheduled_time` is either empty or a valid `HH:MM` 24-hour string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

static SCHEDULED_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("valid time regex"));

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Validation failures for task field constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    BlankTitle,
    /// `scheduled_time` is neither empty nor a `HH:MM` 24-hour string.
    InvalidScheduledTime(String),
    /// Location coordinates are outside valid latitude/longitude ranges.
    InvalidLocation { lat: f64, lng: f64 },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::InvalidScheduledTime(value) => {
                write!(f, "scheduled time must be empty or HH:MM, got `{value}`")
            }
            Self::InvalidLocation { lat, lng } => {
                write!(f, "location out of range: lat={lat} lng={lng}")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Geographic point captured at task creation.
///
/// Absent entirely when the platform could not supply a position (offline
/// geolocation, permission withheld).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Canonical task record, persisted with the same shape locally and
/// remotely.
///
/// Serialization uses the wire field names (`scheduledTime`, `lastUpdated`)
/// shared with the remote collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID, client-generated at creation.
    pub id: TaskId,
    /// Free-text title. Required.
    pub title: String,
    /// Local time-of-day as `HH:MM`, or empty when unscheduled.
    pub scheduled_time: String,
    /// Completion flag, fixed at creation. There is no edit path.
    pub done: bool,
    /// Unix epoch milliseconds at creation. Display ordering key only.
    pub last_updated: i64,
    /// True only after a confirmed remote acknowledgment of this record.
    pub synced: bool,
    /// Optional position captured at creation.
    pub location: Option<GeoPoint>,
}

impl Task {
    /// Creates an unsynced task with a generated stable ID and the current
    /// wall clock as `last_updated`.
    pub fn new(
        title: impl Into<String>,
        scheduled_time: impl Into<String>,
        done: bool,
        location: Option<GeoPoint>,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4(),
            title,
            scheduled_time,
            done,
            location,
            epoch_ms_now(),
        )
    }

    /// Creates a task with caller-provided identity and timestamp.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        scheduled_time: impl Into<String>,
        done: bool,
        location: Option<GeoPoint>,
        last_updated: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            scheduled_time: scheduled_time.into(),
            done,
            last_updated,
            synced: false,
            location,
        }
    }

    /// Checks field constraints without touching storage.
    ///
    /// # Errors
    /// - `BlankTitle` when the title trims to nothing.
    /// - `InvalidScheduledTime` when the time string is malformed.
    /// - `InvalidLocation` when coordinates are out of range.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        if !self.scheduled_time.is_empty() && !SCHEDULED_TIME_RE.is_match(&self.scheduled_time) {
            return Err(TaskValidationError::InvalidScheduledTime(
                self.scheduled_time.clone(),
            ));
        }
        if let Some(location) = self.location {
            if !(-90.0..=90.0).contains(&location.lat)
                || !(-180.0..=180.0).contains(&location.lng)
            {
                return Err(TaskValidationError::InvalidLocation {
                    lat: location.lat,
                    lng: location.lng,
                });
            }
        }
        Ok(())
    }

    /// Marks this record as acknowledged by the remote store.
    ///
    /// The transition is monotonic: there is deliberately no API to clear
    /// the flag again.
    pub fn mark_synced(&mut self) {
        self.synced = true;
    }

    /// Returns whether this task still awaits a remote push.
    pub fn is_pending_sync(&self) -> bool {
        !self.synced
    }
}

/// Current wall clock as Unix epoch milliseconds.
pub fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
