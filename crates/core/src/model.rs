//! Queue and roster data as exchanged with the backend.
//!
//! Wire shapes use camelCase keys (`patientName`, `queueNumber`, `createdAt`, `doctorId`)
//! and snake_case status strings. Entries are owned by the backend; the client only ever
//! holds the copy returned by the most recent fetch.

use chrono::{DateTime, Utc};
use frontdesk_types::{NonEmptyText, QueueNumber};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Server-assigned queue entry identifier.
pub type EntryId = i64;

/// Server-assigned doctor identifier.
pub type DoctorId = i64;

/// Raised when a status, priority or filter string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownValue {
    kind: &'static str,
    value: String,
}

impl UnknownValue {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Lifecycle stage of a queue entry.
///
/// Staff may move an entry to any stage directly; there is no enforced order and nothing
/// changes automatically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStatus {
    Waiting,
    WithDoctor,
    Completed,
}

impl QueueStatus {
    pub const ALL: [QueueStatus; 3] = [
        QueueStatus::Waiting,
        QueueStatus::WithDoctor,
        QueueStatus::Completed,
    ];

    /// Wire form, also used when matching search text.
    pub fn as_str(self) -> &'static str {
        match self {
            QueueStatus::Waiting => "waiting",
            QueueStatus::WithDoctor => "with_doctor",
            QueueStatus::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            QueueStatus::Waiting => "Waiting",
            QueueStatus::WithDoctor => "With Doctor",
            QueueStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for QueueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueueStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QueueStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownValue::new("status", s))
    }
}

/// Urgency flag. Affects display only, never ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Urgent => "urgent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::Normal => "Normal",
            Priority::Urgent => "Urgent",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Priority::Normal),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(UnknownValue::new("priority", s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
}

/// One walk-in patient's place in the day's queue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub id: EntryId,
    pub patient_name: String,
    /// Advisory display order; not guaranteed unique. Absent or null decodes as 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub queue_number: u32,
    pub status: QueueStatus,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub doctor: Option<Doctor>,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

impl QueueEntry {
    pub fn doctor_id(&self) -> Option<DoctorId> {
        self.doctor.as_ref().map(|d| d.id)
    }

    /// Assigned doctor's name, or `-` when the backend returned none.
    pub fn doctor_name(&self) -> &str {
        self.doctor.as_ref().map_or("-", |d| d.name.as_str())
    }
}

/// Body for `POST /queue` and `PUT /queue/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuePayload {
    pub patient_name: NonEmptyText,
    pub queue_number: QueueNumber,
    pub status: QueueStatus,
    pub priority: Priority,
    pub doctor_id: DoctorId,
}

/// Body for `PATCH /queue/{id}/status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: QueueStatus,
}
