//! Editable draft behind the add/edit queue form.

use crate::error::{FormError, FormField};
use crate::model::{DoctorId, EntryId, Priority, QueueEntry, QueuePayload, QueueStatus};
use frontdesk_types::{NonEmptyText, QueueNumber};

/// Form state for creating (`id == None`) or editing a queue entry.
///
/// Fields stay loosely typed until [`QueueDraft::validate`] so that staff can leave them
/// blank while filling the form in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueDraft {
    pub id: Option<EntryId>,
    pub patient_name: String,
    pub queue_number: Option<u32>,
    pub doctor_id: Option<DoctorId>,
    pub status: QueueStatus,
    pub priority: Priority,
}

impl QueueDraft {
    /// Blank draft for a new walk-in, pre-filled with the suggested queue number.
    pub fn new_entry(next_number: QueueNumber) -> Self {
        Self {
            id: None,
            patient_name: String::new(),
            queue_number: Some(next_number.get()),
            doctor_id: None,
            status: QueueStatus::Waiting,
            priority: Priority::Normal,
        }
    }

    pub fn from_entry(entry: &QueueEntry) -> Self {
        Self {
            id: Some(entry.id),
            patient_name: entry.patient_name.clone(),
            queue_number: Some(entry.queue_number),
            doctor_id: entry.doctor_id(),
            status: entry.status,
            priority: entry.priority,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Checks that patient name, queue number and doctor are filled in and builds the
    /// request body.
    ///
    /// A queue number of zero counts as missing.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Incomplete`] naming every missing field.
    pub fn validate(&self) -> Result<QueuePayload, FormError> {
        let patient_name = NonEmptyText::new(&self.patient_name).ok();
        let queue_number = self.queue_number.and_then(|n| QueueNumber::new(n).ok());

        let mut missing = Vec::new();
        if patient_name.is_none() {
            missing.push(FormField::PatientName);
        }
        if queue_number.is_none() {
            missing.push(FormField::QueueNumber);
        }
        if self.doctor_id.is_none() {
            missing.push(FormField::Doctor);
        }

        match (patient_name, queue_number, self.doctor_id) {
            (Some(patient_name), Some(queue_number), Some(doctor_id)) => Ok(QueuePayload {
                patient_name,
                queue_number,
                status: self.status,
                priority: self.priority,
                doctor_id,
            }),
            _ => Err(FormError::Incomplete { missing }),
        }
    }
}
