//! Queue view controller.
//!
//! Owns the last-fetched queue and roster plus the view state (filter, search, open form),
//! and routes every write through the [`QueueBackend`]. Nothing is applied optimistically:
//! after a successful write the local copy is re-synchronised according to the
//! [`RefreshPolicy`], and after a failed one it is left exactly as it was. A refresh that
//! fails after a committed write is logged and does not turn the write into an error.
//!
//! All loads and writes take `&mut self`, so one controller never has two requests in
//! flight and a stale load cannot overwrite a newer one.

use crate::backend::QueueBackend;
use crate::constants::DELETE_PROMPT;
use crate::form::QueueDraft;
use crate::model::{Doctor, EntryId, QueueEntry, QueueStatus};
use crate::view::{compute_next_queue_number, compute_visible_entries, StatusFilter};
use crate::{QueueError, QueueResult};
use frontdesk_types::QueueNumber;

/// Interactive yes/no confirmation, asked before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// How the local queue is brought back in line with the backend after a write.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Re-fetch the whole queue after every successful write.
    #[default]
    Refetch,
    /// Apply the entity returned by the write locally. Falls back to a re-fetch when the
    /// backend does not echo the entry.
    MergeResponse,
}

/// Local, non-persisted UI state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewState {
    filter: StatusFilter,
    search: String,
    draft: Option<QueueDraft>,
}

impl ViewState {
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The open add/edit form, if any.
    pub fn draft(&self) -> Option<&QueueDraft> {
        self.draft.as_ref()
    }

    pub fn is_form_open(&self) -> bool {
        self.draft.is_some()
    }
}

/// What a successful write did, for the merge refresh policy.
enum Written {
    Upsert(Option<QueueEntry>),
    Removed(EntryId),
}

pub struct QueueController<B> {
    backend: B,
    entries: Vec<QueueEntry>,
    doctors: Vec<Doctor>,
    view: ViewState,
    policy: RefreshPolicy,
}

impl<B: QueueBackend> QueueController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            entries: Vec::new(),
            doctors: Vec::new(),
            view: ViewState::default(),
            policy: RefreshPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Replaces the local queue with the backend's.
    ///
    /// # Errors
    ///
    /// On failure the error is logged and returned, and the previous queue stays in place.
    pub async fn load_queue(&mut self) -> QueueResult<()> {
        match self.backend.list_queue().await {
            Ok(entries) => {
                tracing::debug!("loaded {} queue entries", entries.len());
                self.entries = entries;
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to load queue: {}", e);
                Err(e)
            }
        }
    }

    /// Replaces the local doctor roster with the backend's. Same failure policy as
    /// [`QueueController::load_queue`].
    pub async fn load_doctors(&mut self) -> QueueResult<()> {
        match self.backend.list_doctors().await {
            Ok(doctors) => {
                tracing::debug!("loaded {} doctors", doctors.len());
                self.doctors = doctors;
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to load doctors: {}", e);
                Err(e)
            }
        }
    }

    pub fn set_filter(&mut self, filter: impl Into<StatusFilter>) {
        self.view.filter = filter.into();
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.view.search = text.into();
    }

    /// The queue as currently filtered and searched.
    pub fn visible_entries(&self) -> Vec<&QueueEntry> {
        compute_visible_entries(&self.entries, self.view.filter, &self.view.search)
    }

    pub fn next_queue_number(&self) -> QueueNumber {
        compute_next_queue_number(&self.entries)
    }

    /// Opens a blank form for a new walk-in, suggesting the next queue number.
    pub fn open_add_form(&mut self) -> &mut QueueDraft {
        let draft = QueueDraft::new_entry(self.next_queue_number());
        self.view.draft.insert(draft)
    }

    pub fn open_edit_form(&mut self, entry: &QueueEntry) -> &mut QueueDraft {
        self.view.draft.insert(QueueDraft::from_entry(entry))
    }

    /// Opens the edit form for a loaded entry.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::NotFound`] if `id` is not in the local queue.
    pub fn open_edit_form_by_id(&mut self, id: EntryId) -> QueueResult<&mut QueueDraft> {
        let draft = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .map(QueueDraft::from_entry)
            .ok_or(QueueError::NotFound(id))?;
        Ok(self.view.draft.insert(draft))
    }

    pub fn draft_mut(&mut self) -> Option<&mut QueueDraft> {
        self.view.draft.as_mut()
    }

    pub fn close_form(&mut self) {
        self.view.draft = None;
    }

    /// Validates the open form and creates or updates the entry.
    ///
    /// On success the form is closed and the queue refreshed. On a validation failure no
    /// request is sent and the form stays open.
    ///
    /// # Errors
    ///
    /// - [`QueueError::InvalidInput`] if no form is open,
    /// - [`QueueError::Validation`] if a required field is missing,
    /// - any backend error from the write itself.
    pub async fn save_form(&mut self) -> QueueResult<()> {
        let Some(draft) = self.view.draft.as_ref() else {
            return Err(QueueError::InvalidInput("no queue form is open".into()));
        };

        let payload = draft.validate().inspect_err(|e| {
            tracing::warn!("queue form rejected: {}", e);
        })?;

        let written = match draft.id {
            None => self.backend.create_entry(&payload).await,
            Some(id) => self.backend.update_entry(id, &payload).await,
        }
        .inspect_err(|e| tracing::error!("failed to save queue entry: {}", e))?;

        self.view.draft = None;
        self.refresh(Written::Upsert(written)).await;
        Ok(())
    }

    /// Sets an entry's status and refreshes.
    pub async fn update_status(&mut self, id: EntryId, status: QueueStatus) -> QueueResult<()> {
        let written = self
            .backend
            .update_status(id, status)
            .await
            .inspect_err(|e| tracing::error!("failed to update status of entry {}: {}", id, e))?;
        self.refresh(Written::Upsert(written)).await;
        Ok(())
    }

    /// Deletes an entry after confirmation and refreshes.
    ///
    /// Returns `Ok(false)` without contacting the backend when confirmation is declined.
    pub async fn delete_entry(&mut self, id: EntryId, confirm: &impl Confirm) -> QueueResult<bool> {
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!("deletion of entry {} declined", id);
            return Ok(false);
        }

        self.backend
            .delete_entry(id)
            .await
            .inspect_err(|e| tracing::error!("failed to delete entry {}: {}", id, e))?;
        self.refresh(Written::Removed(id)).await;
        Ok(true)
    }

    /// Re-synchronises after a committed write. A failed reload is logged by
    /// [`QueueController::load_queue`] and leaves the previous queue showing.
    async fn refresh(&mut self, written: Written) {
        match (self.policy, written) {
            (RefreshPolicy::MergeResponse, Written::Upsert(Some(entry))) => {
                match self.entries.iter_mut().find(|e| e.id == entry.id) {
                    Some(existing) => *existing = entry,
                    None => self.entries.push(entry),
                }
            }
            (RefreshPolicy::MergeResponse, Written::Removed(id)) => {
                self.entries.retain(|e| e.id != id);
            }
            _ => {
                if self.load_queue().await.is_err() {
                    tracing::warn!("queue view may be stale until the next reload");
                }
            }
        }
    }
}
