//! # Front Desk Core
//!
//! Client-side logic for the clinic's walk-in queue.
//!
//! This crate contains:
//! - Queue and roster data types matching the backend's JSON
//! - Pure view derivations (filtering, search, next queue number, wait estimate)
//! - The add/edit form draft and its validation
//! - The [`QueueBackend`] seam and its HTTP implementation
//! - The [`QueueController`] that ties them together
//!
//! **No presentation concerns**: rendering and prompting belong in `frontdesk-cli`.

pub mod backend;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod form;
pub mod model;
pub mod view;

pub use backend::{HttpBackend, QueueBackend};
pub use config::{client_config_from_env_values, ClientConfig};
pub use constants::*;
pub use controller::{Confirm, QueueController, RefreshPolicy, ViewState};
pub use error::{FormError, FormField, QueueError, QueueResult};
pub use form::QueueDraft;
pub use model::{
    Doctor, DoctorId, EntryId, Priority, QueueEntry, QueuePayload, QueueStatus, StatusPayload,
    UnknownValue,
};
pub use view::{
    compute_next_queue_number, compute_visible_entries, compute_wait_estimate,
    format_arrival_time, format_wait, StatusFilter,
};

pub use frontdesk_types::{NonEmptyText, QueueNumber, TextError};
