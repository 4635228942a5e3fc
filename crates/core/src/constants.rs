//! Constants used throughout the front-desk core crate.
//!
//! Backend paths and configuration keys live here so the HTTP client, the config loader and
//! the CLI agree on them.

/// Backend base URL used when no explicit URL is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "CLINIC_API_URL";

/// Environment variable holding an optional request timeout, in whole seconds.
pub const API_TIMEOUT_ENV: &str = "CLINIC_API_TIMEOUT_SECS";

/// Collection path for walk-in queue entries.
pub const QUEUE_PATH: &str = "/queue";

/// Collection path for the doctor roster.
pub const DOCTORS_PATH: &str = "/doctors";

/// Prompt shown before a queue entry is deleted.
pub const DELETE_PROMPT: &str = "Delete this patient from queue?";

/// User agent sent with every backend request.
pub const USER_AGENT: &str = concat!("frontdesk/", env!("CARGO_PKG_VERSION"));
