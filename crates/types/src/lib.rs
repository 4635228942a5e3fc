//! Small validated value types shared by the front-desk crates.
//!
//! Form input arrives as free text from staff. These wrappers are the point where blank or
//! out-of-range values are rejected, so the rest of the code can hold them without
//! re-checking.

/// Errors that can occur when creating validated front-desk values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    Empty,
    /// A queue number must be at least 1
    #[error("queue number must be a positive integer")]
    NotPositive,
}

/// A string that is guaranteed to hold at least one non-whitespace character.
///
/// Used for patient names typed into the queue form. Leading and trailing whitespace is
/// trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// A queue number as shown on the waiting-room display.
///
/// Always at least 1. Uniqueness is not enforced here or anywhere else on the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueueNumber(u32);

impl QueueNumber {
    /// The number handed out when the queue is empty.
    pub const FIRST: QueueNumber = QueueNumber(1);

    /// # Errors
    ///
    /// Returns [`TextError::NotPositive`] for zero.
    pub fn new(value: u32) -> Result<Self, TextError> {
        if value == 0 {
            return Err(TextError::NotPositive);
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The number after this one, saturating at `u32::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for QueueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for QueueNumber {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        let value = trimmed.parse::<u32>().map_err(|_| TextError::NotPositive)?;
        Self::new(value)
    }
}

impl serde::Serialize for QueueNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(self.0)
    }
}
