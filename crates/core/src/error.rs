use crate::model::EntryId;

/// A required queue form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    PatientName,
    QueueNumber,
    Doctor,
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FormField::PatientName => "patient name",
            FormField::QueueNumber => "queue number",
            FormField::Doctor => "doctor",
        };
        f.write_str(name)
    }
}

/// Validation failures raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("please fill {}", join_fields(.missing))]
    Incomplete { missing: Vec<FormField> },
}

fn join_fields(fields: &[FormField]) -> String {
    let names: Vec<String> = fields.iter().map(ToString::to_string).collect();
    match names.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{method} {url} returned {status}")]
    Status {
        method: reqwest::Method,
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("{0}")]
    Validation(#[from] FormError),
    #[error("queue entry {0} not found")]
    NotFound(EntryId),
}

pub type QueueResult<T> = std::result::Result<T, QueueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_form_lists_every_missing_field() {
        let err = FormError::Incomplete {
            missing: vec![FormField::PatientName, FormField::QueueNumber, FormField::Doctor],
        };
        assert_eq!(
            err.to_string(),
            "please fill patient name, queue number and doctor"
        );
    }

    #[test]
    fn incomplete_form_with_one_field() {
        let err = FormError::Incomplete {
            missing: vec![FormField::Doctor],
        };
        assert_eq!(err.to_string(), "please fill doctor");
    }

    #[test]
    fn status_error_names_the_request() {
        let err = QueueError::Status {
            method: reqwest::Method::PATCH,
            url: "http://localhost:3001/queue/1/status".into(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert_eq!(
            err.to_string(),
            "PATCH http://localhost:3001/queue/1/status returned 404 Not Found"
        );
    }
}
