use std::{error::Error, fmt};

use crate::client::{ClientError, FatebookClient};

pub mod forecast;
pub mod questions;

pub use forecast::{ForecastReceipt, ForecastUpdate, validate_probability};

#[derive(Debug)]
pub enum ControlError {
    Validation(String),
    NotFound { question_id: String },
    Upstream(ClientError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotFound { question_id } => {
                write!(f, "Question with ID '{question_id}' not found.")
            }
            Self::Upstream(err) => write!(f, "Fatebook API error: {err}"),
        }
    }
}

impl Error for ControlError {}

impl From<ClientError> for ControlError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidInput(message) => Self::Validation(message),
            other => Self::Upstream(other),
        }
    }
}

#[derive(Clone)]
pub struct FatebookControlPlane {
    client: FatebookClient,
}

impl FatebookControlPlane {
    #[must_use]
    pub const fn new(client: FatebookClient) -> Self {
        Self { client }
    }
}

pub(crate) fn require_question_id(question_id: &str) -> Result<&str, ControlError> {
    let trimmed = question_id.trim();
    if trimmed.is_empty() {
        return Err(ControlError::Validation(
            "Please provide a question ID.".to_string(),
        ));
    }
    Ok(trimmed)
}
