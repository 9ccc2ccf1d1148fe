use fatebook_store::models::{AddForecastBody, Question};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::ClientError;

use super::{ControlError, FatebookControlPlane, require_question_id};

/// Input payload for submitting a forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastUpdate {
    pub question_id: String,
    pub probability: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Outcome of a forecast submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReceipt {
    pub question: Question,
    pub probability: f64,
    pub comment: Option<String>,
}

/// Checks that a probability lies in `[0, 1]`. Negative zero is returned as `0.0`.
///
/// # Errors
/// Returns `ControlError::Validation` for values outside the range or `NaN`.
pub fn validate_probability(probability: f64) -> Result<f64, ControlError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(probability.abs())
    } else {
        Err(ControlError::Validation(format!(
            "Probability must be between 0.0 and 1.0, got {probability}."
        )))
    }
}

impl FatebookControlPlane {
    /// Submits a new forecast after validating the input locally.
    ///
    /// The question is fetched first so the receipt carries its title.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` before any request for a blank id or an
    /// out-of-range probability, `ControlError::NotFound` for an unknown id, or
    /// `ControlError::Upstream` if the API call fails.
    pub async fn update_prediction(
        &self,
        update: ForecastUpdate,
    ) -> Result<ForecastReceipt, ControlError> {
        let ForecastUpdate {
            question_id,
            probability,
            comment,
        } = update;

        let question_id = require_question_id(&question_id)?.to_string();
        let probability = validate_probability(probability)?;
        let comment = comment
            .map(|comment| comment.trim().to_string())
            .filter(|comment| !comment.is_empty());

        let question = self.get_prediction(&question_id).await?;

        let body = AddForecastBody {
            question_id: question_id.clone(),
            forecast: probability,
            comment: comment.clone(),
        };
        match self.client.add_forecast(&body).await {
            Ok(()) => {}
            Err(ClientError::Status { status: 404, .. }) => {
                return Err(ControlError::NotFound { question_id });
            }
            Err(err) => return Err(err.into()),
        }

        info!(question_id = %question_id, probability, "forecast submitted");
        Ok(ForecastReceipt {
            question,
            probability,
            comment,
        })
    }
}
