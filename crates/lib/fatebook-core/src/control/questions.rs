use fatebook_store::models::Question;
use tracing::debug;

use crate::client::QuestionQuery;
use crate::matcher::{self, ScoredQuestion};

use super::{ControlError, FatebookControlPlane, require_question_id};

/// Number of questions scanned when matching a free-text description.
pub const SEARCH_SCAN_LIMIT: u32 = 100;
/// Maximum number of matches returned for a description.
pub const SEARCH_MAX_MATCHES: usize = 2;

impl FatebookControlPlane {
    /// Lists the caller's open, non-public questions.
    ///
    /// Resolved or publicly shared questions returned by the API despite the
    /// filter are dropped.
    ///
    /// # Errors
    /// Returns `ControlError::Upstream` if the API call fails.
    pub async fn list_predictions(&self, limit: u32) -> Result<Vec<Question>, ControlError> {
        let query = QuestionQuery::new(limit).unresolved_only();
        let questions = self.client.get_questions(&query).await?;
        let fetched = questions.len();
        let open: Vec<Question> = questions
            .into_iter()
            .filter(|question| !question.resolved && !question.shared_publicly)
            .collect();
        if open.len() != fetched {
            debug!(dropped = fetched - open.len(), "dropped resolved or public questions");
        }
        Ok(open)
    }

    /// Lists questions using every filter the API supports.
    ///
    /// # Errors
    /// Returns `ControlError::Upstream` if the API call fails.
    pub async fn list_predictions_filtered(
        &self,
        query: &QuestionQuery,
    ) -> Result<Vec<Question>, ControlError> {
        Ok(self.client.get_questions(query).await?)
    }

    /// Fetches a question with its full forecast history.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for a blank id, `ControlError::NotFound`
    /// if the API does not know the id, or `ControlError::Upstream` on failure.
    pub async fn get_prediction(&self, question_id: &str) -> Result<Question, ControlError> {
        let question_id = require_question_id(question_id)?;
        self.client
            .get_question(question_id)
            .await?
            .ok_or_else(|| ControlError::NotFound {
                question_id: question_id.to_string(),
            })
    }

    /// Finds the caller's questions whose titles best match a description.
    ///
    /// # Errors
    /// Returns `ControlError::Validation` for a blank description or a threshold
    /// above 100, or `ControlError::Upstream` if the API call fails.
    pub async fn search_predictions(
        &self,
        description: &str,
        threshold: u8,
    ) -> Result<Vec<ScoredQuestion>, ControlError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ControlError::Validation(
                "Please provide a description to search for.".to_string(),
            ));
        }
        if threshold > 100 {
            return Err(ControlError::Validation(format!(
                "threshold must be between 0 and 100, got {threshold}"
            )));
        }
        let questions = self
            .client
            .get_questions(&QuestionQuery::new(SEARCH_SCAN_LIMIT))
            .await?;
        Ok(matcher::best_matches(
            description,
            questions,
            threshold,
            SEARCH_MAX_MATCHES,
        ))
    }
}
