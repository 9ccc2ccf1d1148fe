use fatebook_core::client::QuestionQuery;
use fatebook_core::control::ForecastUpdate;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::format::{self, ListStyle};
use crate::{FatebookMcp, helpers};

pub const DEFAULT_LIST_LIMIT: u32 = 1000;
pub const DEFAULT_FILTERED_LIMIT: u32 = 20;
pub const DEFAULT_SEARCH_THRESHOLD: u32 = 60;

/// Parameters for listing the caller's open predictions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListPredictionsParams {
    /// Maximum number of predictions to return (default: 1000, i.e. all predictions).
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Parameters for submitting a new forecast.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdatePredictionParams {
    /// The question ID (obtained from list_predictions, not shown to the user).
    pub question_id: String,
    /// New probability between 0.0 and 1.0.
    pub new_probability: f64,
    /// Optional comment explaining the update.
    #[serde(default)]
    pub comment: Option<String>,
}

/// Parameters for fetching one prediction.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PredictionDetailsParams {
    /// The question ID (obtained from list_predictions, not shown to the user).
    pub question_id: String,
}

/// Parameters for listing predictions with the full filter set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ListPredictionsFilteredParams {
    /// Maximum number of predictions to return (default: 20).
    #[serde(default)]
    pub limit: Option<u32>,
    /// Only resolved predictions.
    #[serde(default)]
    pub resolved: Option<bool>,
    /// Only unresolved predictions.
    #[serde(default)]
    pub unresolved: Option<bool>,
    /// Include all public predictions, not just yours (default: false).
    #[serde(default)]
    pub show_all_public: Option<bool>,
    /// Only predictions whose text contains this string.
    #[serde(default)]
    pub search_string: Option<String>,
    /// Only predictions carrying any of these tag IDs.
    #[serde(default)]
    pub filter_tag_ids: Option<Vec<String>>,
    /// Only predictions in this tournament.
    #[serde(default)]
    pub filter_tournament_id: Option<String>,
    /// Only predictions resolving soon.
    #[serde(default)]
    pub resolving_soon: Option<bool>,
    /// Only predictions past their resolve-by date.
    #[serde(default)]
    pub ready_to_resolve: Option<bool>,
    /// Sort oldest first.
    #[serde(default)]
    pub sort_earliest_first: Option<bool>,
}

impl From<ListPredictionsFilteredParams> for QuestionQuery {
    fn from(params: ListPredictionsFilteredParams) -> Self {
        Self {
            limit: params.limit.unwrap_or(DEFAULT_FILTERED_LIMIT),
            resolved: params.resolved,
            unresolved: params.unresolved,
            show_all_public: params.show_all_public.unwrap_or(false),
            search_string: params.search_string,
            filter_tag_ids: params.filter_tag_ids.unwrap_or_default(),
            filter_tournament_id: params.filter_tournament_id,
            resolving_soon: params.resolving_soon.unwrap_or(false),
            ready_to_resolve: params.ready_to_resolve.unwrap_or(false),
            sort_earliest_first: params.sort_earliest_first.unwrap_or(false),
        }
    }
}

/// Parameters for matching a description against prediction titles.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchPredictionsParams {
    /// Description to search for in prediction titles.
    pub description: String,
    /// Minimum similarity score, 0-100 (default: 60).
    #[serde(default)]
    pub threshold: Option<u32>,
}

#[tool_router(router = tool_router_predictions, vis = "pub")]
impl FatebookMcp {
    #[tool(description = "List all your unresolved Fatebook predictions. Use the returned IDs internally for updates and details without exposing them to the user.")]
    pub async fn list_predictions(
        &self,
        Parameters(params): Parameters<ListPredictionsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
        match self.control().list_predictions(limit).await {
            Ok(questions) if questions.is_empty() => {
                Ok(helpers::text_result("No predictions found.".to_string()))
            }
            Ok(questions) => Ok(helpers::text_result(format::render_question_list(
                &questions,
                ListStyle {
                    show_status: false,
                    show_details_hint: true,
                },
            ))),
            Err(err) => Ok(helpers::tool_failure("list_predictions", &err)),
        }
    }

    #[tool(description = "Update a prediction probability (0.0 to 1.0). Get the question_id from list_predictions and use it here without exposing IDs to the user.")]
    pub async fn update_prediction(
        &self,
        Parameters(params): Parameters<UpdatePredictionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let update = ForecastUpdate {
            question_id: params.question_id,
            probability: params.new_probability,
            comment: params.comment,
        };
        match self.control().update_prediction(update).await {
            Ok(receipt) => Ok(helpers::text_result(format::render_update_receipt(&receipt))),
            Err(err) => Ok(helpers::tool_failure("update_prediction", &err)),
        }
    }

    #[tool(description = "Get detailed information about a specific prediction, including every forecast and who made it. Use question_id from list_predictions without exposing it to the user.")]
    pub async fn get_prediction_details(
        &self,
        Parameters(params): Parameters<PredictionDetailsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        match self.control().get_prediction(&params.question_id).await {
            Ok(question) => Ok(helpers::text_result(format::render_question_details(&question))),
            Err(err) => Ok(helpers::tool_failure("get_prediction_details", &err)),
        }
    }

    #[tool(description = "List predictions with advanced filtering options (resolved, unresolved, public, search text, tags, tournament, resolving soon, ready to resolve).")]
    pub async fn list_predictions_filtered(
        &self,
        Parameters(params): Parameters<ListPredictionsFilteredParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let query = QuestionQuery::from(params);
        match self.control().list_predictions_filtered(&query).await {
            Ok(questions) if questions.is_empty() => {
                Ok(helpers::text_result(format::describe_filters(&query)))
            }
            Ok(questions) => Ok(helpers::text_result(format::render_question_list(
                &questions,
                ListStyle {
                    show_status: true,
                    show_details_hint: false,
                },
            ))),
            Err(err) => Ok(helpers::tool_failure("list_predictions_filtered", &err)),
        }
    }

    #[tool(description = "Find your predictions whose titles best match a description. Returns at most two matches with a similarity score.")]
    pub async fn search_predictions(
        &self,
        Parameters(params): Parameters<SearchPredictionsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let threshold = params.threshold.unwrap_or(DEFAULT_SEARCH_THRESHOLD);
        let threshold = u8::try_from(threshold).unwrap_or(u8::MAX);
        match self
            .control()
            .search_predictions(&params.description, threshold)
            .await
        {
            Ok(matches) => Ok(helpers::text_result(format::render_search_matches(
                params.description.trim(),
                &matches,
            ))),
            Err(err) => Ok(helpers::tool_failure("search_predictions", &err)),
        }
    }
}
