pub const DEFAULT_BASE_URL: &str = "https://fatebook.io/api";

pub const ROUTE_GET_QUESTIONS: &str = "/v0/getQuestions";
pub const ROUTE_GET_QUESTION: &str = "/v0/getQuestion";
pub const ROUTE_ADD_FORECAST: &str = "/v0/addForecast";

pub const PARAM_API_KEY: &str = "apiKey";
pub const PARAM_QUESTION_ID: &str = "questionId";
pub const PARAM_LIMIT: &str = "limit";
pub const PARAM_RESOLVED: &str = "resolved";
pub const PARAM_UNRESOLVED: &str = "unresolved";
pub const PARAM_SHOW_ALL_PUBLIC: &str = "showAllPublic";
pub const PARAM_SEARCH_STRING: &str = "searchString";
pub const PARAM_FILTER_TAG_IDS: &str = "filterTagIds";
pub const PARAM_FILTER_TOURNAMENT_ID: &str = "filterTournamentId";
pub const PARAM_RESOLVING_SOON: &str = "resolvingSoon";
pub const PARAM_READY_TO_RESOLVE: &str = "readyToResolve";
pub const PARAM_SORT_EARLIEST_FIRST: &str = "sortEarliestFirst";

/// Joins a base URL and an API route without doubling the separator.
#[must_use]
pub fn route_url(base_url: &str, route: &str) -> String {
    format!("{}{route}", base_url.trim_end_matches('/'))
}
