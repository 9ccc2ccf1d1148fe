use fatebook_store::schema::{
    PARAM_FILTER_TAG_IDS,
    PARAM_FILTER_TOURNAMENT_ID,
    PARAM_LIMIT,
    PARAM_READY_TO_RESOLVE,
    PARAM_RESOLVED,
    PARAM_RESOLVING_SOON,
    PARAM_SEARCH_STRING,
    PARAM_SHOW_ALL_PUBLIC,
    PARAM_SORT_EARLIEST_FIRST,
    PARAM_UNRESOLVED,
};

/// Filters accepted by `getQuestions`.
///
/// Flags that are `false` or `None` are left off the query string so the API
/// applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct QuestionQuery {
    pub limit: u32,
    pub resolved: Option<bool>,
    pub unresolved: Option<bool>,
    pub show_all_public: bool,
    pub search_string: Option<String>,
    pub filter_tag_ids: Vec<String>,
    pub filter_tournament_id: Option<String>,
    pub resolving_soon: bool,
    pub ready_to_resolve: bool,
    pub sort_earliest_first: bool,
}

impl QuestionQuery {
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    /// Restricts the query to the caller's own open questions.
    #[must_use]
    pub fn unresolved_only(mut self) -> Self {
        self.unresolved = Some(true);
        self.show_all_public = false;
        self
    }

    /// Query-string pairs in the order the API documents them.
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![(PARAM_LIMIT, self.limit.to_string())];

        if let Some(resolved) = self.resolved {
            params.push((PARAM_RESOLVED, resolved.to_string()));
        }
        if let Some(unresolved) = self.unresolved {
            params.push((PARAM_UNRESOLVED, unresolved.to_string()));
        }
        if self.show_all_public {
            params.push((PARAM_SHOW_ALL_PUBLIC, "true".to_string()));
        }
        if let Some(search) = self.search_string.as_deref().map(str::trim)
            && !search.is_empty()
        {
            params.push((PARAM_SEARCH_STRING, search.to_string()));
        }
        for tag_id in &self.filter_tag_ids {
            params.push((PARAM_FILTER_TAG_IDS, tag_id.clone()));
        }
        if let Some(tournament_id) = self.filter_tournament_id.as_deref()
            && !tournament_id.trim().is_empty()
        {
            params.push((PARAM_FILTER_TOURNAMENT_ID, tournament_id.to_string()));
        }
        if self.resolving_soon {
            params.push((PARAM_RESOLVING_SOON, "true".to_string()));
        }
        if self.ready_to_resolve {
            params.push((PARAM_READY_TO_RESOLVE, "true".to_string()));
        }
        if self.sort_earliest_first {
            params.push((PARAM_SORT_EARLIEST_FIRST, "true".to_string()));
        }

        params
    }
}
