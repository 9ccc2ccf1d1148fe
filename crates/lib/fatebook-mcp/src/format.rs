//! Text rendering for tool results.
//!
//! Assistants read these strings directly, so every renderer produces plain
//! markdown-flavoured text rather than JSON.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};
use fatebook_core::client::QuestionQuery;
use fatebook_core::control::{ControlError, ForecastReceipt};
use fatebook_core::matcher::ScoredQuestion;
use fatebook_store::models::{ForecastValue, Question};

const NO_TITLE: &str = "No title";
const UNKNOWN_AUTHOR: &str = "Unknown author";

/// Options that vary between the list renderers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListStyle {
    pub show_status: bool,
    pub show_details_hint: bool,
}

/// Renders a probability as a percentage, dropping a trailing `.0`.
#[must_use]
pub fn format_percent(probability: f64) -> String {
    // `+ 0.0` turns negative zero into positive zero.
    let rendered = format!("{:.1}", probability * 100.0 + 0.0);
    let rendered = rendered.strip_suffix(".0").unwrap_or(&rendered);
    format!("{rendered}%")
}

/// Renders an upstream forecast value; non-numeric values are shown verbatim.
#[must_use]
pub fn format_forecast_value(value: Option<&ForecastValue>) -> String {
    match value {
        Some(value) => value.probability().map_or_else(
            || match value {
                ForecastValue::Text(text) => text.clone(),
                ForecastValue::Number(number) => number.to_string(),
            },
            format_percent,
        ),
        None => "unknown".to_string(),
    }
}

/// Renders an RFC 3339 or `YYYY-MM-DD` timestamp; other values pass through.
#[must_use]
pub fn format_timestamp(raw: Option<&str>, placeholder: &str) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return placeholder.to_string();
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed
            .with_timezone(&Utc)
            .format("%Y-%m-%d %H:%M UTC")
            .to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

fn status_label(question: &Question) -> &'static str {
    if question.resolved { "Resolved" } else { "Open" }
}

fn latest_forecast_line(question: &Question) -> String {
    question.latest_forecast().map_or_else(
        || "No forecast".to_string(),
        |forecast| {
            let value = format_forecast_value(forecast.forecast.as_ref());
            match forecast.forecaster_name() {
                Some(name) => format!("{value} (by {name})"),
                None => value,
            }
        },
    )
}

/// Renders a numbered list of questions.
#[must_use]
pub fn render_question_list(questions: &[Question], style: ListStyle) -> String {
    let mut out = format!("Found {} predictions:\n\n", questions.len());
    for (index, question) in questions.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. **{}**",
            index + 1,
            question.title.as_deref().unwrap_or(NO_TITLE)
        );
        let _ = writeln!(
            out,
            "   Author: {}",
            question.author_name().unwrap_or(UNKNOWN_AUTHOR)
        );
        let _ = writeln!(out, "   ID: {}", question.id);
        let _ = writeln!(out, "   Latest forecast: {}", latest_forecast_line(question));
        if style.show_status {
            let _ = writeln!(out, "   Status: {}", status_label(question));
        }
        let _ = writeln!(
            out,
            "   Resolves by: {}",
            format_timestamp(question.resolve_by.as_deref(), "No resolution date")
        );
        let _ = writeln!(
            out,
            "   Created: {}\n",
            format_timestamp(question.created_date.as_deref(), "Unknown date")
        );
    }
    if style.show_details_hint {
        out.push_str(
            "Note: only the latest forecast is shown for each prediction. \
             Use `get_prediction_details` to see every forecast.",
        );
    }
    out
}

/// Renders the full view of one question, one line per forecast.
#[must_use]
pub fn render_question_details(question: &Question) -> String {
    let mut out = format!("**{}**\n\n", question.title.as_deref().unwrap_or(NO_TITLE));
    let _ = writeln!(
        out,
        "Author: {}",
        question.author_name().unwrap_or(UNKNOWN_AUTHOR)
    );
    let _ = writeln!(out, "ID: {}", question.id);
    let _ = writeln!(
        out,
        "Created: {}",
        format_timestamp(question.created_date.as_deref(), "Unknown")
    );
    let _ = writeln!(
        out,
        "Resolves by: {}",
        format_timestamp(question.resolve_by.as_deref(), "No resolution date")
    );
    let _ = writeln!(out, "Status: {}", status_label(question));
    if question.resolved
        && let Some(resolution) = question.resolution.as_deref().filter(|r| !r.is_empty())
    {
        let _ = writeln!(out, "Resolution: {resolution}");
    }

    if question.forecasts.is_empty() {
        out.push_str("\nNo forecasts yet.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "\nForecast history ({} forecasts):",
        question.forecasts.len()
    );
    for (index, forecast) in question.forecasts.iter().enumerate() {
        let _ = write!(
            out,
            "  {}. {} by {} on {}",
            index + 1,
            format_forecast_value(forecast.forecast.as_ref()),
            forecast.forecaster_name().unwrap_or("Unknown"),
            format_timestamp(forecast.created_date.as_deref(), "Unknown date")
        );
        if let Some(comment) = forecast.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            let _ = write!(out, " ({})", comment.trim());
        }
        out.push('\n');
    }
    out
}

/// Renders the confirmation for a submitted forecast.
#[must_use]
pub fn render_update_receipt(receipt: &ForecastReceipt) -> String {
    let mut out = String::from("Successfully updated prediction:\n\n");
    let _ = writeln!(
        out,
        "**{}**",
        receipt.question.title.as_deref().unwrap_or(NO_TITLE)
    );
    let _ = writeln!(out, "ID: {}", receipt.question.id);
    let _ = write!(out, "New forecast: {}", format_percent(receipt.probability));
    if let Some(comment) = receipt.comment.as_deref() {
        let _ = write!(out, "\nComment: {comment}");
    }
    out
}

/// Renders title matches for a free-text description.
#[must_use]
pub fn render_search_matches(description: &str, matches: &[ScoredQuestion]) -> String {
    if matches.is_empty() {
        return format!("No predictions found matching '{description}'.");
    }
    let mut out = format!(
        "Found {} predictions matching '{description}':\n\n",
        matches.len()
    );
    for (index, scored) in matches.iter().enumerate() {
        let question = &scored.question;
        let _ = writeln!(
            out,
            "{}. **{}** (Match: {}%)",
            index + 1,
            question.title.as_deref().unwrap_or(NO_TITLE),
            scored.score
        );
        let _ = writeln!(out, "   ID: {}", question.id);
        let _ = writeln!(out, "   Latest forecast: {}\n", latest_forecast_line(question));
    }
    out
}

/// Summarizes the filters of a query for an empty-result message.
#[must_use]
pub fn describe_filters(query: &QuestionQuery) -> String {
    let mut filters = Vec::new();
    if query.resolved == Some(true) {
        filters.push("resolved".to_string());
    }
    if query.unresolved == Some(true) {
        filters.push("unresolved".to_string());
    }
    if query.show_all_public {
        filters.push("public".to_string());
    }
    if let Some(search) = query.search_string.as_deref().filter(|s| !s.trim().is_empty()) {
        filters.push(format!("search='{search}'"));
    }
    if !query.filter_tag_ids.is_empty() {
        filters.push(format!("tags={}", query.filter_tag_ids.join(",")));
    }
    if let Some(tournament) = query.filter_tournament_id.as_deref() {
        filters.push(format!("tournament={tournament}"));
    }
    if query.resolving_soon {
        filters.push("resolving soon".to_string());
    }
    if query.ready_to_resolve {
        filters.push("ready to resolve".to_string());
    }

    if filters.is_empty() {
        "No predictions found.".to_string()
    } else {
        format!("No predictions found with filters: {}.", filters.join(", "))
    }
}

/// Renders a control-plane failure for the assistant.
#[must_use]
pub fn render_error(err: &ControlError) -> String {
    match err {
        ControlError::Validation(message) => format!("Invalid request: {message}"),
        ControlError::NotFound { .. } => err.to_string(),
        ControlError::Upstream(inner) => format!("Failed to reach Fatebook: {inner}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fatebook_store::models::{Forecast, User};
    use serde_json::json;

    fn question_with_forecasts() -> Question {
        serde_json::from_value(json!({
            "id": "abc123",
            "title": "Will the bridge reopen by June?",
            "createdDate": "2024-01-05T09:30:00.000Z",
            "resolveBy": "2024-06-30",
            "resolved": true,
            "resolution": "YES",
            "user": { "name": "Ada" },
            "forecasts": [
                { "forecast": "0.2", "createdAt": "2024-01-05T09:30:00.000Z", "user": { "name": "Ada" } },
                { "forecast": 0.45, "createdAt": "2024-02-11T12:00:00Z", "user": { "name": "Grace" } },
                { "forecast": "0.6", "user": { "name": "Ada" }, "comment": "new info" }
            ]
        }))
        .expect("fixture should decode")
    }

    #[test]
    fn percentages_drop_trailing_zero() {
        assert_eq!(format_percent(0.35), "35%");
        assert_eq!(format_percent(0.355), "35.5%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(0.071), "7.1%");
        assert_eq!(format_percent(-0.0), "0%");
    }

    #[test]
    fn forecast_values_render_numbers_and_pass_through_text() {
        assert_eq!(format_forecast_value(Some(&ForecastValue::Text("0.25".into()))), "25%");
        assert_eq!(format_forecast_value(Some(&ForecastValue::Text("n/a".into()))), "n/a");
        assert_eq!(format_forecast_value(None), "unknown");
    }

    #[test]
    fn timestamps_normalize_known_formats() {
        assert_eq!(
            format_timestamp(Some("2024-01-05T09:30:00.000Z"), "-"),
            "2024-01-05 09:30 UTC"
        );
        assert_eq!(format_timestamp(Some("2024-06-30"), "-"), "2024-06-30");
        assert_eq!(format_timestamp(Some("next week"), "-"), "next week");
        assert_eq!(format_timestamp(None, "Unknown"), "Unknown");
        assert_eq!(format_timestamp(Some("  "), "Unknown"), "Unknown");
    }

    #[test]
    fn details_list_one_line_per_forecast_with_attribution() {
        let question = question_with_forecasts();
        let text = render_question_details(&question);

        assert!(text.contains("Author: Ada"));
        assert!(text.contains("Status: Resolved"));
        assert!(text.contains("Resolution: YES"));
        assert!(text.contains("Forecast history (3 forecasts):"));
        let lines: Vec<&str> = text
            .lines()
            .filter(|line| line.trim_start().starts_with(|c: char| c.is_ascii_digit()))
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("20% by Ada on 2024-01-05 09:30 UTC"));
        assert!(lines[1].contains("45% by Grace"));
        assert!(lines[2].contains("60% by Ada on Unknown date (new info)"));
    }

    #[test]
    fn details_without_forecasts_say_so() {
        let question = Question {
            id: "q".to_string(),
            title: Some("Empty".to_string()),
            ..Question::default()
        };
        let text = render_question_details(&question);
        assert!(text.contains("Status: Open"));
        assert!(text.contains("No forecasts yet."));
        assert!(!text.contains("Resolution:"));
    }

    #[test]
    fn list_shows_latest_forecast_and_author() {
        let question = Question {
            id: "q1".to_string(),
            title: Some("Rain?".to_string()),
            user: Some(User {
                name: Some("Ada".to_string()),
                ..User::default()
            }),
            forecasts: vec![
                Forecast {
                    forecast: Some(ForecastValue::Number(0.1)),
                    ..Forecast::default()
                },
                Forecast {
                    forecast: Some(ForecastValue::Number(0.8)),
                    user: Some(User {
                        name: Some("Grace".to_string()),
                        ..User::default()
                    }),
                    ..Forecast::default()
                },
            ],
            ..Question::default()
        };
        let text = render_question_list(
            &[question],
            ListStyle {
                show_status: true,
                show_details_hint: true,
            },
        );

        assert!(text.starts_with("Found 1 predictions:"));
        assert!(text.contains("1. **Rain?**"));
        assert!(text.contains("Author: Ada"));
        assert!(text.contains("ID: q1"));
        assert!(text.contains("Latest forecast: 80% (by Grace)"));
        assert!(text.contains("Status: Open"));
        assert!(text.contains("Resolves by: No resolution date"));
        assert!(text.contains("get_prediction_details"));
    }

    #[test]
    fn receipt_mentions_percentage_and_comment() {
        let receipt = ForecastReceipt {
            question: question_with_forecasts(),
            probability: 0.35,
            comment: Some("revised estimate".to_string()),
        };
        let text = render_update_receipt(&receipt);
        assert!(text.contains("New forecast: 35%"));
        assert!(text.contains("Comment: revised estimate"));
        assert!(text.contains("**Will the bridge reopen by June?**"));
    }

    #[test]
    fn filter_summary_names_applied_filters() {
        let query = QuestionQuery {
            limit: 20,
            unresolved: Some(true),
            search_string: Some("rain".to_string()),
            ..QuestionQuery::default()
        };
        assert_eq!(
            describe_filters(&query),
            "No predictions found with filters: unresolved, search='rain'."
        );
        assert_eq!(
            describe_filters(&QuestionQuery::new(5)),
            "No predictions found."
        );
    }

    #[test]
    fn errors_render_by_kind() {
        let not_found = ControlError::NotFound {
            question_id: "nope".to_string(),
        };
        assert_eq!(render_error(&not_found), "Question with ID 'nope' not found.");

        let invalid = ControlError::Validation("Probability must be between 0.0 and 1.0, got 2.".into());
        assert!(render_error(&invalid).starts_with("Invalid request:"));

        let upstream = ControlError::Upstream(fatebook_core::client::ClientError::Timeout);
        assert_eq!(render_error(&upstream), "Failed to reach Fatebook: request timed out");
    }
}
