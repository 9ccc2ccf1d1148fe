//! Fuzzy title matching for locating questions from a free-text description.

use fatebook_store::models::Question;

/// A question paired with its similarity score (0-100).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredQuestion {
    pub question: Question,
    pub score: u8,
}

/// Similarity of two strings after normalizing and sorting their tokens.
///
/// Non-ASCII characters are dropped, then both inputs are lowercased, split on
/// non-alphanumeric characters, sorted and rejoined. The score is the indel
/// similarity of the results.
#[must_use]
pub fn token_sort_ratio(left: &str, right: &str) -> u8 {
    let left: Vec<char> = sorted_tokens(left).chars().collect();
    let right: Vec<char> = sorted_tokens(right).chars().collect();
    let total = left.len() + right.len();
    if total == 0 {
        return 100;
    }
    let common = longest_common_subsequence(&left, &right);
    let score = (200 * common + total / 2) / total;
    u8::try_from(score).unwrap_or(100)
}

/// Ranks questions by title similarity and keeps the best `limit` at or above `threshold`.
#[must_use]
pub fn best_matches(
    description: &str,
    questions: Vec<Question>,
    threshold: u8,
    limit: usize,
) -> Vec<ScoredQuestion> {
    let mut matches: Vec<ScoredQuestion> = questions
        .into_iter()
        .filter_map(|question| {
            let score = token_sort_ratio(description, question.title.as_deref().unwrap_or(""));
            (score >= threshold).then_some(ScoredQuestion { question, score })
        })
        .collect();
    matches.sort_by(|left, right| right.score.cmp(&left.score));
    matches.truncate(limit);
    matches
}

fn sorted_tokens(value: &str) -> String {
    let lowered: String = value
        .chars()
        .filter(char::is_ascii)
        .map(|ch| ch.to_ascii_lowercase())
        .collect();
    let mut tokens: Vec<&str> = lowered
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn longest_common_subsequence(left: &[char], right: &[char]) -> usize {
    let mut previous = vec![0usize; right.len() + 1];
    let mut current = vec![0usize; right.len() + 1];
    for &a in left {
        for (j, &b) in right.iter().enumerate() {
            current[j + 1] = if a == b {
                previous[j] + 1
            } else {
                current[j].max(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[right.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, title: &str) -> Question {
        Question {
            id: id.to_string(),
            title: Some(title.to_string()),
            ..Question::default()
        }
    }

    #[test]
    fn token_order_and_case_do_not_matter() {
        assert_eq!(token_sort_ratio("Rain in Paris", "paris IN rain!"), 100);
        assert_eq!(token_sort_ratio("", ""), 100);
        assert_eq!(token_sort_ratio("abc", ""), 0);
    }

    #[test]
    fn non_ascii_characters_are_dropped() {
        assert_eq!(token_sort_ratio("Café résumé", "rsum caf"), 100);
    }

    #[test]
    fn partial_overlap_scores_between_bounds() {
        // "abcd" vs "abce": lcs 3 of 8 chars -> 75
        assert_eq!(token_sort_ratio("abcd", "abce"), 75);
    }

    #[test]
    fn best_matches_filters_sorts_and_truncates() {
        let questions = vec![
            question("q1", "Will it rain in London tomorrow?"),
            question("q2", "Will the election be held in May?"),
            question("q3", "Will it rain in London this week?"),
            question("q4", "Rain in London tomorrow, will it?"),
        ];

        let matches = best_matches("will it rain in london tomorrow", questions, 60, 2);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].score, 100);
        assert!(matches[0].score >= matches[1].score);
        assert!(matches.iter().all(|m| m.question.id != "q2"));
    }
}
