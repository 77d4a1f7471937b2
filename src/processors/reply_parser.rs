use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::models::{ImageAssessment, RatingSource};

#[derive(Debug, Deserialize)]
struct StructuredReply {
    rating: RatingValue,
    reason: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RatingValue {
    Integer(u64),
    Float(f64),
    Text(String),
}

impl RatingValue {
    fn as_percent(&self) -> Option<u32> {
        match self {
            RatingValue::Integer(value) => u32::try_from(*value).ok(),
            RatingValue::Float(value) if value.is_finite() && *value >= 0.0 => {
                Some(value.trunc() as u32)
            }
            RatingValue::Float(_) => None,
            RatingValue::Text(text) => text.trim().trim_end_matches('%').trim().parse().ok(),
        }
    }
}

fn percentage_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)%").expect("percentage pattern is valid"))
}

/// Drop a surrounding markdown code fence such as ```` ```json ... ``` ````.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    match body.find('\n') {
        Some(newline) if !body[..newline].contains('{') => body[newline + 1..].trim(),
        _ => body.trim(),
    }
}

fn parse_structured(text: &str) -> Option<ImageAssessment> {
    let reply: StructuredReply = serde_json::from_str(strip_code_fence(text)).ok()?;
    let accuracy = reply.rating.as_percent()?;

    Some(ImageAssessment {
        accuracy: Some(accuracy),
        analysis: reply.reason,
        source: RatingSource::Structured,
    })
}

/// Turn a model reply into an assessment.
///
/// The `{"rating", "reason"}` object is tried first. Only when that fails is
/// the first `NN%` in the raw text taken as the rating, and the result is
/// marked as a heuristic.
pub fn parse_reply(text: &str) -> ImageAssessment {
    if let Some(assessment) = parse_structured(text) {
        debug!(accuracy = ?assessment.accuracy, "Parsed structured reply");
        return assessment;
    }

    let accuracy = percentage_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok());

    let source = match accuracy {
        Some(value) => {
            warn!(accuracy = value, "Reply was not structured; using first percentage in text");
            RatingSource::PercentageHeuristic
        }
        None => {
            warn!("Reply was not structured and contains no percentage");
            RatingSource::Unrated
        }
    };

    ImageAssessment {
        accuracy,
        analysis: text.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_percentage_fallback() {
        let assessment = parse_reply("Rating is 82% good");

        assert_eq!(assessment.accuracy, Some(82));
        assert_eq!(assessment.analysis, "Rating is 82% good");
        assert_eq!(assessment.source, RatingSource::PercentageHeuristic);
    }

    #[test]
    fn test_structured_reply() {
        let assessment =
            parse_reply(r#"{"rating": 90, "reason": "The image shows a pothole. Also 10% of it is shaded."}"#);

        assert_eq!(
            assessment,
            ImageAssessment {
                accuracy: Some(90),
                analysis: "The image shows a pothole. Also 10% of it is shaded.".to_string(),
                source: RatingSource::Structured,
            }
        );
    }

    #[test]
    fn test_structured_rating_variants() {
        assert_eq!(parse_reply(r#"{"rating": "75%", "reason": "ok"}"#).accuracy, Some(75));
        assert_eq!(parse_reply(r#"{"rating": 66.9, "reason": "ok"}"#).accuracy, Some(66));
        assert_eq!(
            parse_reply(r#"{"rating": "40", "reason": "ok"}"#).source,
            RatingSource::Structured
        );
    }

    #[test]
    fn test_fenced_json_reply() {
        let reply = "```json\n{\"rating\": 55, \"reason\": \"Partly matches.\"}\n```";
        let assessment = parse_reply(reply);

        assert_eq!(assessment.accuracy, Some(55));
        assert_eq!(assessment.analysis, "Partly matches.");
        assert_eq!(assessment.source, RatingSource::Structured);
    }

    #[test]
    fn test_unusable_rating_falls_back() {
        let reply = r#"{"rating": "high", "reason": "about 70% sure"}"#;
        let assessment = parse_reply(reply);

        assert_eq!(assessment.accuracy, Some(70));
        assert_eq!(assessment.analysis, reply);
        assert!(assessment.is_heuristic());
    }

    #[test]
    fn test_no_percentage() {
        let assessment = parse_reply("I cannot tell.");

        assert_eq!(assessment.accuracy, None);
        assert_eq!(assessment.source, RatingSource::Unrated);
    }

    #[test]
    fn test_first_percentage_wins() {
        assert_eq!(parse_reply("between 30% and 60%").accuracy, Some(30));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  plain  "), "plain");
    }
}
