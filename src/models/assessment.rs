use serde::Serialize;
use std::fmt;

/// How the accuracy figure of an assessment was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingSource {
    /// The reply was the requested JSON object.
    Structured,
    /// First `NN%` substring of a free-text reply. Not guaranteed to be the intended rating.
    PercentageHeuristic,
    /// Free-text reply with no percentage in it.
    Unrated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageAssessment {
    pub accuracy: Option<u32>,
    pub analysis: String,
    pub source: RatingSource,
}

impl ImageAssessment {
    pub fn is_heuristic(&self) -> bool {
        self.source == RatingSource::PercentageHeuristic
    }

    pub fn summary(&self) -> String {
        let accuracy = match self.accuracy {
            Some(value) => format!("{}%", value),
            None => "unknown".to_string(),
        };

        let mut summary = format!("Accuracy: {}\nAnalysis: {}", accuracy, self.analysis);
        if self.is_heuristic() {
            summary.push_str("\n(accuracy extracted from free text; verify before trusting)");
        }
        summary
    }
}

impl fmt::Display for RatingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RatingSource::Structured => "structured",
            RatingSource::PercentageHeuristic => "percentage heuristic",
            RatingSource::Unrated => "unrated",
        };
        write!(f, "{}", label)
    }
}
