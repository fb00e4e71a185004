//! Wire shape of an inbound survey response.

use serde::Deserialize;
use serde_json::Value;

/// A survey response document: an ordered list of pages.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyResponse {
    pub pages: Vec<Page>,
}

/// One page of the survey, holding its questions in document order.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub questions: Vec<Question>,
}

/// A single answered (or unanswered) question.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    /// Stable identifier, also the feature name (or its prefix).
    pub id: String,

    /// Declared question type; drives the encoding branch.
    #[serde(rename = "type")]
    pub kind: QuestionKind,

    /// Raw answer payload. Shape depends on `kind`; absent when the
    /// question was skipped.
    #[serde(default)]
    pub answer: Option<Value>,

    /// Declared options for choice-like questions, in document order.
    #[serde(default)]
    pub answers: Vec<String>,
}

/// Question types the encoder understands. Anything else maps to `Other`
/// and encodes as null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum QuestionKind {
    Slider,
    Choice,
    MultiChoiceDropdown,
    MultiChoice,
    Text,
    Other,
}

impl From<String> for QuestionKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "slider" => Self::Slider,
            "choice" => Self::Choice,
            "multi-choice-dropdown" => Self::MultiChoiceDropdown,
            "multi-choice" => Self::MultiChoice,
            "text" => Self::Text,
            _ => Self::Other,
        }
    }
}
