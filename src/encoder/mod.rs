//! Deterministic feature-vector encoder.
//!
//! Turns a survey response plus a [`FeatureSchema`](crate::schema::FeatureSchema)
//! into a flat numeric vector with a reproducible order: entries are named,
//! sorted by name, then serialized as the values only. Document order never
//! leaks into the output.

pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::EncodeError;
pub use types::{Page, Question, QuestionKind, SurveyResponse};

use std::collections::HashSet;

use serde_json::Value;

use crate::schema::FeatureSchema;

/// Encodes `response` against `schema` into the serialized feature vector:
/// a JSON array of the entry values in sorted-by-name order.
pub fn encode(response: &SurveyResponse, schema: &FeatureSchema) -> Result<String, EncodeError> {
    let entries = build_entries(response, schema)?;

    let values: Vec<&Value> = entries.iter().map(|(_, value)| value).collect();
    serde_json::to_string(&values).map_err(|e| EncodeError::SerializeFailed { source: e })
}

/// Builds the named feature entries, sorted by name.
///
/// Names exist purely to establish the canonical order: one bare entry per
/// schema key, except multi-choice questions which expand into one
/// `"<id>:<option>"` entry per declared option. Schema keys never seen in
/// the response contribute a single null entry. The sort is stable, so a
/// question id appearing twice keeps its document order among equals.
pub fn build_entries(
    response: &SurveyResponse,
    schema: &FeatureSchema,
) -> Result<Vec<(String, Value)>, EncodeError> {
    let mut entries: Vec<(String, Value)> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for page in &response.pages {
        for question in &page.questions {
            if !schema.contains(&question.id) {
                continue;
            }

            seen.insert(question.id.as_str());

            let Some(answer) = &question.answer else {
                entries.push((question.id.clone(), Value::Null));
                continue;
            };

            match question.kind {
                QuestionKind::Slider => {
                    entries.push((question.id.clone(), answer.clone()));
                }
                QuestionKind::Choice | QuestionKind::MultiChoiceDropdown => {
                    let index = option_index(question, answer)?;
                    entries.push((question.id.clone(), Value::from(index as u64)));
                }
                QuestionKind::MultiChoice => {
                    let selected = selected_options(question, answer)?;
                    for option in &question.answers {
                        let name = format!("{}:{}", question.id, option);
                        let hit = selected.contains(option.as_str());
                        entries.push((name, Value::from(if hit { 1.0 } else { 0.0 })));
                    }
                }
                QuestionKind::Text => {
                    // Pass-through: not guaranteed numeric.
                    entries.push((question.id.clone(), answer.clone()));
                }
                QuestionKind::Other => {
                    entries.push((question.id.clone(), Value::Null));
                }
            }
        }
    }

    for id in schema.question_ids() {
        if !seen.contains(id) {
            entries.push((id.to_string(), Value::Null));
        }
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(entries)
}

/// Zero-based index of a choice answer within the question's declared
/// option list.
fn option_index(question: &Question, answer: &Value) -> Result<usize, EncodeError> {
    let selected = answer
        .as_str()
        .ok_or_else(|| EncodeError::NonStringChoiceAnswer {
            question: question.id.clone(),
        })?;

    question
        .answers
        .iter()
        .position(|option| option == selected)
        .ok_or_else(|| EncodeError::UnknownOption {
            question: question.id.clone(),
            option: selected.to_string(),
        })
}

/// The set of options picked by a multi-choice answer.
fn selected_options<'a>(
    question: &Question,
    answer: &'a Value,
) -> Result<HashSet<&'a str>, EncodeError> {
    let Value::Array(items) = answer else {
        return Err(EncodeError::ExpectedAnswerList {
            question: question.id.clone(),
        });
    };

    let mut selected = HashSet::with_capacity(items.len());
    for item in items {
        let option = item.as_str().ok_or_else(|| EncodeError::NonStringSelection {
            question: question.id.clone(),
        })?;
        selected.insert(option);
    }

    Ok(selected)
}
