//! Feature schema: per-question type metadata that drives encoding.
//!
//! The schema lives in a key-value store as a tab-separated table with
//! columns `question_id`, `type_tag`, `categorical_count` (last column
//! optional). It is fetched fresh for every request, polling until the key
//! exists.

pub mod error;
pub mod mock;
pub mod source;


pub use error::SchemaError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSchemaSource;
pub use source::{RedisSchemaSource, SchemaSource, poll_schema_bytes};

use std::collections::HashMap;

/// Declared type of a feature in the schema.
///
/// Advisory metadata: encoding branches on the question's own declared type,
/// not on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    Numerical,
    Categorical,
    Text,
    /// Any tag this service does not recognize.
    Unknown,
}

impl FeatureType {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "numerical" => Self::Numerical,
            "categorical" => Self::Categorical,
            "text" => Self::Text,
            _ => Self::Unknown,
        }
    }
}

/// One schema row: the feature's type tag and, for categorical features,
/// its declared cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureEntry {
    pub feature_type: FeatureType,
    /// Declared option count. Not validated against the survey document's
    /// actual option list.
    pub categorical_count: Option<u32>,
}

/// Immutable mapping from question id to feature metadata.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    entries: HashMap<String, FeatureEntry>,
}

impl FeatureSchema {
    /// Parses the tab-separated wire form.
    ///
    /// Rows need at least `question_id` and `type_tag`; a third column is
    /// parsed as the categorical count when it is a valid integer and
    /// ignored otherwise. Blank lines are skipped. Duplicate ids keep the
    /// last row seen.
    pub fn parse(bytes: &[u8]) -> Result<Self, SchemaError> {
        let text = std::str::from_utf8(bytes).map_err(|e| SchemaError::InvalidUtf8 { source: e })?;

        let mut entries = HashMap::new();

        for (i, line) in text.lines().enumerate() {
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split('\t');
            let id = fields.next().filter(|f| !f.is_empty());
            let tag = fields.next();

            let (Some(id), Some(tag)) = (id, tag) else {
                return Err(SchemaError::MalformedRow { line: i + 1 });
            };

            let categorical_count = fields.next().and_then(|f| f.trim().parse().ok());

            entries.insert(
                id.to_string(),
                FeatureEntry {
                    feature_type: FeatureType::from_tag(tag),
                    categorical_count,
                },
            );
        }

        if entries.is_empty() {
            return Err(SchemaError::Empty);
        }

        Ok(Self { entries })
    }

    /// Returns `true` if the schema declares `question_id`.
    pub fn contains(&self, question_id: &str) -> bool {
        self.entries.contains_key(question_id)
    }

    /// Looks up the metadata for `question_id`.
    pub fn get(&self, question_id: &str) -> Option<&FeatureEntry> {
        self.entries.get(question_id)
    }

    /// Iterates over all declared question ids.
    pub fn question_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of declared features.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a parsed schema; present for completeness.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
