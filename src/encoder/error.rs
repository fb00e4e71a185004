use thiserror::Error;

/// Errors raised while encoding a survey response.
///
/// Any variant aborts the whole encode; partial vectors are never produced.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A choice-like question's answer was not a string.
    #[error("question '{question}': choice answer must be a string")]
    NonStringChoiceAnswer {
        /// Question id.
        question: String,
    },

    /// A choice-like question's answer was not among its declared options.
    #[error("question '{question}': answer '{option}' is not a declared option")]
    UnknownOption {
        /// Question id.
        question: String,
        /// The undeclared answer.
        option: String,
    },

    /// A multi-choice question's answer was not a list.
    #[error("question '{question}': multi-choice answer must be a list")]
    ExpectedAnswerList {
        /// Question id.
        question: String,
    },

    /// A multi-choice selection was not a string.
    #[error("question '{question}': multi-choice selections must be strings")]
    NonStringSelection {
        /// Question id.
        question: String,
    },

    /// The sorted vector could not be serialized.
    #[error("failed to serialize feature vector: {source}")]
    SerializeFailed {
        #[source]
        source: serde_json::Error,
    },
}
