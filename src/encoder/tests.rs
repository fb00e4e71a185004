use super::*;
use crate::schema::FeatureSchema;
use serde_json::{Value, json};

fn schema_of(rows: &[&str]) -> FeatureSchema {
    let table = rows
        .iter()
        .map(|id| format!("{id}\tnumerical"))
        .collect::<Vec<_>>()
        .join("\n");
    FeatureSchema::parse(table.as_bytes()).expect("test schema should parse")
}

fn response_of(value: Value) -> SurveyResponse {
    serde_json::from_value(value).expect("test response should deserialize")
}

#[test]
fn test_slider_emits_raw_answer() {
    let schema = schema_of(&["q_gpa"]);
    let response = response_of(json!({
        "pages": [{"questions": [{"id": "q_gpa", "type": "slider", "answer": 7}]}]
    }));

    let encoded = encode(&response, &schema).expect("should encode");
    assert_eq!(encoded, "[7]");
}

#[test]
fn test_missing_answer_emits_null() {
    let schema = schema_of(&["q_gpa"]);
    let response = response_of(json!({
        "pages": [{"questions": [{"id": "q_gpa", "type": "slider"}]}]
    }));

    let encoded = encode(&response, &schema).expect("should encode");
    assert_eq!(encoded, "[null]");
}

#[test]
fn test_choice_emits_zero_based_option_index() {
    let schema = schema_of(&["q_state"]);
    let response = response_of(json!({
        "pages": [{"questions": [{
            "id": "q_state",
            "type": "choice",
            "answer": "WA",
            "answers": ["CA", "OR", "WA"]
        }]}]
    }));

    let encoded = encode(&response, &schema).expect("should encode");
    assert_eq!(encoded, "[2]");
}

#[test]
fn test_dropdown_uses_choice_branch() {
    let schema = schema_of(&["q_degree"]);
    let response = response_of(json!({
        "pages": [{"questions": [{
            "id": "q_degree",
            "type": "multi-choice-dropdown",
            "answer": "BS",
            "answers": ["BA", "BS"]
        }]}]
    }));

    let encoded = encode(&response, &schema).expect("should encode");
    assert_eq!(encoded, "[1]");
}

#[test]
fn test_choice_answer_outside_options_aborts() {
    let schema = schema_of(&["q_state"]);
    let response = response_of(json!({
        "pages": [{"questions": [{
            "id": "q_state",
            "type": "choice",
            "answer": "TX",
            "answers": ["CA", "OR", "WA"]
        }]}]
    }));

    let err = encode(&response, &schema).unwrap_err();
    assert!(matches!(err, EncodeError::UnknownOption { .. }));
}

#[test]
fn test_multi_choice_expands_every_option() {
    let schema = schema_of(&["q_sports"]);
    let response = response_of(json!({
        "pages": [{"questions": [{
            "id": "q_sports",
            "type": "multi-choice",
            "answer": ["A", "C"],
            "answers": ["A", "B", "C"]
        }]}]
    }));

    let entries = build_entries(&response, &schema).expect("should encode");
    assert_eq!(
        entries,
        vec![
            ("q_sports:A".to_string(), json!(1.0)),
            ("q_sports:B".to_string(), json!(0.0)),
            ("q_sports:C".to_string(), json!(1.0)),
        ]
    );
}

#[test]
fn test_multi_choice_non_list_answer_aborts() {
    let schema = schema_of(&["q_sports"]);
    let response = response_of(json!({
        "pages": [{"questions": [{
            "id": "q_sports",
            "type": "multi-choice",
            "answer": "A",
            "answers": ["A", "B"]
        }]}]
    }));

    let err = encode(&response, &schema).unwrap_err();
    assert!(matches!(err, EncodeError::ExpectedAnswerList { .. }));
}

#[test]
fn test_text_answer_passes_through() {
    let schema = schema_of(&["q_essay"]);
    let response = response_of(json!({
        "pages": [{"questions": [{"id": "q_essay", "type": "text", "answer": "hello"}]}]
    }));

    let encoded = encode(&response, &schema).expect("should encode");
    assert_eq!(encoded, "[\"hello\"]");
}

#[test]
fn test_unrecognized_type_emits_null() {
    let schema = schema_of(&["q_rating"]);
    let response = response_of(json!({
        "pages": [{"questions": [{"id": "q_rating", "type": "matrix", "answer": 3}]}]
    }));

    let encoded = encode(&response, &schema).expect("should encode");
    assert_eq!(encoded, "[null]");
}

#[test]
fn test_question_absent_from_schema_is_skipped() {
    let schema = schema_of(&["q_gpa"]);
    let response = response_of(json!({
        "pages": [{"questions": [
            {"id": "q_gpa", "type": "slider", "answer": 3},
            {"id": "q_unlisted", "type": "slider", "answer": 9}
        ]}]
    }));

    let encoded = encode(&response, &schema).expect("should encode");
    assert_eq!(encoded, "[3]");
}

#[test]
fn test_unseen_schema_key_emits_single_null() {
    let schema = schema_of(&["q_gpa", "q_never_asked"]);
    let response = response_of(json!({
        "pages": [{"questions": [{"id": "q_gpa", "type": "slider", "answer": 3}]}]
    }));

    let entries = build_entries(&response, &schema).expect("should encode");
    assert_eq!(
        entries,
        vec![
            ("q_gpa".to_string(), json!(3)),
            ("q_never_asked".to_string(), Value::Null),
        ]
    );
}

#[test]
fn test_output_sorted_by_name_not_document_order() {
    let schema = schema_of(&["q_z", "q_a", "q_m"]);
    let response = response_of(json!({
        "pages": [{"questions": [
            {"id": "q_z", "type": "slider", "answer": 1},
            {"id": "q_a", "type": "slider", "answer": 2},
            {"id": "q_m", "type": "slider", "answer": 3}
        ]}]
    }));

    let encoded = encode(&response, &schema).expect("should encode");
    assert_eq!(encoded, "[2,3,1]");
}

#[test]
fn test_page_permutation_does_not_change_output() {
    let schema = schema_of(&["q_a", "q_b", "q_c"]);

    let forward = response_of(json!({
        "pages": [
            {"questions": [{"id": "q_a", "type": "slider", "answer": 1}]},
            {"questions": [
                {"id": "q_b", "type": "slider", "answer": 2},
                {"id": "q_c", "type": "slider", "answer": 3}
            ]}
        ]
    }));
    let shuffled = response_of(json!({
        "pages": [
            {"questions": [
                {"id": "q_c", "type": "slider", "answer": 3},
                {"id": "q_b", "type": "slider", "answer": 2}
            ]},
            {"questions": [{"id": "q_a", "type": "slider", "answer": 1}]}
        ]
    }));

    let a = encode(&forward, &schema).expect("should encode");
    let b = encode(&shuffled, &schema).expect("should encode");
    assert_eq!(a, b);
}

#[test]
fn test_encoding_is_idempotent() {
    let schema = schema_of(&["q_sports", "q_gpa"]);
    let response = response_of(json!({
        "pages": [{"questions": [
            {"id": "q_gpa", "type": "slider", "answer": 4},
            {
                "id": "q_sports",
                "type": "multi-choice",
                "answer": ["B"],
                "answers": ["A", "B"]
            }
        ]}]
    }));

    let first = encode(&response, &schema).expect("should encode");
    let second = encode(&response, &schema).expect("should encode");
    assert_eq!(first, second);
}

#[test]
fn test_composite_names_sort_with_bare_names() {
    let schema = schema_of(&["q_sports", "q_sports_extra"]);
    let response = response_of(json!({
        "pages": [{"questions": [
            {"id": "q_sports_extra", "type": "slider", "answer": 5},
            {
                "id": "q_sports",
                "type": "multi-choice",
                "answer": ["A"],
                "answers": ["A", "B"]
            }
        ]}]
    }));

    let entries = build_entries(&response, &schema).expect("should encode");
    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    // ':' (0x3a) sorts before '_' (0x5f), so the expanded entries come first.
    assert_eq!(names, vec!["q_sports:A", "q_sports:B", "q_sports_extra"]);
}

#[test]
fn test_duplicate_question_id_emits_one_entry_per_occurrence() {
    let schema = schema_of(&["q_gpa"]);
    let response = response_of(json!({
        "pages": [{"questions": [
            {"id": "q_gpa", "type": "slider", "answer": 1},
            {"id": "q_gpa", "type": "slider", "answer": 2}
        ]}]
    }));

    let encoded = encode(&response, &schema).expect("should encode");
    assert_eq!(encoded, "[1,2]");
}
