use super::*;
use std::io::Write;

fn three_college_index() -> CollegeIndex {
    CollegeIndex::from_table("Alpha\t123\nBeta\t456\nGamma\t789")
}

#[test]
fn test_from_table_takes_first_column() {
    let index = three_college_index();

    assert_eq!(index.len(), 3);
    assert_eq!(index.get(0), Some("Alpha"));
    assert_eq!(index.get(2), Some("Gamma"));
    assert_eq!(index.get(3), None);
}

#[test]
fn test_blank_line_consumes_a_slot() {
    let index = CollegeIndex::from_table("Alpha\n\nGamma");

    assert_eq!(index.len(), 3);
    assert_eq!(index.get(1), Some(""));
    assert_eq!(index.get(2), Some("Gamma"));
}

#[test]
fn test_trailing_newline_consumes_a_slot() {
    let index = CollegeIndex::from_table("Alpha\nBeta\n");

    assert_eq!(index.len(), 3);
    assert_eq!(index.get(2), Some(""));
}

#[test]
fn test_resolve_orders_by_input_rank() {
    let index = three_college_index();

    let resolved = index.resolve("2,0,1").expect("should resolve");
    assert_eq!(
        resolved,
        vec![
            RankedCollege {
                ranking: 1,
                name: "Gamma".to_string()
            },
            RankedCollege {
                ranking: 2,
                name: "Alpha".to_string()
            },
            RankedCollege {
                ranking: 3,
                name: "Beta".to_string()
            },
        ]
    );
}

#[test]
fn test_resolve_trims_reply_whitespace() {
    let index = three_college_index();

    let resolved = index.resolve("  1, 2 \n").expect("should resolve");
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0].name, "Beta");
    assert_eq!(resolved[1].name, "Gamma");
}

#[test]
fn test_resolve_out_of_range_fails_whole_response() {
    let index = three_college_index();

    let err = index.resolve("0,5,1").unwrap_err();
    assert!(matches!(
        err,
        CollegesError::IndexOutOfRange { index: 5, len: 3 }
    ));
}

#[test]
fn test_resolve_unparsable_token_fails_whole_response() {
    let index = three_college_index();

    let err = index.resolve("0,Gamma").unwrap_err();
    assert!(matches!(err, CollegesError::UnparsableIndex { .. }));
}

#[test]
fn test_resolve_empty_reply_fails() {
    let index = three_college_index();

    let err = index.resolve("").unwrap_err();
    assert!(matches!(err, CollegesError::UnparsableIndex { .. }));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(file, "Alpha\t1\nBeta\t2").expect("write");

    let index = CollegeIndex::load(file.path()).expect("should load");
    assert_eq!(index.len(), 2);
    assert_eq!(index.get(1), Some("Beta"));
}

#[test]
fn test_load_missing_file_fails() {
    let result = CollegeIndex::load(std::path::Path::new("/nonexistent/colleges.csv"));
    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        CollegesError::ReadFailed { .. }
    ));
}

#[test]
fn test_envelope_serialization() {
    let envelope = ResponseEnvelope {
        colleges: vec![RankedCollege {
            ranking: 1,
            name: "Alpha".to_string(),
        }],
    };

    let json = serde_json::to_string(&envelope).expect("serialize");
    assert_eq!(json, r#"{"colleges":[{"ranking":1,"name":"Alpha"}]}"#);

    let empty = serde_json::to_string(&ResponseEnvelope::empty()).expect("serialize");
    assert_eq!(empty, r#"{"colleges":[]}"#);
}
