use orthovar::aggregate::VariantAggregator;
use orthovar::config::{AggregatorConfig, ValidationMode};
use orthovar::corpus::EditMap;
use orthovar::error::OrthovarError;
use orthovar::spelling::levenshtein::compute_edit_operations;
use orthovar::spelling::operation::EditOperation;
use orthovar::spelling::template::{apply_operations, build_template};
use orthovar::spelling::variant::Variant;

const EDITS: &str = r#"{
    "cat": {"cot": [["replace", 7, 1]]},
    "sing": {"sign": [["transpose", 2, 3]]}
}"#;

fn aggregator(validation: ValidationMode) -> VariantAggregator {
    VariantAggregator::new(AggregatorConfig {
        validation,
        ..Default::default()
    })
}

#[test]
fn test_wire_format_is_command_and_two_indices() {
    let map = EditMap::from_json_str(EDITS).unwrap();

    assert_eq!(
        map.get("cat", "cot"),
        Some(&[EditOperation::Replace { index: 7, target: 1 }][..])
    );
    // Transpositions are accepted with their indices in either order.
    assert_eq!(
        map.get("sing", "sign"),
        Some(&[EditOperation::Transpose { first: 2, second: 3 }][..])
    );

    let json = map.to_json().unwrap();
    assert!(json.contains(r#"["replace",7,1]"#));
    assert!(json.contains(r#"["transpose",3,2]"#));
}

#[test]
fn test_insert_names_the_preceding_source_character() {
    let map = EditMap::from_json_str(r#"{"color":{"colour":[["insert",3,4]]}}"#).unwrap();
    let ops = map.get("color", "colour").unwrap();
    assert_eq!(ops, &[EditOperation::Insert { at: 4, target: 4 }][..]);
    assert_eq!(ops, compute_edit_operations("color", "colour").as_slice());
    assert_eq!(apply_operations("color", "colour", ops).unwrap(), "colour");

    let mut written = EditMap::new();
    written.insert("color", "colour", compute_edit_operations("color", "colour"));
    assert_eq!(
        written.to_json().unwrap(),
        r#"{"color":{"colour":[["insert",3,4]]}}"#
    );
}

#[test]
fn test_insertions_inside_a_span_classify() {
    let map = EditMap::from_json_str(
        r#"{"nite":{"night":[["insert",1,2],["replace",2,3],["replace",3,4]]}}"#,
    )
    .unwrap();
    let ops = map.get("nite", "night").unwrap();
    assert_eq!(apply_operations("nite", "night", ops).unwrap(), "night");

    let classification = build_template(ops, "nite", "night").unwrap().unwrap();
    assert_eq!(classification.mask, "IRR");
    assert_eq!(classification.variant, Variant::new("te", "ght"));
}

#[test]
fn test_insert_before_the_first_character() {
    let ops = compute_edit_operations("lease", "please");
    assert_eq!(ops, vec![EditOperation::Insert { at: 0, target: 0 }]);

    let mut map = EditMap::new();
    map.insert("lease", "please", ops);
    let json = map.to_json().unwrap();
    assert_eq!(json, r#"{"lease":{"please":[["insert",-1,0]]}}"#);

    let parsed = EditMap::from_json_str(&json).unwrap();
    let ops = parsed.get("lease", "please").unwrap();
    assert_eq!(apply_operations("lease", "please", ops).unwrap(), "please");
}

#[test]
fn test_unknown_command_is_rejected() {
    let result = EditMap::from_json_str(r#"{"cat": {"cot": [["swap", 1, 1]]}}"#);
    assert!(matches!(result, Err(OrthovarError::Json(_))));
}

#[test]
fn test_best_effort_skips_malformed_records() {
    let map = EditMap::from_json_str(EDITS).unwrap();
    let aggregation = aggregator(ValidationMode::BestEffort).aggregate(&map).unwrap();

    assert_eq!(aggregation.stats.pairs, 2);
    assert_eq!(aggregation.stats.malformed, 1);
    assert_eq!(aggregation.stats.classified, 1);
    assert_eq!(aggregation.registry.count(&Variant::new("ng", "gn")), 1);
    assert_eq!(aggregation.registry.count(&Variant::new("a", "o")), 0);
}

#[test]
fn test_strict_mode_aborts_on_malformed_records() {
    let map = EditMap::from_json_str(EDITS).unwrap();
    let error = aggregator(ValidationMode::Strict).aggregate(&map).unwrap_err();

    assert!(error.is_malformed_operation());
    let message = error.to_string();
    assert!(message.contains("cat"));
    assert!(message.contains("cot"));
}

#[test]
fn test_writeout_lines_follow_source_order() {
    let map = EditMap::from_json_str(EDITS).unwrap();
    let mut buffer = Vec::new();
    map.write_lines(&mut buffer).unwrap();

    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            r#"cat : {"cot":[["replace",7,1]]}"#,
            r#"sing : {"sign":[["transpose",3,2]]}"#,
        ]
    );
}
