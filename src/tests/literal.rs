use super::parse_literal;
use serde_json::json;

#[test]
fn test_bare_keys_and_single_quotes() {
    let (value, _) = parse_literal("[{ id: 'intro', title: 'Introduction' }]").unwrap();
    assert_eq!(value, json!([{"id": "intro", "title": "Introduction"}]));
}

#[test]
fn test_compact_object_without_spaces() {
    let (value, _) = parse_literal(r#"[{id:"a",title:"A"}]"#).unwrap();
    assert_eq!(value, json!([{"id": "a", "title": "A"}]));
}

#[test]
fn test_trailing_commas_and_comments() {
    let src = "[\n  // first\n  { id: 'a', title: 'A', },\n  /* second */ { id: 'b', title: \"B\" },\n]";
    let (value, _) = parse_literal(src).unwrap();
    assert_eq!(
        value,
        json!([{"id": "a", "title": "A"}, {"id": "b", "title": "B"}])
    );
}

#[test]
fn test_consumed_length_stops_after_literal() {
    let src = "[1, 2]\n\n# Heading";
    let (value, consumed) = parse_literal(src).unwrap();
    assert_eq!(value, json!([1, 2]));
    assert_eq!(&src[..consumed], "[1, 2]");
}

#[test]
fn test_scalars() {
    let (value, _) =
        parse_literal("{ a: true, b: false, c: null, d: undefined, e: -1.5, f: 10 }").unwrap();
    assert_eq!(
        value,
        json!({"a": true, "b": false, "c": null, "d": null, "e": -1.5, "f": 10})
    );
}

#[test]
fn test_escapes_and_template_strings() {
    let (value, _) = parse_literal(r"['it\'s', `multi`, 'café']").unwrap();
    assert_eq!(value, json!(["it's", "multi", "café"]));
}

#[test]
fn test_rejects_interpolation() {
    let err = parse_literal("[`hello ${name}`]").unwrap_err();
    assert!(err.message.contains("interpolation"), "{err}");
}

#[test]
fn test_rejects_function_call() {
    let err = parse_literal("buildSections()").unwrap_err();
    assert_eq!(err.offset, 0);
    assert!(err.message.contains("buildSections"));
}

#[test]
fn test_rejects_unterminated_array() {
    assert!(parse_literal("[{ id: 'a' }").is_err());
}

#[test]
fn test_rejects_unterminated_string() {
    let err = parse_literal("['abc").unwrap_err();
    assert!(err.message.contains("unterminated"));
}
