//! End-to-end tests for the JSON to Utf8JsonWriter-code conversion.

use json2csharp::{Converter, ConverterOptions, JsonValue};
use pretty_assertions::assert_eq;

fn body_converter() -> Converter {
    Converter::with_options(ConverterOptions {
        writer_variable_name: "writer".to_string(),
        emit_setup: false,
        emit_flush: false,
    })
}

fn convert_body(json: &str) -> String {
    body_converter().convert(json).unwrap()
}

#[test]
fn null_document_with_default_config() {
    let mut converter = Converter::new();
    let output = converter.convert("null").unwrap();
    assert_eq!(
        output,
        "using var ms = new MemoryStream();\n\
         using var writer = new Utf8JsonWriter(ms);\n\
         \n\
         writer.WriteNullValue();\n\
         \n\
         writer.Flush();\n"
    );
}

#[test]
fn top_level_scalars_emit_a_single_statement() {
    assert_eq!(convert_body("true"), "writer.WriteBooleanValue(true);\n");
    assert_eq!(convert_body("false"), "writer.WriteBooleanValue(false);\n");
    assert_eq!(convert_body("42"), "writer.WriteNumberValue(42);\n");
    assert_eq!(convert_body(r#""hi""#), "writer.WriteStringValue(\"hi\");\n");
}

#[test]
fn empty_string_document_body_is_one_line() {
    assert_eq!(convert_body(r#""""#), "writer.WriteStringValue(\"\");\n");
}

#[test]
fn flat_object_members_in_source_order() {
    assert_eq!(
        convert_body(r#"{"a":1,"b":"x"}"#),
        "writer.WriteStartObject();\n\
         writer.WriteNumber(\"a\", 1);\n\
         writer.WriteString(\"b\", \"x\");\n\
         writer.WriteEndObject();\n"
    );
}

#[test]
fn flat_array_elements_in_source_order() {
    assert_eq!(
        convert_body("[1,2,3]"),
        "writer.WriteStartArray();\n\
         writer.WriteNumberValue(1);\n\
         writer.WriteNumberValue(2);\n\
         writer.WriteNumberValue(3);\n\
         writer.WriteEndArray();\n"
    );
}

#[test]
fn nested_containers_recurse_with_property_name() {
    assert_eq!(
        convert_body(r#"{"a":[1,{"b":true}]}"#),
        "writer.WriteStartObject();\n\
         writer.WritePropertyName(\"a\");\n\
         writer.WriteStartArray();\n\
         writer.WriteNumberValue(1);\n\
         writer.WriteStartObject();\n\
         writer.WriteBoolean(\"b\", true);\n\
         writer.WriteEndObject();\n\
         writer.WriteEndArray();\n\
         writer.WriteEndObject();\n"
    );
}

#[test]
fn member_scalar_kinds_use_named_overloads() {
    assert_eq!(
        convert_body(r#"{"n":null,"s":"v","f":false}"#),
        "writer.WriteStartObject();\n\
         writer.WriteNull(\"n\");\n\
         writer.WriteString(\"s\", \"v\");\n\
         writer.WriteBoolean(\"f\", false);\n\
         writer.WriteEndObject();\n"
    );
}

#[test]
fn duplicate_keys_each_emit_a_statement() {
    let output = convert_body(r#"{"k":1,"k":2}"#);
    assert_eq!(output.matches("WriteNumber(\"k\"").count(), 2);
    assert_eq!(
        output,
        "writer.WriteStartObject();\n\
         writer.WriteNumber(\"k\", 1);\n\
         writer.WriteNumber(\"k\", 2);\n\
         writer.WriteEndObject();\n"
    );
}

#[test]
fn empty_containers_emit_start_and_end_only() {
    assert_eq!(
        convert_body("{}"),
        "writer.WriteStartObject();\nwriter.WriteEndObject();\n"
    );
    assert_eq!(
        convert_body("[]"),
        "writer.WriteStartArray();\nwriter.WriteEndArray();\n"
    );
}

#[test]
fn numbers_keep_their_source_form() {
    assert_eq!(
        convert_body("[1e2, -0.50, 123456789012345678901234567890]"),
        "writer.WriteStartArray();\n\
         writer.WriteNumberValue(1e2);\n\
         writer.WriteNumberValue(-0.50);\n\
         writer.WriteNumberValue(123456789012345678901234567890);\n\
         writer.WriteEndArray();\n"
    );
}

#[test]
fn strings_are_escaped_for_csharp() {
    assert_eq!(
        convert_body(r#"{"path\\to":"say \"hi\"\n"}"#),
        "writer.WriteStartObject();\n\
         writer.WriteString(\"path\\\\to\", \"say \\\"hi\\\"\\n\");\n\
         writer.WriteEndObject();\n"
    );
}

#[test]
fn deep_nesting_closes_every_container() {
    let depth = 40;
    let input = format!("{}{}{}", "[".repeat(depth), "0", "]".repeat(depth));
    let output = convert_body(&input);
    assert_eq!(output.matches("WriteStartArray").count(), depth);
    assert_eq!(output.matches("WriteEndArray").count(), depth);
    assert_eq!(output.matches("WriteNumberValue(0);").count(), 1);
}

#[test]
fn repeated_conversion_is_byte_identical() {
    let input = r#"{"a":[1,{"b":true}],"c":"x"}"#;
    let mut converter = Converter::new();
    let first = converter.convert(input).unwrap();
    let second = converter.convert(input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn converter_reuse_does_not_leak_previous_output() {
    let mut converter = body_converter();
    converter.convert(r#"{"a":1}"#).unwrap();
    assert_eq!(converter.convert("null").unwrap(), "writer.WriteNullValue();\n");
}

#[test]
fn malformed_input_fails_with_parse_error() {
    let mut converter = Converter::new();
    let err = converter.convert("{a:}").unwrap_err();
    assert!(err.input_position.is_some());
}

#[test]
fn setup_only_and_flush_only_configurations() {
    let mut converter = Converter::new();
    converter.options.emit_flush = false;
    assert_eq!(
        converter.convert("1").unwrap(),
        "using var ms = new MemoryStream();\n\
         using var writer = new Utf8JsonWriter(ms);\n\
         \n\
         writer.WriteNumberValue(1);\n"
    );

    converter.options.emit_setup = false;
    converter.options.emit_flush = true;
    assert_eq!(
        converter.convert("1").unwrap(),
        "writer.WriteNumberValue(1);\n\nwriter.Flush();\n"
    );
}

#[test]
fn convert_value_accepts_a_prebuilt_tree() {
    let value = JsonValue::Array(vec![
        JsonValue::Number("7".to_string()),
        JsonValue::String("x".to_string()),
    ]);
    let output = body_converter().convert_value(&value);
    assert_eq!(
        output,
        "writer.WriteStartArray();\n\
         writer.WriteNumberValue(7);\n\
         writer.WriteStringValue(\"x\");\n\
         writer.WriteEndArray();\n"
    );
}

#[test]
fn convert_serde_follows_the_same_mapping() {
    let parsed: serde_json::Value = serde_json::from_str(r#"{"a":1,"b":[null]}"#).unwrap();
    let output = body_converter().convert_serde(&parsed).unwrap();
    assert_eq!(
        output,
        "writer.WriteStartObject();\n\
         writer.WriteNumber(\"a\", 1);\n\
         writer.WritePropertyName(\"b\");\n\
         writer.WriteStartArray();\n\
         writer.WriteNullValue();\n\
         writer.WriteEndArray();\n\
         writer.WriteEndObject();\n"
    );
}
