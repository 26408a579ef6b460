use serde::Serialize;

use crate::buffer::CodeBuffer;
use crate::error::ParseError;
use crate::model::{JsonMember, JsonValue};
use crate::options::ConverterOptions;
use crate::parser::parse_document;

/// Depth cap for the serde interop path. JSON parsed from text is acyclic
/// by construction; values built in memory get this guard instead.
const SERDE_RECURSION_LIMIT: usize = 512;

/// Converts a JSON document to C# code that rebuilds it through
/// `System.Text.Json.Utf8JsonWriter`.
///
/// The conversion is a depth-first walk over the value tree: each value
/// kind maps to one writer statement, containers open and close with
/// start/end statements, and object members use the named `Write*`
/// overloads. The output buffer is cleared at the start of every call, so
/// one converter can be reused indefinitely; only [`Converter::options`]
/// persists between calls.
pub struct Converter {
    pub options: ConverterOptions,
    buffer: CodeBuffer,
}

impl Converter {
    pub fn new() -> Self {
        Self::with_options(ConverterOptions::default())
    }

    pub fn with_options(options: ConverterOptions) -> Self {
        Self {
            options,
            buffer: CodeBuffer::default(),
        }
    }

    /// Parses `json` and converts it, failing with [`ParseError`] on
    /// malformed input. Nothing is observable from a failed call: the
    /// buffer is only touched once parsing has succeeded.
    pub fn convert(&mut self, json: &str) -> Result<String, ParseError> {
        let value = parse_document(json)?;
        Ok(self.convert_value(&value))
    }

    /// Converts an already-parsed value. Cannot fail.
    pub fn convert_value(&mut self, value: &JsonValue) -> String {
        self.buffer.clear();
        self.append_setup();
        self.convert_element(value);
        self.append_flush();
        self.buffer.as_string()
    }

    /// Converts a `serde_json::Value` tree.
    pub fn convert_serde(&mut self, value: &serde_json::Value) -> Result<String, ParseError> {
        let value = JsonValue::from_serde(value, SERDE_RECURSION_LIMIT)?;
        Ok(self.convert_value(&value))
    }

    /// Converts any serializable Rust value via its JSON representation.
    pub fn convert_serialize<T: Serialize>(&mut self, value: &T) -> Result<String, ParseError> {
        let parsed = serde_json::to_value(value)
            .map_err(|e| ParseError::simple(format!("Cannot represent value as JSON: {}", e)))?;
        self.convert_serde(&parsed)
    }

    fn append_setup(&mut self) {
        if self.options.emit_setup {
            self.buffer
                .push_line("using var ms = new MemoryStream();")
                .push_line(format!(
                    "using var {} = new Utf8JsonWriter(ms);",
                    self.options.writer_variable_name
                ))
                .blank_line();
        }
    }

    fn append_flush(&mut self) {
        if self.options.emit_flush {
            self.buffer
                .blank_line()
                .push_line(format!("{}.Flush();", self.options.writer_variable_name));
        }
    }

    /// Emits a value in top-level or array-element position, where the
    /// unnamed writer overloads apply.
    fn convert_element(&mut self, value: &JsonValue) {
        let writer = self.options.writer_variable_name.clone();
        match value {
            JsonValue::Null => {
                self.buffer.push_line(format!("{}.WriteNullValue();", writer));
            }
            JsonValue::Bool(val) => {
                self.buffer
                    .push_line(format!("{}.WriteBooleanValue({});", writer, val));
            }
            JsonValue::Number(raw) => {
                self.buffer
                    .push_line(format!("{}.WriteNumberValue({});", writer, raw));
            }
            JsonValue::String(text) => {
                self.buffer.push_line(format!(
                    "{}.WriteStringValue({});",
                    writer,
                    cs_string_literal(text)
                ));
            }
            JsonValue::Object(members) => self.convert_object(members),
            JsonValue::Array(elements) => self.convert_array(elements),
        }
    }

    /// Emits one object member using the named writer overloads. Container
    /// values get a `WritePropertyName` statement followed by the container
    /// itself.
    fn convert_member(&mut self, member: &JsonMember) {
        let writer = self.options.writer_variable_name.clone();
        let name = cs_string_literal(&member.name);
        match &member.value {
            JsonValue::Null => {
                self.buffer
                    .push_line(format!("{}.WriteNull({});", writer, name));
            }
            JsonValue::Bool(val) => {
                self.buffer
                    .push_line(format!("{}.WriteBoolean({}, {});", writer, name, val));
            }
            JsonValue::Number(raw) => {
                self.buffer
                    .push_line(format!("{}.WriteNumber({}, {});", writer, name, raw));
            }
            JsonValue::String(text) => {
                self.buffer.push_line(format!(
                    "{}.WriteString({}, {});",
                    writer,
                    name,
                    cs_string_literal(text)
                ));
            }
            JsonValue::Object(members) => {
                self.buffer
                    .push_line(format!("{}.WritePropertyName({});", writer, name));
                self.convert_object(members);
            }
            JsonValue::Array(elements) => {
                self.buffer
                    .push_line(format!("{}.WritePropertyName({});", writer, name));
                self.convert_array(elements);
            }
        }
    }

    fn convert_object(&mut self, members: &[JsonMember]) {
        let writer = self.options.writer_variable_name.clone();
        self.buffer
            .push_line(format!("{}.WriteStartObject();", writer));
        for member in members {
            self.convert_member(member);
        }
        self.buffer.push_line(format!("{}.WriteEndObject();", writer));
    }

    fn convert_array(&mut self, elements: &[JsonValue]) {
        let writer = self.options.writer_variable_name.clone();
        self.buffer
            .push_line(format!("{}.WriteStartArray();", writer));
        for element in elements {
            self.convert_element(element);
        }
        self.buffer.push_line(format!("{}.WriteEndArray();", writer));
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `text` as a quoted C# string literal.
///
/// Backslashes, quotes and the common control characters use short-form
/// escapes; any other control character becomes `\uXXXX`. Everything else,
/// including non-ASCII text, is carried through verbatim since C# source
/// is Unicode.
pub fn cs_string_literal(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            '\u{0008}' => literal.push_str("\\b"),
            '\u{000C}' => literal.push_str("\\f"),
            '\0' => literal.push_str("\\0"),
            _ => {
                let code = ch as u32;
                if code < 0x20 || code == 0x7F {
                    literal.push_str(&format!("\\u{:04X}", code));
                } else {
                    literal.push(ch);
                }
            }
        }
    }
    literal.push('"');
    literal
}
