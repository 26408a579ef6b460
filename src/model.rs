use crate::error::ParseError;

/// A position within the JSON input text.
///
/// Used to report the location of errors or elements within the source.
/// All values are zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputPosition {
    /// Character offset from the start of the input (zero-indexed).
    pub index: usize,
    /// Line number (zero-indexed, so first line is 0).
    pub row: usize,
    /// Column number within the line (zero-indexed).
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    String,
    Number,
    Null,
    True,
    False,
    Comma,
    Colon,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonToken {
    pub token_type: TokenType,
    pub text: String,
    pub input_position: InputPosition,
}

/// A parsed JSON value.
///
/// The tree is a closed set of variants, so a `match` over it is checked
/// for exhaustiveness by the compiler. Two representation choices matter
/// for code generation:
///
/// - `Number` carries the exact token text from the source, never a parsed
///   float. Reformatting through `f64` can silently change precision or
///   exponent notation, and the generated code must reproduce the document
///   byte for byte.
/// - `String` carries the decoded character content, with JSON escapes
///   (including `\uXXXX` and surrogate pairs) already resolved. The
///   converter re-escapes it for the target language.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    /// Raw numeric token text, e.g. `-1.25e10`.
    Number(String),
    /// Decoded string content, without the surrounding quotes.
    String(String),
    Array(Vec<JsonValue>),
    /// Members in parse order. Duplicate names are kept as-is.
    Object(Vec<JsonMember>),
}

/// One `name: value` pair within an object.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonMember {
    /// Decoded property name.
    pub name: String,
    pub value: JsonValue,
}

impl JsonValue {
    /// Builds a `JsonValue` tree from an already-parsed `serde_json::Value`.
    ///
    /// Numbers go through `serde_json::Number`'s canonical text form on this
    /// path; exact source spans are only available when parsing text with
    /// [`Converter::convert`](crate::Converter::convert).
    pub fn from_serde(
        element: &serde_json::Value,
        recursion_limit: usize,
    ) -> Result<Self, ParseError> {
        if recursion_limit == 0 {
            return Err(ParseError::simple(
                "Depth limit exceeded - possible circular reference",
            ));
        }

        let value = match element {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(val) => JsonValue::Bool(*val),
            serde_json::Value::Number(num) => JsonValue::Number(num.to_string()),
            serde_json::Value::String(val) => JsonValue::String(val.clone()),
            serde_json::Value::Array(arr) => {
                let mut children = Vec::with_capacity(arr.len());
                for child in arr {
                    children.push(Self::from_serde(child, recursion_limit - 1)?);
                }
                JsonValue::Array(children)
            }
            serde_json::Value::Object(map) => {
                let mut members = Vec::with_capacity(map.len());
                for (key, value) in map.iter() {
                    members.push(JsonMember {
                        name: key.clone(),
                        value: Self::from_serde(value, recursion_limit - 1)?,
                    });
                }
                JsonValue::Object(members)
            }
        };

        Ok(value)
    }
}
