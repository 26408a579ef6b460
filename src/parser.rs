use crate::error::ParseError;
use crate::model::{InputPosition, JsonMember, JsonToken, JsonValue, TokenType};
use crate::tokenizer::{decode_string, TokenGenerator};

pub struct TokenEnumerator<I>
where
    I: Iterator<Item = Result<JsonToken, ParseError>>,
{
    generator: I,
    current: Option<JsonToken>,
}

impl<I> TokenEnumerator<I>
where
    I: Iterator<Item = Result<JsonToken, ParseError>>,
{
    pub fn new(generator: I) -> Self {
        Self { generator, current: None }
    }

    pub fn current(&self) -> Result<&JsonToken, ParseError> {
        self.current
            .as_ref()
            .ok_or_else(|| ParseError::simple("Illegal enumerator usage"))
    }

    pub fn move_next(&mut self) -> Result<bool, ParseError> {
        match self.generator.next() {
            None => {
                self.current = None;
                Ok(false)
            }
            Some(Ok(token)) => {
                self.current = Some(token);
                Ok(true)
            }
            Some(Err(err)) => Err(err),
        }
    }
}

/// Parses input text into a single [`JsonValue`] tree.
///
/// Strict JSON: exactly one top-level value, no trailing commas, no
/// comments. Object members are kept in source order, duplicate keys
/// included.
pub fn parse_document(input_json: &str) -> Result<JsonValue, ParseError> {
    let token_stream = TokenGenerator::new(input_json);
    let mut enumerator = TokenEnumerator::new(token_stream);

    if !enumerator.move_next()? {
        return Err(ParseError::simple("Input contained no JSON value"));
    }
    let value = parse_item(&mut enumerator)?;

    if enumerator.move_next()? {
        return Err(ParseError::new(
            "Unexpected content after top level value",
            Some(enumerator.current()?.input_position),
        ));
    }

    Ok(value)
}

fn parse_item<I>(enumerator: &mut TokenEnumerator<I>) -> Result<JsonValue, ParseError>
where
    I: Iterator<Item = Result<JsonToken, ParseError>>,
{
    let current = enumerator.current()?.clone();
    match current.token_type {
        TokenType::BeginArray => parse_array(enumerator),
        TokenType::BeginObject => parse_object(enumerator),
        _ => parse_simple(&current),
    }
}

fn parse_simple(token: &JsonToken) -> Result<JsonValue, ParseError> {
    match token.token_type {
        TokenType::Null => Ok(JsonValue::Null),
        TokenType::True => Ok(JsonValue::Bool(true)),
        TokenType::False => Ok(JsonValue::Bool(false)),
        TokenType::Number => Ok(JsonValue::Number(token.text.clone())),
        TokenType::String => Ok(JsonValue::String(decode_string(token)?)),
        _ => Err(ParseError::new(
            "Unexpected token where a value was expected",
            Some(token.input_position),
        )),
    }
}

fn parse_array<I>(enumerator: &mut TokenEnumerator<I>) -> Result<JsonValue, ParseError>
where
    I: Iterator<Item = Result<JsonToken, ParseError>>,
{
    let starting_input_position = enumerator.current()?.input_position;

    let mut children: Vec<JsonValue> = Vec::new();
    let mut comma_status = CommaStatus::EmptyCollection;

    loop {
        let token = get_next_token_or_throw(enumerator, starting_input_position)?;

        match token.token_type {
            TokenType::EndArray => {
                if comma_status == CommaStatus::CommaSeen {
                    return Err(ParseError::new(
                        "Array may not end with a comma",
                        Some(token.input_position),
                    ));
                }
                return Ok(JsonValue::Array(children));
            }
            TokenType::Comma => {
                if comma_status != CommaStatus::ElementSeen {
                    return Err(ParseError::new(
                        "Unexpected comma in array",
                        Some(token.input_position),
                    ));
                }
                comma_status = CommaStatus::CommaSeen;
            }
            TokenType::False
            | TokenType::True
            | TokenType::Null
            | TokenType::String
            | TokenType::Number
            | TokenType::BeginArray
            | TokenType::BeginObject => {
                if comma_status == CommaStatus::ElementSeen {
                    return Err(ParseError::new(
                        "Comma missing while processing array",
                        Some(token.input_position),
                    ));
                }
                children.push(parse_item(enumerator)?);
                comma_status = CommaStatus::ElementSeen;
            }
            _ => {
                return Err(ParseError::new(
                    "Unexpected token in array",
                    Some(token.input_position),
                ));
            }
        }
    }
}

fn parse_object<I>(enumerator: &mut TokenEnumerator<I>) -> Result<JsonValue, ParseError>
where
    I: Iterator<Item = Result<JsonToken, ParseError>>,
{
    let starting_input_position = enumerator.current()?.input_position;

    let mut members: Vec<JsonMember> = Vec::new();
    let mut pending_name: Option<String> = None;
    let mut phase = ObjectPhase::BeforePropName;

    loop {
        let token = get_next_token_or_throw(enumerator, starting_input_position)?;

        match token.token_type {
            TokenType::EndObject => {
                if matches!(
                    phase,
                    ObjectPhase::AfterPropName | ObjectPhase::AfterColon | ObjectPhase::AfterComma
                ) {
                    return Err(ParseError::new(
                        "Unexpected end of object",
                        Some(token.input_position),
                    ));
                }
                return Ok(JsonValue::Object(members));
            }
            TokenType::String => match phase {
                ObjectPhase::BeforePropName | ObjectPhase::AfterComma => {
                    pending_name = Some(decode_string(&token)?);
                    phase = ObjectPhase::AfterPropName;
                }
                ObjectPhase::AfterColon => {
                    let name = pending_name.take().ok_or_else(|| {
                        ParseError::new("Parser logic error", Some(token.input_position))
                    })?;
                    let value = parse_item(enumerator)?;
                    members.push(JsonMember { name, value });
                    phase = ObjectPhase::AfterPropValue;
                }
                _ => {
                    return Err(ParseError::new(
                        "Unexpected string found while processing object",
                        Some(token.input_position),
                    ));
                }
            },
            TokenType::False
            | TokenType::True
            | TokenType::Null
            | TokenType::Number
            | TokenType::BeginArray
            | TokenType::BeginObject => {
                if phase != ObjectPhase::AfterColon {
                    return Err(ParseError::new(
                        "Unexpected element while processing object",
                        Some(token.input_position),
                    ));
                }
                let name = pending_name.take().ok_or_else(|| {
                    ParseError::new("Parser logic error", Some(token.input_position))
                })?;
                let value = parse_item(enumerator)?;
                members.push(JsonMember { name, value });
                phase = ObjectPhase::AfterPropValue;
            }
            TokenType::Colon => {
                if phase != ObjectPhase::AfterPropName {
                    return Err(ParseError::new(
                        "Unexpected colon while processing object",
                        Some(token.input_position),
                    ));
                }
                phase = ObjectPhase::AfterColon;
            }
            TokenType::Comma => {
                if phase != ObjectPhase::AfterPropValue {
                    return Err(ParseError::new(
                        "Unexpected comma while processing object",
                        Some(token.input_position),
                    ));
                }
                phase = ObjectPhase::AfterComma;
            }
            _ => {
                return Err(ParseError::new(
                    "Unexpected token while processing object",
                    Some(token.input_position),
                ));
            }
        }
    }
}

fn get_next_token_or_throw<I>(
    enumerator: &mut TokenEnumerator<I>,
    start_position: InputPosition,
) -> Result<JsonToken, ParseError>
where
    I: Iterator<Item = Result<JsonToken, ParseError>>,
{
    if !enumerator.move_next()? {
        return Err(ParseError::new(
            "Unexpected end of input while processing array or object starting",
            Some(start_position),
        ));
    }
    Ok(enumerator.current()?.clone())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommaStatus {
    EmptyCollection,
    ElementSeen,
    CommaSeen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjectPhase {
    BeforePropName,
    AfterPropName,
    AfterColon,
    AfterPropValue,
    AfterComma,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalars() {
        assert_eq!(parse_document("null").unwrap(), JsonValue::Null);
        assert_eq!(parse_document("true").unwrap(), JsonValue::Bool(true));
        assert_eq!(parse_document("false").unwrap(), JsonValue::Bool(false));
        assert_eq!(
            parse_document("-1.5e3").unwrap(),
            JsonValue::Number("-1.5e3".to_string())
        );
        assert_eq!(
            parse_document(r#""hi""#).unwrap(),
            JsonValue::String("hi".to_string())
        );
    }

    #[test]
    fn parses_nested_structure_in_order() {
        let value = parse_document(r#"{"a":[1,{"b":true}],"c":null}"#).unwrap();
        let JsonValue::Object(members) = value else {
            panic!("expected object");
        };
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "a");
        assert_eq!(members[1].name, "c");

        let JsonValue::Array(elems) = &members[0].value else {
            panic!("expected array");
        };
        assert_eq!(elems[0], JsonValue::Number("1".to_string()));
        assert!(matches!(&elems[1], JsonValue::Object(m) if m[0].name == "b"));
    }

    #[test]
    fn keeps_duplicate_keys() {
        let value = parse_document(r#"{"k":1,"k":2,"k":3}"#).unwrap();
        let JsonValue::Object(members) = value else {
            panic!("expected object");
        };
        assert_eq!(members.len(), 3);
        assert!(members.iter().all(|m| m.name == "k"));
        assert_eq!(members[2].value, JsonValue::Number("3".to_string()));
    }

    #[test]
    fn parses_empty_containers() {
        assert_eq!(parse_document("{}").unwrap(), JsonValue::Object(vec![]));
        assert_eq!(parse_document("[]").unwrap(), JsonValue::Array(vec![]));
    }

    #[test]
    fn rejects_bare_property_names() {
        assert!(parse_document("{a:}").is_err());
    }

    #[test]
    fn rejects_trailing_commas() {
        assert!(parse_document("[1,2,]").is_err());
        assert!(parse_document(r#"{"a":1,}"#).is_err());
    }

    #[test]
    fn rejects_trailing_content() {
        assert!(parse_document("1 2").is_err());
        assert!(parse_document("{} []").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_document("").is_err());
        assert!(parse_document("   \n ").is_err());
    }

    #[test]
    fn rejects_unterminated_containers() {
        assert!(parse_document(r#"{"a": 1"#).is_err());
        assert!(parse_document("[1, 2").is_err());
    }
}
