use crate::error::ParseError;
use crate::model::{InputPosition, JsonToken, TokenType};

#[derive(Clone)]
pub struct ScannerState {
    original_text: String,
    chars: Vec<char>,
    byte_indices: Vec<usize>,
    pub current_position: InputPosition,
    pub token_position: InputPosition,
}

impl ScannerState {
    pub fn new(original_text: &str) -> Self {
        let mut chars: Vec<char> = Vec::new();
        let mut byte_indices: Vec<usize> = Vec::new();
        for (idx, ch) in original_text.char_indices() {
            byte_indices.push(idx);
            chars.push(ch);
        }
        byte_indices.push(original_text.len());

        Self {
            original_text: original_text.to_string(),
            chars,
            byte_indices,
            current_position: InputPosition { index: 0, row: 0, column: 0 },
            token_position: InputPosition { index: 0, row: 0, column: 0 },
        }
    }

    pub fn advance(&mut self) {
        self.current_position.index += 1;
        self.current_position.column += 1;
    }

    pub fn new_line(&mut self) {
        self.current_position.index += 1;
        self.current_position.row += 1;
        self.current_position.column = 0;
    }

    pub fn set_token_start(&mut self) {
        self.token_position = self.current_position;
    }

    pub fn make_token_from_buffer(&self, token_type: TokenType) -> JsonToken {
        let start = self.byte_indices[self.token_position.index];
        let end = self.byte_indices[self.current_position.index];
        JsonToken {
            token_type,
            text: self.original_text[start..end].to_string(),
            input_position: self.token_position,
        }
    }

    pub fn make_token(&self, token_type: TokenType, text: &str) -> JsonToken {
        JsonToken {
            token_type,
            text: text.to_string(),
            input_position: self.token_position,
        }
    }

    pub fn current(&self) -> Option<char> {
        if self.at_end() {
            None
        } else {
            Some(self.chars[self.current_position.index])
        }
    }

    pub fn at_end(&self) -> bool {
        self.current_position.index >= self.chars.len()
    }

    pub fn error(&self, message: &str) -> ParseError {
        ParseError::new(message, Some(self.current_position))
    }
}

/// Splits JSON text into tokens, keeping the exact source span of each.
///
/// Strict JSON only: comments and other extensions are reported as errors.
pub struct TokenGenerator {
    state: ScannerState,
}

impl TokenGenerator {
    pub fn new(input_json: &str) -> Self {
        Self { state: ScannerState::new(input_json) }
    }
}

impl Iterator for TokenGenerator {
    type Item = Result<JsonToken, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state.at_end() {
                return None;
            }

            let ch = self.state.current()?;
            match ch {
                ' ' | '\t' | '\r' => {
                    self.state.advance();
                }
                '\n' => {
                    self.state.new_line();
                }
                '{' => return Some(process_single_char(&mut self.state, "{", TokenType::BeginObject)),
                '}' => return Some(process_single_char(&mut self.state, "}", TokenType::EndObject)),
                '[' => return Some(process_single_char(&mut self.state, "[", TokenType::BeginArray)),
                ']' => return Some(process_single_char(&mut self.state, "]", TokenType::EndArray)),
                ':' => return Some(process_single_char(&mut self.state, ":", TokenType::Colon)),
                ',' => return Some(process_single_char(&mut self.state, ",", TokenType::Comma)),
                't' => return Some(process_keyword(&mut self.state, "true", TokenType::True)),
                'f' => return Some(process_keyword(&mut self.state, "false", TokenType::False)),
                'n' => return Some(process_keyword(&mut self.state, "null", TokenType::Null)),
                '"' => return Some(process_string(&mut self.state)),
                '-' => return Some(process_number(&mut self.state)),
                _ => {
                    if !is_digit(ch) {
                        return Some(Err(self.state.error("Unexpected character")));
                    }
                    return Some(process_number(&mut self.state));
                }
            }
        }
    }
}

fn process_single_char(
    state: &mut ScannerState,
    symbol: &str,
    token_type: TokenType,
) -> Result<JsonToken, ParseError> {
    state.set_token_start();
    let token = state.make_token(token_type, symbol);
    state.advance();
    Ok(token)
}

fn process_keyword(
    state: &mut ScannerState,
    keyword: &str,
    token_type: TokenType,
) -> Result<JsonToken, ParseError> {
    state.set_token_start();
    let mut chars = keyword.chars();
    chars.next();
    for expected in chars {
        if state.at_end() {
            return Err(state.error("Unexpected end of input while processing keyword"));
        }
        state.advance();
        let current = state.current().ok_or_else(|| {
            state.error("Unexpected end of input while processing keyword")
        })?;
        if current != expected {
            return Err(state.error("Unexpected keyword"));
        }
    }

    let token = state.make_token(token_type, keyword);
    state.advance();
    Ok(token)
}

fn process_string(state: &mut ScannerState) -> Result<JsonToken, ParseError> {
    state.set_token_start();
    state.advance();

    let mut last_char_began_escape = false;
    let mut expected_hex_count = 0usize;
    loop {
        if state.at_end() {
            return Err(state.error("Unexpected end of input while processing string"));
        }

        let ch = state
            .current()
            .ok_or_else(|| state.error("Unexpected end of input while processing string"))?;

        if expected_hex_count > 0 {
            if !is_hex(ch) {
                return Err(state.error("Bad unicode escape in string"));
            }
            expected_hex_count -= 1;
            state.advance();
            continue;
        }

        if last_char_began_escape {
            if !is_legal_after_backslash(ch) {
                return Err(state.error("Bad escaped character in string"));
            }
            if ch == 'u' {
                expected_hex_count = 4;
            }
            last_char_began_escape = false;
            state.advance();
            continue;
        }

        if is_control(ch) {
            return Err(state.error("Control characters are not allowed in strings"));
        }

        state.advance();
        if ch == '"' {
            return Ok(state.make_token_from_buffer(TokenType::String));
        }
        if ch == '\\' {
            last_char_began_escape = true;
        }
    }
}

fn process_number(state: &mut ScannerState) -> Result<JsonToken, ParseError> {
    state.set_token_start();
    let mut phase = NumberPhase::Beginning;
    loop {
        let ch = state
            .current()
            .ok_or_else(|| state.error("Unexpected end of input while processing number"))?;
        let mut handling = CharHandling::ValidAndConsumed;

        match phase {
            NumberPhase::Beginning => {
                if ch == '-' {
                    phase = NumberPhase::PastLeadingSign;
                } else if ch == '0' {
                    phase = NumberPhase::PastWhole;
                } else if is_digit(ch) {
                    phase = NumberPhase::PastFirstDigitOfWhole;
                } else {
                    handling = CharHandling::InvalidatesToken;
                }
            }
            NumberPhase::PastLeadingSign => {
                if !is_digit(ch) {
                    handling = CharHandling::InvalidatesToken;
                } else if ch == '0' {
                    phase = NumberPhase::PastWhole;
                } else {
                    phase = NumberPhase::PastFirstDigitOfWhole;
                }
            }
            NumberPhase::PastFirstDigitOfWhole => {
                if ch == '.' {
                    phase = NumberPhase::PastDecimalPoint;
                } else if ch == 'e' || ch == 'E' {
                    phase = NumberPhase::PastE;
                } else if !is_digit(ch) {
                    handling = CharHandling::StartOfNewToken;
                }
            }
            NumberPhase::PastWhole => {
                if ch == '.' {
                    phase = NumberPhase::PastDecimalPoint;
                } else if ch == 'e' || ch == 'E' {
                    phase = NumberPhase::PastE;
                } else {
                    handling = CharHandling::StartOfNewToken;
                }
            }
            NumberPhase::PastDecimalPoint => {
                if is_digit(ch) {
                    phase = NumberPhase::PastFirstDigitOfFractional;
                } else {
                    handling = CharHandling::InvalidatesToken;
                }
            }
            NumberPhase::PastFirstDigitOfFractional => {
                if ch == 'e' || ch == 'E' {
                    phase = NumberPhase::PastE;
                } else if !is_digit(ch) {
                    handling = CharHandling::StartOfNewToken;
                }
            }
            NumberPhase::PastE => {
                if ch == '+' || ch == '-' {
                    phase = NumberPhase::PastExpSign;
                } else if is_digit(ch) {
                    phase = NumberPhase::PastFirstDigitOfExponent;
                } else {
                    handling = CharHandling::InvalidatesToken;
                }
            }
            NumberPhase::PastExpSign => {
                if is_digit(ch) {
                    phase = NumberPhase::PastFirstDigitOfExponent;
                } else {
                    handling = CharHandling::InvalidatesToken;
                }
            }
            NumberPhase::PastFirstDigitOfExponent => {
                if !is_digit(ch) {
                    handling = CharHandling::StartOfNewToken;
                }
            }
        }

        if handling == CharHandling::InvalidatesToken {
            return Err(state.error("Bad character while processing number"));
        }

        if handling == CharHandling::StartOfNewToken {
            return Ok(state.make_token_from_buffer(TokenType::Number));
        }

        state.advance();
        if !state.at_end() {
            continue;
        }

        return match phase {
            NumberPhase::PastFirstDigitOfWhole
            | NumberPhase::PastWhole
            | NumberPhase::PastFirstDigitOfFractional
            | NumberPhase::PastFirstDigitOfExponent => Ok(state.make_token_from_buffer(TokenType::Number)),
            _ => Err(state.error("Unexpected end of input while processing number")),
        };
    }
}

/// Decodes the raw span of a string token (surrounding quotes included)
/// into its character content.
///
/// The scanner has already validated escape shapes, so the remaining
/// failure modes are unpaired surrogates and stray trailing escapes.
pub fn decode_string(token: &JsonToken) -> Result<String, ParseError> {
    let bad = |msg: &str| ParseError::new(msg, Some(token.input_position));

    let inner = token
        .text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .ok_or_else(|| bad("Malformed string token"))?;

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let escape = chars.next().ok_or_else(|| bad("Dangling escape in string"))?;
        match escape {
            '"' => result.push('"'),
            '\\' => result.push('\\'),
            '/' => result.push('/'),
            'b' => result.push('\u{0008}'),
            'f' => result.push('\u{000C}'),
            'n' => result.push('\n'),
            'r' => result.push('\r'),
            't' => result.push('\t'),
            'u' => {
                let unit = read_hex4(&mut chars).ok_or_else(|| bad("Bad unicode escape in string"))?;
                if (0xDC00..=0xDFFF).contains(&unit) {
                    return Err(bad("Unpaired low surrogate in string"));
                }
                if (0xD800..=0xDBFF).contains(&unit) {
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(bad("Unpaired high surrogate in string"));
                    }
                    let low = read_hex4(&mut chars).ok_or_else(|| bad("Bad unicode escape in string"))?;
                    if !(0xDC00..=0xDFFF).contains(&low) {
                        return Err(bad("Unpaired high surrogate in string"));
                    }
                    let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    let decoded = char::from_u32(combined)
                        .ok_or_else(|| bad("Bad surrogate pair in string"))?;
                    result.push(decoded);
                } else {
                    let decoded =
                        char::from_u32(unit).ok_or_else(|| bad("Bad unicode escape in string"))?;
                    result.push(decoded);
                }
            }
            _ => return Err(bad("Bad escaped character in string")),
        }
    }

    Ok(result)
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..4 {
        let digit = chars.next()?.to_digit(16)?;
        value = value * 16 + digit;
    }
    Some(value)
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_hex(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

fn is_legal_after_backslash(ch: char) -> bool {
    matches!(ch, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't' | 'u')
}

fn is_control(ch: char) -> bool {
    let code = ch as u32;
    (code <= 0x1F) || (code == 0x7F) || (code >= 0x80 && code <= 0x9F)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberPhase {
    Beginning,
    PastLeadingSign,
    PastFirstDigitOfWhole,
    PastWhole,
    PastDecimalPoint,
    PastFirstDigitOfFractional,
    PastE,
    PastExpSign,
    PastFirstDigitOfExponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharHandling {
    InvalidatesToken,
    ValidAndConsumed,
    StartOfNewToken,
}
