use std::fmt;

use log::debug;

use crate::{
    constants::*,
    json::value::{Map, Number, Value},
    symbol::{symbol::SymbolId, symbol_node::SymbolNode},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    NonStringKey(SymbolId),
    NonAtomicValue(SymbolId),
    TopLevelNotObject(SymbolId),
    MissingObjectValue(String),
    InvalidEscape(String),
    InvalidNumber(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::NonStringKey(id) => {
                write!(f, "JSON object keys must be strings, found {}", id)
            }
            DecodeError::NonAtomicValue(id) => write!(f, "Non-atomic value: {}", id),
            DecodeError::TopLevelNotObject(id) => {
                write!(f, "JSON data must be an object, found {}", id)
            }
            DecodeError::MissingObjectValue(key) => {
                write!(f, "Object member {:?} has no value", key)
            }
            DecodeError::InvalidEscape(escape) => write!(f, "Invalid escape sequence: {}", escape),
            DecodeError::InvalidNumber(text) => write!(f, "Invalid number: {}", text),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Turns a JSON parse tree into a [`Value`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoder {
    decode_escapes: bool,
}

impl Decoder {
    pub fn new(decode_escapes: bool) -> Self {
        Decoder { decode_escapes }
    }

    /// Decodes a whole document, which must be an object.
    pub fn decode_document(&self, root: &SymbolNode) -> Result<Map, DecodeError> {
        debug!("Decoding document rooted at {}", root.get_id());
        if !root.get_id().is_literal(LEFT_BRACE) {
            return Err(DecodeError::TopLevelNotObject(root.get_id().clone()));
        }
        self.decode_object(root)
    }

    pub fn decode(&self, node: &SymbolNode) -> Result<Value, DecodeError> {
        match node.get_id() {
            id if id.is_literal(LEFT_BRACE) => self.decode_object(node).map(Value::Object),
            id if id.is_literal(LEFT_BRACKET) => self.decode_array(node).map(Value::Array),
            _ => self.decode_atom(node),
        }
    }

    /// Re-pairs the flat key/value sequence. A repeated key keeps its first
    /// position and takes the last value.
    pub fn decode_object(&self, node: &SymbolNode) -> Result<Map, DecodeError> {
        let mut map = Map::new();
        let mut members = node.get_sequence().iter();
        while let Some(key) = members.next() {
            if !key.get_id().is_named(JSON_STRING) {
                return Err(DecodeError::NonStringKey(key.get_id().clone()));
            }
            let key = self.decode_string(key)?;
            let value = members
                .next()
                .ok_or_else(|| DecodeError::MissingObjectValue(key.clone()))?;
            map.insert(key, self.decode(value)?);
        }
        Ok(map)
    }

    pub fn decode_array(&self, node: &SymbolNode) -> Result<Vec<Value>, DecodeError> {
        node.get_sequence()
            .iter()
            .map(|element| self.decode(element))
            .collect()
    }

    fn decode_atom(&self, node: &SymbolNode) -> Result<Value, DecodeError> {
        match node.get_id() {
            id if id.is_literal(NULL) => Ok(Value::Null),
            id if id.is_literal(TRUE) => Ok(Value::Bool(true)),
            id if id.is_literal(FALSE) => Ok(Value::Bool(false)),
            id if id.is_named(JSON_STRING) => self.decode_string(node).map(Value::String),
            id if id.is_named(JSON_NUMBER) => {
                parse_number(node.get_value().unwrap_or("")).map(Value::Number)
            }
            id => Err(DecodeError::NonAtomicValue(id.clone())),
        }
    }

    fn decode_string(&self, node: &SymbolNode) -> Result<String, DecodeError> {
        let raw = node.get_value().unwrap_or("");
        if self.decode_escapes {
            unescape(raw)
        } else {
            Ok(raw.to_string())
        }
    }
}

/// Integer unless the literal has a fraction or exponent. Integers that do
/// not fit in an `i64` become floats.
pub fn parse_number(text: &str) -> Result<Number, DecodeError> {
    let invalid = || DecodeError::InvalidNumber(text.to_string());
    if text.contains(['.', 'e', 'E']) {
        return text.parse::<f64>().map(Number::Float).map_err(|_| invalid());
    }
    match text.parse::<i64>() {
        Ok(n) => Ok(Number::Integer(n)),
        Err(_) => text.parse::<f64>().map(Number::Float).map_err(|_| invalid()),
    }
}

/// Decodes the standard JSON backslash escapes, including `\uXXXX` with
/// surrogate pairs.
pub fn unescape(raw: &str) -> Result<String, DecodeError> {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => decoded.push('"'),
            Some('\\') => decoded.push('\\'),
            Some('/') => decoded.push('/'),
            Some('b') => decoded.push('\u{8}'),
            Some('f') => decoded.push('\u{c}'),
            Some('n') => decoded.push('\n'),
            Some('r') => decoded.push('\r'),
            Some('t') => decoded.push('\t'),
            Some('u') => decoded.push(unescape_unicode(&mut chars)?),
            Some(other) => return Err(DecodeError::InvalidEscape(format!("\\{}", other))),
            None => return Err(DecodeError::InvalidEscape("\\".to_string())),
        }
    }
    Ok(decoded)
}

fn unescape_unicode(chars: &mut std::str::Chars<'_>) -> Result<char, DecodeError> {
    let high = read_hex4(chars)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high).ok_or_else(|| invalid_unicode(high));
    }
    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(invalid_unicode(high));
    }
    let low = read_hex4(chars)?;
    if !(0xDC00..0xE000).contains(&low) {
        return Err(invalid_unicode(low));
    }
    let code_point = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(code_point).ok_or_else(|| invalid_unicode(code_point))
}

fn read_hex4(chars: &mut std::str::Chars<'_>) -> Result<u32, DecodeError> {
    let digits = chars.by_ref().take(4).collect::<String>();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(DecodeError::InvalidEscape(format!("\\u{}", digits)));
    }
    u32::from_str_radix(&digits, 16)
        .map_err(|_| DecodeError::InvalidEscape(format!("\\u{}", digits)))
}

fn invalid_unicode(code: u32) -> DecodeError {
    DecodeError::InvalidEscape(format!("\\u{:04X}", code))
}
