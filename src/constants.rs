use crate::symbol::symbol::BindingPower;

// Binding powers
pub const DEFAULT_BINDING_POWER: BindingPower = 0;

// Parser
pub const DEFAULT_MAX_DEPTH: usize = 128;

// Tokenizer
pub const DEFAULT_ERROR_CONTEXT_LENGTH: usize = 32;
pub const WHOLE_MATCH: usize = 0;

// JSON symbols
pub const JSON_NUMBER: &str = "jsonNumber";
pub const JSON_STRING: &str = "jsonString";
pub const NULL: &str = "null";
pub const TRUE: &str = "true";
pub const FALSE: &str = "false";
pub const COMMA: &str = ",";
pub const COLON: &str = ":";
pub const LEFT_BRACKET: &str = "[";
pub const RIGHT_BRACKET: &str = "]";
pub const LEFT_BRACE: &str = "{";
pub const RIGHT_BRACE: &str = "}";

// JSON lexical grammar
pub const JSON_NUMBER_PATTERN: &str = r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?\b";
pub const JSON_STRING_PATTERN: &str =
    r#""((?:\\"|\\\\|\\/|\\b|\\f|\\n|\\r|\\t|[^"])*?)""#;
pub const JSON_STRING_VALUE_GROUP: usize = 1;
