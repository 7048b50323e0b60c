use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ERROR_CONTEXT_LENGTH, DEFAULT_MAX_DEPTH};

/// Knobs for [`crate::json::parser::JsonParser`]. Loadable from TOML; missing
/// keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ParserConfig {
    /// Characters of unmatched input quoted in a lexical error.
    pub error_context_length: usize,
    /// Decode backslash escapes in strings. Off keeps the raw source text.
    pub decode_escapes: bool,
    pub require_object_root: bool,
    /// Stop after the first document and ignore what follows it.
    pub allow_trailing_input: bool,
    /// Deepest nesting of containers accepted before giving up.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            error_context_length: DEFAULT_ERROR_CONTEXT_LENGTH,
            decode_escapes: false,
            require_object_root: true,
            allow_trailing_input: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn from_toml(s: &str) -> Result<Self, String> {
        toml::from_str(s).map_err(|e| format!("Invalid parser config: {}", e))
    }

    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string(self).map_err(|e| format!("Couldn't serialize parser config: {}", e))
    }
}
