use std::fmt;

use log::debug;
use once_cell::sync::OnceCell;

use crate::{
    config::ParserConfig,
    constants::DEFAULT_BINDING_POWER,
    json::{
        decoder::{DecodeError, Decoder},
        grammar::json_symbol_table,
        value::Value,
    },
    parsing::{
        parser::{Parser, ParserError},
        tokenizer::Tokenizer,
    },
    symbol::{
        symbol_node::SymbolNode,
        symbol_table::{SymbolTable, SymbolTableError},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    SymbolTable(SymbolTableError),
    Parser(ParserError),
    Decode(DecodeError),
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::SymbolTable(e) => write!(f, "{}", e),
            JsonError::Parser(e) => write!(f, "{}", e),
            JsonError::Decode(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for JsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JsonError::SymbolTable(e) => Some(e),
            JsonError::Parser(e) => Some(e),
            JsonError::Decode(e) => Some(e),
        }
    }
}

impl From<SymbolTableError> for JsonError {
    fn from(value: SymbolTableError) -> Self {
        JsonError::SymbolTable(value)
    }
}

impl From<ParserError> for JsonError {
    fn from(value: ParserError) -> Self {
        JsonError::Parser(value)
    }
}

impl From<DecodeError> for JsonError {
    fn from(value: DecodeError) -> Self {
        JsonError::Decode(value)
    }
}

/// JSON grammar plus decoder. Built once, then shared read-only by any
/// number of parses.
#[derive(Clone, Debug)]
pub struct JsonParser {
    table: SymbolTable,
    decoder: Decoder,
    config: ParserConfig,
}

impl JsonParser {
    pub fn new() -> Result<Self, JsonError> {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Result<Self, JsonError> {
        debug!("Creating JSON parser with {:?}", config);
        Ok(JsonParser {
            table: json_symbol_table()?,
            decoder: Decoder::new(config.decode_escapes),
            config,
        })
    }

    pub fn get_config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn get_table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn tokens<'a>(&'a self, input: &'a str) -> Tokenizer<'a> {
        Tokenizer::new(&self.table, input)
            .with_error_context_length(self.config.error_context_length)
    }

    pub fn parse_tree(&self, input: &str) -> Result<SymbolNode, JsonError> {
        let mut parser = Parser::new(&self.table, self.tokens(input))?
            .with_max_depth(self.config.max_depth);
        let root = parser.expression(DEFAULT_BINDING_POWER)?;
        if !self.config.allow_trailing_input {
            parser.finish()?;
        }
        Ok(root)
    }

    /// Parses and decodes one document. Unless configured otherwise the
    /// document must be an object, and anything after it is left unread.
    pub fn parse(&self, input: &str) -> Result<Value, JsonError> {
        let root = self.parse_tree(input)?;
        let value = if self.config.require_object_root {
            Value::Object(self.decoder.decode_document(&root)?)
        } else {
            self.decoder.decode(&root)?
        };
        Ok(value)
    }
}

static DEFAULT_PARSER: OnceCell<JsonParser> = OnceCell::new();

/// The parser with default configuration, built on first use.
pub fn default_parser() -> Result<&'static JsonParser, JsonError> {
    DEFAULT_PARSER.get_or_try_init(JsonParser::new)
}

/// Parses `input` with the default parser.
pub fn parse(input: &str) -> Result<Value, JsonError> {
    default_parser()?.parse(input)
}
