use std::{fmt, iter::FusedIterator};

use log::trace;

use crate::{
    constants::DEFAULT_ERROR_CONTEXT_LENGTH,
    parsing::parser::ParserError,
    symbol::{symbol::SymbolId, symbol_table::SymbolTable},
};

/// Display tag of a token once a null denotation has accepted it.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Arity {
    Name,
    Literal,
    Operator,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Token {
    id: SymbolId,
    value: Option<String>,
    arity: Arity,
}

impl Token {
    pub fn new(id: SymbolId, value: Option<String>) -> Self {
        Token {
            id,
            value,
            arity: Arity::Operator,
        }
    }

    pub fn end() -> Self {
        Self::new(SymbolId::End, None)
    }

    pub fn as_literal(mut self) -> Self {
        self.arity = Arity::Literal;
        self
    }

    pub fn as_name(mut self) -> Self {
        self.arity = Arity::Name;
        self
    }

    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.value = value;
        self
    }

    pub fn get_id(&self) -> &SymbolId {
        &self.id
    }

    pub fn get_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn get_arity(&self) -> Arity {
        self.arity
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{} {:?}", self.id, value),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Lazy, single pass token stream over one input string.
///
/// Symbols are tried in registration order and the first match wins. Once
/// the input is exhausted exactly one `End` token is produced. After a
/// lexical error the stream is finished.
#[derive(Debug)]
pub struct Tokenizer<'t> {
    table: &'t SymbolTable,
    remaining: &'t str,
    error_context_length: usize,
    finished: bool,
}

impl<'t> Tokenizer<'t> {
    pub fn new(table: &'t SymbolTable, input: &'t str) -> Self {
        Tokenizer {
            table,
            remaining: input.trim_start(),
            error_context_length: DEFAULT_ERROR_CONTEXT_LENGTH,
            finished: false,
        }
    }

    pub fn with_error_context_length(mut self, error_context_length: usize) -> Self {
        self.error_context_length = error_context_length;
        self
    }

    pub fn remaining(&self) -> &'t str {
        self.remaining
    }

    fn next_token(&mut self) -> Result<Token, ParserError> {
        let table = self.table;
        for symbol in table.symbols() {
            let Some((value, length)) = symbol.match_prefix(self.remaining) else {
                continue;
            };
            // An empty match would never advance.
            if length == 0 {
                continue;
            }
            let token = Token::new(symbol.get_id().clone(), Some(value.to_string()));
            self.remaining = self.remaining[length..].trim_start();
            return Ok(token);
        }
        let context = self
            .remaining
            .chars()
            .take(self.error_context_length)
            .collect::<String>();
        Err(ParserError::UnknownInput(context))
    }
}

impl<'t> Iterator for Tokenizer<'t> {
    type Item = Result<Token, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.remaining.is_empty() {
            self.finished = true;
            trace!("Tokenized (end)");
            return Some(Ok(Token::end()));
        }
        let result = self.next_token();
        match &result {
            Ok(token) => trace!("Tokenized {}", token),
            Err(_) => self.finished = true,
        }
        Some(result)
    }
}

impl<'t> FusedIterator for Tokenizer<'t> {}
