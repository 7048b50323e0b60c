use std::fmt;

use indexmap::{map::Entry, IndexMap};
use log::trace;
use regex::Regex;

use crate::symbol::symbol::{BindingPower, LeftDenotation, NullDenotation, Symbol, SymbolId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolTableError {
    InvalidPattern(SymbolId, String),
    MissingPattern(SymbolId),
}

impl fmt::Display for SymbolTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolTableError::InvalidPattern(id, e) => {
                write!(f, "Invalid pattern for symbol {}: {}", id, e)
            }
            SymbolTableError::MissingPattern(id) => {
                write!(f, "Named symbol {} was registered without a pattern", id)
            }
        }
    }
}

impl std::error::Error for SymbolTableError {}

pub type SymbolTableResult<'a> = Result<&'a mut Symbol, SymbolTableError>;

/// Registry of every symbol a grammar knows about, in registration order.
///
/// Registration order is match priority for the tokenizer. The `End` symbol
/// is always present and never matched against input.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    symbols: IndexMap<SymbolId, Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut symbols = IndexMap::new();
        symbols.insert(SymbolId::End, Symbol::end());
        SymbolTable { symbols }
    }

    /// Registers `id`, or raises the binding power of an existing symbol to
    /// `max(existing, binding_power)`. Either way the one symbol for `id` is
    /// returned so behaviors can be attached to it.
    pub fn register(
        &mut self,
        id: SymbolId,
        binding_power: BindingPower,
        pattern: Option<&str>,
    ) -> SymbolTableResult<'_> {
        let symbol = match self.symbols.entry(id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let symbol = Self::new_symbol(entry.key(), pattern)?;
                trace!("Registered symbol {}", entry.key());
                entry.insert(symbol)
            }
        };
        Ok(symbol.raise_binding_power(binding_power))
    }

    fn new_symbol(id: &SymbolId, pattern: Option<&str>) -> Result<Symbol, SymbolTableError> {
        match (id, pattern) {
            (SymbolId::End, _) => Ok(Symbol::end()),
            (_, Some(pattern)) => {
                let regex = Self::anchored(id, pattern)?;
                let mut symbol = Symbol::new(id.clone(), Some(regex));
                symbol.set_nud(NullDenotation::Literal);
                Ok(symbol)
            }
            (SymbolId::Literal(text), None) => {
                let regex = Self::anchored(id, &regex::escape(text))?;
                Ok(Symbol::new(id.clone(), Some(regex)))
            }
            (SymbolId::Named(_), None) => Err(SymbolTableError::MissingPattern(id.clone())),
        }
    }

    fn anchored(id: &SymbolId, pattern: &str) -> Result<Regex, SymbolTableError> {
        Regex::new(&format!(r"\A(?:{})", pattern))
            .map_err(|e| SymbolTableError::InvalidPattern(id.clone(), e.to_string()))
    }

    /// A symbol spelled exactly as `text`.
    pub fn symbol(&mut self, text: &str, binding_power: BindingPower) -> SymbolTableResult<'_> {
        self.register(SymbolId::literal(text), binding_power, None)
    }

    /// A literal-valued symbol recognized by `pattern`.
    pub fn pattern(&mut self, name: &str, pattern: &str) -> SymbolTableResult<'_> {
        self.register(SymbolId::named(name), 0, Some(pattern))
    }

    /// A name-valued symbol recognized by `pattern`, e.g. identifiers.
    pub fn name(&mut self, name: &str, pattern: &str) -> SymbolTableResult<'_> {
        let symbol = self.pattern(name, pattern)?;
        Ok(symbol.set_nud(NullDenotation::Name))
    }

    /// A literal whose value is its own spelling, e.g. `null`.
    pub fn constant(&mut self, text: &str) -> SymbolTableResult<'_> {
        let symbol = self.symbol(text, 0)?;
        Ok(symbol.set_nud(NullDenotation::Constant))
    }

    pub fn infix(&mut self, text: &str, binding_power: BindingPower) -> SymbolTableResult<'_> {
        let symbol = self.symbol(text, binding_power)?;
        Ok(symbol.set_led(LeftDenotation::Infix))
    }

    pub fn infix_right(
        &mut self,
        text: &str,
        binding_power: BindingPower,
    ) -> SymbolTableResult<'_> {
        let symbol = self.symbol(text, binding_power)?;
        Ok(symbol.set_led(LeftDenotation::InfixRight))
    }

    pub fn prefix(&mut self, text: &str, binding_power: BindingPower) -> SymbolTableResult<'_> {
        let symbol = self.symbol(text, 0)?;
        Ok(symbol.set_nud(NullDenotation::Prefix(binding_power)))
    }

    pub fn postfix(&mut self, text: &str, binding_power: BindingPower) -> SymbolTableResult<'_> {
        let symbol = self.symbol(text, binding_power)?;
        Ok(symbol.set_led(LeftDenotation::Postfix))
    }

    /// A grouping pair such as `(` ... `)`.
    pub fn group(&mut self, open: &str, close: &str) -> SymbolTableResult<'_> {
        self.symbol(close, 0)?;
        let symbol = self.symbol(open, 0)?;
        Ok(symbol.set_nud(NullDenotation::Group(SymbolId::literal(close))))
    }

    pub fn get(&self, id: &SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    pub fn contains(&self, id: &SymbolId) -> bool {
        self.symbols.contains_key(id)
    }

    pub fn binding_power(&self, id: &SymbolId) -> BindingPower {
        self.get(id).map(|s| s.get_binding_power()).unwrap_or(0)
    }

    /// Every symbol except `End`, in registration order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values().filter(|s| !s.get_id().is_end())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
