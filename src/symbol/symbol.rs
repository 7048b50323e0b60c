use std::fmt;

use regex::Regex;

use crate::{
    constants::{DEFAULT_BINDING_POWER, WHOLE_MATCH},
    parsing::{
        parser::{Parser, ParserResult},
        tokenizer::Token,
    },
    symbol::symbol_node::SymbolNode,
};

pub type BindingPower = u8;

pub type NullDenotationFn = fn(&mut Parser<'_>, Token) -> ParserResult;
pub type LeftDenotationFn = fn(&mut Parser<'_>, Token, SymbolNode) -> ParserResult;

/// Identity of a symbol. Only ever compared for equality.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub enum SymbolId {
    /// A token spelled exactly like its identity, e.g. `,` or `null`.
    Literal(String),
    /// A token recognized by a named pattern, e.g. `jsonNumber`.
    Named(String),
    End,
}

impl SymbolId {
    pub fn literal(text: &str) -> Self {
        SymbolId::Literal(text.to_string())
    }

    pub fn named(name: &str) -> Self {
        SymbolId::Named(name.to_string())
    }

    pub fn is_end(&self) -> bool {
        *self == SymbolId::End
    }

    pub fn is_literal(&self, text: &str) -> bool {
        matches!(self, SymbolId::Literal(t) if t == text)
    }

    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, SymbolId::Named(n) if n == name)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            SymbolId::Literal(text) | SymbolId::Named(text) => Some(text),
            SymbolId::End => None,
        }
    }
}

impl From<&str> for SymbolId {
    fn from(value: &str) -> Self {
        SymbolId::literal(value)
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolId::Literal(text) => write!(f, "{:?}", text),
            SymbolId::Named(name) => write!(f, "{}", name),
            SymbolId::End => write!(f, "(end)"),
        }
    }
}

/// Behavior of a token that starts a (sub)expression.
#[derive(Clone, Debug)]
pub enum NullDenotation {
    /// The token is a literal value as matched.
    Literal,
    /// The token is a name as matched.
    Name,
    /// The token is a literal whose value is its own identity text.
    Constant,
    /// Prefix operator; the operand is parsed with the given right binding power.
    Prefix(BindingPower),
    /// Grouping: parse an inner expression, then require the closing symbol.
    /// The group itself does not appear in the tree.
    Group(SymbolId),
    Custom(NullDenotationFn),
}

/// Behavior of a token that continues an expression with an already parsed
/// left operand.
#[derive(Clone, Debug)]
pub enum LeftDenotation {
    Infix,
    InfixRight,
    Postfix,
    Custom(LeftDenotationFn),
}

#[derive(Clone, Debug)]
pub struct Symbol {
    id: SymbolId,
    pattern: Option<Regex>,
    binding_power: BindingPower,
    nud: Option<NullDenotation>,
    led: Option<LeftDenotation>,
    value_group: usize,
}

impl Symbol {
    pub fn new(id: SymbolId, pattern: Option<Regex>) -> Self {
        Symbol {
            id,
            pattern,
            binding_power: DEFAULT_BINDING_POWER,
            nud: None,
            led: None,
            value_group: WHOLE_MATCH,
        }
    }

    pub fn end() -> Self {
        Self::new(SymbolId::End, None)
    }

    pub fn get_id(&self) -> &SymbolId {
        &self.id
    }

    pub fn get_pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    pub fn get_binding_power(&self) -> BindingPower {
        self.binding_power
    }

    pub fn get_nud(&self) -> Option<&NullDenotation> {
        self.nud.as_ref()
    }

    pub fn get_led(&self) -> Option<&LeftDenotation> {
        self.led.as_ref()
    }

    pub fn get_value_group(&self) -> usize {
        self.value_group
    }

    /// Raises the binding power; never lowers it.
    pub fn raise_binding_power(&mut self, binding_power: BindingPower) -> &mut Self {
        self.binding_power = self.binding_power.max(binding_power);
        self
    }

    pub fn set_nud(&mut self, nud: NullDenotation) -> &mut Self {
        self.nud = Some(nud);
        self
    }

    pub fn set_led(&mut self, led: LeftDenotation) -> &mut Self {
        self.led = Some(led);
        self
    }

    pub fn set_value_group(&mut self, value_group: usize) -> &mut Self {
        self.value_group = value_group;
        self
    }

    /// Tries to match the pattern at the very start of `input`. Returns the
    /// token value and the length of the whole match.
    pub fn match_prefix<'a>(&self, input: &'a str) -> Option<(&'a str, usize)> {
        let captures = self.pattern.as_ref()?.captures(input)?;
        let whole = captures.get(WHOLE_MATCH)?;
        let value = captures
            .get(self.value_group)
            .map(|m| m.as_str())
            .unwrap_or("");
        Some((value, whole.end()))
    }
}
