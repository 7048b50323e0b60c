use std::fmt;

use log::trace;

use crate::{
    constants::{DEFAULT_BINDING_POWER, DEFAULT_MAX_DEPTH},
    parsing::tokenizer::{Token, Tokenizer},
    symbol::{
        symbol::{BindingPower, LeftDenotation, NullDenotation, SymbolId},
        symbol_node::SymbolNode,
        symbol_table::SymbolTable,
    },
};

pub type ParserResult = Result<SymbolNode, ParserError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserError {
    UnknownInput(String),
    NoNullDenotation(SymbolId),
    NoLeftDenotation(SymbolId),
    ExpectedButFound(SymbolId, SymbolId),
    NoTokensRemainingToInterpret,
    TrailingInput(SymbolId),
    NestingTooDeep(usize),
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::UnknownInput(input) => write!(f, "Unknown input: {}", input),
            ParserError::NoNullDenotation(SymbolId::End) => write!(f, "Unexpected end of input"),
            ParserError::NoNullDenotation(id) => {
                write!(f, "Syntax error ({}): expected the start of an expression", id)
            }
            ParserError::NoLeftDenotation(id) => {
                write!(f, "Syntax error ({}): cannot continue an expression", id)
            }
            ParserError::ExpectedButFound(expected, found) => {
                write!(f, "Expected {}. Currently: {}", expected, found)
            }
            ParserError::NoTokensRemainingToInterpret => write!(f, "Unexpected end of input"),
            ParserError::TrailingInput(id) => {
                write!(f, "Unexpected input after the document: {}", id)
            }
            ParserError::NestingTooDeep(max_depth) => {
                write!(f, "Maximum nesting depth of {} exceeded", max_depth)
            }
        }
    }
}

impl std::error::Error for ParserError {}

/// Top-down operator precedence parser over one token stream.
///
/// Holds exactly one look-ahead token. Behaviors come from the symbol table,
/// which is only borrowed, so a grammar cannot change while a parse runs.
#[derive(Debug)]
pub struct Parser<'t> {
    table: &'t SymbolTable,
    tokens: Tokenizer<'t>,
    token: Token,
    depth: usize,
    max_depth: usize,
}

impl<'t> Parser<'t> {
    /// Primes the look-ahead token from `tokens`.
    pub fn new(table: &'t SymbolTable, mut tokens: Tokenizer<'t>) -> Result<Self, ParserError> {
        let token = tokens
            .next()
            .ok_or(ParserError::NoTokensRemainingToInterpret)??;
        Ok(Parser {
            table,
            tokens,
            token,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    /// Limits how many expressions may be open at once. Every nested
    /// container or operand counts as one level.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn parse(table: &'t SymbolTable, input: &'t str) -> ParserResult {
        let mut parser = Self::new(table, Tokenizer::new(table, input))?;
        parser.expression(DEFAULT_BINDING_POWER)
    }

    pub fn expression(&mut self, rbp: BindingPower) -> ParserResult {
        if self.depth >= self.max_depth {
            return Err(ParserError::NestingTooDeep(self.max_depth));
        }
        self.depth += 1;
        let result = self.parse_expression(rbp);
        self.depth -= 1;
        result
    }

    fn parse_expression(&mut self, rbp: BindingPower) -> ParserResult {
        let token = self.take_token()?;
        trace!("nud {} (rbp {})", token, rbp);
        let mut left = self.null_denotation(token)?;
        while rbp < self.table.binding_power(self.token.get_id()) {
            let token = self.take_token()?;
            trace!("led {} (rbp {})", token, rbp);
            left = self.left_denotation(token, left)?;
        }
        Ok(left)
    }

    /// Moves to the next token, first checking that the current one is
    /// `expected` when given.
    pub fn advance(&mut self, expected: Option<&SymbolId>) -> Result<(), ParserError> {
        if let Some(expected) = expected {
            if self.token.get_id() != expected {
                return Err(ParserError::ExpectedButFound(
                    expected.clone(),
                    self.token.get_id().clone(),
                ));
            }
        }
        self.take_token().map(|_| ())
    }

    pub fn get_token(&self) -> &Token {
        &self.token
    }

    pub fn is_at(&self, id: &SymbolId) -> bool {
        self.token.get_id() == id
    }

    pub fn get_table(&self) -> &'t SymbolTable {
        self.table
    }

    /// Fails unless every token has been consumed.
    pub fn finish(&self) -> Result<(), ParserError> {
        if self.token.get_id().is_end() {
            Ok(())
        } else {
            Err(ParserError::TrailingInput(self.token.get_id().clone()))
        }
    }

    fn take_token(&mut self) -> Result<Token, ParserError> {
        let next = match self.tokens.next() {
            Some(result) => result?,
            // Past the end of input the stream keeps answering `End`.
            None if self.token.get_id().is_end() => Token::end(),
            None => return Err(ParserError::NoTokensRemainingToInterpret),
        };
        Ok(std::mem::replace(&mut self.token, next))
    }

    fn null_denotation(&mut self, token: Token) -> ParserResult {
        let table = self.table;
        let nud = table.get(token.get_id()).and_then(|s| s.get_nud());
        match nud {
            None => Err(ParserError::NoNullDenotation(token.get_id().clone())),
            Some(NullDenotation::Literal) => Ok(SymbolNode::leaf(token.as_literal())),
            Some(NullDenotation::Name) => Ok(SymbolNode::leaf(token.as_name())),
            Some(NullDenotation::Constant) => {
                let text = token.get_id().text().map(str::to_string);
                Ok(SymbolNode::leaf(token.as_literal().with_value(text)))
            }
            Some(NullDenotation::Prefix(binding_power)) => {
                let operand = self.expression(*binding_power)?;
                Ok(SymbolNode::unary(token, operand))
            }
            Some(NullDenotation::Group(closing)) => {
                let inner = self.expression(DEFAULT_BINDING_POWER)?;
                self.advance(Some(closing))?;
                Ok(inner)
            }
            Some(NullDenotation::Custom(nud)) => nud(self, token),
        }
    }

    fn left_denotation(&mut self, token: Token, left: SymbolNode) -> ParserResult {
        let table = self.table;
        let Some(symbol) = table.get(token.get_id()) else {
            return Err(ParserError::NoLeftDenotation(token.get_id().clone()));
        };
        let binding_power = symbol.get_binding_power();
        match symbol.get_led() {
            None => Err(ParserError::NoLeftDenotation(token.get_id().clone())),
            Some(LeftDenotation::Infix) => {
                let right = self.expression(binding_power)?;
                Ok(SymbolNode::binary(token, left, right))
            }
            Some(LeftDenotation::InfixRight) => {
                let right = self.expression(binding_power.saturating_sub(1))?;
                Ok(SymbolNode::binary(token, left, right))
            }
            Some(LeftDenotation::Postfix) => Ok(SymbolNode::unary(token, left)),
            Some(LeftDenotation::Custom(led)) => led(self, token, left),
        }
    }
}

#[cfg(test)]
mod test_parser {
    use super::*;
    use crate::symbol::symbol_node::Branch;

    fn arithmetic_table() -> SymbolTable {
        let mut table = SymbolTable::new();
        table.pattern("number", "[0-9]+").unwrap();
        table.name("identifier", "[a-z]+").unwrap();
        table.infix("=", 1).unwrap();
        table.infix("+", 10).unwrap();
        table.infix("-", 10).unwrap();
        table.prefix("-", 100).unwrap();
        table.infix("*", 20).unwrap();
        table.infix_right("^", 30).unwrap();
        table.postfix("!", 40).unwrap();
        table.group("(", ")").unwrap();
        table.symbol(",", 0).unwrap();
        table
    }

    fn conditional(parser: &mut Parser<'_>, token: Token, condition: SymbolNode) -> ParserResult {
        let consequent = parser.expression(0)?;
        parser.advance(Some(&":".into()))?;
        let alternative = parser.expression(0)?;
        Ok(SymbolNode::ternary(token, condition, consequent, alternative))
    }

    fn parse(input: &str) -> Result<String, ParserError> {
        let table = arithmetic_table();
        Parser::parse(&table, input).map(|node| node.to_string())
    }

    #[test]
    fn test_parser_parses() {
        assert_eq!(
            parse("2 + 2 = 4"),
            Ok("(\"=\" (\"+\" (literal 2) (literal 2)) (literal 4))".to_string())
        );
    }

    #[test]
    fn test_parser_respects_binding_power() {
        assert_eq!(
            parse("a + b * c"),
            Ok("(\"+\" (name a) (\"*\" (name b) (name c)))".to_string())
        );
        assert_eq!(
            parse("a * b + c"),
            Ok("(\"+\" (\"*\" (name a) (name b)) (name c))".to_string())
        );
    }

    #[test]
    fn test_parser_associativity() {
        assert_eq!(
            parse("a - b - c"),
            Ok("(\"-\" (\"-\" (name a) (name b)) (name c))".to_string())
        );
        assert_eq!(
            parse("a ^ b ^ c"),
            Ok("(\"^\" (name a) (\"^\" (name b) (name c)))".to_string())
        );
    }

    #[test]
    fn test_parser_parses_prefix_postfix_and_groups() {
        assert_eq!(
            parse("-a * b"),
            Ok("(\"*\" (\"-\" (name a)) (name b))".to_string())
        );
        assert_eq!(
            parse("(a + b) * c!"),
            Ok("(\"*\" (\"+\" (name a) (name b)) (\"!\" (name c)))".to_string())
        );
    }

    #[test]
    fn test_parser_parses_single_atom() {
        let table = arithmetic_table();
        let node = Parser::parse(&table, "x").unwrap();
        assert_eq!(node.get_id(), &SymbolId::named("identifier"));
        assert_eq!(node.get_value(), Some("x"));
        assert!(node.get_first().is_none());
    }

    #[test]
    fn test_parser_builds_children() {
        let table = arithmetic_table();
        let node = Parser::parse(&table, "1 + 2").unwrap();
        let Some(Branch::Node(left)) = node.get_first() else {
            panic!("expected a left operand");
        };
        assert_eq!(left.get_value(), Some("1"));
        assert!(matches!(node.get_second(), Some(Branch::Node(_))));
        assert!(node.get_third().is_none());
    }

    #[test]
    fn test_parser_reports_missing_null_denotation() {
        assert_eq!(parse(", a"), Err(ParserError::NoNullDenotation(",".into())));
        assert_eq!(parse("a + )"), Err(ParserError::NoNullDenotation(")".into())));
        assert_eq!(parse(""), Err(ParserError::NoNullDenotation(SymbolId::End)));
    }

    #[test]
    fn test_parser_reports_missing_left_denotation() {
        let mut table = arithmetic_table();
        table.symbol(",", 5).unwrap();
        assert_eq!(
            Parser::parse(&table, "a , b"),
            Err(ParserError::NoLeftDenotation(",".into()))
        );
    }

    #[test]
    fn test_parser_reports_unclosed_group() {
        assert_eq!(
            parse("(a + b"),
            Err(ParserError::ExpectedButFound(")".into(), SymbolId::End))
        );
    }

    #[test]
    fn test_parser_reports_end_of_input() {
        assert_eq!(parse("a +"), Err(ParserError::NoNullDenotation(SymbolId::End)));
        assert_eq!(
            ParserError::NoNullDenotation(SymbolId::End).to_string(),
            "Unexpected end of input"
        );
    }

    #[test]
    fn test_parser_requires_a_token() {
        let table = arithmetic_table();
        let mut tokens = Tokenizer::new(&table, "");
        tokens.next();
        assert!(matches!(
            Parser::new(&table, tokens),
            Err(ParserError::NoTokensRemainingToInterpret)
        ));
    }

    #[test]
    fn test_parser_reports_lexical_errors() {
        assert_eq!(parse("a + #"), Err(ParserError::UnknownInput("#".to_string())));
    }

    #[test]
    fn test_parser_stops_at_lower_binding_power() {
        let table = arithmetic_table();
        let mut parser = Parser::new(&table, Tokenizer::new(&table, "a + b , c")).unwrap();
        let node = parser.expression(0).unwrap();
        assert_eq!(node.to_string(), "(\"+\" (name a) (name b))");
        assert!(parser.is_at(&",".into()));
        assert_eq!(parser.finish(), Err(ParserError::TrailingInput(",".into())));
        parser.advance(Some(&",".into())).unwrap();
        parser.expression(0).unwrap();
        assert_eq!(parser.finish(), Ok(()));
        assert!(std::ptr::eq(parser.get_table(), &table));
    }

    #[test]
    fn test_parser_runs_custom_left_denotation() {
        let mut table = arithmetic_table();
        table
            .symbol("?", 5)
            .unwrap()
            .set_led(LeftDenotation::Custom(conditional));
        table.symbol(":", 0).unwrap();

        let node = Parser::parse(&table, "a ? b + 1 : c").unwrap();
        assert_eq!(
            node.to_string(),
            "(\"?\" (name a) (\"+\" (name b) (literal 1)) (name c))"
        );
        assert!(matches!(node.get_third(), Some(Branch::Node(_))));

        assert_eq!(
            Parser::parse(&table, "a ? b c").map(|n| n.to_string()),
            Err(ParserError::ExpectedButFound(
                ":".into(),
                SymbolId::named("identifier")
            ))
        );
    }

    #[test]
    fn test_parser_limits_nesting_depth() {
        let table = arithmetic_table();
        let tokens = Tokenizer::new(&table, "((a))");
        let mut parser = Parser::new(&table, tokens).unwrap().with_max_depth(3);
        assert_eq!(parser.expression(0).unwrap().to_string(), "(name a)");

        let tokens = Tokenizer::new(&table, "(((a)))");
        let mut parser = Parser::new(&table, tokens).unwrap().with_max_depth(3);
        assert_eq!(parser.expression(0), Err(ParserError::NestingTooDeep(3)));

        let input = format!("{}a{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(
            parse(&input),
            Err(ParserError::NestingTooDeep(DEFAULT_MAX_DEPTH))
        );
        assert_eq!(
            ParserError::NestingTooDeep(4).to_string(),
            "Maximum nesting depth of 4 exceeded"
        );
    }

    #[test]
    fn test_parser_depth_does_not_grow_with_left_chains() {
        let input = vec!["a"; 1_000].join(" + ");
        assert!(parse(&input).is_ok());
    }

    #[test]
    fn test_parser_advance_checks_expected() {
        let table = arithmetic_table();
        let mut parser = Parser::new(&table, Tokenizer::new(&table, "a b")).unwrap();
        assert_eq!(
            parser.advance(Some(&",".into())),
            Err(ParserError::ExpectedButFound(
                ",".into(),
                SymbolId::named("identifier")
            ))
        );
        parser.advance(None).unwrap();
        assert_eq!(parser.get_token().get_value(), Some("b"));
    }
}
