use log::debug;

use crate::{
    constants::*,
    parsing::{
        parser::{Parser, ParserResult},
        tokenizer::Token,
    },
    symbol::{
        symbol::{NullDenotation, SymbolId},
        symbol_node::SymbolNode,
        symbol_table::{SymbolTable, SymbolTableError},
    },
};

/// Builds the symbol table for JSON documents.
///
/// Registration order is tokenizer priority. Every symbol has binding power
/// zero: JSON has no operators, only grouping, so no left denotations exist.
pub fn json_symbol_table() -> Result<SymbolTable, SymbolTableError> {
    debug!("Building JSON symbol table");
    let mut table = SymbolTable::new();

    table.pattern(JSON_NUMBER, JSON_NUMBER_PATTERN)?;
    table
        .pattern(JSON_STRING, JSON_STRING_PATTERN)?
        .set_value_group(JSON_STRING_VALUE_GROUP);

    table.constant(NULL)?;
    table.constant(FALSE)?;
    table.constant(TRUE)?;

    table.symbol(COMMA, DEFAULT_BINDING_POWER)?;

    table.symbol(RIGHT_BRACKET, DEFAULT_BINDING_POWER)?;
    table
        .symbol(LEFT_BRACKET, DEFAULT_BINDING_POWER)?
        .set_nud(NullDenotation::Custom(array));

    table.symbol(COLON, DEFAULT_BINDING_POWER)?;

    table.symbol(RIGHT_BRACE, DEFAULT_BINDING_POWER)?;
    table
        .symbol(LEFT_BRACE, DEFAULT_BINDING_POWER)?
        .set_nud(NullDenotation::Custom(object));

    Ok(table)
}

/// `[` element (`,` element)* `]`, elements kept in order.
fn array(parser: &mut Parser<'_>, token: Token) -> ParserResult {
    let comma = SymbolId::literal(COMMA);
    let closing = SymbolId::literal(RIGHT_BRACKET);

    let mut elements = vec![];
    if !parser.is_at(&closing) {
        loop {
            elements.push(parser.expression(DEFAULT_BINDING_POWER)?);
            if !parser.is_at(&comma) {
                break;
            }
            parser.advance(Some(&comma))?;
        }
    }
    parser.advance(Some(&closing))?;
    Ok(SymbolNode::sequence(token, elements))
}

/// `{` key `:` value (`,` key `:` value)* `}`. Keys and values are stored as
/// one flat alternating sequence.
fn object(parser: &mut Parser<'_>, token: Token) -> ParserResult {
    let comma = SymbolId::literal(COMMA);
    let colon = SymbolId::literal(COLON);
    let closing = SymbolId::literal(RIGHT_BRACE);

    let mut members = vec![];
    if !parser.is_at(&closing) {
        loop {
            members.push(parser.expression(DEFAULT_BINDING_POWER)?);
            parser.advance(Some(&colon))?;
            members.push(parser.expression(DEFAULT_BINDING_POWER)?);
            if !parser.is_at(&comma) {
                break;
            }
            parser.advance(Some(&comma))?;
        }
    }
    parser.advance(Some(&closing))?;
    Ok(SymbolNode::sequence(token, members))
}
