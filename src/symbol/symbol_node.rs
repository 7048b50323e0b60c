use std::fmt;

use crate::{
    parsing::tokenizer::{Arity, Token},
    symbol::symbol::SymbolId,
};

/// A child slot of a [`SymbolNode`].
#[derive(Clone, Debug, PartialEq)]
pub enum Branch {
    Node(Box<SymbolNode>),
    Sequence(Vec<SymbolNode>),
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Branch::Node(node) => write!(f, "{}", node),
            Branch::Sequence(nodes) => {
                let inner = nodes
                    .iter()
                    .map(|node| node.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "[{}]", inner)
            }
        }
    }
}

/// Parse tree node: the token that produced it plus up to three children.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolNode {
    token: Token,
    first: Option<Branch>,
    second: Option<Branch>,
    third: Option<Branch>,
}

impl SymbolNode {
    pub fn leaf(token: Token) -> Self {
        SymbolNode {
            token,
            first: None,
            second: None,
            third: None,
        }
    }

    pub fn unary(token: Token, first: SymbolNode) -> Self {
        let mut node = Self::leaf(token);
        node.first = Some(Branch::Node(Box::new(first)));
        node
    }

    pub fn binary(token: Token, left: SymbolNode, right: SymbolNode) -> Self {
        let mut node = Self::unary(token, left);
        node.second = Some(Branch::Node(Box::new(right)));
        node
    }

    pub fn ternary(token: Token, first: SymbolNode, second: SymbolNode, third: SymbolNode) -> Self {
        let mut node = Self::binary(token, first, second);
        node.third = Some(Branch::Node(Box::new(third)));
        node
    }

    pub fn sequence(token: Token, children: Vec<SymbolNode>) -> Self {
        let mut node = Self::leaf(token);
        node.first = Some(Branch::Sequence(children));
        node
    }

    pub fn get_token(&self) -> &Token {
        &self.token
    }

    pub fn get_id(&self) -> &SymbolId {
        self.token.get_id()
    }

    pub fn get_value(&self) -> Option<&str> {
        self.token.get_value()
    }

    pub fn get_first(&self) -> Option<&Branch> {
        self.first.as_ref()
    }

    pub fn get_second(&self) -> Option<&Branch> {
        self.second.as_ref()
    }

    pub fn get_third(&self) -> Option<&Branch> {
        self.third.as_ref()
    }

    /// Children stored as a sequence in the first slot. Empty for any other
    /// shape.
    pub fn get_sequence(&self) -> &[SymbolNode] {
        match &self.first {
            Some(Branch::Sequence(nodes)) => nodes,
            _ => &[],
        }
    }

    pub fn get_depth(&self) -> usize {
        let children = [&self.first, &self.second, &self.third]
            .into_iter()
            .flatten()
            .flat_map(|branch| match branch {
                Branch::Node(node) => vec![node.get_depth()],
                Branch::Sequence(nodes) => nodes.iter().map(|n| n.get_depth()).collect(),
            })
            .max();
        1 + children.unwrap_or(0)
    }
}

impl fmt::Display for SymbolNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.get_value().unwrap_or("");
        match self.token.get_arity() {
            _ if self.get_id().is_end() => write!(f, "(end)"),
            Arity::Name => write!(f, "(name {})", value),
            Arity::Literal => write!(f, "(literal {})", value),
            Arity::Operator => {
                write!(f, "({}", self.get_id())?;
                for branch in [&self.first, &self.second, &self.third].into_iter().flatten() {
                    write!(f, " {}", branch)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod test_symbol_node {
    use super::*;

    fn literal(value: &str) -> SymbolNode {
        SymbolNode::leaf(Token::new(SymbolId::named("number"), Some(value.into())).as_literal())
    }

    #[test]
    fn test_symbol_node_displays_as_s_expression() {
        let plus = Token::new("+".into(), Some("+".into()));
        let node = SymbolNode::binary(plus, literal("1"), literal("2"));
        assert_eq!(node.to_string(), "(\"+\" (literal 1) (literal 2))");

        let array = Token::new("[".into(), Some("[".into()));
        let node = SymbolNode::sequence(array, vec![literal("1"), literal("2")]);
        assert_eq!(node.to_string(), "(\"[\" [(literal 1), (literal 2)])");

        let end = SymbolNode::leaf(Token::end());
        assert_eq!(end.to_string(), "(end)");
    }

    #[test]
    fn test_symbol_node_gets_sequence() {
        let array = Token::new("[".into(), Some("[".into()));
        let node = SymbolNode::sequence(array.clone(), vec![literal("1")]);
        assert_eq!(node.get_sequence().len(), 1);
        assert_eq!(SymbolNode::leaf(array).get_sequence().len(), 0);
        assert_eq!(literal("3").get_sequence().len(), 0);
    }

    #[test]
    fn test_symbol_node_gets_depth() {
        let plus = Token::new("+".into(), Some("+".into()));
        let inner = SymbolNode::binary(plus.clone(), literal("1"), literal("2"));
        let outer = SymbolNode::binary(plus, inner, literal("3"));
        assert_eq!(literal("1").get_depth(), 1);
        assert_eq!(outer.get_depth(), 3);
    }
}
