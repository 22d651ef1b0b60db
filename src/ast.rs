use std::fmt::Display;

/// A fully parsed arithmetic expression.
///
/// Every `BinaryOp` owns both of its operands; trees are never partial.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Literal {
        value: f64,
    },
    BinaryOp {
        operator: Op,
        left: Box<Ast>,
        right: Box<Ast>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
}

impl Ast {
    pub fn binary(operator: Op, left: Ast, right: Ast) -> Self {
        Ast::BinaryOp {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Height of the tree; a lone literal has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Ast::Literal { .. } => 1,
            Ast::BinaryOp { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Plus => write!(f, "+"),
            Op::Minus => write!(f, "-"),
            Op::Star => write!(f, "*"),
            Op::Slash => write!(f, "/"),
        }
    }
}

impl Display for Ast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ast::Literal { value } => write!(f, "{value}"),
            Ast::BinaryOp {
                operator,
                left,
                right,
            } => write!(f, "({operator} {left} {right})"),
        }
    }
}
