//! Abstract syntax tree for NEL expressions
//!
//! The node set is closed: the parser only ever produces these five kinds
//! and the evaluator matches them exhaustively. Nodes are immutable once
//! built, so a parsed tree can be shared (for example behind an `Arc`)
//! and evaluated from several threads at once.

use std::fmt;

use crate::value::Value;

/// A node in the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal value
    Literal(LiteralNode),

    /// A dotted variable path
    Identifier(IdentifierNode),

    /// A prefix operator application
    Unary(UnaryNode),

    /// A binary operator application
    Binary(BinaryNode),

    /// A helper call
    Call(CallNode),
}

/// A literal: number, string, `true`, `false` or `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    /// The value the literal denotes
    pub value: Value,
}

/// A variable reference such as `nation.military.soldiers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierNode {
    /// Path segments, outermost first
    pub segments: Vec<String>,
}

impl IdentifierNode {
    /// The path joined with dots, as written in the source.
    pub fn path(&self) -> String {
        self.segments.join(".")
    }
}

/// `!operand` or `-operand`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryNode {
    /// The operator
    pub op: UnaryOp,
    /// The operand
    pub operand: Box<Node>,
}

/// `left op right`.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryNode {
    /// Left operand
    pub left: Box<Node>,
    /// The operator
    pub op: BinaryOp,
    /// Right operand
    pub right: Box<Node>,
}

/// `name(arg, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallNode {
    /// Helper name
    pub name: String,
    /// Argument expressions in source order
    pub args: Vec<Node>,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Logical negation `!`
    Not,
    /// Numeric negation `-`
    Neg,
}

impl UnaryOp {
    /// The operator as written in source.
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
}

impl BinaryOp {
    /// The operator as written in source.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }

    /// Binding strength, from 1 (`||`) to 5 (`*`, `/`, `%`).
    /// Every level is left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => 3,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 5,
        }
    }

    /// Whether this is `&&` or `||`.
    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Constructors
// ═══════════════════════════════════════════════════════════════════════

impl Node {
    /// A literal node.
    pub fn literal(value: impl Into<Value>) -> Self {
        Node::Literal(LiteralNode {
            value: value.into(),
        })
    }

    /// An identifier node from path segments.
    pub fn identifier<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Node::Identifier(IdentifierNode {
            segments: segments.into_iter().map(Into::into).collect(),
        })
    }

    /// A unary node.
    pub fn unary(op: UnaryOp, operand: Node) -> Self {
        Node::Unary(UnaryNode {
            op,
            operand: Box::new(operand),
        })
    }

    /// A binary node.
    pub fn binary(left: Node, op: BinaryOp, right: Node) -> Self {
        Node::Binary(BinaryNode {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// A call node.
    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        Node::Call(CallNode {
            name: name.into(),
            args,
        })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Height of the tree; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Node::Literal(_) | Node::Identifier(_) => 1,
            Node::Unary(u) => 1 + u.operand.depth(),
            Node::Binary(b) => 1 + b.left.depth().max(b.right.depth()),
            Node::Call(c) => 1 + c.args.iter().map(Node::depth).max().unwrap_or(0),
        }
    }

    /// Every variable path referenced, in source order, without duplicates.
    ///
    /// Hosts use this to check a rule against the shape of a profile
    /// before evaluating it.
    pub fn identifiers(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.collect_identifiers(&mut paths);
        paths
    }

    fn collect_identifiers(&self, paths: &mut Vec<String>) {
        match self {
            Node::Literal(_) => {}
            Node::Identifier(id) => {
                let path = id.path();
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
            Node::Unary(u) => u.operand.collect_identifiers(paths),
            Node::Binary(b) => {
                b.left.collect_identifiers(paths);
                b.right.collect_identifiers(paths);
            }
            Node::Call(c) => {
                for arg in &c.args {
                    arg.collect_identifiers(paths);
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Display
// ═══════════════════════════════════════════════════════════════════════

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully parenthesized rendering: `1 + 2 * 3` displays as `(1 + (2 * 3))`.
/// The output parses back to an equal tree; strings containing a double
/// quote are rendered with single quotes since literals have no escapes.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(LiteralNode {
                value: Value::String(s),
            }) if s.contains('"') => write!(f, "'{}'", s),
            Node::Literal(lit) => write!(f, "{}", lit.value),
            Node::Identifier(id) => write!(f, "{}", id.path()),
            Node::Unary(u) => write!(f, "({}{})", u.op, u.operand),
            Node::Binary(b) => write!(f, "({} {} {})", b.left, b.op, b.right),
            Node::Call(c) => {
                write!(f, "{}(", c.name)?;
                for (i, arg) in c.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nesting() {
        let node = Node::binary(
            Node::literal(1),
            BinaryOp::Add,
            Node::binary(Node::literal(2), BinaryOp::Mul, Node::literal(3)),
        );
        assert_eq!(node.to_string(), "(1 + (2 * 3))");
    }

    #[test]
    fn test_display_unary_and_call() {
        let node = Node::unary(
            UnaryOp::Not,
            Node::call(
                "has_alliance",
                vec![Node::identifier(["nation", "id"]), Node::literal("x")],
            ),
        );
        assert_eq!(node.to_string(), "(!has_alliance(nation.id, \"x\"))");
    }

    #[test]
    fn test_display_string_quoting() {
        assert_eq!(Node::literal("plain").to_string(), "\"plain\"");
        assert_eq!(Node::literal("say \"hi\"").to_string(), "'say \"hi\"'");
    }

    #[test]
    fn test_depth() {
        assert_eq!(Node::literal(1).depth(), 1);
        let node = Node::unary(
            UnaryOp::Neg,
            Node::binary(Node::literal(1), BinaryOp::Sub, Node::literal(2)),
        );
        assert_eq!(node.depth(), 3);
        assert_eq!(Node::call("now", vec![]).depth(), 1);
    }

    #[test]
    fn test_identifiers_deduplicated_in_order() {
        let node = Node::binary(
            Node::binary(
                Node::identifier(["a", "b"]),
                BinaryOp::Gt,
                Node::identifier(["c"]),
            ),
            BinaryOp::And,
            Node::call("f", vec![Node::identifier(["a", "b"])]),
        );
        assert_eq!(node.identifiers(), vec!["a.b".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_precedence_levels() {
        assert!(BinaryOp::Or.precedence() < BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() < BinaryOp::Lt.precedence());
        assert_eq!(BinaryOp::Eq.precedence(), BinaryOp::Ge.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Rem.precedence());
        assert!(BinaryOp::Or.is_logical());
        assert!(!BinaryOp::Eq.is_logical());
    }
}
