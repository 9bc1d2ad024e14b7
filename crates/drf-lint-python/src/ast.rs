//! Typed Python syntax model.
//!
//! Only the shapes rules care about get their own variant. Everything else
//! is kept as `Other` with its Tree-sitter kind so traversal stays complete.

/// Start position of a node in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within line).
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A parsed Python module.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Module {
    /// Top-level statements in source order.
    pub body: Vec<Stmt>,
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `class Name(bases): ...`
    ClassDef(ClassDef),
    /// `def name(...): ...` or `async def name(...): ...`
    FunctionDef(FunctionDef),
    /// `a = value` or `a = b = value`
    Assign(Assign),
    /// `a: T` or `a: T = value`
    AnnAssign(AnnAssign),
    /// `if`, `for`, `while`, `try`, `with`, `match` and their clauses.
    Compound(Compound),
    /// Any other simple statement (`import`, `return`, `pass`, bare expressions...).
    Other {
        /// Tree-sitter node kind.
        kind: String,
        /// Statement start.
        position: Position,
    },
}

impl Stmt {
    /// Returns the start position of this statement.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::ClassDef(node) => node.position,
            Self::FunctionDef(node) => node.position,
            Self::Assign(node) => node.position,
            Self::AnnAssign(node) => node.position,
            Self::Compound(node) => node.position,
            Self::Other { position, .. } => *position,
        }
    }
}

/// A class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    /// Class name.
    pub name: String,
    /// Positional bases and keyword values from the class header.
    pub bases: Vec<Expr>,
    /// Direct body statements.
    pub body: Vec<Stmt>,
    /// Position of the `class` keyword.
    pub position: Position,
}

/// A function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    /// Function name.
    pub name: String,
    /// Whether declared with `async def`.
    pub is_async: bool,
    /// Direct body statements.
    pub body: Vec<Stmt>,
    /// Position of the `def` (or `async`) keyword.
    pub position: Position,
}

/// A plain assignment statement.
///
/// `a = b = value` has two targets, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assign {
    /// Assignment targets.
    pub targets: Vec<Expr>,
    /// Assigned value.
    pub value: Expr,
    /// Statement start.
    pub position: Position,
}

/// An annotated assignment statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnAssign {
    /// Assignment target.
    pub target: Expr,
    /// Type annotation.
    pub annotation: Expr,
    /// Assigned value, if any.
    pub value: Option<Expr>,
    /// Statement start.
    pub position: Position,
}

/// Kind of compound statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    /// `if` / `elif` / `else`
    If,
    /// `for` / `async for`
    For,
    /// `while`
    While,
    /// `try` / `except` / `else` / `finally`
    Try,
    /// `with` / `async with`
    With,
    /// `match` and its `case` clauses
    Match,
}

/// A compound statement, reduced to its nested bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound {
    /// Which statement this is.
    pub kind: CompoundKind,
    /// Nested blocks in source order (consequence, `elif`s, `else`, handlers...).
    pub bodies: Vec<Vec<Stmt>>,
    /// Statement start.
    pub position: Position,
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bare identifier.
    Name {
        /// Identifier text.
        id: String,
        /// Expression start.
        position: Position,
    },
    /// `[a, b]`
    List {
        /// Elements in source order.
        elts: Vec<Expr>,
        /// Expression start.
        position: Position,
    },
    /// `(a, b)` or `a, b`
    Tuple {
        /// Elements in source order.
        elts: Vec<Expr>,
        /// Expression start.
        position: Position,
    },
    /// `value.attr`
    Attribute {
        /// Object being accessed.
        value: Box<Expr>,
        /// Attribute name.
        attr: String,
        /// Expression start.
        position: Position,
    },
    /// `func(args)`
    Call {
        /// Callee.
        func: Box<Expr>,
        /// Positional and keyword argument values.
        args: Vec<Expr>,
        /// Expression start.
        position: Position,
    },
    /// `*value`
    Starred {
        /// Unpacked expression.
        value: Box<Expr>,
        /// Expression start.
        position: Position,
    },
    /// Anything else (literals, operators, comprehensions...).
    Other {
        /// Tree-sitter node kind.
        kind: String,
        /// Expression start.
        position: Position,
    },
}

impl Expr {
    /// Returns the start position of this expression.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Name { position, .. }
            | Self::List { position, .. }
            | Self::Tuple { position, .. }
            | Self::Attribute { position, .. }
            | Self::Call { position, .. }
            | Self::Starred { position, .. }
            | Self::Other { position, .. } => *position,
        }
    }

    /// Returns the identifier if this is a bare name.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Returns the elements if this is a list or tuple literal.
    #[must_use]
    pub fn sequence_elts(&self) -> Option<&[Expr]> {
        match self {
            Self::List { elts, .. } | Self::Tuple { elts, .. } => Some(elts),
            _ => None,
        }
    }
}
