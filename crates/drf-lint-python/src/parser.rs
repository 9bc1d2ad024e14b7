//! Tree-sitter based Python parser.
//!
//! Parses source with `tree-sitter-python` and lowers the concrete tree into
//! the typed model from [`crate::ast`].

use tree_sitter::{Language, Node, Parser};

use crate::ast::{
    AnnAssign, Assign, ClassDef, Compound, CompoundKind, Expr, FunctionDef, Module, Position, Stmt,
};

/// Clause nodes whose blocks belong to the enclosing compound statement.
const CLAUSE_KINDS: &[&str] = &[
    "elif_clause",
    "else_clause",
    "except_clause",
    "except_group_clause",
    "finally_clause",
    "case_clause",
];

/// Errors produced while parsing Python source.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The Python grammar could not be loaded into the parser.
    #[error("failed to load Python grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// Tree-sitter returned no tree.
    #[error("parser aborted before producing a tree")]
    Aborted,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (0-indexed).
        column: usize,
    },
}

/// Parses Python source into a [`Module`].
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    /// Creates a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    /// Parses a whole module.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Syntax`] if the source is not valid Python, or
    /// another variant if Tree-sitter itself fails.
    pub fn parse(&self, source: &str) -> Result<Module, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ParseError::Aborted)?;
        let root = tree.root_node();

        if root.has_error() {
            let position = first_error(root).map_or_else(|| position(&root), |n| position(&n));
            tracing::debug!(
                "syntax error at {}:{}",
                position.line,
                position.column
            );
            return Err(ParseError::Syntax {
                line: position.line,
                column: position.column,
            });
        }

        let lowering = Lowering { src };
        Ok(Module {
            body: lowering.block(&root),
        })
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

fn position(node: &Node<'_>) -> Position {
    let start = node.start_position();
    Position::new(start.row + 1, start.column)
}

/// Named children, minus comments.
fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

fn has_comma(node: &Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|child| child.kind() == ",");
    found
}

fn first_error<'t>(node: Node<'t>) -> Option<Node<'t>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|child| child.has_error())
        .find_map(first_error)
}

/// Converts Tree-sitter nodes into [`Stmt`] and [`Expr`] values.
struct Lowering<'s> {
    src: &'s [u8],
}

impl Lowering<'_> {
    fn text(&self, node: &Node<'_>) -> String {
        std::str::from_utf8(&self.src[node.start_byte()..node.end_byte()])
            .unwrap_or("")
            .to_owned()
    }

    /// Lowers every statement directly inside `node` (a `module` or `block`).
    fn block(&self, node: &Node<'_>) -> Vec<Stmt> {
        named_children(node)
            .iter()
            .map(|child| self.stmt(child))
            .collect()
    }

    fn field_block(&self, node: &Node<'_>, field: &str) -> Vec<Stmt> {
        node.child_by_field_name(field)
            .map(|body| self.block(&body))
            .unwrap_or_default()
    }

    fn stmt(&self, node: &Node<'_>) -> Stmt {
        let pos = position(node);
        match node.kind() {
            "class_definition" => Stmt::ClassDef(self.class_def(node, pos)),
            "function_definition" => Stmt::FunctionDef(self.function_def(node, pos)),
            "decorated_definition" => match node.child_by_field_name("definition") {
                Some(definition) => self.stmt(&definition),
                None => other_stmt(node, pos),
            },
            "expression_statement" => self.expression_statement(node, pos),
            "if_statement" => self.compound(node, CompoundKind::If, pos),
            "for_statement" => self.compound(node, CompoundKind::For, pos),
            "while_statement" => self.compound(node, CompoundKind::While, pos),
            "try_statement" => self.compound(node, CompoundKind::Try, pos),
            "with_statement" => self.compound(node, CompoundKind::With, pos),
            "match_statement" => self.compound(node, CompoundKind::Match, pos),
            _ => other_stmt(node, pos),
        }
    }

    fn class_def(&self, node: &Node<'_>, position: Position) -> ClassDef {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n))
            .unwrap_or_default();
        let bases = node
            .child_by_field_name("superclasses")
            .map(|args| self.arguments(&args))
            .unwrap_or_default();

        ClassDef {
            name,
            bases,
            body: self.field_block(node, "body"),
            position,
        }
    }

    fn function_def(&self, node: &Node<'_>, position: Position) -> FunctionDef {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n))
            .unwrap_or_default();

        let mut cursor = node.walk();
        let is_async = node
            .children(&mut cursor)
            .any(|child| child.kind() == "async");

        FunctionDef {
            name,
            is_async,
            body: self.field_block(node, "body"),
            position,
        }
    }

    fn expression_statement(&self, node: &Node<'_>, position: Position) -> Stmt {
        let children = named_children(node);
        match children.as_slice() {
            [only] if only.kind() == "assignment" => self
                .assignment(only, position)
                .unwrap_or_else(|| other_stmt(only, position)),
            [only] => Stmt::Other {
                kind: only.kind().to_owned(),
                position,
            },
            _ => other_stmt(node, position),
        }
    }

    /// Lowers an `assignment` node, following `a = b = value` chains.
    fn assignment(&self, node: &Node<'_>, position: Position) -> Option<Stmt> {
        let left = node.child_by_field_name("left")?;

        if let Some(annotation) = node.child_by_field_name("type") {
            let annotation = named_children(&annotation)
                .first()
                .map_or_else(|| self.expr(&annotation), |inner| self.expr(inner));
            return Some(Stmt::AnnAssign(AnnAssign {
                target: self.expr(&left),
                annotation,
                value: node.child_by_field_name("right").map(|r| self.expr(&r)),
                position,
            }));
        }

        let mut targets = vec![self.expr(&left)];
        let mut right = node.child_by_field_name("right")?;
        while right.kind() == "assignment" {
            targets.push(self.expr(&right.child_by_field_name("left")?));
            right = right.child_by_field_name("right")?;
        }

        Some(Stmt::Assign(Assign {
            targets,
            value: self.expr(&right),
            position,
        }))
    }

    fn compound(&self, node: &Node<'_>, kind: CompoundKind, position: Position) -> Stmt {
        let mut bodies = Vec::new();
        self.collect_bodies(node, &mut bodies);
        Stmt::Compound(Compound {
            kind,
            bodies,
            position,
        })
    }

    fn collect_bodies(&self, node: &Node<'_>, bodies: &mut Vec<Vec<Stmt>>) {
        for child in named_children(node) {
            match child.kind() {
                // A match body holds `case_clause`s rather than statements.
                "block" if node.kind() == "match_statement" => {
                    self.collect_bodies(&child, bodies);
                }
                "block" => bodies.push(self.block(&child)),
                kind if CLAUSE_KINDS.contains(&kind) => self.collect_bodies(&child, bodies),
                _ => {}
            }
        }
    }

    fn arguments(&self, node: &Node<'_>) -> Vec<Expr> {
        named_children(node)
            .iter()
            .map(|arg| match arg.kind() {
                "keyword_argument" => arg
                    .child_by_field_name("value")
                    .map_or_else(|| self.expr(arg), |value| self.expr(&value)),
                _ => self.expr(arg),
            })
            .collect()
    }

    fn elements(&self, node: &Node<'_>) -> Vec<Expr> {
        named_children(node)
            .iter()
            .map(|child| self.expr(child))
            .collect()
    }

    fn expr(&self, node: &Node<'_>) -> Expr {
        let position = position(node);
        match node.kind() {
            "identifier" => Expr::Name {
                id: self.text(node),
                position,
            },
            "list" => Expr::List {
                elts: self.elements(node),
                position,
            },
            // `(x) = ...` is a parenthesized name, `(x,) = ...` a tuple.
            "tuple_pattern" if !has_comma(node) => match named_children(node).as_slice() {
                [inner] => self.expr(inner),
                _ => Expr::Tuple {
                    elts: self.elements(node),
                    position,
                },
            },
            "tuple" | "expression_list" | "pattern_list" | "tuple_pattern" => Expr::Tuple {
                elts: self.elements(node),
                position,
            },
            "list_pattern" => Expr::List {
                elts: self.elements(node),
                position,
            },
            // Parentheses are not nodes in Python's own AST.
            "parenthesized_expression" => match named_children(node).first() {
                Some(inner) => self.expr(inner),
                None => other_expr(node, position),
            },
            "attribute" => {
                let (Some(object), Some(attr)) = (
                    node.child_by_field_name("object"),
                    node.child_by_field_name("attribute"),
                ) else {
                    return other_expr(node, position);
                };
                Expr::Attribute {
                    value: Box::new(self.expr(&object)),
                    attr: self.text(&attr),
                    position,
                }
            }
            "call" => {
                let Some(function) = node.child_by_field_name("function") else {
                    return other_expr(node, position);
                };
                Expr::Call {
                    func: Box::new(self.expr(&function)),
                    args: node
                        .child_by_field_name("arguments")
                        .map(|args| self.arguments(&args))
                        .unwrap_or_default(),
                    position,
                }
            }
            "list_splat" | "list_splat_pattern" => match named_children(node).first() {
                Some(inner) => Expr::Starred {
                    value: Box::new(self.expr(inner)),
                    position,
                },
                None => other_expr(node, position),
            },
            _ => other_expr(node, position),
        }
    }
}

fn other_stmt(node: &Node<'_>, position: Position) -> Stmt {
    Stmt::Other {
        kind: node.kind().to_owned(),
        position,
    }
}

fn other_expr(node: &Node<'_>, position: Position) -> Expr {
    Expr::Other {
        kind: node.kind().to_owned(),
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Module {
        PythonParser::new().parse(src).expect("valid python")
    }

    fn first_class(module: &Module) -> &ClassDef {
        match &module.body[0] {
            Stmt::ClassDef(class) => class,
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn empty_source() {
        assert!(parse("").body.is_empty());
    }

    #[test]
    fn lowers_class_with_bases_and_body() {
        let module = parse("class V(APIView, mixins.ListModelMixin):\n    x = 1\n    pass\n");
        let class = first_class(&module);
        assert_eq!(class.name, "V");
        assert_eq!(class.bases.len(), 2);
        assert_eq!(class.bases[0].as_name(), Some("APIView"));
        assert!(matches!(class.bases[1], Expr::Attribute { .. }));
        assert_eq!(class.body.len(), 2);
        assert_eq!(class.position, Position::new(1, 0));
    }

    #[test]
    fn assignment_position_is_statement_start() {
        let module = parse("class V(APIView):\n    permission_classes = [AllowAny]\n");
        let class = first_class(&module);
        let Stmt::Assign(assign) = &class.body[0] else {
            panic!("expected assignment");
        };
        assert_eq!(assign.position, Position::new(2, 4));
        assert_eq!(assign.targets.len(), 1);
        assert_eq!(assign.targets[0].as_name(), Some("permission_classes"));
        let elts = assign.value.sequence_elts().expect("list literal");
        assert_eq!(elts[0].as_name(), Some("AllowAny"));
    }

    #[test]
    fn chained_assignment_collects_all_targets() {
        let module = parse("a = b = [X]\n");
        let Stmt::Assign(assign) = &module.body[0] else {
            panic!("expected assignment");
        };
        let names: Vec<_> = assign.targets.iter().filter_map(Expr::as_name).collect();
        assert_eq!(names, ["a", "b"]);
        assert!(matches!(assign.value, Expr::List { .. }));
    }

    #[test]
    fn bare_and_parenthesized_tuples() {
        let module = parse("a = X, Y\nb = (X, Y)\nc = (X)\nd = ([X])\n");
        let values: Vec<&Expr> = module
            .body
            .iter()
            .map(|stmt| match stmt {
                Stmt::Assign(assign) => &assign.value,
                other => panic!("expected assignment, got {other:?}"),
            })
            .collect();
        assert!(matches!(values[0], Expr::Tuple { elts, .. } if elts.len() == 2));
        assert!(matches!(values[1], Expr::Tuple { elts, .. } if elts.len() == 2));
        assert_eq!(values[2].as_name(), Some("X"));
        assert!(matches!(values[3], Expr::List { .. }));
    }

    #[test]
    fn parenthesized_target_is_a_name() {
        let module = parse("(a) = [X]\n(b,) = [X]\n");
        let targets: Vec<&Expr> = module
            .body
            .iter()
            .map(|stmt| match stmt {
                Stmt::Assign(assign) => &assign.targets[0],
                other => panic!("expected assignment, got {other:?}"),
            })
            .collect();
        assert_eq!(targets[0].as_name(), Some("a"));
        assert!(matches!(targets[1], Expr::Tuple { elts, .. } if elts.len() == 1));
    }

    #[test]
    fn comments_are_not_elements() {
        let module = parse("a = [\n    # leading\n    X,  # trailing\n    Y,\n]\n");
        let Stmt::Assign(assign) = &module.body[0] else {
            panic!("expected assignment");
        };
        assert_eq!(assign.value.sequence_elts().map(<[Expr]>::len), Some(2));
    }

    #[test]
    fn annotated_assignment_is_separate_variant() {
        let module = parse("a: list = [X]\nb: int\n");
        assert!(matches!(
            &module.body[0],
            Stmt::AnnAssign(AnnAssign { value: Some(_), .. })
        ));
        assert!(matches!(
            &module.body[1],
            Stmt::AnnAssign(AnnAssign { value: None, .. })
        ));
    }

    #[test]
    fn augmented_assignment_is_other() {
        let module = parse("a += [X]\n");
        assert!(matches!(
            &module.body[0],
            Stmt::Other { kind, .. } if kind == "augmented_assignment"
        ));
    }

    #[test]
    fn decorated_class_lowers_to_class() {
        let module = parse("@decorator\nclass V:\n    pass\n");
        let class = first_class(&module);
        assert_eq!(class.name, "V");
        assert_eq!(class.position, Position::new(2, 0));
    }

    #[test]
    fn compound_statements_keep_all_bodies() {
        let module = parse(
            "if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n\
             try:\n    pass\nexcept E:\n    pass\nfinally:\n    pass\n",
        );
        let Stmt::Compound(if_stmt) = &module.body[0] else {
            panic!("expected compound");
        };
        assert_eq!(if_stmt.kind, CompoundKind::If);
        assert_eq!(if_stmt.bodies.len(), 3);

        let Stmt::Compound(try_stmt) = &module.body[1] else {
            panic!("expected compound");
        };
        assert_eq!(try_stmt.kind, CompoundKind::Try);
        assert_eq!(try_stmt.bodies.len(), 3);
    }

    #[test]
    fn match_cases_become_bodies() {
        let module = parse("match x:\n    case 1:\n        a = 1\n    case _:\n        a = 2\n");
        let Stmt::Compound(match_stmt) = &module.body[0] else {
            panic!("expected compound");
        };
        assert_eq!(match_stmt.kind, CompoundKind::Match);
        assert_eq!(match_stmt.bodies.len(), 2);
    }

    #[test]
    fn async_function_is_flagged() {
        let module = parse("async def handler():\n    pass\n");
        let Stmt::FunctionDef(function) = &module.body[0] else {
            panic!("expected function");
        };
        assert!(function.is_async);
        assert_eq!(function.name, "handler");
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = PythonParser::new()
            .parse("class V(:\n    pass\n")
            .expect_err("invalid python");
        assert!(matches!(err, ParseError::Syntax { line: 1, .. }));
    }

    #[test]
    fn column_is_byte_offset() {
        let module = parse("if True:\n\tx = [A]\n");
        let Stmt::Compound(if_stmt) = &module.body[0] else {
            panic!("expected compound");
        };
        assert_eq!(if_stmt.bodies[0][0].position(), Position::new(2, 1));
    }
}
