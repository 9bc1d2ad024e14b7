//! Depth-first traversal over the syntax model.
//!
//! Mirrors the shape of `syn::visit`: every `visit_*` method defaults to the
//! matching `walk_*` function, so an implementation overrides only the nodes
//! it cares about and calls `walk_*` to keep descending.
//!
//! ```ignore
//! use drf_lint_python::visit::{self, Visit};
//! use drf_lint_python::ClassDef;
//!
//! struct ClassNames(Vec<String>);
//!
//! impl Visit for ClassNames {
//!     fn visit_class_def(&mut self, node: &ClassDef) {
//!         self.0.push(node.name.clone());
//!         visit::walk_class_def(self, node);
//!     }
//! }
//! ```

use crate::ast::{AnnAssign, Assign, ClassDef, Compound, Expr, FunctionDef, Module, Stmt};

/// Syntax tree visitor.
pub trait Visit {
    /// Visits a whole module.
    fn visit_module(&mut self, node: &Module) {
        walk_module(self, node);
    }

    /// Visits any statement.
    fn visit_stmt(&mut self, node: &Stmt) {
        walk_stmt(self, node);
    }

    /// Visits a class definition.
    fn visit_class_def(&mut self, node: &ClassDef) {
        walk_class_def(self, node);
    }

    /// Visits a function definition.
    fn visit_function_def(&mut self, node: &FunctionDef) {
        walk_function_def(self, node);
    }

    /// Visits an assignment.
    fn visit_assign(&mut self, node: &Assign) {
        walk_assign(self, node);
    }

    /// Visits an annotated assignment.
    fn visit_ann_assign(&mut self, node: &AnnAssign) {
        walk_ann_assign(self, node);
    }

    /// Visits a compound statement.
    fn visit_compound(&mut self, node: &Compound) {
        walk_compound(self, node);
    }

    /// Visits any expression.
    fn visit_expr(&mut self, node: &Expr) {
        walk_expr(self, node);
    }
}

/// Visits every top-level statement.
pub fn walk_module<V: Visit + ?Sized>(v: &mut V, node: &Module) {
    for stmt in &node.body {
        v.visit_stmt(stmt);
    }
}

/// Dispatches to the variant-specific visit method.
pub fn walk_stmt<V: Visit + ?Sized>(v: &mut V, node: &Stmt) {
    match node {
        Stmt::ClassDef(class) => v.visit_class_def(class),
        Stmt::FunctionDef(function) => v.visit_function_def(function),
        Stmt::Assign(assign) => v.visit_assign(assign),
        Stmt::AnnAssign(assign) => v.visit_ann_assign(assign),
        Stmt::Compound(compound) => v.visit_compound(compound),
        Stmt::Other { .. } => {}
    }
}

/// Visits bases, then body statements.
pub fn walk_class_def<V: Visit + ?Sized>(v: &mut V, node: &ClassDef) {
    for base in &node.bases {
        v.visit_expr(base);
    }
    for stmt in &node.body {
        v.visit_stmt(stmt);
    }
}

/// Visits body statements.
pub fn walk_function_def<V: Visit + ?Sized>(v: &mut V, node: &FunctionDef) {
    for stmt in &node.body {
        v.visit_stmt(stmt);
    }
}

/// Visits targets, then the value.
pub fn walk_assign<V: Visit + ?Sized>(v: &mut V, node: &Assign) {
    for target in &node.targets {
        v.visit_expr(target);
    }
    v.visit_expr(&node.value);
}

/// Visits target, annotation, then the value if present.
pub fn walk_ann_assign<V: Visit + ?Sized>(v: &mut V, node: &AnnAssign) {
    v.visit_expr(&node.target);
    v.visit_expr(&node.annotation);
    if let Some(value) = &node.value {
        v.visit_expr(value);
    }
}

/// Visits every nested body in order.
pub fn walk_compound<V: Visit + ?Sized>(v: &mut V, node: &Compound) {
    for body in &node.bodies {
        for stmt in body {
            v.visit_stmt(stmt);
        }
    }
}

/// Visits sub-expressions.
pub fn walk_expr<V: Visit + ?Sized>(v: &mut V, node: &Expr) {
    match node {
        Expr::List { elts, .. } | Expr::Tuple { elts, .. } => {
            for elt in elts {
                v.visit_expr(elt);
            }
        }
        Expr::Attribute { value, .. } | Expr::Starred { value, .. } => v.visit_expr(value),
        Expr::Call { func, args, .. } => {
            v.visit_expr(func);
            for arg in args {
                v.visit_expr(arg);
            }
        }
        Expr::Name { .. } | Expr::Other { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PythonParser;

    #[derive(Default)]
    struct Collector {
        classes: Vec<String>,
        names: Vec<String>,
    }

    impl Visit for Collector {
        fn visit_class_def(&mut self, node: &ClassDef) {
            self.classes.push(node.name.clone());
            walk_class_def(self, node);
        }

        fn visit_expr(&mut self, node: &Expr) {
            if let Some(id) = node.as_name() {
                self.names.push(id.to_owned());
            }
            walk_expr(self, node);
        }
    }

    fn collect(src: &str) -> Collector {
        let module = PythonParser::new().parse(src).expect("valid python");
        let mut collector = Collector::default();
        collector.visit_module(&module);
        collector
    }

    #[test]
    fn reaches_classes_in_every_scope() {
        let collector = collect(
            "class A:\n    class B:\n        pass\n\
             def f():\n    class C:\n        pass\n\
             if x:\n    class D:\n        pass\n\
             else:\n    class E:\n        pass\n",
        );
        assert_eq!(collector.classes, ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn reaches_nested_expressions() {
        let collector = collect("a = [b, c.d, f(g), *h]\n");
        assert_eq!(collector.names, ["a", "b", "c", "f", "g", "h"]);
    }
}
