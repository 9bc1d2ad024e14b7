//! Parses a realistic DRF views module end to end.

use drf_lint_python::visit::{walk_class_def, Visit};
use drf_lint_python::{Assign, ClassDef, Expr, PythonParser, Stmt};

const VIEWS: &str = r#"from rest_framework import permissions, viewsets
from rest_framework.decorators import action

from .models import Invoice
from .serializers import InvoiceSerializer


@method_decorator(cache_page(60), name="dispatch")
class InvoiceViewSet(viewsets.ModelViewSet):
    """Invoices for the current tenant."""

    queryset = Invoice.objects.all()
    serializer_class = InvoiceSerializer
    permission_classes = (permissions.IsAdminUser, IsAuthenticated)

    @action(detail=True, methods=["post"])
    def pay(self, request, pk=None):
        permission_classes = [AllowAny]
        return Response(status=204)

    class Meta:
        permission_classes = [
            AllowAny,  # public
        ]


if settings.DEBUG:
    class DebugView(APIView):
        permission_classes: list = [AllowAny]
"#;

#[derive(Default)]
struct Collector {
    classes: Vec<(String, usize)>,
    permission_lines: Vec<usize>,
}

impl Visit for Collector {
    fn visit_class_def(&mut self, node: &ClassDef) {
        self.classes.push((node.name.clone(), node.position.line));
        walk_class_def(self, node);
    }

    fn visit_assign(&mut self, node: &Assign) {
        if node.targets.iter().any(|t| t.as_name() == Some("permission_classes")) {
            self.permission_lines.push(node.position.line);
        }
    }
}

#[test]
fn lowers_views_module() {
    let module = PythonParser::new().parse(VIEWS).expect("valid python");

    let mut collector = Collector::default();
    collector.visit_module(&module);

    assert_eq!(
        collector.classes,
        vec![
            ("InvoiceViewSet".to_string(), 9),
            ("Meta".to_string(), 21),
            ("DebugView".to_string(), 28),
        ]
    );
    // The annotated assignment in DebugView is not an `Assign`.
    assert_eq!(collector.permission_lines, vec![14, 18, 22]);
}

#[test]
fn class_body_keeps_statement_order() {
    let module = PythonParser::new().parse(VIEWS).expect("valid python");
    let class = module
        .body
        .iter()
        .find_map(|stmt| match stmt {
            Stmt::ClassDef(class) => Some(class),
            _ => None,
        })
        .expect("class at module level");

    assert_eq!(class.bases.len(), 1);
    assert!(matches!(class.bases[0], Expr::Attribute { ref attr, .. } if attr == "ModelViewSet"));

    let permission = class
        .body
        .iter()
        .find_map(|stmt| match stmt {
            Stmt::Assign(assign) if assign.targets[0].as_name() == Some("permission_classes") => {
                Some(assign)
            }
            _ => None,
        })
        .expect("permission_classes assignment");
    let elts = permission.value.sequence_elts().expect("tuple literal");
    assert_eq!(elts.len(), 2);
    assert_eq!(elts[1].as_name(), Some("IsAuthenticated"));
    assert_eq!(elts[0].as_name(), None);
}
