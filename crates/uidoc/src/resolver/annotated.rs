//! Annotation-driven resolver.
//!
//! Finds definitions by an opt-in docblock marker instead of structural
//! recognition. A class, function, arrow, or factory call is a definition
//! when the marker appears in its leading docblock or in the docblock of a
//! statement it climbs to (variable declaration, export, assignment). The
//! markup predicate is deliberately not consulted; the annotation is the
//! author's word.

use std::rc::Rc;

use oxc_ast::AstKind;
use oxc_ast::ast::{ArrowFunctionExpression, CallExpression, Class, Expression, Function};
use oxc_ast_visit::{Visit, walk};
use oxc_semantic::ScopeFlags;
use rustc_hash::FxHashSet;

use crate::arena::arena_ref;
use crate::component::{self, ComponentShape, Definition, Located};
use crate::error::Result;
use crate::resolver::{Resolver, walk_util};
use crate::scope::ScopeId;
use crate::session::{FileContext, Session};
use crate::value::{self, NodeKey, Value};

/// Default annotation marker.
pub const DEFAULT_ANNOTATION: &str = "@component";

/// Finds definitions carrying an annotation marker.
#[derive(Debug, Clone)]
pub struct FindAnnotatedDefinitions {
    annotation: String,
}

impl FindAnnotatedDefinitions {
    /// Resolver matching the default `@component` marker.
    pub fn new() -> Self {
        Self::with_annotation(DEFAULT_ANNOTATION)
    }

    /// Resolver matching a custom marker string.
    pub fn with_annotation(annotation: impl Into<String>) -> Self {
        Self {
            annotation: annotation.into(),
        }
    }
}

impl Default for FindAnnotatedDefinitions {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for FindAnnotatedDefinitions {
    fn resolve<'a>(
        &self,
        session: &Session<'a>,
        file: &Rc<FileContext<'a>>,
    ) -> Result<Vec<Definition<'a>>> {
        let mut collector = AnnotatedCollector {
            session,
            file: Rc::clone(file),
            annotation: &self.annotation,
            scopes: vec![file.scopes.root()],
            ancestors: Vec::new(),
            definitions: Vec::new(),
            seen: FxHashSet::default(),
        };
        collector.visit_program(file.program);
        Ok(collector.definitions)
    }
}

struct AnnotatedCollector<'s, 'a> {
    session: &'s Session<'a>,
    file: Rc<FileContext<'a>>,
    annotation: &'s str,
    scopes: Vec<ScopeId>,
    ancestors: Vec<AstKind<'a>>,
    definitions: Vec<Definition<'a>>,
    seen: FxHashSet<NodeKey>,
}

impl<'a> AnnotatedCollector<'_, 'a> {
    fn current_scope(&self) -> ScopeId {
        self.scopes
            .last()
            .copied()
            .unwrap_or_else(|| self.file.scopes.root())
    }

    /// Whether the marker appears in the docblock of the node itself or of
    /// any climbable ancestor directly above it.
    fn is_annotated(&self, node_start: u32) -> bool {
        for anchor in walk_util::doc_anchors(&self.ancestors, node_start) {
            if let Some(docblock) = self.file.docblock_at(anchor) {
                if docblock.contains(self.annotation) {
                    return true;
                }
            }
        }
        false
    }

    fn add(&mut self, shape: ComponentShape<'a>, node_start: u32) {
        let located = Located {
            shape,
            file: Rc::clone(&self.file),
            scope: self.current_scope(),
        };
        let definition = Definition::new(
            located,
            walk_util::name_hint(&self.ancestors),
            walk_util::doc_anchors(&self.ancestors, node_start),
        );
        if self.seen.insert(definition.key) {
            self.definitions.push(definition);
        }
    }
}

impl<'a> Visit<'a> for AnnotatedCollector<'_, 'a> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        self.ancestors.push(kind);
    }

    fn leave_node(&mut self, _kind: AstKind<'a>) {
        self.ancestors.pop();
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let class = unsafe { arena_ref(class) };
        if self.is_annotated(class.span.start) {
            self.add(ComponentShape::Class(class), class.span.start);
            return;
        }
        walk::walk_class(self, class);
    }

    fn visit_function(&mut self, function: &Function<'a>, flags: ScopeFlags) {
        // SAFETY: the node lives in the session arena for 'a.
        let function = unsafe { arena_ref(function) };
        if self.is_annotated(function.span.start) {
            self.add(ComponentShape::Function(function), function.span.start);
            return;
        }
        let scope = self
            .file
            .scopes
            .scope_of_function(function.span.start)
            .unwrap_or_else(|| self.current_scope());
        self.scopes.push(scope);
        walk::walk_function(self, function, flags);
        self.scopes.pop();
    }

    fn visit_arrow_function_expression(&mut self, arrow: &ArrowFunctionExpression<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let arrow = unsafe { arena_ref(arrow) };
        if self.is_annotated(arrow.span.start) {
            self.add(ComponentShape::Arrow(arrow), arrow.span.start);
            return;
        }
        let scope = self
            .file
            .scopes
            .scope_of_function(arrow.span.start)
            .unwrap_or_else(|| self.current_scope());
        self.scopes.push(scope);
        walk::walk_arrow_function_expression(self, arrow);
        self.scopes.pop();
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let call = unsafe { arena_ref(call) };
        if self.is_annotated(call.span.start) {
            let scope = self.current_scope();
            // An annotated factory call documents its spec object; other
            // annotated calls are treated as wrappers around whatever the
            // first argument resolves to, or stand alone as a wrapper with
            // no recognizable inner shape.
            if let Some(located) =
                component::classify_call(self.session, &self.file, scope, call)
            {
                let node_start = call.span.start;
                let located_file = located.file.id;
                if located_file == self.file.id {
                    self.add(located.shape, node_start);
                } else {
                    let definition = Definition::new(
                        located,
                        walk_util::name_hint(&self.ancestors),
                        walk_util::doc_anchors(&self.ancestors, node_start),
                    );
                    if self.seen.insert(definition.key) {
                        self.definitions.push(definition);
                    }
                }
                return;
            }
            if let Some(inner) = first_argument_component(self.session, &self.file, scope, call) {
                self.add(
                    ComponentShape::Wrapper {
                        call,
                        inner: Box::new(inner),
                    },
                    call.span.start,
                );
                return;
            }
        }
        walk::walk_call_expression(self, call);
    }
}

/// Classifies the first resolvable argument of an annotated call, accepting
/// function-like arguments without the markup predicate.
fn first_argument_component<'a>(
    session: &Session<'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    call: &'a CallExpression<'a>,
) -> Option<ComponentShape<'a>> {
    let argument = call.arguments.first()?.as_expression()?;
    let resolved = value::resolve_to_value(session, Value::expr(Rc::clone(file), scope, argument));
    if resolved.file.id != file.id {
        return None;
    }
    match resolved.as_expr().map(value::unwrap_expression) {
        Some(Expression::FunctionExpression(function)) => {
            Some(ComponentShape::Function(function))
        }
        Some(Expression::ArrowFunctionExpression(arrow)) => Some(ComponentShape::Arrow(arrow)),
        Some(Expression::ClassExpression(class)) => Some(ComponentShape::Class(class)),
        _ => match resolved.node {
            value::ValueNode::Function(function) => Some(ComponentShape::Function(function)),
            value::ValueNode::Class(class) => Some(ComponentShape::Class(class)),
            _ => None,
        },
    }
}
