//! Whole-tree resolver.
//!
//! Walks every node in the file and collects each component definition,
//! exported or not. Nested nodes of a recognized definition are not
//! scanned again, so a render method inside a recognized class never
//! produces a second definition. Wrapper calls subsume an already-recorded
//! inner definition instead of adding a sibling.

use std::rc::Rc;

use oxc_ast::AstKind;
use oxc_ast::ast::{ArrowFunctionExpression, CallExpression, Class, Function};
use oxc_ast_visit::{Visit, walk};
use oxc_semantic::ScopeFlags;
use rustc_hash::FxHashSet;

use crate::arena::arena_ref;
use crate::component::{self, ComponentShape, Definition, Located};
use crate::error::Result;
use crate::resolver::{Resolver, walk_util};
use crate::scope::ScopeId;
use crate::session::{FileContext, Session};
use crate::value::NodeKey;

/// Finds every component definition in the file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FindAllDefinitions;

impl Resolver for FindAllDefinitions {
    fn resolve<'a>(
        &self,
        session: &Session<'a>,
        file: &Rc<FileContext<'a>>,
    ) -> Result<Vec<Definition<'a>>> {
        let mut collector = AllCollector {
            session,
            file: Rc::clone(file),
            scopes: vec![file.scopes.root()],
            ancestors: Vec::new(),
            definitions: Vec::new(),
            seen: FxHashSet::default(),
        };
        collector.visit_program(file.program);
        Ok(collector.definitions)
    }
}

struct AllCollector<'s, 'a> {
    session: &'s Session<'a>,
    file: Rc<FileContext<'a>>,
    scopes: Vec<ScopeId>,
    ancestors: Vec<AstKind<'a>>,
    definitions: Vec<Definition<'a>>,
    seen: FxHashSet<NodeKey>,
}

impl<'a> AllCollector<'_, 'a> {
    fn current_scope(&self) -> ScopeId {
        self.scopes
            .last()
            .copied()
            .unwrap_or_else(|| self.file.scopes.root())
    }

    fn add(&mut self, located: Located<'a>, node_start: u32) {
        let definition = Definition::new(
            located,
            walk_util::name_hint(&self.ancestors),
            walk_util::doc_anchors(&self.ancestors, node_start),
        );
        if self.seen.insert(definition.key) {
            self.definitions.push(definition);
        }
    }

    fn located(&self, shape: ComponentShape<'a>) -> Located<'a> {
        Located {
            shape,
            file: Rc::clone(&self.file),
            scope: self.current_scope(),
        }
    }

    /// Drops a previously collected definition whose canonical node is the
    /// innermost shape of a wrapper found later.
    fn subsume_inner(&mut self, located: &Located<'a>) {
        let inner = located.shape.innermost_span();
        let key: NodeKey = (located.file.id, inner.start, inner.end);
        self.definitions.retain(|definition| definition.key != key);
    }
}

impl<'a> Visit<'a> for AllCollector<'_, 'a> {
    fn enter_node(&mut self, kind: AstKind<'a>) {
        self.ancestors.push(kind);
    }

    fn leave_node(&mut self, _kind: AstKind<'a>) {
        self.ancestors.pop();
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let class = unsafe { arena_ref(class) };
        if component::class_is_component(class) {
            let located = self.located(ComponentShape::Class(class));
            self.add(located, class.span.start);
            return;
        }
        walk::walk_class(self, class);
    }

    fn visit_function(&mut self, function: &Function<'a>, flags: ScopeFlags) {
        // SAFETY: the node lives in the session arena for 'a.
        let function = unsafe { arena_ref(function) };
        let scope = self.current_scope();
        if component::function_returns_markup(self.session, &self.file, scope, function) {
            let located = self.located(ComponentShape::Function(function));
            self.add(located, function.span.start);
            return;
        }
        let inner_scope = self
            .file
            .scopes
            .scope_of_function(function.span.start)
            .unwrap_or(scope);
        self.scopes.push(inner_scope);
        walk::walk_function(self, function, flags);
        self.scopes.pop();
    }

    fn visit_arrow_function_expression(&mut self, arrow: &ArrowFunctionExpression<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let arrow = unsafe { arena_ref(arrow) };
        let scope = self.current_scope();
        if component::arrow_returns_markup(self.session, &self.file, scope, arrow) {
            let located = self.located(ComponentShape::Arrow(arrow));
            self.add(located, arrow.span.start);
            return;
        }
        let inner_scope = self
            .file
            .scopes
            .scope_of_function(arrow.span.start)
            .unwrap_or(scope);
        self.scopes.push(inner_scope);
        walk::walk_arrow_function_expression(self, arrow);
        self.scopes.pop();
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let call = unsafe { arena_ref(call) };
        let scope = self.current_scope();
        if let Some(located) =
            component::classify_call(self.session, &self.file, scope, call)
        {
            // The classification may have resolved the wrapped argument to a
            // definition this walk already recorded on its own.
            self.subsume_inner(&located);
            self.add(located, call.span.start);
            return;
        }
        walk::walk_call_expression(self, call);
    }
}
