//! Component recognition.
//!
//! Classifies resolved values into component shapes: classes that render,
//! functions and arrows that return markup, factory-call objects, and
//! wrapper calls around any of those. The markup predicate inspects return
//! statements of the candidate itself and never descends into nested
//! function bodies, so a render helper defined inside a plain function does
//! not promote its host.

use std::rc::Rc;

use oxc_ast::ast::{
    ArrowFunctionExpression, CallExpression, Class, ClassElement, Expression, Function,
    MethodDefinitionKind, ObjectExpression, Statement,
};
use oxc_span::Span;

use crate::scope::{Binding, ScopeId};
use crate::session::{FileContext, Session};
use crate::value::{self, NodeKey, Value, ValueNode};

/// Call names that construct elements without JSX syntax.
const ELEMENT_FACTORIES: &[&str] = &["createElement", "cloneElement", "h"];

/// Call names that build a component from a spec object.
const COMPONENT_FACTORIES: &[&str] = &["createReactClass", "createClass"];

/// Call names of the built-in wrappers that forward component identity.
const KNOWN_WRAPPERS: &[&str] = &["forwardRef", "memo"];

/// Superclass names that mark a class as a component.
const COMPONENT_SUPERCLASSES: &[&str] = &["Component", "PureComponent"];

/// The syntactic shape of a recognized component definition.
#[derive(Debug, Clone)]
pub enum ComponentShape<'a> {
    /// A class component.
    Class(&'a Class<'a>),
    /// A function declaration or function expression component.
    Function(&'a Function<'a>),
    /// An arrow function component.
    Arrow(&'a ArrowFunctionExpression<'a>),
    /// A factory call with its spec object, e.g. `createClass({...})`.
    FactoryObject {
        /// The factory call.
        call: &'a CallExpression<'a>,
        /// The spec object passed to it.
        object: &'a ObjectExpression<'a>,
    },
    /// A wrapper call around an inner component shape.
    Wrapper {
        /// The outermost wrapper call; this is the canonical node.
        call: &'a CallExpression<'a>,
        /// The wrapped shape.
        inner: Box<ComponentShape<'a>>,
    },
}

impl<'a> ComponentShape<'a> {
    /// Span of the canonical (outermost) node.
    pub fn span(&self) -> Span {
        match self {
            ComponentShape::Class(class) => class.span,
            ComponentShape::Function(function) => function.span,
            ComponentShape::Arrow(arrow) => arrow.span,
            ComponentShape::FactoryObject { call, .. } => call.span,
            ComponentShape::Wrapper { call, .. } => call.span,
        }
    }

    /// Span of the innermost wrapped shape.
    pub fn innermost_span(&self) -> Span {
        match self {
            ComponentShape::Wrapper { inner, .. } => inner.innermost_span(),
            other => other.span(),
        }
    }

    /// The shape inside all wrapper layers.
    pub fn innermost(&self) -> &ComponentShape<'a> {
        match self {
            ComponentShape::Wrapper { inner, .. } => inner.innermost(),
            other => other,
        }
    }

    /// Name carried by the shape itself, if any.
    pub fn own_name(&self) -> Option<&str> {
        match self {
            ComponentShape::Class(class) => class.id.as_ref().map(|id| id.name.as_str()),
            ComponentShape::Function(function) => {
                function.id.as_ref().map(|id| id.name.as_str())
            }
            ComponentShape::Arrow(_) | ComponentShape::FactoryObject { .. } => None,
            ComponentShape::Wrapper { inner, .. } => inner.own_name(),
        }
    }
}

/// A classified shape plus the file and scope its canonical node lives in.
#[derive(Clone)]
pub struct Located<'a> {
    /// The recognized shape.
    pub shape: ComponentShape<'a>,
    /// File the canonical node belongs to.
    pub file: Rc<FileContext<'a>>,
    /// Scope the canonical node is evaluated in.
    pub scope: ScopeId,
}

/// One recognized component definition.
#[derive(Clone)]
pub struct Definition<'a> {
    /// File the canonical node lives in.
    pub file: Rc<FileContext<'a>>,
    /// Scope the canonical node is evaluated in.
    pub scope: ScopeId,
    /// The recognized shape.
    pub shape: ComponentShape<'a>,
    /// Identity of the canonical node, used for deduplication.
    pub key: NodeKey,
    /// Name inferred from the binding or export the definition was reached
    /// through.
    pub name_hint: Option<String>,
    /// Span starts of nodes whose leading docblock documents the component,
    /// ordered from the reference site toward the definition.
    pub doc_anchors: Vec<u32>,
}

impl<'a> Definition<'a> {
    /// Builds a definition from a located shape.
    pub fn new(
        located: Located<'a>,
        name_hint: Option<String>,
        mut doc_anchors: Vec<u32>,
    ) -> Self {
        let span = located.shape.span();
        if !doc_anchors.contains(&span.start) {
            doc_anchors.push(span.start);
        }
        let inner = located.shape.innermost_span().start;
        if !doc_anchors.contains(&inner) {
            doc_anchors.push(inner);
        }
        let name_hint = name_hint.or_else(|| located.shape.own_name().map(str::to_string));
        Self {
            key: (located.file.id, span.start, span.end),
            file: located.file,
            scope: located.scope,
            shape: located.shape,
            name_hint,
            doc_anchors,
        }
    }
}

/// Classifies a resolved value as a component shape.
pub fn classify<'a>(session: &Session<'a>, value: &Value<'a>) -> Option<Located<'a>> {
    let file = &value.file;
    let scope = value.scope;
    match value.node {
        ValueNode::Class(class) => class_is_component(class).then(|| Located {
            shape: ComponentShape::Class(class),
            file: Rc::clone(file),
            scope,
        }),
        ValueNode::Function(function) => function_returns_markup(session, file, scope, function)
            .then(|| Located {
                shape: ComponentShape::Function(function),
                file: Rc::clone(file),
                scope,
            }),
        ValueNode::Expr(expression) => match value::unwrap_expression(expression) {
            Expression::ClassExpression(class) => class_is_component(class).then(|| Located {
                shape: ComponentShape::Class(class),
                file: Rc::clone(file),
                scope,
            }),
            Expression::FunctionExpression(function) => {
                function_returns_markup(session, file, scope, function).then(|| Located {
                    shape: ComponentShape::Function(function),
                    file: Rc::clone(file),
                    scope,
                })
            }
            Expression::ArrowFunctionExpression(arrow) => {
                arrow_returns_markup(session, file, scope, arrow).then(|| Located {
                    shape: ComponentShape::Arrow(arrow),
                    file: Rc::clone(file),
                    scope,
                })
            }
            Expression::CallExpression(call) => classify_call(session, file, scope, call),
            _ => None,
        },
    }
}

/// Classifies a call expression: a component factory or a known wrapper.
///
/// A wrapper around a component defined in another file is dropped and the
/// inner definition stands alone; the definition belongs to its file.
pub fn classify_call<'a>(
    session: &Session<'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    call: &'a CallExpression<'a>,
) -> Option<Located<'a>> {
    let callee = callee_final_name(&call.callee)?;

    if COMPONENT_FACTORIES.contains(&callee) {
        let argument = call.arguments.first()?.as_expression()?;
        let resolved =
            value::resolve_to_value(session, Value::expr(Rc::clone(file), scope, argument));
        if resolved.file.id != file.id {
            return None;
        }
        if let Some(Expression::ObjectExpression(object)) =
            resolved.as_expr().map(value::unwrap_expression)
        {
            return Some(Located {
                shape: ComponentShape::FactoryObject { call, object },
                file: Rc::clone(file),
                scope,
            });
        }
        return None;
    }

    if KNOWN_WRAPPERS.contains(&callee) {
        let argument = call.arguments.first()?.as_expression()?;
        let resolved =
            value::resolve_to_value(session, Value::expr(Rc::clone(file), scope, argument));
        let inner = classify(session, &resolved)?;
        if inner.file.id != file.id {
            return Some(inner);
        }
        return Some(Located {
            shape: ComponentShape::Wrapper {
                call,
                inner: Box::new(inner.shape),
            },
            file: Rc::clone(file),
            scope,
        });
    }

    None
}

/// Classifies a resolved value, trying generic wrapper-call resolution when
/// direct classification fails.
pub fn classify_or_unwrap<'a>(
    session: &Session<'a>,
    resolved: &Value<'a>,
) -> Option<Located<'a>> {
    if let Some(found) = classify(session, resolved) {
        return Some(found);
    }
    if let Some(Expression::CallExpression(call)) =
        resolved.as_expr().map(value::unwrap_expression)
    {
        return crate::hoc::resolve_wrapper_call(session, &resolved.file, resolved.scope, call);
    }
    None
}

/// The last name in a callee chain: `f` for `f(...)`, `memo` for
/// `React.memo(...)`.
pub(crate) fn callee_final_name<'a>(callee: &'a Expression<'a>) -> Option<&'a str> {
    match value::unwrap_expression(callee) {
        Expression::Identifier(ident) => Some(ident.name.as_str()),
        Expression::StaticMemberExpression(member) => Some(member.property.name.as_str()),
        _ => None,
    }
}

/// Whether a class is a component: extends a known base class or declares a
/// `render` method.
pub fn class_is_component(class: &Class<'_>) -> bool {
    if let Some(super_class) = &class.super_class {
        let name = match value::unwrap_expression(super_class) {
            Expression::Identifier(ident) => Some(ident.name.as_str()),
            Expression::StaticMemberExpression(member) => Some(member.property.name.as_str()),
            _ => None,
        };
        if name.is_some_and(|name| COMPONENT_SUPERCLASSES.contains(&name)) {
            return true;
        }
    }
    class.body.body.iter().any(|element| match element {
        ClassElement::MethodDefinition(method) => {
            method.kind == MethodDefinitionKind::Method
                && value::property_key_is(&method.key, "render")
        }
        _ => false,
    })
}

/// Whether a function's return statements produce markup.
pub(crate) fn function_returns_markup<'a>(
    session: &Session<'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    function: &'a Function<'a>,
) -> bool {
    let Some(body) = &function.body else {
        return false;
    };
    let scope = file
        .scopes
        .scope_of_function(function.span.start)
        .unwrap_or(scope);
    let mut returns = Vec::new();
    collect_returned_expressions(&body.statements, &mut returns);
    returns
        .iter()
        .any(|expression| expr_is_markup(session, file, scope, expression, 0))
}

/// Whether an arrow's body (expression or statements) produces markup.
pub(crate) fn arrow_returns_markup<'a>(
    session: &Session<'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    arrow: &'a ArrowFunctionExpression<'a>,
) -> bool {
    let scope = file
        .scopes
        .scope_of_function(arrow.span.start)
        .unwrap_or(scope);
    if arrow.expression {
        if let Some(Statement::ExpressionStatement(statement)) = arrow.body.statements.first() {
            return expr_is_markup(session, file, scope, &statement.expression, 0);
        }
        return false;
    }
    let mut returns = Vec::new();
    collect_returned_expressions(&arrow.body.statements, &mut returns);
    returns
        .iter()
        .any(|expression| expr_is_markup(session, file, scope, expression, 0))
}

/// Collects the argument of every `return` reachable from these statements
/// without entering nested function or class bodies. Return statements only
/// occur at statement level, so walking statements (not expressions) is
/// what keeps nested render helpers out.
pub(crate) fn collect_returned_expressions<'a>(
    statements: &'a [Statement<'a>],
    out: &mut Vec<&'a Expression<'a>>,
) {
    for statement in statements {
        match statement {
            Statement::ReturnStatement(ret) => {
                if let Some(argument) = &ret.argument {
                    out.push(argument);
                }
            }
            Statement::BlockStatement(block) => {
                collect_returned_expressions(&block.body, out);
            }
            Statement::IfStatement(if_statement) => {
                collect_returned_statement(&if_statement.consequent, out);
                if let Some(alternate) = &if_statement.alternate {
                    collect_returned_statement(alternate, out);
                }
            }
            Statement::SwitchStatement(switch) => {
                for case in &switch.cases {
                    collect_returned_expressions(&case.consequent, out);
                }
            }
            Statement::TryStatement(try_statement) => {
                collect_returned_expressions(&try_statement.block.body, out);
                if let Some(handler) = &try_statement.handler {
                    collect_returned_expressions(&handler.body.body, out);
                }
                if let Some(finalizer) = &try_statement.finalizer {
                    collect_returned_expressions(&finalizer.body, out);
                }
            }
            Statement::ForStatement(for_statement) => {
                collect_returned_statement(&for_statement.body, out);
            }
            Statement::ForInStatement(for_in) => {
                collect_returned_statement(&for_in.body, out);
            }
            Statement::ForOfStatement(for_of) => {
                collect_returned_statement(&for_of.body, out);
            }
            Statement::WhileStatement(while_statement) => {
                collect_returned_statement(&while_statement.body, out);
            }
            Statement::DoWhileStatement(do_while) => {
                collect_returned_statement(&do_while.body, out);
            }
            Statement::LabeledStatement(labeled) => {
                collect_returned_statement(&labeled.body, out);
            }
            _ => {}
        }
    }
}

fn collect_returned_statement<'a>(
    statement: &'a Statement<'a>,
    out: &mut Vec<&'a Expression<'a>>,
) {
    collect_returned_expressions(std::slice::from_ref(statement), out);
}

/// Whether an expression evaluates to markup: JSX, an element factory call,
/// or a branch construct with a markup arm. Identifier and member operands
/// are resolved before giving up.
fn expr_is_markup<'a>(
    session: &Session<'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    expression: &'a Expression<'a>,
    depth: u8,
) -> bool {
    if depth > 8 {
        return false;
    }
    match value::unwrap_expression(expression) {
        Expression::JSXElement(_) | Expression::JSXFragment(_) => true,
        Expression::ConditionalExpression(conditional) => {
            expr_is_markup(session, file, scope, &conditional.consequent, depth + 1)
                || expr_is_markup(session, file, scope, &conditional.alternate, depth + 1)
        }
        Expression::LogicalExpression(logical) => {
            expr_is_markup(session, file, scope, &logical.left, depth + 1)
                || expr_is_markup(session, file, scope, &logical.right, depth + 1)
        }
        Expression::SequenceExpression(sequence) => sequence
            .expressions
            .last()
            .is_some_and(|last| expr_is_markup(session, file, scope, last, depth + 1)),
        Expression::CallExpression(call) => callee_final_name(&call.callee)
            .is_some_and(|name| ELEMENT_FACTORIES.contains(&name)),
        Expression::Identifier(_) | Expression::StaticMemberExpression(_) => {
            let before = Value::expr(Rc::clone(file), scope, expression);
            let key = before.key();
            let resolved = value::resolve_to_value(session, before);
            if resolved.key() == key {
                return false;
            }
            match resolved.as_expr() {
                Some(inner) => {
                    expr_is_markup(session, &resolved.file, resolved.scope, inner, depth + 1)
                }
                None => false,
            }
        }
        _ => false,
    }
}

/// Returns the specifier when `name` is bound to a module import in scope.
/// Used by composition tracking.
pub(crate) fn import_source_of<'a>(
    file: &FileContext<'a>,
    scope: ScopeId,
    name: &str,
) -> Option<&'a str> {
    match file.scopes.lookup_value(scope, name) {
        Some((_, Binding::Import { source, .. })) => Some(source),
        _ => None,
    }
}
