//! Higher-order wrapper resolution.
//!
//! Known wrappers (`forwardRef`, `memo`) are recognized directly during
//! classification. This module handles the generic case: a call that is not
//! itself recognizable may still produce a component, either because one of
//! its arguments resolves to a component or because its callee is a factory
//! function that returns one. In both cases the call site is the canonical
//! definition node and the discovered component becomes the wrapped inner
//! shape.

use std::rc::Rc;

use oxc_ast::ast::{CallExpression, Expression, Statement};

use crate::component::{self, ComponentShape, Located};
use crate::scope::ScopeId;
use crate::session::{FileContext, Session};
use crate::value::{self, Value, ValueNode};

/// Attempts to interpret `call` as a component-producing wrapper.
pub(crate) fn resolve_wrapper_call<'a>(
    session: &Session<'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    call: &'a CallExpression<'a>,
) -> Option<Located<'a>> {
    // Case 1: some argument resolves to a component. The wrapper is assumed
    // to decorate it, e.g. `styled(Button)` or `connect(map)(Form)`.
    for argument in &call.arguments {
        let Some(expression) = argument.as_expression() else {
            continue;
        };
        let resolved =
            value::resolve_to_value(session, Value::expr(Rc::clone(file), scope, expression));
        if let Some(found) = wrap(session, file, scope, call, &resolved) {
            return Some(found);
        }
    }

    // Case 2: the callee is a factory returning a component, e.g. a curried
    // `connect(...)` whose body returns a markup-returning function.
    let callee =
        value::resolve_to_value(session, Value::expr(Rc::clone(file), scope, &call.callee));
    for candidate in returned_values(&callee) {
        let candidate = value::resolve_to_value(session, candidate);
        if let Some(found) = wrap(session, file, scope, call, &candidate) {
            return Some(found);
        }
    }

    None
}

/// Wraps a classified inner component in the call-site shape, unless the
/// inner definition lives in another file, in which case it stands alone.
fn wrap<'a>(
    session: &Session<'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    call: &'a CallExpression<'a>,
    resolved: &Value<'a>,
) -> Option<Located<'a>> {
    let inner = component::classify(session, resolved)?;
    if inner.file.id != file.id {
        return Some(inner);
    }
    Some(Located {
        shape: ComponentShape::Wrapper {
            call,
            inner: Box::new(inner.shape),
        },
        file: Rc::clone(file),
        scope,
    })
}

/// The values returned by a resolved function or arrow, evaluated in the
/// function's own scope.
fn returned_values<'a>(callee: &Value<'a>) -> Vec<Value<'a>> {
    let (statements, span_start, expression_body) = match callee.node {
        ValueNode::Function(function) => match &function.body {
            Some(body) => (&body.statements, function.span.start, None),
            None => return Vec::new(),
        },
        ValueNode::Expr(expression) => match value::unwrap_expression(expression) {
            Expression::FunctionExpression(function) => match &function.body {
                Some(body) => (&body.statements, function.span.start, None),
                None => return Vec::new(),
            },
            Expression::ArrowFunctionExpression(arrow) => {
                let body_expression = if arrow.expression {
                    match arrow.body.statements.first() {
                        Some(Statement::ExpressionStatement(statement)) => {
                            Some(&statement.expression)
                        }
                        _ => None,
                    }
                } else {
                    None
                };
                (&arrow.body.statements, arrow.span.start, body_expression)
            }
            _ => return Vec::new(),
        },
        ValueNode::Class(_) => return Vec::new(),
    };

    let scope = callee
        .file
        .scopes
        .scope_of_function(span_start)
        .unwrap_or(callee.scope);

    let mut out = Vec::new();
    if let Some(expression) = expression_body {
        out.push(Value::expr(Rc::clone(&callee.file), scope, expression));
        return out;
    }
    let mut returns = Vec::new();
    component::collect_returned_expressions(statements, &mut returns);
    for expression in returns {
        out.push(Value::expr(Rc::clone(&callee.file), scope, expression));
    }
    out
}
