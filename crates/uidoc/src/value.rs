//! Symbolic value resolution.
//!
//! A [`Value`] is a reference into a parsed program plus the scope it is
//! evaluated in. [`resolve_to_value`] follows the static data flow from a
//! reference toward its definition site: identifiers to their bindings,
//! destructured names to the matching initializer fragment, member accesses
//! into resolved object literals, and import bindings across files through
//! the session importer. Resolution is best effort; when a step cannot make
//! progress the value is returned as far as it got.

use std::rc::Rc;

use oxc_ast::ast::{
    ArrayExpressionElement, AssignmentTarget, BindingPatternKind, Class, ClassElement,
    Expression, Function, ObjectExpression, ObjectPropertyKind, PropertyKey, Statement,
    StaticMemberExpression,
};
use oxc_span::{GetSpan, Span};
use rustc_hash::FxHashSet;

use crate::scope::{Binding, ImportedName, ScopeId, TypeBinding};
use crate::session::{FileContext, FileId, Session};

/// The node a value points at.
#[derive(Debug, Clone, Copy)]
pub enum ValueNode<'a> {
    /// Any expression.
    Expr(&'a Expression<'a>),
    /// A function declaration (which is not an expression node).
    Function(&'a Function<'a>),
    /// A class declaration.
    Class(&'a Class<'a>),
}

impl ValueNode<'_> {
    /// Span of the underlying node.
    pub fn span(&self) -> Span {
        match self {
            ValueNode::Expr(expression) => expression.span(),
            ValueNode::Function(function) => function.span,
            ValueNode::Class(class) => class.span,
        }
    }
}

/// A node reference paired with the file and scope it is evaluated in.
#[derive(Clone)]
pub struct Value<'a> {
    /// File the node belongs to.
    pub file: Rc<FileContext<'a>>,
    /// Scope the node is evaluated in.
    pub scope: ScopeId,
    /// The node itself.
    pub node: ValueNode<'a>,
}

/// Node identity used for cycle detection and definition deduplication.
pub type NodeKey = (FileId, u32, u32);

impl<'a> Value<'a> {
    /// Wraps an expression.
    pub fn expr(file: Rc<FileContext<'a>>, scope: ScopeId, expression: &'a Expression<'a>) -> Self {
        Self {
            file,
            scope,
            node: ValueNode::Expr(expression),
        }
    }

    /// Wraps a function declaration.
    pub fn function(file: Rc<FileContext<'a>>, scope: ScopeId, function: &'a Function<'a>) -> Self {
        Self {
            file,
            scope,
            node: ValueNode::Function(function),
        }
    }

    /// Wraps a class declaration.
    pub fn class(file: Rc<FileContext<'a>>, scope: ScopeId, class: &'a Class<'a>) -> Self {
        Self {
            file,
            scope,
            node: ValueNode::Class(class),
        }
    }

    /// A sibling value in the same file and scope.
    pub fn with_expr(&self, expression: &'a Expression<'a>) -> Value<'a> {
        Value::expr(Rc::clone(&self.file), self.scope, expression)
    }

    /// The same value evaluated in a different scope.
    pub fn in_scope(&self, scope: ScopeId) -> Value<'a> {
        Value {
            file: Rc::clone(&self.file),
            scope,
            node: self.node,
        }
    }

    /// Identity of the underlying node.
    pub fn key(&self) -> NodeKey {
        let span = self.node.span();
        (self.file.id, span.start, span.end)
    }

    /// The underlying expression, if this value wraps one.
    pub fn as_expr(&self) -> Option<&'a Expression<'a>> {
        match self.node {
            ValueNode::Expr(expression) => Some(expression),
            _ => None,
        }
    }

    /// Source text of the underlying node.
    pub fn raw(&self) -> &'a str {
        self.file.raw(self.node.span())
    }
}

/// A type declaration paired with the file and scope it lives in.
#[derive(Clone)]
pub struct TypeRef<'a> {
    /// File the declaration belongs to.
    pub file: Rc<FileContext<'a>>,
    /// Scope the declaration is visible in.
    pub scope: ScopeId,
    /// The declaration itself.
    pub binding: TypeBinding<'a>,
}

/// Follows `value` to its definition as far as static analysis allows.
pub fn resolve_to_value<'a>(session: &Session<'a>, value: Value<'a>) -> Value<'a> {
    let mut seen = FxHashSet::default();
    resolve_with(session, value, &mut seen)
}

/// Resolution loop sharing one cycle set across nested steps, so mutually
/// referential bindings terminate instead of recursing.
pub(crate) fn resolve_with<'a>(
    session: &Session<'a>,
    mut current: Value<'a>,
    seen: &mut FxHashSet<NodeKey>,
) -> Value<'a> {
    loop {
        if !seen.insert(current.key()) {
            return current;
        }
        match step(session, &current, seen) {
            Some(next) => current = next,
            None => return current,
        }
    }
}

/// One resolution step, or `None` when the value is already terminal.
fn step<'a>(
    session: &Session<'a>,
    value: &Value<'a>,
    seen: &mut FxHashSet<NodeKey>,
) -> Option<Value<'a>> {
    let expression = value.as_expr()?;
    match expression {
        Expression::ParenthesizedExpression(inner) => Some(value.with_expr(&inner.expression)),
        Expression::TSAsExpression(inner) => Some(value.with_expr(&inner.expression)),
        Expression::TSSatisfiesExpression(inner) => Some(value.with_expr(&inner.expression)),
        Expression::TSNonNullExpression(inner) => Some(value.with_expr(&inner.expression)),
        Expression::TSTypeAssertion(inner) => Some(value.with_expr(&inner.expression)),
        Expression::Identifier(ident) => {
            resolve_identifier(session, value, ident.name.as_str(), seen)
        }
        Expression::StaticMemberExpression(member) => {
            resolve_member(session, value, member, seen)
        }
        _ => None,
    }
}

/// Resolves a name visible from `value`'s scope to the value it binds.
pub(crate) fn resolve_identifier<'a>(
    session: &Session<'a>,
    value: &Value<'a>,
    name: &str,
    seen: &mut FxHashSet<NodeKey>,
) -> Option<Value<'a>> {
    let (bound_scope, binding) = value.file.scopes.lookup_value(value.scope, name)?;
    binding_value(session, &value.file, bound_scope, binding, name, seen)
}

/// Turns a scope binding into the value it denotes.
pub(crate) fn binding_value<'a>(
    session: &Session<'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    binding: Binding<'a>,
    name: &str,
    seen: &mut FxHashSet<NodeKey>,
) -> Option<Value<'a>> {
    match binding {
        Binding::Declarator(declarator) => {
            if let BindingPatternKind::BindingIdentifier(_) = &declarator.id.kind {
                let init = declarator.init.as_ref()?;
                Some(Value::expr(Rc::clone(file), scope, init))
            } else {
                // Destructured binding: resolve the initializer and project
                // the fragment the name was bound to.
                let init = declarator.init.as_ref()?;
                let base = resolve_with(session, Value::expr(Rc::clone(file), scope, init), seen);
                project_pattern(session, &base, &declarator.id.kind, name, seen)
            }
        }
        Binding::Function(function) => Some(Value::function(Rc::clone(file), scope, function)),
        Binding::Class(class) => Some(Value::class(Rc::clone(file), scope, class)),
        Binding::Import { source, imported } => match imported {
            ImportedName::Default => session.import_value(file, source, "default"),
            ImportedName::Named(remote) => session.import_value(file, source, remote),
            // A namespace binding has no single value; member access on it
            // is handled in resolve_member.
            ImportedName::Namespace => None,
        },
        Binding::Param(pattern) => match &pattern.kind {
            // Only a whole-parameter default is a usable value; defaults
            // inside destructuring are read structurally by handlers.
            BindingPatternKind::AssignmentPattern(assignment) => {
                match &assignment.left.kind {
                    BindingPatternKind::BindingIdentifier(ident) if ident.name.as_str() == name => {
                        Some(Value::expr(Rc::clone(file), scope, &assignment.right))
                    }
                    _ => None,
                }
            }
            _ => None,
        },
    }
}

/// Projects the fragment of `base` that a destructuring pattern binds to
/// `name`.
fn project_pattern<'a>(
    session: &Session<'a>,
    base: &Value<'a>,
    pattern: &'a BindingPatternKind<'a>,
    name: &str,
    seen: &mut FxHashSet<NodeKey>,
) -> Option<Value<'a>> {
    match pattern {
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                let Some(key) = property.key.static_name() else {
                    continue;
                };
                match &property.value.kind {
                    BindingPatternKind::BindingIdentifier(ident) if ident.name.as_str() == name => {
                        return project_member(session, base, key.as_ref(), seen);
                    }
                    BindingPatternKind::AssignmentPattern(assignment) => {
                        if let BindingPatternKind::BindingIdentifier(ident) =
                            &assignment.left.kind
                        {
                            if ident.name.as_str() == name {
                                // Fall back to the pattern default when the
                                // object has no such property.
                                return project_member(session, base, key.as_ref(), seen)
                                    .or_else(|| Some(base.with_expr(&assignment.right)));
                            }
                        } else if pattern_binds(&assignment.left.kind, name) {
                            let inner = project_member(session, base, key.as_ref(), seen)?;
                            let inner = resolve_with(session, inner, seen);
                            return project_pattern(
                                session,
                                &inner,
                                &assignment.left.kind,
                                name,
                                seen,
                            );
                        }
                    }
                    nested if pattern_binds(nested, name) => {
                        let inner = project_member(session, base, key.as_ref(), seen)?;
                        let inner = resolve_with(session, inner, seen);
                        return project_pattern(session, &inner, nested, name, seen);
                    }
                    _ => {}
                }
            }
            None
        }
        BindingPatternKind::ArrayPattern(array) => {
            for (index, element) in array.elements.iter().enumerate() {
                let Some(element) = element else { continue };
                if !pattern_binds(&element.kind, name) {
                    continue;
                }
                let inner = project_index(base, index)?;
                if let BindingPatternKind::BindingIdentifier(_) = &element.kind {
                    return Some(inner);
                }
                let inner = resolve_with(session, inner, seen);
                return project_pattern(session, &inner, &element.kind, name, seen);
            }
            None
        }
        BindingPatternKind::AssignmentPattern(assignment) => {
            project_pattern(session, base, &assignment.left.kind, name, seen)
        }
        BindingPatternKind::BindingIdentifier(_) => None,
    }
}

/// Whether a pattern introduces `name` anywhere inside it.
fn pattern_binds(pattern: &BindingPatternKind<'_>, name: &str) -> bool {
    match pattern {
        BindingPatternKind::BindingIdentifier(ident) => ident.name.as_str() == name,
        BindingPatternKind::ObjectPattern(object) => {
            object
                .properties
                .iter()
                .any(|property| pattern_binds(&property.value.kind, name))
                || object
                    .rest
                    .as_ref()
                    .is_some_and(|rest| pattern_binds(&rest.argument.kind, name))
        }
        BindingPatternKind::ArrayPattern(array) => {
            array
                .elements
                .iter()
                .flatten()
                .any(|element| pattern_binds(&element.kind, name))
                || array
                    .rest
                    .as_ref()
                    .is_some_and(|rest| pattern_binds(&rest.argument.kind, name))
        }
        BindingPatternKind::AssignmentPattern(assignment) => {
            pattern_binds(&assignment.left.kind, name)
        }
    }
}

/// Resolves `object.property`, handling namespace imports, resolved object
/// literals, and class statics.
fn resolve_member<'a>(
    session: &Session<'a>,
    value: &Value<'a>,
    member: &'a StaticMemberExpression<'a>,
    seen: &mut FxHashSet<NodeKey>,
) -> Option<Value<'a>> {
    let property = member.property.name.as_str();

    // `ns.name` where `ns` is a namespace import reaches straight into the
    // foreign module's exports.
    if let Expression::Identifier(object) = &member.object {
        if let Some((_, Binding::Import {
            source,
            imported: ImportedName::Namespace,
        })) = value.file.scopes.lookup_value(value.scope, object.name.as_str())
        {
            return session.import_value(&value.file, source, property);
        }
    }

    let base = resolve_with(session, value.with_expr(&member.object), seen);
    project_member(session, &base, property, seen)
}

/// Projects a named member out of a resolved value: object literal
/// properties (through spreads), class static properties, or a module-level
/// `Target.name = ...` assignment attaching the member after the fact.
pub(crate) fn project_member<'a>(
    session: &Session<'a>,
    base: &Value<'a>,
    name: &str,
    seen: &mut FxHashSet<NodeKey>,
) -> Option<Value<'a>> {
    let direct = match base.node {
        ValueNode::Expr(expression) => {
            if let Expression::ObjectExpression(object) = expression {
                object_property_value(session, &base.file, base.scope, object, name, seen)
            } else if let Expression::ClassExpression(class) = expression {
                class_static_value(&base.file, base.scope, class, name)
            } else {
                None
            }
        }
        ValueNode::Class(class) => class_static_value(&base.file, base.scope, class, name),
        ValueNode::Function(_) => None,
    };
    if direct.is_some() {
        return direct;
    }
    module_member_assignment(session, base, name)
}

/// Scans module-level statements of `base`'s file for an assignment
/// `Target.name = value` whose target resolves back to `base`. Functions and
/// classes commonly receive their statics this way.
fn module_member_assignment<'a>(
    session: &Session<'a>,
    base: &Value<'a>,
    name: &str,
) -> Option<Value<'a>> {
    let root = base.file.scopes.root();
    let base_key = base.key();
    for statement in &base.file.program.body {
        let Statement::ExpressionStatement(statement) = statement else {
            continue;
        };
        let Expression::AssignmentExpression(assignment) = &statement.expression else {
            continue;
        };
        let AssignmentTarget::StaticMemberExpression(member) = &assignment.left else {
            continue;
        };
        if member.property.name.as_str() != name {
            continue;
        }
        let target = resolve_to_value(
            session,
            Value::expr(Rc::clone(&base.file), root, &member.object),
        );
        if target.key() == base_key {
            return Some(Value::expr(Rc::clone(&base.file), root, &assignment.right));
        }
    }
    None
}

/// Looks `name` up in an object literal, descending into resolved spread
/// sources when the property is not declared directly.
pub(crate) fn object_property_value<'a>(
    session: &Session<'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    object: &'a ObjectExpression<'a>,
    name: &str,
    seen: &mut FxHashSet<NodeKey>,
) -> Option<Value<'a>> {
    // Later properties win, so scan back to front.
    for property in object.properties.iter().rev() {
        match property {
            ObjectPropertyKind::ObjectProperty(property) => {
                if !property.computed && property_key_is(&property.key, name) {
                    return Some(Value::expr(Rc::clone(file), scope, &property.value));
                }
            }
            ObjectPropertyKind::SpreadProperty(spread) => {
                let source = resolve_with(
                    session,
                    Value::expr(Rc::clone(file), scope, &spread.argument),
                    seen,
                );
                if let Some(found) = project_member(session, &source, name, seen) {
                    return Some(found);
                }
            }
        }
    }
    None
}

/// Looks `name` up among a class's static property initializers.
pub(crate) fn class_static_value<'a>(
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    class: &'a Class<'a>,
    name: &str,
) -> Option<Value<'a>> {
    for element in &class.body.body {
        if let ClassElement::PropertyDefinition(property) = element {
            if property.r#static
                && !property.computed
                && property_key_is(&property.key, name)
            {
                if let Some(init) = &property.value {
                    return Some(Value::expr(Rc::clone(file), scope, init));
                }
            }
        }
    }
    None
}

/// Projects an array element out of a resolved array literal.
fn project_index<'a>(base: &Value<'a>, index: usize) -> Option<Value<'a>> {
    let Some(Expression::ArrayExpression(array)) = base.as_expr() else {
        return None;
    };
    match array.elements.get(index)? {
        ArrayExpressionElement::SpreadElement(_) | ArrayExpressionElement::Elision(_) => None,
        element => element.as_expression().map(|expr| base.with_expr(expr)),
    }
}

/// Whether a non-computed property key spells `name`.
pub(crate) fn property_key_is(key: &PropertyKey<'_>, name: &str) -> bool {
    key.static_name().is_some_and(|key| key == name)
}

/// Unwraps parentheses and TypeScript assertion wrappers without resolving
/// anything.
pub fn unwrap_expression<'a>(expression: &'a Expression<'a>) -> &'a Expression<'a> {
    let mut current = expression;
    loop {
        current = match current {
            Expression::ParenthesizedExpression(inner) => &inner.expression,
            Expression::TSAsExpression(inner) => &inner.expression,
            Expression::TSSatisfiesExpression(inner) => &inner.expression,
            Expression::TSNonNullExpression(inner) => &inner.expression,
            Expression::TSTypeAssertion(inner) => &inner.expression,
            other => return other,
        };
    }
}

/// Whether evaluating this expression requires runtime information.
///
/// Literals and literal-shaped aggregates are static; identifiers, member
/// accesses, and calls are computed.
pub fn is_computed_expression(expression: &Expression<'_>) -> bool {
    match unwrap_expression(expression) {
        Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::RegExpLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::ArrowFunctionExpression(_)
        | Expression::FunctionExpression(_)
        | Expression::JSXElement(_)
        | Expression::JSXFragment(_) => false,
        Expression::TemplateLiteral(template) => !template.expressions.is_empty(),
        Expression::UnaryExpression(unary) => is_computed_expression(&unary.argument),
        Expression::ArrayExpression(array) => array.elements.iter().any(|element| match element {
            ArrayExpressionElement::SpreadElement(_) => true,
            ArrayExpressionElement::Elision(_) => false,
            element => element
                .as_expression()
                .is_none_or(is_computed_expression),
        }),
        Expression::ObjectExpression(object) => {
            object.properties.iter().any(|property| match property {
                ObjectPropertyKind::ObjectProperty(property) => {
                    property.computed || is_computed_expression(&property.value)
                }
                ObjectPropertyKind::SpreadProperty(_) => true,
            })
        }
        _ => true,
    }
}
