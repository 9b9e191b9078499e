//! Handler for public component methods.
//!
//! Collects class methods, class property functions, and factory spec
//! methods, excluding the framework lifecycle surface. Static types come
//! from annotations; JSDoc `@param`/`@returns` tags fill in names the
//! annotations leave untyped and carry descriptions.

use std::rc::Rc;

use oxc_ast::ast::{
    BindingPatternKind, ClassElement, Expression, FormalParameters, MethodDefinitionKind,
    ObjectPropertyKind, PropertyDefinitionType, TSTypeAnnotation,
};
use oxc_span::GetSpan;

use crate::builder::DocumentationBuilder;
use crate::component::{ComponentShape, Definition};
use crate::handlers::Handler;
use crate::jsdoc::{self, ParsedDocblock};
use crate::model::{MethodDescriptor, MethodParameter, MethodReturn, TypeDescriptor};
use crate::scope::ScopeId;
use crate::session::{FileContext, Session};
use crate::types::ts::TypeSynthesizer;
use crate::value;

/// Method names owned by the framework, never documented.
const LIFECYCLE_METHODS: &[&str] = &[
    "render",
    "constructor",
    "componentDidMount",
    "componentDidUpdate",
    "componentWillMount",
    "UNSAFE_componentWillMount",
    "componentWillReceiveProps",
    "UNSAFE_componentWillReceiveProps",
    "componentWillUnmount",
    "componentWillUpdate",
    "UNSAFE_componentWillUpdate",
    "shouldComponentUpdate",
    "getDerivedStateFromProps",
    "getSnapshotBeforeUpdate",
    "componentDidCatch",
    "getChildContext",
    "getDefaultProps",
    "getInitialState",
];

/// Documents non-lifecycle methods of class and factory components.
pub struct MethodDocumentationHandler;

impl Handler for MethodDocumentationHandler {
    fn handle<'a>(
        &self,
        builder: &mut DocumentationBuilder,
        session: &Session<'a>,
        definition: &Definition<'a>,
    ) {
        match definition.shape.innermost() {
            ComponentShape::Class(class) => {
                for element in &class.body.body {
                    match element {
                        ClassElement::MethodDefinition(method) => {
                            if method.kind == MethodDefinitionKind::Constructor {
                                continue;
                            }
                            let Some(name) = method.key.static_name() else {
                                continue;
                            };
                            if LIFECYCLE_METHODS.contains(&name.as_ref()) {
                                continue;
                            }
                            let mut modifiers = Vec::new();
                            if method.r#static {
                                modifiers.push("static".to_string());
                            }
                            match method.kind {
                                MethodDefinitionKind::Get => modifiers.push("get".to_string()),
                                MethodDefinitionKind::Set => modifiers.push("set".to_string()),
                                _ => {}
                            }
                            if method.value.r#async {
                                modifiers.push("async".to_string());
                            }
                            if method.value.generator {
                                modifiers.push("generator".to_string());
                            }
                            builder.add_method(describe(
                                session,
                                definition,
                                name.as_ref(),
                                modifiers,
                                &method.value.params,
                                method.value.return_type.as_deref(),
                                method.value.span.start,
                                method.span.start,
                            ));
                        }
                        ClassElement::PropertyDefinition(property) => {
                            if property.r#type != PropertyDefinitionType::PropertyDefinition {
                                continue;
                            }
                            let Some(name) = property.key.static_name() else {
                                continue;
                            };
                            if LIFECYCLE_METHODS.contains(&name.as_ref()) {
                                continue;
                            }
                            let Some(init) = &property.value else {
                                continue;
                            };
                            let mut modifiers = Vec::new();
                            if property.r#static {
                                modifiers.push("static".to_string());
                            }
                            if let Some(method) = function_property(
                                session,
                                definition,
                                name.as_ref(),
                                modifiers,
                                init,
                                property.span.start,
                            ) {
                                builder.add_method(method);
                            }
                        }
                        _ => {}
                    }
                }
            }
            ComponentShape::FactoryObject { object, .. } => {
                for property in &object.properties {
                    let ObjectPropertyKind::ObjectProperty(property) = property else {
                        continue;
                    };
                    if property.computed {
                        continue;
                    }
                    let Some(name) = property.key.static_name() else {
                        continue;
                    };
                    if LIFECYCLE_METHODS.contains(&name.as_ref()) {
                        continue;
                    }
                    if let Some(method) = function_property(
                        session,
                        definition,
                        name.as_ref(),
                        Vec::new(),
                        &property.value,
                        property.span.start,
                    ) {
                        builder.add_method(method);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Describes a property whose value is a function, or returns `None` for
/// non-function properties.
fn function_property<'a>(
    session: &Session<'a>,
    definition: &Definition<'a>,
    name: &str,
    mut modifiers: Vec<String>,
    init: &'a Expression<'a>,
    doc_anchor: u32,
) -> Option<MethodDescriptor> {
    match value::unwrap_expression(init) {
        Expression::FunctionExpression(function) => {
            if function.r#async {
                modifiers.push("async".to_string());
            }
            if function.generator {
                modifiers.push("generator".to_string());
            }
            Some(describe(
                session,
                definition,
                name,
                modifiers,
                &function.params,
                function.return_type.as_deref(),
                function.span.start,
                doc_anchor,
            ))
        }
        Expression::ArrowFunctionExpression(arrow) => {
            if arrow.r#async {
                modifiers.push("async".to_string());
            }
            Some(describe(
                session,
                definition,
                name,
                modifiers,
                &arrow.params,
                arrow.return_type.as_deref(),
                arrow.span.start,
                doc_anchor,
            ))
        }
        _ => None,
    }
}

fn describe<'a>(
    session: &Session<'a>,
    definition: &Definition<'a>,
    name: &str,
    modifiers: Vec<String>,
    params: &'a FormalParameters<'a>,
    return_type: Option<&'a TSTypeAnnotation<'a>>,
    function_start: u32,
    doc_anchor: u32,
) -> MethodDescriptor {
    let file = &definition.file;
    let scope = file
        .scopes
        .scope_of_function(function_start)
        .unwrap_or(definition.scope);

    let raw_docblock = file.docblock_at(doc_anchor);
    let parsed = raw_docblock.map(jsdoc::parse_docblock).unwrap_or_default();

    let mut synthesizer = TypeSynthesizer::new(session);
    let mut parameters = Vec::new();
    for parameter in &params.items {
        parameters.push(describe_parameter(
            &mut synthesizer,
            file,
            scope,
            &parsed,
            parameter.pattern.type_annotation.as_deref(),
            parameter.pattern.optional,
            parameter_name(file, &parameter.pattern.kind),
        ));
    }
    if let Some(rest) = &params.rest {
        parameters.push(describe_parameter(
            &mut synthesizer,
            file,
            scope,
            &parsed,
            rest.argument.type_annotation.as_deref(),
            false,
            format!("...{}", file.raw(rest.argument.kind.span())),
        ));
    }

    let returns = method_returns(&mut synthesizer, file, scope, &parsed, return_type);

    MethodDescriptor {
        name: name.to_string(),
        docblock: raw_docblock.map(jsdoc::normalize_docblock).filter(|text| !text.is_empty()),
        description: parsed.summary,
        modifiers,
        params: parameters,
        returns,
    }
}

fn parameter_name<'a>(
    file: &Rc<FileContext<'a>>,
    pattern: &'a BindingPatternKind<'a>,
) -> String {
    match pattern {
        BindingPatternKind::BindingIdentifier(ident) => ident.name.to_string(),
        other => file.raw(other.span()).to_string(),
    }
}

fn describe_parameter<'a>(
    synthesizer: &mut TypeSynthesizer<'_, 'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    parsed: &ParsedDocblock,
    annotation: Option<&'a TSTypeAnnotation<'a>>,
    optional: bool,
    name: String,
) -> MethodParameter {
    let doc = parsed.params.iter().find(|param| param.name == name);
    let type_descriptor = annotation
        .map(|annotation| synthesizer.from_annotation(file, scope, annotation))
        .or_else(|| {
            doc.and_then(|param| param.type_hint.as_deref())
                .map(TypeDescriptor::simple)
        });
    MethodParameter {
        name,
        optional: optional || doc.is_some_and(|param| param.optional),
        type_descriptor,
        description: doc.and_then(|param| param.description.clone()),
    }
}

fn method_returns<'a>(
    synthesizer: &mut TypeSynthesizer<'_, 'a>,
    file: &Rc<FileContext<'a>>,
    scope: ScopeId,
    parsed: &ParsedDocblock,
    return_type: Option<&'a TSTypeAnnotation<'a>>,
) -> Option<MethodReturn> {
    let doc = parsed.returns.as_ref();
    let type_descriptor = return_type
        .map(|annotation| synthesizer.from_annotation(file, scope, annotation))
        .or_else(|| {
            doc.and_then(|returns| returns.type_hint.as_deref())
                .map(TypeDescriptor::simple)
        });
    if type_descriptor.is_none() && doc.is_none() {
        return None;
    }
    Some(MethodReturn {
        type_descriptor,
        description: doc.and_then(|returns| returns.description.clone()),
    })
}
