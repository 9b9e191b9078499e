//! Handler for statically-typed props.
//!
//! Locates the props type annotation of a definition (first function
//! parameter, class superclass type argument, or an explicit `forwardRef`
//! type argument), synthesizes it into a descriptor tree, and hoists the
//! members of the resulting object signature into individual props.

use oxc_ast::ast::TSType;

use crate::builder::DocumentationBuilder;
use crate::component::{self, ComponentShape, Definition};
use crate::handlers::Handler;
use crate::model::{PropertyKeyDescriptor, TypeKind};
use crate::scope::ScopeId;
use crate::session::Session;
use crate::types::ts::TypeSynthesizer;

/// Documents props from a static type annotation.
pub struct CodeTypeHandler;

impl Handler for CodeTypeHandler {
    fn handle<'a>(
        &self,
        builder: &mut DocumentationBuilder,
        session: &Session<'a>,
        definition: &Definition<'a>,
    ) {
        let Some((ts, scope)) = props_annotation(definition, &definition.shape) else {
            return;
        };
        let descriptor = TypeSynthesizer::new(session).from_type(&definition.file, scope, ts);
        let TypeKind::Object { signature, .. } = descriptor.kind else {
            return;
        };
        for property in signature.properties {
            let PropertyKeyDescriptor::Name(name) = property.key else {
                continue;
            };
            let mut ts_type = property.value;
            let required = ts_type.required.take();
            let prop = builder.prop_mut(name);
            if prop.required.is_none() {
                prop.required = required;
            }
            if prop.description.is_none() {
                prop.description = property.description;
            }
            if prop.ts_type.is_none() {
                prop.ts_type = Some(ts_type);
            }
        }
    }
}

/// The type node describing a definition's props, with the scope its
/// references resolve in.
fn props_annotation<'a>(
    definition: &Definition<'a>,
    shape: &ComponentShape<'a>,
) -> Option<(&'a TSType<'a>, ScopeId)> {
    match shape {
        ComponentShape::Wrapper { call, inner } => {
            // `forwardRef<Ref, Props>(...)` names the props type as its
            // second type argument, overriding whatever the inner render
            // function declares.
            if component::callee_final_name(&call.callee) == Some("forwardRef") {
                if let Some(arguments) = call.type_arguments.as_deref() {
                    if arguments.params.len() >= 2 {
                        return Some((&arguments.params[1], definition.scope));
                    }
                }
            }
            props_annotation(definition, inner)
        }
        ComponentShape::Function(function) => {
            let parameter = function.params.items.first()?;
            let annotation = parameter.pattern.type_annotation.as_deref()?;
            let scope = definition
                .file
                .scopes
                .scope_of_function(function.span.start)
                .unwrap_or(definition.scope);
            Some((&annotation.type_annotation, scope))
        }
        ComponentShape::Arrow(arrow) => {
            let parameter = arrow.params.items.first()?;
            let annotation = parameter.pattern.type_annotation.as_deref()?;
            let scope = definition
                .file
                .scopes
                .scope_of_function(arrow.span.start)
                .unwrap_or(definition.scope);
            Some((&annotation.type_annotation, scope))
        }
        ComponentShape::Class(class) => {
            let arguments = class.super_type_arguments.as_deref()?;
            let first = arguments.params.first()?;
            Some((first, definition.scope))
        }
        ComponentShape::FactoryObject { .. } => None,
    }
}
