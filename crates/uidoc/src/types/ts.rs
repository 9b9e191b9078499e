//! Static type synthesis.
//!
//! Converts TypeScript annotations into [`TypeDescriptor`] trees: named
//! references are expanded through the scope tree's type namespace (and the
//! importer for foreign types), generic arguments substitute into the
//! expanded body, interface `extends` chains flatten into one object
//! signature, and enums become unions of their member literals. Anything
//! unrecognized degrades to a raw-text descriptor; synthesis never fails.

use std::rc::Rc;

use oxc_ast::ast::{
    BindingPatternKind, FormalParameters, TSInterfaceDeclaration, TSLiteral, TSSignature,
    TSThisParameter, TSTupleElement, TSType, TSTypeAnnotation, TSTypeName,
    TSTypeParameterInstantiation,
};
use oxc_span::GetSpan;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::{
    FunctionArgument, FunctionSignature, ObjectSignature, ObjectSignatureProperty,
    PropertyKeyDescriptor, TypeDescriptor, TypeKind,
};
use crate::scope::{ScopeId, TypeBinding};
use crate::session::{FileContext, FileId, Session};

/// Named references that pass through to their single type argument.
const TRANSPARENT_WRAPPERS: &[&str] = &[
    "Readonly",
    "Required",
    "Partial",
    "NonNullable",
    "$ReadOnly",
    "$Exact",
];

/// A generic argument captured at its instantiation site, together with the
/// substitutions that were active there.
#[derive(Clone)]
struct TypeArg<'a> {
    file: Rc<FileContext<'a>>,
    scope: ScopeId,
    ty: &'a TSType<'a>,
    subs: Rc<Subs<'a>>,
}

type Subs<'a> = FxHashMap<&'a str, TypeArg<'a>>;

/// Stateful synthesizer; the `expanding` set breaks recursive type cycles.
pub(crate) struct TypeSynthesizer<'s, 'a> {
    session: &'s Session<'a>,
    expanding: FxHashSet<(FileId, u32)>,
}

impl<'s, 'a> TypeSynthesizer<'s, 'a> {
    pub(crate) fn new(session: &'s Session<'a>) -> Self {
        Self {
            session,
            expanding: FxHashSet::default(),
        }
    }

    /// Synthesizes the type inside an annotation.
    pub(crate) fn from_annotation(
        &mut self,
        file: &Rc<FileContext<'a>>,
        scope: ScopeId,
        annotation: &'a TSTypeAnnotation<'a>,
    ) -> TypeDescriptor {
        self.synthesize(file, scope, &annotation.type_annotation, &Subs::default())
    }

    /// Synthesizes a bare type node, e.g. a type argument of a superclass
    /// or a wrapper call.
    pub(crate) fn from_type(
        &mut self,
        file: &Rc<FileContext<'a>>,
        scope: ScopeId,
        ts: &'a TSType<'a>,
    ) -> TypeDescriptor {
        self.synthesize(file, scope, ts, &Subs::default())
    }

    fn synthesize(
        &mut self,
        file: &Rc<FileContext<'a>>,
        scope: ScopeId,
        ts: &'a TSType<'a>,
        subs: &Subs<'a>,
    ) -> TypeDescriptor {
        match ts {
            TSType::TSAnyKeyword(_) => TypeDescriptor::simple("any"),
            TSType::TSBooleanKeyword(_) => TypeDescriptor::simple("boolean"),
            TSType::TSNumberKeyword(_) => TypeDescriptor::simple("number"),
            TSType::TSStringKeyword(_) => TypeDescriptor::simple("string"),
            TSType::TSSymbolKeyword(_) => TypeDescriptor::simple("symbol"),
            TSType::TSBigIntKeyword(_) => TypeDescriptor::simple("bigint"),
            TSType::TSObjectKeyword(_) => TypeDescriptor::simple("object"),
            TSType::TSVoidKeyword(_) => TypeDescriptor::simple("void"),
            TSType::TSNeverKeyword(_) => TypeDescriptor::simple("never"),
            TSType::TSUnknownKeyword(_) => TypeDescriptor::simple("unknown"),
            TSType::TSUndefinedKeyword(_) => TypeDescriptor::simple("undefined"),
            TSType::TSNullKeyword(_) => TypeDescriptor::simple("null"),
            TSType::TSThisType(_) => TypeDescriptor::simple("this"),
            TSType::TSParenthesizedType(inner) => {
                self.synthesize(file, scope, &inner.type_annotation, subs)
            }
            TSType::TSLiteralType(literal) => self.literal(file, &literal.literal),
            TSType::TSUnionType(union) => {
                let raw = file.raw(union.span).to_string();
                let mut nullable = false;
                let mut elements = Vec::new();
                for member in &union.types {
                    if matches!(
                        member,
                        TSType::TSNullKeyword(_) | TSType::TSUndefinedKeyword(_)
                    ) {
                        nullable = true;
                    }
                    elements.push(self.synthesize(file, scope, member, subs));
                }
                let mut descriptor = TypeDescriptor::new(TypeKind::Elements {
                    name: "union".to_string(),
                    raw,
                    elements,
                });
                if nullable {
                    descriptor.nullable = Some(true);
                }
                descriptor
            }
            TSType::TSIntersectionType(intersection) => {
                let raw = file.raw(intersection.span).to_string();
                let members: Vec<TypeDescriptor> = intersection
                    .types
                    .iter()
                    .map(|member| self.synthesize(file, scope, member, subs))
                    .collect();
                merge_intersection(raw, members)
            }
            TSType::TSArrayType(array) => {
                let element = self.synthesize(file, scope, &array.element_type, subs);
                TypeDescriptor::new(TypeKind::Elements {
                    name: "Array".to_string(),
                    raw: file.raw(array.span).to_string(),
                    elements: vec![element],
                })
            }
            TSType::TSTupleType(tuple) => {
                let elements = tuple
                    .element_types
                    .iter()
                    .map(|element| self.tuple_element(file, scope, element, subs))
                    .collect();
                TypeDescriptor::new(TypeKind::Elements {
                    name: "tuple".to_string(),
                    raw: file.raw(tuple.span).to_string(),
                    elements,
                })
            }
            TSType::TSFunctionType(function) => {
                let signature = self.function_signature(
                    file,
                    scope,
                    &function.params,
                    function.this_param.as_deref(),
                    Some(&*function.return_type),
                    subs,
                );
                TypeDescriptor::new(TypeKind::function(
                    file.raw(function.span).to_string(),
                    signature,
                ))
            }
            TSType::TSConstructorType(constructor) => {
                let signature = self.function_signature(
                    file,
                    scope,
                    &constructor.params,
                    None,
                    Some(&*constructor.return_type),
                    subs,
                );
                TypeDescriptor::new(TypeKind::function(
                    file.raw(constructor.span).to_string(),
                    signature,
                ))
            }
            TSType::TSTypeLiteral(literal) => {
                let signature = self.signature_from_members(file, scope, &literal.members, subs);
                TypeDescriptor::new(TypeKind::object(
                    file.raw(literal.span).to_string(),
                    signature,
                ))
            }
            TSType::TSTypeReference(reference) => self.reference(
                file,
                scope,
                &reference.type_name,
                reference.type_arguments.as_deref(),
                reference.span(),
                subs,
            ),
            other => TypeDescriptor::raw_fallback(file.raw(other.span())),
        }
    }

    fn literal(&self, file: &Rc<FileContext<'a>>, literal: &'a TSLiteral<'a>) -> TypeDescriptor {
        let raw = match literal {
            TSLiteral::BooleanLiteral(lit) => file.raw(lit.span),
            TSLiteral::NumericLiteral(lit) => file.raw(lit.span),
            TSLiteral::BigIntLiteral(lit) => file.raw(lit.span),
            TSLiteral::StringLiteral(lit) => file.raw(lit.span),
            TSLiteral::TemplateLiteral(lit) => file.raw(lit.span),
            TSLiteral::UnaryExpression(lit) => file.raw(lit.span),
        };
        TypeDescriptor::new(TypeKind::literal(raw))
    }

    fn tuple_element(
        &mut self,
        file: &Rc<FileContext<'a>>,
        scope: ScopeId,
        element: &'a TSTupleElement<'a>,
        subs: &Subs<'a>,
    ) -> TypeDescriptor {
        match element {
            TSTupleElement::TSOptionalType(optional) => {
                let mut descriptor =
                    self.synthesize(file, scope, &optional.type_annotation, subs);
                descriptor.required = Some(false);
                descriptor
            }
            TSTupleElement::TSRestType(rest) => {
                self.synthesize(file, scope, &rest.type_annotation, subs)
            }
            element => match element.as_ts_type() {
                Some(ts) => self.synthesize(file, scope, ts, subs),
                None => TypeDescriptor::raw_fallback(file.raw(element.span())),
            },
        }
    }

    fn function_signature(
        &mut self,
        file: &Rc<FileContext<'a>>,
        scope: ScopeId,
        params: &'a FormalParameters<'a>,
        this_param: Option<&'a TSThisParameter<'a>>,
        return_type: Option<&'a TSTypeAnnotation<'a>>,
        subs: &Subs<'a>,
    ) -> FunctionSignature {
        let mut arguments = Vec::new();
        for param in &params.items {
            let name = match &param.pattern.kind {
                BindingPatternKind::BindingIdentifier(ident) => ident.name.to_string(),
                other => file.raw(other.span()).to_string(),
            };
            let type_descriptor = param
                .pattern
                .type_annotation
                .as_ref()
                .map(|annotation| self.synthesize(file, scope, &annotation.type_annotation, subs));
            arguments.push(FunctionArgument {
                name,
                type_descriptor,
                rest: false,
            });
        }
        if let Some(rest) = &params.rest {
            let name = match &rest.argument.kind {
                BindingPatternKind::BindingIdentifier(ident) => ident.name.to_string(),
                other => file.raw(other.span()).to_string(),
            };
            let type_descriptor = rest
                .argument
                .type_annotation
                .as_ref()
                .map(|annotation| self.synthesize(file, scope, &annotation.type_annotation, subs));
            arguments.push(FunctionArgument {
                name,
                type_descriptor,
                rest: true,
            });
        }
        let this_type = this_param.and_then(|this| this.type_annotation.as_ref()).map(
            |annotation| {
                Box::new(self.synthesize(file, scope, &annotation.type_annotation, subs))
            },
        );
        let return_type = return_type.map(|annotation| {
            Box::new(self.synthesize(file, scope, &annotation.type_annotation, subs))
        });
        FunctionSignature {
            arguments,
            this_type,
            return_type,
        }
    }

    fn signature_from_members(
        &mut self,
        file: &Rc<FileContext<'a>>,
        scope: ScopeId,
        members: &'a [TSSignature<'a>],
        subs: &Subs<'a>,
    ) -> ObjectSignature {
        let mut signature = ObjectSignature::default();
        for member in members {
            match member {
                TSSignature::TSPropertySignature(property) => {
                    if property.computed {
                        continue;
                    }
                    let Some(key) = property.key.static_name() else {
                        continue;
                    };
                    let mut value = match &property.type_annotation {
                        Some(annotation) => {
                            self.synthesize(file, scope, &annotation.type_annotation, subs)
                        }
                        None => TypeDescriptor::simple("unknown"),
                    };
                    value.required = Some(!property.optional);
                    signature.properties.push(ObjectSignatureProperty {
                        key: PropertyKeyDescriptor::Name(key.to_string()),
                        value,
                        description: file.doc_summary_at(property.span.start),
                    });
                }
                TSSignature::TSIndexSignature(index) => {
                    let Some(parameter) = index.parameters.first() else {
                        continue;
                    };
                    let key = self.synthesize(
                        file,
                        scope,
                        &parameter.type_annotation.type_annotation,
                        subs,
                    );
                    let value =
                        self.synthesize(file, scope, &index.type_annotation.type_annotation, subs);
                    signature.properties.push(ObjectSignatureProperty {
                        key: PropertyKeyDescriptor::Descriptor(Box::new(key)),
                        value,
                        description: None,
                    });
                }
                TSSignature::TSMethodSignature(method) => {
                    if method.computed {
                        continue;
                    }
                    let Some(key) = method.key.static_name() else {
                        continue;
                    };
                    let function = self.function_signature(
                        file,
                        scope,
                        &method.params,
                        method.this_param.as_deref(),
                        method.return_type.as_deref(),
                        subs,
                    );
                    let mut value = TypeDescriptor::new(TypeKind::function(
                        file.raw(method.span).to_string(),
                        function,
                    ));
                    value.required = Some(!method.optional);
                    signature.properties.push(ObjectSignatureProperty {
                        key: PropertyKeyDescriptor::Name(key.to_string()),
                        value,
                        description: file.doc_summary_at(method.span.start),
                    });
                }
                TSSignature::TSConstructSignatureDeclaration(construct) => {
                    let function = self.function_signature(
                        file,
                        scope,
                        &construct.params,
                        None,
                        construct.return_type.as_deref(),
                        subs,
                    );
                    signature.constructor = Some(Box::new(TypeDescriptor::new(
                        TypeKind::function(file.raw(construct.span).to_string(), function),
                    )));
                }
                TSSignature::TSCallSignatureDeclaration(_) => {}
            }
        }
        signature
    }

    /// Expands a named type reference.
    fn reference(
        &mut self,
        file: &Rc<FileContext<'a>>,
        scope: ScopeId,
        type_name: &'a TSTypeName<'a>,
        type_arguments: Option<&'a TSTypeParameterInstantiation<'a>>,
        span: oxc_span::Span,
        subs: &Subs<'a>,
    ) -> TypeDescriptor {
        let TSTypeName::IdentifierReference(ident) = type_name else {
            // Qualified names (`React.ReactNode`) stay opaque.
            return TypeDescriptor::raw_fallback(file.raw(span));
        };
        let name = ident.name.as_str();

        // A bare reference to a generic parameter substitutes the captured
        // argument, in the context it was captured in.
        if type_arguments.is_none() {
            if let Some(arg) = subs.get(name) {
                let arg = arg.clone();
                return self.synthesize(&arg.file, arg.scope, arg.ty, &arg.subs);
            }
        }

        let args: Vec<&'a TSType<'a>> = type_arguments
            .map(|instantiation| instantiation.params.iter().collect())
            .unwrap_or_default();

        if TRANSPARENT_WRAPPERS.contains(&name) && args.len() == 1 {
            return self.synthesize(file, scope, args[0], subs);
        }

        if (name == "Array" || name == "ReadonlyArray") && args.len() == 1 {
            let element = self.synthesize(file, scope, args[0], subs);
            return TypeDescriptor::new(TypeKind::Elements {
                name: "Array".to_string(),
                raw: file.raw(span).to_string(),
                elements: vec![element],
            });
        }

        if let Some(resolved) = self.lookup(file, scope, name) {
            let (decl_file, decl_scope, binding) = resolved;
            let mut descriptor =
                self.expand(&decl_file, decl_scope, binding, file, scope, &args, subs, span);
            if descriptor.alias.is_none() {
                descriptor.alias = Some(name.to_string());
            }
            return descriptor;
        }

        // Unresolvable name: keep it as written.
        let raw = (!args.is_empty() || file.raw(span) != name)
            .then(|| file.raw(span).to_string());
        TypeDescriptor::new(TypeKind::Simple {
            name: name.to_string(),
            raw,
        })
    }

    fn lookup(
        &self,
        file: &Rc<FileContext<'a>>,
        scope: ScopeId,
        name: &str,
    ) -> Option<(Rc<FileContext<'a>>, ScopeId, TypeBinding<'a>)> {
        let (found_scope, binding) = file.scopes.lookup_type(scope, name)?;
        match binding {
            TypeBinding::Import { source, imported } => {
                let remote = self.session.import_type(file, source, imported)?;
                Some((remote.file, remote.scope, remote.binding))
            }
            binding => Some((Rc::clone(file), found_scope, binding)),
        }
    }

    /// Expands a resolved type declaration with the reference's arguments.
    /// `use_file`/`use_scope` is the context the arguments were written in.
    #[allow(clippy::too_many_arguments)]
    fn expand(
        &mut self,
        decl_file: &Rc<FileContext<'a>>,
        decl_scope: ScopeId,
        binding: TypeBinding<'a>,
        use_file: &Rc<FileContext<'a>>,
        use_scope: ScopeId,
        args: &[&'a TSType<'a>],
        subs: &Subs<'a>,
        span: oxc_span::Span,
    ) -> TypeDescriptor {
        match binding {
            TypeBinding::Alias(alias) => {
                let guard = (decl_file.id, alias.span.start);
                if !self.expanding.insert(guard) {
                    return TypeDescriptor::simple(alias.id.name.to_string());
                }
                let new_subs = capture_substitutions(
                    alias
                        .type_parameters
                        .as_deref()
                        .map(|parameters| &parameters.params[..])
                        .unwrap_or(&[]),
                    args,
                    use_file,
                    use_scope,
                    subs,
                    decl_file,
                    decl_scope,
                );
                let descriptor =
                    self.synthesize(decl_file, decl_scope, &alias.type_annotation, &new_subs);
                self.expanding.remove(&guard);
                descriptor
            }
            TypeBinding::Interface(interface) => {
                let guard = (decl_file.id, interface.span.start);
                if !self.expanding.insert(guard) {
                    return TypeDescriptor::simple(interface.id.name.to_string());
                }
                let new_subs = capture_substitutions(
                    interface
                        .type_parameters
                        .as_deref()
                        .map(|parameters| &parameters.params[..])
                        .unwrap_or(&[]),
                    args,
                    use_file,
                    use_scope,
                    subs,
                    decl_file,
                    decl_scope,
                );
                let signature =
                    self.interface_signature(decl_file, decl_scope, interface, &new_subs);
                self.expanding.remove(&guard);
                TypeDescriptor::new(TypeKind::object(
                    use_file.raw(span).to_string(),
                    signature,
                ))
            }
            TypeBinding::Enum(ts_enum) => {
                let mut elements = Vec::new();
                let mut auto_value: i64 = 0;
                for member in &ts_enum.body.members {
                    let value = match &member.initializer {
                        Some(initializer) => {
                            let raw = decl_file.raw(initializer.span());
                            // Auto-numbering resumes after an explicit
                            // numeric initializer.
                            auto_value = match raw.trim().parse::<i64>() {
                                Ok(explicit) => explicit + 1,
                                Err(_) => auto_value + 1,
                            };
                            raw.to_string()
                        }
                        None => {
                            let value = auto_value.to_string();
                            auto_value += 1;
                            value
                        }
                    };
                    elements.push(TypeDescriptor::new(TypeKind::literal(value)));
                }
                TypeDescriptor::new(TypeKind::Elements {
                    name: "union".to_string(),
                    raw: use_file.raw(span).to_string(),
                    elements,
                })
            }
            TypeBinding::Import { .. } => {
                // lookup() already chased imports; a second level means the
                // chain could not be resolved.
                TypeDescriptor::raw_fallback(use_file.raw(span))
            }
        }
    }

    /// Flattens an interface body plus its `extends` chain into one object
    /// signature. Inherited members come first; own members override by key.
    fn interface_signature(
        &mut self,
        file: &Rc<FileContext<'a>>,
        scope: ScopeId,
        interface: &'a TSInterfaceDeclaration<'a>,
        subs: &Subs<'a>,
    ) -> ObjectSignature {
        let mut merged: Vec<ObjectSignatureProperty> = Vec::new();
        let mut constructor = None;

        for heritage in &interface.extends {
            let oxc_ast::ast::Expression::Identifier(parent) = &heritage.expression else {
                continue;
            };
            let Some((parent_file, parent_scope, binding)) =
                self.lookup(file, scope, parent.name.as_str())
            else {
                continue;
            };
            let args: Vec<&'a TSType<'a>> = heritage
                .type_arguments
                .as_deref()
                .map(|instantiation| instantiation.params.iter().collect())
                .unwrap_or_default();
            let parent_descriptor = self.expand(
                &parent_file,
                parent_scope,
                binding,
                file,
                scope,
                &args,
                subs,
                heritage.span,
            );
            if let TypeKind::Object { signature, .. } = parent_descriptor.kind {
                if constructor.is_none() {
                    constructor = signature.constructor;
                }
                for property in signature.properties {
                    upsert_property(&mut merged, property);
                }
            }
        }

        let own = self.signature_from_members(file, scope, &interface.body.body, subs);
        if own.constructor.is_some() {
            constructor = own.constructor;
        }
        for property in own.properties {
            upsert_property(&mut merged, property);
        }

        ObjectSignature {
            properties: merged,
            constructor,
        }
    }
}

/// Zips declared type parameters with instantiation arguments. Arguments
/// capture the use-site context; missing arguments fall back to parameter
/// defaults evaluated at the declaration site.
fn capture_substitutions<'a>(
    parameters: &'a [oxc_ast::ast::TSTypeParameter<'a>],
    args: &[&'a TSType<'a>],
    use_file: &Rc<FileContext<'a>>,
    use_scope: ScopeId,
    use_subs: &Subs<'a>,
    decl_file: &Rc<FileContext<'a>>,
    decl_scope: ScopeId,
) -> Subs<'a> {
    let shared_use_subs = Rc::new(use_subs.clone());
    let mut subs = Subs::default();
    for (index, parameter) in parameters.iter().enumerate() {
        let name = parameter.name.name.as_str();
        if let Some(arg) = args.get(index) {
            subs.insert(
                name,
                TypeArg {
                    file: Rc::clone(use_file),
                    scope: use_scope,
                    ty: arg,
                    subs: Rc::clone(&shared_use_subs),
                },
            );
        } else if let Some(default) = &parameter.default {
            subs.insert(
                name,
                TypeArg {
                    file: Rc::clone(decl_file),
                    scope: decl_scope,
                    ty: default,
                    subs: Rc::new(Subs::default()),
                },
            );
        }
    }
    subs
}

/// Replaces an existing property with the same key, otherwise appends.
fn upsert_property(properties: &mut Vec<ObjectSignatureProperty>, property: ObjectSignatureProperty) {
    let key_name = match &property.key {
        PropertyKeyDescriptor::Name(name) => Some(name.clone()),
        PropertyKeyDescriptor::Descriptor(_) => None,
    };
    if let Some(key_name) = key_name {
        if let Some(existing) = properties.iter_mut().find(|existing| {
            matches!(&existing.key, PropertyKeyDescriptor::Name(name) if *name == key_name)
        }) {
            *existing = property;
            return;
        }
    }
    properties.push(property);
}

/// Folds intersection members: all-object intersections merge into a single
/// object signature, anything else stays an element list.
fn merge_intersection(raw: String, members: Vec<TypeDescriptor>) -> TypeDescriptor {
    let all_objects = members
        .iter()
        .all(|member| matches!(member.kind, TypeKind::Object { .. }));
    if all_objects && !members.is_empty() {
        let mut merged: Vec<ObjectSignatureProperty> = Vec::new();
        let mut constructor = None;
        for member in members {
            if let TypeKind::Object { signature, .. } = member.kind {
                if signature.constructor.is_some() {
                    constructor = signature.constructor;
                }
                for property in signature.properties {
                    upsert_property(&mut merged, property);
                }
            }
        }
        return TypeDescriptor::new(TypeKind::object(
            raw,
            ObjectSignature {
                properties: merged,
                constructor,
            },
        ));
    }
    TypeDescriptor::new(TypeKind::Elements {
        name: "intersection".to_string(),
        raw,
        elements: members,
    })
}
