use indexmap::IndexMap;
use serde::Serialize;

/// Finalized, immutable documentation record for one component definition.
///
/// Produced by [`crate::builder::DocumentationBuilder::finalize`]. Empty
/// collections are dropped during serialization rather than emitted as
/// empty maps/arrays.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Documentation {
    /// Component display name, from a `displayName` static or the
    /// declaration name.
    #[serde(rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Free-form description from the component docblock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Documented props, in first-discovery order.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub props: IndexMap<String, PropDescriptor>,
    /// Context entries (`contextTypes`).
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub context: IndexMap<String, PropDescriptor>,
    /// Child context entries (`childContextTypes`).
    #[serde(rename = "childContext", skip_serializing_if = "IndexMap::is_empty")]
    pub child_context: IndexMap<String, PropDescriptor>,
    /// Module specifiers whose prop maps were spread into this component.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub composes: Vec<String>,
    /// Documented public methods.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodDescriptor>,
    /// Open bag of additional scalar fields set by custom handlers.
    #[serde(flatten, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Documentation for a single prop, context entry, or child-context entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropDescriptor {
    /// Runtime-validator shape (`PropTypes.*` chain).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub prop_type: Option<PropTypeDescriptor>,
    /// Static-type shape synthesized from a TypeScript annotation.
    #[serde(rename = "tsType", skip_serializing_if = "Option::is_none")]
    pub ts_type: Option<TypeDescriptor>,
    /// Whether the prop is required (`.isRequired` or a non-optional
    /// type member).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Default value extracted from `defaultProps` or parameter defaults.
    #[serde(rename = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    /// Human-readable description from a leading docblock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A statically-extracted default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultValue {
    /// Raw source text of the default expression.
    pub value: String,
    /// `true` when the expression references other values (identifiers,
    /// member accesses, calls) rather than being a self-contained literal.
    pub computed: bool,
}

/// Normalized shape of a runtime validator chain (e.g. `PropTypes.arrayOf`).
///
/// Parameterized validators carry their payload in `value`: a nested
/// descriptor for `arrayOf`/`objectOf`, a list of descriptors for
/// `oneOfType`, a list of `{value, computed}` entries for `oneOf`, and a
/// name-keyed object of descriptors for `shape`/`exact`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropTypeDescriptor {
    /// Validator name (`string`, `arrayOf`, `shape`, `custom`, ...).
    pub name: String,
    /// Payload for parameterized validators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Raw source text, kept for `custom` and `instanceOf` validators.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    /// Set when `.isRequired` is chained onto the validator.
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub required: bool,
    /// Set on chain segments whose value could not be statically resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed: Option<bool>,
}

impl PropTypeDescriptor {
    /// Creates a descriptor with just a validator name.
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Normalized recursive representation of a static type.
///
/// The variant payload is flattened into the serialized object so that a
/// `Simple` descriptor serializes as `{"name": "string"}` and an
/// `Elements` descriptor as `{"name": "union", "raw": ..., "elements": [...]}`.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDescriptor {
    /// The structural shape of the type.
    #[serde(flatten)]
    pub kind: TypeKind,
    /// Whether the surrounding member is required. Only populated inside
    /// object signatures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Whether the type admits `null`/`undefined`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    /// The named type this structural shape was expanded from, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl TypeDescriptor {
    /// Wraps a [`TypeKind`] with no flags set.
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            required: None,
            nullable: None,
            alias: None,
        }
    }

    /// A plain named type with no raw text.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::new(TypeKind::Simple {
            name: name.into(),
            raw: None,
        })
    }

    /// The guaranteed fallback for unrecognized type syntax: a `Simple`
    /// descriptor carrying the raw source text.
    pub fn raw_fallback(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        Self::new(TypeKind::Simple {
            name: raw.clone(),
            raw: Some(raw),
        })
    }

    /// Returns the raw source text carried by this descriptor, if any.
    pub fn raw(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Simple { raw, .. } => raw.as_deref(),
            TypeKind::Literal { .. } => None,
            TypeKind::Elements { raw, .. }
            | TypeKind::Function { raw, .. }
            | TypeKind::Object { raw, .. } => Some(raw),
        }
    }
}

/// Tagged union of supported type shapes.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TypeKind {
    /// A named type (`string`, `Date`, unexpanded references).
    Simple {
        /// Type name.
        name: String,
        /// Raw source text when the name alone is not faithful.
        #[serde(skip_serializing_if = "Option::is_none")]
        raw: Option<String>,
    },
    /// An exact literal type (`'primary'`, `42`, `true`).
    Literal {
        /// Always `"literal"`.
        name: &'static str,
        /// Raw literal text.
        value: String,
    },
    /// An ordered list of constituent types: unions, intersections,
    /// tuples, and `Array<T>` element lists.
    Elements {
        /// Construct tag: `union`, `intersection`, `tuple`, or `Array`.
        name: String,
        /// Raw source text, used for display fallback.
        raw: String,
        /// Constituent descriptors in source order.
        elements: Vec<TypeDescriptor>,
    },
    /// A function type.
    Function {
        /// Always `"signature"`.
        name: &'static str,
        /// Always `"function"`.
        #[serde(rename = "type")]
        signature_type: &'static str,
        /// Raw source text.
        raw: String,
        /// Argument and return shapes.
        signature: FunctionSignature,
    },
    /// An object type.
    Object {
        /// Always `"signature"`.
        name: &'static str,
        /// Always `"object"`.
        #[serde(rename = "type")]
        signature_type: &'static str,
        /// Raw source text.
        raw: String,
        /// Property shapes.
        signature: ObjectSignature,
    },
}

impl TypeKind {
    /// Builds the `Function` variant with its fixed tags.
    pub fn function(raw: impl Into<String>, signature: FunctionSignature) -> Self {
        Self::Function {
            name: "signature",
            signature_type: "function",
            raw: raw.into(),
            signature,
        }
    }

    /// Builds the `Object` variant with its fixed tags.
    pub fn object(raw: impl Into<String>, signature: ObjectSignature) -> Self {
        Self::Object {
            name: "signature",
            signature_type: "object",
            raw: raw.into(),
            signature,
        }
    }

    /// Builds the `Literal` variant with its fixed tag.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            name: "literal",
            value: value.into(),
        }
    }
}

/// Ordered argument list plus optional `this` and return types.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FunctionSignature {
    /// Positional arguments in declaration order.
    pub arguments: Vec<FunctionArgument>,
    /// Explicit `this` parameter type, tracked separately from
    /// positional arguments.
    #[serde(rename = "this", skip_serializing_if = "Option::is_none")]
    pub this_type: Option<Box<TypeDescriptor>>,
    /// Return type.
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Box<TypeDescriptor>>,
}

/// One function argument.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionArgument {
    /// Argument name (pattern text for destructured parameters).
    pub name: String,
    /// Argument type, when annotated.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_descriptor: Option<TypeDescriptor>,
    /// Set on a trailing rest parameter.
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub rest: bool,
}

/// Ordered property list of an object type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectSignature {
    /// Properties in declaration order (inherited members first when an
    /// interface `extends` chain was flattened).
    pub properties: Vec<ObjectSignatureProperty>,
    /// Constructor signature, when the object declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Box<TypeDescriptor>>,
}

/// One property of an object signature.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSignatureProperty {
    /// Property key: a plain name, or a descriptor for index signatures.
    pub key: PropertyKeyDescriptor,
    /// Property value type. Carries `required` for non-optional members.
    pub value: TypeDescriptor,
    /// Description from a leading docblock on the member.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Object-signature property key: string name or key-type descriptor.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PropertyKeyDescriptor {
    /// Plain property name.
    Name(String),
    /// Key type of an index signature.
    Descriptor(Box<TypeDescriptor>),
}

/// Documentation for one class or factory-object method.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Raw docblock text attached to the method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docblock: Option<String>,
    /// Summary text from the docblock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Modifiers: `static`, `get`, `set`, `async`, `generator`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    /// Parameters in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<MethodParameter>,
    /// Return type and description, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<MethodReturn>,
}

/// One method parameter.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MethodParameter {
    /// Parameter name.
    pub name: String,
    /// Set for optional parameters (`x?: T`).
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub optional: bool,
    /// Static type, from the annotation or a JSDoc `@param` hint.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_descriptor: Option<TypeDescriptor>,
    /// Description from a JSDoc `@param` tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Return documentation for a method.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MethodReturn {
    /// Return type, from the annotation or a JSDoc `@returns` hint.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_descriptor: Option<TypeDescriptor>,
    /// Description from a JSDoc `@returns` tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
