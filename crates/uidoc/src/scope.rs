//! Lexical scope tracking with separate value and type namespaces.
//!
//! The extraction core never mutates the AST, so bindings are recorded as
//! references into the parsed program. Each scope holds two maps: one for
//! runtime values (variables, functions, classes, imports, parameters) and
//! one for static types (aliases, interfaces, enums, type imports). Name
//! lookup walks the parent chain, which is exactly how shadowing behaves
//! in the source.
//!
//! Function-level granularity is enough for documentation extraction:
//! block statements do not open scopes here, so `let` shadowing inside a
//! nested block is approximated by the enclosing function scope.

use oxc_ast::ast::{
    ArrowFunctionExpression, BindingPattern, BindingPatternKind, Class, Function,
    ImportDeclarationSpecifier, ModuleExportName, Program, TSEnumDeclaration,
    TSInterfaceDeclaration, TSTypeAliasDeclaration, VariableDeclarator,
};
use oxc_ast_visit::{Visit, walk};
use oxc_semantic::ScopeFlags;
use rustc_hash::FxHashMap;

use crate::arena::arena_ref;

/// Identifies one scope within a [`ScopeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

/// A value-namespace binding.
#[derive(Debug, Clone, Copy)]
pub enum Binding<'a> {
    /// `const x = ...` / `let x` / `var x`, possibly destructured.
    Declarator(&'a VariableDeclarator<'a>),
    /// A function declaration or named function expression.
    Function(&'a Function<'a>),
    /// A class declaration or named class expression.
    Class(&'a Class<'a>),
    /// An import binding; resolution is deferred to the importer.
    Import {
        /// Module specifier string as written.
        source: &'a str,
        /// Which exported name the local binding refers to.
        imported: ImportedName<'a>,
    },
    /// A function or arrow parameter.
    Param(&'a BindingPattern<'a>),
}

/// The remote name an import binding refers to.
#[derive(Debug, Clone, Copy)]
pub enum ImportedName<'a> {
    /// `import X from '...'`
    Default,
    /// `import * as X from '...'`
    Namespace,
    /// `import { name } from '...'` / `import { name as X } from '...'`
    Named(&'a str),
}

/// A type-namespace binding.
#[derive(Debug, Clone, Copy)]
pub enum TypeBinding<'a> {
    /// `type X = ...`
    Alias(&'a TSTypeAliasDeclaration<'a>),
    /// `interface X { ... }`
    Interface(&'a TSInterfaceDeclaration<'a>),
    /// `enum X { ... }`
    Enum(&'a TSEnumDeclaration<'a>),
    /// A type imported from another module.
    Import {
        /// Module specifier string as written.
        source: &'a str,
        /// Exported type name (`default` for default imports).
        imported: &'a str,
    },
}

#[derive(Debug, Default)]
struct ScopeData<'a> {
    parent: Option<ScopeId>,
    values: FxHashMap<&'a str, Binding<'a>>,
    types: FxHashMap<&'a str, TypeBinding<'a>>,
}

/// All scopes of one parsed file.
#[derive(Debug, Default)]
pub struct ScopeTree<'a> {
    scopes: Vec<ScopeData<'a>>,
    // Function and arrow scopes keyed by the owner node's span start.
    owners: FxHashMap<u32, ScopeId>,
}

impl<'a> ScopeTree<'a> {
    /// Builds the scope tree for a program in a single visit pass.
    pub fn build(program: &'a Program<'a>) -> Self {
        let mut tree = ScopeTree::default();
        tree.scopes.push(ScopeData::default());
        let mut builder = ScopeBuilder {
            tree,
            stack: vec![ScopeId(0)],
        };
        builder.visit_program(program);
        builder.tree
    }

    /// The module-level scope.
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// The scope owned by the function or arrow starting at `span_start`,
    /// if any.
    pub fn scope_of_function(&self, span_start: u32) -> Option<ScopeId> {
        self.owners.get(&span_start).copied()
    }

    /// Looks a name up in the value namespace, walking outward through
    /// parent scopes. Returns the scope the binding was found in.
    pub fn lookup_value(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, Binding<'a>)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let data = &self.scopes[id.0 as usize];
            if let Some(binding) = data.values.get(name) {
                return Some((id, *binding));
            }
            current = data.parent;
        }
        None
    }

    /// Looks a name up in the type namespace, walking outward through
    /// parent scopes.
    pub fn lookup_type(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, TypeBinding<'a>)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let data = &self.scopes[id.0 as usize];
            if let Some(binding) = data.types.get(name) {
                return Some((id, *binding));
            }
            current = data.parent;
        }
        None
    }
}

struct ScopeBuilder<'a> {
    tree: ScopeTree<'a>,
    stack: Vec<ScopeId>,
}

impl<'a> ScopeBuilder<'a> {
    fn current(&self) -> ScopeId {
        *self.stack.last().unwrap_or(&ScopeId(0))
    }

    fn push_scope(&mut self, owner_span_start: u32) {
        let parent = self.current();
        let id = ScopeId(self.tree.scopes.len() as u32);
        self.tree.scopes.push(ScopeData {
            parent: Some(parent),
            ..ScopeData::default()
        });
        self.tree.owners.insert(owner_span_start, id);
        self.stack.push(id);
    }

    fn pop_scope(&mut self) {
        self.stack.pop();
    }

    fn bind_value(&mut self, name: &'a str, binding: Binding<'a>) {
        let scope = self.current();
        self.tree.scopes[scope.0 as usize].values.insert(name, binding);
    }

    fn bind_type(&mut self, name: &'a str, binding: TypeBinding<'a>) {
        let scope = self.current();
        self.tree.scopes[scope.0 as usize].types.insert(name, binding);
    }

    /// Binds every identifier introduced by a pattern to `binding`.
    /// Destructured names all map to the same binding; projection to the
    /// matching sub-value happens at resolution time.
    fn bind_pattern(&mut self, pattern: &'a BindingPattern<'a>, binding: Binding<'a>) {
        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(ident) => {
                self.bind_value(ident.name.as_str(), binding);
            }
            BindingPatternKind::ObjectPattern(object) => {
                for property in &object.properties {
                    self.bind_pattern(&property.value, binding);
                }
                if let Some(rest) = &object.rest {
                    self.bind_pattern(&rest.argument, binding);
                }
            }
            BindingPatternKind::ArrayPattern(array) => {
                for element in array.elements.iter().flatten() {
                    self.bind_pattern(element, binding);
                }
                if let Some(rest) = &array.rest {
                    self.bind_pattern(&rest.argument, binding);
                }
            }
            BindingPatternKind::AssignmentPattern(assignment) => {
                self.bind_pattern(&assignment.left, binding);
            }
        }
    }
}

impl<'a> Visit<'a> for ScopeBuilder<'a> {
    fn visit_variable_declarator(&mut self, declarator: &VariableDeclarator<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let declarator = unsafe { arena_ref(declarator) };
        self.bind_pattern(&declarator.id, Binding::Declarator(declarator));
        walk::walk_variable_declarator(self, declarator);
    }

    fn visit_function(&mut self, function: &Function<'a>, flags: ScopeFlags) {
        // SAFETY: the node lives in the session arena for 'a.
        let function = unsafe { arena_ref(function) };
        // A function's own name binds in the enclosing scope.
        if let Some(id) = &function.id {
            self.bind_value(id.name.as_str(), Binding::Function(function));
        }
        self.push_scope(function.span.start);
        for param in &function.params.items {
            self.bind_pattern(&param.pattern, Binding::Param(&param.pattern));
        }
        if let Some(rest) = &function.params.rest {
            self.bind_pattern(&rest.argument, Binding::Param(&rest.argument));
        }
        walk::walk_function(self, function, flags);
        self.pop_scope();
    }

    fn visit_arrow_function_expression(&mut self, arrow: &ArrowFunctionExpression<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let arrow = unsafe { arena_ref(arrow) };
        self.push_scope(arrow.span.start);
        for param in &arrow.params.items {
            self.bind_pattern(&param.pattern, Binding::Param(&param.pattern));
        }
        if let Some(rest) = &arrow.params.rest {
            self.bind_pattern(&rest.argument, Binding::Param(&rest.argument));
        }
        walk::walk_arrow_function_expression(self, arrow);
        self.pop_scope();
    }

    fn visit_class(&mut self, class: &Class<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let class = unsafe { arena_ref(class) };
        if let Some(id) = &class.id {
            self.bind_value(id.name.as_str(), Binding::Class(class));
        }
        walk::walk_class(self, class);
    }

    fn visit_import_declaration(&mut self, import: &oxc_ast::ast::ImportDeclaration<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let import = unsafe { arena_ref(import) };
        let source = import.source.value.as_str();
        if let Some(specifiers) = &import.specifiers {
            for specifier in specifiers {
                match specifier {
                    ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
                        let local = spec.local.name.as_str();
                        self.bind_value(
                            local,
                            Binding::Import {
                                source,
                                imported: ImportedName::Default,
                            },
                        );
                        self.bind_type(
                            local,
                            TypeBinding::Import {
                                source,
                                imported: "default",
                            },
                        );
                    }
                    ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
                        self.bind_value(
                            spec.local.name.as_str(),
                            Binding::Import {
                                source,
                                imported: ImportedName::Namespace,
                            },
                        );
                    }
                    ImportDeclarationSpecifier::ImportSpecifier(spec) => {
                        let imported = match &spec.imported {
                            ModuleExportName::IdentifierName(name) => name.name.as_str(),
                            ModuleExportName::IdentifierReference(name) => name.name.as_str(),
                            ModuleExportName::StringLiteral(literal) => literal.value.as_str(),
                        };
                        let local = spec.local.name.as_str();
                        self.bind_value(
                            local,
                            Binding::Import {
                                source,
                                imported: ImportedName::Named(imported),
                            },
                        );
                        // Named imports are visible to the type namespace
                        // too; `import { Props }` may only be used as a type.
                        self.bind_type(local, TypeBinding::Import { source, imported });
                    }
                }
            }
        }
        walk::walk_import_declaration(self, import);
    }

    fn visit_ts_type_alias_declaration(&mut self, alias: &TSTypeAliasDeclaration<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let alias = unsafe { arena_ref(alias) };
        self.bind_type(alias.id.name.as_str(), TypeBinding::Alias(alias));
        walk::walk_ts_type_alias_declaration(self, alias);
    }

    fn visit_ts_interface_declaration(&mut self, interface: &TSInterfaceDeclaration<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let interface = unsafe { arena_ref(interface) };
        self.bind_type(interface.id.name.as_str(), TypeBinding::Interface(interface));
        walk::walk_ts_interface_declaration(self, interface);
    }

    fn visit_ts_enum_declaration(&mut self, ts_enum: &TSEnumDeclaration<'a>) {
        // SAFETY: the node lives in the session arena for 'a.
        let ts_enum = unsafe { arena_ref(ts_enum) };
        self.bind_type(ts_enum.id.name.as_str(), TypeBinding::Enum(ts_enum));
        walk::walk_ts_enum_declaration(self, ts_enum);
    }
}
