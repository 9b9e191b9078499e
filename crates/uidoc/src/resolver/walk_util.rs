//! Shared ancestor-stack helpers for visitor-based resolvers.

use oxc_ast::AstKind;
use oxc_ast::ast::BindingPatternKind;
use oxc_span::GetSpan;

/// Node kinds a definition "climbs" through: a docblock or annotation on any
/// of these documents the definition nested inside.
pub(crate) fn is_climbable(kind: &AstKind<'_>) -> bool {
    matches!(
        kind,
        AstKind::VariableDeclaration(_)
            | AstKind::VariableDeclarator(_)
            | AstKind::ExportNamedDeclaration(_)
            | AstKind::ExportDefaultDeclaration(_)
            | AstKind::ExpressionStatement(_)
            | AstKind::AssignmentExpression(_)
            | AstKind::CallExpression(_)
            | AstKind::ParenthesizedExpression(_)
            | AstKind::TSAsExpression(_)
            | AstKind::ReturnStatement(_)
    )
}

/// Name of the nearest enclosing variable declarator with a plain
/// identifier pattern.
pub(crate) fn name_hint(ancestors: &[AstKind<'_>]) -> Option<String> {
    ancestors.iter().rev().find_map(|kind| match kind {
        AstKind::VariableDeclarator(declarator) => match &declarator.id.kind {
            BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.to_string()),
            _ => None,
        },
        _ => None,
    })
}

/// Doc anchors for a definition node: the span starts of the unbroken chain
/// of climbable ancestors directly above it (outermost first), then the node
/// itself.
pub(crate) fn doc_anchors(ancestors: &[AstKind<'_>], node_start: u32) -> Vec<u32> {
    let mut chain: Vec<u32> = Vec::new();
    for kind in ancestors.iter().rev() {
        if is_climbable(kind) {
            chain.push(kind.span().start);
        } else {
            break;
        }
    }
    chain.reverse();
    chain.push(node_start);
    chain.dedup();
    chain
}
