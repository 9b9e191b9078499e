//! Integration tests for definition discovery strategies.
//!
//! Covers the exported-definition resolver (declarations, specifier lists,
//! CommonJS assignments, limits), the whole-tree resolver, the annotation
//! resolver, and resolver chaining.

use uidoc::{
    ChainPolicy, ChainResolver, Config, DocgenError, FindAllDefinitions,
    FindAnnotatedDefinitions, FindExportedDefinitions,
};

fn parse_default(source: &str) -> Vec<uidoc::Documentation> {
    uidoc::parse(source, &Config::default()).unwrap()
}

#[test]
fn finds_default_exported_function() {
    let docs = parse_default(
        r#"
        /**
         * A humble button.
         */
        export default function Button() {
            return <button>ok</button>;
        }
        "#,
    );
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("Button"));
    assert_eq!(docs[0].description.as_deref(), Some("A humble button."));
}

#[test]
fn finds_named_exported_arrow() {
    let docs = parse_default(
        r#"
        export const Badge = () => <span className="badge" />;
        "#,
    );
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("Badge"));
}

#[test]
fn finds_commonjs_export() {
    let docs = parse_default(
        r#"
        function Panel() {
            return <div role="panel" />;
        }
        module.exports = Panel;
        "#,
    );
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("Panel"));
}

#[test]
fn follows_export_of_local_binding() {
    let docs = parse_default(
        r#"
        const Chip = (props) => <span>{props.label}</span>;
        export { Chip };
        "#,
    );
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("Chip"));
}

#[test]
fn single_resolver_rejects_multiple_components() {
    let error = uidoc::parse(
        r#"
        export function First() { return <a />; }
        export function Second() { return <b />; }
        "#,
        &Config::default(),
    )
    .unwrap_err();
    match error {
        DocgenError::MultipleDefinitions { found, limit, .. } => {
            assert_eq!(found, 2);
            assert_eq!(limit, 1);
        }
        other => panic!("expected MultipleDefinitions, got {other}"),
    }
}

#[test]
fn unlimited_resolver_documents_every_export() {
    let config = Config {
        resolver: Box::new(FindExportedDefinitions::all()),
        ..Config::default()
    };
    let docs = uidoc::parse(
        r#"
        export function First() { return <a />; }
        export function Second() { return <b />; }
        "#,
        &config,
    )
    .unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].display_name.as_deref(), Some("First"));
    assert_eq!(docs[1].display_name.as_deref(), Some("Second"));
}

#[test]
fn missing_definition_is_an_error() {
    let error = uidoc::parse("export const answer = 42;", &Config::default()).unwrap_err();
    assert!(matches!(error, DocgenError::MissingDefinition { .. }));
}

#[test]
fn plain_helpers_are_not_components() {
    // A nested render helper must not promote its host function.
    let error = uidoc::parse(
        r#"
        export function makeRenderer() {
            const helper = () => <div />;
            helper();
            return 42;
        }
        "#,
        &Config::default(),
    )
    .unwrap_err();
    assert!(matches!(error, DocgenError::MissingDefinition { .. }));
}

#[test]
fn cyclic_bindings_terminate() {
    // `A` and `B` resolve to each other; resolution must settle instead
    // of recursing, and neither is a component.
    let error = uidoc::parse(
        r#"
        const A = B;
        const B = A;
        export default A;
        "#,
        &Config::default(),
    )
    .unwrap_err();
    assert!(matches!(error, DocgenError::MissingDefinition { .. }));
}

#[test]
fn render_method_marks_a_class_without_known_superclass() {
    let docs = parse_default(
        r#"
        import { View } from './base';

        export default class Screen extends View {
            render() {
                return <div />;
            }
        }
        "#,
    );
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("Screen"));
}

#[test]
fn recognizes_wrapped_default_export() {
    let docs = parse_default(
        r#"
        import { memo } from 'react';
        export default memo(function Chip(props) {
            return <span>{props.label}</span>;
        });
        "#,
    );
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("Chip"));
}

#[test]
fn whole_tree_resolver_finds_unexported_components() {
    let config = Config {
        resolver: Box::new(FindAllDefinitions),
        ..Config::default()
    };
    let docs = uidoc::parse(
        r#"
        const Hidden = () => <div />;
        function alsoHidden() {
            return <span />;
        }
        "#,
        &config,
    )
    .unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].display_name.as_deref(), Some("Hidden"));
    assert_eq!(docs[1].display_name.as_deref(), Some("alsoHidden"));
}

#[test]
fn whole_tree_resolver_reports_nested_render_helpers() {
    let config = Config {
        resolver: Box::new(FindAllDefinitions),
        ..Config::default()
    };
    // The host returns no markup; only the helper inside it does.
    let docs = uidoc::parse(
        r#"
        export function makeRenderer() {
            const helper = () => <div />;
            return helper;
        }
        "#,
        &config,
    )
    .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("helper"));
}

#[test]
fn whole_tree_resolver_subsumes_wrapped_inner() {
    let config = Config {
        resolver: Box::new(FindAllDefinitions),
        ..Config::default()
    };
    let docs = uidoc::parse(
        r#"
        import { memo } from 'react';
        const Inner = () => <div />;
        export default memo(Inner);
        "#,
        &config,
    )
    .unwrap();
    // The wrapper and its inner arrow count as one definition.
    assert_eq!(docs.len(), 1);
}

#[test]
fn annotation_resolver_trusts_the_marker() {
    let config = Config {
        resolver: Box::new(FindAnnotatedDefinitions::new()),
        ..Config::default()
    };
    // Returns no markup; only the annotation makes it a component.
    let docs = uidoc::parse(
        r#"
        /**
         * @component
         */
        const toolbar = () => null;
        "#,
        &config,
    )
    .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("toolbar"));
}

#[test]
fn annotation_resolver_supports_custom_markers() {
    let config = Config {
        resolver: Box::new(FindAnnotatedDefinitions::with_annotation("@widget")),
        ..Config::default()
    };
    let docs = uidoc::parse(
        r#"
        /** @widget */
        function gauge() { return null; }

        /** @component */
        function ignored() { return null; }
        "#,
        &config,
    )
    .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("gauge"));
}

#[test]
fn chain_falls_through_to_the_next_resolver() {
    let config = Config {
        resolver: Box::new(ChainResolver::new(
            vec![
                Box::new(FindExportedDefinitions::all()),
                Box::new(FindAllDefinitions),
            ],
            ChainPolicy::FirstFound,
        )),
        ..Config::default()
    };
    // Nothing is exported, so only the whole-tree member finds the arrow.
    let docs = uidoc::parse("const Quiet = () => <div />;", &config).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("Quiet"));
}

#[test]
fn chain_merge_deduplicates_by_node() {
    let config = Config {
        resolver: Box::new(ChainResolver::new(
            vec![
                Box::new(FindExportedDefinitions::all()),
                Box::new(FindAllDefinitions),
            ],
            ChainPolicy::All,
        )),
        ..Config::default()
    };
    let docs = uidoc::parse(
        r#"
        export const Only = () => <div />;
        "#,
        &config,
    )
    .unwrap();
    // Both members find the same arrow; it is documented once.
    assert_eq!(docs.len(), 1);
}
