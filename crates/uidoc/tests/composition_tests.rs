//! Integration tests for cross-file resolution: re-exports, composed
//! validator maps, imported types, and import cycles.

use std::fs;
use std::path::Path;

use uidoc::{Config, Docgen, DocgenError, FsImporter};

fn write(dir: &Path, name: &str, source: &str) {
    fs::write(dir.join(name), source).unwrap();
}

fn docgen_with_fs() -> Docgen {
    Docgen::new(Config {
        importer: Box::new(FsImporter),
        ..Config::default()
    })
}

#[test]
fn follows_default_re_export() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "impl.jsx",
        r#"
        import PropTypes from 'prop-types';

        export default function Impl({ label }) {
            return <div>{label}</div>;
        }

        Impl.propTypes = {
            label: PropTypes.string,
        };
        "#,
    );
    write(dir.path(), "entry.jsx", "export { default } from './impl';\n");

    let docs = docgen_with_fs().parse_path(dir.path().join("entry.jsx")).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].display_name.as_deref(), Some("Impl"));
    assert_eq!(docs[0].props["label"].prop_type.as_ref().unwrap().name, "string");
}

#[test]
fn composed_validator_maps_record_their_source() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "shared.js",
        r#"
        import PropTypes from 'prop-types';

        export const sharedTypes = {
            id: PropTypes.string.isRequired,
        };
        "#,
    );
    write(
        dir.path(),
        "card.jsx",
        r#"
        import PropTypes from 'prop-types';
        import { sharedTypes } from './shared';

        export default function Card(props) {
            return <div />;
        }

        Card.propTypes = {
            ...sharedTypes,
            title: PropTypes.string,
        };
        "#,
    );

    let docs = docgen_with_fs().parse_path(dir.path().join("card.jsx")).unwrap();
    let doc = &docs[0];
    assert_eq!(doc.composes, vec!["./shared"]);
    // The spread source is also inlined, so the composed prop documents.
    assert_eq!(doc.props["id"].required, Some(true));
    assert_eq!(doc.props["title"].prop_type.as_ref().unwrap().name, "string");
}

#[test]
fn resolves_imported_interfaces() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "types.ts",
        r#"
        export interface ButtonProps {
            label: string;
            disabled?: boolean;
        }
        "#,
    );
    write(
        dir.path(),
        "button.tsx",
        r#"
        import { ButtonProps } from './types';

        export default function Button(props: ButtonProps) {
            return <button>{props.label}</button>;
        }
        "#,
    );

    let docs = docgen_with_fs().parse_path(dir.path().join("button.tsx")).unwrap();
    let doc = &docs[0];
    assert_eq!(doc.props["label"].required, Some(true));
    assert_eq!(doc.props["disabled"].required, Some(false));
}

#[test]
fn follows_named_re_export_chains() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "leaf.jsx",
        r#"
        export function Leaf() {
            return <em />;
        }
        "#,
    );
    write(dir.path(), "middle.js", "export { Leaf } from './leaf';\n");
    write(dir.path(), "entry.js", "export { Leaf } from './middle';\n");

    let docs = docgen_with_fs().parse_path(dir.path().join("entry.js")).unwrap();
    assert_eq!(docs[0].display_name.as_deref(), Some("Leaf"));
}

#[test]
fn star_re_exports_are_searched() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "widgets.jsx",
        r#"
        export const Gauge = () => <svg />;
        "#,
    );
    write(dir.path(), "index.js", "export * from './widgets';\n");
    write(dir.path(), "entry.js", "export { Gauge } from './index';\n");

    let docs = docgen_with_fs().parse_path(dir.path().join("entry.js")).unwrap();
    assert_eq!(docs[0].display_name.as_deref(), Some("Gauge"));
}

#[test]
fn import_cycles_settle_instead_of_recursing() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.js", "export { default } from './b';\n");
    write(dir.path(), "b.js", "export { default } from './a';\n");

    let error = docgen_with_fs().parse_path(dir.path().join("a.js")).unwrap_err();
    assert!(matches!(error, DocgenError::MissingDefinition { .. }));
}

#[test]
fn namespace_import_members_resolve() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "parts.jsx",
        r#"
        export const Knob = (props) => <input type="range" />;
        "#,
    );
    write(
        dir.path(),
        "entry.js",
        r#"
        import * as Parts from './parts';
        export default Parts.Knob;
        "#,
    );

    let docs = docgen_with_fs().parse_path(dir.path().join("entry.js")).unwrap();
    assert_eq!(docs[0].display_name.as_deref(), Some("Knob"));
}
