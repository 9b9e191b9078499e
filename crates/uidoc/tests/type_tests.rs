//! Integration tests for static type synthesis: interfaces, aliases,
//! generics, unions, intersections, enums, and function members.

use uidoc::{Config, TypeKind};

fn parse_one(source: &str) -> uidoc::Documentation {
    let mut docs = uidoc::parse(source, &Config::default()).unwrap();
    assert_eq!(docs.len(), 1);
    docs.remove(0)
}

fn simple_name(kind: &TypeKind) -> &str {
    match kind {
        TypeKind::Simple { name, .. } => name,
        other => panic!("expected a simple type, got {other:?}"),
    }
}

#[test]
fn expands_interface_props() {
    let doc = parse_one(
        r#"
        interface Props {
            /** Text shown inside the tag. */
            label: string;
            size?: number | null;
            kind: 'info' | 'warn';
        }

        export default function TagView({ label }: Props) {
            return <span>{label}</span>;
        }
        "#,
    );

    let label = &doc.props["label"];
    assert_eq!(label.required, Some(true));
    assert_eq!(
        label.description.as_deref(),
        Some("Text shown inside the tag.")
    );
    assert_eq!(simple_name(&label.ts_type.as_ref().unwrap().kind), "string");

    let size = &doc.props["size"];
    assert_eq!(size.required, Some(false));
    let size_type = size.ts_type.as_ref().unwrap();
    assert_eq!(size_type.nullable, Some(true));
    match &size_type.kind {
        TypeKind::Elements { name, elements, .. } => {
            assert_eq!(name, "union");
            assert_eq!(elements.len(), 2);
        }
        other => panic!("expected a union, got {other:?}"),
    }

    let kind_type = doc.props["kind"].ts_type.as_ref().unwrap();
    match &kind_type.kind {
        TypeKind::Elements { name, elements, .. } => {
            assert_eq!(name, "union");
            assert!(matches!(
                &elements[0].kind,
                TypeKind::Literal { value, .. } if value == "'info'"
            ));
        }
        other => panic!("expected a union, got {other:?}"),
    }
}

#[test]
fn expands_type_alias_with_generics() {
    let doc = parse_one(
        r#"
        type Pair<T> = { first: T; second: T };
        type Props = Pair<string>;

        export default function Cell(props: Props) {
            return <td />;
        }
        "#,
    );
    assert_eq!(
        simple_name(&doc.props["first"].ts_type.as_ref().unwrap().kind),
        "string"
    );
    assert_eq!(
        simple_name(&doc.props["second"].ts_type.as_ref().unwrap().kind),
        "string"
    );
}

#[test]
fn generic_defaults_apply_when_unspecified() {
    let doc = parse_one(
        r#"
        type Box<T = number> = { value: T };

        export default function Holder(props: Box) {
            return <div />;
        }
        "#,
    );
    assert_eq!(
        simple_name(&doc.props["value"].ts_type.as_ref().unwrap().kind),
        "number"
    );
}

#[test]
fn array_types_become_element_lists() {
    let doc = parse_one(
        r#"
        interface Props {
            items: Array<string>;
            names: string[];
            pair: [number, string];
        }

        export default function Listing(props: Props) {
            return <ul />;
        }
        "#,
    );
    for prop in ["items", "names"] {
        match &doc.props[prop].ts_type.as_ref().unwrap().kind {
            TypeKind::Elements { name, elements, .. } => {
                assert_eq!(name, "Array");
                assert_eq!(simple_name(&elements[0].kind), "string");
            }
            other => panic!("expected Array elements for {prop}, got {other:?}"),
        }
    }
    match &doc.props["pair"].ts_type.as_ref().unwrap().kind {
        TypeKind::Elements { name, elements, .. } => {
            assert_eq!(name, "tuple");
            assert_eq!(elements.len(), 2);
        }
        other => panic!("expected a tuple, got {other:?}"),
    }
}

#[test]
fn forward_ref_type_arguments_name_the_props() {
    let doc = parse_one(
        r#"
        import { forwardRef } from 'react';

        interface PanelProps {
            open: boolean;
        }

        export default forwardRef<HTMLDivElement, PanelProps>(function Panel(props, ref) {
            return <div />;
        });
        "#,
    );
    assert_eq!(doc.display_name.as_deref(), Some("Panel"));
    let open = &doc.props["open"];
    assert_eq!(open.required, Some(true));
    assert_eq!(simple_name(&open.ts_type.as_ref().unwrap().kind), "boolean");
}

#[test]
fn intersections_of_objects_merge() {
    let doc = parse_one(
        r#"
        type Base = { id: string };
        type Props = Base & { name: string };

        export default function Row(props: Props) {
            return <tr />;
        }
        "#,
    );
    assert_eq!(
        simple_name(&doc.props["id"].ts_type.as_ref().unwrap().kind),
        "string"
    );
    assert_eq!(
        simple_name(&doc.props["name"].ts_type.as_ref().unwrap().kind),
        "string"
    );
}

#[test]
fn interface_extension_flattens_with_overrides() {
    let doc = parse_one(
        r#"
        interface BaseProps {
            id: string;
            shared: boolean;
        }
        interface Props extends BaseProps {
            id: number;
            name: string;
        }

        export default function Item(props: Props) {
            return <li />;
        }
        "#,
    );
    // Own members override inherited ones by key.
    assert_eq!(
        simple_name(&doc.props["id"].ts_type.as_ref().unwrap().kind),
        "number"
    );
    assert_eq!(
        simple_name(&doc.props["shared"].ts_type.as_ref().unwrap().kind),
        "boolean"
    );
    assert!(doc.props.contains_key("name"));
}

#[test]
fn enums_expand_to_literal_unions() {
    let doc = parse_one(
        r#"
        enum Tone {
            Info = 'info',
            Warn = 'warn',
        }

        interface Props {
            tone: Tone;
        }

        export default function Alert(props: Props) {
            return <div />;
        }
        "#,
    );
    let tone = doc.props["tone"].ts_type.as_ref().unwrap();
    match &tone.kind {
        TypeKind::Elements { name, elements, .. } => {
            assert_eq!(name, "union");
            assert!(matches!(
                &elements[0].kind,
                TypeKind::Literal { value, .. } if value == "'info'"
            ));
            assert!(matches!(
                &elements[1].kind,
                TypeKind::Literal { value, .. } if value == "'warn'"
            ));
        }
        other => panic!("expected a union, got {other:?}"),
    }
}

#[test]
fn numeric_enums_resume_from_explicit_initializers() {
    let doc = parse_one(
        r#"
        enum Level {
            Quiet,
            Loud = 5,
            Deafening,
        }

        interface Props {
            level: Level;
        }

        export default function Meter(props: Props) {
            return <div />;
        }
        "#,
    );
    let level = doc.props["level"].ts_type.as_ref().unwrap();
    match &level.kind {
        TypeKind::Elements { name, elements, .. } => {
            assert_eq!(name, "union");
            let values: Vec<&str> = elements
                .iter()
                .map(|element| match &element.kind {
                    TypeKind::Literal { value, .. } => value.as_str(),
                    other => panic!("expected a literal, got {other:?}"),
                })
                .collect();
            assert_eq!(values, vec!["0", "5", "6"]);
        }
        other => panic!("expected a union, got {other:?}"),
    }
}

#[test]
fn unsupported_type_syntax_degrades_to_raw_text() {
    let doc = parse_one(
        r#"
        interface Props {
            field: keyof HTMLElement;
            flag: string extends number ? true : false;
        }

        export default function Reflector(props: Props) {
            return <div />;
        }
        "#,
    );
    // Syntax the synthesizer does not model still yields a structurally
    // valid descriptor carrying the source text.
    let field = doc.props["field"].ts_type.as_ref().unwrap();
    match &field.kind {
        TypeKind::Simple { name, raw } => {
            assert_eq!(name, "keyof HTMLElement");
            assert_eq!(raw.as_deref(), Some("keyof HTMLElement"));
        }
        other => panic!("expected a raw simple descriptor, got {other:?}"),
    }
    let flag = doc.props["flag"].ts_type.as_ref().unwrap();
    assert!(matches!(
        &flag.kind,
        TypeKind::Simple { raw: Some(raw), .. } if raw.contains("extends")
    ));
}

#[test]
fn function_members_carry_signatures() {
    let doc = parse_one(
        r#"
        interface Props {
            onSelect: (index: number) => void;
        }

        export default function Menu(props: Props) {
            return <nav />;
        }
        "#,
    );
    let on_select = doc.props["onSelect"].ts_type.as_ref().unwrap();
    match &on_select.kind {
        TypeKind::Function { signature, .. } => {
            assert_eq!(signature.arguments.len(), 1);
            assert_eq!(signature.arguments[0].name, "index");
            let argument_type = signature.arguments[0].type_descriptor.as_ref().unwrap();
            assert_eq!(simple_name(&argument_type.kind), "number");
            assert_eq!(
                simple_name(&signature.return_type.as_ref().unwrap().kind),
                "void"
            );
        }
        other => panic!("expected a function signature, got {other:?}"),
    }
}

#[test]
fn transparent_wrappers_pass_through() {
    let doc = parse_one(
        r#"
        interface Inner {
            flag: boolean;
        }

        export default function Flag(props: Readonly<Inner>) {
            return <i />;
        }
        "#,
    );
    assert_eq!(
        simple_name(&doc.props["flag"].ts_type.as_ref().unwrap().kind),
        "boolean"
    );
}

#[test]
fn recursive_aliases_terminate() {
    let doc = parse_one(
        r#"
        type Tree = { label: string; children: Tree };

        export default function TreeView(props: Tree) {
            return <div />;
        }
        "#,
    );
    // The nested reference stops expanding instead of recursing.
    assert!(doc.props.contains_key("children"));
    assert_eq!(
        simple_name(&doc.props["label"].ts_type.as_ref().unwrap().kind),
        "string"
    );
}

#[test]
fn unresolvable_references_keep_their_name() {
    let doc = parse_one(
        r#"
        import type { ReactNode } from 'react';

        interface Props {
            children: ReactNode;
        }

        export default function Slot(props: Props) {
            return <div />;
        }
        "#,
    );
    assert_eq!(
        simple_name(&doc.props["children"].ts_type.as_ref().unwrap().kind),
        "ReactNode"
    );
}
