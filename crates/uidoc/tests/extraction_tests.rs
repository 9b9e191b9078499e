//! Integration tests for documentation extraction handlers: validator
//! maps, defaults, display names, docblocks, and methods.

use uidoc::Config;

fn parse_one(source: &str) -> uidoc::Documentation {
    let mut docs = uidoc::parse(source, &Config::default()).unwrap();
    assert_eq!(docs.len(), 1);
    docs.remove(0)
}

#[test]
fn extracts_validator_chains() {
    let doc = parse_one(
        r#"
        import React from 'react';
        import PropTypes from 'prop-types';

        export default class Button extends React.Component {
            render() {
                return <button>{this.props.label}</button>;
            }
        }

        Button.propTypes = {
            /**
             * Visible label.
             */
            label: PropTypes.string.isRequired,
            size: PropTypes.oneOf(['small', 'large']),
            onClick: PropTypes.func,
            style: PropTypes.shape({
                color: PropTypes.string,
            }),
            items: PropTypes.arrayOf(PropTypes.number),
            createdAt: PropTypes.instanceOf(Date),
        };
        "#,
    );

    let label = &doc.props["label"];
    let label_type = label.prop_type.as_ref().unwrap();
    assert_eq!(label_type.name, "string");
    assert!(label_type.required);
    assert_eq!(label.required, Some(true));
    assert_eq!(label.description.as_deref(), Some("Visible label."));

    let size = doc.props["size"].prop_type.as_ref().unwrap();
    assert_eq!(size.name, "enum");
    let entries = size.value.as_ref().unwrap().as_array().unwrap();
    assert_eq!(entries[0]["value"], "'small'");
    assert_eq!(entries[0]["computed"], false);
    assert_eq!(entries[1]["value"], "'large'");

    assert_eq!(doc.props["onClick"].prop_type.as_ref().unwrap().name, "func");

    let style = doc.props["style"].prop_type.as_ref().unwrap();
    assert_eq!(style.name, "shape");
    let fields = style.value.as_ref().unwrap().as_object().unwrap();
    assert_eq!(fields["color"]["name"], "string");

    let items = doc.props["items"].prop_type.as_ref().unwrap();
    assert_eq!(items.name, "arrayOf");
    assert_eq!(items.value.as_ref().unwrap()["name"], "number");

    let created_at = doc.props["createdAt"].prop_type.as_ref().unwrap();
    assert_eq!(created_at.name, "instanceOf");
    assert_eq!(created_at.value.as_ref().unwrap().as_str(), Some("Date"));
}

#[test]
fn unknown_validators_degrade_to_custom() {
    let doc = parse_one(
        r#"
        import PropTypes from 'prop-types';

        export default function Field(props) {
            return <input />;
        }

        Field.propTypes = {
            validate: function (props, propName) { return null; },
        };
        "#,
    );
    let validate = doc.props["validate"].prop_type.as_ref().unwrap();
    assert_eq!(validate.name, "custom");
    assert!(validate.raw.as_ref().unwrap().starts_with("function"));
}

#[test]
fn one_of_type_nests_descriptors() {
    let doc = parse_one(
        r#"
        import PropTypes from 'prop-types';

        export default function Cell(props) {
            return <td />;
        }

        Cell.propTypes = {
            width: PropTypes.oneOfType([PropTypes.number, PropTypes.string]),
        };
        "#,
    );
    let width = doc.props["width"].prop_type.as_ref().unwrap();
    assert_eq!(width.name, "union");
    let members = width.value.as_ref().unwrap().as_array().unwrap();
    assert_eq!(members[0]["name"], "number");
    assert_eq!(members[1]["name"], "string");
}

#[test]
fn validator_map_spreads_are_inlined() {
    let doc = parse_one(
        r#"
        import PropTypes from 'prop-types';

        const common = {
            id: PropTypes.string.isRequired,
        };

        export default function Row(props) {
            return <tr />;
        }

        Row.propTypes = {
            ...common,
            selected: PropTypes.bool,
        };
        "#,
    );
    assert_eq!(doc.props["id"].required, Some(true));
    assert_eq!(doc.props["selected"].prop_type.as_ref().unwrap().name, "bool");
}

#[test]
fn spreads_of_assigned_member_maps_are_inlined() {
    // `Base.propTypes` lives in a module-level assignment, not a class
    // static; spreading it must still inline the source props.
    let doc = parse_one(
        r#"
        import PropTypes from 'prop-types';

        function Base(props) {
            return <div />;
        }

        Base.propTypes = {
            id: PropTypes.string.isRequired,
        };

        export default function Derived(props) {
            return <section />;
        }

        Derived.propTypes = {
            ...Base.propTypes,
            extra: PropTypes.bool,
        };
        "#,
    );
    let id = &doc.props["id"];
    assert_eq!(id.prop_type.as_ref().unwrap().name, "string");
    assert_eq!(id.required, Some(true));
    assert_eq!(doc.props["extra"].prop_type.as_ref().unwrap().name, "bool");
}

#[test]
fn extracts_static_default_props() {
    let doc = parse_one(
        r#"
        import { Component } from 'react';

        class Tag extends Component {
            static defaultProps = {
                tone: 'muted',
                width: computeWidth(),
            };
            render() {
                return <div />;
            }
        }
        export default Tag;
        "#,
    );
    let tone = doc.props["tone"].default_value.as_ref().unwrap();
    assert_eq!(tone.value, "'muted'");
    assert!(!tone.computed);

    let width = doc.props["width"].default_value.as_ref().unwrap();
    assert_eq!(width.value, "computeWidth()");
    assert!(width.computed);
}

#[test]
fn extracts_destructured_parameter_defaults() {
    let doc = parse_one(
        r#"
        export default function Badge({ kind = 'info', total = count() }) {
            return <span>{kind}</span>;
        }
        "#,
    );
    let kind = doc.props["kind"].default_value.as_ref().unwrap();
    assert_eq!(kind.value, "'info'");
    assert!(!kind.computed);

    let total = doc.props["total"].default_value.as_ref().unwrap();
    assert_eq!(total.value, "count()");
    assert!(total.computed);
}

#[test]
fn explicit_display_name_wins() {
    let doc = parse_one(
        r#"
        import { Component } from 'react';

        export default class Widget extends Component {
            static displayName = 'FancyWidget';
            render() { return <div />; }
        }
        "#,
    );
    assert_eq!(doc.display_name.as_deref(), Some("FancyWidget"));
}

#[test]
fn factory_components_are_fully_documented() {
    let doc = parse_one(
        r#"
        import createReactClass from 'create-react-class';
        import PropTypes from 'prop-types';

        export default createReactClass({
            displayName: 'Chip',
            propTypes: {
                tone: PropTypes.string,
            },
            getDefaultProps() {
                return { tone: 'neutral' };
            },
            /**
             * Clears the chip.
             */
            clear(animated) {},
            render() {
                return <div />;
            },
        });
        "#,
    );
    assert_eq!(doc.display_name.as_deref(), Some("Chip"));
    assert_eq!(doc.props["tone"].prop_type.as_ref().unwrap().name, "string");
    assert_eq!(
        doc.props["tone"].default_value.as_ref().unwrap().value,
        "'neutral'"
    );

    assert_eq!(doc.methods.len(), 1);
    let clear = &doc.methods[0];
    assert_eq!(clear.name, "clear");
    assert_eq!(clear.description.as_deref(), Some("Clears the chip."));
    assert_eq!(clear.params.len(), 1);
    assert_eq!(clear.params[0].name, "animated");
}

#[test]
fn documents_class_methods_and_skips_lifecycle() {
    let doc = parse_one(
        r#"
        import { Component } from 'react';

        export default class List extends Component {
            /**
             * Scrolls to the given row.
             * @param {number} index - the row index
             * @returns {boolean} whether the row exists
             */
            scrollToRow(index) {
                return true;
            }

            static of(items) {
                return new List();
            }

            componentDidMount() {}

            render() {
                return <ul />;
            }
        }
        "#,
    );
    assert_eq!(doc.methods.len(), 2);

    let scroll = &doc.methods[0];
    assert_eq!(scroll.name, "scrollToRow");
    assert_eq!(scroll.description.as_deref(), Some("Scrolls to the given row."));
    assert_eq!(scroll.params[0].name, "index");
    let index_type = scroll.params[0].type_descriptor.as_ref().unwrap();
    assert!(matches!(
        &index_type.kind,
        uidoc::TypeKind::Simple { name, .. } if name == "number"
    ));
    assert_eq!(
        scroll.params[0].description.as_deref(),
        Some("the row index")
    );
    let returns = scroll.returns.as_ref().unwrap();
    assert_eq!(
        returns.description.as_deref(),
        Some("whether the row exists")
    );

    let of = &doc.methods[1];
    assert_eq!(of.name, "of");
    assert_eq!(of.modifiers, vec!["static"]);
}

#[test]
fn extracts_context_maps() {
    let doc = parse_one(
        r#"
        import { Component } from 'react';
        import PropTypes from 'prop-types';

        class Themed extends Component {
            render() { return <div />; }
        }

        Themed.contextTypes = { theme: PropTypes.object };
        Themed.childContextTypes = { theme: PropTypes.object };

        export default Themed;
        "#,
    );
    assert_eq!(doc.context["theme"].prop_type.as_ref().unwrap().name, "object");
    assert_eq!(
        doc.child_context["theme"].prop_type.as_ref().unwrap().name,
        "object"
    );
}

#[test]
fn component_description_comes_from_the_export_site() {
    let doc = parse_one(
        r#"
        /**
         * Renders a styled separator.
         *
         * Useful between list sections.
         */
        export const Separator = () => <hr />;
        "#,
    );
    assert_eq!(
        doc.description.as_deref(),
        Some("Renders a styled separator.\n\nUseful between list sections.")
    );
}
