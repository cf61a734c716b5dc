use pretty_assertions::assert_eq;
use propdoc::model::{DefaultValue, EnumValue, Props, TagMap};
use propdoc::{CompilerOptions, ComponentDoc, ParserOptions, PropFilter, PropItem, PropItemType, StaticPropFilter};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn parse(name: &str) -> Vec<ComponentDoc> {
    propdoc::parse(&[fixture(name)], ParserOptions::default())
}

fn tags(pairs: &[(&str, &str)]) -> TagMap {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn prop(name: &str, ty: &str, required: bool, description: &str, default: Option<&str>, tag_pairs: &[(&str, &str)]) -> PropItem {
    PropItem {
        name: name.to_string(),
        required,
        ty: PropItemType::named(ty),
        description: description.to_string(),
        default_value: default.map(|value| DefaultValue { value: value.to_string() }),
        tags: tags(tag_pairs),
    }
}

fn props(items: Vec<PropItem>) -> Props {
    items.into_iter().map(|p| (p.name.clone(), p)).collect()
}

fn export_names(docs: &[ComponentDoc]) -> Vec<&str> {
    docs.iter().map(|d| d.export_name.as_str()).collect()
}

#[test]
fn interface_and_intersection_alias() {
    let docs = parse("Button.tsx");
    assert_eq!(export_names(&docs), vec!["ButtonProps", "IconButtonProps"]);

    let button = &docs[0];
    assert_eq!(button.description, "Clickable button.");
    assert_eq!(button.tags, tags(&[("author", "JaneDoe")]));
    assert!(button.methods.is_empty());
    assert_eq!(
        button.props,
        props(vec![
            prop("color", "\"primary\" | \"secondary\"", true, "Button color.", None, &[("category", "appearance")]),
            prop("isDisabled", "boolean", false, "", None, &[]),
        ])
    );

    let icon_button = &docs[1];
    assert_eq!(icon_button.description, "Button with an icon.");
    let names: Vec<&str> = icon_button.props.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["color", "isDisabled", "icon", "onClick"]);
    assert_eq!(
        icon_button.props["icon"],
        prop(
            "icon",
            "\"star\" | \"heart\"",
            true,
            "Icon name.",
            Some("'star'"),
            &[("group", "icons"), ("category.id", "42"), ("default", "'star'")],
        )
    );
    assert!(!icon_button.props["onClick"].required);
}

#[test]
fn declaration_span_covers_the_interface() {
    let path = fixture("Button.tsx");
    let source = std::fs::read_to_string(&path).unwrap();
    let docs = propdoc::parse(&[path], ParserOptions::default());
    let (start, end) = docs[0].block.unwrap();
    let text = &source[start..end];
    assert!(text.starts_with("export interface ButtonProps"));
    assert!(text.ends_with('}'));
}

#[test]
fn code_defaults_and_default_tags() {
    let docs = parse("Counter.tsx");
    assert_eq!(export_names(&docs), vec!["CounterProps"]);
    assert_eq!(docs[0].description, "");
    assert!(docs[0].tags.is_empty());
    assert_eq!(
        docs[0].props,
        props(vec![
            prop("color", "\"blue\" | \"green\"", true, "Display color.", Some("blue"), &[("default", "blue")]),
            prop("start", "number", false, "Initial count.", Some("123"), &[]),
            prop("disabled", "boolean", false, "Disable the buttons.", Some("false"), &[]),
        ])
    );
}

#[test]
fn multiline_descriptions_and_quoted_names() {
    let docs = parse("Card.tsx");
    assert_eq!(export_names(&docs), vec!["CardProps"]);
    assert_eq!(docs[0].description, "A card with a long description.\n\nSecond paragraph.");
    assert_eq!(
        docs[0].props,
        props(vec![
            prop("title", "string", true, "Card title.\n\nShown in bold.", None, &[]),
            prop("accent-color", "\"red\" | \"blue\"", false, "Accent color.", None, &[]),
        ])
    );
}

#[test]
fn extracts_string_literal_unions() {
    let options = ParserOptions {
        should_extract_literal_values_from_enum: true,
        ..Default::default()
    };
    let docs = propdoc::parse(&[fixture("Card.tsx")], options);
    assert_eq!(
        docs[0].props["accent-color"].ty,
        PropItemType {
            name: "enum".to_string(),
            raw: Some("\"red\" | \"blue\"".to_string()),
            value: Some(vec![
                EnumValue {
                    value: "\"red\"".to_string()
                },
                EnumValue {
                    value: "\"blue\"".to_string()
                },
            ]),
        }
    );
    assert_eq!(docs[0].props["title"].ty, PropItemType::named("string"));
}

#[test]
fn default_export_takes_directory_name() {
    let docs = parse("date-picker/index.tsx");
    assert_eq!(export_names(&docs), vec!["datepicker"]);
    assert_eq!(docs[0].description, "Date picker props.");
    assert_eq!(
        docs[0].props,
        props(vec![prop("value", "string", false, "Selected date.", None, &[])])
    );
}

#[test]
fn module_without_props_yields_nothing() {
    assert!(parse("format.ts").is_empty());
}

#[test]
fn files_in_argument_order() {
    let docs = propdoc::parse(&[fixture("Counter.tsx"), fixture("Card.tsx")], ParserOptions::default());
    assert_eq!(export_names(&docs), vec!["CounterProps", "CardProps"]);
}

#[test]
fn missing_file_is_skipped() {
    let docs = propdoc::parse(&[fixture("Missing.tsx"), fixture("Card.tsx")], ParserOptions::default());
    assert_eq!(export_names(&docs), vec!["CardProps"]);
}

#[test]
fn static_prop_filter() {
    let options = ParserOptions {
        prop_filter: Some(PropFilter::Static(StaticPropFilter {
            skip_props_with_name: vec!["color".to_string()],
            skip_props_without_doc: true,
        })),
        ..Default::default()
    };
    let docs = propdoc::parse(&[fixture("Button.tsx")], options);
    assert!(docs[0].props.is_empty());
    let names: Vec<&str> = docs[1].props.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["icon"]);
}

#[test]
fn strict_null_checks_widen_optional_props() {
    let compiler_options = CompilerOptions {
        strict: Some(true),
        ..CompilerOptions::defaults()
    };
    let parser = propdoc::with_compiler_options(compiler_options, ParserOptions::default());
    let docs = parser.parse(&[fixture("Button.tsx")]);
    assert_eq!(docs[0].props["isDisabled"].ty, PropItemType::named("boolean | undefined"));
    assert_eq!(docs[0].props["color"].ty, PropItemType::named("\"primary\" | \"secondary\""));
}

#[test]
fn custom_tsconfig() {
    let dir = tempfile::TempDir::new().unwrap();
    let tsconfig = dir.path().join("tsconfig.json");
    std::fs::write(&tsconfig, "{\n  // strict mode\n  \"compilerOptions\": { \"strict\": true, },\n}").unwrap();

    let parser = propdoc::with_custom_config(&tsconfig, ParserOptions::default()).unwrap();
    assert!(parser.compiler_options().strict_null_checks());
    let docs = parser.parse(&[fixture("Card.tsx")]);
    assert_eq!(docs[0].props["accent-color"].ty.name, "\"red\" | \"blue\" | undefined");
}

#[test]
fn invalid_tsconfig_is_an_error() {
    let err = propdoc::with_custom_config("/nonexistent/tsconfig.json", ParserOptions::default()).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Cannot load custom tsconfig.json from provided path: /nonexistent/tsconfig.json, with error:"));
}
