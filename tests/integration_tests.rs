use serde::{Deserialize, Serialize};
use serde_quill::{
    from_reader, from_str, parse, parse_with_options, serialize, serialize_with_options, to_string,
    to_value, to_writer, ContentItem, Error, Map, Options, Value,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Author {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Image {
    src: String,
    width: u32,
    caption: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Article {
    slug: String,
    author: Author,
    images: Vec<Image>,
    rating: f64,
}

#[derive(Deserialize, Debug, PartialEq)]
struct Block {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(default)]
    mods: Vec<String>,
}

#[test]
fn test_simple_struct() {
    let author = Author {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "editor".to_string()],
    };

    let text = to_string(&author).unwrap();
    println!("Author:\n{}", text);

    let author_back: Author = from_str(&text).unwrap();
    assert_eq!(author, author_back);
}

#[test]
fn test_nested_struct() {
    let article = Article {
        slug: "hello-world".to_string(),
        author: Author {
            id: 7,
            name: "Alice".to_string(),
            active: false,
            tags: vec!["guest".to_string()],
        },
        images: vec![
            Image {
                src: "/img/cat.jpg".to_string(),
                width: 640,
                caption: Some("A cat".to_string()),
            },
            Image {
                src: "/img/dog.jpg".to_string(),
                width: 320,
                caption: None,
            },
        ],
        rating: 4.75,
    };

    let text = to_string(&article).unwrap();
    println!("Article:\n{}", text);

    let article_back: Article = from_str(&text).unwrap();
    assert_eq!(article, article_back);
}

#[test]
fn test_string_fields_that_look_like_numbers() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Release {
        version: String,
        flag: String,
    }

    let release = Release {
        version: "2.0".to_string(),
        flag: "true".to_string(),
    };
    let text = to_string(&release).unwrap();
    assert_eq!(text, "version::\n  2.0\n::\nflag::\n  true\n::");
    assert_eq!(from_str::<Release>(&text).unwrap(), release);

    // Hand-written scalars still fill string fields.
    let release: Release = from_str("version: 3\nflag: false").unwrap();
    assert_eq!(release.version, "3");
    assert_eq!(release.flag, "false");
}

#[test]
fn test_content_block_into_structs() {
    let text = "body: [[\n#h.large: Welcome\nSome text.\n]]";
    let doc = parse(text);

    let blocks: Vec<Block> = serde::Deserialize::deserialize(doc.get("body").unwrap().clone()).unwrap();
    assert_eq!(
        blocks,
        vec![
            Block {
                kind: "h".to_string(),
                value: "Welcome".to_string(),
                mods: vec!["large".to_string()],
            },
            Block {
                kind: "p".to_string(),
                value: "Some text.".to_string(),
                mods: vec![],
            },
        ]
    );
}

#[test]
fn test_document_round_trip() {
    let text = r#"
// Article front matter
title: Hello /* inline note */ World
meta.author: Ada
meta.tags: [
  intro
  42
]
meta.draft: false
summary::
  A summary that spans
  two lines.
::
body: [[
  #h.large.center: Welcome
  First paragraph.
  <#image.wide: cat.jpg
    alt: A cat
    size.w: 300
  >
  <#grid: [[
    #p: Left
    Right
  ]]
    gap: 8
  >
]]
"#;
    let doc = parse(text);
    assert_eq!(doc.get("title"), Some(&Value::from("Hello  World")));

    let meta = doc.get("meta").and_then(Value::as_map).unwrap();
    assert_eq!(meta.len(), 3);

    let out = serialize(&doc);
    println!("Serialized:\n{}", out);
    assert_eq!(parse(&out), doc);
    assert_eq!(serialize(&parse(&out)), out);
}

#[test]
fn test_json_view_omits_empty_mods_and_props() {
    let doc = parse("body: [[\n#h: Hi\nSome text.\n]]");
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "body": [
                {"type": "h", "value": "Hi"},
                {"type": "p", "value": "Some text."}
            ]
        })
    );
}

#[test]
fn test_tree_from_json_serializes_content_shape() {
    let json = r#"{
        "body": [
            {"type": "h", "value": "Hi", "mods": [], "props": {}},
            {"type": "p", "value": "Text", "mods": [], "props": {}}
        ],
        "plain": [
            {"type": "h", "value": "Hi", "mods": [], "props": {}},
            {"value": "no type", "mods": [], "props": {}}
        ]
    }"#;
    let doc: Map = serde_json::from_str(json).unwrap();
    let text = serialize(&doc);
    assert!(text.starts_with("body: [[\n  #h: Hi\n  Text\n]]\nplain: [\n"));

    let reparsed = parse(&text);
    assert!(reparsed.get("body").unwrap().is_content());
    assert!(reparsed.get("plain").unwrap().is_list());
}

#[test]
fn test_strict_mode() {
    let text = "title: Hi\nbody: [[\n#h: Open\n";
    assert_eq!(
        parse_with_options(text, &Options::strict()),
        Err(Error::unterminated(2, "]]"))
    );

    // Lenient parsing keeps what it read.
    let doc = parse_with_options(text, &Options::new()).unwrap();
    let body = doc.get("body").and_then(Value::as_content).unwrap();
    assert_eq!(body, &vec![ContentItem::new("h", "Open")]);
}

#[test]
fn test_unterminated_object_in_strict_mode() {
    let err = parse_with_options("a: {\nb: 1\n", &Options::strict()).unwrap_err();
    assert_eq!(err.to_string(), "Unterminated block opened at line 1: expected '}' before end of input");
}

#[test]
fn test_indent_option() {
    let doc = parse("a.b.c: x");
    assert_eq!(
        serialize_with_options(&doc, &Options::new().with_indent(4)),
        "a: {\n    b: {\n        c: x\n    }\n}"
    );
}

#[test]
fn test_to_value_and_writer() {
    let author = Author {
        id: 1,
        name: "Ada".to_string(),
        active: true,
        tags: vec![],
    };

    let value = to_value(&author).unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.get("id"), Some(&Value::Number(1.0)));
    assert_eq!(map.get("tags"), Some(&Value::List(vec![])));

    let mut buffer = Vec::new();
    to_writer(&mut buffer, &author).unwrap();
    let author_back: Author = from_reader(buffer.as_slice()).unwrap();
    assert_eq!(author, author_back);
}

#[test]
fn test_unsupported_values() {
    assert!(to_string(&42).is_err());
    assert!(to_value(&None::<u8>).is_err());
    assert!(matches!(
        to_string(&"text"),
        Err(Error::TopLevelNotMapping(kind)) if kind == "string"
    ));
}

#[test]
fn test_missing_field_error() {
    #[derive(Deserialize, Debug)]
    #[allow(dead_code)]
    struct Needs {
        required: String,
    }

    let result: Result<Needs, Error> = from_str("other: 1");
    assert!(result.is_err());
}
