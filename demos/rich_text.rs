//! Content blocks and inline markup.
//!
//! Run with: cargo run --example rich_text

use serde_quill::{parse, parse_inline, serialize, serialize_inline, ContentItem, Value};
use std::error::Error;

const ARTICLE: &str = r#"
title: A "quoted" title -- with dashes
body: [[
  #h.large: Welcome
  Read [the guide|/docs] before you [start|#button.primary|size: 2].
  <#image.wide: cat.jpg
    alt: A cat
    caption: Line one[/]line two
  >
  <#grid: [[
    #p: Left column
    Right column
  ]]
    gap: 8
  >
]]
"#;

fn describe(item: &ContentItem, depth: usize) {
    let pad = "  ".repeat(depth);
    match &item.value {
        Value::Content(nested) => {
            println!("{}{} ({} nested items)", pad, item.kind, nested.len());
            for child in nested {
                describe(child, depth + 1);
            }
        }
        Value::String(text) => {
            println!("{}{}{:?}: {}", pad, item.kind, item.mods, text);
            for span in parse_inline(text) {
                if span.kind != "text" {
                    println!("{}  span {} {:?} {:?}", pad, span.kind, span.value, span.props);
                }
            }
        }
        other => println!("{}{}: {}", pad, item.kind, other),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let doc = parse(ARTICLE);

    if let Some(title) = doc.get("title").and_then(Value::as_str) {
        let spans = parse_inline(title);
        println!("Title: {}", spans[0].value);
        println!("Title markup again: {}\n", serialize_inline(&spans));
    }

    let body = doc
        .get("body")
        .and_then(Value::as_content)
        .ok_or("document has no body")?;
    for item in body {
        describe(item, 0);
    }

    let text = serialize(&doc);
    println!("\nNormalised document:\n{}", text);
    assert_eq!(parse(&text), doc);

    Ok(())
}
