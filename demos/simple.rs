//! Parse a Quill document, read it into Rust types and write it back out.
//!
//! Run with: cargo run --example simple
//! Set RUST_LOG=serde_quill=debug to watch the parser.

use serde::{Deserialize, Serialize};
use serde_quill::{from_str, parse, serialize, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Page {
    title: String,
    draft: bool,
    meta: Meta,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Meta {
    author: String,
    tags: Vec<String>,
}

const SOURCE: &str = "
// Front matter
title: Hello Quill
draft: false
meta.author: Ada /* may change */
meta.tags: [
  intro
  markup
]
";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let doc = parse(SOURCE);
    println!("Parsed tree as JSON:\n{}\n", serde_json::to_string_pretty(&doc)?);

    let page: Page = from_str(SOURCE)?;
    println!("As a struct: {:?}\n", page);

    let text = to_string(&page)?;
    println!("Written back:\n{}\n", text);

    assert_eq!(parse(&text), parse(&serialize(&doc)));
    println!("✓ Round-trip successful");

    Ok(())
}
