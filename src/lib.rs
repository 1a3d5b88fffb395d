//! # serde_quill
//!
//! A parser and serializer for Quill, a line-oriented markup for authoring
//! article content, with Serde support.
//!
//! ## What is Quill?
//!
//! Quill is a hand-writable alternative to JSON for structured content. Plain
//! values are `key: value` lines; objects, lists and *content blocks* (typed
//! rich-content entries such as headings, paragraphs and images) are opened
//! and closed by bracket lines:
//!
//! ```text
//! title: Hello
//! meta.author: Ada
//! tags: [
//!   intro
//!   rust
//! ]
//! body: [[
//!   #h.large: Welcome
//!   A plain line is a paragraph.
//!   <#image: cat.jpg
//!     alt: A cat
//!   >
//! ]]
//! ```
//!
//! String values may in turn carry inline markup (`Click [here|/go] now`),
//! handled by a separate grammar in [`inline`].
//!
//! ## Key Features
//!
//! - **Forgiving**: parsing never fails; malformed lines degrade to a best-effort tree
//! - **Round-trip safe**: `parse(&serialize(&doc)) == doc` for every parsed document
//! - **Dot-path keys**: `a.b: x` and `a.c: y` merge into one nested mapping
//! - **Serde Compatible**: read and write Rust types via `#[derive(Serialize, Deserialize)]`
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_quill::{parse, serialize, ContentItem, Value};
//!
//! let doc = parse("title: Hello\ncount: 3\nbody: [[\n#h: Hi\nSome text.\n]]");
//!
//! assert_eq!(doc.get("count"), Some(&Value::Number(3.0)));
//! let body = doc.get("body").and_then(Value::as_content).unwrap();
//! assert_eq!(body[0], ContentItem::new("h", "Hi"));
//!
//! // Writing it back out reads back to the same tree.
//! assert_eq!(parse(&serialize(&doc)), doc);
//! ```
//!
//! ### Rust types
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_quill::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Page {
//!     title: String,
//!     draft: bool,
//!     tags: Vec<String>,
//! }
//!
//! let page = Page {
//!     title: "Home".to_string(),
//!     draft: false,
//!     tags: vec!["intro".to_string()],
//! };
//!
//! let text = to_string(&page).unwrap();
//! assert_eq!(text, "title: Home\ndraft: false\ntags: [\n  intro\n]");
//!
//! let back: Page = from_str(&text).unwrap();
//! assert_eq!(page, back);
//! ```
//!
//! ### Inline markup
//!
//! ```rust
//! use serde_quill::{parse_inline, serialize_inline};
//!
//! let items = parse_inline("Click [here|/go] now");
//! assert_eq!(items.len(), 3);
//! assert_eq!(items[1].kind, "a");
//! assert_eq!(serialize_inline(&items), "Click [here|/go] now");
//! ```
//!
//! ## Logging
//!
//! The parser and serializer report through the [`log`](https://docs.rs/log)
//! facade: block structure at `debug`, every line at `trace`, and
//! unterminated blocks or values that cannot be written losslessly at
//! `warn`. Install any logger (the demos use `env_logger`) to see them.
//!
//! ## Format Reference
//!
//! The full grammar is documented in the [`syntax`] module.
//!
//! ## Demos
//!
//! - **`simple.rs`** - parse a document and write it back out
//! - **`rich_text.rs`** - content blocks and inline markup
//!
//! Run one with: `cargo run --example <name>`

mod comment;
pub mod de;
pub mod error;
pub mod inline;
pub mod macros;
pub mod map;
pub mod options;
mod scalar;
pub mod ser;
pub mod syntax;
pub mod value;

pub use de::{parse, parse_with_options};
pub use error::{Error, Result};
pub use inline::{parse_inline, serialize_inline};
pub use map::Map;
pub use options::Options;
pub use scalar::coerce;
pub use ser::{serialize, serialize_with_options, to_value};
pub use value::{ContentItem, InlineItem, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a Quill string.
///
/// # Examples
///
/// ```rust
/// use serde_quill::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), "x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if the value has no Quill representation, or if it is
/// not a struct or map: a Quill document is always a mapping.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &Options::default())
}

/// Serialize any `T: Serialize` to a Quill string with custom options.
///
/// # Errors
///
/// Same as [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &Options) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match to_value(value)? {
        Value::Map(map) => Ok(serialize_with_options(&map, options)),
        other => Err(Error::TopLevelNotMapping(other.kind_name().to_string())),
    }
}

/// Serialize any `T: Serialize` to a writer in Quill format.
///
/// # Examples
///
/// ```rust
/// use serde_quill::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(buffer, b"x: 1\ny: 2");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from Quill text.
///
/// The text is parsed leniently, then the tree is handed to `T`'s
/// `Deserialize` impl. Scalars are accepted where strings are expected, so
/// `version: 2` fills a `String` field with `"2"`.
///
/// # Examples
///
/// ```rust
/// use serde_quill::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the parsed tree does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Value::Map(parse(s)))
}

/// Deserialize an instance of type `T` from an I/O stream of Quill.
///
/// # Examples
///
/// ```rust
/// use serde_quill::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x: 1\ny: 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails or the data does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of Quill text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or the data does not fit type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Article {
        title: String,
        published: bool,
        tags: Vec<String>,
        author: Author,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Author {
        name: String,
        email: Option<String>,
    }

    #[test]
    fn test_serialize_deserialize_point() {
        let point = Point { x: 1, y: 2 };
        let text = to_string(&point).unwrap();
        let point_back: Point = from_str(&text).unwrap();
        assert_eq!(point, point_back);
    }

    #[test]
    fn test_serialize_deserialize_article() {
        let article = Article {
            title: "Hello".to_string(),
            published: true,
            tags: vec!["rust".to_string(), "2024".to_string()],
            author: Author {
                name: "Ada".to_string(),
                email: None,
            },
        };

        let text = to_string(&article).unwrap();
        assert!(!text.contains("email"));
        let article_back: Article = from_str(&text).unwrap();
        assert_eq!(article, article_back);
    }

    #[test]
    fn test_dot_path_document_into_struct() {
        let text = "title: Hi\npublished: false\ntags: [\n]\nauthor.name: Ada\nauthor.email: ada@example.com";
        let article: Article = from_str(text).unwrap();
        assert_eq!(article.author.email.as_deref(), Some("ada@example.com"));
        assert!(article.tags.is_empty());
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        let err = to_string(&vec![1, 2, 3]).unwrap_err();
        assert_eq!(err, Error::TopLevelNotMapping("list".to_string()));
    }

    #[test]
    fn test_custom_options() {
        let article = Article {
            title: "Hello".to_string(),
            published: false,
            tags: vec![],
            author: Author {
                name: "Ada".to_string(),
                email: None,
            },
        };

        let text = to_string_with_options(&article, &Options::new().with_indent(4)).unwrap();
        assert!(text.contains("\n    name: Ada\n"));
        let article_back: Article = from_str(&text).unwrap();
        assert_eq!(article, article_back);
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let result: Result<Point> = from_slice(&[0xff, 0xfe]);
        assert!(result.is_err());
    }
}
