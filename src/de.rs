//! Quill parsing.
//!
//! This module turns Quill text into a [`Map`]. The grammar is line driven:
//! every line is comment-stripped and trimmed, then classified by its shape.
//!
//! ## Overview
//!
//! - **Single pass**: every block parser only moves forward through the lines
//! - **One block routine**: documents, `{...}` objects and `<...>` property
//!   blocks share one parser, parameterised by the line that closes them
//! - **Lenient**: lines without a colon are skipped and a block missing its
//!   closer runs to the end of input; [`Options::strict`] reports the latter
//!
//! ## Usage
//!
//! ```rust
//! use serde_quill::{parse, Value};
//!
//! let doc = parse("title: Hello\ncount: 3\nactive: true");
//!
//! assert_eq!(doc.get("title"), Some(&Value::from("Hello")));
//! assert_eq!(doc.get("count"), Some(&Value::Number(3.0)));
//! assert_eq!(doc.get("active"), Some(&Value::Bool(true)));
//! ```

use crate::comment::{is_line_comment, strip_block_comments};
use crate::scalar::coerce;
use crate::{ContentItem, Error, Map, Options, Result, Value};

/// Parses a document, never failing.
///
/// Malformed input degrades to a best-effort mapping. Use
/// [`parse_with_options`] with [`Options::strict`] to reject unterminated blocks.
pub fn parse(text: &str) -> Map {
    Parser::new(text).document()
}

/// Parses a document with explicit options.
///
/// # Errors
///
/// With `options.strict` set, returns [`Error::UnterminatedBlock`] for the
/// first block that reaches the end of input without its closing line.
pub fn parse_with_options(text: &str, options: &Options) -> Result<Map> {
    let mut parser = Parser::new(text);
    let map = parser.document();
    match parser.unterminated {
        Some((line, expected)) if options.strict => Err(Error::unterminated(line, expected)),
        _ => Ok(map),
    }
}

/// Position in the input plus the block-comment flag carried between lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cursor {
    line: usize,
    in_comment: bool,
}

/// The line that ends a mapping block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Closer {
    EndOfInput,
    Brace,
    Angle,
}

impl Closer {
    fn token(self) -> Option<&'static str> {
        match self {
            Closer::EndOfInput => None,
            Closer::Brace => Some("}"),
            Closer::Angle => Some(">"),
        }
    }
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    // 1-based opener line and expected closer of the first block left open.
    unterminated: Option<(usize, &'static str)>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Parser {
            lines: text.lines().collect(),
            unterminated: None,
        }
    }

    fn document(&mut self) -> Map {
        log::debug!("parsing document of {} lines", self.lines.len());
        let start = Cursor {
            line: 0,
            in_comment: false,
        };
        let (map, _) = self.block(start, Closer::EndOfInput, 0);
        log::debug!("parsed document with {} top-level keys", map.len());
        map
    }

    /// Reads the line under the cursor with comments stripped and whitespace trimmed.
    fn read(&self, at: Cursor) -> Option<(String, Cursor)> {
        let &raw = self.lines.get(at.line)?;
        log::trace!("line {}: {}", at.line + 1, raw);
        let (visible, in_comment) = strip_block_comments(raw, at.in_comment);
        let next = Cursor {
            line: at.line + 1,
            in_comment,
        };
        Some((visible.trim().to_string(), next))
    }

    fn unclosed(&mut self, opener: usize, closer: &'static str) {
        log::warn!(
            "block opened at line {} reached end of input without '{}'",
            opener + 1,
            closer
        );
        self.unterminated.get_or_insert((opener + 1, closer));
    }

    /// Parses `key: value` lines into a mapping until `closer`.
    fn block(&mut self, mut at: Cursor, closer: Closer, opener: usize) -> (Map, Cursor) {
        let mut map = Map::new();

        while let Some((text, next)) = self.read(at) {
            let line = at.line;
            at = next;
            if closer.token() == Some(text.as_str()) {
                return (map, at);
            }
            if text.is_empty() || is_line_comment(&text) {
                continue;
            }
            at = self.entry(&mut map, &text, line, at);
        }

        if let Some(token) = closer.token() {
            self.unclosed(opener, token);
        }
        (map, at)
    }

    /// Handles one non-blank line of a mapping block; may consume following lines.
    fn entry(&mut self, map: &mut Map, text: &str, line: usize, at: Cursor) -> Cursor {
        if let Some(key) = text.strip_suffix("::").filter(|key| !key.contains(':')) {
            let (value, at) = self.multiline(at, line);
            map.merge_path(key.trim(), Value::String(value));
            return at;
        }

        let Some((key, rest)) = text.split_once(':') else {
            log::trace!("line {} has no colon, skipping", line + 1);
            return at;
        };
        let (value, at) = self.value(rest.trim(), line, at);
        map.merge_path(key.trim(), value);
        at
    }

    /// Types the text after a key's colon, opening a nested block if it ends in an opener.
    fn value(&mut self, rest: &str, line: usize, at: Cursor) -> (Value, Cursor) {
        if rest.ends_with("[[") {
            let (items, at) = self.content(at, line);
            (Value::Content(items), at)
        } else if rest.ends_with('[') {
            self.array(at, line)
        } else if rest.ends_with('{') {
            log::debug!("object opened at line {}", line + 1);
            let (map, at) = self.block(at, Closer::Brace, line);
            (Value::Map(map), at)
        } else if is_inline_object(rest) {
            (Value::Map(inline_object(rest)), at)
        } else {
            (scalar(rest), at)
        }
    }

    /// Captures verbatim lines up to a line that is exactly `::`.
    fn multiline(&mut self, at: Cursor, opener: usize) -> (String, Cursor) {
        let mut captured = Vec::new();
        let mut line = at.line;

        while let Some(&raw) = self.lines.get(line) {
            line += 1;
            let text = raw.trim();
            if text == "::" {
                return (captured.join("\n"), Cursor { line, ..at });
            }
            captured.push(text);
        }

        self.unclosed(opener, "::");
        (captured.join("\n"), Cursor { line, ..at })
    }

    /// Reads list elements; a list of content-shaped mappings comes back as content.
    fn array(&mut self, mut at: Cursor, opener: usize) -> (Value, Cursor) {
        log::debug!("array opened at line {}", opener + 1);
        let mut items = Vec::new();

        while let Some((text, next)) = self.read(at) {
            let line = at.line;
            at = next;
            match text.as_str() {
                "]" => return (list_or_content(items), at),
                "" => {}
                _ if is_line_comment(&text) => {}
                "[[" => {
                    let (nested, next) = self.content(at, line);
                    items.push(Value::Content(nested));
                    at = next;
                }
                "[" => {
                    let (nested, next) = self.array(at, line);
                    items.push(nested);
                    at = next;
                }
                "{" => {
                    let (map, next) = self.block(at, Closer::Brace, line);
                    items.push(Value::Map(map));
                    at = next;
                }
                _ => items.push(coerce(&text)),
            }
        }

        self.unclosed(opener, "]");
        (list_or_content(items), at)
    }

    fn content(&mut self, mut at: Cursor, opener: usize) -> (Vec<ContentItem>, Cursor) {
        log::debug!("content block opened at line {}", opener + 1);
        let mut items = Vec::new();

        while let Some((text, next)) = self.read(at) {
            let line = at.line;
            at = next;
            if text == "]]" {
                return (items, at);
            }
            if text.is_empty() || is_line_comment(&text) {
                continue;
            }

            if let Some(header) = text.strip_prefix('<') {
                let (item, next) = self.property_item(header.trim(), line, at);
                items.push(item);
                at = next;
            } else if text.starts_with('#') {
                items.push(parse_header(&text));
            } else {
                items.push(ContentItem::new("p", text));
            }
        }

        self.unclosed(opener, "]]");
        (items, at)
    }

    /// Parses a `<#type: value` item: an optional nested block, then properties up to `>`.
    fn property_item(&mut self, header: &str, line: usize, mut at: Cursor) -> (ContentItem, Cursor) {
        let mut item = parse_header(header);

        // Text before a trailing `[[` is dropped: the nested block is the value.
        if item.value.as_str().map_or(false, |v| v.ends_with("[[")) {
            let (nested, next) = self.content(at, line);
            item.value = Value::Content(nested);
            at = next;
        }

        let (mut props, at) = self.block(at, Closer::Angle, line);

        if let Some(value) = props.remove("value") {
            item.value = value;
        }
        let mods = match props.get("mods") {
            Some(Value::List(mods)) => Some(mods.iter().map(Value::to_string).collect()),
            _ => None,
        };
        if let Some(mods) = mods {
            item.mods = mods;
            props.remove("mods");
        }
        item.props = props;

        (item, at)
    }
}

/// Decodes `#type.mod1.mod2: value`; text without the sigil is a paragraph.
pub(crate) fn parse_header(text: &str) -> ContentItem {
    let Some(header) = text.strip_prefix('#') else {
        return ContentItem::new("p", text);
    };

    let (head, value) = match header.split_once(':') {
        Some((head, value)) => (head, value.trim()),
        None => (header, ""),
    };
    let mut parts = head.split('.').map(str::trim);
    let kind = parts.next().unwrap_or_default();

    ContentItem::new(kind, value).with_mods(parts.map(str::to_string).collect())
}

fn list_or_content(items: Vec<Value>) -> Value {
    match ContentItem::from_list(&items) {
        Some(content) => Value::Content(content),
        None => Value::List(items),
    }
}

fn scalar(text: &str) -> Value {
    if text.is_empty() {
        Value::String(String::new())
    } else {
        coerce(text)
    }
}

fn is_inline_object(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('{') && text.ends_with('}')
}

/// Parses a one-line `{key: value, other: {nested: value}}` object.
fn inline_object(text: &str) -> Map {
    let body = &text[1..text.len() - 1];
    let mut map = Map::new();

    for entry in split_top_level(body) {
        let Some((key, rest)) = entry.split_once(':') else {
            continue;
        };
        let rest = rest.trim();
        let value = if is_inline_object(rest) {
            Value::Map(inline_object(rest))
        } else {
            scalar(rest)
        };
        map.merge_path(key.trim(), value);
    }

    map
}

/// Splits on commas that are not inside nested braces.
fn split_top_level(body: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, ch) in body.char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                entries.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(body[start..].trim());

    entries.into_iter().filter(|e| !e.is_empty()).collect()
}
