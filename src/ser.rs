//! Quill serialization.
//!
//! This module writes a [`Map`] back out as Quill text, and converts any
//! `T: Serialize` into a [`Value`] so Rust types can be written too.
//!
//! ## Overview
//!
//! The writer is the inverse of the parser, up to formatting:
//!
//! - **Blocks**: nested mappings, lists and content blocks are written as
//!   `{`, `[` and `[[` blocks, indented for readability
//! - **Multiline strings**: strings that would not read back from a single
//!   `key: value` line (newlines, surrounding spaces, `true`, `42`, ...) use
//!   the `key::` ... `::` form
//! - **Content items**: `#type.mods: value` when that reads back exactly,
//!   bare text for plain paragraphs, and the `<...>` property form otherwise
//!
//! Output is not byte-identical to hand-written input, but parsing it again
//! gives the same tree:
//!
//! ```rust
//! use serde_quill::{parse, serialize};
//!
//! let doc = parse("a.b: x\nbody: [[\n#h: Hi\nSome text.\n]]");
//! let text = serialize(&doc);
//! assert_eq!(text, "a: {\n  b: x\n}\nbody: [[\n  #h: Hi\n  Some text.\n]]");
//! assert_eq!(parse(&text), doc);
//! ```

use crate::scalar::coerces_away;
use crate::{ContentItem, Error, Map, Options, Result, Value};
use serde::{ser, Serialize};

/// Writes a document with default options.
pub fn serialize(map: &Map) -> String {
    serialize_with_options(map, &Options::default())
}

/// Writes a document with explicit options.
///
/// # Examples
///
/// ```rust
/// use serde_quill::{parse, serialize_with_options, Options};
///
/// let doc = parse("tags: [\none\ntwo\n]");
/// let text = serialize_with_options(&doc, &Options::new().with_indent(0));
/// assert_eq!(text, "tags: [\none\ntwo\n]");
/// ```
pub fn serialize_with_options(map: &Map, options: &Options) -> String {
    let mut writer = Writer {
        lines: Vec::new(),
        indent: options.indent,
    };
    writer.map_entries(map, 0);
    writer.lines.join("\n")
}

struct Writer {
    lines: Vec<String>,
    indent: usize,
}

impl Writer {
    fn line(&mut self, depth: usize, text: &str) {
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", " ".repeat(depth * self.indent), text));
        }
    }

    fn map_entries(&mut self, map: &Map, depth: usize) {
        for (key, value) in map {
            self.entry(key, value, depth);
        }
    }

    fn entry(&mut self, key: &str, value: &Value, depth: usize) {
        if key.contains('.') || key.contains(':') {
            log::warn!("key '{}' will not read back as a single key", key);
        }

        match value {
            Value::String(s) if needs_multiline(s) => {
                self.line(depth, &format!("{}::", key));
                for line in s.split('\n') {
                    if line != line.trim() || line == "::" {
                        log::warn!("multiline string under '{}' will not read back exactly", key);
                    }
                    self.line(depth + 1, line);
                }
                self.line(depth, "::");
            }
            Value::Map(map) => {
                self.line(depth, &format!("{}: {{", key));
                self.map_entries(map, depth + 1);
                self.line(depth, "}");
            }
            Value::List(items) => match ContentItem::from_list(items) {
                Some(content) => self.content_block(&format!("{}: [[", key), &content, depth),
                None => {
                    self.line(depth, &format!("{}: [", key));
                    self.list_items(items, depth + 1);
                    self.line(depth, "]");
                }
            },
            Value::Content(items) => self.content_block(&format!("{}: [[", key), items, depth),
            scalar => {
                let text = scalar.to_string();
                if text.is_empty() {
                    self.line(depth, &format!("{}:", key));
                } else {
                    self.line(depth, &format!("{}: {}", key, text));
                }
            }
        }
    }

    fn list_items(&mut self, items: &[Value], depth: usize) {
        for item in items {
            match item {
                Value::List(nested) => match ContentItem::from_list(nested) {
                    Some(content) => self.content_block("[[", &content, depth),
                    None => {
                        self.line(depth, "[");
                        self.list_items(nested, depth + 1);
                        self.line(depth, "]");
                    }
                },
                Value::Content(content) => self.content_block("[[", content, depth),
                Value::Map(map) => {
                    self.line(depth, "{");
                    self.map_entries(map, depth + 1);
                    self.line(depth, "}");
                }
                scalar => {
                    let text = scalar.to_string();
                    if scalar.is_string() && !fits_list_line(&text) {
                        log::warn!("list element {:?} will not read back as the same string", text);
                    }
                    self.line(depth, &text);
                }
            }
        }
    }

    fn content_block(&mut self, opener: &str, items: &[ContentItem], depth: usize) {
        self.line(depth, opener);
        for item in items {
            self.content_item(item, depth + 1);
        }
        self.line(depth, "]]");
    }

    fn content_item(&mut self, item: &ContentItem, depth: usize) {
        let header_value = match &item.value {
            Value::String(s) if fits_header(s) => Some(s.as_str()),
            _ => None,
        };
        let header_mods = item.mods.iter().all(|m| fits_mod(m));

        if let Some(text) = header_value {
            if item.is_plain_paragraph() && fits_bare_line(text) {
                self.line(depth, text);
                return;
            }
            if item.props.is_empty() && header_mods {
                self.line(depth, &header(item, true, text));
                return;
            }
        }

        match (&item.value, header_value) {
            (Value::Content(nested), _) => {
                self.line(depth, &format!("<{}: [[", header(item, header_mods, "")));
                for nested_item in nested {
                    self.content_item(nested_item, depth + 1);
                }
                self.line(depth, "]]");
            }
            (_, Some(text)) => {
                self.line(depth, &format!("<{}", header(item, header_mods, text)));
            }
            (value, None) => {
                self.line(depth, &format!("<{}", header(item, header_mods, "")));
                self.entry("value", value, depth + 1);
            }
        }

        if !header_mods {
            let mods = item.mods.iter().map(|m| Value::from(m.as_str())).collect();
            self.entry("mods", &Value::List(mods), depth + 1);
        }
        self.map_entries(&item.props, depth + 1);
        self.line(depth, ">");
    }
}

/// `#type.mods: value`, leaving out the modifiers when they go in the property block.
fn header(item: &ContentItem, with_mods: bool, value: &str) -> String {
    let mut out = format!("#{}", item.kind);
    if with_mods {
        for m in &item.mods {
            out.push('.');
            out.push_str(m);
        }
    }
    if !value.is_empty() {
        out.push_str(": ");
        out.push_str(value);
    }
    out
}

/// Strings a `key: value` line cannot carry.
fn needs_multiline(s: &str) -> bool {
    s.contains('\n')
        || s != s.trim()
        || coerces_away(s)
        || s.contains("/*")
        || s.ends_with('[')
        || s.ends_with('{')
        || (s.starts_with('{') && s.ends_with('}'))
}

fn fits_list_line(s: &str) -> bool {
    !s.is_empty()
        && s == s.trim()
        && !s.contains('\n')
        && !s.contains("/*")
        && !s.starts_with("//")
        && !coerces_away(s)
        && !matches!(s, "]" | "[" | "[[" | "{")
}

fn fits_header(s: &str) -> bool {
    s == s.trim() && !s.contains('\n') && !s.contains("/*") && !s.ends_with("[[")
}

fn fits_mod(m: &str) -> bool {
    m == m.trim() && !m.contains(['.', ':', '\n']) && !m.contains("/*")
}

/// Bare text reads back as a `p` item only if it does not look like anything else.
fn fits_bare_line(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('#')
        && !s.starts_with('<')
        && !s.starts_with("//")
        && s != "]]"
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Errors
///
/// Fails on values with no Quill representation: `None`/unit at the top level
/// or inside a list, tuple or struct enum variants, and map keys that are not
/// scalars. `None` fields of structs and maps are left out.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_quill::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.as_map().and_then(|m| m.get("x")), Some(&Value::Number(1.0)));
/// ```
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value
        .serialize(ValueSerializer)?
        .ok_or_else(|| Error::unsupported_type("null"))
}

/// Builds a [`Value`]; `None` stands for a serde null, which Quill cannot hold.
struct ValueSerializer;

struct SerializeVec {
    vec: Vec<Value>,
}

struct SerializeMap {
    map: Map,
    current_key: Option<String>,
}

struct SerializeVariant {
    name: &'static str,
    value: Value,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<Option<Value>, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = ser::Impossible<Option<Value>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        Ok(Some(Value::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<Value>> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Option<Value>> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Option<Value>> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Option<Value>> {
        self.serialize_f64(v as f64)
    }

    fn serialize_u8(self, v: u8) -> Result<Option<Value>> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Option<Value>> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Option<Value>> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Option<Value>> {
        self.serialize_f64(v as f64)
    }

    fn serialize_f32(self, v: f32) -> Result<Option<Value>> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Option<Value>> {
        Ok(Some(Value::Number(v)))
    }

    fn serialize_char(self, v: char) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Option<Value>> {
        Ok(Some(Value::String(v.to_string())))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Option<Value>> {
        let vec = v.iter().map(|&b| Value::Number(f64::from(b))).collect();
        Ok(Some(Value::List(vec)))
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        Ok(Some(Value::String(variant.to_string())))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        let variant = SerializeVariant {
            name: variant,
            value: to_value(value)?,
        };
        Ok(Some(variant.into_value()))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: Map::new(),
            current_key: None,
        }
    }

    fn insert<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(value) = value.serialize(ValueSerializer)? {
            self.map.insert(key, value);
        }
        Ok(())
    }
}

impl SerializeVariant {
    /// `{variant: value}`, the externally tagged enum form.
    fn into_value(self) -> Value {
        let mut map = Map::new();
        map.insert(self.name.to_string(), self.value);
        Value::Map(map)
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::List(self.vec)))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::List(self.vec)))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::List(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            scalar if scalar.is_scalar() => {
                self.current_key = Some(scalar.to_string());
                Ok(())
            }
            other => Err(Error::unsupported_type(&format!(
                "{} as a map key",
                other.kind_name()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(key, value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::Map(self.map)))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        Ok(Some(Value::Map(self.map)))
    }
}
